//! Named transcoding paths and the session registry.
//!
//! The host addresses each rate variant and direction as its own named
//! transcoding path: `lintosilk8` encodes 8 kHz linear PCM to SILK,
//! `silk8tolin` decodes it back, and likewise for 12/16/24 kHz. All eight
//! paths share one codec primitive and one set of process defaults, held by
//! [`TranslatorRegistry`]; every session gets fully independent state.

use std::sync::Arc;
use tracing::info;

use crate::decoder::SilkDecoder;
use crate::encoder::SilkEncoder;
use crate::error::{Result, SilkError};
use crate::negotiate::{negotiate, CodecDefaults, FormatAttributes};
use crate::primitive::SpeechCodec;
use crate::{SampleRateClass, VariantConfig};

/// Direction of a transcoding path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Linear PCM in, compressed frames out.
    Encode,
    /// Compressed frames in, linear PCM out.
    Decode,
}

/// Static descriptor of one named transcoding path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslatorPath {
    /// The path's registered name.
    pub name: &'static str,
    /// The rate variant it serves.
    pub class: SampleRateClass,
    /// Which way audio flows through it.
    pub direction: Direction,
}

/// The eight transcoding paths: each rate variant, both directions.
pub const PATHS: [TranslatorPath; 8] = [
    TranslatorPath {
        name: "lintosilk8",
        class: SampleRateClass::Nb8000,
        direction: Direction::Encode,
    },
    TranslatorPath {
        name: "silk8tolin",
        class: SampleRateClass::Nb8000,
        direction: Direction::Decode,
    },
    TranslatorPath {
        name: "lintosilk12",
        class: SampleRateClass::Mb12000,
        direction: Direction::Encode,
    },
    TranslatorPath {
        name: "silk12tolin",
        class: SampleRateClass::Mb12000,
        direction: Direction::Decode,
    },
    TranslatorPath {
        name: "lintosilk16",
        class: SampleRateClass::Wb16000,
        direction: Direction::Encode,
    },
    TranslatorPath {
        name: "silk16tolin",
        class: SampleRateClass::Wb16000,
        direction: Direction::Decode,
    },
    TranslatorPath {
        name: "lintosilk24",
        class: SampleRateClass::Swb24000,
        direction: Direction::Encode,
    },
    TranslatorPath {
        name: "silk24tolin",
        class: SampleRateClass::Swb24000,
        direction: Direction::Decode,
    },
];

/// Factory for transcoding sessions across all rate variants.
///
/// Built once at process start. Construction queries the primitive's state
/// sizes a single time; every session allocates its own block at the cached
/// size, so the primitive is never asked again.
pub struct TranslatorRegistry {
    codec: Arc<dyn SpeechCodec>,
    defaults: CodecDefaults,
    encoder_state_size: usize,
    decoder_state_size: usize,
}

impl TranslatorRegistry {
    /// Create a registry around a codec primitive and process defaults.
    pub fn new(codec: Arc<dyn SpeechCodec>, defaults: CodecDefaults) -> Self {
        let encoder_state_size = codec.encoder_state_size();
        let decoder_state_size = codec.decoder_state_size();
        info!(
            version = %codec.version(),
            encoder_state_size,
            decoder_state_size,
            "speech codec registered"
        );

        Self {
            codec,
            defaults,
            encoder_state_size,
            decoder_state_size,
        }
    }

    /// Get the process-wide default parameters.
    pub fn defaults(&self) -> &CodecDefaults {
        &self.defaults
    }

    /// List every transcoding path this registry can build sessions for.
    pub fn paths(&self) -> &'static [TranslatorPath] {
        &PATHS
    }

    /// Look up a path descriptor by its registered name.
    pub fn find_path(&self, name: &str) -> Option<&'static TranslatorPath> {
        PATHS.iter().find(|p| p.name == name)
    }

    /// Cached size of one encoder state block.
    pub fn encoder_state_size(&self) -> usize {
        self.encoder_state_size
    }

    /// Cached size of one decoder state block.
    pub fn decoder_state_size(&self) -> usize {
        self.decoder_state_size
    }

    /// Build an encode session for a destination variant.
    ///
    /// Negotiates the session parameters from the destination's declared
    /// attributes, the source PCM rate, and the process defaults.
    pub fn new_encoder(
        &self,
        destination: SampleRateClass,
        attrs: &FormatAttributes,
        source_rate_hz: u32,
    ) -> SilkEncoder {
        let params = negotiate(
            &self.defaults,
            VariantConfig::new(destination),
            attrs,
            source_rate_hz,
        );
        SilkEncoder::new(Arc::clone(&self.codec), self.encoder_state_size, params)
    }

    /// Build a decode session producing PCM at the variant's native rate.
    pub fn new_decoder(&self, destination: SampleRateClass) -> SilkDecoder {
        SilkDecoder::new(
            Arc::clone(&self.codec),
            self.decoder_state_size,
            destination.hz(),
        )
    }

    /// Build a decode session for a raw sample rate.
    pub fn new_decoder_for_rate(&self, rate_hz: u32) -> Result<SilkDecoder> {
        let class =
            SampleRateClass::from_hz(rate_hz).ok_or(SilkError::UnsupportedSampleRate(rate_hz))?;
        Ok(self.new_decoder(class))
    }
}
