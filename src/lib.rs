//! # Transcode SILK
//!
//! SILK speech codec transcoding support for linear-PCM media pipelines.
//!
//! SILK is a variable-bitrate, packet-oriented speech codec operating at
//! four internal sample rates. The codec itself only consumes and produces
//! fixed-duration internal packets (20 ms), while host pipelines deliver
//! PCM in arbitrarily sized chunks. This crate absorbs that mismatch:
//!
//! - **Encode side**: accumulates PCM chunks, encodes as many internal
//!   packets as the buffer holds, and batches their compressed output into
//!   a single outbound frame.
//! - **Decode side**: unpacks all internal subframes of a received packet
//!   in one call, and synthesizes concealment audio when the host signals
//!   a lost packet.
//! - **Negotiation**: resolves per-session encoder parameters (bitrate,
//!   DTX, FEC, expected packet loss, internal sample rate) from format
//!   attributes and process-wide defaults.
//!
//! The raw codec primitives (bitstream encode/decode, concealment
//! synthesis) are supplied by the host through the [`SpeechCodec`]
//! capability trait; this crate owns the buffering, batching, and
//! per-variant session state around them.
//!
//! ## Usage
//!
//! ```ignore
//! use transcode_silk::{CodecDefaults, FormatAttributes, SampleRateClass, TranslatorRegistry};
//!
//! let registry = TranslatorRegistry::new(codec, CodecDefaults::default());
//! let mut encoder = registry.new_encoder(
//!     SampleRateClass::Wb16000,
//!     &FormatAttributes::new().with_fec(true),
//!     16000,
//! );
//!
//! encoder.accumulate(&pcm_chunk)?;
//! if let Some(frame) = encoder.drain() {
//!     send(frame);
//! }
//! ```

#![warn(missing_docs)]

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod negotiate;
pub mod primitive;
pub mod translator;

pub use decoder::SilkDecoder;
pub use encoder::SilkEncoder;
pub use error::{Result, SilkError};
pub use frame::{CompressedFrame, PcmFrame};
pub use negotiate::{negotiate, CodecDefaults, FormatAttributes, NegotiatedParams};
pub use primitive::{CodecState, CodecStatus, DecoderControl, SpeechCodec};
pub use translator::{Direction, TranslatorPath, TranslatorRegistry};

use std::fmt;

/// Duration of one internal codec packet in milliseconds.
pub const PACKET_LENGTH_MS: u32 = 20;

/// Upper bound on compressed bytes produced for one internal packet.
pub const MAX_BYTES_PER_PACKET: usize = 1024;

/// Upper bound on PCM samples carried by one internal packet.
pub const MAX_SAMPLES_PER_PACKET: usize = 960;

/// Maximum number of internal frames packed into one compressed packet.
pub const MAX_INTERNAL_FRAMES: usize = 5;

/// How many packets ahead redundant (LBRR) coding data may be carried.
pub const MAX_LBRR_DELAY: usize = 2;

/// Capacity of the encode-side accumulation buffer, in samples.
pub const ENCODE_BUFFER_SAMPLES: usize = MAX_SAMPLES_PER_PACKET * MAX_INTERNAL_FRAMES;

/// Capacity of the batched compressed output of one drain, in bytes.
pub const COMPRESSED_BUFFER_BYTES: usize = MAX_BYTES_PER_PACKET * MAX_INTERNAL_FRAMES;

/// The four sample rates the codec can run at internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleRateClass {
    /// Narrowband: 8 kHz.
    Nb8000 = 8000,
    /// Medium-band: 12 kHz.
    Mb12000 = 12000,
    /// Wideband: 16 kHz.
    Wb16000 = 16000,
    /// Super-wideband: 24 kHz.
    Swb24000 = 24000,
}

impl SampleRateClass {
    /// All supported rate classes, lowest first.
    pub const ALL: [SampleRateClass; 4] = [
        SampleRateClass::Nb8000,
        SampleRateClass::Mb12000,
        SampleRateClass::Wb16000,
        SampleRateClass::Swb24000,
    ];

    /// Get the rate class for a sample rate in Hz.
    pub fn from_hz(hz: u32) -> Option<Self> {
        match hz {
            8000 => Some(Self::Nb8000),
            12000 => Some(Self::Mb12000),
            16000 => Some(Self::Wb16000),
            24000 => Some(Self::Swb24000),
            _ => None,
        }
    }

    /// Get the sample rate in Hz.
    pub fn hz(&self) -> u32 {
        *self as u32
    }

    /// Get the rate class name used in transcoding path names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nb8000 => "silk8",
            Self::Mb12000 => "silk12",
            Self::Wb16000 => "silk16",
            Self::Swb24000 => "silk24",
        }
    }
}

impl fmt::Display for SampleRateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.hz())
    }
}

/// Static per-variant parameters shared by every session of a rate class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantConfig {
    /// The variant's sample rate class.
    pub class: SampleRateClass,
    /// Internal packet duration in milliseconds.
    pub packet_ms: u32,
}

impl VariantConfig {
    /// Create the configuration for a rate class.
    pub const fn new(class: SampleRateClass) -> Self {
        Self {
            class,
            packet_ms: PACKET_LENGTH_MS,
        }
    }

    /// Samples per internal packet at this variant's native rate.
    pub fn packet_samples(&self) -> usize {
        (self.packet_ms * self.class.hz() / 1000) as usize
    }
}

/// The process-wide variant table, one entry per rate class.
pub const VARIANTS: [VariantConfig; 4] = [
    VariantConfig::new(SampleRateClass::Nb8000),
    VariantConfig::new(SampleRateClass::Mb12000),
    VariantConfig::new(SampleRateClass::Wb16000),
    VariantConfig::new(SampleRateClass::Swb24000),
];
