//! Per-session encode parameter negotiation.
//!
//! Each transcoding session resolves its encoder parameters once, at
//! construction, from three inputs: the process-wide defaults, the
//! destination format's declared attributes, and the source PCM rate. The
//! result is read-only for the life of the session.

use crate::{SampleRateClass, VariantConfig};

/// Process-wide default encoder parameters.
///
/// Constructed once at startup and passed by reference into every
/// session's negotiation; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecDefaults {
    /// Fallback PCM rate when the source rate is not a supported class.
    pub api_sample_rate_hz: u32,
    /// Expected packet loss percentage hint.
    pub packet_loss_percent: u8,
    /// Whether in-band forward error correction is enabled.
    pub use_in_band_fec: bool,
    /// Whether discontinuous transmission is enabled.
    pub use_dtx: bool,
    /// Encoder complexity setting.
    pub complexity: u8,
    /// Target bitrate in bits per second.
    pub bit_rate_bps: u32,
}

impl Default for CodecDefaults {
    fn default() -> Self {
        Self {
            api_sample_rate_hz: 8000,
            packet_loss_percent: 0,
            use_in_band_fec: false,
            use_dtx: false,
            complexity: 2,
            bit_rate_bps: 10_000,
        }
    }
}

/// Tunable attributes declared by the destination format.
///
/// The host parses its attribute strings before this crate is involved;
/// here each attribute is either a well-formed value or absent. Absence is
/// not an error; the corresponding process default applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatAttributes {
    /// Discontinuous transmission flag, if declared.
    pub use_dtx: Option<bool>,
    /// In-band forward error correction flag, if declared.
    pub use_fec: Option<bool>,
    /// Expected packet loss percentage, if declared.
    pub packet_loss_percent: Option<u8>,
    /// Maximum bitrate in bits per second, if declared.
    pub max_bit_rate_bps: Option<u32>,
}

impl FormatAttributes {
    /// Create an empty attribute set (all defaults apply).
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the DTX flag.
    pub fn with_dtx(mut self, enabled: bool) -> Self {
        self.use_dtx = Some(enabled);
        self
    }

    /// Declare the FEC flag.
    pub fn with_fec(mut self, enabled: bool) -> Self {
        self.use_fec = Some(enabled);
        self
    }

    /// Declare the expected packet loss percentage.
    pub fn with_packet_loss_percent(mut self, percent: u8) -> Self {
        self.packet_loss_percent = Some(percent);
        self
    }

    /// Declare the maximum bitrate in bits per second.
    pub fn with_max_bit_rate(mut self, bps: u32) -> Self {
        self.max_bit_rate_bps = Some(bps);
        self
    }
}

/// The resolved, per-session encoder parameter set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiatedParams {
    /// Rate of the PCM crossing the host boundary, in Hz.
    pub api_sample_rate_hz: u32,
    /// The codec's internal rate, never above `api_sample_rate_hz`.
    pub internal_sample_rate_hz: u32,
    /// Samples per internal packet at the host-facing rate.
    pub packet_size_samples: usize,
    /// Encoder complexity setting.
    pub complexity: u8,
    /// Whether discontinuous transmission is enabled.
    pub use_dtx: bool,
    /// Whether in-band forward error correction is enabled.
    pub use_in_band_fec: bool,
    /// Expected packet loss percentage hint.
    pub packet_loss_percent: u8,
    /// Target bitrate in bits per second.
    pub bit_rate_bps: u32,
}

/// Resolve the encoder parameters for one session.
///
/// The destination variant sets the desired internal rate and packet
/// duration; the source PCM rate sets the host-facing rate. The codec
/// forbids an internal rate above the host-facing rate, so the internal
/// rate is clamped down when the source is slower than the destination
/// class. A source rate outside the supported classes falls back to the
/// default rate. Pure function of its inputs.
pub fn negotiate(
    defaults: &CodecDefaults,
    destination: VariantConfig,
    attrs: &FormatAttributes,
    source_rate_hz: u32,
) -> NegotiatedParams {
    let api_sample_rate_hz = if SampleRateClass::from_hz(source_rate_hz).is_some() {
        source_rate_hz
    } else {
        defaults.api_sample_rate_hz
    };

    let internal_sample_rate_hz = destination.class.hz().min(api_sample_rate_hz);

    NegotiatedParams {
        api_sample_rate_hz,
        internal_sample_rate_hz,
        packet_size_samples: (destination.packet_ms * api_sample_rate_hz / 1000) as usize,
        complexity: defaults.complexity,
        use_dtx: attrs.use_dtx.unwrap_or(defaults.use_dtx),
        use_in_band_fec: attrs.use_fec.unwrap_or(defaults.use_in_band_fec),
        packet_loss_percent: attrs
            .packet_loss_percent
            .unwrap_or(defaults.packet_loss_percent)
            .min(100),
        bit_rate_bps: attrs.max_bit_rate_bps.unwrap_or(defaults.bit_rate_bps),
    }
}
