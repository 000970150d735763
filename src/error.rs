//! Error types for the SILK transcoding crate.

use thiserror::Error;

/// Errors surfaced by the transcoding sessions.
///
/// Codec-primitive failures are deliberately not represented here: a
/// non-zero primitive status degrades audio quality but never aborts a
/// session, so it is logged and processing continues with whatever output
/// the primitive produced.
#[derive(Error, Debug)]
pub enum SilkError {
    /// A PCM chunk would exceed the fixed accumulation buffer capacity.
    ///
    /// This is a pacing error on the caller's side: drains are expected to
    /// keep the buffer bounded, so overruns never occur in steady state.
    #[error("accumulation buffer overrun: need {needed} samples, capacity {capacity}")]
    BufferOverrun {
        /// Samples the buffer would need to hold.
        needed: usize,
        /// Fixed capacity of the buffer.
        capacity: usize,
    },

    /// A sample rate outside the four supported rate classes.
    #[error("unsupported sample rate: {0} Hz (must be 8000, 12000, 16000, or 24000)")]
    UnsupportedSampleRate(u32),
}

/// Result type for SILK transcoding operations.
pub type Result<T> = std::result::Result<T, SilkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SilkError::BufferOverrun {
            needed: 5000,
            capacity: 4800,
        };
        assert!(err.to_string().contains("5000"));
        assert!(err.to_string().contains("4800"));

        let err = SilkError::UnsupportedSampleRate(44100);
        assert!(err.to_string().contains("44100"));
    }
}
