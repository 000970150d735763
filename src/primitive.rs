//! The codec primitive capability seam.
//!
//! The raw SILK encode/decode primitives live outside this crate, in a
//! native SDK binding or another bitstream implementation. This module
//! defines the contract the transcoding sessions drive them through:
//! opaque per-session state blocks with explicit size queries, an init per
//! direction, and synchronous encode/decode calls that may report a
//! non-zero status alongside whatever partial output they produced.
//!
//! Callers treat a non-zero [`CodecStatus`] as log-and-continue, never as a
//! reason to abort a session.

use crate::negotiate::NegotiatedParams;
use std::fmt;

/// Status code returned by every primitive call. Zero means success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecStatus(i32);

impl CodecStatus {
    /// The success status.
    pub const OK: CodecStatus = CodecStatus(0);

    /// Wrap a raw status code.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Check for success.
    pub fn is_ok(&self) -> bool {
        self.0 == 0
    }

    /// Get the raw code.
    pub fn code(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for CodecStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Decoder control block shared with the primitive across calls.
///
/// The primitive reads the target rate and writes back packet structure:
/// after each successful decode it records how many internal frames the
/// packet carried and whether more of them remain to be unpacked.
#[derive(Debug, Clone)]
pub struct DecoderControl {
    /// Sample rate of the PCM the decoder must produce, in Hz.
    pub api_sample_rate: u32,
    /// Internal frames in the last successfully decoded packet. Sizes the
    /// concealment loop when a packet is lost.
    pub frames_per_packet: u32,
    /// Whether the current packet has further internal frames to decode.
    pub more_internal_frames: bool,
}

impl DecoderControl {
    /// Create a control block targeting the given output rate.
    pub fn new(api_sample_rate: u32) -> Self {
        Self {
            api_sample_rate,
            frames_per_packet: 1,
            more_internal_frames: false,
        }
    }
}

/// The capability set a speech codec implementation must provide.
///
/// All calls are synchronous and CPU-bound. State blocks are allocated by
/// the caller at the sizes reported here and passed back into every call;
/// their layout is entirely the implementation's business. Output slices
/// are caller-allocated; implementations write at most `out.len()` elements
/// and return the count actually written. A non-zero status may accompany
/// partial output; callers forward that output rather than discarding it.
pub trait SpeechCodec: Send + Sync {
    /// Size in bytes of one encoder state block.
    fn encoder_state_size(&self) -> usize;

    /// Size in bytes of one decoder state block.
    fn decoder_state_size(&self) -> usize;

    /// Human-readable codec version, logged once at registry construction.
    fn version(&self) -> String;

    /// Initialize an encoder state block for the given parameters.
    fn init_encoder(&self, state: &mut [u8], params: &NegotiatedParams) -> CodecStatus;

    /// Initialize (reset) a decoder state block.
    fn init_decoder(&self, state: &mut [u8]) -> CodecStatus;

    /// Encode exactly `params.packet_size_samples` PCM samples into `out`.
    ///
    /// Returns the number of compressed bytes written. Zero bytes with a
    /// success status is a DTX-suppressed silent packet, not a failure.
    fn encode(
        &self,
        state: &mut [u8],
        params: &NegotiatedParams,
        pcm: &[i16],
        out: &mut [u8],
    ) -> (usize, CodecStatus);

    /// Decode one internal frame of `payload` into `out`, or synthesize one
    /// frame of concealment audio when `lost` is set.
    ///
    /// Returns the number of samples written and updates `control` with the
    /// packet structure observed.
    fn decode(
        &self,
        state: &mut [u8],
        control: &mut DecoderControl,
        lost: bool,
        payload: &[u8],
        out: &mut [i16],
    ) -> (usize, CodecStatus);
}

/// An owned, session-scoped opaque codec state block.
///
/// One block is allocated per session at the size the primitive reports and
/// released exactly once when the session drops, regardless of whether
/// initialization succeeded.
pub struct CodecState {
    block: Box<[u8]>,
}

impl CodecState {
    /// Allocate a zeroed state block of the given size.
    pub fn new(size: usize) -> Self {
        Self {
            block: vec![0u8; size].into_boxed_slice(),
        }
    }

    /// Get the block for a primitive call.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.block
    }

    /// Size of the block in bytes.
    pub fn size(&self) -> usize {
        self.block.len()
    }
}

impl fmt::Debug for CodecState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecState")
            .field("size", &self.size())
            .finish()
    }
}
