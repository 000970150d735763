//! Frame types exchanged with the host media pipeline.
//!
//! Two shapes cross the boundary: [`PcmFrame`] carries uncompressed mono
//! 16-bit linear PCM, and [`CompressedFrame`] carries the batched output of
//! one or more internal codec packets. An empty compressed payload is the
//! host's signal that a packet was lost and concealment audio should be
//! synthesized in its place.

use byteorder::{ByteOrder, LittleEndian};
use std::fmt;

/// A frame of uncompressed mono 16-bit linear PCM.
#[derive(Clone, PartialEq, Eq)]
pub struct PcmFrame {
    samples: Vec<i16>,
    sample_rate_hz: u32,
}

impl PcmFrame {
    /// Create a frame from samples at the given rate.
    pub fn new(samples: Vec<i16>, sample_rate_hz: u32) -> Self {
        Self {
            samples,
            sample_rate_hz,
        }
    }

    /// Create a frame from little-endian sample bytes.
    ///
    /// A trailing odd byte, which cannot form a sample, is ignored.
    pub fn from_le_bytes(data: &[u8], sample_rate_hz: u32) -> Self {
        let mut samples = vec![0i16; data.len() / 2];
        LittleEndian::read_i16_into(&data[..samples.len() * 2], &mut samples);
        Self {
            samples,
            sample_rate_hz,
        }
    }

    /// Get the samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Get the number of samples.
    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    /// Get the sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate_hz
    }

    /// Get the frame's wire size in bytes (two per sample).
    pub fn byte_len(&self) -> usize {
        self.samples.len() * 2
    }

    /// Check whether the frame carries no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Serialize the samples as little-endian bytes.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.byte_len()];
        LittleEndian::write_i16_into(&self.samples, &mut out);
        out
    }
}

impl fmt::Debug for PcmFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PcmFrame")
            .field("num_samples", &self.num_samples())
            .field("sample_rate_hz", &self.sample_rate_hz)
            .finish()
    }
}

/// A compressed frame: the batched payload of one or more internal packets.
///
/// Produced by the encode side (payload plus the number of PCM samples it
/// represents) or received from the host. An empty payload does not mean
/// "no audio"; it is the loss signal that triggers concealment on decode.
#[derive(Clone, PartialEq, Eq)]
pub struct CompressedFrame {
    payload: Vec<u8>,
    sample_count: usize,
}

impl CompressedFrame {
    /// Create a frame from compressed bytes and the sample count they cover.
    pub fn new(payload: Vec<u8>, sample_count: usize) -> Self {
        Self {
            payload,
            sample_count,
        }
    }

    /// Create the loss signal: an empty frame requesting concealment.
    pub fn loss() -> Self {
        Self {
            payload: Vec::new(),
            sample_count: 0,
        }
    }

    /// Check whether this frame signals a lost packet.
    pub fn is_loss(&self) -> bool {
        self.payload.is_empty()
    }

    /// Get the compressed payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Get the payload size in bytes.
    pub fn size(&self) -> usize {
        self.payload.len()
    }

    /// Get the number of PCM samples this frame accounts for.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }
}

impl fmt::Debug for CompressedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressedFrame")
            .field("size", &self.size())
            .field("sample_count", &self.sample_count)
            .field("is_loss", &self.is_loss())
            .finish()
    }
}
