//! The PCM → SILK encode session.
//!
//! The host delivers PCM in whatever chunk sizes its pipeline produces;
//! the codec only accepts fixed-size internal packets. [`SilkEncoder`]
//! bridges the two: [`accumulate`](SilkEncoder::accumulate) appends chunks
//! to a fixed-capacity buffer and [`drain`](SilkEncoder::drain) encodes as
//! many full packets as the buffer holds, batching their compressed bytes
//! into one outbound frame and keeping any leftover samples for the next
//! round.

use std::sync::Arc;
use tracing::warn;

use crate::error::{Result, SilkError};
use crate::frame::CompressedFrame;
use crate::negotiate::NegotiatedParams;
use crate::primitive::{CodecState, SpeechCodec};
use crate::{COMPRESSED_BUFFER_BYTES, ENCODE_BUFFER_SAMPLES};

/// The encode-side transcoding session.
pub struct SilkEncoder {
    codec: Arc<dyn SpeechCodec>,
    state: CodecState,
    params: NegotiatedParams,
    buf: Box<[i16]>,
    pending: usize,
}

impl SilkEncoder {
    /// Create a session with an initialized encoder state block.
    ///
    /// An initialization failure is logged and the session is constructed
    /// anyway: later encode calls may produce degraded output but the call
    /// leg keeps running.
    pub fn new(codec: Arc<dyn SpeechCodec>, state_size: usize, params: NegotiatedParams) -> Self {
        let mut state = CodecState::new(state_size);
        let status = codec.init_encoder(state.as_mut_slice(), &params);
        if !status.is_ok() {
            warn!(code = status.code(), "encoder init failed, continuing with uninitialized state");
        }

        Self {
            codec,
            state,
            params,
            buf: vec![0i16; ENCODE_BUFFER_SAMPLES].into_boxed_slice(),
            pending: 0,
        }
    }

    /// Get the session's negotiated parameters.
    pub fn params(&self) -> &NegotiatedParams {
        &self.params
    }

    /// Get the number of samples waiting to be encoded.
    pub fn pending_samples(&self) -> usize {
        self.pending
    }

    /// Append a PCM chunk to the pending buffer.
    ///
    /// The buffer never grows; a chunk that does not fit is a pacing error
    /// on the caller's side and is rejected with
    /// [`SilkError::BufferOverrun`] without consuming any samples.
    pub fn accumulate(&mut self, pcm: &[i16]) -> Result<()> {
        let needed = self.pending + pcm.len();
        if needed > self.buf.len() {
            return Err(SilkError::BufferOverrun {
                needed,
                capacity: self.buf.len(),
            });
        }

        self.buf[self.pending..needed].copy_from_slice(pcm);
        self.pending = needed;
        Ok(())
    }

    /// Encode every full packet in the buffer into one batched frame.
    ///
    /// Returns `None` when the buffer holds less than one packet, and also
    /// when every attempted packet was DTX-suppressed: downstream cannot
    /// tell "nothing to send yet" from "silence" by frame shape, so neither
    /// produces a frame. Otherwise the frame's payload is the concatenated
    /// output of all packets encoded in this call and its sample count
    /// covers the packets that actually produced bytes.
    ///
    /// Leftover samples are moved to the buffer head; fewer than one
    /// packet's worth remain after every drain.
    pub fn drain(&mut self) -> Option<CompressedFrame> {
        let packet = self.params.packet_size_samples;
        if self.pending < packet {
            return None;
        }

        let mut out = vec![0u8; COMPRESSED_BUFFER_BYTES];
        let mut datalen = 0;
        let mut consumed = 0;
        let mut produced_packets = 0;

        while self.pending - consumed >= packet {
            let window = &self.buf[consumed..consumed + packet];
            let (written, status) =
                self.codec
                    .encode(self.state.as_mut_slice(), &self.params, window, &mut out[datalen..]);
            if !status.is_ok() {
                warn!(code = status.code(), "encode call failed");
            }

            datalen += written;
            consumed += packet;
            if written > 0 {
                // A silent, DTX-suppressed packet emits zero bytes; only
                // packets with output count towards the frame's duration.
                produced_packets += 1;
            }
        }

        self.pending -= consumed;
        if self.pending > 0 {
            self.buf.copy_within(consumed..consumed + self.pending, 0);
        }

        if datalen == 0 {
            return None;
        }

        out.truncate(datalen);
        Some(CompressedFrame::new(out, packet * produced_packets))
    }
}
