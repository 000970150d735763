//! The SILK → PCM decode session.
//!
//! Each inbound compressed frame decodes to PCM immediately: a packet may
//! carry several internal frames, and [`SilkDecoder::decode`] unpacks all
//! of them in one bounded loop. When the host signals a lost packet with an
//! empty frame, the decoder synthesizes concealment audio covering the same
//! number of internal frames as the last packet it decoded successfully.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::frame::{CompressedFrame, PcmFrame};
use crate::primitive::{CodecState, DecoderControl, SpeechCodec};
use crate::{MAX_INTERNAL_FRAMES, MAX_SAMPLES_PER_PACKET};

/// The decode-side transcoding session.
pub struct SilkDecoder {
    codec: Arc<dyn SpeechCodec>,
    state: CodecState,
    control: DecoderControl,
}

impl SilkDecoder {
    /// Create a session decoding to the given PCM rate.
    ///
    /// As on the encode side, an initialization failure is logged and the
    /// session is constructed anyway.
    pub fn new(codec: Arc<dyn SpeechCodec>, state_size: usize, api_sample_rate: u32) -> Self {
        let mut state = CodecState::new(state_size);
        let control = DecoderControl::new(api_sample_rate);
        let status = codec.init_decoder(state.as_mut_slice());
        if !status.is_ok() {
            warn!(code = status.code(), "decoder init failed, continuing with uninitialized state");
        }

        Self {
            codec,
            state,
            control,
        }
    }

    /// Get the PCM rate this session decodes to.
    pub fn sample_rate(&self) -> u32 {
        self.control.api_sample_rate
    }

    /// Get the internal frame count of the last successfully decoded packet.
    pub fn frames_per_packet(&self) -> u32 {
        self.control.frames_per_packet
    }

    /// Decode one inbound frame to PCM.
    ///
    /// A frame with payload decodes every internal frame the packet
    /// carries, bounded at [`MAX_INTERNAL_FRAMES`] iterations in case the
    /// primitive never clears its continuation flag. A loss frame runs the
    /// concealment path instead. Decode failures are logged and whatever
    /// partial output the primitive produced is still returned; the session
    /// is never reset by a bad packet.
    pub fn decode(&mut self, frame: &CompressedFrame) -> PcmFrame {
        let mut scratch = [0i16; MAX_SAMPLES_PER_PACKET];
        let mut samples = Vec::new();

        if frame.is_loss() {
            // Packets up to MAX_LBRR_DELAY ahead may carry redundant (LBRR)
            // coding data for this interval, but scanning them needs
            // buffered lookahead the host does not hand us. Conceal for as
            // many internal frames as the last decoded packet carried.
            let conceal_frames = self.control.frames_per_packet;
            debug!(frames = conceal_frames, "lost packet indicated, concealing without redundant data");

            for _ in 0..conceal_frames {
                let (n, status) = self.codec.decode(
                    self.state.as_mut_slice(),
                    &mut self.control,
                    true,
                    frame.payload(),
                    &mut scratch,
                );
                if !status.is_ok() {
                    debug!(code = status.code(), "concealment decode call failed");
                }
                samples.extend_from_slice(&scratch[..n]);
            }
        } else {
            let mut remaining = MAX_INTERNAL_FRAMES;
            loop {
                let (n, status) = self.codec.decode(
                    self.state.as_mut_slice(),
                    &mut self.control,
                    false,
                    frame.payload(),
                    &mut scratch,
                );
                if !status.is_ok() {
                    debug!(code = status.code(), "decode call failed");
                }
                samples.extend_from_slice(&scratch[..n]);

                remaining -= 1;
                if !self.control.more_internal_frames || remaining == 0 {
                    break;
                }
            }
        }

        PcmFrame::new(samples, self.control.api_sample_rate)
    }
}
