//! Integration tests for the SILK transcoding crate.
//!
//! These drive the public API end to end with a scripted codec primitive:
//! the encoder side packs each internal packet into a fixed-size record and
//! the decoder side unpacks those records, so frame batching, subframe
//! iteration, and concealment can all be observed from the outside.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use transcode_silk::{
    CodecDefaults, CodecStatus, CompressedFrame, DecoderControl, Direction, FormatAttributes,
    NegotiatedParams, SampleRateClass, SpeechCodec, TranslatorRegistry,
};

/// Compressed bytes one scripted internal packet occupies.
const RECORD_BYTES: usize = 10;

/// A deterministic stand-in for the native codec: every audible 20 ms
/// window becomes one RECORD_BYTES record, silence is DTX-suppressed, and
/// the decode side walks the records back out one internal frame at a time.
/// Both directions keep their per-session position in the opaque state
/// block they are handed.
#[derive(Default)]
struct FauxSilk {
    encode_calls: AtomicUsize,
    decode_calls: AtomicUsize,
    conceal_calls: AtomicUsize,
}

impl SpeechCodec for FauxSilk {
    fn encoder_state_size(&self) -> usize {
        16
    }

    fn decoder_state_size(&self) -> usize {
        16
    }

    fn version(&self) -> String {
        "faux-silk 1.0.0".into()
    }

    fn init_encoder(&self, state: &mut [u8], _params: &NegotiatedParams) -> CodecStatus {
        state.fill(0);
        CodecStatus::OK
    }

    fn init_decoder(&self, state: &mut [u8]) -> CodecStatus {
        state.fill(0);
        CodecStatus::OK
    }

    fn encode(
        &self,
        state: &mut [u8],
        _params: &NegotiatedParams,
        pcm: &[i16],
        out: &mut [u8],
    ) -> (usize, CodecStatus) {
        self.encode_calls.fetch_add(1, Ordering::Relaxed);

        if pcm.iter().all(|&s| s == 0) {
            return (0, CodecStatus::OK);
        }

        let seq = state[0];
        state[0] = seq.wrapping_add(1);

        out[0] = 0xC0;
        out[1] = seq;
        out[2..RECORD_BYTES].fill(0x11);
        (RECORD_BYTES, CodecStatus::OK)
    }

    fn decode(
        &self,
        state: &mut [u8],
        control: &mut DecoderControl,
        lost: bool,
        payload: &[u8],
        out: &mut [i16],
    ) -> (usize, CodecStatus) {
        self.decode_calls.fetch_add(1, Ordering::Relaxed);

        // One internal frame is 20 ms at the session's output rate.
        let frame_samples = (control.api_sample_rate / 50) as usize;
        let n = frame_samples.min(out.len());

        if lost {
            self.conceal_calls.fetch_add(1, Ordering::Relaxed);
            out[..n].fill(0);
            control.more_internal_frames = false;
            return (n, CodecStatus::OK);
        }

        let frames = (payload.len() / RECORD_BYTES).max(1) as u32;
        control.frames_per_packet = frames;

        let pos = state[0] as u32 + 1;
        if pos < frames {
            state[0] = pos as u8;
            control.more_internal_frames = true;
        } else {
            state[0] = 0;
            control.more_internal_frames = false;
        }

        out[..n].fill(0x55);
        (n, CodecStatus::OK)
    }
}

fn registry() -> (Arc<FauxSilk>, TranslatorRegistry) {
    let codec = Arc::new(FauxSilk::default());
    let registry = TranslatorRegistry::new(codec.clone(), CodecDefaults::default());
    (codec, registry)
}

// ============================================================================
// Encode-side flow
// ============================================================================

#[test]
fn test_irregular_chunks_batch_into_one_frame() {
    let (codec, registry) = registry();
    let mut enc = registry.new_encoder(SampleRateClass::Wb16000, &FormatAttributes::new(), 16000);
    assert_eq!(enc.params().packet_size_samples, 320);

    // 50 ms of audio in two chunks: two full packets plus 160 leftover.
    enc.accumulate(&vec![100i16; 320]).unwrap();
    enc.accumulate(&vec![100i16; 480]).unwrap();

    let frame = enc.drain().expect("two packets ready");
    assert_eq!(codec.encode_calls.load(Ordering::Relaxed), 2);
    assert_eq!(frame.size(), 2 * RECORD_BYTES);
    assert_eq!(frame.sample_count(), 640);
    assert_eq!(enc.pending_samples(), 160);

    // No new packet yet, so no frame.
    assert!(enc.drain().is_none());
    assert_eq!(enc.pending_samples(), 160);

    // Topping up to a full packet flushes it.
    enc.accumulate(&vec![100i16; 160]).unwrap();
    let frame = enc.drain().expect("third packet ready");
    assert_eq!(frame.sample_count(), 320);
    assert_eq!(enc.pending_samples(), 0);
}

#[test]
fn test_silence_produces_no_frames() {
    let (codec, registry) = registry();
    let mut enc = registry.new_encoder(SampleRateClass::Nb8000, &FormatAttributes::new(), 8000);

    enc.accumulate(&vec![0i16; 480]).unwrap();
    assert!(enc.drain().is_none());

    // All three packets were attempted and suppressed.
    assert_eq!(codec.encode_calls.load(Ordering::Relaxed), 3);
    assert_eq!(enc.pending_samples(), 0);
}

#[test]
fn test_sessions_do_not_share_state() {
    let (_codec, registry) = registry();
    let mut a = registry.new_encoder(SampleRateClass::Nb8000, &FormatAttributes::new(), 8000);
    let mut b = registry.new_encoder(SampleRateClass::Nb8000, &FormatAttributes::new(), 8000);

    a.accumulate(&vec![1i16; 160]).unwrap();
    let frame_a = a.drain().unwrap();
    b.accumulate(&vec![1i16; 160]).unwrap();
    let frame_b = b.drain().unwrap();

    // Both sessions start at sequence zero: independent encoder state.
    assert_eq!(frame_a.payload()[1], 0);
    assert_eq!(frame_b.payload()[1], 0);
}

// ============================================================================
// Decode-side flow
// ============================================================================

#[test]
fn test_encoded_frame_decodes_to_full_duration() {
    let (codec, registry) = registry();
    let mut enc = registry.new_encoder(SampleRateClass::Wb16000, &FormatAttributes::new(), 16000);
    let mut dec = registry.new_decoder(SampleRateClass::Wb16000);

    enc.accumulate(&vec![100i16; 960]).unwrap();
    let frame = enc.drain().expect("three packets ready");

    let pcm = dec.decode(&frame);
    assert_eq!(codec.decode_calls.load(Ordering::Relaxed), 3);
    assert_eq!(pcm.num_samples(), 960);
    assert_eq!(pcm.byte_len(), 1920);
    assert_eq!(pcm.sample_rate(), 16000);
    assert_eq!(dec.frames_per_packet(), 3);
}

#[test]
fn test_loss_conceals_shape_of_last_packet() {
    let (codec, registry) = registry();
    let mut enc = registry.new_encoder(SampleRateClass::Nb8000, &FormatAttributes::new(), 8000);
    let mut dec = registry.new_decoder(SampleRateClass::Nb8000);

    enc.accumulate(&vec![100i16; 480]).unwrap();
    let frame = enc.drain().expect("three packets ready");
    dec.decode(&frame);

    // The loss signal regenerates as much audio as the last packet held.
    let concealed = dec.decode(&CompressedFrame::loss());
    assert_eq!(codec.conceal_calls.load(Ordering::Relaxed), 3);
    assert_eq!(concealed.num_samples(), 480);
    assert_eq!(concealed.sample_rate(), 8000);
}

#[test]
fn test_decode_at_each_variant_rate() {
    let (_codec, registry) = registry();

    for class in SampleRateClass::ALL {
        let mut dec = registry.new_decoder(class);
        let pcm = dec.decode(&CompressedFrame::new(vec![0xC0; RECORD_BYTES], 0));
        // One internal frame: 20 ms at the variant's rate.
        assert_eq!(pcm.num_samples() as u32, class.hz() / 50);
        assert_eq!(pcm.sample_rate(), class.hz());
    }
}

// ============================================================================
// Negotiation and registry
// ============================================================================

#[test]
fn test_attributes_flow_into_session_params() {
    let (_codec, registry) = registry();
    let attrs = FormatAttributes::new()
        .with_dtx(true)
        .with_fec(true)
        .with_packet_loss_percent(10)
        .with_max_bit_rate(20_000);

    let enc = registry.new_encoder(SampleRateClass::Swb24000, &attrs, 24000);
    let params = enc.params();
    assert!(params.use_dtx);
    assert!(params.use_in_band_fec);
    assert_eq!(params.packet_loss_percent, 10);
    assert_eq!(params.bit_rate_bps, 20_000);
    assert_eq!(params.internal_sample_rate_hz, 24000);
    assert_eq!(params.packet_size_samples, 480);
}

#[test]
fn test_fast_destination_clamped_to_slow_source() {
    let (_codec, registry) = registry();

    let enc = registry.new_encoder(SampleRateClass::Swb24000, &FormatAttributes::new(), 12000);
    let params = enc.params();
    assert_eq!(params.api_sample_rate_hz, 12000);
    assert_eq!(params.internal_sample_rate_hz, 12000);
    assert_eq!(params.packet_size_samples, 240);
}

#[test]
fn test_registry_paths() {
    let (_codec, registry) = registry();

    assert_eq!(registry.paths().len(), 8);
    for class in SampleRateClass::ALL {
        let encode_name = format!("lintosilk{}", class.hz() / 1000);
        let decode_name = format!("{}tolin", class.name());

        let path = registry.find_path(&encode_name).unwrap();
        assert_eq!((path.class, path.direction), (class, Direction::Encode));

        let path = registry.find_path(&decode_name).unwrap();
        assert_eq!((path.class, path.direction), (class, Direction::Decode));
    }
}

#[test]
fn test_decoder_for_rate_rejects_unsupported() {
    let (_codec, registry) = registry();
    assert!(registry.new_decoder_for_rate(16000).is_ok());
    assert!(registry.new_decoder_for_rate(44100).is_err());
}
