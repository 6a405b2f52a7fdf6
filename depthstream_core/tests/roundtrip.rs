//! Cross-codec integration tests: every bundled codec must preserve frame
//! geometry, stay within its quantization step on a round trip, and honor
//! the no-data sentinel policy its docs promise.

use depthstream_codecs::{codec_for_kind, InverseHueCodec, LinearCodec, UniformHueCodec};
use depthstream_core::{
    CodecError, CodecKind, DepthCodec, DepthFrame, DepthRange, HardwareColorizer, RgbFrame,
};

// ── helpers ────────────────────────────────────────────────────────────────

/// Horizontal gradient sweeping the whole range, deterministic per (w, h).
fn gradient_frame(width: u32, height: u32, range: DepthRange) -> DepthFrame {
    let mut frame = DepthFrame::new(width, height);
    let last = (width - 1).max(1) as f64;
    for y in 0..height {
        for x in 0..width {
            let d = range.min + range.span() * x as f64 / last;
            frame.samples_mut()[(y * width + x) as usize] = d as f32;
        }
    }
    frame
}

fn mm_range() -> DepthRange {
    DepthRange::new(0.0, 6000.0).unwrap()
}

/// Stand-in for a vendor SDK colorizer: grayscale over the range.
struct GrayColorizer;

impl HardwareColorizer for GrayColorizer {
    fn name(&self) -> &'static str {
        "gray"
    }

    fn colorize(
        &mut self,
        depth: &DepthFrame,
        range: DepthRange,
        out: &mut RgbFrame,
    ) -> Result<(), CodecError> {
        for (px, &d) in out.data_mut().chunks_exact_mut(3).zip(depth.samples()) {
            let t = (range.clamp(f64::from(d)) - range.min) / range.span();
            px.fill((t * 255.0) as u8);
        }
        Ok(())
    }
}

// ── geometry and determinism ───────────────────────────────────────────────

#[test]
fn encode_preserves_dimensions_for_every_codec() {
    let depth = gradient_frame(64, 48, mm_range());
    let mut codecs: Vec<Box<dyn DepthCodec>> = vec![
        Box::new(LinearCodec::new()),
        Box::new(UniformHueCodec::new()),
        Box::new(InverseHueCodec::new()),
        codec_for_kind(CodecKind::HardwarePassthrough, Some(Box::new(GrayColorizer))).unwrap(),
    ];
    let range = DepthRange::new(100.0, 6000.0).unwrap();

    for codec in &mut codecs {
        let name = codec.name();
        let rgb = codec.encode(&depth, range).unwrap();
        assert_eq!(rgb.width(), 64, "{name}");
        assert_eq!(rgb.height(), 48, "{name}");
        assert_eq!(rgb.data().len(), 64 * 48 * 3, "{name}");
    }
}

#[test]
fn encode_is_deterministic() {
    let depth = gradient_frame(32, 32, mm_range());
    let mut codec = UniformHueCodec::new();
    let first = codec.encode(&depth, mm_range()).unwrap().clone();
    let second = codec.encode(&depth, mm_range()).unwrap().clone();
    assert_eq!(first, second);
}

#[test]
fn empty_frames_are_rejected_uniformly() {
    let range = mm_range();
    let mut linear = LinearCodec::new();
    let mut hue = UniformHueCodec::new();
    assert_eq!(
        linear.encode(&DepthFrame::new(0, 0), range),
        Err(CodecError::EmptyFrame)
    );
    assert_eq!(
        hue.decode(&RgbFrame::new(0, 4), range),
        Err(CodecError::EmptyFrame)
    );
}

// ── round-trip accuracy ────────────────────────────────────────────────────

/// Linear codec: every in-range depth must come back within one 16-bit
/// quantization step.
#[test]
fn linear_roundtrip_within_one_step() {
    let range = mm_range();
    let depth = gradient_frame(2048, 1, range);
    let step = range.span() / 65535.0;

    let mut codec = LinearCodec::new();
    let rgb = codec.encode(&depth, range).unwrap().clone();
    let decoded = codec.decode(&rgb, range).unwrap();

    for (&src, &out) in depth.samples().iter().zip(decoded.samples()) {
        if src == 0.0 {
            continue; // no-data pixel, comes back as the far bound
        }
        let err = (f64::from(out) - f64::from(src)).abs();
        assert!(err <= step + 1e-3, "src={src} out={out} err={err}");
    }
}

/// Uniform hue codec: within one 1529-step quantization step, excluding the
/// cyclic wrap cell at the very top of the range.
#[test]
fn uniform_hue_roundtrip_within_one_step() {
    let range = mm_range();
    let step = range.span() / 1529.0;
    let depth = gradient_frame(1530, 1, range);

    let mut codec = UniformHueCodec::new();
    let rgb = codec.encode(&depth, range).unwrap().clone();
    let decoded = codec.decode(&rgb, range).unwrap();

    for (&src, &out) in depth.samples().iter().zip(decoded.samples()) {
        if f64::from(src) > range.max - step {
            continue; // wrap cell: encodes to pure red, decodes as the near bound
        }
        let err = (f64::from(out) - f64::from(src)).abs();
        assert!(err <= step + 1e-3, "src={src} out={out} err={err}");
    }
}

/// Inverse hue codec: the quantization step is uniform in disparity, so the
/// tolerated depth error grows with the square of the distance.
#[test]
fn inverse_hue_roundtrip_within_one_disparity_step() {
    let range = DepthRange::new(0.1, 6.0).unwrap();
    let disp_step = (1.0 / range.min - 1.0 / range.max) / 1529.0;
    let depth = gradient_frame(1024, 1, range);

    let mut codec = InverseHueCodec::new();
    let rgb = codec.encode(&depth, range).unwrap().clone();
    let decoded = codec.decode(&rgb, range).unwrap();

    for (&src, &out) in depth.samples().iter().zip(decoded.samples()) {
        let src = f64::from(src);
        if out == 0.0 {
            // far/no-data cell
            continue;
        }
        let tolerance = src * src * disp_step + 1e-6;
        let err = (f64::from(out) - src).abs();
        assert!(err <= tolerance, "src={src} out={out} err={err}");
    }
}

// ── sentinel and boundary policy ───────────────────────────────────────────

/// A zero sample must produce exactly the same triple as a sample at the far
/// bound, and decode back as the far bound.
#[test]
fn linear_no_data_encodes_as_farthest() {
    let range = mm_range();
    let depth = DepthFrame::from_samples(2, 1, vec![0.0, 6000.0]).unwrap();

    let mut codec = LinearCodec::new();
    let rgb = codec.encode(&depth, range).unwrap().clone();
    assert_eq!(&rgb.data()[..3], &rgb.data()[3..]);

    let decoded = codec.decode(&rgb, range).unwrap();
    assert_eq!(decoded.samples()[0], 6000.0);
}

/// Near bound gets the highest (inverted) code, far bound gets code zero.
#[test]
fn linear_boundary_codes() {
    let range = mm_range();
    let depth = DepthFrame::from_samples(2, 1, vec![f32::MIN_POSITIVE, 6000.0]).unwrap();
    let mut codec = LinearCodec::new();
    let rgb = codec.encode(&depth, range).unwrap();
    assert_eq!(&rgb.data()[..3], &[0xFF, 0xFF, 0x00]);
    assert_eq!(&rgb.data()[3..], &[0x00, 0x00, 0x00]);
}

/// Range endpoints of the uniform hue ramp are both pure red — the
/// documented cyclic endpoint ambiguity.
#[test]
fn uniform_hue_endpoints_wrap_to_red() {
    let range = DepthRange::new(0.0, 1529.0).unwrap();
    let depth = DepthFrame::from_samples(2, 1, vec![f32::MIN_POSITIVE, 1529.0]).unwrap();
    let mut codec = UniformHueCodec::new();
    let rgb = codec.encode(&depth, range).unwrap().clone();
    assert_eq!(&rgb.data()[..3], &[255, 0, 0]);
    assert_eq!(&rgb.data()[3..], &[255, 0, 0]);

    // the wrap cell decodes back to the near bound
    let decoded = codec.decode(&rgb, range).unwrap();
    assert_eq!(decoded.samples()[1], 0.0);
}

/// Mid-range sample on a unit-step range lands exactly on the ramp midpoint
/// (cyan seam) and survives the round trip exactly.
#[test]
fn uniform_hue_midpoint_is_exact() {
    let range = DepthRange::new(0.0, 1529.0).unwrap();
    let depth = DepthFrame::from_samples(1, 1, vec![765.0]).unwrap();
    let mut codec = UniformHueCodec::new();
    let rgb = codec.encode(&depth, range).unwrap().clone();
    assert_eq!(rgb.data(), &[0, 255, 255]);

    let decoded = codec.decode(&rgb, range).unwrap();
    assert_eq!(decoded.samples()[0], 765.0);
}

/// No-data stays distinct from close-range readings for the inverse codec:
/// index 0 collides only with the far bound.
#[test]
fn inverse_hue_no_data_distinct_from_near_readings() {
    let range = DepthRange::new(0.1, 6.0).unwrap();
    let depth = DepthFrame::from_samples(2, 1, vec![0.0, 0.15]).unwrap();
    let mut codec = InverseHueCodec::new();
    let rgb = codec.encode(&depth, range).unwrap().clone();

    assert_eq!(&rgb.data()[..3], &[255, 0, 0]);
    assert_ne!(&rgb.data()[3..], &[255, 0, 0]);

    let decoded = codec.decode(&rgb, range).unwrap();
    assert_eq!(decoded.samples()[0], 0.0);
    assert!((f64::from(decoded.samples()[1]) - 0.15).abs() < 0.01);
}

// ── error conditions ───────────────────────────────────────────────────────

#[test]
fn inverse_hue_rejects_zero_bound() {
    let range = DepthRange::new(0.0, 6.0).unwrap();
    let mut codec = InverseHueCodec::new();
    assert!(matches!(
        codec.encode(&DepthFrame::new(4, 4), range),
        Err(CodecError::InvalidRange { .. })
    ));
    assert!(matches!(
        codec.decode(&RgbFrame::new(4, 4), range),
        Err(CodecError::InvalidRange { .. })
    ));
}

#[test]
fn passthrough_decode_is_unsupported() {
    let mut codec =
        codec_for_kind(CodecKind::HardwarePassthrough, Some(Box::new(GrayColorizer))).unwrap();

    let depth = gradient_frame(8, 8, mm_range());
    let rgb = codec.encode(&depth, mm_range()).unwrap().clone();
    assert_eq!(rgb.data().len(), 8 * 8 * 3);

    assert!(matches!(
        codec.decode(&rgb, mm_range()),
        Err(CodecError::UnsupportedOperation { .. })
    ));
}

// ── selector ───────────────────────────────────────────────────────────────

#[test]
fn selector_maps_every_tag() {
    for kind in [CodecKind::Linear, CodecKind::UniformHue, CodecKind::InverseHue] {
        let codec = codec_for_kind(kind, None).unwrap();
        assert_eq!(codec.kind(), kind);
    }

    let codec = codec_for_kind(CodecKind::HardwarePassthrough, Some(Box::new(GrayColorizer)))
        .unwrap();
    assert_eq!(codec.kind(), CodecKind::HardwarePassthrough);
}

#[test]
fn selector_requires_a_colorizer_for_passthrough() {
    assert!(matches!(
        codec_for_kind(CodecKind::HardwarePassthrough, None),
        Err(CodecError::ColorizerUnavailable)
    ));
}
