//! depthstream demo
//!
//! Generates one synthetic megapixel depth frame, runs it through every
//! bundled codec, and prints a side-by-side comparison: encode/decode time
//! and round-trip error against the source frame. The linear codec should
//! win on precision by ~43x (65536 vs 1530 quantization levels); the hue
//! codecs trade that precision for compression-tolerant color bands.

use std::time::{Duration, Instant};

use anyhow::Result;

use depthstream_codecs::{HardwarePassthroughCodec, InverseHueCodec, LinearCodec, UniformHueCodec};
use depthstream_core::{
    CodecError, DepthCodec, DepthFrame, DepthRange, HardwareColorizer, RgbFrame,
};

// ── constants ──────────────────────────────────────────────────────────────

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 720;

/// Millimeter range of a typical indoor depth camera.
const D_MIN: f64 = 300.0;
const D_MAX: f64 = 6000.0;

// ── synthetic scene ────────────────────────────────────────────────────────

/// Deterministic depth scene: a tilted floor plane, a sphere-ish bump in the
/// middle, and a no-data stripe along the top (sensor dropout).
fn synthetic_scene(width: u32, height: u32, range: DepthRange) -> DepthFrame {
    let mut frame = DepthFrame::new(width, height);
    let (w, h) = (f64::from(width), f64::from(height));
    for y in 0..height {
        for x in 0..width {
            let i = (y * width + x) as usize;
            if y < height / 20 {
                frame.samples_mut()[i] = 0.0;
                continue;
            }
            let (fx, fy) = (f64::from(x) / w, f64::from(y) / h);
            // floor plane receding with y, plus a central bump
            let plane = range.max - fy * range.span() * 0.8;
            let dx = (fx - 0.5) * 2.0;
            let dy = (fy - 0.5) * 2.0;
            let r2 = dx * dx + dy * dy;
            let bump = if r2 < 0.25 { (0.25 - r2) * 4000.0 } else { 0.0 };
            frame.samples_mut()[i] = range.clamp(plane - bump) as f32;
        }
    }
    frame
}

// ── stand-in vendor colorizer ──────────────────────────────────────────────

/// What a camera SDK's colorizer looks like from this side of the interface:
/// an opaque scheme we can configure with a range but not invert.
struct VendorColorizer;

impl HardwareColorizer for VendorColorizer {
    fn name(&self) -> &'static str {
        "vendor-demo"
    }

    fn colorize(
        &mut self,
        depth: &DepthFrame,
        range: DepthRange,
        out: &mut RgbFrame,
    ) -> Result<(), CodecError> {
        for (px, &d) in out.data_mut().chunks_exact_mut(3).zip(depth.samples()) {
            let t = (range.clamp(f64::from(d)) - range.min) / range.span();
            let g = (255.0 * (1.0 - t)) as u8;
            px.fill(g);
        }
        Ok(())
    }
}

// ── measurement ────────────────────────────────────────────────────────────

struct Row {
    name: &'static str,
    encode: Duration,
    decode: Option<Duration>,
    mean_err: Option<f64>,
    max_err: Option<f64>,
}

fn measure(codec: &mut dyn DepthCodec, depth: &DepthFrame, range: DepthRange) -> Result<Row> {
    let name = codec.name();

    let t0 = Instant::now();
    let rgb = codec.encode(depth, range)?.clone();
    let encode = t0.elapsed();

    let t1 = Instant::now();
    let decoded = match codec.decode(&rgb, range) {
        Ok(frame) => frame,
        Err(CodecError::UnsupportedOperation { .. }) => {
            return Ok(Row {
                name,
                encode,
                decode: None,
                mean_err: None,
                max_err: None,
            });
        }
        Err(e) => return Err(e.into()),
    };
    let decode = t1.elapsed();

    let mut count = 0u64;
    let mut sum = 0.0;
    let mut max = 0.0f64;
    for (&src, &out) in depth.samples().iter().zip(decoded.samples()) {
        if src == 0.0 || out == 0.0 {
            continue;
        }
        let err = (f64::from(out) - f64::from(src)).abs();
        sum += err;
        max = max.max(err);
        count += 1;
    }

    Ok(Row {
        name,
        encode,
        decode: Some(decode),
        mean_err: Some(sum / count.max(1) as f64),
        max_err: Some(max),
    })
}

fn fmt_duration(d: Duration) -> String {
    format!("{:.2} ms", d.as_secs_f64() * 1000.0)
}

// ── entry point ────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let range = DepthRange::new(D_MIN, D_MAX)?;
    let depth = synthetic_scene(WIDTH, HEIGHT, range);

    println!("=== depthstream codec comparison ===");
    println!(
        "  frame: {}x{}, range [{} mm, {} mm], {} valid pixels",
        WIDTH,
        HEIGHT,
        D_MIN,
        D_MAX,
        depth.samples().iter().filter(|&&d| d != 0.0).count()
    );
    println!();

    let mut codecs: Vec<Box<dyn DepthCodec>> = vec![
        Box::new(LinearCodec::new()),
        Box::new(UniformHueCodec::new()),
        Box::new(InverseHueCodec::new()),
        Box::new(HardwarePassthroughCodec::new(Box::new(VendorColorizer))),
    ];

    println!(
        "  {:<22} {:>10} {:>10} {:>14} {:>14}",
        "codec", "encode", "decode", "mean err (mm)", "max err (mm)"
    );
    println!("  {}", "-".repeat(74));

    for codec in &mut codecs {
        let row = measure(codec.as_mut(), &depth, range)?;
        println!(
            "  {:<22} {:>10} {:>10} {:>14} {:>14}",
            row.name,
            fmt_duration(row.encode),
            row.decode.map_or("n/a".into(), fmt_duration),
            row.mean_err
                .map_or("n/a".into(), |e| format!("{e:.4}")),
            row.max_err.map_or("n/a".into(), |e| format!("{e:.4}")),
        );
    }

    Ok(())
}
