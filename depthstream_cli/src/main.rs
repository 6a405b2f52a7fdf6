use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use image::{ImageBuffer, Luma};

use depthstream_codecs::{codec_for_kind, LinearCodec};
use depthstream_core::{CodecKind, DepthCodec, DepthFrame, DepthRange, RgbFrame};

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "depthstream",
    about = "Encode depth frames as RGB images for video-channel transport, and decode them back",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a 16-bit grayscale depth image into an RGB frame
    Encode {
        /// Source depth image (16-bit grayscale PNG, depth units per pixel)
        input: PathBuf,
        /// Destination RGB PNG
        output: PathBuf,
        /// Codec to use: linear | uniform-hue | inverse-hue
        #[arg(short, long, default_value = "linear")]
        codec: String,
        /// Near bound of the depth range, in depth units (mm for typical sensors)
        #[arg(long, default_value_t = 0.0)]
        min: f64,
        /// Far bound of the depth range
        #[arg(long, default_value_t = 6000.0)]
        max: f64,
    },
    /// Decode an RGB frame back into a 16-bit grayscale depth image
    Decode {
        /// Source RGB PNG produced by `encode`
        input: PathBuf,
        /// Destination depth image (16-bit grayscale PNG)
        output: PathBuf,
        /// Codec the frame was encoded with
        #[arg(short, long, default_value = "linear")]
        codec: String,
        #[arg(long, default_value_t = 0.0)]
        min: f64,
        #[arg(long, default_value_t = 6000.0)]
        max: f64,
        /// Trust only the high channel when decoding the linear codec
        /// (robust to chroma-mangling transports)
        #[arg(long)]
        eight_bit: bool,
    },
    /// Round-trip a synthetic frame and report timing and error statistics
    Bench {
        /// Frame width in pixels
        #[arg(long, default_value_t = 1280)]
        width: u32,
        /// Frame height in pixels
        #[arg(long, default_value_t = 720)]
        height: u32,
        /// Codec to benchmark
        #[arg(short, long, default_value = "linear")]
        codec: String,
        #[arg(long, default_value_t = 0.0)]
        min: f64,
        #[arg(long, default_value_t = 6000.0)]
        max: f64,
        /// Number of frames to encode
        #[arg(short, long, default_value_t = 100)]
        frames: u32,
    },
}

// ── Helpers ────────────────────────────────────────────────────────────────

fn codec_from_name(name: &str, eight_bit_decode: bool) -> anyhow::Result<Box<dyn DepthCodec>> {
    let kind: CodecKind = name.parse()?;
    if kind == CodecKind::Linear && eight_bit_decode {
        return Ok(Box::new(LinearCodec::with_8bit_decode()));
    }
    // No vendor colorizer is reachable from the CLI, so hardware-passthrough
    // fails here with its distinct error.
    Ok(codec_for_kind(kind, None)?)
}

fn load_depth_png(path: &PathBuf) -> anyhow::Result<DepthFrame> {
    let img = image::open(path).with_context(|| format!("opening depth image {:?}", path))?;
    let depth16 = img.to_luma16();
    let (width, height) = depth16.dimensions();
    Ok(DepthFrame::from_u16_samples(width, height, depth16.as_raw())?)
}

fn load_rgb_png(path: &PathBuf) -> anyhow::Result<RgbFrame> {
    let img = image::open(path).with_context(|| format!("opening RGB image {:?}", path))?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(RgbFrame::from_raw(width, height, rgb.into_raw())?)
}

/// Horizontal gradient across the range with a no-data stripe along the
/// top. Deterministic, so repeated runs are comparable.
fn synthetic_frame(width: u32, height: u32, range: DepthRange) -> DepthFrame {
    let mut frame = DepthFrame::new(width, height);
    let last = (width - 1).max(1) as f64;
    let no_data_rows = height / 16;
    for y in 0..height {
        for x in 0..width {
            let i = (y * width + x) as usize;
            frame.samples_mut()[i] = if y < no_data_rows {
                0.0
            } else {
                (range.min + range.span() * x as f64 / last) as f32
            };
        }
    }
    frame
}

// ── Subcommand implementations ─────────────────────────────────────────────

fn run_encode(
    input: PathBuf,
    output: PathBuf,
    codec_name: &str,
    min: f64,
    max: f64,
) -> anyhow::Result<()> {
    let range = DepthRange::new(min, max)?;
    let mut codec = codec_from_name(codec_name, false)?;
    let name = codec.name();
    let depth = load_depth_png(&input)?;

    let t0 = Instant::now();
    let rgb = codec.encode(&depth, range)?;
    let elapsed = t0.elapsed();

    let img: image::RgbImage =
        ImageBuffer::from_raw(rgb.width(), rgb.height(), rgb.data().to_vec())
            .context("encoded frame does not match its dimensions")?;
    img.save(&output)
        .with_context(|| format!("writing {:?}", output))?;

    eprintln!("  codec       : {}", name);
    eprintln!("  frame       : {}x{}", depth.width(), depth.height());
    eprintln!("  range       : [{}, {}]", range.min, range.max);
    eprintln!("  encode time : {:.3}ms", elapsed.as_secs_f64() * 1000.0);
    Ok(())
}

fn run_decode(
    input: PathBuf,
    output: PathBuf,
    codec_name: &str,
    min: f64,
    max: f64,
    eight_bit: bool,
) -> anyhow::Result<()> {
    let range = DepthRange::new(min, max)?;
    let mut codec = codec_from_name(codec_name, eight_bit)?;
    let name = codec.name();
    let rgb = load_rgb_png(&input)?;

    let t0 = Instant::now();
    let depth = codec.decode(&rgb, range)?;
    let elapsed = t0.elapsed();

    let samples: Vec<u16> = depth
        .samples()
        .iter()
        .map(|&d| d.round().clamp(0.0, f32::from(u16::MAX)) as u16)
        .collect();
    let img: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_raw(depth.width(), depth.height(), samples)
            .context("decoded frame does not match its dimensions")?;
    img.save(&output)
        .with_context(|| format!("writing {:?}", output))?;

    eprintln!("  codec       : {}", name);
    eprintln!("  frame       : {}x{}", depth.width(), depth.height());
    eprintln!("  decode time : {:.3}ms", elapsed.as_secs_f64() * 1000.0);
    Ok(())
}

fn run_bench(
    width: u32,
    height: u32,
    codec_name: &str,
    min: f64,
    max: f64,
    frames: u32,
) -> anyhow::Result<()> {
    anyhow::ensure!(frames > 0, "need at least one frame");
    let range = DepthRange::new(min, max)?;
    let mut codec = codec_from_name(codec_name, false)?;
    let name = codec.name();
    let depth = synthetic_frame(width, height, range);

    eprintln!(
        "benchmarking {} over {} {}x{} frames...",
        name, frames, width, height
    );

    let t0 = Instant::now();
    for _ in 0..frames {
        codec.encode(&depth, range)?;
    }
    let encode_elapsed = t0.elapsed();

    let rgb = codec.encode(&depth, range)?.clone();

    let t1 = Instant::now();
    for _ in 0..frames {
        codec.decode(&rgb, range)?;
    }
    let decode_elapsed = t1.elapsed();
    let decoded = codec.decode(&rgb, range)?;

    // Error statistics over pixels that are valid on both sides: no-data
    // sources have no ground truth, and a decoded 0 is the far/no-data cell.
    let mut count = 0u64;
    let mut sum_err = 0.0f64;
    let mut max_err = 0.0f64;
    for (&src, &out) in depth.samples().iter().zip(decoded.samples()) {
        if src == 0.0 || out == 0.0 {
            continue;
        }
        let err = (f64::from(out) - f64::from(src)).abs();
        sum_err += err;
        max_err = max_err.max(err);
        count += 1;
    }

    let per_frame_ms = encode_elapsed.as_secs_f64() * 1000.0 / f64::from(frames);
    println!();
    println!("=== Round-Trip Benchmark: {} ===", name);
    println!("  frames      : {}", frames);
    println!("  encode      : {:.3}ms/frame ({:.1} fps)", per_frame_ms, 1000.0 / per_frame_ms);
    println!(
        "  decode      : {:.3}ms/frame",
        decode_elapsed.as_secs_f64() * 1000.0 / f64::from(frames)
    );
    println!("  pixels      : {} compared", count);
    if count > 0 {
        println!("  mean error  : {:.4} depth units", sum_err / count as f64);
        println!("  max error   : {:.4} depth units", max_err);
    }
    Ok(())
}

// ── Entry point ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Encode {
            input,
            output,
            codec,
            min,
            max,
        } => run_encode(input, output, &codec, min, max),
        Commands::Decode {
            input,
            output,
            codec,
            min,
            max,
            eight_bit,
        } => run_decode(input, output, &codec, min, max, eight_bit),
        Commands::Bench {
            width,
            height,
            codec,
            min,
            max,
            frames,
        } => run_bench(width, height, &codec, min, max, frames),
    }
}
