//! Example: channel extraction statistics for one frame.
//!
//! Loads a PNG as 8-bit grayscale, runs both extractor variants, and prints
//! per-plane fill ratios plus saliency statistics. Results are written to a
//! JSON file next to the input image.
//!
//! Run from the workspace root:
//!   cargo run -p bitplanes --example channel_stats -- --help
//!   cargo run -p bitplanes --example channel_stats -- --input frame.png

use std::time::Instant;

use anyhow::{Context, Result};
use bitplanes::{BitPlanes, ChannelExtractor, Image, RawIntensity};
use clap::Parser;
use image::ImageReader;
use serde::Serialize;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Print channel statistics for one intensity frame")]
struct Args {
    /// Path to the input PNG (default: data/frame_0.png)
    #[arg(long, default_value = "data/frame_0.png")]
    input: String,

    /// Pre-comparator smoothing bandwidth (0 disables)
    #[arg(long, default_value_t = 0.5)]
    sigma_ct: f32,

    /// Per-plane smoothing bandwidth (0 disables)
    #[arg(long, default_value_t = 0.5)]
    sigma_bp: f32,

    /// Output JSON path (default: <input stem>_channels.json next to input)
    #[arg(long)]
    out: Option<String>,
}

// ── JSON DTOs ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChannelDto {
    index: usize,
    mean: f32,
    min: f32,
    max: f32,
}

#[derive(Serialize)]
struct VariantResult {
    variant: &'static str,
    num_channels: usize,
    /// Wall-clock time for compute + saliency, in milliseconds.
    elapsed_ms: f64,
    channels: Vec<ChannelDto>,
    saliency_mean: f32,
    saliency_max: f32,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn channel_stats(data: &[f32], index: usize) -> ChannelDto {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    let mut sum = 0.0f64;
    for &v in data {
        min = min.min(v);
        max = max.max(v);
        sum += v as f64;
    }
    ChannelDto {
        index,
        mean: (sum / data.len() as f64) as f32,
        min,
        max,
    }
}

fn run_variant<E: ChannelExtractor>(
    extractor: &mut E,
    variant: &'static str,
    frame: &Image<u8>,
) -> Result<VariantResult> {
    let t0 = Instant::now();
    extractor.compute(&frame.as_view())?;
    let saliency = extractor.compute_saliency_map()?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    let channels = (0..extractor.size())
        .map(|i| Ok(channel_stats(extractor.channel_data(i)?, i)))
        .collect::<Result<Vec<_>>>()?;

    let s = channel_stats(saliency.data(), 0);
    println!(
        "  {variant}: {} channels, saliency mean {:.3} max {:.3}  ({elapsed_ms:.2} ms)",
        extractor.size(),
        s.mean,
        s.max
    );

    Ok(VariantResult {
        variant,
        num_channels: extractor.size(),
        elapsed_ms,
        channels,
        saliency_mean: s.mean,
        saliency_max: s.max,
    })
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    let img_path = &args.input;
    let out_path = args.out.unwrap_or_else(|| {
        let p = std::path::Path::new(img_path);
        let stem = p.file_stem().unwrap_or_default().to_string_lossy();
        let dir = p.parent().unwrap_or(std::path::Path::new("."));
        dir.join(format!("{stem}_channels.json"))
            .to_string_lossy()
            .into_owned()
    });

    let gray = ImageReader::open(img_path)
        .with_context(|| format!("opening {img_path}"))?
        .decode()
        .with_context(|| format!("decoding {img_path}"))?
        .into_luma8();

    let width = gray.width() as usize;
    let height = gray.height() as usize;
    let frame = Image::from_vec(width, height, gray.into_raw()).context("building frame")?;

    println!(
        "loaded {img_path}: {width}x{height}, sigma_ct={:.2}, sigma_bp={:.2}",
        args.sigma_ct, args.sigma_bp
    );

    let mut results = Vec::with_capacity(2);
    results.push(run_variant(&mut RawIntensity::new(), "raw", &frame)?);
    results.push(run_variant(
        &mut BitPlanes::new(args.sigma_ct, args.sigma_bp)?,
        "bitplanes",
        &frame,
    )?);

    let out_file =
        std::fs::File::create(&out_path).with_context(|| format!("creating {out_path}"))?;
    serde_json::to_writer_pretty(out_file, &results)
        .with_context(|| format!("writing JSON to {out_path}"))?;

    println!("results written to {out_path}");
    Ok(())
}
