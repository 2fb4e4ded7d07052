use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bitplanes::{BitPlanes, ChannelExtractor, Image, RawIntensity};
use clap::{Args, Parser, Subcommand};
use image::{GrayImage, ImageReader};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "bp_gallery")]
#[command(about = "Run channel extraction on external image fixtures")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(name = "bitplanes")]
    BitPlanes(BitPlanesArgs),
    #[command(name = "raw")]
    Raw(RawArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out")]
    out: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct BitPlanesArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, default_value_t = 0.5)]
    sigma_ct: f32,
    #[arg(long, default_value_t = 0.5)]
    sigma_bp: f32,
}

#[derive(Args, Debug, Clone)]
struct RawArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Serialize)]
struct ChannelSummary {
    channel: usize,
    mean: f32,
    min: f32,
    max: f32,
}

#[derive(Serialize)]
struct Summary {
    variant: &'static str,
    width: usize,
    height: usize,
    channels: Vec<ChannelSummary>,
    saliency: ChannelSummary,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::BitPlanes(args) => run_bitplanes(&args),
        Command::Raw(args) => run_raw(&args),
    }
}

fn run_bitplanes(args: &BitPlanesArgs) -> Result<()> {
    let frame = load_luma8(&args.common.input)?;
    let mut bp = BitPlanes::new(args.sigma_ct, args.sigma_bp)?;
    bp.compute(&frame.as_view())?;

    let summary = render_variant(&bp, "bitplanes", &args.common.out)?;
    write_summary(&summary, &args.common.out)
}

fn run_raw(args: &RawArgs) -> Result<()> {
    let frame = load_luma8(&args.common.input)?;
    let mut raw = RawIntensity::new();
    raw.compute(&frame.as_view())?;

    let summary = render_variant(&raw, "raw", &args.common.out)?;
    write_summary(&summary, &args.common.out)
}

fn render_variant<E: ChannelExtractor>(
    extractor: &E,
    variant: &'static str,
    out_dir: &Path,
) -> Result<Summary> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output dir {}", out_dir.display()))?;

    let c0 = extractor.channel(0)?;
    let (width, height) = (c0.width(), c0.height());

    let mut channels = Vec::with_capacity(extractor.size());
    for i in 0..extractor.size() {
        let data = extractor.channel_data(i)?;
        channels.push(summarize(data, i));
        let path = out_dir.join(format!("{variant}_channel_{i}.png"));
        save_normalized(data, width, height, &path)?;
    }

    let saliency = extractor.compute_saliency_map()?;
    let saliency_summary = summarize(saliency.data(), 0);
    save_normalized(
        saliency.data(),
        width,
        height,
        &out_dir.join(format!("{variant}_saliency.png")),
    )?;

    println!(
        "{variant}: wrote {} channel maps + saliency to {}",
        extractor.size(),
        out_dir.display()
    );

    Ok(Summary {
        variant,
        width,
        height,
        channels,
        saliency: saliency_summary,
    })
}

fn load_luma8(path: &Path) -> Result<Image<u8>> {
    let gray = ImageReader::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .decode()
        .with_context(|| format!("decoding {}", path.display()))?
        .into_luma8();

    let width = gray.width() as usize;
    let height = gray.height() as usize;
    Image::from_vec(width, height, gray.into_raw()).context("building input frame")
}

fn summarize(data: &[f32], channel: usize) -> ChannelSummary {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    let mut sum = 0.0f64;
    for &v in data {
        min = min.min(v);
        max = max.max(v);
        sum += v as f64;
    }
    ChannelSummary {
        channel,
        mean: (sum / data.len().max(1) as f64) as f32,
        min,
        max,
    }
}

/// Renders a float map as 8-bit PNG, normalized to its own [min, max] span.
/// Flat maps render as black.
fn save_normalized(data: &[f32], width: usize, height: usize, path: &Path) -> Result<()> {
    let s = summarize(data, 0);
    let span = s.max - s.min;
    let scale = if span > 0.0 { 255.0 / span } else { 0.0 };

    let pixels: Vec<u8> = data
        .iter()
        .map(|&v| ((v - s.min) * scale).round().clamp(0.0, 255.0) as u8)
        .collect();

    let img = GrayImage::from_raw(width as u32, height as u32, pixels)
        .context("building output image")?;
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn write_summary(summary: &Summary, out_dir: &Path) -> Result<()> {
    let path = out_dir.join(format!("{}_summary.json", summary.variant));
    let file = fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, summary)
        .with_context(|| format!("writing JSON to {}", path.display()))?;
    println!("summary written to {}", path.display());
    Ok(())
}
