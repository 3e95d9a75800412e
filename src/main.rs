use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use image_processor_rs::image_pipeline::{ImageLoader, ImageProcessor, convert};
use image_processor_rs::logger;

use tracing::{error, info};

const DEMO_SVG: &str = r#"<svg height="100" width="100" xmlns="http://www.w3.org/2000/svg"><circle cx="50" cy="50" r="40" stroke="black" stroke-width="3" fill="red" /></svg>"#;

/// Runs a tour of conversions and transforms over one input image.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Local image path or http(s) URL
    source: String,

    /// Directory the demo outputs are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output directory {}", args.out_dir.display()))?;
    let out = |name: &str| args.out_dir.join(name);

    info!(source = %args.source, "Loading image");
    let image = ImageLoader::new()
        .load(&args.source)
        .with_context(|| format!("load {}", args.source))?;

    info!("Explicit conversion to PNG");
    if let Err(e) = ImageProcessor::new(image.clone())
        .to_png()
        .save(out("explicit_output.png"))
    {
        error!("Failed to convert image: {}", e);
    }

    info!("SVG rasterization to PNG");
    let svg_path = out("test.svg");
    std::fs::write(&svg_path, DEMO_SVG).context("write demo svg")?;
    if let Err(e) = convert(&svg_path.to_string_lossy(), out("output_from_svg.png")) {
        error!("Failed to convert SVG: {}", e);
    }

    info!("Resize 300x300, watermark, quality 50 JPEG");
    let watermarked = ImageProcessor::new(image.clone())
        .resize(300, 300)
        .and_then(|p| p.watermark("Reduced Quality"))
        .and_then(|p| p.quality(50).save(out("output_low_quality.jpg")));
    if let Err(e) = watermarked {
        error!("Failed to save watermarked image: {}", e);
    }

    info!("Rotate 180 and flip vertical");
    let refined = ImageProcessor::new(image.clone())
        .rotate180()
        .and_then(|p| p.flip_vertical())
        .and_then(|p| p.save(out("output_refined.png")));
    if let Err(e) = refined {
        error!("Failed to save refined image: {}", e);
    }

    let data = ImageProcessor::new(image)
        .grayscale()?
        .to_bytes(Some("jpeg"))
        .context("encode grayscale JPEG")?;
    info!(bytes = data.len(), "Generated grayscale JPEG in memory");

    info!("Done");
    Ok(())
}
