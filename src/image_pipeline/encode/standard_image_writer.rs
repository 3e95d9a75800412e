use std::borrow::Cow;
use std::io::{Cursor, Write};

use image::codecs::bmp::BmpEncoder;
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ExtendedColorType};
use tiff::encoder::{TiffEncoder, colortype};
use tracing::debug;

use crate::image_pipeline::common::error::{ImageError, Result};
use crate::image_pipeline::encode::format::OutputFormat;
use crate::image_pipeline::encode::writer::ImageWriter;
use crate::image_pipeline::processor::types::Quality;

/// Quality at or below which PNG output favors speed over size.
const PNG_FAST_MAX_QUALITY: u8 = 25;
/// Quality at or above which PNG output favors size over speed.
const PNG_BEST_MIN_QUALITY: u8 = 76;

/// Encoder backed by the `image` codecs, with TIFF written through `tiff`.
pub struct StandardImageWriter;

impl ImageWriter for StandardImageWriter {
    fn write_image(
        &self,
        image: &DynamicImage,
        format: OutputFormat,
        quality: Quality,
        output: &mut dyn Write,
    ) -> Result<()> {
        debug!(
            width = image.width(),
            height = image.height(),
            %format,
            quality = quality.get(),
            "Encoding image"
        );

        match format {
            OutputFormat::Jpeg => write_jpeg(image, quality, output),
            OutputFormat::Png => write_png(image, quality, output),
            OutputFormat::Gif => write_gif(image, output),
            OutputFormat::Bmp => write_bmp(image, output),
            OutputFormat::Tiff => write_tiff(image, output),
        }?;

        debug!(%format, "Encoding complete");
        Ok(())
    }
}

/// Maps the 1-100 quality scale onto the PNG compression effort buckets.
pub fn png_compression(quality: Quality) -> CompressionType {
    match quality.get() {
        q if q <= PNG_FAST_MAX_QUALITY => CompressionType::Fast,
        q if q >= PNG_BEST_MIN_QUALITY => CompressionType::Best,
        _ => CompressionType::Default,
    }
}

/// Reduces any decoded layout to the two this crate writes: 8-bit luma or RGBA.
fn luma_or_rgba(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgba8(_) => Cow::Borrowed(image),
        _ => Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8())),
    }
}

fn encode_err(e: impl std::fmt::Display) -> ImageError {
    ImageError::EncodeError(e.to_string())
}

fn write_jpeg(image: &DynamicImage, quality: Quality, output: &mut dyn Write) -> Result<()> {
    // JPEG carries no alpha channel.
    let flattened = match image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => Cow::Borrowed(image),
        _ => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
    };
    let encoder = JpegEncoder::new_with_quality(output, quality.get());
    flattened.write_with_encoder(encoder).map_err(encode_err)
}

fn write_png(image: &DynamicImage, quality: Quality, output: &mut dyn Write) -> Result<()> {
    let compression = png_compression(quality);
    debug!(?compression, "PNG compression selected");
    let encoder = PngEncoder::new_with_quality(output, compression, FilterType::Adaptive);
    luma_or_rgba(image)
        .write_with_encoder(encoder)
        .map_err(encode_err)
}

fn write_gif(image: &DynamicImage, output: &mut dyn Write) -> Result<()> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut encoder = GifEncoder::new(output);
    encoder
        .encode(rgba.as_raw(), width, height, ExtendedColorType::Rgba8)
        .map_err(encode_err)
}

fn write_bmp(image: &DynamicImage, mut output: &mut dyn Write) -> Result<()> {
    let encoder = BmpEncoder::new(&mut output);
    luma_or_rgba(image)
        .write_with_encoder(encoder)
        .map_err(encode_err)
}

fn write_tiff(image: &DynamicImage, output: &mut dyn Write) -> Result<()> {
    // The TIFF encoder seeks back to patch offsets, so encode into memory first.
    let mut buffer = Vec::new();
    {
        let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer)).map_err(encode_err)?;
        match luma_or_rgba(image).as_ref() {
            DynamicImage::ImageLuma8(gray) => encoder
                .write_image::<colortype::Gray8>(gray.width(), gray.height(), gray.as_raw())
                .map_err(encode_err)?,
            other => {
                let rgba = other.to_rgba8();
                encoder
                    .write_image::<colortype::RGBA8>(rgba.width(), rgba.height(), rgba.as_raw())
                    .map_err(encode_err)?
            }
        }
    }

    output.write_all(&buffer)?;
    Ok(())
}
