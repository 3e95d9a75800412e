use image::DynamicImage;
use image::imageops::{self, FilterType};
use tracing::debug;

use crate::image_pipeline::common::error::{ImageError, Result};

/// Resamples `image` to exactly `width` x `height` with a Catmull-Rom kernel.
///
/// The result is always a freshly allocated RGBA8 grid; aspect ratio is not
/// preserved. Zero-sized targets and empty sources are rejected.
pub fn resize(image: &DynamicImage, width: u32, height: u32) -> Result<DynamicImage> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions(width, height));
    }
    if image.width() == 0 || image.height() == 0 {
        return Err(ImageError::InvalidDimensions(image.width(), image.height()));
    }

    debug!(
        from_width = image.width(),
        from_height = image.height(),
        width,
        height,
        "Resizing with Catmull-Rom"
    );

    let resized = imageops::resize(image, width, height, FilterType::CatmullRom);
    Ok(DynamicImage::ImageRgba8(resized))
}
