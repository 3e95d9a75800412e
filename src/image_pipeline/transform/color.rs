use image::DynamicImage;

/// Converts to a single-channel luma image using the `image` crate's
/// perceptual weighting. Alpha is dropped.
pub fn grayscale(image: &DynamicImage) -> DynamicImage {
    DynamicImage::ImageLuma8(image.to_luma8())
}

/// Shifts red, green and blue by `percent` of full scale.
///
/// `percent` is clamped to `-100..=100`; each channel becomes
/// `clamp(v + 255 * percent / 100, 0, 255)`, truncated. Alpha is untouched.
pub fn brightness(image: &DynamicImage, percent: i32) -> DynamicImage {
    let percent = percent.clamp(-100, 100);
    let offset = 255.0 * percent as f32 / 100.0;

    let mut rgba = image.to_rgba8();
    for pixel in rgba.pixels_mut() {
        for channel in pixel.0.iter_mut().take(3) {
            *channel = (f32::from(*channel) + offset).clamp(0.0, 255.0) as u8;
        }
    }

    DynamicImage::ImageRgba8(rgba)
}
