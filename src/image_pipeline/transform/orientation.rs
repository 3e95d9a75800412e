//! Lossless rotations and mirrors.
//!
//! These keep the input's pixel layout: a luminance image stays single-channel.

use image::DynamicImage;

/// dst(W-1-x, H-1-y) = src(x, y)
pub fn rotate180(image: &DynamicImage) -> DynamicImage {
    image.rotate180()
}

/// Clockwise quarter turn; the output is `height` x `width`.
pub fn rotate90(image: &DynamicImage) -> DynamicImage {
    image.rotate90()
}

/// Counter-clockwise quarter turn; the output is `height` x `width`.
pub fn rotate270(image: &DynamicImage) -> DynamicImage {
    image.rotate270()
}

pub fn flip_horizontal(image: &DynamicImage) -> DynamicImage {
    image.fliph()
}

pub fn flip_vertical(image: &DynamicImage) -> DynamicImage {
    image.flipv()
}
