use image::{DynamicImage, GenericImageView, GrayImage, Luma, Rgba, RgbaImage};

use crate::image_pipeline::common::error::ImageError;
use crate::image_pipeline::transform::{
    WATERMARK_COLOR, brightness, flip_horizontal, flip_vertical, grayscale, resize, rotate90,
    rotate180, rotate270, watermark, watermark_origin,
};

/// Every pixel distinct, so mapping mistakes show up.
fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 20) as u8, (y * 20) as u8, (x + y * width) as u8, 200])
    }))
}

fn solid(width: u32, height: u32, color: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(color)))
}

#[test]
fn test_rotate180_maps_pixels() {
    let img = gradient(4, 3);
    let rotated = rotate180(&img);

    assert_eq!(rotated.dimensions(), (4, 3));
    for y in 0..3 {
        for x in 0..4 {
            assert_eq!(rotated.get_pixel(3 - x, 2 - y), img.get_pixel(x, y));
        }
    }
}

#[test]
fn test_rotate180_twice_is_identity() {
    let img = gradient(5, 3);
    assert_eq!(rotate180(&rotate180(&img)), img);
}

#[test]
fn test_rotate90_swaps_dimensions_and_maps_pixels() {
    let img = gradient(4, 2);
    let rotated = rotate90(&img);

    assert_eq!(rotated.dimensions(), (2, 4));
    for y in 0..2 {
        for x in 0..4 {
            assert_eq!(rotated.get_pixel(2 - 1 - y, x), img.get_pixel(x, y));
        }
    }
}

#[test]
fn test_rotate90_four_times_is_identity() {
    let img = gradient(5, 2);
    let mut current = img.clone();
    for _ in 0..4 {
        current = rotate90(&current);
    }
    assert_eq!(current, img);
}

#[test]
fn test_rotate270_undoes_rotate90() {
    let img = gradient(3, 6);
    assert_eq!(rotate270(&rotate90(&img)), img);
}

#[test]
fn test_flip_horizontal() {
    let img = gradient(4, 3);
    let flipped = flip_horizontal(&img);

    assert_eq!(flipped.get_pixel(3, 1), img.get_pixel(0, 1));
    assert_eq!(flipped.get_pixel(0, 2), img.get_pixel(3, 2));
    assert_eq!(flip_horizontal(&flipped), img);
}

#[test]
fn test_flip_vertical() {
    let img = gradient(4, 3);
    let flipped = flip_vertical(&img);

    assert_eq!(flipped.get_pixel(1, 2), img.get_pixel(1, 0));
    assert_eq!(flipped.get_pixel(3, 0), img.get_pixel(3, 2));
    assert_eq!(flip_vertical(&flipped), img);
}

#[test]
fn test_orientation_keeps_luma_layout() {
    let img = DynamicImage::ImageLuma8(GrayImage::from_fn(3, 2, |x, y| Luma([(x + y * 3) as u8])));

    assert!(matches!(rotate180(&img), DynamicImage::ImageLuma8(_)));
    assert!(matches!(rotate90(&img), DynamicImage::ImageLuma8(_)));
    assert!(matches!(flip_horizontal(&img), DynamicImage::ImageLuma8(_)));
    assert!(matches!(flip_vertical(&img), DynamicImage::ImageLuma8(_)));
}

#[test]
fn test_grayscale_is_single_channel() {
    let img = solid(6, 4, [255, 0, 0, 255]);
    let gray = grayscale(&img);

    assert_eq!(gray.dimensions(), (6, 4));
    assert_eq!(gray.color().channel_count(), 1);
    let DynamicImage::ImageLuma8(buffer) = &gray else {
        panic!("expected a luma image");
    };
    let first = buffer.get_pixel(0, 0)[0];
    assert!(first > 0 && first < 255);
    assert!(buffer.pixels().all(|p| p[0] == first));
}

#[test]
fn test_grayscale_white_and_black() {
    let white = grayscale(&solid(2, 2, [255, 255, 255, 10]));
    let black = grayscale(&solid(2, 2, [0, 0, 0, 255]));

    assert_eq!(white.to_luma8().get_pixel(1, 1)[0], 255);
    assert_eq!(black.to_luma8().get_pixel(1, 1)[0], 0);
}

#[test]
fn test_brightness_full_positive_saturates() {
    let img = gradient(4, 4);
    let bright = brightness(&img, 100).to_rgba8();

    for pixel in bright.pixels() {
        assert_eq!(&pixel.0[..3], &[255, 255, 255]);
        assert_eq!(pixel[3], 200);
    }
}

#[test]
fn test_brightness_full_negative_clears() {
    let img = gradient(4, 4);
    let dark = brightness(&img, -100).to_rgba8();

    for pixel in dark.pixels() {
        assert_eq!(&pixel.0[..3], &[0, 0, 0]);
        assert_eq!(pixel[3], 200);
    }
}

#[test]
fn test_brightness_zero_is_noop() {
    let img = gradient(4, 4);
    assert_eq!(brightness(&img, 0), img);
}

#[test]
fn test_brightness_clamps_percentage() {
    let img = gradient(3, 3);
    assert_eq!(brightness(&img, 250), brightness(&img, 100));
    assert_eq!(brightness(&img, -250), brightness(&img, -100));
}

#[test]
fn test_brightness_partial_truncates() {
    let img = solid(1, 1, [100, 200, 0, 255]);

    let up = brightness(&img, 50).to_rgba8();
    assert_eq!(up.get_pixel(0, 0).0, [227, 255, 127, 255]);

    let down = brightness(&img, -50).to_rgba8();
    assert_eq!(down.get_pixel(0, 0).0, [0, 72, 0, 255]);
}

#[test]
fn test_resize_exact_dimensions() {
    let img = solid(200, 200, [255, 0, 0, 255]);
    let resized = resize(&img, 100, 50).unwrap();

    assert_eq!(resized.dimensions(), (100, 50));
    let center = resized.get_pixel(50, 25);
    assert!(center[0] >= 250);
    assert!(center[1] <= 5);
    assert_eq!(center[3], 255);
}

#[test]
fn test_resize_upscale() {
    let img = gradient(4, 4);
    let resized = resize(&img, 16, 12).unwrap();
    assert_eq!(resized.dimensions(), (16, 12));
    assert!(matches!(resized, DynamicImage::ImageRgba8(_)));
}

#[test]
fn test_resize_rejects_zero() {
    let img = gradient(4, 4);

    assert!(matches!(
        resize(&img, 0, 10),
        Err(ImageError::InvalidDimensions(0, 10))
    ));
    assert!(matches!(
        resize(&img, 10, 0),
        Err(ImageError::InvalidDimensions(10, 0))
    ));
}

#[test]
fn test_watermark_origin_estimate() {
    assert_eq!(watermark_origin(200, 100, 5), (200 - 40 - 10, 90));
    // Too long for the image: starts left of zero and gets clipped.
    assert!(watermark_origin(20, 20, 10).0 < 0);
}

#[test]
fn test_watermark_blends_bottom_right() {
    let img = solid(100, 100, [0, 0, 0, 255]);
    let marked = watermark(&img, "A").to_rgba8();

    assert_eq!(marked.dimensions(), (100, 100));
    // Row 4 of 'A' is a solid bar across the first six columns.
    let (left, baseline) = watermark_origin(100, 100, 1);
    let inked = marked.get_pixel(left as u32, (baseline - 8 + 4) as u32);
    assert!(inked[0] > 100 && inked[0] < 255);
    assert_eq!(inked[3], 255);

    assert_eq!(marked.get_pixel(0, 0).0, [0, 0, 0, 255]);
    assert_eq!(marked.get_pixel(99, 99).0, [0, 0, 0, 255]);
}

#[test]
fn test_watermark_keeps_opaque_images_opaque() {
    let img = solid(120, 40, [0, 0, 0, 255]);
    let marked = watermark(&img, "Sample").to_rgba8();

    assert!(marked.pixels().all(|p| p[3] == 255));
    let inked: Vec<_> = marked.pixels().filter(|p| p[0] != 0).collect();
    assert!(!inked.is_empty());
    assert!(inked.iter().all(|p| p.0 == [128, 128, 128, 255]));
}

#[test]
fn test_watermark_over_transparent_is_watermark_color() {
    let img = solid(40, 30, [0, 0, 0, 0]);
    let marked = watermark(&img, "#").to_rgba8();

    let inked: Vec<_> = marked.pixels().filter(|p| p[3] != 0).collect();
    assert!(!inked.is_empty());
    assert!(inked.iter().all(|p| p.0 == WATERMARK_COLOR.0));
}

#[test]
fn test_watermark_does_not_replace_content() {
    let img = solid(60, 40, [200, 0, 0, 255]);
    let marked = watermark(&img, "##").to_rgba8();

    let touched: Vec<_> = marked
        .pixels()
        .filter(|p| p.0 != [200, 0, 0, 255])
        .collect();
    assert!(!touched.is_empty());
    for pixel in touched {
        assert_ne!(pixel.0, WATERMARK_COLOR.0);
        assert!(pixel[0] > 200);
    }
}

#[test]
fn test_watermark_long_text_is_clipped() {
    let img = solid(16, 16, [10, 10, 10, 255]);
    let text = "a watermark that is far wider than the image";
    let marked = watermark(&img, text);
    assert_eq!(marked.dimensions(), (16, 16));
}

#[test]
fn test_watermark_on_luma_returns_rgba() {
    let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(50, 30, Luma([0])));
    let marked = watermark(&img, "x");
    assert!(matches!(marked, DynamicImage::ImageRgba8(_)));
}
