//! Text watermark drawn with a fixed 8x8 bitmap font.

use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{DynamicImage, Rgba};

/// Distance kept from the right and bottom edges.
pub const WATERMARK_MARGIN: i64 = 10;

/// Horizontal advance per character. Every glyph in the font is 8 wide.
pub const GLYPH_ADVANCE: i64 = 8;

const GLYPH_HEIGHT: i64 = 8;

/// Semi-transparent white.
pub const WATERMARK_COLOR: Rgba<u8> = Rgba([255, 255, 255, 128]);

/// Returns `(left, baseline)` for `char_count` glyphs anchored bottom-right.
///
/// The text width is estimated as `char_count * GLYPH_ADVANCE`, so long text on
/// a small image can still start left of the image; those pixels are clipped.
pub fn watermark_origin(width: u32, height: u32, char_count: usize) -> (i64, i64) {
    let text_width = char_count as i64 * GLYPH_ADVANCE;
    (
        i64::from(width) - text_width - WATERMARK_MARGIN,
        i64::from(height) - WATERMARK_MARGIN,
    )
}

/// Composites `text` over a copy of `image` near its bottom-right corner.
pub fn watermark(image: &DynamicImage, text: &str) -> DynamicImage {
    let mut canvas = image.to_rgba8();
    let (width, height) = canvas.dimensions();
    let (left, baseline) = watermark_origin(width, height, text.chars().count());
    let top = baseline - GLYPH_HEIGHT;

    for (index, ch) in text.chars().enumerate() {
        let glyph_left = left + index as i64 * GLYPH_ADVANCE;
        for (row, bits) in glyph(ch).into_iter().enumerate() {
            // Bit 0 is the leftmost column.
            for col in 0..8 {
                if (bits >> col) & 1 == 0 {
                    continue;
                }
                let x = glyph_left + col;
                let y = top + row as i64;
                if x < 0 || y < 0 || x >= i64::from(width) || y >= i64::from(height) {
                    continue;
                }
                let pixel = canvas.get_pixel_mut(x as u32, y as u32);
                *pixel = over(*pixel, WATERMARK_COLOR);
            }
        }
    }

    DynamicImage::ImageRgba8(canvas)
}

/// Straight-alpha source-over. An opaque destination stays opaque.
fn over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let src_a = u32::from(src[3]);
    let dst_weight = u32::from(dst[3]) * (255 - src_a);
    // Coverage scaled by 255 * 255.
    let out_a = src_a * 255 + dst_weight;
    if out_a == 0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for (channel, slot) in out.iter_mut().take(3).enumerate() {
        let sum = u32::from(src[channel]) * src_a * 255 + u32::from(dst[channel]) * dst_weight;
        *slot = ((sum + out_a / 2) / out_a) as u8;
    }
    out[3] = ((out_a + 127) / 255) as u8;
    Rgba(out)
}

fn glyph(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}
