//! Transform engine
//!
//! Pure `&DynamicImage -> DynamicImage` functions. None of them mutate their
//! input; the processor swaps in each result as the new current image.

mod color;
mod orientation;
mod resize;
mod watermark;

#[cfg(test)]
mod tests;

pub use color::{brightness, grayscale};
pub use orientation::{flip_horizontal, flip_vertical, rotate90, rotate180, rotate270};
pub use resize::resize;
pub use watermark::{GLYPH_ADVANCE, WATERMARK_COLOR, WATERMARK_MARGIN, watermark, watermark_origin};
