//! Encoding module
//!
//! Output format resolution and dispatch to the individual codecs.

mod format;
mod standard_image_writer;
mod writer;


pub use format::{OutputFormat, resolve_format};
pub use standard_image_writer::{StandardImageWriter, png_compression};
pub use writer::ImageWriter;
