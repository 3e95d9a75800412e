//! Image loading module
//!
//! Turns a local path or URL into a decoded image, either through an ordered
//! list of signature-sniffing raster decoders or the SVG rasterizer.

mod decoder;
mod loader;
mod source;
mod standard_raster_decoder;
mod svg_rasterizer;


pub use decoder::RasterDecoder;
pub use loader::{ImageLoader, load};
pub use source::ImageSource;
pub use standard_raster_decoder::{MagicBytes, Signature, StandardRasterDecoder, default_decoders};
pub use svg_rasterizer::{DEFAULT_SVG_SIZE, SvgRasterizer};
