//! Image processing pipeline module
//!
//! Loading (raster decoders and SVG rasterization), pure pixel transforms,
//! format-dispatched encoding, and the chainable processor tying them together.

pub mod common;
pub mod conversions;
pub mod encode;
pub mod load;
pub mod processor;
pub mod transform;

pub use common::{ImageError, Result};

pub use load::{
    DEFAULT_SVG_SIZE, ImageLoader, ImageSource, RasterDecoder, StandardRasterDecoder,
    SvgRasterizer, default_decoders, load,
};

pub use encode::{ImageWriter, OutputFormat, StandardImageWriter};

pub use processor::{ImageProcessor, ProcessorConfig, ProcessorConfigBuilder, Quality};

pub use conversions::{ConversionPipeline, convert};
