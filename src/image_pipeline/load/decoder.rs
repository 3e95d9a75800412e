use image::DynamicImage;

use crate::image_pipeline::common::error::Result;

/// A raster codec the loader can dispatch to after sniffing leading bytes.
pub trait RasterDecoder {
    fn name(&self) -> &'static str;
    fn matches(&self, data: &[u8]) -> bool;
    fn decode(&self, data: &[u8]) -> Result<DynamicImage>;
}
