use image::DynamicImage;
use tracing::{debug, info, instrument};

use crate::image_pipeline::common::error::{ImageError, Result};
use crate::image_pipeline::load::decoder::RasterDecoder;
use crate::image_pipeline::load::source::{ImageSource, has_svg_suffix};
use crate::image_pipeline::load::standard_raster_decoder::default_decoders;
use crate::image_pipeline::load::svg_rasterizer::SvgRasterizer;

/// Resolves sources to decoded images.
///
/// Raster input is matched against `decoders` in order; the first decoder
/// whose signature matches the leading bytes decodes it. Sources ending in
/// `.svg` go to the rasterizer instead.
pub struct ImageLoader {
    decoders: Vec<Box<dyn RasterDecoder>>,
    svg: SvgRasterizer,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        Self::with_decoders(default_decoders())
    }

    pub fn with_decoders(decoders: Vec<Box<dyn RasterDecoder>>) -> Self {
        Self {
            decoders,
            svg: SvgRasterizer::new(),
        }
    }

    pub fn svg_rasterizer(mut self, svg: SvgRasterizer) -> Self {
        self.svg = svg;
        self
    }

    pub fn decoder_names(&self) -> Vec<&'static str> {
        self.decoders.iter().map(|d| d.name()).collect()
    }

    /// Loads a local path or `http(s)://` URL.
    #[instrument(skip(self))]
    pub fn load(&self, source: &str) -> Result<DynamicImage> {
        self.load_source(&ImageSource::parse(source))
    }

    pub fn load_source(&self, source: &ImageSource) -> Result<DynamicImage> {
        let data = {
            let _span = tracing::info_span!("read_source").entered();
            source.read()?
        };

        let image = if source.is_svg() {
            let _span = tracing::info_span!("rasterize_svg").entered();
            self.svg.rasterize(&data)?
        } else {
            let _span = tracing::info_span!("decode_raster").entered();
            self.decode_raster(&data)?
        };

        info!(
            width = image.width(),
            height = image.height(),
            "Image loaded"
        );
        Ok(image)
    }

    /// Decodes an in-memory buffer. `name` only supplies the `.svg` suffix check.
    pub fn load_bytes(&self, name: &str, data: &[u8]) -> Result<DynamicImage> {
        if has_svg_suffix(name) {
            self.svg.rasterize(data)
        } else {
            self.decode_raster(data)
        }
    }

    pub fn decode_raster(&self, data: &[u8]) -> Result<DynamicImage> {
        if data.is_empty() {
            return Err(ImageError::DecodeError("empty input".to_string()));
        }

        let decoder = self
            .decoders
            .iter()
            .find(|d| d.matches(data))
            .ok_or_else(|| ImageError::DecodeError("unrecognized image signature".to_string()))?;

        debug!(decoder = decoder.name(), "Signature matched");
        decoder.decode(data)
    }
}

/// Loads `source` with the default decoder set.
pub fn load(source: &str) -> Result<DynamicImage> {
    ImageLoader::new().load(source)
}
