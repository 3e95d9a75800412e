use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::DynamicImage;
use tracing::{debug, instrument, warn};

use crate::image_pipeline::{
    common::error::{ImageError, Result},
    encode::{ImageWriter, OutputFormat, StandardImageWriter, resolve_format},
    load::ImageLoader,
    processor::types::{ProcessorConfig, Quality},
    transform,
};

/// Holds the image being worked on plus its output settings.
///
/// Transforms consume the processor and hand it back with the new image, so
/// calls chain with `?`:
///
/// ```no_run
/// use image_processor_rs::image_pipeline::ImageProcessor;
///
/// # fn main() -> image_processor_rs::image_pipeline::Result<()> {
/// ImageProcessor::open("input.png")?
///     .resize(100, 100)?
///     .grayscale()?
///     .quality(80)
///     .to_png()
///     .save("output.png")?;
/// # Ok(())
/// # }
/// ```
pub struct ImageProcessor<W: ImageWriter = StandardImageWriter> {
    image: Option<DynamicImage>,
    writer: W,
    config: ProcessorConfig,
}

impl ImageProcessor<StandardImageWriter> {
    pub fn new(image: DynamicImage) -> Self {
        Self::with_config(image, ProcessorConfig::default())
    }

    pub fn with_config(image: DynamicImage, config: ProcessorConfig) -> Self {
        Self {
            image: Some(image),
            writer: StandardImageWriter,
            config,
        }
    }

    /// A processor with nothing loaded; every transform and output fails
    /// with [`ImageError::NoImage`] until an image is set.
    pub fn empty() -> Self {
        Self {
            image: None,
            writer: StandardImageWriter,
            config: ProcessorConfig::default(),
        }
    }

    /// Loads a local path or URL with the default loader.
    pub fn open(source: &str) -> Result<Self> {
        Ok(Self::new(ImageLoader::new().load(source)?))
    }
}

impl<W: ImageWriter> ImageProcessor<W> {
    pub fn with_custom(image: Option<DynamicImage>, writer: W, config: ProcessorConfig) -> Self {
        Self {
            image,
            writer,
            config,
        }
    }

    pub fn set_image(mut self, image: DynamicImage) -> Self {
        self.image = Some(image);
        self
    }

    /// Runs `op` on the current image and makes its output current.
    fn apply<F>(mut self, name: &'static str, op: F) -> Result<Self>
    where
        F: FnOnce(&DynamicImage) -> Result<DynamicImage>,
    {
        let current = self.image.as_ref().ok_or(ImageError::NoImage)?;
        let _span = tracing::debug_span!(
            "transform",
            op = name,
            width = current.width(),
            height = current.height()
        )
        .entered();
        let next = op(current)?;
        self.image = Some(next);
        Ok(self)
    }

    // --- Transforms ---

    /// Resizes to exactly `width` x `height` using Catmull-Rom interpolation.
    pub fn resize(self, width: u32, height: u32) -> Result<Self> {
        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!(width, height, max, "Resize target exceeds maximum dimension");
                return Err(ImageError::InvalidDimensions(width, height));
            }
        }
        self.apply("resize", |img| transform::resize(img, width, height))
    }

    pub fn grayscale(self) -> Result<Self> {
        self.apply("grayscale", |img| Ok(transform::grayscale(img)))
    }

    pub fn rotate90(self) -> Result<Self> {
        self.apply("rotate90", |img| Ok(transform::rotate90(img)))
    }

    pub fn rotate180(self) -> Result<Self> {
        self.apply("rotate180", |img| Ok(transform::rotate180(img)))
    }

    pub fn rotate270(self) -> Result<Self> {
        self.apply("rotate270", |img| Ok(transform::rotate270(img)))
    }

    pub fn flip_horizontal(self) -> Result<Self> {
        self.apply("flip_horizontal", |img| Ok(transform::flip_horizontal(img)))
    }

    pub fn flip_vertical(self) -> Result<Self> {
        self.apply("flip_vertical", |img| Ok(transform::flip_vertical(img)))
    }

    /// Brightens (positive) or darkens (negative) by a percentage in `-100..=100`.
    pub fn brightness(self, percent: i32) -> Result<Self> {
        self.apply("brightness", |img| Ok(transform::brightness(img, percent)))
    }

    /// Stamps `text` near the bottom-right corner in semi-transparent white.
    pub fn watermark(self, text: &str) -> Result<Self> {
        self.apply("watermark", |img| Ok(transform::watermark(img, text)))
    }

    // --- Output settings ---

    /// Sets the quality; values outside `1..=100` are clamped.
    pub fn quality(mut self, quality: i32) -> Self {
        self.config.quality = Quality::new(quality);
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.target_format = Some(format);
        self
    }

    /// Sets the target format from a tag such as `"jpg"` or `".TIFF"`.
    pub fn format_tag(self, tag: &str) -> Result<Self> {
        let format = OutputFormat::parse(tag)?;
        Ok(self.format(format))
    }

    pub fn to_png(self) -> Self {
        self.format(OutputFormat::Png)
    }

    pub fn to_jpeg(self) -> Self {
        self.format(OutputFormat::Jpeg)
    }

    pub fn to_gif(self) -> Self {
        self.format(OutputFormat::Gif)
    }

    pub fn to_bmp(self) -> Self {
        self.format(OutputFormat::Bmp)
    }

    pub fn to_tiff(self) -> Self {
        self.format(OutputFormat::Tiff)
    }

    // --- Outputs ---

    /// Writes the image to `path`.
    ///
    /// The target format, if set, wins over the path's extension. The format
    /// is resolved before the file is created, and a file whose encoding fails
    /// is removed again.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let image = self.current()?;
        let format = resolve_format(None, self.config.target_format, Some(path))?;

        let file = {
            let _span = tracing::info_span!("create_output_file").entered();
            File::create(path).map_err(|e| {
                ImageError::OutputWriteError(format!("{}: {}", path.display(), e))
            })?
        };

        let mut output = BufWriter::new(file);
        let written = self
            .writer
            .write_image(image, format, self.config.quality, &mut output)
            .and_then(|()| output.flush().map_err(ImageError::from));
        drop(output);

        if let Err(e) = written {
            warn!(path = %path.display(), error = %e, "Encoding failed, removing partial output");
            if let Err(remove_err) = std::fs::remove_file(path) {
                debug!(error = %remove_err, "Could not remove partial output");
            }
            return Err(e);
        }

        debug!(path = %path.display(), %format, "Image saved");
        Ok(())
    }

    /// Encodes into memory. `format` overrides the target format; with
    /// neither present this fails with [`ImageError::MissingFormat`].
    pub fn to_bytes(&self, format: Option<&str>) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.encode(&mut buffer, format)?;
        Ok(buffer)
    }

    /// Encodes into a caller-owned sink, resolving the format like
    /// [`to_bytes`](Self::to_bytes).
    pub fn encode(&self, output: &mut dyn Write, format: Option<&str>) -> Result<()> {
        let image = self.current()?;
        let format = resolve_format(format, self.config.target_format, None)?;
        let _span = tracing::info_span!("encode", %format).entered();
        self.writer
            .write_image(image, format, self.config.quality, output)
    }

    // --- Accessors ---

    fn current(&self) -> Result<&DynamicImage> {
        self.image.as_ref().ok_or(ImageError::NoImage)
    }

    pub fn image(&self) -> Option<&DynamicImage> {
        self.image.as_ref()
    }

    pub fn into_image(self) -> Option<DynamicImage> {
        self.image
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|img| (img.width(), img.height()))
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ProcessorConfig) {
        self.config = config;
    }
}
