use std::path::Path;

use tracing::{info, instrument};

use crate::image_pipeline::{
    common::error::Result,
    encode::{ImageWriter, OutputFormat, StandardImageWriter},
    load::ImageLoader,
    processor::{ImageProcessor, ProcessorConfig},
};

/// Load-then-save conversion between any readable source and a writable format.
pub struct ConversionPipeline<W: ImageWriter> {
    loader: ImageLoader,
    writer: W,
    config: ProcessorConfig,
}

impl ConversionPipeline<StandardImageWriter> {
    pub fn new(config: ProcessorConfig) -> Self {
        Self {
            loader: ImageLoader::new(),
            writer: StandardImageWriter,
            config,
        }
    }
}

impl Default for ConversionPipeline<StandardImageWriter> {
    fn default() -> Self {
        Self::new(ProcessorConfig::default())
    }
}

impl<W: ImageWriter> ConversionPipeline<W> {
    pub fn with_custom(loader: ImageLoader, writer: W, config: ProcessorConfig) -> Self {
        Self {
            loader,
            writer,
            config,
        }
    }

    /// Loads `source` (path or URL) and saves it to `output_path`.
    ///
    /// The output format is the configured target format, else the output
    /// path's extension. Nothing is left at `output_path` if saving fails.
    #[instrument(skip(self, output_path), fields(output = %output_path.as_ref().display()))]
    pub fn convert_file<Q: AsRef<Path>>(&self, source: &str, output_path: Q) -> Result<()> {
        let output_path = output_path.as_ref();
        info!("Converting file");

        let image = {
            let _span = tracing::info_span!("load").entered();
            self.loader.load(source)?
        };
        let (width, height) = (image.width(), image.height());

        ImageProcessor::with_custom(Some(image), &self.writer, self.config.clone())
            .save(output_path)?;

        info!(width, height, "Conversion complete");
        Ok(())
    }

    /// Converts an in-memory buffer. `name` is only consulted for the `.svg`
    /// suffix.
    #[instrument(skip(self, data), fields(input_size = data.len()))]
    pub fn convert_bytes(&self, name: &str, data: &[u8], format: OutputFormat) -> Result<Vec<u8>> {
        let image = self.loader.load_bytes(name, data)?;
        ImageProcessor::with_custom(Some(image), &self.writer, self.config.clone())
            .format(format)
            .to_bytes(None)
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ProcessorConfig) {
        self.config = config;
    }
}

/// Loads `source` and saves it to `destination` with default settings.
pub fn convert<Q: AsRef<Path>>(source: &str, destination: Q) -> Result<()> {
    ConversionPipeline::default().convert_file(source, destination)
}
