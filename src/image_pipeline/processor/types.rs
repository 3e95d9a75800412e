//! Processor configuration types

use crate::image_pipeline::encode::OutputFormat;

/// Output quality on a 1-100 scale.
///
/// JPEG uses it directly, PNG maps it onto a compression-effort bucket and
/// the remaining formats ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u8);

impl Quality {
    pub const MIN: Quality = Quality(1);
    pub const MAX: Quality = Quality(100);
    pub const DEFAULT: Quality = Quality(90);

    /// Clamps `value` into `1..=100`.
    pub fn new(value: i32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<i32> for Quality {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

/// Configuration carried by an [`ImageProcessor`](super::ImageProcessor)
#[derive(Debug, Clone, Default)]
pub struct ProcessorConfig {
    /// Encoder quality
    pub quality: Quality,
    /// Explicit output format; overrides any format inferred from a path
    pub target_format: Option<OutputFormat>,
    /// Upper bound on either side of a resize target, if any
    pub max_dimension: Option<u32>,
}

impl ProcessorConfig {
    pub fn builder() -> ProcessorConfigBuilder {
        ProcessorConfigBuilder::default()
    }
}

/// Builder for ProcessorConfig
#[derive(Default)]
pub struct ProcessorConfigBuilder {
    quality: Option<Quality>,
    target_format: Option<Option<OutputFormat>>,
    max_dimension: Option<Option<u32>>,
}

impl ProcessorConfigBuilder {
    pub fn quality(mut self, quality: impl Into<Quality>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    pub fn target_format(mut self, format: Option<OutputFormat>) -> Self {
        self.target_format = Some(format);
        self
    }

    pub fn max_dimension(mut self, max: Option<u32>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> ProcessorConfig {
        let default = ProcessorConfig::default();
        ProcessorConfig {
            quality: self.quality.unwrap_or(default.quality),
            target_format: self.target_format.unwrap_or(default.target_format),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}
