//! Output format identification

use std::fmt;
use std::path::Path;

use crate::image_pipeline::common::error::{ImageError, Result};

/// Raster codecs the encoder can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Tiff,
}

impl OutputFormat {
    /// Parses a format tag such as `"png"`, `"JPG"` or `".tif"`.
    ///
    /// Matching is case-insensitive and a single leading `.` is ignored, so a
    /// file extension can be passed straight through.
    pub fn parse(tag: &str) -> Result<Self> {
        let normalized = tag.trim().to_ascii_lowercase();
        let normalized = normalized.strip_prefix('.').unwrap_or(&normalized);
        match normalized {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "gif" => Ok(Self::Gif),
            "bmp" => Ok(Self::Bmp),
            "tif" | "tiff" => Ok(Self::Tiff),
            "" => Err(ImageError::MissingFormat),
            other => Err(ImageError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Infers the format from a path's extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) => Self::parse(ext),
            None => Err(ImageError::MissingFormat),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Picks the format for an output operation.
///
/// An explicit tag wins over the processor's target format, which wins over
/// the destination path's extension.
pub fn resolve_format(
    explicit: Option<&str>,
    target: Option<OutputFormat>,
    path: Option<&Path>,
) -> Result<OutputFormat> {
    if let Some(tag) = explicit.filter(|tag| !tag.trim().is_empty()) {
        return OutputFormat::parse(tag);
    }
    if let Some(format) = target {
        return Ok(format);
    }
    match path {
        Some(path) => OutputFormat::from_path(path),
        None => Err(ImageError::MissingFormat),
    }
}
