use std::path::{Path, PathBuf};

use tracing::debug;

use crate::image_pipeline::common::error::{ImageError, Result};

/// Where an image's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Local(PathBuf),
    Remote(String),
}

impl ImageSource {
    /// `http://` and `https://` prefixes select a download; anything else is a
    /// filesystem path.
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::Remote(source.to_string())
        } else {
            Self::Local(PathBuf::from(source))
        }
    }

    /// Whether the source names an SVG document, judged by its suffix.
    pub fn is_svg(&self) -> bool {
        match self {
            Self::Local(path) => has_svg_suffix(&path.to_string_lossy()),
            Self::Remote(url) => has_svg_suffix(url),
        }
    }

    /// Reads the full contents. File handles and response bodies are closed
    /// before this returns.
    pub fn read(&self) -> Result<Vec<u8>> {
        match self {
            Self::Local(path) => read_local(path),
            Self::Remote(url) => fetch_remote(url),
        }
    }
}

impl From<&str> for ImageSource {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

/// Case-insensitive `.svg` check that ignores a URL query or fragment.
pub(crate) fn has_svg_suffix(name: &str) -> bool {
    let path = name.split(['?', '#']).next().unwrap_or(name);
    path.to_ascii_lowercase().ends_with(".svg")
}

fn read_local(path: &Path) -> Result<Vec<u8>> {
    let data = std::fs::read(path)
        .map_err(|e| ImageError::InputReadError(format!("{}: {}", path.display(), e)))?;
    debug!(path = %path.display(), bytes = data.len(), "Read local image");
    Ok(data)
}

fn fetch_remote(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::blocking::get(url)
        .map_err(|e| ImageError::FetchError(format!("{}: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ImageError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response
        .bytes()
        .map_err(|e| ImageError::FetchError(format!("{}: {}", url, e)))?;
    debug!(url, bytes = body.len(), "Downloaded image");
    Ok(body.to_vec())
}
