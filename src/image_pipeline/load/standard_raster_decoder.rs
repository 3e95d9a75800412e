//! Signature-sniffing decoders backed by the `image` codecs.

use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::image_pipeline::common::error::{ImageError, Result};
use crate::image_pipeline::load::decoder::RasterDecoder;

/// Bytes expected at a fixed offset from the start of the stream.
#[derive(Debug, Clone, Copy)]
pub struct MagicBytes {
    pub offset: usize,
    pub bytes: &'static [u8],
}

/// Matches when every part matches.
pub type Signature = &'static [MagicBytes];

const fn at_start(bytes: &'static [u8]) -> MagicBytes {
    MagicBytes { offset: 0, bytes }
}

const PNG: &[Signature] = &[&[at_start(b"\x89PNG\r\n\x1a\n")]];
const JPEG: &[Signature] = &[&[at_start(b"\xFF\xD8\xFF")]];
const GIF: &[Signature] = &[&[at_start(b"GIF87a")], &[at_start(b"GIF89a")]];
const BMP: &[Signature] = &[&[at_start(b"BM")]];
const TIFF: &[Signature] = &[&[at_start(b"II*\0")], &[at_start(b"MM\0*")]];
const WEBP: &[Signature] = &[&[
    at_start(b"RIFF"),
    MagicBytes {
        offset: 8,
        bytes: b"WEBP",
    },
]];

pub struct StandardRasterDecoder {
    name: &'static str,
    format: ImageFormat,
    signatures: &'static [Signature],
}

impl StandardRasterDecoder {
    pub const fn new(
        name: &'static str,
        format: ImageFormat,
        signatures: &'static [Signature],
    ) -> Self {
        Self {
            name,
            format,
            signatures,
        }
    }

    pub const fn png() -> Self {
        Self::new("png", ImageFormat::Png, PNG)
    }

    pub const fn jpeg() -> Self {
        Self::new("jpeg", ImageFormat::Jpeg, JPEG)
    }

    pub const fn gif() -> Self {
        Self::new("gif", ImageFormat::Gif, GIF)
    }

    pub const fn bmp() -> Self {
        Self::new("bmp", ImageFormat::Bmp, BMP)
    }

    pub const fn tiff() -> Self {
        Self::new("tiff", ImageFormat::Tiff, TIFF)
    }

    pub const fn webp() -> Self {
        Self::new("webp", ImageFormat::WebP, WEBP)
    }
}

impl RasterDecoder for StandardRasterDecoder {
    fn name(&self) -> &'static str {
        self.name
    }

    fn matches(&self, data: &[u8]) -> bool {
        self.signatures.iter().any(|signature| {
            signature.iter().all(|magic| {
                data.get(magic.offset..magic.offset + magic.bytes.len()) == Some(magic.bytes)
            })
        })
    }

    fn decode(&self, data: &[u8]) -> Result<DynamicImage> {
        debug!("Decoding {} image, {} bytes", self.name, data.len());
        let image = image::load_from_memory_with_format(data, self.format)
            .map_err(|e| ImageError::DecodeError(format!("{}: {}", self.name, e)))?;
        debug!("Decoded image: {}x{}", image.width(), image.height());
        Ok(image)
    }
}

/// PNG, JPEG, GIF, BMP, TIFF and WebP, in that order.
pub fn default_decoders() -> Vec<Box<dyn RasterDecoder>> {
    vec![
        Box::new(StandardRasterDecoder::png()),
        Box::new(StandardRasterDecoder::jpeg()),
        Box::new(StandardRasterDecoder::gif()),
        Box::new(StandardRasterDecoder::bmp()),
        Box::new(StandardRasterDecoder::tiff()),
        Box::new(StandardRasterDecoder::webp()),
    ]
}
