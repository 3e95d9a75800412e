use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to download image: {0}")]
    FetchError(String),

    #[error("Failed to download image from {url}, status code: {status}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to read SVG: {0}")]
    SvgError(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("no format specified for conversion")]
    MissingFormat,

    #[error("no image loaded")]
    NoImage,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ImageError>;
