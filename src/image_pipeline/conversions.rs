//! Pipeline conversions module
//!
//! Single-shot orchestration of loading, processing and saving.

mod convert;

pub use convert::{ConversionPipeline, convert};
