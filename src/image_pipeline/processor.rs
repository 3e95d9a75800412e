//! Processor module
//!
//! The chainable wrapper that carries the current image and its output
//! settings between transforms.

mod image_processor;
pub mod types;


pub use image_processor::ImageProcessor;
pub use types::{ProcessorConfig, ProcessorConfigBuilder, Quality};
