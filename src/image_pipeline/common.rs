//! Common utilities module
//!
//! Shared error type and result alias used across the image pipeline.

pub mod error;

pub use error::{ImageError, Result};
