//! The core module of the digit pad.
//!
//! This module contains the fundamental components shared by the rest of the crate:
//! - Configuration management
//! - Constants used throughout the pipeline
//! - Error handling
//! - Inference engine integration
//!
//! It also provides re-exports of commonly used types for convenience.

pub mod config;
pub mod constants;
pub mod errors;
pub mod inference;

pub use config::{ConfigError, ConfigValidator, DigitPadConfig};
pub use constants::*;
pub use errors::{DigitError, DigitResult, ProcessingStage};
pub use inference::OrtInfer;

/// A 2D tensor of `f32` scores, one row per batch item.
pub type Tensor2D = ndarray::Array2<f32>;

/// A 4D tensor of `f32` values as fed to the classifier.
pub type Tensor4D = ndarray::Array4<f32>;
