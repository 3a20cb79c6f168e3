//! Configuration types and validation for the digit pad.

pub mod errors;
pub mod pad;

pub use errors::{ConfigError, ConfigValidator, ConfigValidatorExt};
pub use pad::{DigitPadConfig, ModelConfig, NormalizerConfig, StrokeStyle, SurfaceConfig};
