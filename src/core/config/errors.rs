//! Configuration error types and validation traits.

use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error indicating that a configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// A trait for validating configuration parameters.
///
/// Implementors only provide [`ConfigValidator::validate`] and
/// [`ConfigValidator::get_defaults`]; the remaining methods are reusable checks.
pub trait ConfigValidator {
    /// Validates the configuration.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Returns the default configuration.
    fn get_defaults() -> Self
    where
        Self: Sized;

    /// Validates image dimensions.
    ///
    /// This method checks that image dimensions are positive.
    fn validate_image_dimensions(&self, width: u32, height: u32) -> Result<(), ConfigError> {
        if width == 0 || height == 0 {
            Err(ConfigError::InvalidConfig {
                message: format!("Image dimensions must be positive, got {width}x{height}"),
            })
        } else {
            Ok(())
        }
    }

    /// Validates that a float is finite and strictly positive.
    fn validate_positive_f32(&self, value: f32, field_name: &str) -> Result<(), ConfigError> {
        if !value.is_finite() || value <= 0.0 {
            Err(ConfigError::InvalidConfig {
                message: format!("{} must be a positive finite number, got {}", field_name, value),
            })
        } else {
            Ok(())
        }
    }

    /// Validates that a count is greater than zero.
    fn validate_positive_usize(&self, value: usize, field_name: &str) -> Result<(), ConfigError> {
        if value == 0 {
            Err(ConfigError::InvalidConfig {
                message: format!("{} must be greater than 0", field_name),
            })
        } else {
            Ok(())
        }
    }
}

/// Extension methods for any [`ConfigValidator`].
pub trait ConfigValidatorExt: ConfigValidator + Sized {
    /// Validates `self` and hands it back, so construction and validation chain.
    fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}

impl<T: ConfigValidator> ConfigValidatorExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    impl ConfigValidator for Probe {
        fn validate(&self) -> Result<(), ConfigError> {
            Ok(())
        }

        fn get_defaults() -> Self {
            Probe
        }
    }

    #[test]
    fn test_validate_image_dimensions() {
        assert!(Probe.validate_image_dimensions(28, 28).is_ok());
        assert!(Probe.validate_image_dimensions(0, 28).is_err());
        assert!(Probe.validate_image_dimensions(28, 0).is_err());
    }

    #[test]
    fn test_validate_positive_f32() {
        assert!(Probe.validate_positive_f32(1.0, "scale").is_ok());
        assert!(Probe.validate_positive_f32(0.0, "scale").is_err());
        assert!(Probe.validate_positive_f32(f32::NAN, "scale").is_err());
        assert!(Probe.validate_positive_f32(f32::INFINITY, "scale").is_err());
    }

    #[test]
    fn test_config_error_to_string() {
        let err = ConfigError::InvalidConfig {
            message: "topk must be greater than 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: topk must be greater than 0"
        );
    }
}
