//! Serializable configuration for a digit pad session.
//!
//! Every field has a default matching the reference drawing pad, so an empty
//! JSON object (`{}`) is a valid configuration.

use super::errors::{ConfigError, ConfigValidator};
use crate::core::constants::*;
use crate::core::errors::DigitResult;
use crate::processors::{ResampleFilter, TensorLayout};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Size and background of the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
    /// Background fill applied on creation and on clear (RGB).
    pub background: [u8; 3],
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
            background: DEFAULT_BACKGROUND,
        }
    }
}

/// How strokes are rendered. Caps are always round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub width: f32,
    pub color: [u8; 3],
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: DEFAULT_STROKE_WIDTH,
            color: DEFAULT_STROKE_COLOR,
        }
    }
}

/// Parameters of the surface-to-tensor conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Side length of the square model input.
    pub target_size: u32,
    pub layout: TensorLayout,
    /// Multiplier applied to the 0-255 channel mean (1.0 keeps raw intensities).
    pub scale: f32,
    pub resample: ResampleFilter,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_TARGET_SIZE,
            layout: TensorLayout::default(),
            scale: 1.0,
            resample: ResampleFilter::default(),
        }
    }
}

/// Location and I/O binding of the classifier artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub model_path: PathBuf,
    /// Input tensor name; the first model input is used when unset.
    pub input_name: Option<String>,
    /// Output tensor name; the first model output is used when unset.
    pub output_name: Option<String>,
    /// Apply softmax to the raw outputs (for models exported without it).
    pub apply_softmax: bool,
    /// One label per class, in class-index order.
    pub labels: Vec<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            input_name: None,
            output_name: None,
            apply_softmax: false,
            labels: digit_labels(),
        }
    }
}

/// Complete configuration of a digit pad session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DigitPadConfig {
    pub surface: SurfaceConfig,
    pub stroke: StrokeStyle,
    pub normalizer: NormalizerConfig,
    pub model: ModelConfig,
    /// Number of ranked alternatives reported with each prediction.
    pub topk: Option<usize>,
}

impl DigitPadConfig {
    pub fn new() -> Self {
        Self::get_defaults()
    }

    /// Reads and validates a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> DigitResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Parses and validates a configuration from a JSON string.
    pub fn from_json_str(raw: &str) -> DigitResult<Self> {
        let config: DigitPadConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the effective top-k value.
    pub fn topk(&self) -> usize {
        self.topk.unwrap_or(DEFAULT_TOPK)
    }

    /// Overrides the model path, keeping everything else.
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model.model_path = path.into();
        self
    }
}

impl ConfigValidator for DigitPadConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_image_dimensions(self.surface.width, self.surface.height)?;
        self.validate_positive_f32(self.stroke.width, "stroke.width")?;
        self.validate_image_dimensions(
            self.normalizer.target_size,
            self.normalizer.target_size,
        )?;
        self.validate_positive_f32(self.normalizer.scale, "normalizer.scale")?;

        if self.model.labels.len() != NUM_DIGIT_CLASSES {
            return Err(ConfigError::InvalidConfig {
                message: format!(
                    "model.labels must name exactly {} classes, got {}",
                    NUM_DIGIT_CLASSES,
                    self.model.labels.len()
                ),
            });
        }

        if let Some(topk) = self.topk {
            self.validate_positive_usize(topk, "topk")?;
        }

        Ok(())
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}
