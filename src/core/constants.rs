//! Constants used throughout the digit pad.
//!
//! This module defines the default values for the drawing surface, the stroke
//! style, the normalized model input and the classifier's label set.

/// The default width of the drawing surface in logical units.
pub const DEFAULT_SURFACE_WIDTH: u32 = 300;

/// The default height of the drawing surface in logical units.
pub const DEFAULT_SURFACE_HEIGHT: u32 = 240;

/// The background fill of a cleared surface (RGB).
pub const DEFAULT_BACKGROUND: [u8; 3] = [50, 50, 50];

/// The default stroke width.
pub const DEFAULT_STROKE_WIDTH: f32 = 16.0;

/// The default stroke colour (RGB).
pub const DEFAULT_STROKE_COLOR: [u8; 3] = [255, 255, 255];

/// The side length of the square model input.
pub const DEFAULT_TARGET_SIZE: u32 = 28;

/// The default location of the classifier artifact.
pub const DEFAULT_MODEL_PATH: &str = "models/digit_classifier.onnx";

/// The default value for top-k ranking in predictions.
pub const DEFAULT_TOPK: usize = 3;

/// The number of classes the classifier scores.
pub const NUM_DIGIT_CLASSES: usize = 10;

/// Text shown in place of a label when no prediction is available.
pub const UNSET_LABEL_TEXT: &str = "N/A";

/// Returns the digit label set, `"0"` through `"9"`.
pub fn digit_labels() -> Vec<String> {
    (0..NUM_DIGIT_CLASSES).map(|d| d.to_string()).collect()
}
