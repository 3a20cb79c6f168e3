//! # OAR Digits
//!
//! A handwritten digit pad: draw on a surface with a pointer or a finger, then
//! classify the drawing with an ONNX model.
//!
//! ## Pipeline
//!
//! 1. Input events are mapped into surface coordinates and rasterized as
//!    round-capped strokes.
//! 2. On predict, the surface is resampled to 28x28, collapsed to one
//!    intensity channel and shaped `[1, 28, 28, 1]`.
//! 3. The classifier scores the ten digit classes and the highest score wins,
//!    the lowest index breaking ties.
//!
//! ## Modules
//!
//! * [`canvas`] - The drawing surface and stroke capture
//! * [`core`] - Configuration, error handling and ONNX Runtime integration
//! * [`domain`] - Input events and prediction results
//! * [`models`] - The classifier trait and its ONNX implementation
//! * [`processors`] - Surface normalization and label selection
//! * [`session`] - The session state machine and background model loading
//! * [`utils`] - Logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use oar_digits::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DigitPadConfig::default();
//! let model_config = config.model.clone();
//! let loader = ModelLoader::spawn("digits", move || OnnxDigitClassifier::load(&model_config))?;
//! let mut session = Session::with_loader(&config, loader)?;
//!
//! let rect = SurfaceRect::new(0.0, 0.0);
//! session.handle_input(&InputEvent::pointer(PointerPhase::Down, 150.0, 40.0), &rect);
//! session.handle_input(&InputEvent::pointer(PointerPhase::Move, 150.0, 200.0), &rect);
//! session.handle_input(&InputEvent::pointer(PointerPhase::Up, 150.0, 200.0), &rect);
//!
//! session.wait_for_model();
//! let prediction = session.predict()?;
//! println!("{} -> {}", prediction, session.label_text());
//! # Ok(())
//! # }
//! ```

pub mod canvas;
pub mod core;
pub mod domain;
pub mod models;
pub mod processors;
pub mod session;
pub mod utils;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use oar_digits::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::{StrokeCapture, Surface};
    pub use crate::core::config::{ConfigValidator, DigitPadConfig, ModelConfig};
    pub use crate::core::{DigitError, DigitResult};
    pub use crate::domain::{
        InputEvent, PointerPhase, Prediction, SurfacePoint, SurfaceRect, TouchPhase,
    };
    pub use crate::models::{Classifier, LabelDistribution, OnnxDigitClassifier};
    pub use crate::processors::{NormalizedInput, SurfaceNormalizer, argmax};
    pub use crate::session::{ModelLoader, ModelState, Session};
    pub use crate::utils::init_tracing;
}
