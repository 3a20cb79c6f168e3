//! Domain-level structures shared across the digit pad.
//!
//! This module groups the input event model, with its coordinate mapping, and
//! the prediction results handed back to the presentation layer.

pub mod input;
pub mod prediction;

pub use input::{
    InputEvent, PointerPhase, StrokeAction, SurfacePoint, SurfaceRect, TouchContact, TouchPhase,
};
pub use prediction::{Prediction, RankedLabel};
