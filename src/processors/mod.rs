//! Surface processing utilities.
//!
//! This module turns the drawing surface into classifier input and classifier
//! output into labels.
//!
//! # Modules
//!
//! * `normalization` - Surface to tensor conversion
//! * `resize_surface` - Resampling to the model resolution
//! * `topk` - Argmax and top-k label ranking
//! * `types` - Type definitions used across the processors module

pub mod normalization;
pub mod resize_surface;
pub mod topk;
pub mod types;

pub use normalization::{NormalizedInput, SurfaceNormalizer};
pub use resize_surface::{SurfaceResize, nearest_source_index, resize_nearest};
pub use topk::{Topk, argmax};
pub use types::{ResampleFilter, TensorLayout};
