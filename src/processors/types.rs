//! Types used in surface processing operations
//!
//! This module defines the enums that configure how the drawing surface is
//! resampled and laid out before it reaches the classifier.
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::DigitError;

/// Specifies the order of dimensions in the normalized tensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TensorLayout {
    /// Batch, Height, Width, Channel order (common in TensorFlow)
    #[default]
    NHWC,
    /// Batch, Channel, Height, Width order (common in PyTorch)
    NCHW,
}

impl TensorLayout {
    /// Returns the 4-D shape for a single-channel square input of `size` pixels.
    pub fn shape(self, size: usize) -> [usize; 4] {
        match self {
            TensorLayout::NHWC => [1, size, size, 1],
            TensorLayout::NCHW => [1, 1, size, size],
        }
    }
}

/// Specifies the resampling used to shrink the surface to the model resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResampleFilter {
    /// Nearest neighbour with `floor(dst * in / out)` source indexing
    #[default]
    Nearest,
    /// Linear filter
    Triangle,
    /// Cubic filter
    CatmullRom,
    /// Gaussian filter
    Gaussian,
    /// Lanczos with window 3
    Lanczos3,
}

impl ResampleFilter {
    /// Returns the `image` filter backing this resampler, or `None` for the
    /// built-in nearest-neighbour sampler.
    pub fn image_filter(self) -> Option<FilterType> {
        match self {
            ResampleFilter::Nearest => None,
            ResampleFilter::Triangle => Some(FilterType::Triangle),
            ResampleFilter::CatmullRom => Some(FilterType::CatmullRom),
            ResampleFilter::Gaussian => Some(FilterType::Gaussian),
            ResampleFilter::Lanczos3 => Some(FilterType::Lanczos3),
        }
    }
}

impl FromStr for ResampleFilter {
    type Err = DigitError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "nearest" => Ok(ResampleFilter::Nearest),
            "triangle" | "linear" => Ok(ResampleFilter::Triangle),
            "catmullrom" | "cubic" => Ok(ResampleFilter::CatmullRom),
            "gaussian" => Ok(ResampleFilter::Gaussian),
            "lanczos3" => Ok(ResampleFilter::Lanczos3),
            other => Err(DigitError::invalid_input(format!(
                "unknown resample filter '{other}'"
            ))),
        }
    }
}
