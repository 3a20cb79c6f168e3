//! Surface normalization for digit classification.
//!
//! This module converts the drawing surface into the fixed-shape tensor the
//! classifier consumes: resample to the model resolution, collapse RGB to a
//! single intensity channel, scale, and lay out as a batch of one.

use crate::canvas::Surface;
use crate::core::config::NormalizerConfig;
use crate::core::{DigitError, Tensor4D};
use crate::processors::resize_surface::SurfaceResize;
use crate::processors::types::TensorLayout;
use image::{GrayImage, Luma};
use tracing::debug;

/// The classifier-ready representation of a surface.
///
/// Always holds exactly one single-channel `size x size` image in the layout
/// it was built with.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInput {
    tensor: Tensor4D,
    layout: TensorLayout,
    size: usize,
}

impl NormalizedInput {
    /// Wraps a tensor, checking it has the shape implied by `layout` and `size`.
    pub fn new(tensor: Tensor4D, layout: TensorLayout, size: usize) -> Result<Self, DigitError> {
        let expected = layout.shape(size);
        if tensor.shape() != expected {
            return Err(DigitError::invalid_input(format!(
                "normalized input must have shape {:?}, got {:?}",
                expected,
                tensor.shape()
            )));
        }
        Ok(Self {
            tensor,
            layout,
            size,
        })
    }

    pub fn tensor(&self) -> &Tensor4D {
        &self.tensor
    }

    pub fn into_tensor(self) -> Tensor4D {
        self.tensor
    }

    pub fn layout(&self) -> TensorLayout {
        self.layout
    }

    /// Side length of the square input.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn shape(&self) -> &[usize] {
        self.tensor.shape()
    }

    /// Value at column `x`, row `y`.
    pub fn intensity(&self, x: usize, y: usize) -> f32 {
        match self.layout {
            TensorLayout::NHWC => self.tensor[[0, y, x, 0]],
            TensorLayout::NCHW => self.tensor[[0, 0, y, x]],
        }
    }

    /// Renders the input as a grayscale image, undoing `scale`.
    ///
    /// Useful for checking what the classifier actually sees.
    pub fn to_gray_image(&self, scale: f32) -> GrayImage {
        let size = self.size as u32;
        GrayImage::from_fn(size, size, |x, y| {
            let value = self.intensity(x as usize, y as usize) / scale;
            Luma([value.round().clamp(0.0, 255.0) as u8])
        })
    }
}

/// Converts surfaces into [`NormalizedInput`]s.
///
/// The conversion is a pure function of the pixel buffer and this configuration.
#[derive(Debug, Clone)]
pub struct SurfaceNormalizer {
    resize: SurfaceResize,
    layout: TensorLayout,
    scale: f32,
}

impl SurfaceNormalizer {
    /// Creates a new normalizer.
    ///
    /// # Errors
    ///
    /// Returns an error if the target size is zero or the scale is not a
    /// positive finite number.
    pub fn new(config: &NormalizerConfig) -> Result<Self, DigitError> {
        if config.target_size == 0 {
            return Err(DigitError::invalid_input("target size must be greater than 0"));
        }
        if !config.scale.is_finite() || config.scale <= 0.0 {
            return Err(DigitError::invalid_input(format!(
                "scale must be a positive finite number, got {}",
                config.scale
            )));
        }
        Ok(Self {
            resize: SurfaceResize::new(config.target_size, config.resample),
            layout: config.layout,
            scale: config.scale,
        })
    }

    pub fn target_size(&self) -> u32 {
        self.resize.target_size
    }

    pub fn layout(&self) -> TensorLayout {
        self.layout
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Shape of every tensor this normalizer produces.
    pub fn output_shape(&self) -> [usize; 4] {
        self.layout.shape(self.resize.target_size as usize)
    }

    /// Reads the whole surface and produces the classifier input.
    ///
    /// Alpha is ignored; each pixel becomes the mean of its R, G and B channels
    /// multiplied by the configured scale.
    pub fn normalize(&self, surface: &Surface) -> Result<NormalizedInput, DigitError> {
        let resized = self.resize.apply(surface.pixels())?;
        let size = self.resize.target_size as usize;

        // For a single channel both layouts share the same row-major order.
        let values: Vec<f32> = resized
            .pixels()
            .map(|pixel| {
                let sum = pixel[0] as f32 + pixel[1] as f32 + pixel[2] as f32;
                sum / 3.0 * self.scale
            })
            .collect();

        let shape = self.output_shape();
        let tensor = ndarray::Array4::from_shape_vec(shape, values).map_err(|e| {
            DigitError::normalization(
                &format!(
                    "failed to shape {}x{} surface into {:?}",
                    surface.width(),
                    surface.height(),
                    shape
                ),
                e,
            )
        })?;

        debug!(
            surface_width = surface.width(),
            surface_height = surface.height(),
            shape = ?shape,
            "normalized surface"
        );
        NormalizedInput::new(tensor, self.layout, size)
    }
}

impl Default for SurfaceNormalizer {
    fn default() -> Self {
        Self {
            resize: SurfaceResize::new(
                crate::core::DEFAULT_TARGET_SIZE,
                crate::processors::types::ResampleFilter::Nearest,
            ),
            layout: TensorLayout::NHWC,
            scale: 1.0,
        }
    }
}
