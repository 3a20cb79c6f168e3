//! Core ONNX Runtime inference engine.

use crate::core::{Tensor2D, Tensor4D, errors::DigitError};
use ort::{session::Session, value::ValueType};
use std::sync::Mutex;

#[path = "ort_infer_builders.rs"]
mod ort_infer_builders;
#[path = "ort_infer_execution.rs"]
mod ort_infer_execution;
#[cfg(test)]
#[path = "ort_infer_tests.rs"]
mod ort_infer_tests;

/// A loaded ONNX model together with the tensor names used to drive it.
///
/// `Session::run` needs exclusive access, so the session sits behind a mutex and
/// `OrtInfer` can be shared by reference.
pub struct OrtInfer {
    pub(super) session: Mutex<Session>,
    pub(super) input_name: String,
    pub(super) output_name: String,
    pub(super) model_path: std::path::PathBuf,
    pub(super) model_name: String,
}

impl std::fmt::Debug for OrtInfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtInfer")
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .field("model_path", &self.model_path)
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl OrtInfer {
    /// Attempts to retrieve the primary input tensor shape.
    ///
    /// Returns a vector of dimensions if available. Dynamic dimensions (e.g., -1) are returned as-is.
    pub fn primary_input_shape(&self) -> Option<Vec<i64>> {
        let session_guard = self.session.lock().ok()?;
        let input = session_guard
            .inputs
            .iter()
            .find(|input| input.name == self.input_name)?;
        match &input.input_type {
            ValueType::Tensor { shape, .. } => Some(shape.iter().copied().collect()),
            _ => None,
        }
    }

    /// Returns the model path associated with this inference engine.
    pub fn model_path(&self) -> &std::path::Path {
        &self.model_path
    }

    /// Returns the model name associated with this inference engine.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Returns the name of the tensor fed with the normalized surface.
    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    /// Returns the name of the tensor holding the class scores.
    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    /// Checks that `x` can be fed to a model declaring `expected` as its input shape.
    ///
    /// Dynamic dimensions (negative values) match anything.
    pub fn check_input_shape(&self, x: &Tensor4D) -> Result<(), DigitError> {
        let Some(expected) = self.primary_input_shape() else {
            return Ok(());
        };
        let actual = x.shape();
        let matches = expected.len() == actual.len()
            && expected
                .iter()
                .zip(actual)
                .all(|(&want, &got)| want < 0 || want as usize == got);
        if matches {
            Ok(())
        } else {
            Err(DigitError::invalid_input(format!(
                "model '{}' expects input shape {:?}, got {:?}",
                self.model_name, expected, actual
            )))
        }
    }

    pub(crate) fn output_to_2d(
        &self,
        output_shape: &[i64],
        output_data: &[f32],
        batch_size: usize,
    ) -> Result<Tensor2D, DigitError> {
        let num_classes = output_data.len() / batch_size.max(1);
        if output_shape.iter().product::<i64>() as usize != output_data.len()
            || num_classes * batch_size != output_data.len()
        {
            return Err(DigitError::invalid_input(format!(
                "Model '{}' produced output shape {:?} with {} values for batch size {}",
                self.model_name,
                output_shape,
                output_data.len(),
                batch_size
            )));
        }
        let array = ndarray::ArrayView2::from_shape((batch_size, num_classes), output_data)
            .map_err(DigitError::Tensor)?;
        Ok(array.to_owned())
    }
}
