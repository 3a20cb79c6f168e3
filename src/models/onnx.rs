//! ONNX Runtime digit classifier.
//!
//! Wraps an [`OrtInfer`] session that maps a `[1, 28, 28, 1]` (or NCHW) tensor
//! to ten class scores.

use super::classifier::{Classifier, ClassifierInfo, LabelDistribution, softmax};
use crate::core::config::ModelConfig;
use crate::core::inference::OrtInfer;
use crate::core::{DigitError, DigitResult, Tensor2D, digit_labels};
use crate::processors::NormalizedInput;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Digit classifier backed by an ONNX model.
#[derive(Debug)]
pub struct OnnxDigitClassifier {
    /// ONNX Runtime inference engine
    inference: OrtInfer,
    /// Class labels, one per output score
    labels: Vec<String>,
    /// Whether raw outputs are logits that still need a softmax
    apply_softmax: bool,
}

impl OnnxDigitClassifier {
    pub fn new(inference: OrtInfer, labels: Vec<String>, apply_softmax: bool) -> Self {
        Self {
            inference,
            labels,
            apply_softmax,
        }
    }

    /// Loads the model described by `config`.
    pub fn load(config: &ModelConfig) -> DigitResult<Self> {
        OnnxDigitClassifierBuilder::from_config(config).build()
    }

    pub fn model_path(&self) -> &Path {
        self.inference.model_path()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Runs the forward pass and returns the raw `batch x classes` output.
    pub fn infer(&self, input: &NormalizedInput) -> DigitResult<Tensor2D> {
        self.inference.check_input_shape(input.tensor())?;
        self.inference.infer_2d(input.tensor())
    }

    /// Turns the raw output into a checked distribution.
    ///
    /// The output must hold exactly one row of one score per label.
    pub fn postprocess(&self, output: &Tensor2D) -> DigitResult<LabelDistribution> {
        let (rows, columns) = output.dim();
        if rows != 1 {
            return Err(DigitError::InvalidOutput {
                expected: self.labels.len(),
                actual: output.len(),
            });
        }
        let scores: Vec<f32> = output.row(0).to_vec();
        let scores = if self.apply_softmax {
            softmax(&scores)
        } else {
            scores
        };
        debug!(columns, "classifier output");
        LabelDistribution::with_len(scores, self.labels.len())
    }
}

impl Classifier for OnnxDigitClassifier {
    fn classify(&self, input: &NormalizedInput) -> DigitResult<LabelDistribution> {
        let output = self.infer(input)?;
        self.postprocess(&output)
    }

    fn info(&self) -> ClassifierInfo {
        ClassifierInfo {
            model_name: self.inference.model_name().to_string(),
            input_shape: self.inference.primary_input_shape(),
            labels: self.labels.clone(),
        }
    }
}

/// Builder for [`OnnxDigitClassifier`].
#[derive(Debug, Clone)]
pub struct OnnxDigitClassifierBuilder {
    model_path: PathBuf,
    input_name: Option<String>,
    output_name: Option<String>,
    apply_softmax: bool,
    labels: Vec<String>,
}

impl Default for OnnxDigitClassifierBuilder {
    fn default() -> Self {
        Self::from_config(&ModelConfig::default())
    }
}

impl OnnxDigitClassifierBuilder {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            ..Self::default()
        }
    }

    pub fn from_config(config: &ModelConfig) -> Self {
        Self {
            model_path: config.model_path.clone(),
            input_name: config.input_name.clone(),
            output_name: config.output_name.clone(),
            apply_softmax: config.apply_softmax,
            labels: config.labels.clone(),
        }
    }

    /// Sets the input tensor name.
    pub fn input_name(mut self, name: impl Into<String>) -> Self {
        self.input_name = Some(name.into());
        self
    }

    /// Sets the output tensor name.
    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// Applies softmax to the model output.
    pub fn apply_softmax(mut self, apply: bool) -> Self {
        self.apply_softmax = apply;
        self
    }

    /// Sets the class labels.
    pub fn labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    /// Loads the model.
    ///
    /// # Errors
    ///
    /// Returns [`DigitError::ModelLoad`] if the artifact is missing or is not a
    /// valid ONNX model.
    pub fn build(self) -> DigitResult<OnnxDigitClassifier> {
        let labels = if self.labels.is_empty() {
            digit_labels()
        } else {
            self.labels
        };

        let inference = OrtInfer::new(
            &self.model_path,
            self.input_name.as_deref(),
            self.output_name.as_deref(),
        )?;

        info!(
            model = inference.model_name(),
            input = inference.input_name(),
            output = inference.output_name(),
            "digit classifier loaded"
        );

        Ok(OnnxDigitClassifier::new(
            inference,
            labels,
            self.apply_softmax,
        ))
    }
}
