//! Digit classifiers.
//!
//! [`Classifier`] is the seam between the session and an inference backend;
//! [`OnnxDigitClassifier`] is the ONNX Runtime implementation.

pub mod classifier;
pub mod onnx;

pub use classifier::{Classifier, ClassifierInfo, LabelDistribution, softmax};
pub use onnx::{OnnxDigitClassifier, OnnxDigitClassifierBuilder};
