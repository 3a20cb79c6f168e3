//! Structures and helpers for ONNX Runtime inference.
//!
//! This module wraps a single ONNX Runtime session behind [`OrtInfer`], which the
//! classifier adapters use to score normalized surfaces.

pub mod ort_infer;

pub use ort_infer::OrtInfer;
