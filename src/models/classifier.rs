//! The classifier seam.
//!
//! A [`Classifier`] maps one normalized surface to a score per digit class.
//! The session only ever talks to this trait, so the inference backend can be
//! swapped (or stubbed in tests) without touching the rest of the pipeline.

use crate::core::{DigitError, DigitResult, NUM_DIGIT_CLASSES};
use crate::processors::{NormalizedInput, argmax};

/// A score for every class of the label set, in class-index order.
///
/// The length is checked on construction and always equals the number of
/// labels the classifier was built for.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelDistribution {
    scores: Vec<f32>,
}

impl LabelDistribution {
    /// Wraps `scores`, failing with [`DigitError::InvalidOutput`] unless there is
    /// exactly one score per digit class.
    pub fn new(scores: Vec<f32>) -> DigitResult<Self> {
        Self::with_len(scores, NUM_DIGIT_CLASSES)
    }

    /// Like [`LabelDistribution::new`] for a label set of `expected` classes.
    pub fn with_len(scores: Vec<f32>, expected: usize) -> DigitResult<Self> {
        if scores.len() != expected {
            return Err(DigitError::InvalidOutput {
                expected,
                actual: scores.len(),
            });
        }
        Ok(Self { scores })
    }

    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Index of the best class; the lowest index wins a tie.
    pub fn argmax(&self) -> usize {
        argmax(&self.scores).unwrap_or(0)
    }

    pub fn score(&self, index: usize) -> Option<f32> {
        self.scores.get(index).copied()
    }

    pub fn into_scores(self) -> Vec<f32> {
        self.scores
    }
}

/// Static facts about a loaded classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierInfo {
    pub model_name: String,
    /// Declared input shape; dynamic dimensions are negative.
    pub input_shape: Option<Vec<i64>>,
    pub labels: Vec<String>,
}

/// Scores normalized surfaces.
///
/// Implementations are loaded once and then reused for every prediction.
/// `Send` is required so a classifier can be produced on a loader thread.
pub trait Classifier: Send {
    fn classify(&self, input: &NormalizedInput) -> DigitResult<LabelDistribution>;

    fn info(&self) -> ClassifierInfo;
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn classify(&self, input: &NormalizedInput) -> DigitResult<LabelDistribution> {
        (**self).classify(input)
    }

    fn info(&self) -> ClassifierInfo {
        (**self).info()
    }
}

/// Numerically stable softmax.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(f32::NEG_INFINITY, f32::max);
    if !max.is_finite() {
        return logits.to_vec();
    }
    let exps: Vec<f32> = logits.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|v| v / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_length_is_checked() {
        assert!(LabelDistribution::new(vec![0.1; 10]).is_ok());
        let err = LabelDistribution::new(vec![0.1; 9]).unwrap_err();
        assert!(matches!(
            err,
            DigitError::InvalidOutput {
                expected: 10,
                actual: 9
            }
        ));
    }

    #[test]
    fn test_distribution_argmax_tie_break() {
        let mut scores = vec![0.0; 10];
        scores[0] = 0.2;
        scores[1] = 0.5;
        scores[2] = 0.5;
        scores[3] = 0.1;
        let distribution = LabelDistribution::new(scores).unwrap();
        assert_eq!(distribution.argmax(), 1);
        assert_eq!(distribution.score(1), Some(0.5));
        assert_eq!(distribution.score(10), None);
    }

    #[test]
    fn test_softmax_sums_to_one_and_keeps_order() {
        let probs = softmax(&[1.0, 3.0, 2.0]);
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(probs[1] > probs[2] && probs[2] > probs[0]);
    }

    #[test]
    fn test_softmax_handles_large_logits() {
        let probs = softmax(&[1000.0, 1000.0]);
        assert!((probs[0] - 0.5).abs() < 1e-6);
        assert!((probs[1] - 0.5).abs() < 1e-6);
    }
}
