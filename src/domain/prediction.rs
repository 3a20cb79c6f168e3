//! Prediction results produced by a session.

use serde::Serialize;

/// One entry of a ranked prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedLabel {
    /// Class index into the label set.
    pub index: usize,
    /// Human-readable label for the class.
    pub name: String,
    /// Score reported by the classifier.
    pub score: f32,
}

/// The outcome of one predict request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Index of the highest-scoring class (lowest index on ties).
    pub label: usize,
    /// Label name of the predicted class.
    pub label_name: String,
    /// Score of the predicted class.
    pub score: f32,
    /// Best classes in descending score order, starting with the predicted one.
    pub ranking: Vec<RankedLabel>,
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:.3})", self.label_name, self.score)
    }
}
