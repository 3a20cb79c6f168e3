//! Label selection from classifier scores.
//!
//! [`argmax`] picks the predicted class; [`Topk`] ranks the best alternatives
//! with their label names.

use crate::core::{DigitError, DigitResult};
use crate::domain::RankedLabel;
use std::cmp::Ordering;

/// Returns the index of the largest score, or `None` for an empty slice.
///
/// Exact ties resolve to the lowest index. NaN scores never win unless every
/// score is NaN, in which case index 0 is returned.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    if scores.is_empty() {
        return None;
    }
    let mut best = 0;
    for (idx, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] || (scores[best].is_nan() && !score.is_nan()) {
            best = idx;
        }
    }
    Some(best)
}

/// Ranks one score distribution against a label set.
#[derive(Debug, Clone, Default)]
pub struct Topk {
    labels: Vec<String>,
}

impl Topk {
    /// Creates a ranker; `labels[i]` names class `i`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use oar_digits::processors::Topk;
    ///
    /// let topk = Topk::from_class_names(vec!["zero".to_string(), "one".to_string()]);
    /// let ranking = topk.rank(&[0.3, 0.7], 2).unwrap();
    /// assert_eq!(ranking[0].name, "one");
    /// ```
    pub fn from_class_names(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Returns the `k` best classes in descending score order.
    ///
    /// The sort is stable, so equal scores keep ascending index order and the
    /// first entry always agrees with [`argmax`]. NaN scores sort last. Fewer
    /// than `k` entries are returned when there are fewer classes.
    ///
    /// # Errors
    ///
    /// Returns an invalid input error if `k` is 0 or `scores` is empty.
    pub fn rank(&self, scores: &[f32], k: usize) -> DigitResult<Vec<RankedLabel>> {
        if k == 0 {
            return Err(DigitError::invalid_input("k must be greater than 0"));
        }
        if scores.is_empty() {
            return Err(DigitError::invalid_input("cannot rank an empty distribution"));
        }

        let mut indexed: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
        indexed.sort_by(|a, b| match (a.1.is_nan(), b.1.is_nan()) {
            (false, false) => b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal),
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (true, true) => Ordering::Equal,
        });

        Ok(indexed
            .into_iter()
            .take(k)
            .map(|(index, score)| RankedLabel {
                index,
                name: self.label_for(index),
                score,
            })
            .collect())
    }

    /// Returns the name for `class_id`, falling back to its number.
    pub fn label_for(&self, class_id: usize) -> String {
        self.labels
            .get(class_id)
            .cloned()
            .unwrap_or_else(|| class_id.to_string())
    }
}
