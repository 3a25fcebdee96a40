//! Prediction result types.
//!
//! Represents the output of the species classifier for one flower.

use serde::{Deserialize, Serialize};

/// Probability assigned to a single class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProbability {
    /// Class name from the model's label set
    pub label: String,

    /// Estimated probability (0.0 to 1.0)
    pub probability: f64,
}

impl ClassProbability {
    /// Listing line as shown under the chart, e.g. `setosa: 0.98`.
    #[must_use]
    pub fn listing(&self) -> String {
        format!("{}: {:.2}", self.label, self.probability)
    }
}

/// Outcome of a single classification.
///
/// `classes` is index-aligned with the classifier's label set, so its
/// length always equals the number of classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Index of the predicted class
    pub class_index: usize,

    /// Name of the predicted class
    pub label: String,

    /// Probability per class, in label-set order
    pub classes: Vec<ClassProbability>,
}

impl Prediction {
    /// Build a prediction from a label set, the decision index and the
    /// probability vector.
    ///
    /// Returns `None` if the lengths disagree or the index is out of range.
    #[must_use]
    pub fn new(labels: &[String], class_index: usize, probabilities: &[f64]) -> Option<Self> {
        if labels.len() != probabilities.len() {
            return None;
        }
        let label = labels.get(class_index)?.clone();
        let classes = labels
            .iter()
            .zip(probabilities)
            .map(|(label, &probability)| ClassProbability {
                label: label.clone(),
                probability,
            })
            .collect();

        Some(Self {
            class_index,
            label,
            classes,
        })
    }

    /// The probability vector alone, in label-set order.
    #[must_use]
    pub fn probabilities(&self) -> Vec<f64> {
        self.classes.iter().map(|c| c.probability).collect()
    }

    /// Probability of the predicted class.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.classes
            .get(self.class_index)
            .map_or(0.0, |c| c.probability)
    }

    /// Predicted label with its first letter upper-cased.
    #[must_use]
    pub fn display_label(&self) -> String {
        let mut chars = self.label.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:.2})", self.label, self.confidence())
    }
}
