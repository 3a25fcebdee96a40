//! Classifier port: Trait for pre-fitted classification models.
//!
//! This trait abstracts the model format from the application logic.

use crate::PetalscopeError;

/// Trait for a pre-fitted, immutable classifier.
///
/// Implementations are loaded once and only read afterwards, so they must
/// be safe to share between threads without locking.
pub trait Classifier: Send + Sync {
    /// Number of features the model expects per sample.
    fn n_features(&self) -> usize;

    /// Class names, index-aligned with the model's class indices.
    fn class_names(&self) -> &[String];

    /// Decision function: index of the winning class.
    ///
    /// # Errors
    /// Returns `PetalscopeError::InvalidInput` if `features.len()` does not
    /// match `n_features()`.
    fn predict(&self, features: &[f64]) -> Result<usize, PetalscopeError>;

    /// Probability estimate for every class, in `class_names()` order.
    ///
    /// # Errors
    /// Returns `PetalscopeError::InvalidInput` if `features.len()` does not
    /// match `n_features()`.
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, PetalscopeError>;
}
