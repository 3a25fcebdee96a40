//! Errors raised while loading a classifier artifact.

/// Error type for model loading.
///
/// Every variant is fatal at startup: the application cannot serve
/// predictions without a classifier.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model artifact not found: {0}")]
    Missing(String),

    #[error("Model artifact is malformed: {0}")]
    Malformed(String),

    #[error("Model integrity check failed: {0}")]
    Integrity(String),
}
