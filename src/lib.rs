//! # Petalscope
//!
//! Iris species classification from four flower measurements.
//!
//! This crate provides:
//! - A read-only inference service over a pre-trained classifier
//! - A JSON multinomial logistic regression adapter with integrity checks
//! - Terminal UI with measurement sliders and a probability chart
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (Measurements, Prediction, model errors)
//! - `ports`: Trait definitions for the classifier seam
//! - `adapters`: Concrete model implementations
//! - `application`: The inference use case
//! - `config`: Environment-driven settings
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Measurements, ModelError, Prediction};

/// Result type for Petalscope operations
pub type Result<T> = std::result::Result<T, PetalscopeError>;

/// Main error type for Petalscope
#[derive(Debug, thiserror::Error)]
pub enum PetalscopeError {
    /// The classifier artifact could not be loaded. Fatal at startup.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(#[from] ModelError),

    /// The feature vector does not fit the loaded classifier.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
