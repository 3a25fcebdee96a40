//! Domain layer: Core types and logic.
//!
//! Pure Rust types with no I/O. Everything here is cheap to construct
//! and dropped after a single prediction.

mod measurements;
mod model_error;
mod prediction;

pub use measurements::{Measurements, FEATURE_LABELS, SLIDER_MAX, SLIDER_MIN};
pub use model_error::ModelError;
pub use prediction::{ClassProbability, Prediction};
