//! Application layer: Use cases and services.
//!
//! Orchestrates domain logic with ports to implement the single use case
//! of the application: classifying a flower.

mod inference;

pub use inference::InferenceService;
