//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the application and the model implementation.

mod classifier;

pub use classifier::Classifier;
