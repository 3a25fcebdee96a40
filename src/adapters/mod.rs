//! Adapters layer: Concrete implementations of ports.
//!
//! - `logistic`: multinomial logistic regression loaded from JSON

pub mod logistic;
