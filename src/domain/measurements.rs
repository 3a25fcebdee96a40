//! Flower measurements submitted for classification.
//!
//! Order matches the bundled model: sepal length, sepal width,
//! petal length, petal width. All values are in centimetres.

use serde::{Deserialize, Serialize};

/// Lower bound of the slider range.
pub const SLIDER_MIN: f64 = 0.0;

/// Upper bound of the slider range.
pub const SLIDER_MAX: f64 = 10.0;

/// Human-readable feature labels, in model order.
pub const FEATURE_LABELS: [&str; 4] = [
    "Sepal Length (cm)",
    "Sepal Width (cm)",
    "Petal Length (cm)",
    "Petal Width (cm)",
];

/// The four measurements of a single flower.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

impl Default for Measurements {
    /// The canonical starting point shown on the sliders (a typical setosa).
    fn default() -> Self {
        Self {
            sepal_length: 5.1,
            sepal_width: 3.5,
            petal_length: 1.4,
            petal_width: 0.2,
        }
    }
}

impl Measurements {
    /// Number of features in a measurement vector.
    pub const LEN: usize = 4;

    /// Convert to a feature vector for inference.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.to_array().to_vec()
    }

    /// Fixed-size view in model order.
    #[must_use]
    pub fn to_array(&self) -> [f64; 4] {
        [
            self.sepal_length,
            self.sepal_width,
            self.petal_length,
            self.petal_width,
        ]
    }

    /// Create measurements from a vector.
    ///
    /// # Errors
    /// Returns error if vector length is not 4.
    pub fn from_vec(v: &[f64]) -> Result<Self, String> {
        match v {
            [sepal_length, sepal_width, petal_length, petal_width] => Ok(Self {
                sepal_length: *sepal_length,
                sepal_width: *sepal_width,
                petal_length: *petal_length,
                petal_width: *petal_width,
            }),
            _ => Err(format!("Expected {} features, got {}", Self::LEN, v.len())),
        }
    }
}
