//! Logistic regression adapter: Implementation of `Classifier` for a
//! multinomial logistic regression exported as JSON.
//!
//! # Model files
//!
//! A model directory contains:
//! - `iris_model.json`: coefficients, intercepts, feature and class names
//! - `manifest.json` (optional): SHA-256 digests binding the model files
//!
//! When the manifest is present every file it lists must hash to the
//! recorded digest. When it is absent the model still loads, unless the
//! caller asks for a mandatory manifest.
//!
//! # Inference
//!
//! `z_k = intercept_k + sum_j(coef_kj * x_j)`. The decision function is the
//! argmax of `z` (lowest index wins ties) and probabilities are `softmax(z)`.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::ModelError;
use crate::ports::Classifier;
use crate::PetalscopeError;

/// File name of the model inside a model directory.
pub const MODEL_FILE: &str = "iris_model.json";

/// File name of the integrity manifest inside a model directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Only supported `format_version`.
const FORMAT_VERSION: u32 = 1;

/// Only supported `model_type`.
const MODEL_TYPE: &str = "multinomial_logistic_regression";

/// Allowed clock skew for manifest `created_at` (seconds).
const MAX_CLOCK_SKEW_SECS: i64 = 300;

/// Model parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedLogisticModel {
    pub format_version: u32,
    pub model_type: String,
    pub feature_names: Vec<String>,
    pub class_names: Vec<String>,
    /// One row per class, one column per feature
    pub coefficients: Vec<Vec<f64>>,
    /// One entry per class
    pub intercepts: Vec<f64>,
}

/// Integrity manifest binding model files to their SHA-256 digests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelManifest {
    pub version: u32,
    #[serde(default)]
    pub created_at: Option<i64>,
    pub files: BTreeMap<String, String>,
}

/// Hex-encoded SHA-256 of a byte slice.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

// Constant-time compare for ASCII strings (used for SHA-256 hex digests).
fn constant_time_eq_str(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.as_bytes().iter().zip(b.as_bytes().iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Multinomial logistic regression classifier.
///
/// Immutable after `load`; safe to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct LogisticRegressionAdapter {
    model: ExportedLogisticModel,
    source: PathBuf,
}

impl LogisticRegressionAdapter {
    /// Load a model from a directory (or a model JSON file directly).
    ///
    /// The file is read in one shot; no handle outlives this call.
    ///
    /// # Errors
    /// - `ModelError::Missing` if the path or model file does not exist
    /// - `ModelError::Integrity` if the manifest check fails, or no manifest
    ///   is present while `require_manifest` is set
    /// - `ModelError::Malformed` if the JSON is unreadable or inconsistent
    pub fn load(path: &Path, require_manifest: bool) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::Missing(format!("{}", path.display())));
        }

        let (base_dir, model_path) = if path.is_dir() {
            (path.to_path_buf(), path.join(MODEL_FILE))
        } else {
            let parent = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (parent, path.to_path_buf())
        };

        if !model_path.is_file() {
            return Err(ModelError::Missing(format!(
                "{} (expected {MODEL_FILE})",
                model_path.display()
            )));
        }

        let model_file_name = model_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ModelError::Malformed("Model path has no file name".into()))?;

        Self::verify_manifest(&base_dir, model_file_name, require_manifest)?;

        let bytes = fs::read(&model_path)
            .map_err(|e| ModelError::Missing(format!("{}: {e}", model_path.display())))?;
        let model: ExportedLogisticModel = serde_json::from_slice(&bytes)
            .map_err(|e| ModelError::Malformed(e.to_string()))?;

        Self::from_exported(model, model_path)
    }

    /// Build an adapter from already-parsed parameters.
    ///
    /// # Errors
    /// Returns `ModelError::Malformed` if the parameters are inconsistent.
    pub fn from_exported(
        model: ExportedLogisticModel,
        source: PathBuf,
    ) -> Result<Self, ModelError> {
        Self::validate(&model)?;

        tracing::info!(
            "Loaded model from {:?} (type={}, n_features={}, n_classes={})",
            source,
            model.model_type,
            model.feature_names.len(),
            model.class_names.len()
        );

        Ok(Self { model, source })
    }

    /// Where the parameters were loaded from.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Feature names in model order.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.model.feature_names
    }

    fn validate(model: &ExportedLogisticModel) -> Result<(), ModelError> {
        if model.format_version != FORMAT_VERSION {
            return Err(ModelError::Malformed(format!(
                "Unsupported format_version: {}",
                model.format_version
            )));
        }
        if model.model_type != MODEL_TYPE {
            return Err(ModelError::Malformed(format!(
                "Unsupported model_type: {}",
                model.model_type
            )));
        }

        let n_features = model.feature_names.len();
        let n_classes = model.class_names.len();
        if n_features == 0 {
            return Err(ModelError::Malformed("Model has no features".into()));
        }
        if n_classes < 2 {
            return Err(ModelError::Malformed(format!(
                "Model needs at least 2 classes, got {n_classes}"
            )));
        }

        let mut seen = HashSet::new();
        for name in &model.class_names {
            if name.trim().is_empty() {
                return Err(ModelError::Malformed("Empty class name".into()));
            }
            if !seen.insert(name.as_str()) {
                return Err(ModelError::Malformed(format!("Duplicate class name: {name}")));
            }
        }

        if model.coefficients.len() != n_classes || model.intercepts.len() != n_classes {
            return Err(ModelError::Malformed(
                "Coefficient rows and intercepts must match class_names length".into(),
            ));
        }
        if model.coefficients.iter().any(|row| row.len() != n_features) {
            return Err(ModelError::Malformed(
                "Coefficient row length does not match feature_names length".into(),
            ));
        }

        let all_finite = model
            .coefficients
            .iter()
            .flatten()
            .chain(model.intercepts.iter())
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(ModelError::Malformed("Non-finite model parameter".into()));
        }

        Ok(())
    }

    /// Check `manifest.json` against the files it binds.
    fn verify_manifest(
        base_dir: &Path,
        model_file_name: &str,
        require_manifest: bool,
    ) -> Result<(), ModelError> {
        let manifest_path = base_dir.join(MANIFEST_FILE);

        if !manifest_path.exists() {
            if require_manifest {
                tracing::error!("Model manifest not found at {:?}", manifest_path);
                return Err(ModelError::Integrity(format!(
                    "{MANIFEST_FILE} required but not found in {}",
                    base_dir.display()
                )));
            }
            tracing::warn!(
                "No {MANIFEST_FILE} next to the model; loading without integrity check"
            );
            return Ok(());
        }

        let content = fs::read(&manifest_path)
            .map_err(|e| ModelError::Integrity(format!("Failed to read manifest: {e}")))?;
        let manifest: ModelManifest = serde_json::from_slice(&content)
            .map_err(|e| ModelError::Integrity(format!("Invalid {MANIFEST_FILE} format: {e}")))?;

        if manifest.version != 1 {
            return Err(ModelError::Integrity(format!(
                "Unsupported manifest version: {}",
                manifest.version
            )));
        }

        if let Some(created_at) = manifest.created_at {
            let now = chrono::Utc::now().timestamp();
            if created_at > now + MAX_CLOCK_SKEW_SECS {
                return Err(ModelError::Integrity(
                    "manifest created_at is in the future".into(),
                ));
            }
        }

        if !manifest.files.contains_key(model_file_name) {
            return Err(ModelError::Integrity(format!(
                "{MANIFEST_FILE} does not bind {model_file_name}"
            )));
        }

        for (rel, expected_hex) in &manifest.files {
            let path = base_dir.join(rel);
            let bytes = fs::read(&path).map_err(|e| {
                ModelError::Integrity(format!(
                    "Manifest references missing/unreadable file {:?}: {e}",
                    path
                ))
            })?;

            if !constant_time_eq_str(&sha256_hex(&bytes), &expected_hex.to_ascii_lowercase()) {
                return Err(ModelError::Integrity(format!("File hash mismatch for {rel}")));
            }
        }

        tracing::info!("Model hashes verified against {:?}", manifest_path);
        Ok(())
    }

    fn check_len(&self, features: &[f64]) -> Result<(), PetalscopeError> {
        let expected = self.n_features();
        if features.len() != expected {
            return Err(PetalscopeError::InvalidInput(format!(
                "Feature count mismatch: got {}, expected {expected}",
                features.len()
            )));
        }
        Ok(())
    }

    /// Raw per-class scores (the decision function).
    ///
    /// Finite inputs can still overflow a score; those are rejected, since
    /// softmax over infinite scores has no meaning.
    fn decision_function(&self, features: &[f64]) -> Result<Vec<f64>, PetalscopeError> {
        self.check_len(features)?;

        let scores: Vec<f64> = self
            .model
            .coefficients
            .iter()
            .zip(&self.model.intercepts)
            .map(|(row, intercept)| {
                intercept + row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>()
            })
            .collect();

        if let Some(class) = scores.iter().position(|s| !s.is_finite()) {
            return Err(PetalscopeError::InvalidInput(format!(
                "Measurements are too large to score (class {class} overflowed)"
            )));
        }
        Ok(scores)
    }
}

/// Numerically stable softmax.
fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Index of the largest score; the first one wins on ties.
fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, s) in scores.iter().enumerate().skip(1) {
        if *s > scores[best] {
            best = i;
        }
    }
    best
}

impl Classifier for LogisticRegressionAdapter {
    fn n_features(&self) -> usize {
        self.model.feature_names.len()
    }

    fn class_names(&self) -> &[String] {
        &self.model.class_names
    }

    fn predict(&self, features: &[f64]) -> Result<usize, PetalscopeError> {
        Ok(argmax(&self.decision_function(features)?))
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, PetalscopeError> {
        Ok(softmax(&self.decision_function(features)?))
    }
}
