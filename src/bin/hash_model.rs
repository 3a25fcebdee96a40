//! Integrity manifest utility for Petalscope models.
//!
//! Validates `iris_model.json` in a model directory and writes
//! `manifest.json` binding it to its SHA-256 digest.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin hash_model -- <model_dir>
//! ```

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use petalscope::adapters::logistic::{
    sha256_hex, ExportedLogisticModel, LogisticRegressionAdapter, ModelManifest, MANIFEST_FILE,
    MODEL_FILE,
};

fn usage() -> String {
    "Usage: hash_model <model_dir | path/to/iris_model.json>".to_string()
}

fn parse_args() -> Result<PathBuf> {
    let mut args = env::args().skip(1);
    let path = match args.next().as_deref() {
        None | Some("-h") | Some("--help") => bail!(usage()),
        Some(p) => PathBuf::from(p),
    };
    if args.next().is_some() {
        bail!(usage());
    }
    Ok(path)
}

/// Validate the model at `path` and write `manifest.json` beside it.
///
/// `path` may be the model directory or the model file itself. Returns the
/// manifest path.
fn write_manifest(path: &Path) -> Result<PathBuf> {
    let (model_dir, model_path) = if path.is_file() {
        let dir = path
            .parent()
            .context("Model path has no parent directory")?
            .to_path_buf();
        (dir, path.to_path_buf())
    } else {
        (path.to_path_buf(), path.join(MODEL_FILE))
    };

    let bytes =
        fs::read(&model_path).with_context(|| format!("Failed to read {model_path:?}"))?;

    // Refuse to bless a model the application would reject.
    let model: ExportedLogisticModel = serde_json::from_slice(&bytes)
        .with_context(|| format!("{model_path:?} is not a valid model"))?;
    LogisticRegressionAdapter::from_exported(model, model_path.clone())?;

    let rel = model_path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Model path has no file name")?
        .to_string();

    let mut files = BTreeMap::new();
    files.insert(rel, sha256_hex(&bytes));

    let manifest = ModelManifest {
        version: 1,
        created_at: Some(chrono::Utc::now().timestamp()),
        files,
    };
    let manifest_bytes =
        serde_json::to_vec_pretty(&manifest).context("Failed to serialize manifest")?;

    let manifest_path = model_dir.join(MANIFEST_FILE);
    fs::write(&manifest_path, &manifest_bytes)
        .with_context(|| format!("Failed to write {manifest_path:?}"))?;

    Ok(manifest_path)
}

fn main() -> Result<()> {
    let path = parse_args()?;
    let manifest_path = write_manifest(&path)?;
    println!("Wrote manifest: {manifest_path:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn copy_bundled_model(dir: &Path) -> PathBuf {
        let target = dir.join(MODEL_FILE);
        fs::copy(Path::new("models").join(MODEL_FILE), &target).expect("copy model");
        target
    }

    #[test]
    fn test_manifest_for_directory_verifies_on_load() {
        let temp = tempdir().expect("tempdir");
        copy_bundled_model(temp.path());

        let manifest_path = write_manifest(temp.path()).expect("write manifest");
        assert_eq!(manifest_path, temp.path().join(MANIFEST_FILE));

        let manifest: ModelManifest =
            serde_json::from_slice(&fs::read(&manifest_path).expect("read")).expect("parse");
        assert_eq!(manifest.version, 1);
        assert!(manifest.created_at.is_some());
        assert_eq!(manifest.files.len(), 1);

        LogisticRegressionAdapter::load(temp.path(), true).expect("manifest should verify");
    }

    #[test]
    fn test_manifest_for_model_file_path() {
        let temp = tempdir().expect("tempdir");
        let model_path = copy_bundled_model(temp.path());

        let manifest_path = write_manifest(&model_path).expect("write manifest");
        assert_eq!(manifest_path, temp.path().join(MANIFEST_FILE));

        let bytes = fs::read(&model_path).expect("read model");
        let manifest: ModelManifest =
            serde_json::from_slice(&fs::read(&manifest_path).expect("read")).expect("parse");
        assert_eq!(manifest.files.get(MODEL_FILE), Some(&sha256_hex(&bytes)));
    }

    #[test]
    fn test_invalid_model_gets_no_manifest() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join(MODEL_FILE), b"{\"format_version\": 1}").expect("write");

        assert!(write_manifest(temp.path()).is_err());
        assert!(!temp.path().join(MANIFEST_FILE).exists());
    }

    #[test]
    fn test_missing_model_is_an_error() {
        let temp = tempdir().expect("tempdir");
        let err = write_manifest(temp.path()).expect_err("must fail");
        assert!(err.to_string().contains("Failed to read"));
    }
}
