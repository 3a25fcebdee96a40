//! Inference service: Runs the species classifier on one flower.
//!
//! The classifier is loaded once by the caller and handed in; this service
//! only reads it. There is no mutable state, so a single instance can be
//! shared by reference for the whole process lifetime.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::logistic::LogisticRegressionAdapter;
use crate::domain::{Measurements, Prediction};
use crate::ports::Classifier;
use crate::PetalscopeError;

/// Service for running species classification.
pub struct InferenceService<C>
where
    C: Classifier,
{
    classifier: Arc<C>,
}

impl<C> Clone for InferenceService<C>
where
    C: Classifier,
{
    fn clone(&self) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
        }
    }
}

impl InferenceService<LogisticRegressionAdapter> {
    /// Load the bundled model format from `model_path` and wrap it.
    ///
    /// # Errors
    /// Returns `PetalscopeError::ModelUnavailable` if the artifact is missing,
    /// corrupt or fails its integrity check.
    pub fn init(model_path: &Path, require_manifest: bool) -> Result<Self, PetalscopeError> {
        tracing::info!("Initializing inference service from {:?}...", model_path);
        let classifier = LogisticRegressionAdapter::load(model_path, require_manifest)?;
        Ok(Self::new(Arc::new(classifier)))
    }
}

impl<C> InferenceService<C>
where
    C: Classifier,
{
    /// Create a new inference service around a loaded classifier.
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    /// Class names the classifier can produce.
    #[must_use]
    pub fn class_names(&self) -> &[String] {
        self.classifier.class_names()
    }

    /// Number of features the classifier expects.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.classifier.n_features()
    }

    /// Classify a raw feature vector.
    ///
    /// Values are passed to the classifier unchanged; range limits are the
    /// caller's concern.
    ///
    /// # Errors
    /// Returns `PetalscopeError::InvalidInput` if the vector length does not
    /// match the classifier, a value is not finite, a class score overflows,
    /// or the classifier's output does not line up with its class names.
    pub fn predict(&self, features: &[f64]) -> Result<Prediction, PetalscopeError> {
        let expected = self.n_features();
        if features.len() != expected {
            return Err(PetalscopeError::InvalidInput(format!(
                "Expected {expected} features, got {}",
                features.len()
            )));
        }
        if let Some(pos) = features.iter().position(|v| !v.is_finite()) {
            return Err(PetalscopeError::InvalidInput(format!(
                "Feature {pos} is not a finite number"
            )));
        }

        tracing::debug!("Classifying features {:?}", features);

        let class_index = self.classifier.predict(features)?;
        let probabilities = self.classifier.predict_proba(features)?;

        let prediction = Prediction::new(self.class_names(), class_index, &probabilities)
            .ok_or_else(|| {
                let message = format!(
                    "Internal classifier inconsistency: {} probabilities and class index {class_index} for {} classes",
                    probabilities.len(),
                    self.class_names().len()
                );
                tracing::error!("{}", message);
                PetalscopeError::InvalidInput(message)
            })?;

        tracing::info!(
            "Prediction complete: label={}, probability={:.2}",
            prediction.label,
            prediction.confidence()
        );

        Ok(prediction)
    }

    /// Classify named measurements.
    ///
    /// # Errors
    /// See [`InferenceService::predict`].
    pub fn predict_measurements(
        &self,
        measurements: &Measurements,
    ) -> Result<Prediction, PetalscopeError> {
        self.predict(&measurements.to_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModelError;

    const SAMPLES: [[f64; 4]; 8] = [
        [5.1, 3.5, 1.4, 0.2],
        [7.0, 3.2, 4.7, 1.4],
        [6.3, 3.3, 6.0, 2.5],
        [0.0, 0.0, 0.0, 0.0],
        [10.0, 10.0, 10.0, 10.0],
        [5.8, 2.7, 5.1, 1.9],
        [6.0, 2.2, 4.0, 1.0],
        [-3.0, 42.0, 0.5, 11.0],
    ];

    fn create_test_service() -> InferenceService<LogisticRegressionAdapter> {
        InferenceService::init(Path::new("models"), true).expect("Bundled model should load")
    }

    fn assert_top(features: [f64; 4], expected: &str) {
        let prediction = create_test_service()
            .predict(&features)
            .expect("Should predict");
        assert_eq!(prediction.label, expected);

        let top = prediction
            .classes
            .iter()
            .max_by(|a, b| a.probability.total_cmp(&b.probability))
            .expect("non-empty");
        assert_eq!(top.label, expected);
    }

    #[test]
    fn test_reference_setosa() {
        assert_top([5.1, 3.5, 1.4, 0.2], "setosa");
    }

    #[test]
    fn test_reference_versicolor() {
        assert_top([7.0, 3.2, 4.7, 1.4], "versicolor");
    }

    #[test]
    fn test_reference_virginica() {
        assert_top([6.3, 3.3, 6.0, 2.5], "virginica");
    }

    #[test]
    fn test_label_is_member_of_label_set() {
        let service = create_test_service();
        for sample in SAMPLES {
            let prediction = service.predict(&sample).expect("Should predict");
            assert!(service.class_names().contains(&prediction.label));
            assert_eq!(service.class_names()[prediction.class_index], prediction.label);
        }
    }

    #[test]
    fn test_probabilities_form_distribution() {
        let service = create_test_service();
        for sample in SAMPLES {
            let p = service.predict(&sample).expect("Should predict").probabilities();
            assert_eq!(p.len(), service.class_names().len());
            assert!(p.iter().all(|v| *v >= 0.0));
            assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_predict_is_deterministic() {
        let service = create_test_service();
        for sample in SAMPLES {
            let a = service.predict(&sample).expect("first");
            let b = service.predict(&sample).expect("second");
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_wrong_length_is_invalid_input() {
        let service = create_test_service();
        for bad in [&[][..], &[5.1, 3.5, 1.4][..], &[5.1, 3.5, 1.4, 0.2, 9.9][..]] {
            assert!(matches!(
                service.predict(bad),
                Err(PetalscopeError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_non_finite_is_invalid_input() {
        let service = create_test_service();
        let err = service
            .predict(&[5.1, f64::NAN, 1.4, 0.2])
            .expect_err("must fail");
        assert!(matches!(err, PetalscopeError::InvalidInput(_)));
        assert!(service.predict(&[f64::INFINITY, 3.5, 1.4, 0.2]).is_err());
    }

    #[test]
    fn test_huge_finite_input_is_invalid_input() {
        let service = create_test_service();
        for sample in [[1e308; 4], [f64::MAX; 4], [-1e308, 3.5, 1e308, 0.2]] {
            match service.predict(&sample) {
                Err(PetalscopeError::InvalidInput(msg)) => assert!(msg.contains("too large")),
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }

    /// Classifier whose outputs disagree with its own class names.
    struct MisalignedClassifier {
        names: Vec<String>,
        class_index: usize,
        probabilities: Vec<f64>,
    }

    impl Classifier for MisalignedClassifier {
        fn n_features(&self) -> usize {
            4
        }
        fn class_names(&self) -> &[String] {
            &self.names
        }
        fn predict(&self, _: &[f64]) -> Result<usize, PetalscopeError> {
            Ok(self.class_index)
        }
        fn predict_proba(&self, _: &[f64]) -> Result<Vec<f64>, PetalscopeError> {
            Ok(self.probabilities.clone())
        }
    }

    #[test]
    fn test_misaligned_classifier_is_reported_as_internal() {
        let names = vec!["a".to_string(), "b".to_string()];
        for (class_index, probabilities) in [(0, vec![1.0]), (2, vec![0.5, 0.5])] {
            let service = InferenceService::new(Arc::new(MisalignedClassifier {
                names: names.clone(),
                class_index,
                probabilities,
            }));
            match service.predict(&[5.1, 3.5, 1.4, 0.2]) {
                Err(PetalscopeError::InvalidInput(msg)) => {
                    assert!(msg.contains("Internal classifier inconsistency"))
                }
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }

    #[test]
    fn test_n_features_comes_from_classifier() {
        assert_eq!(create_test_service().n_features(), Measurements::LEN);
    }

    #[test]
    fn test_predict_measurements_matches_raw() {
        let service = create_test_service();
        let m = Measurements::default();
        assert_eq!(
            service.predict_measurements(&m).expect("named"),
            service.predict(&m.to_vec()).expect("raw")
        );
    }

    #[test]
    fn test_missing_model_is_unavailable() {
        let err = match InferenceService::init(Path::new("does/not/exist"), false) {
            Ok(_) => panic!("must fail"),
            Err(e) => e,
        };
        assert!(matches!(
            err,
            PetalscopeError::ModelUnavailable(ModelError::Missing(_))
        ));
    }

    #[test]
    fn test_clone_shares_classifier() {
        let service = create_test_service();
        let clone = service.clone();
        assert!(Arc::ptr_eq(&service.classifier, &clone.classifier));
    }
}
