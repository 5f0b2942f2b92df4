use std::sync::Arc;
use std::time::Instant;

use serde_json::json;

use crate::classifier::RiskClassifier;
use crate::encoder::RiskFeatureEncoder;
use crate::error::{CareError, Result};
use crate::models::{HealthStatus, PrescriptionEntry, RiskAssessment};
use crate::scorer::score_prediction;

use super::{CareScope, LoadedModel};

impl CareScope {
    /// Installs a trained classifier; its vocabulary is fixed from here on.
    pub fn load_classifier(&self, classifier: Arc<dyn RiskClassifier>) -> Result<()> {
        if classifier.classes().is_empty() {
            return Err(CareError::Validation(
                "classifier exposes no classes".to_string(),
            ));
        }
        if classifier.feature_names().is_empty() {
            return Err(CareError::Validation(
                "classifier exposes no feature names".to_string(),
            ));
        }
        let encoder = RiskFeatureEncoder::new(classifier.feature_names().to_vec())
            .with_separator(self.config.risk.feature_separator);
        let mut slot = self
            .model
            .write()
            .map_err(|_| CareError::Internal("model slot lock poisoned".to_string()))?;
        *slot = Some(Arc::new(LoadedModel {
            classifier,
            encoder,
        }));
        Ok(())
    }

    pub fn unload_classifier(&self) -> Result<()> {
        let mut slot = self
            .model
            .write()
            .map_err(|_| CareError::Internal("model slot lock poisoned".to_string()))?;
        *slot = None;
        Ok(())
    }

    /// A poisoned model slot is reported as inactive.
    #[must_use]
    pub fn health(&self) -> HealthStatus {
        let loaded = self
            .model
            .read()
            .map(|slot| slot.is_some())
            .unwrap_or(false);
        HealthStatus::from_loaded(loaded)
    }

    /// Scores a prescription list with the installed classifier.
    ///
    /// Fails with `NotReady` when no classifier is installed. An empty list
    /// short-circuits to a `Low` assessment without touching the model.
    pub fn predict(&self, entries: &[PrescriptionEntry]) -> Result<RiskAssessment> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();

        let model = match self.loaded_model() {
            Ok(model) => model,
            Err(err) => {
                self.log_request_error(
                    request_id,
                    "risk.predict",
                    started,
                    &err,
                    Some(json!({ "prescriptions": entries.len() })),
                );
                return Err(err);
            }
        };

        if entries.is_empty() {
            self.log_request_status(
                request_id,
                "risk.predict",
                "ok",
                started,
                Some(json!({ "prescriptions": 0, "risk_level": "Low" })),
            );
            return Ok(RiskAssessment::no_prescriptions());
        }

        let features = model.encoder.encode(entries);
        let matched_features = features.active().len();
        let predicted = model.classifier.predict(&features);
        let probabilities = model.classifier.predict_proba(&features);
        let summary = score_prediction(&predicted, model.classifier.classes(), &probabilities);

        let details = json!({
            "prescriptions": entries.len(),
            "matched_features": matched_features,
            "risk_level": summary.label,
            "risk_score": summary.risk_score,
        });
        if matched_features == 0 {
            self.log_request_warning(
                request_id,
                "risk.predict",
                started,
                "no prescription matched the model vocabulary",
                Some(details),
            );
        } else {
            self.log_request_status(request_id, "risk.predict", "ok", started, Some(details));
        }
        Ok(summary.into())
    }

    fn loaded_model(&self) -> Result<Arc<LoadedModel>> {
        let slot = self
            .model
            .read()
            .map_err(|_| CareError::Internal("model slot lock poisoned".to_string()))?;
        slot.as_ref()
            .map(Arc::clone)
            .ok_or_else(|| CareError::NotReady("model not loaded".to_string()))
    }
}
