use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub const CLASS_HIGH: &str = "High";
pub const CLASS_MEDIUM: &str = "Medium";
pub const CLASS_LOW: &str = "Low";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionEntry {
    #[serde(rename = "drugName", default)]
    pub drug_name: String,
}

impl PrescriptionEntry {
    pub fn new(drug_name: impl Into<String>) -> Self {
        Self {
            drug_name: drug_name.into(),
        }
    }
}

/// Fixed-width share vector aligned with a classifier vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    names: Arc<[String]>,
    values: Vec<f64>,
}

impl FeatureVector {
    #[must_use]
    pub fn zeros(names: Arc<[String]>) -> Self {
        let values = vec![0.0; names.len()];
        Self { names, values }
    }

    pub(crate) fn set(&mut self, position: usize, value: f64) {
        if let Some(slot) = self.values.get_mut(position) {
            *slot = value;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .map(|position| self.values[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Non-zero features keyed by name.
    #[must_use]
    pub fn active(&self) -> BTreeMap<String, f64> {
        self.iter()
            .filter(|(_, value)| *value > 0.0)
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub label: String,
    pub risk_score: f64,
    pub confidence: f64,
    pub probabilities: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: String,
    pub risk_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<BTreeMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RiskAssessment {
    #[must_use]
    pub fn no_prescriptions() -> Self {
        Self {
            risk_level: CLASS_LOW.to_string(),
            risk_score: 0.0,
            confidence: None,
            probabilities: None,
            message: Some("No prescriptions provided".to_string()),
        }
    }
}

impl From<RiskSummary> for RiskAssessment {
    fn from(summary: RiskSummary) -> Self {
        Self {
            risk_level: summary.label,
            risk_score: summary.risk_score,
            confidence: Some(summary.confidence),
            probabilities: Some(summary.probabilities),
            message: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
}

impl HealthStatus {
    #[must_use]
    pub fn from_loaded(model_loaded: bool) -> Self {
        Self {
            status: if model_loaded { "active" } else { "inactive" }.to_string(),
            model_loaded,
        }
    }
}
