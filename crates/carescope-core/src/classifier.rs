use crate::encoder::normalize_drug_name;
use crate::error::{CareError, Result};
use crate::models::{CLASS_HIGH, CLASS_LOW, CLASS_MEDIUM, FeatureVector};

/// Capability surface of a trained risk model.
///
/// `predict_proba` returns one probability per entry of `classes`, in that
/// order. `feature_names` is the vocabulary the model was trained against.
pub trait RiskClassifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> String;
    fn predict_proba(&self, features: &FeatureVector) -> Vec<f64>;
    fn classes(&self) -> &[String];
    fn feature_names(&self) -> &[String];
}

pub const DEFAULT_HIGH_SHARE: f64 = 0.4;
pub const DEFAULT_MEDIUM_SHARE: f64 = 0.1;

/// Opioid-share cut-offs separating `High`, `Medium` and `Low`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShareThresholds {
    pub high: f64,
    pub medium: f64,
}

impl Default for ShareThresholds {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH_SHARE,
            medium: DEFAULT_MEDIUM_SHARE,
        }
    }
}

impl ShareThresholds {
    pub fn new(high: f64, medium: f64) -> Result<Self> {
        let in_range = |value: f64| (0.0..=1.0).contains(&value);
        if !in_range(high) || !in_range(medium) || medium > high {
            return Err(CareError::Validation(format!(
                "invalid risk share thresholds: high={high} medium={medium} (expected 0 <= medium <= high <= 1)"
            )));
        }
        Ok(Self { high, medium })
    }

    #[must_use]
    pub fn classify(&self, share: f64) -> &'static str {
        if share >= self.high {
            CLASS_HIGH
        } else if share >= self.medium {
            CLASS_MEDIUM
        } else {
            CLASS_LOW
        }
    }
}

/// Rule model labelling by the share of opioid prescriptions.
///
/// A vocabulary feature counts as an opioid when it contains any of the known
/// opioid names after separator normalization. Probabilities are one-hot on
/// the predicted class.
#[derive(Debug, Clone)]
pub struct OpioidShareClassifier {
    feature_names: Vec<String>,
    classes: Vec<String>,
    opioid_mask: Vec<bool>,
    thresholds: ShareThresholds,
}

impl OpioidShareClassifier {
    pub fn new<I, S>(
        feature_names: Vec<String>,
        opioid_names: I,
        separator: char,
        thresholds: ShareThresholds,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let opioids = opioid_names
            .into_iter()
            .map(|name| normalize_drug_name(name.as_ref().trim(), separator))
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>();
        let opioid_mask = feature_names
            .iter()
            .map(|feature| opioids.iter().any(|opioid| feature.contains(opioid.as_str())))
            .collect();
        Self {
            feature_names,
            // Alphabetical, the order the trained model reports.
            classes: vec![
                CLASS_HIGH.to_string(),
                CLASS_LOW.to_string(),
                CLASS_MEDIUM.to_string(),
            ],
            opioid_mask,
            thresholds,
        }
    }

    #[must_use]
    pub fn opioid_features(&self) -> Vec<&str> {
        self.feature_names
            .iter()
            .zip(&self.opioid_mask)
            .filter(|(_, is_opioid)| **is_opioid)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    #[must_use]
    pub fn opioid_share(&self, features: &FeatureVector) -> f64 {
        features
            .values()
            .iter()
            .zip(&self.opioid_mask)
            .filter(|(_, is_opioid)| **is_opioid)
            .map(|(value, _)| *value)
            .sum::<f64>()
            .min(1.0)
    }
}

impl RiskClassifier for OpioidShareClassifier {
    fn predict(&self, features: &FeatureVector) -> String {
        self.thresholds
            .classify(self.opioid_share(features))
            .to_string()
    }

    fn predict_proba(&self, features: &FeatureVector) -> Vec<f64> {
        let predicted = self.predict(features);
        self.classes
            .iter()
            .map(|class| if *class == predicted { 1.0 } else { 0.0 })
            .collect()
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::encoder::RiskFeatureEncoder;
    use crate::models::PrescriptionEntry;

    fn vocabulary() -> Vec<String> {
        ["HYDROCODONE.ACETAMINOPHEN", "LISINOPRIL", "OXYCODONE", "METFORMIN.HCL"]
            .iter()
            .map(|name| (*name).to_string())
            .collect()
    }

    fn classifier() -> OpioidShareClassifier {
        OpioidShareClassifier::new(
            vocabulary(),
            ["Hydrocodone-Acetaminophen", "OXYCODONE"],
            '.',
            ShareThresholds::default(),
        )
    }

    fn encode(names: &[&str]) -> FeatureVector {
        let encoder = RiskFeatureEncoder::new(Arc::from(vocabulary()));
        let entries = names
            .iter()
            .map(|name| PrescriptionEntry::new(*name))
            .collect::<Vec<_>>();
        encoder.encode(&entries)
    }

    #[test]
    fn opioid_features_are_found_by_normalized_substring() {
        assert_eq!(
            classifier().opioid_features(),
            vec!["HYDROCODONE.ACETAMINOPHEN", "OXYCODONE"]
        );
    }

    #[test]
    fn share_thresholds_drive_the_label() {
        let model = classifier();
        assert_eq!(model.predict(&encode(&["oxycodone", "lisinopril"])), "High");
        assert_eq!(
            model.predict(&encode(&["oxycodone", "lisinopril", "lisinopril", "metformin hcl"])),
            "Medium"
        );
        assert_eq!(model.predict(&encode(&["lisinopril"])), "Low");
        assert_eq!(model.predict(&encode(&[])), "Low");
    }

    #[test]
    fn probabilities_are_one_hot_in_class_order() {
        let model = classifier();
        assert_eq!(model.classes(), &["High", "Low", "Medium"]);
        let probabilities = model.predict_proba(&encode(&["oxycodone"]));
        assert_eq!(probabilities, vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn thresholds_reject_inverted_or_out_of_range_values() {
        assert!(ShareThresholds::new(0.1, 0.4).is_err());
        assert!(ShareThresholds::new(1.5, 0.1).is_err());
        assert!(ShareThresholds::new(0.4, -0.1).is_err());
        assert_eq!(
            ShareThresholds::new(0.5, 0.2).expect("thresholds").classify(0.2),
            "Medium"
        );
    }
}
