use std::sync::Arc;

use crate::models::{FeatureVector, PrescriptionEntry};

/// Vocabulary features join words with this character (`HYDROCODONE.ACETAMINOPHEN`).
pub const DEFAULT_FEATURE_SEPARATOR: char = '.';

/// Maps free-text drug names onto a fixed classifier vocabulary as shares of
/// the submitted prescriptions.
#[derive(Debug, Clone)]
pub struct RiskFeatureEncoder {
    vocabulary: Arc<[String]>,
    separator: char,
}

impl RiskFeatureEncoder {
    pub fn new(vocabulary: impl Into<Arc<[String]>>) -> Self {
        Self {
            vocabulary: vocabulary.into(),
            separator: DEFAULT_FEATURE_SEPARATOR,
        }
    }

    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    #[must_use]
    pub fn separator(&self) -> char {
        self.separator
    }

    #[must_use]
    pub fn normalize(&self, drug_name: &str) -> String {
        normalize_drug_name(drug_name, self.separator)
    }

    /// Position of the first vocabulary feature that contains `normalized` or
    /// is contained by it. First match wins, so vocabulary order matters.
    #[must_use]
    pub fn match_feature(&self, normalized: &str) -> Option<usize> {
        self.vocabulary.iter().position(|feature| {
            feature.contains(normalized) || normalized.contains(feature.as_str())
        })
    }

    /// Share vector over the whole vocabulary. Unmatched entries still count
    /// toward the denominator; an empty list yields all zeros.
    #[must_use]
    pub fn encode(&self, entries: &[PrescriptionEntry]) -> FeatureVector {
        let mut vector = FeatureVector::zeros(Arc::clone(&self.vocabulary));
        if entries.is_empty() {
            return vector;
        }

        let mut counts = vec![0usize; self.vocabulary.len()];
        for entry in entries {
            let normalized = self.normalize(&entry.drug_name);
            if let Some(position) = self.match_feature(&normalized) {
                counts[position] += 1;
            }
        }

        let total = entries.len() as f64;
        for (position, count) in counts.into_iter().enumerate() {
            if count > 0 {
                vector.set(position, count as f64 / total);
            }
        }
        vector
    }
}

#[must_use]
pub fn normalize_drug_name(drug_name: &str, separator: char) -> String {
    drug_name
        .to_uppercase()
        .chars()
        .map(|ch| if ch == ' ' || ch == '-' { separator } else { ch })
        .collect()
}
