use std::collections::BTreeMap;

use crate::models::{CLASS_HIGH, CLASS_LOW, CLASS_MEDIUM, RiskSummary};

const WEIGHT_HIGH: f64 = 100.0;
const WEIGHT_MEDIUM: f64 = 50.0;

/// Blends class probabilities into a 0-100 risk summary.
///
/// `class_labels` and `probabilities` are paired by position; surplus entries
/// on either side are ignored. The label is the most probable class, or
/// `Low` when nothing was supplied.
#[must_use]
pub fn score(class_labels: &[String], probabilities: &[f64]) -> RiskSummary {
    let label = class_labels
        .iter()
        .zip(probabilities)
        .fold(None::<(&String, f64)>, |best, (label, probability)| match best {
            Some((_, best_probability)) if best_probability >= *probability => best,
            _ => Some((label, *probability)),
        })
        .map_or_else(|| CLASS_LOW.to_string(), |(label, _)| label.clone());
    score_prediction(&label, class_labels, probabilities)
}

/// Same as [`score`], but keeps the classifier's own prediction as the label.
#[must_use]
pub fn score_prediction(
    predicted: &str,
    class_labels: &[String],
    probabilities: &[f64],
) -> RiskSummary {
    let mut blended = 0.0;
    let mut confidence = 0.0_f64;
    let mut per_class = BTreeMap::new();
    for (label, probability) in class_labels.iter().zip(probabilities) {
        blended += class_weight(label) * probability;
        confidence = confidence.max(*probability);
        per_class.insert(label.clone(), round1(probability * 100.0));
    }

    RiskSummary {
        label: predicted.to_string(),
        risk_score: round1(blended),
        confidence: round1(confidence * 100.0),
        probabilities: per_class,
    }
}

fn class_weight(label: &str) -> f64 {
    match label {
        CLASS_HIGH => WEIGHT_HIGH,
        CLASS_MEDIUM => WEIGHT_MEDIUM,
        _ => 0.0,
    }
}

// Exact halves go to the even neighbour.
fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
