use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use carescope_core::models::{PatientRecord, PrescriptionEntry};
use carescope_core::{AppConfig, OpioidShareClassifier, ShareThresholds};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::cli::ModelArgs;

pub(super) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PatientsFile {
    Wrapped { patients: Vec<PatientRecord> },
    Bare(Vec<PatientRecord>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PrescriptionsFile {
    Wrapped { prescriptions: Vec<PrescriptionEntry> },
    Bare(Vec<PrescriptionEntry>),
}

/// Accepts either a bare array or a `{"patients": [...]}` sync payload.
pub(super) fn load_patients(path: &Path) -> Result<Vec<PatientRecord>> {
    Ok(match read_json::<PatientsFile>(path)? {
        PatientsFile::Wrapped { patients } | PatientsFile::Bare(patients) => patients,
    })
}

pub(super) fn load_prescriptions(path: &Path) -> Result<Vec<PrescriptionEntry>> {
    Ok(match read_json::<PrescriptionsFile>(path)? {
        PrescriptionsFile::Wrapped { prescriptions } | PrescriptionsFile::Bare(prescriptions) => {
            prescriptions
        }
    })
}

pub(super) fn load_name_list(path: &Path) -> Result<Vec<String>> {
    read_json(path)
}

pub(super) fn build_rule_model(
    vocabulary: &Path,
    opioids: &Path,
    high_share: Option<f64>,
    medium_share: Option<f64>,
    config: &AppConfig,
) -> Result<Arc<OpioidShareClassifier>> {
    let defaults = config.risk.thresholds;
    let thresholds = ShareThresholds::new(
        high_share.unwrap_or(defaults.high),
        medium_share.unwrap_or(defaults.medium),
    )?;
    Ok(Arc::new(OpioidShareClassifier::new(
        load_name_list(vocabulary)?,
        load_name_list(opioids)?,
        config.risk.feature_separator,
        thresholds,
    )))
}

pub(super) fn build_model_from_args(
    args: &ModelArgs,
    config: &AppConfig,
) -> Result<Arc<OpioidShareClassifier>> {
    build_rule_model(
        &args.vocabulary,
        &args.opioids,
        args.high_share,
        args.medium_share,
        config,
    )
}
