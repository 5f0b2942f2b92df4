use crate::classifier::{DEFAULT_HIGH_SHARE, DEFAULT_MEDIUM_SHARE, ShareThresholds};
use crate::encoder::DEFAULT_FEATURE_SEPARATOR;
use crate::error::{CareError, Result};

use super::env::{parse_f64, read_raw_env};

const ENV_FEATURE_SEPARATOR: &str = "CARESCOPE_FEATURE_SEPARATOR";
const ENV_RISK_HIGH_SHARE: &str = "CARESCOPE_RISK_HIGH_SHARE";
const ENV_RISK_MEDIUM_SHARE: &str = "CARESCOPE_RISK_MEDIUM_SHARE";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskConfig {
    pub feature_separator: char,
    pub thresholds: ShareThresholds,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            feature_separator: DEFAULT_FEATURE_SEPARATOR,
            thresholds: ShareThresholds::default(),
        }
    }
}

impl RiskConfig {
    pub(super) fn from_env() -> Result<Self> {
        Ok(Self {
            feature_separator: parse_separator(read_raw_env(ENV_FEATURE_SEPARATOR).as_deref())?,
            thresholds: parse_thresholds(
                read_raw_env(ENV_RISK_HIGH_SHARE).as_deref(),
                read_raw_env(ENV_RISK_MEDIUM_SHARE).as_deref(),
            )?,
        })
    }
}

fn parse_separator(raw: Option<&str>) -> Result<char> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_FEATURE_SEPARATOR);
    };
    let mut chars = raw.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(separator), None) => Ok(separator),
        _ => Err(CareError::Validation(format!(
            "invalid {ENV_FEATURE_SEPARATOR}: {raw:?} (expected a single character)"
        ))),
    }
}

fn parse_thresholds(high: Option<&str>, medium: Option<&str>) -> Result<ShareThresholds> {
    let high = parse_share(ENV_RISK_HIGH_SHARE, high, DEFAULT_HIGH_SHARE)?;
    let medium = parse_share(ENV_RISK_MEDIUM_SHARE, medium, DEFAULT_MEDIUM_SHARE)?;
    ShareThresholds::new(high, medium)
}

fn parse_share(name: &str, raw: Option<&str>, default_value: f64) -> Result<f64> {
    match raw {
        None => Ok(default_value),
        Some(value) => parse_f64(Some(value)).ok_or_else(|| {
            CareError::Validation(format!("invalid {name}: {value} (expected a number)"))
        }),
    }
}
