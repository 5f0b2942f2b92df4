// Public fallible APIs in this crate share one concrete error contract (`CareError`).
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod catalog;
pub mod classifier;
pub mod client;
pub mod config;
pub mod encoder;
pub mod error;
pub mod index;
pub(crate) mod jsonl;
pub mod models;
pub mod scorer;

pub use catalog::PatientCatalog;
pub use classifier::{OpioidShareClassifier, RiskClassifier, ShareThresholds};
pub use client::CareScope;
pub use config::AppConfig;
pub use encoder::RiskFeatureEncoder;
pub use error::{CareError, Result};
pub use index::PrefixIndex;
