mod patient;
mod risk;
mod trace;

pub use patient::{PatientRecord, SyncReport};
pub use risk::{
    CLASS_HIGH, CLASS_LOW, CLASS_MEDIUM, FeatureVector, HealthStatus, PrescriptionEntry,
    RiskAssessment, RiskSummary,
};
pub use trace::RequestLogEntry;
