use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, CareError>;

#[derive(Debug, Error)]
pub enum CareError {
    #[error("not ready: {0}")]
    NotReady(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub operation: String,
    pub trace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CareError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotReady(_) => "NOT_READY",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn to_payload(&self, operation: impl Into<String>) -> ErrorPayload {
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            operation: operation.into(),
            trace_id: Uuid::new_v4().to_string(),
            details: None,
        }
    }
}
