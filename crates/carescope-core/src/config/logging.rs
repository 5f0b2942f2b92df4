use std::path::PathBuf;

use super::env::read_non_empty_env;

const ENV_REQUEST_LOG: &str = "CARESCOPE_REQUEST_LOG";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestLogConfig {
    /// JSONL sink; `None` disables request logging.
    pub path: Option<PathBuf>,
}

impl RequestLogConfig {
    #[must_use]
    pub(super) fn from_env() -> Self {
        Self {
            path: read_non_empty_env(ENV_REQUEST_LOG).map(PathBuf::from),
        }
    }
}
