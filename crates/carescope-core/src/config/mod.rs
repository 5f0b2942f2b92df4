use crate::error::Result;

mod env;
mod logging;
mod risk;

pub use logging::RequestLogConfig;
pub use risk::RiskConfig;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub request_log: RequestLogConfig,
    pub risk: RiskConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            request_log: RequestLogConfig::from_env(),
            risk: RiskConfig::from_env()?,
        })
    }
}
