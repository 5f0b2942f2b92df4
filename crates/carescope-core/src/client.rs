use std::sync::{Arc, RwLock};

use crate::catalog::PatientCatalog;
use crate::classifier::RiskClassifier;
use crate::config::AppConfig;
use crate::encoder::RiskFeatureEncoder;
use crate::error::Result;

mod request_log_service;
mod risk_service;
mod search_service;

/// A classifier together with the encoder built from its vocabulary.
struct LoadedModel {
    classifier: Arc<dyn RiskClassifier>,
    encoder: RiskFeatureEncoder,
}

/// Service object owned by the surrounding layer and shared across handlers.
#[derive(Clone)]
pub struct CareScope {
    catalog: Arc<PatientCatalog>,
    model: Arc<RwLock<Option<Arc<LoadedModel>>>>,
    config: AppConfig,
}

impl std::fmt::Debug for CareScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CareScope").finish_non_exhaustive()
    }
}

impl CareScope {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            catalog: Arc::new(PatientCatalog::new()),
            model: Arc::new(RwLock::new(None)),
            config,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(AppConfig::from_env()?))
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &PatientCatalog {
        &self.catalog
    }
}
