//! Application state management

use chrono::{DateTime, Utc};

use crate::estimators::{EstimatorError, LinearRegressionParams};
use crate::model::Estimator;
use crate::param_guard::ParamGuard;

use super::ServerConfig;

/// Application state shared across handlers
#[derive(Debug)]
pub struct AppState {
    pub config: ServerConfig,
    pub estimator: Estimator<f64>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Builds the state with an unfitted estimator. Fails if the configured
    /// hyperparameters are invalid.
    pub fn new(config: ServerConfig) -> Result<Self, EstimatorError> {
        let params = LinearRegressionParams::new()
            .rank_tolerance(config.rank_tolerance)
            .check()?;
        Ok(Self {
            config,
            estimator: Estimator::new(params),
            started_at: Utc::now(),
        })
    }

    pub fn uptime_secs(&self) -> i64 {
        Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }
}
