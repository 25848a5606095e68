//! HTTP request handlers

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

use crate::datasets::DatasetBase;
use crate::estimators::EstimatorError;

use super::error::{Result, ServerError};
use super::schema::{Coefs, Data, Empty, Endpoint, Health, Predictions, ServiceInfo};
use super::state::AppState;

const ENDPOINTS: [(&str, &str, &str); 7] = [
    ("GET", "/", "Service information"),
    ("GET", "/health", "Liveness and model state"),
    ("POST", "/fit", "Fit the model on {X, y}"),
    ("POST", "/predict", "Predict y_hat for {X}, scored when y is given"),
    ("GET", "/coefs", "Current intercept and coefficients"),
    ("GET", "/reset", "Discard the fitted model"),
    ("POST", "/reset", "Discard the fitted model"),
];

pub async fn root(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        fitted: state.estimator.is_fitted(),
        endpoints: ENDPOINTS
            .iter()
            .map(|&(method, path, description)| Endpoint {
                method,
                path,
                description,
            })
            .collect(),
    })
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Health> {
    Json(Health {
        status: "ok",
        fitted: state.estimator.is_fitted(),
        uptime_secs: state.uptime_secs(),
    })
}

/// Fit the model on the supplied data
pub async fn fit(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Data>, JsonRejection>,
) -> Result<Json<Coefs>> {
    let Json(data) = payload?;
    let (X, y) = data.into_arrays()?;
    let y = y.ok_or_else(|| {
        ServerError::MalformedInput("field `y` is required to fit the model".to_string())
    })?;
    let (n_samples, n_features) = X.dim();

    // Fitting and predicting are CPU bound, keep them off the async workers
    let task_state = Arc::clone(&state);
    let parameters = tokio::task::spawn_blocking(move || {
        task_state.estimator.fit(&DatasetBase::new(X.view(), y.view()))
    })
    .await
    .map_err(|e| ServerError::Internal(format!("fit task failed: {e}")))??;

    info!(
        n_samples,
        n_features,
        intercept = parameters.intercept,
        "Model fitted"
    );
    Ok(Json(Coefs::from(Some(parameters))))
}

/// Predict from the fitted model
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Data>, JsonRejection>,
) -> Result<Json<Predictions>> {
    let Json(data) = payload?;
    let (X, y) = data.into_arrays()?;

    let model = state.estimator.snapshot()?;
    let (y_hat, score) = tokio::task::spawn_blocking(move || {
        let y_hat = model.predict(&X)?;
        let score = y.map(|y| model.score(&X, &y)).transpose()?;
        Ok::<_, EstimatorError>((y_hat, score))
    })
    .await
    .map_err(|e| ServerError::Internal(format!("predict task failed: {e}")))??;

    Ok(Json(Predictions {
        y_hat: y_hat.to_vec(),
        score,
    }))
}

pub async fn coefs(State(state): State<Arc<AppState>>) -> Json<Coefs> {
    Json(Coefs::from(state.estimator.describe()))
}

pub async fn reset(State(state): State<Arc<AppState>>) -> Json<Empty> {
    state.estimator.reset();
    info!("Model reset");
    Json(Empty::default())
}
