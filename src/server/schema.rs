//! Request and response records of the HTTP interface.
//!
//! Fit and predict share one request record:
//!
//! ```json
//! {"X": [[1.0, 2.0], [3.0, 4.0], [5.0, 7.0]], "y": [1.0, 2.0, 3.0]}
//! ```
//!
//! `X` is a list of rows and is required. `y` is required by `/fit` and
//! optional for `/predict`, where it enables scoring.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::error::{Result, ServerError};
use crate::model::Parameters;

#[derive(Debug, Clone, Deserialize)]
pub struct Data {
    #[serde(rename = "X")]
    pub x: Vec<Vec<f64>>,
    #[serde(default)]
    pub y: Option<Vec<f64>>,
}

impl Data {
    /// Decodes the payload into a design matrix and optional targets.
    pub fn into_arrays(self) -> Result<(Array2<f64>, Option<Array1<f64>>)> {
        let X = decode_matrix(self.x)?;
        let y = self.y.map(Array1::from);
        if let Some(y) = &y {
            ensure_finite(y.iter(), "y")?;
        }
        Ok((X, y))
    }
}

/// Builds a dense matrix out of rows. Rows of unequal length and non-finite
/// values are malformed input; an empty list of rows decodes to the `0 x 0`
/// matrix.
pub fn decode_matrix(rows: Vec<Vec<f64>>) -> Result<Array2<f64>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);

    if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n_cols) {
        return Err(ServerError::MalformedInput(format!(
            "row {} of X has {} values but row 0 has {}",
            i,
            row.len(),
            n_cols
        )));
    }

    let values: Vec<f64> = rows.into_iter().flatten().collect();
    ensure_finite(values.iter(), "X")?;
    Array2::from_shape_vec((n_rows, n_cols), values)
        .map_err(|e| ServerError::Internal(e.to_string()))
}

fn ensure_finite<'a>(values: impl Iterator<Item = &'a f64>, field: &str) -> Result<()> {
    match values.enumerate().find(|(_, v)| !v.is_finite()) {
        Some((i, v)) => Err(ServerError::MalformedInput(format!(
            "value {} of {} is not a finite number: {}",
            i, field, v
        ))),
        None => Ok(()),
    }
}

/// Model parameters. Both fields are `null` while the model is unfitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefs {
    pub intercept: Option<f64>,
    pub coef: Option<Vec<f64>>,
}

impl From<Option<Parameters<f64>>> for Coefs {
    fn from(parameters: Option<Parameters<f64>>) -> Self {
        match parameters {
            Some(p) => Coefs {
                intercept: Some(p.intercept),
                coef: Some(p.coefficients.to_vec()),
            },
            None => Coefs {
                intercept: None,
                coef: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predictions {
    pub y_hat: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub score: Option<f64>,
}

/// Serializes as `{}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Empty {}

#[derive(Debug, Clone, Serialize)]
pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub fitted: bool,
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub fitted: bool,
    pub uptime_secs: i64,
}
