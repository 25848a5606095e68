use thiserror::Error;

use crate::helpers::linalg::LinalgError;

/// Simplified `Result` using [`EstimatorError`] as error type
pub type Result<T> = std::result::Result<T, EstimatorError>;

/// Coarse classification of [`EstimatorError`] used at the service boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Well-formed input whose dimensions are incompatible with the request
    Shape,
    /// The operation needs a fitted model
    NotFitted,
    /// The least-squares problem has no unique finite solution
    SingularSystem,
    /// Hyperparameters failed validation
    InvalidParameter,
}

/// Error variants from hyperparameter construction or model estimation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimatorError {
    #[error("invalid rank tolerance {0}")]
    InvalidTolerance(f32),
    #[error("the design matrix has no feature columns")]
    NoFeatures,
    #[error("the design matrix has {n_samples} rows but {n_targets} targets were given")]
    TargetLength { n_samples: usize, n_targets: usize },
    #[error(
        "fitting {n_features} coefficients and an intercept requires at least {} samples, got {n_samples}",
        .n_features + 1
    )]
    NotEnoughSamples { n_samples: usize, n_features: usize },
    #[error("the model was fitted on {expected} features but the input has {found}")]
    FeatureMismatch { expected: usize, found: usize },
    #[error("cannot score a model on an empty dataset")]
    EmptyDataset,
    #[error("the model has not been fitted yet")]
    NotFitted,
    #[error("feature {column} is linearly dependent on the intercept or the preceding features")]
    SingularSystem { column: usize },
    #[error("the least-squares solution is not representable as finite numbers")]
    NonFiniteSolution,
}

impl EstimatorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EstimatorError::InvalidTolerance(_) => ErrorKind::InvalidParameter,
            EstimatorError::NoFeatures
            | EstimatorError::TargetLength { .. }
            | EstimatorError::NotEnoughSamples { .. }
            | EstimatorError::FeatureMismatch { .. }
            | EstimatorError::EmptyDataset => ErrorKind::Shape,
            EstimatorError::NotFitted => ErrorKind::NotFitted,
            EstimatorError::SingularSystem { .. } | EstimatorError::NonFiniteSolution => {
                ErrorKind::SingularSystem
            }
        }
    }
}

impl From<LinalgError> for EstimatorError {
    fn from(err: LinalgError) -> Self {
        match err {
            LinalgError::RankDeficient { column } => EstimatorError::SingularSystem { column },
            // `fit` validates both dimensions before solving
            LinalgError::DimensionMismatch { n_rows, n_cols, .. } => {
                EstimatorError::NotEnoughSamples {
                    n_samples: n_rows,
                    n_features: n_cols,
                }
            }
        }
    }
}
