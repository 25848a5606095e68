use super::error::{EstimatorError, Result};
use crate::param_guard::ParamGuard;
use crate::Float;

/// A verified hyperparameter set ready for the fitting of a linear regression
/// model
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressionValidParams<F> {
    rank_tolerance: F,
}

impl<F: Float> LinearRegressionValidParams<F> {
    pub fn rank_tolerance(&self) -> F {
        self.rank_tolerance
    }
}

impl<F: Float> Default for LinearRegressionValidParams<F> {
    fn default() -> Self {
        LinearRegressionValidParams {
            rank_tolerance: F::epsilon().sqrt(),
        }
    }
}

/// Configure and fit a linear regression model
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressionParams<F>(LinearRegressionValidParams<F>);

impl<F: Float> Default for LinearRegressionParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> LinearRegressionParams<F> {
    /// Create default linear regression hyper parameters
    pub fn new() -> LinearRegressionParams<F> {
        Self(LinearRegressionValidParams::default())
    }

    /// Set the relative tolerance below which a feature is considered a
    /// linear combination of the intercept and the preceding features. A
    /// larger value rejects nearly collinear designs more eagerly.
    ///
    /// Defaults to the square root of the machine epsilon if not set.
    pub fn rank_tolerance(mut self, rank_tolerance: F) -> Self {
        self.0.rank_tolerance = rank_tolerance;
        self
    }
}

impl<F: Float> ParamGuard for LinearRegressionParams<F> {
    type Checked = LinearRegressionValidParams<F>;
    type Error = EstimatorError;

    /// Validate the hyper parameters
    fn check_ref(&self) -> Result<&Self::Checked> {
        let tolerance = self.0.rank_tolerance;
        if tolerance < F::zero() || !tolerance.is_finite() {
            Err(EstimatorError::InvalidTolerance(
                tolerance.to_f32().unwrap_or(f32::NAN),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
