use ndarray::{Array1, ArrayBase, ArrayView1, Axis, Data, Ix1, Ix2};

use super::error::{EstimatorError, Result};
use super::hyperparams::{LinearRegressionParams, LinearRegressionValidParams};
use crate::datasets::DatasetBase;
use crate::helpers::linalg::{column_scales, max_abs, solve_least_squares};
use crate::traits::Fit;
use crate::Float;

/// The ordinary least squares estimator
///
/// The estimator fits an intercept and one coefficient per feature that
/// minimize the sum of squared residuals. The intercept is always estimated
/// implicitly: the design matrix must not contain a column of ones, and
/// fitting `k` features requires at least `k + 1` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression<F> {
    intercept: F,
    coefficients: Array1<F>,
}

impl<F: Float> LinearRegression<F> {
    /// This method instantiates a linear regression estimator with default
    /// parameters.
    pub fn params() -> LinearRegressionParams<F> {
        LinearRegressionParams::new()
    }

    pub fn intercept(&self) -> F {
        self.intercept
    }

    /// This method is a getter for the coefficients vector.
    pub fn coefficients(&self) -> ArrayView1<'_, F> {
        self.coefficients.view()
    }

    /// Number of features seen during fit.
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Computes `intercept + X w` for every row of `X`.
    ///
    /// The design matrix must have exactly as many columns as the fitted
    /// model. The empty `0 x 0` matrix is accepted as well and yields an empty
    /// prediction: it is what an empty list of rows decodes to.
    pub fn predict<S: Data<Elem = F>>(&self, X: &ArrayBase<S, Ix2>) -> Result<Array1<F>> {
        let (n_samples, n_features) = X.dim();
        if n_features != self.n_features() {
            if n_samples == 0 && n_features == 0 {
                return Ok(Array1::zeros(0));
            }
            return Err(EstimatorError::FeatureMismatch {
                expected: self.n_features(),
                found: n_features,
            });
        }
        Ok(X.dot(&self.coefficients) + self.intercept)
    }

    /// Returns the coefficient of determination `1 - SS_res / SS_tot` of the
    /// predictions on `X` against `y`.
    ///
    /// When `y` is constant, the score is `1` if the predictions are exact and
    /// `0` otherwise.
    pub fn score<S, T>(&self, X: &ArrayBase<S, Ix2>, y: &ArrayBase<T, Ix1>) -> Result<F>
    where
        S: Data<Elem = F>,
        T: Data<Elem = F>,
    {
        if X.nrows() != y.len() {
            return Err(EstimatorError::TargetLength {
                n_samples: X.nrows(),
                n_targets: y.len(),
            });
        }
        if y.is_empty() {
            return Err(EstimatorError::EmptyDataset);
        }

        let y_hat = self.predict(X)?;
        let ss_res = (y - &y_hat).mapv(|r| r * r).sum();
        let y_mean = y.sum() / F::cast(y.len());
        let ss_tot = y.mapv(|yi| (yi - y_mean).powi(2)).sum();

        if ss_tot == F::zero() {
            return Ok(if ss_res == F::zero() {
                F::one()
            } else {
                F::zero()
            });
        }
        Ok(F::one() - ss_res / ss_tot)
    }
}

/// This implements the least-squares fit on dense design matrices.
impl<F: Float, D: Data<Elem = F>, S: Data<Elem = F>>
    Fit<ArrayBase<D, Ix2>, ArrayBase<S, Ix1>, EstimatorError> for LinearRegressionValidParams<F>
{
    /// If successful, the output is a [`LinearRegression`] holding the
    /// intercept and the coefficients.
    type Object = LinearRegression<F>;

    /// Both the design matrix and the targets are centered, which removes the
    /// intercept from the least-squares problem. The centered system is solved
    /// with a QR factorization and the intercept is recovered from the means.
    ///
    /// A solution that does not fit in `F`, or that was computed from
    /// non-finite inputs, is rejected with
    /// [`EstimatorError::NonFiniteSolution`].
    fn fit(
        &self,
        dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<S, Ix1>>,
    ) -> Result<Self::Object> {
        let X = dataset.design_matrix();
        let y = dataset.targets();
        let (n_samples, n_features) = X.dim();

        if n_features == 0 {
            return Err(EstimatorError::NoFeatures);
        }
        if y.len() != n_samples {
            return Err(EstimatorError::TargetLength {
                n_samples,
                n_targets: y.len(),
            });
        }
        if n_samples < n_features + 1 {
            return Err(EstimatorError::NotEnoughSamples {
                n_samples,
                n_features,
            });
        }

        // Means and centering are taken on max-abs scaled copies so that
        // they stay finite for any finite input
        let X_scales = column_scales(X.view());
        let y_scale = max_abs(y.view());
        let X_scaled = X / &X_scales;
        let y_scaled = y / y_scale;

        let n = F::cast(n_samples);
        let X_mean = X_scaled.sum_axis(Axis(0)) / n;
        let y_mean = y_scaled.sum() / n;
        let X_centered = &X_scaled - &X_mean;
        let y_centered = &y_scaled - y_mean;

        let scaled_coefficients = solve_least_squares(
            X_centered.view(),
            y_centered.view(),
            self.rank_tolerance(),
        )?;
        let intercept = (y_mean - X_mean.dot(&scaled_coefficients)) * y_scale;
        let coefficients = scaled_coefficients / &X_scales * y_scale;

        if !intercept.is_finite() || coefficients.iter().any(|w| !w.is_finite()) {
            return Err(EstimatorError::NonFiniteSolution);
        }

        Ok(LinearRegression {
            intercept,
            coefficients,
        })
    }
}
