//! The single mutable model owned by the service.
//!
//! [`Estimator`] holds a [`Model`] behind a readers-writer lock. Fitting
//! happens outside the lock and only the swap of the finished model is done
//! under it, so readers never observe a partially updated model and a failed
//! fit leaves the previous one in place.

use std::sync::Arc;

use ndarray::{Array1, ArrayBase, Data, Ix1, Ix2};
use parking_lot::RwLock;

use crate::datasets::DatasetBase;
use crate::estimators::error::{EstimatorError, Result};
use crate::estimators::{LinearRegression, LinearRegressionValidParams};
use crate::traits::Fit;
use crate::Float;


/// Lifecycle of the served model.
#[derive(Debug, Clone, Default)]
pub enum Model<F> {
    #[default]
    Unfitted,
    Fitted(Arc<LinearRegression<F>>),
}

/// Parameters of a fitted model, detached from the model itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters<F> {
    pub intercept: F,
    pub coefficients: Array1<F>,
}

impl<F: Float> From<&LinearRegression<F>> for Parameters<F> {
    fn from(model: &LinearRegression<F>) -> Self {
        Parameters {
            intercept: model.intercept(),
            coefficients: model.coefficients().to_owned(),
        }
    }
}

/// A linear regression model that can be refitted, queried and reset
/// concurrently through a shared reference.
#[derive(Debug)]
pub struct Estimator<F> {
    params: LinearRegressionValidParams<F>,
    model: RwLock<Model<F>>,
}

impl<F: Float> Default for Estimator<F> {
    fn default() -> Self {
        Self::new(LinearRegressionValidParams::default())
    }
}

impl<F: Float> Estimator<F> {
    /// Creates an unfitted estimator with the given checked hyperparameters.
    pub fn new(params: LinearRegressionValidParams<F>) -> Self {
        Estimator {
            params,
            model: RwLock::new(Model::Unfitted),
        }
    }

    /// Fits a new model and replaces the current one with it.
    ///
    /// On error the current model, fitted or not, is kept unchanged.
    pub fn fit<D, S>(
        &self,
        dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<S, Ix1>>,
    ) -> Result<Parameters<F>>
    where
        D: Data<Elem = F>,
        S: Data<Elem = F>,
    {
        let fitted = self.params.fit(dataset)?;
        let parameters = Parameters::from(&fitted);
        *self.model.write() = Model::Fitted(Arc::new(fitted));
        Ok(parameters)
    }

    /// Returns the current fitted model. The returned handle stays valid even
    /// if the estimator is refitted or reset afterwards.
    pub fn snapshot(&self) -> Result<Arc<LinearRegression<F>>> {
        match &*self.model.read() {
            Model::Unfitted => Err(EstimatorError::NotFitted),
            Model::Fitted(model) => Ok(Arc::clone(model)),
        }
    }

    /// Predicts with the current model. Fails with
    /// [`EstimatorError::NotFitted`] before the first successful fit,
    /// whatever the shape of `X`.
    pub fn predict<S: Data<Elem = F>>(&self, X: &ArrayBase<S, Ix2>) -> Result<Array1<F>> {
        self.snapshot()?.predict(X)
    }

    /// Returns the current parameters, or `None` while unfitted.
    pub fn describe(&self) -> Option<Parameters<F>> {
        match &*self.model.read() {
            Model::Unfitted => None,
            Model::Fitted(model) => Some(Parameters::from(model.as_ref())),
        }
    }

    /// Discards the current model. Resetting an unfitted estimator is a no-op.
    pub fn reset(&self) {
        *self.model.write() = Model::Unfitted;
    }

    pub fn is_fitted(&self) -> bool {
        matches!(&*self.model.read(), Model::Fitted(_))
    }
}
