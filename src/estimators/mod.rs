#[cfg(test)]
mod tests;

pub mod error;
pub mod hyperparams;
pub mod linear_regression;

pub use error::{ErrorKind, EstimatorError};
pub use hyperparams::{LinearRegressionParams, LinearRegressionValidParams};
pub use linear_regression::LinearRegression;
