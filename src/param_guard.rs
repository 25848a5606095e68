use crate::datasets::{DatasetBase, DesignMatrix, Targets};
use crate::traits::Fit;
use std::error::Error;

/// Hyperparameters whose values have not been validated yet. The checked
/// set is only reachable through `check_ref()` or `check()`, so a solver never
/// sees an invalid configuration.
///
/// `check_ref()` and `check()` must accept and reject exactly the same values.
pub trait ParamGuard {
    /// The checked hyperparameters
    type Checked;
    /// Error type resulting from failed hyperparameter checking
    type Error: Error;

    /// Checks the hyperparameters and returns a reference to the checked hyperparameters if
    /// successful
    fn check_ref(&self) -> Result<&Self::Checked, Self::Error>;

    /// Checks the hyperparameters and returns the checked hyperparameters if successful
    fn check(self) -> Result<Self::Checked, Self::Error>;
}

/// Unchecked hyperparameters can be fitted directly: the check runs first and
/// its error is converted into the error type of the underlying `Fit`.
impl<DM: DesignMatrix, T: Targets, E, P: ParamGuard> Fit<DM, T, E> for P
where
    P::Checked: Fit<DM, T, E>,
    E: Error + From<P::Error>,
{
    type Object = <<P as ParamGuard>::Checked as Fit<DM, T, E>>::Object;

    fn fit(&self, dataset: &DatasetBase<DM, T>) -> Result<Self::Object, E> {
        let checked = self.check_ref()?;
        checked.fit(dataset)
    }
}
