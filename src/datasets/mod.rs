extern crate ndarray;

mod impl_datasets;
mod impl_design_matrix;
mod impl_targets;


use ndarray::{ArrayBase, Ix1, Ix2, OwnedRepr};

/// A design matrix paired with its targets.
///
/// Construction never checks that the two agree on the number of samples:
/// shape compatibility is an estimation concern and is reported by the
/// estimator that consumes the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBase<DM, T>
where
    DM: DesignMatrix,
    T: Targets,
{
    pub design_matrix: DM,
    pub targets: T,
}

/// A dataset owning its design matrix and targets.
pub type DenseDataset<F> = DatasetBase<ArrayBase<OwnedRepr<F>, Ix2>, ArrayBase<OwnedRepr<F>, Ix1>>;

/// Samples in rows, features in columns.
pub trait DesignMatrix: Sized {
    type Elem;

    fn n_samples(&self) -> usize;
    fn n_features(&self) -> usize;
}

/// A single regression target per sample.
pub trait Targets: Sized {
    type Elem;

    fn n_samples(&self) -> usize;
}
