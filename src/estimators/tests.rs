use ndarray::{array, Array1, Array2};

use super::*;
use crate::datasets::{DatasetBase, DenseDataset};
use crate::helpers::test_helpers::{
    assert_array_all_close, generate_linear_data, generate_random_data, true_coefficients,
};
use crate::param_guard::ParamGuard;
use crate::traits::Fit;

#[test]
fn test_closed_form_simple_regression() {
    // slope = cov(x, y) / var(x) = 3 / 2, intercept = mean(y) - slope * mean(x)
    let X = array![[1f64], [2.], [3.]];
    let y = array![2., 3., 5.];
    let dataset = DenseDataset::from((X, y));
    let model = LinearRegression::params().fit(&dataset).unwrap();
    assert!((model.intercept() - 1. / 3.).abs() < 1e-12);
    assert_array_all_close(model.coefficients(), array![1.5].view(), 1e-12);
}

#[test]
fn test_residuals_are_orthogonal_to_features() {
    let (X, y) = generate_random_data(50, 4);
    let dataset = DatasetBase::new(X.view(), y.view());
    let model = LinearRegression::<f64>::params().fit(&dataset).unwrap();

    let residuals = &y - &model.predict(&X).unwrap();
    assert!(residuals.sum().abs() < 1e-9);
    let Xtr = X.t().dot(&residuals);
    assert_array_all_close(Xtr.view(), Array1::zeros(4).view(), 1e-9);
}

#[test]
fn test_recovers_noiseless_linear_function() {
    let (X, y) = generate_linear_data(30, 5, -2.5);
    let dataset = DatasetBase::new(X.view(), y.view());
    let model = LinearRegression::params().fit(&dataset).unwrap();

    assert!((model.intercept() + 2.5).abs() < 1e-9);
    assert_array_all_close(model.coefficients(), true_coefficients(5).view(), 1e-9);
    let y_hat = model.predict(&X).unwrap();
    assert_array_all_close(y_hat.view(), y.view(), 1e-9);
}

#[test]
fn test_fits_single_precision() {
    let X = array![[0f32], [1.], [2.], [3.]];
    let y = array![1f32, 3., 5., 7.];
    let dataset = DatasetBase::new(X.view(), y.view());
    let model = LinearRegression::params().fit(&dataset).unwrap();
    assert!((model.intercept() - 1.).abs() < 1e-5);
    assert!((model.coefficients()[0] - 2.).abs() < 1e-5);
}

#[test]
fn test_requires_one_more_sample_than_features() {
    // n = k is not enough once the intercept is accounted for
    let X = array![[1., 0.], [0., 1.]];
    let y = array![1., 2.];
    let dataset = DatasetBase::new(X.view(), y.view());
    assert_eq!(
        LinearRegression::params().fit(&dataset),
        Err(EstimatorError::NotEnoughSamples {
            n_samples: 2,
            n_features: 2
        })
    );

    // n = k + 1 is solved exactly: y = 1 + 2 x_0 + 3 x_1
    let X = array![[0f64, 0.], [1., 0.], [0., 1.]];
    let y = array![1., 3., 4.];
    let dataset = DatasetBase::new(X.view(), y.view());
    let model = LinearRegression::params().fit(&dataset).unwrap();
    assert!((model.intercept() - 1.).abs() < 1e-12);
    assert_array_all_close(model.coefficients(), array![2., 3.].view(), 1e-12);
}

#[test]
fn test_explicit_intercept_column_is_singular() {
    let X = array![[1., 1.], [1., 2.], [1., 3.]];
    let y = array![2., 3., 5.];
    let dataset = DatasetBase::new(X.view(), y.view());
    let err = LinearRegression::params().fit(&dataset).unwrap_err();
    assert_eq!(err, EstimatorError::SingularSystem { column: 0 });
    assert_eq!(err.kind(), ErrorKind::SingularSystem);
}

#[test]
fn test_collinear_features_are_singular() {
    let X = array![[1., 2.], [2., 4.], [3., 6.], [4., 8.]];
    let y = array![1., 2., 3., 5.];
    let dataset = DatasetBase::new(X.view(), y.view());
    assert_eq!(
        LinearRegression::params().fit(&dataset),
        Err(EstimatorError::SingularSystem { column: 1 })
    );
}

#[test]
fn test_rank_tolerance_rejects_nearly_collinear_features() {
    let X = array![[1., 1.], [2., 2.], [3., 3.0001], [4., 4.]];
    let y = array![1., 2., 3., 4.];
    let dataset = DatasetBase::new(X.view(), y.view());

    assert!(LinearRegression::params().fit(&dataset).is_ok());
    let strict = LinearRegression::params().rank_tolerance(1e-3);
    assert_eq!(
        strict.fit(&dataset),
        Err(EstimatorError::SingularSystem { column: 1 })
    );
}

#[test]
fn test_fits_huge_and_tiny_finite_values() {
    // y = 5 + 2e-200 x
    let X = array![[1e200f64], [2e200], [3e200]];
    let y = array![7., 9., 11.];
    let dataset = DatasetBase::new(X.view(), y.view());
    let model = LinearRegression::params().fit(&dataset).unwrap();
    assert!((model.intercept() - 5.).abs() < 1e-9);
    assert!((model.coefficients()[0] / 2e-200 - 1.).abs() < 1e-9);
    assert_array_all_close(model.predict(&X).unwrap().view(), y.view(), 1e-9);

    let X = array![[1e308f64], [1e308], [0.]];
    let y = array![1., 2., 3.];
    let dataset = DatasetBase::new(X.view(), y.view());
    let model = LinearRegression::params().fit(&dataset).unwrap();
    assert!(model.intercept().is_finite());
    let y_hat = model.predict(&X).unwrap();
    assert_array_all_close(y_hat.view(), array![1.5, 1.5, 3.].view(), 1e-9);
}

#[test]
fn test_non_finite_solution_is_rejected() {
    // The slope 1e600 does not fit in an f64
    let X = array![[1e-300f64], [2e-300], [3e-300]];
    let y = array![1e300, 2e300, 3e300];
    let dataset = DatasetBase::new(X.view(), y.view());
    let err = LinearRegression::params().fit(&dataset).unwrap_err();
    assert_eq!(err, EstimatorError::NonFiniteSolution);
    assert_eq!(err.kind(), ErrorKind::SingularSystem);

    let X = array![[1f64], [f64::NAN], [3.]];
    let y = array![1., 2., 3.];
    let dataset = DatasetBase::new(X.view(), y.view());
    assert_eq!(
        LinearRegression::params().fit(&dataset),
        Err(EstimatorError::NonFiniteSolution)
    );

    let X = array![[1f64], [2.], [3.]];
    let y = array![1., f64::INFINITY, 3.];
    let dataset = DatasetBase::new(X.view(), y.view());
    assert!(LinearRegression::params().fit(&dataset).is_err());
}

#[test]
fn test_shape_errors() {
    let y = array![1., 2., 3.];

    let X = Array2::<f64>::zeros((3, 0));
    let dataset = DatasetBase::new(X.view(), y.view());
    assert_eq!(
        LinearRegression::params().fit(&dataset),
        Err(EstimatorError::NoFeatures)
    );

    let X = array![[1.], [2.], [3.], [4.]];
    let dataset = DatasetBase::new(X.view(), y.view());
    let err = LinearRegression::params().fit(&dataset).unwrap_err();
    assert_eq!(
        err,
        EstimatorError::TargetLength {
            n_samples: 4,
            n_targets: 3
        }
    );
    assert_eq!(err.kind(), ErrorKind::Shape);
}

#[test]
fn test_predict_checks_feature_count() {
    let (X, y) = generate_linear_data(10, 3, 0.);
    let model = LinearRegression::params()
        .fit(&DatasetBase::new(X.view(), y.view()))
        .unwrap();

    let wrong = Array2::<f64>::zeros((2, 2));
    assert_eq!(
        model.predict(&wrong),
        Err(EstimatorError::FeatureMismatch {
            expected: 3,
            found: 2
        })
    );
    assert_eq!(model.predict(&Array2::<f64>::zeros((0, 3))).unwrap().len(), 0);
    assert_eq!(model.predict(&Array2::<f64>::zeros((0, 0))).unwrap().len(), 0);
    assert!(model.predict(&Array2::<f64>::zeros((0, 2))).is_err());
}

#[test]
fn test_score() {
    let (X, y) = generate_linear_data(20, 2, 4.);
    let model = LinearRegression::params()
        .fit(&DatasetBase::new(X.view(), y.view()))
        .unwrap();
    assert!((model.score(&X, &y).unwrap() - 1.).abs() < 1e-12);

    let (X, y) = generate_random_data(40, 2);
    let model = LinearRegression::params()
        .fit(&DatasetBase::new(X.view(), y.view()))
        .unwrap();
    let score = model.score(&X, &y).unwrap();
    assert!(score > 0. && score < 1.);

    assert_eq!(
        model.score(&X, &array![1., 2.]),
        Err(EstimatorError::TargetLength {
            n_samples: 40,
            n_targets: 2
        })
    );
    assert_eq!(
        model.score(&Array2::zeros((0, 2)), &Array1::zeros(0)),
        Err(EstimatorError::EmptyDataset)
    );
}

#[test]
fn test_score_on_constant_targets() {
    let X = array![[0.], [1.], [2.]];
    let y = array![3., 3., 3.];
    let model = LinearRegression::params()
        .fit(&DatasetBase::new(X.view(), y.view()))
        .unwrap();
    assert_eq!(model.score(&X, &y).unwrap(), 1.);

    let model = LinearRegression::params()
        .fit(&DatasetBase::new(X.view(), array![0., 1., 2.].view()))
        .unwrap();
    assert_eq!(model.score(&X, &y).unwrap(), 0.);
}

#[test]
fn test_params_check() {
    let params = LinearRegressionParams::<f64>::new().rank_tolerance(-1.);
    assert_eq!(
        params.check_ref(),
        Err(EstimatorError::InvalidTolerance(-1.))
    );
    let params = LinearRegressionParams::<f64>::new().rank_tolerance(f64::INFINITY);
    assert_eq!(params.check().unwrap_err().kind(), ErrorKind::InvalidParameter);

    let X = array![[0.], [1.], [2.]];
    let y = array![0., 1., 2.];
    let dataset = DatasetBase::new(X.view(), y.view());
    let invalid = LinearRegression::params().rank_tolerance(f64::NAN);
    assert!(matches!(
        invalid.fit(&dataset),
        Err(EstimatorError::InvalidTolerance(_))
    ));

    let valid = LinearRegression::<f64>::params().check().unwrap();
    assert_eq!(valid.rank_tolerance(), f64::EPSILON.sqrt());
}

#[test]
fn test_linalg_errors_convert() {
    use crate::helpers::linalg::LinalgError;

    let err = EstimatorError::from(LinalgError::RankDeficient { column: 2 });
    assert_eq!(err, EstimatorError::SingularSystem { column: 2 });
    let err = EstimatorError::from(LinalgError::DimensionMismatch {
        n_rows: 2,
        n_cols: 3,
        n_rhs: 2,
    });
    assert_eq!(err.kind(), ErrorKind::Shape);
}
