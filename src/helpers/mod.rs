
/// This module contains the dense linear algebra needed to fit a least-squares
/// model. We made the choice not to use a LAPACK binding: the systems solved
/// here are small and a Householder factorization keeps the crate free of
/// native dependencies.
pub mod linalg {
    use crate::Float;
    use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2, Axis};
    use thiserror::Error;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
    pub enum LinalgError {
        #[error("column {column} is linearly dependent on the preceding columns")]
        RankDeficient { column: usize },
        #[error("cannot solve a {n_rows}x{n_cols} least-squares system with {n_rhs} right-hand side values")]
        DimensionMismatch {
            n_rows: usize,
            n_cols: usize,
            n_rhs: usize,
        },
    }

    /// Largest absolute value of `x`, or one when `x` is all zeros. Dividing
    /// by it keeps the entries in `[-1, 1]`, so sums and squares of a few of
    /// them cannot overflow.
    pub fn max_abs<F: Float>(x: ArrayView1<F>) -> F {
        let scale = x.fold(F::zero(), |acc, &xi| acc.max(xi.abs()));
        if scale > F::zero() {
            scale
        } else {
            F::one()
        }
    }

    /// [`max_abs`] of every column of `A`.
    pub fn column_scales<F: Float>(A: ArrayView2<F>) -> Array1<F> {
        A.map_axis(Axis(0), max_abs)
    }

    /// Euclidean norm of every column of `A`.
    pub fn column_norms<F: Float>(A: ArrayView2<F>) -> Array1<F> {
        A.map_axis(Axis(0), |col| col.dot(&col).sqrt())
    }

    /// This function computes the thin QR factorization of `A` with Householder
    /// reflections, applying the same reflections to `b` on the fly. It returns
    /// the upper triangular factor `R` (`k x k`) along with the first `k`
    /// entries of `Q^T b`, which is all that is needed to solve the
    /// least-squares problem. `Q` itself is never formed.
    pub fn householder_qr<F: Float>(A: ArrayView2<F>, b: ArrayView1<F>) -> (Array2<F>, Array1<F>) {
        let (n_rows, n_cols) = A.dim();
        let n_reflections = n_cols.min(n_rows);
        let mut R = A.to_owned();
        let mut qtb = b.to_owned();

        for j in 0..n_reflections {
            let x = R.slice(s![j.., j]);
            let norm = x.dot(&x).sqrt();
            if norm == F::zero() {
                continue;
            }

            // Reflect onto -sign(x_0) e_1 to avoid cancellation in v_0
            let alpha = if R[[j, j]] > F::zero() { -norm } else { norm };
            let mut v = x.to_owned();
            v[0] -= alpha;
            let scale = F::cast(2.) / v.dot(&v);

            for c in j..n_cols {
                let mut col = R.slice_mut(s![j.., c]);
                let proj = v.dot(&col) * scale;
                col.scaled_add(-proj, &v);
            }
            let mut tail = qtb.slice_mut(s![j..]);
            let proj = v.dot(&tail) * scale;
            tail.scaled_add(-proj, &v);
        }

        (
            R.slice(s![..n_reflections, ..]).to_owned(),
            qtb.slice(s![..n_reflections]).to_owned(),
        )
    }

    /// Solves the upper triangular system `R x = b`. A zero pivot is reported
    /// as a rank deficiency of the corresponding column.
    pub fn backward_substitution<F: Float>(
        R: ArrayView2<F>,
        b: ArrayView1<F>,
    ) -> Result<Array1<F>, LinalgError> {
        let size = b.len();
        let mut x = Array1::<F>::zeros(size);
        for i in (0..size).rev() {
            if R[[i, i]] == F::zero() {
                return Err(LinalgError::RankDeficient { column: i });
            }
            let partial: F = ((i + 1)..size).map(|j| R[[i, j]] * x[j]).sum();
            x[i] = (b[i] - partial) / R[[i, i]];
        }
        Ok(x)
    }

    /// This function returns the vector `x` minimizing `||A x - b||^2` for a
    /// tall or square matrix `A`.
    ///
    /// Column `j` is declared linearly dependent when the part of it that is
    /// not explained by the preceding columns, `|R[j, j]|`, is at most
    /// `tolerance` times its own norm. The test is invariant to the scaling of
    /// individual columns, and a zero column is always dependent.
    ///
    /// The columns of `A` and `b` are equilibrated by their largest entry
    /// before factorizing, and the solution is scaled back afterwards.
    pub fn solve_least_squares<F: Float>(
        A: ArrayView2<F>,
        b: ArrayView1<F>,
        tolerance: F,
    ) -> Result<Array1<F>, LinalgError> {
        let (n_rows, n_cols) = A.dim();
        if b.len() != n_rows || n_rows < n_cols {
            return Err(LinalgError::DimensionMismatch {
                n_rows,
                n_cols,
                n_rhs: b.len(),
            });
        }

        let scales = column_scales(A);
        let b_scale = max_abs(b);
        let A = &A / &scales;
        let b = &b / b_scale;

        let norms = column_norms(A.view());
        let (R, qtb) = householder_qr(A.view(), b.view());

        for (j, &norm) in norms.iter().enumerate() {
            if norm == F::zero() || R[[j, j]].abs() <= tolerance * norm {
                return Err(LinalgError::RankDeficient { column: j });
            }
        }

        let x = backward_substitution(R.view(), qtb.view())?;
        Ok(x / &scales * b_scale)
    }
}

/// This module contains helpers functions to efficiently write tests.
pub mod test_helpers {
    use crate::Float;
    use approx::AbsDiffEq;
    use ndarray::{Array1, Array2, ArrayView1};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    pub fn assert_array_all_close<F>(x: ArrayView1<F>, y: ArrayView1<F>, delta: F)
    where
        F: Float + AbsDiffEq<Epsilon = F>,
    {
        assert_eq!(x.len(), y.len());
        for i in 0..x.len() {
            if x[i].abs_diff_ne(&y[i], delta) {
                panic!("x: {}, y: {} ; with precision level {}", x[i], y[i], delta);
            }
        }
    }

    pub fn fill_random_vector(capacity: usize, seed: u64) -> Vec<f64> {
        let mut r = StdRng::seed_from_u64(seed);
        let normal = Normal::new(0., 1.).unwrap();

        let mut data_x: Vec<f64> = Vec::with_capacity(capacity);
        for _ in 0..data_x.capacity() {
            data_x.push(normal.sample(&mut r));
        }
        data_x
    }

    /// Draws a standard normal design matrix and targets following
    /// `y = 1 + X w + e` with `w = [1, 2, ..., n_features]` and standard
    /// normal noise.
    pub fn generate_random_data(n_samples: usize, n_features: usize) -> (Array2<f64>, Array1<f64>) {
        let (X, y) = generate_linear_data(n_samples, n_features, 1.);
        let noise = Array1::from_shape_vec(n_samples, fill_random_vector(n_samples, 7)).unwrap();
        (X, y + noise)
    }

    /// Noiseless version of [`generate_random_data`]: `y = intercept + X w`
    /// where `w = [1, 2, ..., n_features]`.
    pub fn generate_linear_data(
        n_samples: usize,
        n_features: usize,
        intercept: f64,
    ) -> (Array2<f64>, Array1<f64>) {
        let data_x = fill_random_vector(n_samples * n_features, 42);
        let X = Array2::from_shape_vec((n_samples, n_features), data_x).unwrap();
        let true_w = true_coefficients(n_features);
        let y = X.dot(&true_w) + intercept;
        (X, y)
    }

    pub fn true_coefficients(n_features: usize) -> Array1<f64> {
        Array1::from_iter((1..=n_features).map(|j| j as f64))
    }
}
