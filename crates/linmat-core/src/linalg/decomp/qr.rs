//! QR decomposition via Gram-Schmidt orthogonalization.
//!
//! Decomposes a matrix `A` (m x n, m >= n) with linearly independent
//! columns into `A = QR` where:
//! - `Q` is m x n with orthonormal columns, so `Q^T Q = I`
//! - `R` is n x n upper triangular with a positive diagonal

use log::{debug, trace};

use crate::config::Tolerance;
use crate::dtype::Numeric;
use crate::error::{CoreError, Result};
use crate::linalg::blas::{axpy, dot, normalize, nrm2};
use crate::matrix::Matrix;

use super::triangular::back_substitute;

/// Result of a thin QR decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct QrDecomposition {
    /// Orthonormal columns (m x n).
    pub q: Matrix<f64>,
    /// Upper-triangular factor (n x n).
    pub r: Matrix<f64>,
}

#[allow(clippy::many_single_char_names)]
impl QrDecomposition {
    /// Perform QR decomposition with the default [`Tolerance`].
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// # use linmat_core::linalg::QrDecomposition;
    /// let a = Matrix::from_vec(vec![1.0, 1.0, 1.0, 0.0, 0.0, 1.0], 3, 2).unwrap();
    /// let qr = QrDecomposition::decompose(&a).unwrap();
    /// // Verify Q has orthonormal columns: Q^T Q ≈ I
    /// let qtq = qr.q.transpose().mmult(&qr.q).unwrap();
    /// for (a, b) in qtq.as_slice().iter().zip(Matrix::eye(2).as_slice()) {
    ///     assert!((a - b).abs() < 1e-10);
    /// }
    /// ```
    pub fn decompose<T: Numeric>(a: &Matrix<T>) -> Result<Self> {
        Self::decompose_with(a, &Tolerance::default())
    }

    /// Perform QR decomposition with an explicit [`Tolerance`].
    ///
    /// Column `i` of `A` is projected onto every earlier `q_j`
    /// (`r[j][i] = <a_i, q_j>`), the projections are removed, and the
    /// residual is normalized into `q_i`. A residual whose norm is at or
    /// below `tol.rank * ||a_i||`, or is NaN, fails with
    /// [`CoreError::RankDeficient`]. Cells must coerce to finite values.
    pub fn decompose_with<T: Numeric>(a: &Matrix<T>, tol: &Tolerance) -> Result<Self> {
        tol.validate()?;
        let (m, n) = (a.nrow(), a.ncol());
        if m < n {
            return Err(CoreError::InvalidShape {
                shape: vec![m, n],
                reason: "QR decomposition requires nrow >= ncol",
            });
        }
        debug!("QR: orthogonalizing {n} columns of length {m}");

        // Rows of A^T are the columns of A; rows of `qt` become the columns of Q.
        let at = a.try_to_f64()?.transpose();
        let mut qt = vec![0.0; n * m];
        let mut r = vec![0.0; n * n];

        for (i, a_i) in at.rows().enumerate() {
            let (done, rest) = qt.split_at_mut(i * m);
            let q_i = &mut rest[..m];

            for (j, q_j) in done.chunks(m).enumerate() {
                r[j * n + i] = dot(a_i, q_j)?;
            }
            q_i.copy_from_slice(a_i);
            for (j, q_j) in done.chunks(m).enumerate() {
                axpy(-r[j * n + i], q_j, q_i)?;
            }

            let norm = normalize(q_i);
            let threshold = tol.rank * nrm2(a_i);
            trace!("QR: column {i} residual norm {norm:e}");
            if norm.is_nan() || norm <= threshold {
                debug!("QR: column {i} is linearly dependent (norm {norm:e})");
                return Err(CoreError::RankDeficient { column: i, norm });
            }
            r[i * n + i] = norm;
        }

        Ok(Self {
            q: Matrix::from_vec(qt, n, m)?.transpose(),
            r: Matrix::from_vec(r, n, n)?,
        })
    }

    /// Solve the least-squares problem `min ||Ax - b||_2` for an `m x 1`
    /// right-hand side.
    ///
    /// For square `A` this is the exact solution of `Ax = b`.
    pub fn solve<U: Numeric>(&self, b: &Matrix<U>) -> Result<Matrix<f64>> {
        let (m, n) = (self.q.nrow(), self.q.ncol());
        if b.shape() != [m, 1] {
            return Err(CoreError::ShapeMismatch {
                expected: vec![m, 1],
                got: b.shape().to_vec(),
            });
        }
        let b = b.try_to_f64()?;

        // x = R^-1 Q^T b
        let mut x = self
            .q
            .transpose()
            .rows()
            .map(|q_j| dot(q_j, b.as_slice()))
            .collect::<Result<Vec<f64>>>()?;
        debug_assert_eq!(x.len(), n);
        back_substitute(&self.r, &mut x, 0.0)?;
        Ok(Matrix::column_vector(x))
    }
}

/// Solve the least-squares problem `min ||Ax - b||_2` via QR decomposition.
///
/// `a` must be m x n with `m >= n` and full column rank; `b` must be m x 1.
///
/// ```
/// # use linmat_core::Matrix;
/// # use linmat_core::linalg::lstsq;
/// // fit y = c0 + c1 * x through (1, 6), (2, 5), (3, 7)
/// let a = Matrix::from_vec(vec![1.0, 1.0, 1.0, 2.0, 1.0, 3.0], 3, 2).unwrap();
/// let b = Matrix::column_vector(vec![6.0, 5.0, 7.0]);
/// let x = lstsq(&a, &b).unwrap();
/// assert!((x.as_slice()[0] - 5.0).abs() < 1e-10);
/// assert!((x.as_slice()[1] - 0.5).abs() < 1e-10);
/// ```
pub fn lstsq<T: Numeric, U: Numeric>(a: &Matrix<T>, b: &Matrix<U>) -> Result<Matrix<f64>> {
    QrDecomposition::decompose(a)?.solve(b)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn approx_eq(a: &[f64], b: &[f64], tol: f64) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| (x - y).abs() < tol)
    }

    fn assert_orthonormal(q: &Matrix<f64>, tol: f64) {
        let qtq = q.transpose().mmult(q).unwrap();
        assert!(approx_eq(qtq.as_slice(), Matrix::eye(q.ncol()).as_slice(), tol));
    }

    #[test]
    fn test_qr_3x2() {
        // A = [[1, 1], [1, 0], [0, 1]]
        // q0 = [1, 1, 0] / sqrt(2), r00 = sqrt(2), r01 = 1 / sqrt(2)
        // residual of a1 = [1/2, -1/2, 1], norm sqrt(3/2)
        let a = Matrix::from_vec(vec![1.0, 1.0, 1.0, 0.0, 0.0, 1.0], 3, 2).unwrap();
        let qr = QrDecomposition::decompose(&a).unwrap();
        assert_eq!(qr.q.shape(), [3, 2]);
        assert_eq!(qr.r.shape(), [2, 2]);

        let s2 = 2.0_f64.sqrt();
        let s32 = 1.5_f64.sqrt();
        assert!(approx_eq(
            qr.r.as_slice(),
            &[s2, 1.0 / s2, 0.0, s32],
            1e-12
        ));
        assert!(approx_eq(
            qr.q.as_slice(),
            &[1.0 / s2, 0.5 / s32, 1.0 / s2, -0.5 / s32, 0.0, 1.0 / s32],
            1e-12
        ));
        assert_orthonormal(&qr.q, 1e-12);
        let prod = qr.q.mmult(&qr.r).unwrap();
        assert!(approx_eq(prod.as_slice(), a.as_slice(), 1e-12));
    }

    #[test]
    fn test_qr_3x3() {
        let a = Matrix::from_vec(
            vec![12.0, -51.0, 4.0, 6.0, 167.0, -68.0, -4.0, 24.0, -41.0],
            3,
            3,
        )
        .unwrap();
        let qr = QrDecomposition::decompose(&a).unwrap();
        assert_orthonormal(&qr.q, 1e-10);
        let prod = qr.q.mmult(&qr.r).unwrap();
        assert!(approx_eq(prod.as_slice(), a.as_slice(), 1e-10));
        // >>> np.linalg.qr(A) gives |diag(R)| = [14, 175, 35]
        assert!(approx_eq(
            &[
                *qr.r.cell(0, 0).unwrap(),
                *qr.r.cell(1, 1).unwrap(),
                *qr.r.cell(2, 2).unwrap()
            ],
            &[14.0, 175.0, 35.0],
            1e-9
        ));
    }

    #[test]
    fn test_r_is_upper_triangular_with_positive_diagonal() {
        let a = Matrix::from_vec(
            vec![1.0, 1.0, 1.0, 1.0, 2.0, 4.0, 1.0, 3.0, 9.0, 1.0, 4.0, 16.0],
            4,
            3,
        )
        .unwrap();
        let qr = QrDecomposition::decompose(&a).unwrap();
        for ((i, j), &v) in qr.r.entries() {
            if i > j {
                assert_eq!(v, 0.0);
            } else if i == j {
                assert!(v > 0.0);
            }
        }
    }

    #[test]
    fn test_qr_identity() {
        let qr = QrDecomposition::decompose(&Matrix::eye(3)).unwrap();
        assert!(approx_eq(qr.q.as_slice(), Matrix::eye(3).as_slice(), 1e-14));
        assert!(approx_eq(qr.r.as_slice(), Matrix::eye(3).as_slice(), 1e-14));
    }

    #[test]
    fn test_qr_rank_deficient() {
        // Second column is twice the first
        let a = Matrix::from_vec(vec![1.0, 2.0, 2.0, 4.0, 3.0, 6.0], 3, 2).unwrap();
        assert!(matches!(
            QrDecomposition::decompose(&a),
            Err(CoreError::RankDeficient { column: 1, .. })
        ));
    }

    #[test]
    fn test_qr_zero_column() {
        let a = Matrix::from_vec(vec![0.0, 1.0, 0.0, 1.0], 2, 2).unwrap();
        assert!(matches!(
            QrDecomposition::decompose(&a),
            Err(CoreError::RankDeficient { column: 0, .. })
        ));
    }

    #[test]
    fn test_qr_small_magnitude_columns() {
        let a = Matrix::from_vec(vec![1e-15, 1e-15, 1e-15, 0.0, 0.0, 1e-15], 3, 2).unwrap();
        let qr = QrDecomposition::decompose(&a).unwrap();
        assert_orthonormal(&qr.q, 1e-12);
        let prod = qr.q.mmult(&qr.r).unwrap();
        assert!(approx_eq(prod.as_slice(), a.as_slice(), 1e-27));
    }

    #[test]
    fn test_qr_non_finite_input() {
        let nan = Matrix::from_vec(vec![f64::NAN, 1.0, 1.0, 0.0, 0.0, 1.0], 3, 2).unwrap();
        assert_eq!(
            QrDecomposition::decompose(&nan),
            Err(CoreError::CoercionFailure { index: 0 })
        );
        let inf = Matrix::from_vec(vec![1.0, 1.0, 1.0, f64::INFINITY, 0.0, 1.0], 3, 2).unwrap();
        assert_eq!(
            QrDecomposition::decompose(&inf),
            Err(CoreError::CoercionFailure { index: 3 })
        );

        let qr = QrDecomposition::decompose(&Matrix::eye(2)).unwrap();
        let b = Matrix::column_vector(vec!["1", "NaN"]);
        assert_eq!(qr.solve(&b), Err(CoreError::CoercionFailure { index: 1 }));
    }

    #[test]
    fn test_qr_wide_matrix() {
        // m < n should fail
        let a = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
        assert!(matches!(
            QrDecomposition::decompose(&a),
            Err(CoreError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_qr_solve_square() {
        // >>> np.linalg.solve([[1,2,3],[4,5,6],[7,8,10]], [1,2,3])
        // array([-0.33333333,  0.66666667,  0.        ])
        let a = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0], 3, 3)
            .unwrap();
        let b = Matrix::column_vector(vec![1.0, 2.0, 3.0]);
        let x = QrDecomposition::decompose(&a).unwrap().solve(&b).unwrap();
        assert!(approx_eq(x.as_slice(), &[-1.0 / 3.0, 2.0 / 3.0, 0.0], 1e-10));
    }

    #[test]
    fn test_lstsq_overdetermined() {
        // Overdetermined system: fit y = a + b*x to points (1,6), (2,5), (3,7)
        // Normal equations: A^T A = [[3,6],[6,14]], A^T b = [18,37]
        // Solution: x = [5.0, 0.5]
        let a = Matrix::from_vec(vec![1.0, 1.0, 1.0, 2.0, 1.0, 3.0], 3, 2).unwrap();
        let b = Matrix::column_vector(vec![6, 5, 7]);
        let x = lstsq(&a, &b).unwrap();
        assert_eq!(x.shape(), [2, 1]);
        assert!(approx_eq(x.as_slice(), &[5.0, 0.5], 1e-10));
    }

    #[test]
    fn test_lstsq_4x3_numpy() {
        // >>> A = np.array([[1,1,1],[1,2,4],[1,3,9],[1,4,16]], dtype=float)
        // >>> b = np.array([2,3,5,8], dtype=float)
        // Normal equations solution: x = [2.0, -0.5, 0.5]
        let a = Matrix::from_vec(
            vec![1.0, 1.0, 1.0, 1.0, 2.0, 4.0, 1.0, 3.0, 9.0, 1.0, 4.0, 16.0],
            4,
            3,
        )
        .unwrap();
        let b = Matrix::column_vector(vec![2.0, 3.0, 5.0, 8.0]);
        let x = lstsq(&a, &b).unwrap();
        assert!(approx_eq(x.as_slice(), &[2.0, -0.5, 0.5], 1e-9));
    }

    #[test]
    fn test_qr_solve_shape_mismatch() {
        let qr = QrDecomposition::decompose(&Matrix::eye(2)).unwrap();
        let b = Matrix::column_vector(vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            qr.solve(&b),
            Err(CoreError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_qr_empty_columns() {
        let a = Matrix::<f64>::zeros(3, 0);
        let qr = QrDecomposition::decompose(&a).unwrap();
        assert_eq!(qr.q.shape(), [3, 0]);
        assert_eq!(qr.r.shape(), [0, 0]);
    }
}
