//! LU decomposition with partial pivoting.
//!
//! Decomposes a square matrix `A` into `PA = LU` where:
//! - `P` is a permutation matrix
//! - `L` is lower triangular with unit diagonal
//! - `U` is upper triangular
//!
//! Pivot rows are chosen by largest absolute value in the current column,
//! earliest row on ties.

use core::cmp::Ordering;

use log::{debug, trace};

use crate::config::Tolerance;
use crate::dtype::Numeric;
use crate::error::{CoreError, Result};
use crate::linalg::blas::iamax;
use crate::matrix::Matrix;

use super::triangular::{back_substitute, forward_substitute_unit};

/// Result of an LU decomposition with partial pivoting.
///
/// The three factors are plain matrices and satisfy `P * A == L * U` up to
/// rounding. The row permutation is also kept as an index vector so solves
/// can permute the right-hand side without a matrix product.
#[derive(Debug, Clone, PartialEq)]
pub struct LuDecomposition {
    /// Unit lower-triangular factor.
    pub l: Matrix<f64>,
    /// Upper-triangular factor.
    pub u: Matrix<f64>,
    /// Row permutation matrix.
    pub p: Matrix<f64>,
    /// `perm[k]` is the row of `A` that ended up in row `k`.
    perm: Vec<usize>,
    /// Sign of the permutation (+1 or -1), for determinant computation.
    sign: f64,
    /// Absolute pivot threshold the factorization was run with.
    threshold: f64,
}

impl LuDecomposition {
    /// Perform LU decomposition with the default [`Tolerance`].
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// # use linmat_core::linalg::LuDecomposition;
    /// let a = Matrix::from_vec(vec![4.0, 3.0, 6.0, 3.0], 2, 2).unwrap();
    /// let lu = LuDecomposition::decompose(&a).unwrap();
    /// assert_eq!(lu.p.as_slice(), &[0.0, 1.0, 1.0, 0.0]);
    /// assert!((lu.det() - (-6.0)).abs() < 1e-10);
    /// ```
    pub fn decompose<T: Numeric>(a: &Matrix<T>) -> Result<Self> {
        Self::decompose_with(a, &Tolerance::default())
    }

    /// Perform LU decomposition with an explicit [`Tolerance`].
    ///
    /// Every cell must coerce to a finite `f64`. A pivot whose magnitude is
    /// at or below `tol.pivot * max |a_ij|`, or that is NaN, makes the
    /// factorization fail with [`CoreError::SingularMatrix`]. The last diagonal entry of `U` is
    /// never divided by here; [`solve`](Self::solve) checks it.
    pub fn decompose_with<T: Numeric>(a: &Matrix<T>, tol: &Tolerance) -> Result<Self> {
        tol.validate()?;
        if !a.is_square() {
            return Err(CoreError::ShapeMismatch {
                expected: vec![a.nrow(), a.nrow()],
                got: a.shape().to_vec(),
            });
        }

        let mut m = a.try_to_f64()?;
        let n = m.nrow();
        let scale = m.as_slice().iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let threshold = tol.pivot * scale;
        debug!("LU: factoring {n}x{n} matrix, pivot threshold {threshold:e}");

        let mut p = Matrix::eye(n);
        let mut perm: Vec<usize> = (0..n).collect();
        let mut sign = 1.0;

        for k in 0..n.saturating_sub(1) {
            let data = m.as_slice();
            let pivot_row = k + iamax((k..n).map(|i| data[i * n + k])).unwrap_or(0);

            if pivot_row != k {
                m.swap_rows_in_place(k, pivot_row)?;
                p.swap_rows_in_place(k, pivot_row)?;
                perm.swap(k, pivot_row);
                sign = -sign;
                trace!("LU: step {k} swapped rows {k} and {pivot_row}");
            }

            let data = m.as_mut_slice();
            let pivot = data[k * n + k];
            if pivot.is_nan() || pivot.abs() <= threshold {
                debug!("LU: pivot {pivot:e} at row {k} is at or below threshold");
                return Err(CoreError::SingularMatrix { row: k, pivot });
            }

            // Eliminate below the pivot, storing the multipliers in place.
            for i in (k + 1)..n {
                let factor = data[i * n + k] / pivot;
                data[i * n + k] = factor;
                for j in (k + 1)..n {
                    let ukj = data[k * n + j];
                    data[i * n + j] -= factor * ukj;
                }
            }
        }

        let l = m.map_indexed(|(i, j), &v| match i.cmp(&j) {
            Ordering::Greater => v,
            Ordering::Equal => 1.0,
            Ordering::Less => 0.0,
        });
        let u = m.map_indexed(|(i, j), &v| if i <= j { v } else { 0.0 });

        Ok(Self {
            l,
            u,
            p,
            perm,
            sign,
            threshold,
        })
    }

    /// Dimension of the factored matrix.
    pub fn n(&self) -> usize {
        self.u.nrow()
    }

    /// The row permutation as an index vector: row `k` of `P A` is row
    /// `permutation()[k]` of `A`.
    pub fn permutation(&self) -> &[usize] {
        &self.perm
    }

    /// Compute the determinant from the LU factorization.
    ///
    /// `det(A) = sign * product(diag(U))`
    pub fn det(&self) -> f64 {
        let n = self.n();
        let data = self.u.as_slice();
        (0..n).fold(self.sign, |d, i| d * data[i * n + i])
    }

    /// Solve `A x = b` for an `n x 1` right-hand side.
    ///
    /// `b` is coerced strictly. A diagonal entry of `U` at or below the pivot
    /// threshold fails with [`CoreError::SingularMatrix`].
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// # use linmat_core::linalg::LuDecomposition;
    /// let a = Matrix::from_vec(vec![4.0, 3.0, 6.0, 3.0], 2, 2).unwrap();
    /// let b = Matrix::column_vector(vec![7, 9]);
    /// let x = LuDecomposition::decompose(&a).unwrap().solve(&b).unwrap();
    /// assert!((x.as_slice()[0] - 1.0).abs() < 1e-12);
    /// assert!((x.as_slice()[1] - 1.0).abs() < 1e-12);
    /// ```
    pub fn solve<U: Numeric>(&self, b: &Matrix<U>) -> Result<Matrix<f64>> {
        let n = self.n();
        if b.shape() != [n, 1] {
            return Err(CoreError::ShapeMismatch {
                expected: vec![n, 1],
                got: b.shape().to_vec(),
            });
        }
        let b = b.try_to_f64()?;
        let b = b.as_slice();

        // c = P b
        let mut x: Vec<f64> = self.perm.iter().map(|&pi| b[pi]).collect();
        forward_substitute_unit(&self.l, &mut x)?;
        back_substitute(&self.u, &mut x, self.threshold)?;
        Ok(Matrix::column_vector(x))
    }

    /// Compute the inverse matrix using the LU factorization.
    ///
    /// Solves `AX = I` column by column.
    pub fn inverse(&self) -> Result<Matrix<f64>> {
        let n = self.n();
        let mut columns = Vec::with_capacity(n * n);
        for col in 0..n {
            let e = Matrix::column_from_fn(n, |i| if i == col { 1.0 } else { 0.0 });
            columns.extend(self.solve(&e)?.into_vec());
        }
        // Row `col` of this buffer is column `col` of the inverse.
        Ok(Matrix::from_vec(columns, n, n)?.transpose())
    }
}
