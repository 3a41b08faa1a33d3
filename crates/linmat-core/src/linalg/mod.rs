//! Linear algebra on [`Matrix`].
//!
//! All routines are implemented from scratch. The layers are:
//!
//! | Layer | Items | Complexity |
//! |-------|-------|------------|
//! | L1 kernels | `dot`, `axpy`, `nrm2`, `scal`, `normalize`, `iamax` | O(n) |
//! | Decompositions | [`LuDecomposition`], [`QrDecomposition`] | O(n^3) |
//! | Facade | [`Matrices`] | |
//!
//! The free functions below take any [`Numeric`] element type and coerce it
//! strictly; a cell without a numeric value is a
//! [`CoercionFailure`](crate::CoreError::CoercionFailure).

pub mod blas;
pub mod decomp;
mod matrices;

pub use blas::{axpy, dot, iamax, normalize, nrm2, scal};
pub use decomp::LuDecomposition;
pub use decomp::QrDecomposition;
pub use decomp::lstsq;
pub use matrices::Matrices;

use crate::config::Tolerance;
use crate::dtype::Numeric;
use crate::error::{CoreError, Result};
use crate::matrix::Matrix;

/// `PA = LU` with the default [`Tolerance`].
///
/// ```
/// # use linmat_core::{linalg, Matrix};
/// let a = Matrix::from_vec(vec![4.0, 3.0, 6.0, 3.0], 2, 2).unwrap();
/// let f = linalg::lu(&a).unwrap();
/// assert_eq!(f.p.as_slice(), &[0.0, 1.0, 1.0, 0.0]);
/// assert_eq!(f.u.row(0).unwrap(), vec![6.0, 3.0]);
/// ```
pub fn lu<T: Numeric>(a: &Matrix<T>) -> Result<LuDecomposition> {
    LuDecomposition::decompose(a)
}

/// `PA = LU` with an explicit [`Tolerance`].
pub fn lu_with<T: Numeric>(a: &Matrix<T>, tol: &Tolerance) -> Result<LuDecomposition> {
    LuDecomposition::decompose_with(a, tol)
}

/// Solve the linear system `Ax = b` for a square matrix `A` and an `n x 1`
/// right-hand side.
///
/// Uses LU decomposition with partial pivoting internally.
///
/// ```
/// # use linmat_core::{linalg, Matrix};
/// let a = Matrix::from_vec(vec![2.0, 1.0, 1.0, 4.0], 2, 2).unwrap();
/// let b = Matrix::column_vector(vec![5.0, 6.0]);
/// let x = linalg::solve(&a, &b).unwrap();
/// assert!((x.as_slice()[0] - 2.0).abs() < 1e-10);
/// assert!((x.as_slice()[1] - 1.0).abs() < 1e-10);
/// ```
pub fn solve<T: Numeric, U: Numeric>(a: &Matrix<T>, b: &Matrix<U>) -> Result<Matrix<f64>> {
    LuDecomposition::decompose(a)?.solve(b)
}

/// [`solve`] with an explicit [`Tolerance`].
pub fn solve_with<T: Numeric, U: Numeric>(
    a: &Matrix<T>,
    b: &Matrix<U>,
    tol: &Tolerance,
) -> Result<Matrix<f64>> {
    LuDecomposition::decompose_with(a, tol)?.solve(b)
}

/// Thin `A = QR` with the default [`Tolerance`].
pub fn qr<T: Numeric>(a: &Matrix<T>) -> Result<QrDecomposition> {
    QrDecomposition::decompose(a)
}

/// Thin `A = QR` with an explicit [`Tolerance`].
pub fn qr_with<T: Numeric>(a: &Matrix<T>, tol: &Tolerance) -> Result<QrDecomposition> {
    QrDecomposition::decompose_with(a, tol)
}

/// Compute the inverse of a square matrix.
///
/// Returns [`CoreError::SingularMatrix`](crate::CoreError::SingularMatrix) if the
/// matrix is singular.
///
/// ```
/// # use linmat_core::{linalg, Matrix};
/// let a = Matrix::from_vec(vec![2.0, 1.0, 1.0, 4.0], 2, 2).unwrap();
/// let inv = linalg::inv(&a).unwrap();
/// // A * A^-1 ≈ I
/// let eye = a.mmult(&inv).unwrap();
/// assert!((eye.as_slice()[0] - 1.0).abs() < 1e-10);
/// ```
pub fn inv<T: Numeric>(a: &Matrix<T>) -> Result<Matrix<f64>> {
    LuDecomposition::decompose(a)?.inverse()
}

/// Compute the determinant of a square matrix.
///
/// A matrix the factorization rejects as singular has determinant `0.0`;
/// shape and coercion errors are still returned.
///
/// ```
/// # use linmat_core::{linalg, Matrix};
/// let a = Matrix::from_vec(vec![2, 1, 1, 4], 2, 2).unwrap();
/// let det = linalg::det(&a).unwrap();
/// assert!((det - 7.0).abs() < 1e-10);
/// ```
pub fn det<T: Numeric>(a: &Matrix<T>) -> Result<f64> {
    match LuDecomposition::decompose(a) {
        Ok(lu) => Ok(lu.det()),
        Err(CoreError::SingularMatrix { .. }) => Ok(0.0),
        Err(e) => Err(e),
    }
}

/// The `n x n` identity matrix.
pub fn eye(n: usize) -> Matrix<f64> {
    Matrix::eye(n)
}

/// A square matrix with `values` on the diagonal and zero elsewhere.
pub fn diag<T: Clone + Default>(values: &[T]) -> Matrix<T> {
    Matrix::diag(values)
}
