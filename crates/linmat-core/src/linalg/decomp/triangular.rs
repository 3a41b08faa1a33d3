//! Forward and back substitution shared by the LU and QR solvers.

use crate::error::{CoreError, Result};
use crate::linalg::blas::dot;
use crate::matrix::Matrix;

/// Solve `L y = x` in place for unit lower-triangular `L`.
pub(crate) fn forward_substitute_unit(l: &Matrix<f64>, x: &mut [f64]) -> Result<()> {
    let n = l.ncol();
    let data = l.as_slice();
    for i in 1..n {
        let s = dot(&data[i * n..i * n + i], &x[..i])?;
        x[i] -= s;
    }
    Ok(())
}

/// Solve `U y = x` in place for upper-triangular `U`.
///
/// Fails with [`CoreError::SingularMatrix`] on the first diagonal entry (from
/// the bottom) that is NaN or whose magnitude is at or below `threshold`.
pub(crate) fn back_substitute(u: &Matrix<f64>, x: &mut [f64], threshold: f64) -> Result<()> {
    let n = u.ncol();
    let data = u.as_slice();
    for i in (0..n).rev() {
        let d = data[i * n + i];
        if d.is_nan() || d.abs() <= threshold {
            return Err(CoreError::SingularMatrix { row: i, pivot: d });
        }
        let s = dot(&data[i * n + i + 1..(i + 1) * n], &x[i + 1..])?;
        x[i] = (x[i] - s) / d;
    }
    Ok(())
}
