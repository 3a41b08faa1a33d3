//! BLAS Level 1 kernels on `f64` slices.
//!
//! These are the inner loops of the factorizations. They work on plain
//! slices so callers can hand in a row of a [`Matrix`](crate::Matrix) or a
//! scratch buffer without copying.

use crate::error::{CoreError, Result};
use crate::matrix::{Sum, dot_with};

// ======================================================================
// BLAS Level 1: vector operations, O(n)
// ======================================================================

/// Inner (dot) product: `sum(x_i * y_i)`.
///
/// ```
/// # use linmat_core::linalg::dot;
/// let d = dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
/// assert!((d - 32.0).abs() < 1e-10);
/// ```
pub fn dot(x: &[f64], y: &[f64]) -> Result<f64> {
    dot_with(x, y, |a, b| a * b, &Sum)
}

/// `y = alpha * x + y` (in-place update of `y`).
///
/// ```
/// # use linmat_core::linalg::axpy;
/// let mut y = vec![10.0, 20.0, 30.0];
/// axpy(2.0, &[1.0, 2.0, 3.0], &mut y).unwrap();
/// assert_eq!(y, vec![12.0, 24.0, 36.0]);
/// ```
pub fn axpy(alpha: f64, x: &[f64], y: &mut [f64]) -> Result<()> {
    check_lengths(x, y)?;
    for (yi, &xi) in y.iter_mut().zip(x) {
        *yi += alpha * xi;
    }
    Ok(())
}

/// Euclidean norm: `sqrt(sum(x_i^2))`.
///
/// ```
/// # use linmat_core::linalg::nrm2;
/// assert!((nrm2(&[3.0, 4.0]) - 5.0).abs() < 1e-10);
/// ```
pub fn nrm2(x: &[f64]) -> f64 {
    x.iter().fold(0.0, |acc, &v| acc + v * v).sqrt()
}

/// Scale in place: `x = alpha * x`.
pub fn scal(alpha: f64, x: &mut [f64]) {
    for v in x {
        *v *= alpha;
    }
}

/// Scale `x` to unit length in place and return its original norm.
///
/// A zero vector is left untouched.
///
/// ```
/// # use linmat_core::linalg::blas::normalize;
/// let mut x = vec![3.0, 4.0];
/// assert_eq!(normalize(&mut x), 5.0);
/// assert!((x[0] - 0.6).abs() < 1e-15 && (x[1] - 0.8).abs() < 1e-15);
/// ```
pub fn normalize(x: &mut [f64]) -> f64 {
    let norm = nrm2(x);
    if norm > 0.0 {
        scal(norm.recip(), x);
    }
    norm
}

/// Index of the element with the largest absolute value.
///
/// Ties go to the earliest index. Returns `None` for an empty input.
///
/// ```
/// # use linmat_core::linalg::iamax;
/// assert_eq!(iamax([1.0, -5.0, 3.0, 5.0]), Some(1));
/// assert_eq!(iamax(Vec::<f64>::new()), None);
/// ```
pub fn iamax<I>(x: I) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut values = x.into_iter();
    let mut max_val = values.next()?.abs();
    let mut max_idx = 0;
    for (i, v) in values.enumerate() {
        let av = v.abs();
        if av > max_val {
            max_val = av;
            max_idx = i + 1;
        }
    }
    Some(max_idx)
}

fn check_lengths(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(CoreError::ShapeMismatch {
            expected: vec![x.len()],
            got: vec![y.len()],
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_dot() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap(), 32.0);
        assert_eq!(dot(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_dot_length_mismatch() {
        assert!(matches!(
            dot(&[1.0, 2.0], &[1.0]),
            Err(CoreError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_axpy() {
        let mut y = vec![1.0, 1.0];
        axpy(-3.0, &[2.0, 4.0], &mut y).unwrap();
        assert_eq!(y, vec![-5.0, -11.0]);
        assert!(axpy(1.0, &[1.0], &mut y).is_err());
    }

    #[test]
    fn test_nrm2_and_scal() {
        let mut x = vec![3.0, 4.0];
        assert_eq!(nrm2(&x), 5.0);
        scal(0.2, &mut x);
        assert!((nrm2(&x) - 1.0).abs() < 1e-15);
        assert_eq!(nrm2(&[]), 0.0);
    }

    #[test]
    fn test_normalize() {
        let mut x = vec![0.0, -2.0];
        assert_eq!(normalize(&mut x), 2.0);
        assert_eq!(x, vec![0.0, -1.0]);

        let mut zero = vec![0.0, 0.0];
        assert_eq!(normalize(&mut zero), 0.0);
        assert_eq!(zero, vec![0.0, 0.0]);
    }

    #[test]
    fn test_iamax_first_wins_ties() {
        assert_eq!(iamax([2.0, -2.0, 1.0]), Some(0));
        assert_eq!(iamax([0.0, -3.0, 3.0]), Some(1));
        assert_eq!(iamax([7.0]), Some(0));
    }
}
