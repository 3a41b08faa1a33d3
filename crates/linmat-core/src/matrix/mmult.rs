//! Generalized inner products and matrix multiplication.
//!
//! Ordinary multiplication is the special case `combine = *`, `reduce = +`.
//! Swapping either operation gives path-algebra products (min-plus,
//! max-times, ...) or collects the raw pairwise terms for inspection.
//!
//! ```
//! # use linmat_core::Matrix;
//! # use linmat_core::matrix::Fold;
//! // min-plus product: shortest two-hop distances
//! let d = Matrix::from_vec(vec![0.0, 4.0, 1.0, 0.0], 2, 2).unwrap();
//! let min = Fold { init: f64::INFINITY, f: f64::min };
//! let two_hop = d.mmult_with(&d, |a, b| a + b, &min).unwrap();
//! assert_eq!(two_hop.as_slice(), &[0.0, 4.0, 1.0, 0.0]);
//! ```

use crate::dtype::Numeric;
use crate::error::{CoreError, Result};

use super::Matrix;

// ======================================================================
// Reduction strategies
// ======================================================================

/// Folds the pairwise terms of one inner product into a single value.
pub trait Reduce<X> {
    type Output;

    fn reduce<I>(&self, items: I) -> Self::Output
    where
        I: Iterator<Item = X>;
}

/// Additive reduction.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum;

impl<X: core::iter::Sum<X>> Reduce<X> for Sum {
    type Output = X;

    fn reduce<I>(&self, items: I) -> X
    where
        I: Iterator<Item = X>,
    {
        items.sum()
    }
}

/// Multiplicative reduction.
#[derive(Debug, Clone, Copy, Default)]
pub struct Product;

impl<X: core::iter::Product<X>> Reduce<X> for Product {
    type Output = X;

    fn reduce<I>(&self, items: I) -> X
    where
        I: Iterator<Item = X>,
    {
        items.product()
    }
}

/// Keeps every term, in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Collect;

impl<X> Reduce<X> for Collect {
    type Output = Vec<X>;

    fn reduce<I>(&self, items: I) -> Vec<X>
    where
        I: Iterator<Item = X>,
    {
        items.collect()
    }
}

/// Left fold from `init` with `f`.
#[derive(Debug, Clone, Copy)]
pub struct Fold<A, F> {
    pub init: A,
    pub f: F,
}

impl<X, A, F> Reduce<X> for Fold<A, F>
where
    A: Clone,
    F: Fn(A, X) -> A,
{
    type Output = A;

    fn reduce<I>(&self, items: I) -> A
    where
        I: Iterator<Item = X>,
    {
        items.fold(self.init.clone(), &self.f)
    }
}

/// Adapts a function over the whole term list.
#[derive(Debug, Clone, Copy)]
pub struct ReduceFn<F>(pub F);

impl<X, Y, F> Reduce<X> for ReduceFn<F>
where
    F: Fn(Vec<X>) -> Y,
{
    type Output = Y;

    fn reduce<I>(&self, items: I) -> Y
    where
        I: Iterator<Item = X>,
    {
        (self.0)(items.collect())
    }
}

// ======================================================================
// Inner products
// ======================================================================

/// Generalized dot product of two equally long sequences.
///
/// ```
/// # use linmat_core::matrix::{dot_with, Sum};
/// let d = dot_with(&[1, 2, 3], &[4, 5, 6], |a, b| a * b, &Sum).unwrap();
/// assert_eq!(d, 32);
/// ```
pub fn dot_with<T, U, X, F, R>(xs: &[T], ys: &[U], combine: F, reduce: &R) -> Result<R::Output>
where
    F: Fn(&T, &U) -> X,
    R: Reduce<X>,
{
    if xs.len() != ys.len() {
        return Err(CoreError::ShapeMismatch {
            expected: vec![xs.len()],
            got: vec![ys.len()],
        });
    }
    Ok(reduce.reduce(xs.iter().zip(ys).map(|(x, y)| combine(x, y))))
}

impl<T> Matrix<T> {
    /// Generalized matrix product: cell `(i, k)` of the result is `reduce`
    /// applied to `combine(self[i][p], other[p][k])` for `p = 0..ncol`.
    pub fn mmult_with<U, X, F, R>(
        &self,
        other: &Matrix<U>,
        combine: F,
        reduce: &R,
    ) -> Result<Matrix<R::Output>>
    where
        F: Fn(&T, &U) -> X,
        R: Reduce<X>,
    {
        let (nrow, depth) = (self.nrow(), self.ncol());
        if other.nrow() != depth {
            return Err(CoreError::ShapeMismatch {
                expected: vec![depth, other.ncol()],
                got: other.shape().to_vec(),
            });
        }
        let ncol = other.ncol();
        let (a, b) = (self.as_slice(), other.as_slice());

        let data = (0..nrow * ncol)
            .map(|cell| {
                let (i, k) = (cell / ncol, cell % ncol);
                reduce.reduce((0..depth).map(|p| combine(&a[i * depth + p], &b[p * ncol + k])))
            })
            .collect();
        Matrix::from_vec(data, nrow, ncol)
    }

    /// Generalized dot product over all cells of two equally shaped
    /// matrices, in row-major order.
    pub fn dot_with<U, X, F, R>(&self, other: &Matrix<U>, combine: F, reduce: &R) -> Result<R::Output>
    where
        F: Fn(&T, &U) -> X,
        R: Reduce<X>,
    {
        if self.shape() != other.shape() {
            return Err(CoreError::ShapeMismatch {
                expected: self.shape().to_vec(),
                got: other.shape().to_vec(),
            });
        }
        dot_with(self.as_slice(), other.as_slice(), combine, reduce)
    }
}

impl<T: Numeric> Matrix<T> {
    /// Numeric matrix product. Cells without a numeric value count as zero.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let a = Matrix::from_vec(vec![1, 2, 3, 4], 2, 2).unwrap();
    /// let b = Matrix::from_vec(vec![5.0, 6.0, 7.0, 8.0], 2, 2).unwrap();
    /// let c = a.mmult(&b).unwrap();
    /// assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    /// ```
    pub fn mmult<U: Numeric>(&self, other: &Matrix<U>) -> Result<Matrix<f64>> {
        self.mmult_with(other, |a, b| a.to_f64_or(0.0) * b.to_f64_or(0.0), &Sum)
    }

    /// Numeric dot product of two equally shaped matrices.
    pub fn dot<U: Numeric>(&self, other: &Matrix<U>) -> Result<f64> {
        self.dot_with(other, |a, b| a.to_f64_or(0.0) * b.to_f64_or(0.0), &Sum)
    }
}
