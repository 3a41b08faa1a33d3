//! Numeric coercion and element-wise arithmetic.
//!
//! The checked methods ([`plus`](Matrix::plus), [`minus`](Matrix::minus),
//! ...) accept any [`Numeric`] element types and treat cells that cannot be
//! read as a number as `0.0`. The `std::ops` operators on `&Matrix<f64>` are
//! the strict, same-type variants and panic on a shape mismatch.

use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::dtype::Numeric;
use crate::error::{CoreError, Result};

use super::Matrix;

impl<T> Matrix<T> {
    /// Combine two equally shaped matrices cell by cell.
    pub fn zip_with<U, V, F>(&self, other: &Matrix<U>, f: F) -> Result<Matrix<V>>
    where
        F: FnMut(&T, &U) -> V,
    {
        Ok(Matrix {
            tensor: self.tensor.zip_map(&other.tensor, f)?,
        })
    }

    /// Coerce every cell with a caller-supplied conversion, using `default`
    /// where it yields `None`.
    pub fn to_f64_with<F>(&self, f: F, default: f64) -> Matrix<f64>
    where
        F: Fn(&T) -> Option<f64>,
    {
        self.map(|t| f(t).unwrap_or(default))
    }
}

impl<T: Numeric> Matrix<T> {
    // ------------------------------------------------------------------
    // Coercion
    // ------------------------------------------------------------------

    /// Lenient coercion: cells without a numeric value become `default`.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let m = Matrix::from_vec(vec![Some(1_i32), None], 1, 2).unwrap();
    /// assert_eq!(m.to_f64_or(0.0).as_slice(), &[1.0, 0.0]);
    /// ```
    pub fn to_f64_or(&self, default: f64) -> Matrix<f64> {
        self.map(|t| t.to_f64_or(default))
    }

    /// Strict coercion: fails with [`CoreError::CoercionFailure`] at the
    /// first (row-major) cell that has no finite numeric value. NaN and the
    /// infinities are rejected along with non-numeric cells.
    pub fn try_to_f64(&self) -> Result<Matrix<f64>> {
        let data = self
            .as_slice()
            .iter()
            .enumerate()
            .map(|(index, t)| {
                t.to_f64()
                    .filter(|v| v.is_finite())
                    .ok_or(CoreError::CoercionFailure { index })
            })
            .collect::<Result<Vec<f64>>>()?;
        Matrix::from_vec(data, self.nrow(), self.ncol())
    }

    // ------------------------------------------------------------------
    // Element-wise arithmetic
    // ------------------------------------------------------------------

    fn combine<U, F>(&self, other: &Matrix<U>, op: F) -> Result<Matrix<f64>>
    where
        U: Numeric,
        F: Fn(f64, f64) -> f64,
    {
        self.zip_with(other, |a, b| op(a.to_f64_or(0.0), b.to_f64_or(0.0)))
    }

    /// Element-wise sum.
    pub fn plus<U: Numeric>(&self, other: &Matrix<U>) -> Result<Matrix<f64>> {
        self.combine(other, |a, b| a + b)
    }

    /// Element-wise difference.
    pub fn minus<U: Numeric>(&self, other: &Matrix<U>) -> Result<Matrix<f64>> {
        self.combine(other, |a, b| a - b)
    }

    /// Element-wise (Hadamard) product.
    #[allow(clippy::should_implement_trait)]
    pub fn mul<U: Numeric>(&self, other: &Matrix<U>) -> Result<Matrix<f64>> {
        self.combine(other, |a, b| a * b)
    }

    /// Element-wise quotient. Division by zero follows IEEE 754.
    #[allow(clippy::should_implement_trait)]
    pub fn div<U: Numeric>(&self, other: &Matrix<U>) -> Result<Matrix<f64>> {
        self.combine(other, |a, b| a / b)
    }

    // ------------------------------------------------------------------
    // Reductions
    // ------------------------------------------------------------------

    /// Sum of all cells.
    pub fn sum(&self) -> f64 {
        self.as_slice().iter().map(|t| t.to_f64_or(0.0)).sum()
    }

    /// Product of all cells.
    pub fn product(&self) -> f64 {
        self.as_slice().iter().map(|t| t.to_f64_or(0.0)).product()
    }

    /// Each cell's share of the total: `cell / sum()`.
    pub fn ratio(&self) -> Matrix<f64> {
        let total = self.sum();
        self.map(|t| t.to_f64_or(0.0) / total)
    }
}

impl Matrix<f64> {
    /// Multiply every cell by `alpha`.
    #[must_use]
    pub fn scale(&self, alpha: f64) -> Self {
        self.map(|&v| v * alpha)
    }
}

// ======================================================================
// Operator overloads
// ======================================================================

macro_rules! impl_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<&Matrix<f64>> for &Matrix<f64> {
            type Output = Matrix<f64>;

            fn $method(self, rhs: &Matrix<f64>) -> Matrix<f64> {
                assert_eq!(
                    self.shape(),
                    rhs.shape(),
                    "shape mismatch in element-wise {}",
                    stringify!($method)
                );
                Matrix::from_fn(self.nrow(), self.ncol(), |i, j| {
                    let k = i * self.ncol() + j;
                    self.as_slice()[k] $op rhs.as_slice()[k]
                })
            }
        }

        impl $trait<f64> for &Matrix<f64> {
            type Output = Matrix<f64>;

            fn $method(self, rhs: f64) -> Matrix<f64> {
                self.map(|&v| v $op rhs)
            }
        }
    };
}

impl_binop!(Add, add, +);
impl_binop!(Sub, sub, -);
impl_binop!(Mul, mul, *);
impl_binop!(Div, div, /);

impl Neg for &Matrix<f64> {
    type Output = Matrix<f64>;

    fn neg(self) -> Matrix<f64> {
        self.map(|&v| -v)
    }
}

impl Neg for Matrix<f64> {
    type Output = Matrix<f64>;

    fn neg(self) -> Matrix<f64> {
        -&self
    }
}
