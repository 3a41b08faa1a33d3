//! Standard matrix builders: zeros, identity, diagonal and elementary.

use crate::error::{CoreError, Result};
use crate::tensor::Tensor;

use super::Matrix;

impl<T: Clone> Matrix<T> {
    /// An `nrow x ncol` matrix with every cell set to `value`.
    pub fn filled(nrow: usize, ncol: usize, value: T) -> Self {
        Self {
            tensor: Tensor::from_vec_unchecked(vec![value; nrow * ncol], vec![nrow, ncol]),
        }
    }

    /// A square matrix with `values` on the diagonal and `fill` elsewhere.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let m = Matrix::diag_with(&["a", "b"], "-");
    /// assert_eq!(m.as_slice(), &["a", "-", "-", "b"]);
    /// ```
    pub fn diag_with(values: &[T], fill: T) -> Self {
        let n = values.len();
        Self::from_fn(n, n, |i, j| {
            if i == j {
                values[i].clone()
            } else {
                fill.clone()
            }
        })
    }
}

impl<T: Clone + Default> Matrix<T> {
    /// A square matrix with `values` on the diagonal and `T::default()`
    /// everywhere else.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let m = Matrix::diag(&[1.0, 2.0, 3.0]);
    /// assert_eq!(m.shape(), [3, 3]);
    /// assert_eq!(*m.cell(2, 2).unwrap(), 3.0);
    /// assert_eq!(*m.cell(0, 1).unwrap(), 0.0);
    /// ```
    pub fn diag(values: &[T]) -> Self {
        Self::diag_with(values, T::default())
    }
}

impl Matrix<f64> {
    /// An `nrow x ncol` matrix of zeros.
    pub fn zeros(nrow: usize, ncol: usize) -> Self {
        Self::filled(nrow, ncol, 0.0)
    }

    /// The `n x n` identity matrix.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let i = Matrix::eye(2);
    /// assert_eq!(i.as_slice(), &[1.0, 0.0, 0.0, 1.0]);
    /// ```
    pub fn eye(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { 1.0 } else { 0.0 })
    }

    /// The elementary matrix `I + value * e_i e_j^T`.
    ///
    /// Left-multiplying by it adds `value` times row `j` to row `i`.
    pub fn elementary(n: usize, i: usize, j: usize, value: f64) -> Result<Self> {
        if i >= n || j >= n {
            return Err(CoreError::IndexOutOfRange {
                index: vec![i, j],
                shape: vec![n, n],
            });
        }
        if i == j {
            return Err(CoreError::InvalidArgument {
                reason: "elementary matrix requires distinct row and column",
            });
        }
        let mut m = Self::eye(n);
        m.set_cell(i, j, value)?;
        Ok(m)
    }
}

impl Matrix<usize> {
    /// The column vector `[0, 1, ..., n - 1]^T`.
    pub fn arange_column(n: usize) -> Self {
        Self::column_from_fn(n, |i| i)
    }
}
