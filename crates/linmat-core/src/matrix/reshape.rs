//! Transpose, reshape, row/column swaps and stacking.

use crate::error::{CoreError, Result};
use crate::tensor::Tensor;

use super::Matrix;

impl<T> Matrix<T> {
    /// Swap rows `i` and `j` in place.
    ///
    /// Both indices are checked before anything moves. Swapping a row with
    /// itself is a no-op.
    pub fn swap_rows_in_place(&mut self, i: usize, j: usize) -> Result<&mut Self> {
        self.check_pair(i, j, self.nrow())?;
        if i != j {
            let ncol = self.ncol();
            let data = self.as_mut_slice();
            for c in 0..ncol {
                data.swap(i * ncol + c, j * ncol + c);
            }
        }
        Ok(self)
    }

    /// Swap columns `i` and `j` in place.
    pub fn swap_columns_in_place(&mut self, i: usize, j: usize) -> Result<&mut Self> {
        self.check_pair(i, j, self.ncol())?;
        if i != j {
            let (nrow, ncol) = (self.nrow(), self.ncol());
            let data = self.as_mut_slice();
            for r in 0..nrow {
                data.swap(r * ncol + i, r * ncol + j);
            }
        }
        Ok(self)
    }

    fn check_pair(&self, i: usize, j: usize, bound: usize) -> Result<()> {
        if i >= bound || j >= bound {
            return Err(CoreError::IndexOutOfRange {
                index: vec![i, j],
                shape: self.shape().to_vec(),
            });
        }
        Ok(())
    }

    /// All elements as an `n x 1` column, in row-major order.
    pub fn into_column(self) -> Self {
        let n = self.len();
        Self {
            tensor: Tensor::from_vec_unchecked(self.tensor.into_vec(), vec![n, 1]),
        }
    }

    /// All elements as a `1 x n` row, in row-major order.
    pub fn into_row(self) -> Self {
        let n = self.len();
        Self {
            tensor: Tensor::from_vec_unchecked(self.tensor.into_vec(), vec![1, n]),
        }
    }
}

impl<T: Clone> Matrix<T> {
    /// The transpose: `t.cell(j, i) == self.cell(i, j)`.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let m = Matrix::from_vec(vec![1, 2, 3, 4, 5, 6], 2, 3).unwrap();
    /// let t = m.transpose();
    /// assert_eq!(t.shape(), [3, 2]);
    /// assert_eq!(t.as_slice(), &[1, 4, 2, 5, 3, 6]);
    /// ```
    pub fn transpose(&self) -> Self {
        Self {
            tensor: self.tensor.permuted(&[1, 0]),
        }
    }

    /// Re-flow the elements, in row-major order, into `ncol` columns.
    ///
    /// Fails with [`CoreError::InvalidShape`] when `ncol` is zero or does not
    /// divide the element count.
    pub fn reshape(&self, ncol: usize) -> Result<Self> {
        let len = self.len();
        if ncol == 0 || len % ncol != 0 {
            return Err(CoreError::InvalidShape {
                shape: vec![len.checked_div(ncol).unwrap_or(0), ncol],
                reason: "column count must divide the number of elements",
            });
        }
        Ok(Self {
            tensor: self.tensor.reshaped(vec![len / ncol, ncol])?,
        })
    }

    /// A copy with rows `i` and `j` exchanged.
    pub fn swapped_rows(&self, i: usize, j: usize) -> Result<Self> {
        let mut m = self.clone();
        m.swap_rows_in_place(i, j)?;
        Ok(m)
    }

    /// A copy with columns `i` and `j` exchanged.
    pub fn swapped_columns(&self, i: usize, j: usize) -> Result<Self> {
        let mut m = self.clone();
        m.swap_columns_in_place(i, j)?;
        Ok(m)
    }

    /// Place `other` to the right of `self`; row counts must agree.
    pub fn hstack(&self, other: &Self) -> Result<Self> {
        Ok(Self {
            tensor: Tensor::concat(&[&self.tensor, &other.tensor], 1)?,
        })
    }

    /// Place `other` below `self`; column counts must agree.
    pub fn vstack(&self, other: &Self) -> Result<Self> {
        Ok(Self {
            tensor: Tensor::concat(&[&self.tensor, &other.tensor], 0)?,
        })
    }

    /// Copying form of [`into_column`](Self::into_column).
    pub fn to_column(&self) -> Self {
        self.clone().into_column()
    }

    /// Copying form of [`into_row`](Self::into_row).
    pub fn to_row(&self) -> Self {
        self.clone().into_row()
    }
}
