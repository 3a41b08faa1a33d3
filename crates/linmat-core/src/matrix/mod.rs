//! Two-dimensional matrices over arbitrary element types.
//!
//! A [`Matrix`] is a [`Tensor`] pinned to exactly two dimensions
//! `[nrow, ncol]`, with `cell(i, j) == data[i * ncol + j]`. The shape is
//! fixed at construction; the contents are mutable through
//! [`set_cell`](Matrix::set_cell) and the in-place swaps.
//!
//! Row and column accessors hand out *copies*. Algorithms that need
//! copy-free access go through [`as_slice`](Matrix::as_slice) with explicit
//! strides instead.

mod create;
mod display;
mod mmult;
mod ops;
mod reshape;
#[cfg(feature = "serde")]
mod serial;

pub use mmult::{Collect, Fold, Product, Reduce, ReduceFn, Sum, dot_with};

use crate::error::{CoreError, Result};
use crate::linalg::Matrices;
use crate::tensor::Tensor;

/// A dense, row-major matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    tensor: Tensor<T>,
}

impl<T> Matrix<T> {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a matrix from row-major data and an explicit shape.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let m = Matrix::from_vec(vec![1, 2, 3, 4, 5, 6], 2, 3).unwrap();
    /// assert_eq!(*m.cell(1, 0).unwrap(), 4);
    /// ```
    pub fn from_vec(data: Vec<T>, nrow: usize, ncol: usize) -> Result<Self> {
        Ok(Self {
            tensor: Tensor::from_vec(data, vec![nrow, ncol])?,
        })
    }

    /// Create a matrix from any iterable of elements in row-major order.
    pub fn from_elements<I>(elements: I, nrow: usize, ncol: usize) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_vec(elements.into_iter().collect(), nrow, ncol)
    }

    /// Wrap a 2-D tensor.
    pub fn from_tensor(tensor: Tensor<T>) -> Result<Self> {
        if tensor.ndim() != 2 {
            return Err(CoreError::InvalidShape {
                shape: tensor.dims().to_vec(),
                reason: "a matrix requires exactly two dimensions",
            });
        }
        Ok(Self { tensor })
    }

    /// Create a matrix by evaluating `f(i, j)` for every cell.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let m = Matrix::from_fn(2, 2, |i, j| i * 10 + j);
    /// assert_eq!(m.as_slice(), &[0, 1, 10, 11]);
    /// ```
    pub fn from_fn<F>(nrow: usize, ncol: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        Self {
            tensor: Tensor::from_fn(vec![nrow, ncol], |k| f(k / ncol, k % ncol)),
        }
    }

    /// Create an `nrow x 1` column vector by evaluating `f(i)` for every row.
    pub fn column_from_fn<F>(nrow: usize, f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self {
            tensor: Tensor::from_fn(vec![nrow, 1], f),
        }
    }

    /// An `n x 1` column vector holding `values`.
    pub fn column_vector(values: Vec<T>) -> Self {
        let n = values.len();
        Self {
            tensor: Tensor::from_vec_unchecked(values, vec![n, 1]),
        }
    }

    /// A `1 x n` row vector holding `values`.
    pub fn row_vector(values: Vec<T>) -> Self {
        let n = values.len();
        Self {
            tensor: Tensor::from_vec_unchecked(values, vec![1, n]),
        }
    }

    // ------------------------------------------------------------------
    // Shape and storage
    // ------------------------------------------------------------------

    /// Number of rows.
    #[inline]
    pub fn nrow(&self) -> usize {
        self.tensor.dims()[0]
    }

    /// Number of columns.
    #[inline]
    pub fn ncol(&self) -> usize {
        self.tensor.dims()[1]
    }

    /// `[nrow, ncol]`.
    #[inline]
    pub fn shape(&self) -> [usize; 2] {
        [self.nrow(), self.ncol()]
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrow() == self.ncol()
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    /// Row-major backing data.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.tensor.as_slice()
    }

    /// Mutable row-major backing data.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.tensor.as_mut_slice()
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.tensor.into_vec()
    }

    /// The underlying tensor.
    #[inline]
    pub fn tensor(&self) -> &Tensor<T> {
        &self.tensor
    }

    #[inline]
    pub fn into_tensor(self) -> Tensor<T> {
        self.tensor
    }

    /// Wrap this matrix in the [`Matrices`] linear-algebra facade.
    pub fn into_matrices(self) -> Matrices<T> {
        Matrices::new(self)
    }

    // ------------------------------------------------------------------
    // Cell access
    // ------------------------------------------------------------------

    /// The element at row `i`, column `j`.
    pub fn cell(&self, i: usize, j: usize) -> Result<&T> {
        self.tensor.get(&[i, j])
    }

    /// Mutable access to the element at row `i`, column `j`.
    pub fn cell_mut(&mut self, i: usize, j: usize) -> Result<&mut T> {
        self.tensor.get_mut(&[i, j])
    }

    /// Overwrite the element at row `i`, column `j`; returns `self` for
    /// chaining.
    pub fn set_cell(&mut self, i: usize, j: usize, value: T) -> Result<&mut Self> {
        self.tensor.set(&[i, j], value)?;
        Ok(self)
    }

    /// Vector-style access: the element at `(i, 0)`.
    pub fn get(&self, i: usize) -> Result<&T> {
        self.cell(i, 0)
    }

    /// Vector-style update of the element at `(i, 0)`.
    pub fn set(&mut self, i: usize, value: T) -> Result<&mut Self> {
        self.set_cell(i, 0, value)
    }

    pub(crate) fn check_row(&self, i: usize) -> Result<()> {
        if i >= self.nrow() {
            return Err(CoreError::IndexOutOfRange {
                index: vec![i],
                shape: self.shape().to_vec(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_column(&self, j: usize) -> Result<()> {
        if j >= self.ncol() {
            return Err(CoreError::IndexOutOfRange {
                index: vec![j],
                shape: self.shape().to_vec(),
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Iteration
    // ------------------------------------------------------------------

    /// Iterate over the rows as slices.
    ///
    /// Always yields `nrow()` slices; rows of a zero-column matrix are empty.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        let ncol = self.ncol();
        let data = self.as_slice();
        (0..self.nrow()).map(move |i| &data[i * ncol..(i + 1) * ncol])
    }

    /// Iterate over `((i, j), &cell)` in row-major order.
    pub fn entries(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        let ncol = self.ncol();
        self.as_slice()
            .iter()
            .enumerate()
            .map(move |(k, t)| ((k / ncol, k % ncol), t))
    }

    // ------------------------------------------------------------------
    // Map
    // ------------------------------------------------------------------

    /// Elementwise transform into a new matrix.
    pub fn map<U, F>(&self, f: F) -> Matrix<U>
    where
        F: FnMut(&T) -> U,
    {
        Matrix {
            tensor: self.tensor.map(f),
        }
    }

    /// Elementwise transform that also sees each cell's `(i, j)` position.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let m = Matrix::from_vec(vec![5, 5, 5, 5], 2, 2).unwrap();
    /// let upper = m.map_indexed(|(i, j), &v| if i <= j { v } else { 0 });
    /// assert_eq!(upper.as_slice(), &[5, 5, 0, 5]);
    /// ```
    pub fn map_indexed<U, F>(&self, mut f: F) -> Matrix<U>
    where
        F: FnMut((usize, usize), &T) -> U,
    {
        let ncol = self.ncol();
        let data = self
            .as_slice()
            .iter()
            .enumerate()
            .map(|(k, t)| f((k / ncol, k % ncol), t))
            .collect();
        Matrix {
            tensor: Tensor::from_vec_unchecked(data, self.tensor.dims().to_vec()),
        }
    }
}

impl<T: Clone> Matrix<T> {
    /// Deep copy; the result shares nothing with `self`.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// A copy of row `i`.
    pub fn row(&self, i: usize) -> Result<Vec<T>> {
        self.check_row(i)?;
        let ncol = self.ncol();
        Ok(self.as_slice()[i * ncol..(i + 1) * ncol].to_vec())
    }

    /// A copy of column `j`.
    pub fn column(&self, j: usize) -> Result<Vec<T>> {
        self.check_column(j)?;
        let ncol = self.ncol();
        Ok(self
            .as_slice()
            .iter()
            .skip(j)
            .step_by(ncol)
            .cloned()
            .collect())
    }

    /// Copies of every column, left to right.
    pub fn columns(&self) -> impl Iterator<Item = Vec<T>> + '_ {
        (0..self.ncol()).map(move |j| {
            self.as_slice()
                .iter()
                .skip(j)
                .step_by(self.ncol())
                .cloned()
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix<i32> {
        // [[1, 2, 3],
        //  [4, 5, 6]]
        Matrix::from_vec(vec![1, 2, 3, 4, 5, 6], 2, 3).unwrap()
    }

    #[test]
    fn test_from_vec() {
        let m = sample();
        assert_eq!(m.shape(), [2, 3]);
        assert_eq!(m.nrow(), 2);
        assert_eq!(m.ncol(), 3);
        assert_eq!(m.len(), 6);
        assert!(!m.is_square());
    }

    #[test]
    fn test_from_vec_bad_length() {
        assert!(matches!(
            Matrix::from_vec(vec![1, 2, 3], 2, 2),
            Err(CoreError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_from_elements() {
        let m = Matrix::from_elements(1..=4, 2, 2).unwrap();
        assert_eq!(m.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_from_tensor_requires_2d() {
        let t = Tensor::from_vec(vec![1, 2, 3], vec![3]).unwrap();
        assert!(Matrix::from_tensor(t).is_err());
        let t = Tensor::from_vec(vec![1, 2, 3], vec![3, 1]).unwrap();
        assert_eq!(Matrix::from_tensor(t).unwrap().shape(), [3, 1]);
    }

    #[test]
    fn test_generators() {
        let m = Matrix::from_fn(2, 3, |i, j| (i, j));
        assert_eq!(*m.cell(1, 2).unwrap(), (1, 2));

        let v = Matrix::column_from_fn(3, |i| i * i);
        assert_eq!(v.shape(), [3, 1]);
        assert_eq!(v.as_slice(), &[0, 1, 4]);

        let r = Matrix::row_vector(vec!['a', 'b']);
        assert_eq!(r.shape(), [1, 2]);
        assert_eq!(Matrix::column_vector(vec![1.0, 2.0]).shape(), [2, 1]);
    }

    #[test]
    fn test_cell_get_set() {
        let mut m = sample();
        assert_eq!(*m.cell(0, 2).unwrap(), 3);
        m.set_cell(0, 2, 30).unwrap().set_cell(1, 0, 40).unwrap();
        assert_eq!(m.as_slice(), &[1, 2, 30, 40, 5, 6]);
        *m.cell_mut(1, 1).unwrap() += 1;
        assert_eq!(*m.cell(1, 1).unwrap(), 6);
    }

    #[test]
    fn test_cell_out_of_range() {
        let mut m = sample();
        assert!(matches!(m.cell(2, 0), Err(CoreError::IndexOutOfRange { .. })));
        assert!(matches!(m.cell(0, 3), Err(CoreError::IndexOutOfRange { .. })));
        assert!(m.set_cell(5, 5, 0).is_err());
    }

    #[test]
    fn test_vector_get_set() {
        let mut v = Matrix::column_vector(vec![1, 2, 3]);
        v.set(2, 9).unwrap();
        assert_eq!(*v.get(2).unwrap(), 9);
        assert!(v.get(3).is_err());
    }

    #[test]
    fn test_row_column_are_copies() {
        let mut m = sample();
        let mut row = m.row(1).unwrap();
        let col = m.column(2).unwrap();
        assert_eq!(row, vec![4, 5, 6]);
        assert_eq!(col, vec![3, 6]);

        row[0] = 100;
        m.set_cell(0, 2, -1).unwrap();
        assert_eq!(*m.cell(1, 0).unwrap(), 4);
        assert_eq!(col, vec![3, 6]);
    }

    #[test]
    fn test_row_column_out_of_range() {
        let m = sample();
        assert!(m.row(2).is_err());
        assert!(m.column(3).is_err());
    }

    #[test]
    fn test_rows_columns_iterators() {
        let m = sample();
        let rows: Vec<&[i32]> = m.rows().collect();
        assert_eq!(rows, vec![&[1, 2, 3][..], &[4, 5, 6][..]]);
        let cols: Vec<Vec<i32>> = m.columns().collect();
        assert_eq!(cols, vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
    }

    #[test]
    fn test_entries() {
        let m = sample();
        let e: Vec<_> = m.entries().filter(|(_, v)| **v % 2 == 0).collect();
        assert_eq!(e, vec![((0, 1), &2), ((1, 0), &4), ((1, 2), &6)]);
    }

    #[test]
    fn test_map_and_map_indexed() {
        let m = sample();
        let s = m.map(|v| v.to_string());
        assert_eq!(*s.cell(1, 1).unwrap(), "5");

        let lower = m.map_indexed(|(i, j), &v| if i > j { v } else { 0 });
        assert_eq!(lower.as_slice(), &[0, 0, 0, 4, 0, 0]);
    }

    #[test]
    fn test_duplicate_is_deep() {
        let m = sample();
        let mut d = m.duplicate();
        d.set_cell(0, 0, 99).unwrap();
        assert_eq!(*m.cell(0, 0).unwrap(), 1);
        assert_eq!(*d.cell(0, 0).unwrap(), 99);
    }

    #[test]
    fn test_empty_matrix() {
        let m = Matrix::<f64>::from_vec(vec![], 0, 3).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.rows().count(), 0);
        assert_eq!(m.columns().count(), 3);
    }

    #[test]
    fn test_rows_of_zero_column_matrix() {
        let m = Matrix::<i32>::from_vec(vec![], 3, 0).unwrap();
        assert_eq!(m.rows().count(), m.nrow());
        assert!(m.rows().all(<[i32]>::is_empty));
    }
}
