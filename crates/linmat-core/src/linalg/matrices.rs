//! The [`Matrices`] facade: one owned matrix plus the linear-algebra
//! operations as methods.

use core::fmt;

use crate::config::Tolerance;
use crate::dtype::Numeric;
use crate::error::Result;
use crate::matrix::Matrix;

use super::decomp::{LuDecomposition, QrDecomposition};

/// Owns a [`Matrix`] and forwards to it.
///
/// ```
/// # use linmat_core::{Matrices, Matrix};
/// let a = Matrix::from_vec(vec![4.0, 3.0, 6.0, 3.0], 2, 2).unwrap().into_matrices();
/// let b = Matrices::new(Matrix::column_vector(vec![7.0, 9.0]));
/// let x = a.solve(&b).unwrap();
/// assert_eq!(x.shape(), [2, 1]);
/// assert!((x.get(1, 0).unwrap() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrices<T> {
    matrix: Matrix<T>,
}

impl<T> Matrices<T> {
    /// Wrap `matrix`.
    pub fn new(matrix: Matrix<T>) -> Self {
        Self { matrix }
    }

    /// The wrapped matrix.
    #[inline]
    pub fn as_matrix(&self) -> &Matrix<T> {
        &self.matrix
    }

    /// Mutable access to the wrapped matrix.
    #[inline]
    pub fn as_matrix_mut(&mut self) -> &mut Matrix<T> {
        &mut self.matrix
    }

    /// Unwrap into the underlying matrix.
    #[inline]
    pub fn into_matrix(self) -> Matrix<T> {
        self.matrix
    }

    /// `[nrow, ncol]` of the wrapped matrix.
    pub fn shape(&self) -> [usize; 2] {
        self.matrix.shape()
    }

    /// The element at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> Result<&T> {
        self.matrix.cell(i, j)
    }

    /// Overwrite the element at `(i, j)`; returns `self` for chaining.
    pub fn set(&mut self, i: usize, j: usize, value: T) -> Result<&mut Self> {
        self.matrix.set_cell(i, j, value)?;
        Ok(self)
    }

    /// Exchange rows `i` and `j` in place.
    pub fn swap_rows_in_place(&mut self, i: usize, j: usize) -> Result<&mut Self> {
        self.matrix.swap_rows_in_place(i, j)?;
        Ok(self)
    }

    /// Exchange columns `i` and `j` in place.
    pub fn swap_columns_in_place(&mut self, i: usize, j: usize) -> Result<&mut Self> {
        self.matrix.swap_columns_in_place(i, j)?;
        Ok(self)
    }

    /// Elementwise transform into a new facade.
    pub fn map<U, F>(&self, f: F) -> Matrices<U>
    where
        F: FnMut(&T) -> U,
    {
        Matrices::new(self.matrix.map(f))
    }

    /// Elementwise transform that also sees each cell's `(i, j)` position.
    pub fn map_indexed<U, F>(&self, f: F) -> Matrices<U>
    where
        F: FnMut((usize, usize), &T) -> U,
    {
        Matrices::new(self.matrix.map_indexed(f))
    }
}

impl<T: Clone> Matrices<T> {
    /// Deep copy.
    pub fn duplicate(&self) -> Self {
        Self::new(self.matrix.duplicate())
    }

    /// The transpose; `self` is left untouched.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::new(self.matrix.transpose())
    }

    /// A copy with rows `i` and `j` exchanged.
    pub fn swapped_rows(&self, i: usize, j: usize) -> Result<Self> {
        self.matrix.swapped_rows(i, j).map(Self::new)
    }

    /// A copy with columns `i` and `j` exchanged.
    pub fn swapped_columns(&self, i: usize, j: usize) -> Result<Self> {
        self.matrix.swapped_columns(i, j).map(Self::new)
    }

    /// A copy of row `i`.
    pub fn row(&self, i: usize) -> Result<Vec<T>> {
        self.matrix.row(i)
    }

    /// A copy of column `j`.
    pub fn column(&self, j: usize) -> Result<Vec<T>> {
        self.matrix.column(j)
    }
}

impl<T: Numeric> Matrices<T> {
    /// Numeric matrix product; non-numeric cells count as zero.
    pub fn mmult<U: Numeric>(&self, other: &Matrices<U>) -> Result<Matrices<f64>> {
        self.matrix.mmult(&other.matrix).map(Matrices::new)
    }

    /// Element-wise sum.
    pub fn plus<U: Numeric>(&self, other: &Matrices<U>) -> Result<Matrices<f64>> {
        self.matrix.plus(&other.matrix).map(Matrices::new)
    }

    /// Element-wise difference.
    pub fn minus<U: Numeric>(&self, other: &Matrices<U>) -> Result<Matrices<f64>> {
        self.matrix.minus(&other.matrix).map(Matrices::new)
    }

    /// Element-wise product.
    pub fn mul<U: Numeric>(&self, other: &Matrices<U>) -> Result<Matrices<f64>> {
        self.matrix.mul(&other.matrix).map(Matrices::new)
    }

    /// Element-wise quotient.
    pub fn div<U: Numeric>(&self, other: &Matrices<U>) -> Result<Matrices<f64>> {
        self.matrix.div(&other.matrix).map(Matrices::new)
    }

    /// `PA = LU` of the wrapped matrix.
    pub fn lu(&self) -> Result<LuDecomposition> {
        LuDecomposition::decompose(&self.matrix)
    }

    /// `PA = LU` with an explicit [`Tolerance`].
    pub fn lu_with(&self, tol: &Tolerance) -> Result<LuDecomposition> {
        LuDecomposition::decompose_with(&self.matrix, tol)
    }

    /// Solve `A x = b` where `A` is the wrapped matrix.
    pub fn solve<U: Numeric>(&self, b: &Matrices<U>) -> Result<Matrices<f64>> {
        self.solve_with(b, &Tolerance::default())
    }

    /// [`solve`](Self::solve) with an explicit [`Tolerance`].
    pub fn solve_with<U: Numeric>(
        &self,
        b: &Matrices<U>,
        tol: &Tolerance,
    ) -> Result<Matrices<f64>> {
        self.lu_with(tol)?.solve(&b.matrix).map(Matrices::new)
    }

    /// Thin `A = QR` of the wrapped matrix.
    pub fn qr(&self) -> Result<QrDecomposition> {
        QrDecomposition::decompose(&self.matrix)
    }

    /// Thin `A = QR` with an explicit [`Tolerance`].
    pub fn qr_with(&self, tol: &Tolerance) -> Result<QrDecomposition> {
        QrDecomposition::decompose_with(&self.matrix, tol)
    }

    /// Determinant; `0.0` for a matrix the factorization rejects as singular.
    pub fn det(&self) -> Result<f64> {
        super::det(&self.matrix)
    }

    /// Inverse of the wrapped matrix.
    pub fn inverse(&self) -> Result<Matrices<f64>> {
        self.lu()?.inverse().map(Matrices::new)
    }
}

impl Matrices<f64> {
    /// The `n x n` identity.
    pub fn eye(n: usize) -> Self {
        Self::new(Matrix::eye(n))
    }
}

impl<T: Clone + Default> Matrices<T> {
    /// A square matrix with `values` on the diagonal.
    pub fn diag(values: &[T]) -> Self {
        Self::new(Matrix::diag(values))
    }
}

impl<T> From<Matrix<T>> for Matrices<T> {
    fn from(matrix: Matrix<T>) -> Self {
        Self::new(matrix)
    }
}

impl<T> From<Matrices<T>> for Matrix<T> {
    fn from(m: Matrices<T>) -> Self {
        m.matrix
    }
}

impl<T: fmt::Display> fmt::Display for Matrices<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.matrix, f)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::CoreError;

    fn sample() -> Matrices<f64> {
        Matrix::from_vec(vec![4.0, 3.0, 6.0, 3.0], 2, 2)
            .unwrap()
            .into_matrices()
    }

    #[test]
    fn test_get_set_chain() {
        let mut m = sample();
        m.set(0, 0, 1.0).unwrap().set(1, 1, 2.0).unwrap();
        assert_eq!(*m.get(0, 0).unwrap(), 1.0);
        assert_eq!(*m.get(1, 1).unwrap(), 2.0);
        assert!(matches!(
            m.get(2, 0),
            Err(CoreError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_shape_ops() {
        let m = sample();
        assert_eq!(m.transpose().row(0).unwrap(), vec![4.0, 6.0]);
        assert_eq!(m.swapped_rows(0, 1).unwrap().row(0).unwrap(), vec![6.0, 3.0]);
        assert_eq!(
            m.swapped_columns(0, 1).unwrap().column(0).unwrap(),
            vec![3.0, 3.0]
        );

        let mut d = m.duplicate();
        d.swap_rows_in_place(0, 1).unwrap().swap_rows_in_place(0, 1).unwrap();
        assert_eq!(d, m);
        d.swap_columns_in_place(0, 1).unwrap();
        assert_ne!(d, m);
    }

    #[test]
    fn test_map_indexed() {
        let m = sample().map_indexed(|(i, j), &v| if i == j { v } else { 0.0 });
        assert_eq!(m.as_matrix().as_slice(), &[4.0, 0.0, 0.0, 3.0]);
        let s = sample().map(|v| v.to_string());
        assert_eq!(*s.get(1, 0).unwrap(), "6");
    }

    #[test]
    fn test_arithmetic() {
        let a = sample();
        let b = Matrices::diag(&[1_i32, 1]);
        assert_eq!(
            a.plus(&b).unwrap().as_matrix().as_slice(),
            &[5.0, 3.0, 6.0, 4.0]
        );
        assert_eq!(
            a.minus(&b).unwrap().as_matrix().as_slice(),
            &[3.0, 3.0, 6.0, 2.0]
        );
        assert_eq!(
            a.mul(&b).unwrap().as_matrix().as_slice(),
            &[4.0, 0.0, 0.0, 3.0]
        );
        assert_eq!(a.mmult(&Matrices::eye(2)).unwrap(), a);
        assert!(a.div(&Matrices::eye(3)).is_err());
    }

    #[test]
    fn test_lu_and_solve() {
        let a = sample();
        let lu = a.lu().unwrap();
        assert_eq!(lu.p.as_slice(), &[0.0, 1.0, 1.0, 0.0]);

        let b = Matrices::new(Matrix::column_vector(vec![7.0, 9.0]));
        let x = a.solve(&b).unwrap();
        assert_relative_eq!(*x.get(0, 0).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(*x.get(1, 0).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_det_inverse() {
        let a = sample();
        assert_relative_eq!(a.det().unwrap(), -6.0, epsilon = 1e-12);
        let inv = a.inverse().unwrap();
        let eye = a.mmult(&inv).unwrap();
        for (x, y) in eye.as_matrix().as_slice().iter().zip(Matrix::eye(2).as_slice()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_det_of_singular_is_zero() {
        let zeros = Matrices::new(Matrix::zeros(2, 2));
        assert_eq!(zeros.det().unwrap(), 0.0);
        let rank_one = Matrix::from_vec(vec![1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 3.0, 6.0, 9.0], 3, 3)
            .unwrap()
            .into_matrices();
        assert_eq!(rank_one.det().unwrap(), 0.0);
        assert!(rank_one.inverse().is_err());
    }

    #[test]
    fn test_tolerance_variants() {
        let a = Matrix::from_vec(vec![1.0, 1.0, 1.0, 1.5], 2, 2)
            .unwrap()
            .into_matrices();
        let b = Matrices::new(Matrix::column_vector(vec![2.0, 2.5]));
        let loose = Tolerance::default().with_pivot(0.5).with_rank(0.9);
        assert!(a.solve(&b).is_ok());
        assert!(matches!(
            a.solve_with(&b, &loose),
            Err(CoreError::SingularMatrix { row: 1, .. })
        ));
        assert!(a.qr().is_ok());
        assert!(matches!(
            a.qr_with(&loose),
            Err(CoreError::RankDeficient { column: 1, .. })
        ));
    }

    #[test]
    fn test_qr() {
        let a = Matrix::from_vec(vec![1.0, 1.0, 1.0, 0.0, 0.0, 1.0], 3, 2)
            .unwrap()
            .into_matrices();
        let qr = a.qr().unwrap();
        assert_relative_eq!(*qr.r.cell(0, 0).unwrap(), 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_conversions() {
        let m = Matrix::eye(2);
        let wrapped: Matrices<f64> = m.clone().into();
        assert_eq!(wrapped, Matrices::eye(2));
        let back: Matrix<f64> = wrapped.into();
        assert_eq!(back, m);
    }

    #[test]
    fn test_display_delegates() {
        let m = Matrices::diag(&[1, 2]);
        assert_eq!(format!("{m}"), format!("{}", m.as_matrix()));
    }
}
