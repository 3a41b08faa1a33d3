//! N-dimensional tensor type with dynamic shape and contiguous storage.
//!
//! The [`Tensor`] type is the storage layer under [`Matrix`](crate::Matrix).
//! It stores elements in row-major (C) order and places no bound on the
//! element type: numbers, text, timestamps or tuples are all valid.

mod display;
mod reshape;
#[cfg(feature = "serde")]
mod serial;

pub(crate) use display::write_row;

use crate::error::{CoreError, Result};

/// An N-dimensional tensor with dynamic shape.
///
/// Data is stored contiguously in row-major (C) order. The tensor owns its
/// data and cloning performs a deep copy.
#[derive(Debug, Clone)]
pub struct Tensor<T> {
    data: Vec<T>,
    dims: Vec<usize>,
    strides: Vec<usize>,
}

impl<T> Tensor<T> {
    // ------------------------------------------------------------------
    // Construction from raw parts
    // ------------------------------------------------------------------

    /// Create a tensor from a flat data vector and its dimensions.
    ///
    /// Returns an error if the product of `dims` does not equal `data.len()`.
    pub fn from_vec(data: Vec<T>, dims: Vec<usize>) -> Result<Self> {
        let numel: usize = dims.iter().product();
        if numel != data.len() {
            return Err(CoreError::InvalidShape {
                shape: dims,
                reason: "shape product does not match data length",
            });
        }
        let strides = compute_strides(&dims);
        Ok(Self {
            data,
            dims,
            strides,
        })
    }

    /// Build a tensor whose shape is already known to match `data`.
    pub(crate) fn from_vec_unchecked(data: Vec<T>, dims: Vec<usize>) -> Self {
        debug_assert_eq!(dims.iter().product::<usize>(), data.len());
        let strides = compute_strides(&dims);
        Self {
            data,
            dims,
            strides,
        }
    }

    /// Create a tensor by evaluating `f` at every flat offset.
    ///
    /// ```
    /// # use linmat_core::tensor::Tensor;
    /// let t = Tensor::from_fn(vec![2, 2], |i| i * 10);
    /// assert_eq!(t.as_slice(), &[0, 10, 20, 30]);
    /// ```
    pub fn from_fn<F>(dims: Vec<usize>, f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        let numel: usize = dims.iter().product();
        let strides = compute_strides(&dims);
        Self {
            data: (0..numel).map(f).collect(),
            dims,
            strides,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The dimensions of the tensor as a slice.
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// The strides of the tensor as a slice (in number of elements).
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// The number of dimensions (rank) of the tensor.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// The total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the tensor has zero elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// A flat slice of all elements in storage order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// A mutable flat slice of all elements in storage order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the tensor and return the underlying `Vec<T>`.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    // ------------------------------------------------------------------
    // Element access
    // ------------------------------------------------------------------

    /// Compute the flat offset of a multi-dimensional index.
    pub fn offset(&self, index: &[usize]) -> Result<usize> {
        if index.len() != self.ndim() {
            return Err(self.out_of_range(index));
        }
        let mut flat = 0;
        for (i, (&idx, &dim)) in index.iter().zip(self.dims.iter()).enumerate() {
            if idx >= dim {
                return Err(self.out_of_range(index));
            }
            flat += idx * self.strides[i];
        }
        Ok(flat)
    }

    /// Convert a flat offset back into a multi-dimensional index.
    pub fn unravel(&self, offset: usize) -> Result<Vec<usize>> {
        if offset >= self.len() {
            return Err(self.out_of_range(&[offset]));
        }
        let mut rest = offset;
        Ok(self
            .strides
            .iter()
            .map(|&s| {
                let idx = rest / s;
                rest %= s;
                idx
            })
            .collect())
    }

    /// Get a reference to the element at the given multi-dimensional index.
    pub fn get(&self, index: &[usize]) -> Result<&T> {
        let flat = self.offset(index)?;
        Ok(&self.data[flat])
    }

    /// Get a mutable reference to the element at the given index.
    pub fn get_mut(&mut self, index: &[usize]) -> Result<&mut T> {
        let flat = self.offset(index)?;
        Ok(&mut self.data[flat])
    }

    /// Set the element at the given multi-dimensional index.
    pub fn set(&mut self, index: &[usize], value: T) -> Result<&mut Self> {
        let flat = self.offset(index)?;
        self.data[flat] = value;
        Ok(self)
    }

    fn out_of_range(&self, index: &[usize]) -> CoreError {
        CoreError::IndexOutOfRange {
            index: index.to_vec(),
            shape: self.dims.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Iterators
    // ------------------------------------------------------------------

    /// Iterate over all elements in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate mutably over all elements in storage order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }

    // ------------------------------------------------------------------
    // Map
    // ------------------------------------------------------------------

    /// Apply a function to every element, returning a new tensor.
    pub fn map<U, F>(&self, f: F) -> Tensor<U>
    where
        F: FnMut(&T) -> U,
    {
        Tensor {
            data: self.data.iter().map(f).collect(),
            dims: self.dims.clone(),
            strides: self.strides.clone(),
        }
    }

    /// Apply a function element-wise to two tensors of the same shape.
    pub fn zip_map<U, V, F>(&self, other: &Tensor<U>, mut f: F) -> Result<Tensor<V>>
    where
        F: FnMut(&T, &U) -> V,
    {
        if self.dims != other.dims {
            return Err(CoreError::ShapeMismatch {
                expected: self.dims.clone(),
                got: other.dims.clone(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| f(a, b))
            .collect();
        Ok(Tensor {
            data,
            dims: self.dims.clone(),
            strides: self.strides.clone(),
        })
    }
}

impl<T: PartialEq> PartialEq for Tensor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.dims == other.dims && self.data == other.data
    }
}

// ======================================================================
// Utility functions
// ======================================================================

/// Compute row-major (C-order) strides from a shape.
pub(crate) fn compute_strides(dims: &[usize]) -> Vec<usize> {
    let ndim = dims.len();
    if ndim == 0 {
        return vec![];
    }
    let mut strides = vec![1usize; ndim];
    for i in (0..ndim - 1).rev() {
        strides[i] = strides[i + 1] * dims[i + 1];
    }
    strides
}
