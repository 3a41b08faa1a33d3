//! Shape manipulation: reshape, flatten, permute and concatenate.

use crate::error::{CoreError, Result};

use super::{Tensor, compute_strides};

impl<T> Tensor<T> {
    /// Reinterpret the tensor with new dimensions without copying data.
    ///
    /// The total number of elements must remain the same.
    pub fn reshape(mut self, dims: Vec<usize>) -> Result<Self> {
        let numel: usize = dims.iter().product();
        if numel != self.len() {
            return Err(CoreError::InvalidShape {
                shape: dims,
                reason: "new shape has different number of elements",
            });
        }
        self.strides = compute_strides(&dims);
        self.dims = dims;
        Ok(self)
    }

    /// Flatten the tensor into a 1-D tensor (consumes self, no copy).
    pub fn flatten(self) -> Self {
        let n = self.len();
        Tensor {
            data: self.data,
            dims: vec![n],
            strides: vec![1],
        }
    }
}

impl<T: Clone> Tensor<T> {
    /// Return a reshaped copy, leaving `self` untouched.
    pub fn reshaped(&self, dims: Vec<usize>) -> Result<Self> {
        self.clone().reshape(dims)
    }

    /// Permute the dimensions of the tensor according to the given axes.
    ///
    /// `axes` must be a permutation of `0..ndim`. Always copies.
    pub fn permute(&self, axes: &[usize]) -> Result<Self> {
        if axes.len() != self.ndim() {
            return Err(CoreError::InvalidArgument {
                reason: "axes length must match tensor rank",
            });
        }

        let mut seen = vec![false; self.ndim()];
        for &a in axes {
            if a >= self.ndim() || seen[a] {
                return Err(CoreError::InvalidArgument {
                    reason: "axes must be a permutation of 0..ndim",
                });
            }
            seen[a] = true;
        }
        Ok(self.permuted(axes))
    }

    /// Gather for an `axes` list already known to be a permutation of
    /// `0..ndim`.
    pub(crate) fn permuted(&self, axes: &[usize]) -> Self {
        let dims: Vec<usize> = axes.iter().map(|&a| self.dims[a]).collect();
        let strides = compute_strides(&dims);
        let numel = self.len();
        let mut data = Vec::with_capacity(numel);

        // Walk the output in storage order (odometer) and gather from the input.
        let mut out_index = vec![0usize; self.ndim()];
        for _ in 0..numel {
            let flat_in: usize = axes
                .iter()
                .enumerate()
                .map(|(out_ax, &in_ax)| out_index[out_ax] * self.strides[in_ax])
                .sum();
            data.push(self.data[flat_in].clone());

            for d in (0..self.ndim()).rev() {
                out_index[d] += 1;
                if out_index[d] < dims[d] {
                    break;
                }
                out_index[d] = 0;
            }
        }

        Tensor {
            data,
            dims,
            strides,
        }
    }

    /// Concatenate tensors along the given axis.
    ///
    /// All tensors must have the same shape except along `axis`.
    pub fn concat(tensors: &[&Tensor<T>], axis: usize) -> Result<Self> {
        let Some(first) = tensors.first() else {
            return Err(CoreError::InvalidArgument {
                reason: "cannot concatenate zero tensors",
            });
        };

        let ndim = first.ndim();
        if axis >= ndim {
            return Err(CoreError::InvalidArgument {
                reason: "concatenation axis out of range",
            });
        }

        for t in &tensors[1..] {
            let compatible = t.ndim() == ndim
                && first
                    .dims
                    .iter()
                    .zip(t.dims.iter())
                    .enumerate()
                    .all(|(d, (&a, &b))| d == axis || a == b);
            if !compatible {
                return Err(CoreError::ShapeMismatch {
                    expected: first.dims.clone(),
                    got: t.dims.clone(),
                });
            }
        }

        let mut dims = first.dims.clone();
        dims[axis] = tensors.iter().map(|t| t.dims[axis]).sum();

        let outer: usize = dims[..axis].iter().product();
        let inner: usize = dims[axis + 1..].iter().product();
        let mut data = Vec::with_capacity(dims.iter().product());

        for o in 0..outer {
            for t in tensors {
                let chunk = t.dims[axis] * inner;
                let start = o * chunk;
                data.extend_from_slice(&t.data[start..start + chunk]);
            }
        }

        Tensor::from_vec(data, dims)
    }
}
