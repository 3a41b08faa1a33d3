//! `linmat-core`: generic matrices and dense factorizations.
//!
//! Provides a row-major [`Tensor`] storage layer, the two-dimensional
//! [`Matrix`] over any element type, and linear algebra on numeric matrices:
//! `PA = LU` with partial pivoting, Gram-Schmidt `A = QR`, linear solves,
//! determinants and inverses.
//!
//! # Design
//!
//! - Element types are unbounded for storage and reshaping. Arithmetic and
//!   factorizations coerce cells through the [`Numeric`] trait.
//! - Every fallible operation returns [`Result`]; shape and index problems
//!   are reported as [`CoreError`] values, never as panics.
//! - Numerical thresholds live in [`Tolerance`] and scale with the input.

pub mod config;
pub mod dtype;
pub mod error;
pub mod linalg;
pub mod matrix;
pub mod tensor;


// Re-export key types at crate root for convenience.
pub use config::Tolerance;
pub use dtype::Numeric;
pub use error::{CoreError, Result};
pub use linalg::{LuDecomposition, Matrices, QrDecomposition};
pub use matrix::Matrix;
pub use tensor::Tensor;

/// Items intended for glob-import: `use linmat_core::prelude::*;`
pub mod prelude {
    pub use crate::config::Tolerance;
    pub use crate::dtype::Numeric;
    pub use crate::error::{CoreError, Result};
    pub use crate::linalg::{LuDecomposition, Matrices, QrDecomposition};
    pub use crate::matrix::Matrix;
    pub use crate::tensor::Tensor;
}
