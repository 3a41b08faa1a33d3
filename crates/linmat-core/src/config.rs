//! Numerical thresholds for the factorizations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Thresholds that decide when a factorization gives up.
///
/// Both values are relative: LU compares pivots against
/// `pivot * max(1, max |a_ij|)`, QR compares each residual norm against
/// `rank * max(1, ||a_i||)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tolerance {
    /// Pivot / diagonal threshold for LU and the triangular solves.
    pub pivot: f64,
    /// Residual-norm threshold for QR orthogonalization.
    pub rank: f64,
}

impl Tolerance {
    /// The default relative threshold (`1000 * f64::EPSILON`).
    pub const DEFAULT: f64 = f64::EPSILON * 1e3;

    /// Create a tolerance with explicit thresholds.
    pub fn new(pivot: f64, rank: f64) -> Self {
        Self { pivot, rank }
    }

    /// Replace the pivot threshold.
    #[must_use]
    pub fn with_pivot(mut self, pivot: f64) -> Self {
        self.pivot = pivot;
        self
    }

    /// Replace the rank threshold.
    #[must_use]
    pub fn with_rank(mut self, rank: f64) -> Self {
        self.rank = rank;
        self
    }

    /// Check that both thresholds are finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if !self.pivot.is_finite() || self.pivot < 0.0 {
            return Err(CoreError::InvalidArgument {
                reason: "pivot tolerance must be finite and non-negative",
            });
        }
        if !self.rank.is_finite() || self.rank < 0.0 {
            return Err(CoreError::InvalidArgument {
                reason: "rank tolerance must be finite and non-negative",
            });
        }
        Ok(())
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(Self::DEFAULT, Self::DEFAULT)
    }
}
