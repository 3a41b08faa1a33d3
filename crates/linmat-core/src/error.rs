use thiserror::Error;

/// All errors returned by `linmat-core`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Operand shapes are incompatible for an elementwise or multiply operation.
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// A shape specification is invalid for the data it describes.
    #[error("invalid shape {shape:?}: {reason}")]
    InvalidShape {
        shape: Vec<usize>,
        reason: &'static str,
    },

    /// A cell, row or column index is outside the shape.
    #[error("index {index:?} out of range for shape {shape:?}")]
    IndexOutOfRange {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    /// A pivot or diagonal entry fell at or below the singularity threshold.
    #[error("singular matrix: pivot {pivot:e} at row {row} is below tolerance")]
    SingularMatrix { row: usize, pivot: f64 },

    /// A column is (numerically) a linear combination of the previous ones.
    #[error("rank-deficient matrix: residual norm {norm:e} at column {column}")]
    RankDeficient { column: usize, norm: f64 },

    /// An element could not be converted to a floating-point value.
    #[error("element at flat index {index} cannot be coerced to f64")]
    CoercionFailure { index: usize },

    /// The operation is not supported for the given input.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },
}

/// Convenience alias used throughout `linmat-core`.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = CoreError::ShapeMismatch {
            expected: vec![2, 3],
            got: vec![3, 2],
        };
        assert_eq!(e.to_string(), "shape mismatch: expected [2, 3], got [3, 2]");

        let e = CoreError::IndexOutOfRange {
            index: vec![4, 0],
            shape: vec![2, 2],
        };
        assert!(e.to_string().contains("[4, 0]"));

        let e = CoreError::SingularMatrix { row: 1, pivot: 0.0 };
        assert!(e.to_string().starts_with("singular matrix"));
    }

    #[test]
    fn test_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&CoreError::CoercionFailure { index: 3 });
    }
}
