//! Error type shared by all matrix operations.

use tessera_rings::DivisionError;
use thiserror::Error;

/// Errors that can occur in matrix operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Operand dimensions are incompatible, or an index is out of range.
    ///
    /// For index errors, `right` holds the offending (row, column) pair
    /// (unused coordinates are 0).
    #[error("shape mismatch in {operation}: {left:?} vs {right:?}")]
    ShapeMismatch {
        /// The operation that rejected its operands.
        operation: &'static str,
        /// Shape of the first operand.
        left: (usize, usize),
        /// Shape of the second operand, or the offending index.
        right: (usize, usize),
    },

    /// The matrix has no inverse over its scalar ring.
    #[error("matrix is not invertible")]
    NotInvertible,

    /// A division expected to be exact left a remainder.
    #[error("division was expected to be exact")]
    NotExactDivision,

    /// The zero matrix was raised to the zeroth power.
    #[error("zero matrix raised to the zeroth power")]
    ZeroExponent,

    /// The vector does not lie in the span of the basis.
    #[error("vector is not in the span of the basis")]
    OutOfDomain,
}

impl MatrixError {
    pub(crate) fn shape(
        operation: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    ) -> Self {
        Self::ShapeMismatch {
            operation,
            left,
            right,
        }
    }
}

impl From<DivisionError> for MatrixError {
    fn from(err: DivisionError) -> Self {
        match err {
            DivisionError::DivisionByZero => Self::NotInvertible,
            DivisionError::NotExact => Self::NotExactDivision,
        }
    }
}
