//! This module defines the error types for the Arnoldi engine and its solvers.
//!
//! Every fatal precondition violation is collected into a single enum,
//! [`ArnoldiErrorKind`], and surfaced through the opaque [`ArnoldiError`] wrapper.
//!
//! Numerical breakdown is deliberately absent from this list. A vanishing residual
//! norm means an invariant subspace was found, which is reported as data on
//! [`crate::algorithms::ArnoldiOutput`] rather than as a failure.
use thiserror::Error;

/// Represents all possible errors that can occur during an Arnoldi process.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct ArnoldiError(#[from] ArnoldiErrorKind);

impl ArnoldiError {
    /// Returns the specific kind of failure, for callers that need to match on it.
    pub fn kind(&self) -> &ArnoldiErrorKind {
        &self.0
    }
}

/// The distinct kinds of errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArnoldiErrorKind {
    /// The seed vector has zero (or non-finite) norm, so the first basis vector
    /// cannot be normalized.
    #[error("The seed vector has zero norm; the first Krylov basis vector cannot be normalized.")]
    ZeroSeedVector,

    /// The operator and the vector are incompatible for a matrix-vector product.
    #[error(
        "Dimension mismatch: operator has {operator_cols} columns but vector has {vector_rows} rows."
    )]
    DimensionMismatch {
        operator_cols: usize,
        vector_rows: usize,
    },

    /// The Arnoldi iteration requires a square operator.
    #[error("Operator must be square, got {nrows}x{ncols}.")]
    NotSquare { nrows: usize, ncols: usize },

    /// An invalid input parameter was provided to a function.
    #[error("Invalid input parameter: {0}")]
    InputError(String),
}

impl PartialEq for ArnoldiError {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
