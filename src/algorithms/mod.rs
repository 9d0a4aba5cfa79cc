//! Core Krylov subspace algorithms.
//!
//! The Arnoldi engine lives in [`arnoldi`]. This module holds the types it shares
//! with the high-level solvers: the output structure, the termination reason, the
//! breakdown tolerance and the per-iteration callback signature.

pub mod arnoldi;

use crate::{
    error::{ArnoldiError, ArnoldiErrorKind},
    matrix::LinearOperator,
};
use faer::{Mat, MatRef};

/// Residual norms strictly below this value are treated as numerically zero.
///
/// The threshold is absolute and fixed. It is not scaled by the norm of the
/// operator.
pub const BREAKDOWN_TOLERANCE: f64 = 1e-10;

/// Signature of the optional per-iteration observer.
///
/// Called after each completed step with the number of steps taken so far, a view
/// of the valid basis columns `Q[:, 0..=k]` and a view of the valid Hessenberg block
/// `H[0..=k, 0..k]`. Returning `false` stops the iteration early.
pub type ArnoldiCallback<'a> = dyn FnMut(usize, MatRef<'_, f64>, MatRef<'_, f64>) -> bool + 'a;

/// Why an Arnoldi run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// All `m` requested steps were performed.
    Completed,
    /// The residual norm fell below [`BREAKDOWN_TOLERANCE`]: the subspace built so
    /// far is invariant under the operator.
    Breakdown,
    /// The callback requested an early stop.
    Stopped,
}

/// The result of an Arnoldi run.
///
/// With `k = steps_taken`:
/// - on [`Termination::Completed`] and [`Termination::Stopped`], `q` is `n×(k+1)`
///   and `h` is `(k+1)×k`;
/// - on [`Termination::Breakdown`], `q` is `n×k` because the direction that would
///   have become column `k` does not exist, while `h` stays `(k+1)×k` so the
///   vanishing subdiagonal entry `h[(k, k-1)]` remains visible.
#[derive(Debug, Clone)]
pub struct ArnoldiOutput {
    /// Orthonormal basis of the Krylov subspace, one vector per column.
    pub q: Mat<f64>,
    /// Upper Hessenberg projection of the operator onto the basis.
    pub h: Mat<f64>,
    /// Number of Arnoldi steps actually performed.
    pub steps_taken: usize,
    /// Reason the iteration ended.
    pub termination: Termination,
}

impl ArnoldiOutput {
    /// Returns `true` if the run ended by finding an invariant subspace.
    pub fn is_breakdown(&self) -> bool {
        self.termination == Termination::Breakdown
    }

    /// Returns the square leading block `H[0..k, 0..k]`, i.e. `Q_kᵀ·A·Q_k`.
    pub fn hessenberg_square(&self) -> MatRef<'_, f64> {
        self.h
            .as_ref()
            .get(0..self.steps_taken, 0..self.steps_taken)
    }
}

/// Checks the shape preconditions shared by every entry point.
pub(crate) fn validate_inputs<O: LinearOperator + ?Sized>(
    operator: &O,
    vector_rows: usize,
    m: usize,
) -> Result<(), ArnoldiError> {
    if operator.nrows() != operator.ncols() {
        return Err(ArnoldiErrorKind::NotSquare {
            nrows: operator.nrows(),
            ncols: operator.ncols(),
        }
        .into());
    }
    if operator.ncols() != vector_rows {
        return Err(ArnoldiErrorKind::DimensionMismatch {
            operator_cols: operator.ncols(),
            vector_rows,
        }
        .into());
    }
    if m == 0 {
        return Err(ArnoldiErrorKind::InputError(
            "The subspace dimension `m` must be at least 1.".to_string(),
        )
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::mat;

    #[test]
    fn test_validate_rejects_rectangular_operator() {
        let a: Mat<f64> = mat![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let err = validate_inputs(&a, 3, 1).unwrap_err();
        assert_eq!(
            err.kind(),
            &ArnoldiErrorKind::NotSquare { nrows: 2, ncols: 3 }
        );
    }

    #[test]
    fn test_validate_rejects_zero_degree() {
        let a = Mat::<f64>::identity(2, 2);
        let err = validate_inputs(&a, 2, 0).unwrap_err();
        assert!(matches!(err.kind(), ArnoldiErrorKind::InputError(_)));
    }

    #[test]
    fn test_validate_accepts_consistent_shapes() {
        let a = Mat::<f64>::identity(4, 4);
        assert!(validate_inputs(&a, 4, 3).is_ok());
    }
}
