//! This module defines the dense matrix-vector product and the linear operator
//! abstraction built on top of it.
//!
//! The Arnoldi process never needs individual matrix entries. Its only contact with
//! `A` is the product `A·q` once per iteration, so the engine is written against the
//! [`LinearOperator`] trait. Dense faer matrices implement it through [`matvec`],
//! and tests or callers can plug in their own operators.

use crate::error::{ArnoldiError, ArnoldiErrorKind};
use faer::{Col, ColRef, Mat, MatRef};

/// Computes the dense product `A·v`, with `result[i] = Σ_j A[i,j]·v[j]`.
///
/// The shape check runs first so a mismatch surfaces as an error instead of a
/// panic inside faer's product kernel.
///
/// # Errors
///
/// Returns [`ArnoldiErrorKind::DimensionMismatch`] if `A` has a different number of
/// columns than `v` has rows.
pub fn matvec(a: MatRef<'_, f64>, v: ColRef<'_, f64>) -> Result<Col<f64>, ArnoldiError> {
    if a.ncols() != v.nrows() {
        return Err(ArnoldiErrorKind::DimensionMismatch {
            operator_cols: a.ncols(),
            vector_rows: v.nrows(),
        }
        .into());
    }

    Ok(a * v)
}

/// Represents a square or rectangular linear operator that can be applied to a vector.
///
/// This is the only capability the Krylov iteration requires from `A`.
///
/// # Example
///
/// ```
/// use faer::{Col, Mat};
/// use krylov_arnoldi::matrix::LinearOperator;
///
/// let a = Mat::from_fn(2, 2, |i, j| if i == j { 2.0 } else { 0.0 });
/// let v = Col::from_fn(2, |i| (i + 1) as f64);
/// let w = a.apply(v.as_ref()).unwrap();
/// assert_eq!(w[1], 4.0);
/// ```
pub trait LinearOperator {
    /// Returns the number of rows of the operator.
    fn nrows(&self) -> usize;

    /// Returns the number of columns of the operator.
    fn ncols(&self) -> usize;

    /// Applies the operator to `rhs`, returning a freshly allocated result vector.
    fn apply(&self, rhs: ColRef<'_, f64>) -> Result<Col<f64>, ArnoldiError>;
}

impl LinearOperator for MatRef<'_, f64> {
    #[inline]
    fn nrows(&self) -> usize {
        (*self).nrows()
    }

    #[inline]
    fn ncols(&self) -> usize {
        (*self).ncols()
    }

    #[inline]
    fn apply(&self, rhs: ColRef<'_, f64>) -> Result<Col<f64>, ArnoldiError> {
        matvec(*self, rhs)
    }
}

/// Delegates to the `MatRef` implementation.
impl LinearOperator for Mat<f64> {
    #[inline]
    fn nrows(&self) -> usize {
        Mat::nrows(self)
    }

    #[inline]
    fn ncols(&self) -> usize {
        Mat::ncols(self)
    }

    #[inline]
    fn apply(&self, rhs: ColRef<'_, f64>) -> Result<Col<f64>, ArnoldiError> {
        matvec(self.as_ref(), rhs)
    }
}
