//! Vector primitives used by the orthogonalization loop.
//!
//! Thin checked wrappers over faer's column kernels. The norm goes through
//! [`faer::ColRef::norm_l2`], which rescales internally, so it stays positive and
//! finite for any finite non-zero vector, however small or large its entries.

use faer::{ColMut, ColRef, unzip, zip};

/// Computes the inner product `Σ a[i]·b[i]`.
///
/// # Panics
///
/// Panics if `a` and `b` have different lengths.
#[inline]
pub fn dot(a: ColRef<'_, f64>, b: ColRef<'_, f64>) -> f64 {
    assert_eq!(
        a.nrows(),
        b.nrows(),
        "Dimension mismatch: vectors have lengths {} and {}.",
        a.nrows(),
        b.nrows(),
    );

    a.transpose() * b
}

/// Computes the Euclidean norm `‖v‖₂`.
///
/// Unlike `dot(v, v).sqrt()`, this neither underflows to zero nor overflows to
/// infinity when the entries are extreme in magnitude.
#[inline]
pub fn norm(v: ColRef<'_, f64>) -> f64 {
    v.norm_l2()
}

/// Performs the in-place update `y := y + alpha·x`.
///
/// # Panics
///
/// Panics if `x` and `y` have different lengths.
#[inline]
pub fn axpy(alpha: f64, x: ColRef<'_, f64>, y: ColMut<'_, f64>) {
    assert_eq!(
        x.nrows(),
        y.nrows(),
        "Dimension mismatch: vectors have lengths {} and {}.",
        x.nrows(),
        y.nrows(),
    );

    zip!(y, x).for_each(|unzip!(y, x)| *y += alpha * *x);
}
