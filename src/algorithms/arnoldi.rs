//! Arnoldi iteration with modified Gram-Schmidt orthogonalization.
//!
//! ** NOTE: We recommend using the high-level method [`crate::solvers::arnoldi`] instead.
//! This module is intended for use cases where fine-grained control over the process
//! is required, such as observing every step through a callback or running the
//! iteration on a custom [`LinearOperator`].
//!
//! The engine pre-allocates the basis `Q` (`n×(m+1)`) and the Hessenberg matrix `H`
//! (`(m+1)×m`), both zero-initialized, and fills them one column per step. Entries of
//! `H` below the first subdiagonal are never written, so they read as exact zeros.

use super::{
    ArnoldiCallback, ArnoldiOutput, BREAKDOWN_TOLERANCE, Termination, validate_inputs,
};
use crate::{
    error::{ArnoldiError, ArnoldiErrorKind},
    matrix::LinearOperator,
    vector::{axpy, dot, norm},
};
use faer::{ColRef, Mat, unzip, zip};

/// Performs up to `m` steps of the Arnoldi iteration.
///
/// Builds an orthonormal basis of the Krylov subspace
/// $\mathcal{K}_{m+1}(\mathbf{A}, \mathbf{u})$ together with the upper Hessenberg
/// matrix satisfying $\mathbf{A}\mathbf{Q}_k = \mathbf{Q}_{k+1}\mathbf{H}_k$.
///
/// At step `k` the candidate `w = A·q_k` is orthogonalized against `q_0, …, q_k`
/// sequentially: each coefficient `H[j,k]` is computed from the already-updated
/// `w`. The residual norm becomes `H[k+1,k]`; if it is below
/// [`BREAKDOWN_TOLERANCE`] the run ends with [`Termination::Breakdown`], otherwise
/// `w / H[k+1,k]` becomes column `k+1` of `Q`.
///
/// # Arguments
/// * `operator`: A square linear operator implementing [`LinearOperator`].
/// * `u`: The seed vector. Must not be a zero vector.
/// * `m`: The requested subspace dimension (number of steps), at least 1.
/// * `callback`: An optional observer invoked after each non-breakdown step; it can
///   stop the iteration by returning `false`.
///
/// # Returns
/// An [`ArnoldiOutput`] truncated to the steps actually performed, or an
/// [`ArnoldiError`] if a precondition is violated.
pub fn arnoldi_standard<O: LinearOperator + ?Sized>(
    operator: &O,
    u: ColRef<'_, f64>,
    m: usize,
    mut callback: Option<&mut ArnoldiCallback<'_>>,
) -> Result<ArnoldiOutput, ArnoldiError> {
    validate_inputs(operator, u.nrows(), m)?;
    let n = u.nrows();

    // The norm is computed with internal scaling, so only a zero seed or one with
    // NaN or infinite entries lands outside (0, inf).
    let u_norm = norm(u);
    if !(u_norm.is_finite() && u_norm > 0.0) {
        return Err(ArnoldiErrorKind::ZeroSeedVector.into());
    }

    // Pre-allocate Q and H at their full size. Entries that are never written
    // stay exactly zero, which is what gives H its Hessenberg structure.
    let mut q = Mat::<f64>::zeros(n, m + 1);
    let mut h = Mat::<f64>::zeros(m + 1, m);

    // The first basis vector is the normalized seed.
    zip!(q.col_mut(0), u).for_each(|unzip!(dst, src)| *dst = *src / u_norm);

    let mut steps_taken = 0;
    let mut termination = Termination::Completed;

    for k in 0..m {
        // Expand the subspace by one operator application.
        let mut w = operator.apply(q.col(k))?;

        // Modified Gram-Schmidt: every projection sees the residual left by the
        // previous one.
        for j in 0..=k {
            let h_jk = dot(w.as_ref(), q.col(j));
            h[(j, k)] = h_jk;
            axpy(-h_jk, q.col(j), w.as_mut());
        }

        // What is left of w is orthogonal to the current basis; its length is the
        // subdiagonal entry of H.
        let beta = norm(w.as_ref());
        h[(k + 1, k)] = beta;
        steps_taken = k + 1;

        log::trace!("Arnoldi step {}: residual norm {:e}", steps_taken, beta);

        // A vanishing residual means A maps the current subspace into itself.
        // There is no direction left to normalize, so stop before dividing.
        if beta < BREAKDOWN_TOLERANCE {
            log::debug!(
                "Arnoldi breakdown at step {}: residual norm {:e} is below {:e}; the Krylov subspace is invariant.",
                steps_taken,
                beta,
                BREAKDOWN_TOLERANCE
            );
            termination = Termination::Breakdown;
            break;
        }

        zip!(q.col_mut(k + 1), w.as_ref()).for_each(|unzip!(dst, src)| *dst = *src / beta);

        // The callback sees only the valid leading blocks of Q and H and can end
        // the run early by returning false.
        if let Some(cb) = callback.as_deref_mut() {
            let current_q = q.as_ref().get(.., 0..k + 2);
            let current_h = h.as_ref().get(0..k + 2, 0..k + 1);
            if !cb(steps_taken, current_q, current_h) {
                log::debug!("Arnoldi iteration stopped by callback after {} steps.", steps_taken);
                termination = Termination::Stopped;
                break;
            }
        }
    }

    // A completed run owns correctly-sized buffers already and moves them out.
    // Early exits copy only the valid block. After a breakdown Q drops the column
    // that was never produced, while H keeps its last row so the vanishing
    // subdiagonal entry stays visible.
    let (q, h) = match termination {
        Termination::Completed => (q, h),
        Termination::Stopped => (
            q.as_ref().get(.., 0..steps_taken + 1).to_owned(),
            h.as_ref().get(0..steps_taken + 1, 0..steps_taken).to_owned(),
        ),
        Termination::Breakdown => (
            q.as_ref().get(.., 0..steps_taken).to_owned(),
            h.as_ref().get(0..steps_taken + 1, 0..steps_taken).to_owned(),
        ),
    };

    Ok(ArnoldiOutput {
        q,
        h,
        steps_taken,
        termination,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::{Col, mat};

    #[test]
    fn test_identity_breaks_down_after_one_step() {
        let a = Mat::<f64>::identity(3, 3);
        let u = Col::from_fn(3, |i| (i + 1) as f64);

        let out = arnoldi_standard(&a, u.as_ref(), 3, None).unwrap();

        assert_eq!(out.termination, Termination::Breakdown);
        assert_eq!(out.steps_taken, 1);
        assert_eq!(out.q.ncols(), 1);
        assert_eq!(out.h.nrows(), 2);
        assert_eq!(out.h.ncols(), 1);
        assert!((out.h[(0, 0)] - 1.0).abs() < 1e-14);
        assert!(out.h[(1, 0)] < BREAKDOWN_TOLERANCE);
    }

    #[test]
    fn test_first_column_is_normalized_seed() {
        let a: Mat<f64> = mat![[0.0, 1.0], [1.0, 0.0]];
        let u = Col::from_fn(2, |i| [3.0, 0.0][i]);

        let out = arnoldi_standard(&a, u.as_ref(), 1, None).unwrap();

        assert_eq!(out.termination, Termination::Completed);
        assert!((out.q[(0, 0)] - 1.0).abs() < 1e-15);
        assert_eq!(out.q[(1, 0)], 0.0);
        // A·e_0 = e_1: nothing to project out, full unit residual.
        assert!(out.h[(0, 0)].abs() < 1e-15);
        assert!((out.h[(1, 0)] - 1.0).abs() < 1e-15);
        assert!((out.q[(1, 1)] - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_badly_scaled_seeds_are_accepted() {
        let a: Mat<f64> = mat![[2.0, 1.0], [1.0, 3.0]];

        for scale in [1e-170, 1e170] {
            let u = Col::from_fn(2, |i| [3.0, 4.0][i] * scale);

            let out = arnoldi_standard(&a, u.as_ref(), 1, None).unwrap();

            assert_eq!(out.termination, Termination::Completed);
            assert!((out.q[(0, 0)] - 0.6).abs() < 1e-15);
            assert!((out.q[(1, 0)] - 0.8).abs() < 1e-15);
        }
    }

    #[test]
    fn test_infinite_seed_is_rejected() {
        let a = Mat::<f64>::identity(2, 2);
        let u = Col::from_fn(2, |i| if i == 0 { f64::INFINITY } else { 1.0 });

        let err = arnoldi_standard(&a, u.as_ref(), 1, None).unwrap_err();

        assert_eq!(err.kind(), &ArnoldiErrorKind::ZeroSeedVector);
    }

    #[test]
    fn test_zero_seed_is_rejected() {
        let a = Mat::<f64>::identity(3, 3);
        let u = Col::<f64>::zeros(3);

        let err = arnoldi_standard(&a, u.as_ref(), 2, None).unwrap_err();

        assert_eq!(err.kind(), &ArnoldiErrorKind::ZeroSeedVector);
    }

    #[test]
    fn test_nan_seed_is_rejected() {
        let a = Mat::<f64>::identity(2, 2);
        let u = Col::from_fn(2, |_| f64::NAN);

        let err = arnoldi_standard(&a, u.as_ref(), 1, None).unwrap_err();

        assert_eq!(err.kind(), &ArnoldiErrorKind::ZeroSeedVector);
    }

    #[test]
    fn test_seed_length_mismatch_is_rejected() {
        let a = Mat::<f64>::identity(3, 3);
        let u = Col::from_fn(2, |_| 1.0);

        let err = arnoldi_standard(&a, u.as_ref(), 2, None).unwrap_err();

        assert_eq!(
            err.kind(),
            &ArnoldiErrorKind::DimensionMismatch {
                operator_cols: 3,
                vector_rows: 2,
            }
        );
    }

    #[test]
    fn test_callback_observes_growing_views_and_can_stop() {
        // Cyclic shift: the Krylov space of e_0 is the whole space, no breakdown.
        let n = 5;
        let a = Mat::from_fn(n, n, |i, j| if i == (j + 1) % n { 1.0 } else { 0.0 });
        let u = Col::from_fn(n, |i| if i == 0 { 1.0 } else { 0.0 });

        let mut seen = Vec::new();
        let out = {
            let cb: &mut ArnoldiCallback<'_> = &mut |k, q, h| {
                seen.push((k, q.ncols(), h.nrows(), h.ncols()));
                k < 2
            };
            arnoldi_standard(&a, u.as_ref(), 4, Some(cb)).unwrap()
        };

        assert_eq!(seen, vec![(1, 2, 2, 1), (2, 3, 3, 2)]);
        assert_eq!(out.termination, Termination::Stopped);
        assert_eq!(out.steps_taken, 2);
        assert_eq!(out.q.ncols(), 3);
        assert_eq!(out.h.nrows(), 3);
        assert_eq!(out.h.ncols(), 2);
    }

    #[test]
    fn test_hessenberg_square_block() {
        let n = 4;
        let a = Mat::from_fn(n, n, |i, j| {
            ((3 * i * i + 5 * j + i * j * j) % 7) as f64 + if i == j { 5.0 } else { 0.0 }
        });
        let u = Col::from_fn(n, |i| 1.0 + i as f64);

        let out = arnoldi_standard(&a, u.as_ref(), 3, None).unwrap();
        let square = out.hessenberg_square();

        assert_eq!(out.termination, Termination::Completed);
        assert_eq!(square.nrows(), 3);
        assert_eq!(square.ncols(), 3);
        assert_eq!(square[(2, 1)], out.h[(2, 1)]);
    }
}
