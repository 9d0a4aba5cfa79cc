//! This module provides the high-level API: the Arnoldi decomposition of a dense
//! matrix, and an unrestarted GMRES solver built on top of it.

use crate::{
    algorithms::{ArnoldiOutput, Termination, arnoldi::arnoldi_standard, validate_inputs},
    error::ArnoldiError,
    vector::{axpy, norm},
};
use faer::{Col, ColRef, Mat, MatRef};

/// Diagonal entries of the triangularized Hessenberg matrix below this magnitude are
/// treated as singular during back substitution.
const SINGULAR_PIVOT: f64 = 1e-300;

/// Computes `m` steps of the Arnoldi iteration for a dense square matrix.
///
/// Returns the orthonormal basis `Q` and the upper Hessenberg matrix `H`, truncated
/// to the number of steps actually performed. Compare
/// [`ArnoldiOutput::steps_taken`] with `m`, or inspect
/// [`ArnoldiOutput::termination`], to tell a breakdown from a full run.
///
/// # Arguments
/// * `a`: The dense `n×n` matrix.
/// * `u`: The seed vector of length `n`. Must not be a zero vector.
/// * `m`: The requested Krylov subspace dimension, at least 1.
pub fn arnoldi(
    a: MatRef<'_, f64>,
    u: ColRef<'_, f64>,
    m: usize,
) -> Result<ArnoldiOutput, ArnoldiError> {
    arnoldi_standard(&a, u, m, None)
}

/// The result of a GMRES solve.
#[derive(Debug, Clone)]
pub struct GmresOutput {
    /// The approximate solution of `A·x = b`.
    pub x: Col<f64>,
    /// Least-squares residual norms `‖b − A·x_j‖` for `j = 0..=iterations`. The first
    /// entry is `‖b‖` (zero initial guess).
    pub residuals: Vec<f64>,
    /// Number of Arnoldi steps performed.
    pub iterations: usize,
    /// How the underlying Arnoldi run ended. A breakdown means the solution is exact
    /// up to rounding.
    pub termination: Termination,
}

impl GmresOutput {
    /// Returns the residual history scaled by `‖b‖`.
    pub fn relative_residuals(&self) -> Vec<f64> {
        let b_norm = self.residuals.first().copied().unwrap_or(0.0);
        if b_norm == 0.0 {
            return vec![0.0; self.residuals.len()];
        }
        self.residuals.iter().map(|r| r / b_norm).collect()
    }
}

/// Computes the Givens rotation `(c, s)` that zeroes `b` in `[a, b]`.
fn givens_rotation(a: f64, b: f64) -> (f64, f64) {
    let r = a.hypot(b);
    if r == 0.0 { (1.0, 0.0) } else { (a / r, b / r) }
}

/// Solves `A·x = b` with unrestarted GMRES and a zero initial guess.
///
/// Runs up to `m` Arnoldi steps seeded with `b`, then minimizes
/// `‖β·e_1 − H·y‖` by reducing `H` to triangular form with Givens rotations. The
/// residual after each column is recorded, giving a non-increasing history.
///
/// A zero right-hand side is solved exactly by `x = 0` without iterating.
///
/// # Arguments
/// * `a`: The dense `n×n` system matrix.
/// * `b`: The right-hand side of length `n`.
/// * `m`: The maximum Krylov subspace dimension, at least 1.
pub fn gmres(a: MatRef<'_, f64>, b: ColRef<'_, f64>, m: usize) -> Result<GmresOutput, ArnoldiError> {
    validate_inputs(&a, b.nrows(), m)?;
    let n = b.nrows();

    // With a zero initial guess the first residual is b itself. A zero b is solved
    // exactly by x = 0, and the engine would reject it as a seed anyway.
    let beta = norm(b);
    if beta == 0.0 {
        return Ok(GmresOutput {
            x: Col::zeros(n),
            residuals: vec![0.0],
            iterations: 0,
            termination: Termination::Completed,
        });
    }

    // Build the Krylov basis from b. After a breakdown k < m and the subspace
    // already contains the exact solution.
    let decomposition = arnoldi_standard(&a, b, m, None)?;
    let k = decomposition.steps_taken;

    // Triangularize a copy of H in place, carrying the rotations along on g = β·e_1.
    let mut r: Mat<f64> = decomposition.h.clone();
    let mut g = vec![0.0; k + 1];
    g[0] = beta;
    let mut rotations: Vec<(f64, f64)> = Vec::with_capacity(k);
    let mut residuals = Vec::with_capacity(k + 1);
    residuals.push(beta);

    for j in 0..k {
        // Bring the new column up to date with every rotation applied so far.
        for (i, &(c, s)) in rotations.iter().enumerate() {
            let upper = r[(i, j)];
            let lower = r[(i + 1, j)];
            r[(i, j)] = c * upper + s * lower;
            r[(i + 1, j)] = -s * upper + c * lower;
        }

        // Annihilate the subdiagonal entry of this column.
        let (c, s) = givens_rotation(r[(j, j)], r[(j + 1, j)]);
        r[(j, j)] = c * r[(j, j)] + s * r[(j + 1, j)];
        r[(j + 1, j)] = 0.0;
        rotations.push((c, s));

        g[j + 1] = -s * g[j];
        g[j] *= c;

        // A singular pivot needs H[j+1, j] = 0, so it only happens on the column
        // where Arnoldi broke down. That column cannot reduce g[j], so the residual
        // keeps it.
        let residual = if r[(j, j)].abs() > SINGULAR_PIVOT {
            g[j + 1].abs()
        } else {
            g[j].hypot(g[j + 1])
        };
        residuals.push(residual);
    }

    // Back substitution on the k×k upper triangular block.
    let mut y = vec![0.0; k];
    for i in (0..k).rev() {
        let mut sum = g[i];
        for (j, &y_j) in y.iter().enumerate().skip(i + 1) {
            sum -= r[(i, j)] * y_j;
        }
        if r[(i, i)].abs() > SINGULAR_PIVOT {
            y[i] = sum / r[(i, i)];
        }
    }

    // Map the small solution back to R^n: x = Q[:, 0..k]·y.
    let mut x = Col::<f64>::zeros(n);
    for (j, &y_j) in y.iter().enumerate() {
        axpy(y_j, decomposition.q.col(j), x.as_mut());
    }

    log::debug!(
        "GMRES finished after {} steps ({:?}); final residual {:e}",
        k,
        decomposition.termination,
        residuals[k]
    );

    Ok(GmresOutput {
        x,
        residuals,
        iterations: k,
        termination: decomposition.termination,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ArnoldiErrorKind, matrix::matvec};
    use faer::mat;

    #[test]
    fn test_arnoldi_wrapper_matches_engine() {
        let a: Mat<f64> = mat![[2.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 4.0]];
        let u = Col::from_fn(3, |i| (i + 1) as f64);

        let wrapped = arnoldi(a.as_ref(), u.as_ref(), 2).unwrap();
        let direct = arnoldi_standard(&a, u.as_ref(), 2, None).unwrap();

        assert_eq!(wrapped.q, direct.q);
        assert_eq!(wrapped.h, direct.h);
        assert_eq!(wrapped.steps_taken, 2);
    }

    #[test]
    fn test_givens_rotation_zeroes_second_component() {
        let (c, s) = givens_rotation(3.0, 4.0);
        assert!((c - 0.6).abs() < 1e-15);
        assert!((s - 0.8).abs() < 1e-15);
        assert!((-s * 3.0 + c * 4.0).abs() < 1e-15);
        assert_eq!(givens_rotation(0.0, 0.0), (1.0, 0.0));
    }

    #[test]
    fn test_gmres_full_dimension_solves_exactly() {
        let a: Mat<f64> = mat![[4.0, 1.0, 0.0], [2.0, 5.0, 1.0], [0.0, 1.0, 3.0]];
        let b = Col::from_fn(3, |i| [1.0, -2.0, 0.5][i]);

        let out = gmres(a.as_ref(), b.as_ref(), 3).unwrap();
        let ax = matvec(a.as_ref(), out.x.as_ref()).unwrap();

        for i in 0..3 {
            assert!((ax[i] - b[i]).abs() < 1e-10);
        }
        assert!(*out.residuals.last().unwrap() < 1e-10);
    }

    #[test]
    fn test_gmres_zero_rhs_returns_zero_solution() {
        let a = Mat::<f64>::identity(3, 3);
        let b = Col::<f64>::zeros(3);

        let out = gmres(a.as_ref(), b.as_ref(), 2).unwrap();

        assert_eq!(out.iterations, 0);
        assert_eq!(out.residuals, vec![0.0]);
        assert_eq!(out.x, Col::<f64>::zeros(3));
        assert_eq!(out.relative_residuals(), vec![0.0]);
    }

    #[test]
    fn test_gmres_validates_dimensions() {
        let a = Mat::<f64>::identity(3, 3);
        let b = Col::<f64>::zeros(2);

        let err = gmres(a.as_ref(), b.as_ref(), 2).unwrap_err();

        assert_eq!(
            err.kind(),
            &ArnoldiErrorKind::DimensionMismatch {
                operator_cols: 3,
                vector_rows: 2,
            }
        );
    }

    #[test]
    fn test_gmres_on_identity_converges_in_one_step() {
        let a = Mat::<f64>::identity(4, 4);
        let b = Col::from_fn(4, |i| (i as f64) - 1.5);

        let out = gmres(a.as_ref(), b.as_ref(), 3).unwrap();

        assert_eq!(out.termination, Termination::Breakdown);
        assert_eq!(out.iterations, 1);
        for i in 0..4 {
            assert!((out.x[i] - b[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_gmres_seed_in_null_space_skips_singular_pivot() {
        // A·b = 0: Arnoldi breaks down at once with an all-zero H, so the only
        // pivot is singular and no progress is possible from x = 0.
        let a = Mat::from_fn(4, 4, |i, j| if i == j { i as f64 } else { 0.0 });
        let b = Col::from_fn(4, |i| if i == 0 { 2.0 } else { 0.0 });

        let out = gmres(a.as_ref(), b.as_ref(), 3).unwrap();

        assert_eq!(out.termination, Termination::Breakdown);
        assert_eq!(out.iterations, 1);
        assert_eq!(out.x, Col::<f64>::zeros(4));
        assert_eq!(out.residuals.len(), 2);
        for r in out.relative_residuals() {
            assert!((r - 1.0).abs() < 1e-15);
        }
    }
}
