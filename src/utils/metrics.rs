//! Numerical diagnostics for Arnoldi decompositions.
//!
//! These are the quantities the experiment binaries report and the test suites
//! assert on: loss of orthogonality of the basis, how well the Arnoldi relation
//! holds, and whether the Hessenberg structure is intact.

use crate::{algorithms::ArnoldiOutput, error::ArnoldiError, matrix::LinearOperator};
use faer::{Mat, MatRef};

/// Loss of orthogonality `‖I − QᵀQ‖_F` of a basis matrix.
pub fn orthogonality_loss(q: MatRef<'_, f64>) -> f64 {
    let k = q.ncols();
    let identity = Mat::<f64>::identity(k, k);
    (&identity - q.transpose() * q).norm_l2()
}

/// Frobenius norm of `A·Q[:, 0..k] − Q·H[0..c, 0..k]`, where `k` is the number of
/// steps taken and `c` the number of basis columns returned.
///
/// After a breakdown the dropped term `H[k, k-1]·q_k` is below the breakdown
/// tolerance, so the residual stays small in every termination mode.
pub fn arnoldi_relation_residual<O: LinearOperator + ?Sized>(
    operator: &O,
    output: &ArnoldiOutput,
) -> Result<f64, ArnoldiError> {
    let k = output.steps_taken;
    let c = output.q.ncols();
    let q = output.q.as_ref();

    let mut aq = Mat::<f64>::zeros(q.nrows(), k);
    for j in 0..k {
        let column = operator.apply(q.col(j))?;
        aq.col_mut(j).copy_from(column.as_ref());
    }

    let qh = q * output.h.as_ref().get(0..c, 0..k);
    Ok((&aq - &qh).norm_l2())
}

/// Largest magnitude among entries strictly below the first subdiagonal.
///
/// Zero for every matrix produced by the Arnoldi engine.
pub fn hessenberg_violation(h: MatRef<'_, f64>) -> f64 {
    let mut worst = 0.0_f64;
    for j in 0..h.ncols() {
        for i in (j + 2)..h.nrows() {
            worst = worst.max(h[(i, j)].abs());
        }
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::arnoldi;
    use faer::{Col, mat};

    #[test]
    fn test_orthogonality_loss_of_identity_is_zero() {
        let q = Mat::<f64>::identity(5, 3);
        assert_eq!(orthogonality_loss(q.as_ref()), 0.0);
    }

    #[test]
    fn test_orthogonality_loss_detects_parallel_columns() {
        let q = Mat::from_fn(2, 2, |i, _| if i == 0 { 1.0 } else { 0.0 });
        // QᵀQ = [[1, 1], [1, 1]], off-diagonals contribute sqrt(2).
        assert!((orthogonality_loss(q.as_ref()) - 2.0_f64.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn test_hessenberg_violation() {
        let mut h: Mat<f64> = mat![[1.0, 2.0], [3.0, 4.0], [0.0, 5.0]];
        assert_eq!(hessenberg_violation(h.as_ref()), 0.0);
        h[(2, 0)] = -0.5;
        assert_eq!(hessenberg_violation(h.as_ref()), 0.5);
    }

    #[test]
    fn test_relation_residual_is_small() {
        let a: Mat<f64> = mat![[2.0, 1.0, 0.0], [0.0, 3.0, 1.0], [1.0, 0.0, 4.0]];
        let u = Col::from_fn(3, |i| 1.0 + i as f64);

        let out = arnoldi(a.as_ref(), u.as_ref(), 2).unwrap();

        assert!(arnoldi_relation_residual(&a, &out).unwrap() < 1e-12);
    }
}
