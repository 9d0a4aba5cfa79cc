//! Fixed test problems used by the binaries and the test suites.

use faer::{Col, Mat};

/// Krylov degree used with [`reference_matrix`] and [`reference_seed`].
pub const REFERENCE_DEGREE: usize = 9;

const REFERENCE_MATRIX: [[f64; 10]; 10] = [
    [3.0, 8.0, 7.0, 3.0, 3.0, 7.0, 2.0, 3.0, 4.0, 8.0],
    [5.0, 4.0, 1.0, 6.0, 9.0, 8.0, 3.0, 7.0, 1.0, 9.0],
    [3.0, 6.0, 9.0, 4.0, 8.0, 6.0, 5.0, 6.0, 6.0, 6.0],
    [5.0, 3.0, 4.0, 7.0, 4.0, 9.0, 2.0, 3.0, 5.0, 1.0],
    [4.0, 4.0, 2.0, 1.0, 7.0, 4.0, 2.0, 2.0, 4.0, 5.0],
    [4.0, 2.0, 8.0, 6.0, 6.0, 5.0, 2.0, 1.0, 1.0, 2.0],
    [2.0, 8.0, 9.0, 5.0, 2.0, 9.0, 4.0, 7.0, 3.0, 3.0],
    [9.0, 3.0, 2.0, 2.0, 7.0, 3.0, 4.0, 8.0, 7.0, 7.0],
    [9.0, 1.0, 9.0, 3.0, 3.0, 1.0, 2.0, 7.0, 7.0, 1.0],
    [9.0, 3.0, 2.0, 2.0, 6.0, 4.0, 4.0, 7.0, 3.0, 5.0],
];

const REFERENCE_SEED: [f64; 10] = [
    0.757516242460009,
    2.734057963614329,
    -0.555605907443403,
    1.144284746786790,
    0.645280108318073,
    -0.085488474462339,
    -0.623679022063185,
    -0.465240896342741,
    2.382909057772335,
    -0.120465395885881,
];

/// The canonical non-symmetric 10×10 integer matrix.
pub fn reference_matrix() -> Mat<f64> {
    Mat::from_fn(10, 10, |i, j| REFERENCE_MATRIX[i][j])
}

/// The canonical seed vector paired with [`reference_matrix`].
pub fn reference_seed() -> Col<f64> {
    Col::from_fn(10, |i| REFERENCE_SEED[i])
}

/// The `n×n` tridiagonal matrix with `-4` on the diagonal and `1` on both
/// off-diagonals.
pub fn tridiagonal_matrix(n: usize) -> Mat<f64> {
    Mat::from_fn(n, n, |i, j| {
        if i == j {
            -4.0
        } else if i.abs_diff(j) == 1 {
            1.0
        } else {
            0.0
        }
    })
}

/// Right-hand side paired with [`tridiagonal_matrix`]: `b[i] = (i+1)/n` for
/// `i < n-1` and `b[n-1] = 1`.
pub fn tridiagonal_rhs(n: usize) -> Col<f64> {
    Col::from_fn(n, |i| {
        if i + 1 == n {
            1.0
        } else {
            (i + 1) as f64 / n as f64
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_problem_shapes() {
        let a = reference_matrix();
        let u = reference_seed();
        assert_eq!((a.nrows(), a.ncols()), (10, 10));
        assert_eq!(u.nrows(), 10);
        assert_eq!(a[(7, 0)], 9.0);
        assert_eq!(u[8], 2.382909057772335);
    }

    #[test]
    fn test_tridiagonal_fixture() {
        let a = tridiagonal_matrix(4);
        assert_eq!(a[(0, 0)], -4.0);
        assert_eq!(a[(1, 0)], 1.0);
        assert_eq!(a[(0, 1)], 1.0);
        assert_eq!(a[(0, 2)], 0.0);

        let b = tridiagonal_rhs(4);
        assert_eq!(b[0], 0.25);
        assert_eq!(b[2], 0.75);
        assert_eq!(b[3], 1.0);
    }
}
