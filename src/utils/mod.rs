//! Supporting utilities for the command-line tools and the test suites.
//!
//! None of this is needed to run the Arnoldi engine itself:
//!
//! - **`data_loader`**: Parses dense matrices and vectors from whitespace-separated
//!   text files.
//! - **`fixtures`**: The canonical 10×10 problem and the tridiagonal GMRES problem.
//! - **`metrics`**: Orthogonality loss, Arnoldi relation residual and Hessenberg
//!   structure checks.
//! - **`report`**: Fixed-precision text output for matrices.

pub mod data_loader;
pub mod fixtures;
pub mod metrics;
pub mod report;
