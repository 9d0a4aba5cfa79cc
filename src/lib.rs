//! Arnoldi iteration for dense real matrices.
//!
//! This crate builds an orthonormal basis $\mathbf{Q}$ of the Krylov subspace
//! $\mathcal{K}_m(\mathbf{A}, \mathbf{u}) = \mathrm{span}\{\mathbf{u}, \mathbf{A}\mathbf{u}, \dots, \mathbf{A}^{m-1}\mathbf{u}\}$
//! together with the upper Hessenberg matrix $\mathbf{H}$ that represents the action of
//! $\mathbf{A}$ on that basis, so that $\mathbf{A}\mathbf{Q}_m = \mathbf{Q}_{m+1}\mathbf{H}_m$.
//! It is the building block of GMRES, Arnoldi eigenvalue estimation and Krylov
//! model-order reduction.
//!
//! Storage is dense and based on [`faer`]. The engine operates on any
//! [`matrix::LinearOperator`], with implementations provided for dense faer matrices.
//!
//! ## Algorithm
//!
//! Each step applies $\mathbf{A}$ to the newest basis vector and orthogonalizes the
//! result against all previous ones with modified Gram-Schmidt, projecting out one
//! direction at a time from the already-updated vector. The projection coefficients
//! and the residual norm form one column of $\mathbf{H}$.
//!
//! If the residual norm drops below [`BREAKDOWN_TOLERANCE`], the subspace built so far
//! is invariant under $\mathbf{A}$. This is reported as
//! [`algorithms::Termination::Breakdown`] on a successful result, not as an error.
//!
//! ## Example Usage
//!
//! ```rust
//! use faer::{Col, Mat};
//! use krylov_arnoldi::{Termination, arnoldi};
//!
//! let a = Mat::from_fn(4, 4, |i, j| {
//!     if i == j { 2.0 }
//!     else if j == i + 1 { -1.0 }
//!     else if i == j + 2 { 0.5 }
//!     else { 0.0 }
//! });
//! let u = Col::from_fn(4, |i| (i + 1) as f64);
//!
//! let out = arnoldi(a.as_ref(), u.as_ref(), 3).unwrap();
//!
//! assert_eq!(out.termination, Termination::Completed);
//! assert_eq!((out.q.nrows(), out.q.ncols()), (4, 4));
//! assert_eq!((out.h.nrows(), out.h.ncols()), (4, 3));
//! // Upper Hessenberg: nothing below the first subdiagonal.
//! assert_eq!(out.h[(2, 0)], 0.0);
//! assert_eq!(out.h[(3, 0)], 0.0);
//! assert_eq!(out.h[(3, 1)], 0.0);
//! ```

pub mod algorithms;
pub mod error;
pub mod matrix;
pub mod solvers;
pub mod utils;
pub mod vector;

pub use algorithms::{ArnoldiOutput, BREAKDOWN_TOLERANCE, Termination};
pub use error::{ArnoldiError, ArnoldiErrorKind};
pub use solvers::{GmresOutput, arnoldi, gmres};
