//! # Itersol
//!
//! Itersol is a library for solving dense and sparse linear systems `A x = b`
//! with iterative Krylov methods. The solvers are written once against a set
//! of capability traits and instantiated per execution backend, so the same
//! solver code runs against [nalgebra](https://nalgebra.org) vectors, [faer](https://github.com/sarah-ek/faer-rs)
//! vectors, or any other type that implements the [Vector] trait.
//!
//! ## Solving a system
//!
//! A system is described by a [LinearOp], which only needs to know how to
//! apply itself to a vector. Use [MatrixOp] to wrap an assembled [Matrix], or
//! [LinearClosure] for a matrix-free operator. Configure the solver with
//! [GmresConfig] (relative tolerance, iteration budget, Krylov dimension
//! before restart) and call [Gmres::solve], or [Gmres::solve_preconditioned]
//! to supply a [Preconditioner]. The returned [GmresSolution] bundles the
//! solution estimate with the iteration count and the achieved residual
//! estimate; running out of iteration budget is reported there, not as an
//! error.
//!
//! ## Solvers
//!
//! The provided iterative solver is:
//! - [Gmres]: restarted GMRES in the Householder formulation of Walker's
//!   "A Simpler GMRES", robust against loss of orthogonality in the Krylov
//!   basis.
//!
//! ## Observability
//!
//! [Gmres] reports per-restart and per-iteration progress through the
//! [GmresMonitor] hook. The default [LogMonitor] forwards these events to the
//! [log] facade; inject a custom monitor with [Gmres::with_monitor] to record
//! convergence histories.
//!
//! ## Matrix and vector types
//!
//! The following types implement the [Vector] and [Matrix] traits:
//! - [nalgebra::DVector] and [nalgebra::DMatrix] (any [Scalar] element type).
//! - [faer::Col] and [faer::Mat] (f64).
//!
//! If you wish to use your own types, implement [Vector], [VectorCommon],
//! [Matrix] and [MatrixCommon] for them.

pub mod error;
pub mod linear_solver;
pub mod matrix;
pub mod op;
pub mod preconditioner;
pub mod scalar;
pub mod vector;

pub use linear_solver::{Gmres, GmresConfig, GmresMonitor, GmresSolution, LogMonitor};

pub use matrix::{Matrix, MatrixCommon};
pub use op::{
    linear_closure::LinearClosure, linear_op::LinearOp, matrix::MatrixOp, unit::UnitOp, Op,
};
pub use preconditioner::{IdentityPreconditioner, Preconditioner};
pub use scalar::{IndexType, Scalar, Scale};
pub use vector::{Vector, VectorCommon};

pub use scalar::scale;
