//! Iterative solvers for the linear problem `Ax = b`, where `A` is a
//! [LinearOp](crate::LinearOp) and the vectors live in one of the execution
//! backends.

pub mod gmres;

pub use gmres::{Gmres, GmresConfig, GmresMonitor, GmresSolution, LogMonitor};
