use crate::{Matrix, Scalar, Vector};

pub mod linear_closure;
pub mod linear_op;
pub mod matrix;
pub mod unit;

/// A generic operator trait.
///
/// Op is a trait for operators that map an input vector `x` of length
/// [Op::nstates] to an output vector `y` of length [Op::nout]. It fixes the
/// scalar, vector and matrix types used by the operator, which in turn pins
/// the execution backend the operator runs on.
pub trait Op {
    type T: Scalar;
    type V: Vector<T = Self::T>;
    type M: Matrix<T = Self::T, V = Self::V>;

    /// Return the number of input states of the operator.
    fn nstates(&self) -> usize;

    /// Return the number of outputs of the operator.
    fn nout(&self) -> usize;
}
