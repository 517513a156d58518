use super::Op;
use crate::{Matrix, Vector};
use num_traits::{One, Zero};

/// LinearOp is a trait for operators that depend linearly on the input `x`.
///
/// An example of a linear operator is a matrix-vector product `y = A * x`.
/// It extends the [Op] trait with methods for calling the operator via a
/// GEMV-like operation (i.e. `y = A * x + beta * y`), and for computing the
/// matrix representation of the operator.
pub trait LinearOp: Op {
    /// Compute the operator `y = A * x`, the default implementation uses [Self::gemv_inplace].
    fn call_inplace(&self, x: &Self::V, y: &mut Self::V) {
        let beta = Self::T::zero();
        self.gemv_inplace(x, beta, y);
    }

    /// Compute the operator via a GEMV operation (i.e. `y = A * x + beta * y`)
    fn gemv_inplace(&self, x: &Self::V, beta: Self::T, y: &mut Self::V);

    /// Compute the matrix representation of the operator and return it.
    /// The default implementation assembles the matrix column by column using
    /// [Self::call_inplace], but it can be overriden for more efficient
    /// implementations.
    fn matrix(&self) -> Self::M {
        let mut y = Self::M::zeros(self.nout(), self.nstates());
        let mut v = Self::V::zeros(self.nstates());
        let mut col = Self::V::zeros(self.nout());
        for j in 0..self.nstates() {
            v.set_index(j, Self::T::one());
            self.call_inplace(&v, &mut col);
            y.set_column(j, &col);
            v.set_index(j, Self::T::zero());
        }
        y
    }
}
