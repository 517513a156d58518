// unit is an operator that returns the input vector

use crate::{LinearOp, Matrix, Op, Vector};
use num_traits::One;
use std::marker::PhantomData;

/// A dummy operator that returns the input vector.
pub struct UnitOp<M: Matrix> {
    n: usize,
    _phantom: PhantomData<M>,
}

impl<M: Matrix> UnitOp<M> {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            _phantom: PhantomData,
        }
    }
}

impl<M: Matrix> Op for UnitOp<M> {
    type T = M::T;
    type V = M::V;
    type M = M;
    fn nstates(&self) -> usize {
        self.n
    }
    fn nout(&self) -> usize {
        self.n
    }
}

impl<M: Matrix> LinearOp for UnitOp<M> {
    fn gemv_inplace(&self, x: &Self::V, beta: Self::T, y: &mut Self::V) {
        y.axpy(Self::T::one(), x, beta);
    }
}
