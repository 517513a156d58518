use crate::{LinearOp, Matrix, MatrixCommon, Op};
use num_traits::One;

/// A [LinearOp] backed by an assembled [Matrix].
pub struct MatrixOp<M: Matrix> {
    m: M,
}

impl<M: Matrix> MatrixOp<M> {
    pub fn new(m: M) -> Self {
        Self { m }
    }
    pub fn m_mut(&mut self) -> &mut M {
        &mut self.m
    }
    pub fn m(&self) -> &M {
        &self.m
    }
}

impl<M: Matrix> Op for MatrixOp<M> {
    type V = M::V;
    type T = M::T;
    type M = M;
    fn nstates(&self) -> usize {
        self.m.ncols()
    }
    fn nout(&self) -> usize {
        self.m.nrows()
    }
}

impl<M: Matrix> LinearOp for MatrixOp<M> {
    fn gemv_inplace(&self, x: &Self::V, beta: Self::T, y: &mut Self::V) {
        self.m.gemv(Self::T::one(), x, beta, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vector;
    use nalgebra::{DMatrix, DVector};

    #[test]
    fn test_matrix_op_call() {
        let diagonal = DVector::from_vec(vec![2.0, 3.0]);
        let op = MatrixOp::new(DMatrix::from_diagonal(&diagonal));
        assert_eq!(op.nstates(), 2);
        assert_eq!(op.nout(), 2);
        let x = DVector::from_vec(vec![1.0, 2.0]);
        let mut y = DVector::zeros(2);
        op.call_inplace(&x, &mut y);
        y.assert_eq_st(&DVector::from_vec(vec![2.0, 6.0]), 1e-14);
    }
}
