use crate::scalar::Scale;
use crate::{IndexType, Scalar};
use num_traits::Zero;
use std::fmt::Debug;
use std::ops::MulAssign;

#[cfg(feature = "faer")]
mod faer_serial;
#[cfg(feature = "nalgebra")]
mod nalgebra_serial;

pub trait VectorCommon: Sized + Debug {
    type T: Scalar;
}

/// A dense column vector resident in some execution backend.
///
/// The solver code only talks to vectors through this trait, so a backend is
/// free to keep the data on an accelerator: every operation here is a bulk
/// operation except [Vector::get_index] / [Vector::set_index], which move a
/// single scalar between the backend and the host.
pub trait Vector: VectorCommon + Clone + MulAssign<Scale<Self::T>> {
    fn len(&self) -> IndexType;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn from_element(len: IndexType, value: Self::T) -> Self;
    fn zeros(len: IndexType) -> Self {
        Self::from_element(len, Self::T::zero())
    }
    fn from_vec(vec: Vec<Self::T>) -> Self;
    fn clone_as_vec(&self) -> Vec<Self::T>;
    fn fill(&mut self, value: Self::T);
    fn get_index(&self, index: IndexType) -> Self::T;
    fn set_index(&mut self, index: IndexType, value: Self::T);

    /// returns the 2-norm of the vector
    fn norm(&self) -> Self::T;

    /// returns the inner product `<self, other>`
    fn dot(&self, other: &Self) -> Self::T;

    /// computes `self = alpha * x + beta * self`
    fn axpy(&mut self, alpha: Self::T, x: &Self, beta: Self::T);

    fn copy_from(&mut self, other: &Self);

    /// copy the first `len` entries of `other` into the first `len` entries
    /// of `self`, leaving the remainder untouched
    fn copy_from_head(&mut self, other: &Self, len: IndexType);

    /// copy the first `dst.len()` entries of `self` into a host slice
    fn copy_head_to_slice(&self, dst: &mut [Self::T]);

    fn assert_eq_st(&self, other: &Self, tol: Self::T) {
        assert_eq!(
            self.len(),
            other.len(),
            "Vector length mismatch: {} != {}",
            self.len(),
            other.len()
        );
        for i in 0..self.len() {
            let (a, b) = (self.get_index(i), other.get_index(i));
            assert!(
                num_traits::abs(a - b) <= tol,
                "Vector element mismatch at index {}: {} != {}",
                i,
                a,
                b
            );
        }
    }
}
