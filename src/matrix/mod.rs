use std::fmt::Debug;

use crate::error::ItersolError;
use crate::{IndexType, Scalar, Vector};

#[cfg(feature = "faer")]
mod dense_faer_serial;
#[cfg(feature = "nalgebra")]
mod dense_nalgebra_serial;

pub trait MatrixCommon: Sized + Debug {
    type V: Vector<T = Self::T>;
    type T: Scalar;

    fn nrows(&self) -> IndexType;
    fn ncols(&self) -> IndexType;
}

/// A dense matrix owned by one of the execution backends.
pub trait Matrix: MatrixCommon + Clone {
    /// Create a new matrix of shape `nrows` x `ncols` filled with zeros
    fn zeros(nrows: IndexType, ncols: IndexType) -> Self;

    /// Create a new diagonal matrix from a [Vector] holding the diagonal elements
    fn from_diagonal(v: &Self::V) -> Self;

    /// Create a new matrix from a vector of triplets (i, j, value) where i and j are the row and column indices of the value
    fn try_from_triplets(
        nrows: IndexType,
        ncols: IndexType,
        triplets: Vec<(IndexType, IndexType, Self::T)>,
    ) -> Result<Self, ItersolError>;

    /// Perform a matrix-vector multiplication `y = alpha * self * x + beta * y`.
    fn gemv(&self, alpha: Self::T, x: &Self::V, beta: Self::T, y: &mut Self::V);

    /// sets the values of column `j` to be equal to the values in `v`
    fn set_column(&mut self, j: IndexType, v: &Self::V);
}
