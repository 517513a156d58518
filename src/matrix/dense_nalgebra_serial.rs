use nalgebra::{DMatrix, DVector};

use crate::error::{ItersolError, MatrixError};
use crate::{matrix_error, IndexType, Scalar};

use super::{Matrix, MatrixCommon};

impl<T: Scalar> MatrixCommon for DMatrix<T> {
    type V = DVector<T>;
    type T = T;

    fn nrows(&self) -> IndexType {
        self.nrows()
    }
    fn ncols(&self) -> IndexType {
        self.ncols()
    }
}

impl<T: Scalar> Matrix for DMatrix<T> {
    fn zeros(nrows: IndexType, ncols: IndexType) -> Self {
        Self::zeros(nrows, ncols)
    }
    fn from_diagonal(v: &DVector<T>) -> Self {
        Self::from_diagonal(v)
    }
    fn try_from_triplets(
        nrows: IndexType,
        ncols: IndexType,
        triplets: Vec<(IndexType, IndexType, T)>,
    ) -> Result<Self, ItersolError> {
        let mut m = Self::zeros(nrows, ncols);
        for (i, j, v) in triplets {
            if i >= nrows || j >= ncols {
                return Err(matrix_error!(IndexOutOfBounds));
            }
            m[(i, j)] = v;
        }
        Ok(m)
    }
    fn gemv(&self, alpha: Self::T, x: &Self::V, beta: Self::T, y: &mut Self::V) {
        y.gemv(alpha, self, x, beta);
    }
    fn set_column(&mut self, j: IndexType, v: &Self::V) {
        self.column_mut(j).copy_from(v);
    }
}
