use faer::{Col, Mat};

use crate::error::{ItersolError, MatrixError};
use crate::{matrix_error, IndexType};

use super::{Matrix, MatrixCommon};

impl MatrixCommon for Mat<f64> {
    type V = Col<f64>;
    type T = f64;

    fn nrows(&self) -> IndexType {
        self.nrows()
    }
    fn ncols(&self) -> IndexType {
        self.ncols()
    }
}

impl Matrix for Mat<f64> {
    fn zeros(nrows: IndexType, ncols: IndexType) -> Self {
        Self::zeros(nrows, ncols)
    }
    fn from_diagonal(v: &Col<f64>) -> Self {
        let dim = v.nrows();
        Self::from_fn(dim, dim, |i, j| if i == j { v[i] } else { 0.0 })
    }
    fn try_from_triplets(
        nrows: IndexType,
        ncols: IndexType,
        triplets: Vec<(IndexType, IndexType, f64)>,
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
        *y = faer::scale(alpha) * self * x + faer::scale(beta) * &*y;
    }
    fn set_column(&mut self, j: IndexType, v: &Self::V) {
        let nrows = self.nrows();
        self.get_mut(0..nrows, j).copy_from(v);
    }
}
