use std::ops::MulAssign;

use faer::{unzipped, zipped, Col};

use crate::{IndexType, Scale};

use super::{Vector, VectorCommon};

impl VectorCommon for Col<f64> {
    type T = f64;
}

impl MulAssign<Scale<f64>> for Col<f64> {
    fn mul_assign(&mut self, rhs: Scale<f64>) {
        *self = &*self * faer::scale(rhs.value());
    }
}

impl Vector for Col<f64> {
    fn len(&self) -> IndexType {
        self.nrows()
    }
    fn from_element(len: IndexType, value: f64) -> Self {
        Col::from_fn(len, |_| value)
    }
    fn from_vec(vec: Vec<f64>) -> Self {
        Col::from_fn(vec.len(), |i| vec[i])
    }
    fn clone_as_vec(&self) -> Vec<f64> {
        (0..self.nrows()).map(|i| self[i]).collect()
    }
    fn fill(&mut self, value: f64) {
        zipped!(self.as_mut()).for_each(|unzipped!(mut s)| *s = value);
    }
    fn get_index(&self, index: IndexType) -> f64 {
        self[index]
    }
    fn set_index(&mut self, index: IndexType, value: f64) {
        self[index] = value;
    }
    fn norm(&self) -> f64 {
        self.norm_l2()
    }
    fn dot(&self, other: &Self) -> f64 {
        let mut acc = 0.0;
        for i in 0..self.nrows() {
            acc += self[i] * other[i];
        }
        acc
    }
    fn axpy(&mut self, alpha: f64, x: &Self, beta: f64) {
        *self = &*self * faer::scale(beta) + x * faer::scale(alpha);
    }
    fn copy_from(&mut self, other: &Self) {
        self.copy_from(other);
    }
    fn copy_from_head(&mut self, other: &Self, len: IndexType) {
        for i in 0..len {
            self[i] = other[i];
        }
    }
    fn copy_head_to_slice(&self, dst: &mut [f64]) {
        for (i, d) in dst.iter_mut().enumerate() {
            *d = self[i];
        }
    }
}

// tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::scale;

    #[test]
    fn test_axpy() {
        let mut v = Col::from_fn(3, |i| (i + 1) as f64);
        let x = Col::from_fn(3, |i| 2.0 * (i + 1) as f64);
        Vector::axpy(&mut v, 0.5, &x, 2.0);
        v.assert_eq_st(&Vector::from_vec(vec![3.0, 8.0, 13.0]), 1e-14);
    }

    #[test]
    fn test_norm_and_dot() {
        let v: Col<f64> = Vector::from_vec(vec![3.0, 4.0]);
        assert_eq!(Vector::norm(&v), 5.0);
        let w: Col<f64> = Vector::from_vec(vec![1.0, 2.0]);
        assert_eq!(v.dot(&w), 11.0);
    }

    #[test]
    fn test_copy_from_head() {
        let mut v: Col<f64> = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        let src: Col<f64> = Vector::from_vec(vec![-1.0, -2.0, -3.0]);
        v.copy_from_head(&src, 2);
        v.assert_eq_st(&Vector::from_vec(vec![-1.0, -2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_clone_as_vec() {
        let v: Col<f64> = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        assert_eq!(v.clone_as_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_mul_assign_scale() {
        let mut v: Col<f64> = Vector::from_vec(vec![1.0, -2.0, 3.0]);
        v *= scale(2.0);
        v.assert_eq_st(&Vector::from_vec(vec![2.0, -4.0, 6.0]), 0.0);
    }
}
