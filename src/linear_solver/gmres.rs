//! Implementation of the restarted GMRES solver, following the Householder
//! formulation proposed by Walker in "A Simpler GMRES".
//!
//! Instead of orthogonalising the Krylov basis explicitly with Gram-Schmidt,
//! the basis is represented implicitly by a sequence of Householder reflectors.
//! Each inner iteration appends one reflector, one row of the (transposed)
//! triangular factor, and one component of the projected right-hand side; the
//! correction for the current restart cycle is then recovered by
//! back-substitution and by applying the reflectors in reverse.

use serde::Serialize;

use crate::error::{ItersolError, LinearSolverError};
use crate::preconditioner::{IdentityPreconditioner, Preconditioner};
use crate::{scale, IndexType, LinearOp, Scalar, Vector};
use num_traits::{One, Zero};

/// Configuration for the [Gmres] solver.
///
/// Construction arguments are not validated: a `krylov_dim` of zero is a
/// caller error.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct GmresConfig<T: Scalar> {
    tol: T,
    max_iterations: IndexType,
    krylov_dim: IndexType,
}

impl<T: Scalar> GmresConfig<T> {
    /// Create a new configuration
    ///
    /// # Arguments
    ///
    /// * `tol` - Relative tolerance for the residual (the solver quits once `||r|| < tol * ||r_initial||`)
    /// * `max_iterations` - The maximum number of inner iterations, counted across restarts
    /// * `krylov_dim` - The maximum dimension of the Krylov space before a restart
    pub fn new(tol: T, max_iterations: IndexType, krylov_dim: IndexType) -> Self {
        Self {
            tol,
            max_iterations,
            krylov_dim,
        }
    }

    /// Returns the relative tolerance
    pub fn tolerance(&self) -> T {
        self.tol
    }

    /// Returns the maximum number of iterations
    pub fn max_iterations(&self) -> IndexType {
        self.max_iterations
    }

    /// Returns the maximum dimension of the Krylov space before restart
    pub fn krylov_dim(&self) -> IndexType {
        self.krylov_dim
    }

    /// Returns the maximum number of restarts, chosen so that a full final
    /// restart cycle never takes the iteration count past
    /// [Self::max_iterations]
    pub fn max_restarts(&self) -> IndexType {
        let ret = self.max_iterations / self.krylov_dim;
        if ret > 0 && ret * self.krylov_dim == self.max_iterations {
            return ret - 1;
        }
        ret
    }
}

impl<T: Scalar> Default for GmresConfig<T> {
    fn default() -> Self {
        Self::new(1e-10.into(), 300, 20)
    }
}

/// The outcome of a [Gmres] solve.
///
/// The solver never fails on numerical grounds: if the iteration budget is
/// exhausted before the tolerance is met, the best estimate so far is
/// returned and `error` holds the un-normalised residual estimate of the last
/// restart cycle. Callers should inspect `error` and `iters` to decide
/// whether the solve actually converged.
#[derive(Clone, Debug)]
pub struct GmresSolution<V: Vector> {
    /// the solution estimate
    pub x: V,
    /// total number of inner iterations executed across all restarts
    pub iters: IndexType,
    /// the relative residual estimate on convergence, or an un-normalised
    /// intermediate estimate if no restart converged
    pub error: V::T,
}

/// An observation hook into a running [Gmres] solve.
///
/// Both methods default to doing nothing, so a monitor only needs to
/// implement the events it cares about.
pub trait GmresMonitor<T: Scalar> {
    /// called once per restart cycle with the relative residual of the
    /// current solution estimate, before the Krylov basis is rebuilt
    fn on_restart(&mut self, _restart: IndexType, _rel_residual: T) {}

    /// called once per inner iteration with the running estimate of the
    /// relative residual norm
    fn on_iteration(&mut self, _iteration: IndexType, _rel_estimate: T) {}
}

/// The default monitor: forwards solver progress to the [log] facade.
#[derive(Default, Clone, Copy, Debug)]
pub struct LogMonitor;

impl<T: Scalar> GmresMonitor<T> for LogMonitor {
    fn on_restart(&mut self, restart: IndexType, rel_residual: T) {
        log::debug!("gmres restart {restart}: relative residual {rel_residual}");
    }
    fn on_iteration(&mut self, iteration: IndexType, rel_estimate: T) {
        log::trace!("gmres iteration {iteration}: residual estimate {rel_estimate}");
    }
}

/// apply the Householder reflection with unit normal `u` to `v` in place:
/// `v <- v - 2 * u * <u, v>`
fn reflect<V: Vector>(u: &V, two: V::T, v: &mut V) {
    let proj = two * u.dot(v);
    v.axpy(-proj, u, V::T::one());
}

/// Restarted GMRES over a [LinearOp], in the Householder formulation.
///
/// The solver is generic over the scalar type and over a [GmresMonitor]; by
/// default progress goes to the [log] facade via [LogMonitor].
pub struct Gmres<T: Scalar, Mon: GmresMonitor<T> = LogMonitor> {
    config: GmresConfig<T>,
    monitor: Mon,
}

impl<T: Scalar> Gmres<T> {
    pub fn new(config: GmresConfig<T>) -> Self {
        Self::with_monitor(config, LogMonitor)
    }
}

impl<T: Scalar> Default for Gmres<T> {
    fn default() -> Self {
        Self::new(GmresConfig::default())
    }
}

impl<T: Scalar, Mon: GmresMonitor<T>> Gmres<T, Mon> {
    pub fn with_monitor(config: GmresConfig<T>, monitor: Mon) -> Self {
        Self { config, monitor }
    }

    pub fn config(&self) -> &GmresConfig<T> {
        &self.config
    }

    /// Solve `op * x = rhs` without preconditioning.
    ///
    /// Equivalent to [Self::solve_preconditioned] with an
    /// [IdentityPreconditioner], and produces bit-identical results to it.
    pub fn solve<C>(&mut self, op: &C, rhs: &C::V) -> Result<GmresSolution<C::V>, ItersolError>
    where
        C: LinearOp<T = T>,
    {
        self.solve_preconditioned(op, rhs, &IdentityPreconditioner)
    }

    /// Solve `op * x = rhs`, preconditioning every residual and candidate
    /// basis vector with `precond`.
    pub fn solve_preconditioned<C, P>(
        &mut self,
        op: &C,
        rhs: &C::V,
        precond: &P,
    ) -> Result<GmresSolution<C::V>, ItersolError>
    where
        C: LinearOp<T = T>,
        P: Preconditioner<C::V>,
    {
        let problem_size = rhs.len();
        if problem_size != op.nstates() {
            let error = LinearSolverError::RhsWrongLength {
                expected: op.nstates(),
                found: problem_size,
            };
            return Err(ItersolError::from(error));
        }
        let mut result = C::V::zeros(problem_size);

        // a Krylov space larger than the problem cannot be built (the error
        // is certain to be zero before the basis is full)
        let krylov_dim = self.config.krylov_dim().min(problem_size);

        let norm_rhs = rhs.norm();
        if norm_rhs == T::zero() {
            // solution is zero if the rhs norm is zero
            return Ok(GmresSolution {
                x: result,
                iters: 0,
                error: T::zero(),
            });
        }

        // scalar constants used throughout the loops, materialised once so
        // that accelerator backends are not handed a fresh host scalar per
        // iteration
        let one = T::one();
        let minus_one = -T::one();
        let two = T::from(2.0);
        let breakdown_tol = T::from(10.0) * T::EPSILON;

        let mut res = C::V::zeros(problem_size);
        let mut v_k_tilde = C::V::zeros(problem_size);
        let mut v_k_tilde_temp = C::V::zeros(problem_size);

        // the Householder reflectors, the triangular factor (stored
        // transposed: row k holds the coefficients of column k) and the
        // projected right-hand side
        let mut basis: Vec<C::V> = (0..krylov_dim).map(|_| C::V::zeros(problem_size)).collect();
        let mut triangular: Vec<Vec<T>> = vec![vec![T::zero(); krylov_dim]; krylov_dim];
        let mut projection_rhs: Vec<T> = vec![T::zero(); krylov_dim];

        let mut iters: IndexType = 0;
        let mut last_error = T::zero();

        for it in 0..=self.config.max_restarts() {
            // res = precond * (rhs - op * result)
            res.copy_from(rhs);
            op.call_inplace(&result, &mut v_k_tilde_temp);
            res.axpy(minus_one, &v_k_tilde_temp, one);
            precond.apply_in_place(&mut res);

            let rho_0 = res.norm();
            let mut rho = one;

            let rel_residual = rho_0 / norm_rhs;
            self.monitor.on_restart(it, rel_residual);
            if rel_residual < self.config.tolerance() {
                return Ok(GmresSolution {
                    x: result,
                    iters,
                    error: rel_residual,
                });
            }

            // res now holds the direction of the residual; rho tracks the
            // magnitude contribution through the inner loop
            res *= scale(one / rho_0);

            for u in basis.iter_mut() {
                u.fill(T::zero());
            }
            for row in triangular.iter_mut() {
                row.fill(T::zero());
            }
            projection_rhs.fill(T::zero());

            let mut k = 0;
            while k < krylov_dim {
                iters += 1;

                // candidate vector v~_k = P_0 .. P_{k-1} A P_{k-1} .. P_0 e_k,
                // built by applying the reflectors around the operator
                if k == 0 {
                    op.call_inplace(&res, &mut v_k_tilde);
                    precond.apply_in_place(&mut v_k_tilde);
                } else {
                    v_k_tilde.fill(T::zero());
                    v_k_tilde.set_index(k - 1, one);
                    for i in (0..k).rev() {
                        reflect(&basis[i], two, &mut v_k_tilde);
                    }
                    op.call_inplace(&v_k_tilde, &mut v_k_tilde_temp);
                    precond.apply_in_place(&mut v_k_tilde_temp);
                    v_k_tilde.copy_from(&v_k_tilde_temp);
                    for i in 0..k {
                        reflect(&basis[i], two, &mut v_k_tilde);
                    }
                }

                // the first k entries of v~_k are already in reflected
                // coordinates; the diagonal entry follows from the
                // Pythagorean relation between them and the full norm
                basis[k].fill(T::zero());
                basis[k].copy_from_head(&v_k_tilde, k);
                let diag = (v_k_tilde.dot(&v_k_tilde) - basis[k].dot(&basis[k])).sqrt();
                basis[k].set_index(k, diag);

                if num_traits::abs(diag) < breakdown_tol {
                    // the solution is already (up to round-off) in the
                    // current Krylov space, no need to proceed
                    break;
                }

                basis[k].copy_head_to_slice(&mut triangular[k][..k + 1]);

                // finalise the Householder vector and reflect the residual
                basis[k].axpy(one, &v_k_tilde, minus_one);
                let norm_u = basis[k].norm();
                basis[k] *= scale(one / norm_u);
                reflect(&basis[k], two, &mut res);

                // machine precision can push res[k] just outside [-rho, rho],
                // which would take the acos below out of its domain
                let mut res_k = res.get_index(k);
                if res_k > rho {
                    res_k = rho;
                    res.set_index(k, res_k);
                }
                if res_k < -rho {
                    res_k = -rho;
                    res.set_index(k, res_k);
                }

                projection_rhs[k] = res_k;
                rho *= (res_k / rho).acos().sin();

                k += 1;

                let rel_estimate = num_traits::abs(rho * rho_0 / norm_rhs);
                self.monitor.on_iteration(iters, rel_estimate);
                if rel_estimate < self.config.tolerance() {
                    // Krylov space is big enough
                    break;
                }
            }

            // in-place solution of the transposed upper triangular system
            for i in (0..k).rev() {
                for j in (i + 1)..k {
                    let correction = triangular[j][i] * projection_rhs[j];
                    projection_rhs[i] -= correction;
                }
                projection_rhs[i] /= triangular[i][i];
            }

            // fold the solved coefficients into the residual direction and
            // map it back out of the reflected coordinate system
            res *= scale(projection_rhs[0]);
            if k > 0 {
                for i in 0..(k - 1) {
                    res.set_index(i, res.get_index(i) + projection_rhs[i + 1]);
                }
            }
            for i in (0..k).rev() {
                reflect(&basis[i], two, &mut res);
            }
            res *= scale(rho_0);
            result.axpy(one, &res, one);

            let rel_estimate = num_traits::abs(rho * rho_0 / norm_rhs);
            if rel_estimate < self.config.tolerance() {
                return Ok(GmresSolution {
                    x: result,
                    iters,
                    error: rel_estimate,
                });
            }
            last_error = num_traits::abs(rho * rho_0);
        }

        // iteration budget exhausted, hand back the best estimate so far
        Ok(GmresSolution {
            x: result,
            iters,
            error: last_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear_solver::tests::{diagonal_problem, laplacian_problem};
    use crate::op::linear_closure::LinearClosure;
    use crate::op::unit::UnitOp;
    use crate::{Matrix, Vector};

    type MCpuNalgebra = nalgebra::DMatrix<f64>;
    type MCpuFaer = faer::Mat<f64>;

    #[test]
    fn test_config_defaults() {
        let config = GmresConfig::<f64>::default();
        assert_eq!(config.tolerance(), 1e-10);
        assert_eq!(config.max_iterations(), 300);
        assert_eq!(config.krylov_dim(), 20);
        let solver = Gmres::new(config);
        assert_eq!(solver.config().krylov_dim(), 20);
    }

    #[test]
    fn test_max_restarts() {
        assert_eq!(GmresConfig::<f64>::new(1e-10, 300, 20).max_restarts(), 14);
        assert_eq!(GmresConfig::<f64>::new(1e-10, 301, 20).max_restarts(), 15);
        assert_eq!(GmresConfig::<f64>::new(1e-10, 20, 20).max_restarts(), 0);
    }

    #[test]
    fn test_reflection_involution() {
        let u_raw = nalgebra::DVector::from_vec(vec![1.0, 2.0, -2.0]);
        let mut u = u_raw.clone();
        u *= crate::scale(1.0 / Vector::norm(&u_raw));
        let v = nalgebra::DVector::from_vec(vec![0.5, -1.5, 3.0]);

        let mut w = v.clone();
        reflect(&u, 2.0, &mut w);
        // an orthogonal transform preserves the norm
        assert!((Vector::norm(&w) - Vector::norm(&v)).abs() < 1e-14);
        // and a reflection applied twice is the identity
        reflect(&u, 2.0, &mut w);
        w.assert_eq_st(&v, 1e-14);
    }

    fn zero_rhs<M: Matrix>() {
        let (op, _, _) = diagonal_problem::<M>();
        let rhs = M::V::zeros(3);
        let soln = Gmres::default().solve(&op, &rhs).unwrap();
        assert_eq!(soln.iters, 0);
        assert_eq!(soln.error, M::T::zero());
        soln.x.assert_eq_st(&M::V::zeros(3), M::T::zero());
    }

    #[test]
    fn test_zero_rhs_nalgebra() {
        zero_rhs::<MCpuNalgebra>();
    }
    #[test]
    fn test_zero_rhs_faer() {
        zero_rhs::<MCpuFaer>();
    }

    fn identity_operator<M: Matrix>() {
        let op = UnitOp::<M>::new(4);
        let rhs = M::V::from_vec(vec![1.0.into(), (-2.0).into(), 3.0.into(), 0.5.into()]);
        // the residual already lies in the Krylov space after one iteration,
        // the first rho update lands within round-off of zero
        let config = GmresConfig::new(1e-6.into(), 300, 20);
        let soln = Gmres::new(config).solve(&op, &rhs).unwrap();
        soln.x.assert_eq_st(&rhs, 1e-6.into());
        assert!(soln.iters <= 1);
        assert!(soln.error < 1e-6.into());
    }

    #[test]
    fn test_identity_operator_nalgebra() {
        identity_operator::<MCpuNalgebra>();
    }
    #[test]
    fn test_identity_operator_faer() {
        identity_operator::<MCpuFaer>();
    }

    fn diagonal_spd<M: Matrix>() {
        let (op, rhs, expected) = diagonal_problem::<M>();
        let soln = Gmres::default().solve(&op, &rhs).unwrap();
        soln.x.assert_eq_st(&expected, 1e-8.into());
        assert!(soln.iters <= 3);
        assert!(soln.error < 1e-10.into());
    }

    #[test]
    fn test_diagonal_spd_nalgebra() {
        diagonal_spd::<MCpuNalgebra>();
    }
    #[test]
    fn test_diagonal_spd_faer() {
        diagonal_spd::<MCpuFaer>();
    }

    fn krylov_dim_clamped<M: Matrix>() {
        // a 2-dimensional system solved with the default krylov_dim of 20:
        // the basis must be capped at the problem size
        let diagonal = M::V::from_vec(vec![3.0.into(), 5.0.into()]);
        let op = crate::op::matrix::MatrixOp::new(M::from_diagonal(&diagonal));
        let rhs = M::V::from_vec(vec![6.0.into(), 10.0.into()]);
        let soln = Gmres::default().solve(&op, &rhs).unwrap();
        let expected = M::V::from_vec(vec![2.0.into(), 2.0.into()]);
        soln.x.assert_eq_st(&expected, 1e-8.into());
        assert!(soln.iters <= 2);
    }

    #[test]
    fn test_krylov_dim_clamped_nalgebra() {
        krylov_dim_clamped::<MCpuNalgebra>();
    }
    #[test]
    fn test_krylov_dim_clamped_faer() {
        krylov_dim_clamped::<MCpuFaer>();
    }

    fn laplacian<M: Matrix>() {
        let (op, rhs) = laplacian_problem::<M>(8);
        let soln = Gmres::default().solve(&op, &rhs).unwrap();
        // check the residual of the returned solution directly
        let mut residual = rhs.clone();
        op.gemv_inplace(&soln.x, (-1.0).into(), &mut residual);
        residual *= crate::scale((-1.0).into());
        assert!(residual.norm() < 1e-8.into());
        assert!(soln.error < 1e-10.into());
    }

    #[test]
    fn test_laplacian_nalgebra() {
        laplacian::<MCpuNalgebra>();
    }
    #[test]
    fn test_laplacian_faer() {
        laplacian::<MCpuFaer>();
    }

    fn identity_preconditioner_passthrough<M: Matrix>() {
        let (op, rhs) = laplacian_problem::<M>(6);
        let plain = Gmres::default().solve(&op, &rhs).unwrap();
        let precond = Gmres::default()
            .solve_preconditioned(&op, &rhs, &IdentityPreconditioner)
            .unwrap();
        // same floating-point operation sequence, so bit-for-bit equal
        plain.x.assert_eq_st(&precond.x, M::T::zero());
        assert_eq!(plain.iters, precond.iters);
        assert_eq!(plain.error, precond.error);
    }

    #[test]
    fn test_identity_preconditioner_passthrough_nalgebra() {
        identity_preconditioner_passthrough::<MCpuNalgebra>();
    }
    #[test]
    fn test_identity_preconditioner_passthrough_faer() {
        identity_preconditioner_passthrough::<MCpuFaer>();
    }

    fn matrix_free_closure<M: Matrix>() {
        // the same Laplacian stencil as laplacian_problem, expressed without
        // assembling a matrix
        let n = 8;
        let stencil = |x: &M::V, beta: M::T, y: &mut M::V| {
            let two: M::T = 2.0.into();
            for i in 0..n {
                let mut yi = two * x.get_index(i);
                if i > 0 {
                    yi = yi - x.get_index(i - 1);
                }
                if i + 1 < n {
                    yi = yi - x.get_index(i + 1);
                }
                y.set_index(i, yi + beta * y.get_index(i));
            }
        };
        let op = LinearClosure::<M, _>::new(stencil, n, n);
        let (assembled, rhs) = laplacian_problem::<M>(n);
        let soln_free = Gmres::default().solve(&op, &rhs).unwrap();
        let soln_assembled = Gmres::default().solve(&assembled, &rhs).unwrap();
        soln_free.x.assert_eq_st(&soln_assembled.x, 1e-6.into());
    }

    #[test]
    fn test_matrix_free_closure_nalgebra() {
        matrix_free_closure::<MCpuNalgebra>();
    }
    #[test]
    fn test_matrix_free_closure_faer() {
        matrix_free_closure::<MCpuFaer>();
    }

    #[test]
    fn test_rhs_wrong_length() {
        let (op, _, _) = diagonal_problem::<MCpuNalgebra>();
        let rhs = nalgebra::DVector::from_vec(vec![1.0, 2.0]);
        let result = Gmres::default().solve(&op, &rhs);
        assert!(result.is_err());
    }

    #[derive(Default)]
    struct RecordingMonitor {
        current_restart: usize,
        estimates: Vec<(usize, f64)>,
    }

    impl GmresMonitor<f64> for RecordingMonitor {
        fn on_restart(&mut self, restart: usize, _rel_residual: f64) {
            self.current_restart = restart;
        }
        fn on_iteration(&mut self, _iteration: usize, rel_estimate: f64) {
            self.estimates.push((self.current_restart, rel_estimate));
        }
    }

    #[test]
    fn test_monitor_rho_non_increasing() {
        // within one restart cycle every estimate is a rescaling of rho by
        // the same factor, and rho shrinks by a factor in [0, 1] each
        // iteration
        let (op, rhs) = laplacian_problem::<MCpuNalgebra>(8);
        let mut solver = Gmres::with_monitor(GmresConfig::default(), RecordingMonitor::default());
        let soln = solver.solve(&op, &rhs).unwrap();
        let monitor = &solver.monitor;
        assert_eq!(monitor.estimates.len(), soln.iters);
        for pair in monitor.estimates.windows(2) {
            let ((restart_a, est_a), (restart_b, est_b)) = (pair[0], pair[1]);
            if restart_a == restart_b {
                assert!(est_b <= est_a + 1e-14);
            }
        }
    }
}
