use crate::numerical::solve_result::{SolveError, SolveOutcome};
use crate::somelinalg::iterative_solvers_cpu::{
    LinearIteration, LinearSystemResult, validate_iterative_input,
};
use crate::somelinalg::linear_sys_diagnostics::{first_non_dominant_row, inf_norm_distance};
use log::{error, info, warn};
use nalgebra::{DMatrix, DVector};

/// Gauss-Seidel method for A x = b, swept in place:
/// x[i] = (b[i] - sum_{j < i} a_ij x_new[j] - sum_{j > i} a_ij x_old[j]) / a_ii.
///
/// Diagonal dominance is not required, a warning is logged when the matrix is not dominant
/// since convergence is then not guaranteed. A zero on the diagonal fails with
/// [`SolveError::ZeroDiagonal`], an iterate running away to infinity with
/// [`SolveError::Diverged`].
pub fn gauss_seidel(
    A: &DMatrix<f64>,
    b: &DVector<f64>,
    initial_guess: &DVector<f64>,
    tolerance: f64,
    max_iterations: usize,
) -> LinearSystemResult {
    if let Err(reason) = validate_iterative_input(A, b, initial_guess, tolerance, max_iterations)
    {
        error!("gauss-seidel: {}", reason);
        return SolveOutcome::Failed {
            reason,
            trace: Vec::new(),
        };
    }
    let n = A.nrows();
    if let Some(row) = (0..n).find(|&i| A[(i, i)] == 0.0) {
        let reason = SolveError::ZeroDiagonal { row };
        error!("gauss-seidel: {}", reason);
        return SolveOutcome::Failed {
            reason,
            trace: Vec::new(),
        };
    }
    if let Some(row) = first_non_dominant_row(A) {
        warn!(
            "gauss-seidel: the matrix is not strictly diagonally dominant (row {}), convergence is not guaranteed",
            row + 1
        );
    }
    info!(
        "gauss-seidel for a {}x{} system, tolerance = {}, max iterations = {}",
        n, n, tolerance, max_iterations
    );

    let mut trace = Vec::new();
    let mut x = initial_guess.clone();
    for k in 1..=max_iterations {
        let x_start = x.clone();
        for i in 0..n {
            let sigma: f64 = (0..n)
                .filter(|&j| j != i)
                .map(|j| A[(i, j)] * x[j])
                .sum();
            x[i] = (b[i] - sigma) / A[(i, i)];
        }
        if x.iter().any(|value| !value.is_finite()) {
            let reason = SolveError::Diverged { iteration: k };
            error!("gauss-seidel: {}", reason);
            return SolveOutcome::Failed { reason, trace };
        }
        let error = inf_norm_distance(&x, &x_start);
        trace.push(LinearIteration {
            iteration: k,
            values: x.clone(),
            error,
        });

        if error < tolerance {
            info!("gauss-seidel converged in {} iterations", k);
            return SolveOutcome::Converged { value: x, trace };
        }
    }

    warn!(
        "gauss-seidel: no convergence within {} iterations",
        max_iterations
    );
    SolveOutcome::ExhaustedWithBestEffort {
        value: x,
        trace,
        reason: SolveError::MaxIterationsReached { max_iterations },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::somelinalg::iterative_solvers_cpu::jacobi::jacobi;
    use crate::somelinalg::linear_sys_diagnostics::residual_inf_norm;
    use approx::assert_relative_eq;

    fn system() -> (DMatrix<f64>, DVector<f64>) {
        let A = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 2.0, 3.0, 5.0, 1.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![4.0, 7.0, 3.0]);
        (A, b)
    }

    #[test]
    fn test_gauss_seidel_residual() {
        let (A, b) = system();
        let result = gauss_seidel(&A, &b, &DVector::zeros(3), 1e-6, 50);
        assert!(result.is_converged());
        let x = result.value().unwrap();
        assert!(residual_inf_norm(&A, x, &b) < 1e-4);
        // exact solution is (0.5, 1, 0.5)
        assert_relative_eq!(x[0], 0.5, epsilon = 1e-5);
        assert_relative_eq!(x[1], 1.0, epsilon = 1e-5);
        assert_relative_eq!(x[2], 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_gauss_seidel_uses_updated_components() {
        let (A, b) = system();
        let result = gauss_seidel(&A, &b, &DVector::zeros(3), 1e-6, 1);
        let first = &result.trace()[0].values;
        // x0 = 4/4 = 1, x1 = (7 - 3*1)/5 = 0.8, x2 = (3 - 1 - 0.8)/3 = 0.4
        assert_relative_eq!(first[0], 1.0);
        assert_relative_eq!(first[1], 0.8, epsilon = 1e-15);
        assert_relative_eq!(first[2], 0.4, epsilon = 1e-15);
    }

    #[test]
    fn test_gauss_seidel_differs_from_jacobi_and_is_faster() {
        let (A, b) = system();
        let x0 = DVector::zeros(3);
        let gs = gauss_seidel(&A, &b, &x0, 1e-8, 100);
        let jac = jacobi(&A, &b, &x0, 1e-8, 100);
        assert!(gs.is_converged() && jac.is_converged());
        assert_ne!(gs.trace()[0].values, jac.trace()[0].values);
        assert!(gs.iterations() < jac.iterations());
        let (x_gs, x_jac) = (gs.value().unwrap(), jac.value().unwrap());
        for i in 0..3 {
            assert_relative_eq!(x_gs[i], x_jac[i], epsilon = 1e-7);
        }
    }

    #[test]
    fn test_gauss_seidel_runs_on_non_dominant_matrix() {
        // symmetric positive definite, row 0 is not dominant: Gauss-Seidel still converges
        let A = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 5.0]);
        let b = DVector::from_vec(vec![3.0, 7.0]);
        let result = gauss_seidel(&A, &b, &DVector::zeros(2), 1e-10, 500);
        assert!(result.is_converged());
        assert_relative_eq!(result.value().unwrap()[0], 1.0, epsilon = 1e-7);
        assert_relative_eq!(result.value().unwrap()[1], 1.0, epsilon = 1e-7);
        assert!(matches!(
            jacobi(&A, &b, &DVector::zeros(2), 1e-10, 500).error(),
            Some(SolveError::NotDiagonallyDominant { .. })
        ));
    }

    #[test]
    fn test_gauss_seidel_zero_diagonal_and_divergence() {
        let A = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 1.0]);
        let b = DVector::from_vec(vec![1.0, 2.0]);
        let result = gauss_seidel(&A, &b, &DVector::zeros(2), 1e-6, 50);
        assert_eq!(result.error(), Some(&SolveError::ZeroDiagonal { row: 0 }));

        // spectral radius of the iteration matrix is 100
        let A = DMatrix::from_row_slice(2, 2, &[1.0, 10.0, 10.0, 1.0]);
        let b = DVector::from_vec(vec![1.0, 1.0]);
        let result = gauss_seidel(&A, &b, &DVector::zeros(2), 1e-6, 1000);
        match result {
            SolveOutcome::Failed {
                reason: SolveError::Diverged { iteration },
                trace,
            } => assert_eq!(trace.len(), iteration - 1),
            other => panic!("expected divergence, got {:?}", other),
        }
    }
}
