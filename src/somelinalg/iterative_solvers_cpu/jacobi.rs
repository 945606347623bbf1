use crate::numerical::solve_result::{SolveError, SolveOutcome};
use crate::somelinalg::iterative_solvers_cpu::{
    LinearIteration, LinearSystemResult, validate_iterative_input,
};
use crate::somelinalg::linear_sys_diagnostics::{first_non_dominant_row, inf_norm_distance};
use log::{error, info, warn};
use nalgebra::{DMatrix, DVector};

/// Jacobi method for A x = b:
/// x_new[i] = (b[i] - sum_{j != i} a_ij x_prev[j]) / a_ii.
///
/// The matrix must be strictly diagonally dominant by rows, otherwise the method refuses to
/// start and returns [`SolveError::NotDiagonallyDominant`] with an empty trace.
///
///# Example
/// ```
/// use nalgebra::{DMatrix, DVector};
/// use RustedNumMethods::somelinalg::iterative_solvers_cpu::jacobi::jacobi;
/// let A = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 2.0, 5.0]);
/// let b = DVector::from_vec(vec![5.0, 7.0]);
/// let result = jacobi(&A, &b, &DVector::zeros(2), 1e-10, 100);
/// let x = result.value().unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-8 && (x[1] - 1.0).abs() < 1e-8);
/// ```
pub fn jacobi(
    A: &DMatrix<f64>,
    b: &DVector<f64>,
    initial_guess: &DVector<f64>,
    tolerance: f64,
    max_iterations: usize,
) -> LinearSystemResult {
    if let Err(reason) = validate_iterative_input(A, b, initial_guess, tolerance, max_iterations)
    {
        error!("jacobi: {}", reason);
        return SolveOutcome::Failed {
            reason,
            trace: Vec::new(),
        };
    }
    if let Some(row) = first_non_dominant_row(A) {
        let reason = SolveError::NotDiagonallyDominant { row };
        error!("jacobi: {}", reason);
        return SolveOutcome::Failed {
            reason,
            trace: Vec::new(),
        };
    }
    let n = A.nrows();
    info!(
        "jacobi for a {}x{} system, tolerance = {}, max iterations = {}",
        n, n, tolerance, max_iterations
    );

    let mut trace = Vec::new();
    let mut x = initial_guess.clone();
    for k in 1..=max_iterations {
        let x_prev = x;
        let x_new = DVector::from_fn(n, |i, _| {
            let sigma: f64 = (0..n)
                .filter(|&j| j != i)
                .map(|j| A[(i, j)] * x_prev[j])
                .sum();
            (b[i] - sigma) / A[(i, i)]
        });
        if x_new.iter().any(|value| !value.is_finite()) {
            let reason = SolveError::Diverged { iteration: k };
            error!("jacobi: {}", reason);
            return SolveOutcome::Failed { reason, trace };
        }
        let error = inf_norm_distance(&x_new, &x_prev);
        trace.push(LinearIteration {
            iteration: k,
            values: x_new.clone(),
            error,
        });
        x = x_new;

        if error < tolerance {
            info!("jacobi converged in {} iterations", k);
            return SolveOutcome::Converged { value: x, trace };
        }
    }

    warn!("jacobi: no convergence within {} iterations", max_iterations);
    SolveOutcome::ExhaustedWithBestEffort {
        value: x,
        trace,
        reason: SolveError::MaxIterationsReached { max_iterations },
    }
}
