//! Stationary iterative methods for dense square systems A x = b.
//!
//! Both methods produce a [`LinearSystemResult`]: the converged or last iterate with one
//! [`LinearIteration`] record per sweep, the error of a sweep being the infinity norm of
//! the change of the iterate.
use crate::numerical::solve_result::{SolveError, SolveOutcome, validate_stopping};
use nalgebra::{DMatrix, DVector};

/// Jacobi iteration: every component of the new iterate uses only the previous iterate
pub mod jacobi;
/// Gauss-Seidel iteration: components updated in the same sweep are used immediately
pub mod gauss_seidel;

/// One row of a linear iteration trace
#[derive(Debug, Clone, PartialEq)]
pub struct LinearIteration {
    /// 1-based
    pub iteration: usize,
    pub values: DVector<f64>,
    /// ||x_k - x_{k-1}||_inf
    pub error: f64,
}

pub type LinearSystemResult = SolveOutcome<DVector<f64>, LinearIteration>;

/// Shape checks shared by the iterative methods: A is n x n with n >= 1, b and the initial
/// guess have length n.
pub fn validate_system(
    A: &DMatrix<f64>,
    b: &DVector<f64>,
    initial_guess: &DVector<f64>,
) -> Result<(), SolveError> {
    let (rows, cols) = A.shape();
    if rows == 0 {
        return Err(SolveError::EmptySystem);
    }
    if rows != cols {
        return Err(SolveError::NotSquare { rows, cols });
    }
    if b.len() != rows {
        return Err(SolveError::DimensionMismatch {
            what: "right-hand side",
            expected: rows,
            found: b.len(),
        });
    }
    if initial_guess.len() != rows {
        return Err(SolveError::DimensionMismatch {
            what: "initial guess",
            expected: rows,
            found: initial_guess.len(),
        });
    }
    Ok(())
}

pub(crate) fn validate_iterative_input(
    A: &DMatrix<f64>,
    b: &DVector<f64>,
    initial_guess: &DVector<f64>,
    tolerance: f64,
    max_iterations: usize,
) -> Result<(), SolveError> {
    validate_system(A, b, initial_guess)?;
    validate_stopping(tolerance, max_iterations)
}
