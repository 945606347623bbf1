//! Gauss-Jordan elimination with partial pivoting on an augmented matrix [A | b].
//!
//! Every elementary row operation is recorded as a [`MatrixStep`] holding its own copy of the
//! matrix, so the whole reduction can be replayed step by step.
//!
//!# Example
//! ```
//! use nalgebra::DMatrix;
//! use RustedNumMethods::somelinalg::gauss_jordan::gauss_jordan_augmented;
//! let augmented = DMatrix::from_row_slice(2, 3, &[2.0, 1.0, 5.0, 1.0, 3.0, 10.0]);
//! let result = gauss_jordan_augmented(&augmented);
//! let x = result.solution().unwrap();
//! assert!((x[0] - 1.0).abs() < 1e-12 && (x[1] - 3.0).abs() < 1e-12);
//! assert_eq!(result.steps()[0].operation, "Start");
//! ```
use crate::numerical::solve_result::SolveError;
use crate::somelinalg::linear_sys_diagnostics::{
    CONDITION_THRESHOLD, poorly_conditioned, singular_system_diagnostics,
};
use log::{error, info, warn};
use nalgebra::{DMatrix, DVector};
use strum_macros::Display;

/// pivots smaller than this are accepted but reported
pub const NEAR_ZERO_PIVOT: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StepKind {
    Start,
    RowSwap,
    Normalize,
    Eliminate,
    Final,
}

/// Snapshot after one row operation
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixStep {
    /// 1-based
    pub step: usize,
    pub kind: StepKind,
    pub description: String,
    /// row operation in symbolic form, e.g. `F2 = F2 - 0.75 * F1`
    pub operation: String,
    pub matrix: DMatrix<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EliminationResult {
    Solved {
        solution: DVector<f64>,
        steps: Vec<MatrixStep>,
    },
    /// the steps done before the failure are kept
    Failed {
        reason: SolveError,
        steps: Vec<MatrixStep>,
    },
}

impl EliminationResult {
    pub fn solution(&self) -> Option<&DVector<f64>> {
        match self {
            EliminationResult::Solved { solution, .. } => Some(solution),
            EliminationResult::Failed { .. } => None,
        }
    }

    pub fn steps(&self) -> &[MatrixStep] {
        match self {
            EliminationResult::Solved { steps, .. } | EliminationResult::Failed { steps, .. } => {
                steps
            }
        }
    }

    pub fn error(&self) -> Option<&SolveError> {
        match self {
            EliminationResult::Solved { .. } => None,
            EliminationResult::Failed { reason, .. } => Some(reason),
        }
    }

    pub fn into_result(self) -> Result<DVector<f64>, SolveError> {
        match self {
            EliminationResult::Solved { solution, .. } => Ok(solution),
            EliminationResult::Failed { reason, .. } => Err(reason),
        }
    }
}

struct StepRecorder {
    steps: Vec<MatrixStep>,
}

impl StepRecorder {
    fn record(&mut self, kind: StepKind, description: String, operation: String, m: &DMatrix<f64>) {
        self.steps.push(MatrixStep {
            step: self.steps.len() + 1,
            kind,
            description,
            operation,
            matrix: m.clone(),
        });
    }
}

/// Reduces the n x (n+1) augmented matrix to [I | x].
///
/// For every column i: the row with the largest |m[k][i]|, k >= i, becomes the pivot row
/// (first maximum wins, a swap step is recorded when it moves); an exactly zero pivot means
/// the system has no unique solution; the pivot row is divided by the pivot unless it is
/// already 1; every other row with a nonzero entry in column i is eliminated, one step per
/// row. The final step with the reduced matrix is always recorded on success.
pub fn gauss_jordan_augmented(augmented: &DMatrix<f64>) -> EliminationResult {
    let (n, cols) = augmented.shape();
    if n == 0 {
        return EliminationResult::Failed {
            reason: SolveError::EmptySystem,
            steps: Vec::new(),
        };
    }
    if cols != n + 1 {
        return EliminationResult::Failed {
            reason: SolveError::DimensionMismatch {
                what: "augmented matrix columns",
                expected: n + 1,
                found: cols,
            },
            steps: Vec::new(),
        };
    }
    info!("gauss-jordan elimination of a {}x{} augmented matrix", n, cols);

    let mut m = augmented.clone();
    let mut recorder = StepRecorder { steps: Vec::new() };
    recorder.record(
        StepKind::Start,
        "Initial augmented matrix".to_string(),
        "Start".to_string(),
        &m,
    );

    for i in 0..n {
        // partial pivoting
        let mut max_el = m[(i, i)].abs();
        let mut max_row = i;
        for k in i + 1..n {
            if m[(k, i)].abs() > max_el {
                max_el = m[(k, i)].abs();
                max_row = k;
            }
        }
        if max_row != i {
            m.swap_rows(i, max_row);
            recorder.record(
                StepKind::RowSwap,
                format!("Swap row {} with row {}", i + 1, max_row + 1),
                format!("F{} <-> F{}", i + 1, max_row + 1),
                &m,
            );
        }

        let pivot = m[(i, i)];
        if pivot == 0.0 {
            let reason = SolveError::NoUniqueSolution { column: i };
            error!("gauss-jordan: {}", reason);
            return EliminationResult::Failed {
                reason,
                steps: recorder.steps,
            };
        }
        if pivot.abs() < NEAR_ZERO_PIVOT {
            warn!(
                "gauss-jordan: pivot {:e} in column {} is close to zero, the result may be inaccurate",
                pivot,
                i + 1
            );
        }

        if pivot != 1.0 {
            for j in i..=n {
                m[(i, j)] /= pivot;
            }
            recorder.record(
                StepKind::Normalize,
                format!("Make pivot ({},{}) equal to 1", i + 1, i + 1),
                format!("F{} = F{} / {:.2}", i + 1, i + 1, pivot),
                &m,
            );
        }

        for k in (0..n).filter(|&k| k != i) {
            let factor = m[(k, i)];
            if factor != 0.0 {
                for j in i..=n {
                    m[(k, j)] -= factor * m[(i, j)];
                }
                recorder.record(
                    StepKind::Eliminate,
                    format!("Eliminate element ({},{})", k + 1, i + 1),
                    format!("F{} = F{} - {:.2} * F{}", k + 1, k + 1, factor, i + 1),
                    &m,
                );
            }
        }
    }

    let solution = m.column(n).clone_owned();
    recorder.record(
        StepKind::Final,
        "Final matrix in reduced row echelon form".to_string(),
        "Done".to_string(),
        &m,
    );
    info!("gauss-jordan finished in {} steps", recorder.steps.len());
    EliminationResult::Solved {
        solution,
        steps: recorder.steps,
    }
}

/// Solves A x = b by elimination of [A | b].
///
/// Logs a warning for a poorly conditioned A and, when elimination fails, whether the system
/// is inconsistent or has infinitely many solutions.
pub fn gauss_jordan(A: &DMatrix<f64>, b: &DVector<f64>) -> EliminationResult {
    let (rows, cols) = A.shape();
    if rows != cols {
        return EliminationResult::Failed {
            reason: SolveError::NotSquare { rows, cols },
            steps: Vec::new(),
        };
    }
    if b.len() != rows {
        return EliminationResult::Failed {
            reason: SolveError::DimensionMismatch {
                what: "right-hand side",
                expected: rows,
                found: b.len(),
            },
            steps: Vec::new(),
        };
    }
    let mut augmented = A.clone().insert_column(cols, 0.0);
    augmented.set_column(cols, b);
    let result = gauss_jordan_augmented(&augmented);
    match &result {
        EliminationResult::Solved { .. } => {
            poorly_conditioned(A, CONDITION_THRESHOLD);
        }
        EliminationResult::Failed {
            reason: SolveError::NoUniqueSolution { .. },
            ..
        } => {
            warn!("gauss-jordan: {}", singular_system_diagnostics(A, b));
        }
        EliminationResult::Failed { .. } => {}
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::somelinalg::linear_sys_diagnostics::residual_inf_norm;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn split(augmented: &DMatrix<f64>) -> (DMatrix<f64>, DVector<f64>) {
        let n = augmented.nrows();
        (
            augmented.columns(0, n).clone_owned(),
            augmented.column(n).clone_owned(),
        )
    }

    #[test]
    fn test_gauss_jordan_steps() {
        // 2x + y = 5, 4x + 3y = 11 -> x = 2, y = 1
        let augmented = DMatrix::from_row_slice(2, 3, &[2.0, 1.0, 5.0, 4.0, 3.0, 11.0]);
        let result = gauss_jordan_augmented(&augmented);
        let operations: Vec<&str> = result
            .steps()
            .iter()
            .map(|step| step.operation.as_str())
            .collect();
        assert_eq!(
            operations,
            vec![
                "Start",
                "F1 <-> F2",
                "F1 = F1 / 4.00",
                "F2 = F2 - 2.00 * F1",
                "F2 = F2 / -0.50",
                "F1 = F1 - 0.75 * F2",
                "Done"
            ]
        );
        let kinds: Vec<StepKind> = result.steps().iter().map(|step| step.kind).collect();
        assert_eq!(kinds[1], StepKind::RowSwap);
        assert_eq!(kinds[6], StepKind::Final);
        for (i, step) in result.steps().iter().enumerate() {
            assert_eq!(step.step, i + 1);
        }
        // the first snapshot is the untouched input
        assert_eq!(result.steps()[0].matrix, augmented);
        let x = result.solution().unwrap();
        assert_relative_eq!(x[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gauss_jordan_no_swap_when_first_maximum_is_on_diagonal() {
        // |a11| = |a21|: the first maximum wins, no swap
        let augmented = DMatrix::from_row_slice(2, 3, &[1.0, 1.0, 3.0, -1.0, 1.0, 1.0]);
        let result = gauss_jordan_augmented(&augmented);
        assert!(
            result
                .steps()
                .iter()
                .all(|step| step.kind != StepKind::RowSwap)
        );
        // the pivot is already 1: no normalisation step for column 1
        assert_eq!(result.steps()[1].operation, "F2 = F2 - -1.00 * F1");
        let x = result.solution().unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gauss_jordan_singular() {
        let augmented = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 2.0, 4.0, 6.0]);
        let result = gauss_jordan_augmented(&augmented);
        assert_eq!(
            result.error(),
            Some(&SolveError::NoUniqueSolution { column: 1 })
        );
        // start, swap, normalize, eliminate were done before the zero pivot
        assert_eq!(result.steps().len(), 4);
        assert!(result.solution().is_none());
    }

    #[test]
    fn test_gauss_jordan_wrong_shape() {
        let result = gauss_jordan_augmented(&DMatrix::zeros(2, 2));
        assert!(matches!(
            result.error(),
            Some(SolveError::DimensionMismatch { .. })
        ));
        assert!(result.steps().is_empty());
        let result = gauss_jordan(&DMatrix::zeros(2, 3), &DVector::zeros(2));
        assert_eq!(
            result.error(),
            Some(&SolveError::NotSquare { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn test_gauss_jordan_from_matrix_and_vector() {
        let A = DMatrix::from_row_slice(3, 3, &[2.0, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0]);
        let b = DVector::from_vec(vec![8.0, -11.0, -3.0]);
        let x = gauss_jordan(&A, &b).into_result().unwrap();
        assert_relative_eq!(x[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-12);
        assert_relative_eq!(x[2], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gauss_jordan_randomized_systems() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 1..7 {
            // diagonally loaded random matrix, well conditioned
            let augmented = DMatrix::from_fn(n, n + 1, |i, j| {
                let value: f64 = rng.random_range(-1.0..1.0);
                if i == j { value + 2.0 * n as f64 } else { value }
            });
            let result = gauss_jordan_augmented(&augmented);
            let x = result.solution().unwrap();
            let (A, b) = split(&augmented);
            assert!(residual_inf_norm(&A, x, &b) < 1e-9);
            // identity on the left of the final snapshot
            let last = result.steps().last().unwrap();
            assert_eq!(last.kind, StepKind::Final);
            let left = last.matrix.columns(0, n).clone_owned();
            assert!((left - DMatrix::<f64>::identity(n, n)).amax() < 1e-9);
            // rerunning gives the same record
            assert_eq!(gauss_jordan_augmented(&augmented), result);
        }
    }
}
