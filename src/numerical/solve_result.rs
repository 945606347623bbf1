//! Result and error types shared by every solver of the crate.
//!
//! Iterative solvers return a [`SolveOutcome`]: the value with its full trace when the
//! stopping criterion was met, the last iterate with its trace when the iteration budget ran
//! out, or the reason of the failure together with the iterations done so far.
use crate::symbolic::symbolic_engine::EvalError;
use std::fmt;

/// tolerance used when the caller does not give one
pub const DEFAULT_TOLERANCE: f64 = 1e-4;
/// iteration budget used when the caller does not give one
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// bracket with a >= b or with non-finite ends
    InvalidInterval { a: f64, b: f64 },
    /// tolerance must be finite and positive
    InvalidTolerance(f64),
    /// maximum number of iterations must be positive
    InvalidMaxIterations,
    /// f(a) and f(b) have the same sign
    SameSign {
        method: &'static str,
        fa: f64,
        fb: f64,
    },
    /// the user function failed at x
    Evaluation { x: f64, source: EvalError },
    /// the candidate point of the iteration is not finite
    NonFiniteIterate { iteration: usize },
    /// the iteration ran away to infinity or NaN
    Diverged { iteration: usize },
    MaxIterationsReached { max_iterations: usize },
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    NotSquare { rows: usize, cols: usize },
    EmptySystem,
    NotDiagonallyDominant { row: usize },
    ZeroDiagonal { row: usize },
    /// zero pivot in the column: the system is singular
    NoUniqueSolution { column: usize },
    /// two interpolation nodes share the same x
    DuplicateNodes { x: f64 },
    WrongPointCount { expected: usize, found: usize },
    NoPoints,
    NonPositiveSubintervals,
    /// the integral could not be computed; x is the failing node if any
    NonNumericResult { x: Option<f64> },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolveError::InvalidInterval { a, b } => write!(
                f,
                "Invalid interval [{}, {}]: a must be less than b and both must be finite",
                a, b
            ),
            SolveError::InvalidTolerance(tol) => {
                write!(f, "Tolerance must be a positive number, got {}", tol)
            }
            SolveError::InvalidMaxIterations => {
                write!(f, "Maximum number of iterations must be positive")
            }
            SolveError::SameSign { method, fa, fb } => write!(
                f,
                "The function has the same sign at points a and b (f(a) = {}, f(b) = {}). {} method cannot proceed.",
                fa, fb, method
            ),
            SolveError::Evaluation { x, source } => {
                write!(f, "Function evaluation failed at x = {}: {}", x, source)
            }
            SolveError::NonFiniteIterate { iteration } => write!(
                f,
                "The iterate is not a finite number at iteration {}",
                iteration
            ),
            SolveError::Diverged { iteration } => {
                write!(f, "The method diverged at iteration {}", iteration)
            }
            SolveError::MaxIterationsReached { max_iterations } => write!(
                f,
                "Method failed to converge within the maximum number of iterations ({}).",
                max_iterations
            ),
            SolveError::DimensionMismatch {
                what,
                expected,
                found,
            } => write!(
                f,
                "Dimension mismatch: {} has length {}, expected {}",
                what, found, expected
            ),
            SolveError::NotSquare { rows, cols } => {
                write!(f, "The matrix must be square, got {}x{}", rows, cols)
            }
            SolveError::EmptySystem => write!(f, "The system has no equations"),
            SolveError::NotDiagonallyDominant { row } => write!(
                f,
                "The matrix is not strictly diagonally dominant (row {}). Convergence is not guaranteed.",
                row + 1
            ),
            SolveError::ZeroDiagonal { row } => {
                write!(f, "Zero element on the diagonal in row {}", row + 1)
            }
            SolveError::NoUniqueSolution { column } => write!(
                f,
                "The system has no unique solution (zero pivot in column {})",
                column + 1
            ),
            SolveError::DuplicateNodes { x } => write!(
                f,
                "Interpolation nodes must have distinct x values, x = {} is repeated",
                x
            ),
            SolveError::WrongPointCount { expected, found } => write!(
                f,
                "Exactly {} points are required, got {}",
                expected, found
            ),
            SolveError::NoPoints => write!(f, "At least one interpolation point is required"),
            SolveError::NonPositiveSubintervals => {
                write!(f, "The number of subintervals must be positive")
            }
            SolveError::NonNumericResult { x: Some(x) } => write!(
                f,
                "The computation produced a non-numeric value at x = {}; check function and interval",
                x
            ),
            SolveError::NonNumericResult { x: None } => write!(
                f,
                "The computation produced a non-numeric value; check function and interval"
            ),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolveError::Evaluation { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Outcome of an iterative method: value type `T`, trace record type `R`.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome<T, R> {
    /// stopping criterion met
    Converged { value: T, trace: Vec<R> },
    /// iteration budget exhausted, `value` is the last iterate
    ExhaustedWithBestEffort {
        value: T,
        trace: Vec<R>,
        reason: SolveError,
    },
    /// hard failure, `trace` holds the iterations done before it
    Failed { reason: SolveError, trace: Vec<R> },
}

impl<T, R> SolveOutcome<T, R> {
    /// the converged or best-effort value, `None` on failure
    pub fn value(&self) -> Option<&T> {
        match self {
            SolveOutcome::Converged { value, .. }
            | SolveOutcome::ExhaustedWithBestEffort { value, .. } => Some(value),
            SolveOutcome::Failed { .. } => None,
        }
    }

    pub fn trace(&self) -> &[R] {
        match self {
            SolveOutcome::Converged { trace, .. }
            | SolveOutcome::ExhaustedWithBestEffort { trace, .. }
            | SolveOutcome::Failed { trace, .. } => trace,
        }
    }

    /// the failure or exhaustion reason
    pub fn error(&self) -> Option<&SolveError> {
        match self {
            SolveOutcome::Converged { .. } => None,
            SolveOutcome::ExhaustedWithBestEffort { reason, .. }
            | SolveOutcome::Failed { reason, .. } => Some(reason),
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, SolveOutcome::Converged { .. })
    }

    pub fn iterations(&self) -> usize {
        self.trace().len()
    }

    /// Strict view: only a converged outcome is `Ok`.
    pub fn into_result(self) -> Result<T, SolveError> {
        match self {
            SolveOutcome::Converged { value, .. } => Ok(value),
            SolveOutcome::ExhaustedWithBestEffort { reason, .. }
            | SolveOutcome::Failed { reason, .. } => Err(reason),
        }
    }
}

/// One row of a root-finding trace.
#[derive(Debug, Clone, PartialEq)]
pub struct RootIteration {
    /// 1-based
    pub iteration: usize,
    /// left end of the bracket, `None` for fixed point iteration
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub p: f64,
    /// f(p), for fixed point iteration g(p_prev) which equals p
    pub fp: f64,
    pub error: f64,
}

pub type RootFindingResult = SolveOutcome<f64, RootIteration>;

/// Checks shared by all iterative methods.
pub fn validate_stopping(tolerance: f64, max_iterations: usize) -> Result<(), SolveError> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(SolveError::InvalidTolerance(tolerance));
    }
    if max_iterations == 0 {
        return Err(SolveError::InvalidMaxIterations);
    }
    Ok(())
}

pub fn validate_interval(a: f64, b: f64) -> Result<(), SolveError> {
    if !a.is_finite() || !b.is_finite() || a >= b {
        return Err(SolveError::InvalidInterval { a, b });
    }
    Ok(())
}
