//! Root finding for scalar functions of one variable.
//!
//! Bracketing methods (bisection, false position) take an interval [a, b] on whose ends the
//! function changes sign; fixed point iteration takes a starting point p0 and iterates
//! p = g(p). All of them return a [`RootFindingResult`] with the whole trace.
//!
//!# Example
//! ```
//! use RustedNumMethods::numerical::root_finding::bisection::bisection;
//! use RustedNumMethods::symbolic::parse_expr::parse_function;
//! let f = parse_function("x^3 - x - 2").unwrap();
//! let result = bisection(&f, 1.0, 2.0, 1e-4, 50);
//! assert!(result.is_converged());
//! assert!((result.value().unwrap() - 1.52138).abs() < 1e-3);
//! ```
use crate::numerical::solve_result::{SolveError, SolveOutcome, validate_interval, validate_stopping};
use crate::symbolic::symbolic_lambdify::NumericFunction;
use log::error;

/// interval halving
pub mod bisection;
/// regula falsi: secant through the ends of the bracket
pub mod false_position;
/// iteration p = g(p)
pub mod fixed_point;


/// -1, 0 or 1; zero has its own sign so a root exactly on an end of the bracket is not
/// treated as a sign change with itself
pub fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

/// evaluates f and turns a domain error into [`SolveError::Evaluation`]
pub(crate) fn evaluate_at<F: NumericFunction + ?Sized>(f: &F, x: f64) -> Result<f64, SolveError> {
    f.evaluate(x)
        .map_err(|source| SolveError::Evaluation { x, source })
}

/// builds the failed outcome and logs the reason
pub(crate) fn failed<R>(method: &str, reason: SolveError, trace: Vec<R>) -> SolveOutcome<f64, R> {
    error!("{}: {}", method, reason);
    SolveOutcome::Failed { reason, trace }
}

/// Validation and sign check shared by the bracketing methods.
/// Returns f(a) and f(b) when the bracket can be used.
pub(crate) fn check_bracket<F: NumericFunction + ?Sized>(
    f: &F,
    a: f64,
    b: f64,
    tolerance: f64,
    max_iterations: usize,
    method: &'static str,
) -> Result<(f64, f64), SolveError> {
    validate_interval(a, b)?;
    validate_stopping(tolerance, max_iterations)?;
    let fa = evaluate_at(f, a)?;
    let fb = evaluate_at(f, b)?;
    if sign(fa) == sign(fb) {
        return Err(SolveError::SameSign { method, fa, fb });
    }
    Ok((fa, fb))
}
