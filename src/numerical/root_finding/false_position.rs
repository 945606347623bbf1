use crate::numerical::root_finding::{check_bracket, evaluate_at, failed, sign};
use crate::numerical::solve_result::{RootFindingResult, RootIteration, SolveError, SolveOutcome};
use crate::symbolic::symbolic_lambdify::NumericFunction;
use log::{info, warn};

/// False position (regula falsi): the next candidate is where the chord through (a, f(a))
/// and (b, f(b)) crosses zero, p = b - f(b)(b - a)/(f(b) - f(a)).
///
/// Same preconditions and stopping rule as bisection. Both ends keep their function values
/// up to date. A candidate that is not finite (f(b) equal to f(a) after rounding) stops the
/// method with [`SolveError::NonFiniteIterate`].
pub fn false_position<F: NumericFunction + ?Sized>(
    f: &F,
    a: f64,
    b: f64,
    tolerance: f64,
    max_iterations: usize,
) -> RootFindingResult {
    let (mut a, mut b) = (a, b);
    info!(
        "false position for {} on [{}, {}], tolerance = {}, max iterations = {}",
        f.name(),
        a,
        b,
        tolerance,
        max_iterations
    );
    let (mut fa, mut fb) = match check_bracket(f, a, b, tolerance, max_iterations, "False Position")
    {
        Ok(values) => values,
        Err(reason) => return failed("false position", reason, Vec::new()),
    };

    let mut trace = Vec::new();
    let mut p = a;
    for i in 1..=max_iterations {
        let p_prev = p;
        p = b - fb * (b - a) / (fb - fa);
        if !p.is_finite() {
            return failed(
                "false position",
                SolveError::NonFiniteIterate { iteration: i },
                trace,
            );
        }
        let fp = match evaluate_at(f, p) {
            Ok(fp) => fp,
            Err(reason) => return failed("false position", reason, trace),
        };
        let error = (p - p_prev).abs();
        trace.push(RootIteration {
            iteration: i,
            a: Some(a),
            b: Some(b),
            p,
            fp,
            error,
        });

        if error < tolerance || fp == 0.0 {
            info!("false position converged to {} in {} iterations", p, i);
            return SolveOutcome::Converged { value: p, trace };
        }

        if sign(fa) == sign(fp) {
            a = p;
            fa = fp;
        } else {
            b = p;
            fb = fp;
        }
    }

    warn!(
        "false position: no convergence within {} iterations, last candidate {}",
        max_iterations, p
    );
    SolveOutcome::ExhaustedWithBestEffort {
        value: p,
        trace,
        reason: SolveError::MaxIterationsReached { max_iterations },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_false_position_linear_function_in_one_step() {
        // the chord of a straight line is the line itself
        let f = |x: f64| 2.0 * x - 1.0;
        let result = false_position(&f, 0.0, 2.0, 1e-8, 50);
        assert!(result.is_converged());
        assert_eq!(result.iterations(), 1);
        assert_relative_eq!(*result.value().unwrap(), 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_false_position_first_candidate() {
        let f = |x: f64| x * x - 2.0;
        let result = false_position(&f, 0.0, 2.0, 1e-10, 1);
        // p = 2 - 2 * 2 / (2 - (-2)) = 1
        assert_eq!(result.trace()[0].p, 1.0);
        assert_eq!(result.trace()[0].fp, -1.0);
        assert_eq!(result.trace()[0].error, 1.0);
        assert!(!result.is_converged());
    }

    #[test]
    fn test_false_position_converges() {
        let f = |x: f64| x * x * x - x - 2.0;
        let result = false_position(&f, 1.0, 2.0, 1e-8, 100);
        assert!(result.is_converged());
        assert_relative_eq!(*result.value().unwrap(), 1.5213797068, epsilon = 1e-6);
        for record in result.trace() {
            let (a, b) = (record.a.unwrap(), record.b.unwrap());
            assert!(a <= record.p && record.p <= b);
        }
    }

    #[test]
    fn test_false_position_same_sign() {
        let f = |x: f64| (x - 0.5) * (x - 0.5) + 0.1;
        let result = false_position(&f, 0.0, 1.0, 1e-6, 50);
        assert!(matches!(
            result.error(),
            Some(SolveError::SameSign {
                method: "False Position",
                ..
            })
        ));
        assert!(result.trace().is_empty());
    }

    #[test]
    fn test_false_position_evaluation_error() {
        // defined on the bracket ends, undefined at the first candidate p = 1.5
        let f = |x: f64| if (x - 1.5).abs() < 1e-12 { f64::NAN } else { x - 1.5 };
        let result = false_position(&f, 0.0, 2.0, 1e-6, 10);
        assert!(matches!(
            result.error(),
            Some(SolveError::Evaluation { .. })
        ));
        assert!(result.trace().is_empty());
    }
}
