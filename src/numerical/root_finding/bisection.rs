use crate::numerical::root_finding::{check_bracket, evaluate_at, failed, sign};
use crate::numerical::solve_result::{RootFindingResult, RootIteration, SolveError, SolveOutcome};
use crate::symbolic::symbolic_lambdify::NumericFunction;
use log::{info, warn};

/// Bisection method: halves the bracket [a, b] until two successive midpoints differ by less
/// than `tolerance` or the midpoint is an exact root.
///
/// Requires a < b and a sign change between f(a) and f(b); both are checked before the first
/// iteration. The error of an iteration is |p - p_prev| with p_prev = a for the first one.
/// When the iteration budget runs out the last midpoint is returned as a best effort value.
pub fn bisection<F: NumericFunction + ?Sized>(
    f: &F,
    a: f64,
    b: f64,
    tolerance: f64,
    max_iterations: usize,
) -> RootFindingResult {
    let (mut a, mut b) = (a, b);
    info!(
        "bisection for {} on [{}, {}], tolerance = {}, max iterations = {}",
        f.name(),
        a,
        b,
        tolerance,
        max_iterations
    );
    let mut fa = match check_bracket(f, a, b, tolerance, max_iterations, "Bisection") {
        Ok((fa, _fb)) => fa,
        Err(reason) => return failed("bisection", reason, Vec::new()),
    };

    let mut trace = Vec::new();
    let mut p = a;
    for i in 1..=max_iterations {
        let p_prev = p;
        p = a + (b - a) / 2.0;
        let fp = match evaluate_at(f, p) {
            Ok(fp) => fp,
            Err(reason) => return failed("bisection", reason, trace),
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
            info!("bisection converged to {} in {} iterations", p, i);
            return SolveOutcome::Converged { value: p, trace };
        }

        if sign(fa) == sign(fp) {
            a = p;
            fa = fp;
        } else {
            b = p;
        }
    }

    warn!(
        "bisection: no convergence within {} iterations, last midpoint {}",
        max_iterations, p
    );
    SolveOutcome::ExhaustedWithBestEffort {
        value: p,
        trace,
        reason: SolveError::MaxIterationsReached { max_iterations },
    }
}
