use crate::numerical::root_finding::{evaluate_at, failed};
use crate::numerical::solve_result::{
    RootFindingResult, RootIteration, SolveError, SolveOutcome, validate_stopping,
};
use crate::symbolic::symbolic_lambdify::NumericFunction;
use log::{info, warn};

/// Fixed point iteration p_k = g(p_{k-1}) starting from `p0`.
///
/// No bracket and no sign condition. Stops when |p_k - p_{k-1}| < `tolerance`. An iterate
/// that is not finite stops the method with [`SolveError::Diverged`]; the trace keeps the
/// iterations before it. The `fp` column of the trace holds g(p_prev), i.e. p itself.
pub fn fixed_point<G: NumericFunction + ?Sized>(
    g: &G,
    p0: f64,
    tolerance: f64,
    max_iterations: usize,
) -> RootFindingResult {
    info!(
        "fixed point iteration for g = {} from p0 = {}, tolerance = {}, max iterations = {}",
        g.name(),
        p0,
        tolerance,
        max_iterations
    );
    if let Err(reason) = validate_stopping(tolerance, max_iterations) {
        return failed("fixed point", reason, Vec::new());
    }
    if !p0.is_finite() {
        return failed(
            "fixed point",
            SolveError::NonFiniteIterate { iteration: 0 },
            Vec::new(),
        );
    }

    let mut trace = Vec::new();
    let mut p = p0;
    for i in 1..=max_iterations {
        let p_prev = p;
        p = match evaluate_at(g, p_prev) {
            Ok(p) => p,
            Err(reason) => return failed("fixed point", reason, trace),
        };
        if !p.is_finite() {
            return failed("fixed point", SolveError::Diverged { iteration: i }, trace);
        }
        let error = (p - p_prev).abs();
        trace.push(RootIteration {
            iteration: i,
            a: None,
            b: None,
            p,
            fp: p,
            error,
        });

        if error < tolerance {
            info!("fixed point iteration converged to {} in {} iterations", p, i);
            return SolveOutcome::Converged { value: p, trace };
        }
    }

    warn!(
        "fixed point: no convergence within {} iterations, last iterate {}",
        max_iterations, p
    );
    SolveOutcome::ExhaustedWithBestEffort {
        value: p,
        trace,
        reason: SolveError::MaxIterationsReached { max_iterations },
    }
}
