use crate::numerical::solve_result::SolveError;
use crate::symbolic::symbolic_lambdify::NumericFunction;
use log::{info, warn};

/// number of subintervals used when the caller does not give one
pub const DEFAULT_SUBINTERVALS: usize = 10;

/// A node of the composite rule: abscissa, function value and weight in units of h/2
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureNode {
    pub x: f64,
    pub fx: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrapezoidResult {
    pub integral: f64,
    /// h = (b - a)/n
    pub step: f64,
    pub nodes: Vec<QuadratureNode>,
}

/// Composite trapezoidal rule with `n` equal subintervals:
/// (h/2) (f(a) + f(b) + 2 sum_{i=1}^{n-1} f(a + i h)).
///
/// The interval is not required to be ordered, b < a gives the negated integral.
/// A failing evaluation or a non-finite sum is reported as [`SolveError::NonNumericResult`].
///
///# Example
/// ```
/// use RustedNumMethods::numerical::quadrature::trapezoidal_rule;
/// let f = |x: f64| x * x;
/// let result = trapezoidal_rule(&f, 0.0, 1.0, 1000).unwrap();
/// assert!((result.integral - 1.0 / 3.0).abs() < 1e-4);
/// ```
pub fn trapezoidal_rule<F: NumericFunction + ?Sized>(
    f: &F,
    a: f64,
    b: f64,
    n: usize,
) -> Result<TrapezoidResult, SolveError> {
    if n == 0 {
        return Err(SolveError::NonPositiveSubintervals);
    }
    if !a.is_finite() || !b.is_finite() {
        return Err(SolveError::InvalidInterval { a, b });
    }
    info!(
        "trapezoidal rule for {} on [{}, {}] with {} subintervals",
        f.name(),
        a,
        b,
        n
    );
    let h = (b - a) / n as f64;
    let mut nodes = Vec::new();
    let mut sum = 0.0;
    for i in 0..=n {
        // the last node is exactly b
        let x = if i == n { b } else { a + i as f64 * h };
        let fx = f.evaluate(x).map_err(|err| {
            warn!("trapezoidal rule: evaluation failed at x = {}: {}", x, err);
            SolveError::NonNumericResult { x: Some(x) }
        })?;
        let weight = if i == 0 || i == n { 1.0 } else { 2.0 };
        sum += weight * fx;
        nodes.push(QuadratureNode { x, fx, weight });
    }
    let integral = h / 2.0 * sum;
    if !integral.is_finite() {
        warn!("trapezoidal rule: the integral is not finite");
        return Err(SolveError::NonNumericResult { x: None });
    }
    info!("integral = {}", integral);
    Ok(TrapezoidResult {
        integral,
        step: h,
        nodes,
    })
}
