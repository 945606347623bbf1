//! Interpolation through tabulated points: linear (two points), quadratic (three points) and
//! the general n-point Lagrange and Newton forms.
//!
//! The quadratic method returns the interpolated value together with the Newton form of the
//! interpolating polynomial, a plain value that can be printed, evaluated and sampled.
use crate::numerical::solve_result::SolveError;
use crate::symbolic::symbolic_engine::EvalError;
use crate::symbolic::symbolic_lambdify::NumericFunction;
use itertools::Itertools;
use nalgebra::DVector;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationPoint {
    pub x: f64,
    pub y: f64,
}

impl InterpolationPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// y = y0 + (x - x0)(y1 - y0)/(x1 - x0)
pub fn linear_interpolation(
    p0: InterpolationPoint,
    p1: InterpolationPoint,
    x: f64,
) -> Result<f64, SolveError> {
    if p1.x - p0.x == 0.0 {
        return Err(SolveError::DuplicateNodes { x: p0.x });
    }
    Ok(p0.y + (x - p0.x) * (p1.y - p0.y) / (p1.x - p0.x))
}

fn check_distinct_nodes(points: &[InterpolationPoint]) -> Result<(), SolveError> {
    if points.is_empty() {
        return Err(SolveError::NoPoints);
    }
    for (p, q) in points.iter().tuple_combinations() {
        if p.x == q.x {
            return Err(SolveError::DuplicateNodes { x: p.x });
        }
    }
    Ok(())
}

/// Value of the Lagrange interpolating polynomial through `points` at x.
pub fn lagrange_interpolation(points: &[InterpolationPoint], x: f64) -> Result<f64, SolveError> {
    check_distinct_nodes(points)?;
    let mut result = 0.0;
    for (i, pi) in points.iter().enumerate() {
        let mut term = pi.y;
        for (j, pj) in points.iter().enumerate() {
            if i != j {
                term *= (x - pj.x) / (pi.x - pj.x);
            }
        }
        result += term;
    }
    Ok(result)
}

/// Interpolating polynomial in Newton form
/// P(x) = b0 + b1 (x - x0) + b2 (x - x0)(x - x1) + ...
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonPolynomial {
    nodes: DVector<f64>,
    coefficients: DVector<f64>,
}

impl NewtonPolynomial {
    /// Computes the divided difference coefficients b_k = f[x0, ..., xk].
    pub fn from_points(points: &[InterpolationPoint]) -> Result<Self, SolveError> {
        check_distinct_nodes(points)?;
        let nodes = DVector::from_iterator(points.len(), points.iter().map(|p| p.x));
        let mut coefficients = DVector::from_iterator(points.len(), points.iter().map(|p| p.y));
        let n = nodes.len();
        for j in 1..n {
            for i in (j..n).rev() {
                coefficients[i] =
                    (coefficients[i] - coefficients[i - 1]) / (nodes[i] - nodes[i - j]);
            }
        }
        Ok(Self {
            nodes,
            coefficients,
        })
    }

    pub fn nodes(&self) -> &DVector<f64> {
        &self.nodes
    }

    pub fn coefficients(&self) -> &DVector<f64> {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Horner's scheme on the nested Newton form
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.coefficients.len();
        let mut result = self.coefficients[n - 1];
        for i in (0..n - 1).rev() {
            result = result * (x - self.nodes[i]) + self.coefficients[i];
        }
        result
    }
}

fn factor(node: f64) -> String {
    if node < 0.0 {
        format!("(x + {})", -node)
    } else {
        format!("(x - {})", node)
    }
}

/// `P(x) = b0 + b1 * (x - x0) + b2 * (x - x0) * (x - x1)`, coefficients with 4 decimals
impl fmt::Display for NewtonPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let terms = self.coefficients.iter().enumerate().map(|(k, b)| {
            let factors = self.nodes.iter().take(k).map(|node| factor(*node));
            std::iter::once(format!("{:.4}", b)).chain(factors).join(" * ")
        });
        write!(f, "P(x) = {}", terms.format(" + "))
    }
}

impl NumericFunction for NewtonPolynomial {
    fn evaluate(&self, x: f64) -> Result<f64, EvalError> {
        let value = NewtonPolynomial::evaluate(self, x);
        if value.is_nan() {
            return Err(EvalError::NotANumber {
                operation: format!("P({})", x),
            });
        }
        Ok(value)
    }

    fn name(&self) -> String {
        self.to_string()
    }
}

/// Result of [`quadratic_interpolation`]
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticInterpolation {
    pub x: f64,
    pub y: f64,
    pub polynomial: NewtonPolynomial,
}

/// Quadratic interpolation through exactly three points with pairwise distinct x.
///
/// The value at x is computed from the Lagrange basis
/// y = y0 L0(x) + y1 L1(x) + y2 L2(x); the Newton form of the same parabola is returned
/// for printing and plotting.
///
///# Example
/// ```
/// use RustedNumMethods::numerical::interpolation::{quadratic_interpolation, InterpolationPoint};
/// let points = [
///     InterpolationPoint::new(0.0, 1.0),
///     InterpolationPoint::new(1.0, 2.0),
///     InterpolationPoint::new(2.0, 5.0),
/// ];
/// let result = quadratic_interpolation(&points, 1.5).unwrap();
/// assert!((result.y - 3.25).abs() < 1e-12);
/// assert_eq!(
///     result.polynomial.to_string(),
///     "P(x) = 1.0000 + 1.0000 * (x - 0) + 1.0000 * (x - 0) * (x - 1)"
/// );
/// ```
pub fn quadratic_interpolation(
    points: &[InterpolationPoint],
    x: f64,
) -> Result<QuadraticInterpolation, SolveError> {
    if points.len() != 3 {
        return Err(SolveError::WrongPointCount {
            expected: 3,
            found: points.len(),
        });
    }
    let y = lagrange_interpolation(points, x)?;
    let polynomial = NewtonPolynomial::from_points(points)?;
    Ok(QuadraticInterpolation { x, y, polynomial })
}
