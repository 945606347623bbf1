use crate::symbolic::symbolic_engine::{EvalError, Expr};
use std::fmt;

/// Trait for representing a scalar function f(x) consumed by the solvers.
///
/// Implemented by [`ParsedFunction`] and by every closure `Fn(f64) -> f64`. Closures cannot
/// report a domain error themselves, so a NaN they return is turned into
/// [`EvalError::NotANumber`].
pub trait NumericFunction {
    /// Evaluate the function at point x
    fn evaluate(&self, x: f64) -> Result<f64, EvalError>;

    /// Get function name for debugging/logging
    fn name(&self) -> String {
        "unnamed_function".to_string()
    }
}

impl<F> NumericFunction for F
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> Result<f64, EvalError> {
        let value = self(x);
        if value.is_nan() {
            return Err(EvalError::NotANumber {
                operation: format!("f({})", x),
            });
        }
        Ok(value)
    }
}

/// A user function compiled from text: the source string and its expression tree.
///
/// Holds no closure, so it is `Clone`, `Send` and `Sync`, and two functions parsed from the
/// same text behave identically.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFunction {
    source: String,
    expr: Expr,
}

impl ParsedFunction {
    pub fn new(source: &str, expr: Expr) -> Self {
        Self {
            source: source.to_string(),
            expr,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Converts the function into a plain closure for code that cannot handle evaluation
    /// errors; points outside of the domain evaluate to NaN.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let f = parse_function("sqrt(x)").unwrap();
    /// let func = f.lambdify1D();
    /// assert!(func(-1.0).is_nan());
    /// ```
    pub fn lambdify1D(&self) -> Box<dyn Fn(f64) -> f64 + Send + Sync> {
        let expr = self.expr.clone();
        Box::new(move |x| expr.eval(x).unwrap_or(f64::NAN))
    }
}

impl NumericFunction for ParsedFunction {
    fn evaluate(&self, x: f64) -> Result<f64, EvalError> {
        self.expr.eval(x)
    }

    fn name(&self) -> String {
        self.source.clone()
    }
}

impl fmt::Display for ParsedFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "f(x) = {}", self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::parse_expr::parse_function;

    #[test]
    fn test_closure_is_a_numeric_function() {
        let f = |x: f64| x * x - 2.0;
        assert_eq!(f.evaluate(2.0).unwrap(), 2.0);
        assert_eq!(f.name(), "unnamed_function");
        let g = |x: f64| x.sqrt();
        assert!(matches!(g.evaluate(-1.0), Err(EvalError::NotANumber { .. })));
    }

    #[test]
    fn test_parsed_function_evaluate_and_name() {
        let f = parse_function("x^2 - 2").unwrap();
        assert_eq!(f.evaluate(3.0).unwrap(), 7.0);
        assert_eq!(f.name(), "x^2 - 2");
        assert_eq!(f.to_string(), "f(x) = x^2 - 2");
    }

    #[test]
    fn test_lambdify1D_maps_domain_errors_to_nan() {
        let f = parse_function("sqrt(x)").unwrap();
        let func = f.lambdify1D();
        assert_eq!(func(4.0), 2.0);
        assert!(func(-1.0).is_nan());
    }

    #[test]
    fn test_same_text_same_behaviour() {
        let f1 = parse_function("exp(x) - 3*x").unwrap();
        let f2 = parse_function("exp(x) - 3*x").unwrap();
        assert_eq!(f1, f2);
        for i in -10..10 {
            let x = i as f64 * 0.37;
            assert_eq!(f1.evaluate(x), f2.evaluate(x));
        }
    }
}
