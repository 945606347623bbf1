/// result and error types shared by all solvers
pub mod solve_result;
///  Example#1
/// ```
/// use RustedNumMethods::numerical::root_finding::false_position::false_position;
/// use RustedNumMethods::numerical::root_finding::fixed_point::fixed_point;
/// use RustedNumMethods::symbolic::parse_expr::parse_function;
/// // root of f(x) = 0 on a bracket
/// let f = parse_function("exp(-x) - x").unwrap();
/// let result = false_position(&f, 0.0, 1.0, 1e-6, 50);
/// println!("root = {:?} after {} iterations", result.value(), result.iterations());
/// // fixed point of g(x) = x
/// let g = parse_function("exp(-x)").unwrap();
/// let result = fixed_point(&g, 0.5, 1e-6, 100);
/// assert!(result.is_converged());
/// ```
pub mod root_finding;
/// linear, quadratic and n-point interpolation
pub mod interpolation;
/// composite trapezoidal rule
pub mod quadrature;
/// tabulation of functions for plotting
pub mod sampling;
