#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression and a checked function of x
///
///# Example
/// ```
/// use RustedNumMethods::symbolic::parse_expr::{parse_expression, parse_function};
/// use RustedNumMethods::symbolic::symbolic_lambdify::NumericFunction;
/// let input = "x^3 - 2*x + 1";
/// let parsed_expression = parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// // parse and check that the function can be evaluated
/// let f = parse_function(input).unwrap();
/// println!("{}, f(2) = {}", input, f.evaluate(2.0).unwrap());
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// expression tree of one variable and its checked evaluation:
/// sqrt of a negative number, logarithm of a non-positive number, division by zero and NaN are errors
///# Example#
/// ```
/// use RustedNumMethods::symbolic::symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// let f = x.clone() * x - Expr::Const(2.0);
/// assert_eq!(f.eval(2.0).unwrap(), 2.0);
/// let g = Expr::function("sqrt", Expr::Var("x".to_string())).unwrap();
/// assert!(g.eval(-1.0).is_err());
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
/// the callable contract used by all solvers: a NumericFunction trait for parsed functions and closures
pub mod symbolic_lambdify;
///______________________________________________________________________________________________________________________________________________
/// the collection of utility functions mainly for bracket checking
/// _____________________________________________________________________________________________________________________________________________
pub mod utils;

mod symbolic_engine_tests;
