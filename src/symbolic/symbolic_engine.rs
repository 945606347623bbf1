//! # Symbolic Engine Module
//!
//! Expression tree produced by the parser and evaluated by the solvers.
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! - **Variables**: `Var(String)` - the free variable, always `x` when produced by the parser
//! - **Constants**: `Const(f64)` - numerical constants, including `pi` and `e`
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow` - basic arithmetic
//! - **Functions**: `Exp`, `Ln`, `Log10`, `sqrt`, `sin`, `cos`, `tg`
//!
//! ### `EvalError`
//! Evaluation is checked: operations that leave the real domain (square root of a negative
//! number, logarithm of a non-positive number, division by zero, NaN from a power) return an
//! `EvalError` instead of a silent NaN. Overflow to infinity is passed through.
//!
//! Unary minus is stored as `Mul(Const(-1.0), expr)`, the same shape the `Neg` operator builds.

#![allow(non_camel_case_types)]

use std::f64;
use std::fmt;

/// Names accepted by [`Expr::function`]
pub const FUNCTION_NAMES: [&str; 8] = ["sin", "cos", "tan", "tg", "sqrt", "exp", "ln", "log10"];

/// Core symbolic expression enum: an abstract syntax tree of a function of one variable.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Exponential function: e^x
    Exp(Box<Expr>),
    /// Natural logarithm: ln(x)
    Ln(Box<Expr>),
    /// Decimal logarithm: log10(x)
    Log10(Box<Expr>),
    /// Square root
    sqrt(Box<Expr>),
    /// Sine function: sin(x)
    sin(Box<Expr>),
    /// Cosine function: cos(x)
    cos(Box<Expr>),
    /// Tangent function: tan(x) - uses mathematical notation 'tg'
    tg(Box<Expr>),
}

/// Error raised when an expression is evaluated outside of its real domain.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// square root of a negative number
    NegativeSqrt { argument: f64 },
    /// ln or log10 of zero or of a negative number
    NonPositiveLogarithm {
        function: &'static str,
        argument: f64,
    },
    /// denominator evaluated to exactly zero
    DivisionByZero,
    /// the operation produced NaN
    NotANumber { operation: String },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvalError::NegativeSqrt { argument } => {
                write!(f, "square root of a negative number ({})", argument)
            }
            EvalError::NonPositiveLogarithm { function, argument } => {
                write!(f, "{} of a non-positive number ({})", function, argument)
            }
            EvalError::DivisionByZero => write!(f, "division by zero"),
            EvalError::NotANumber { operation } => {
                write!(f, "{} is not a real number", operation)
            }
        }
    }
}

impl std::error::Error for EvalError {}

/// Display implementation for pretty printing symbolic expressions.
///
/// Binary operations are fully parenthesised so that the printed form can be parsed back.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Ln(expr) => write!(f, "ln({})", expr),
            Expr::Log10(expr) => write!(f, "log10({})", expr),
            Expr::sqrt(expr) => write!(f, "sqrt({})", expr),
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::tg(expr) => write!(f, "tg({})", expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Builds the function node for a (lowercase) function name, `None` if the name is
    /// not a known function.
    pub fn function(name: &str, argument: Expr) -> Option<Expr> {
        let argument = argument.boxed();
        let expr = match name {
            "sin" => Expr::sin(argument),
            "cos" => Expr::cos(argument),
            "tan" | "tg" => Expr::tg(argument),
            "sqrt" => Expr::sqrt(argument),
            "exp" => Expr::Exp(argument),
            "ln" => Expr::Ln(argument),
            "log10" => Expr::Log10(argument),
            _ => return None,
        };
        Some(expr)
    }

    /// true if the expression does not depend on any variable
    pub fn is_constant(&self) -> bool {
        match self {
            Expr::Var(_) => false,
            Expr::Const(_) => true,
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => lhs.is_constant() && rhs.is_constant(),
            Expr::Exp(expr)
            | Expr::Ln(expr)
            | Expr::Log10(expr)
            | Expr::sqrt(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::tg(expr) => expr.is_constant(),
        }
    }

    /// Evaluates the expression with every variable bound to `x`.
    ///
    /// # Errors
    /// Returns an [`EvalError`] when an intermediate value leaves the real domain.
    pub fn eval(&self, x: f64) -> Result<f64, EvalError> {
        let value = match self {
            Expr::Var(_) => x,
            Expr::Const(val) => *val,
            Expr::Add(lhs, rhs) => lhs.eval(x)? + rhs.eval(x)?,
            Expr::Sub(lhs, rhs) => lhs.eval(x)? - rhs.eval(x)?,
            Expr::Mul(lhs, rhs) => lhs.eval(x)? * rhs.eval(x)?,
            Expr::Div(lhs, rhs) => {
                let numerator = lhs.eval(x)?;
                let denominator = rhs.eval(x)?;
                if denominator == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                numerator / denominator
            }
            Expr::Pow(base, exp) => {
                let base = base.eval(x)?;
                let exp = exp.eval(x)?;
                let value = base.powf(exp);
                if value.is_nan() {
                    return Err(EvalError::NotANumber {
                        operation: format!("{} ^ {}", base, exp),
                    });
                }
                value
            }
            Expr::Exp(expr) => expr.eval(x)?.exp(),
            Expr::Ln(expr) => {
                let argument = expr.eval(x)?;
                if argument <= 0.0 {
                    return Err(EvalError::NonPositiveLogarithm {
                        function: "ln",
                        argument,
                    });
                }
                argument.ln()
            }
            Expr::Log10(expr) => {
                let argument = expr.eval(x)?;
                if argument <= 0.0 {
                    return Err(EvalError::NonPositiveLogarithm {
                        function: "log10",
                        argument,
                    });
                }
                argument.log10()
            }
            Expr::sqrt(expr) => {
                let argument = expr.eval(x)?;
                if argument < 0.0 {
                    return Err(EvalError::NegativeSqrt { argument });
                }
                argument.sqrt()
            }
            Expr::sin(expr) => expr.eval(x)?.sin(),
            Expr::cos(expr) => expr.eval(x)?.cos(),
            Expr::tg(expr) => expr.eval(x)?.tan(),
        };
        // inf - inf, 0 * inf, sin(inf) ...
        if value.is_nan() {
            return Err(EvalError::NotANumber {
                operation: self.to_string(),
            });
        }
        Ok(value)
    }
}
