//! a module turns a String expression into a symbolic expression
//!# Example
//! ```
//! use RustedNumMethods::symbolic::parse_expr::parse_expression;
//! let parsed_expression = parse_expression("x^2 - 2*sin(x)").unwrap();
//! assert_eq!(parsed_expression.to_string(), "((x ^ 2) - (2 * sin(x)))");
//! ```
//
//  grammar (lowest precedence first):
//      expression := term (('+' | '-') term)*
//      term       := unary (('*' | '/') unary)*
//      unary      := ('-' | '+') unary | power
//      power      := primary ('^' unary)?          right associative, -x^2 = -(x^2)
//      primary    := number | 'x' | 'pi' | 'e' | function '(' expression ')' | '(' expression ')'
//
use crate::symbolic::symbolic_engine::{EvalError, Expr, FUNCTION_NAMES};
use crate::symbolic::symbolic_lambdify::ParsedFunction;
use crate::symbolic::utils::find_unpaired_bracket;
use log::{info, warn};
use std::f64::consts::{E, PI};
use std::fmt;

/// The single free variable of user functions
pub const VARIABLE: &str = "x";
/// The point at which a freshly parsed function is evaluated once before it is handed out
pub const SELF_TEST_POINT: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(val) => write!(f, "{}", val),
            Token::Ident(name) => write!(f, "{}", name),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Caret => write!(f, "^"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

/// Error types of the expression parser. Positions are character offsets in the input.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    EmptyExpression,
    UnexpectedCharacter { character: char, position: usize },
    InvalidNumber { literal: String, position: usize },
    UnbalancedParentheses { position: usize },
    UnknownIdentifier { name: String, position: usize },
    MissingArgument { function: String, position: usize },
    UnexpectedToken { token: String, position: usize },
    UnexpectedEnd,
    NestingTooDeep { position: usize },
    /// the expression parsed but could not be evaluated at the self-test point
    EvaluationFailed { x: f64, source: EvalError },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match self {
            ParseError::EmptyExpression => "the expression is empty".to_string(),
            ParseError::UnexpectedCharacter {
                character,
                position,
            } => format!("unexpected character '{}' at position {}", character, position),
            ParseError::InvalidNumber { literal, position } => {
                format!("invalid number '{}' at position {}", literal, position)
            }
            ParseError::UnbalancedParentheses { position } => {
                format!("unbalanced parenthesis at position {}", position)
            }
            ParseError::UnknownIdentifier { name, position } => {
                format!("unknown identifier '{}' at position {}", name, position)
            }
            ParseError::MissingArgument { function, position } => format!(
                "function '{}' at position {} must be followed by '(' and an argument",
                function, position
            ),
            ParseError::UnexpectedToken { token, position } => {
                format!("unexpected '{}' at position {}", token, position)
            }
            ParseError::UnexpectedEnd => "the expression ends unexpectedly".to_string(),
            ParseError::NestingTooDeep { position } => format!(
                "more than {} nested brackets, signs or powers at position {}",
                MAX_NESTING, position
            ),
            ParseError::EvaluationFailed { x, source } => {
                format!("the function cannot be evaluated at x = {}: {}", x, source)
            }
        };
        write!(
            f,
            "Invalid function: {}. Use standard math syntax (e.g., 'x^3 - 2*x + 1').",
            reason
        )
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::EvaluationFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Splits the input into tokens with their character positions.
/// Identifiers are lowercased, `**` is read as `^`.
pub fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' if chars.get(i + 1) == Some(&'*') => {
                i += 1;
                Token::Caret
            }
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '(' => Token::LParen,
            ')' => Token::RParen,
            c if c.is_ascii_digit() || c == '.' => {
                let (value, end) = read_number(&chars, i)?;
                tokens.push((Token::Number(value), start));
                i = end;
                continue;
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut end = i;
                while end < chars.len() && (chars[end].is_alphanumeric() || chars[end] == '_') {
                    end += 1;
                }
                let name: String = chars[i..end].iter().collect::<String>().to_lowercase();
                tokens.push((Token::Ident(name), start));
                i = end;
                continue;
            }
            other => {
                return Err(ParseError::UnexpectedCharacter {
                    character: other,
                    position: i,
                });
            }
        };
        tokens.push((token, start));
        i += 1;
    }

    Ok(tokens)
}

// digits [. digits] [(e|E) [+|-] digits]; the exponent part is only taken when digits follow,
// so "2e" stays "2" followed by the constant e
fn read_number(chars: &[char], start: usize) -> Result<(f64, usize), ParseError> {
    let mut end = start;
    while end < chars.len() && (chars[end].is_ascii_digit() || chars[end] == '.') {
        end += 1;
    }
    if end < chars.len() && (chars[end] == 'e' || chars[end] == 'E') {
        let mut exp_end = end + 1;
        if exp_end < chars.len() && (chars[exp_end] == '+' || chars[exp_end] == '-') {
            exp_end += 1;
        }
        if exp_end < chars.len() && chars[exp_end].is_ascii_digit() {
            while exp_end < chars.len() && chars[exp_end].is_ascii_digit() {
                exp_end += 1;
            }
            end = exp_end;
        }
    }
    let literal: String = chars[start..end].iter().collect();
    literal
        .parse::<f64>()
        .map(|value| (value, end))
        .map_err(|_| ParseError::InvalidNumber {
            literal,
            position: start,
        })
}

/// deepest nesting of brackets, unary signs and exponents the parser descends into
pub const MAX_NESTING: usize = 200;

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn next(&mut self) -> Option<(Token, usize)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expression(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    lhs = Expr::Add(lhs.boxed(), self.term()?.boxed());
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    lhs = Expr::Sub(lhs.boxed(), self.term()?.boxed());
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    lhs = Expr::Mul(lhs.boxed(), self.unary()?.boxed());
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    lhs = Expr::Div(lhs.boxed(), self.unary()?.boxed());
                }
                _ => return Ok(lhs),
            }
        }
    }

    // every recursive descent passes through here
    fn unary(&mut self) -> Result<Expr, ParseError> {
        if self.depth >= MAX_NESTING {
            let position = self
                .tokens
                .get(self.pos)
                .or(self.tokens.last())
                .map(|(_, position)| *position)
                .unwrap_or(0);
            return Err(ParseError::NestingTooDeep { position });
        }
        self.depth += 1;
        let result = self.signed();
        self.depth -= 1;
        result
    }

    fn signed(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.unary()?)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, ParseError> {
        let base = self.primary()?;
        if let Some(Token::Caret) = self.peek() {
            self.pos += 1;
            // the exponent may itself carry a sign: 2^-x
            let exponent = self.unary()?;
            return Ok(base.pow(exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let (token, position) = self.next().ok_or(ParseError::UnexpectedEnd)?;
        match token {
            Token::Number(value) => Ok(Expr::Const(value)),
            Token::LParen => {
                let inner = self.expression()?;
                self.expect_closing(position)?;
                Ok(inner)
            }
            Token::Ident(name) => self.identifier(name, position),
            other => Err(ParseError::UnexpectedToken {
                token: other.to_string(),
                position,
            }),
        }
    }

    fn identifier(&mut self, name: String, position: usize) -> Result<Expr, ParseError> {
        match name.as_str() {
            VARIABLE => return Ok(Expr::Var(VARIABLE.to_string())),
            "pi" | "π" => return Ok(Expr::Const(PI)),
            "e" => return Ok(Expr::Const(E)),
            _ => {}
        }
        if !FUNCTION_NAMES.contains(&name.as_str()) {
            return Err(ParseError::UnknownIdentifier { name, position });
        }
        match self.next() {
            Some((Token::LParen, open)) => {
                let argument = self.expression()?;
                self.expect_closing(open)?;
                Expr::function(&name, argument)
                    .ok_or(ParseError::UnknownIdentifier { name, position })
            }
            _ => Err(ParseError::MissingArgument {
                function: name,
                position,
            }),
        }
    }

    fn expect_closing(&mut self, open: usize) -> Result<(), ParseError> {
        match self.next() {
            Some((Token::RParen, _)) => Ok(()),
            Some((token, position)) => Err(ParseError::UnexpectedToken {
                token: token.to_string(),
                position,
            }),
            None => Err(ParseError::UnbalancedParentheses { position: open }),
        }
    }
}

/// Parses the text of a function of `x` into an expression tree.
///
/// # Errors
/// Returns a [`ParseError`] for empty input, unbalanced brackets, unknown identifiers and
/// any other malformed input. No evaluation is done here, see [`parse_function`].
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseError::EmptyExpression);
    }
    if let Some(position) = find_unpaired_bracket(input) {
        return Err(ParseError::UnbalancedParentheses { position });
    }
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.expression()?;
    if let Some((token, position)) = parser.next() {
        return Err(ParseError::UnexpectedToken {
            token: token.to_string(),
            position,
        });
    }
    Ok(expr)
}

/// Compiles the text of a function of `x` into a callable.
///
/// The function is evaluated once at `x = 1` so that expressions which parse but cannot
/// be computed fail here and not inside a solver.
///# Example
/// ```
/// use RustedNumMethods::symbolic::parse_expr::parse_function;
/// use RustedNumMethods::symbolic::symbolic_lambdify::NumericFunction;
/// let f = parse_function("x^3 - x - 2").unwrap();
/// assert_eq!(f.evaluate(2.0).unwrap(), 4.0);
/// assert!(parse_function("ln(x - 3)").is_err());
/// ```
pub fn parse_function(input: &str) -> Result<ParsedFunction, ParseError> {
    let expr = match parse_expression(input) {
        Ok(expr) => expr,
        Err(err) => {
            warn!("failed to parse '{}': {}", input, err);
            return Err(err);
        }
    };
    if let Err(source) = expr.eval(SELF_TEST_POINT) {
        warn!("'{}' cannot be evaluated at x = {}: {}", input, SELF_TEST_POINT, source);
        return Err(ParseError::EvaluationFailed {
            x: SELF_TEST_POINT,
            source,
        });
    }
    info!("parsed function '{}' as {}", input.trim(), expr);
    Ok(ParsedFunction::new(input.trim(), expr))
}
