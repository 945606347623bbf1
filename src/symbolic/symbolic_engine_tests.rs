//___________________________________TESTS____________________________________

#[cfg(test)]
mod tests {
    use crate::symbolic::parse_expr::{
        MAX_NESTING, ParseError, parse_expression, parse_function, tokenize,
    };
    use crate::symbolic::symbolic_engine::{EvalError, Expr};
    use crate::symbolic::symbolic_lambdify::NumericFunction;
    use approx::assert_relative_eq;
    use std::f64::consts::{E, PI};

    fn eval(input: &str, x: f64) -> f64 {
        parse_expression(input).unwrap().eval(x).unwrap()
    }

    #[test]
    fn test_tokenize_power_synonym_and_numbers() {
        let tokens = tokenize("2**x + 1.5e-3").unwrap();
        let kinds: Vec<String> = tokens.iter().map(|(t, _)| t.to_string()).collect();
        assert_eq!(kinds, vec!["2", "^", "x", "+", "0.0015"]);
        // positions are character offsets
        assert_eq!(tokens[2].1, 3);
        assert_eq!(tokens[4].1, 7);
    }

    #[test]
    fn test_tokenize_exponent_needs_digits() {
        // "2e" is 2 followed by the constant e
        let tokens = tokenize("2e").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_relative_eq!(eval("2*e", 0.0), 2.0 * E, epsilon = 1e-12);
    }

    #[test]
    fn test_operator_precedence() {
        assert_relative_eq!(eval("1 + 2 * 3", 0.0), 7.0);
        assert_relative_eq!(eval("(1 + 2) * 3", 0.0), 9.0);
        assert_relative_eq!(eval("8 / 4 / 2", 0.0), 1.0);
        assert_relative_eq!(eval("10 - 4 - 3", 0.0), 3.0);
    }

    #[test]
    fn test_power_is_right_associative_and_binds_tighter_than_minus() {
        assert_relative_eq!(eval("2^3^2", 0.0), 512.0);
        assert_relative_eq!(eval("-x^2", 3.0), -9.0);
        assert_relative_eq!(eval("2^-1", 0.0), 0.5);
        assert_relative_eq!(eval("(-x)^2", 3.0), 9.0);
    }

    #[test]
    fn test_functions_and_constants() {
        assert_relative_eq!(eval("sin(pi/2)", 0.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(eval("cos(0)", 0.0), 1.0);
        assert_relative_eq!(eval("tan(x)", 0.3), 0.3f64.tan(), epsilon = 1e-12);
        assert_relative_eq!(eval("tg(x)", 0.3), 0.3f64.tan(), epsilon = 1e-12);
        assert_relative_eq!(eval("sqrt(16)", 0.0), 4.0);
        assert_relative_eq!(eval("exp(1)", 0.0), E, epsilon = 1e-12);
        assert_relative_eq!(eval("ln(e)", 0.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(eval("log10(1000)", 0.0), 3.0, epsilon = 1e-12);
        assert_relative_eq!(eval("2*pi", 0.0), 2.0 * PI, epsilon = 1e-12);
    }

    #[test]
    fn test_case_insensitive_input() {
        assert_relative_eq!(eval("SIN(X) + Exp(x)", 0.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(eval("PI", 0.0), PI);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_expression("   "), Err(ParseError::EmptyExpression));
        assert!(matches!(
            parse_expression("(x + 1"),
            Err(ParseError::UnbalancedParentheses { position: 0 })
        ));
        assert!(matches!(
            parse_expression("x + 1)"),
            Err(ParseError::UnbalancedParentheses { position: 5 })
        ));
        assert!(matches!(
            parse_expression("y + 1"),
            Err(ParseError::UnknownIdentifier { ref name, .. }) if name == "y"
        ));
        assert!(matches!(
            parse_expression("sin x"),
            Err(ParseError::MissingArgument { .. })
        ));
        assert!(matches!(
            parse_expression("x $ 2"),
            Err(ParseError::UnexpectedCharacter { character: '$', position: 2 })
        ));
        assert!(matches!(
            parse_expression("x +"),
            Err(ParseError::UnexpectedEnd)
        ));
        assert!(matches!(
            parse_expression("x 2"),
            Err(ParseError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            parse_expression("1.2.3"),
            Err(ParseError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_expression("* x"),
            Err(ParseError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let depth = 100_000;
        let brackets = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
        assert!(matches!(
            parse_expression(&brackets),
            Err(ParseError::NestingTooDeep { .. })
        ));
        let signs = format!("{}x", "-".repeat(depth));
        assert!(matches!(
            parse_expression(&signs),
            Err(ParseError::NestingTooDeep { .. })
        ));
        let powers = vec!["2"; depth].join("^");
        assert!(matches!(
            parse_expression(&powers),
            Err(ParseError::NestingTooDeep { .. })
        ));
        // moderate nesting still parses
        let depth = MAX_NESTING / 4;
        let brackets = format!("{}x + 1{}", "(".repeat(depth), ")".repeat(depth));
        assert_relative_eq!(eval(&brackets, 2.0), 3.0);
        assert_relative_eq!(eval("----x", 2.0), 2.0);
    }

    #[test]
    fn test_parse_function_self_test() {
        // undefined at x = 1
        let err = parse_function("ln(x - 3)").unwrap_err();
        assert!(matches!(
            err,
            ParseError::EvaluationFailed {
                source: EvalError::NonPositiveLogarithm { .. },
                ..
            }
        ));
        assert!(parse_function("1/(x - 1)").is_err());
        assert!(parse_function("sqrt(x - 2)").is_err());
        // defined at x = 1
        let f = parse_function("sqrt(x)").unwrap();
        assert!(f.evaluate(-1.0).is_err());
        assert_relative_eq!(f.evaluate(4.0).unwrap(), 2.0);
    }

    #[test]
    fn test_error_message_format() {
        let message = parse_expression("").unwrap_err().to_string();
        assert!(message.starts_with("Invalid function: "));
        assert!(message.ends_with("Use standard math syntax (e.g., 'x^3 - 2*x + 1')."));
    }

    #[test]
    fn test_parse_function_keeps_source() {
        let f = parse_function("  cos(x) - x ").unwrap();
        assert_eq!(f.source(), "cos(x) - x");
        assert_relative_eq!(f.evaluate(0.0).unwrap(), 1.0);
        assert!(matches!(f.expr(), Expr::Sub(_, _)));
    }

    #[test]
    fn test_display_round_trip_evaluates_the_same() {
        let inputs = ["x^3 - 2*x + 1", "exp(-x) - x", "sin(x)/(1 + x^2)", "-x^2 + 2^-x"];
        for input in inputs {
            let expr = parse_expression(input).unwrap();
            let reparsed = parse_expression(&expr.to_string()).unwrap();
            for i in 0..10 {
                let x = 0.25 + i as f64 * 0.5;
                assert_relative_eq!(
                    expr.eval(x).unwrap(),
                    reparsed.eval(x).unwrap(),
                    epsilon = 1e-12
                );
            }
        }
    }
}
