// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::Utils::tables::{linear_trace_table, matrix_table, root_trace_table, steps_table};
use crate::Utils::task::TaskFile;
use crate::Utils::task_runner::run_tasks;
use crate::numerical::interpolation::{
    InterpolationPoint, NewtonPolynomial, lagrange_interpolation, linear_interpolation,
    quadratic_interpolation,
};
use crate::numerical::quadrature::trapezoidal_rule;
use crate::numerical::root_finding::bisection::bisection;
use crate::numerical::root_finding::false_position::false_position;
use crate::numerical::root_finding::fixed_point::fixed_point;
use crate::numerical::sampling::{SamplingWindow, sample_function};
use crate::somelinalg::gauss_jordan::gauss_jordan;
use crate::somelinalg::iterative_solvers_cpu::gauss_seidel::gauss_seidel;
use crate::somelinalg::iterative_solvers_cpu::jacobi::jacobi;
use crate::somelinalg::linear_sys_diagnostics::{condition_number, residual_inf_norm};
use crate::symbolic::parse_expr::parse_function;
use nalgebra::{DMatrix, DVector};
use std::error::Error;

/// number of the last example
pub const LAST_EXAMPLE: usize = 6;

pub fn methods_examples(example: usize) -> Result<(), Box<dyn Error>> {
    match example {
        0 => {
            // ROOTS OF A CUBIC
            // parse string into a function of x, the parser checks that f(1) can be computed
            let f = parse_function("x^3 - x - 2")?;
            println!("{}", f);
            let bisection_result = bisection(&f, 1.0, 2.0, 1e-6, 50);
            println!("{}", root_trace_table(bisection_result.trace()));
            let false_position_result = false_position(&f, 1.0, 2.0, 1e-6, 50);
            println!("{}", root_trace_table(false_position_result.trace()));
            println!(
                "bisection: root {} in {} iterations, false position: root {} in {} iterations",
                bisection_result.clone().into_result()?,
                bisection_result.iterations(),
                false_position_result.clone().into_result()?,
                false_position_result.iterations()
            );
            // points for the plot of f, values above 1e6 are cut off
            let samples = sample_function(&f, &SamplingWindow::root_finding());
            println!("{} points to plot", samples.len());
            // bracket without a sign change
            let g = parse_function("x^2 + 1")?;
            if let Some(e) = bisection(&g, -1.0, 1.0, 1e-6, 50).error() {
                println!("{}", e);
            }
        }
        1 => {
            // FIXED POINT OF cos(x)
            let g = parse_function("cos(x)")?;
            let result = fixed_point(&g, 0.5, 1e-8, 100);
            println!("{}", root_trace_table(result.trace()));
            println!("fixed point {}", result.into_result()?);
            // iterates of 2x^2 started at 3 run away to infinity
            let diverging = parse_function("2*x^2")?;
            let result = fixed_point(&diverging, 3.0, 1e-8, 2000);
            println!("{:?}", result.error());
        }
        2 => {
            // JACOBI AND GAUSS-SEIDEL
            let A = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 2.0, 3.0, 5.0, 1.0, 1.0, 1.0, 3.0]);
            let b = DVector::from_vec(vec![4.0, 7.0, 3.0]);
            let x0 = DVector::zeros(3);
            let jacobi_result = jacobi(&A, &b, &x0, 1e-8, 100);
            println!("{}", linear_trace_table(jacobi_result.trace()));
            let seidel_result = gauss_seidel(&A, &b, &x0, 1e-8, 100);
            println!("{}", linear_trace_table(seidel_result.trace()));
            let x = seidel_result.clone().into_result()?;
            println!(
                "jacobi: {} iterations, gauss-seidel: {} iterations, residual {:e}",
                jacobi_result.iterations(),
                seidel_result.iterations(),
                residual_inf_norm(&A, &x, &b)
            );
            // Jacobi refuses matrices without strict diagonal dominance
            let A = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
            let b = DVector::from_vec(vec![1.0, 1.0]);
            if let Some(e) = jacobi(&A, &b, &DVector::zeros(2), 1e-6, 50).error() {
                println!("{}", e);
            }
        }
        3 => {
            // GAUSS-JORDAN STEP BY STEP
            let A = DMatrix::from_row_slice(3, 3, &[2.0, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0]);
            let b = DVector::from_vec(vec![8.0, -11.0, -3.0]);
            println!("{}", matrix_table(&A));
            println!("condition number {}", condition_number(&A));
            let result = gauss_jordan(&A, &b);
            println!("{}", steps_table(result.steps()));
            println!("solution {}", result.into_result()?);
            // singular matrix: the steps done before the zero pivot are kept
            let A = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
            let result = gauss_jordan(&A, &DVector::from_vec(vec![3.0, 6.0]));
            println!("{} steps, {:?}", result.steps().len(), result.error());
        }
        4 => {
            // INTERPOLATION
            let p0 = InterpolationPoint::new(0.0, 0.0);
            let p1 = InterpolationPoint::new(10.0, 100.0);
            println!("linear: y(5) = {}", linear_interpolation(p0, p1, 5.0)?);
            let points = [
                InterpolationPoint::new(0.0, 1.0),
                InterpolationPoint::new(1.0, 2.0),
                InterpolationPoint::new(2.0, 5.0),
            ];
            let quadratic = quadratic_interpolation(&points, 1.5)?;
            println!("quadratic: y(1.5) = {}, {}", quadratic.y, quadratic.polynomial);
            let samples =
                sample_function(&quadratic.polynomial, &SamplingWindow::interpolation(&points));
            println!("{} points to plot", samples.len());
            // more points: same value from the Lagrange and the Newton form
            let points: Vec<InterpolationPoint> = (0..5)
                .map(|i| {
                    let x = i as f64 * 0.5;
                    InterpolationPoint::new(x, x.exp())
                })
                .collect();
            let newton = NewtonPolynomial::from_points(&points)?;
            println!(
                "degree {}: lagrange {}, newton {}, exp {}",
                newton.degree(),
                lagrange_interpolation(&points, 1.2)?,
                newton.evaluate(1.2),
                1.2f64.exp()
            );
        }
        5 => {
            // TRAPEZOIDAL RULE
            let f = parse_function("x^2")?;
            for n in [1, 10, 100, 1000] {
                let result = trapezoidal_rule(&f, 0.0, 1.0, n)?;
                println!(
                    "n = {}: integral {}, error {:e}",
                    n,
                    result.integral,
                    (result.integral - 1.0 / 3.0).abs()
                );
            }
            let g = parse_function("sin(x)")?;
            let result = trapezoidal_rule(&g, 0.0, std::f64::consts::PI, 10)?;
            for node in &result.nodes {
                println!("x = {:.4}, f(x) = {:.4}, weight = {}", node.x, node.fx, node.weight);
            }
        }
        6 => {
            // TASK FILE
            let input = r#"
                // every section is one task
                bisection
                function: x^3-x-2
                a: 1
                b: 2
                tolerance: 1e-6

                quadratic_interpolation
                points: 0, 1, 1, 2, 2, 5
                x: 1.5

                gauss_jordan
                matrix: 2, 1, 1, 3
                vector: 5, 10
                "#;
            let task_file: TaskFile = input.parse()?;
            for report in run_tasks(&task_file) {
                println!("{}", report);
            }
        }
        _ => {
            println!("no example {}, examples are 0..={}", example, LAST_EXAMPLE);
        }
    }
    Ok(())
}
