//! pretty-printed tables of solver traces
use crate::numerical::solve_result::RootIteration;
use crate::somelinalg::gauss_jordan::MatrixStep;
use crate::somelinalg::iterative_solvers_cpu::LinearIteration;
use itertools::Itertools;
use nalgebra::DMatrix;
use tabled::{builder::Builder, settings::Style};

fn fmt_value(value: f64) -> String {
    format!("{:.6}", value)
}

pub fn root_trace_table(trace: &[RootIteration]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["iteration", "a", "b", "p", "f(p)", "error"]);
    for row in trace {
        let bound = |v: Option<f64>| v.map(fmt_value).unwrap_or_else(|| "-".to_string());
        builder.push_record([
            row.iteration.to_string(),
            bound(row.a),
            bound(row.b),
            fmt_value(row.p),
            format!("{:.6e}", row.fp),
            format!("{:.6e}", row.error),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

pub fn linear_trace_table(trace: &[LinearIteration]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["iteration", "x", "error"]);
    for row in trace {
        builder.push_record([
            row.iteration.to_string(),
            format!("[{}]", row.values.iter().map(|v| fmt_value(*v)).join(", ")),
            format!("{:.6e}", row.error),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

/// matrix printed with two decimals, one table row per matrix row
pub fn matrix_table(matrix: &DMatrix<f64>) -> String {
    let mut builder = Builder::default();
    for row in matrix.row_iter() {
        builder.push_record(row.iter().map(|v| format!("{:.2}", v)));
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

pub fn steps_table(steps: &[MatrixStep]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["step", "operation", "description", "matrix"]);
    for step in steps {
        builder.push_record([
            step.step.to_string(),
            step.operation.clone(),
            step.description.clone(),
            step.matrix
                .row_iter()
                .map(|row| row.iter().map(|v| format!("{:.2}", v)).join("  "))
                .join("\n"),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::root_finding::bisection::bisection;
    use crate::somelinalg::gauss_jordan::gauss_jordan;
    use crate::somelinalg::iterative_solvers_cpu::jacobi::jacobi;
    use nalgebra::DVector;

    #[test]
    fn test_root_trace_table() {
        let result = bisection(&|x: f64| x * x - 2.0, 0.0, 2.0, 1e-3, 50);
        let table = root_trace_table(result.trace());
        assert!(table.contains("iteration"));
        assert!(table.contains("1.000000"));
        assert!(table.contains("╭"));
        // header + one line per iteration between the borders
        assert!(table.lines().count() >= result.trace().len() + 1);
    }

    #[test]
    fn test_fixed_point_rows_have_no_bracket() {
        let row = RootIteration {
            iteration: 1,
            a: None,
            b: None,
            p: 0.5,
            fp: 0.5,
            error: 0.5,
        };
        let table = root_trace_table(&[row]);
        assert!(table.contains(" - "));
    }

    #[test]
    fn test_linear_and_steps_tables() {
        let A = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 2.0, 5.0]);
        let b = DVector::from_vec(vec![5.0, 7.0]);
        let result = jacobi(&A, &b, &DVector::zeros(2), 1e-8, 100);
        let table = linear_trace_table(result.trace());
        assert!(table.contains("[1.250000, 1.400000]"));

        let elimination = gauss_jordan(&A, &b);
        let table = steps_table(elimination.steps());
        assert!(table.contains("Start"));
        assert!(table.contains("Done"));
        assert!(matrix_table(&A).contains("4.00"));
    }
}
