//! Runs parsed tasks and collects what is printed and exported for each of them.
use crate::Utils::logger::{
    save_linear_trace_to_csv, save_root_trace_to_csv, save_samples_to_csv, save_steps_to_file,
    save_trace_to_file,
};
use crate::Utils::tables::{linear_trace_table, root_trace_table, steps_table};
use crate::Utils::task::{Method, Task, TaskFile};
use crate::numerical::interpolation::{
    QuadraticInterpolation, linear_interpolation, quadratic_interpolation,
};
use crate::numerical::quadrature::{TrapezoidResult, trapezoidal_rule};
use crate::numerical::root_finding::bisection::bisection;
use crate::numerical::root_finding::false_position::false_position;
use crate::numerical::root_finding::fixed_point::fixed_point;
use crate::numerical::sampling::{FunctionPoint, SamplingWindow, sample_function};
use crate::numerical::solve_result::{RootFindingResult, SolveError, SolveOutcome};
use crate::somelinalg::gauss_jordan::{EliminationResult, gauss_jordan};
use crate::somelinalg::iterative_solvers_cpu::LinearSystemResult;
use crate::somelinalg::iterative_solvers_cpu::gauss_seidel::gauss_seidel;
use crate::somelinalg::iterative_solvers_cpu::jacobi::jacobi;
use itertools::Itertools;
use log::info;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutput {
    Roots(RootFindingResult),
    LinearSystem(LinearSystemResult),
    Elimination(EliminationResult),
    LinearInterpolation(Result<f64, SolveError>),
    QuadraticInterpolation(Result<QuadraticInterpolation, SolveError>),
    Integral(Result<TrapezoidResult, SolveError>),
}

/// Output of one task and the function samples for its plot
#[derive(Debug, Clone, PartialEq)]
pub struct TaskReport {
    pub method: Method,
    pub output: TaskOutput,
    pub samples: Vec<FunctionPoint>,
}

impl TaskReport {
    pub fn error(&self) -> Option<&SolveError> {
        match &self.output {
            TaskOutput::Roots(outcome) => outcome.error(),
            TaskOutput::LinearSystem(outcome) => outcome.error(),
            TaskOutput::Elimination(result) => result.error(),
            TaskOutput::LinearInterpolation(result) => result.as_ref().err(),
            TaskOutput::QuadraticInterpolation(result) => result.as_ref().err(),
            TaskOutput::Integral(result) => result.as_ref().err(),
        }
    }

    /// best-effort results of an exhausted iteration do not count
    pub fn is_success(&self) -> bool {
        match &self.output {
            TaskOutput::Roots(outcome) => outcome.is_converged(),
            TaskOutput::LinearSystem(outcome) => outcome.is_converged(),
            _ => self.error().is_none(),
        }
    }

    pub fn summary(&self) -> String {
        match &self.output {
            TaskOutput::Roots(outcome) => outcome_summary(outcome, "root", |p| format!("{:.6}", p)),
            TaskOutput::LinearSystem(outcome) => outcome_summary(outcome, "x", |x| {
                format!("[{}]", x.iter().map(|v| format!("{:.6}", v)).join(", "))
            }),
            TaskOutput::Elimination(result) => match result {
                EliminationResult::Solved { solution, steps } => format!(
                    "x = [{}] in {} steps",
                    solution.iter().map(|v| format!("{:.6}", v)).join(", "),
                    steps.len()
                ),
                EliminationResult::Failed { reason, steps } => {
                    format!("{} (after {} steps)", reason, steps.len())
                }
            },
            TaskOutput::LinearInterpolation(result) => match result {
                Ok(y) => format!("y = {:.6}", y),
                Err(e) => e.to_string(),
            },
            TaskOutput::QuadraticInterpolation(result) => match result {
                Ok(interpolation) => format!(
                    "y({}) = {:.6}\n{}",
                    interpolation.x, interpolation.y, interpolation.polynomial
                ),
                Err(e) => e.to_string(),
            },
            TaskOutput::Integral(result) => match result {
                Ok(integral) => format!(
                    "integral = {:.6}, h = {}, {} nodes",
                    integral.integral,
                    integral.step,
                    integral.nodes.len()
                ),
                Err(e) => e.to_string(),
            },
        }
    }

    /// trace table where the method has one
    pub fn table(&self) -> Option<String> {
        match &self.output {
            TaskOutput::Roots(outcome) if !outcome.trace().is_empty() => {
                Some(root_trace_table(outcome.trace()))
            }
            TaskOutput::LinearSystem(outcome) if !outcome.trace().is_empty() => {
                Some(linear_trace_table(outcome.trace()))
            }
            TaskOutput::Elimination(result) if !result.steps().is_empty() => {
                Some(steps_table(result.steps()))
            }
            _ => None,
        }
    }

    /// Writes the trace and the samples of the task into `dir`, files are named after the
    /// method. Returns the written paths.
    pub fn save_csv(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let mut written = Vec::new();
        match &self.output {
            TaskOutput::Roots(outcome) => {
                let path = dir.join(format!("{}_trace.csv", self.method));
                save_trace_to_file(&path, |file| save_root_trace_to_csv(outcome.trace(), file))?;
                written.push(path);
            }
            TaskOutput::LinearSystem(outcome) => {
                let path = dir.join(format!("{}_trace.csv", self.method));
                save_trace_to_file(&path, |file| save_linear_trace_to_csv(outcome.trace(), file))?;
                written.push(path);
            }
            TaskOutput::Elimination(result) => {
                let path = dir.join(format!("{}_steps.txt", self.method));
                save_trace_to_file(&path, |file| save_steps_to_file(result.steps(), file))?;
                written.push(path);
            }
            _ => {}
        }
        if !self.samples.is_empty() {
            let path = dir.join(format!("{}_samples.csv", self.method));
            save_trace_to_file(&path, |file| save_samples_to_csv(&self.samples, file))?;
            written.push(path);
        }
        info!("{}: saved {} files into {}", self.method, written.len(), dir.display());
        Ok(written)
    }
}

fn outcome_summary<T, R>(
    outcome: &SolveOutcome<T, R>,
    name: &str,
    show: impl Fn(&T) -> String,
) -> String {
    match outcome {
        SolveOutcome::Converged { value, trace } => {
            format!("{} = {} after {} iterations", name, show(value), trace.len())
        }
        SolveOutcome::ExhaustedWithBestEffort {
            value,
            trace,
            reason,
        } => format!(
            "{} Best estimate {} = {} after {} iterations",
            reason,
            name,
            show(value),
            trace.len()
        ),
        SolveOutcome::Failed { reason, .. } => reason.to_string(),
    }
}

impl fmt::Display for TaskReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{} ({})",
            self.method.display_name(),
            self.method.category()
        )?;
        writeln!(f, "{}", self.summary())?;
        if let Some(table) = self.table() {
            writeln!(f, "{}", table)?;
        }
        Ok(())
    }
}

pub fn run_task(task: &Task) -> TaskReport {
    let method = task.method();
    info!("running {}", method.display_name());
    let (output, samples) = match task {
        Task::Bisection {
            function,
            a,
            b,
            tolerance,
            max_iterations,
        } => (
            TaskOutput::Roots(bisection(function, *a, *b, *tolerance, *max_iterations)),
            sample_function(function, &SamplingWindow::root_finding()),
        ),
        Task::FalsePosition {
            function,
            a,
            b,
            tolerance,
            max_iterations,
        } => (
            TaskOutput::Roots(false_position(function, *a, *b, *tolerance, *max_iterations)),
            sample_function(function, &SamplingWindow::root_finding()),
        ),
        Task::FixedPoint {
            function,
            p0,
            tolerance,
            max_iterations,
        } => (
            TaskOutput::Roots(fixed_point(function, *p0, *tolerance, *max_iterations)),
            sample_function(function, &SamplingWindow::fixed_point()),
        ),
        Task::LinearInterpolation { p0, p1, x } => {
            let (p0, p1) = (*p0, *p1);
            let line = move |t: f64| linear_interpolation(p0, p1, t).unwrap_or(f64::NAN);
            (
                TaskOutput::LinearInterpolation(linear_interpolation(p0, p1, *x)),
                sample_function(&line, &SamplingWindow::interpolation(&[p0, p1])),
            )
        }
        Task::QuadraticInterpolation { points, x } => {
            let result = quadratic_interpolation(points, *x);
            let samples = match &result {
                Ok(interpolation) => sample_function(
                    &interpolation.polynomial,
                    &SamplingWindow::interpolation(points),
                ),
                Err(_) => Vec::new(),
            };
            (TaskOutput::QuadraticInterpolation(result), samples)
        }
        Task::Trapezoidal { function, a, b, n } => (
            TaskOutput::Integral(trapezoidal_rule(function, *a, *b, *n)),
            sample_function(function, &SamplingWindow::trapezoid(*a, *b)),
        ),
        Task::GaussJordan { A, b } => (TaskOutput::Elimination(gauss_jordan(A, b)), Vec::new()),
        Task::GaussSeidel {
            A,
            b,
            initial_guess,
            tolerance,
            max_iterations,
        } => (
            TaskOutput::LinearSystem(gauss_seidel(
                A,
                b,
                initial_guess,
                *tolerance,
                *max_iterations,
            )),
            Vec::new(),
        ),
        Task::Jacobi {
            A,
            b,
            initial_guess,
            tolerance,
            max_iterations,
        } => (
            TaskOutput::LinearSystem(jacobi(A, b, initial_guess, *tolerance, *max_iterations)),
            Vec::new(),
        ),
    };
    TaskReport {
        method,
        output,
        samples,
    }
}

/// runs the tasks of the file in their catalogue order
pub fn run_tasks(task_file: &TaskFile) -> Vec<TaskReport> {
    task_file.tasks.iter().map(run_task).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::tempdir;

    fn reports(input: &str) -> Vec<TaskReport> {
        let task_file: TaskFile = input.parse().unwrap();
        run_tasks(&task_file)
    }

    #[test]
    fn test_run_root_tasks() {
        let reports = reports(
            "bisection\nfunction: x^3-x-2\na: 1\nb: 2\ntolerance: 1e-6\n\
             false_position\nfunction: x^3-x-2\na: 1\nb: 2\ntolerance: 1e-6\n",
        );
        assert_eq!(reports.len(), 2);
        for report in &reports {
            assert!(report.is_success());
            match &report.output {
                TaskOutput::Roots(outcome) => {
                    assert_relative_eq!(*outcome.value().unwrap(), 1.521380, epsilon = 1e-5)
                }
                other => panic!("unexpected output {:?}", other),
            }
            // -20..20 with step 0.5, the cubic stays below the clip everywhere
            assert_eq!(report.samples.len(), 81);
            assert!(report.summary().starts_with("root = 1.5213"));
            assert!(report.table().is_some());
        }
        assert!(reports[0].to_string().starts_with("Bisection (root finding)"));
    }

    #[test]
    fn test_failed_task_report() {
        let reports = reports("bisection\nfunction: x^2+1\na: -1\nb: 1\n");
        let report = &reports[0];
        assert!(!report.is_success());
        assert!(matches!(report.error(), Some(SolveError::SameSign { .. })));
        assert!(report.table().is_none());
        assert!(report.summary().contains("Bisection method cannot proceed"));
    }

    #[test]
    fn test_run_other_tasks() {
        let reports = reports(
            "linear_interpolation\npoints: 0, 0, 10, 100\nx: 5\n\
             quadratic_interpolation\npoints: 0, 1, 1, 2, 2, 5\nx: 1.5\n\
             trapezoidal\nfunction: x^2\na: 0\nb: 1\nn: 1000\n\
             gauss_jordan\nmatrix: 2, 1, 1, 3\nvector: 5, 10\n\
             gauss_seidel\nmatrix: 4, 1, 2, 3, 5, 1, 1, 1, 3\nvector: 4, 7, 3\ntolerance: 1e-8\n",
        );
        let methods: Vec<Method> = reports.iter().map(|r| r.method).collect();
        assert_eq!(
            methods,
            vec![
                Method::LinearInterpolation,
                Method::QuadraticInterpolation,
                Method::Trapezoidal,
                Method::GaussJordan,
                Method::GaussSeidel
            ]
        );
        assert!(reports.iter().all(|r| r.is_success()));
        assert_eq!(reports[0].output, TaskOutput::LinearInterpolation(Ok(50.0)));
        // window [-2, 12] with step 0.25
        assert_eq!(reports[0].samples.len(), 57);
        assert!(reports[1].summary().contains("P(x) = 1.0000"));
        // [-0.4, 2.4] with step 0.05
        assert_eq!(reports[1].samples.len(), 57);
        match &reports[2].output {
            TaskOutput::Integral(Ok(result)) => {
                assert_relative_eq!(result.integral, 1.0 / 3.0, epsilon = 1e-4)
            }
            other => panic!("unexpected output {:?}", other),
        }
        assert!(reports[3].summary().starts_with("x = [1.000000, 3.000000]"));
        assert!(reports[4].table().is_some());
    }

    #[test]
    fn test_save_csv() {
        let dir = tempdir().unwrap();
        let reports = reports(
            "fixed_point\nfunction: cos(x)\np0: 0.5\n\
             gauss_jordan\nmatrix: 2, 1, 1, 3\nvector: 5, 10\n",
        );
        let written = reports[0].save_csv(dir.path()).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("fixed_point_trace.csv"));
        assert!(written[1].ends_with("fixed_point_samples.csv"));
        let trace = fs::read_to_string(&written[0]).unwrap();
        assert!(trace.starts_with("iteration,a,b,p,fp,error\n1,,,"));

        let written = reports[1].save_csv(&dir.path().join("nested")).unwrap();
        assert_eq!(written.len(), 1);
        assert!(written[0].exists());
    }
}
