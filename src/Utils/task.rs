//! Typed tasks built from a parsed task document.
//!
//! Every section of the document is named after a [`Method`]; the optional `settings` section
//! configures logging and csv export. Example document:
//! ```text
//! // roots of a cubic
//! bisection
//! function: x^3-x-2
//! a: 1
//! b: 2
//! tolerance: 1e-6
//!
//! jacobi
//! matrix: 4, 1, 2, 5
//! vector: 5, 7
//!
//! settings
//! loglevel: info
//! csv: results
//! ```
use crate::Utils::logger::parse_level;
use crate::Utils::task_parser::{DocumentMap, SectionMap, Value, parse_document_as};
use crate::numerical::interpolation::InterpolationPoint;
use crate::numerical::quadrature::DEFAULT_SUBINTERVALS;
use crate::numerical::solve_result::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use crate::symbolic::parse_expr::{ParseError, parse_function};
use crate::symbolic::symbolic_lambdify::ParsedFunction;
use log::{LevelFilter, info};
use nalgebra::{DMatrix, DVector};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Catalogue of the methods, in the order tasks are run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Method {
    Bisection,
    FalsePosition,
    FixedPoint,
    LinearInterpolation,
    QuadraticInterpolation,
    Trapezoidal,
    GaussJordan,
    GaussSeidel,
    Jacobi,
}

impl Method {
    pub fn display_name(&self) -> &'static str {
        match self {
            Method::Bisection => "Bisection",
            Method::FalsePosition => "False Position (Regula Falsi)",
            Method::FixedPoint => "Fixed-Point Iteration",
            Method::LinearInterpolation => "Linear Interpolation",
            Method::QuadraticInterpolation => "Quadratic Interpolation",
            Method::Trapezoidal => "Trapezoidal Rule",
            Method::GaussJordan => "Gauss-Jordan Elimination",
            Method::GaussSeidel => "Gauss-Seidel",
            Method::Jacobi => "Jacobi",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            Method::Bisection | Method::FalsePosition | Method::FixedPoint => "root finding",
            Method::LinearInterpolation | Method::QuadraticInterpolation => "interpolation",
            Method::Trapezoidal => "numerical integration",
            Method::GaussJordan | Method::GaussSeidel | Method::Jacobi => "linear systems",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskError {
    Io(String),
    Parse(String),
    UnknownSection(String),
    MissingKey {
        section: String,
        key: &'static str,
    },
    InvalidValue {
        section: String,
        key: &'static str,
        reason: String,
    },
    Function {
        section: String,
        source: ParseError,
    },
    NoTasks,
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskError::Io(msg) => write!(f, "Cannot read task file: {}", msg),
            TaskError::Parse(msg) => write!(f, "Cannot parse task file: {}", msg),
            TaskError::UnknownSection(title) => write!(
                f,
                "Unknown section '{}', expected one of: {}, settings",
                title,
                Method::iter()
                    .map(|m| m.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            TaskError::MissingKey { section, key } => {
                write!(f, "Section '{}' has no required key '{}'", section, key)
            }
            TaskError::InvalidValue {
                section,
                key,
                reason,
            } => write!(f, "Invalid value of '{}' in section '{}': {}", key, section, reason),
            TaskError::Function { section, source } => {
                write!(f, "Invalid function in section '{}': {}", section, source)
            }
            TaskError::NoTasks => write!(f, "The task file contains no tasks"),
        }
    }
}

impl std::error::Error for TaskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TaskError::Function { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    Bisection {
        function: ParsedFunction,
        a: f64,
        b: f64,
        tolerance: f64,
        max_iterations: usize,
    },
    FalsePosition {
        function: ParsedFunction,
        a: f64,
        b: f64,
        tolerance: f64,
        max_iterations: usize,
    },
    FixedPoint {
        function: ParsedFunction,
        p0: f64,
        tolerance: f64,
        max_iterations: usize,
    },
    LinearInterpolation {
        p0: InterpolationPoint,
        p1: InterpolationPoint,
        x: f64,
    },
    QuadraticInterpolation {
        points: Vec<InterpolationPoint>,
        x: f64,
    },
    Trapezoidal {
        function: ParsedFunction,
        a: f64,
        b: f64,
        n: usize,
    },
    GaussJordan {
        A: DMatrix<f64>,
        b: DVector<f64>,
    },
    GaussSeidel {
        A: DMatrix<f64>,
        b: DVector<f64>,
        initial_guess: DVector<f64>,
        tolerance: f64,
        max_iterations: usize,
    },
    Jacobi {
        A: DMatrix<f64>,
        b: DVector<f64>,
        initial_guess: DVector<f64>,
        tolerance: f64,
        max_iterations: usize,
    },
}

impl Task {
    pub fn method(&self) -> Method {
        match self {
            Task::Bisection { .. } => Method::Bisection,
            Task::FalsePosition { .. } => Method::FalsePosition,
            Task::FixedPoint { .. } => Method::FixedPoint,
            Task::LinearInterpolation { .. } => Method::LinearInterpolation,
            Task::QuadraticInterpolation { .. } => Method::QuadraticInterpolation,
            Task::Trapezoidal { .. } => Method::Trapezoidal,
            Task::GaussJordan { .. } => Method::GaussJordan,
            Task::GaussSeidel { .. } => Method::GaussSeidel,
            Task::Jacobi { .. } => Method::Jacobi,
        }
    }

    /// builds the task of `method` from the keys of its section
    pub fn from_section(method: Method, section: &SectionMap) -> Result<Self, TaskError> {
        let keys = SectionKeys {
            title: method.to_string(),
            section,
        };
        let task = match method {
            Method::Bisection => Task::Bisection {
                function: keys.function("function")?,
                a: keys.float("a")?,
                b: keys.float("b")?,
                tolerance: keys.float_or("tolerance", DEFAULT_TOLERANCE)?,
                max_iterations: keys.usize_or("max_iterations", DEFAULT_MAX_ITERATIONS)?,
            },
            Method::FalsePosition => Task::FalsePosition {
                function: keys.function("function")?,
                a: keys.float("a")?,
                b: keys.float("b")?,
                tolerance: keys.float_or("tolerance", DEFAULT_TOLERANCE)?,
                max_iterations: keys.usize_or("max_iterations", DEFAULT_MAX_ITERATIONS)?,
            },
            Method::FixedPoint => Task::FixedPoint {
                function: keys.function("function")?,
                p0: keys.float("p0")?,
                tolerance: keys.float_or("tolerance", DEFAULT_TOLERANCE)?,
                max_iterations: keys.usize_or("max_iterations", DEFAULT_MAX_ITERATIONS)?,
            },
            Method::LinearInterpolation => {
                let points = keys.points("points")?;
                if points.len() != 2 {
                    return Err(keys.invalid(
                        "points",
                        format!("expected 2 points, found {}", points.len()),
                    ));
                }
                Task::LinearInterpolation {
                    p0: points[0],
                    p1: points[1],
                    x: keys.float("x")?,
                }
            }
            Method::QuadraticInterpolation => Task::QuadraticInterpolation {
                points: keys.points("points")?,
                x: keys.float("x")?,
            },
            Method::Trapezoidal => Task::Trapezoidal {
                function: keys.function("function")?,
                a: keys.float("a")?,
                b: keys.float("b")?,
                n: keys.usize_or("n", DEFAULT_SUBINTERVALS)?,
            },
            Method::GaussJordan => {
                let (A, b) = keys.system()?;
                Task::GaussJordan { A, b }
            }
            Method::GaussSeidel => {
                let (A, b) = keys.system()?;
                let initial_guess = keys.initial_guess(b.len())?;
                Task::GaussSeidel {
                    A,
                    b,
                    initial_guess,
                    tolerance: keys.float_or("tolerance", DEFAULT_TOLERANCE)?,
                    max_iterations: keys.usize_or("max_iterations", DEFAULT_MAX_ITERATIONS)?,
                }
            }
            Method::Jacobi => {
                let (A, b) = keys.system()?;
                let initial_guess = keys.initial_guess(b.len())?;
                Task::Jacobi {
                    A,
                    b,
                    initial_guess,
                    tolerance: keys.float_or("tolerance", DEFAULT_TOLERANCE)?,
                    max_iterations: keys.usize_or("max_iterations", DEFAULT_MAX_ITERATIONS)?,
                }
            }
        };
        Ok(task)
    }
}

/// typed access to the keys of one section
struct SectionKeys<'a> {
    title: String,
    section: &'a SectionMap,
}

impl SectionKeys<'_> {
    fn invalid(&self, key: &'static str, reason: String) -> TaskError {
        TaskError::InvalidValue {
            section: self.title.clone(),
            key,
            reason,
        }
    }

    fn values(&self, key: &'static str) -> Result<&[Value], TaskError> {
        self.section
            .get(key)
            .map(|values| values.as_slice())
            .ok_or_else(|| TaskError::MissingKey {
                section: self.title.clone(),
                key,
            })
    }

    fn floats(&self, key: &'static str) -> Result<Vec<f64>, TaskError> {
        self.values(key)?
            .iter()
            .map(|value| {
                value
                    .as_float()
                    .ok_or_else(|| self.invalid(key, format!("'{}' is not a number", value)))
            })
            .collect()
    }

    fn float(&self, key: &'static str) -> Result<f64, TaskError> {
        match self.floats(key)?.as_slice() {
            [value] => Ok(*value),
            values => Err(self.invalid(key, format!("expected one number, found {}", values.len()))),
        }
    }

    fn float_or(&self, key: &'static str, default: f64) -> Result<f64, TaskError> {
        if self.section.contains_key(key) {
            self.float(key)
        } else {
            Ok(default)
        }
    }

    fn usize_or(&self, key: &'static str, default: usize) -> Result<usize, TaskError> {
        if !self.section.contains_key(key) {
            return Ok(default);
        }
        match self.values(key)? {
            [value] => value
                .as_integer()
                .and_then(|i| usize::try_from(i).ok())
                .ok_or_else(|| {
                    self.invalid(key, format!("'{}' is not a non-negative integer", value))
                }),
            values => Err(self.invalid(key, format!("expected one integer, found {}", values.len()))),
        }
    }

    fn function(&self, key: &'static str) -> Result<ParsedFunction, TaskError> {
        let source = match self.values(key)? {
            [value] => value.to_string(),
            _ => return Err(self.invalid(key, "expected a single expression".to_string())),
        };
        parse_function(&source).map_err(|source| TaskError::Function {
            section: self.title.clone(),
            source,
        })
    }

    /// flat list x0, y0, x1, y1, ...
    fn points(&self, key: &'static str) -> Result<Vec<InterpolationPoint>, TaskError> {
        let values = self.floats(key)?;
        if values.len() % 2 != 0 {
            return Err(self.invalid(key, "expected pairs x, y".to_string()));
        }
        Ok(values
            .chunks_exact(2)
            .map(|pair| InterpolationPoint::new(pair[0], pair[1]))
            .collect())
    }

    /// `vector` of length n and a row-major `matrix` of n * n entries
    fn system(&self) -> Result<(DMatrix<f64>, DVector<f64>), TaskError> {
        let b = self.floats("vector")?;
        let entries = self.floats("matrix")?;
        let n = b.len();
        if entries.len() != n * n {
            return Err(self.invalid(
                "matrix",
                format!(
                    "expected {} entries for a {}x{} system, found {}",
                    n * n,
                    n,
                    n,
                    entries.len()
                ),
            ));
        }
        Ok((DMatrix::from_row_slice(n, n, &entries), DVector::from_vec(b)))
    }

    /// zeros unless given
    fn initial_guess(&self, n: usize) -> Result<DVector<f64>, TaskError> {
        if self.section.contains_key("initial_guess") {
            Ok(DVector::from_vec(self.floats("initial_guess")?))
        } else {
            Ok(DVector::zeros(n))
        }
    }
}

/// Settings of a task run; `csv` names a directory for trace export
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub loglevel: LevelFilter,
    pub log_to_file: bool,
    pub csv_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            loglevel: LevelFilter::Info,
            log_to_file: false,
            csv_dir: None,
        }
    }
}

impl Settings {
    fn from_section(section: &SectionMap) -> Result<Self, TaskError> {
        let invalid = |key: &'static str, reason: String| TaskError::InvalidValue {
            section: "settings".to_string(),
            key,
            reason,
        };
        let mut settings = Settings::default();
        if let Some(values) = section.get("loglevel") {
            let level = values.first().map(|v| v.to_string()).unwrap_or_default();
            settings.loglevel = parse_level(&level).ok_or_else(|| {
                invalid(
                    "loglevel",
                    format!("'{}', expected debug, info, warn, error, off or none", level),
                )
            })?;
        }
        if let Some(values) = section.get("log_to_file") {
            settings.log_to_file = values
                .first()
                .and_then(|v| v.as_boolean())
                .ok_or_else(|| invalid("log_to_file", "expected true or false".to_string()))?;
        }
        if let Some(values) = section.get("csv") {
            settings.csv_dir = values
                .first()
                .map(|v| PathBuf::from(v.to_string()));
        }
        Ok(settings)
    }
}

/// All tasks of a document, in catalogue order, with the run settings
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFile {
    pub settings: Settings,
    pub tasks: Vec<Task>,
}

impl TaskFile {
    pub fn from_document(document: &DocumentMap) -> Result<Self, TaskError> {
        if let Some(title) = document
            .keys()
            .find(|title| *title != "settings" && Method::from_str(title).is_err())
        {
            return Err(TaskError::UnknownSection(title.clone()));
        }
        let settings = match document.get("settings") {
            Some(section) => Settings::from_section(section)?,
            None => Settings::default(),
        };
        let tasks = Method::iter()
            .filter_map(|method| {
                document
                    .get(&method.to_string())
                    .map(|section| Task::from_section(method, section))
            })
            .collect::<Result<Vec<Task>, TaskError>>()?;
        if tasks.is_empty() {
            return Err(TaskError::NoTasks);
        }
        info!("task file with {} tasks", tasks.len());
        Ok(Self { settings, tasks })
    }

    pub fn from_file(path: &Path) -> Result<Self, TaskError> {
        let content = fs::read_to_string(path)
            .map_err(|e| TaskError::Io(format!("{}: {}", path.display(), e)))?;
        content.parse()
    }
}

impl FromStr for TaskFile {
    type Err = TaskError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let document = parse_document_as(input).map_err(TaskError::Parse)?;
        Self::from_document(&document)
    }
}
