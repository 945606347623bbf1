use crate::numerical::sampling::FunctionPoint;
use crate::numerical::solve_result::RootIteration;
use crate::somelinalg::gauss_jordan::MatrixStep;
use crate::somelinalg::iterative_solvers_cpu::LinearIteration;
use chrono::Local;
use csv::Writer;
use simplelog::*;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// maps a level string from a task file to a filter, "off" and "none" disable logging
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.trim().to_lowercase().as_str() {
        "debug" => Some(LevelFilter::Debug),
        "info" => Some(LevelFilter::Info),
        "warn" => Some(LevelFilter::Warn),
        "error" => Some(LevelFilter::Error),
        "off" | "none" => Some(LevelFilter::Off),
        _ => None,
    }
}

/// Terminal logger plus, if asked, a copy of the log in log_<date>_<time>.txt.
/// A logger that is already installed is kept as it is.
pub fn init_logger(level: LevelFilter, log_to_file: bool) -> io::Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if log_to_file && level != LevelFilter::Off {
        let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let name = format!("log_{}.txt", date_and_time);
        loggers.push(WriteLogger::new(level, Config::default(), File::create(name)?));
    }
    if CombinedLogger::init(loggers).is_err() {
        log::debug!("logger already initialised");
    }
    Ok(())
}

/// root-finding trace as csv: iteration,a,b,p,fp,error. Missing bracket ends stay empty.
pub fn save_root_trace_to_csv<W: Write>(trace: &[RootIteration], writer: W) -> io::Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["iteration", "a", "b", "p", "fp", "error"])?;
    for row in trace {
        let bound = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        wtr.write_record([
            row.iteration.to_string(),
            bound(row.a),
            bound(row.b),
            row.p.to_string(),
            row.fp.to_string(),
            row.error.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// linear iteration trace as csv: iteration,x1..xn,error
pub fn save_linear_trace_to_csv<W: Write>(
    trace: &[LinearIteration],
    writer: W,
) -> io::Result<()> {
    let mut wtr = Writer::from_writer(writer);
    let n = trace.first().map(|row| row.values.len()).unwrap_or(0);
    let mut headers = vec!["iteration".to_string()];
    headers.extend((1..=n).map(|i| format!("x{}", i)));
    headers.push("error".to_string());
    wtr.write_record(&headers)?;
    for row in trace {
        let mut record = vec![row.iteration.to_string()];
        record.extend(row.values.iter().map(|v| v.to_string()));
        record.push(row.error.to_string());
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// sampled function as csv: x,y
pub fn save_samples_to_csv<W: Write>(samples: &[FunctionPoint], writer: W) -> io::Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["x", "y"])?;
    for point in samples {
        wtr.write_record([point.x.to_string(), point.y.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_trace_to_file<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(File) -> io::Result<()>,
{
    let file = File::create(path)?;
    write(file)
}

/// Gauss-Jordan steps as a tab-separated dump: a header line per step with its number,
/// operation and description, then the rows of the matrix at that step
pub fn save_steps_to_file<W: Write>(steps: &[MatrixStep], mut writer: W) -> io::Result<()> {
    for step in steps {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            step.step, step.kind, step.operation, step.description
        )?;
        for row in step.matrix.row_iter() {
            let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(writer, "{}", line.join("\t"))?;
        }
        writeln!(writer)?;
    }
    writer.flush()
}
