#![allow(non_snake_case)]
use RustedNumMethods::Examples::methods_examples::{LAST_EXAMPLE, methods_examples};
use RustedNumMethods::Utils::logger::init_logger;
use RustedNumMethods::Utils::task::TaskFile;
use RustedNumMethods::Utils::task_runner::run_tasks;
use log::{LevelFilter, info, warn};
use std::env;
use std::error::Error;
use std::path::Path;

/// `RustedNumMethods <task file>` runs the tasks of the file,
/// without arguments all built-in examples are run
fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    match args.get(1) {
        Some(path) => {
            let task_file = TaskFile::from_file(Path::new(path))?;
            let settings = &task_file.settings;
            init_logger(settings.loglevel, settings.log_to_file)?;
            info!("running {} tasks from {}", task_file.tasks.len(), path);
            let reports = run_tasks(&task_file);
            for report in &reports {
                println!("{}", report);
                if let Some(dir) = &settings.csv_dir {
                    report.save_csv(dir)?;
                }
            }
            let failed = reports.iter().filter(|r| !r.is_success()).count();
            if failed > 0 {
                warn!("{} of {} tasks did not succeed", failed, reports.len());
            }
        }
        None => {
            init_logger(LevelFilter::Info, false)?;
            for example in 0..=LAST_EXAMPLE {
                methods_examples(example)?;
            }
        }
    }
    Ok(())
}
