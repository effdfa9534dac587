use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use bfsweep_exp::{ParameterGrid, SweepRunner};
use clap::Parser;
use tracing::{error, info};

mod logging;

use logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "bfsweep",
    version,
    about = "Run the filter benchmark across a parameter grid and save each run's output"
)]
struct Cli {
    /// Path to the benchmark executable.
    #[arg(long, default_value = "./build/main_benchmark")]
    executable: PathBuf,
    /// Directory to save results in. Created if missing.
    #[arg(long = "output-dir", default_value = "benchmark_results")]
    output_dir: PathBuf,
    /// YAML file with `key_powers`, `bits_per_key` and `lookup_powers` lists.
    /// The built-in grid is used when omitted.
    #[arg(long)]
    grid: Option<PathBuf>,
    /// Write a JSON summary of job outcomes to this path.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` takes precedence.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(&cli.log_level) {
        eprintln!("failed to initialise logging: {err}");
        return ExitCode::FAILURE;
    }
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let grid = match &cli.grid {
        Some(path) => ParameterGrid::from_yaml_path(path)?,
        None => ParameterGrid::default(),
    };
    let runner = SweepRunner::new(&cli.executable, &cli.output_dir);
    let report = runner.run(&grid, &mut io::stdout().lock())?;
    if let Some(path) = &cli.report {
        report.persist(path)?;
        info!(path = %path.display(), "sweep report written");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_historical_layout() {
        let cli = Cli::try_parse_from(["bfsweep"]).expect("parse");
        assert_eq!(cli.executable, PathBuf::from("./build/main_benchmark"));
        assert_eq!(cli.output_dir, PathBuf::from("benchmark_results"));
        assert!(cli.grid.is_none());
        assert!(cli.report.is_none());
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "bfsweep",
            "--executable",
            "/opt/bench",
            "--output-dir",
            "out",
            "--grid",
            "grid.yaml",
            "--report",
            "report.json",
        ])
        .expect("parse");
        assert_eq!(cli.executable, PathBuf::from("/opt/bench"));
        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert_eq!(cli.grid, Some(PathBuf::from("grid.yaml")));
        assert_eq!(cli.report, Some(PathBuf::from("report.json")));
    }

    #[test]
    fn positional_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["bfsweep", "12"]).is_err());
    }
}
