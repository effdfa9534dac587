use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bfsweep_core::errors::{ErrorInfo, SweepError};
use tempfile::{Builder, NamedTempFile};
use tracing::{debug, info, warn};

use crate::grid::{output_path, ParameterCombination, ParameterGrid};
use crate::hash::stable_hash_string;
use crate::invoke::{invoke, RunOutcome};
use crate::report::{JobStatus, SweepJobReport, SweepReport};

pub const START_BANNER: &str = "Starting benchmarks...";
pub const FINISH_BANNER: &str = "All benchmarks completed!";

/// Drives one benchmark executable across a [`ParameterGrid`].
///
/// Jobs run strictly one after another. A benchmark that exits non-zero is
/// logged and skipped; any environment failure (spawn, directory creation,
/// write) aborts the sweep and is returned as `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepRunner {
    executable: PathBuf,
    output_dir: PathBuf,
}

impl SweepRunner {
    pub fn new(executable: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Runs every combination in `grid` order, writing operator progress
    /// lines to `progress`.
    pub fn run<W: Write>(
        &self,
        grid: &ParameterGrid,
        progress: &mut W,
    ) -> Result<SweepReport, SweepError> {
        fs::create_dir_all(&self.output_dir)
            .map_err(|err| SweepError::io("bfsweep.output_dir", &self.output_dir, err))?;
        let grid_hash = stable_hash_string(grid)?;
        info!(
            jobs = grid.len(),
            output_dir = %self.output_dir.display(),
            grid_hash = %grid_hash,
            "sweep started"
        );
        emit(progress, START_BANNER)?;

        let mut jobs = Vec::with_capacity(grid.len());
        for combination in grid.combinations() {
            jobs.push(self.run_one(&combination, progress)?);
        }

        let report = SweepReport {
            grid_hash,
            executable: self.executable.clone(),
            output_dir: self.output_dir.clone(),
            jobs,
        };
        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "sweep finished"
        );
        emit(progress, FINISH_BANNER)?;
        Ok(report)
    }

    fn run_one<W: Write>(
        &self,
        combination: &ParameterCombination,
        progress: &mut W,
    ) -> Result<SweepJobReport, SweepError> {
        emit(progress, &format!("Running benchmark with: {combination}"))?;
        match invoke(&self.executable, combination)? {
            RunOutcome::Succeeded { stdout } => {
                let target = output_path(&self.output_dir, combination);
                write_atomically(&self.output_dir, &target, &stdout)?;
                debug!(path = %target.display(), bytes = stdout.len(), "result written");
                emit(progress, &format!("Results saved to {}", target.display()))?;
                Ok(SweepJobReport {
                    params: *combination,
                    status: JobStatus::Completed,
                    output: Some(target),
                    exit_code: Some(0),
                    stderr: None,
                })
            }
            RunOutcome::Failed {
                status,
                stdout,
                stderr,
            } => {
                warn!(
                    params = %combination,
                    %status,
                    stdout = %stdout.trim_end(),
                    stderr = %stderr.trim_end(),
                    "benchmark failed"
                );
                emit(progress, &format!("Error running benchmark: {status}"))?;
                emit(progress, &format!("Command output: {}", stdout.trim_end()))?;
                emit(progress, &format!("Error output: {}", stderr.trim_end()))?;
                Ok(SweepJobReport {
                    params: *combination,
                    status: JobStatus::Failed,
                    output: None,
                    exit_code: status.code(),
                    stderr: Some(stderr),
                })
            }
        }
    }
}

/// Convenience wrapper around [`SweepRunner::run`].
pub fn run_sweep<W: Write>(
    executable: &Path,
    output_dir: &Path,
    grid: &ParameterGrid,
    progress: &mut W,
) -> Result<SweepReport, SweepError> {
    SweepRunner::new(executable, output_dir).run(grid, progress)
}

// The target only ever holds a complete result: bytes land in a sibling
// temporary file that is renamed over it.
fn write_atomically(dir: &Path, target: &Path, bytes: &[u8]) -> Result<(), SweepError> {
    let mut tmp =
        result_tempfile(dir).map_err(|err| SweepError::io("bfsweep.result_tmp", dir, err))?;
    tmp.write_all(bytes)
        .and_then(|_| tmp.flush())
        .map_err(|err| SweepError::io("bfsweep.result_write", tmp.path(), err))?;
    tmp.persist(target)
        .map_err(|err| SweepError::io("bfsweep.result_persist", target, err.error))?;
    Ok(())
}

// Temp files default to 0600; results get the same umask-filtered 0666 mode
// that `fs::write` would give them.
fn result_tempfile(dir: &Path) -> io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

fn emit<W: Write>(progress: &mut W, line: &str) -> Result<(), SweepError> {
    writeln!(progress, "{line}")
        .and_then(|_| progress.flush())
        .map_err(|err| SweepError::Io(ErrorInfo::new("bfsweep.progress", err.to_string())))
}
