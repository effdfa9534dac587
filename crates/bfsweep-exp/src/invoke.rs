use std::path::Path;
use std::process::{Command, ExitStatus};

use bfsweep_core::errors::{ErrorInfo, SweepError};
use tracing::debug;

use crate::grid::ParameterCombination;

/// Outcome of a single benchmark invocation.
///
/// A non-zero exit is an expected outcome for the sweep, so it is carried
/// here rather than through [`SweepError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Exit status 0. `stdout` is the complete captured standard output.
    Succeeded { stdout: Vec<u8> },
    /// Non-zero exit or termination by signal. Both streams are decoded
    /// lossily; `stdout` is shown to the operator but never saved.
    Failed {
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Succeeded { .. })
    }
}

/// Runs `executable key_power bits_per_key lookup_power` in the foreground
/// and waits for it to exit. Both output streams are captured in full.
///
/// Returns `Err` only when the process cannot be started at all.
pub fn invoke(
    executable: &Path,
    combination: &ParameterCombination,
) -> Result<RunOutcome, SweepError> {
    let args = combination.args();
    debug!(executable = %executable.display(), ?args, "spawning benchmark");
    let output = Command::new(executable).args(&args).output().map_err(|err| {
        SweepError::Spawn(
            ErrorInfo::new("bfsweep.spawn", err.to_string())
                .with_context("executable", executable.display().to_string())
                .with_context("params", combination.to_string())
                .with_hint("check --executable points at a built benchmark binary"),
        )
    })?;
    if output.status.success() {
        Ok(RunOutcome::Succeeded {
            stdout: output.stdout,
        })
    } else {
        Ok(RunOutcome::Failed {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
