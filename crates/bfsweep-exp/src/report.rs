use std::fs;
use std::path::{Path, PathBuf};

use bfsweep_core::errors::SweepError;
use serde::{Deserialize, Serialize};

use crate::grid::ParameterCombination;
use crate::serde::to_pretty_json_bytes;

/// Final state of one job in a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Completed,
    Failed,
}

/// Summary for each combination attempted during a sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepJobReport {
    pub params: ParameterCombination,
    pub status: JobStatus,
    /// Result file, present only for completed jobs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// `None` when the benchmark was terminated by a signal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

/// Outcome record for a whole sweep. Benchmark output is never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    pub grid_hash: String,
    pub executable: PathBuf,
    pub output_dir: PathBuf,
    pub jobs: Vec<SweepJobReport>,
}

impl SweepReport {
    pub fn succeeded(&self) -> usize {
        self.jobs
            .iter()
            .filter(|job| job.status == JobStatus::Completed)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.jobs
            .iter()
            .filter(|job| job.status == JobStatus::Failed)
            .count()
    }

    /// Writes the report as indented JSON, creating parent directories.
    pub fn persist(&self, path: &Path) -> Result<(), SweepError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|err| SweepError::io("bfsweep.report_dir", parent, err))?;
        }
        let bytes = to_pretty_json_bytes(self)?;
        fs::write(path, bytes).map_err(|err| SweepError::io("bfsweep.report_write", path, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(key_power: u32, status: JobStatus) -> SweepJobReport {
        SweepJobReport {
            params: ParameterCombination::new(key_power, 14, 24),
            status,
            output: None,
            exit_code: Some(if status == JobStatus::Completed { 0 } else { 1 }),
            stderr: None,
        }
    }

    #[test]
    fn counts_split_by_status() {
        let report = SweepReport {
            grid_hash: "abc".into(),
            executable: PathBuf::from("bench"),
            output_dir: PathBuf::from("out"),
            jobs: vec![
                job(12, JobStatus::Completed),
                job(14, JobStatus::Failed),
                job(16, JobStatus::Completed),
            ],
        };
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn status_serializes_lowercase_and_skips_empty_fields() {
        let value = serde_json::to_value(job(12, JobStatus::Failed)).expect("json");
        assert_eq!(value["status"], "failed");
        assert_eq!(value["params"]["key_power"], 12);
        assert!(value.get("output").is_none());
        assert!(value.get("stderr").is_none());
    }
}
