//! Parameter sweeps over an external benchmark executable.

mod grid;
mod hash;
mod invoke;
mod report;
mod runner;
mod serde;

pub use grid::{output_path, ParameterCombination, ParameterGrid};
pub use hash::stable_hash_string;
pub use invoke::{invoke, RunOutcome};
pub use report::{JobStatus, SweepJobReport, SweepReport};
pub use runner::{run_sweep, SweepRunner, FINISH_BANNER, START_BANNER};

pub use crate::serde::{from_yaml_slice, to_canonical_json_bytes, to_pretty_json_bytes};
