#![deny(missing_docs)]
#![doc = "Core error types for the bfsweep benchmark harness."]

pub mod errors;

pub use errors::{ErrorInfo, SweepError};
