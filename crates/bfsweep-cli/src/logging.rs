use std::error::Error;
use std::io;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize diagnostic logging on stderr.
///
/// Stdout carries the operator progress lines, so tracing output never goes
/// there. `RUST_LOG` overrides `level` when set.
pub fn init_logging(level: &str) -> Result<(), Box<dyn Error>> {
    let default_filter = format!("bfsweep={level},bfsweep_exp={level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init()?;
    Ok(())
}
