//! Process-wide tracing setup.
//!
//! Priority for the filter: RUST_LOG env var > --verbose flag > default (info).

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Keeps the log file open for the life of the process; syncs it on drop.
pub struct LogGuard {
    file: Option<Arc<File>>,
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        if let Some(file) = &self.file {
            let _ = file.sync_all();
        }
    }
}

pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<LogGuard> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let file = log_file
        .map(|p| File::create(p).with_context(|| format!("create log file {}", p.display())))
        .transpose()?
        .map(Arc::new);

    let file_layer = file
        .clone()
        .map(|f| fmt::layer().with_ansi(false).with_writer(f));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init()
        .context("install tracing subscriber")?;

    Ok(LogGuard { file })
}
