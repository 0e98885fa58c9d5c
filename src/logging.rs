//! Structured logging and the audit trail.
//!
//! Record listings and command results stay on stdout via `println!`.
//! Operational telemetry (what the tool is doing, timing, diagnostics) goes
//! to stderr via tracing; register changes additionally land in the
//! append-only audit log.

pub mod audit;

use crate::config::AuditSettings;
use audit::{AuditConfig, AuditLog};
use std::path::Path;
use thiserror::Error;
use tracing::{warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable colored output
    Pretty,
    /// Structured JSON lines
    Json,
}

/// Errors from logging initialization.
#[derive(Error, Debug)]
pub enum LogInitError {
    #[error("Failed to parse log filter: {0}")]
    FilterError(String),

    #[error("Failed to set global subscriber: {0}")]
    SetGlobalError(String),
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` env var overrides the provided level when set.
/// All output is directed to **stderr** so stdout remains clean for record
/// listings and JSON output.
pub fn init(level: Level, format: LogFormat) -> Result<(), LogInitError> {
    let filter = build_env_filter(level)?;
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false);

    let result = match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init(),
    };
    result.map_err(|e| LogInitError::SetGlobalError(e.to_string()))
}

/// Open the audit log for a data directory, honoring the `[audit]` settings.
///
/// Audit failures never block record keeping: an unopenable log is reported
/// via `warn!` and auditing is skipped for the run.
pub fn open_audit(data_dir: &Path, settings: &AuditSettings) -> Option<AuditLog> {
    if !settings.enabled {
        return None;
    }
    let path = data_dir.join("audit.log");
    match AuditLog::open(
        &path,
        AuditConfig {
            max_file_bytes: settings.max_file_bytes,
            max_rotated_files: settings.max_rotated_files,
        },
    ) {
        Ok(log) => Some(log),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "Audit log unavailable");
            None
        }
    }
}

fn build_env_filter(level: Level) -> Result<EnvFilter, LogInitError> {
    // RUST_LOG overrides the CLI-provided level when set
    let filter_str = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    EnvFilter::try_new(&filter_str).map_err(|e| LogInitError::FilterError(e.to_string()))
}
