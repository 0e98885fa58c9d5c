//! CLI command implementations.
//!
//! Each submodule implements one top-level CLI command (context, identify,
//! analyze, assess, priority, dashboard, config).

pub mod analyze;
pub mod assess;
pub mod config;
pub mod context;
pub mod dashboard;
pub mod identify;
pub mod priority;

pub use analyze::cmd_analyze;
pub use assess::cmd_assess;
pub use config::cmd_config;
pub use context::cmd_context;
pub use dashboard::cmd_dashboard;
pub use identify::cmd_identify;
pub use priority::cmd_priority;

use crate::config::Config;
use crate::logging::audit::AuditLog;
use crate::scoring::RiskLevel;
use crate::store::Registry;
use anyhow::Context as _;
use colored::*;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Open the registry (and audit log when enabled) for a command run.
pub(crate) fn open_registry(
    config: &Config,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<(Registry, Option<AuditLog>)> {
    let dir = crate::cli::args::resolve_data_dir(data_dir, config);
    let registry = Registry::open(&dir, config.scoring.policy)
        .with_context(|| format!("Failed to open data directory '{}'", dir.display()))?;
    debug!(data_dir = %dir.display(), policy = config.scoring.policy.as_str(), "Registry opened");

    let audit = crate::logging::open_audit(&dir, &config.audit);
    Ok((registry, audit))
}

/// Record an audit event, logging instead of failing when the log is down.
pub(crate) fn audit_event(audit: &Option<AuditLog>, event: &str, subject: &str) {
    if let Some(log) = audit {
        if let Err(e) = log.record(event, subject) {
            warn!(error = %e, event = event, "Failed to write audit entry");
        }
    }
}

/// Level label colored for terminal output.
pub(crate) fn level_colored(level: RiskLevel) -> ColoredString {
    match level {
        RiskLevel::Low => level.label().green(),
        RiskLevel::Medium => level.label().yellow(),
        RiskLevel::High => level.label().truecolor(255, 165, 0), // Orange
        RiskLevel::Critical => level.label().red().bold(),
    }
}
