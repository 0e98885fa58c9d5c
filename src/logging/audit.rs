//! Append-only audit log with size limits and rotation.
//!
//! Records register changes (context/identification/analysis/assessment
//! creation, revision, and removal) as JSON lines. Enforces per-file size limits and
//! rotates old files so the log cannot grow without bound.

use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Failed to open audit log: {0}")]
    OpenError(#[from] std::io::Error),

    #[error("Failed to serialize audit entry: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Configuration for audit log size limits.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Maximum size of a single log file in bytes before rotation.
    pub max_file_bytes: u64,
    /// Maximum number of rotated files to keep (audit.log.1, audit.log.2, ...).
    pub max_rotated_files: u32,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 10 * 1024 * 1024, // 10 MB
            max_rotated_files: 5,
        }
    }
}

/// Append-only audit log with automatic rotation.
pub struct AuditLog {
    path: PathBuf,
    config: AuditConfig,
}

impl AuditLog {
    /// Open (or create) an audit log at the given path.
    pub fn open(path: &Path, config: AuditConfig) -> Result<Self, AuditError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Create the file if it doesn't exist
        OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            config,
        })
    }

    /// Record a register event, e.g. `("analysis.created", record_id)`.
    pub fn record(&self, event: &str, subject: &str) -> Result<(), AuditError> {
        // Check if rotation is needed before writing
        self.rotate_if_needed()?;

        let entry = serde_json::json!({
            "timestamp": Utc::now().to_rfc3339(),
            "event": event,
            "subject": subject,
        });

        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        Ok(())
    }

    /// Rotate log files if the current file exceeds the size limit.
    fn rotate_if_needed(&self) -> Result<(), AuditError> {
        let size = match fs::metadata(&self.path) {
            Ok(m) => m.len(),
            Err(_) => return Ok(()), // File doesn't exist yet
        };

        if size < self.config.max_file_bytes {
            return Ok(());
        }

        // Shift rotated files: .3 -> .4, .2 -> .3, .1 -> .2
        // Delete the oldest if beyond max_rotated_files
        for i in (1..=self.config.max_rotated_files).rev() {
            let src = self.rotated_path(i);
            let dst = self.rotated_path(i + 1);
            if src.exists() {
                if i == self.config.max_rotated_files {
                    let _ = fs::remove_file(&src);
                } else {
                    let _ = fs::rename(&src, &dst);
                }
            }
        }

        // Move current to .1
        let _ = fs::rename(&self.path, self.rotated_path(1));

        // Create fresh file
        File::create(&self.path)?;

        Ok(())
    }

    fn rotated_path(&self, n: u32) -> PathBuf {
        let name = self.path.file_name().unwrap_or_default().to_string_lossy();
        self.path.with_file_name(format!("{}.{}", name, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn record_appends_json_lines() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("audit.log");
        let log = AuditLog::open(&path, AuditConfig::default()).unwrap();

        log.record("context.created", "ctx-1").unwrap();
        log.record("context.removed", "ctx-1").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event"], "context.created");
        assert_eq!(first["subject"], "ctx-1");
        assert!(first["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn oversized_log_rotates() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("audit.log");
        let log = AuditLog::open(
            &path,
            AuditConfig {
                max_file_bytes: 1, // force rotation on the second write
                max_rotated_files: 2,
            },
        )
        .unwrap();

        log.record("analysis.created", "a").unwrap();
        log.record("analysis.created", "b").unwrap();

        assert!(path.with_file_name("audit.log.1").exists());
    }
}
