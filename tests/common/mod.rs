//! Shared test utilities for riskledger integration tests.
//!
//! Provides helpers for driving the binary against a throwaway data
//! directory and seeding the standard context -> identify -> analyze chain.

use assert_cmd::Command;
use std::path::Path;

/// Returns a `Command` configured to run the `riskledger` binary against the
/// given data directory.
#[allow(dead_code, deprecated)]
pub fn riskledger_cmd(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("riskledger").unwrap();
    cmd.arg("--data-dir").arg(data_dir);
    cmd
}

/// Extract the record id from an "add" command's stdout.
///
/// Add commands print `+ <Kind> recorded: <id> ...` on their first line.
#[allow(dead_code)]
pub fn extract_id(stdout: &[u8]) -> String {
    let text = String::from_utf8_lossy(stdout);
    let line = text
        .lines()
        .find(|l| l.contains("recorded:") || l.contains("identified:"))
        .expect("no record id line in output");
    line.split(": ")
        .nth(1)
        .expect("malformed record line")
        .split_whitespace()
        .next()
        .expect("empty record id")
        .to_string()
}

/// Add a context, returning its id.
#[allow(dead_code)]
pub fn add_context(data_dir: &Path) -> String {
    let output = riskledger_cmd(data_dir)
        .args([
            "context",
            "add",
            "--organization",
            "Direktorat Jenderal Bina Marga",
            "--year",
            "2024",
            "--period",
            "Triwulan I",
            "--objective",
            "Konektivitas jalan nasional",
            "--process",
            "Preservasi jalan",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "context add failed: {:?}", output);
    extract_id(&output.stdout)
}

/// Add an identification under a context, returning its id.
#[allow(dead_code)]
pub fn add_identification(data_dir: &Path, context_id: &str, code: &str) -> String {
    let output = riskledger_cmd(data_dir)
        .args([
            "identify",
            "add",
            "--context",
            context_id,
            "--code",
            code,
            "--owner",
            "Balai Besar",
            "--category",
            "performance",
            "--description",
            "Keterlambatan penyelesaian proyek",
            "--cause-source",
            "Faktor internal",
            "--cause",
            "Perencanaan kurang matang",
            "--affected-party",
            "Masyarakat",
            "--impact",
            "Penurunan layanan",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "identify add failed: {:?}", output);
    extract_id(&output.stdout)
}

/// Add an analysis for an identification, returning its id.
#[allow(dead_code)]
pub fn add_analysis(data_dir: &Path, identification_id: &str, likelihood: &str, impact: &str) -> String {
    let output = riskledger_cmd(data_dir)
        .args([
            "analyze",
            "add",
            "--identification",
            identification_id,
            "--likelihood",
            likelihood,
            "--impact",
            impact,
            "--control",
            "Monitoring bulanan",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "analyze add failed: {:?}", output);
    extract_id(&output.stdout)
}
