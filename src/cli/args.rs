//! Command-line argument parsing.

use crate::config::Config;
use crate::model::{ControlVerdict, RiskCategory, RiskNature};
use crate::scoring::RiskLevel;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// riskledger - risk register record keeping
#[derive(Parser, Debug)]
#[command(name = "riskledger")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "riskledger - record risk contexts, identifications, analyses, and assessment plans"
)]
pub struct Cli {
    /// Logging verbosity level
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: LogLevel,

    /// Logging output format
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: crate::logging::LogFormat,

    /// Control color output (auto, always, never). Respects NO_COLOR env var.
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Data directory for record collections [default: from config]
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage risk contexts (organization, year, period)
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },

    /// Manage risk identifications
    Identify {
        #[command(subcommand)]
        action: IdentifyAction,
    },

    /// Manage risk analyses (likelihood/impact scoring)
    Analyze {
        #[command(subcommand)]
        action: AnalyzeAction,
    },

    /// Manage risk assessment follow-up plans
    Assess {
        #[command(subcommand)]
        action: AssessAction,
    },

    /// Rank analyzed risks by score, highest first
    Priority {
        /// Restrict to one context
        #[arg(short, long)]
        context: Option<String>,

        /// Only show risks at this level
        #[arg(short, long)]
        level: Option<LevelArg>,

        /// Output format: text, json
        #[arg(short = 'F', long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show register totals and level/category breakdowns
    Dashboard {
        /// Restrict to one context
        #[arg(short, long)]
        context: Option<String>,

        /// Output format: text, json
        #[arg(short = 'F', long, default_value = "text")]
        format: OutputFormat,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContextAction {
    /// Record a new risk context
    Add {
        /// Ministry/agency or unit being assessed
        #[arg(long)]
        organization: String,

        /// Assessment year
        #[arg(long)]
        year: i32,

        /// Assessment period, e.g. "Triwulan I"
        #[arg(long)]
        period: String,

        /// Data source for the assessment
        #[arg(long)]
        data_source: Option<String>,

        /// Assessing unit or official
        #[arg(long)]
        assessor: Option<String>,

        /// Strategic objective the context covers
        #[arg(long)]
        objective: String,

        /// Business process the context covers
        #[arg(long)]
        process: String,
    },

    /// Revise a context; omitted fields keep their stored values
    Update {
        /// Context id
        id: String,

        /// Ministry/agency or unit being assessed
        #[arg(long)]
        organization: Option<String>,

        /// Assessment year
        #[arg(long)]
        year: Option<i32>,

        /// Assessment period, e.g. "Triwulan I"
        #[arg(long)]
        period: Option<String>,

        /// Data source for the assessment
        #[arg(long)]
        data_source: Option<String>,

        /// Assessing unit or official
        #[arg(long)]
        assessor: Option<String>,

        /// Strategic objective the context covers
        #[arg(long)]
        objective: Option<String>,

        /// Business process the context covers
        #[arg(long)]
        process: Option<String>,
    },

    /// List recorded contexts
    List {
        /// Output format: text, json
        #[arg(short = 'F', long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show one context in full
    Show {
        /// Context id
        id: String,
    },

    /// Remove a context (refused while identifications reference it)
    Remove {
        /// Context id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum IdentifyAction {
    /// Record a new risk identification
    Add {
        /// Context id the risk belongs to
        #[arg(long)]
        context: String,

        /// Register code, e.g. "R-001"
        #[arg(long)]
        code: String,

        /// Risk owner
        #[arg(long)]
        owner: String,

        /// Whether the risk source can be influenced
        #[arg(long, default_value = "controllable")]
        nature: NatureArg,

        /// Reporting category
        #[arg(long)]
        category: CategoryArg,

        /// Risk description
        #[arg(long)]
        description: String,

        /// Cause source (internal/external factor)
        #[arg(long)]
        cause_source: String,

        /// Cause description
        #[arg(long)]
        cause: String,

        /// Party affected if the risk occurs
        #[arg(long)]
        affected_party: String,

        /// Impact description
        #[arg(long)]
        impact: String,
    },

    /// Revise an identification; omitted fields keep their stored values
    Update {
        /// Identification id
        id: String,

        /// Context id the risk belongs to
        #[arg(long)]
        context: Option<String>,

        /// Register code, e.g. "R-001"
        #[arg(long)]
        code: Option<String>,

        /// Risk owner
        #[arg(long)]
        owner: Option<String>,

        /// Whether the risk source can be influenced
        #[arg(long)]
        nature: Option<NatureArg>,

        /// Reporting category
        #[arg(long)]
        category: Option<CategoryArg>,

        /// Risk description
        #[arg(long)]
        description: Option<String>,

        /// Cause source (internal/external factor)
        #[arg(long)]
        cause_source: Option<String>,

        /// Cause description
        #[arg(long)]
        cause: Option<String>,

        /// Party affected if the risk occurs
        #[arg(long)]
        affected_party: Option<String>,

        /// Impact description
        #[arg(long)]
        impact: Option<String>,
    },

    /// List identifications
    List {
        /// Restrict to one context
        #[arg(short, long)]
        context: Option<String>,

        /// Output format: text, json
        #[arg(short = 'F', long, default_value = "text")]
        format: OutputFormat,
    },

    /// Remove an identification (refused while analyses reference it)
    Remove {
        /// Identification id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AnalyzeAction {
    /// Record a new analysis; the score is stamped from the configured policy
    Add {
        /// Identification id being analyzed
        #[arg(long)]
        identification: String,

        /// Likelihood scale, 1-5
        #[arg(short, long)]
        likelihood: u8,

        /// Impact scale, 1-5
        #[arg(short, long)]
        impact: u8,

        /// Existing control description
        #[arg(long)]
        control: String,

        /// Control adequacy verdict
        #[arg(long, default_value = "inadequate")]
        verdict: VerdictArg,
    },

    /// Revise an analysis; the score is re-stamped from the configured policy
    Update {
        /// Analysis id
        id: String,

        /// Identification id being analyzed
        #[arg(long)]
        identification: Option<String>,

        /// Likelihood scale, 1-5
        #[arg(short, long)]
        likelihood: Option<u8>,

        /// Impact scale, 1-5
        #[arg(short, long)]
        impact: Option<u8>,

        /// Existing control description
        #[arg(long)]
        control: Option<String>,

        /// Control adequacy verdict
        #[arg(long)]
        verdict: Option<VerdictArg>,
    },

    /// List analyses with their scores and levels
    List {
        /// Restrict to one context
        #[arg(short, long)]
        context: Option<String>,

        /// Output format: text, json
        #[arg(short = 'F', long, default_value = "text")]
        format: OutputFormat,
    },

    /// Remove an analysis (refused while assessments reference it)
    Remove {
        /// Analysis id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AssessAction {
    /// Record a follow-up plan for an analysis
    Add {
        /// Analysis id being assessed
        #[arg(long)]
        analysis: String,

        /// Risk response, e.g. "mitigate", "transfer", "accept"
        #[arg(long)]
        response: String,

        /// Controls already in place
        #[arg(long)]
        existing_controls: Option<String>,

        /// Planned control actions
        #[arg(long)]
        action_plan: Option<String>,

        /// Plan owner
        #[arg(long)]
        owner: String,

        /// Completion target, YYYY-MM-DD
        #[arg(long)]
        target_date: NaiveDate,

        /// Output indicator for the plan
        #[arg(long)]
        output_indicator: Option<String>,

        /// Expected residual likelihood, 1-5
        #[arg(long)]
        expected_likelihood: u8,

        /// Expected residual impact, 1-5
        #[arg(long)]
        expected_impact: u8,
    },

    /// Revise an assessment; the residual score is recomputed
    Update {
        /// Assessment id
        id: String,

        /// Analysis id being assessed
        #[arg(long)]
        analysis: Option<String>,

        /// Risk response, e.g. "mitigate", "transfer", "accept"
        #[arg(long)]
        response: Option<String>,

        /// Controls already in place
        #[arg(long)]
        existing_controls: Option<String>,

        /// Planned control actions
        #[arg(long)]
        action_plan: Option<String>,

        /// Plan owner
        #[arg(long)]
        owner: Option<String>,

        /// Completion target, YYYY-MM-DD
        #[arg(long)]
        target_date: Option<NaiveDate>,

        /// Output indicator for the plan
        #[arg(long)]
        output_indicator: Option<String>,

        /// Expected residual likelihood, 1-5
        #[arg(long)]
        expected_likelihood: Option<u8>,

        /// Expected residual impact, 1-5
        #[arg(long)]
        expected_impact: Option<u8>,
    },

    /// List assessments
    List {
        /// Restrict to one context
        #[arg(short, long)]
        context: Option<String>,

        /// Output format: text, json
        #[arg(short = 'F', long, default_value = "text")]
        format: OutputFormat,
    },

    /// Remove an assessment
    Remove {
        /// Assessment id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize default configuration
    Init {
        /// Path to create config file
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Show current configuration
    Show,
}

/// Logging verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    /// Auto-detect based on terminal
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// CLI-facing risk nature values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum NatureArg {
    Controllable,
    Uncontrollable,
}

impl From<NatureArg> for RiskNature {
    fn from(arg: NatureArg) -> Self {
        match arg {
            NatureArg::Controllable => RiskNature::Controllable,
            NatureArg::Uncontrollable => RiskNature::Uncontrollable,
        }
    }
}

/// CLI-facing risk category values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CategoryArg {
    Performance,
    Financial,
    Reputation,
}

impl From<CategoryArg> for RiskCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Performance => RiskCategory::Performance,
            CategoryArg::Financial => RiskCategory::Financial,
            CategoryArg::Reputation => RiskCategory::Reputation,
        }
    }
}

/// CLI-facing control verdict values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum VerdictArg {
    Adequate,
    Inadequate,
}

impl From<VerdictArg> for ControlVerdict {
    fn from(arg: VerdictArg) -> Self {
        match arg {
            VerdictArg::Adequate => ControlVerdict::Adequate,
            VerdictArg::Inadequate => ControlVerdict::Inadequate,
        }
    }
}

/// CLI-facing risk level filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LevelArg {
    Low,
    Medium,
    High,
    Critical,
}

impl From<LevelArg> for RiskLevel {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Low => RiskLevel::Low,
            LevelArg::Medium => RiskLevel::Medium,
            LevelArg::High => RiskLevel::High,
            LevelArg::Critical => RiskLevel::Critical,
        }
    }
}

/// Resolve the data directory: CLI flag wins, then config, then platform
/// default.
pub fn resolve_data_dir(provided: Option<PathBuf>, config: &Config) -> PathBuf {
    provided.unwrap_or_else(|| config.storage.data_dir())
}
