pub mod settings;

pub use settings::{AuditSettings, Config, ConfigError};
