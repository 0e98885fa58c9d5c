//! Record storage: pluggable backends, typed repositories, and the registry
//! that enforces cross-record rules.

pub mod backend;
pub mod registry;
pub mod repository;

pub use backend::{Backend, FileBackend, MemoryBackend};
pub use registry::{Registry, RegistryError};
pub use repository::{Record, Repository};

use thiserror::Error;

/// Storage-level failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access collection `{collection}`: {source}")]
    Io {
        collection: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Collection `{collection}` is corrupt: {source}")]
    Corrupt {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid collection name `{0}`")]
    InvalidCollection(String),

    #[error("Record `{id}` already exists in `{collection}`")]
    Duplicate { collection: String, id: String },

    #[error("Record `{id}` not found in `{collection}`")]
    NotFound { collection: String, id: String },
}
