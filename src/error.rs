//! Error types for structure construction, realization and model stepping.

use std::path::PathBuf;

/// Errors that can occur while describing, realizing or driving a structure.
#[derive(Debug, thiserror::Error)]
pub enum StructureError {
    /// A pair references an out-of-range node, or both ends name the same node.
    #[error("invalid pair ({from}, {to}) for a structure with {len} nodes")]
    InvalidIndex { from: usize, to: usize, len: usize },

    /// A junction connector names a node role the unit does not have.
    #[error("unknown node role: {0}")]
    UnknownNodeRole(String),

    /// No registered builder matches the tags of a pair.
    #[error("no builder matches tags \"{tags}\"")]
    UnboundTag { tags: String },

    /// A component group was looked up before being bound.
    #[error("label not found: {0}")]
    LabelNotFound(String),

    /// An argument is outside its accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `build_into` was called on a model that already holds components.
    #[error("model is already built; tear it down before rebuilding")]
    AlreadyBuilt,

    /// The external description is malformed.
    #[error("description error: {0}")]
    Description(String),

    /// Failed to read the external description.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StructureError>;

impl From<serde_json::Error> for StructureError {
    fn from(e: serde_json::Error) -> Self {
        Self::Description(e.to_string())
    }
}
