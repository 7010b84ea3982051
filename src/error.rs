use std::path::PathBuf;

use thiserror::Error;

/// Conditions raised by the navigation core.
///
/// Only `NoSchemaData` is fatal, and only at startup. The other two are
/// handled where they occur: the dashboard renders less or ignores input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("no schema data: the inspected database contains no schemas")]
    NoSchemaData,

    #[error("terminal too small to lay out panels ({width}x{height})")]
    DegenerateGeometry { width: u16, height: u16 },

    #[error("unknown table {schema}.{table}")]
    UnknownTableKey { schema: String, table: String },
}

/// Failures while obtaining the schema tree.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("atlas cli not found at '{}'", .0.display())]
    AtlasNotFound(PathBuf),

    #[error("atlas cli not found in PATH")]
    AtlasNotInPath,

    #[error("atlas cli at '{}' is not a regular file", .0.display())]
    NotARegularFile(PathBuf),

    #[error("failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run atlas: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("failed to unmarshal data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Atlas(String),

    #[error("invalid schema data: {0}")]
    InvalidData(String),
}
