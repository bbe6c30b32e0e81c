//! Error types for export resolution

use thiserror::Error;

use crate::framework::FrameworkParseError;
use crate::library::LibraryKind;

/// Result type alias using the export-resolver Error
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that can occur while building a graph or resolving its exports
#[derive(Debug, Error)]
pub enum ExportError {
    /// The exporter was constructed without a build configuration
    #[error("a build configuration is required (e.g. \"Debug\" or \"Release\")")]
    MissingConfiguration,

    /// A node's declared kind does not match the data it carries.
    ///
    /// Raised for `Unspecified` nodes as well: the graph builder must never
    /// hand those to the exporter.
    #[error("library '{library}' is declared as {declared} but carries {actual} data")]
    KindMismatch {
        library: String,
        declared: LibraryKind,
        actual: LibraryKind,
    },

    /// A dependency edge names a library that is not in the graph
    #[error("unknown library '{0}'")]
    UnknownLibrary(String),

    /// Two libraries in one graph share a name
    #[error("library '{0}' is declared more than once")]
    DuplicateLibrary(String),

    /// Malformed graph manifest
    #[error("manifest parse error: {0}")]
    Manifest(#[from] serde_json::Error),

    /// IO error while reading a manifest
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A package layout pattern failed to compile
    #[error("invalid package layout pattern: {0}")]
    Pattern(#[from] globset::Error),

    /// Malformed framework specifier
    #[error(transparent)]
    Framework(#[from] FrameworkParseError),
}
