//! Export Resolver Core Library
//!
//! This library computes, for an already-resolved library dependency graph,
//! the assets each library contributes to a consuming project: compile
//! references, shared sources, runtime files, native libraries and analyzer
//! plugins.

pub mod analyzer;
pub mod asset;
pub mod config;
pub mod error;
pub mod export;
pub mod exporter;
pub mod framework;
pub mod graph;
pub mod layout;
pub mod library;
pub mod manifest;
pub mod output_paths;

// Re-export commonly used types
pub use asset::{AnalyzerReference, Asset};
pub use config::ExportConfig;
pub use error::{ExportError, Result};
pub use export::LibraryExport;
pub use exporter::LibraryExporter;
pub use framework::FrameworkSpecifier;
pub use graph::{LibraryGraph, LibraryIndex};
pub use library::{LibraryIdentity, LibraryKind, LibraryNode};
