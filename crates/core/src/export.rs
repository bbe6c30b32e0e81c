//! The computed export of one library

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::asset::{AnalyzerReference, Asset};
use crate::library::LibraryIdentity;

/// Assets one library contributes to the consuming project
///
/// Produced fresh by every export pass; sequences keep discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryExport {
    pub library: LibraryIdentity,
    /// Assemblies passed to the compiler as references
    pub compile_assemblies: Vec<Asset>,
    /// Source files compiled into the consumer
    pub source_references: Vec<PathBuf>,
    /// Assemblies copied next to the consumer's output
    pub runtime_assemblies: Vec<Asset>,
    /// Other files copied next to the consumer's output
    pub runtime_assets: Vec<Asset>,
    pub native_libraries: Vec<Asset>,
    pub analyzer_references: Vec<AnalyzerReference>,
}

impl LibraryExport {
    /// An export with every collection empty
    pub fn empty(library: LibraryIdentity) -> Self {
        Self {
            library,
            compile_assemblies: Vec::new(),
            source_references: Vec::new(),
            runtime_assemblies: Vec::new(),
            runtime_assets: Vec::new(),
            native_libraries: Vec::new(),
            analyzer_references: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.compile_assemblies.is_empty()
            && self.source_references.is_empty()
            && self.runtime_assemblies.is_empty()
            && self.runtime_assets.is_empty()
            && self.native_libraries.is_empty()
            && self.analyzer_references.is_empty()
    }

    /// Paths to hand to the compiler as references
    pub fn compile_paths(&self) -> impl Iterator<Item = &Path> {
        self.compile_assemblies.iter().map(|a| a.resolved_path.as_path())
    }

    /// Paths to copy to the output directory: runtime assemblies, then
    /// runtime assets, then native libraries
    pub fn runtime_paths(&self) -> impl Iterator<Item = &Path> {
        self.runtime_assemblies
            .iter()
            .chain(&self.runtime_assets)
            .chain(&self.native_libraries)
            .map(|a| a.resolved_path.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::LibraryKind;

    #[test]
    fn test_empty_export() {
        let export = LibraryExport::empty(LibraryIdentity::new("Lib", LibraryKind::Project));

        assert!(export.is_empty());
        assert_eq!(export.compile_paths().count(), 0);
        assert_eq!(export.runtime_paths().count(), 0);
    }

    #[test]
    fn test_runtime_paths_order() {
        let mut export = LibraryExport::empty(LibraryIdentity::new("Pkg", LibraryKind::Package));
        export.native_libraries.push(Asset::new("native", None, "/p/native.so"));
        export.runtime_assets.push(Asset::new("Pkg", None, "/p/Pkg.pdb"));
        export.runtime_assemblies.push(Asset::new("Pkg", None, "/p/Pkg.dll"));

        let paths: Vec<&Path> = export.runtime_paths().collect();
        assert_eq!(
            paths,
            vec![Path::new("/p/Pkg.dll"), Path::new("/p/Pkg.pdb"), Path::new("/p/native.so")]
        );
        assert!(!export.is_empty());
    }

    #[test]
    fn test_export_serialization() {
        let mut export = LibraryExport::empty(LibraryIdentity::new("Pkg", LibraryKind::Package));
        export
            .compile_assemblies
            .push(Asset::new("Pkg", Some("lib/net45/Pkg.dll".to_string()), "/p/lib/net45/Pkg.dll"));

        let serialized = serde_json::to_string(&export).unwrap();
        let deserialized: LibraryExport = serde_json::from_str(&serialized).unwrap();

        assert_eq!(export, deserialized);
    }
}
