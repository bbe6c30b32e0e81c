//! Library nodes of a resolved dependency graph
//!
//! A [`LibraryNode`] carries its identity, whether the resolver managed to
//! locate it, and kind-specific data in a closed [`LibraryData`] enum. Parent
//! relationships live in the graph (see [`crate::graph::LibraryGraph`]), not
//! on the node.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::output_paths::OutputPaths;

/// Kind of library a node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LibraryKind {
    Package,
    Project,
    FrameworkReference,
    Unspecified,
}

impl fmt::Display for LibraryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LibraryKind::Package => "package",
            LibraryKind::Project => "project",
            LibraryKind::FrameworkReference => "framework-reference",
            LibraryKind::Unspecified => "unspecified",
        };
        f.write_str(name)
    }
}

/// Name and kind of a library
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LibraryIdentity {
    pub name: String,
    /// Resolved version, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub kind: LibraryKind,
}

impl LibraryIdentity {
    pub fn new(name: impl Into<String>, kind: LibraryKind) -> Self {
        Self {
            name: name.into(),
            version: None,
            kind,
        }
    }
}

/// On-disk contents of a restored package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageData {
    /// Directory the package was extracted into
    pub content_root: PathBuf,
    /// Every file in the package, relative to `content_root`
    #[serde(default)]
    pub files: Vec<String>,
    /// Lock-file section: native libraries for the active target
    #[serde(default)]
    pub native_libraries: Vec<String>,
    /// Lock-file section: runtime assemblies for the active target
    #[serde(default)]
    pub runtime_assemblies: Vec<String>,
    /// Lock-file section: compile-time assemblies for the active target
    #[serde(default)]
    pub compile_assemblies: Vec<String>,
}

/// A project that is built alongside the consumer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectData {
    pub project_directory: PathBuf,
    /// Precompiled assembly, relative to `project_directory`. May contain a
    /// `{configuration}` placeholder.
    #[serde(default)]
    pub assembly_path: Option<String>,
    /// Non-empty iff the project compiles from source
    #[serde(default)]
    pub source_files: Vec<PathBuf>,
    #[serde(default)]
    pub shared_files: Vec<PathBuf>,
    /// Output layout already computed by the graph builder. When absent the
    /// exporter asks its [`OutputPathCalculator`](crate::output_paths::OutputPathCalculator).
    #[serde(default)]
    pub outputs: Option<OutputPaths>,
    /// Whether the project produces an application rather than a library
    #[serde(default)]
    pub executable: bool,
}

impl ProjectData {
    pub fn compiles_from_source(&self) -> bool {
        !self.source_files.is_empty()
    }
}

/// Reference to an assembly provided by the target framework
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkReferenceData {
    /// Reference assembly path. Empty means no compile-time contribution.
    #[serde(default)]
    pub path: Option<String>,
}

/// Kind-specific payload of a library node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryData {
    Package(PackageData),
    Project(ProjectData),
    FrameworkReference(FrameworkReferenceData),
}

impl LibraryData {
    pub fn kind(&self) -> LibraryKind {
        match self {
            LibraryData::Package(_) => LibraryKind::Package,
            LibraryData::Project(_) => LibraryKind::Project,
            LibraryData::FrameworkReference(_) => LibraryKind::FrameworkReference,
        }
    }
}

/// A node in the resolved dependency graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryNode {
    pub identity: LibraryIdentity,
    /// False when the resolver could not locate the library
    pub resolved: bool,
    pub data: LibraryData,
}

impl LibraryNode {
    /// Create a resolved node whose identity kind matches `data`
    pub fn new(name: impl Into<String>, data: LibraryData) -> Self {
        Self {
            identity: LibraryIdentity::new(name, data.kind()),
            resolved: true,
            data,
        }
    }

    pub fn package(name: impl Into<String>, package: PackageData) -> Self {
        Self::new(name, LibraryData::Package(package))
    }

    pub fn project(name: impl Into<String>, project: ProjectData) -> Self {
        Self::new(name, LibraryData::Project(project))
    }

    pub fn framework_reference(name: impl Into<String>, path: Option<String>) -> Self {
        Self::new(
            name,
            LibraryData::FrameworkReference(FrameworkReferenceData { path }),
        )
    }

    /// Mark the node as unresolved
    pub fn unresolved(mut self) -> Self {
        self.resolved = false;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.identity.version = Some(version.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn kind(&self) -> LibraryKind {
        self.identity.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_matching_kind() {
        let pkg = LibraryNode::package("Newtonsoft.Json", PackageData::default());
        let proj = LibraryNode::project("App", ProjectData::default());
        let fx = LibraryNode::framework_reference("System", None);

        assert_eq!(pkg.kind(), LibraryKind::Package);
        assert_eq!(proj.kind(), LibraryKind::Project);
        assert_eq!(fx.kind(), LibraryKind::FrameworkReference);
        assert!(pkg.resolved && proj.resolved && fx.resolved);
    }

    #[test]
    fn test_unresolved_and_version() {
        let node = LibraryNode::project("Lib", ProjectData::default())
            .unresolved()
            .with_version("1.2.3");

        assert!(!node.resolved);
        assert_eq!(node.identity.version.as_deref(), Some("1.2.3"));
    }

    #[test]
    fn test_compiles_from_source() {
        let mut project = ProjectData::default();
        assert!(!project.compiles_from_source());

        project.source_files.push(PathBuf::from("Program.cs"));
        assert!(project.compiles_from_source());
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&LibraryKind::FrameworkReference).unwrap();
        assert_eq!(json, "\"framework-reference\"");

        let kind: LibraryKind = serde_json::from_str("\"package\"").unwrap();
        assert_eq!(kind, LibraryKind::Package);
        assert_eq!(LibraryKind::Project.to_string(), "project");
    }
}
