//! JSON description of a resolved graph
//!
//! Lets a resolved graph be handed to the exporter without linking the
//! resolver that produced it.
//!
//! ```json
//! {
//!   "root": "App",
//!   "config": { "configuration": "Release" },
//!   "libraries": [
//!     { "kind": "project", "name": "App", "project_directory": "/src/App",
//!       "source_files": ["Program.cs"], "dependencies": ["Json"] },
//!     { "kind": "package", "name": "Json", "version": "13.0.1",
//!       "content_root": "/packages/json/13.0.1",
//!       "compile_assemblies": ["lib/net45/Json.dll"] }
//!   ]
//! }
//! ```
//!
//! The root is inserted first, then the other libraries in file order. That
//! order is the traversal order used by the exporter.

use serde::Deserialize;
use std::path::Path;

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::graph::LibraryGraph;
use crate::library::{
    FrameworkReferenceData, LibraryData, LibraryIdentity, LibraryNode, PackageData, ProjectData,
};

/// A parsed manifest: the graph plus the settings it was resolved for
pub struct GraphManifest {
    pub graph: LibraryGraph,
    /// Settings embedded in the manifest, if any
    pub config: Option<ExportConfig>,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    root: String,
    #[serde(default)]
    config: Option<ExportConfig>,
    libraries: Vec<LibraryEntry>,
}

#[derive(Debug, Deserialize)]
struct LibraryEntry {
    name: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default = "default_resolved")]
    resolved: bool,
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(flatten)]
    data: EntryData,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
enum EntryData {
    Package(PackageData),
    Project(ProjectData),
    FrameworkReference(FrameworkReferenceData),
}

fn default_resolved() -> bool {
    true
}

impl LibraryEntry {
    fn into_node(self) -> (LibraryNode, Vec<String>) {
        let data = match self.data {
            EntryData::Package(package) => LibraryData::Package(package),
            EntryData::Project(project) => LibraryData::Project(project),
            EntryData::FrameworkReference(reference) => LibraryData::FrameworkReference(reference),
        };
        let node = LibraryNode {
            identity: LibraryIdentity {
                name: self.name,
                version: self.version,
                kind: data.kind(),
            },
            resolved: self.resolved,
            data,
        };
        (node, self.dependencies)
    }
}

/// Parse a manifest from a JSON string
pub fn from_str(json: &str) -> Result<GraphManifest> {
    let raw: RawManifest = serde_json::from_str(json)?;
    build(raw)
}

/// Read and parse a manifest file
pub fn load(path: &Path) -> Result<GraphManifest> {
    let json = std::fs::read_to_string(path)?;
    from_str(&json)
}

fn build(raw: RawManifest) -> Result<GraphManifest> {
    let mut entries: Vec<(LibraryNode, Vec<String>)> =
        raw.libraries.into_iter().map(LibraryEntry::into_node).collect();

    let root_position = entries
        .iter()
        .position(|(node, _)| node.name() == raw.root)
        .ok_or_else(|| ExportError::UnknownLibrary(raw.root.clone()))?;
    let (root, root_dependencies) = entries.remove(root_position);

    let mut graph = LibraryGraph::new(root);
    let mut edges: Vec<(String, Vec<String>)> = vec![(raw.root, root_dependencies)];
    for (node, dependencies) in entries {
        edges.push((node.name().to_string(), dependencies));
        graph.add_library(node)?;
    }

    for (parent, dependencies) in &edges {
        for child in dependencies {
            graph.add_dependency_by_name(parent, child)?;
        }
    }

    Ok(GraphManifest {
        graph,
        config: raw.config,
    })
}
