//! Export resolution over a library graph
//!
//! [`LibraryExporter`] walks a [`LibraryGraph`] in traversal order and
//! computes one [`LibraryExport`] per visited library.
//!
//! # Propagation rules
//!
//! - Compile assemblies are deduplicated by name across the whole pass. The
//!   first library visited that declares a name owns it; later libraries
//!   declaring the same name lose it silently.
//! - Source references and analyzer references are kept only for direct
//!   dependencies of the root. Transitive libraries never contribute them.
//! - Runtime assemblies, runtime assets and native libraries pass through
//!   untouched.
//!
//! Each call owns its own seen-names set, so independent calls over the same
//! graph may run concurrently.
//!
//! # Example
//!
//! ```
//! use export_resolver_core::{ExportConfig, LibraryExporter, LibraryGraph, LibraryNode};
//! use export_resolver_core::library::{PackageData, ProjectData};
//!
//! # fn main() -> Result<(), export_resolver_core::ExportError> {
//! let mut graph = LibraryGraph::new(LibraryNode::project("App", ProjectData::default()));
//! graph.add_library(LibraryNode::package("Json", PackageData::default()))?;
//! graph.add_dependency_by_name("App", "Json")?;
//!
//! let exporter = LibraryExporter::new(&graph, ExportConfig::new("Debug"))?;
//! let exports = exporter.get_dependencies(None)?;
//! assert_eq!(exports.len(), 1);
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use tracing::{debug, trace};

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::export::LibraryExport;
use crate::graph::{LibraryGraph, LibraryIndex};
use crate::layout::PackageLayout;
use crate::library::{LibraryData, LibraryKind, LibraryNode};
use crate::output_paths::{ConventionalOutputPaths, OutputPathCalculator};

mod package;
mod project;
mod reference;

pub use project::CONFIGURATION_TOKEN;

/// Computes library exports for one graph under one build configuration
pub struct LibraryExporter<'g> {
    graph: &'g LibraryGraph,
    config: ExportConfig,
    layout: PackageLayout,
    output_paths: Box<dyn OutputPathCalculator>,
}

impl<'g> LibraryExporter<'g> {
    /// Create an exporter using the conventional project output layout
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingConfiguration`] when the configuration
    /// is empty. Nothing is traversed in that case.
    pub fn new(graph: &'g LibraryGraph, config: ExportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            graph,
            config,
            layout: PackageLayout::new()?,
            output_paths: Box::new(ConventionalOutputPaths),
        })
    }

    /// Replace the calculator consulted for projects that build from source
    pub fn with_output_paths(mut self, output_paths: impl OutputPathCalculator + 'static) -> Self {
        self.output_paths = Box::new(output_paths);
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Exports for every library in the graph, root included
    pub fn get_all_exports(&self) -> Result<Vec<LibraryExport>> {
        self.resolve(|_, _| true)
    }

    /// Exports for every library except the root, optionally restricted to
    /// one kind
    pub fn get_dependencies(&self, kind: Option<LibraryKind>) -> Result<Vec<LibraryExport>> {
        let root = self.graph.root();
        self.resolve(move |index, library| {
            index != root && kind.map_or(true, |kind| library.kind() == kind)
        })
    }

    /// Exports for the project libraries the root depends on
    pub fn get_all_project_type_dependencies(&self) -> Result<Vec<LibraryExport>> {
        self.get_dependencies(Some(LibraryKind::Project))
    }

    /// Exports for the libraries accepted by `filter`, in traversal order
    ///
    /// Libraries rejected by the filter do not take part in compile-asset
    /// deduplication.
    pub fn resolve<F>(&self, mut filter: F) -> Result<Vec<LibraryExport>>
    where
        F: FnMut(LibraryIndex, &LibraryNode) -> bool,
    {
        let mut seen_names: HashSet<String> = HashSet::new();
        let mut exports = Vec::new();

        for (index, library) in self.graph.libraries() {
            if !filter(index, library) {
                continue;
            }

            let raw = self.export_library(library)?;
            let export = finalize(raw, self.graph.is_direct_dependency(index), &mut seen_names);

            debug!(
                library = %export.library.name,
                kind = %export.library.kind,
                compile = export.compile_assemblies.len(),
                sources = export.source_references.len(),
                runtime = export.runtime_assemblies.len(),
                assets = export.runtime_assets.len(),
                native = export.native_libraries.len(),
                analyzers = export.analyzer_references.len(),
                "exported library"
            );
            exports.push(export);
        }

        Ok(exports)
    }

    /// Export a single library in isolation, without graph context
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::KindMismatch`] when the library's declared kind
    /// is `Unspecified` or does not match its data.
    pub fn export_library(&self, library: &LibraryNode) -> Result<LibraryExport> {
        let identity = &library.identity;
        if identity.kind != library.data.kind() {
            return Err(ExportError::KindMismatch {
                library: identity.name.clone(),
                declared: identity.kind,
                actual: library.data.kind(),
            });
        }

        let export = match &library.data {
            LibraryData::Package(package) => package::export_package(identity, package, &self.layout),
            LibraryData::Project(_) if !library.resolved => {
                debug!(library = %identity.name, "unresolved project exports nothing");
                LibraryExport::empty(identity.clone())
            }
            LibraryData::Project(project) => {
                project::export_project(identity, project, &self.config, self.output_paths.as_ref())
            }
            LibraryData::FrameworkReference(reference) => {
                reference::export_framework_reference(identity, reference)
            }
        };
        Ok(export)
    }
}

/// Apply the graph-level policy to a library's raw export
fn finalize(mut export: LibraryExport, direct: bool, seen_names: &mut HashSet<String>) -> LibraryExport {
    let library = export.library.name.clone();
    export.compile_assemblies.retain(|asset| {
        let first = seen_names.insert(asset.name.clone());
        if !first {
            trace!(library = %library, asset = %asset.name, "compile asset already exported");
        }
        first
    });

    if !direct {
        export.source_references.clear();
        export.analyzer_references.clear();
    }

    export
}
