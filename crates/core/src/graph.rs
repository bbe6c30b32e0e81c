//! Resolved library dependency graph
//!
//! Uses `petgraph::StableGraph` so node indices handed out while the graph
//! is being built stay valid. Edges point from a library to the libraries it
//! depends on; a node's parents are the sources of its incoming edges.
//!
//! # Traversal order
//!
//! Libraries are visited in insertion order and the root is always inserted
//! first. Compile-asset ownership during export depends on this order, so the
//! graph builder must insert libraries in a deterministic order.

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;
use std::collections::HashMap;

use crate::error::{ExportError, Result};
use crate::library::LibraryNode;

/// Index of a library inside a [`LibraryGraph`]
pub type LibraryIndex = NodeIndex;

/// A dependency edge from a parent library to a child library
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dependency;

/// The resolved dependency graph of one project
pub struct LibraryGraph {
    /// The underlying stable graph (private to enforce encapsulation)
    inner: StableDiGraph<LibraryNode, Dependency>,
    /// Maps library names to their index for O(1) lookups
    name_map: HashMap<String, LibraryIndex>,
    root: LibraryIndex,
}

impl LibraryGraph {
    /// Create a graph containing only the root library
    pub fn new(root: LibraryNode) -> Self {
        let mut inner = StableDiGraph::new();
        let mut name_map = HashMap::new();
        let name = root.name().to_string();
        let root = inner.add_node(root);
        name_map.insert(name, root);
        Self {
            inner,
            name_map,
            root,
        }
    }

    /// Add a library to the graph
    ///
    /// Library names are unique within a graph.
    pub fn add_library(&mut self, library: LibraryNode) -> Result<LibraryIndex> {
        if self.name_map.contains_key(library.name()) {
            return Err(ExportError::DuplicateLibrary(library.name().to_string()));
        }
        let name = library.name().to_string();
        let index = self.inner.add_node(library);
        self.name_map.insert(name, index);
        Ok(index)
    }

    /// Record that `parent` depends on `child`
    ///
    /// Adding the same dependency twice is a no-op.
    pub fn add_dependency(&mut self, parent: LibraryIndex, child: LibraryIndex) -> Result<()> {
        for index in [parent, child] {
            if !self.inner.contains_node(index) {
                return Err(ExportError::UnknownLibrary(format!("#{}", index.index())));
            }
        }
        if self.inner.find_edge(parent, child).is_none() {
            self.inner.add_edge(parent, child, Dependency);
        }
        Ok(())
    }

    /// Name-based variant of [`add_dependency`](Self::add_dependency)
    pub fn add_dependency_by_name(&mut self, parent: &str, child: &str) -> Result<()> {
        let parent = self.require(parent)?;
        let child = self.require(child)?;
        self.add_dependency(parent, child)
    }

    pub fn root(&self) -> LibraryIndex {
        self.root
    }

    pub fn root_library(&self) -> &LibraryNode {
        &self.inner[self.root]
    }

    /// Get a library by index
    pub fn library(&self, index: LibraryIndex) -> Option<&LibraryNode> {
        self.inner.node_weight(index)
    }

    /// Find a library by name
    pub fn find_library(&self, name: &str) -> Option<LibraryIndex> {
        self.name_map.get(name).copied()
    }

    /// Libraries that depend directly on `index`
    pub fn parents(&self, index: LibraryIndex) -> impl Iterator<Item = LibraryIndex> + '_ {
        self.inner.neighbors_directed(index, Direction::Incoming)
    }

    /// Libraries `index` depends on directly
    pub fn dependencies(&self, index: LibraryIndex) -> impl Iterator<Item = LibraryIndex> + '_ {
        self.inner.neighbors_directed(index, Direction::Outgoing)
    }

    /// Whether the root depends on `index` directly
    pub fn is_direct_dependency(&self, index: LibraryIndex) -> bool {
        self.inner.find_edge(self.root, index).is_some()
    }

    /// Library indices in traversal (insertion) order, root first
    pub fn traversal_order(&self) -> impl Iterator<Item = LibraryIndex> + '_ {
        self.inner.node_indices()
    }

    /// Libraries with their indices in traversal order
    pub fn libraries(&self) -> impl Iterator<Item = (LibraryIndex, &LibraryNode)> + '_ {
        self.traversal_order().map(|index| (index, &self.inner[index]))
    }

    /// Get the number of libraries in the graph, root included
    pub fn library_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Get the number of dependency edges in the graph
    pub fn dependency_count(&self) -> usize {
        self.inner.edge_count()
    }

    fn require(&self, name: &str) -> Result<LibraryIndex> {
        self.find_library(name)
            .ok_or_else(|| ExportError::UnknownLibrary(name.to_string()))
    }
}
