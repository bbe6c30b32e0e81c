//! Asset value types
//!
//! An [`Asset`] is a single located build artifact. Its `name` is the
//! deduplication key used when compile assets are merged across the graph.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::framework::FrameworkSpecifier;

/// A named, located build artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Logical name (file name without extension)
    pub name: String,
    /// Path relative to the owning library, when one is meaningful
    pub relative_path: Option<String>,
    /// Absolute (or caller-rooted) path on disk
    pub resolved_path: PathBuf,
}

impl Asset {
    pub fn new(
        name: impl Into<String>,
        relative_path: Option<String>,
        resolved_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            relative_path,
            resolved_path: resolved_path.into(),
        }
    }

    /// Create an asset for `relative_path` located under `root`.
    ///
    /// The name is the file stem of the relative path. Backslash separators
    /// in the relative path are normalised to `/` before joining.
    pub fn from_relative(root: &Path, relative_path: &str) -> Self {
        let normalized = normalize_separators(relative_path);
        let resolved_path = root.join(&normalized);
        Self {
            name: file_stem(&normalized),
            relative_path: Some(relative_path.to_string()),
            resolved_path,
        }
    }

    /// Create an asset from an absolute path, recording its position
    /// relative to `base_path` when it lives under it.
    pub fn from_absolute(base_path: &Path, absolute_path: &Path) -> Self {
        let relative_path = absolute_path
            .strip_prefix(base_path)
            .ok()
            .map(|rel| rel.to_string_lossy().replace('\\', "/"));
        Self {
            name: file_stem(&absolute_path.to_string_lossy()),
            relative_path,
            resolved_path: absolute_path.to_path_buf(),
        }
    }
}

/// A loadable analyzer plugin, optionally scoped to a framework, a language
/// and a runtime identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerReference {
    pub assembly_path: PathBuf,
    pub framework: Option<FrameworkSpecifier>,
    pub language: Option<String>,
    pub runtime_identifier: Option<String>,
}

/// File name without its final extension, for either separator style
pub(crate) fn file_stem(path: &str) -> String {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match file_name.rfind('.') {
        Some(0) | None => file_name.to_string(),
        Some(dot) => file_name[..dot].to_string(),
    }
}

pub(crate) fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_relative_uses_file_stem() {
        let asset = Asset::from_relative(Path::new("/packages/foo/1.0.0"), "lib/net45/Foo.Bar.dll");

        assert_eq!(asset.name, "Foo.Bar");
        assert_eq!(asset.relative_path.as_deref(), Some("lib/net45/Foo.Bar.dll"));
        assert_eq!(
            asset.resolved_path,
            PathBuf::from("/packages/foo/1.0.0/lib/net45/Foo.Bar.dll")
        );
    }

    #[test]
    fn test_from_relative_normalizes_backslashes() {
        let asset = Asset::from_relative(Path::new("/pkg"), "runtimes\\win\\native\\sqlite3.dll");

        assert_eq!(asset.name, "sqlite3");
        assert_eq!(asset.resolved_path, PathBuf::from("/pkg/runtimes/win/native/sqlite3.dll"));
        // The raw entry is kept verbatim
        assert_eq!(asset.relative_path.as_deref(), Some("runtimes\\win\\native\\sqlite3.dll"));
    }

    #[test]
    fn test_from_absolute_strips_base_path() {
        let asset = Asset::from_absolute(
            Path::new("/src/app/bin/Debug"),
            Path::new("/src/app/bin/Debug/en/App.resources.dll"),
        );

        assert_eq!(asset.name, "App.resources");
        assert_eq!(asset.relative_path.as_deref(), Some("en/App.resources.dll"));
    }

    #[test]
    fn test_from_absolute_outside_base_has_no_relative_path() {
        let asset = Asset::from_absolute(Path::new("/out"), Path::new("/elsewhere/App.pdb"));

        assert_eq!(asset.name, "App");
        assert!(asset.relative_path.is_none());
    }

    #[test]
    fn test_file_stem_edge_cases() {
        assert_eq!(file_stem("a/b/c.dll"), "c");
        assert_eq!(file_stem("c"), "c");
        assert_eq!(file_stem(".hidden"), ".hidden");
        assert_eq!(file_stem("a\\b\\System.Runtime.dll"), "System.Runtime");
    }
}
