//! Analyzer plugin discovery inside packages
//!
//! Packages ship analyzers under an `analyzers/` folder. The number of
//! segments after that folder decides how the reference is scoped:
//!
//! ```text
//! analyzers/X.dll                          global
//! analyzers/{framework}/X.dll              framework
//! analyzers/{framework}/{language}/X.dll   framework + language
//! analyzers/{framework}/{rid}/{language}/X.dll
//! ```
//!
//! Any other depth is not a legal layout and is ignored.

use std::path::Path;

use crate::asset::{normalize_separators, AnalyzerReference};
use crate::framework::{FrameworkParseError, FrameworkSpecifier};

/// Convention root for analyzer plugins inside a package
pub const ANALYZERS_ROOT: &str = "analyzers/";

/// Parse an analyzer path relative to `content_root`.
///
/// Returns `Ok(None)` when the path is not under `analyzers/` or has an
/// unsupported depth, and an error only when the framework folder is
/// malformed.
pub fn parse_analyzer_reference(
    content_root: &Path,
    relative_path: &str,
) -> Result<Option<AnalyzerReference>, FrameworkParseError> {
    let path = normalize_separators(relative_path);
    let Some(rest) = strip_root(&path) else {
        return Ok(None);
    };

    let segments: Vec<&str> = rest.split('/').collect();
    let (framework, runtime_identifier, language) = match segments.as_slice() {
        [_] => (None, None, None),
        [framework, _] => (Some(*framework), None, None),
        [framework, language, _] => (Some(*framework), None, Some(*language)),
        [framework, rid, language, _] => (Some(*framework), Some(*rid), Some(*language)),
        _ => return Ok(None),
    };

    let framework = framework.map(FrameworkSpecifier::parse).transpose()?;

    Ok(Some(AnalyzerReference {
        assembly_path: content_root.join(&path),
        framework,
        language: language.map(str::to_string),
        runtime_identifier: runtime_identifier.map(str::to_string),
    }))
}

fn strip_root(path: &str) -> Option<&str> {
    let head = path.get(..ANALYZERS_ROOT.len())?;
    head.eq_ignore_ascii_case(ANALYZERS_ROOT)
        .then(|| &path[ANALYZERS_ROOT.len()..])
}
