//! Package folder conventions
//!
//! Classifies files listed in a package by the folder they live in:
//! `shared/` holds source files compiled into the consumer, `analyzers/`
//! holds analyzer plugins. Matching is done with a prebuilt glob set so the
//! patterns are compiled once per export pass.

use globset::{Glob, GlobBuilder, GlobMatcher};

use crate::asset::normalize_separators;

/// Files shared as source with the consuming project
pub const SHARED_SOURCES_PATTERN: &str = "shared/**";

/// Analyzer plugins at any depth below the analyzers root
pub const ANALYZERS_PATTERN: &str = "analyzers/**/*.dll";

/// Compiled matchers for the package folder conventions
#[derive(Debug, Clone)]
pub struct PackageLayout {
    shared: GlobMatcher,
    analyzers: GlobMatcher,
}

impl PackageLayout {
    pub fn new() -> Result<Self, globset::Error> {
        Ok(Self {
            shared: build_glob_matcher(SHARED_SOURCES_PATTERN, false)?,
            analyzers: build_glob_matcher(ANALYZERS_PATTERN, true)?,
        })
    }

    /// Whether a package file is a shared source file
    pub fn is_shared_source(&self, relative_path: &str) -> bool {
        self.shared.is_match(normalize_separators(relative_path))
    }

    /// Whether a package file is an analyzer plugin
    pub fn is_analyzer(&self, relative_path: &str) -> bool {
        self.analyzers.is_match(normalize_separators(relative_path))
    }
}

/// Build a matcher where `*` never crosses a `/`
fn build_glob_matcher(pattern: &str, case_insensitive: bool) -> Result<GlobMatcher, globset::Error> {
    let glob: Glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .case_insensitive(case_insensitive)
        .build()?;
    Ok(glob.compile_matcher())
}
