//! Resolution settings shared by every export in one pass

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ExportError, Result};

/// Build settings an export pass is computed for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Build configuration, e.g. `Debug` or `Release`. Required.
    pub configuration: String,
    /// Root of a shared output tree, when projects do not build in place
    pub build_base_path: Option<PathBuf>,
    pub solution_root_path: Option<PathBuf>,
    /// Runtime identifier such as `win-x64`, for runtime-specific outputs
    pub runtime_identifier: Option<String>,
}

impl ExportConfig {
    pub fn new(configuration: impl Into<String>) -> Self {
        Self {
            configuration: configuration.into(),
            ..Self::default()
        }
    }

    pub fn with_runtime_identifier(mut self, runtime_identifier: impl Into<String>) -> Self {
        self.runtime_identifier = Some(runtime_identifier.into());
        self
    }

    pub fn with_build_base_path(mut self, build_base_path: impl Into<PathBuf>) -> Self {
        self.build_base_path = Some(build_base_path.into());
        self
    }

    pub fn with_solution_root_path(mut self, solution_root_path: impl Into<PathBuf>) -> Self {
        self.solution_root_path = Some(solution_root_path.into());
        self
    }

    /// Check the preconditions of an export pass
    pub fn validate(&self) -> Result<()> {
        if self.configuration.trim().is_empty() {
            return Err(ExportError::MissingConfiguration);
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            configuration: "Debug".to_string(),
            build_base_path: None,
            solution_root_path: None,
            runtime_identifier: None,
        }
    }
}
