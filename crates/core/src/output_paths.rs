//! Output layout of projects that compile from source
//!
//! The exporter never touches the file system; it asks an
//! [`OutputPathCalculator`] where a project's build outputs will land.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::ExportConfig;
use crate::library::ProjectData;

/// Where a project's build places its outputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPaths {
    /// The main assembly
    pub assembly_path: PathBuf,
    /// Every output file, including the assembly
    pub all_output_paths: Vec<PathBuf>,
    /// Directory relative paths of runtime assets are computed from
    pub base_path: PathBuf,
}

/// Computes output paths for a project under the active build settings
pub trait OutputPathCalculator: Send + Sync {
    fn output_paths(&self, name: &str, project: &ProjectData, config: &ExportConfig) -> OutputPaths;
}

impl<F> OutputPathCalculator for F
where
    F: Fn(&str, &ProjectData, &ExportConfig) -> OutputPaths + Send + Sync,
{
    fn output_paths(&self, name: &str, project: &ProjectData, config: &ExportConfig) -> OutputPaths {
        self(name, project, config)
    }
}

/// `bin/{configuration}[/{runtime}]` layout
///
/// With a build base path the tree is rooted at `{build_base_path}/{name}`,
/// otherwise at the project directory. The solution root does not affect
/// this layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalOutputPaths;

impl OutputPathCalculator for ConventionalOutputPaths {
    fn output_paths(&self, name: &str, project: &ProjectData, config: &ExportConfig) -> OutputPaths {
        let root = match &config.build_base_path {
            Some(build_base) => build_base.join(name),
            None => project.project_directory.clone(),
        };

        let mut base_path = root.join("bin").join(&config.configuration);
        if let Some(rid) = &config.runtime_identifier {
            base_path.push(rid);
        }

        let assembly_path = base_path.join(format!("{}.dll", name));
        let mut all_output_paths = vec![
            assembly_path.clone(),
            base_path.join(format!("{}.pdb", name)),
        ];
        if project.executable {
            all_output_paths.push(base_path.join(format!("{}.deps.json", name)));
        }

        OutputPaths {
            assembly_path,
            all_output_paths,
            base_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(dir: &str) -> ProjectData {
        ProjectData {
            project_directory: PathBuf::from(dir),
            source_files: vec![PathBuf::from("Class1.cs")],
            ..ProjectData::default()
        }
    }

    #[test]
    fn test_in_place_layout() {
        let paths = ConventionalOutputPaths.output_paths(
            "Lib",
            &project("/src/Lib"),
            &ExportConfig::new("Release"),
        );

        assert_eq!(paths.base_path, PathBuf::from("/src/Lib/bin/Release"));
        assert_eq!(paths.assembly_path, PathBuf::from("/src/Lib/bin/Release/Lib.dll"));
        assert_eq!(
            paths.all_output_paths,
            vec![
                PathBuf::from("/src/Lib/bin/Release/Lib.dll"),
                PathBuf::from("/src/Lib/bin/Release/Lib.pdb"),
            ]
        );
    }

    #[test]
    fn test_build_base_and_runtime() {
        let config = ExportConfig::new("Debug")
            .with_build_base_path("/out")
            .with_runtime_identifier("win-x64");
        let mut app = project("/src/App");
        app.executable = true;

        let paths = ConventionalOutputPaths.output_paths("App", &app, &config);

        assert_eq!(paths.base_path, PathBuf::from("/out/App/bin/Debug/win-x64"));
        assert_eq!(paths.all_output_paths.len(), 3);
        assert!(paths.all_output_paths[2].ends_with("App.deps.json"));
    }

    #[test]
    fn test_closure_calculator() {
        let calculator = |name: &str, _: &ProjectData, _: &ExportConfig| OutputPaths {
            assembly_path: PathBuf::from(format!("/fixed/{}.dll", name)),
            all_output_paths: vec![],
            base_path: PathBuf::from("/fixed"),
        };

        let paths = calculator.output_paths("X", &project("/x"), &ExportConfig::default());
        assert_eq!(paths.assembly_path, PathBuf::from("/fixed/X.dll"));
    }
}
