//! Exports for projects built alongside the consumer
//!
//! A project contributes either a precompiled assembly it points at, or the
//! outputs of its own build. Projects do not distinguish reference and
//! implementation assemblies, so runtime assemblies mirror compile
//! assemblies.

use std::path::{Component, Path, PathBuf};

use crate::asset::Asset;
use crate::config::ExportConfig;
use crate::export::LibraryExport;
use crate::library::{LibraryIdentity, ProjectData};
use crate::output_paths::{OutputPathCalculator, OutputPaths};

/// Placeholder replaced with the active configuration in precompiled paths
pub const CONFIGURATION_TOKEN: &str = "{configuration}";

/// Extension of the debug symbols emitted next to an assembly
const SYMBOLS_EXTENSION: &str = "pdb";

pub(crate) fn export_project(
    identity: &LibraryIdentity,
    project: &ProjectData,
    config: &ExportConfig,
    output_paths: &dyn OutputPathCalculator,
) -> LibraryExport {
    let mut export = LibraryExport::empty(identity.clone());

    if let Some(assembly_path) = precompiled_assembly(project) {
        let assembly = resolve_precompiled(&project.project_directory, assembly_path, config);
        let symbols = assembly.with_extension(SYMBOLS_EXTENSION);

        export
            .compile_assemblies
            .push(Asset::from_absolute(&project.project_directory, &assembly));
        export
            .runtime_assets
            .push(Asset::from_absolute(&project.project_directory, &symbols));
    } else if project.compiles_from_source() {
        let outputs = match &project.outputs {
            Some(outputs) => outputs.clone(),
            None => output_paths.output_paths(&identity.name, project, config),
        };
        let OutputPaths {
            assembly_path,
            all_output_paths,
            base_path,
        } = outputs;

        export
            .compile_assemblies
            .push(Asset::from_absolute(&base_path, &assembly_path));
        export.runtime_assets = all_output_paths
            .iter()
            .filter(|path| **path != assembly_path)
            .map(|path| Asset::from_absolute(&base_path, path))
            .collect();
    }

    export.runtime_assemblies = export.compile_assemblies.clone();
    export.source_references = project
        .shared_files
        .iter()
        .map(|file| project.project_directory.join(file))
        .collect();

    export
}

fn precompiled_assembly(project: &ProjectData) -> Option<&str> {
    project
        .assembly_path
        .as_deref()
        .filter(|path| !path.trim().is_empty())
}

fn resolve_precompiled(project_directory: &Path, assembly_path: &str, config: &ExportConfig) -> PathBuf {
    let substituted = assembly_path
        .replace(CONFIGURATION_TOKEN, &config.configuration)
        .replace('\\', "/");
    normalize(&project_directory.join(substituted))
}

/// Fold `.` and `..` components without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = normalized.components().next_back();
                let named = matches!(last, Some(Component::Normal(_)));
                // `..` above the root stays at the root
                let rooted = matches!(last, Some(Component::RootDir | Component::Prefix(_)));
                if named {
                    normalized.pop();
                } else if !rooted {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
