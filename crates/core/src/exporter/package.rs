//! Exports for restored packages

use std::path::Path;
use tracing::{trace, warn};

use crate::analyzer::parse_analyzer_reference;
use crate::asset::{normalize_separators, Asset};
use crate::export::LibraryExport;
use crate::layout::PackageLayout;
use crate::library::{LibraryIdentity, PackageData};

/// Export a package from its lock-file sections and file list
///
/// Packages never contribute loose runtime assets.
pub(crate) fn export_package(
    identity: &LibraryIdentity,
    package: &PackageData,
    layout: &PackageLayout,
) -> LibraryExport {
    let root = package.content_root.as_path();

    let mut export = LibraryExport::empty(identity.clone());
    export.native_libraries = to_assets(root, &package.native_libraries);
    export.runtime_assemblies = to_assets(root, &package.runtime_assemblies);
    export.compile_assemblies = to_assets(root, &package.compile_assemblies);

    export.source_references = package
        .files
        .iter()
        .filter(|file| layout.is_shared_source(file))
        .map(|file| root.join(normalize_separators(file)))
        .collect();

    for file in package.files.iter().filter(|file| layout.is_analyzer(file)) {
        match parse_analyzer_reference(root, file) {
            Ok(Some(reference)) => export.analyzer_references.push(reference),
            Ok(None) => {
                trace!(library = %identity.name, path = %file, "analyzer path has unsupported depth");
            }
            Err(err) => {
                warn!(library = %identity.name, path = %file, error = %err, "dropping analyzer reference");
            }
        }
    }

    export
}

fn to_assets(root: &Path, entries: &[String]) -> Vec<Asset> {
    entries
        .iter()
        .map(|entry| Asset::from_relative(root, entry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::LibraryKind;
    use std::path::PathBuf;

    fn identity() -> LibraryIdentity {
        LibraryIdentity::new("Contoso.Lib", LibraryKind::Package)
    }

    fn package() -> PackageData {
        PackageData {
            content_root: PathBuf::from("/packages/contoso.lib/2.0.0"),
            files: vec![
                "lib/net45/Contoso.Lib.dll".to_string(),
                "ref/net45/Contoso.Lib.dll".to_string(),
                "shared/Helpers.cs".to_string(),
                "shared/Interop/Native.cs".to_string(),
                "analyzers/dotnet/cs/Contoso.Analyzers.dll".to_string(),
                "analyzers/45/cs/Broken.Analyzers.dll".to_string(),
                "analyzers/a/b/c/d/TooDeep.dll".to_string(),
                "analyzers/readme.md".to_string(),
                "runtimes/linux-x64/native/libcontoso.so".to_string(),
            ],
            native_libraries: vec!["runtimes/linux-x64/native/libcontoso.so".to_string()],
            runtime_assemblies: vec!["lib/net45/Contoso.Lib.dll".to_string()],
            compile_assemblies: vec!["ref/net45/Contoso.Lib.dll".to_string()],
        }
    }

    #[test]
    fn test_lock_file_sections_become_assets() {
        let layout = PackageLayout::new().unwrap();
        let export = export_package(&identity(), &package(), &layout);

        assert_eq!(export.compile_assemblies.len(), 1);
        assert_eq!(export.compile_assemblies[0].name, "Contoso.Lib");
        assert_eq!(
            export.compile_assemblies[0].relative_path.as_deref(),
            Some("ref/net45/Contoso.Lib.dll")
        );
        assert_eq!(
            export.runtime_assemblies[0].resolved_path,
            PathBuf::from("/packages/contoso.lib/2.0.0/lib/net45/Contoso.Lib.dll")
        );
        assert_eq!(export.native_libraries[0].name, "libcontoso");
        assert!(export.runtime_assets.is_empty());
    }

    #[test]
    fn test_shared_sources_are_resolved() {
        let layout = PackageLayout::new().unwrap();
        let export = export_package(&identity(), &package(), &layout);

        assert_eq!(
            export.source_references,
            vec![
                PathBuf::from("/packages/contoso.lib/2.0.0/shared/Helpers.cs"),
                PathBuf::from("/packages/contoso.lib/2.0.0/shared/Interop/Native.cs"),
            ]
        );
    }

    #[test]
    fn test_bad_and_deep_analyzers_dropped() {
        let layout = PackageLayout::new().unwrap();
        let export = export_package(&identity(), &package(), &layout);

        // Only the well-formed 3-segment analyzer survives
        assert_eq!(export.analyzer_references.len(), 1);
        let reference = &export.analyzer_references[0];
        assert!(reference.assembly_path.ends_with("Contoso.Analyzers.dll"));
        assert_eq!(reference.language.as_deref(), Some("cs"));
    }

    #[test]
    fn test_empty_package() {
        let layout = PackageLayout::new().unwrap();
        let export = export_package(&identity(), &PackageData::default(), &layout);

        assert!(export.is_empty());
    }
}
