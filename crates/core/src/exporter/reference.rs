//! Exports for assemblies supplied by the target framework
//!
//! The runtime already provides these, so they only ever contribute a
//! compile-time reference.

use crate::asset::Asset;
use crate::export::LibraryExport;
use crate::library::{FrameworkReferenceData, LibraryIdentity};

pub(crate) fn export_framework_reference(
    identity: &LibraryIdentity,
    reference: &FrameworkReferenceData,
) -> LibraryExport {
    let mut export = LibraryExport::empty(identity.clone());
    if let Some(path) = reference.path.as_deref().filter(|p| !p.is_empty()) {
        export
            .compile_assemblies
            .push(Asset::new(identity.name.clone(), Some(path.to_string()), path));
    }
    export
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::LibraryKind;
    use std::path::PathBuf;

    fn identity() -> LibraryIdentity {
        LibraryIdentity::new("System.Xml", LibraryKind::FrameworkReference)
    }

    #[test]
    fn test_path_yields_single_compile_asset() {
        let reference = FrameworkReferenceData {
            path: Some("/ref/net45/System.Xml.dll".to_string()),
        };

        let export = export_framework_reference(&identity(), &reference);

        assert_eq!(export.compile_assemblies.len(), 1);
        let asset = &export.compile_assemblies[0];
        assert_eq!(asset.name, "System.Xml");
        assert_eq!(asset.relative_path.as_deref(), Some("/ref/net45/System.Xml.dll"));
        assert_eq!(asset.resolved_path, PathBuf::from("/ref/net45/System.Xml.dll"));

        let mut rest = export.clone();
        rest.compile_assemblies.clear();
        assert!(rest.is_empty());
    }

    #[test]
    fn test_missing_or_empty_path_yields_nothing() {
        let none = export_framework_reference(&identity(), &FrameworkReferenceData { path: None });
        let empty = export_framework_reference(
            &identity(),
            &FrameworkReferenceData {
                path: Some(String::new()),
            },
        );

        assert!(none.is_empty());
        assert!(empty.is_empty());
    }
}
