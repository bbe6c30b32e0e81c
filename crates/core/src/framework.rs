//! Target framework specifiers
//!
//! Parses the short folder names used inside packages (`net45`,
//! `netstandard2.0`, `portable-net45+win8`, ...) into a structured
//! [`FrameworkSpecifier`].
//!
//! # Version forms
//!
//! - Dotted versions parse component-wise: `net6.0` → 6.0
//! - Undotted digit runs parse one digit per component: `net451` → 4.5.1
//!
//! At most four components are accepted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const NET_FRAMEWORK: &str = ".NETFramework";
pub const NET_CORE_APP: &str = ".NETCoreApp";
pub const NET_STANDARD: &str = ".NETStandard";
pub const NET_PORTABLE: &str = ".NETPortable";
pub const DNX: &str = "DNX";
pub const DNX_CORE: &str = "DNXCore";
pub const UAP: &str = "UAP";

/// Short-name to identifier table. `net` is handled separately because its
/// meaning depends on the version.
const KNOWN_IDENTIFIERS: &[(&str, &str)] = &[
    ("netstandard", NET_STANDARD),
    ("netcoreapp", NET_CORE_APP),
    ("dnxcore", DNX_CORE),
    ("dnx", DNX),
    ("uap", UAP),
];

/// Errors produced when a framework folder name is malformed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameworkParseError {
    #[error("framework specifier is empty")]
    Empty,

    #[error("framework specifier '{0}' has no identifier")]
    MissingIdentifier(String),

    #[error("framework specifier '{0}' has an invalid version")]
    InvalidVersion(String),

    #[error("framework specifier '{0}' has more than four version components")]
    TooManyComponents(String),

    #[error("portable framework specifier '{0}' has no profile")]
    MissingProfile(String),
}

/// Four-part framework version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameworkVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub revision: u32,
}

impl FrameworkVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            ..Self::default()
        }
    }

    fn from_components(components: &[u32]) -> Self {
        let at = |i: usize| components.get(i).copied().unwrap_or(0);
        Self {
            major: at(0),
            minor: at(1),
            build: at(2),
            revision: at(3),
        }
    }

    /// Components with trailing zeros trimmed, keeping at least `min`
    fn significant(&self, min: usize) -> Vec<u32> {
        let mut parts = vec![self.major, self.minor, self.build, self.revision];
        while parts.len() > min && parts.last() == Some(&0) {
            parts.pop();
        }
        parts
    }
}

/// A parsed target framework
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameworkSpecifier {
    /// Long identifier (e.g. `.NETFramework`), or the short name verbatim
    /// when it is not a known one
    pub identifier: String,
    /// `None` when the folder name carried no version (`dotnet`, `netstandard`)
    pub version: Option<FrameworkVersion>,
    pub profile: Option<String>,
}

impl FrameworkSpecifier {
    pub fn new(identifier: impl Into<String>, version: FrameworkVersion) -> Self {
        Self {
            identifier: identifier.into(),
            version: Some(version),
            profile: None,
        }
    }

    /// Parse a short folder name such as `net45` or `netstandard2.0`
    pub fn parse(input: &str) -> Result<Self, FrameworkParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(FrameworkParseError::Empty);
        }

        if let Some(profile) = strip_prefix_ignore_case(trimmed, "portable-") {
            if profile.is_empty() {
                return Err(FrameworkParseError::MissingProfile(input.to_string()));
            }
            return Ok(Self {
                identifier: NET_PORTABLE.to_string(),
                version: None,
                profile: Some(profile.to_string()),
            });
        }

        let split = trimmed
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(trimmed.len());
        let (short_name, rest) = trimmed.split_at(split);
        if short_name.is_empty() {
            return Err(FrameworkParseError::MissingIdentifier(input.to_string()));
        }

        let (version_part, profile) = match rest.split_once('-') {
            Some((_, "")) => return Err(FrameworkParseError::InvalidVersion(input.to_string())),
            Some((version, profile)) => (version, Some(profile.to_string())),
            None => (rest, None),
        };

        let components = parse_version_components(version_part, input)?;
        let version = (!components.is_empty()).then(|| FrameworkVersion::from_components(&components));

        Ok(Self {
            identifier: long_identifier(short_name, version.as_ref()),
            version,
            profile,
        })
    }

    fn major(&self) -> u32 {
        self.version.map_or(0, |version| version.major)
    }

    fn short_name(&self) -> &str {
        if self.identifier == NET_FRAMEWORK || (self.identifier == NET_CORE_APP && self.major() >= 5) {
            return "net";
        }
        KNOWN_IDENTIFIERS
            .iter()
            .find(|(_, long)| *long == self.identifier)
            .map(|(short, _)| *short)
            .unwrap_or(self.identifier.as_str())
    }
}

impl FromStr for FrameworkSpecifier {
    type Err = FrameworkParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FrameworkSpecifier {
    /// Renders the short folder form (`net45`, `netstandard2.0`)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.identifier == NET_PORTABLE {
            return write!(f, "portable-{}", self.profile.as_deref().unwrap_or_default());
        }

        write!(f, "{}", self.short_name())?;
        if let Some(version) = &self.version {
            let parts = version.significant(2);
            let dotted = self.identifier == NET_STANDARD
                || self.identifier == NET_CORE_APP
                || parts.iter().any(|p| *p > 9);
            if dotted {
                let joined = parts.iter().map(u32::to_string).collect::<Vec<_>>().join(".");
                write!(f, "{}", joined)?;
            } else {
                for part in parts {
                    write!(f, "{}", part)?;
                }
            }
        }
        if let Some(profile) = &self.profile {
            write!(f, "-{}", profile)?;
        }
        Ok(())
    }
}

fn parse_version_components(version: &str, input: &str) -> Result<Vec<u32>, FrameworkParseError> {
    if version.is_empty() {
        return Ok(Vec::new());
    }

    let invalid = || FrameworkParseError::InvalidVersion(input.to_string());

    let components: Vec<u32> = if version.contains('.') {
        version
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                part.parse::<u32>().map_err(|_| invalid())
            })
            .collect::<Result<_, _>>()?
    } else {
        version
            .chars()
            .map(|c| c.to_digit(10).ok_or_else(invalid))
            .collect::<Result<_, _>>()?
    };

    if components.len() > 4 {
        return Err(FrameworkParseError::TooManyComponents(input.to_string()));
    }
    Ok(components)
}

fn long_identifier(short_name: &str, version: Option<&FrameworkVersion>) -> String {
    let lower = short_name.to_ascii_lowercase();
    if lower == "net" {
        let major = version.map_or(0, |version| version.major);
        let long = if major >= 5 { NET_CORE_APP } else { NET_FRAMEWORK };
        return long.to_string();
    }
    KNOWN_IDENTIFIERS
        .iter()
        .find(|(short, _)| *short == lower)
        .map(|(_, long)| long.to_string())
        .unwrap_or_else(|| short_name.to_string())
}

fn strip_prefix_ignore_case<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    let head = input.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &input[prefix.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact_version() {
        let fx = FrameworkSpecifier::parse("net45").unwrap();
        assert_eq!(fx.identifier, NET_FRAMEWORK);
        assert_eq!(fx.version, Some(FrameworkVersion::new(4, 5)));
        assert!(fx.profile.is_none());

        let fx = FrameworkSpecifier::parse("net451").unwrap();
        assert_eq!(fx.version.map(|v| v.build), Some(1));
    }

    #[test]
    fn test_parse_dotted_version() {
        let fx = FrameworkSpecifier::parse("netstandard2.0").unwrap();
        assert_eq!(fx.identifier, NET_STANDARD);
        assert_eq!(fx.version, Some(FrameworkVersion::new(2, 0)));

        let fx = FrameworkSpecifier::parse("netcoreapp3.1").unwrap();
        assert_eq!(fx.identifier, NET_CORE_APP);
        assert_eq!(fx.version, Some(FrameworkVersion::new(3, 1)));
    }

    #[test]
    fn test_net5_and_later_is_core() {
        let fx = FrameworkSpecifier::parse("net6.0").unwrap();
        assert_eq!(fx.identifier, NET_CORE_APP);
        assert_eq!(fx.to_string(), "net6.0");
    }

    #[test]
    fn test_parse_dnxcore_and_profile() {
        let fx = FrameworkSpecifier::parse("dnxcore50").unwrap();
        assert_eq!(fx.identifier, DNX_CORE);
        assert_eq!(fx.version, Some(FrameworkVersion::new(5, 0)));

        let fx = FrameworkSpecifier::parse("net40-client").unwrap();
        assert_eq!(fx.profile.as_deref(), Some("client"));
        assert_eq!(fx.to_string(), "net40-client");
    }

    #[test]
    fn test_parse_portable() {
        let fx = FrameworkSpecifier::parse("portable-net45+win8").unwrap();
        assert_eq!(fx.identifier, NET_PORTABLE);
        assert_eq!(fx.profile.as_deref(), Some("net45+win8"));
        assert_eq!(fx.to_string(), "portable-net45+win8");
    }

    #[test]
    fn test_unknown_identifier_kept_verbatim() {
        let fx = FrameworkSpecifier::parse("tizen40").unwrap();
        assert_eq!(fx.identifier, "tizen");
        assert_eq!(fx.to_string(), "tizen40");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(FrameworkSpecifier::parse(""), Err(FrameworkParseError::Empty));
        assert!(matches!(
            FrameworkSpecifier::parse("45"),
            Err(FrameworkParseError::MissingIdentifier(_))
        ));
        assert!(matches!(
            FrameworkSpecifier::parse("net4x"),
            Err(FrameworkParseError::InvalidVersion(_))
        ));
        assert!(matches!(
            FrameworkSpecifier::parse("net4..5"),
            Err(FrameworkParseError::InvalidVersion(_))
        ));
        assert!(matches!(
            FrameworkSpecifier::parse("net12345"),
            Err(FrameworkParseError::TooManyComponents(_))
        ));
        assert!(matches!(
            FrameworkSpecifier::parse("portable-"),
            Err(FrameworkParseError::MissingProfile(_))
        ));
    }

    #[test]
    fn test_versionless_name_has_no_version() {
        let fx = FrameworkSpecifier::parse("dotnet").unwrap();
        assert_eq!(fx.identifier, "dotnet");
        assert!(fx.version.is_none());

        let fx = FrameworkSpecifier::parse("netstandard").unwrap();
        assert_eq!(fx.identifier, NET_STANDARD);
        assert!(fx.version.is_none());
        assert_eq!(fx.to_string(), "netstandard");

    }

    #[test]
    fn test_display_round_trips_short_names() {
        for name in [
            "net45",
            "net462",
            "netstandard1.3",
            "netcoreapp2.1",
            "dnx451",
            "dotnet",
            "netstandard",
            "net",
        ] {
            let fx: FrameworkSpecifier = name.parse().unwrap();
            assert_eq!(fx.to_string(), name);
        }
    }
}
