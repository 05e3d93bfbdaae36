//! Property kinds.
//!
//! [`PropertyKind`] is the closed set of tags a declared property can carry.
//! [`SpecKind`] is the subset that produces a [`DeclaredPropertySpec`]; the
//! remaining kinds (`Internal`, `Nested`) never reach the visitor as a spec.
//!
//! [`DeclaredPropertySpec`]: crate::DeclaredPropertySpec

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The declared kind of a task property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyKind {
    /// A plain (non-file) input value
    Input,
    /// A single input file
    InputFile,
    /// A collection of input files
    InputFiles,
    /// An input directory tree
    InputDirectory,
    /// A single output file
    OutputFile,
    /// Several output files
    OutputFiles,
    /// A single output directory
    OutputDirectory,
    /// Several output directories
    OutputDirectories,
    /// Files the task deletes
    Destroys,
    /// Files the task keeps between runs without publishing them
    LocalState,
    /// Not tracked for staleness
    Internal,
    /// An object with its own declared properties
    Nested,
}

impl PropertyKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Input,
        Self::InputFile,
        Self::InputFiles,
        Self::InputDirectory,
        Self::OutputFile,
        Self::OutputFiles,
        Self::OutputDirectory,
        Self::OutputDirectories,
        Self::Destroys,
        Self::LocalState,
        Self::Internal,
        Self::Nested,
    ];

    /// Stable kebab-case name used in declarations and messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::InputFile => "input-file",
            Self::InputFiles => "input-files",
            Self::InputDirectory => "input-directory",
            Self::OutputFile => "output-file",
            Self::OutputFiles => "output-files",
            Self::OutputDirectory => "output-directory",
            Self::OutputDirectories => "output-directories",
            Self::Destroys => "destroys",
            Self::LocalState => "local-state",
            Self::Internal => "internal",
            Self::Nested => "nested",
        }
    }

    /// The spec shape this kind produces, if any.
    #[must_use]
    pub const fn spec_kind(self) -> Option<SpecKind> {
        match self {
            Self::Input => Some(SpecKind::Input),
            Self::InputFile => Some(SpecKind::InputFile),
            Self::InputFiles => Some(SpecKind::InputFiles),
            Self::InputDirectory => Some(SpecKind::InputDirectory),
            Self::OutputFile => Some(SpecKind::OutputFile),
            Self::OutputFiles => Some(SpecKind::OutputFiles),
            Self::OutputDirectory => Some(SpecKind::OutputDirectory),
            Self::OutputDirectories => Some(SpecKind::OutputDirectories),
            Self::Destroys => Some(SpecKind::Destroys),
            Self::LocalState => Some(SpecKind::LocalState),
            Self::Internal | Self::Nested => None,
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| crate::Error::configuration(format!("Unknown property kind '{s}'")))
    }
}

/// The shape of a finished spec, used to pick the visitor callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecKind {
    /// Plain input value
    Input,
    /// Single input file
    InputFile,
    /// Input file collection
    InputFiles,
    /// Input directory
    InputDirectory,
    /// Single output file
    OutputFile,
    /// Several output files
    OutputFiles,
    /// Single output directory
    OutputDirectory,
    /// Several output directories
    OutputDirectories,
    /// Destroyed files
    Destroys,
    /// Local state files
    LocalState,
}

impl SpecKind {
    /// Whether this spec describes something the task produces.
    #[must_use]
    pub const fn is_output(self) -> bool {
        matches!(
            self,
            Self::OutputFile | Self::OutputFiles | Self::OutputDirectory | Self::OutputDirectories
        )
    }

    /// Whether this spec describes something the task consumes.
    #[must_use]
    pub const fn is_input(self) -> bool {
        matches!(
            self,
            Self::Input | Self::InputFile | Self::InputFiles | Self::InputDirectory
        )
    }

    /// Whether the spec's value is made of paths.
    #[must_use]
    pub const fn is_file(self) -> bool {
        !matches!(self, Self::Input)
    }
}

impl From<SpecKind> for PropertyKind {
    fn from(kind: SpecKind) -> Self {
        match kind {
            SpecKind::Input => Self::Input,
            SpecKind::InputFile => Self::InputFile,
            SpecKind::InputFiles => Self::InputFiles,
            SpecKind::InputDirectory => Self::InputDirectory,
            SpecKind::OutputFile => Self::OutputFile,
            SpecKind::OutputFiles => Self::OutputFiles,
            SpecKind::OutputDirectory => Self::OutputDirectory,
            SpecKind::OutputDirectories => Self::OutputDirectories,
            SpecKind::Destroys => Self::Destroys,
            SpecKind::LocalState => Self::LocalState,
        }
    }
}

impl fmt::Display for SpecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        PropertyKind::from(*self).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_from_str() {
        for kind in PropertyKind::ALL {
            assert_eq!(kind.as_str().parse::<PropertyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = "output-dir".parse::<PropertyKind>().unwrap_err();
        assert!(err.to_string().contains("output-dir"));
    }

    #[test]
    fn test_only_internal_and_nested_lack_a_spec() {
        let without: Vec<_> = PropertyKind::ALL
            .into_iter()
            .filter(|k| k.spec_kind().is_none())
            .collect();
        assert_eq!(without, vec![PropertyKind::Internal, PropertyKind::Nested]);
    }

    #[test]
    fn test_spec_kind_maps_back() {
        for kind in PropertyKind::ALL {
            if let Some(spec) = kind.spec_kind() {
                assert_eq!(PropertyKind::from(spec), kind);
            }
        }
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&PropertyKind::OutputDirectories).unwrap();
        assert_eq!(json, "\"output-directories\"");
    }
}
