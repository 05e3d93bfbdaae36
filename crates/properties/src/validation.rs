//! Deferred validation of spec values.
//!
//! Nothing in this module runs during classification. The staleness engine
//! calls [`DeclaredPropertySpec::validate`](crate::DeclaredPropertySpec::validate)
//! once it actually needs a task's values.

use crate::value::PropertyValue;
use crate::{Error, Result, SpecKind};
use std::path::Path;

/// Outcome of validating one property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The value satisfies its constraints
    Valid,
    /// A required value is absent
    MissingRequiredValue,
    /// The value is present but unusable
    InvalidValue(String),
}

impl ValidationResult {
    /// Whether validation passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Convert into an error naming `property`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingRequiredValue`] or [`Error::InvalidValue`]
    /// for the corresponding failures.
    pub fn into_result(self, property: &str) -> Result<()> {
        match self {
            Self::Valid => Ok(()),
            Self::MissingRequiredValue => Err(Error::missing_value(property)),
            Self::InvalidValue(reason) => Err(Error::invalid_value(property, reason)),
        }
    }
}

/// Check a present value against the constraints of its spec kind.
pub(crate) fn check_value(kind: SpecKind, value: &PropertyValue) -> std::result::Result<(), String> {
    if kind == SpecKind::Input {
        return match value {
            PropertyValue::Bean(_) => Err("a nested bean cannot be used as an input value".into()),
            _ => Ok(()),
        };
    }

    let Some(paths) = value.file_paths() else {
        return Err(format!(
            "expected a file location but got a {}",
            value.type_name()
        ));
    };

    let single = matches!(
        kind,
        SpecKind::InputFile | SpecKind::InputDirectory | SpecKind::OutputFile | SpecKind::OutputDirectory
    );
    if single && !matches!(value, PropertyValue::Path(_)) {
        return Err(format!("expected a single location but got a {}", value.type_name()));
    }

    for path in paths {
        check_path(kind, path)?;
    }
    Ok(())
}

fn check_path(kind: SpecKind, path: &Path) -> std::result::Result<(), String> {
    match kind {
        SpecKind::InputFile => {
            if !path.exists() {
                Err(format!("file '{}' does not exist", path.display()))
            } else if !path.is_file() {
                Err(format!("file '{}' is not a file", path.display()))
            } else {
                Ok(())
            }
        }
        SpecKind::InputDirectory => {
            if !path.exists() {
                Err(format!("directory '{}' does not exist", path.display()))
            } else if !path.is_dir() {
                Err(format!("directory '{}' is not a directory", path.display()))
            } else {
                Ok(())
            }
        }
        SpecKind::OutputFile | SpecKind::OutputFiles if path.is_dir() => Err(format!(
            "cannot write to file '{}' because it is a directory",
            path.display()
        )),
        SpecKind::OutputDirectory | SpecKind::OutputDirectories if path.is_file() => Err(format!(
            "directory '{}' exists but is a file",
            path.display()
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_into_result_names_property() {
        assert!(ValidationResult::Valid.into_result("a").is_ok());
        assert_eq!(
            ValidationResult::MissingRequiredValue.into_result("config.path"),
            Err(Error::missing_value("config.path"))
        );
        let err = ValidationResult::InvalidValue("bad".into())
            .into_result("out")
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for property 'out': bad");
    }

    #[test]
    fn test_input_file_must_exist_and_be_a_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("in.txt");
        fs::write(&file, "x").unwrap();

        assert!(check_value(SpecKind::InputFile, &PropertyValue::path(&file)).is_ok());
        let missing = check_value(SpecKind::InputFile, &PropertyValue::path(tmp.path().join("nope")));
        assert!(missing.unwrap_err().contains("does not exist"));
        let dir = check_value(SpecKind::InputFile, &PropertyValue::path(tmp.path()));
        assert!(dir.unwrap_err().contains("is not a file"));
    }

    #[test]
    fn test_input_directory_must_be_a_directory() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("f");
        fs::write(&file, "x").unwrap();

        assert!(check_value(SpecKind::InputDirectory, &PropertyValue::path(tmp.path())).is_ok());
        assert!(check_value(SpecKind::InputDirectory, &PropertyValue::path(&file)).is_err());
    }

    #[test]
    fn test_outputs_reject_the_wrong_file_type() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("f");
        fs::write(&file, "x").unwrap();

        assert!(check_value(SpecKind::OutputFile, &PropertyValue::path(tmp.path())).is_err());
        assert!(check_value(SpecKind::OutputDirectory, &PropertyValue::path(&file)).is_err());
        assert!(
            check_value(
                SpecKind::OutputDirectories,
                &PropertyValue::paths([tmp.path().join("a"), file.clone()])
            )
            .is_err()
        );
        // Outputs need not exist yet.
        assert!(check_value(SpecKind::OutputFile, &PropertyValue::path(tmp.path().join("new"))).is_ok());
    }

    #[test]
    fn test_single_location_kinds_reject_lists() {
        let result = check_value(SpecKind::OutputFile, &PropertyValue::paths(["a", "b"]));
        assert!(result.unwrap_err().contains("single location"));
        assert!(check_value(SpecKind::InputFiles, &PropertyValue::paths(["a", "b"])).is_ok());
    }

    #[test]
    fn test_file_kinds_reject_scalars_and_input_rejects_beans() {
        assert!(check_value(SpecKind::Destroys, &PropertyValue::scalar(3)).is_err());
        assert!(check_value(SpecKind::Input, &PropertyValue::scalar(3)).is_ok());

        let bean = PropertyValue::Bean(Arc::new(crate::DeclaredBean::new("Empty")));
        assert!(check_value(SpecKind::Input, &bean).is_err());
    }
}
