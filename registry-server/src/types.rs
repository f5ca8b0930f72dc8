//! Strong type definitions for registry identifiers
//!
//! Type-safe wrappers around package names and version numbers so a
//! catalog cannot be loaded with malformed identifiers.

use crate::validation::{validate_package_name, validate_version, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated package name (lowercase slug)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageName(String);

/// A validated version number
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionNumber(String);

impl PackageName {
    /// Create a new PackageName with validation
    pub fn new(name: String) -> Result<Self, ValidationError> {
        validate_package_name(&name)?;
        Ok(PackageName(name))
    }

    /// Get the package name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl VersionNumber {
    /// Create a new VersionNumber with validation
    pub fn new(number: String) -> Result<Self, ValidationError> {
        validate_version(&number)?;
        Ok(VersionNumber(number))
    }

    /// Get the version number as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl FromStr for PackageName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PackageName::new(s.to_string())
    }
}

impl FromStr for VersionNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionNumber::new(s.to_string())
    }
}

impl TryFrom<String> for PackageName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PackageName::new(value)
    }
}

impl TryFrom<String> for VersionNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        VersionNumber::new(value)
    }
}

impl From<PackageName> for String {
    fn from(value: PackageName) -> Self {
        value.0
    }
}

impl From<VersionNumber> for String {
    fn from(value: VersionNumber) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_name_validation() {
        assert!(PackageName::new("left-pad".to_string()).is_ok());
        assert!(PackageName::new("lib.core_2".to_string()).is_ok());

        assert!(PackageName::new("".to_string()).is_err());
        assert!(PackageName::new("Left-Pad".to_string()).is_err());
        assert!(PackageName::new("a".repeat(129)).is_err());
    }

    #[test]
    fn test_version_number_validation() {
        assert!(VersionNumber::new("1.0.0".to_string()).is_ok());
        assert!(VersionNumber::new("0.9.0-rc.1".to_string()).is_ok());
        assert!(VersionNumber::new("".to_string()).is_err());
        assert!(VersionNumber::new("1 0".to_string()).is_err());
    }

    #[test]
    fn test_serde_rejects_invalid_names() {
        let ok: PackageName = serde_json::from_str("\"left-pad\"").unwrap();
        assert_eq!(ok.as_str(), "left-pad");
        assert_eq!(serde_json::to_string(&ok).unwrap(), "\"left-pad\"");

        let err = serde_json::from_str::<PackageName>("\"Not A Slug\"");
        assert!(err.is_err());
    }

    #[test]
    fn test_parse_and_display() {
        let number: VersionNumber = "2.0.0".parse().unwrap();
        assert_eq!(number.to_string(), "2.0.0");
        assert_eq!(number.as_str(), "2.0.0");

        let name: PackageName = "foo".parse().unwrap();
        assert_eq!(format!("[{:<5}]", name), "[foo  ]");
    }
}
