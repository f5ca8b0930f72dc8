//! # Input Validation
//!
//! Checks applied to package names and version numbers, both when the catalog
//! is loaded and when they arrive as URL path segments.
//!
//! Route segments follow the URL patterns of the registry protocol:
//!
//! - package name: `[\w-]+` (ASCII word characters and `-`)
//! - version number: `[\d.]+`
//!
//! Catalog package names are stricter slugs: lowercase ASCII letters, digits,
//! `.`, `_` and `-`.

use regex::Regex;
use std::sync::OnceLock;

/// Maximum length of a package name.
pub const MAX_PACKAGE_NAME_LENGTH: usize = 128;

/// Maximum length of a version number.
pub const MAX_VERSION_LENGTH: usize = 64;

/// Error types for validation failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Input too long: {actual} exceeds maximum {max}")]
    TooLong { actual: usize, max: usize },

    #[error("Input too short: {actual} is below minimum {min}")]
    TooShort { actual: usize, min: usize },

    #[error("Invalid characters in input: {input}")]
    InvalidCharacters { input: String },

    #[error("Invalid format: {reason}")]
    InvalidFormat { reason: String },
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern).unwrap_or_else(|e| {
            panic!("Failed to compile validation regex {}: {}", pattern, e)
        })
    })
}

fn slug_regex() -> &'static Regex {
    static SLUG: OnceLock<Regex> = OnceLock::new();
    compiled(&SLUG, r"^[a-z0-9._-]+$")
}

fn version_regex() -> &'static Regex {
    static VERSION: OnceLock<Regex> = OnceLock::new();
    compiled(&VERSION, r"^[A-Za-z0-9.+_-]+$")
}

fn route_package_regex() -> &'static Regex {
    static ROUTE_PACKAGE: OnceLock<Regex> = OnceLock::new();
    compiled(&ROUTE_PACKAGE, r"^[A-Za-z0-9_-]+$")
}

fn route_version_regex() -> &'static Regex {
    static ROUTE_VERSION: OnceLock<Regex> = OnceLock::new();
    compiled(&ROUTE_VERSION, r"^[0-9.]+$")
}

fn check_length(input: &str, max: usize) -> ValidationResult<()> {
    if input.is_empty() {
        return Err(ValidationError::TooShort { actual: 0, min: 1 });
    }
    if input.len() > max {
        return Err(ValidationError::TooLong {
            actual: input.len(),
            max,
        });
    }
    Ok(())
}

/// Validate a catalog package name (slug).
pub fn validate_package_name(name: &str) -> ValidationResult<()> {
    check_length(name, MAX_PACKAGE_NAME_LENGTH)?;
    if !slug_regex().is_match(name) {
        return Err(ValidationError::InvalidCharacters {
            input: name.to_string(),
        });
    }
    Ok(())
}

/// Validate a catalog version number.
///
/// Version numbers are "semver-like": ASCII letters, digits, `.`, `+`,
/// `_` and `-`. Only those matching the route pattern get their own page.
pub fn validate_version(version: &str) -> ValidationResult<()> {
    check_length(version, MAX_VERSION_LENGTH)?;
    if !version_regex().is_match(version) {
        return Err(ValidationError::InvalidCharacters {
            input: version.to_string(),
        });
    }
    Ok(())
}

/// Whether a URL segment can address a package.
pub fn is_route_package_name(segment: &str) -> bool {
    segment.len() <= MAX_PACKAGE_NAME_LENGTH && route_package_regex().is_match(segment)
}

/// Whether a URL segment can address a version.
pub fn is_route_version_number(segment: &str) -> bool {
    segment.len() <= MAX_VERSION_LENGTH && route_version_regex().is_match(segment)
}
