//! # Entity Store
//!
//! Read-only access to the registry's entity graph. Handlers depend only on
//! the [`EntityStore`] trait; the concrete stores are:
//!
//! - [`CatalogStore`]: entities loaded from a JSON catalog file, with
//!   locality probed against the on-disk package data directory
//! - [`MemoryStore`]: entities and locality supplied in code
//!
//! Lookups are synchronous and never block on anything but the filesystem
//! probe behind [`EntityStore::is_local`]. Both stores are immutable once
//! built, so concurrent reads need no locking.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::model::{Package, Version, SCORE_CHOICES};

mod catalog;
mod memory;

pub use catalog::{Catalog, CatalogStore};
pub use memory::MemoryStore;

/// Failures raised while building or reading a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate package name: {0}")]
    DuplicateName(String),

    #[error("duplicate package title: {0}")]
    DuplicateTitle(String),

    #[error("package {package} lists version {version} more than once")]
    DuplicateVersion { package: String, version: String },

    #[error("package {package} has a ranking for unknown version {version}")]
    UnknownRankedVersion { package: String, version: String },

    #[error("package {package} has a ranking with invalid score {score}")]
    InvalidScore { package: String, score: u16 },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Query interface the endpoint handlers consume.
pub trait EntityStore: Send + Sync {
    /// Every package, ordered by name.
    fn list_packages(&self) -> StoreResult<Vec<Package>>;

    fn get_package_by_name(&self, name: &str) -> StoreResult<Option<Package>>;

    /// Whether registry-managed data exists for `package_name`.
    fn is_local(&self, package_name: &str) -> bool;

    fn get_version(&self, package: &Package, number: &str) -> Option<Version> {
        package.version(number).cloned()
    }

    /// The version the Index page and unpinned Package responses describe.
    fn latest_version(&self, package: &Package) -> Option<Version> {
        package.latest_version().cloned()
    }
}

/// Checks the invariants every store upholds: unique names and titles,
/// unique version numbers within a package, and rankings that reference a
/// known version with scores drawn from [`SCORE_CHOICES`].
///
/// Name syntax is already enforced by [`crate::types::PackageName`].
pub fn validate_packages(packages: &[Package]) -> StoreResult<()> {
    let mut names = HashSet::new();
    let mut titles = HashSet::new();

    for package in packages {
        if !names.insert(package.name.as_str()) {
            return Err(StoreError::DuplicateName(package.name.to_string()));
        }
        if !titles.insert(package.title.as_str()) {
            return Err(StoreError::DuplicateTitle(package.title.clone()));
        }

        let mut numbers = HashSet::new();
        for version in &package.versions {
            if !numbers.insert(version.number.as_str()) {
                return Err(StoreError::DuplicateVersion {
                    package: package.name.to_string(),
                    version: version.number.to_string(),
                });
            }
        }

        for ranking in &package.rankings {
            if !numbers.contains(ranking.version.as_str()) {
                return Err(StoreError::UnknownRankedVersion {
                    package: package.name.to_string(),
                    version: ranking.version.to_string(),
                });
            }
            if let Some(&score) = ranking
                .scores()
                .iter()
                .find(|&&score| !SCORE_CHOICES.contains(&score))
            {
                return Err(StoreError::InvalidScore {
                    package: package.name.to_string(),
                    score,
                });
            }
        }
    }

    Ok(())
}
