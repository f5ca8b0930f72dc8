//! JSON catalog backed store.
//!
//! The catalog is a single JSON document:
//!
//! ```json
//! {
//!   "packages": [
//!     {
//!       "title": "Left Pad",
//!       "name": "left-pad",
//!       "description": "Pads strings on the left",
//!       "author": {"first_name": "Ada", "last_name": "Lovelace"},
//!       "versions": [
//!         {"number": "1.0.0", "added_at": "2024-01-01T00:00:00Z", "main": "lib/index.js"}
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! It is read once when the store is opened. Locality is not part of the
//! catalog: a package is local while `<packages_dir>/<name>` exists.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{validate_packages, EntityStore, StoreError, StoreResult};
use crate::model::Package;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub packages: Vec<Package>,
}

impl Catalog {
    pub fn from_json(path: &Path, content: &str) -> StoreResult<Self> {
        serde_json::from_str(content).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CatalogStore {
    packages: Vec<Package>,
    packages_dir: PathBuf,
}

impl CatalogStore {
    /// Reads and validates the catalog at `catalog_path`.
    ///
    /// A missing catalog file yields an empty store so a fresh data
    /// directory can be served straight away.
    pub fn open(catalog_path: &Path, packages_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let catalog = match fs::read_to_string(catalog_path) {
            Ok(content) => Catalog::from_json(catalog_path, &content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %catalog_path.display(), "Catalog file not found, starting with an empty registry");
                Catalog::default()
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: catalog_path.to_path_buf(),
                    source,
                })
            }
        };

        let store = Self::from_catalog(catalog, packages_dir)?;
        info!(
            path = %catalog_path.display(),
            packages = store.packages.len(),
            "Loaded package catalog"
        );
        Ok(store)
    }

    pub fn from_catalog(catalog: Catalog, packages_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let mut packages = catalog.packages;
        validate_packages(&packages)?;
        packages.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(CatalogStore {
            packages,
            packages_dir: packages_dir.into(),
        })
    }

    pub fn packages_dir(&self) -> &Path {
        &self.packages_dir
    }
}

/// A name addresses a package directory only when it is a single plain
/// path component.
fn is_plain_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

impl EntityStore for CatalogStore {
    fn list_packages(&self) -> StoreResult<Vec<Package>> {
        Ok(self.packages.clone())
    }

    fn get_package_by_name(&self, name: &str) -> StoreResult<Option<Package>> {
        Ok(self
            .packages
            .iter()
            .find(|p| p.name.as_str() == name)
            .cloned())
    }

    fn is_local(&self, package_name: &str) -> bool {
        if !is_plain_component(package_name) {
            return false;
        }
        let local = self.packages_dir.join(package_name).exists();
        debug!(package = %package_name, local, "Probed local package data");
        local
    }
}
