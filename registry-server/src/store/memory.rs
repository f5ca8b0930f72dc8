use std::collections::HashSet;

use super::{validate_packages, EntityStore, StoreResult};
use crate::model::Package;

/// Store holding its entities in memory, with locality declared up front.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    packages: Vec<Package>,
    local: HashSet<String>,
}

impl MemoryStore {
    /// Builds a store from `packages`, treating every name in `local` as
    /// registry-hosted.
    pub fn new<I, S>(mut packages: Vec<Package>, local: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        validate_packages(&packages)?;
        packages.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(MemoryStore {
            packages,
            local: local.into_iter().map(Into::into).collect(),
        })
    }
}

impl EntityStore for MemoryStore {
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
        self.local.contains(package_name)
    }
}
