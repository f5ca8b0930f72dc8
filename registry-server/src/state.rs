//! # Application State
//!
//! [`AppState`] is built once at startup and shared with every handler
//! behind an `Arc`. It holds no mutable data: the store is read-only and the
//! configuration is fixed for the life of the process.

use std::sync::Arc;

use crate::config::{Config, SiteConfig};
use crate::store::EntityStore;

#[derive(Clone)]
pub struct AppState {
    /// Source of packages and versions
    pub store: Arc<dyn EntityStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn EntityStore>, config: Config) -> Self {
        AppState {
            store,
            config: Arc::new(config),
        }
    }

    pub fn site(&self) -> &SiteConfig {
        &self.config.site
    }
}
