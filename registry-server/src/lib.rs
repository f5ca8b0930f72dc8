//! # CommonJS Package Registry Server
//!
//! Serves package metadata over HTTP, negotiating between HTML pages for
//! browsers and the JSON documents of the CommonJS package registry
//! protocol.
//!
//! ## Key Modules
//!
//! - [`negotiate`]: `Accept` header classification
//! - [`serialize`]: canonical Index and Package JSON documents
//! - [`handlers`]: the Index and Package endpoints
//! - [`store`]: read-only entity store trait and its implementations
//! - [`model`]: packages, versions, contacts and repositories
//! - [`ui`]: askama HTML views
//! - [`config`]: JSON configuration
//! - [`error`]: error types and their HTTP responses
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use registry_server::{build_router, AppState, Config, MemoryStore};
//!
//! let store = MemoryStore::new(Vec::new(), Vec::<String>::new())?;
//! let app = build_router(AppState::new(Arc::new(store), Config::default()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod negotiate;
pub mod serialize;
pub mod server;
pub mod state;
pub mod store;
pub mod types;
pub mod ui;
pub mod validation;

pub use config::{Config, SiteConfig};
pub use error::{ApiErrorResponse, AppError, AppResult, ErrorCode};
pub use negotiate::{negotiate, MediaKind};
pub use server::{build_router, run_server};
pub use state::AppState;
pub use store::{CatalogStore, EntityStore, MemoryStore, StoreError};
pub use types::{PackageName, VersionNumber};
pub use validation::{ValidationError, ValidationResult};
