//! # Configuration Management
//!
//! Settings for the registry server, read from a JSON file. Every section
//! and field has a built-in default, so a configuration file only needs to
//! name what it changes:
//!
//! ```json
//! {
//!   "server": {"host": "0.0.0.0", "port": 8000},
//!   "storage": {"data_dir": "/srv/registry"},
//!   "site": {"organization_name": "CommonJS"}
//! }
//! ```
//!
//! - [`ServerConfig`]: bind address
//! - [`StorageConfig`]: data directory, catalog file and package data area
//! - [`SiteConfig`]: branding values rendered into every HTML page

use crate::error::AppResult;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host/IP address to bind to
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Where the registry keeps its data.
///
/// `catalog_file` and `packages_dir` are resolved against `data_dir` when
/// relative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub catalog_file: PathBuf,
    /// Holds one directory per locally hosted package
    pub packages_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: PathBuf::from("./data"),
            catalog_file: PathBuf::from("catalog.json"),
            packages_dir: PathBuf::from("packages"),
        }
    }
}

impl StorageConfig {
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(&self.catalog_file)
    }

    pub fn packages_path(&self) -> PathBuf {
        self.data_dir.join(&self.packages_dir)
    }
}

/// Site-wide values every HTML page is rendered with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub assets_url: String,
    pub content_url: String,
    pub scripts_url: String,
    pub copyright_owner: String,
    pub copyright_url: String,
    pub copyright_year: String,
    pub organization_name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            assets_url: "/assets/".to_string(),
            content_url: "/content/".to_string(),
            scripts_url: "/scripts/".to_string(),
            copyright_owner: "CommonJS Registry Contributors".to_string(),
            copyright_url: "http://commonjs.org/".to_string(),
            copyright_year: chrono::Utc::now().year().to_string(),
            organization_name: "CommonJS".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let config_str = fs::read_to_string(path)?;
        let config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Load configuration from `path` when it exists, defaults otherwise.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_address(), "127.0.0.1:8000");
        assert_eq!(
            config.storage.catalog_path(),
            PathBuf::from("./data/catalog.json")
        );
        assert_eq!(config.storage.packages_path(), PathBuf::from("./data/packages"));
        assert_eq!(config.site.organization_name, "CommonJS");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("registry.json");
        fs::write(
            &path,
            r#"{"server": {"port": 9090}, "site": {"copyright_year": "2010"}}"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.site.copyright_year, "2010");
        assert_eq!(config.site.assets_url, "/assets/");
        assert_eq!(config.storage.catalog_file, PathBuf::from("catalog.json"));
    }

    #[test]
    fn test_absolute_storage_paths_win() {
        let storage = StorageConfig {
            data_dir: PathBuf::from("/srv/registry"),
            catalog_file: PathBuf::from("/etc/registry/catalog.json"),
            packages_dir: PathBuf::from("pkgs"),
        };
        assert_eq!(
            storage.catalog_path(),
            PathBuf::from("/etc/registry/catalog.json")
        );
        assert_eq!(storage.packages_path(), PathBuf::from("/srv/registry/pkgs"));
    }

    #[test]
    fn test_load_or_default() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        assert_eq!(Config::load_or_default(&missing).unwrap().server.port, 8000);

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{not json").unwrap();
        assert!(Config::load_or_default(&broken).is_err());
    }
}
