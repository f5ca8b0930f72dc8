//! Shared fixtures for the registry integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use axum_test::TestServer;
use registry_server::model::Package;
use registry_server::{build_router, AppState, Config, EntityStore, MemoryStore};
use serde_json::{json, Value};

pub const HTML: &str = "text/html";
pub const JSON: &str = "application/json";

/// Catalog used across the tests:
///
/// - `left-pad`: local, versions 1.0.0 and 1.1.0 (latest)
/// - `foo`: local, one version 2.0.0 without `main`
/// - `elsewhere`: hosted externally
pub fn catalog_json() -> Value {
    json!({
        "packages": [
            {
                "title": "Left Pad",
                "name": "left-pad",
                "description": "Pads strings on the left",
                "author": {"first_name": "Ada", "last_name": "Lovelace"},
                "categories": [{"title": "Strings"}],
                "versions": [
                    {
                        "number": "1.0.0",
                        "added_at": "2024-01-01T00:00:00Z",
                        "main": "lib/left-pad.js",
                        "maintainers": [{"first_name": "Old", "last_name": "Maintainer"}]
                    },
                    {
                        "number": "1.1.0",
                        "added_at": "2024-03-01T00:00:00Z",
                        "main": "lib/index.js",
                        "keywords": "string, pad",
                        "maintainers": [
                            {"first_name": "Jane", "last_name": "Doe", "email": "jane@example.com"}
                        ],
                        "contributors": [
                            {"first_name": "John", "middle_name": "Q.", "last_name": "Public",
                             "website": "https://john.example.com"}
                        ],
                        "repositories": [
                            {"type": "git", "url": "https://example.com/left-pad.git"}
                        ]
                    }
                ]
            },
            {
                "title": "Foo",
                "name": "foo",
                "description": "Does foo",
                "author": {"first_name": "Bob", "last_name": "Builder"},
                "versions": [
                    {"number": "2.0.0", "added_at": "2024-02-01T00:00:00Z"}
                ]
            },
            {
                "title": "Elsewhere",
                "name": "elsewhere",
                "description": "Hosted somewhere else",
                "author": {"first_name": "Eve", "last_name": "Remote"},
                "versions": [
                    {"number": "0.1.0", "added_at": "2024-02-01T00:00:00Z",
                     "repositories": [{"type": "svn", "url": "https://svn.example.com/elsewhere"}]}
                ]
            }
        ]
    })
}

pub fn fixture_packages() -> Vec<Package> {
    serde_json::from_value(catalog_json()["packages"].clone()).expect("fixture catalog parses")
}

pub fn memory_store() -> MemoryStore {
    MemoryStore::new(fixture_packages(), ["left-pad", "foo"]).expect("fixture catalog is valid")
}

pub fn server_with_store(store: Arc<dyn EntityStore>) -> TestServer {
    let app = build_router(AppState::new(store, Config::default()));
    TestServer::new(app).expect("Failed to create test server")
}

/// Test server over [`memory_store`].
pub fn test_server() -> TestServer {
    server_with_store(Arc::new(memory_store()))
}

/// Writes the fixture catalog into `data_dir` and creates package data
/// directories for `local` packages.
pub fn write_data_dir(data_dir: &Path, local: &[&str]) {
    fs::create_dir_all(data_dir.join("packages")).expect("create packages dir");
    for name in local {
        fs::create_dir_all(data_dir.join("packages").join(name)).expect("create package dir");
    }
    fs::write(
        data_dir.join("catalog.json"),
        serde_json::to_string_pretty(&catalog_json()).expect("serialize catalog"),
    )
    .expect("write catalog");
}
