//! # Canonical Registry Documents
//!
//! Builds the JSON shapes of the CommonJS registry protocol from the entity
//! model. The document types only derive `Serialize`; field declaration
//! order is the emitted key order, and every map is a `BTreeMap`, so a given
//! entity graph always serializes to the same bytes.
//!
//! ## Index
//!
//! ```json
//! {
//!   "foo": {
//!     "2.0.0": {"name": "foo", "version": "2.0.0", "main": null,
//!               "description": "...", "dist": "NOT IMPLEMENTED"}
//!   },
//!   "hosted-elsewhere": "NOT IMPLEMENTED (external URL) should go here"
//! }
//! ```
//!
//! Distribution data and external package references are not served yet;
//! both are emitted as the fixed placeholders above.
//!
//! ## Package
//!
//! `name` carries the package title and `version` the latest (or pinned)
//! version number. People and repositories come from that same version.
//! The remaining protocol fields appear only when the version has data
//! for them.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{Contact, License, Package, Repository, Version};

/// Placeholder for the unimplemented `dist` field.
pub const DIST_PLACEHOLDER: &str = "NOT IMPLEMENTED";

/// Placeholder standing in for packages hosted outside this registry.
pub const EXTERNAL_PLACEHOLDER: &str = "NOT IMPLEMENTED (external URL) should go here";

pub type IndexDocument = BTreeMap<String, IndexEntry>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IndexEntry {
    /// Version number to per-version summary.
    Local(BTreeMap<String, IndexVersion>),
    External(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexVersion {
    pub name: String,
    pub version: String,
    pub main: Option<String>,
    pub description: String,
    pub dist: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactDocument {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryDocument {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LicenseDocument {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BugsDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageDocument {
    pub name: String,
    pub version: Option<String>,
    pub description: String,
    pub maintainers: Vec<ContactDocument>,
    pub contributors: Vec<ContactDocument>,
    pub repositories: Vec<RepositoryDocument>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub licenses: Vec<LicenseDocument>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub os: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cpu: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub engine: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub scripts: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub directories: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bugs: Option<BugsDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub builtin: Option<bool>,
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

impl From<&Contact> for ContactDocument {
    fn from(contact: &Contact) -> Self {
        ContactDocument {
            name: contact.full_name(),
            email: non_empty(contact.email.as_ref()),
            website: non_empty(contact.website.as_ref()),
        }
    }
}

impl From<&Repository> for RepositoryDocument {
    fn from(repo: &Repository) -> Self {
        RepositoryDocument {
            kind: repo.kind.as_str(),
            url: repo.url.clone(),
            path: non_empty(repo.path.as_ref()),
        }
    }
}

impl From<&License> for LicenseDocument {
    fn from(license: &License) -> Self {
        LicenseDocument {
            kind: license.kind.clone(),
            url: non_empty(license.url.as_ref()),
        }
    }
}

/// Index value for one package.
pub fn index_entry(package: &Package, local: bool) -> IndexEntry {
    if !local {
        return IndexEntry::External(EXTERNAL_PLACEHOLDER);
    }

    let versions = package
        .versions
        .iter()
        .map(|version| {
            let summary = IndexVersion {
                name: package.name.to_string(),
                version: version.number.to_string(),
                main: version.main.clone(),
                description: package.description.clone(),
                dist: DIST_PLACEHOLDER,
            };
            (version.number.to_string(), summary)
        })
        .collect();
    IndexEntry::Local(versions)
}

/// Index document for `packages`, asking `is_local` about each one.
pub fn index_document<F>(packages: &[Package], is_local: F) -> IndexDocument
where
    F: Fn(&str) -> bool,
{
    packages
        .iter()
        .map(|package| {
            let local = is_local(package.name.as_str());
            (package.name.to_string(), index_entry(package, local))
        })
        .collect()
}

/// Package document describing `package` at `version`, which is the pinned
/// version or the store's latest one. `None` means the package has no
/// versions.
pub fn package_document(package: &Package, version: Option<&Version>) -> PackageDocument {
    let mut document = PackageDocument {
        name: package.title.clone(),
        version: version.map(|v| v.number.to_string()),
        description: package.description.clone(),
        maintainers: Vec::new(),
        contributors: Vec::new(),
        repositories: Vec::new(),
        keywords: Vec::new(),
        licenses: Vec::new(),
        dependencies: BTreeMap::new(),
        implements: Vec::new(),
        os: Vec::new(),
        cpu: Vec::new(),
        engine: Vec::new(),
        scripts: BTreeMap::new(),
        directories: BTreeMap::new(),
        bugs: None,
        homepage: None,
        builtin: None,
    };

    let Some(version) = version else {
        return document;
    };

    document.maintainers = version.maintainers.iter().map(Into::into).collect();
    document.contributors = version.contributors.iter().map(Into::into).collect();
    document.repositories = version.repositories.iter().map(Into::into).collect();
    document.keywords = version.keyword_list();
    document.licenses = version.licenses.iter().map(Into::into).collect();
    document.dependencies = version.dependencies.clone();
    document.implements = version.implements.clone();
    document.os = version.os.clone();
    document.cpu = version.cpu.clone();
    document.engine = version.engine.clone();
    document.scripts = version.scripts.clone();
    document.directories = version.all_directories();

    let bugs = BugsDocument {
        mail: non_empty(version.bug_email.as_ref()),
        web: non_empty(version.bug_url.as_ref()),
    };
    if bugs.mail.is_some() || bugs.web.is_some() {
        document.bugs = Some(bugs);
    }
    document.homepage = non_empty(version.website.as_ref());
    document.builtin = version.is_builtin;

    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{contact, package, version};
    use crate::model::RepositoryKind;
    use serde_json::json;

    fn foo() -> Package {
        let mut pkg = package("foo", "Foo", "Does foo");
        pkg.versions.push(version("2.0.0", 0));
        pkg
    }

    #[test]
    fn test_index_local_package_with_null_main() {
        let doc = index_document(&[foo()], |_| true);
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({
                "foo": {
                    "2.0.0": {
                        "name": "foo",
                        "version": "2.0.0",
                        "main": null,
                        "description": "Does foo",
                        "dist": "NOT IMPLEMENTED"
                    }
                }
            })
        );
    }

    #[test]
    fn test_index_key_order_is_stable() {
        let mut left_pad = package("left-pad", "Left Pad", "pads strings");
        let mut v = version("1.0.0", 0);
        v.main = Some("index.js".to_string());
        left_pad.versions.push(v);

        let doc = index_document(&[left_pad, foo()], |name| name == "left-pad");
        let text = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            text,
            concat!(
                r#"{"foo":"NOT IMPLEMENTED (external URL) should go here","#,
                r#""left-pad":{"1.0.0":{"name":"left-pad","version":"1.0.0","main":"index.js","#,
                r#""description":"pads strings","dist":"NOT IMPLEMENTED"}}}"#
            )
        );
    }

    #[test]
    fn test_index_local_package_without_versions_is_empty_map() {
        let pkg = package("bare", "Bare", "nothing");
        let doc = index_document(&[pkg], |_| true);
        assert_eq!(serde_json::to_value(&doc).unwrap(), json!({"bare": {}}));
    }

    #[test]
    fn test_package_document_uses_latest_version() {
        let mut pkg = package("left-pad", "Left Pad", "pads strings");
        let mut old = version("1.0.0", 0);
        old.maintainers.push(contact("Old", "Maintainer"));
        let mut new = version("1.1.0", 10);
        let mut maintainer = contact("Jane", "Doe");
        maintainer.email = Some("jane@example.com".to_string());
        new.maintainers.push(maintainer);
        new.repositories.push(Repository {
            kind: RepositoryKind::Git,
            url: "https://example.com/left-pad.git".to_string(),
            path: None,
            comment: Some("mirror".to_string()),
        });
        pkg.versions.push(old);
        pkg.versions.push(new);

        let doc = serde_json::to_value(package_document(&pkg, pkg.latest_version())).unwrap();
        assert_eq!(
            doc,
            json!({
                "name": "Left Pad",
                "version": "1.1.0",
                "description": "pads strings",
                "maintainers": [{"name": "Jane Doe", "email": "jane@example.com"}],
                "contributors": [],
                "repositories": [{"type": "git", "url": "https://example.com/left-pad.git"}]
            })
        );
    }

    #[test]
    fn test_package_document_without_versions() {
        let pkg = package("empty", "Empty", "nothing yet");
        let doc = serde_json::to_value(package_document(&pkg, None)).unwrap();
        assert_eq!(
            doc,
            json!({
                "name": "Empty",
                "version": null,
                "description": "nothing yet",
                "maintainers": [],
                "contributors": [],
                "repositories": []
            })
        );
    }

    #[test]
    fn test_package_document_pinned_version() {
        let mut pkg = package("left-pad", "Left Pad", "pads strings");
        let mut old = version("1.0.0", 0);
        old.contributors.push(contact("Early", "Bird"));
        pkg.versions.push(old);
        pkg.versions.push(version("1.1.0", 10));

        let pinned = pkg.version("1.0.0").cloned();
        let doc = package_document(&pkg, pinned.as_ref());
        assert_eq!(doc.version.as_deref(), Some("1.0.0"));
        assert_eq!(doc.contributors[0].name, "Early Bird");
    }

    #[test]
    fn test_optional_protocol_fields() {
        let mut pkg = package("left-pad", "Left Pad", "pads strings");
        let mut v = version("1.0.0", 0);
        v.keywords = Some("string, pad".to_string());
        v.bug_url = Some("https://example.com/issues".to_string());
        v.website = Some("https://example.com".to_string());
        v.is_builtin = Some(false);
        v.directories_lib = Some("lib".to_string());
        v.dependencies
            .insert("right-pad".to_string(), "1.0.0".to_string());
        v.licenses.push(License {
            kind: "MIT".to_string(),
            url: None,
        });
        pkg.versions.push(v);

        let doc = serde_json::to_value(package_document(&pkg, pkg.latest_version())).unwrap();
        assert_eq!(doc["keywords"], json!(["string", "pad"]));
        assert_eq!(doc["bugs"], json!({"web": "https://example.com/issues"}));
        assert_eq!(doc["homepage"], json!("https://example.com"));
        assert_eq!(doc["builtin"], json!(false));
        assert_eq!(doc["directories"], json!({"lib": "lib"}));
        assert_eq!(doc["dependencies"], json!({"right-pad": "1.0.0"}));
        assert_eq!(doc["licenses"], json!([{"type": "MIT"}]));
        assert!(doc.get("os").is_none());
        assert!(doc.get("scripts").is_none());
    }

    #[test]
    fn test_contact_document_omits_absent_fields() {
        let mut c = contact("Bill", "Bloggs");
        c.middle_name = Some("J.".to_string());
        c.website = Some(String::new());
        let doc = serde_json::to_value(ContactDocument::from(&c)).unwrap();
        assert_eq!(doc, json!({"name": "Bill J. Bloggs"}));
    }
}
