//! # Registry Entities
//!
//! The read-only entity graph the registry serves: packages, their versions,
//! and the contacts and repositories those versions reference.
//!
//! Entities are owned by the store. Handlers borrow them to build views and
//! protocol documents and never mutate them.
//!
//! ## Latest version
//!
//! The latest version of a package is the one with the greatest `added_at`
//! timestamp. When timestamps collide the version inserted later wins. The
//! current maintainers, current contributors and the `version` field of the
//! package document are all derived from it.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::{PackageName, VersionNumber};

/// Ranking value meaning "does not apply"; excluded from totals.
pub const SCORE_NOT_APPLICABLE: u16 = 999;

/// Every score a ranking factor may carry.
pub const SCORE_CHOICES: [u16; 6] = [SCORE_NOT_APPLICABLE, 100, 75, 50, 25, 0];

/// A person related to a package (author, maintainer, contributor).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Contact {
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl Contact {
    /// First, middle (when present) and last name joined by single spaces.
    pub fn full_name(&self) -> String {
        [
            Some(self.first_name.as_str()),
            self.middle_name.as_deref(),
            Some(self.last_name.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Version control system hosting a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryKind {
    Cvs,
    Git,
    Hg,
    Svn,
    Local,
}

impl RepositoryKind {
    /// Protocol identifier (`"git"`, `"svn"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            RepositoryKind::Cvs => "cvs",
            RepositoryKind::Git => "git",
            RepositoryKind::Hg => "hg",
            RepositoryKind::Svn => "svn",
            RepositoryKind::Local => "local",
        }
    }

    /// Human-readable name used on HTML pages.
    pub fn label(&self) -> &'static str {
        match self {
            RepositoryKind::Cvs => "CVS",
            RepositoryKind::Git => "Git",
            RepositoryKind::Hg => "Mercurial",
            RepositoryKind::Svn => "Subversion",
            RepositoryKind::Local => "Localhost",
        }
    }
}

/// A code repository of some sort.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Repository {
    #[serde(rename = "type")]
    pub kind: RepositoryKind,
    pub url: String,
    /// Locates the package when it does not live at the repository root.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path.as_deref() {
            Some(path) if !path.is_empty() => write!(f, "{}/{}", self.url, path),
            _ => write!(f, "{}", self.url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct License {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// One release of a package.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Version {
    pub number: VersionNumber,
    pub added_at: DateTime<Utc>,
    #[serde(default)]
    pub contributors: Vec<Contact>,
    #[serde(default)]
    pub maintainers: Vec<Contact>,
    #[serde(default)]
    pub repositories: Vec<Repository>,
    /// Free text; split on commas when serialized.
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub is_builtin: Option<bool>,
    #[serde(default)]
    pub bug_url: Option<String>,
    #[serde(default)]
    pub bug_email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub directories_lib: Option<String>,

    #[serde(default)]
    pub licenses: Vec<License>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub os: Vec<String>,
    #[serde(default)]
    pub cpu: Vec<String>,
    #[serde(default)]
    pub engine: Vec<String>,
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
    #[serde(default)]
    pub directories: BTreeMap<String, String>,
}

impl Version {
    /// A version with only the required fields set.
    pub fn new(number: VersionNumber, added_at: DateTime<Utc>) -> Self {
        Version {
            number,
            added_at,
            contributors: Vec::new(),
            maintainers: Vec::new(),
            repositories: Vec::new(),
            keywords: None,
            is_builtin: None,
            bug_url: None,
            bug_email: None,
            website: None,
            main: None,
            directories_lib: None,
            licenses: Vec::new(),
            dependencies: BTreeMap::new(),
            implements: Vec::new(),
            os: Vec::new(),
            cpu: Vec::new(),
            engine: Vec::new(),
            scripts: BTreeMap::new(),
            directories: BTreeMap::new(),
        }
    }

    /// Keywords split on commas, trimmed, empties dropped.
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Declared directories, with `directories_lib` as the `lib` entry when
    /// the map does not already name one.
    pub fn all_directories(&self) -> BTreeMap<String, String> {
        let mut dirs = self.directories.clone();
        if let Some(lib) = self.directories_lib.as_deref().filter(|l| !l.is_empty()) {
            dirs.entry("lib".to_string())
                .or_insert_with(|| lib.to_string());
        }
        dirs
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A user's assessment of one version of a package.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ranking {
    pub version: VersionNumber,
    pub email: String,
    pub code_quality: u16,
    pub security: u16,
    pub implementation: u16,
    pub stability: u16,
    pub look_and_feel: u16,
}

impl Ranking {
    pub fn scores(&self) -> [u16; 5] {
        [
            self.code_quality,
            self.security,
            self.implementation,
            self.stability,
            self.look_and_feel,
        ]
    }

    /// Sum of every factor that applies.
    pub fn total(&self) -> u32 {
        self.scores()
            .iter()
            .filter(|&&score| score != SCORE_NOT_APPLICABLE)
            .map(|&score| u32::from(score))
            .sum()
    }
}

/// A named, versioned unit of distributable software.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Package {
    pub title: String,
    pub name: PackageName,
    pub description: String,
    pub author: Contact,
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Insertion order is significant for latest-version tie-breaks.
    #[serde(default)]
    pub versions: Vec<Version>,
    #[serde(default)]
    pub rankings: Vec<Ranking>,
}

impl Package {
    pub fn latest_version(&self) -> Option<&Version> {
        // max_by_key returns the last of several equal maxima, so the later
        // insertion wins a timestamp tie.
        self.versions.iter().max_by_key(|v| v.added_at)
    }

    pub fn latest_version_number(&self) -> Option<&str> {
        self.latest_version().map(|v| v.number.as_str())
    }

    pub fn current_contributors(&self) -> &[Contact] {
        self.latest_version()
            .map(|v| v.contributors.as_slice())
            .unwrap_or(&[])
    }

    pub fn current_maintainers(&self) -> &[Contact] {
        self.latest_version()
            .map(|v| v.maintainers.as_slice())
            .unwrap_or(&[])
    }

    pub fn version(&self, number: &str) -> Option<&Version> {
        self.versions.iter().find(|v| v.number.as_str() == number)
    }

    /// Version numbers in insertion order.
    pub fn version_numbers(&self) -> Vec<&str> {
        self.versions.iter().map(|v| v.number.as_str()).collect()
    }

    pub fn absolute_url(&self) -> String {
        format!("/{}/", self.name)
    }

    pub fn version_url(&self, number: &str) -> String {
        format!("/{}/{}/", self.name, number)
    }

    /// Mean ranking total, or `None` when nobody ranked the package.
    pub fn average_ranking(&self) -> Option<f64> {
        if self.rankings.is_empty() {
            return None;
        }
        let sum: u32 = self.rankings.iter().map(Ranking::total).sum();
        Some(f64::from(sum) / self.rankings.len() as f64)
    }
}
