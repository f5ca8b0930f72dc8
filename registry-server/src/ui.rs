//! HTML views of the registry, rendered with askama templates from
//! `templates/`. Every page extends `base.html`, which reads the
//! [`SiteConfig`] carried by each template.

use askama::Template;
use axum::response::Html;
use tracing::error;

use crate::config::SiteConfig;
use crate::model::{Contact, Package, Ranking, Repository, Version, SCORE_NOT_APPLICABLE};
use crate::validation::{is_route_package_name, is_route_version_number};
use crate::{AppError, AppResult};

struct PackageSummary {
    name: String,
    title: String,
    description: String,
    url: String,
    latest_version: String,
    author: String,
    categories: String,
}

/// Empty unless `path_is_routable`; pages show unroutable entries as text.
fn link(path_is_routable: bool, url: String) -> String {
    if path_is_routable {
        url
    } else {
        String::new()
    }
}

impl PackageSummary {
    fn new(package: &Package, latest: Option<&Version>) -> Self {
        PackageSummary {
            name: package.name.to_string(),
            title: package.title.clone(),
            description: package.description.clone(),
            url: link(
                is_route_package_name(package.name.as_str()),
                package.absolute_url(),
            ),
            latest_version: latest.map(|v| v.number.to_string()).unwrap_or_default(),
            author: package.author.full_name(),
            categories: package
                .categories
                .iter()
                .map(|c| c.title.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

struct PersonView {
    name: String,
    email: String,
    website: String,
}

impl From<&Contact> for PersonView {
    fn from(contact: &Contact) -> Self {
        PersonView {
            name: contact.full_name(),
            email: contact.email.clone().unwrap_or_default(),
            website: contact.website.clone().unwrap_or_default(),
        }
    }
}

struct RepositoryView {
    kind: &'static str,
    location: String,
    comment: String,
}

impl From<&Repository> for RepositoryView {
    fn from(repo: &Repository) -> Self {
        RepositoryView {
            kind: repo.kind.label(),
            location: repo.to_string(),
            comment: repo.comment.clone().unwrap_or_default(),
        }
    }
}

struct VersionLink {
    number: String,
    url: String,
    current: bool,
}

struct CategoryView {
    title: String,
    description: String,
}

fn score_label(score: u16) -> String {
    if score == SCORE_NOT_APPLICABLE {
        "N/A".to_string()
    } else {
        score.to_string()
    }
}

struct RankingView {
    version: String,
    code_quality: String,
    security: String,
    implementation: String,
    stability: String,
    look_and_feel: String,
    total: u32,
}

impl From<&Ranking> for RankingView {
    fn from(ranking: &Ranking) -> Self {
        RankingView {
            version: ranking.version.to_string(),
            code_quality: score_label(ranking.code_quality),
            security: score_label(ranking.security),
            implementation: score_label(ranking.implementation),
            stability: score_label(ranking.stability),
            look_and_feel: score_label(ranking.look_and_feel),
            total: ranking.total(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    site: SiteConfig,
    packages: Vec<PackageSummary>,
}

#[derive(Template)]
#[template(path = "package.html")]
struct PackageTemplate {
    site: SiteConfig,
    title: String,
    description: String,
    author: PersonView,
    /// Set when the URL pinned a version
    display_specific_version: bool,
    /// Version the people and repositories below belong to; empty when the
    /// package has none
    version_number: String,
    versions: Vec<VersionLink>,
    maintainers: Vec<PersonView>,
    contributors: Vec<PersonView>,
    repositories: Vec<RepositoryView>,
    categories: Vec<CategoryView>,
    rankings: Vec<RankingView>,
    average_ranking: String,
}

fn render<T: Template>(template: &T, page: &'static str) -> AppResult<Html<String>> {
    let html = template.render().map_err(|e| {
        error!(page, error = %e, "Template render error");
        AppError::Template(e)
    })?;
    Ok(Html(html))
}

/// Listing of every package, with `latest_version` naming each one's
/// latest version.
pub fn render_index<F>(
    site: &SiteConfig,
    packages: &[Package],
    latest_version: F,
) -> AppResult<Html<String>>
where
    F: Fn(&Package) -> Option<Version>,
{
    let template = IndexTemplate {
        site: site.clone(),
        packages: packages
            .iter()
            .map(|package| PackageSummary::new(package, latest_version(package).as_ref()))
            .collect(),
    };
    render(&template, "index")
}

/// Detail page for `package` at `shown`, the pinned version when `pinned` is
/// set and the latest one otherwise.
pub fn render_package(
    site: &SiteConfig,
    package: &Package,
    shown: Option<&Version>,
    pinned: bool,
) -> AppResult<Html<String>> {
    let package_routable = is_route_package_name(package.name.as_str());
    let shown_number = shown.map(|v| v.number.as_str()).unwrap_or("");

    let template = PackageTemplate {
        site: site.clone(),
        title: package.title.clone(),
        description: package.description.clone(),
        author: PersonView::from(&package.author),
        display_specific_version: pinned,
        version_number: shown_number.to_string(),
        versions: package
            .version_numbers()
            .into_iter()
            .map(|number| VersionLink {
                number: number.to_string(),
                url: link(
                    package_routable && is_route_version_number(number),
                    package.version_url(number),
                ),
                current: number == shown_number,
            })
            .collect(),
        maintainers: shown
            .map(|v| v.maintainers.iter().map(PersonView::from).collect())
            .unwrap_or_default(),
        contributors: shown
            .map(|v| v.contributors.iter().map(PersonView::from).collect())
            .unwrap_or_default(),
        repositories: shown
            .map(|v| v.repositories.iter().map(RepositoryView::from).collect())
            .unwrap_or_default(),
        categories: package
            .categories
            .iter()
            .map(|c| CategoryView {
                title: c.title.clone(),
                description: c.description.clone().unwrap_or_default(),
            })
            .collect(),
        rankings: package.rankings.iter().map(RankingView::from).collect(),
        average_ranking: package
            .average_ranking()
            .map(|avg| format!("{:.1}", avg))
            .unwrap_or_default(),
    };
    render(&template, "package")
}
