//! # Registry Endpoints
//!
//! The Index and Package endpoints. Each request moves through the same
//! steps:
//!
//! 1. The path segments are checked against the route patterns; a segment
//!    that does not fit is a 404.
//! 2. The `Accept` header is negotiated, before any store lookup.
//! 3. HTML is rendered when acceptable, otherwise the JSON document is
//!    returned, otherwise the request fails with 406.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header::ACCEPT, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::model::{Package, Version};
use crate::negotiate::{negotiate, MediaKind};
use crate::serialize::{index_document, package_document};
use crate::ui::{render_index, render_package};
use crate::validation::{is_route_package_name, is_route_version_number};
use crate::{AppError, AppResult, AppState};

/// Raw `Accept` header value; repeated headers are joined with `, `.
pub fn accept_header(headers: &HeaderMap) -> Option<String> {
    let values: Vec<String> = headers
        .get_all(ACCEPT)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

fn not_acceptable(accept: Option<String>) -> AppError {
    AppError::NotAcceptable {
        accept_type: accept.unwrap_or_default(),
    }
}

/// Looks up `name` and the version a response describes: the pinned
/// `version` when given, else the store's latest. Returns whether the
/// version was pinned.
fn find_package(
    state: &AppState,
    name: &str,
    version: Option<&str>,
) -> AppResult<(Package, Option<Version>, bool)> {
    let package = state
        .store
        .get_package_by_name(name)?
        .ok_or_else(|| AppError::NotFound(format!("Package not found: {}", name)))?;

    match version {
        Some(number) => {
            let pinned = state.store.get_version(&package, number).ok_or_else(|| {
                AppError::NotFound(format!("Version not found: {} {}", name, number))
            })?;
            Ok((package, Some(pinned), true))
        }
        None => {
            let latest = state.store.latest_version(&package);
            Ok((package, latest, false))
        }
    }
}

fn respond_with_package(
    state: &AppState,
    accept: Option<String>,
    name: &str,
    version: Option<&str>,
) -> AppResult<Response> {
    let kind = negotiate(accept.as_deref());
    debug!(package = %name, version = ?version, representation = ?kind, "Incoming package request");

    match kind {
        MediaKind::Html => {
            let (package, shown, pinned) = find_package(state, name, version)?;
            Ok(render_package(state.site(), &package, shown.as_ref(), pinned)?.into_response())
        }
        MediaKind::Json => {
            let (package, shown, _) = find_package(state, name, version)?;
            Ok(Json(package_document(&package, shown.as_ref())).into_response())
        }
        MediaKind::Unsupported => Err(not_acceptable(accept)),
    }
}

/// `GET /`
pub async fn index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let accept = accept_header(&headers);
    let kind = negotiate(accept.as_deref());
    debug!(representation = ?kind, "Incoming index request");

    match kind {
        MediaKind::Html => {
            let packages = state.store.list_packages()?;
            let html = render_index(state.site(), &packages, |package| {
                state.store.latest_version(package)
            })?;
            Ok(html.into_response())
        }
        MediaKind::Json => {
            let packages = state.store.list_packages()?;
            let document = index_document(&packages, |name| state.store.is_local(name));
            Ok(Json(document).into_response())
        }
        MediaKind::Unsupported => Err(not_acceptable(accept)),
    }
}

/// `GET /{package_name}/`
pub async fn package(
    State(state): State<Arc<AppState>>,
    Path(package_name): Path<String>,
    headers: HeaderMap,
) -> AppResult<Response> {
    if !is_route_package_name(&package_name) {
        return Err(AppError::NotFound(format!("No route for {}", package_name)));
    }
    respond_with_package(&state, accept_header(&headers), &package_name, None)
}

/// `GET /{package_name}/{version_number}/`
pub async fn package_version(
    State(state): State<Arc<AppState>>,
    Path((package_name, version_number)): Path<(String, String)>,
    headers: HeaderMap,
) -> AppResult<Response> {
    if !is_route_package_name(&package_name) || !is_route_version_number(&version_number) {
        return Err(AppError::NotFound(format!(
            "No route for {}/{}",
            package_name, version_number
        )));
    }
    respond_with_package(
        &state,
        accept_header(&headers),
        &package_name,
        Some(&version_number),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_accept_header_absent() {
        assert_eq!(accept_header(&HeaderMap::new()), None);
    }

    #[test]
    fn test_accept_header_joins_repeated_values() {
        let mut headers = HeaderMap::new();
        headers.append(ACCEPT, HeaderValue::from_static("text/plain"));
        headers.append(ACCEPT, HeaderValue::from_static("application/json"));
        assert_eq!(
            accept_header(&headers).as_deref(),
            Some("text/plain, application/json")
        );
    }

    #[test]
    fn test_not_acceptable_echoes_empty_for_missing_header() {
        assert!(matches!(
            not_acceptable(None),
            AppError::NotAcceptable { accept_type } if accept_type.is_empty()
        ));
    }
}
