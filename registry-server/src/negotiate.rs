//! # Content Negotiation
//!
//! Classifies a request's `Accept` header into the representation the
//! registry will answer with.
//!
//! The header is split on `,`, each token is trimmed and stripped of media
//! type parameters (`;q=0.9` and friends), and the remainder is compared
//! case-sensitively against `text/html` and `application/json`. Wildcards
//! such as `*/*` match nothing.
//!
//! Representations are tried in the fixed order of [`PRECEDENCE`], so a
//! header naming both media types always yields HTML.

pub const TEXT_HTML: &str = "text/html";
pub const APPLICATION_JSON: &str = "application/json";

/// Outcome of negotiating a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Html,
    Json,
    Unsupported,
}

impl MediaKind {
    /// The literal media type this kind answers to.
    pub fn media_type(&self) -> Option<&'static str> {
        match self {
            MediaKind::Html => Some(TEXT_HTML),
            MediaKind::Json => Some(APPLICATION_JSON),
            MediaKind::Unsupported => None,
        }
    }
}

/// Responders in the order they are offered the request.
pub const PRECEDENCE: [MediaKind; 2] = [MediaKind::Html, MediaKind::Json];

/// Media types named by an `Accept` header, parameters removed.
pub fn media_types(accept: &str) -> impl Iterator<Item = &str> {
    accept
        .split(',')
        .map(|token| token.split(';').next().unwrap_or("").trim())
        .filter(|token| !token.is_empty())
}

/// Whether `accept` names the media type of `kind`.
pub fn accepts(accept: &str, kind: MediaKind) -> bool {
    match kind.media_type() {
        Some(wanted) => media_types(accept).any(|token| token == wanted),
        None => false,
    }
}

/// Picks the first responder in [`PRECEDENCE`] the header accepts.
///
/// A missing header is unsupported.
pub fn negotiate(accept: Option<&str>) -> MediaKind {
    let Some(accept) = accept else {
        return MediaKind::Unsupported;
    };
    PRECEDENCE
        .into_iter()
        .find(|&kind| accepts(accept, kind))
        .unwrap_or(MediaKind::Unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_media_types() {
        assert_eq!(negotiate(Some("text/html")), MediaKind::Html);
        assert_eq!(negotiate(Some("application/json")), MediaKind::Json);
        assert_eq!(negotiate(Some("text/plain")), MediaKind::Unsupported);
    }

    #[test]
    fn test_html_wins_when_both_are_listed() {
        assert_eq!(
            negotiate(Some("application/json, text/html")),
            MediaKind::Html
        );
        assert_eq!(
            negotiate(Some("text/html,application/xhtml+xml,application/json;q=0.9")),
            MediaKind::Html
        );
    }

    #[test]
    fn test_parameters_and_whitespace_are_ignored() {
        assert_eq!(
            negotiate(Some("text/plain, application/json; charset=utf-8")),
            MediaKind::Json
        );
        assert_eq!(negotiate(Some("  text/html ;q=0.8 ")), MediaKind::Html);
    }

    #[test]
    fn test_wildcards_and_empty_values_are_unsupported() {
        assert_eq!(negotiate(Some("*/*")), MediaKind::Unsupported);
        assert_eq!(negotiate(Some("text/*")), MediaKind::Unsupported);
        assert_eq!(negotiate(Some("")), MediaKind::Unsupported);
        assert_eq!(negotiate(Some(" , ,")), MediaKind::Unsupported);
        assert_eq!(negotiate(None), MediaKind::Unsupported);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(negotiate(Some("Text/HTML")), MediaKind::Unsupported);
        assert_eq!(negotiate(Some("APPLICATION/JSON")), MediaKind::Unsupported);
    }

    #[test]
    fn test_media_types_strips_parameters() {
        let types: Vec<&str> = media_types("text/html;level=1, application/json ,,").collect();
        assert_eq!(types, vec!["text/html", "application/json"]);
    }
}
