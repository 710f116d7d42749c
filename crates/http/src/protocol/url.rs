//! Request-target decomposition.
//!
//! A request target as handed over by the transport is split into path, query
//! and fragment. Three target forms are accepted:
//!
//! - origin-form: `/path?query#fragment`
//! - absolute-form: `scheme://authority/path?query#fragment`
//! - asterisk-form: `*`
//!
//! The path is normalized by stripping trailing `/` and `\` separators so that
//! `/foo` and `/foo/` are the same path everywhere downstream. A path made of
//! separators only collapses to `/`.

use std::str::FromStr;

use http::uri::Authority;
use serde::Serialize;

use crate::ensure;
use crate::protocol::{NotAPrefix, UrlError};

const PATH_SEPARATORS: [char; 2] = ['/', '\\'];

/// The decomposed pieces of a request target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlInfo {
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl UrlInfo {
    /// Decomposes a raw request target.
    ///
    /// An empty query or fragment (`/a?`, `/a#`) is kept as `Some("")`, only a
    /// missing delimiter means the component is absent.
    pub fn parse(target: &str) -> Result<Self, UrlError> {
        ensure!(!target.is_empty(), UrlError::Empty);

        if let Some((position, ch)) = target.char_indices().find(|(_, ch)| ch.is_ascii_control() || *ch == ' ') {
            return Err(UrlError::InvalidChar { ch, position });
        }

        let (rest, fragment) = match target.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_owned())),
            None => (target, None),
        };

        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, Some(query.to_owned())),
            None => (rest, None),
        };

        let raw_path = if rest == "*" || rest.starts_with(PATH_SEPARATORS) {
            rest
        } else if let Some((scheme, hier_part)) = rest.split_once("://") {
            parse_scheme(scheme)?;
            absolute_path(hier_part)?
        } else {
            return Err(UrlError::unsupported_form(target));
        };

        Ok(Self { path: normalize_path(raw_path).to_owned(), query, fragment })
    }

    /// The normalized path. Never empty.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    #[inline]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Returns the part of the path that follows `base`.
    ///
    /// `base` is normalized like a path first, so `/app/` and `/app` are the
    /// same base. Returns an empty string when the path equals the base.
    pub fn relative_path(&self, base: &str) -> Result<&str, NotAPrefix> {
        let base = normalize_path(base);
        self.path.strip_prefix(base).ok_or_else(|| NotAPrefix::new(&self.path, base))
    }
}

impl FromStr for UrlInfo {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UrlInfo::parse(s)
    }
}

/// Strips trailing separators, keeping a single `/` for an all-separator path.
pub fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches(PATH_SEPARATORS);
    if trimmed.is_empty() && !path.is_empty() { "/" } else { trimmed }
}

fn parse_scheme(scheme: &str) -> Result<(), UrlError> {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        Some(_) => return Err(UrlError::invalid_scheme(format!("'{scheme}' must start with a letter"))),
        None => return Err(UrlError::invalid_scheme("scheme is empty")),
    }

    ensure!(
        chars.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.')),
        UrlError::invalid_scheme(format!("'{scheme}' contains an invalid character"))
    );
    Ok(())
}

/// Validates the authority of an absolute-form target and returns its path.
fn absolute_path(hier_part: &str) -> Result<&str, UrlError> {
    let (authority, path) = match hier_part.find(PATH_SEPARATORS) {
        Some(index) => hier_part.split_at(index),
        None => (hier_part, ""),
    };

    ensure!(!authority.is_empty(), UrlError::invalid_authority("authority is empty"));
    Authority::from_str(authority).map_err(UrlError::invalid_authority)?;

    Ok(if path.is_empty() { "/" } else { path })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_form() {
        let info = UrlInfo::parse("/index/?a=1&b=2#top").unwrap();
        assert_eq!(info.path(), "/index");
        assert_eq!(info.query(), Some("a=1&b=2"));
        assert_eq!(info.fragment(), Some("top"));
    }

    #[test]
    fn absent_components() {
        let info = UrlInfo::parse("/index.html").unwrap();
        assert_eq!(info.path(), "/index.html");
        assert_eq!(info.query(), None);
        assert_eq!(info.fragment(), None);
    }

    #[test]
    fn empty_components_are_present() {
        let info = UrlInfo::parse("/a?#").unwrap();
        assert_eq!(info.query(), Some(""));
        assert_eq!(info.fragment(), Some(""));
    }

    #[test]
    fn question_mark_inside_fragment() {
        let info = UrlInfo::parse("/a#x?y").unwrap();
        assert_eq!(info.query(), None);
        assert_eq!(info.fragment(), Some("x?y"));
    }

    #[test]
    fn trailing_separators_are_stripped() {
        for target in ["/foo", "/foo/", "/foo//", "/foo\\", "/foo/\\/"] {
            assert_eq!(UrlInfo::parse(target).unwrap().path(), "/foo", "target: {target}");
        }
    }

    #[test]
    fn root_is_kept() {
        assert_eq!(UrlInfo::parse("/").unwrap().path(), "/");
        assert_eq!(UrlInfo::parse("//").unwrap().path(), "/");
        assert_eq!(UrlInfo::parse("/?q=1").unwrap().path(), "/");
    }

    #[test]
    fn absolute_form() {
        let info = UrlInfo::parse("http://127.0.0.1:8080/users/?id=7").unwrap();
        assert_eq!(info.path(), "/users");
        assert_eq!(info.query(), Some("id=7"));

        let info = UrlInfo::parse("https://example.com").unwrap();
        assert_eq!(info.path(), "/");
        assert_eq!(info.query(), None);
    }

    #[test]
    fn asterisk_form() {
        assert_eq!(UrlInfo::parse("*").unwrap().path(), "*");
    }

    #[test]
    fn multi_byte_path() {
        let info = UrlInfo::parse("/文章/列表/").unwrap();
        assert_eq!(info.path(), "/文章/列表");
    }

    #[test]
    fn parse_failures() {
        assert_eq!(UrlInfo::parse(""), Err(UrlError::Empty));
        assert_eq!(UrlInfo::parse("/a b"), Err(UrlError::InvalidChar { ch: ' ', position: 2 }));
        assert!(matches!(UrlInfo::parse("/a\nb"), Err(UrlError::InvalidChar { ch: '\n', .. })));
        assert!(matches!(UrlInfo::parse("foo/bar"), Err(UrlError::UnsupportedForm { .. })));
        assert!(matches!(UrlInfo::parse("http:///x"), Err(UrlError::InvalidAuthority { .. })));
        assert!(matches!(UrlInfo::parse("1http://host/"), Err(UrlError::InvalidScheme { .. })));
        assert!(matches!(UrlInfo::parse("://host/"), Err(UrlError::InvalidScheme { .. })));
    }

    #[test]
    fn relative_path_outcomes() {
        let info = UrlInfo::parse("/app/users/").unwrap();
        assert_eq!(info.relative_path("/app/users"), Ok(""));
        assert_eq!(info.relative_path("/app/"), Ok("/users"));
        assert_eq!(info.relative_path("/app"), Ok("/users"));
        assert_eq!(
            info.relative_path("/admin"),
            Err(NotAPrefix { path: "/app/users".into(), base: "/admin".into() })
        );
    }

    #[test]
    fn relative_path_on_char_boundaries() {
        let info = UrlInfo::parse("/文章/列表").unwrap();
        assert_eq!(info.relative_path("/文章"), Ok("/列表"));
        assert!(info.relative_path("/文").is_ok());
        assert!(info.relative_path("/文字").is_err());
    }

    #[test]
    fn normalize_path_edges() {
        assert_eq!(normalize_path(""), "");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("\\\\"), "/");
        assert_eq!(normalize_path("/a/b/"), "/a/b");
    }
}
