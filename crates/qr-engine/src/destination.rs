//! Destination URL normalization and validation.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::QrError;

static RE_HTTP_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^https?://").unwrap());
// `name:rest` where rest is not a port number (`example.com:8080` is a host).
static RE_SCHEME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.-]*):(?://|[^0-9]|$)").unwrap());

/// A validated absolute `http`/`https` URL.
///
/// The only way to build one is through [`Destination::normalize`] or
/// [`Destination::parse_strict`], so holding a `Destination` means the
/// payload has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination(Url);

impl Destination {
    /// Normalize free-form user input.
    ///
    /// Bare domains (optionally with a port) get `https://` prepended. Any
    /// other explicit scheme is rejected instead of being folded into a host.
    pub fn normalize(input: &str) -> Result<Self, QrError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(QrError::EmptyDestination);
        }
        if RE_HTTP_PREFIX.is_match(trimmed) {
            return Self::parse_strict(trimmed);
        }
        if let Some(caps) = RE_SCHEME_PREFIX.captures(trimmed) {
            return Err(QrError::UnsupportedScheme(caps[1].to_ascii_lowercase()));
        }
        Self::parse_strict(&format!("https://{trimmed}"))
    }

    /// Parse an already-absolute URL without any rewriting.
    pub fn parse_strict(input: &str) -> Result<Self, QrError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(QrError::EmptyDestination);
        }
        let url = Url::parse(trimmed)?;
        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            other => Err(QrError::UnsupportedScheme(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_domain_gets_https() {
        let dest = Destination::normalize("example.com").unwrap();
        assert_eq!(dest.as_str(), "https://example.com/");
    }

    #[test]
    fn existing_scheme_is_kept_case_insensitively() {
        let dest = Destination::normalize("  HTTP://Example.com/menu ").unwrap();
        assert_eq!(dest.as_str(), "http://example.com/menu");
    }

    #[test]
    fn explicit_foreign_scheme_is_rejected() {
        assert!(matches!(
            Destination::normalize("ftp://files.example.com"),
            Err(QrError::UnsupportedScheme(s)) if s == "ftp"
        ));
        assert!(matches!(
            Destination::normalize("javascript://alert(1)"),
            Err(QrError::UnsupportedScheme(s)) if s == "javascript"
        ));
        assert!(matches!(
            Destination::normalize("mailto:a@example.com"),
            Err(QrError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn host_with_port_gets_https() {
        let dest = Destination::normalize("example.com:8080/menu").unwrap();
        assert_eq!(dest.as_str(), "https://example.com:8080/menu");
        let dest = Destination::normalize("localhost:3000").unwrap();
        assert_eq!(dest.as_str(), "https://localhost:3000/");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            Destination::normalize("   "),
            Err(QrError::EmptyDestination)
        ));
    }

    #[test]
    fn strict_parse_rejects_other_schemes() {
        assert!(matches!(
            Destination::parse_strict("ftp://example.com"),
            Err(QrError::UnsupportedScheme(s)) if s == "ftp"
        ));
        assert!(matches!(
            Destination::parse_strict("mailto:a@example.com"),
            Err(QrError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn strict_parse_rejects_relative() {
        assert!(matches!(
            Destination::parse_strict("example.com/path"),
            Err(QrError::InvalidDestination(_))
        ));
    }

    #[test]
    fn garbage_after_prefix_is_invalid() {
        assert!(Destination::normalize("https://").is_err());
        assert!(Destination::normalize("exa mple.com").is_err());
    }
}
