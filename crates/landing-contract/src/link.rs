//! # Link Hygiene
//!
//! Every URL-bearing field must be an absolute `https` URL. Fields come in
//! two classes: hard links (call-to-action targets) where a bad URL makes
//! the document invalid, and soft links where a bad URL is dropped with a
//! warning.

use url::Url;

/// How a failing URL in a given field is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkClass {
    /// Rejection is an error.
    Hard,
    /// Rejection is a warning; the normalizer drops the value.
    Soft,
}

/// Why a URL was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkProblem {
    /// Not an absolute URL.
    Unparseable(String),
    /// Parsed, but the scheme is not `https`.
    Insecure(String),
}

impl LinkProblem {
    pub fn describe(&self, value: &str) -> String {
        match self {
            Self::Unparseable(reason) => {
                format!("'{value}' is not an absolute URL ({reason})")
            }
            Self::Insecure(scheme) => {
                format!("'{value}' uses scheme '{scheme}'; only https links are allowed")
            }
        }
    }
}

/// Parse `value` (trimmed) as an absolute `https` URL with a host.
pub fn parse_https(value: &str) -> Result<Url, LinkProblem> {
    let url = Url::parse(value.trim()).map_err(|e| LinkProblem::Unparseable(e.to_string()))?;
    if url.scheme() != "https" {
        return Err(LinkProblem::Insecure(url.scheme().to_string()));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(LinkProblem::Unparseable("missing host".to_string()));
    }
    Ok(url)
}

/// The canonical spelling of an accepted link, or `None` if it fails.
pub fn canonical_https(value: &str) -> Option<String> {
    parse_https(value).ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_https() {
        let url = parse_https("https://example.com").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn rejects_http_as_insecure() {
        assert_eq!(
            parse_https("http://example.com"),
            Err(LinkProblem::Insecure("http".to_string()))
        );
    }

    #[test]
    fn rejects_other_schemes() {
        for value in ["javascript:alert(1)", "mailto:a@b.co", "ftp://example.com"] {
            assert!(
                matches!(parse_https(value), Err(LinkProblem::Insecure(_))),
                "{value} should be insecure"
            );
        }
    }

    #[test]
    fn rejects_relative_and_garbage() {
        for value in ["example.com", "/pricing", "", "not a url"] {
            assert!(
                matches!(parse_https(value), Err(LinkProblem::Unparseable(_))),
                "{value:?} should be unparseable"
            );
        }
    }

    #[test]
    fn canonical_spelling_lowercases_host() {
        assert_eq!(
            canonical_https("  HTTPS://Example.COM ").as_deref(),
            Some("https://example.com/")
        );
        assert_eq!(canonical_https("http://example.com"), None);
    }

    #[test]
    fn problem_messages_name_the_value() {
        let msg = LinkProblem::Insecure("http".to_string()).describe("http://x.io");
        assert!(msg.contains("http://x.io"));
        assert!(msg.contains("https"));
    }
}
