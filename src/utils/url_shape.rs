//! Syntactic URL-shape check for submitted source links.
//!
//! This is deliberately loose: an optional `http(s)://` scheme, a domain-like
//! `label.label` token, and anything after it except whitespace and `@`.
//! It does not resolve or normalize the link.

use regex::Regex;
use std::sync::LazyLock;

/// Compiled pattern for URL-like strings.
pub static SRC_LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?([\w-]{1,32}\.[\w-]{1,32})[^\s@]*$")
        .expect("source link pattern is valid")
});

/// Returns true if `link` looks like a URL.
pub fn is_url_like(link: &str) -> bool {
    SRC_LINK_REGEX.is_match(link)
}
