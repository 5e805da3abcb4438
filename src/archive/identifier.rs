//! Archive identifier normalization
//!
//! Accepts a bare identifier, a path-style `/identifier`, or a full
//! `archive.org/details/<id>` URL and reduces all of them to the bare
//! identifier.

use crate::error::{Result, ShellacError};

const DETAILS_MARKER: &str = "archive.org/details/";

/// Normalize free-form identifier input.
pub fn normalize_identifier(raw: &str) -> Result<String> {
    let mut identifier = raw.trim().trim_start_matches('/');

    if let Some(pos) = identifier.find(DETAILS_MARKER) {
        let rest = &identifier[pos + DETAILS_MARKER.len()..];
        identifier = rest.split('/').next().unwrap_or("");
    }

    let identifier = identifier.split('?').next().unwrap_or("").trim();
    if identifier.is_empty() {
        return Err(ShellacError::InvalidIdentifier(raw.to_string()));
    }
    Ok(identifier.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_identifier_passes_through() {
        assert_eq!(normalize_identifier("foo123").unwrap(), "foo123");
    }

    #[test]
    fn leading_slashes_are_stripped() {
        assert_eq!(normalize_identifier("/foo123").unwrap(), "foo123");
        assert_eq!(normalize_identifier("//foo123").unwrap(), "foo123");
    }

    #[test]
    fn details_url_yields_the_identifier() {
        assert_eq!(
            normalize_identifier("https://archive.org/details/78_record_01").unwrap(),
            "78_record_01"
        );
        assert_eq!(
            normalize_identifier("archive.org/details/abc/extra/path").unwrap(),
            "abc"
        );
    }

    #[test]
    fn query_strings_are_dropped() {
        assert_eq!(
            normalize_identifier("https://archive.org/details/abc?tab=about").unwrap(),
            "abc"
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(normalize_identifier("").is_err());
        assert!(normalize_identifier("  /  ").is_err());
        assert!(normalize_identifier("https://archive.org/details/").is_err());
    }
}
