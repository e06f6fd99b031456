//! Utility functions and helpers.

pub mod console;
pub mod http;

use url::Url;

use crate::error::{AppError, Result};

/// Parse a page URL given on the command line. Only http(s) is accepted.
pub fn parse_page_url(input: &str) -> Result<Url> {
    let url = Url::parse(input.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::validation(format!(
            "unsupported URL scheme '{other}' in {input}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_url() {
        let url = parse_page_url(" https://developer.harmonyos.com/cn/docs ").unwrap();
        assert_eq!(url.host_str(), Some("developer.harmonyos.com"));
    }

    #[test]
    fn test_parse_page_url_rejects_other_schemes() {
        assert!(matches!(
            parse_page_url("ftp://example.com/file"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(parse_page_url("not a url"), Err(AppError::Url(_))));
    }
}
