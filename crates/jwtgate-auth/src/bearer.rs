//! Bearer token extraction from the Authorization header

use axum::http::{HeaderMap, header};

const BEARER_SCHEME: &str = "Bearer";

/// Extract the token from an `Authorization` header value.
///
/// The value must be the case-sensitive scheme `Bearer`, at least one
/// whitespace character, then a non-blank token. Anything else yields `None`.
///
/// ```
/// use jwtgate_auth::bearer::extract_bearer_token;
///
/// assert_eq!(extract_bearer_token(Some("Bearer foo")), Some("foo"));
/// assert_eq!(extract_bearer_token(Some("Bearer")), None);
/// assert_eq!(extract_bearer_token(None), None);
/// ```
pub fn extract_bearer_token(header_value: Option<&str>) -> Option<&str> {
    let rest = header_value?.strip_prefix(BEARER_SCHEME)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let token = rest.trim_start();
    if token.is_empty() { None } else { Some(token) }
}

/// Raw `Authorization` header as text.
///
/// A header that is present but not valid visible ASCII is returned as an
/// empty string so that it reads as malformed rather than absent.
pub fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::AUTHORIZATION).map(|value| value.to_str().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_extract_bearer_token_success() {
        assert_eq!(extract_bearer_token(Some("Bearer test-token-123")), Some("test-token-123"));
    }

    #[test]
    fn test_extract_bearer_token_with_whitespace() {
        assert_eq!(extract_bearer_token(Some("Bearer \t  abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn test_extract_bearer_token_scheme_only() {
        assert_eq!(extract_bearer_token(Some("Bearer")), None);
        assert_eq!(extract_bearer_token(Some("Bearer ")), None);
        assert_eq!(extract_bearer_token(Some("Bearer    ")), None);
    }

    #[test]
    fn test_extract_bearer_token_requires_separator() {
        assert_eq!(extract_bearer_token(Some("Bearerfoo")), None);
    }

    #[test]
    fn test_extract_bearer_token_case_sensitive() {
        assert_eq!(extract_bearer_token(Some("bearer foo")), None);
        assert_eq!(extract_bearer_token(Some("BEARER foo")), None);
    }

    #[test]
    fn test_extract_bearer_token_wrong_scheme() {
        assert_eq!(extract_bearer_token(Some("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_bearer_token(Some("")), None);
    }

    #[test]
    fn test_extract_bearer_token_missing_header() {
        assert_eq!(extract_bearer_token(None), None);
    }

    #[test]
    fn test_authorization_header_lookup() {
        let mut headers = HeaderMap::new();
        assert_eq!(authorization_header(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer foo"));
        assert_eq!(authorization_header(&headers), Some("Bearer foo"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_bytes(b"Bearer \xff").unwrap());
        assert_eq!(authorization_header(&headers), Some(""));
    }
}
