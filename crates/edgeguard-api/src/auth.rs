use std::fmt;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Scheme prefix the API expects in front of every key.
pub const TOKEN_PREFIX: &str = "APIKey";

/// API key for the protection API.
///
/// Keys are accepted with or without the `APIKey ` prefix (in any case);
/// the prefix is stripped on construction and re-added exactly once when
/// the `Authorization` header is built.
#[derive(Clone)]
pub struct ApiKey {
    token: SecretString,
}

impl ApiKey {
    pub fn new(raw: &str) -> Self {
        Self {
            token: SecretString::from(strip_prefix(raw).to_owned()),
        }
    }

    pub fn from_secret(raw: &SecretString) -> Self {
        Self::new(raw.expose_secret())
    }

    /// `APIKey <token>`, marked sensitive so it never shows up in `Debug`.
    pub fn header_value(&self) -> Result<HeaderValue, Error> {
        let mut value =
            HeaderValue::from_str(&format!("{TOKEN_PREFIX} {}", self.token.expose_secret()))
                .map_err(|e| Error::InvalidApiKey {
                    message: format!("invalid header value: {e}"),
                })?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Default headers carrying this key, for `reqwest::ClientBuilder`.
    pub fn default_headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.header_value()?);
        Ok(headers)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey").field("token", &"<REDACTED>").finish()
    }
}

fn strip_prefix(raw: &str) -> &str {
    let raw = raw.trim();
    match raw.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case(TOKEN_PREFIX) => rest.trim_start(),
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(raw: &str) -> String {
        ApiKey::new(raw)
            .header_value()
            .unwrap()
            .to_str()
            .unwrap()
            .to_owned()
    }

    #[test]
    fn prefixed_and_bare_keys_produce_same_header() {
        assert_eq!(header("APIKey abc123"), "APIKey abc123");
        assert_eq!(header("abc123"), "APIKey abc123");
        assert_eq!(header("apikey abc123"), "APIKey abc123");
        assert_eq!(header("APIKEY   abc123"), "APIKey abc123");
    }

    #[test]
    fn other_schemes_are_kept_verbatim() {
        assert_eq!(header("Bearer abc"), "APIKey Bearer abc");
    }

    #[test]
    fn header_value_is_sensitive() {
        let value = ApiKey::new("abc123").header_value().unwrap();
        assert!(value.is_sensitive());
    }

    #[test]
    fn debug_redacts_token() {
        let dbg = format!("{:?}", ApiKey::new("super-secret"));
        assert!(!dbg.contains("super-secret"));
    }

    #[test]
    fn control_characters_are_rejected() {
        let err = ApiKey::new("abc\ndef").header_value().unwrap_err();
        assert!(matches!(err, Error::InvalidApiKey { .. }));
    }
}
