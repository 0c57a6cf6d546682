/**
 * Credential Extraction
 *
 * Pulls the raw token out of an incoming request. Where the token travels is
 * a deployment choice (`TokenTransport`), so the middleware only ever sees a
 * `CredentialExtractor`.
 */

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;

use crate::shared::TokenTransport;

/// Name of the cookie carrying the access token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Finds a presented token in request headers
pub trait CredentialExtractor: Send + Sync {
    /// Return the token if one is present; `None` if the request carries none
    fn extract(&self, headers: &HeaderMap) -> Option<String>;
}

/// `Authorization: Bearer <token>`
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerHeader;

impl CredentialExtractor for BearerHeader {
    fn extract(&self, headers: &HeaderMap) -> Option<String> {
        let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
        let (scheme, token) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }
        let token = token.trim();
        (!token.is_empty()).then(|| token.to_string())
    }
}

/// `Cookie: access_token=<token>`
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessTokenCookie;

impl CredentialExtractor for AccessTokenCookie {
    fn extract(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, value)| *name == ACCESS_TOKEN_COOKIE && !value.is_empty())
            .map(|(_, value)| value.trim_matches('"').to_string())
    }
}

/// Tries each extractor in order and returns the first hit
pub struct FirstMatch {
    extractors: Vec<Box<dyn CredentialExtractor>>,
}

impl FirstMatch {
    pub fn new(extractors: Vec<Box<dyn CredentialExtractor>>) -> Self {
        Self { extractors }
    }
}

impl CredentialExtractor for FirstMatch {
    fn extract(&self, headers: &HeaderMap) -> Option<String> {
        self.extractors
            .iter()
            .find_map(|extractor| extractor.extract(headers))
    }
}

/// Build the extractor for a configured transport
///
/// `Both` prefers the header over the cookie.
pub fn from_transport(transport: TokenTransport) -> Box<dyn CredentialExtractor> {
    match transport {
        TokenTransport::Header => Box::new(BearerHeader),
        TokenTransport::Cookie => Box::new(AccessTokenCookie),
        TokenTransport::Both => Box::new(FirstMatch::new(vec![
            Box::new(BearerHeader),
            Box::new(AccessTokenCookie),
        ])),
    }
}
