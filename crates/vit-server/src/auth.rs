//! Admin bearer-token guard and the acting-user extractor.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::ApiError;
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Optional header naming who performed a mutation, recorded in the audit trail.
pub const ACTOR_HEADER: &str = "x-vitrine-actor";

/// Whether `headers` carry the configured admin token. Always true when no
/// token is configured.
pub fn is_admin(headers: &HeaderMap, state: &AppState) -> bool {
    if !state.config.server.requires_auth() {
        return true;
    }
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| token_matches(token.trim(), &state.config.server.admin_token))
}

/// Compare tokens through HMAC digests keyed by the expected token, so the
/// comparison is constant-time and independent of either token's length.
fn token_matches(presented: &str, expected: &str) -> bool {
    let keyed = || HmacSha256::new_from_slice(expected.as_bytes());
    let (Ok(mut want), Ok(mut got)) = (keyed(), keyed()) else {
        return false;
    };
    want.update(expected.as_bytes());
    got.update(presented.as_bytes());
    got.verify_slice(&want.finalize().into_bytes()).is_ok()
}

pub async fn require_admin(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if is_admin(request.headers(), &state) {
        next.run(request).await
    } else {
        tracing::debug!(route = %request.uri().path(), "rejected unauthenticated admin request");
        ApiError::unauthorized().into_response()
    }
}

/// The acting user for audit entries, taken from [`ACTOR_HEADER`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actor(pub Option<String>);

impl Actor {
    #[must_use]
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub(crate) fn from_headers(headers: &HeaderMap) -> Self {
        Self(
            headers
                .get(ACTOR_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToString::to_string),
        )
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Actor {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("s3cret", true)]
    #[case("s3cre7", false)]
    #[case("s3cret!", false)]
    #[case("s3cr", false)]
    #[case("", false)]
    fn compares_tokens_exactly(#[case] presented: &str, #[case] accepted: bool) {
        assert_eq!(token_matches(presented, "s3cret"), accepted);
    }

    #[test]
    fn actor_header_is_trimmed_and_optional() {
        let mut headers = HeaderMap::new();
        assert_eq!(Actor::from_headers(&headers), Actor(None));
        headers.insert(ACTOR_HEADER, HeaderValue::from_static("  ada  "));
        assert_eq!(Actor::from_headers(&headers).as_deref(), Some("ada"));
        headers.insert(ACTOR_HEADER, HeaderValue::from_static("   "));
        assert_eq!(Actor::from_headers(&headers), Actor(None));
    }
}
