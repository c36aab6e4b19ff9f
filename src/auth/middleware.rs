// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication gate middleware.
//!
//! Runs once per request, before the session policy. It inspects the
//! `Authorization` header, verifies the bearer token if one is present, and
//! records an [`AuthDecision`] in the request extensions. The gate is an
//! interceptor, not a terminator: it always forwards the request and never
//! writes a response body. Whether a missing identity is fatal is decided
//! downstream by the session policy.
//!
//! A missing header, a non-Bearer scheme, and a token that fails
//! verification are treated uniformly as `NotAttempted`.
//!
//! Header values and tokens are credential-adjacent and are kept out of the
//! logs; only the outcome (and the verified subject, once the signature has
//! checked out) is recorded.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue},
    middleware::Next,
    response::Response,
};

use super::claims::{AuthDecision, AuthenticatedUser};
use super::token::TokenCodec;
use crate::state::AppState;

/// Credential scheme marker expected in the `Authorization` header.
const BEARER_PREFIX: &str = "Bearer ";

/// Authentication middleware. Compose with
/// `axum::middleware::from_fn_with_state` ahead of the policy layer.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let decision = decide(&state.tokens, request.headers().get(AUTHORIZATION));
    request.extensions_mut().insert(decision);
    next.run(request).await
}

/// The per-request decision procedure: single pass, terminal in one decision.
fn decide(codec: &TokenCodec, header: Option<&HeaderValue>) -> AuthDecision {
    // Absent header, undecodable header, or wrong scheme: the request
    // continues unauthenticated.
    let Some(token) = header
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
    else {
        tracing::debug!("no bearer credential presented");
        return AuthDecision::NotAttempted;
    };

    match codec.verify(token.trim()) {
        Ok(claims) => {
            let user = AuthenticatedUser::from_claims(claims);
            tracing::debug!(subject = %user.user_name, "request authenticated");
            AuthDecision::Authenticated(user)
        }
        Err(err) => {
            // Expired, forged and malformed tokens collapse to the same
            // outcome; the distinction stays in the logs.
            tracing::warn!(error = %err, "bearer token rejected");
            AuthDecision::NotAttempted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::Role;

    const HOUR_MS: i64 = 3_600_000;

    fn codec() -> TokenCodec {
        TokenCodec::new("gate-test-secret")
    }

    fn header(value: &str) -> HeaderValue {
        HeaderValue::from_str(value).unwrap()
    }

    #[test]
    fn missing_header_is_not_attempted() {
        assert_eq!(decide(&codec(), None), AuthDecision::NotAttempted);
    }

    #[test]
    fn non_bearer_scheme_is_not_attempted() {
        let codec = codec();
        for value in ["Basic dXNlcjpwYXNz", "bearer lowercase", "Token abc"] {
            assert_eq!(
                decide(&codec, Some(&header(value))),
                AuthDecision::NotAttempted,
                "{value:?} must not be treated as a bearer credential"
            );
        }
    }

    #[test]
    fn invalid_utf8_header_is_not_attempted() {
        let value = HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap();
        assert_eq!(decide(&codec(), Some(&value)), AuthDecision::NotAttempted);
    }

    #[test]
    fn valid_token_authenticates_subject() {
        let codec = codec();
        let token = codec.issue("alice", HOUR_MS);
        let decision = decide(&codec, Some(&header(&format!("Bearer {token}"))));
        assert_eq!(
            decision,
            AuthDecision::Authenticated(AuthenticatedUser {
                user_name: "alice".to_string(),
                role: Role::User,
            })
        );
    }

    #[test]
    fn expired_token_is_not_attempted() {
        let codec = codec();
        let token = codec.issue("alice", -1000);
        let decision = decide(&codec, Some(&header(&format!("Bearer {token}"))));
        assert_eq!(decision, AuthDecision::NotAttempted);
    }

    #[test]
    fn garbage_token_is_not_attempted() {
        let decision = decide(&codec(), Some(&header("Bearer not.a.token")));
        assert_eq!(decision, AuthDecision::NotAttempted);
    }

    #[test]
    fn token_from_other_key_is_not_attempted() {
        let other = TokenCodec::new("some-other-secret");
        let token = other.issue("alice", HOUR_MS);
        let decision = decide(&codec(), Some(&header(&format!("Bearer {token}"))));
        assert_eq!(decision, AuthDecision::NotAttempted);
    }
}
