// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for the identity established by the gate.
//!
//! Use the `CurrentUser` extractor in handlers behind a `RequiresIdentity`
//! path:
//!
//! ```rust,ignore
//! async fn my_handler(CurrentUser(user): CurrentUser) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```
//!
//! The extractor only reads what the gate stored in the request extensions;
//! it performs no verification of its own. On an open path where the caller
//! presented no valid token the extractor rejects, mirroring the policy's
//! uniform 401.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::claims::{AuthDecision, AuthenticatedUser};
use crate::error::AppError;

/// Extractor for the verified identity of the current request.
pub struct CurrentUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthDecision>()
            .and_then(|decision| decision.identity())
            .cloned()
            .map(CurrentUser)
            .ok_or(AppError::AuthorizationDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::Role;
    use axum::http::Request;

    fn parts_with(decision: Option<AuthDecision>) -> Parts {
        let mut parts = Request::builder()
            .uri("/api/v1/reviews")
            .body(())
            .unwrap()
            .into_parts()
            .0;
        if let Some(decision) = decision {
            parts.extensions.insert(decision);
        }
        parts
    }

    #[tokio::test]
    async fn extracts_authenticated_identity() {
        let user = AuthenticatedUser {
            user_name: "alice".to_string(),
            role: Role::User,
        };
        let mut parts = parts_with(Some(AuthDecision::Authenticated(user.clone())));

        let CurrentUser(extracted) = CurrentUser::from_request_parts(&mut parts, &())
            .await
            .expect("identity available");
        assert_eq!(extracted, user);
    }

    #[tokio::test]
    async fn rejects_when_gate_did_not_authenticate() {
        let mut parts = parts_with(Some(AuthDecision::NotAttempted));
        let result = CurrentUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::AuthorizationDenied)));
    }

    #[tokio::test]
    async fn rejects_when_gate_never_ran() {
        let mut parts = parts_with(None);
        let result = CurrentUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::AuthorizationDenied)));
    }
}
