// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Verified identity and the per-request authentication decision.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::token::Claims;

/// Authorization scope attached to a verified identity.
///
/// The service grants a single fixed scope to every authenticated caller;
/// there is no role hierarchy or per-user role storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "USER"),
        }
    }
}

/// Identity established for a single request from a verified token.
///
/// Created by the authentication gate, attached to the request's extensions,
/// and discarded when the request completes. Never persisted, never shared
/// across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// The verified subject from the token's `userName` claim.
    pub user_name: String,
    /// Fixed authorization scope.
    pub role: Role,
}

impl AuthenticatedUser {
    /// Build an identity from a verified claim set.
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_name: claims.user_name,
            role: Role::User,
        }
    }
}

/// Outcome of the authentication gate for one request.
///
/// Produced exactly once per request and stored in the request extensions.
/// The gate itself only ever yields `Authenticated` or `NotAttempted`; the
/// session policy upgrades `NotAttempted` to `Rejected` when the path
/// demands an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    /// A valid, unexpired token established this identity.
    Authenticated(AuthenticatedUser),
    /// The path required an identity and none was established.
    Rejected { reason: &'static str },
    /// No credential was presented, or the presented one did not verify.
    /// The request continues without identity.
    NotAttempted,
}

impl AuthDecision {
    /// The identity carried by an `Authenticated` decision.
    pub fn identity(&self) -> Option<&AuthenticatedUser> {
        match self {
            AuthDecision::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_claims_extracts_subject_and_fixed_role() {
        let claims = Claims {
            user_name: "alice".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_003_600,
        };
        let user = AuthenticatedUser::from_claims(claims);
        assert_eq!(user.user_name, "alice");
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"USER\"");
        assert_eq!(Role::User.to_string(), "USER");
    }

    #[test]
    fn identity_is_only_present_when_authenticated() {
        let user = AuthenticatedUser {
            user_name: "alice".to_string(),
            role: Role::User,
        };
        assert!(AuthDecision::Authenticated(user).identity().is_some());
        assert!(AuthDecision::NotAttempted.identity().is_none());
        assert!(AuthDecision::Rejected {
            reason: "identity required"
        }
        .identity()
        .is_none());
    }
}
