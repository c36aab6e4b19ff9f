// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session policy: which paths demand an authenticated identity.
//!
//! The policy is a static rule table evaluated after the authentication
//! gate has run. Matching is prefix-based with explicit precedence: the
//! longest matching prefix wins, and at equal length a method-specific rule
//! beats a method-agnostic one. Rule order in the table carries no meaning.
//!
//! Paths matched by no rule are open. The registration and login endpoints
//! carry their own `Open` rules even though the broad `/api/` rule already
//! covers them, so the guarantee survives any change to the broad rule.

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::claims::AuthDecision;
use crate::error::AppError;
use crate::state::AppState;

/// Requirement a rule places on matching requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No identity needed; the request proceeds regardless of the gate's
    /// decision.
    Open,
    /// The request is rejected unless the gate produced `Authenticated`.
    RequiresIdentity,
}

/// One entry in the policy table.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Restrict the rule to one HTTP method; `None` matches every method.
    pub method: Option<Method>,
    /// Path prefix the rule applies to.
    pub prefix: &'static str,
    pub access: Access,
}

impl Rule {
    pub fn open(prefix: &'static str) -> Self {
        Self {
            method: None,
            prefix,
            access: Access::Open,
        }
    }

    pub fn requires_identity(method: Method, prefix: &'static str) -> Self {
        Self {
            method: Some(method),
            prefix,
            access: Access::RequiresIdentity,
        }
    }
}

/// Static table mapping request paths to an access requirement.
#[derive(Debug, Clone)]
pub struct SessionPolicy {
    rules: Vec<Rule>,
}

impl SessionPolicy {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The service's policy table.
    ///
    /// Everything under `/api/` is open except posting reviews, which is
    /// the one operation that needs a verified identity. Join and login
    /// stay explicitly open.
    pub fn service_default() -> Self {
        Self::new(vec![
            Rule::open("/api/"),
            Rule::open("/api/v1/users/join"),
            Rule::open("/api/v1/users/login"),
            Rule::requires_identity(Method::POST, "/api/v1/reviews"),
        ])
    }

    /// Resolve the requirement for one request.
    pub fn evaluate(&self, method: &Method, path: &str) -> Access {
        self.rules
            .iter()
            .filter(|rule| {
                path.starts_with(rule.prefix)
                    && rule.method.as_ref().is_none_or(|m| m == method)
            })
            .max_by_key(|rule| (rule.prefix.len(), rule.method.is_some()))
            .map(|rule| rule.access)
            .unwrap_or(Access::Open)
    }
}

/// Policy enforcement middleware. Compose after [`super::middleware::authenticate`]
/// so the gate's decision is already in the request extensions.
pub async fn enforce(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let access = state.policy.evaluate(request.method(), request.uri().path());

    if access == Access::RequiresIdentity {
        let authenticated = request
            .extensions()
            .get::<AuthDecision>()
            .is_some_and(|decision| decision.identity().is_some());

        if !authenticated {
            tracing::info!(path = %request.uri().path(), "identity required but not established");
            // Record the terminal decision before refusing the request.
            request.extensions_mut().insert(AuthDecision::Rejected {
                reason: "identity required",
            });
            return AppError::AuthorizationDenied.into_response();
        }
    }

    next.run(request).await
}
