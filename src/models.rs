// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response structures for the REST API, plus the stored user
//! record. API types derive `Serialize`/`Deserialize` and `ToSchema` for
//! JSON handling and OpenAPI documentation. Wire field names are camelCase
//! to stay compatible with existing clients.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// User Models
// =============================================================================

/// A stored user. Only the bcrypt hash of the password is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user_name: String,
    pub password_hash: String,
}

/// Request body for `POST /api/v1/users/join`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    /// Desired username; must not already be registered.
    pub user_name: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
}

/// Response body for a successful registration.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JoinResponse {
    pub result: String,
}

/// Request body for `POST /api/v1/users/login`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

/// Response body for a successful login: the signed bearer token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

// =============================================================================
// Review Models
// =============================================================================

/// Response body for a registered review.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub message: String,
}
