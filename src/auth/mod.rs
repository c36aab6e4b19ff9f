// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless bearer-token authentication for the Review API.
//!
//! ## Auth Flow
//!
//! 1. Client registers (`/api/v1/users/join`) and logs in
//!    (`/api/v1/users/login`)
//! 2. Login verifies the password and issues a signed token with the
//!    username and an expiry
//! 3. Client sends `Authorization: Bearer <token>` on later requests
//! 4. The gate middleware verifies the token and attaches the identity to
//!    the request; the session policy decides whether a missing identity
//!    blocks the request
//!
//! ## Security
//!
//! - Tokens are HMAC-SHA256 signed; signature comparison is constant-time
//! - No claim is read before the signature has been verified
//! - Token failures are indistinguishable to clients: expired, forged and
//!   malformed tokens all yield the same unauthenticated outcome
//! - The signing key is loaded once at startup and never rotated

pub mod claims;
pub mod extractor;
pub mod middleware;
pub mod password;
pub mod policy;
pub mod token;

pub use claims::{AuthDecision, AuthenticatedUser, Role};
pub use extractor::CurrentUser;
pub use policy::{Access, Rule, SessionPolicy};
pub use token::{Claims, TokenCodec, TokenError};
