// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Service-boundary errors.
//!
//! Every domain error is mapped here to a uniform JSON envelope at the HTTP
//! boundary. Token verification errors never appear in this enum: the gate
//! collapses them to an unauthenticated outcome before the policy layer
//! runs, so a client can not distinguish an expired token from a forged one.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type surfaced to HTTP clients.
#[derive(Debug)]
pub enum AppError {
    /// A user with this name already exists (registration).
    UsernameDuplicated(String),
    /// No user with this name exists (login).
    UsernameNotFound(String),
    /// Password does not match the stored hash (login).
    InvalidPassword,
    /// The path requires an authenticated identity and none was established.
    AuthorizationDenied,
    /// Internal failure (hashing, task join).
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    error_code: String,
}

impl AppError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::UsernameDuplicated(_) => "username_duplicated",
            AppError::UsernameNotFound(_) => "username_not_found",
            AppError::InvalidPassword => "invalid_password",
            AppError::AuthorizationDenied => "authorization_denied",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UsernameDuplicated(_) => StatusCode::CONFLICT,
            AppError::UsernameNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidPassword | AppError::AuthorizationDenied => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::UsernameDuplicated(name) => {
                write!(f, "Username '{name}' is already registered")
            }
            AppError::UsernameNotFound(name) => write!(f, "Username '{name}' was not found"),
            AppError::InvalidPassword => write!(f, "Password is incorrect"),
            // Deliberately generic: does not reveal which check failed.
            AppError::AuthorizationDenied => write!(f, "Authentication required"),
            AppError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
