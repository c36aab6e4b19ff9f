// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User registration and login.

use axum::{extract::State, Json};

use crate::auth::password;
use crate::error::AppError;
use crate::models::{JoinRequest, JoinResponse, LoginRequest, TokenResponse, UserRecord};
use crate::state::AppState;

/// Register a new user.
///
/// The username must be unused; the password is bcrypt-hashed before it is
/// stored.
#[utoipa::path(
    post,
    path = "/api/v1/users/join",
    request_body = JoinRequest,
    tag = "Users",
    responses(
        (status = 200, description = "User registered", body = JoinResponse),
        (status = 409, description = "Username already registered"),
    )
)]
pub async fn join(
    State(state): State<AppState>,
    Json(request): Json<JoinRequest>,
) -> Result<Json<JoinResponse>, AppError> {
    {
        let store = state.store.read().await;
        if store.find_by_username(&request.user_name).is_some() {
            return Err(AppError::UsernameDuplicated(request.user_name));
        }
    }

    let password_hash = password::hash(&request.password).await?;

    // Hashing ran outside the lock; check again before inserting.
    let mut store = state.store.write().await;
    if store.find_by_username(&request.user_name).is_some() {
        return Err(AppError::UsernameDuplicated(request.user_name));
    }
    store.save(UserRecord {
        user_name: request.user_name.clone(),
        password_hash,
    });

    tracing::info!(subject = %request.user_name, "user registered");
    Ok(Json(JoinResponse {
        result: "SUCCESS".to_string(),
    }))
}

/// Log in and receive a signed bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    request_body = LoginRequest,
    tag = "Users",
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 404, description = "Username not found"),
        (status = 401, description = "Password is incorrect"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let stored = state
        .store
        .read()
        .await
        .find_by_username(&request.user_name)
        .ok_or_else(|| AppError::UsernameNotFound(request.user_name.clone()))?;

    if !password::matches(&request.password, &stored.password_hash).await? {
        return Err(AppError::InvalidPassword);
    }

    let token = state.tokens.issue(&stored.user_name, state.token_ttl_ms);
    tracing::info!(subject = %stored.user_name, "login succeeded, token issued");
    Ok(Json(TokenResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::http::StatusCode;

    fn test_state() -> AppState {
        AppState::new(&AppConfig {
            jwt_secret: "users-test-secret".to_string(),
            token_ttl_ms: 3_600_000,
            host: "127.0.0.1".to_string(),
            port: 0,
        })
    }

    fn join_request(name: &str) -> Json<JoinRequest> {
        Json(JoinRequest {
            user_name: name.to_string(),
            password: "hunter2!".to_string(),
        })
    }

    #[tokio::test]
    async fn join_stores_hashed_password() {
        let state = test_state();
        let Json(response) = join(State(state.clone()), join_request("alice"))
            .await
            .expect("join succeeds");
        assert_eq!(response.result, "SUCCESS");

        let stored = state
            .store
            .read()
            .await
            .find_by_username("alice")
            .expect("user stored");
        assert_ne!(stored.password_hash, "hunter2!");
    }

    #[tokio::test]
    async fn duplicate_join_conflicts() {
        let state = test_state();
        join(State(state.clone()), join_request("alice"))
            .await
            .expect("first join succeeds");

        let err = join(State(state.clone()), join_request("alice"))
            .await
            .expect_err("duplicate rejected");
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() {
        let state = test_state();
        join(State(state.clone()), join_request("alice"))
            .await
            .expect("join succeeds");

        let Json(response) = login(
            State(state.clone()),
            Json(LoginRequest {
                user_name: "alice".to_string(),
                password: "hunter2!".to_string(),
            }),
        )
        .await
        .expect("login succeeds");

        let claims = state
            .tokens
            .verify(&response.token)
            .expect("issued token verifies");
        assert_eq!(claims.user_name, "alice");
    }

    #[tokio::test]
    async fn login_unknown_user_is_not_found() {
        let state = test_state();
        let err = login(
            State(state),
            Json(LoginRequest {
                user_name: "nobody".to_string(),
                password: "whatever".to_string(),
            }),
        )
        .await
        .expect_err("unknown user rejected");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn login_wrong_password_is_unauthorized() {
        let state = test_state();
        join(State(state.clone()), join_request("alice"))
            .await
            .expect("join succeeds");

        let err = login(
            State(state),
            Json(LoginRequest {
                user_name: "alice".to_string(),
                password: "wrong-password".to_string(),
            }),
        )
        .await
        .expect_err("wrong password rejected");
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }
}
