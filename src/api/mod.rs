// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use crate::{
    auth::{middleware::authenticate, policy::enforce},
    models::{JoinRequest, JoinResponse, LoginRequest, ReviewResponse, TokenResponse},
    state::AppState,
};

pub mod health;
pub mod reviews;
pub mod users;

/// Request-id source for the `x-request-id` header.
#[derive(Clone, Copy, Default)]
struct RequestUuid;

impl MakeRequestId for RequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(id))
    }
}

/// Build the application router.
///
/// The authentication gate and the session policy are composed explicitly
/// as an ordered middleware chain: the gate runs first and records the
/// decision, the policy runs second and enforces it.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/v1/users/join", post(users::join))
        .route("/api/v1/users/login", post(users::login))
        .route("/api/v1/reviews", post(reviews::write_review))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .layer(middleware::from_fn_with_state(state.clone(), enforce))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .with_state(state);

    Router::new()
        .merge(api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(RequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        users::join,
        users::login,
        reviews::write_review,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            JoinRequest,
            JoinResponse,
            LoginRequest,
            TokenResponse,
            ReviewResponse,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Users", description = "Registration and login"),
        (name = "Reviews", description = "Review registration"),
        (name = "Health", description = "Service health probes")
    )
)]
struct ApiDoc;
