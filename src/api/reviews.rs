// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Review endpoints.
//!
//! The identity comes from the token, so the request body carries no
//! username.

use axum::Json;

use crate::auth::CurrentUser;
use crate::models::ReviewResponse;

/// Register a review as the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    tag = "Reviews",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Review registered", body = ReviewResponse),
        (status = 401, description = "Authentication required"),
    )
)]
pub async fn write_review(CurrentUser(user): CurrentUser) -> Json<ReviewResponse> {
    Json(ReviewResponse {
        message: format!("{}'s review has been registered.", user.user_name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthenticatedUser, Role};

    #[tokio::test]
    async fn review_message_names_the_verified_identity() {
        let Json(response) = write_review(CurrentUser(AuthenticatedUser {
            user_name: "alice".to_string(),
            role: Role::User,
        }))
        .await;
        assert_eq!(response.message, "alice's review has been registered.");
    }
}
