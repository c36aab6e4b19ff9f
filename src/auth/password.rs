// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing and verification.
//!
//! One-way bcrypt hashing. Both operations are CPU-bound and run on the
//! blocking thread pool so login and registration never stall the async
//! workers handling other requests.

use bcrypt::DEFAULT_COST;

use crate::error::AppError;

/// Hash a plaintext password for storage.
pub async fn hash(plaintext: &str) -> Result<String, AppError> {
    hash_with_cost(plaintext, DEFAULT_COST).await
}

/// Check a plaintext password against a stored hash.
pub async fn matches(plaintext: &str, stored_hash: &str) -> Result<bool, AppError> {
    let plaintext = plaintext.to_string();
    let stored_hash = stored_hash.to_string();

    tokio::task::spawn_blocking(move || {
        bcrypt::verify(plaintext, &stored_hash).map_err(|e| AppError::Internal(e.to_string()))
    })
    .await
    .map_err(|e| AppError::Internal(format!("join error: {e}")))?
}

async fn hash_with_cost(plaintext: &str, cost: u32) -> Result<String, AppError> {
    let plaintext = plaintext.to_string();

    tokio::task::spawn_blocking(move || {
        bcrypt::hash(plaintext, cost).map_err(|e| AppError::Internal(e.to_string()))
    })
    .await
    .map_err(|e| AppError::Internal(format!("join error: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost keeps the tests fast.
    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn hash_then_matches_round_trip() {
        let hashed = hash_with_cost("hunter2!", TEST_COST).await.expect("hash");
        assert!(matches("hunter2!", &hashed).await.expect("verify"));
        assert!(!matches("wrong-password", &hashed).await.expect("verify"));
    }

    #[tokio::test]
    async fn hashes_are_salted() {
        let first = hash_with_cost("hunter2!", TEST_COST).await.expect("hash");
        let second = hash_with_cost("hunter2!", TEST_COST).await.expect("hash");
        assert_ne!(first, second);
    }
}
