// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::{SessionPolicy, TokenCodec};
use crate::config::AppConfig;
use crate::store::InMemoryUserStore;

/// Shared application state.
///
/// The token codec and policy are read-only after construction and need no
/// locking; the user store is the only mutable piece.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryUserStore>>,
    pub tokens: Arc<TokenCodec>,
    pub policy: Arc<SessionPolicy>,
    /// Lifetime applied to tokens issued at login, in milliseconds.
    pub token_ttl_ms: i64,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(InMemoryUserStore::new())),
            tokens: Arc::new(TokenCodec::new(config.jwt_secret.as_bytes())),
            policy: Arc::new(SessionPolicy::service_default()),
            token_ttl_ms: config.token_ttl_ms,
        }
    }
}
