// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Campus Map Contributors

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::ai::RecommendationClient;
use crate::auth::TokenCodec;
use crate::store::InMemoryStore;

/// Shared application state, cloned per request.
///
/// The token codec and the AI client are read-only after startup; only the
/// store is behind a lock.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub tokens: Arc<TokenCodec>,
    pub ai: Arc<RecommendationClient>,
}

impl AppState {
    pub fn new(store: InMemoryStore, tokens: TokenCodec, ai: RecommendationClient) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            tokens: Arc::new(tokens),
            ai: Arc::new(ai),
        }
    }

    /// State with an empty store, a fixed test secret, and no AI client.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(
            InMemoryStore::new(),
            TokenCodec::new("test-secret"),
            RecommendationClient::Unavailable,
        )
    }
}
