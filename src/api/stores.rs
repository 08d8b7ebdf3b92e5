// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Campus Map Contributors

//! Store directory endpoints.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::models::Store;
use crate::state::AppState;

fn default_limit() -> usize {
    100
}

#[derive(Deserialize, IntoParams)]
pub struct StoreListQuery {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// List active stores in the campus directory.
#[utoipa::path(
    get,
    path = "/api/stores",
    params(StoreListQuery),
    tag = "Stores",
    responses((status = 200, body = [Store]))
)]
pub async fn list_stores(
    State(state): State<AppState>,
    Query(params): Query<StoreListQuery>,
) -> Json<Vec<Store>> {
    let store = state.store.read().await;
    Json(store.list_stores(params.skip, params.limit))
}
