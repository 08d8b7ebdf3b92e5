// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Campus Map Contributors

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        Application, ChatRequest, ChatResponse, Comment, CreateApplicationRequest,
        CreateCommentRequest, CreatePostRequest, LikeStatus, LoginForm, PostView, RegisterRequest,
        Store, TokenResponse, UserResponse,
    },
    state::AppState,
};

pub mod ai_chat;
pub mod applications;
pub mod auth;
pub mod community;
pub mod stores;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/stores", get(stores::list_stores))
        .route(
            "/community/posts",
            get(community::list_posts).post(community::create_post),
        )
        .route("/community/posts/{post_id}", get(community::get_post))
        .route(
            "/community/posts/{post_id}/comments",
            get(community::list_comments).post(community::create_comment),
        )
        .route(
            "/community/posts/{post_id}/like",
            post(community::toggle_like),
        )
        .route("/applications", post(applications::create_application))
        .route("/applications/me", get(applications::list_my_applications))
        .route("/ai-chat", post(ai_chat::chat))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register,
        auth::login,
        auth::me,
        stores::list_stores,
        community::list_posts,
        community::get_post,
        community::create_post,
        community::list_comments,
        community::create_comment,
        community::toggle_like,
        applications::create_application,
        applications::list_my_applications,
        ai_chat::chat
    ),
    components(
        schemas(
            RegisterRequest,
            LoginForm,
            TokenResponse,
            UserResponse,
            Store,
            PostView,
            CreatePostRequest,
            Comment,
            CreateCommentRequest,
            LikeStatus,
            Application,
            CreateApplicationRequest,
            ChatRequest,
            ChatResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Accounts and bearer tokens"),
        (name = "Stores", description = "Campus store directory"),
        (name = "Community", description = "Discussion board"),
        (name = "Applications", description = "Business-registration applications"),
        (name = "AI", description = "Restaurant recommendation")
    )
)]
struct ApiDoc;
