// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Campus Map Contributors

//! Discussion board endpoints.
//!
//! Listing and reading posts are public but render differently for
//! authenticated viewers (`is_liked`), so they use the optional resolver.
//! Writing requires an authenticated account.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::auth::{Auth, OptionalAuth};
use crate::error::ApiError;
use crate::models::{
    Comment, CreateCommentRequest, CreatePostRequest, LikeStatus, PostCategory, PostView,
};
use crate::state::AppState;

fn default_limit() -> usize {
    20
}

#[derive(Deserialize, IntoParams)]
pub struct PostListQuery {
    /// Category filter; `ALL` (or omitting) disables the filter.
    pub category: Option<PostCategory>,
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[utoipa::path(
    get,
    path = "/api/community/posts",
    params(PostListQuery),
    tag = "Community",
    responses((status = 200, body = [PostView]))
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<PostListQuery>,
    OptionalAuth(viewer): OptionalAuth,
) -> Json<Vec<PostView>> {
    let store = state.store.read().await;
    let viewer_id = viewer.as_ref().map(|user| user.id.as_str());
    let views = store
        .list_posts(params.category, params.skip, params.limit)
        .iter()
        .map(|post| store.view_of(post, viewer_id))
        .collect();
    Json(views)
}

#[utoipa::path(
    get,
    path = "/api/community/posts/{post_id}",
    params(("post_id" = String, Path, description = "Post identifier")),
    tag = "Community",
    responses(
        (status = 200, body = PostView),
        (status = 404, description = "Post not found"),
    )
)]
pub async fn get_post(
    Path(post_id): Path<String>,
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
) -> Result<Json<PostView>, ApiError> {
    let mut store = state.store.write().await;
    let post = store.record_post_view(&post_id)?;
    let viewer_id = viewer.as_ref().map(|user| user.id.as_str());
    Ok(Json(store.view_of(&post, viewer_id)))
}

#[utoipa::path(
    post,
    path = "/api/community/posts",
    request_body = CreatePostRequest,
    tag = "Community",
    security(("bearer" = [])),
    responses(
        (status = 201, body = PostView),
        (status = 400, description = "Blank title"),
        (status = 401, description = "Not authenticated"),
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    Auth(author): Auth,
    Json(mut request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostView>), ApiError> {
    request.title = request.title.trim().to_string();
    if request.title.is_empty() {
        return Err(ApiError::bad_request("Title is required"));
    }
    request.content = request
        .content
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty());

    let mut store = state.store.write().await;
    let post = store.create_post(&author.id, request);
    let view = store.view_of(&post, Some(&author.id));
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(
    get,
    path = "/api/community/posts/{post_id}/comments",
    params(("post_id" = String, Path, description = "Post identifier")),
    tag = "Community",
    responses((status = 200, body = [Comment]))
)]
pub async fn list_comments(
    Path(post_id): Path<String>,
    State(state): State<AppState>,
) -> Json<Vec<Comment>> {
    let store = state.store.read().await;
    Json(store.comments_for_post(&post_id))
}

#[utoipa::path(
    post,
    path = "/api/community/posts/{post_id}/comments",
    params(("post_id" = String, Path, description = "Post identifier")),
    request_body = CreateCommentRequest,
    tag = "Community",
    security(("bearer" = [])),
    responses(
        (status = 201, body = Comment),
        (status = 400, description = "Blank comment"),
        (status = 404, description = "Post not found"),
    )
)]
pub async fn create_comment(
    Path(post_id): Path<String>,
    State(state): State<AppState>,
    Auth(author): Auth,
    Json(mut request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    request.content = request.content.trim().to_string();
    if request.content.is_empty() {
        return Err(ApiError::bad_request("Comment content is required"));
    }

    let mut store = state.store.write().await;
    let comment = store.create_comment(&post_id, &author.id, request)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

#[utoipa::path(
    post,
    path = "/api/community/posts/{post_id}/like",
    params(("post_id" = String, Path, description = "Post identifier")),
    tag = "Community",
    security(("bearer" = [])),
    responses(
        (status = 200, body = LikeStatus),
        (status = 404, description = "Post not found"),
    )
)]
pub async fn toggle_like(
    Path(post_id): Path<String>,
    State(state): State<AppState>,
    Auth(user): Auth,
) -> Result<Json<LikeStatus>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.toggle_like(&post_id, &user.id)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, User};

    async fn seeded_state() -> (AppState, User, PostView) {
        let state = AppState::for_tests();
        let author = state
            .store
            .write()
            .await
            .create_user("alice", "$2b$12$hash".to_string(), Role::User)
            .unwrap();

        let (_, Json(post)) = create_post(
            State(state.clone()),
            Auth(author.clone()),
            Json(CreatePostRequest {
                title: "  best cafe?  ".to_string(),
                content: Some("looking for quiet seats".to_string()),
                category: PostCategory::Cafe,
            }),
        )
        .await
        .expect("post creation succeeds");

        (state, author, post)
    }

    #[tokio::test]
    async fn create_post_trims_and_requires_title() {
        let (state, author, post) = seeded_state().await;
        assert_eq!(post.title, "best cafe?");

        let error = create_post(
            State(state),
            Auth(author),
            Json(CreatePostRequest {
                title: "   ".to_string(),
                content: None,
                category: PostCategory::All,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn anonymous_listing_never_shows_is_liked() {
        let (state, author, post) = seeded_state().await;
        toggle_like(
            Path(post.id.clone()),
            State(state.clone()),
            Auth(author.clone()),
        )
        .await
        .unwrap();

        let Json(anonymous) = list_posts(
            State(state.clone()),
            Query(PostListQuery {
                category: None,
                skip: 0,
                limit: 20,
            }),
            OptionalAuth(None),
        )
        .await;
        assert_eq!(anonymous.len(), 1);
        assert_eq!(anonymous[0].like_count, 1);
        assert!(!anonymous[0].is_liked);

        let Json(as_author) = list_posts(
            State(state),
            Query(PostListQuery {
                category: None,
                skip: 0,
                limit: 20,
            }),
            OptionalAuth(Some(author)),
        )
        .await;
        assert!(as_author[0].is_liked);
    }

    #[tokio::test]
    async fn get_post_bumps_view_count_and_404s_on_miss() {
        let (state, _author, post) = seeded_state().await;

        let Json(first) = get_post(
            Path(post.id.clone()),
            State(state.clone()),
            OptionalAuth(None),
        )
        .await
        .unwrap();
        assert_eq!(first.view_count, 1);

        let Json(second) = get_post(Path(post.id), State(state.clone()), OptionalAuth(None))
            .await
            .unwrap();
        assert_eq!(second.view_count, 2);

        let error = get_post(
            Path("missing".to_string()),
            State(state),
            OptionalAuth(None),
        )
        .await
        .unwrap_err();
        assert_eq!(error.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn comments_round_trip_in_order() {
        let (state, author, post) = seeded_state().await;

        for text in ["first", "second"] {
            create_comment(
                Path(post.id.clone()),
                State(state.clone()),
                Auth(author.clone()),
                Json(CreateCommentRequest {
                    content: text.to_string(),
                }),
            )
            .await
            .unwrap();
        }

        let Json(comments) = list_comments(Path(post.id.clone()), State(state.clone())).await;
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].content, "first");
        assert_eq!(comments[1].content, "second");

        let error = create_comment(
            Path("missing".to_string()),
            State(state),
            Auth(author),
            Json(CreateCommentRequest {
                content: "hello".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(error.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn like_toggles_on_and_off() {
        let (state, author, post) = seeded_state().await;

        let Json(status) = toggle_like(
            Path(post.id.clone()),
            State(state.clone()),
            Auth(author.clone()),
        )
        .await
        .unwrap();
        assert!(status.liked);
        assert_eq!(status.like_count, 1);

        let Json(status) = toggle_like(Path(post.id), State(state), Auth(author))
            .await
            .unwrap();
        assert!(!status.liked);
        assert_eq!(status.like_count, 0);
    }
}
