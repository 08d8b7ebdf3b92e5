// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Campus Map Contributors

//! Domain models and request/response types.
//!
//! Internal records (e.g. [`User`]) are never serialized directly; endpoints
//! return dedicated response types so that fields like the password hash can
//! never leak into a JSON body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account role tag.
///
/// Currently only stored and reported; no endpoint enforces a role beyond
/// requiring an authenticated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Normal community member.
    #[default]
    User,
    /// Site administrator.
    Admin,
    /// Registered business operator.
    Business,
}

/// A registered account.
///
/// The username is unique and immutable after creation. `password_hash` holds
/// the bcrypt-encoded hash, never the plaintext.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    /// Set on profile updates; accounts are currently never updated in place.
    #[allow(dead_code)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Public view of an account. Never includes the password hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

/// Registration request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Login form body (`application/x-www-form-urlencoded`).
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
}

/// Discussion board category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PostCategory {
    /// Uncategorized; also acts as "no filter" in list queries.
    #[default]
    All,
    Cafe,
    Restaurant,
    Bar,
    Etc,
}

/// A discussion board post.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    pub category: PostCategory,
    pub author_id: String,
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
}

/// A post as rendered for a particular viewer.
///
/// `is_liked` depends on who is asking: anonymous viewers always see `false`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    pub category: PostCategory,
    pub author_id: String,
    pub view_count: u64,
    pub like_count: u64,
    pub is_liked: bool,
    pub created_at: DateTime<Utc>,
}

/// Post creation request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: PostCategory,
}

/// A comment on a post.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Comment creation request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    pub content: String,
}

/// Result of toggling a like on a post.
#[derive(Debug, Serialize, ToSchema)]
pub struct LikeStatus {
    /// Whether the viewer likes the post after the toggle.
    pub liked: bool,
    pub like_count: u64,
}

/// Store directory category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StoreCategory {
    Cafe,
    Restaurant,
    Bar,
    Etc,
}

/// A store in the campus directory.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub category: StoreCategory,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub rating: f64,
    pub view_count: u64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to add a store to the directory.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewStore {
    pub name: String,
    pub category: StoreCategory,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Review state of a business-registration application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

/// A business-registration application.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Application {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub company_name: String,
    pub tax_id: String,
    pub phone_number: String,
    pub email: String,
    pub title: Option<String>,
    pub details: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

/// Application submission request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateApplicationRequest {
    pub name: String,
    pub company_name: String,
    pub tax_id: String,
    pub phone_number: String,
    pub email: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// AI recommendation request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
}

/// AI recommendation response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
}
