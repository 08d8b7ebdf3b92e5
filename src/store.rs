// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Campus Map Contributors

//! In-process persistent store (the session boundary).
//!
//! All tables live behind the `Arc<RwLock<_>>` in
//! [`AppState`](crate::state::AppState). Identity lookups are pure reads
//! keyed by the unique username; mutations take the write lock for the
//! duration of the operation.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    Application, ApplicationStatus, Comment, CreateApplicationRequest, CreateCommentRequest,
    CreatePostRequest, LikeStatus, NewStore, Post, PostCategory, PostView, Role, Store, User,
};

#[derive(Default)]
pub struct InMemoryStore {
    /// Users keyed by id; usernames are enforced unique at creation.
    users: HashMap<String, User>,
    posts: HashMap<String, Post>,
    comments: HashMap<String, Comment>,
    /// `(post_id, user_id)` pairs.
    likes: HashSet<(String, String)>,
    stores: HashMap<String, Store>,
    applications: HashMap<String, Application>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- users ----

    /// Create a user, enforcing username uniqueness.
    pub fn create_user(
        &mut self,
        username: &str,
        password_hash: String,
        role: Role,
    ) -> Result<User, ApiError> {
        if self.user_by_username(username).is_some() {
            return Err(ApiError::conflict("Username is already taken"));
        }

        let id = Uuid::new_v4().to_string();
        let user = User {
            id: id.clone(),
            username: username.to_string(),
            password_hash,
            role,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users.values().find(|user| user.username == username)
    }

    /// Remove an account. No endpoint exposes this yet; outstanding tokens
    /// for the username keep verifying until expiry and fail at lookup.
    #[allow(dead_code)]
    pub fn delete_user(&mut self, username: &str) -> Result<(), ApiError> {
        let id = self
            .user_by_username(username)
            .map(|user| user.id.clone())
            .ok_or_else(|| ApiError::not_found("User not found"))?;
        self.users.remove(&id);
        Ok(())
    }

    // ---- posts ----

    pub fn create_post(&mut self, author_id: &str, request: CreatePostRequest) -> Post {
        let id = Uuid::new_v4().to_string();
        let post = Post {
            id: id.clone(),
            title: request.title,
            content: request.content,
            category: request.category,
            author_id: author_id.to_string(),
            view_count: 0,
            created_at: Utc::now(),
        };
        self.posts.insert(id, post.clone());
        post
    }

    /// Newest-first page of posts. `PostCategory::All` means no filter.
    pub fn list_posts(
        &self,
        category: Option<PostCategory>,
        skip: usize,
        limit: usize,
    ) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .values()
            .filter(|post| match category {
                Some(PostCategory::All) | None => true,
                Some(wanted) => post.category == wanted,
            })
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        posts.into_iter().skip(skip).take(limit).collect()
    }

    pub fn post_by_id(&self, post_id: &str) -> Option<&Post> {
        self.posts.get(post_id)
    }

    /// Bump a post's view count and return the updated record.
    pub fn record_post_view(&mut self, post_id: &str) -> Result<Post, ApiError> {
        let post = self
            .posts
            .get_mut(post_id)
            .ok_or_else(|| ApiError::not_found("Post not found"))?;
        post.view_count += 1;
        Ok(post.clone())
    }

    /// Render a post for a particular viewer (anonymous when `None`).
    pub fn view_of(&self, post: &Post, viewer_id: Option<&str>) -> PostView {
        PostView {
            id: post.id.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            category: post.category,
            author_id: post.author_id.clone(),
            view_count: post.view_count,
            like_count: self.like_count(&post.id),
            is_liked: viewer_id
                .map(|viewer| self.is_liked_by(&post.id, viewer))
                .unwrap_or(false),
            created_at: post.created_at,
        }
    }

    // ---- comments ----

    pub fn comments_for_post(&self, post_id: &str) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .comments
            .values()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        comments
    }

    pub fn create_comment(
        &mut self,
        post_id: &str,
        author_id: &str,
        request: CreateCommentRequest,
    ) -> Result<Comment, ApiError> {
        if self.post_by_id(post_id).is_none() {
            return Err(ApiError::not_found("Post not found"));
        }

        let id = Uuid::new_v4().to_string();
        let comment = Comment {
            id: id.clone(),
            post_id: post_id.to_string(),
            author_id: author_id.to_string(),
            content: request.content,
            created_at: Utc::now(),
        };
        self.comments.insert(id, comment.clone());
        Ok(comment)
    }

    // ---- likes ----

    pub fn toggle_like(&mut self, post_id: &str, user_id: &str) -> Result<LikeStatus, ApiError> {
        if self.post_by_id(post_id).is_none() {
            return Err(ApiError::not_found("Post not found"));
        }

        let key = (post_id.to_string(), user_id.to_string());
        let liked = if self.likes.remove(&key) {
            false
        } else {
            self.likes.insert(key);
            true
        };

        Ok(LikeStatus {
            liked,
            like_count: self.like_count(post_id),
        })
    }

    pub fn like_count(&self, post_id: &str) -> u64 {
        self.likes.iter().filter(|(post, _)| post == post_id).count() as u64
    }

    pub fn is_liked_by(&self, post_id: &str, user_id: &str) -> bool {
        self.likes
            .contains(&(post_id.to_string(), user_id.to_string()))
    }

    // ---- stores ----

    /// Directory rows are loaded out of band; there is no ingestion endpoint.
    #[allow(dead_code)]
    pub fn insert_store(&mut self, new_store: NewStore) -> Store {
        let id = Uuid::new_v4().to_string();
        let store = Store {
            id: id.clone(),
            name: new_store.name,
            category: new_store.category,
            description: new_store.description,
            address: new_store.address,
            phone: new_store.phone,
            latitude: new_store.latitude,
            longitude: new_store.longitude,
            image_url: None,
            rating: 0.0,
            view_count: 0,
            is_active: true,
            created_at: Utc::now(),
        };
        self.stores.insert(id, store.clone());
        store
    }

    /// Active stores, name-ordered, with skip/limit paging.
    pub fn list_stores(&self, skip: usize, limit: usize) -> Vec<Store> {
        let mut stores: Vec<Store> = self
            .stores
            .values()
            .filter(|store| store.is_active)
            .cloned()
            .collect();
        stores.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        stores.into_iter().skip(skip).take(limit).collect()
    }

    // ---- applications ----

    pub fn create_application(
        &mut self,
        user_id: &str,
        request: CreateApplicationRequest,
    ) -> Application {
        let id = Uuid::new_v4().to_string();
        let application = Application {
            id: id.clone(),
            user_id: user_id.to_string(),
            name: request.name,
            company_name: request.company_name,
            tax_id: request.tax_id,
            phone_number: request.phone_number,
            email: request.email,
            title: request.title,
            details: request.details,
            status: ApplicationStatus::Pending,
            created_at: Utc::now(),
        };
        self.applications.insert(id, application.clone());
        application
    }

    pub fn applications_for_user(&self, user_id: &str) -> Vec<Application> {
        let mut applications: Vec<Application> = self
            .applications
            .values()
            .filter(|application| application.user_id == user_id)
            .cloned()
            .collect();
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        applications
    }
}
