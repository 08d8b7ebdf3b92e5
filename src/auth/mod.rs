// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Campus Map Contributors

//! # Authentication Module
//!
//! Credential hashing, access-token issuance/verification, and per-request
//! identity resolution.
//!
//! ## Auth Flow
//!
//! 1. Client registers or logs in with username + password
//! 2. Password is verified against its bcrypt hash
//! 3. Server issues a signed HS256 token with a 30-minute expiry
//! 4. Client sends `Authorization: Bearer <token>` on subsequent requests
//! 5. The extractors verify signature and expiry, extract the subject, and
//!    look the account up by username
//!
//! ## Security
//!
//! - The signing secret is mandatory configuration; there is no default
//! - Tokens are not revocable: expiry is the only invalidation mechanism
//! - Password verification is fail-closed and never crashes the request path

pub mod error;
pub mod extractor;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use extractor::{Auth, OptionalAuth};
pub use password::{hash_password, verify_password, VerifyOutcome};
pub use token::{TokenCodec, LOGIN_TOKEN_TTL, SUBJECT_CLAIM};
