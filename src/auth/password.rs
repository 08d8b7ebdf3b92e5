// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Campus Map Contributors

//! Password hashing and verification (bcrypt).
//!
//! bcrypt only consumes the first 72 bytes of its input, so passwords are
//! truncated to that ceiling before hashing and before verification. This is
//! a documented limitation: two very long passwords sharing a 72-byte prefix
//! hash identically.
//!
//! Hashing at cost 12 is CPU-bound; callers on the request path run these
//! functions under `tokio::task::spawn_blocking`.

use thiserror::Error;

/// bcrypt's hard input ceiling in bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Fixed bcrypt work factor.
pub const HASH_COST: u32 = 12;

/// Outcome of a password verification.
///
/// Verification never propagates an error: a malformed stored hash, an
/// encoding failure, or a plain mismatch all collapse to [`Rejected`] so a
/// hashing-library fault can never crash the request path or be mistaken for
/// a server fault.
///
/// [`Rejected`]: VerifyOutcome::Rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// The password matches the stored hash.
    Verified,
    /// The password does not match, or the stored hash is unusable.
    Rejected,
}

impl VerifyOutcome {
    pub fn is_verified(self) -> bool {
        self == VerifyOutcome::Verified
    }
}

/// Hashing failure.
///
/// Unreachable in practice with the fixed, valid [`HASH_COST`]; still
/// propagated as a server fault rather than unwrapped.
#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct HashError(#[from] bcrypt::BcryptError);

/// Hash a password with a fresh random salt at the fixed work factor.
///
/// Any string is valid input, including the empty string.
pub fn hash_password(password: &str) -> Result<String, HashError> {
    Ok(bcrypt::hash(truncate(password), HASH_COST)?)
}

/// Verify a candidate password against a stored bcrypt hash.
pub fn verify_password(password: &str, stored_hash: &str) -> VerifyOutcome {
    match bcrypt::verify(truncate(password), stored_hash) {
        Ok(true) => VerifyOutcome::Verified,
        Ok(false) | Err(_) => VerifyOutcome::Rejected,
    }
}

/// Truncate a password to bcrypt's input ceiling.
fn truncate(password: &str) -> &[u8] {
    let bytes = password.as_bytes();
    &bytes[..bytes.len().min(MAX_PASSWORD_BYTES)]
}
