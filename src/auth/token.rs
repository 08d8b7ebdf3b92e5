// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Campus Map Contributors

//! Access token issuance and verification (HS256 JWT).
//!
//! Tokens are stateless bearer credentials: a signed claim set with an
//! embedded expiration, verified purely by signature and clock. Nothing is
//! persisted and there is no revocation; a token stays valid until expiry
//! even if the account is deleted in the meantime. The resolver handles that
//! case at lookup time.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use thiserror::Error;

/// Reserved claim carrying the subject username.
pub const SUBJECT_CLAIM: &str = "sub";

/// Reserved claim carrying the expiration instant (Unix seconds).
pub const EXPIRATION_CLAIM: &str = "exp";

/// Validity window used by the login flow.
pub const LOGIN_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// Validity window applied when the caller does not supply one.
///
/// Login always passes [`LOGIN_TOKEN_TTL`] explicitly, so this path is not
/// taken in normal operation, but it is part of the issue contract.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

/// Token codec errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The token is malformed, carries a bad signature, or has expired.
    ///
    /// These cases are deliberately not distinguished to the client.
    #[error("token is expired or invalid")]
    Invalid,
    /// The claim set could not be signed.
    #[error("token could not be signed")]
    Signing,
}

/// Symmetric-key signed token codec.
///
/// Holds the HS256 keys derived from the process-wide secret. Constructed
/// once at startup and shared read-only through `AppState`.
pub struct TokenCodec {
    header: Header,
    validation: Validation,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenCodec {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is a hard boundary; no clock-skew allowance.
        validation.leeway = 0;
        validation.validate_aud = false;

        Self {
            header: Header::new(Algorithm::HS256),
            validation,
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Sign a claim set, embedding `exp = now + ttl`.
    ///
    /// The caller's map is copied, not mutated; an `exp` supplied by the
    /// caller is overwritten with the computed instant.
    pub fn issue(
        &self,
        claims: &Map<String, Value>,
        ttl: Option<Duration>,
    ) -> Result<String, TokenError> {
        let ttl = ttl.unwrap_or(DEFAULT_TOKEN_TTL);
        let expires_at = Utc::now().timestamp() + ttl.as_secs() as i64;

        let mut to_encode = claims.clone();
        to_encode.insert(EXPIRATION_CLAIM.to_string(), Value::from(expires_at));

        encode(&self.header, &to_encode, &self.encoding).map_err(|_| TokenError::Signing)
    }

    /// Convenience wrapper issuing a token for a subject username.
    pub fn issue_for_subject(
        &self,
        username: &str,
        ttl: Option<Duration>,
    ) -> Result<String, TokenError> {
        let mut claims = Map::new();
        claims.insert(
            SUBJECT_CLAIM.to_string(),
            Value::String(username.to_string()),
        );
        self.issue(&claims, ttl)
    }

    /// Decode a token, checking signature and expiry.
    ///
    /// Returns the full claim set on success. Every failure mode collapses
    /// to [`TokenError::Invalid`].
    pub fn verify(&self, token: &str) -> Result<Map<String, Value>, TokenError> {
        decode::<Map<String, Value>>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "unit-test-secret";

    fn codec() -> TokenCodec {
        TokenCodec::new(TEST_SECRET)
    }

    /// Encode a claim set directly, bypassing `issue`'s expiry computation.
    fn raw_token(claims: &Map<String, Value>, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issue_then_verify_preserves_claims() {
        let codec = codec();
        let mut claims = Map::new();
        claims.insert(SUBJECT_CLAIM.to_string(), Value::from("alice"));
        claims.insert("custom".to_string(), Value::from(42));

        let token = codec.issue(&claims, Some(Duration::from_secs(60))).unwrap();
        let decoded = codec.verify(&token).unwrap();

        assert_eq!(decoded[SUBJECT_CLAIM], "alice");
        assert_eq!(decoded["custom"], 42);
        assert!(decoded.contains_key(EXPIRATION_CLAIM));
    }

    #[test]
    fn issue_does_not_mutate_the_callers_claims() {
        let codec = codec();
        let claims = Map::new();
        codec.issue(&claims, None).unwrap();
        assert!(claims.is_empty());
    }

    #[test]
    fn default_ttl_is_fifteen_minutes() {
        let codec = codec();
        let before = Utc::now().timestamp();
        let token = codec.issue_for_subject("alice", None).unwrap();
        let after = Utc::now().timestamp();

        let exp = codec.verify(&token).unwrap()[EXPIRATION_CLAIM]
            .as_i64()
            .unwrap();
        assert!(exp >= before + 15 * 60);
        assert!(exp <= after + 15 * 60);
    }

    #[test]
    fn token_within_ttl_verifies() {
        let codec = codec();
        let token = codec
            .issue_for_subject("alice", Some(LOGIN_TOKEN_TTL))
            .unwrap();
        assert!(codec.verify(&token).is_ok());
    }

    #[test]
    fn expired_token_is_invalid() {
        let codec = codec();
        let mut claims = Map::new();
        claims.insert(SUBJECT_CLAIM.to_string(), Value::from("alice"));
        claims.insert(
            EXPIRATION_CLAIM.to_string(),
            Value::from(Utc::now().timestamp() - 60),
        );

        let token = raw_token(&claims, TEST_SECRET);
        assert_eq!(codec.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let codec = codec();
        let mut claims = Map::new();
        claims.insert(SUBJECT_CLAIM.to_string(), Value::from("alice"));
        claims.insert(
            EXPIRATION_CLAIM.to_string(),
            Value::from(Utc::now().timestamp() + 600),
        );

        let token = raw_token(&claims, "some-other-secret");
        assert_eq!(codec.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn tampered_payload_is_invalid() {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

        let codec = codec();
        let token = codec
            .issue_for_subject("alice", Some(Duration::from_secs(600)))
            .unwrap();

        // Swap the subject while keeping the original signature.
        let parts: Vec<&str> = token.split('.').collect();
        let payload = URL_SAFE_NO_PAD.decode(parts[1]).unwrap();
        let forged_payload = String::from_utf8(payload)
            .unwrap()
            .replace("alice", "mallory");
        let forged = format!(
            "{}.{}.{}",
            parts[0],
            URL_SAFE_NO_PAD.encode(forged_payload.as_bytes()),
            parts[2]
        );

        assert_eq!(codec.verify(&forged), Err(TokenError::Invalid));
    }

    #[test]
    fn garbage_is_invalid() {
        let codec = codec();
        assert_eq!(codec.verify("not-a-token"), Err(TokenError::Invalid));
        assert_eq!(codec.verify(""), Err(TokenError::Invalid));
        assert_eq!(codec.verify("a.b.c"), Err(TokenError::Invalid));
    }
}
