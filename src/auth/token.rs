// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signed token encoding and verification.
//!
//! Tokens are self-contained: a claim set (subject plus expiry) and an
//! HMAC-SHA256 signature over it, both base64url-encoded and joined with
//! `.`. Wire shape:
//!
//! ```text
//! <base64url(claims-json)>.<base64url(signature)>
//! ```
//!
//! The claims JSON carries `userName` (string) and `iat`/`exp` (epoch
//! seconds). Verification checks the signature before decoding the claim
//! payload: no claim is trusted until the signature has matched.

use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Claim set embedded in every token. Immutable once issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the identity the token was issued for.
    #[serde(rename = "userName")]
    pub user_name: String,
    /// Issued-at, epoch seconds.
    pub iat: i64,
    /// Expiry, epoch seconds. The token is invalid once `exp <= now`.
    pub exp: i64,
}

/// Token verification failures.
///
/// All three collapse to an unauthenticated outcome at the gate; the
/// distinction exists for logs and tests only and is never sent to a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The token does not have the two-segment shape, or a segment is not
    /// decodable.
    #[error("token structure is invalid")]
    Malformed,
    /// The signature does not match the claims segment under our key.
    #[error("token signature does not match")]
    BadSignature,
    /// The claim set is authentic but past its expiry.
    #[error("token has expired")]
    Expired,
}

/// Issues and verifies signed tokens with a process-wide symmetric key.
///
/// Both operations are pure functions of their inputs, the key, and the
/// clock; the codec is shared read-only across request workers.
pub struct TokenCodec {
    key: Vec<u8>,
}

impl TokenCodec {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            key: secret.as_ref().to_vec(),
        }
    }

    /// Issue a token for `subject`, valid for `ttl_ms` milliseconds.
    pub fn issue(&self, subject: &str, ttl_ms: i64) -> String {
        self.issue_at(subject, ttl_ms, Utc::now().timestamp())
    }

    /// Verify a token string and return its claim set.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    fn issue_at(&self, subject: &str, ttl_ms: i64, now: i64) -> String {
        let claims = Claims {
            user_name: subject.to_string(),
            iat: now,
            exp: now + ttl_ms / 1000,
        };
        let payload =
            serde_json::to_vec(&claims).expect("claim serialization is infallible for plain fields");
        let claims_b64 = Base64UrlUnpadded::encode_string(&payload);
        let sig_b64 = Base64UrlUnpadded::encode_string(&self.sign(claims_b64.as_bytes()));
        format!("{claims_b64}.{sig_b64}")
    }

    fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let mut segments = token.split('.');
        let (claims_b64, sig_b64) = match (segments.next(), segments.next(), segments.next()) {
            (Some(claims), Some(sig), None) if !claims.is_empty() && !sig.is_empty() => {
                (claims, sig)
            }
            _ => return Err(TokenError::Malformed),
        };

        let sig = Base64UrlUnpadded::decode_vec(sig_b64).map_err(|_| TokenError::Malformed)?;

        // Constant-time comparison via Mac::verify_slice.
        let mut mac = self.mac();
        mac.update(claims_b64.as_bytes());
        mac.verify_slice(&sig).map_err(|_| TokenError::BadSignature)?;

        // Signature checked; the payload may be decoded now.
        let payload =
            Base64UrlUnpadded::decode_vec(claims_b64).map_err(|_| TokenError::Malformed)?;
        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

        if claims.exp <= now {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn sign(&self, data: &[u8]) -> Vec<u8> {
        let mut mac = self.mac();
        mac.update(data);
        mac.finalize().into_bytes().to_vec()
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.key).expect("HMAC-SHA256 accepts keys of any length")
    }
}
