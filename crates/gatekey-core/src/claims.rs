//! Token claims: the logical payload wrapped inside every token.
//!
//! Claims are serialized to UTF-8 JSON before encryption. Field declaration
//! order matches the wire format consumed by existing verifiers, so fields
//! must not be reordered.

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, TokenError};

/// The structured payload identifying a token's subject and validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Application the token is scoped to
    pub app_id: i64,
    /// Subject joining the session (never empty)
    pub user_id: String,
    /// Per-token random value, uniform over the full signed 32-bit range
    pub nonce: i32,
    /// Creation time (unix seconds)
    pub ctime: i64,
    /// Expiry time (unix seconds); always `ctime + ttl`
    pub expire: i64,
    /// Opaque application payload (may be empty)
    pub payload: String,
}

impl Claims {
    /// Assemble claims for a token created at `ctime` with lifetime
    /// `ttl_seconds`.
    ///
    /// # Invariants
    ///
    /// - `expire > ctime` whenever `ttl_seconds > 0` (the issuer validates
    ///   the ttl before calling this)
    #[must_use]
    pub fn new(
        app_id: i64,
        user_id: impl Into<String>,
        nonce: i32,
        ctime: i64,
        ttl_seconds: i64,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            app_id,
            user_id: user_id.into(),
            nonce,
            ctime,
            expire: ctime.saturating_add(ttl_seconds),
            payload: payload.into(),
        }
    }

    /// Serialize to the canonical UTF-8 JSON plaintext.
    pub fn to_json(&self) -> Result<Vec<u8>, TokenError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Parse claims from decrypted JSON plaintext.
    pub fn from_json(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
