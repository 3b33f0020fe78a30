//! Token issuance orchestration.
//!
//! The pipeline is pure and synchronous: validate inputs, resolve the key,
//! build claims, encrypt, frame, encode. No state is retained across calls,
//! so concurrent issuance needs no coordination.
//!
//! [`issue_token_at`] is the deterministic core taking explicit time, nonce,
//! and IV; [`issue_token`] is the production wrapper drawing them from the
//! system clock and the OS CSPRNG. Tests drive the core directly.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{RngCore, rngs::OsRng};

use crate::{
    claims::Claims,
    encrypt::{decrypt_claims, encrypt_claims},
    error::{DecodeError, TokenError},
    frame::TokenFrame,
    iv::{IV_LEN, generate_iv},
    key::SecretKey,
};

/// Inputs for a single token issuance call.
pub struct IssueRequest<'a> {
    /// Application the token is scoped to (must be positive)
    pub app_id: i64,
    /// Subject joining the session (must be non-empty)
    pub user_id: &'a str,
    /// Shared secret; 64 hex characters or a literal passphrase
    pub secret: &'a str,
    /// Token lifetime in seconds (must be positive)
    pub ttl_seconds: i64,
    /// Opaque application payload (may be empty)
    pub payload: &'a str,
}

impl std::fmt::Debug for IssueRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never log the shared secret
        f.debug_struct("IssueRequest")
            .field("app_id", &self.app_id)
            .field("user_id", &self.user_id)
            .field("secret", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .field("payload", &self.payload)
            .finish()
    }
}

/// Issue a token using the system clock and the OS CSPRNG.
///
/// Draws the nonce uniformly over the full signed 32-bit range and a fresh
/// IV, then delegates to [`issue_token_at`].
///
/// # Errors
///
/// See [`issue_token_at`].
pub fn issue_token(request: &IssueRequest<'_>) -> Result<String, TokenError> {
    // A full random u32 reinterpreted as i32 is exactly uniform over the
    // whole signed range.
    let nonce = OsRng.next_u32() as i32;
    let iv = generate_iv(&mut OsRng);
    issue_token_at(request, unix_now(), nonce, &iv)
}

/// Issue a token with explicit creation time, nonce, and IV.
///
/// Fails with no partial output; nothing is encrypted until all inputs and
/// the resolved key length have been validated.
///
/// # Errors
///
/// - `TokenError::EmptyUserId`, `InvalidAppId`, `InvalidTtl` on malformed
///   input
/// - `TokenError::InvalidKeyLength` if the secret resolves to a key that is
///   not 16, 24, or 32 bytes
/// - `TokenError::Serialization` if the claims cannot be serialized
pub fn issue_token_at(
    request: &IssueRequest<'_>,
    ctime: i64,
    nonce: i32,
    iv: &[u8; IV_LEN],
) -> Result<String, TokenError> {
    if request.user_id.is_empty() {
        return Err(TokenError::EmptyUserId);
    }
    if request.app_id <= 0 {
        return Err(TokenError::InvalidAppId(request.app_id));
    }
    if request.ttl_seconds <= 0 {
        return Err(TokenError::InvalidTtl(request.ttl_seconds));
    }

    let key = SecretKey::resolve(request.secret);
    let claims =
        Claims::new(request.app_id, request.user_id, nonce, ctime, request.ttl_seconds, request.payload);

    // Key length is checked inside encrypt_claims before any plaintext is
    // produced, so an unsupported secret never reaches the cipher.
    let ciphertext = encrypt_claims(&claims, &key, iv)?;

    TokenFrame { expire: claims.expire, iv: iv.to_vec(), ciphertext }.encode()
}

/// Decode a token and decrypt its claims with the issuing secret.
///
/// This is the verifier side of the wire contract: strip the version tag,
/// base64-decode, read the fixed-width fields, decrypt with the same key
/// resolution rule, parse the claims JSON. Expiry is NOT checked; callers
/// compare [`Claims::expire`] against their own clock.
///
/// # Errors
///
/// Any [`DecodeError`]; see [`TokenFrame::decode`] and
/// [`crate::encrypt::decrypt_claims`].
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, DecodeError> {
    let frame = TokenFrame::decode(token)?;
    let key = SecretKey::resolve(secret);
    decrypt_claims(&frame.ciphertext, &key, &frame.iv)
}

/// Current unix time in seconds.
fn unix_now() -> i64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_secs() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0b0859483bba588d97ed478e8b69da06";

    fn request<'a>(secret: &'a str) -> IssueRequest<'a> {
        IssueRequest { app_id: 1789528352, user_id: "alice", secret, ttl_seconds: 3600, payload: "" }
    }

    #[test]
    fn issue_and_decode_roundtrip() {
        let token = issue_token(&request(SECRET)).unwrap();
        let claims = decode_token(&token, SECRET).unwrap();

        assert_eq!(claims.app_id, 1789528352);
        assert_eq!(claims.user_id, "alice");
        assert_eq!(claims.payload, "");
        assert_eq!(claims.expire - claims.ctime, 3600);
    }

    #[test]
    fn frame_expire_matches_claims_expire() {
        let iv = *b"abcdefghij012345";
        let token = issue_token_at(&request(SECRET), 1_700_000_000, 7, &iv).unwrap();

        let frame = TokenFrame::decode(&token).unwrap();
        let claims = decode_token(&token, SECRET).unwrap();
        assert_eq!(frame.expire, claims.expire);
        assert_eq!(frame.expire, 1_700_000_000 + 3600);
    }

    #[test]
    fn back_to_back_tokens_differ() {
        let req = request(SECRET);
        let first = issue_token(&req).unwrap();
        let second = issue_token(&req).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn empty_user_id_rejected() {
        let req = IssueRequest { user_id: "", ..request(SECRET) };
        assert!(matches!(issue_token(&req), Err(TokenError::EmptyUserId)));
    }

    #[test]
    fn non_positive_app_id_rejected() {
        let req = IssueRequest { app_id: 0, ..request(SECRET) };
        assert!(matches!(issue_token(&req), Err(TokenError::InvalidAppId(0))));
    }

    #[test]
    fn non_positive_ttl_rejected() {
        let req = IssueRequest { ttl_seconds: -1, ..request(SECRET) };
        assert!(matches!(issue_token(&req), Err(TokenError::InvalidTtl(-1))));
    }

    #[test]
    fn thirty_three_byte_secret_fails_before_encryption() {
        // 33 ASCII chars, not 64 hex chars: resolves to a 33-byte key.
        let secret = "an-ascii-secret-of-33-characters!";
        assert_eq!(secret.len(), 33);

        let err = issue_token(&request(secret)).unwrap_err();
        assert!(matches!(err, TokenError::InvalidKeyLength { length: 33 }));
    }

    #[test]
    fn request_debug_redacts_secret() {
        let debug = format!("{:?}", request(SECRET));
        assert!(!debug.contains(SECRET));
        assert!(debug.contains("<redacted>"));
    }
}
