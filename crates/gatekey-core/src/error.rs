//! Error types for token issuance and decoding.
//!
//! Issuance errors split into two classes: validation errors (malformed
//! caller input, recoverable by resubmitting corrected input) and fatal
//! errors for the call (unsupported key material, serialization failure).
//! The split drives HTTP status mapping at the service boundary.

use thiserror::Error;

/// Errors that can occur while issuing a token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The user identifier is empty.
    #[error("user id must be a non-empty string")]
    EmptyUserId,

    /// The application identifier is zero or negative.
    #[error("app id must be positive, got {0}")]
    InvalidAppId(i64),

    /// The requested lifetime is zero or negative.
    #[error("token ttl must be positive, got {0}")]
    InvalidTtl(i64),

    /// The shared secret resolved to a key of unsupported length.
    ///
    /// Keys must be exactly 16, 24, or 32 bytes. Other lengths are never
    /// truncated or padded to fit.
    #[error("invalid secret key length: {length} (expected 16, 24, or 32)")]
    InvalidKeyLength {
        /// Resolved key length in bytes
        length: usize,
    },

    /// Claims could not be serialized to JSON.
    #[error("claims serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A variable frame field does not fit its 16-bit length prefix.
    #[error("{field} too large for frame: {length} bytes (max {max})")]
    OversizedField {
        /// Which frame field overflowed ("iv" or "ciphertext")
        field: &'static str,
        /// Field length in bytes
        length: usize,
        /// Maximum length the frame can carry
        max: usize,
    },
}

impl TokenError {
    /// Returns true if this error is caused by malformed caller input.
    ///
    /// Validation errors map to a 400 response at the HTTP boundary and are
    /// recoverable by the caller. Everything else is fatal for the call and
    /// maps to a 500.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyUserId | Self::InvalidAppId(_) | Self::InvalidTtl(_))
    }
}

/// Errors that can occur while decoding and decrypting a token.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Token is shorter than the 2-character version tag.
    #[error("token too short for version tag")]
    MissingVersionTag,

    /// Token carries an unknown version tag.
    #[error("unsupported token version tag: {0:?}")]
    UnsupportedVersion(String),

    /// Frame body is not valid base64.
    #[error("invalid base64 in token frame: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Frame ended before a declared field was complete.
    #[error("truncated token frame: needed {expected} more bytes, had {actual}")]
    Truncated {
        /// Bytes the next field required
        expected: usize,
        /// Bytes remaining in the frame
        actual: usize,
    },

    /// Bytes remained after the last declared field.
    ///
    /// The frame is a complete self-delimiting record, so trailing data
    /// indicates corruption.
    #[error("unexpected trailing bytes after token frame: {0}")]
    TrailingBytes(usize),

    /// The shared secret resolved to a key of unsupported length.
    #[error("invalid secret key length: {length} (expected 16, 24, or 32)")]
    InvalidKeyLength {
        /// Resolved key length in bytes
        length: usize,
    },

    /// The embedded IV does not match the cipher block size.
    #[error("invalid iv length in frame: {length} (expected 16)")]
    InvalidIvLength {
        /// IV length found in the frame
        length: usize,
    },

    /// Decryption produced invalid block padding (wrong key or corrupt
    /// ciphertext).
    #[error("decryption failed: invalid padding")]
    InvalidPadding,

    /// Decrypted plaintext is not valid claims JSON.
    #[error("claims parsing failed: {0}")]
    Claims(#[from] serde_json::Error),
}
