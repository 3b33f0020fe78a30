//! Secret resolution and cipher selection.
//!
//! A shared secret arrives as an opaque string. A 64-hex-character secret is
//! decoded to 32 raw bytes (hex-encoded 256-bit secrets); anything else is
//! used as its own UTF-8 bytes (legacy literal passphrases). The two paths
//! are unambiguous: the hex pattern is exclusive to the hex path.
//!
//! The resolved length then selects the cipher. Only 16, 24, and 32-byte
//! keys are valid; other lengths fail issuance and are never truncated or
//! padded to fit.

use zeroize::Zeroize;

use crate::error::TokenError;

/// Raw key material resolved from a shared secret.
///
/// Zeroized on drop. Length is unchecked at resolution time; cipher
/// selection is the enforcement point.
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    /// Resolve an opaque secret string into raw key bytes.
    ///
    /// Exactly 64 hex characters (either case) decode to 32 raw bytes; any
    /// other string contributes its own UTF-8 bytes unchanged.
    #[must_use]
    pub fn resolve(secret: &str) -> Self {
        if secret.len() == 64 && secret.bytes().all(|b| b.is_ascii_hexdigit()) {
            // 64 hex chars always decode; fall through keeps decode errors
            // impossible rather than silently ignored.
            if let Ok(raw) = hex::decode(secret) {
                return Self(raw);
            }
        }
        Self(secret.as_bytes().to_vec())
    }

    /// Raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Key length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the secret resolved to zero bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Select the cipher configuration for this key.
    ///
    /// # Errors
    ///
    /// - `TokenError::InvalidKeyLength` if the key is not 16, 24, or 32
    ///   bytes; issuance must not proceed
    pub fn cipher(&self) -> Result<CipherKind, TokenError> {
        CipherKind::for_key_len(self.0.len())
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never log key material
        write!(f, "SecretKey({} bytes)", self.0.len())
    }
}

/// AES-CBC variant selected by key length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherKind {
    /// AES-128-CBC (16-byte key)
    Aes128Cbc,
    /// AES-192-CBC (24-byte key)
    Aes192Cbc,
    /// AES-256-CBC (32-byte key)
    Aes256Cbc,
}

impl CipherKind {
    /// Map a resolved key length to its cipher.
    ///
    /// # Errors
    ///
    /// - `TokenError::InvalidKeyLength` for any length other than 16, 24,
    ///   or 32
    pub fn for_key_len(length: usize) -> Result<Self, TokenError> {
        match length {
            16 => Ok(Self::Aes128Cbc),
            24 => Ok(Self::Aes192Cbc),
            32 => Ok(Self::Aes256Cbc),
            _ => Err(TokenError::InvalidKeyLength { length }),
        }
    }

    /// Key length in bytes for this cipher.
    #[must_use]
    pub fn key_len(self) -> usize {
        match self {
            Self::Aes128Cbc => 16,
            Self::Aes192Cbc => 24,
            Self::Aes256Cbc => 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_secret_decodes_to_raw_bytes() {
        let secret = "0f".repeat(32);
        let key = SecretKey::resolve(&secret);
        assert_eq!(key.len(), 32);
        assert_eq!(key.as_bytes(), vec![0x0f; 32]);
    }

    #[test]
    fn uppercase_hex_also_decodes() {
        let secret = "AB".repeat(32);
        let key = SecretKey::resolve(&secret);
        assert_eq!(key.as_bytes(), vec![0xab; 32]);
    }

    #[test]
    fn literal_secret_uses_its_own_bytes() {
        let key = SecretKey::resolve("0b0859483bba588d97ed478e8b69da06");
        assert_eq!(key.as_bytes(), b"0b0859483bba588d97ed478e8b69da06");
        assert_eq!(key.len(), 32);
    }

    #[test]
    fn hex_and_literal_paths_differ() {
        // 64 hex chars take the hex path; the same characters with one
        // swapped to a non-hex letter take the literal path.
        let hex_secret = "ab".repeat(32);
        let mut literal = hex_secret.clone();
        literal.replace_range(0..1, "z");

        let hex_key = SecretKey::resolve(&hex_secret);
        let literal_key = SecretKey::resolve(&literal);

        assert_eq!(hex_key.len(), 32);
        assert_eq!(literal_key.len(), 64);
        assert_ne!(hex_key.as_bytes(), literal_key.as_bytes());
    }

    #[test]
    fn sixty_three_hex_chars_stay_literal() {
        let secret = "a".repeat(63);
        let key = SecretKey::resolve(&secret);
        assert_eq!(key.len(), 63);
    }

    #[test]
    fn cipher_selection_by_length() {
        assert_eq!(CipherKind::for_key_len(16).unwrap(), CipherKind::Aes128Cbc);
        assert_eq!(CipherKind::for_key_len(24).unwrap(), CipherKind::Aes192Cbc);
        assert_eq!(CipherKind::for_key_len(32).unwrap(), CipherKind::Aes256Cbc);
    }

    #[test]
    fn unsupported_lengths_are_fatal() {
        for length in [0usize, 1, 10, 15, 17, 23, 25, 31, 33, 64] {
            let err = CipherKind::for_key_len(length).unwrap_err();
            assert!(matches!(err, TokenError::InvalidKeyLength { length: l } if l == length));
        }
    }

    #[test]
    fn debug_never_prints_key_bytes() {
        let key = SecretKey::resolve("super-secret-passphrase");
        let debug = format!("{key:?}");
        assert!(!debug.contains("super-secret"));
    }
}
