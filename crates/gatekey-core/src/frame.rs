//! Token frame: the fixed binary layout wrapping timing, IV, and ciphertext.
//!
//! Layout on the wire (all integers Big Endian):
//!
//! ```text
//! [expire: i64][iv_len: u16][iv bytes][enc_len: u16][ciphertext bytes]
//! ```
//!
//! The concatenation is base64-encoded (standard alphabet, padded) and
//! prefixed with the 2-character version tag `"04"`. Decoding validates
//! fail-fast: version tag, base64, then exact-width field reads. The frame
//! is a complete self-delimiting record, so trailing bytes are rejected.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

use crate::error::{DecodeError, TokenError};

/// The fixed-layout binary record carried inside a token string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenFrame {
    /// Expiry time (unix seconds), duplicated outside the ciphertext so
    /// relays can drop stale tokens without decrypting
    pub expire: i64,
    /// Initialization vector (16 bytes in practice; length is encoded)
    pub iv: Vec<u8>,
    /// Block-padded claims ciphertext
    pub ciphertext: Vec<u8>,
}

impl TokenFrame {
    /// Version tag prepended to every encoded token.
    pub const VERSION_TAG: &'static str = "04";

    /// Maximum length of a variable field (16-bit length prefix).
    pub const MAX_FIELD_LEN: usize = u16::MAX as usize;

    /// Encode the frame and return the transport token string.
    ///
    /// # Errors
    ///
    /// - `TokenError::OversizedField` if a variable field does not fit its
    ///   16-bit length prefix
    pub fn encode(&self) -> Result<String, TokenError> {
        if self.ciphertext.len() > Self::MAX_FIELD_LEN {
            return Err(TokenError::OversizedField {
                field: "ciphertext",
                length: self.ciphertext.len(),
                max: Self::MAX_FIELD_LEN,
            });
        }
        if self.iv.len() > Self::MAX_FIELD_LEN {
            return Err(TokenError::OversizedField {
                field: "iv",
                length: self.iv.len(),
                max: Self::MAX_FIELD_LEN,
            });
        }

        let mut buf = Vec::with_capacity(8 + 2 + self.iv.len() + 2 + self.ciphertext.len());
        buf.extend_from_slice(&self.expire.to_be_bytes());
        buf.extend_from_slice(&(self.iv.len() as u16).to_be_bytes());
        buf.extend_from_slice(&self.iv);
        buf.extend_from_slice(&(self.ciphertext.len() as u16).to_be_bytes());
        buf.extend_from_slice(&self.ciphertext);

        Ok(format!("{}{}", Self::VERSION_TAG, BASE64.encode(buf)))
    }

    /// Decode a transport token string back into a frame.
    ///
    /// Does NOT decrypt the ciphertext or validate expiry; callers decide
    /// both. See [`crate::decode_token`] for the full decode-and-decrypt
    /// path.
    ///
    /// # Errors
    ///
    /// - `DecodeError::MissingVersionTag` if the token is shorter than the
    ///   tag
    /// - `DecodeError::UnsupportedVersion` on an unknown tag
    /// - `DecodeError::Base64` if the frame body is not valid base64
    /// - `DecodeError::Truncated` if a declared field is incomplete
    /// - `DecodeError::TrailingBytes` if data remains after the last field
    pub fn decode(token: &str) -> Result<Self, DecodeError> {
        let tag = token.get(..2).ok_or(DecodeError::MissingVersionTag)?;
        if tag != Self::VERSION_TAG {
            return Err(DecodeError::UnsupportedVersion(tag.to_string()));
        }

        // Tag is two ASCII chars, so this slice is always on a boundary.
        let body = token.get(2..).ok_or(DecodeError::MissingVersionTag)?;
        let bytes = BASE64.decode(body)?;

        let mut rest = bytes.as_slice();
        let expire = i64::from_be_bytes(take_array::<8>(&mut rest)?);
        let iv_len = u16::from_be_bytes(take_array::<2>(&mut rest)?) as usize;
        let iv = take(&mut rest, iv_len)?.to_vec();
        let enc_len = u16::from_be_bytes(take_array::<2>(&mut rest)?) as usize;
        let ciphertext = take(&mut rest, enc_len)?.to_vec();

        if !rest.is_empty() {
            return Err(DecodeError::TrailingBytes(rest.len()));
        }

        Ok(Self { expire, iv, ciphertext })
    }
}

/// Split exactly `n` bytes off the front of `rest`.
fn take<'a>(rest: &mut &'a [u8], n: usize) -> Result<&'a [u8], DecodeError> {
    if rest.len() < n {
        return Err(DecodeError::Truncated { expected: n, actual: rest.len() });
    }
    let (head, tail) = rest.split_at(n);
    *rest = tail;
    Ok(head)
}

/// Split a fixed-width field off the front of `rest`.
fn take_array<const N: usize>(rest: &mut &[u8]) -> Result<[u8; N], DecodeError> {
    let Ok(array) = <[u8; N]>::try_from(take(rest, N)?) else {
        unreachable!("take returns exactly N bytes");
    };
    Ok(array)
}
