//! Gatekey token issuance core.
//!
//! Issues short-lived, cryptographically-wrapped join tokens for a
//! real-time session service. Given a user identifier and a shared secret,
//! the pipeline produces an opaque string a client presents to join a
//! session, valid for a bounded time window.
//!
//! # Pipeline
//!
//! ```text
//! Claims (app_id, user_id, nonce, ctime, expire, payload)
//!        │
//!        ▼ serde_json
//! UTF-8 JSON plaintext
//!        │
//!        ▼ AES-CBC/PKCS7 ◄── SecretKey (16/24/32 bytes) + IV (16 chars [0-9a-z])
//! Ciphertext
//!        │
//!        ▼ TokenFrame
//! [expire:i64 BE][iv_len:u16 BE][iv][enc_len:u16 BE][ciphertext]
//!        │
//!        ▼ base64 + "04" tag
//! Token string
//! ```
//!
//! Every call is a self-contained, CPU-only computation with no retained
//! state; concurrent calls draw independent IVs and nonces.
//!
//! # Security
//!
//! - Confidentiality only: CBC mode attaches no integrity tag, so tokens
//!   are malleable. Verifiers must treat decrypted claims as untrusted
//!   input.
//! - Key lengths other than 16, 24, or 32 bytes fail issuance; key material
//!   is never truncated or padded to fit.
//! - IVs and nonces come from the OS CSPRNG in production and are never
//!   reused across calls.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod claims;
pub mod encrypt;
pub mod error;
pub mod frame;
pub mod issuer;
pub mod iv;
pub mod key;

pub use claims::Claims;
pub use encrypt::{decrypt_claims, encrypt_claims};
pub use error::{DecodeError, TokenError};
pub use frame::TokenFrame;
pub use issuer::{IssueRequest, decode_token, issue_token, issue_token_at};
pub use iv::{IV_LEN, generate_iv};
pub use key::{CipherKind, SecretKey};
