//! Claims encryption under AES-CBC with PKCS7 padding.
//!
//! Confidentiality-only mode: no integrity or authentication tag is
//! attached, so tokens are malleable. This matches the wire format existing
//! verifiers decrypt; an authenticated mode would be a new, explicit token
//! version rather than a drop-in change.

use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};

use crate::{
    claims::Claims,
    error::{DecodeError, TokenError},
    iv::IV_LEN,
    key::{CipherKind, SecretKey},
};

/// Serialize claims to JSON and encrypt under the cipher selected by the
/// key length.
///
/// # Errors
///
/// - `TokenError::InvalidKeyLength` if the key is not 16, 24, or 32 bytes
/// - `TokenError::Serialization` if the claims cannot be serialized
pub fn encrypt_claims(
    claims: &Claims,
    key: &SecretKey,
    iv: &[u8; IV_LEN],
) -> Result<Vec<u8>, TokenError> {
    let cipher = key.cipher()?;
    let plaintext = claims.to_json()?;

    let ciphertext = match cipher {
        CipherKind::Aes128Cbc => encrypt_in::<cbc::Encryptor<Aes128>>(key, iv, &plaintext),
        CipherKind::Aes192Cbc => encrypt_in::<cbc::Encryptor<Aes192>>(key, iv, &plaintext),
        CipherKind::Aes256Cbc => encrypt_in::<cbc::Encryptor<Aes256>>(key, iv, &plaintext),
    };

    Ok(ciphertext)
}

/// Decrypt ciphertext with the embedded IV and parse the claims JSON.
///
/// # Errors
///
/// - `DecodeError::InvalidKeyLength` if the key is not 16, 24, or 32 bytes
/// - `DecodeError::InvalidIvLength` if the IV is not one cipher block
/// - `DecodeError::InvalidPadding` on wrong key or corrupt ciphertext
/// - `DecodeError::Claims` if the plaintext is not valid claims JSON
pub fn decrypt_claims(
    ciphertext: &[u8],
    key: &SecretKey,
    iv: &[u8],
) -> Result<Claims, DecodeError> {
    let cipher = CipherKind::for_key_len(key.len())
        .map_err(|_| DecodeError::InvalidKeyLength { length: key.len() })?;

    if iv.len() != IV_LEN {
        return Err(DecodeError::InvalidIvLength { length: iv.len() });
    }

    let plaintext = match cipher {
        CipherKind::Aes128Cbc => decrypt_in::<cbc::Decryptor<Aes128>>(key, iv, ciphertext)?,
        CipherKind::Aes192Cbc => decrypt_in::<cbc::Decryptor<Aes192>>(key, iv, ciphertext)?,
        CipherKind::Aes256Cbc => decrypt_in::<cbc::Decryptor<Aes256>>(key, iv, ciphertext)?,
    };

    Claims::from_json(&plaintext)
}

fn encrypt_in<E>(key: &SecretKey, iv: &[u8], plaintext: &[u8]) -> Vec<u8>
where
    E: KeyIvInit + BlockEncryptMut,
{
    let Ok(encryptor) = E::new_from_slices(key.as_bytes(), iv) else {
        unreachable!("cipher selection validated key length; iv is one block");
    };
    encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

fn decrypt_in<D>(key: &SecretKey, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, DecodeError>
where
    D: KeyIvInit + BlockDecryptMut,
{
    let Ok(decryptor) = D::new_from_slices(key.as_bytes(), iv) else {
        unreachable!("key and iv lengths validated before dispatch");
    };
    decryptor.decrypt_padded_vec_mut::<Pkcs7>(ciphertext).map_err(|_| DecodeError::InvalidPadding)
}
