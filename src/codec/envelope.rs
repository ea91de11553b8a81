//! The envelope codec entry points.
//!
//! [`encode`] turns a payload plus an application identifier into a single
//! opaque ciphertext blob; [`decode`] reverses the transformation with
//! strict structural validation. Two weaker variants exist for callers that
//! validated the ciphertext elsewhere ([`decode_with_iv`]) or only want the
//! payload out of a base64 blob ([`decode_lenient`]).

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::codec::cipher::{self, iv_from_key};
use crate::codec::framing::{self, BLOCK_SIZE, HEADER_LEN, NONCE_LEN};
use crate::errors::{MsgSealError, Result};

/// The three fields recovered by a strict [`decode`].
///
/// All fields are independent copies; nothing aliases the decryption
/// buffer once this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEnvelope {
    /// The 16 random bytes the sender embedded.
    pub nonce: [u8; NONCE_LEN],
    /// The length-prefixed payload.
    pub payload: Vec<u8>,
    /// The trailing application identifier (may be empty).
    pub identifier: Vec<u8>,
}

/// Encrypt `payload` and `identifier` into a single ciphertext blob.
///
/// The caller supplies the 16-byte `nonce` (its randomness is not
/// inspected here) and a 32-byte `key` whose first 16 bytes double as the
/// CBC IV. The output is always a multiple of 32 bytes and at least 32
/// bytes long.
///
/// Fails with `InvalidKeySize` for a key that is not 32 bytes and with
/// `LengthOverflow` for a payload too long for the 4-byte length prefix.
pub fn encode(
    nonce: &[u8; NONCE_LEN],
    payload: &[u8],
    identifier: &[u8],
    key: &[u8],
) -> Result<Vec<u8>> {
    let envelope = framing::build_envelope(nonce, payload, identifier)?;
    cipher::cbc_encrypt(key, iv_from_key(key)?, &envelope)
}

/// [`encode`], then base64 with the standard alphabet.
///
/// Ciphertext blobs travel base64-encoded on the wire; this is the
/// producing counterpart of the input [`decode_lenient`] accepts.
pub fn encode_base64(
    nonce: &[u8; NONCE_LEN],
    payload: &[u8],
    identifier: &[u8],
    key: &[u8],
) -> Result<String> {
    Ok(BASE64.encode(encode(nonce, payload, identifier, key)?))
}

/// Decrypt `ciphertext` and split it into nonce, payload and identifier,
/// validating every structural rule of the wire format.
///
/// Checks run fail-fast, first violation wins: ciphertext at least 32
/// bytes, a multiple of 32, pad byte in `[1, 32]`, enough plaintext left
/// after stripping the pad, and a payload length that fits inside it.
pub fn decode(ciphertext: &[u8], key: &[u8]) -> Result<DecodedEnvelope> {
    if ciphertext.len() < BLOCK_SIZE {
        return Err(MsgSealError::ShortCiphertext(ciphertext.len()));
    }
    if ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(MsgSealError::UnalignedCiphertext(ciphertext.len()));
    }

    let plaintext = cipher::cbc_decrypt(key, iv_from_key(key)?, ciphertext)?;
    let body = framing::strip_padding(&plaintext)?;

    let payload_len = framing::read_length_prefix(body)?;
    let payload_end = HEADER_LEN
        .checked_add(payload_len)
        .filter(|&end| end <= body.len())
        .ok_or(MsgSealError::LengthOverflow {
            claimed: payload_len,
            available: body.len() - HEADER_LEN,
        })?;

    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&body[..NONCE_LEN]);

    Ok(DecodedEnvelope {
        nonce,
        payload: body[HEADER_LEN..payload_end].to_vec(),
        identifier: body[payload_end..].to_vec(),
    })
}

/// Like [`decode`], but with a caller-supplied IV, returning the whole
/// stripped plaintext (nonce, length prefix, payload and identifier still
/// concatenated).
///
/// For callers to whom the identifier is not meaningful and whose
/// ciphertext was block-validated elsewhere; the strict path's `% 32`
/// check is not repeated here, though input that is not a whole number of
/// AES blocks still fails as `UnalignedCiphertext` at the cipher layer.
pub fn decode_with_iv(ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    if ciphertext.len() < BLOCK_SIZE {
        return Err(MsgSealError::ShortCiphertext(ciphertext.len()));
    }

    let plaintext = cipher::cbc_decrypt(key, iv, ciphertext)?;
    let body = framing::strip_padding(&plaintext)?;
    Ok(body.to_vec())
}

/// Decode a base64 ciphertext and return only the payload, trusting the
/// embedded length field.
///
/// Compatibility path with deliberately weaker validation than [`decode`]:
/// the trailing padding block is never validated or stripped, and the
/// length field is bounded only by the padded buffer. A length that
/// reaches into the padding region therefore returns padding bytes as
/// payload instead of an error. Callers that need safety should prefer
/// [`decode`].
pub fn decode_lenient(ciphertext: &str, key: &[u8]) -> Result<Vec<u8>> {
    let raw = BASE64.decode(ciphertext)?;
    let plaintext = cipher::cbc_decrypt(key, iv_from_key(key)?, &raw)?;

    let payload_len = framing::read_length_prefix(&plaintext)?;
    let payload_end = HEADER_LEN
        .checked_add(payload_len)
        .filter(|&end| end <= plaintext.len())
        .ok_or(MsgSealError::LengthOverflow {
            claimed: payload_len,
            available: plaintext.len() - HEADER_LEN,
        })?;

    Ok(plaintext[HEADER_LEN..payload_end].to_vec())
}
