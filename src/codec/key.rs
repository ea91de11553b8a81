//! Zeroizing wrapper for the 32-byte message key.

use zeroize::Zeroize;

use crate::codec::cipher::KEY_LEN;
use crate::codec::envelope::{self, DecodedEnvelope};
use crate::codec::framing::NONCE_LEN;
use crate::errors::{MsgSealError, Result};

/// A wrapper around a 32-byte message key that automatically zeroes its
/// memory when dropped.
///
/// Use this to hold the key in memory so it cannot linger after it is no
/// longer needed. The codec itself never stores key material; every
/// operation takes the key per call.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MessageKey {
    bytes: [u8; KEY_LEN],
}

impl MessageKey {
    /// Create a new `MessageKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Create a `MessageKey` from a slice, rejecting any length but 32.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes = <[u8; KEY_LEN]>::try_from(bytes).map_err(|_| MsgSealError::InvalidKeySize {
            expected: KEY_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self { bytes })
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Encrypt `payload` and `identifier` under this key.
    pub fn encode(
        &self,
        nonce: &[u8; NONCE_LEN],
        payload: &[u8],
        identifier: &[u8],
    ) -> Result<Vec<u8>> {
        envelope::encode(nonce, payload, identifier, &self.bytes)
    }

    /// Encrypt and base64 the result with the standard alphabet.
    pub fn encode_base64(
        &self,
        nonce: &[u8; NONCE_LEN],
        payload: &[u8],
        identifier: &[u8],
    ) -> Result<String> {
        envelope::encode_base64(nonce, payload, identifier, &self.bytes)
    }

    /// Strictly decode `ciphertext` under this key.
    pub fn decode(&self, ciphertext: &[u8]) -> Result<DecodedEnvelope> {
        envelope::decode(ciphertext, &self.bytes)
    }

    /// Decode with an explicit IV, returning the merged plaintext body.
    pub fn decode_with_iv(&self, ciphertext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        envelope::decode_with_iv(ciphertext, &self.bytes, iv)
    }

    /// Leniently decode a base64 ciphertext, returning only the payload.
    pub fn decode_lenient(&self, ciphertext: &str) -> Result<Vec<u8>> {
        envelope::decode_lenient(ciphertext, &self.bytes)
    }
}
