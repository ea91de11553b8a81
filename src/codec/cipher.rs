//! AES-256-CBC, the one fixed cipher of the wire format.
//!
//! The 32-byte envelope padding is applied before these functions run, so
//! the cipher layer itself uses `NoPadding`: every well-formed envelope is
//! already a whole number of 16-byte AES blocks.

use aes::cipher::{block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes256;

use crate::errors::{MsgSealError, Result};

/// Size of the AES-256 key in bytes.
pub const KEY_LEN: usize = 32;

/// Size of the CBC initialization vector in bytes (one AES block).
pub const IV_LEN: usize = 16;

/// AES block size; the unit CBC processes.
const AES_BLOCK_LEN: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// The IV of the primary paths: the first 16 bytes of the key itself.
pub(crate) fn iv_from_key(key: &[u8]) -> Result<&[u8]> {
    if key.len() != KEY_LEN {
        return Err(MsgSealError::InvalidKeySize {
            expected: KEY_LEN,
            actual: key.len(),
        });
    }
    Ok(&key[..IV_LEN])
}

/// Validate key and IV sizes into fixed-size arrays.
fn check_key_iv(key: &[u8], iv: &[u8]) -> Result<([u8; KEY_LEN], [u8; IV_LEN])> {
    let key = <[u8; KEY_LEN]>::try_from(key).map_err(|_| MsgSealError::InvalidKeySize {
        expected: KEY_LEN,
        actual: key.len(),
    })?;
    let iv = <[u8; IV_LEN]>::try_from(iv).map_err(|_| MsgSealError::InvalidIvSize {
        expected: IV_LEN,
        actual: iv.len(),
    })?;
    Ok((key, iv))
}

/// Encrypt `plaintext` with AES-256-CBC.
///
/// `plaintext` must be a whole number of AES blocks; the envelope layer
/// guarantees that for everything it builds.
pub fn cbc_encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let (key, iv) = check_key_iv(key, iv)?;
    if plaintext.len() % AES_BLOCK_LEN != 0 {
        return Err(MsgSealError::UnalignedCiphertext(plaintext.len()));
    }

    // Encrypt in place over a copy of the input.
    let mut buf = plaintext.to_vec();
    let msg_len = buf.len();
    Aes256CbcEnc::new(&key.into(), &iv.into())
        .encrypt_padded_mut::<NoPadding>(&mut buf, msg_len)
        .map_err(|_| MsgSealError::UnalignedCiphertext(msg_len))?;
    Ok(buf)
}

/// Decrypt `ciphertext` with AES-256-CBC into a fresh buffer.
pub fn cbc_decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let (key, iv) = check_key_iv(key, iv)?;
    if ciphertext.len() % AES_BLOCK_LEN != 0 {
        return Err(MsgSealError::UnalignedCiphertext(ciphertext.len()));
    }

    Aes256CbcDec::new(&key.into(), &iv.into())
        .decrypt_padded_vec_mut::<NoPadding>(ciphertext)
        .map_err(|_| MsgSealError::UnalignedCiphertext(ciphertext.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let key = [0x42u8; KEY_LEN];
        let iv = [0x17u8; IV_LEN];
        let plaintext = [0xA5u8; 64];

        let ciphertext = cbc_encrypt(&key, &iv, &plaintext).unwrap();
        assert_eq!(ciphertext.len(), plaintext.len());
        assert_ne!(&ciphertext[..], &plaintext[..]);

        let recovered = cbc_decrypt(&key, &iv, &ciphertext).unwrap();
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn rejects_wrong_key_size() {
        let result = cbc_encrypt(&[0u8; 16], &[0u8; IV_LEN], &[0u8; 32]);
        assert_eq!(
            result,
            Err(MsgSealError::InvalidKeySize {
                expected: 32,
                actual: 16
            })
        );
    }

    #[test]
    fn rejects_wrong_iv_size() {
        let result = cbc_decrypt(&[0u8; KEY_LEN], &[0u8; 12], &[0u8; 32]);
        assert_eq!(
            result,
            Err(MsgSealError::InvalidIvSize {
                expected: 16,
                actual: 12
            })
        );
    }

    #[test]
    fn rejects_partial_blocks() {
        let key = [0u8; KEY_LEN];
        let iv = [0u8; IV_LEN];
        assert_eq!(
            cbc_encrypt(&key, &iv, &[0u8; 30]),
            Err(MsgSealError::UnalignedCiphertext(30))
        );
        assert_eq!(
            cbc_decrypt(&key, &iv, &[0u8; 40]),
            Err(MsgSealError::UnalignedCiphertext(40))
        );
    }

    #[test]
    fn iv_from_key_borrows_key_prefix() {
        let key: Vec<u8> = (0u8..32).collect();
        assert_eq!(iv_from_key(&key).unwrap(), &key[..16]);
        assert!(iv_from_key(&key[..31]).is_err());
    }
}
