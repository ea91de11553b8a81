//! Plaintext envelope layout and block padding.
//!
//! Every message is framed into a plaintext envelope before encryption:
//!
//! ```text
//! [nonce: 16 bytes][payload_len: 4 bytes BE][payload][identifier][pad]
//! ```
//!
//! - **Nonce**: 16 bytes of caller-supplied random data.
//! - **Payload length**: big-endian u32 telling us where the payload ends
//!   and the identifier begins.
//! - **Payload**: arbitrary bytes, `payload_len` long.
//! - **Identifier**: arbitrary bytes (may be empty), runs to the padding.
//! - **Pad**: `pad_len` repetitions of the byte value `pad_len`, where
//!   `pad_len = 32 - (unpadded_len % 32)`. Always in `[1, 32]`: an envelope
//!   whose unpadded length is already a multiple of 32 still receives a
//!   full 32-byte pad block, so stripping is never ambiguous.
//!
//! The padding block size (32) is twice the AES block size, so every
//! padded envelope is also a whole number of cipher blocks.

use crate::errors::{MsgSealError, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Padding block size in bytes. Distinct from the AES block size (16).
pub const BLOCK_SIZE: usize = 32;

/// Size of the caller-supplied nonce at the front of every envelope.
pub const NONCE_LEN: usize = 16;

/// Size of the big-endian payload length prefix.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Bytes of header before the payload: nonce + length prefix.
pub const HEADER_LEN: usize = NONCE_LEN + LENGTH_PREFIX_LEN;

// ---------------------------------------------------------------------------
// Envelope assembly
// ---------------------------------------------------------------------------

/// Number of pad bytes for an envelope of `unpadded_len` bytes.
///
/// Always in `[1, BLOCK_SIZE]`.
pub fn pad_len(unpadded_len: usize) -> usize {
    BLOCK_SIZE - unpadded_len % BLOCK_SIZE
}

/// Assemble the padded plaintext envelope for `payload` and `identifier`.
///
/// Returns a buffer whose length is a multiple of [`BLOCK_SIZE`], ready for
/// encryption.
///
/// Fails with `LengthOverflow` if the payload is too long for its length to
/// be represented in the 4-byte prefix.
pub fn build_envelope(
    nonce: &[u8; NONCE_LEN],
    payload: &[u8],
    identifier: &[u8],
) -> Result<Vec<u8>> {
    let payload_len = u32::try_from(payload.len()).map_err(|_| MsgSealError::LengthOverflow {
        claimed: payload.len(),
        available: u32::MAX as usize,
    })?;

    let unpadded_len = HEADER_LEN + payload.len() + identifier.len();
    let pad = pad_len(unpadded_len);

    let mut envelope = Vec::with_capacity(unpadded_len + pad);
    envelope.extend_from_slice(nonce);
    envelope.extend_from_slice(&payload_len.to_be_bytes());
    envelope.extend_from_slice(payload);
    envelope.extend_from_slice(identifier);
    envelope.extend(std::iter::repeat(pad as u8).take(pad));

    debug_assert_eq!(envelope.len() % BLOCK_SIZE, 0);
    Ok(envelope)
}

// ---------------------------------------------------------------------------
// Envelope parsing
// ---------------------------------------------------------------------------

/// Validate and strip the trailing pad block.
///
/// The last byte names the pad length; it must be in `[1, BLOCK_SIZE]` and
/// what remains after removing that many bytes must still be longer than the
/// 20-byte header.
pub fn strip_padding(plaintext: &[u8]) -> Result<&[u8]> {
    let pad = match plaintext.last() {
        Some(&byte) => byte as usize,
        None => return Err(MsgSealError::TruncatedPlaintext(0)),
    };
    if pad == 0 || pad > BLOCK_SIZE {
        return Err(MsgSealError::InvalidPadding(pad as u8));
    }

    let stripped_len = plaintext.len().saturating_sub(pad);
    if stripped_len <= HEADER_LEN {
        return Err(MsgSealError::TruncatedPlaintext(stripped_len));
    }
    Ok(&plaintext[..stripped_len])
}

/// Read the big-endian payload length at bytes `[16, 20)`.
pub fn read_length_prefix(plaintext: &[u8]) -> Result<usize> {
    if plaintext.len() < HEADER_LEN {
        return Err(MsgSealError::TruncatedPlaintext(plaintext.len()));
    }
    let mut be = [0u8; LENGTH_PREFIX_LEN];
    be.copy_from_slice(&plaintext[NONCE_LEN..HEADER_LEN]);
    Ok(u32::from_be_bytes(be) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_len_is_always_one_to_block_size() {
        assert_eq!(pad_len(0), 32);
        assert_eq!(pad_len(1), 31);
        assert_eq!(pad_len(31), 1);
        assert_eq!(pad_len(32), 32);
        assert_eq!(pad_len(33), 31);
        assert_eq!(pad_len(63), 1);
        assert_eq!(pad_len(64), 32);
    }

    #[test]
    fn build_envelope_layout_is_exact() {
        let nonce = [0x0Au8; NONCE_LEN];
        let envelope = build_envelope(&nonce, b"abc", b"wx1").unwrap();

        // 16 nonce + 4 prefix + 3 payload + 3 identifier = 26, padded to 32.
        assert_eq!(envelope.len(), 32);
        assert_eq!(&envelope[..16], &nonce);
        assert_eq!(&envelope[16..20], &3u32.to_be_bytes());
        assert_eq!(&envelope[20..23], b"abc");
        assert_eq!(&envelope[23..26], b"wx1");
        assert!(envelope[26..].iter().all(|&b| b == 6), "pad bytes carry pad length");
    }

    #[test]
    fn build_envelope_adds_full_block_when_aligned() {
        // 16 + 4 + 12 + 0 = 32 exactly; a full extra pad block is required.
        let envelope = build_envelope(&[0u8; NONCE_LEN], &[0x42; 12], b"").unwrap();

        assert_eq!(envelope.len(), 64);
        assert!(envelope[32..].iter().all(|&b| b == 32));
    }

    #[test]
    fn strip_padding_removes_declared_pad() {
        let envelope = build_envelope(&[1u8; NONCE_LEN], b"hello", b"id").unwrap();
        let body = strip_padding(&envelope).unwrap();

        assert_eq!(body.len(), HEADER_LEN + 5 + 2);
        assert_eq!(&body[20..25], b"hello");
    }

    #[test]
    fn strip_padding_rejects_zero_pad_byte() {
        let mut buf = vec![0u8; 32];
        buf[31] = 0;
        assert_eq!(strip_padding(&buf), Err(MsgSealError::InvalidPadding(0)));
    }

    #[test]
    fn strip_padding_rejects_oversized_pad_byte() {
        let mut buf = vec![0u8; 32];
        buf[31] = 33;
        assert_eq!(strip_padding(&buf), Err(MsgSealError::InvalidPadding(33)));
    }

    #[test]
    fn strip_padding_rejects_pad_that_eats_the_header() {
        // 32 bytes with pad 12 leaves exactly 20, the bare header.
        let mut buf = vec![0u8; 32];
        buf[31] = 12;
        assert_eq!(strip_padding(&buf), Err(MsgSealError::TruncatedPlaintext(20)));
    }

    #[test]
    fn strip_padding_rejects_empty_input() {
        assert_eq!(strip_padding(&[]), Err(MsgSealError::TruncatedPlaintext(0)));
    }

    #[test]
    fn read_length_prefix_parses_big_endian() {
        let mut buf = vec![0u8; 24];
        buf[16..20].copy_from_slice(&0x0102_0304u32.to_be_bytes());
        assert_eq!(read_length_prefix(&buf).unwrap(), 0x0102_0304);
    }

    #[test]
    fn read_length_prefix_rejects_short_input() {
        assert_eq!(
            read_length_prefix(&[0u8; 19]),
            Err(MsgSealError::TruncatedPlaintext(19))
        );
    }
}
