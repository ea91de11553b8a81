//! msgseal: symmetric envelope codec for length-framed push-message payloads.
//!
//! Wire format:
//!
//! ```text
//! plaintext  = nonce(16B) || BE32(len(payload)) || payload || identifier || pad
//! pad        = pad_len repetitions of the byte value pad_len, 1 <= pad_len <= 32
//! ciphertext = AES-256-CBC(key = key[0..32], iv = key[0..16], plaintext)
//! ```
//!
//! The caller supplies the per-message nonce and the 32-byte key; the codec
//! never generates randomness and never stores key material.
//!
//! ```
//! use msgseal::{decode, encode};
//!
//! let key = [0u8; 32];
//! let nonce = [0x01u8; 16];
//!
//! let ciphertext = encode(&nonce, b"hello", b"app-1", &key)?;
//! let message = decode(&ciphertext, &key)?;
//!
//! assert_eq!(message.payload, b"hello");
//! assert_eq!(message.identifier, b"app-1");
//! # Ok::<(), msgseal::MsgSealError>(())
//! ```

pub mod codec;
pub mod errors;

pub use codec::envelope::{
    decode, decode_lenient, decode_with_iv, encode, encode_base64, DecodedEnvelope,
};
pub use codec::key::MessageKey;
pub use errors::{MsgSealError, Result};
