//! The envelope codec.
//!
//! This module provides:
//! - envelope encode/decode entry points (`envelope`)
//! - the plaintext wire layout and block padding (`framing`)
//! - the fixed AES-256-CBC primitive (`cipher`)
//! - a zeroizing key wrapper (`key`)

pub mod cipher;
pub mod envelope;
pub mod framing;
pub mod key;

// Re-export the most commonly used items so callers can write:
//   use msgseal::codec::{encode, decode, DecodedEnvelope, ...};
pub use envelope::{decode, decode_lenient, decode_with_iv, encode, encode_base64, DecodedEnvelope};
pub use key::MessageKey;
