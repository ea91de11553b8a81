use thiserror::Error;

/// All errors that can occur while encoding or decoding an envelope.
///
/// Every fallible call returns one of these as a value; malformed input is
/// never allowed to abort the process. Variants carry the offending size or
/// byte so callers can log a rejection without re-parsing the input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MsgSealError {
    // --- Key material errors ---
    #[error("Invalid key size: expected {expected} bytes, got {actual}")]
    InvalidKeySize { expected: usize, actual: usize },

    #[error("Invalid IV size: expected {expected} bytes, got {actual}")]
    InvalidIvSize { expected: usize, actual: usize },

    // --- Ciphertext structure errors ---
    #[error("Ciphertext too short: {0} bytes")]
    ShortCiphertext(usize),

    #[error("Ciphertext length {0} is not a multiple of the block size")]
    UnalignedCiphertext(usize),

    // --- Plaintext envelope errors ---
    #[error("Invalid padding byte: {0}")]
    InvalidPadding(u8),

    #[error("Plaintext too short after unpadding: {0} bytes")]
    TruncatedPlaintext(usize),

    #[error("Embedded payload length {claimed} overflows the {available} available bytes")]
    LengthOverflow { claimed: usize, available: usize },

    // --- Encoding errors ---
    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),
}

/// Convenience type alias for msgseal results.
pub type Result<T> = std::result::Result<T, MsgSealError>;
