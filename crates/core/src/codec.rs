//! Obfuscation codec for stored device readings.
//!
//! **This is not cryptography.** A token is the standard base64 encoding of the reading with a
//! fixed marker appended:
//!
//! ```text
//! token = base64(plain || "encryptionKey")
//! ```
//!
//! Anyone holding a token can recover the reading. The codec only keeps raw readings out of
//! casual view in a record's storage. Changing the scheme changes the stored token format, so
//! swapping in real encryption is a product decision rather than a refactor.

use base64::{engine::general_purpose, Engine as _};

/// Fixed marker appended to every plaintext before encoding.
pub const OBFUSCATION_MARKER: &str = "encryptionKey";

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("token is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("decoded token is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("decoded token does not end with the obfuscation marker")]
    MalformedToken,
}

pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Masks a plaintext reading.
pub fn obfuscate(plain: &str) -> String {
    let mut buf = String::with_capacity(plain.len() + OBFUSCATION_MARKER.len());
    buf.push_str(plain);
    buf.push_str(OBFUSCATION_MARKER);
    general_purpose::STANDARD.encode(buf.as_bytes())
}

/// Recovers the plaintext from a token produced by [`obfuscate`].
///
/// Only the trailing marker is removed, so plaintexts that themselves contain the marker survive
/// a round trip unchanged.
///
/// # Errors
///
/// - [`CodecError::Decode`] if the token is not base64
/// - [`CodecError::Utf8`] if the decoded bytes are not UTF-8
/// - [`CodecError::MalformedToken`] if the decoded text lacks the trailing marker
pub fn reveal(token: &str) -> CodecResult<String> {
    let bytes = general_purpose::STANDARD.decode(token.trim())?;
    let decoded = String::from_utf8(bytes)?;
    decoded
        .strip_suffix(OBFUSCATION_MARKER)
        .map(str::to_owned)
        .ok_or(CodecError::MalformedToken)
}
