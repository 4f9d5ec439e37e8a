//! Content decoding and substitution error types.

use thiserror::Error;

/// Errors that can occur while decoding a file payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// GitHub used an encoding we cannot read (e.g. "none" for large blobs).
    #[error("Unsupported content encoding '{encoding}'")]
    UnsupportedEncoding { encoding: String },

    /// The payload is not valid base64.
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not UTF-8 text.
    #[error("File is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Errors that prevent a fetched file from becoming a pending change.
#[derive(Debug, Error)]
pub enum ChangeError {
    /// The payload could not be turned into text.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The search literal survives the replacement, so writing would leave
    /// the file matching on every later run.
    #[error("'{search}' still present in {path} after replacement")]
    SearchRemains { path: String, search: String },
}
