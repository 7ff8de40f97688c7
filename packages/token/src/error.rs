//! Token error types
//!
//! Every failure produced by this crate is a [`JwtError`]. Callers that only
//! care whether an error came from token handling at all can use
//! [`is_jwt_error`]; callers that need to branch use the variants or
//! [`JwtError::kind`].

use thiserror::Error;

/// Token operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Token error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// The token is not three non-empty dot-separated segments, or a
    /// segment is not valid unpadded URL-safe base64.
    #[error("Invalid token format: {0}")]
    InvalidFormat(String),

    /// Header or claims could not be serialized.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A well-formed segment could not be deserialized into the requested shape.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// The embedded signature does not match the recomputed one.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// The claims report that the reference instant is past expiry.
    #[error("Token has expired (invalid exp)")]
    TokenExpired,

    /// The claims report that the reference instant precedes the allowed start.
    #[error("Token is not valid yet (invalid nbf)")]
    TokenNotYetValid,

    /// The signing algorithm failed to produce a signature.
    #[error("Signing error: {0}")]
    Signing(String),

    /// Key material was rejected.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Unknown algorithm name.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The handler builder is missing a required setting.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Fieldless classification of a [`JwtError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`JwtError::InvalidFormat`]
    Format,
    /// See [`JwtError::Encoding`]
    Encoding,
    /// See [`JwtError::Decoding`]
    Decoding,
    /// See [`JwtError::InvalidSignature`]
    Signature,
    /// See [`JwtError::TokenExpired`]
    Expired,
    /// See [`JwtError::TokenNotYetValid`]
    NotYetValid,
    /// See [`JwtError::Signing`]
    Signing,
    /// Construction-time failures: key, algorithm or builder configuration.
    Configuration,
}

impl JwtError {
    /// Classify this error without inspecting its message
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            JwtError::InvalidFormat(_) => ErrorKind::Format,
            JwtError::Encoding(_) => ErrorKind::Encoding,
            JwtError::Decoding(_) => ErrorKind::Decoding,
            JwtError::InvalidSignature => ErrorKind::Signature,
            JwtError::TokenExpired => ErrorKind::Expired,
            JwtError::TokenNotYetValid => ErrorKind::NotYetValid,
            JwtError::Signing(_) => ErrorKind::Signing,
            JwtError::InvalidKey(_)
            | JwtError::UnsupportedAlgorithm(_)
            | JwtError::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// True for failures caused by the token's time window rather than its integrity
    #[must_use]
    pub fn is_temporal(&self) -> bool {
        matches!(self, JwtError::TokenExpired | JwtError::TokenNotYetValid)
    }

    /// Create an invalid format error
    #[inline]
    #[must_use]
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        JwtError::InvalidFormat(msg.into())
    }

    /// Create an encoding error
    #[inline]
    #[must_use]
    pub fn encoding(msg: impl Into<String>) -> Self {
        JwtError::Encoding(msg.into())
    }

    /// Create a decoding error
    #[inline]
    #[must_use]
    pub fn decoding(msg: impl Into<String>) -> Self {
        JwtError::Decoding(msg.into())
    }

    /// Create a signing error
    #[inline]
    #[must_use]
    pub fn signing(msg: impl Into<String>) -> Self {
        JwtError::Signing(msg.into())
    }

    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        JwtError::InvalidKey(msg.into())
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: impl Into<String>) -> Self {
        JwtError::UnsupportedAlgorithm(alg.into())
    }

    /// Create a configuration error
    #[inline]
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        JwtError::Configuration(msg.into())
    }
}

/// Reports whether `err`, or any error in its `source()` chain, was produced by this crate.
#[must_use]
pub fn is_jwt_error(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<JwtError>() {
            return true;
        }
        current = e.source();
    }
    false
}
