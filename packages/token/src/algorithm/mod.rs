//! Signing algorithm capability
//!
//! A handler is constructed with exactly one [`Algorithm`] and uses it both to
//! sign and to verify. The `alg` value found in a token header is never used to
//! pick an algorithm.

mod hmac;

pub use self::hmac::HmacAlgorithm;

use crate::error::{JwtError, JwtResult};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Keyed signing scheme used to produce and check token signatures.
///
/// `sign` must be deterministic for a given key and input and must not keep
/// state between calls, since a single instance is shared by every caller of
/// a handler.
pub trait Algorithm: Send + Sync + 'static {
    /// Uppercase header `alg` value, e.g. `HS256`.
    fn name(&self) -> &str;

    /// Compute the raw signature over `data`.
    fn sign(&self, data: &[u8]) -> JwtResult<Vec<u8>>;
}

impl<T: Algorithm + ?Sized> Algorithm for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn sign(&self, data: &[u8]) -> JwtResult<Vec<u8>> {
        (**self).sign(data)
    }
}

impl<T: Algorithm + ?Sized> Algorithm for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn sign(&self, data: &[u8]) -> JwtResult<Vec<u8>> {
        (**self).sign(data)
    }
}

/// The supported HMAC variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    /// HMAC with SHA-256
    Hs256,
    /// HMAC with SHA-384
    Hs384,
    /// HMAC with SHA-512
    Hs512,
}

impl AlgorithmKind {
    /// Header `alg` value
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            AlgorithmKind::Hs256 => "HS256",
            AlgorithmKind::Hs384 => "HS384",
            AlgorithmKind::Hs512 => "HS512",
        }
    }

    /// Raw signature width in bytes
    #[must_use]
    pub const fn signature_len(self) -> usize {
        match self {
            AlgorithmKind::Hs256 => 32,
            AlgorithmKind::Hs384 => 48,
            AlgorithmKind::Hs512 => 64,
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HS256" => Ok(AlgorithmKind::Hs256),
            "HS384" => Ok(AlgorithmKind::Hs384),
            "HS512" => Ok(AlgorithmKind::Hs512),
            other => Err(JwtError::unsupported_algorithm(other)),
        }
    }
}
