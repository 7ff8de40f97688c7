//! Handler configuration

use super::Handler;
use crate::{
    algorithm::{Algorithm, AlgorithmKind, HmacAlgorithm},
    error::{JwtError, JwtResult},
};
use std::{marker::PhantomData, sync::Arc};
use zeroize::Zeroizing;

/// Builder for [`Handler`].
///
/// Either name an HMAC algorithm and supply its secret, or hand over a
/// ready-made [`Algorithm`] with [`HandlerBuilder::with_signer`].
pub struct HandlerBuilder<P> {
    algorithm: Option<String>,
    secret: Option<Zeroizing<Vec<u8>>>,
    signer: Option<Arc<dyn Algorithm>>,
    content_type: Option<String>,
    _claims: PhantomData<fn() -> P>,
}

impl<P> Default for HandlerBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> HandlerBuilder<P> {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            algorithm: None,
            secret: None,
            signer: None,
            content_type: None,
            _claims: PhantomData,
        }
    }

    /// Set the HMAC algorithm by name (`HS256`, `HS384` or `HS512`)
    #[inline]
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: &str) -> Self {
        self.algorithm = Some(algorithm.to_string());
        self
    }

    /// Set the HMAC secret. The copy held by the builder is wiped on drop.
    #[inline]
    #[must_use]
    pub fn with_secret(mut self, secret: &[u8]) -> Self {
        self.secret = Some(Zeroizing::new(secret.to_vec()));
        self
    }

    /// Use a custom algorithm instead of a named HMAC variant
    #[must_use]
    pub fn with_signer(mut self, signer: impl Algorithm) -> Self {
        self.signer = Some(Arc::new(signer));
        self
    }

    /// Set the header content type (`cty`)
    #[inline]
    #[must_use]
    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    /// Build the handler.
    ///
    /// The algorithm defaults to `HS256` when only a secret is given.
    ///
    /// # Errors
    /// - [`JwtError::Configuration`] if neither a secret nor a signer is set,
    ///   or if both are.
    /// - [`JwtError::UnsupportedAlgorithm`] for unknown algorithm names.
    /// - [`JwtError::InvalidKey`] if the secret is empty.
    pub fn build(self) -> JwtResult<Handler<P>> {
        let content_type = self.content_type.filter(|cty| !cty.is_empty());

        let algorithm: Arc<dyn Algorithm> = match (self.signer, self.secret) {
            (Some(_), Some(_)) => {
                return Err(JwtError::configuration(
                    "a custom signer and an HMAC secret are mutually exclusive",
                ));
            }
            (Some(signer), None) => {
                if self.algorithm.is_some() {
                    return Err(JwtError::configuration(
                        "algorithm name is implied by the custom signer",
                    ));
                }
                signer
            }
            (None, Some(secret)) => {
                let kind = match self.algorithm.as_deref() {
                    Some(name) => name.parse::<AlgorithmKind>()?,
                    None => AlgorithmKind::Hs256,
                };
                let hmac = HmacAlgorithm::new(kind, &secret)?;
                warn_short_secret(kind, secret.len());
                Arc::new(hmac)
            }
            (None, None) => {
                return Err(JwtError::configuration(
                    "an HMAC secret or a custom signer is required",
                ));
            }
        };

        tracing::debug!(alg = algorithm.name(), "token handler configured");
        Ok(Handler::from_parts(algorithm, content_type))
    }
}

/// Secrets shorter than the digest output are accepted but logged
/// (RFC 7518, Section 3.2).
fn warn_short_secret(kind: AlgorithmKind, len: usize) {
    let recommended = kind.signature_len();
    if len < recommended {
        tracing::warn!(
            alg = kind.name(),
            len,
            recommended,
            "HMAC secret is shorter than the digest output"
        );
    }
}
