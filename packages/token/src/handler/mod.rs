//! Token handler: encode/sign and decode/verify pipelines
//!
//! A [`Handler`] is built once per service and shared by every request. It
//! owns a single [`Algorithm`], and every operation is a synchronous, pure
//! in-memory computation that borrows the caller's claims only for the
//! duration of the call.

mod builder;

pub use builder::HandlerBuilder;

use crate::{
    algorithm::Algorithm,
    claims::Claims,
    codec::{base64_url_encode, decode_segment, encode_segment},
    error::{JwtError, JwtResult},
    header::Header,
    token::{TokenParts, signing_input},
};
use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use std::{fmt, marker::PhantomData, sync::Arc};
use subtle::ConstantTimeEq;

/// Encodes, signs, decodes and validates tokens carrying claims of type `P`.
///
/// The header `alg` of an incoming token is never consulted; signatures are
/// always recomputed with the handler's own algorithm, so a token cannot
/// choose how it is verified.
pub struct Handler<P> {
    algorithm: Arc<dyn Algorithm>,
    content_type: Option<String>,
    _claims: PhantomData<fn() -> P>,
}

impl<P> Handler<P> {
    /// Create a handler signing and verifying with `algorithm`
    pub fn new(algorithm: impl Algorithm) -> Self {
        Self::from_parts(Arc::new(algorithm), None)
    }

    /// Start configuring a handler
    #[must_use]
    pub fn builder() -> HandlerBuilder<P> {
        HandlerBuilder::new()
    }

    pub(crate) fn from_parts(algorithm: Arc<dyn Algorithm>, content_type: Option<String>) -> Self {
        Self {
            algorithm,
            content_type,
            _claims: PhantomData,
        }
    }

    /// Name of the configured algorithm, as written to the header
    #[must_use]
    pub fn algorithm_name(&self) -> &str {
        self.algorithm.name()
    }

    /// Content type written to the header `cty`, if configured
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn header(&self) -> Header {
        let header = Header::new(self.algorithm.name());
        match &self.content_type {
            Some(cty) => header.with_content_type(cty.clone()),
            None => header,
        }
    }

    fn sign(&self, message: &str) -> JwtResult<String> {
        let signature = self.algorithm.sign(message.as_bytes())?;
        Ok(base64_url_encode(&signature))
    }

    fn verify_parts(&self, parts: &TokenParts<'_>) -> JwtResult<()> {
        let expected = self.sign(&parts.signing_input())?;
        // Compare the encoded forms so that every character of the embedded
        // signature participates, including trailing base64 bits.
        if bool::from(expected.as_bytes().ct_eq(parts.signature.as_bytes())) {
            Ok(())
        } else {
            tracing::debug!(alg = self.algorithm.name(), "token signature mismatch");
            Err(JwtError::InvalidSignature)
        }
    }

    /// Decode the header without verifying anything.
    ///
    /// # Errors
    /// [`JwtError::InvalidFormat`] for malformed tokens, [`JwtError::Decoding`]
    /// if the header is not a valid header object.
    pub fn decode_header(&self, token: &str) -> JwtResult<Header> {
        let parts = TokenParts::parse(token)?;
        decode_segment(parts.header)
    }

    /// Check the token's signature against the handler's algorithm.
    ///
    /// # Errors
    /// [`JwtError::InvalidFormat`] for malformed tokens and
    /// [`JwtError::InvalidSignature`] if the signature does not match.
    pub fn validate_signature(&self, token: &str) -> JwtResult<()> {
        let parts = TokenParts::parse(token)?;
        self.verify_parts(&parts)
    }
}

impl<P: Serialize> Handler<P> {
    /// Encode `payload` and sign it, returning `header.payload.signature`.
    ///
    /// # Errors
    /// [`JwtError::Encoding`] if the header or payload cannot be serialized,
    /// or whatever the algorithm reports if signing fails.
    pub fn encode_and_sign(&self, payload: &P) -> JwtResult<String> {
        let header = encode_segment(&self.header())?;
        let payload = encode_segment(payload)?;

        let mut token = signing_input(&header, &payload);
        let signature = self.sign(&token)?;
        token.push('.');
        token.push_str(&signature);

        tracing::debug!(alg = self.algorithm.name(), "signed token");
        Ok(token)
    }
}

impl<P: DeserializeOwned> Handler<P> {
    /// Decode the claims without checking the signature or any claim.
    ///
    /// Meant for inspection only; never base a trust decision on the result.
    ///
    /// # Errors
    /// [`JwtError::InvalidFormat`] for malformed tokens, [`JwtError::Decoding`]
    /// if the payload does not deserialize into `P`.
    pub fn decode(&self, token: &str) -> JwtResult<P> {
        let parts = TokenParts::parse(token)?;
        decode_segment(parts.payload)
    }
}

impl<P: Claims> Handler<P> {
    /// Verify the signature, decode the claims and check `exp` then `nbf`
    /// against the current time.
    ///
    /// # Errors
    /// See [`Handler::decode_and_validate_at`].
    pub fn decode_and_validate(&self, token: &str) -> JwtResult<P> {
        self.decode_and_validate_at(token, Utc::now())
    }

    /// Like [`Handler::decode_and_validate`] with an explicit reference instant.
    ///
    /// Clock-skew tolerance is applied by choosing `now`.
    ///
    /// # Errors
    /// In order of checking: [`JwtError::InvalidFormat`],
    /// [`JwtError::InvalidSignature`], [`JwtError::Decoding`],
    /// [`JwtError::TokenExpired`], [`JwtError::TokenNotYetValid`].
    pub fn decode_and_validate_at(&self, token: &str, now: DateTime<Utc>) -> JwtResult<P> {
        let parts = TokenParts::parse(token)?;
        self.verify_parts(&parts)?;

        let claims: P = decode_segment(parts.payload)?;

        if let Some(exp) = claims.expiration() {
            if !exp.validate_exp(now) {
                tracing::debug!(alg = self.algorithm.name(), "token expired");
                return Err(JwtError::TokenExpired);
            }
        }
        if let Some(nbf) = claims.not_before() {
            if !nbf.validate_nbf(now) {
                tracing::debug!(alg = self.algorithm.name(), "token not valid yet");
                return Err(JwtError::TokenNotYetValid);
            }
        }

        Ok(claims)
    }
}

impl<P> Clone for Handler<P> {
    fn clone(&self) -> Self {
        Self {
            algorithm: Arc::clone(&self.algorithm),
            content_type: self.content_type.clone(),
            _claims: PhantomData,
        }
    }
}

impl<P> fmt::Debug for Handler<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("algorithm", &self.algorithm.name())
            .field("content_type", &self.content_type)
            .finish()
    }
}
