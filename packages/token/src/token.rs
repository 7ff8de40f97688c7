//! Compact token layout: `header.payload.signature`

use crate::error::{JwtError, JwtResult};

/// Borrowed view of the three segments of a compact token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TokenParts<'a> {
    pub(crate) header: &'a str,
    pub(crate) payload: &'a str,
    pub(crate) signature: &'a str,
}

impl<'a> TokenParts<'a> {
    /// Split `token` into exactly three non-empty segments
    pub(crate) fn parse(token: &'a str) -> JwtResult<Self> {
        let mut segments = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(JwtError::invalid_format("expected exactly three segments"));
        };

        if header.is_empty() || payload.is_empty() || signature.is_empty() {
            return Err(JwtError::invalid_format("token segments must not be empty"));
        }

        Ok(Self {
            header,
            payload,
            signature,
        })
    }

    /// The `header.payload` bytes the signature is computed over
    pub(crate) fn signing_input(&self) -> String {
        signing_input(self.header, self.payload)
    }
}

/// Join encoded header and payload with the segment separator
#[inline]
pub(crate) fn signing_input(header: &str, payload: &str) -> String {
    let mut message = String::with_capacity(header.len() + payload.len() + 1);
    message.push_str(header);
    message.push('.');
    message.push_str(payload);
    message
}
