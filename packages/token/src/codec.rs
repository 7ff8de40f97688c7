//! Segment codec: JSON bytes carried as unpadded URL-safe base64 (RFC 7515).

use crate::error::{JwtError, JwtResult};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Serialize, de::DeserializeOwned};

/// Base64 URL-safe encoding without padding
#[inline]
pub(crate) fn base64_url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Base64 URL-safe decoding without padding
#[inline]
pub(crate) fn base64_url_decode(input: &str) -> JwtResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| JwtError::invalid_format(format!("segment is not base64url: {e}")))
}

/// Serialize `value` to compact JSON and encode it as a token segment
pub(crate) fn encode_segment<T: Serialize + ?Sized>(value: &T) -> JwtResult<String> {
    let json = serde_json::to_vec(value).map_err(|e| JwtError::encoding(e.to_string()))?;
    Ok(base64_url_encode(&json))
}

/// Decode a token segment and deserialize its JSON into `T`
pub(crate) fn decode_segment<T: DeserializeOwned>(segment: &str) -> JwtResult<T> {
    let json = base64_url_decode(segment)?;
    serde_json::from_slice(&json).map_err(|e| JwtError::decoding(e.to_string()))
}
