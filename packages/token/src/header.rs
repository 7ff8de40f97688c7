//! Token header

use serde::{Deserialize, Serialize};

/// Token type tag written to every header
pub const TOKEN_TYPE: &str = "JWT";

/// Token header (RFC 7519, Section 5).
///
/// Field order is part of the wire format: `typ`, then `alg`, then `cty`
/// when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Token type, always `JWT` for tokens produced here.
    pub typ: String,
    /// Name of the algorithm that signed the token. Informational only;
    /// verification always uses the handler's own algorithm.
    pub alg: String,
    /// Content type of the claims.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cty: String,
}

impl Header {
    /// Create a header for the given algorithm name
    #[must_use]
    pub fn new(alg: impl Into<String>) -> Self {
        Self {
            typ: TOKEN_TYPE.to_string(),
            alg: alg.into(),
            cty: String::new(),
        }
    }

    /// Set the content type
    #[must_use]
    pub fn with_content_type(mut self, cty: impl Into<String>) -> Self {
        self.cty = cty.into();
        self
    }
}
