//! Compact signed tokens (JWT, RFC 7519) with HMAC-SHA2 signatures
//!
//! This crate provides:
//! - HS256, HS384 and HS512 signing behind a small [`Algorithm`] capability
//! - A [`Handler`] generic over any serde claims type
//! - Optional `exp` / `nbf` validation through the [`Claims`] capability queries
//! - Constant-time signature comparison
//!
//! ```
//! use cryypt_token::{Handler, HmacAlgorithm, PublicClaims};
//!
//! # fn main() -> cryypt_token::JwtResult<()> {
//! let handler = Handler::<PublicClaims>::new(HmacAlgorithm::hs256(b"testkey")?);
//!
//! let claims = PublicClaims {
//!     iss: "jwt testing".to_string(),
//!     exp: 1516239022,
//!     ..PublicClaims::default()
//! };
//! let token = handler.encode_and_sign(&claims)?;
//! assert_eq!(
//!     token,
//!     "eyJ0eXAiOiJKV1QiLCJhbGciOiJIUzI1NiJ9.\
//!      eyJpc3MiOiJqd3QgdGVzdGluZyIsImV4cCI6MTUxNjIzOTAyMn0.\
//!      GALxzaFGfbggUvAigJlp_tU4S-Oejui6GPHP2edEE8Y"
//! );
//! handler.validate_signature(&token)?;
//! # Ok(())
//! # }
//! ```

pub mod algorithm;
pub mod claims;
mod codec;
mod error;
pub mod handler;
pub mod header;
mod token;

pub use algorithm::{Algorithm, AlgorithmKind, HmacAlgorithm};
pub use claims::{Claims, PublicClaims, ValidateExp, ValidateNbf};
pub use error::*;
pub use handler::{Handler, HandlerBuilder};
pub use header::Header;
