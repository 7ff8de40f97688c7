//! Error classification

use cryypt_token::{ErrorKind, JwtError, is_jwt_error};
use std::fmt;

#[derive(Debug)]
struct Wrapped(JwtError);

impl fmt::Display for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request rejected")
    }
}

impl std::error::Error for Wrapped {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

#[test]
fn test_is_jwt_error() {
    assert!(is_jwt_error(&JwtError::InvalidSignature));
    assert!(is_jwt_error(&Wrapped(JwtError::TokenExpired)));

    let io = std::io::Error::other("test123");
    assert!(!is_jwt_error(&io));
}

#[test]
fn test_boxed_errors_are_recognised() {
    let boxed: Box<dyn std::error::Error + Send + Sync> =
        Box::new(JwtError::invalid_format("bad token"));
    assert!(is_jwt_error(boxed.as_ref()));
}

#[test]
fn test_kinds_are_distinct() {
    let errors = [
        (JwtError::invalid_format("x"), ErrorKind::Format),
        (JwtError::encoding("x"), ErrorKind::Encoding),
        (JwtError::decoding("x"), ErrorKind::Decoding),
        (JwtError::InvalidSignature, ErrorKind::Signature),
        (JwtError::TokenExpired, ErrorKind::Expired),
        (JwtError::TokenNotYetValid, ErrorKind::NotYetValid),
        (JwtError::signing("x"), ErrorKind::Signing),
        (JwtError::invalid_key("x"), ErrorKind::Configuration),
        (JwtError::unsupported_algorithm("RS256"), ErrorKind::Configuration),
        (JwtError::configuration("x"), ErrorKind::Configuration),
    ];
    for (err, kind) in errors {
        assert_eq!(err.kind(), kind, "{err}");
    }
}

#[test]
fn test_temporal_errors() {
    assert!(JwtError::TokenExpired.is_temporal());
    assert!(JwtError::TokenNotYetValid.is_temporal());
    assert!(!JwtError::InvalidSignature.is_temporal());
}

#[test]
fn test_messages() {
    assert_eq!(JwtError::InvalidSignature.to_string(), "Invalid token signature");
    assert_eq!(
        JwtError::TokenExpired.to_string(),
        "Token has expired (invalid exp)"
    );
    assert_eq!(
        JwtError::unsupported_algorithm("none").to_string(),
        "Unsupported algorithm: none"
    );
}
