//! Property tests: round trip, tamper sensitivity, format strictness

use chrono::{DateTime, Utc};
use cryypt_token::{AlgorithmKind, ErrorKind, Handler, HmacAlgorithm, JwtError, PublicClaims};
use proptest::prelude::*;

const BASE64URL: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

fn algorithm_kind() -> impl Strategy<Value = AlgorithmKind> {
    prop_oneof![
        Just(AlgorithmKind::Hs256),
        Just(AlgorithmKind::Hs384),
        Just(AlgorithmKind::Hs512),
    ]
}

fn public_claims() -> impl Strategy<Value = PublicClaims> {
    (
        ".*",
        ".*",
        ".*",
        0i64..4_102_444_800,
        0i64..4_102_444_800,
        any::<i64>(),
        ".*",
    )
        .prop_map(|(iss, sub, aud, exp, nbf, iat, jti)| PublicClaims {
            iss,
            sub,
            aud,
            exp,
            nbf,
            iat,
            jti,
        })
}

fn handler(kind: AlgorithmKind, key: &[u8]) -> Handler<PublicClaims> {
    Handler::new(HmacAlgorithm::new(kind, key).expect("HMAC accepts any key length"))
}

proptest! {
    #[test]
    fn round_trip_inside_validity_window(
        kind in algorithm_kind(),
        key in proptest::collection::vec(any::<u8>(), 1..96),
        claims in public_claims(),
    ) {
        let handler = handler(kind, &key);
        let token = handler.encode_and_sign(&claims).expect("encoding should succeed");

        // Pick an instant that satisfies both bounds when the window is non-empty.
        let lower = if claims.nbf == 0 { 0 } else { claims.nbf + 1 };
        let upper = if claims.exp == 0 { i64::MAX } else { claims.exp };
        prop_assume!(lower < upper);
        let now = DateTime::<Utc>::from_timestamp(lower, 0).expect("timestamp in range");

        let decoded = handler
            .decode_and_validate_at(&token, now)
            .expect("claims inside their window should validate");
        prop_assert_eq!(&decoded, &claims);
        prop_assert_eq!(handler.decode(&token).expect("decode"), claims);
    }

    #[test]
    fn tampered_signature_is_rejected(
        kind in algorithm_kind(),
        claims in public_claims(),
        position in any::<prop::sample::Index>(),
        replacement in any::<prop::sample::Index>(),
    ) {
        let handler = handler(kind, b"testkey");
        let token = handler.encode_and_sign(&claims).expect("encoding should succeed");

        let signature_start = token.rfind('.').expect("three segments") + 1;
        let mut bytes = token.into_bytes();
        let idx = signature_start + position.index(bytes.len() - signature_start);
        let original = bytes[idx];
        let mut candidate = BASE64URL[replacement.index(BASE64URL.len())];
        if candidate == original {
            candidate = if original == b'A' { b'B' } else { b'A' };
        }
        bytes[idx] = candidate;
        let tampered = String::from_utf8(bytes).expect("base64url is ASCII");

        prop_assert_eq!(handler.validate_signature(&tampered), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn wrong_segment_count_is_a_format_error(
        segments in proptest::collection::vec("[A-Za-z0-9_-]{1,12}", 0..8),
    ) {
        prop_assume!(segments.len() != 3);
        let token = segments.join(".");
        let handler = handler(AlgorithmKind::Hs256, b"testkey");

        prop_assert_eq!(handler.decode(&token).map(|_| ()).map_err(|e| e.kind()), Err(ErrorKind::Format));
        prop_assert_eq!(handler.decode_header(&token).map(|_| ()).map_err(|e| e.kind()), Err(ErrorKind::Format));
        prop_assert_eq!(handler.validate_signature(&token).map_err(|e| e.kind()), Err(ErrorKind::Format));
        prop_assert_eq!(handler.decode_and_validate(&token).map(|_| ()).map_err(|e| e.kind()), Err(ErrorKind::Format));
    }

    #[test]
    fn cross_key_rejection(
        kind in algorithm_kind(),
        key in proptest::collection::vec(any::<u8>(), 1..64),
        flip in any::<prop::sample::Index>(),
        claims in public_claims(),
    ) {
        // Same length, one bit apart: zero-padded short keys would otherwise
        // make e.g. [1] and [1, 0] equivalent HMAC keys.
        let mut other = key.clone();
        other[flip.index(key.len())] ^= 0x01;
        let token = handler(kind, &key).encode_and_sign(&claims).expect("encoding should succeed");
        let verifier = handler(kind, &other);
        prop_assert_eq!(verifier.validate_signature(&token), Err(JwtError::InvalidSignature));
        prop_assert_eq!(verifier.decode_and_validate(&token), Err(JwtError::InvalidSignature));
    }
}
