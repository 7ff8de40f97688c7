//! HMAC-SHA2 signing (HS256, HS384, HS512)

use super::{Algorithm, AlgorithmKind};
use crate::error::{JwtError, JwtResult};
use hmac::{Hmac, Mac, digest::KeyInit};
use sha2::{Sha256, Sha384, Sha512};
use std::fmt;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// Pre-keyed MAC state. Never updated in place; each signature is computed
/// on a clone so concurrent callers cannot observe each other's input.
#[derive(Clone)]
enum KeyedMac {
    Sha256(HmacSha256),
    Sha384(HmacSha384),
    Sha512(HmacSha512),
}

fn keyed<M: Mac + KeyInit>(secret: &[u8]) -> JwtResult<M> {
    <M as KeyInit>::new_from_slice(secret).map_err(|e| JwtError::invalid_key(e.to_string()))
}

/// HMAC signing algorithm with a secret fixed at construction.
///
/// The raw secret is not retained; only the keyed MAC state derived from it.
#[derive(Clone)]
pub struct HmacAlgorithm {
    kind: AlgorithmKind,
    mac: KeyedMac,
}

impl HmacAlgorithm {
    /// Create an algorithm of the given kind keyed with `secret`
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidKey`] if `secret` is empty or the MAC
    /// rejects it.
    pub fn new(kind: AlgorithmKind, secret: &[u8]) -> JwtResult<Self> {
        if secret.is_empty() {
            return Err(JwtError::invalid_key("HMAC secret must not be empty"));
        }
        let mac = match kind {
            AlgorithmKind::Hs256 => KeyedMac::Sha256(keyed(secret)?),
            AlgorithmKind::Hs384 => KeyedMac::Sha384(keyed(secret)?),
            AlgorithmKind::Hs512 => KeyedMac::Sha512(keyed(secret)?),
        };
        Ok(Self { kind, mac })
    }

    /// HMAC-SHA256
    ///
    /// # Errors
    /// See [`HmacAlgorithm::new`].
    pub fn hs256(secret: &[u8]) -> JwtResult<Self> {
        Self::new(AlgorithmKind::Hs256, secret)
    }

    /// HMAC-SHA384
    ///
    /// # Errors
    /// See [`HmacAlgorithm::new`].
    pub fn hs384(secret: &[u8]) -> JwtResult<Self> {
        Self::new(AlgorithmKind::Hs384, secret)
    }

    /// HMAC-SHA512
    ///
    /// # Errors
    /// See [`HmacAlgorithm::new`].
    pub fn hs512(secret: &[u8]) -> JwtResult<Self> {
        Self::new(AlgorithmKind::Hs512, secret)
    }

    /// The HMAC variant
    #[must_use]
    pub fn kind(&self) -> AlgorithmKind {
        self.kind
    }
}

impl Algorithm for HmacAlgorithm {
    fn name(&self) -> &str {
        self.kind.name()
    }

    #[inline]
    fn sign(&self, data: &[u8]) -> JwtResult<Vec<u8>> {
        let signature = match &self.mac {
            KeyedMac::Sha256(keyed) => {
                let mut mac = keyed.clone();
                mac.update(data);
                mac.finalize().into_bytes().to_vec()
            }
            KeyedMac::Sha384(keyed) => {
                let mut mac = keyed.clone();
                mac.update(data);
                mac.finalize().into_bytes().to_vec()
            }
            KeyedMac::Sha512(keyed) => {
                let mut mac = keyed.clone();
                mac.update(data);
                mac.finalize().into_bytes().to_vec()
            }
        };
        Ok(signature)
    }
}

impl fmt::Debug for HmacAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacAlgorithm")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // RFC 4231, test case 2
    const KEY: &[u8] = b"Jefe";
    const DATA: &[u8] = b"what do ya want for nothing?";

    #[test]
    fn test_hs256_matches_rfc4231() {
        let alg = HmacAlgorithm::hs256(KEY).expect("HMAC accepts any key length");
        let sig = alg.sign(DATA).expect("signing should succeed");
        assert_eq!(
            sig,
            hex!("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
        );
    }

    #[test]
    fn test_hs384_matches_rfc4231() {
        let alg = HmacAlgorithm::hs384(KEY).expect("HMAC accepts any key length");
        let sig = alg.sign(DATA).expect("signing should succeed");
        assert_eq!(
            sig,
            hex!(
                "af45d2e376484031617f78d2b58a6b1b9c7ef464f5a01b47e42ec3736322445e"
                "8e2240ca5e69e2c78b3239ecfab21649"
            )
        );
    }

    #[test]
    fn test_hs512_matches_rfc4231() {
        let alg = HmacAlgorithm::hs512(KEY).expect("HMAC accepts any key length");
        let sig = alg.sign(DATA).expect("signing should succeed");
        assert_eq!(
            sig,
            hex!(
                "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554"
                "9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
            )
        );
    }

    #[test]
    fn test_repeated_signing_does_not_accumulate_state() {
        let alg = HmacAlgorithm::hs256(b"testkey").expect("key should be accepted");
        let first = alg.sign(b"payload").expect("signing should succeed");
        let _ = alg.sign(b"something else entirely").expect("signing should succeed");
        let again = alg.sign(b"payload").expect("signing should succeed");
        assert_eq!(first, again);
    }

    #[test]
    fn test_signature_width_matches_kind() {
        for kind in [AlgorithmKind::Hs256, AlgorithmKind::Hs384, AlgorithmKind::Hs512] {
            let alg = HmacAlgorithm::new(kind, b"k").expect("key should be accepted");
            assert_eq!(alg.name(), kind.name());
            let sig = alg.sign(b"x").expect("signing should succeed");
            assert_eq!(sig.len(), kind.signature_len());
        }
    }

    #[test]
    fn test_empty_secret_is_rejected_for_every_kind() {
        for kind in [AlgorithmKind::Hs256, AlgorithmKind::Hs384, AlgorithmKind::Hs512] {
            let err = HmacAlgorithm::new(kind, b"").expect_err("empty secret");
            assert!(matches!(err, JwtError::InvalidKey(_)));
        }
    }

    #[test]
    fn test_kind_parses_uppercase_names_only() {
        assert_eq!("HS384".parse::<AlgorithmKind>(), Ok(AlgorithmKind::Hs384));
        assert_eq!(
            "hs256".parse::<AlgorithmKind>(),
            Err(JwtError::UnsupportedAlgorithm("hs256".to_string()))
        );
        assert!("RS256".parse::<AlgorithmKind>().is_err());
    }
}
