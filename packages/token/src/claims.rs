//! Claims payloads and temporal validation
//!
//! The handler is generic over its claims type and cannot know at compile time
//! whether that type carries `exp` or `nbf`. Instead every claims type
//! implements [`Claims`], whose two capability queries return the optional
//! temporal checks for a particular value. Both default to "absent", so any
//! serde type opts in with an empty `impl Claims for MyClaims {}`.
//!
//! Custom claims usually embed [`PublicClaims`] and forward to it:
//!
//! ```
//! use cryypt_token::{Claims, PublicClaims, ValidateExp, ValidateNbf};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct SessionClaims {
//!     #[serde(flatten)]
//!     public: PublicClaims,
//!     #[serde(rename = "uid")]
//!     user_id: String,
//! }
//!
//! impl Claims for SessionClaims {
//!     fn expiration(&self) -> Option<&dyn ValidateExp> {
//!         Some(&self.public)
//!     }
//!
//!     fn not_before(&self) -> Option<&dyn ValidateNbf> {
//!         Some(&self.public)
//!     }
//! }
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Checks a claims value's expiration against a reference instant
pub trait ValidateExp {
    /// `true` while `now` is inside the validity window.
    fn validate_exp(&self, now: DateTime<Utc>) -> bool;
}

/// Checks a claims value's not-before bound against a reference instant
pub trait ValidateNbf {
    /// `true` once `now` has passed the allowed start.
    fn validate_nbf(&self, now: DateTime<Utc>) -> bool;
}

/// A claims payload the handler can encode, decode and validate.
pub trait Claims: Serialize + DeserializeOwned {
    /// The expiration capability of this value, if it has one.
    fn expiration(&self) -> Option<&dyn ValidateExp> {
        None
    }

    /// The not-before capability of this value, if it has one.
    fn not_before(&self) -> Option<&dyn ValidateNbf> {
        None
    }
}

/// Registered public claims (RFC 7519, Section 4.1).
///
/// Every field is optional on the wire: empty strings and zero timestamps are
/// omitted when encoding and mean "unset" when validating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicClaims {
    /// Issuer
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub iss: String,
    /// Subject
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sub: String,
    /// Audience
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub aud: String,
    /// Expiration time (unix seconds)
    #[serde(default, skip_serializing_if = "is_zero")]
    pub exp: i64,
    /// Not before (unix seconds)
    #[serde(default, skip_serializing_if = "is_zero")]
    pub nbf: i64,
    /// Issued at (unix seconds)
    #[serde(default, skip_serializing_if = "is_zero")]
    pub iat: i64,
    /// JWT ID
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub jti: String,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(v: &i64) -> bool {
    *v == 0
}

fn offset_from_now(delta: Duration) -> DateTime<Utc> {
    Utc::now().checked_add_signed(delta).unwrap_or(if delta < Duration::zero() {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

impl PublicClaims {
    /// Empty claims
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `exp` to the given instant.
    pub fn set_exp_time(&mut self, at: DateTime<Utc>) {
        self.exp = at.timestamp();
    }

    /// Set `exp` to `ttl` from now, clamped to the representable range.
    pub fn set_exp_duration(&mut self, ttl: Duration) {
        self.set_exp_time(offset_from_now(ttl));
    }

    /// Set `nbf` to the given instant.
    pub fn set_nbf_time(&mut self, at: DateTime<Utc>) {
        self.nbf = at.timestamp();
    }

    /// Set `nbf` to `delay` from now, clamped to the representable range.
    pub fn set_nbf_duration(&mut self, delay: Duration) {
        self.set_nbf_time(offset_from_now(delay));
    }

    /// Set `iat` to the given instant.
    pub fn set_iat(&mut self, at: DateTime<Utc>) {
        self.iat = at.timestamp();
    }

    /// Set `iat` to the current time.
    pub fn set_iat_now(&mut self) {
        self.set_iat(Utc::now());
    }
}

/// `now` strictly before `exp`; zero means unbounded.
fn exp_holds(exp: i64, now: DateTime<Utc>) -> bool {
    if exp == 0 {
        return true;
    }
    match DateTime::<Utc>::from_timestamp(exp, 0) {
        Some(expires_at) => now < expires_at,
        // beyond the representable range: far future or far past
        None => exp > 0,
    }
}

/// `now` strictly after `nbf`; zero means unbounded.
fn nbf_holds(nbf: i64, now: DateTime<Utc>) -> bool {
    if nbf == 0 {
        return true;
    }
    match DateTime::<Utc>::from_timestamp(nbf, 0) {
        Some(valid_from) => now > valid_from,
        None => nbf < 0,
    }
}

impl ValidateExp for PublicClaims {
    fn validate_exp(&self, now: DateTime<Utc>) -> bool {
        exp_holds(self.exp, now)
    }
}

impl ValidateNbf for PublicClaims {
    fn validate_nbf(&self, now: DateTime<Utc>) -> bool {
        nbf_holds(self.nbf, now)
    }
}

impl Claims for PublicClaims {
    fn expiration(&self) -> Option<&dyn ValidateExp> {
        Some(self)
    }

    fn not_before(&self) -> Option<&dyn ValidateNbf> {
        Some(self)
    }
}

/// A NumericDate member of untyped claims
enum NumericDate {
    Unset,
    Whole(i64),
    Fractional(f64),
    Malformed,
}

impl NumericDate {
    fn read(value: &Value, name: &str) -> Self {
        let Some(member) = value.get(name) else {
            return NumericDate::Unset;
        };
        let Value::Number(number) = member else {
            return NumericDate::Malformed;
        };
        if let Some(secs) = number.as_i64() {
            NumericDate::Whole(secs)
        } else if number.is_u64() {
            // above i64::MAX, later than any representable instant
            NumericDate::Whole(i64::MAX)
        } else {
            match number.as_f64() {
                Some(secs) if secs == 0.0 => NumericDate::Unset,
                Some(secs) => NumericDate::Fractional(secs),
                None => NumericDate::Malformed,
            }
        }
    }
}

/// `now` as fractional unix seconds
#[allow(clippy::cast_precision_loss)]
fn unix_seconds(now: DateTime<Utc>) -> f64 {
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) / 1e9
}

impl ValidateExp for Value {
    fn validate_exp(&self, now: DateTime<Utc>) -> bool {
        match NumericDate::read(self, "exp") {
            NumericDate::Unset => true,
            NumericDate::Whole(exp) => exp_holds(exp, now),
            NumericDate::Fractional(exp) => unix_seconds(now) < exp,
            NumericDate::Malformed => false,
        }
    }
}

impl ValidateNbf for Value {
    fn validate_nbf(&self, now: DateTime<Utc>) -> bool {
        match NumericDate::read(self, "nbf") {
            NumericDate::Unset => true,
            NumericDate::Whole(nbf) => nbf_holds(nbf, now),
            NumericDate::Fractional(nbf) => unix_seconds(now) > nbf,
            NumericDate::Malformed => false,
        }
    }
}

/// Untyped claims: `exp` and `nbf` may be any JSON number, including
/// fractions. A member that is present but not a number fails its check.
impl Claims for Value {
    fn expiration(&self) -> Option<&dyn ValidateExp> {
        Some(self)
    }

    fn not_before(&self) -> Option<&dyn ValidateNbf> {
        Some(self)
    }
}
