//! Bearer-token codec: HS256 signing and verification.
//!
//! Signature verification is delegated to `jsonwebtoken`; the claim time
//! window is then checked by the pure [`validate_claims`] layer with an
//! injected clock. Keeping the two steps separate keeps "expired" and
//! "invalid" distinct kinds and keeps expiry deterministic under test.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::claims::{JwtClaims, TokenValidationError, validate_claims};

/// Token verification failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Malformed, forged, or otherwise unverifiable token.
    #[error("invalid token: {0}")]
    Invalid(String),

    /// Structurally valid token past its expiry window.
    #[error("token has expired")]
    Expired,
}

/// Verifies a raw bearer token into claims.
///
/// Implementations must verify the signature before the claim window so a
/// tampered token can never surface as merely "expired".
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError>;
}

impl<V> JwtValidator for Arc<V>
where
    V: JwtValidator + ?Sized,
{
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError> {
        (**self).validate(token, now)
    }
}

/// HS256 (shared-secret) token codec.
///
/// The secret is server-held process configuration; one instance serves the
/// whole process.
pub struct Hs256JwtValidator {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl Hs256JwtValidator {
    pub fn new(secret: Vec<u8>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `validate_claims` against an injected clock;
        // the library-side wall-clock checks are disabled.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        Self {
            encoding: EncodingKey::from_secret(&secret),
            decoding: DecodingKey::from_secret(&secret),
            validation,
        }
    }

    /// Issue a signed token for the given claims (login flows, tests).
    pub fn encode(&self, claims: &JwtClaims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError> {
        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        match validate_claims(&data.claims, now) {
            Ok(()) => Ok(data.claims),
            Err(TokenValidationError::Expired) => Err(TokenError::Expired),
            Err(other) => Err(TokenError::Invalid(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use fleetdesk_core::AccountId;

    fn codec() -> Hs256JwtValidator {
        Hs256JwtValidator::new(b"unit-test-secret".to_vec())
    }

    fn claims_at(now: DateTime<Utc>, ttl_minutes: i64) -> JwtClaims {
        JwtClaims {
            sub: AccountId::new(),
            role: "manager".to_string(),
            iat: now,
            exp: now + Duration::minutes(ttl_minutes),
        }
    }

    /// Flip the first character of the signature segment.
    fn tamper(token: &str) -> String {
        let dot = token.rfind('.').unwrap();
        let mut out: Vec<char> = token.chars().collect();
        out[dot + 1] = if out[dot + 1] == 'A' { 'B' } else { 'A' };
        out.into_iter().collect()
    }

    #[test]
    fn round_trips_valid_claims() {
        let codec = codec();
        let now = Utc::now();
        let claims = claims_at(now, 60);

        let token = codec.encode(&claims).unwrap();
        let decoded = codec.validate(&token, now + Duration::minutes(1)).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn expired_token_is_expired_not_invalid() {
        let codec = codec();
        let issued = Utc::now() - Duration::hours(2);
        let token = codec.encode(&claims_at(issued, 60)).unwrap();

        let err = codec.validate(&token, Utc::now()).unwrap_err();
        assert_eq!(err, TokenError::Expired);
    }

    #[test]
    fn tampered_token_is_invalid_not_expired() {
        let codec = codec();
        // Expired *and* tampered: the signature check must win.
        let issued = Utc::now() - Duration::hours(2);
        let token = tamper(&codec.encode(&claims_at(issued, 60)).unwrap());

        let err = codec.validate(&token, Utc::now()).unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let codec = codec();
        let other = Hs256JwtValidator::new(b"a-different-secret".to_vec());
        let now = Utc::now();
        let token = other.encode(&claims_at(now, 60)).unwrap();

        assert!(matches!(
            codec.validate(&token, now).unwrap_err(),
            TokenError::Invalid(_)
        ));
    }

    #[test]
    fn garbage_is_invalid() {
        let codec = codec();
        assert!(matches!(
            codec.validate("not.a.jwt", Utc::now()).unwrap_err(),
            TokenError::Invalid(_)
        ));
    }
}
