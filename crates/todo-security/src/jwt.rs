//! Session token handling

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{json, Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Invalid claim: {0}")]
    InvalidClaim(&'static str),
}

/// Typed view of a verified session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

/// A freshly signed session token.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies HMAC session tokens carrying `user_id` and `exp`.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    validation: Validation,
}

impl JwtService {
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.set_required_spec_claims(&["exp"]);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::try_seconds(ttl_seconds).unwrap_or(Duration::MAX),
            validation,
        }
    }

    /// Issues a token expiring one window from now.
    pub fn issue(&self, user_id: i64) -> Result<SessionToken, JwtError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issues a token expiring one window after `now`.
    pub fn issue_at(&self, user_id: i64, now: DateTime<Utc>) -> Result<SessionToken, JwtError> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| JwtError::CreationError("expiry out of range".to_string()))?;
        let claims = json!({
            "user_id": user_id,
            "exp": expires_at.timestamp(),
        });
        let value = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::CreationError(e.to_string()))?;

        Ok(SessionToken { value, expires_at })
    }

    /// Verifies signature, algorithm family and expiry, then converts the
    /// claim map into [`SessionClaims`].
    pub fn verify(&self, token: &str) -> Result<SessionClaims, JwtError> {
        let claims = decode::<Map<String, Value>>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::ValidationError(e.to_string()))?;

        typed_claims(&claims)
    }
}

fn typed_claims(claims: &Map<String, Value>) -> Result<SessionClaims, JwtError> {
    let user_id = claims
        .get("user_id")
        .and_then(integer_claim)
        .ok_or(JwtError::InvalidClaim("user_id"))?;

    let expires_at = claims
        .get("exp")
        .and_then(integer_claim)
        .and_then(|exp| DateTime::from_timestamp(exp, 0))
        .ok_or(JwtError::InvalidClaim("exp"))?;

    Ok(SessionClaims { user_id, expires_at })
}

// Some issuers encode integers as floats (`1.0`).
fn integer_claim(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.is_finite())
            .map(|f| f as i64)
    })
}
