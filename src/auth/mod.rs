use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

/// Name of the session cookie the web client sends back
pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Claims issued now and expiring `expiry_hours` later. Lifetimes past
    /// chrono's representable range are refused rather than wrapped.
    pub fn new(email: impl Into<String>, expiry_hours: u64) -> Result<Self, JwtError> {
        let now = Utc::now();
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                JwtError::TokenGeneration(format!(
                    "token lifetime of {} hours is out of range",
                    expiry_hours
                ))
            })?;

        Ok(Self {
            email: email.into(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("JWT expired")]
    Expired,

    #[error("Invalid JWT: {0}")]
    InvalidToken(String),
}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Validate JWT signature and expiry, returning the claims
pub fn validate_jwt(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            _ => JwtError::InvalidToken(e.to_string()),
        })
}

/// Session cookie carrying a signed token.
///
/// Production deployments serve the client from another site, so the cookie
/// must be `Secure; SameSite=None`; locally it stays `SameSite=Strict`.
pub fn session_cookie(token: String, security: &SecurityConfig) -> Cookie<'static> {
    let same_site = if security.secure_cookies {
        SameSite::None
    } else {
        SameSite::Strict
    };

    Cookie::build((TOKEN_COOKIE, token))
        .http_only(true)
        .secure(security.secure_cookies)
        .same_site(same_site)
        .path("/")
        .build()
}

/// Same attributes as the session cookie, emptied and already expired
pub fn cleared_session_cookie(security: &SecurityConfig) -> Cookie<'static> {
    let mut cookie = session_cookie(String::new(), security);
    cookie.make_removal();
    cookie
}
