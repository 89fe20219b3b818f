//! Defines the claims carried by bearer tokens and how to create and verify them.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::Error;

/// The contents of a JSON Web Token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// The user the token was issued to.
    pub username: String,
    /// The time the token was issued, as a Unix timestamp.
    pub iat: i64,
    /// The expiry time of the token, as a Unix timestamp.
    pub exp: i64,
}

/// Create a signed token for `username` that is valid for `ttl`.
///
/// # Errors
///
/// Returns an [Error::TokenCreation] if the expiry time overflows or the
/// token could not be encoded.
pub fn create_token(username: &str, secret: &str, ttl: Duration) -> Result<String, Error> {
    let issued_at = OffsetDateTime::now_utc();
    let expires_at = issued_at
        .checked_add(ttl)
        .ok_or_else(|| Error::TokenCreation(format!("expiry overflowed with duration {ttl}")))?;

    let claims = Claims {
        username: username.to_owned(),
        iat: issued_at.unix_timestamp(),
        exp: expires_at.unix_timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|error| Error::TokenCreation(error.to_string()))
}

/// Verify the signature and expiry of `token` and return its claims.
///
/// # Errors
///
/// Returns an [Error::InvalidToken] if the token is malformed, was signed with
/// a different key, or has expired.
pub fn decode_token(token: &str, decoding_key: &DecodingKey) -> Result<Claims, Error> {
    decode::<Claims>(token, decoding_key, &Validation::default())
        .map(|token_data| token_data.claims)
        .map_err(|error| {
            tracing::debug!("Rejected bearer token: {error}");
            Error::InvalidToken
        })
}
