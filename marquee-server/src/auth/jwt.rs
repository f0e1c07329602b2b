use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};
use serde_json::Value;
use thiserror::Error;

use crate::infra::errors::AppError;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Access is restricted to authorized users only!")]
    Missing,

    #[error("Session has expired!")]
    Expired,

    #[error("Malformed authorization header")]
    MalformedHeader,

    #[error("Invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(err),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Missing | TokenError::Expired => AppError::unauthorized(err.to_string()),
            TokenError::MalformedHeader | TokenError::Invalid(_) => {
                AppError::bad_request(err.to_string())
            }
        }
    }
}

/// Checks an HS256 signature and expiry. No claim is required; when `exp`
/// is present it must be in the future.
pub fn validate_token(token: &str, secret: &str) -> Result<Value, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();

    let data = decode::<Value>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}
