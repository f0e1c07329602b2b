use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::jwt::{TokenError, validate_token};
use crate::infra::app_state::AppState;
use crate::infra::errors::AppError;

/// Requires a valid bearer token unless the server runs in debug mode.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if state.config().debug {
        return Ok(next.run(request).await);
    }

    let token = extract_bearer_token(&request)?;
    if let Err(err) = validate_token(&token, &state.config().auth.secret_key) {
        if let TokenError::Invalid(source) = &err {
            warn!(error = %source, "rejected bearer token");
        }
        return Err(err.into());
    }

    Ok(next.run(request).await)
}

fn extract_bearer_token(request: &Request) -> Result<String, TokenError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(TokenError::Missing)?
        .to_str()
        .map_err(|_| TokenError::MalformedHeader)?;

    auth_header
        .split_whitespace()
        .nth(1)
        .map(str::to_string)
        .ok_or(TokenError::MalformedHeader)
}
