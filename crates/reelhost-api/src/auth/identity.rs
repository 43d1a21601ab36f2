use uuid::Uuid;

use super::models::AuthError;

const BEARER_PREFIX: &str = "Bearer ";

/// Turns a request's credential into a verified user id.
pub trait IdentityResolver: Send + Sync {
    /// `authorization` is the raw `Authorization` header value, if any.
    fn verify(&self, authorization: Option<&str>) -> Result<Uuid, AuthError>;
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(authorization: Option<&str>) -> Result<&str, AuthError> {
    let header = authorization.ok_or(AuthError::MissingCredential)?;

    let token = header.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
        AuthError::InvalidCredential("Invalid authorization header format".to_string())
    })?;

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::InvalidCredential("Empty bearer token".to_string()));
    }

    Ok(token)
}
