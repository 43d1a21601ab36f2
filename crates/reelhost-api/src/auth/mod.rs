//! Caller authentication
//!
//! Access tokens are HS256 JWTs carried in an `Authorization: Bearer` header.

pub mod identity;
pub mod jwt;
pub mod models;

pub use identity::{bearer_token, IdentityResolver};
pub use jwt::JwtService;
pub use models::{AuthError, JwtClaims};
