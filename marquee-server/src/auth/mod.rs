pub mod jwt;
pub mod middleware;

pub use jwt::{TokenError, validate_token};
