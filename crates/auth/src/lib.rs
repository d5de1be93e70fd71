//! `travelhub-auth`: credential and token primitives.
//!
//! This crate is decoupled from HTTP and storage: it hashes and verifies
//! passwords against a stored salt, and issues/validates HS256 session tokens.

pub mod claims;
pub mod error;
pub mod jwt;
pub mod password;
pub mod roles;

pub use claims::JwtClaims;
pub use error::AuthError;
pub use jwt::{Hs256Jwt, JwtConfig, JwtValidator};
pub use password::{generate_salt, hash_password, verify_password};
pub use roles::UserRole;
