//! Authentication building blocks: password hashing and JWT sessions

pub mod jwt;
pub mod password;

pub use jwt::{JwtClaims, JwtConfig, JwtService};
pub use password::{Argon2Hasher, PasswordHasher};
