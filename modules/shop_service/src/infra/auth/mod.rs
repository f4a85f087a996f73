//! Bearer tokens and password hashing

mod jwt;
mod password;

pub use jwt::JwtAuthority;
pub use password::Argon2Hasher;
