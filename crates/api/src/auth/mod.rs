//! Authentication for the admin API

pub mod credentials;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use credentials::{AdminCredentials, CredentialsError};
pub use jwt::{Claims, JwtError, JwtManager};
pub use middleware::{require_auth, AuthUser};
pub use password::{hash_password, verify_password};
