//! EcoScore Auth — password hashing, token issuing, request authentication.

pub mod extract;
pub mod jwt;
pub mod password;

pub use extract::{AuthUser, JwtState};
pub use jwt::{Claims, JwtManager};
pub use password::PasswordHasher;
