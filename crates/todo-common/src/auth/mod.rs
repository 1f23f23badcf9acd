//! Authentication primitives shared by the service and API layers

mod failure;
mod jwt;
mod password;

pub use failure::AuthFailure;
pub use jwt::{Claims, JwtService};
pub use password::{hash_password, validate_password_strength, verify_password, DecoyHash};
