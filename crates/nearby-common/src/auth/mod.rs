//! Authentication utilities
//!
//! Access tokens are minted by the identity provider; this service only
//! verifies them.

mod jwt;

pub use jwt::{Claims, JwtService};
