// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Credential service: password hashing and signed session tokens.

pub mod password;
pub mod token;
mod service;
mod service_impl;

pub use password::{hash_password, verify_password, MIN_PASSWORD_LENGTH};
pub use token::{Claims, TokenService};
pub use service::AuthService;
pub use service_impl::DefaultAuth;
