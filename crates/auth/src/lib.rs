//! `avatarforge-auth` — authentication/authorization core.
//!
//! This crate is intentionally decoupled from HTTP and storage: it owns the
//! role model, JWT issue/verify, password hashing, and the pure access
//! decision. Resolving a caller against stored accounts is the API layer's
//! job.

pub mod access;
pub mod claims;
pub mod config;
pub mod password;
pub mod role;
pub mod token;

pub use access::{evaluate, evaluate_bond_gate, Caller};
pub use claims::Claims;
pub use config::AuthConfig;
pub use password::PasswordHasher;
pub use role::Role;
pub use token::TokenService;
