//! HTTP application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: store/token/hasher wiring and the operations behind every
//!   route (login, registration, progression, bonds)
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses
//! - `dialogue.rs`: style-templated avatar dialogue lines
//!
//! Authorization is evaluated per handler: the middleware only resolves the
//! caller (token verify + store re-resolution); each route declares its
//! required-role set and asks the access evaluator.

use std::sync::Arc;

use axum::{Extension, Router};

use avatarforge_auth::AuthConfig;

use crate::middleware;

pub mod dialogue;
pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &AuthConfig) -> Router {
    build_app_with(Arc::new(AppServices::new(config)))
}

/// Build the router around pre-constructed services (tests seed stores here).
pub fn build_app_with(services: Arc<AppServices>) -> Router {
    let auth_state = middleware::AuthState {
        tokens: services.tokens.clone(),
        users: services.users.clone(),
    };

    routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_context_middleware,
        ))
}
