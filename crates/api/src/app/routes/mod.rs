use axum::{routing::get, Router};

pub mod auth;
pub mod avatars;
pub mod common;
pub mod system;
pub mod users;

/// Full routing tree. Which routes require which roles is declared in each
/// handler, next to the operation it guards.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/avatars", avatars::router())
}
