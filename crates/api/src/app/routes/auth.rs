use std::sync::Arc;

use axum::{
    extract::Extension,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use avatarforge_auth::Role;

use crate::app::routes::common::require_caller;
use crate::app::{dto, errors, AppServices};
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/protected/user", get(user_access))
        .route("/protected/mod", get(mod_access))
        .route("/protected/admin", get(admin_access))
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    match services.login(&body.email, &body.password).await {
        Ok((access_token, user)) => {
            Json(dto::LoginResponse { access_token, user }).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Symbolic: tokens are stateless and there is no revocation list, so the
/// client just discards its copy.
pub async fn logout() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "logout successful; delete the token client-side",
    }))
}

fn probe_response(caller: &CallerContext, granted: &'static str) -> axum::response::Response {
    Json(serde_json::json!({
        "message": granted,
        "user": {
            "userId": caller.user_id(),
            "email": caller.email(),
            "role": caller.role(),
        },
    }))
    .into_response()
}

pub async fn user_access(caller: Option<Extension<CallerContext>>) -> axum::response::Response {
    match require_caller(&[Role::User], caller.as_deref()) {
        Ok(caller) => probe_response(caller, "user access granted"),
        Err(resp) => resp,
    }
}

pub async fn mod_access(caller: Option<Extension<CallerContext>>) -> axum::response::Response {
    match require_caller(&[Role::Mod, Role::Admin], caller.as_deref()) {
        Ok(caller) => probe_response(caller, "moderator or admin access granted"),
        Err(resp) => resp,
    }
}

pub async fn admin_access(caller: Option<Extension<CallerContext>>) -> axum::response::Response {
    match require_caller(&[Role::Admin], caller.as_deref()) {
        Ok(caller) => probe_response(caller, "admin-only access granted"),
        Err(resp) => resp,
    }
}
