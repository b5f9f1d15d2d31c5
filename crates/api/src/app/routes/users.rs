use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};

use avatarforge_core::UserId;

use crate::app::routes::common::{require_caller, ADMIN_ONLY, ANY_ROLE, MOD_OR_ADMIN};
use crate::app::{dto, errors, AppServices};
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/me", get(me).patch(update_me))
        .route("/me/password", patch(change_password))
        .route("/me/bonds/:slug", post(create_bond))
        .route("/me/bonds/:slug/points", post(increase_bond_points))
        .route("/me/bonds/:slug/humor", patch(set_humor_level))
        .route("/", get(list_users))
        .route("/:id", get(get_user).patch(admin_update).delete(delete_user))
        .route("/:id/role", patch(update_role))
}

/// Public registration. The payload may carry a role; it is ignored.
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> axum::response::Response {
    if body.role.is_some() {
        tracing::warn!("registration payload carried a role; ignoring");
    }

    match services
        .register(&body.email, &body.password, body.display_name)
        .await
    {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<CallerContext>>,
) -> axum::response::Response {
    let caller = match require_caller(ANY_ROLE, caller.as_deref()) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match services.get_user(caller.user_id()) {
        Ok(view) => Json(view).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_me(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<CallerContext>>,
    Json(body): Json<dto::UpdateProfileRequest>,
) -> axum::response::Response {
    let caller = match require_caller(ANY_ROLE, caller.as_deref()) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match services.update_profile(caller.user_id(), body.display_name) {
        Ok(view) => Json(view).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn change_password(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<CallerContext>>,
    Json(body): Json<dto::ChangePasswordRequest>,
) -> axum::response::Response {
    let caller = match require_caller(ANY_ROLE, caller.as_deref()) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match services
        .change_password(caller.user_id(), &body.old_password, &body.new_password)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_bond(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<CallerContext>>,
    Path(slug): Path<String>,
) -> axum::response::Response {
    let caller = match require_caller(ANY_ROLE, caller.as_deref()) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match services.create_bond(caller.user_id(), &slug) {
        Ok(bond) => (StatusCode::CREATED, Json(bond)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn increase_bond_points(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<CallerContext>>,
    Path(slug): Path<String>,
    Json(body): Json<dto::BondPointsRequest>,
) -> axum::response::Response {
    let caller = match require_caller(ANY_ROLE, caller.as_deref()) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match services.increase_bond_points(caller.user_id(), &slug, body.points) {
        Ok(bond) => Json(bond).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn set_humor_level(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<CallerContext>>,
    Path(slug): Path<String>,
    Json(body): Json<dto::HumorLevelRequest>,
) -> axum::response::Response {
    let caller = match require_caller(ANY_ROLE, caller.as_deref()) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match services.set_humor_level(caller.user_id(), &slug, body.humor_level) {
        Ok(bond) => Json(bond).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<CallerContext>>,
) -> axum::response::Response {
    if let Err(resp) = require_caller(MOD_OR_ADMIN, caller.as_deref()) {
        return resp;
    }

    Json(services.list_users()).into_response()
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<CallerContext>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require_caller(MOD_OR_ADMIN, caller.as_deref()) {
        return resp;
    }

    let id: UserId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id")
        }
    };

    match services.get_user(id) {
        Ok(view) => Json(view).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn admin_update(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<CallerContext>>,
    Path(id): Path<String>,
    Json(body): Json<dto::AdminUpdateUserRequest>,
) -> axum::response::Response {
    if let Err(resp) = require_caller(ADMIN_ONLY, caller.as_deref()) {
        return resp;
    }

    let id: UserId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id")
        }
    };

    match services.admin_update_user(id, body).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_role(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<CallerContext>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateRoleRequest>,
) -> axum::response::Response {
    if let Err(resp) = require_caller(ADMIN_ONLY, caller.as_deref()) {
        return resp;
    }

    let id: UserId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id")
        }
    };

    match services.update_role(id, body.role) {
        Ok(view) => Json(view).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<CallerContext>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require_caller(ADMIN_ONLY, caller.as_deref()) {
        return resp;
    }

    let id: UserId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id")
        }
    };

    match services.delete_user(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
