use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::app::routes::common::{require_caller, ADMIN_ONLY, ANY_ROLE, MOD_OR_ADMIN};
use crate::app::{dto, errors, AppServices};
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_avatars).post(create_avatar))
        .route(
            "/:slug",
            get(get_avatar).patch(update_avatar).delete(delete_avatar),
        )
        .route("/:slug/xp", post(add_xp))
        .route("/:slug/reset", post(reset_progression))
        .route("/:slug/unlock", post(unlock_avatar))
        .route("/:slug/dialogue", post(dialogue))
}

// Reads are public: the roster is browsable before login.

pub async fn list_avatars(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    Json(services.list_avatars()).into_response()
}

pub async fn get_avatar(
    Extension(services): Extension<Arc<AppServices>>,
    Path(slug): Path<String>,
) -> axum::response::Response {
    match services.get_avatar(&slug) {
        Ok(record) => Json(record).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_avatar(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<CallerContext>>,
    Json(body): Json<dto::CreateAvatarRequest>,
) -> axum::response::Response {
    if let Err(resp) = require_caller(MOD_OR_ADMIN, caller.as_deref()) {
        return resp;
    }

    match services.create_avatar(&body.name, &body.style) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_avatar(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<CallerContext>>,
    Path(slug): Path<String>,
    Json(body): Json<dto::UpdateAvatarRequest>,
) -> axum::response::Response {
    if let Err(resp) = require_caller(MOD_OR_ADMIN, caller.as_deref()) {
        return resp;
    }

    match services.update_avatar(&slug, body) {
        Ok(record) => Json(record).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_avatar(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<CallerContext>>,
    Path(slug): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require_caller(ADMIN_ONLY, caller.as_deref()) {
        return resp;
    }

    match services.delete_avatar(&slug) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn add_xp(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<CallerContext>>,
    Path(slug): Path<String>,
    Json(body): Json<dto::AddXpRequest>,
) -> axum::response::Response {
    if let Err(resp) = require_caller(MOD_OR_ADMIN, caller.as_deref()) {
        return resp;
    }

    match services.add_xp(&slug, body.amount) {
        Ok(progression) => Json(progression).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn reset_progression(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<CallerContext>>,
    Path(slug): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require_caller(MOD_OR_ADMIN, caller.as_deref()) {
        return resp;
    }

    match services.reset_progression(&slug) {
        Ok(progression) => Json(progression).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn unlock_avatar(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<CallerContext>>,
    Path(slug): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require_caller(MOD_OR_ADMIN, caller.as_deref()) {
        return resp;
    }

    match services.unlock_avatar(&slug) {
        Ok(record) => Json(record).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Role check first (any authenticated account), then the bond gate inside
/// the service (admins bypass).
pub async fn dialogue(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<CallerContext>>,
    Path(slug): Path<String>,
    Json(body): Json<dto::DialogueRequest>,
) -> axum::response::Response {
    let caller = match require_caller(ANY_ROLE, caller.as_deref()) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match services.dialogue(caller.caller(), &slug, &body.context) {
        Ok(line) => Json(dto::DialogueResponse { line }).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
