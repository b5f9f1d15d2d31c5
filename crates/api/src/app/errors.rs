use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use avatarforge_core::DomainError;

/// Map the domain error taxonomy onto transport status codes.
///
/// `Unauthorized` keeps a deliberately generic message: bad email and bad
/// password must be indistinguishable to the client.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Unauthorized => {
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", "invalid credentials")
        }
        DomainError::Forbidden(required) => json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            format!("requires one of: {}", required.join(", ")),
        ),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_expected_status_codes() {
        let cases = [
            (DomainError::Unauthorized, StatusCode::UNAUTHORIZED),
            (DomainError::forbidden(["admin"]), StatusCode::FORBIDDEN),
            (DomainError::NotFound, StatusCode::NOT_FOUND),
            (DomainError::conflict("dup"), StatusCode::CONFLICT),
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
        ];
        for (err, status) in cases {
            assert_eq!(domain_error_to_response(err).status(), status);
        }
    }
}
