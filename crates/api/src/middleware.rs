use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, middleware::Next, response::Response};

use avatarforge_auth::TokenService;
use avatarforge_infra::UserStore;

use crate::context::CallerContext;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenService>,
    pub users: Arc<dyn UserStore>,
}

/// Resolve the caller for the request, if any.
///
/// A present, valid bearer token gets verified and the subject re-resolved
/// against the credential store: role changes made after issuance take effect
/// on the next request, and deleted accounts stop authenticating even with a
/// live token. On any failure (or no token at all) the request proceeds
/// without a caller; the access evaluator in each handler turns an absent
/// caller into 401 wherever one is required.
pub async fn auth_context_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if let Some(token) = extract_bearer(req.headers()) {
        match state.tokens.verify(token) {
            Ok(claims) => match state.users.find_by_id(claims.sub) {
                Some(account) => {
                    req.extensions_mut().insert(CallerContext::new(
                        account.id,
                        account.role,
                        account.email.clone(),
                    ));
                }
                None => {
                    tracing::warn!(sub = %claims.sub, "token subject no longer exists");
                }
            },
            Err(_) => {
                tracing::debug!("rejected bearer token");
            }
        }
    }

    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let token = header.to_str().ok()?.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer(&headers), None);

        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Basic abc"),
        );
        assert_eq!(extract_bearer(&headers), None);

        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer   "),
        );
        assert_eq!(extract_bearer(&headers), None);

        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer tok123"),
        );
        assert_eq!(extract_bearer(&headers), Some("tok123"));
    }
}
