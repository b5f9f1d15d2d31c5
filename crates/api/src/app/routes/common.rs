use avatarforge_auth::{evaluate, Role};
use avatarforge_core::DomainError;

use crate::app::errors;
use crate::context::CallerContext;

/// Any authenticated account, regardless of tier.
pub const ANY_ROLE: &[Role] = &[Role::User, Role::Mod, Role::Admin];
pub const MOD_OR_ADMIN: &[Role] = &[Role::Mod, Role::Admin];
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Run the access evaluator for a route's required-role set and hand back the
/// caller on success, or a ready-to-return error response.
///
/// `required` must be non-empty here; truly public handlers simply never call
/// this (an empty set always allows, caller or not).
pub fn require_caller<'a>(
    required: &[Role],
    caller: Option<&'a CallerContext>,
) -> Result<&'a CallerContext, axum::response::Response> {
    evaluate(required, caller.map(CallerContext::caller))
        .map_err(errors::domain_error_to_response)?;
    caller.ok_or_else(|| errors::domain_error_to_response(DomainError::Unauthorized))
}
