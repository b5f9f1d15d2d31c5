use avatarforge_auth::{Caller, Role};
use avatarforge_core::UserId;

/// Authenticated caller context for a request.
///
/// Built by the auth middleware after token verification *and* re-resolution
/// of the subject against the credential store, so `role()` reflects the
/// stored role, not a possibly stale token claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    caller: Caller,
    email: String,
}

impl CallerContext {
    pub fn new(user_id: UserId, role: Role, email: String) -> Self {
        Self {
            caller: Caller { user_id, role },
            email,
        }
    }

    pub fn caller(&self) -> &Caller {
        &self.caller
    }

    pub fn user_id(&self) -> UserId {
        self.caller.user_id
    }

    pub fn role(&self) -> Role {
        self.caller.role
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
