//! Access evaluation.
//!
//! State-free decision functions: the API layer resolves the caller (from a
//! verified token, re-checked against the credential store) and each route
//! declares its required-role set. Nothing here touches storage.
//!
//! - No IO
//! - No panics
//! - No business logic (pure policy check)

use avatarforge_core::{DomainError, DomainResult, UserId};

use crate::Role;

/// The resolved caller identity for an authorization decision.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
    pub role: Role,
}

/// Decide allow/deny for a route's declared required-role set.
///
/// An empty `required` set means the operation is public. An absent caller
/// fails `Unauthorized` before any role check runs. Role sets are unordered;
/// any one match allows.
pub fn evaluate(required: &[Role], caller: Option<&Caller>) -> DomainResult<()> {
    if required.is_empty() {
        return Ok(());
    }

    let caller = caller.ok_or(DomainError::Unauthorized)?;

    if required.contains(&caller.role) {
        Ok(())
    } else {
        Err(DomainError::forbidden(required.iter().map(Role::as_str)))
    }
}

/// Second, operation-specific predicate layered after the role check for the
/// avatar dialogue operation: the caller must hold a bond for the target
/// avatar. Admins bypass unconditionally.
pub fn evaluate_bond_gate(caller: &Caller, has_bond: bool) -> DomainResult<()> {
    if caller.role == Role::Admin || has_bond {
        Ok(())
    } else {
        Err(DomainError::forbidden(["bonded"]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(role: Role) -> Caller {
        Caller {
            user_id: UserId::new(),
            role,
        }
    }

    #[test]
    fn empty_required_set_is_public() {
        assert!(evaluate(&[], None).is_ok());
        assert!(evaluate(&[], Some(&caller(Role::User))).is_ok());
    }

    #[test]
    fn absent_caller_is_unauthorized_before_role_check() {
        assert_eq!(
            evaluate(&[Role::User], None).unwrap_err(),
            DomainError::Unauthorized
        );
        assert_eq!(
            evaluate(&[Role::Admin], None).unwrap_err(),
            DomainError::Unauthorized
        );
    }

    #[test]
    fn allows_iff_role_in_required_set() {
        for role in [Role::User, Role::Mod, Role::Admin] {
            for required in [
                vec![Role::User],
                vec![Role::Mod],
                vec![Role::Admin],
                vec![Role::Mod, Role::Admin],
                vec![Role::User, Role::Mod, Role::Admin],
            ] {
                let got = evaluate(&required, Some(&caller(role)));
                assert_eq!(got.is_ok(), required.contains(&role));
            }
        }
    }

    #[test]
    fn denial_carries_the_required_set() {
        let err = evaluate(&[Role::Mod, Role::Admin], Some(&caller(Role::User))).unwrap_err();
        assert_eq!(
            err,
            DomainError::Forbidden(vec!["mod".to_string(), "admin".to_string()])
        );
    }

    #[test]
    fn bond_gate_requires_bond_for_non_admins() {
        assert!(evaluate_bond_gate(&caller(Role::User), true).is_ok());
        assert!(evaluate_bond_gate(&caller(Role::User), false).is_err());
        assert!(evaluate_bond_gate(&caller(Role::Mod), false).is_err());
    }

    #[test]
    fn admins_bypass_the_bond_gate() {
        assert!(evaluate_bond_gate(&caller(Role::Admin), false).is_ok());
    }
}
