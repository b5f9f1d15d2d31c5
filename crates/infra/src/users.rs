//! User account records and the credential store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use avatarforge_auth::Role;
use avatarforge_core::{DomainError, DomainResult, UserId};
use avatarforge_progression::Bond;

/// A stored user account.
///
/// # Invariants
/// - `email` is unique per store and stored lowercased.
/// - `password_hash` is never a raw password and never serialized into a
///   response (responses use [`UserView`]).
/// - `role` defaults to `user` at creation; elevation goes through the
///   admin-update path only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub display_name: String,
    /// Bond state keyed by avatar slug.
    pub bonds: HashMap<String, Bond>,
    pub unlocked_badges: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Registration constructor. The caller hashes the password; the role is
    /// forced to `user` regardless of what the registration payload carried.
    pub fn register(email: &str, password_hash: String, display_name: Option<String>) -> Self {
        Self {
            id: UserId::new(),
            email: email.trim().to_lowercase(),
            password_hash,
            role: Role::User,
            display_name: display_name.unwrap_or_default(),
            bonds: HashMap::new(),
            unlocked_badges: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn bond(&self, slug: &str) -> Option<&Bond> {
        self.bonds.get(slug)
    }

    pub fn has_bond(&self, slug: &str) -> bool {
        self.bonds.contains_key(slug)
    }

    /// Public projection of the account (no password hash).
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
            display_name: self.display_name.clone(),
            bonds: self.bonds.clone(),
            unlocked_badges: self.unlocked_badges.clone(),
            created_at: self.created_at,
        }
    }
}

/// What the API returns for a user. Deliberately hash-free.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub display_name: String,
    pub bonds: HashMap<String, Bond>,
    pub unlocked_badges: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Keyed record store for user accounts.
///
/// Performs no authorization; that is the access evaluator's responsibility
/// upstream. Updates are last-write-wins.
pub trait UserStore: Send + Sync {
    /// Case-insensitive unique-key lookup.
    fn find_by_email(&self, email: &str) -> Option<UserAccount>;
    fn find_by_id(&self, id: UserId) -> Option<UserAccount>;
    /// Fails with `Conflict` if the email is already present.
    fn insert(&self, account: UserAccount) -> DomainResult<()>;
    /// Replace the stored record. Fails with `NotFound` if absent.
    fn update(&self, account: UserAccount) -> DomainResult<()>;
    fn delete(&self, id: UserId) -> DomainResult<()>;
    fn list(&self) -> Vec<UserAccount>;
}

impl<S> UserStore for Arc<S>
where
    S: UserStore + ?Sized,
{
    fn find_by_email(&self, email: &str) -> Option<UserAccount> {
        (**self).find_by_email(email)
    }

    fn find_by_id(&self, id: UserId) -> Option<UserAccount> {
        (**self).find_by_id(id)
    }

    fn insert(&self, account: UserAccount) -> DomainResult<()> {
        (**self).insert(account)
    }

    fn update(&self, account: UserAccount) -> DomainResult<()> {
        (**self).update(account)
    }

    fn delete(&self, id: UserId) -> DomainResult<()> {
        (**self).delete(id)
    }

    fn list(&self) -> Vec<UserAccount> {
        (**self).list()
    }
}

/// In-memory user store for dev/test.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<HashMap<UserId, UserAccount>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryUserStore {
    fn find_by_email(&self, email: &str) -> Option<UserAccount> {
        let needle = email.trim().to_lowercase();
        let map = self.inner.read().ok()?;
        map.values().find(|u| u.email == needle).cloned()
    }

    fn find_by_id(&self, id: UserId) -> Option<UserAccount> {
        let map = self.inner.read().ok()?;
        map.get(&id).cloned()
    }

    fn insert(&self, account: UserAccount) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("user store poisoned"))?;
        // Uniqueness check and insert under the same lock; a racing insert of
        // the same email must not slip between them.
        if map.values().any(|u| u.email == account.email) {
            return Err(DomainError::conflict("email already registered"));
        }
        map.insert(account.id, account);
        Ok(())
    }

    fn update(&self, account: UserAccount) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("user store poisoned"))?;
        if !map.contains_key(&account.id) {
            return Err(DomainError::NotFound);
        }
        map.insert(account.id, account);
        Ok(())
    }

    fn delete(&self, id: UserId) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("user store poisoned"))?;
        map.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    fn list(&self) -> Vec<UserAccount> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        }
    }
}
