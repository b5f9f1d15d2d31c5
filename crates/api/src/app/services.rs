//! Service wiring and the operations behind every route.
//!
//! One `AppServices` value owns the stores, the token service, and the
//! password hasher. Handlers stay thin: parse, authorize, call one method
//! here, map the result.

use std::sync::Arc;

use avatarforge_auth::{
    evaluate_bond_gate, AuthConfig, Caller, PasswordHasher, Role, TokenService,
};
use avatarforge_core::{DomainError, DomainResult, UserId};
use avatarforge_infra::{
    AvatarRecord, AvatarStore, InMemoryAvatarStore, InMemoryUserStore, UserAccount, UserStore,
    UserView,
};
use avatarforge_progression::{Bond, Progression};

use crate::app::dialogue;
use crate::app::dto;

const MIN_PASSWORD_LEN: usize = 6;

pub struct AppServices {
    pub users: Arc<dyn UserStore>,
    pub avatars: Arc<dyn AvatarStore>,
    pub tokens: Arc<TokenService>,
    pub hasher: PasswordHasher,
}

impl AppServices {
    /// In-memory wiring (dev/test). A document-store deployment would pass
    /// its own `UserStore`/`AvatarStore` implementations to `with_stores`.
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_stores(
            Arc::new(InMemoryUserStore::new()),
            Arc::new(InMemoryAvatarStore::new()),
            config,
        )
    }

    pub fn with_stores(
        users: Arc<dyn UserStore>,
        avatars: Arc<dyn AvatarStore>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            users,
            avatars,
            tokens: Arc::new(TokenService::new(config)),
            hasher: PasswordHasher::new(),
        }
    }

    // -------------------------
    // Auth
    // -------------------------

    /// Validate credentials and issue a token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller,
    /// in both response and timing: a miss still verifies against a dummy
    /// digest so the two paths do the same bcrypt work. Verification is
    /// offloaded so it does not stall the runtime.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<(String, UserView)> {
        let account = match self.users.find_by_email(email) {
            Some(account) => account,
            None => {
                self.verify_password(password, PasswordHasher::DUMMY_DIGEST)
                    .await;
                return Err(DomainError::Unauthorized);
            }
        };

        if !self.verify_password(password, &account.password_hash).await {
            tracing::warn!(email = %account.email, "login rejected");
            return Err(DomainError::Unauthorized);
        }

        let token = self
            .tokens
            .issue(account.id, &account.email, account.role)?;

        tracing::info!(user = %account.id, "login succeeded");
        Ok((token, account.view()))
    }

    // -------------------------
    // Users
    // -------------------------

    /// Public registration. Any caller-supplied role is ignored; accounts
    /// always start as `user`.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> DomainResult<UserView> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("email is malformed"));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let hash = self.hash_password(password).await?;
        let account = UserAccount::register(email, hash, display_name);
        let view = account.view();
        self.users.insert(account)?;

        tracing::info!(user = %view.id, "account registered");
        Ok(view)
    }

    pub fn get_user(&self, id: UserId) -> DomainResult<UserView> {
        self.users
            .find_by_id(id)
            .map(|a| a.view())
            .ok_or(DomainError::NotFound)
    }

    pub fn list_users(&self) -> Vec<UserView> {
        self.users.list().iter().map(UserAccount::view).collect()
    }

    pub fn update_profile(
        &self,
        id: UserId,
        display_name: Option<String>,
    ) -> DomainResult<UserView> {
        let mut account = self.users.find_by_id(id).ok_or(DomainError::NotFound)?;
        if let Some(name) = display_name {
            account.display_name = name;
        }
        let view = account.view();
        self.users.update(account)?;
        Ok(view)
    }

    /// Self-service password change: the old password must verify first.
    pub async fn change_password(
        &self,
        id: UserId,
        old_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let mut account = self.users.find_by_id(id).ok_or(DomainError::NotFound)?;

        if !self
            .verify_password(old_password, &account.password_hash)
            .await
        {
            return Err(DomainError::Unauthorized);
        }
        if new_password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        account.password_hash = self.hash_password(new_password).await?;
        self.users.update(account)?;

        tracing::info!(user = %id, "password changed");
        Ok(())
    }

    /// Admin update path: profile fields plus an optional password reset
    /// (rehashed before storage). Role changes go through `update_role`.
    pub async fn admin_update_user(
        &self,
        id: UserId,
        update: dto::AdminUpdateUserRequest,
    ) -> DomainResult<UserView> {
        let mut account = self.users.find_by_id(id).ok_or(DomainError::NotFound)?;

        if let Some(name) = update.display_name {
            account.display_name = name;
        }
        if let Some(password) = update.password {
            account.password_hash = self.hash_password(&password).await?;
        }

        let view = account.view();
        self.users.update(account)?;
        Ok(view)
    }

    /// Role elevation/demotion. Authorization happens at the route boundary;
    /// the store itself performs none.
    pub fn update_role(&self, id: UserId, role: Role) -> DomainResult<UserView> {
        let mut account = self.users.find_by_id(id).ok_or(DomainError::NotFound)?;
        account.role = role;
        let view = account.view();
        self.users.update(account)?;

        tracing::info!(user = %id, role = %role, "role updated");
        Ok(view)
    }

    pub fn delete_user(&self, id: UserId) -> DomainResult<()> {
        self.users.delete(id)?;
        tracing::info!(user = %id, "account deleted");
        Ok(())
    }

    // -------------------------
    // Bonds
    // -------------------------

    /// First engagement with an avatar. Creating twice overwrites, resetting
    /// the bond; idempotence is the caller's concern.
    pub fn create_bond(&self, user_id: UserId, slug: &str) -> DomainResult<Bond> {
        self.avatars
            .find_by_slug(slug)
            .ok_or(DomainError::NotFound)?;

        let mut account = self
            .users
            .find_by_id(user_id)
            .ok_or(DomainError::NotFound)?;
        let bond = Bond::new();
        account.bonds.insert(slug.to_string(), bond);
        self.users.update(account)?;
        Ok(bond)
    }

    pub fn increase_bond_points(
        &self,
        user_id: UserId,
        slug: &str,
        points: u32,
    ) -> DomainResult<Bond> {
        let mut account = self
            .users
            .find_by_id(user_id)
            .ok_or(DomainError::NotFound)?;
        let bond = account.bonds.get_mut(slug).ok_or(DomainError::NotFound)?;
        bond.increase_points(points);
        let updated = *bond;
        self.users.update(account)?;
        Ok(updated)
    }

    pub fn set_humor_level(&self, user_id: UserId, slug: &str, level: u32) -> DomainResult<Bond> {
        let mut account = self
            .users
            .find_by_id(user_id)
            .ok_or(DomainError::NotFound)?;
        let bond = account.bonds.get_mut(slug).ok_or(DomainError::NotFound)?;
        bond.humor_level = Some(level);
        let updated = *bond;
        self.users.update(account)?;
        Ok(updated)
    }

    // -------------------------
    // Avatars
    // -------------------------

    pub fn create_avatar(&self, name: &str, style: &str) -> DomainResult<AvatarRecord> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("name is required"));
        }
        let record = AvatarRecord::new(name, style);
        self.avatars.insert(record.clone())?;
        Ok(record)
    }

    pub fn get_avatar(&self, slug: &str) -> DomainResult<AvatarRecord> {
        self.avatars.find_by_slug(slug).ok_or(DomainError::NotFound)
    }

    pub fn list_avatars(&self) -> Vec<AvatarRecord> {
        self.avatars.list()
    }

    pub fn update_avatar(
        &self,
        slug: &str,
        update: dto::UpdateAvatarRequest,
    ) -> DomainResult<AvatarRecord> {
        let mut record = self.get_avatar(slug)?;
        if let Some(name) = update.name {
            record.name = name;
        }
        if let Some(style) = update.style {
            record.style = style;
        }
        if let Some(unlocked) = update.unlocked_by_default {
            record.unlocked_by_default = unlocked;
        }
        self.avatars.update(record.clone())?;
        Ok(record)
    }

    pub fn delete_avatar(&self, slug: &str) -> DomainResult<()> {
        self.avatars.delete(slug)
    }

    /// Read-modify-write XP accrual. Concurrent writers against the same
    /// avatar can lose an update; the store's last-write-wins semantics are
    /// the only guarantee here.
    pub fn add_xp(&self, slug: &str, amount: u32) -> DomainResult<Progression> {
        let mut record = self.get_avatar(slug)?;
        record.progression.add_xp(amount);
        let progression = record.progression;
        self.avatars.update(record)?;
        Ok(progression)
    }

    pub fn reset_progression(&self, slug: &str) -> DomainResult<Progression> {
        let mut record = self.get_avatar(slug)?;
        record.progression.reset();
        let progression = record.progression;
        self.avatars.update(record)?;
        Ok(progression)
    }

    pub fn unlock_avatar(&self, slug: &str) -> DomainResult<AvatarRecord> {
        let mut record = self.get_avatar(slug)?;
        record.unlocked_by_default = true;
        self.avatars.update(record.clone())?;
        Ok(record)
    }

    // -------------------------
    // Dialogue
    // -------------------------

    /// Bond-gated dialogue generation. The role check already ran at the
    /// route; this layers the bond predicate (admins bypass) on top.
    pub fn dialogue(&self, caller: &Caller, slug: &str, context: &str) -> DomainResult<String> {
        let record = self.get_avatar(slug)?;

        let has_bond = self
            .users
            .find_by_id(caller.user_id)
            .map(|u| u.has_bond(slug))
            .unwrap_or(false);
        evaluate_bond_gate(caller, has_bond)?;

        Ok(dialogue::render(&record.name, &record.style, context))
    }

    // -------------------------
    // Hashing offload
    // -------------------------

    async fn hash_password(&self, raw: &str) -> DomainResult<String> {
        let hasher = self.hasher;
        let raw = raw.to_string();
        tokio::task::spawn_blocking(move || hasher.hash(&raw))
            .await
            .map_err(|e| {
                tracing::error!("hashing task failed: {e}");
                DomainError::validation("password could not be hashed")
            })?
    }

    async fn verify_password(&self, raw: &str, digest: &str) -> bool {
        let hasher = self.hasher;
        let raw = raw.to_string();
        let digest = digest.to_string();
        tokio::task::spawn_blocking(move || hasher.verify(&raw, &digest))
            .await
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn services() -> AppServices {
        AppServices::new(&AuthConfig::new("test-secret", chrono::Duration::hours(1)))
    }

    /// Seed an account without going through bcrypt's default cost.
    fn seed_user(svc: &AppServices, email: &str, password: &str, role: Role) -> UserId {
        let hash = PasswordHasher::fast().hash(password).unwrap();
        let mut account = UserAccount::register(email, hash, None);
        account.role = role;
        let id = account.id;
        svc.users.insert(account).unwrap();
        id
    }

    #[tokio::test]
    async fn login_succeeds_iff_password_matches_registration() {
        let svc = services();
        seed_user(&svc, "ada@example.com", "lovelace", Role::User);

        let (token, user) = svc.login("ada@example.com", "lovelace").await.unwrap();
        assert!(!token.is_empty());
        assert_eq!(user.email, "ada@example.com");

        assert_eq!(
            svc.login("ada@example.com", "byron").await.unwrap_err(),
            DomainError::Unauthorized
        );
        assert_eq!(
            svc.login("nobody@example.com", "lovelace").await.unwrap_err(),
            DomainError::Unauthorized
        );
    }

    #[tokio::test]
    async fn registration_conflicts_on_duplicate_email() {
        let svc = services();
        svc.register("ada@example.com", "lovelace", None).await.unwrap();

        let err = svc
            .register("ADA@example.com", "different", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn registration_validates_input() {
        let svc = services();
        assert!(matches!(
            svc.register("not-an-email", "longenough", None)
                .await
                .unwrap_err(),
            DomainError::Validation(_)
        ));
        assert!(matches!(
            svc.register("a@b.c", "short", None).await.unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn change_password_requires_the_old_one() {
        let svc = services();
        let id = seed_user(&svc, "ada@example.com", "lovelace", Role::User);

        assert_eq!(
            svc.change_password(id, "wrong", "newpassword")
                .await
                .unwrap_err(),
            DomainError::Unauthorized
        );

        svc.change_password(id, "lovelace", "newpassword")
            .await
            .unwrap();
        assert!(svc.login("ada@example.com", "newpassword").await.is_ok());
        assert!(svc.login("ada@example.com", "lovelace").await.is_err());
    }

    #[tokio::test]
    async fn role_update_and_delete() {
        let svc = services();
        let id = seed_user(&svc, "ada@example.com", "lovelace", Role::User);

        let view = svc.update_role(id, Role::Mod).unwrap();
        assert_eq!(view.role, Role::Mod);

        svc.delete_user(id).unwrap();
        assert_eq!(svc.get_user(id).unwrap_err(), DomainError::NotFound);
    }

    #[tokio::test]
    async fn bond_lifecycle() {
        let svc = services();
        let id = seed_user(&svc, "ada@example.com", "lovelace", Role::User);
        svc.create_avatar("Neon Sage", "cyberpunk").unwrap();

        // No bond yet: increasing points is NotFound.
        assert_eq!(
            svc.increase_bond_points(id, "neon-sage", 10).unwrap_err(),
            DomainError::NotFound
        );

        let bond = svc.create_bond(id, "neon-sage").unwrap();
        assert_eq!(bond.bond_level, 1);

        let bond = svc.increase_bond_points(id, "neon-sage", 120).unwrap();
        assert_eq!(bond.bond_level, 2);
        assert_eq!(bond.bond_points, 20);

        // Creating again overwrites (resets) the bond.
        let bond = svc.create_bond(id, "neon-sage").unwrap();
        assert_eq!(bond.bond_level, 1);
        assert_eq!(bond.bond_points, 0);
    }

    #[tokio::test]
    async fn bond_creation_requires_the_avatar_to_exist() {
        let svc = services();
        let id = seed_user(&svc, "ada@example.com", "lovelace", Role::User);
        assert_eq!(
            svc.create_bond(id, "ghost").unwrap_err(),
            DomainError::NotFound
        );
    }

    #[tokio::test]
    async fn xp_accrual_and_reset() {
        let svc = services();
        svc.create_avatar("Neon Sage", "cyberpunk").unwrap();

        let p = svc.add_xp("neon-sage", 80).unwrap();
        assert_eq!((p.level, p.xp), (1, 80));

        let p = svc.add_xp("neon-sage", 50).unwrap();
        assert_eq!((p.level, p.xp), (2, 30));

        let p = svc.reset_progression("neon-sage").unwrap();
        assert_eq!((p.level, p.xp), (1, 0));

        assert_eq!(
            svc.add_xp("ghost", 10).unwrap_err(),
            DomainError::NotFound
        );
    }

    #[tokio::test]
    async fn dialogue_is_bond_gated_with_admin_bypass() {
        let svc = services();
        let user_id = seed_user(&svc, "ada@example.com", "lovelace", Role::User);
        let admin_id = seed_user(&svc, "root@example.com", "rootpass", Role::Admin);
        svc.create_avatar("Neon Sage", "cyberpunk").unwrap();

        let user = Caller {
            user_id,
            role: Role::User,
        };
        let admin = Caller {
            user_id: admin_id,
            role: Role::Admin,
        };

        // No bond: denied for the user, allowed for the admin.
        assert!(matches!(
            svc.dialogue(&user, "neon-sage", "rust").unwrap_err(),
            DomainError::Forbidden(_)
        ));
        let line = svc.dialogue(&admin, "neon-sage", "rust").unwrap();
        assert!(line.contains("Neon Sage"));

        svc.create_bond(user_id, "neon-sage").unwrap();
        assert!(svc.dialogue(&user, "neon-sage", "rust").is_ok());
    }
}
