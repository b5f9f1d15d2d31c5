//! `avatarforge-infra` — storage adapters behind the persistence boundary.
//!
//! The core only requires a keyed record store with find-by-unique-key,
//! find-by-id, insert, and last-write-wins update for two record kinds.
//! In-memory implementations live here; a real document store would slot in
//! behind the same traits.

pub mod avatars;
pub mod users;

pub use avatars::{AvatarRecord, AvatarStore, InMemoryAvatarStore};
pub use users::{InMemoryUserStore, UserAccount, UserStore, UserView};
