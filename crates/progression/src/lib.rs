//! `avatarforge-progression` — XP/level and bond state machines.
//!
//! Two structurally identical leveling curves live here: avatar XP and the
//! per-(user, avatar) bond. Both are one-line calls into the shared
//! [`counter::advance`] transition so the curves cannot drift apart.

pub mod bond;
pub mod counter;
pub mod progression;

pub use bond::Bond;
pub use counter::{advance, Leveled};
pub use progression::Progression;
