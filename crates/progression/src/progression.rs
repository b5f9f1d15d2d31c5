//! Avatar XP/level progression.

use serde::{Deserialize, Serialize};

use crate::counter::{advance, Leveled};

/// XP threshold for advancing out of `level`.
fn xp_threshold(level: u32) -> u32 {
    level * 100
}

/// XP/level state carried on an avatar record.
///
/// # Invariants
/// - `level >= 1`
/// - `xp < level * 100` after any transition
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub xp: u32,
}

impl Progression {
    pub fn new() -> Self {
        Self { level: 1, xp: 0 }
    }

    /// Add XP and normalize, possibly advancing several levels in one call.
    pub fn add_xp(&mut self, delta: u32) {
        let out = advance(Leveled::new(self.level, self.xp), delta, xp_threshold);
        self.level = out.level;
        self.xp = out.points;
    }

    /// Unconditional reset to level 1 / 0 XP. There is no partial reset.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_level_one() {
        let p = Progression::new();
        assert_eq!(p.level, 1);
        assert_eq!(p.xp, 0);
    }

    #[test]
    fn add_xp_levels_up_with_remainder() {
        let mut p = Progression { level: 1, xp: 80 };
        p.add_xp(50);
        assert_eq!(p.level, 2);
        assert_eq!(p.xp, 30);
    }

    #[test]
    fn add_xp_repairs_inconsistent_state() {
        let mut p = Progression { level: 2, xp: 150 };
        p.add_xp(60);
        assert_eq!(p.level, 3);
        assert_eq!(p.xp, 10);
    }

    #[test]
    fn reset_is_idempotent_from_any_state() {
        let mut p = Progression { level: 9, xp: 42 };
        p.reset();
        assert_eq!(p, Progression::new());
        p.reset();
        assert_eq!(p, Progression::new());
    }

    #[test]
    fn serde_round_trip() {
        let p = Progression { level: 3, xp: 75 };
        let json = serde_json::to_string(&p).unwrap();
        let back: Progression = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
