//! Bond (user ↔ avatar relationship) leveling.

use serde::{Deserialize, Serialize};

use crate::counter::{advance, Leveled};

/// Bond point threshold for advancing out of `bond_level`.
fn bond_threshold(bond_level: u32) -> u32 {
    100 * bond_level
}

/// Per-(user, avatar) relationship state, owned by the user account.
///
/// # Invariants
/// - `bond_level >= 1`
/// - `bond_points < 100 * bond_level` after any transition
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bond {
    pub bond_level: u32,
    pub bond_points: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humor_level: Option<u32>,
}

impl Bond {
    /// First-engagement state. Creating twice overwrites; idempotence is the
    /// caller's responsibility.
    pub fn new() -> Self {
        Self {
            bond_level: 1,
            bond_points: 0,
            humor_level: Some(0),
        }
    }

    /// Add bond points and normalize against `100 * bond_level`.
    pub fn increase_points(&mut self, delta: u32) {
        let out = advance(
            Leveled::new(self.bond_level, self.bond_points),
            delta,
            bond_threshold,
        );
        self.bond_level = out.level;
        self.bond_points = out.points;
    }
}

impl Default for Bond {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bond_starts_at_level_one() {
        let b = Bond::new();
        assert_eq!(b.bond_level, 1);
        assert_eq!(b.bond_points, 0);
        assert_eq!(b.humor_level, Some(0));
    }

    #[test]
    fn increase_levels_up_with_remainder() {
        let mut b = Bond {
            bond_level: 1,
            bond_points: 90,
            humor_level: None,
        };
        b.increase_points(30);
        assert_eq!(b.bond_level, 2);
        assert_eq!(b.bond_points, 20);
    }

    #[test]
    fn increase_preserves_humor_level() {
        let mut b = Bond::new();
        b.humor_level = Some(3);
        b.increase_points(250);
        assert_eq!(b.humor_level, Some(3));
    }

    #[test]
    fn invariant_holds_over_repeated_increases() {
        let mut b = Bond::new();
        for _ in 0..50 {
            b.increase_points(77);
            assert!(b.bond_points < 100 * b.bond_level);
        }
    }
}
