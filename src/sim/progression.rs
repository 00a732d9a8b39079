//! Experience and levels

use serde::{Deserialize, Serialize};

/// Grapple range bonus gained per level-up (px)
pub const GRAPPLE_BONUS_PER_LEVEL: f32 = 18.0;

/// XP needed to advance from `level` to the next
pub fn xp_to_next_level(level: u32) -> u32 {
    70 + level.saturating_sub(1) * 35
}

/// Energy regained per second while meditating
pub fn meditate_recovery_per_sec(level: u32) -> f32 {
    16.0 + (level.saturating_sub(1) as f32 * 1.4).min(14.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub xp: u32,
    pub next_level_xp: u32,
    pub grapple_bonus: f32,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            next_level_xp: xp_to_next_level(1),
            grapple_bonus: 0.0,
        }
    }
}

impl Progression {
    /// Add XP, carrying surplus across level-ups. Returns levels gained.
    pub fn award(&mut self, amount: u32) -> u32 {
        self.xp += amount;
        let mut gained = 0;
        while self.xp >= self.next_level_xp {
            self.xp -= self.next_level_xp;
            self.level += 1;
            self.grapple_bonus += GRAPPLE_BONUS_PER_LEVEL;
            self.next_level_xp = xp_to_next_level(self.level);
            gained += 1;
        }
        if gained > 0 {
            log::info!("Reached level {}", self.level);
        }
        gained
    }

    /// Movement speed multiplier from level
    pub fn speed_scale(&self, bonus_per_level: f32) -> f32 {
        1.0 + (self.level - 1) as f32 * bonus_per_level
    }

    /// Maximum grapple reach (px)
    pub fn grapple_range(&self) -> f32 {
        260.0 + self.grapple_bonus + (self.level - 1) as f32 * 35.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_curve_increases_per_level() {
        assert!(xp_to_next_level(1) < xp_to_next_level(2));
        assert!(xp_to_next_level(2) < xp_to_next_level(5));
        assert!(xp_to_next_level(1) >= 50);
    }

    #[test]
    fn test_meditation_caps() {
        assert_eq!(meditate_recovery_per_sec(1), 16.0);
        assert_eq!(meditate_recovery_per_sec(50), 30.0);
    }

    #[test]
    fn test_award_carries_surplus() {
        let mut p = Progression::default();
        assert_eq!(p.award(69), 0);
        assert_eq!(p.award(11), 1);
        assert_eq!(p.level, 2);
        assert_eq!(p.xp, 10);
        assert_eq!(p.next_level_xp, 105);
        assert_eq!(p.grapple_bonus, GRAPPLE_BONUS_PER_LEVEL);
    }

    #[test]
    fn test_award_multiple_levels() {
        let mut p = Progression::default();
        assert_eq!(p.award(70 + 105 + 5), 2);
        assert_eq!(p.level, 3);
        assert_eq!(p.xp, 5);
        assert_eq!(p.grapple_range(), 260.0 + 36.0 + 70.0);
    }
}
