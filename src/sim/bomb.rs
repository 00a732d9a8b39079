//! The mission's time bomb

use serde::{Deserialize, Serialize};

/// Observable bomb state, derived from the stored flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BombPhase {
    /// Not yet collected; the countdown is frozen
    Dormant,
    /// Counting down
    Armed,
    /// Permanently safe
    Defused,
    /// Countdown reached zero while armed
    Exploded,
}

/// Countdown device.
///
/// Fields are private: `defused` may only go false -> true, and only while
/// the bomb is armed with time remaining.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bomb {
    seconds_left: f32,
    armed: bool,
    defused: bool,
}

impl Default for Bomb {
    fn default() -> Self {
        Self::new(120.0)
    }
}

impl Bomb {
    /// Dormant bomb with the given countdown
    pub fn new(seconds_left: f32) -> Self {
        Self {
            seconds_left: seconds_left.max(0.0),
            armed: false,
            defused: false,
        }
    }

    /// Bomb that is already counting down
    pub fn armed(seconds_left: f32) -> Self {
        Self {
            armed: true,
            ..Self::new(seconds_left)
        }
    }

    pub fn seconds_left(&self) -> f32 {
        self.seconds_left
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn is_defused(&self) -> bool {
        self.defused
    }

    pub fn tick(&mut self, dt: f32) {
        if self.armed && !self.defused {
            let was_live = self.seconds_left > 0.0;
            self.seconds_left = (self.seconds_left - dt).max(0.0);
            if was_live && self.seconds_left <= 0.0 {
                log::warn!("Bomb detonated");
            }
        }
    }

    /// Start the countdown. Does not reset the remaining time.
    pub fn arm(&mut self) {
        if !self.armed {
            log::info!("Bomb armed with {:.1}s on the clock", self.seconds_left);
        }
        self.armed = true;
    }

    /// Try to defuse. Returns whether the bomb is defused afterwards.
    pub fn defuse(&mut self) -> bool {
        if !self.defused && self.armed && self.seconds_left > 0.0 {
            self.defused = true;
            log::info!("Bomb defused with {:.1}s remaining", self.seconds_left);
        }
        self.defused
    }

    pub fn has_exploded(&self) -> bool {
        self.armed && !self.defused && self.seconds_left <= 0.0
    }

    pub fn phase(&self) -> BombPhase {
        if self.defused {
            BombPhase::Defused
        } else if self.has_exploded() {
            BombPhase::Exploded
        } else if self.armed {
            BombPhase::Armed
        } else {
            BombPhase::Dormant
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dormant_bomb_does_not_tick() {
        let mut bomb = Bomb::new(10.0);
        bomb.tick(5.0);
        assert_eq!(bomb.seconds_left(), 10.0);
        assert_eq!(bomb.phase(), BombPhase::Dormant);
    }

    #[test]
    fn test_armed_bomb_counts_down_and_clamps() {
        let mut bomb = Bomb::armed(0.1);
        bomb.tick(0.2);
        assert_eq!(bomb.seconds_left(), 0.0);
        assert!(bomb.has_exploded());
        assert_eq!(bomb.phase(), BombPhase::Exploded);

        bomb.tick(1.0);
        assert_eq!(bomb.seconds_left(), 0.0);
    }

    #[test]
    fn test_arm_keeps_remaining_time() {
        let mut bomb = Bomb::armed(30.0);
        bomb.tick(10.0);
        bomb.arm();
        assert_eq!(bomb.seconds_left(), 20.0);
    }

    #[test]
    fn test_defuse_requires_arming() {
        let mut bomb = Bomb::new(10.0);
        assert!(!bomb.defuse());
        assert_eq!(bomb.phase(), BombPhase::Dormant);
    }

    #[test]
    fn test_no_defuse_after_explosion() {
        let mut bomb = Bomb::armed(0.0);
        assert!(!bomb.defuse());
        assert!(!bomb.is_defused());
        assert_eq!(bomb.phase(), BombPhase::Exploded);
    }

    #[test]
    fn test_defuse_is_idempotent() {
        let mut once = Bomb::armed(5.0);
        once.defuse();

        let mut twice = Bomb::armed(5.0);
        assert!(twice.defuse());
        assert!(twice.defuse());

        assert_eq!(once, twice);
    }

    #[test]
    fn test_defused_is_absorbing() {
        let mut bomb = Bomb::armed(1.0);
        bomb.defuse();
        bomb.tick(10.0);
        bomb.arm();
        assert_eq!(bomb.seconds_left(), 1.0);
        assert!(!bomb.has_exploded());
        assert_eq!(bomb.phase(), BombPhase::Defused);
    }
}
