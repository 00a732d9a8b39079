//! Mission rules: bomb custody, codes and the escape condition

use serde::{Deserialize, Serialize};

use super::bomb::Bomb;
use super::player::PlayerState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRules {
    bomb: Bomb,
}

impl GameRules {
    pub fn new(bomb: Bomb) -> Self {
        Self { bomb }
    }

    pub fn bomb(&self) -> &Bomb {
        &self.bomb
    }

    /// Picking up the explosive also arms it
    pub fn collect_bomb(&mut self, player: &mut PlayerState) {
        player.has_bomb = true;
        self.bomb.arm();
    }

    pub fn collect_codes(&self, player: &mut PlayerState) {
        player.has_codes = true;
    }

    /// Safe to call before arming and after success
    pub fn defuse(&mut self) -> bool {
        self.bomb.defuse()
    }

    pub fn can_escape(&self, player: &PlayerState) -> bool {
        player.has_bomb && player.has_codes && self.bomb.is_defused()
    }

    pub fn bomb_exploded(&self) -> bool {
        self.bomb.has_exploded()
    }

    pub fn tick(&mut self, dt: f32) {
        self.bomb.tick(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::Actor;
    use crate::sim::rect::Rect;

    fn player() -> PlayerState {
        PlayerState::new(Actor::new(Rect::new(0.0, 0.0, 10.0, 10.0)))
    }

    #[test]
    fn test_bomb_and_escape_rules() {
        let mut rules = GameRules::new(Bomb::new(10.0));
        let mut player = player();

        rules.collect_bomb(&mut player);
        rules.collect_codes(&mut player);
        assert!(rules.bomb().is_armed());
        assert!(!rules.can_escape(&player));

        rules.defuse();
        assert!(rules.can_escape(&player));
    }

    #[test]
    fn test_bomb_explodes_when_timer_runs_out() {
        let mut rules = GameRules::new(Bomb::armed(0.1));
        rules.tick(0.2);
        assert!(rules.bomb_exploded());
    }

    #[test]
    fn test_every_escape_condition_is_necessary() {
        let mut rules = GameRules::new(Bomb::new(10.0));
        let mut player = player();
        rules.collect_bomb(&mut player);
        rules.defuse();

        // Bomb defused but no codes
        assert!(!rules.can_escape(&player));

        // Codes and a defused bomb, but the player no longer carries it
        rules.collect_codes(&mut player);
        player.has_bomb = false;
        assert!(!rules.can_escape(&player));
    }

    #[test]
    fn test_defuse_before_arming_is_noop() {
        let mut rules = GameRules::new(Bomb::new(10.0));
        assert!(!rules.defuse());
        assert!(!rules.defuse());
        assert!(!rules.bomb().is_defused());
    }

    #[test]
    fn test_no_late_defusal() {
        let mut rules = GameRules::new(Bomb::armed(1.0));
        rules.tick(1.0);
        assert!(!rules.defuse());
        assert!(rules.bomb_exploded());
    }
}
