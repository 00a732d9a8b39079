//! Enemy roster entries and the per-kind data table

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::physics::{MoveIntent, WorldPhysics};
use super::rect::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Bat,
    Rat,
    Snake,
    Dog,
    Guard,
    Henchman,
    Thug,
    Ninja,
    Assassin,
    Heavy,
    Drone,
    Robot,
    Boss,
}

/// Static per-kind behaviour numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub xp: u32,
    /// Horizontal distance at which the enemy notices the player
    pub sight: f32,
    /// Projectile speed; `None` for kinds that never shoot
    pub shot_speed: Option<f32>,
    /// Seconds between shots
    pub attack_cooldown: f32,
    /// Kinds that may drop a weapon when defeated
    pub drops_weapons: bool,
}

#[rustfmt::skip]
static ENEMY_TABLE: [EnemyProfile; 13] = [
    EnemyProfile { xp: 6,  sight: 260.0, shot_speed: None,        attack_cooldown: 1.5,  drops_weapons: false }, // Bat
    EnemyProfile { xp: 7,  sight: 260.0, shot_speed: None,        attack_cooldown: 1.5,  drops_weapons: false }, // Rat
    EnemyProfile { xp: 8,  sight: 260.0, shot_speed: None,        attack_cooldown: 1.5,  drops_weapons: false }, // Snake
    EnemyProfile { xp: 8,  sight: 260.0, shot_speed: None,        attack_cooldown: 1.5,  drops_weapons: false }, // Dog
    EnemyProfile { xp: 10, sight: 260.0, shot_speed: Some(540.0), attack_cooldown: 1.5,  drops_weapons: true },  // Guard
    EnemyProfile { xp: 11, sight: 260.0, shot_speed: Some(540.0), attack_cooldown: 1.5,  drops_weapons: true },  // Henchman
    EnemyProfile { xp: 12, sight: 260.0, shot_speed: None,        attack_cooldown: 1.5,  drops_weapons: true },  // Thug
    EnemyProfile { xp: 13, sight: 340.0, shot_speed: Some(540.0), attack_cooldown: 1.5,  drops_weapons: true },  // Ninja
    EnemyProfile { xp: 16, sight: 340.0, shot_speed: Some(560.0), attack_cooldown: 1.1,  drops_weapons: true },  // Assassin
    EnemyProfile { xp: 18, sight: 260.0, shot_speed: None,        attack_cooldown: 1.5,  drops_weapons: false }, // Heavy
    EnemyProfile { xp: 18, sight: 380.0, shot_speed: Some(600.0), attack_cooldown: 1.5,  drops_weapons: false }, // Drone
    EnemyProfile { xp: 20, sight: 380.0, shot_speed: Some(600.0), attack_cooldown: 1.5,  drops_weapons: true },  // Robot
    EnemyProfile { xp: 40, sight: 380.0, shot_speed: Some(640.0), attack_cooldown: 0.85, drops_weapons: false }, // Boss
];

impl EnemyKind {
    pub fn profile(self) -> &'static EnemyProfile {
        &ENEMY_TABLE[self as usize]
    }

    pub fn is_boss(self) -> bool {
        self == EnemyKind::Boss
    }
}

/// One entry in the enemy roster. Defeated enemies stay in the roster with
/// `alive == false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub actor: Actor,
    pub kind: EnemyKind,
    pub patrol_left: f32,
    pub patrol_right: f32,
    /// Signed patrol speed; the sign is the current walking direction
    pub speed: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub alive: bool,
    pub attack_cooldown: f32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, rect: Rect, patrol: (f32, f32), speed: f32, hp: i32) -> Self {
        Self {
            actor: Actor::new(rect),
            kind,
            patrol_left: patrol.0,
            patrol_right: patrol.1,
            speed,
            hp,
            max_hp: hp,
            alive: true,
            attack_cooldown: 0.0,
        }
    }

    /// Walk the patrol range, turning around at either end
    pub fn update(&mut self, dt: f32, physics: &WorldPhysics) {
        if !self.alive {
            return;
        }
        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        self.actor.vx = self.speed;
        physics.move_actor(&mut self.actor, dt, MoveIntent::default());
        if self.actor.rect.x <= self.patrol_left {
            self.actor.rect.x = self.patrol_left;
            self.speed = self.speed.abs();
        } else if self.actor.rect.x >= self.patrol_right {
            self.actor.rect.x = self.patrol_right;
            self.speed = -self.speed.abs();
        }
    }

    /// Apply damage to a live enemy.
    ///
    /// Returns true only on the hit that takes hp to zero or below; that is
    /// the one place defeat side effects may be triggered.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.hp -= amount;
        if self.hp <= 0 {
            self.alive = false;
            return true;
        }
        false
    }
}
