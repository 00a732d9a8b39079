//! The player-controlled operative

use serde::{Deserialize, Serialize};

use super::actor::{Actor, Facing};
use super::progression::Progression;
use super::weapons::Arsenal;
use crate::consts::{PLAYER_MAX_HEALTH, PLAYER_START_SHOTS};
use crate::settings::PlayerTuning;

/// Timed power-ups, in seconds remaining
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Buffs {
    pub invisibility: f32,
    pub invincibility: f32,
    pub speed: f32,
}

impl Buffs {
    pub fn tick(&mut self, dt: f32) {
        self.invisibility = (self.invisibility - dt).max(0.0);
        self.invincibility = (self.invincibility - dt).max(0.0);
        self.speed = (self.speed - dt).max(0.0);
    }

    pub fn invisible(&self) -> bool {
        self.invisibility > 0.0
    }

    pub fn invincible(&self) -> bool {
        self.invincibility > 0.0
    }

    pub fn fast(&self) -> bool {
        self.speed > 0.0
    }
}

/// Player body, mission inventory and auxiliary attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub actor: Actor,
    pub health: u32,
    pub has_bomb: bool,
    pub has_codes: bool,
    /// Shurikens left for melee-only weapons
    pub shots: u32,
    pub facing: Facing,
    pub energy: f32,
    pub max_energy: f32,
    pub gold: u32,
    pub progression: Progression,
    pub arsenal: Arsenal,
    pub buffs: Buffs,
    /// Crouched inside a bush: enemies cannot see the player
    pub hidden: bool,
    pub meditating: bool,
}

impl PlayerState {
    pub fn new(actor: Actor) -> Self {
        Self {
            actor,
            health: PLAYER_MAX_HEALTH,
            has_bomb: false,
            has_codes: false,
            shots: PLAYER_START_SHOTS,
            facing: Facing::Right,
            energy: 100.0,
            max_energy: 100.0,
            gold: 0,
            progression: Progression::default(),
            arsenal: Arsenal::default(),
            buffs: Buffs::default(),
            hidden: false,
            meditating: false,
        }
    }

    /// Player as configured for a mission start
    pub fn from_tuning(actor: Actor, tuning: &PlayerTuning) -> Self {
        Self {
            health: tuning.starting_health,
            shots: tuning.starting_shots,
            energy: tuning.max_energy,
            max_energy: tuning.max_energy,
            ..Self::new(actor)
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Lose health unless invincible. Returns whether damage was taken.
    pub fn hurt(&mut self, amount: u32) -> bool {
        if self.buffs.invincible() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        true
    }

    /// Spend energy if enough is available
    pub fn spend_energy(&mut self, amount: f32) -> bool {
        if self.energy < amount {
            return false;
        }
        self.energy = (self.energy - amount).max(0.0);
        true
    }

    pub fn restore_energy(&mut self, amount: f32) {
        self.energy = (self.energy + amount).min(self.max_energy);
    }
}
