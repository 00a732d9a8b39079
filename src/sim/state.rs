//! Game state and core simulation types
//!
//! Everything that changes during a mission lives in `GameState`. The level
//! and settings it was built from are kept alongside so `reset` can rebuild
//! the mission without outside help.

use std::sync::Arc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::bomb::{Bomb, BombPhase};
use super::combat::{AttackWindow, GrappleLine, Projectile};
use super::enemy::{Enemy, EnemyKind};
use super::items::{Loot, LootKind, MissionItem, Pickup, WeaponCache};
use super::level::Level;
use super::movers::{Elevator, Train};
use super::physics::WorldPhysics;
use super::player::PlayerState;
use super::rules::GameRules;
use super::weapons::WeaponKind;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Why a mission failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureCause {
    PlayerKilled,
    BombExploded,
}

/// Host-facing mission status, recomputed every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissionStatus {
    #[default]
    InProgress,
    Failed(FailureCause),
    Won,
}

/// Things that happened during the last tick, for renderers and audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyHit { index: usize, pos: Vec2 },
    EnemyDefeated { index: usize, kind: EnemyKind },
    PlayerHurt { pos: Vec2 },
    ItemCollected(MissionItem),
    WeaponCollected(WeaponKind),
    LootCollected(LootKind),
    LevelUp(u32),
    BombArmed,
    BombDefused,
    BombExploded,
    SiloSabotaged,
    MissionFailed(FailureCause),
    MissionWon,
}

/// RNG seed record, so a reset replays the same drop rolls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete mission state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Immutable level configuration
    pub level: Arc<Level>,
    pub settings: Settings,
    pub physics: WorldPhysics,
    pub rng_state: RngState,
    pub player: PlayerState,
    pub rules: GameRules,
    /// Full roster; defeated enemies stay with `alive == false`
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub loot: Vec<Loot>,
    pub pickups: Vec<Pickup>,
    pub weapon_caches: Vec<WeaponCache>,
    pub attack: Option<AttackWindow>,
    pub grapple: Option<GrappleLine>,
    pub train: Option<Train>,
    pub elevators: Vec<Elevator>,
    pub silo_sabotaged: bool,
    /// Seconds left in which one-way platforms are ignored
    pub drop_through_timer: f32,
    pub melee_cooldown: f32,
    pub ranged_cooldown: f32,
    pub time_alive: f32,
    pub time_ticks: u64,
    pub status: MissionStatus,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Build a fresh mission from a level and settings
    pub fn new(level: impl Into<Arc<Level>>, settings: Settings) -> Self {
        let level: Arc<Level> = level.into();
        let rng_state = RngState::new(settings.seed);
        let rng = rng_state.to_rng();
        let physics = WorldPhysics::from_level(&level, settings.physics.clone());
        let player = PlayerState::from_tuning(Actor::new(level.spawn), &settings.player);
        let rules = GameRules::new(Bomb::new(settings.mission.bomb_seconds));

        log::info!(
            "Mission '{}' ready: {} enemies, {} objectives, bomb {:.0}s",
            level.name,
            level.enemies.len(),
            level.pickups.len(),
            settings.mission.bomb_seconds
        );

        Self {
            physics,
            rng_state,
            player,
            rules,
            enemies: level.enemies.iter().map(|s| s.spawn()).collect(),
            projectiles: Vec::new(),
            loot: Vec::new(),
            pickups: level.pickups.clone(),
            weapon_caches: level.weapon_caches.clone(),
            attack: None,
            grapple: None,
            train: level.train.map(|t| Train::on_track(t.y, t.min_x, t.max_x)),
            elevators: level.elevators.clone(),
            silo_sabotaged: false,
            drop_through_timer: 0.0,
            melee_cooldown: 0.0,
            ranged_cooldown: 0.0,
            time_alive: 0.0,
            time_ticks: 0,
            status: MissionStatus::InProgress,
            events: Vec::new(),
            rng,
            level,
            settings,
        }
    }

    /// Validate the configuration before building the mission
    pub fn from_config(level: Level, settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        level.validate()?;
        Ok(Self::new(level, settings))
    }

    /// Rebuild every piece of mutable state from the level and settings
    pub fn reset(&mut self) {
        let level = Arc::clone(&self.level);
        let settings = self.settings.clone();
        *self = Self::new(level, settings);
        log::info!("Mission reset");
    }

    pub fn status(&self) -> MissionStatus {
        self.status
    }

    pub fn failed(&self) -> bool {
        matches!(self.status, MissionStatus::Failed(_))
    }

    pub fn won(&self) -> bool {
        self.status == MissionStatus::Won
    }

    pub fn is_over(&self) -> bool {
        self.status != MissionStatus::InProgress
    }

    pub fn bomb(&self) -> &Bomb {
        self.rules.bomb()
    }

    pub fn bomb_phase(&self) -> BombPhase {
        self.rules.bomb().phase()
    }

    pub fn all_mission_items_collected(&self) -> bool {
        self.pickups.iter().all(|p| p.taken)
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }
}
