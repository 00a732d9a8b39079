//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by roster index)
//! - No rendering or platform dependencies

pub mod actor;
pub mod bomb;
pub mod combat;
pub mod compound;
pub mod enemy;
pub mod items;
pub mod level;
pub mod movers;
pub mod physics;
pub mod player;
pub mod progression;
pub mod rect;
pub mod rules;
pub mod state;
pub mod tick;
pub mod weapons;

pub use actor::{Actor, Facing};
pub use bomb::{Bomb, BombPhase};
pub use combat::{AttackWindow, GrappleLine, MeleeStyle, Projectile, ProjectileSource};
pub use enemy::{Enemy, EnemyKind};
pub use items::{Loot, LootKind, MissionItem, Pickup, WeaponCache};
pub use level::{EnemySpawn, JumpEnvelope, Level, TrainTrack};
pub use movers::{Elevator, Train};
pub use physics::{MoveIntent, WorldPhysics};
pub use player::{Buffs, PlayerState};
pub use progression::Progression;
pub use rect::Rect;
pub use rules::GameRules;
pub use state::{FailureCause, GameEvent, GameState, MissionStatus};
pub use tick::{TickInput, tick};
pub use weapons::{Arsenal, WeaponKind};
