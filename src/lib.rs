//! Saboteur - a side-scrolling infiltration mission simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, combat, mission rules, levels)
//! - `settings`: Data-driven tuning loaded from JSON
//! - `error`: Configuration errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest step a single tick will integrate
    pub const MAX_DT: f32 = 1.0 / 30.0;

    /// Viewport the stock level is laid out against
    pub const SCREEN_W: f32 = 1200.0;
    pub const SCREEN_H: f32 = 720.0;

    /// Downward acceleration, pixels/s²
    pub const GRAVITY: f32 = 1800.0;
    pub const RUN_SPEED: f32 = 230.0;
    /// Initial vertical velocity of a jump (negative is up)
    pub const JUMP_VELOCITY: f32 = -620.0;

    pub const PLAYER_MAX_HEALTH: u32 = 5;
    pub const PLAYER_START_SHOTS: u32 = 8;

    pub const DEFAULT_SEED: u64 = 0x5ab0_7a6e;
}
