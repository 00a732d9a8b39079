//! Simulation tuning
//!
//! Every number a designer might want to tweak without recompiling. All
//! structs deserialize with defaults, so a JSON file only needs the fields
//! it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Gravity, buoyancy, ladder and one-way platform constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Gravity multiplier while overlapping water
    pub water_gravity_scale: f32,
    /// Constant climbing speed on ladders (px/s)
    pub ladder_speed: f32,
    /// Below this |vy| an actor on a ladder without climb input hovers
    pub ladder_hover_epsilon: f32,
    /// How far below a platform top the previous bottom may sit and still land
    pub platform_catch_margin: f32,
    /// Horizontal overlap required on each side to land on a one-way platform
    pub platform_edge_margin: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            water_gravity_scale: 0.32,
            ladder_speed: 170.0,
            ladder_hover_epsilon: 40.0,
            platform_catch_margin: 4.0,
            platform_edge_margin: 2.0,
        }
    }
}

/// Player movement and resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub run_speed: f32,
    /// Negative: up is -y
    pub jump_velocity: f32,
    pub water_jump_scale: f32,
    pub water_move_scale: f32,
    /// Speed multiplier while the walk modifier is held
    pub walk_scale: f32,
    /// Extra speed per level above 1
    pub level_speed_bonus: f32,
    /// Speed multiplier while the speed buff runs
    pub speed_boost: f32,
    pub starting_health: u32,
    pub starting_shots: u32,
    pub max_energy: f32,
    /// Passive energy regeneration per second
    pub energy_regen: f32,
    /// Seconds one-way platforms are ignored after a drop input
    pub drop_through_window: f32,
    /// Pixels the player is pushed down when a drop starts
    pub drop_nudge: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            run_speed: RUN_SPEED,
            jump_velocity: JUMP_VELOCITY,
            water_jump_scale: 0.58,
            water_move_scale: 0.58,
            walk_scale: 0.55,
            level_speed_bonus: 0.03,
            speed_boost: 1.45,
            starting_health: 8,
            starting_shots: 26,
            max_energy: 100.0,
            energy_regen: 2.2,
            drop_through_window: 0.18,
            drop_nudge: 4.0,
        }
    }
}

/// Melee, ranged and enemy contact constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    pub melee_cooldown: f32,
    /// Limit each melee window to one hit per enemy.
    ///
    /// Off by default: an overlapping enemy takes the window's damage on
    /// every tick it overlaps.
    pub melee_hits_once: bool,
    pub shuriken_energy: f32,
    pub grapple_energy: f32,
    /// How far touching an enemy shoves the player back (px)
    pub contact_knockback: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            melee_cooldown: 0.3,
            melee_hits_once: false,
            shuriken_energy: 3.0,
            grapple_energy: 14.0,
            contact_knockback: 70.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionTuning {
    /// Bomb countdown at mission start (seconds)
    pub bomb_seconds: f32,
}

impl Default for MissionTuning {
    fn default() -> Self {
        Self { bomb_seconds: 3600.0 }
    }
}

/// Complete simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for drop rolls
    pub seed: u64,
    /// Largest dt a single tick will simulate
    pub max_dt: f32,
    pub physics: PhysicsTuning,
    pub player: PlayerTuning,
    pub combat: CombatTuning,
    pub mission: MissionTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_dt: MAX_DT,
            physics: PhysicsTuning::default(),
            player: PlayerTuning::default(),
            combat: CombatTuning::default(),
            mission: MissionTuning::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Like `load`, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("max_dt", self.max_dt),
            ("physics.gravity", self.physics.gravity),
            ("physics.water_gravity_scale", self.physics.water_gravity_scale),
            ("physics.ladder_speed", self.physics.ladder_speed),
            ("player.run_speed", self.player.run_speed),
            ("player.max_energy", self.player.max_energy),
            ("mission.bomb_seconds", self.mission.bomb_seconds),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidTuning { field, value });
            }
        }

        let non_negative = [
            ("physics.ladder_hover_epsilon", self.physics.ladder_hover_epsilon),
            ("physics.platform_catch_margin", self.physics.platform_catch_margin),
            ("physics.platform_edge_margin", self.physics.platform_edge_margin),
            ("player.energy_regen", self.player.energy_regen),
            ("player.drop_through_window", self.player.drop_through_window),
            ("player.water_jump_scale", self.player.water_jump_scale),
            ("player.water_move_scale", self.player.water_move_scale),
            ("player.walk_scale", self.player.walk_scale),
            ("player.level_speed_bonus", self.player.level_speed_bonus),
            ("player.speed_boost", self.player.speed_boost),
            ("player.drop_nudge", self.player.drop_nudge),
            ("combat.melee_cooldown", self.combat.melee_cooldown),
            ("combat.shuriken_energy", self.combat.shuriken_energy),
            ("combat.grapple_energy", self.combat.grapple_energy),
            ("combat.contact_knockback", self.combat.contact_knockback),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidTuning { field, value });
            }
        }

        if !(self.player.jump_velocity.is_finite() && self.player.jump_velocity < 0.0) {
            return Err(ConfigError::InvalidTuning {
                field: "player.jump_velocity",
                value: self.player.jump_velocity,
            });
        }
        if self.player.starting_health == 0 {
            return Err(ConfigError::InvalidTuning {
                field: "player.starting_health",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// Clamp a frame delta into the range a tick accepts
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        debug_assert!(dt.is_finite(), "dt must be finite");
        dt.clamp(0.0, self.max_dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "physics": { "gravity": 900.0 } }"#)
            .expect("valid settings");
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.physics.gravity, 900.0);
        assert_eq!(settings.physics.water_gravity_scale, 0.32);
        assert_eq!(settings.mission.bomb_seconds, 3600.0);
        assert!(!settings.combat.melee_hits_once);
    }

    #[test]
    fn test_rejects_bad_tuning() {
        let err = Settings::from_json(r#"{ "max_dt": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTuning { field: "max_dt", .. }));

        let err = Settings::from_json(r#"{ "player": { "jump_velocity": 300.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidTuning { field: "player.jump_velocity", .. }
        ));
    }

    #[test]
    fn test_rejects_negative_costs_and_scales() {
        for (json, expected) in [
            (r#"{ "combat": { "shuriken_energy": -3.0 } }"#, "combat.shuriken_energy"),
            (r#"{ "combat": { "grapple_energy": -1.0 } }"#, "combat.grapple_energy"),
            (r#"{ "combat": { "contact_knockback": -40.0 } }"#, "combat.contact_knockback"),
            (r#"{ "player": { "walk_scale": -0.5 } }"#, "player.walk_scale"),
            (r#"{ "player": { "speed_boost": -1.5 } }"#, "player.speed_boost"),
            (r#"{ "player": { "water_move_scale": -0.6 } }"#, "player.water_move_scale"),
            (r#"{ "player": { "water_jump_scale": -0.7 } }"#, "player.water_jump_scale"),
        ] {
            match Settings::from_json(json) {
                Err(ConfigError::InvalidTuning { field, .. }) => assert_eq!(field, expected),
                other => panic!("{json} gave {other:?}"),
            }
        }
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ nope"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default("/definitely/not/here/settings.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_clamp_dt() {
        let settings = Settings::default();
        assert_eq!(settings.clamp_dt(1.0), MAX_DT);
        assert_eq!(settings.clamp_dt(-0.5), 0.0);
        assert_eq!(settings.clamp_dt(0.01), 0.01);
    }
}
