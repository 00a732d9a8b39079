//! Level configuration: static geometry plus the mission layout
//!
//! A `Level` is immutable once a mission starts. It is built in code
//! (`Level::compound`) or loaded from JSON, and validated before use.

use std::collections::VecDeque;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, EnemyKind};
use super::items::{Pickup, WeaponCache};
use super::movers::Elevator;
use super::rect::Rect;
use crate::consts::{GRAVITY, JUMP_VELOCITY};
use crate::error::ConfigError;
use crate::settings::Settings;

/// Roster entry as authored; turned into a live `Enemy` at mission start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub rect: Rect,
    pub patrol_left: f32,
    pub patrol_right: f32,
    pub speed: f32,
    pub hp: i32,
}

impl EnemySpawn {
    pub fn spawn(&self) -> Enemy {
        Enemy::new(
            self.kind,
            self.rect,
            (self.patrol_left, self.patrol_right),
            self.speed,
            self.hp,
        )
    }
}

/// Monorail: rail height and the x range the car shuttles over
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainTrack {
    pub y: f32,
    pub min_x: f32,
    pub max_x: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Level {
    pub name: String,
    pub width: f32,
    pub height: f32,
    /// Smallest y the player may reach; sky geometry sits at negative y
    pub ceiling: f32,
    /// Player rect at mission start
    pub spawn: Rect,
    pub solids: Vec<Rect>,
    pub one_way: Vec<Rect>,
    pub ladders: Vec<Rect>,
    pub water: Vec<Rect>,
    pub bushes: Vec<Rect>,
    pub pickups: Vec<Pickup>,
    pub weapon_caches: Vec<WeaponCache>,
    pub enemies: Vec<EnemySpawn>,
    /// Defusal terminal
    pub terminal: Rect,
    pub silo_console: Rect,
    pub helipad: Rect,
    pub helicopter: Rect,
    pub train: Option<TrainTrack>,
    pub elevators: Vec<Elevator>,
}

fn check_rects<'a>(
    set: &'static str,
    rects: impl IntoIterator<Item = &'a Rect>,
) -> Result<(), ConfigError> {
    for (index, rect) in rects.into_iter().enumerate() {
        if !rect.is_well_formed() {
            return Err(ConfigError::MalformedRect { set, index });
        }
    }
    Ok(())
}

impl Level {
    /// Parse and validate a level from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let level: Level = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::from_json(&json)?;
        log::info!("Loaded level '{}' from {}", level.name, path.display());
        Ok(level)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every rect must have a finite origin and positive extent, and every
    /// patrol range must be non-empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("level.width", self.width), ("level.height", self.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidTuning { field, value });
            }
        }
        if !(self.ceiling.is_finite() && self.ceiling < self.height) {
            return Err(ConfigError::InvalidTuning {
                field: "level.ceiling",
                value: self.ceiling,
            });
        }
        check_rects("solids", &self.solids)?;
        check_rects("one_way", &self.one_way)?;
        check_rects("ladders", &self.ladders)?;
        check_rects("water", &self.water)?;
        check_rects("bushes", &self.bushes)?;
        check_rects("pickups", self.pickups.iter().map(|p| &p.rect))?;
        check_rects("weapon_caches", self.weapon_caches.iter().map(|c| &c.rect))?;
        check_rects("enemies", self.enemies.iter().map(|e| &e.rect))?;
        check_rects("elevators", self.elevators.iter().map(|e| &e.rect))?;
        check_rects(
            "fixtures",
            [
                &self.spawn,
                &self.terminal,
                &self.silo_console,
                &self.helipad,
                &self.helicopter,
            ],
        )?;

        for (index, e) in self.enemies.iter().enumerate() {
            if e.patrol_left >= e.patrol_right {
                return Err(ConfigError::EmptyPatrol {
                    index,
                    left: e.patrol_left,
                    right: e.patrol_right,
                });
            }
            if e.hp <= 0 {
                return Err(ConfigError::NonPositiveHp { index, hp: e.hp });
            }
        }
        Ok(())
    }

    /// Standing points on wide solids: (centre x, top), sorted by x
    pub fn platform_nodes(&self) -> Vec<Vec2> {
        let mut nodes: Vec<Vec2> = self
            .solids
            .iter()
            .filter(|s| s.w >= MIN_NODE_WIDTH)
            .map(|s| Vec2::new(s.x + s.w / 2.0, s.y))
            .collect();
        nodes.sort_by(|a, b| a.x.total_cmp(&b.x));
        nodes
    }

    /// Nodes reachable from the one closest to the player's feet at spawn
    pub fn reachable_nodes(&self, envelope: &JumpEnvelope) -> Vec<Vec2> {
        let nodes = self.platform_nodes();
        let feet = Vec2::new(self.spawn.center().x, self.spawn.bottom());
        let Some(start) = (0..nodes.len()).min_by(|&a, &b| {
            let da = nodes[a].distance_squared(feet);
            let db = nodes[b].distance_squared(feet);
            da.total_cmp(&db)
        }) else {
            return Vec::new();
        };

        let mut seen = vec![false; nodes.len()];
        let mut queue = VecDeque::from([start]);
        seen[start] = true;
        while let Some(i) = queue.pop_front() {
            for j in 0..nodes.len() {
                if !seen[j] && envelope.reaches(nodes[i], nodes[j]) {
                    seen[j] = true;
                    queue.push_back(j);
                }
            }
        }

        nodes
            .into_iter()
            .zip(seen)
            .filter_map(|(node, reached)| reached.then_some(node))
            .collect()
    }

    pub fn farthest_reachable_x(&self, envelope: &JumpEnvelope) -> Option<f32> {
        self.reachable_nodes(envelope)
            .into_iter()
            .map(|n| n.x)
            .reduce(f32::max)
    }
}

/// Solids narrower than this are not counted as standing points
pub const MIN_NODE_WIDTH: f32 = 100.0;

/// Conservative model of where a jump or drop can take the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpEnvelope {
    /// Apex height of a standing jump
    pub max_rise: f32,
    pub rise_slack: f32,
    /// Horizontal reach when landing level or higher
    pub flat_reach: f32,
    /// Horizontal reach when landing lower
    pub drop_reach: f32,
    pub max_drop: f32,
}

impl JumpEnvelope {
    pub fn new(jump_velocity: f32, gravity: f32) -> Self {
        Self {
            max_rise: jump_velocity * jump_velocity / (2.0 * gravity),
            rise_slack: 8.0,
            flat_reach: 560.0,
            drop_reach: 640.0,
            max_drop: 520.0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.player.jump_velocity, settings.physics.gravity)
    }

    /// Can a player standing at `from` get to `to`?
    pub fn reaches(&self, from: Vec2, to: Vec2) -> bool {
        let dx = (to.x - from.x).abs();
        let rise = from.y - to.y;
        if rise > self.max_rise + self.rise_slack {
            return false;
        }
        if rise >= 0.0 {
            dx <= self.flat_reach
        } else {
            dx <= self.drop_reach && -rise <= self.max_drop
        }
    }
}

impl Default for JumpEnvelope {
    fn default() -> Self {
        Self::new(JUMP_VELOCITY, GRAVITY)
    }
}

/// Flat test floor with the fixtures parked at the far end
#[cfg(test)]
impl Level {
    pub(crate) fn arena() -> Self {
        Level {
            name: "arena".into(),
            width: 2000.0,
            height: 1000.0,
            spawn: Rect::new(100.0, 536.0, 32.0, 64.0),
            solids: vec![Rect::new(0.0, 600.0, 2000.0, 40.0)],
            terminal: Rect::new(1900.0, 552.0, 34.0, 48.0),
            silo_console: Rect::new(1800.0, 544.0, 46.0, 56.0),
            helipad: Rect::new(1600.0, 584.0, 120.0, 16.0),
            helicopter: Rect::new(1640.0, 524.0, 80.0, 60.0),
            ..Default::default()
        }
    }
}
