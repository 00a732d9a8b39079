//! Moving bodies

use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Horizontal facing of an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for left, 1.0 for right
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// A body moved by the physics engine.
///
/// `in_water` and `on_ladder` are recomputed from scratch every tick.
/// `on_ground` is recomputed by the physics pass but standing checks on
/// movers (train, elevators) may set it afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Actor {
    pub rect: Rect,
    pub vx: f32,
    pub vy: f32,
    pub on_ground: bool,
    pub on_ladder: bool,
    pub in_water: bool,
}

impl Actor {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            ..Default::default()
        }
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    /// Grounded, swimming or holding a ladder
    pub fn can_jump(&self) -> bool {
        self.on_ground || self.in_water || self.on_ladder
    }
}
