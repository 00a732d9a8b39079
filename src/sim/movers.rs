//! Moving platforms that carry the player: the monorail train and elevators

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::rect::Rect;

/// Train car shuttling along a horizontal track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Train {
    pub rect: Rect,
    pub min_x: f32,
    pub max_x: f32,
    /// Signed speed (px/s)
    pub speed: f32,
}

impl Train {
    /// Car parked at the left end of a track whose rails sit at `track_y`
    pub fn on_track(track_y: f32, min_x: f32, max_x: f32) -> Self {
        Self {
            rect: Rect::new(min_x, track_y - 58.0, 180.0, 64.0),
            min_x,
            max_x,
            speed: 150.0,
        }
    }

    /// Move the car, then carry `rider` if it is standing on the roof
    pub fn update(&mut self, dt: f32, rider: &mut Actor) {
        self.rect.x += self.speed * dt;
        if self.rect.x <= self.min_x {
            self.rect.x = self.min_x;
            self.speed = self.speed.abs();
        }
        if self.rect.right() >= self.max_x {
            self.rect.x = self.max_x - self.rect.w;
            self.speed = -self.speed.abs();
        }

        let p = &mut rider.rect;
        let standing = p.bottom() <= self.rect.top() + 12.0
            && p.bottom() >= self.rect.top() - 10.0
            && p.right() > self.rect.left()
            && p.left() < self.rect.right();
        if standing {
            p.x += self.speed * dt;
            p.y = self.rect.top() - p.h;
            rider.vy = rider.vy.min(0.0);
            rider.on_ground = true;
        }
    }
}

/// Elevator car bouncing between two heights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Elevator {
    pub rect: Rect,
    pub y_min: f32,
    pub y_max: f32,
    /// Signed speed (px/s); negative moves up
    pub speed: f32,
}

impl Elevator {
    pub fn new(rect: Rect, y_min: f32, y_max: f32, speed: f32) -> Self {
        Self {
            rect,
            y_min,
            y_max,
            speed,
        }
    }

    /// Move the car, then carry `rider` if it was standing on it
    pub fn update(&mut self, dt: f32, rider: &mut Actor) {
        let old_y = self.rect.y;
        self.rect.y += self.speed * dt;
        if self.rect.y <= self.y_min {
            self.rect.y = self.y_min;
            self.speed = self.speed.abs();
        } else if self.rect.y >= self.y_max {
            self.rect.y = self.y_max;
            self.speed = -self.speed.abs();
        }

        let p = &mut rider.rect;
        let standing = p.bottom() <= old_y + 10.0
            && p.bottom() >= old_y - 8.0
            && p.right() > self.rect.left() + 2.0
            && p.left() < self.rect.right() - 2.0;
        if standing {
            p.y = self.rect.top() - p.h;
            rider.vy = rider.vy.min(0.0);
            rider.on_ground = true;
        }
    }
}
