//! Movement and collision resolution against static level geometry
//!
//! Axis-separated: horizontal first, then vertical, then one-way platforms.
//! Solids are resolved one at a time in list order using the position as
//! already corrected by earlier solids. Level geometry is authored against
//! this order, so it is not replaced by a minimum-translation solve.

use super::actor::Actor;
use super::level::Level;
use super::rect::{Rect, overlaps_any};
use crate::settings::PhysicsTuning;

/// Per-tick movement intent beyond the horizontal velocity already on the actor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    /// Ignore one-way platforms this tick
    pub drop_down: bool,
    /// -1 climbs up, 1 climbs down, 0 holds position
    pub climb_dir: i8,
}

impl MoveIntent {
    pub fn climb(dir: i8) -> Self {
        Self {
            drop_down: false,
            climb_dir: dir.signum(),
        }
    }

    pub fn drop_through() -> Self {
        Self {
            drop_down: true,
            climb_dir: 0,
        }
    }
}

/// Static geometry plus the constants used to move actors through it
#[derive(Debug, Clone, Default)]
pub struct WorldPhysics {
    solids: Vec<Rect>,
    one_way: Vec<Rect>,
    ladders: Vec<Rect>,
    water: Vec<Rect>,
    tuning: PhysicsTuning,
}

impl WorldPhysics {
    /// Solids only, default tuning
    pub fn new(solids: Vec<Rect>) -> Self {
        Self {
            solids,
            ..Default::default()
        }
    }

    pub fn with_zones(
        solids: Vec<Rect>,
        one_way: Vec<Rect>,
        ladders: Vec<Rect>,
        water: Vec<Rect>,
    ) -> Self {
        Self {
            solids,
            one_way,
            ladders,
            water,
            tuning: PhysicsTuning::default(),
        }
    }

    pub fn from_level(level: &Level, tuning: PhysicsTuning) -> Self {
        Self {
            solids: level.solids.clone(),
            one_way: level.one_way.clone(),
            ladders: level.ladders.clone(),
            water: level.water.clone(),
            tuning,
        }
    }

    pub fn tuning(&self) -> &PhysicsTuning {
        &self.tuning
    }

    pub fn solids(&self) -> &[Rect] {
        &self.solids
    }

    pub fn hits_solid(&self, rect: &Rect) -> bool {
        overlaps_any(&self.solids, rect)
    }

    /// Advance `actor` by one tick of `dt` seconds and resolve collisions
    pub fn move_actor(&self, actor: &mut Actor, dt: f32, intent: MoveIntent) {
        debug_assert!(dt.is_finite() && dt >= 0.0, "dt out of contract: {dt}");
        let t = &self.tuning;

        actor.in_water = overlaps_any(&self.water, &actor.rect);
        actor.on_ladder = overlaps_any(&self.ladders, &actor.rect);

        let gravity = if actor.in_water {
            t.gravity * t.water_gravity_scale
        } else {
            t.gravity
        };

        if actor.on_ladder && intent.climb_dir != 0 {
            actor.vy = f32::from(intent.climb_dir.signum()) * t.ladder_speed;
        } else if actor.on_ladder && actor.vy.abs() < t.ladder_hover_epsilon {
            actor.vy = 0.0;
        } else {
            actor.vy += gravity * dt;
        }

        self.resolve_horizontal(actor, dt);

        let prev_bottom = actor.rect.bottom();
        self.resolve_vertical(actor, dt);

        // Climbing down a ladder carries the actor through one-way floors
        let dropping = intent.drop_down || (actor.on_ladder && intent.climb_dir > 0);
        if !dropping && actor.vy >= 0.0 {
            self.land_on_one_way(actor, prev_bottom);
        }
    }

    fn resolve_horizontal(&self, actor: &mut Actor, dt: f32) {
        actor.rect.x += actor.vx * dt;
        for wall in &self.solids {
            if actor.rect.intersects(wall) {
                if actor.vx > 0.0 {
                    actor.rect.x = wall.left() - actor.rect.w;
                } else if actor.vx < 0.0 {
                    actor.rect.x = wall.right();
                }
                actor.vx = 0.0;
            }
        }
    }

    fn resolve_vertical(&self, actor: &mut Actor, dt: f32) {
        actor.rect.y += actor.vy * dt;
        actor.on_ground = false;
        for wall in &self.solids {
            if actor.rect.intersects(wall) {
                if actor.vy > 0.0 {
                    actor.rect.y = wall.top() - actor.rect.h;
                    actor.on_ground = true;
                } else if actor.vy < 0.0 {
                    actor.rect.y = wall.bottom();
                }
                actor.vy = 0.0;
            }
        }
    }

    fn land_on_one_way(&self, actor: &mut Actor, prev_bottom: f32) {
        let t = &self.tuning;
        for plat in &self.one_way {
            let r = &actor.rect;
            let crossed_top =
                prev_bottom <= plat.top() + t.platform_catch_margin && r.bottom() >= plat.top();
            let overlaps_x = r.right() > plat.left() + t.platform_edge_margin
                && r.left() < plat.right() - t.platform_edge_margin;
            let above = r.top() < plat.top();
            if crossed_top && overlaps_x && above {
                actor.rect.y = plat.top() - actor.rect.h;
                actor.vy = 0.0;
                actor.on_ground = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn settle(physics: &WorldPhysics, actor: &mut Actor, dt: f32, ticks: usize) {
        for _ in 0..ticks {
            physics.move_actor(actor, dt, MoveIntent::default());
        }
    }

    #[test]
    fn test_actor_lands_on_platform() {
        let floor = Rect::new(0.0, 100.0, 300.0, 30.0);
        let physics = WorldPhysics::new(vec![floor]);
        let mut actor = Actor::new(Rect::new(10.0, 0.0, 20.0, 20.0));

        settle(&physics, &mut actor, 0.05, 20);

        assert!(actor.on_ground);
        assert_eq!(actor.rect.bottom(), floor.top());
        assert_eq!(actor.vy, 0.0);
    }

    #[test]
    fn test_resting_actor_stays_grounded() {
        let floor = Rect::new(0.0, 100.0, 300.0, 30.0);
        let physics = WorldPhysics::new(vec![floor]);
        let mut actor = Actor::new(Rect::new(10.0, 80.0, 20.0, 20.0));

        for _ in 0..120 {
            physics.move_actor(&mut actor, 1.0 / 60.0, MoveIntent::default());
            assert!(actor.on_ground);
            assert_eq!(actor.rect.bottom(), floor.top());
        }
    }

    #[test]
    fn test_wall_stops_horizontal_motion() {
        let wall = Rect::new(100.0, 0.0, 20.0, 200.0);
        let floor = Rect::new(0.0, 200.0, 400.0, 20.0);
        let physics = WorldPhysics::new(vec![wall, floor]);

        let mut actor = Actor::new(Rect::new(60.0, 180.0, 20.0, 20.0)).with_velocity(600.0, 0.0);
        physics.move_actor(&mut actor, 0.05, MoveIntent::default());
        assert_eq!(actor.rect.right(), wall.left());
        assert_eq!(actor.vx, 0.0);
        assert!(actor.on_ground);

        let mut actor = Actor::new(Rect::new(140.0, 180.0, 20.0, 20.0)).with_velocity(-600.0, 0.0);
        physics.move_actor(&mut actor, 0.05, MoveIntent::default());
        assert_eq!(actor.rect.left(), wall.right());
        assert_eq!(actor.vx, 0.0);
    }

    #[test]
    fn test_ceiling_stops_jump() {
        let ceiling = Rect::new(0.0, 0.0, 200.0, 20.0);
        let physics = WorldPhysics::new(vec![ceiling]);
        let mut actor = Actor::new(Rect::new(50.0, 30.0, 20.0, 20.0)).with_velocity(0.0, -620.0);

        physics.move_actor(&mut actor, 0.05, MoveIntent::default());

        assert_eq!(actor.rect.top(), ceiling.bottom());
        assert_eq!(actor.vy, 0.0);
        assert!(!actor.on_ground);
    }

    #[test]
    fn test_sequential_resolution_against_multiple_solids() {
        // Two stacked wall segments: the second is resolved from the position
        // the first already produced.
        let upper = Rect::new(100.0, 0.0, 20.0, 50.0);
        let lower = Rect::new(104.0, 50.0, 20.0, 50.0);
        let physics = WorldPhysics::new(vec![upper, lower]);
        let mut actor = Actor::new(Rect::new(80.0, 40.0, 20.0, 20.0)).with_velocity(200.0, 0.0);

        physics.move_actor(&mut actor, 0.05, MoveIntent::default());

        // First hit pushes to x=80, velocity zeroed; the second wall no longer overlaps
        assert_eq!(actor.rect.x, 80.0);
        assert_eq!(actor.vx, 0.0);
    }

    fn one_way_world() -> (WorldPhysics, Rect) {
        let plat = Rect::new(0.0, 100.0, 200.0, 14.0);
        let floor = Rect::new(0.0, 300.0, 200.0, 20.0);
        let physics = WorldPhysics::with_zones(vec![floor], vec![plat], vec![], vec![]);
        (physics, plat)
    }

    #[test]
    fn test_one_way_supports_from_above() {
        let (physics, plat) = one_way_world();
        let mut actor = Actor::new(Rect::new(50.0, 40.0, 20.0, 40.0));

        settle(&physics, &mut actor, 1.0 / 60.0, 60);

        assert!(actor.on_ground);
        assert_eq!(actor.rect.bottom(), plat.top());
    }

    #[test]
    fn test_one_way_drop_through() {
        let (physics, plat) = one_way_world();
        let mut actor = Actor::new(Rect::new(50.0, 60.0, 20.0, 40.0));
        settle(&physics, &mut actor, 1.0 / 60.0, 5);
        assert!(actor.on_ground);

        physics.move_actor(&mut actor, 1.0 / 60.0, MoveIntent::drop_through());
        assert!(!actor.on_ground);
        assert!(actor.rect.bottom() > plat.top());

        // Once below the catch margin the platform no longer grabs the actor
        for _ in 0..20 {
            physics.move_actor(&mut actor, 1.0 / 60.0, MoveIntent::drop_through());
        }
        settle(&physics, &mut actor, 1.0 / 60.0, 10);
        assert!(actor.rect.top() > plat.top());
    }

    #[test]
    fn test_one_way_passable_from_below() {
        let (physics, plat) = one_way_world();
        let mut actor = Actor::new(Rect::new(50.0, 120.0, 20.0, 40.0)).with_velocity(0.0, -600.0);

        for _ in 0..10 {
            physics.move_actor(&mut actor, 1.0 / 60.0, MoveIntent::default());
        }

        assert!(actor.vy < 0.0);
        assert!(actor.rect.bottom() < plat.top());
    }

    #[test]
    fn test_one_way_edge_margin() {
        let (physics, plat) = one_way_world();
        // Only 1px of horizontal overlap: not enough to land
        let mut actor = Actor::new(Rect::new(plat.right() - 1.0, 60.0, 20.0, 40.0));
        settle(&physics, &mut actor, 1.0 / 60.0, 30);
        assert!(actor.rect.bottom() > plat.top());
    }

    #[test]
    fn test_ladder_descent_through_one_way_floor() {
        let plat = Rect::new(0.0, 100.0, 200.0, 14.0);
        let ladder = Rect::new(80.0, 60.0, 34.0, 240.0);
        let floor = Rect::new(0.0, 300.0, 200.0, 20.0);
        let physics = WorldPhysics::with_zones(vec![floor], vec![plat], vec![ladder], vec![]);
        let mut actor = Actor::new(Rect::new(85.0, 60.0, 20.0, 40.0));
        settle(&physics, &mut actor, 1.0 / 60.0, 3);
        assert_eq!(actor.rect.bottom(), plat.top());

        for _ in 0..30 {
            physics.move_actor(&mut actor, 1.0 / 60.0, MoveIntent::climb(1));
        }

        assert!(actor.on_ladder);
        assert!(actor.rect.top() > plat.top());
        assert!(!actor.on_ground);
    }

    #[test]
    fn test_ladder_hover_and_climb() {
        let ladder = Rect::new(0.0, 0.0, 34.0, 400.0);
        let physics = WorldPhysics::with_zones(vec![], vec![], vec![ladder], vec![]);
        let mut actor = Actor::new(Rect::new(5.0, 200.0, 20.0, 40.0));

        physics.move_actor(&mut actor, 0.1, MoveIntent::default());
        assert!(actor.on_ladder);
        assert_eq!(actor.vy, 0.0);
        assert_eq!(actor.rect.y, 200.0);

        physics.move_actor(&mut actor, 0.1, MoveIntent::climb(-1));
        let speed = physics.tuning().ladder_speed;
        assert_eq!(actor.vy, -speed);
        assert!((actor.rect.y - (200.0 - speed * 0.1)).abs() < 1e-3);
    }

    #[test]
    fn test_water_reduces_gravity() {
        let water = Rect::new(0.0, 0.0, 400.0, 400.0);
        let physics = WorldPhysics::with_zones(vec![], vec![], vec![], vec![water]);
        let dry = WorldPhysics::new(vec![]);

        let mut swimmer = Actor::new(Rect::new(10.0, 10.0, 20.0, 20.0));
        let mut faller = swimmer.clone();
        physics.move_actor(&mut swimmer, 0.1, MoveIntent::default());
        dry.move_actor(&mut faller, 0.1, MoveIntent::default());

        assert!(swimmer.in_water);
        assert!(!faller.in_water);
        assert!((swimmer.vy - faller.vy * 0.32).abs() < 1e-3);
    }

    #[test]
    fn test_flags_do_not_latch() {
        let water = Rect::new(0.0, 0.0, 40.0, 40.0);
        let physics = WorldPhysics::with_zones(vec![], vec![], vec![], vec![water]);
        let mut actor = Actor::new(Rect::new(10.0, 10.0, 10.0, 10.0)).with_velocity(2000.0, 0.0);

        physics.move_actor(&mut actor, 0.05, MoveIntent::default());
        assert!(actor.in_water);
        physics.move_actor(&mut actor, 0.05, MoveIntent::default());
        assert!(!actor.in_water);
    }

    proptest! {
        #[test]
        fn prop_landing_is_exact_for_any_step(
            dt in 0.002f32..(1.0 / 30.0),
            start_y in 0.0f32..60.0,
            x in 0.0f32..250.0,
        ) {
            let floor = Rect::new(0.0, 100.0, 300.0, 30.0);
            let physics = WorldPhysics::new(vec![floor]);
            let mut actor = Actor::new(Rect::new(x, start_y, 20.0, 20.0));

            let mut ticks = 0;
            while !actor.on_ground && ticks < 5000 {
                physics.move_actor(&mut actor, dt, MoveIntent::default());
                ticks += 1;
            }

            prop_assert!(actor.on_ground);
            prop_assert_eq!(actor.rect.bottom(), floor.top());
        }
    }
}
