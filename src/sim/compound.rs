//! The stock mission: a shoreline compound, a many-floor skyscraper, a cavern
//! maze below and a nuclear silo at the bottom.
//!
//! Rects are authored as integer `(x, y, w, h)` tables. Tables named
//! `SURFACE_*` are measured from the surface datum (`WORLD_Y_OFFSET`); all
//! others are absolute world coordinates. Solid order is significant for
//! collision resolution and must be preserved.

use super::enemy::EnemyKind;
use super::items::{MissionItem, Pickup, WeaponCache};
use super::level::{EnemySpawn, Level, TrainTrack};
use super::movers::Elevator;
use super::rect::Rect;
use super::weapons::WeaponKind;
use crate::consts::SCREEN_H;

pub const WORLD_W: f32 = 16800.0;
pub const WORLD_H: f32 = 3320.0;
pub const FLOOR_H: f32 = 44.0;
/// Height of the sky above the surface datum
pub const WORLD_Y_OFFSET: f32 = OY as f32;

const OY: i32 = 760;

/// Room above the helicopter for lifts and jumps
pub const SKY_CEILING: f32 = -480.0;

type Spec = (i32, i32, i32, i32);

fn abs(&(x, y, w, h): &Spec) -> Rect {
    Rect::new(x as f32, y as f32, w as f32, h as f32)
}

fn surface(spec: &Spec) -> Rect {
    abs(spec).translated(0.0, WORLD_Y_OFFSET)
}

const SURFACE_GROUND: &[Spec] = &[
    // Seabed under the spawn water
    (0, 696, 960, 24),
    (220, 610, 360, 22),
    (560, 550, 380, 24),
    // Main floor segments; the gaps are shafts down to the caverns
    (960, 676, 2240, 44),
    (3360, 676, 2960, 44),
    (6500, 676, 3560, 44),
    (10240, 676, 3200, 44),
    (13620, 676, 3180, 44),
    (1120, 680, 2400, 20),
    (3560, 680, 2400, 20),
    (6020, 680, 2600, 20),
    (8660, 680, 2400, 20),
    (11100, 680, 2200, 20),
    (13340, 680, 2200, 20),
];

const SURFACE_STRUCTURES: &[Spec] = &[
    // Rooftop steps
    (1420, 430, 260, 18),
    (1920, 390, 260, 18),
    (2440, 350, 260, 18),
    (2960, 310, 260, 18),
    (3480, 270, 260, 18),
    (4000, 230, 260, 18),
    (4520, 190, 260, 18),
    (5040, 150, 260, 18),
    (5560, 110, 260, 18),
    (6080, 80, 260, 18),
    (3000, 620, 420, 18),
    (5950, 620, 460, 18),
    // Skyscraper shell and interior decks
    (7060, 76, 24, 604),
    (15920, 72, 30, 608),
    (7040, 678, 8920, 22),
    (7140, 614, 8720, 18),
    (7240, 550, 8520, 18),
    (7340, 486, 8320, 18),
    (7440, 422, 8120, 18),
    (7540, 358, 7920, 18),
    (7640, 294, 7720, 18),
    (7740, 230, 7520, 18),
    (7840, 166, 7320, 18),
    (7940, 102, 7120, 18),
    (8060, 38, 6880, 18),
    (8200, -26, 6560, 16),
    (8360, -90, 6200, 16),
    (8540, -154, 5820, 16),
    (8740, -218, 5400, 16),
    (8960, -282, 4940, 16),
    (9200, -346, 4440, 16),
    (9460, -410, 3900, 16),
    (9740, -474, 3300, 16),
    // Stair blocks
    (7340, 642, 160, 36),
    (7500, 606, 160, 36),
    (7660, 570, 160, 36),
    (7820, 534, 160, 36),
    (7980, 498, 160, 36),
    (8140, 462, 160, 36),
    (8300, 426, 160, 36),
    (8460, 390, 160, 36),
    (8620, 354, 160, 36),
    (8780, 318, 160, 36),
    (8940, 282, 160, 36),
    (9100, 246, 160, 36),
    (9260, 210, 160, 36),
    (9420, 174, 160, 36),
    // Tower traversal blocks
    (10200, 642, 180, 36),
    (10400, 606, 180, 36),
    (10600, 570, 180, 36),
    (10800, 534, 180, 36),
    (11000, 498, 180, 36),
    (11200, 462, 180, 36),
    (11400, 426, 180, 36),
    (11600, 390, 180, 36),
    (11800, 354, 180, 36),
    (12000, 318, 180, 36),
    (12200, 282, 180, 36),
    (12400, 246, 180, 36),
    (12600, 210, 180, 36),
    (12800, 174, 180, 36),
    (13000, 138, 180, 36),
    (13200, 102, 180, 36),
    (13400, 66, 180, 36),
    (13600, 30, 180, 36),
];

const SKY_AND_CAVERNS: &[Spec] = &[
    // Upper roofs
    (7350, 340, 1540, 18),
    (7480, 268, 1310, 16),
    (7600, 196, 1060, 14),
    (7740, 124, 840, 14),
    (9000, 420, 2200, 18),
    (9480, 332, 2060, 16),
    (10020, 244, 1880, 16),
    (10640, 156, 1660, 14),
    (11280, 68, 1420, 14),
    (11940, -20, 1160, 14),
    (12620, -108, 880, 14),
    // Cavern ceiling
    (1740, 1640, 2800, 26),
    (4700, 1640, 1900, 26),
    (6900, 1640, 2300, 26),
    (9600, 1640, 2200, 26),
    (12040, 1640, 3000, 26),
    // Cavern maze layers
    (1820, 1860, 840, 22),
    (2860, 1860, 760, 22),
    (3820, 1860, 900, 22),
    (5000, 1860, 980, 22),
    (6180, 1860, 860, 22),
    (7240, 1860, 960, 22),
    (8380, 1860, 940, 22),
    (9500, 1860, 980, 22),
    (10680, 1860, 900, 22),
    (11780, 1860, 1000, 22),
    (12980, 1860, 980, 22),
    (14180, 1860, 980, 22),
    (1640, 2120, 760, 22),
    (2580, 2120, 700, 22),
    (3440, 2120, 760, 22),
    (4380, 2120, 760, 22),
    (5320, 2120, 760, 22),
    (6260, 2120, 760, 22),
    (7200, 2120, 760, 22),
    (8140, 2120, 760, 22),
    (9080, 2120, 760, 22),
    (10020, 2120, 760, 22),
    (10960, 2120, 760, 22),
    (11900, 2120, 760, 22),
    (12840, 2120, 760, 22),
    (13780, 2120, 760, 22),
    (14720, 2120, 760, 22),
    (1740, 2380, 1200, 22),
    (3220, 2380, 1220, 22),
    (4720, 2380, 1160, 22),
    (6120, 2380, 1240, 22),
    (7620, 2380, 1160, 22),
    (9000, 2380, 1260, 22),
    (10520, 2380, 1200, 22),
    (11980, 2380, 1240, 22),
    (13480, 2380, 1160, 22),
    (15000, 2380, 1040, 22),
    // Silo floor and bedrock
    (1520, 2660, 15280, 28),
    (1400, 2920, 15600, 56),
];

fn solids() -> Vec<Rect> {
    let mut solids: Vec<Rect> = SURFACE_GROUND.iter().map(surface).collect();

    // Climbable chain across the whole compound
    let (mut x, mut y) = (980, 620);
    while x < 15800 {
        solids.push(surface(&(x, y, 420, 22)));
        x += 500;
        y = (y - 38).clamp(90, 640);
    }

    solids.extend(SURFACE_STRUCTURES.iter().map(surface));
    solids.extend(SKY_AND_CAVERNS.iter().map(abs));
    solids
}

const SURFACE_CATWALKS: &[Spec] = &[
    (1260, 540, 420, 14),
    (1760, 500, 500, 14),
    (2360, 460, 420, 14),
    (2880, 420, 500, 14),
    (3460, 380, 520, 14),
    (4060, 340, 500, 14),
    (4640, 300, 530, 14),
    (5250, 260, 520, 14),
    (5840, 220, 560, 14),
    (6460, 180, 560, 14),
    (7080, 220, 520, 14),
    (7700, 260, 500, 14),
    (8300, 300, 480, 14),
    (8880, 260, 560, 14),
    // Basement crossovers
    (1320, 640, 240, 12),
    (2040, 640, 260, 12),
    (3300, 640, 280, 12),
    (5120, 640, 320, 12),
    (6900, 640, 300, 12),
    // Tower rooms and server catwalks
    (7220, 594, 620, 12),
    (8020, 594, 620, 12),
    (8820, 594, 540, 12),
    (7340, 530, 680, 12),
    (8200, 530, 700, 12),
    (7500, 466, 700, 12),
    (8380, 466, 700, 12),
    (7660, 402, 760, 12),
    (8580, 402, 620, 12),
    (7780, 338, 660, 12),
    (8540, 338, 620, 12),
    (7900, 274, 520, 12),
    (8520, 274, 470, 12),
    (8020, 210, 450, 12),
    (8560, 210, 360, 12),
    (8120, 146, 360, 12),
    (8560, 146, 280, 12),
];

const SKY_CATWALKS: &[Spec] = &[
    (7480, 320, 560, 12),
    (8200, 248, 520, 12),
    (7860, 176, 540, 12),
];

const TERRACES: &[(i32, i32)] = &[
    (10600, 248),
    (11400, 176),
    (12200, 104),
    (13000, 32),
    (13800, -40),
    (14600, -112),
];

fn one_way_platforms() -> Vec<Rect> {
    let mut plats: Vec<Rect> = SURFACE_CATWALKS.iter().map(surface).collect();
    plats.extend(SKY_CATWALKS.iter().map(abs));

    // Wide skyscraper rooms
    for x in (9300..15600).step_by(620) {
        plats.push(surface(&(x, 594, 520, 12)));
        plats.push(surface(&(x + 120, 530, 460, 12)));
        plats.push(surface(&(x + 240, 466, 420, 12)));
        plats.push(surface(&(x + 180, 402, 460, 12)));
    }
    for x in (9800..15000).step_by(740) {
        plats.push(surface(&(x, 338, 420, 12)));
        plats.push(surface(&(x + 100, 274, 360, 12)));
        plats.push(surface(&(x + 180, 210, 320, 12)));
    }
    plats.extend(TERRACES.iter().map(|&(x, y)| abs(&(x, y, 560, 12))));

    // Cavern catwalks
    for x in (1900..15500).step_by(880) {
        plats.push(abs(&(x, 1730, 420, 12)));
        plats.push(abs(&(x + 200, 1990, 360, 12)));
        plats.push(abs(&(x + 80, 2250, 380, 12)));
        plats.push(abs(&(x + 260, 2510, 340, 12)));
    }

    // Helipad deck and silo chamber floor; both are crossed by lifts or ladders
    plats.push(abs(&(15120, -222, 980, 12)));
    plats.push(abs(&(5200, 2478, 3000, 14)));
    plats
}

const SURFACE_LADDERS: &[Spec] = &[
    (1510, 544, 34, 136),
    (2110, 504, 34, 176),
    (2700, 464, 34, 216),
    (3280, 424, 34, 256),
    (3880, 384, 34, 296),
    (4480, 344, 34, 336),
    (5100, 304, 34, 376),
    (5720, 264, 34, 416),
    (6360, 224, 34, 456),
    (7000, 184, 34, 496),
    (7600, 224, 34, 456),
    (8220, 264, 34, 416),
    (8840, 304, 34, 376),
    // Tower shafts
    (7460, 146, 34, 532),
    (8120, 106, 34, 572),
    (8780, 86, 34, 592),
    (9340, 106, 34, 572),
];

const TOWER_GRID_LOW: [i32; 8] = [9560, 10320, 11080, 11840, 12600, 13360, 14120, 14880];
const TOWER_GRID_HIGH: [i32; 8] = [9900, 10660, 11420, 12180, 12940, 13700, 14460, 15220];
const CAVERN_SHAFTS: [i32; 4] = [3240, 6380, 10080, 13600];
const MAZE_CONNECTORS: [i32; 22] = [
    1860, 2340, 2840, 3360, 3920, 4520, 5140, 5760, 6440, 7120, 7780, 8460, 9140, 9820, 10500,
    11180, 11860, 12540, 13220, 13900, 14580, 15260,
];

fn ladders() -> Vec<Rect> {
    let mut ladders: Vec<Rect> = SURFACE_LADDERS.iter().map(surface).collect();
    ladders.push(abs(&(7860, 182, 34, 176)));
    ladders.push(abs(&(8440, 110, 34, 176)));
    ladders.extend(TOWER_GRID_LOW.iter().map(|&x| surface(&(x, -180, 34, 860))));
    ladders.extend(TOWER_GRID_HIGH.iter().map(|&x| surface(&(x, -430, 34, 630))));
    ladders.extend(CAVERN_SHAFTS.iter().map(|&x| abs(&(x, 1390, 34, 1290))));
    ladders.extend(MAZE_CONNECTORS.iter().map(|&x| abs(&(x, 1600, 34, 1060))));
    ladders
}

const BUSHES: [(i32, i32); 6] = [
    (1220, 120),
    (2100, 130),
    (3200, 160),
    (4720, 150),
    (6400, 170),
    (8180, 140),
];

fn bushes() -> Vec<Rect> {
    BUSHES
        .iter()
        .map(|&(x, w)| surface(&(x, SCREEN_H as i32 - 88, w, 40)))
        .collect()
}

fn pickups() -> Vec<Pickup> {
    let token = |x, y| Rect::new(x, y, 22.0, 22.0);
    let oy = WORLD_Y_OFFSET;
    vec![
        Pickup::new(MissionItem::TimeBomb, token(1520.0, 578.0 + oy)),
        Pickup::new(MissionItem::Keycard, token(3220.0, 638.0 + oy)),
        Pickup::new(MissionItem::TrainToken, token(6190.0, 638.0 + oy)),
        Pickup::new(MissionItem::EngineeringCodes, token(10320.0, 210.0 + oy)),
        Pickup::new(MissionItem::VaultRelay, token(14120.0, -84.0 + oy)),
        Pickup::new(MissionItem::SiloOverrides, token(6200.0, 2460.0)),
    ]
}

fn weapon_caches() -> Vec<WeaponCache> {
    let crate_at = |x, y| Rect::new(x, y, 22.0, 22.0);
    let oy = WORLD_Y_OFFSET;
    vec![
        WeaponCache::new(WeaponKind::Stick, crate_at(1860.0, 638.0 + oy)),
        WeaponCache::new(WeaponKind::Brick, crate_at(2920.0, 638.0 + oy)),
        WeaponCache::new(WeaponKind::Pole, crate_at(4180.0, 638.0 + oy)),
        WeaponCache::new(WeaponKind::Nunchakus, crate_at(7440.0, 530.0 + oy)),
        WeaponCache::new(WeaponKind::Sais, crate_at(9580.0, 466.0 + oy)),
        WeaponCache::new(WeaponKind::Sword, crate_at(13140.0, 102.0 + oy)),
        WeaponCache::new(WeaponKind::Gun, crate_at(5620.0, 2440.0)),
        WeaponCache::new(WeaponKind::MachineGun, crate_at(10940.0, 2060.0)),
        WeaponCache::new(WeaponKind::Silencer, crate_at(15240.0, -250.0)),
    ]
}

/// kind, rect, patrol range, speed, hp; rects in absolute coordinates
type Roster = (EnemyKind, Spec, (i32, i32), i32, i32);

const ROSTER: &[Roster] = &[
    (EnemyKind::Guard, (1320, 554 + OY, 30, 56), (1200, 1760), 94, 2),
    (EnemyKind::Ninja, (2040, 514 + OY, 30, 56), (1900, 2480), 116, 3),
    (EnemyKind::Guard, (3120, 624 + OY, 30, 56), (3040, 4440), 120, 3),
    (EnemyKind::Heavy, (4860, 414 + OY, 30, 56), (4680, 5440), 92, 5),
    (EnemyKind::Dog, (6520, 624 + OY, 42, 44), (6460, 8040), 152, 2),
    (EnemyKind::Ninja, (9460, 294 + OY, 30, 56), (9220, 10400), 146, 4),
    (EnemyKind::Guard, (10820, 562 + OY, 30, 56), (10440, 11380), 118, 3),
    (EnemyKind::Drone, (12020, 498 + OY, 30, 56), (11600, 12640), 160, 2),
    (EnemyKind::Boss, (13640, 96, 30, 56), (13280, 14440), 126, 10),
    (EnemyKind::Boss, (14980, 32, 30, 56), (14620, 15620), 134, 12),
    // Cavern wildlife and the underground garrison
    (EnemyKind::Bat, (2120, 1808, 28, 40), (1900, 3000), 170, 1),
    (EnemyKind::Bat, (3660, 1808, 28, 40), (3320, 4520), 176, 1),
    (EnemyKind::Rat, (6160, 2068, 30, 44), (5820, 6900), 148, 2),
    (EnemyKind::Rat, (7920, 2068, 30, 44), (7560, 8660), 152, 2),
    (EnemyKind::Snake, (9800, 2328, 34, 40), (9420, 10440), 132, 2),
    (EnemyKind::Snake, (11820, 2328, 34, 40), (11420, 12460), 138, 2),
    (EnemyKind::Henchman, (2960, 2322, 30, 56), (2520, 3480), 112, 3),
    (EnemyKind::Thug, (5480, 2322, 30, 56), (5040, 6060), 124, 4),
    (EnemyKind::Guard, (7240, 2322, 30, 56), (6840, 7820), 126, 3),
    (EnemyKind::Ninja, (8880, 2322, 30, 56), (8480, 9480), 144, 4),
    (EnemyKind::Assassin, (10620, 2062, 30, 56), (10120, 11180), 156, 5),
    (EnemyKind::Robot, (12820, 2588, 32, 58), (12320, 13500), 108, 6),
    (EnemyKind::Robot, (14620, 2588, 32, 58), (14120, 15380), 112, 6),
];

fn enemies() -> Vec<EnemySpawn> {
    ROSTER
        .iter()
        .map(|&(kind, rect, (left, right), speed, hp)| EnemySpawn {
            kind,
            rect: abs(&rect),
            patrol_left: left as f32,
            patrol_right: right as f32,
            speed: speed as f32,
            hp,
        })
        .collect()
}

fn elevators() -> Vec<Elevator> {
    let oy = WORLD_Y_OFFSET;
    let car = |x, y| Rect::new(x, y, 52.0, 22.0);
    vec![
        Elevator::new(car(7480.0, 610.0 + oy), 150.0 + oy, 650.0 + oy, -96.0),
        Elevator::new(car(9800.0, 610.0 + oy), 130.0 + oy, 650.0 + oy, -102.0),
        Elevator::new(car(12060.0, 610.0 + oy), 30.0 + oy, 650.0 + oy, -108.0),
        Elevator::new(car(15340.0, -218.0), -320.0, 620.0 + oy, -116.0),
    ]
}

impl Level {
    /// The stock compound mission
    pub fn compound() -> Self {
        let oy = WORLD_Y_OFFSET;
        Level {
            name: "compound".to_string(),
            width: WORLD_W,
            height: WORLD_H,
            ceiling: SKY_CEILING,
            spawn: Rect::new(64.0, SCREEN_H - 140.0 + oy, 32.0, 64.0),
            solids: solids(),
            one_way: one_way_platforms(),
            ladders: ladders(),
            water: vec![surface(&(0, SCREEN_H as i32 - 150, 760, 180))],
            bushes: bushes(),
            pickups: pickups(),
            weapon_caches: weapon_caches(),
            enemies: enemies(),
            terminal: Rect::new(14820.0, -128.0 + oy, 34.0, 48.0),
            silo_console: Rect::new(6240.0, 2422.0, 46.0, 56.0),
            helipad: Rect::new(15120.0, -236.0, 980.0, 16.0),
            helicopter: Rect::new(15740.0, -296.0, 220.0, 76.0),
            train: Some(TrainTrack {
                y: 652.0 + oy,
                min_x: 3100.0,
                max_x: 6300.0,
            }),
            elevators: elevators(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SCREEN_W;
    use crate::sim::level::JumpEnvelope;

    #[test]
    fn test_stock_level_validates() {
        Level::compound().validate().unwrap();
    }

    #[test]
    fn test_route_to_extraction_is_connected() {
        let level = Level::compound();
        let farthest = level
            .farthest_reachable_x(&JumpEnvelope::default())
            .unwrap();
        assert!(farthest > 15000.0, "farthest reachable node at x={farthest}");
    }

    #[test]
    fn test_world_spans_many_screens() {
        assert!(SCREEN_H >= 700.0);
        assert!(WORLD_H >= SCREEN_H * 4.0);
        assert!(WORLD_W >= SCREEN_W * 10.0);
    }

    #[test]
    fn test_seabed_under_spawn_water() {
        let level = Level::compound();
        let spawn_x = level.spawn.x;
        assert!(level.solids.iter().any(|s| {
            s.left() <= spawn_x && spawn_x <= s.right() && s.top() >= SCREEN_H - 40.0 + WORLD_Y_OFFSET
        }));
        assert!(level.water.iter().any(|w| w.intersects(&level.spawn)));
    }

    #[test]
    fn test_upper_tower_routes() {
        let level = Level::compound();
        assert!(level.solids.iter().any(|s| s.y < WORLD_Y_OFFSET));
    }

    #[test]
    fn test_cavern_layers() {
        let level = Level::compound();
        assert!(level.solids.iter().filter(|s| s.y >= 1800.0).count() >= 20);
    }

    #[test]
    fn test_main_floor_has_shafts() {
        let level = Level::compound();
        let floor_y = SCREEN_H - FLOOR_H + WORLD_Y_OFFSET;
        let segments = level
            .solids
            .iter()
            .filter(|s| s.y == floor_y && s.h == FLOOR_H)
            .count();
        assert!(segments >= 4);
    }

    #[test]
    fn test_helipad_deck_and_silo_chamber() {
        let level = Level::compound();
        let surfaces: Vec<&Rect> = level.solids.iter().chain(&level.one_way).collect();
        assert!(surfaces.iter().any(|s| s.y <= -220.0 && s.w >= 900.0));
        assert!(
            surfaces
                .iter()
                .any(|s| (5200.0..=5600.0).contains(&s.x) && s.y >= 2400.0 && s.w >= 3000.0)
        );
    }

    #[test]
    fn test_fixtures_are_standable() {
        let level = Level::compound();
        // A player standing on the silo floor overlaps the console
        let floor = level.one_way.iter().find(|p| p.x == 5200.0 && p.y == 2478.0).unwrap();
        let agent = Rect::new(6250.0, floor.top() - 64.0, 32.0, 64.0);
        assert!(agent.intersects(&level.silo_console));

        // A player standing on the helipad deck overlaps the pad
        let deck = level.one_way.iter().find(|p| p.x == 15120.0 && p.y == -222.0).unwrap();
        let agent = Rect::new(15200.0, deck.top() - 64.0, 32.0, 64.0);
        assert!(agent.intersects(&level.helipad));
    }

    #[test]
    fn test_roster() {
        let level = Level::compound();
        assert_eq!(level.enemies.len(), 23);
        assert_eq!(level.enemies.iter().filter(|e| e.kind == EnemyKind::Boss).count(), 2);
        assert_eq!(level.pickups.len(), 6);
        assert_eq!(level.weapon_caches.len(), 9);
        assert_eq!(level.elevators.len(), 4);
    }
}
