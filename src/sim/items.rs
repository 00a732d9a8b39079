//! Mission pickups, weapon caches and enemy drops

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::player::PlayerState;
use super::rect::Rect;
use super::weapons::WeaponKind;

/// Objective items placed in the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionItem {
    /// The explosive; collecting it arms the bomb
    TimeBomb,
    Keycard,
    TrainToken,
    EngineeringCodes,
    VaultRelay,
    SiloOverrides,
}

impl MissionItem {
    /// Items that count as the player's codes
    pub fn grants_codes(self) -> bool {
        matches!(self, MissionItem::Keycard | MissionItem::EngineeringCodes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub item: MissionItem,
    pub rect: Rect,
    #[serde(default)]
    pub taken: bool,
}

impl Pickup {
    pub fn new(item: MissionItem, rect: Rect) -> Self {
        Self {
            item,
            rect,
            taken: false,
        }
    }
}

/// A weapon lying in the level at mission start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponCache {
    pub weapon: WeaponKind,
    pub rect: Rect,
    #[serde(default)]
    pub taken: bool,
}

impl WeaponCache {
    pub fn new(weapon: WeaponKind, rect: Rect) -> Self {
        Self {
            weapon,
            rect,
            taken: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LootKind {
    Gold,
    Invisibility,
    Invincibility,
    Speed,
    EnergyOrb,
    Weapon(WeaponKind),
}

const BUFF_LOOT: [LootKind; 4] = [
    LootKind::Invisibility,
    LootKind::Invincibility,
    LootKind::Speed,
    LootKind::EnergyOrb,
];

pub const DROP_TTL: f32 = 16.0;
pub const BOSS_DROP_TTL: f32 = 24.0;
pub const DROP_SIZE: f32 = 24.0;
pub const GOLD_VALUE: u32 = 15;

impl LootKind {
    /// Apply this drop's effect to the player
    pub fn apply(self, player: &mut PlayerState) {
        match self {
            LootKind::Gold => player.gold += GOLD_VALUE,
            LootKind::Invisibility => {
                player.buffs.invisibility = player.buffs.invisibility.max(10.0)
            }
            LootKind::Invincibility => {
                player.buffs.invincibility = player.buffs.invincibility.max(8.0)
            }
            LootKind::Speed => player.buffs.speed = player.buffs.speed.max(9.0),
            LootKind::EnergyOrb => player.restore_energy(38.0),
            LootKind::Weapon(weapon) => player.arsenal.take_drop(weapon),
        }
    }
}

/// Item left behind by a defeated enemy; expires after `ttl` seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loot {
    pub kind: LootKind,
    pub rect: Rect,
    pub ttl: f32,
}

impl Loot {
    fn at(kind: LootKind, x: f32, y: f32, ttl: f32) -> Self {
        Self {
            kind,
            rect: Rect::new(x, y, DROP_SIZE, DROP_SIZE),
            ttl,
        }
    }
}

/// Roll what a just-defeated enemy leaves behind
pub fn roll_enemy_loot<R: Rng>(enemy: &Enemy, rng: &mut R) -> Vec<Loot> {
    let r = &enemy.actor.rect;
    let cx = r.x + r.w / 2.0 - 12.0;
    let cy = r.y + r.h / 2.0 - 12.0;

    if enemy.kind.is_boss() {
        return vec![
            Loot::at(LootKind::Gold, cx - 12.0, cy, BOSS_DROP_TTL),
            Loot::at(LootKind::Invisibility, cx + 16.0, cy, BOSS_DROP_TTL),
            Loot::at(LootKind::Invincibility, cx + 44.0, cy, BOSS_DROP_TTL),
        ];
    }

    let mut drops = Vec::new();
    if rng.random_bool(0.16) {
        drops.push(Loot::at(LootKind::Gold, cx, cy, DROP_TTL));
    }
    if rng.random_bool(0.12) {
        let kind = BUFF_LOOT[rng.random_range(0..BUFF_LOOT.len())];
        drops.push(Loot::at(kind, cx + 18.0, cy, DROP_TTL));
    }
    if enemy.kind.profile().drops_weapons && rng.random_bool(0.14) {
        let weapon = WeaponKind::DROPPABLE[rng.random_range(0..WeaponKind::DROPPABLE.len())];
        drops.push(Loot::at(LootKind::Weapon(weapon), cx - 20.0, cy + 12.0, DROP_TTL));
    }
    drops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::Actor;
    use crate::sim::enemy::EnemyKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn player() -> PlayerState {
        PlayerState::new(Actor::new(Rect::new(0.0, 0.0, 32.0, 64.0)))
    }

    #[test]
    fn test_boss_always_drops_three() {
        let boss = Enemy::new(EnemyKind::Boss, Rect::new(0.0, 0.0, 30.0, 56.0), (0.0, 100.0), 120.0, 10);
        let mut rng = Pcg32::seed_from_u64(1);
        let drops = roll_enemy_loot(&boss, &mut rng);
        let kinds: Vec<_> = drops.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![LootKind::Gold, LootKind::Invisibility, LootKind::Invincibility]
        );
        assert!(drops.iter().all(|d| d.ttl == BOSS_DROP_TTL));
    }

    #[test]
    fn test_rolls_are_deterministic_per_seed() {
        let guard = Enemy::new(EnemyKind::Guard, Rect::new(0.0, 0.0, 30.0, 56.0), (0.0, 100.0), 120.0, 3);
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(roll_enemy_loot(&guard, &mut a), roll_enemy_loot(&guard, &mut b));
        }
    }

    #[test]
    fn test_beasts_never_drop_weapons() {
        let rat = Enemy::new(EnemyKind::Rat, Rect::new(0.0, 0.0, 30.0, 44.0), (0.0, 100.0), 120.0, 2);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            assert!(
                roll_enemy_loot(&rat, &mut rng)
                    .iter()
                    .all(|d| !matches!(d.kind, LootKind::Weapon(_)))
            );
        }
    }

    #[test]
    fn test_drop_effects() {
        let mut p = player();
        LootKind::Gold.apply(&mut p);
        assert_eq!(p.gold, GOLD_VALUE);

        p.buffs.invisibility = 12.0;
        LootKind::Invisibility.apply(&mut p);
        assert_eq!(p.buffs.invisibility, 12.0);

        LootKind::Speed.apply(&mut p);
        assert_eq!(p.buffs.speed, 9.0);

        p.energy = 10.0;
        LootKind::EnergyOrb.apply(&mut p);
        assert_eq!(p.energy, 48.0);

        LootKind::Weapon(WeaponKind::Gun).apply(&mut p);
        assert_eq!(p.arsenal.current(), WeaponKind::Gun);
        assert_eq!(p.arsenal.ammo(WeaponKind::Gun), 18);
    }

    #[test]
    fn test_codes_items() {
        assert!(MissionItem::Keycard.grants_codes());
        assert!(MissionItem::EngineeringCodes.grants_codes());
        assert!(!MissionItem::TimeBomb.grants_codes());
    }
}
