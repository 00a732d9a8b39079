//! Weapon data table and the player's arsenal

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Every weapon in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Fists,
    Bat,
    Stick,
    Brick,
    Pole,
    Nunchakus,
    Sais,
    Sword,
    Gun,
    MachineGun,
    Silencer,
}

/// Static per-weapon numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponStats {
    /// Melee damage multiplier
    pub melee: f32,
    /// Ranged multiplier; 0 means the weapon cannot fire
    pub ranged: f32,
    /// Energy spent per swing or shot
    pub energy: f32,
    /// Ammo granted by a weapon cache
    pub ammo: u32,
    /// Seconds between shots
    pub fire_cooldown: f32,
}

#[rustfmt::skip]
static WEAPON_TABLE: [WeaponStats; 11] = [
    WeaponStats { melee: 1.0,  ranged: 0.0, energy: 4.0, ammo: 0,  fire_cooldown: 0.0 },  // Fists
    WeaponStats { melee: 1.4,  ranged: 0.0, energy: 5.0, ammo: 0,  fire_cooldown: 0.0 },  // Bat
    WeaponStats { melee: 1.2,  ranged: 0.0, energy: 4.5, ammo: 0,  fire_cooldown: 0.0 },  // Stick
    WeaponStats { melee: 1.3,  ranged: 0.0, energy: 5.0, ammo: 0,  fire_cooldown: 0.0 },  // Brick
    WeaponStats { melee: 1.35, ranged: 0.0, energy: 5.5, ammo: 0,  fire_cooldown: 0.0 },  // Pole
    WeaponStats { melee: 1.6,  ranged: 0.0, energy: 6.5, ammo: 0,  fire_cooldown: 0.0 },  // Nunchakus
    WeaponStats { melee: 1.55, ranged: 0.0, energy: 6.0, ammo: 0,  fire_cooldown: 0.0 },  // Sais
    WeaponStats { melee: 1.85, ranged: 0.0, energy: 7.0, ammo: 0,  fire_cooldown: 0.0 },  // Sword
    WeaponStats { melee: 1.0,  ranged: 1.0, energy: 2.0, ammo: 30, fire_cooldown: 0.34 }, // Gun
    WeaponStats { melee: 0.9,  ranged: 0.8, energy: 2.8, ammo: 70, fire_cooldown: 0.13 }, // MachineGun
    WeaponStats { melee: 1.0,  ranged: 1.2, energy: 1.8, ammo: 28, fire_cooldown: 0.28 }, // Silencer
];

impl WeaponKind {
    pub const ALL: [WeaponKind; 11] = [
        WeaponKind::Fists,
        WeaponKind::Bat,
        WeaponKind::Stick,
        WeaponKind::Brick,
        WeaponKind::Pole,
        WeaponKind::Nunchakus,
        WeaponKind::Sais,
        WeaponKind::Sword,
        WeaponKind::Gun,
        WeaponKind::MachineGun,
        WeaponKind::Silencer,
    ];

    /// Weapons enemies can drop
    pub const DROPPABLE: [WeaponKind; 9] = [
        WeaponKind::Stick,
        WeaponKind::Brick,
        WeaponKind::Pole,
        WeaponKind::Nunchakus,
        WeaponKind::Sais,
        WeaponKind::Sword,
        WeaponKind::Gun,
        WeaponKind::MachineGun,
        WeaponKind::Silencer,
    ];

    pub fn stats(self) -> &'static WeaponStats {
        &WEAPON_TABLE[self as usize]
    }

    pub fn is_ranged(self) -> bool {
        self.stats().ranged > 0.0
    }

    /// Projectile speed (px/s) and lifetime (s) for ranged weapons
    pub fn projectile(self) -> (f32, f32) {
        match self {
            WeaponKind::MachineGun => (760.0, 1.0),
            _ => (700.0, 1.2),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WeaponKind::Fists => "fists",
            WeaponKind::Bat => "bat",
            WeaponKind::Stick => "stick",
            WeaponKind::Brick => "brick",
            WeaponKind::Pole => "pole",
            WeaponKind::Nunchakus => "nunchakus",
            WeaponKind::Sais => "sais",
            WeaponKind::Sword => "sword",
            WeaponKind::Gun => "gun",
            WeaponKind::MachineGun => "machine_gun",
            WeaponKind::Silencer => "silencer",
        }
    }
}

/// Weapons the player owns, the one in hand, and ammo for ranged ones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arsenal {
    owned: BTreeSet<WeaponKind>,
    current: WeaponKind,
    ammo: BTreeMap<WeaponKind, u32>,
}

impl Default for Arsenal {
    fn default() -> Self {
        Self {
            owned: [WeaponKind::Fists, WeaponKind::Bat].into_iter().collect(),
            current: WeaponKind::Bat,
            ammo: BTreeMap::new(),
        }
    }
}

/// Ammo added by a weapon dropped from an enemy
pub const DROP_AMMO: u32 = 18;

impl Arsenal {
    pub fn current(&self) -> WeaponKind {
        self.current
    }

    pub fn owns(&self, weapon: WeaponKind) -> bool {
        self.owned.contains(&weapon)
    }

    pub fn owned(&self) -> impl Iterator<Item = WeaponKind> + '_ {
        self.owned.iter().copied()
    }

    pub fn ammo(&self, weapon: WeaponKind) -> u32 {
        self.ammo.get(&weapon).copied().unwrap_or(0)
    }

    /// Switch to the next owned weapon in alphabetical order of names,
    /// wrapping around
    pub fn cycle(&mut self) {
        let mut order: Vec<WeaponKind> = self.owned.iter().copied().collect();
        order.sort_by_key(|w| w.name());
        let next = match order.iter().position(|&w| w == self.current) {
            Some(pos) => order.get((pos + 1) % order.len()),
            None => order.first(),
        };
        if let Some(&next) = next {
            self.current = next;
        }
    }

    /// Weapon cache: tops ammo up to the weapon's capacity and equips it
    pub fn take_cache(&mut self, weapon: WeaponKind) {
        self.owned.insert(weapon);
        if weapon.is_ranged() {
            let entry = self.ammo.entry(weapon).or_insert(0);
            *entry = (*entry).max(weapon.stats().ammo);
        }
        self.current = weapon;
    }

    /// Enemy drop: adds a fixed amount of ammo and equips it
    pub fn take_drop(&mut self, weapon: WeaponKind) {
        self.owned.insert(weapon);
        if weapon.is_ranged() {
            *self.ammo.entry(weapon).or_insert(0) += DROP_AMMO;
        }
        self.current = weapon;
    }

    /// Spend one round of the current weapon. False if empty.
    pub fn spend_round(&mut self) -> bool {
        match self.ammo.get_mut(&self.current) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }
}
