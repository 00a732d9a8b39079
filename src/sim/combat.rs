//! Player attacks, projectiles, the grappling hook and enemy aggression
//!
//! Each step here is one stage of the tick and works on the whole
//! `GameState`, recording what happened in `state.events`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::Facing;
use super::items::roll_enemy_loot;
use super::rect::Rect;
use super::state::{GameEvent, GameState};

/// Shuriken thrown when the current weapon cannot fire
const SHURIKEN_SPEED: f32 = 700.0;
const SHURIKEN_TTL: f32 = 1.1;
const ENEMY_SHOT_TTL: f32 = 1.1;
/// Enemies only shoot at a player roughly on their floor
const SAME_FLOOR_DY: f32 = 56.0;
/// Knockback never pushes the player left of this x
const KNOCKBACK_MIN_X: f32 = 40.0;
const FLYING_KICK_LIFT: f32 = -350.0;
const GRAPPLE_LINE_TTL: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeleeStyle {
    Punch,
    Kick,
    FlyingKick,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeleeProfile {
    pub width: f32,
    pub height: f32,
    pub ttl: f32,
    pub damage: u32,
}

impl MeleeStyle {
    pub fn profile(self) -> MeleeProfile {
        let (width, height, ttl, damage) = match self {
            MeleeStyle::Punch => (40.0, 24.0, 0.18, 1),
            MeleeStyle::Kick => (54.0, 24.0, 0.20, 2),
            MeleeStyle::FlyingKick => (68.0, 28.0, 0.24, 3),
        };
        MeleeProfile {
            width,
            height,
            ttl,
            damage,
        }
    }
}

/// Live melee hitbox; follows the player until it expires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackWindow {
    pub rect: Rect,
    pub ttl: f32,
    pub damage: i32,
    /// Roster indices already hit, when single-hit windows are enabled
    #[serde(default)]
    pub struck: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileSource {
    Player,
    Enemy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
    pub vx: f32,
    pub ttl: f32,
    pub source: ProjectileSource,
}

/// Grappling line kept around briefly for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrappleLine {
    pub start: Vec2,
    pub end: Vec2,
    pub ttl: f32,
}

/// Left edge of a hitbox `width` wide, flush against the facing side
fn hitbox_x(player: &Rect, facing: Facing, width: f32) -> f32 {
    match facing {
        Facing::Right => player.right(),
        Facing::Left => player.left() - width,
    }
}

pub fn start_melee(state: &mut GameState, style: MeleeStyle) {
    if state.melee_cooldown > 0.0 {
        return;
    }
    let profile = style.profile();
    let weapon = state.player.arsenal.current().stats();
    let player = &mut state.player;
    if !player.spend_energy(weapon.energy) {
        return;
    }
    if style == MeleeStyle::FlyingKick && player.actor.on_ground {
        player.actor.vy = FLYING_KICK_LIFT;
    }

    let level_bonus = (player.progression.level - 1) / 2;
    let damage = ((profile.damage + level_bonus) as f32 * weapon.melee).floor() as i32;
    let r = player.actor.rect;
    state.attack = Some(AttackWindow {
        rect: Rect::new(
            hitbox_x(&r, player.facing, profile.width),
            r.y + 20.0,
            profile.width,
            profile.height,
        ),
        ttl: profile.ttl,
        damage,
        struck: Vec::new(),
    });
    state.melee_cooldown = state.settings.combat.melee_cooldown;
}

/// Fire the current weapon, or throw a shuriken if it has no ranged mode
pub fn fire(state: &mut GameState) {
    let weapon = state.player.arsenal.current();
    let stats = weapon.stats();
    let player = &mut state.player;
    let r = player.actor.rect;
    let sign = player.facing.sign();

    if !weapon.is_ranged() {
        if player.shots == 0 || !player.spend_energy(state.settings.combat.shuriken_energy) {
            return;
        }
        player.shots -= 1;
        state.projectiles.push(Projectile {
            rect: Rect::new(r.x + r.w / 2.0, r.y + 24.0, 12.0, 12.0),
            vx: SHURIKEN_SPEED * sign,
            ttl: SHURIKEN_TTL,
            source: ProjectileSource::Player,
        });
        return;
    }

    if state.ranged_cooldown > 0.0
        || player.arsenal.ammo(weapon) == 0
        || player.energy < stats.energy
    {
        return;
    }
    player.arsenal.spend_round();
    player.spend_energy(stats.energy);
    let (speed, ttl) = weapon.projectile();
    state.projectiles.push(Projectile {
        rect: Rect::new(r.x + r.w / 2.0, r.y + 20.0, 10.0, 10.0),
        vx: speed * sign,
        ttl,
        source: ProjectileSource::Player,
    });
    state.ranged_cooldown = stats.fire_cooldown;
}

/// Throw the grappling hook towards the nearest solid corner ahead and above
pub fn grapple(state: &mut GameState) {
    if !state.player.spend_energy(state.settings.combat.grapple_energy) {
        return;
    }
    let r = state.player.actor.rect;
    let start = Vec2::new(r.x + r.w / 2.0, r.y + 16.0);
    let range = state.player.progression.grapple_range();
    let facing = state.player.facing;

    let mut anchor: Option<Vec2> = None;
    for solid in state.physics.solids() {
        if solid.top() >= start.y {
            continue;
        }
        let ahead = match facing {
            Facing::Right => solid.left() >= start.x,
            Facing::Left => solid.right() <= start.x,
        };
        if !ahead {
            continue;
        }
        let corner = match facing {
            Facing::Right => Vec2::new(solid.left(), solid.top()),
            Facing::Left => Vec2::new(solid.right(), solid.top()),
        };
        if corner.distance_squared(start) <= range * range
            && anchor.is_none_or(|a| (corner.x - start.x).abs() < (a.x - start.x).abs())
        {
            anchor = Some(corner);
        }
    }

    let end = anchor.unwrap_or_else(|| {
        Vec2::new(start.x + facing.sign() * range, start.y - (range * 0.55).min(210.0))
    });
    state.grapple = Some(GrappleLine {
        start,
        end,
        ttl: GRAPPLE_LINE_TTL,
    });

    let pull = end - start;
    let actor = &mut state.player.actor;
    actor.vx = (pull.x * 2.4).clamp(-520.0, 520.0);
    actor.vy = (pull.y * 2.0).clamp(-760.0, -220.0);
}

/// Age the melee window, keep it on the player and apply its damage
pub fn update_attack(state: &mut GameState, dt: f32) {
    let r = state.player.actor.rect;
    let facing = state.player.facing;
    let Some(attack) = state.attack.as_mut() else {
        return;
    };
    attack.ttl -= dt;
    attack.rect.x = hitbox_x(&r, facing, attack.rect.w);
    attack.rect.y = r.y + 20.0;
    if attack.ttl <= 0.0 {
        state.attack = None;
        return;
    }

    let window = attack.rect;
    let damage = attack.damage;
    let hits_once = state.settings.combat.melee_hits_once;
    for index in 0..state.enemies.len() {
        let enemy = &state.enemies[index];
        if !enemy.alive || !window.intersects(&enemy.actor.rect) {
            continue;
        }
        if hits_once {
            let Some(attack) = state.attack.as_mut() else {
                return;
            };
            if attack.struck.contains(&index) {
                continue;
            }
            attack.struck.push(index);
        }
        strike_enemy(state, index, damage);
    }
}

/// Move projectiles and resolve what they hit
pub fn update_projectiles(state: &mut GameState, dt: f32) {
    let mut projectiles = std::mem::take(&mut state.projectiles);
    projectiles.retain_mut(|p| {
        p.rect.x += p.vx * dt;
        p.ttl -= dt;
        if p.ttl <= 0.0 || state.physics.hits_solid(&p.rect) {
            return false;
        }
        match p.source {
            ProjectileSource::Player => {
                let target = state
                    .enemies
                    .iter()
                    .position(|e| e.alive && p.rect.intersects(&e.actor.rect));
                if let Some(index) = target {
                    strike_enemy(state, index, 1);
                    return false;
                }
            }
            ProjectileSource::Enemy => {
                if p.rect.intersects(&state.player.actor.rect) {
                    if state.player.hurt(1) {
                        state.events.push(GameEvent::PlayerHurt {
                            pos: p.rect.center(),
                        });
                    }
                    return false;
                }
            }
        }
        true
    });
    state.projectiles = projectiles;
}

/// Contact damage and enemy fire
pub fn enemy_logic(state: &mut GameState) {
    let knockback = state.settings.combat.contact_knockback;
    for index in 0..state.enemies.len() {
        let enemy = &state.enemies[index];
        if !enemy.alive {
            continue;
        }
        let er = enemy.actor.rect;
        let kind = enemy.kind;
        let ready = enemy.attack_cooldown <= 0.0;

        let pr = state.player.actor.rect;
        if pr.intersects(&er) && state.player.hurt(1) {
            state.events.push(GameEvent::PlayerHurt {
                pos: Vec2::new(pr.x + pr.w / 2.0, pr.y + 32.0),
            });
            state.player.actor.rect.x = (pr.x - knockback).max(KNOCKBACK_MIN_X);
        }

        let profile = kind.profile();
        let Some(shot_speed) = profile.shot_speed else {
            continue;
        };
        let pr = state.player.actor.rect;
        let player = &state.player;
        let dist = (er.center().x - pr.center().x).abs();
        let sees = !player.buffs.invisible() && !player.hidden && dist < profile.sight;
        let same_floor = (er.y - pr.y).abs() < SAME_FLOOR_DY;
        if sees && same_floor && ready {
            let sign = if pr.x < er.x { -1.0 } else { 1.0 };
            state.projectiles.push(Projectile {
                rect: Rect::new(er.x + er.w / 2.0, er.y + 18.0, 12.0, 12.0),
                vx: shot_speed * sign,
                ttl: ENEMY_SHOT_TTL,
                source: ProjectileSource::Enemy,
            });
            state.enemies[index].attack_cooldown = profile.attack_cooldown;
        }
    }
}

/// Damage one enemy; runs the defeat side effects on the defeating hit only
fn strike_enemy(state: &mut GameState, index: usize, damage: i32) {
    let enemy = &mut state.enemies[index];
    let r = enemy.actor.rect;
    let defeated = enemy.apply_damage(damage);
    state.events.push(GameEvent::EnemyHit {
        index,
        pos: Vec2::new(r.x + r.w / 2.0, r.y + 24.0),
    });
    if defeated {
        on_enemy_defeated(state, index);
    }
}

fn on_enemy_defeated(state: &mut GameState, index: usize) {
    let enemy = &state.enemies[index];
    let kind = enemy.kind;
    let drops = roll_enemy_loot(enemy, &mut state.rng);
    log::debug!("{kind:?} #{index} defeated, {} drops", drops.len());
    state.loot.extend(drops);
    state.events.push(GameEvent::EnemyDefeated { index, kind });

    let progression = &mut state.player.progression;
    if progression.award(kind.profile().xp) > 0 {
        state.events.push(GameEvent::LevelUp(progression.level));
    }
}
