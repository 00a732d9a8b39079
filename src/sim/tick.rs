//! Fixed timestep simulation tick
//!
//! Advances the mission by one step in a fixed stage order: actions, timers,
//! player movement, movers, enemies, combat, drops and pickups, bomb, end
//! state.

use super::actor::Facing;
use super::bomb::BombPhase;
use super::combat::{self, MeleeStyle};
use super::items::MissionItem;
use super::level::Level;
use super::physics::MoveIntent;
use super::progression::meditate_recovery_per_sec;
use super::rect::{Rect, overlaps_any};
use super::state::{FailureCause, GameEvent, GameState, MissionStatus};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Climb up
    pub up: bool,
    /// Climb down, hide in bushes, or drop through with jump
    pub down: bool,
    /// Move at walking pace
    pub walk: bool,
    /// Jump pressed this tick
    pub jump: bool,
    /// Jump key held down
    pub jump_held: bool,
    pub fire: bool,
    pub cycle_weapon: bool,
    pub grapple: bool,
    pub melee: Option<MeleeStyle>,
    /// Use the terminal or the silo console
    pub interact: bool,
    pub meditate: bool,
    /// Start over once the mission has ended
    pub restart: bool,
}

/// Advance the game state by one step
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    // Nothing moves once the mission is decided
    if state.is_over() {
        if input.restart {
            state.reset();
        }
        return;
    }

    let dt = state.settings.clamp_dt(dt);
    let bomb_before = state.bomb_phase();

    apply_actions(state, input);
    update_timers(state, dt);
    move_player(state, input, dt);

    if let Some(train) = state.train.as_mut() {
        train.update(dt, &mut state.player.actor);
    }
    for elevator in &mut state.elevators {
        elevator.update(dt, &mut state.player.actor);
    }
    for enemy in &mut state.enemies {
        enemy.update(dt, &state.physics);
    }

    combat::update_attack(state, dt);
    combat::update_projectiles(state, dt);
    combat::enemy_logic(state);

    for loot in &mut state.loot {
        loot.ttl -= dt;
    }
    state.loot.retain(|l| l.ttl > 0.0);
    collect_loot(state);
    collect_pickups(state);

    state.rules.tick(dt);
    update_status(state);
    record_bomb_transition(state, bomb_before);

    state.time_alive += dt;
    state.time_ticks += 1;
}

/// One-shot inputs: jumps, attacks, weapon swaps and console use
fn apply_actions(state: &mut GameState, input: &TickInput) {
    let tuning = &state.settings.player;
    let actor = &mut state.player.actor;
    if input.jump && input.down && actor.on_ground {
        state.drop_through_timer = tuning.drop_through_window;
        actor.rect.y += tuning.drop_nudge;
    } else if input.jump && actor.can_jump() {
        let scale = if actor.in_water {
            tuning.water_jump_scale
        } else {
            1.0
        };
        actor.vy = tuning.jump_velocity * scale;
    }

    if input.fire {
        combat::fire(state);
    }
    if input.cycle_weapon {
        state.player.arsenal.cycle();
    }
    if input.grapple {
        combat::grapple(state);
    }
    if let Some(style) = input.melee {
        combat::start_melee(state, style);
    }
    if input.interact {
        interact(state);
    }
}

fn interact(state: &mut GameState) {
    let r = state.player.actor.rect;
    if r.intersects(&state.level.terminal) {
        state.rules.defuse();
    }
    let player = &state.player;
    if r.intersects(&state.level.silo_console)
        && player.has_bomb
        && player.has_codes
        && !state.silo_sabotaged
    {
        state.silo_sabotaged = true;
        state.events.push(GameEvent::SiloSabotaged);
        log::info!("Silo sabotaged");
    }
}

fn update_timers(state: &mut GameState, dt: f32) {
    state.drop_through_timer = (state.drop_through_timer - dt).max(0.0);
    state.melee_cooldown = (state.melee_cooldown - dt).max(0.0);
    state.ranged_cooldown = (state.ranged_cooldown - dt).max(0.0);
    state.player.buffs.tick(dt);
    if let Some(line) = state.grapple.as_mut() {
        line.ttl -= dt;
        if line.ttl <= 0.0 {
            state.grapple = None;
        }
    }
}

fn move_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let tuning = &state.settings.player;
    let player = &mut state.player;

    let mut speed = tuning.run_speed * player.progression.speed_scale(tuning.level_speed_bonus);
    if player.buffs.fast() {
        speed *= tuning.speed_boost;
    }
    if player.actor.in_water {
        speed *= tuning.water_move_scale;
    }
    if input.walk {
        speed *= tuning.walk_scale;
    }

    player.actor.vx = 0.0;
    if input.left {
        player.actor.vx = -speed;
        player.facing = Facing::Left;
    }
    if input.right {
        player.actor.vx = speed;
        player.facing = Facing::Right;
    }

    let climb_dir = if input.down {
        1
    } else if input.up {
        -1
    } else {
        0
    };
    let drop_down = state.drop_through_timer > 0.0 || (input.down && input.jump_held);

    player.hidden = input.down && overlaps_any(&state.level.bushes, &player.actor.rect);
    let actor = &player.actor;
    player.meditating =
        input.meditate && actor.on_ground && actor.vx.abs() < 8.0 && actor.vy.abs() < 18.0;
    let regen = if player.meditating {
        meditate_recovery_per_sec(player.progression.level)
    } else {
        tuning.energy_regen
    };
    player.restore_energy(regen * dt);

    state
        .physics
        .move_actor(&mut player.actor, dt, MoveIntent { drop_down, climb_dir });
    clamp_to_world(&mut player.actor.rect, &state.level);
}

fn clamp_to_world(rect: &mut Rect, level: &Level) {
    rect.x = rect.x.clamp(0.0, (level.width - rect.w).max(0.0));
    rect.y = rect.y.clamp(level.ceiling, (level.height - rect.h).max(level.ceiling));
}

fn collect_pickups(state: &mut GameState) {
    let r = state.player.actor.rect;
    for pickup in &mut state.pickups {
        if pickup.taken || !r.intersects(&pickup.rect) {
            continue;
        }
        pickup.taken = true;
        match pickup.item {
            MissionItem::TimeBomb => state.rules.collect_bomb(&mut state.player),
            item if item.grants_codes() => state.rules.collect_codes(&mut state.player),
            _ => {}
        }
        log::info!("Collected {:?}", pickup.item);
        state.events.push(GameEvent::ItemCollected(pickup.item));
    }

    for cache in &mut state.weapon_caches {
        if cache.taken || !r.intersects(&cache.rect) {
            continue;
        }
        cache.taken = true;
        state.player.arsenal.take_cache(cache.weapon);
        state.events.push(GameEvent::WeaponCollected(cache.weapon));
    }
}

fn collect_loot(state: &mut GameState) {
    let r = state.player.actor.rect;
    let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.loot)
        .into_iter()
        .partition(|l| r.intersects(&l.rect));
    state.loot = kept;
    for loot in taken {
        loot.kind.apply(&mut state.player);
        state.events.push(GameEvent::LootCollected(loot.kind));
    }
}

fn update_status(state: &mut GameState) {
    let cause = if state.player.is_dead() {
        Some(FailureCause::PlayerKilled)
    } else if state.rules.bomb_exploded() {
        Some(FailureCause::BombExploded)
    } else {
        None
    };
    if let Some(cause) = cause {
        log::warn!("Mission failed: {cause:?}");
        state.status = MissionStatus::Failed(cause);
        state.events.push(GameEvent::MissionFailed(cause));
        return;
    }

    let r = state.player.actor.rect;
    let all_collected = state.all_mission_items_collected();
    if all_collected && r.intersects(&state.level.terminal) {
        state.rules.defuse();
    }

    let at_extraction =
        r.intersects(&state.level.helicopter) || r.intersects(&state.level.helipad);
    if at_extraction
        && all_collected
        && state.silo_sabotaged
        && state.rules.can_escape(&state.player)
    {
        log::info!("Mission complete after {:.1}s", state.time_alive);
        state.status = MissionStatus::Won;
        state.events.push(GameEvent::MissionWon);
    }
}

fn record_bomb_transition(state: &mut GameState, before: BombPhase) {
    let after = state.bomb_phase();
    if before == after {
        return;
    }
    if before == BombPhase::Dormant {
        state.events.push(GameEvent::BombArmed);
    }
    match after {
        BombPhase::Defused => state.events.push(GameEvent::BombDefused),
        BombPhase::Exploded => state.events.push(GameEvent::BombExploded),
        BombPhase::Dormant | BombPhase::Armed => {}
    }
}
