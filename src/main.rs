//! Saboteur headless runner
//!
//! Loads optional settings and level JSON, then plays a scripted run at the
//! fixed timestep and logs how the mission went.
//!
//! Usage: `saboteur [settings.json] [level.json]`

use saboteur::consts::*;
use saboteur::settings::Settings;
use saboteur::sim::{
    GameEvent, GameState, JumpEnvelope, Level, MeleeStyle, MissionStatus, TickInput, tick,
};

/// Simulated wall-clock frame length, deliberately off the tick rate
const FRAME_DT: f32 = 1.0 / 45.0;
/// Frames to run before giving up on the script
const MAX_FRAMES: u32 = 45 * 120;

/// Scripted input for a given tick: run east, hop gaps, swing at whatever is near
fn scripted_input(tick_index: u64) -> TickInput {
    let jump = tick_index % 50 == 0;
    TickInput {
        right: true,
        jump,
        jump_held: tick_index % 50 < 12,
        fire: tick_index % 90 == 30,
        melee: (tick_index % 40 == 20).then_some(MeleeStyle::Punch),
        ..Default::default()
    }
}

struct Runner {
    state: GameState,
    accumulator: f32,
}

impl Runner {
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = scripted_input(self.state.time_ticks);
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.report_events();
        }
    }

    fn report_events(&self) {
        for event in &self.state.events {
            match event {
                GameEvent::EnemyDefeated { index, kind } => {
                    log::info!("Defeated {kind:?} #{index}");
                }
                GameEvent::PlayerHurt { .. } => {
                    log::debug!("Hurt, health {}", self.state.player.health);
                }
                other => log::debug!("{other:?}"),
            }
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let level = match args.next().map(Level::load) {
        Some(Ok(level)) => level,
        Some(Err(e)) => {
            log::warn!("{e}; using the stock compound");
            Level::compound()
        }
        None => Level::compound(),
    };
    log::info!("Saboteur (headless) starting, seed {:#x}", settings.seed);

    let envelope = JumpEnvelope::from_settings(&settings);
    if let Some(x) = level.farthest_reachable_x(&envelope) {
        log::info!("'{}' is traversable on foot to x={x:.0} of {:.0}", level.name, level.width);
    }

    let mut runner = Runner {
        state: GameState::new(level, settings),
        accumulator: 0.0,
    };

    for frame in 0..MAX_FRAMES {
        runner.update(FRAME_DT);
        if frame % 45 == 0 {
            let p = &runner.state.player;
            log::info!(
                "t={:.0}s pos=({:.0}, {:.0}) hp={} lvl={} xp={} gold={} weapon={} enemies left={}",
                runner.state.time_alive,
                p.actor.rect.x,
                p.actor.rect.y,
                p.health,
                p.progression.level,
                p.progression.xp,
                p.gold,
                p.arsenal.current().name(),
                runner.state.living_enemies().count()
            );
        }
        if runner.state.is_over() {
            break;
        }
    }

    let state = &runner.state;
    let defeated = state.enemies.len() - state.living_enemies().count();
    match state.status() {
        MissionStatus::InProgress => log::info!("Script finished with the mission still running"),
        MissionStatus::Won => log::info!("Mission won"),
        MissionStatus::Failed(cause) => log::info!("Mission failed: {cause:?}"),
    }
    log::info!(
        "{} ticks, {defeated}/{} enemies defeated, bomb {:?} with {:.0}s left",
        state.time_ticks,
        state.enemies.len(),
        state.bomb_phase(),
        state.bomb().seconds_left()
    );
}
