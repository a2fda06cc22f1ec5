//! Lava Runner headless demo
//!
//! Plays a level pack with a naive autopilot and logs what happens.
//!
//! Usage: `lava-runner [PACK.json] [SETTINGS.json]`
//! Without arguments the stock levels and default settings are used.
//! Set `RUST_LOG=debug` for per-level detail.

use lava_runner::sim::{GameEvent, Level, Obstacle, ObstacleMap, Vector};
use lava_runner::{
    ActorRegistry, Game, LevelParser, SessionEvent, Settings, SimError, SimResult, levels,
};

/// Autopilot walking speed (cells per second)
const AUTOPILOT_SPEED: f32 = 7.0;

fn main() {
    env_logger::init();
    log::info!("Lava Runner (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> SimResult<()> {
    let mut args = std::env::args().skip(1);
    let pack = match args.next() {
        Some(path) => levels::from_json(&read(&path)?)?,
        None => levels::builtin(),
    };
    let settings = match args.next() {
        Some(path) => Settings::from_json(&read(&path)?)?,
        None => Settings::default(),
    };

    let parser = LevelParser::from_settings(ActorRegistry::standard(), &settings);
    let mut game = Game::new(pack, parser, settings)?;
    let frame_budget = game.settings().frames_per_level as usize * game.level_count();
    let dt = game.settings().frame_time;

    for _ in 0..frame_budget {
        steer_player(game.level_mut(), dt);
        let (events, session) = game.step(dt);
        for event in events {
            match event {
                GameEvent::LevelDecided(status) => {
                    log::info!("level {} {}", game.level_index(), status.as_str())
                }
                event => log::debug!("level {}: {:?}", game.level_index(), event),
            }
        }
        match session {
            Some(SessionEvent::Completed) => {
                println!("All {} levels complete!", game.level_count());
                return Ok(());
            }
            Some(event) => log::info!("{event:?}"),
            None => {}
        }
    }

    println!(
        "Stopped at level {} of {} after {} attempts",
        game.level_index() + 1,
        game.level_count(),
        game.attempts()
    );
    let level = game.level();
    let status = level.status().map_or("undecided", |status| status.as_str());
    log::info!(
        "level {} is {}x{} and {}",
        game.level_index(),
        level.grid().width(),
        level.grid().height(),
        status
    );
    if let Ok(snapshot) = serde_json::to_string(level) {
        log::debug!("final state: {snapshot}");
    }
    Ok(())
}

fn read(path: &str) -> SimResult<String> {
    std::fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.into(),
        source,
    })
}

/// Stand-in for the input layer: head straight for the nearest coin,
/// refusing to step into walls.
fn steer_player(level: &mut Level, dt: f32) {
    let Some(player) = level.player() else {
        return;
    };
    let target = level
        .actors()
        .iter()
        .filter(|a| a.type_name() == "coin")
        .map(|a| a.pos)
        .min_by(|a, b| {
            distance(player.pos, *a)
                .partial_cmp(&distance(player.pos, *b))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    let Some(target) = target else {
        return;
    };

    let delta = glam::Vec2::from(target.plus(player.pos.times(-1.0)));
    let speed = Vector::from(delta.normalize_or_zero() * AUTOPILOT_SPEED);
    let next = player.pos.plus(speed.times(dt));
    let blocked = level.obstacle_at(next, player.size) == Some(Obstacle::Wall);

    if let Some(player) = level.player_mut() {
        player.speed = speed;
        if !blocked {
            player.pos = next;
        }
    }
}

fn distance(a: Vector, b: Vector) -> f32 {
    glam::Vec2::from(a).distance(glam::Vec2::from(b))
}
