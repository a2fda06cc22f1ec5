//! One frame of the level driver
//!
//! Moving the player is the input layer's job (it writes `speed`/`pos`
//! through `Level::player_mut`). Everything else a frame needs happens here.

use super::actor::TYPE_FIREBALL;
use super::collision::{Obstacle, ObstacleMap};
use super::level::{Level, Status};
use crate::settings::Settings;

/// What the player ran into this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    TouchedLava,
    TouchedFireball,
    CoinCollected,
    LevelDecided(Status),
}

/// Advance `level` by one frame of `dt` seconds.
///
/// Every actor acts (also during the finish delay, so death animations keep
/// running), then the player's box is checked against terrain and the other
/// actors, and finally the finish delay counts down if the level is decided.
pub fn tick(level: &mut Level, dt: f32, settings: &Settings) -> Vec<GameEvent> {
    let step = settings.clamp_step(dt);
    let mut events = Vec::new();

    let (grid, actors) = level.parts_mut();
    for actor in actors.iter_mut() {
        actor.act(step, grid);
    }

    let was_decided = level.status().is_some();
    resolve_player_contacts(level, &mut events);
    if !was_decided {
        if let Some(status) = level.status() {
            events.push(GameEvent::LevelDecided(status));
        }
    }

    level.advance_finish_delay(step);
    events
}

fn resolve_player_contacts(level: &mut Level, events: &mut Vec<GameEvent>) {
    if level.status().is_some() {
        return;
    }
    let Some(player) = level.player() else {
        return;
    };

    if level.obstacle_at(player.pos, player.size) == Some(Obstacle::Lava) {
        level.player_touched(Obstacle::Lava.as_str(), None);
        events.push(GameEvent::TouchedLava);
        return;
    }

    let Some((type_name, id)) = level
        .actor_at(player)
        .map(|other| (other.type_name(), other.id()))
    else {
        return;
    };
    let actors_before = level.actors().len();
    level.player_touched(type_name, Some(id));
    if type_name == TYPE_FIREBALL {
        events.push(GameEvent::TouchedFireball);
    } else if level.actors().len() < actors_before {
        events.push(GameEvent::CoinCollected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ActorRegistry, LevelParser};
    use crate::sim::Vector;

    fn parse(plan: &[&str]) -> Level {
        LevelParser::with_seed(ActorRegistry::standard(), 1)
            .parse(plan)
    }

    #[test]
    fn test_idle_player_on_safe_ground() {
        let settings = Settings::default();
        let mut level = parse(&["     ", "@  o ", "xxxxx"]);
        let events = tick(&mut level, 0.016, &settings);
        assert!(events.is_empty());
        assert_eq!(level.status(), None);
    }

    #[test]
    fn test_lava_loses() {
        let settings = Settings::default();
        let mut level = parse(&["   ", "@ o", "!xx"]);
        level.player_mut().unwrap().pos = Vector::new(0.0, 1.0);
        let events = tick(&mut level, 0.016, &settings);
        assert_eq!(
            events,
            [GameEvent::TouchedLava, GameEvent::LevelDecided(Status::Lost)]
        );
        assert_eq!(level.status(), Some(Status::Lost));
    }

    #[test]
    fn test_collecting_last_coin_wins() {
        let settings = Settings::default();
        let mut level = parse(&["    ", "@o  ", "xxxx"]);
        level.player_mut().unwrap().pos = Vector::new(0.8, 0.5);
        let events = tick(&mut level, 0.016, &settings);
        assert_eq!(
            events,
            [GameEvent::CoinCollected, GameEvent::LevelDecided(Status::Won)]
        );
        assert!(level.no_more_actors("coin"));
    }

    #[test]
    fn test_fireball_hits_player() {
        let settings = Settings::default();
        let mut level = parse(&["  =x", "@  o", "xxxx"]);
        level.player_mut().unwrap().pos = Vector::new(1.5, 0.0);
        let events = tick(&mut level, 0.05, &settings);
        assert_eq!(
            events,
            [GameEvent::TouchedFireball, GameEvent::LevelDecided(Status::Lost)]
        );
    }

    #[test]
    fn test_finish_delay_runs_out() {
        let settings = Settings::default();
        let mut level = parse(&["   ", "@ o", "!xx"]);
        level.player_mut().unwrap().pos = Vector::new(0.0, 1.0);

        let mut frames = 0;
        while !level.is_finished() {
            tick(&mut level, 1.0, &settings);
            frames += 1;
            assert!(frames < 100, "level never finished");
        }
        // 1.0 second of grace at 0.05 per clamped frame
        assert!(frames >= 20);
        assert_eq!(level.status(), Some(Status::Lost));
    }

    #[test]
    fn test_decided_level_still_animates() {
        let settings = Settings::default();
        let mut level = parse(&["=   ", "@  o", "!xxx"]);
        level.player_touched("lava", None);
        let before = level.actors()[0].pos;
        let events = tick(&mut level, 0.05, &settings);
        assert!(events.is_empty());
        assert_ne!(level.actors()[0].pos, before);
    }
}
