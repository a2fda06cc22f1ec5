//! A play session over an ordered list of level plans
//!
//! Winning a level loads the next one, losing restarts the current one, and
//! winning the last one completes the session.

use crate::error::{SimError, SimResult};
use crate::parser::{LevelParser, Plan};
use crate::settings::Settings;
use crate::sim::{GameEvent, Level, Status, tick};

/// Session-level transitions reported by [`Game::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Level `index` was won and the next one loaded
    Advanced { index: usize },
    /// Level `index` was lost and reloaded
    Restarted { index: usize },
    /// The last level was won
    Completed,
}

#[derive(Debug)]
pub struct Game {
    plans: Vec<Plan>,
    parser: LevelParser,
    settings: Settings,
    index: usize,
    level: Level,
    attempts: u32,
    complete: bool,
}

impl Game {
    pub fn new(plans: Vec<Plan>, mut parser: LevelParser, settings: Settings) -> SimResult<Self> {
        let first = plans.first().ok_or(SimError::EmptyLevelPack)?;
        // A level without rows has no player and could never be decided
        if let Some(index) = plans.iter().position(|plan| plan.is_empty()) {
            return Err(SimError::EmptyLevel { index });
        }
        let level = parser.parse(first);
        Ok(Self {
            plans,
            parser,
            settings,
            index: 0,
            level,
            attempts: 1,
            complete: false,
        })
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn level_index(&self) -> usize {
        self.index
    }

    pub fn level_count(&self) -> usize {
        self.plans.len()
    }

    /// Tries at the current level, counting the first
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run one frame. Returns the level's own events plus a session event
    /// when the current level finished this frame.
    pub fn step(&mut self, dt: f32) -> (Vec<GameEvent>, Option<SessionEvent>) {
        if self.complete {
            return (Vec::new(), None);
        }
        let events = tick(&mut self.level, dt, &self.settings);
        if !self.level.is_finished() {
            return (events, None);
        }

        let session = match self.level.status() {
            Some(Status::Won) if self.index + 1 == self.plans.len() => {
                log::info!("Level {} won, all levels complete", self.index);
                self.complete = true;
                SessionEvent::Completed
            }
            Some(Status::Won) => {
                log::info!("Level {} won", self.index);
                self.load(self.index + 1, 1);
                SessionEvent::Advanced { index: self.index }
            }
            Some(Status::Lost) | None => {
                log::info!("Level {} lost, restarting", self.index);
                self.load(self.index, self.attempts + 1);
                SessionEvent::Restarted { index: self.index }
            }
        };
        (events, Some(session))
    }

    /// Build level `index` before switching to it, so the session never
    /// points at one level while holding another.
    fn load(&mut self, index: usize, attempts: u32) {
        let level = self.parser.parse(&self.plans[index]);
        self.level = level;
        self.index = index;
        self.attempts = attempts;
    }
}
