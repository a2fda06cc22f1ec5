//! Lava Runner - simulation core of a tile-based platformer
//!
//! Core modules:
//! - `sim`: Vectors, actors, level grid collision, win/lose state
//! - `parser`: Text plan → level, via a symbol registry
//! - `levels`: Stock plans and JSON level packs
//! - `game`: Session over a sequence of levels
//! - `settings`: Tunables

pub mod error;
pub mod game;
pub mod levels;
pub mod parser;
pub mod settings;
pub mod sim;

pub use error::{SimError, SimResult};
pub use game::{Game, SessionEvent};
pub use parser::{ActorRegistry, LevelParser, Plan};
pub use settings::Settings;

/// Simulation constants
pub mod consts {
    /// Nominal frame time (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Largest step a single tick will simulate
    pub const DEFAULT_MAX_STEP: f32 = 0.05;
    /// Coin phase seed when none is configured
    pub const DEFAULT_COIN_SEED: u64 = 0x5eed;
}
