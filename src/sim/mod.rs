//! Simulation core
//!
//! All gameplay logic lives here. Pure and synchronous:
//! - Elapsed time is supplied by the caller
//! - Coin phases come from a seeded RNG, never a global one
//! - Actor order is parse order and is kept stable
//! - No rendering, input or platform dependencies

pub mod actor;
pub mod collision;
pub mod entities;
pub mod level;
pub mod tick;
pub mod vector;

pub use actor::{Actor, ActorId, ActorKind, TYPE_ACTOR, TYPE_COIN, TYPE_FIREBALL, TYPE_PLAYER};
pub use collision::{CellRange, Obstacle, ObstacleMap};
pub use entities::{FireballKind, Spring};
pub use level::{DEFAULT_FINISH_DELAY, Grid, Level, Status};
pub use tick::{GameEvent, tick};
pub use vector::Vector;
