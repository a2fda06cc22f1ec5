//! Box-versus-grid collision
//!
//! Actors are axis-aligned boxes in cell units. A box placed at `pos` covers
//! a half-open range of grid cells; the level answers "what is in there".

use serde::{Deserialize, Serialize};

use super::vector::Vector;

/// Static terrain classification of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Obstacle {
    Wall,
    Lava,
}

impl Obstacle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Obstacle::Wall => "wall",
            Obstacle::Lava => "lava",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "wall" => Some(Obstacle::Wall),
            "lava" => Some(Obstacle::Lava),
            _ => None,
        }
    }
}

/// Anything that can answer obstacle queries for a box.
///
/// Implemented by the full `Level` and by its static `Grid`, so actors can
/// be stepped against the grid while the actor list is borrowed mutably.
pub trait ObstacleMap {
    fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Obstacle>;
}

/// Cells a box would cover, as half-open ranges `[top, bottom)` x `[left, right)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub top: i64,
    pub bottom: i64,
    pub left: i64,
    pub right: i64,
}

impl CellRange {
    pub fn covering(pos: Vector, size: Vector) -> Self {
        Self {
            top: pos.y.floor() as i64,
            bottom: (pos.y + size.y).ceil() as i64,
            left: pos.x.floor() as i64,
            right: (pos.x + size.x).ceil() as i64,
        }
    }

    /// Boundary policy for a `width` x `height` level, checked before any
    /// cell is read: below the floor is lava, past the sides or above the
    /// ceiling is wall.
    pub fn boundary(&self, width: usize, height: usize) -> Option<Obstacle> {
        if self.bottom > height as i64 {
            Some(Obstacle::Lava)
        } else if self.left < 0 || self.right > width as i64 || self.top < 0 {
            Some(Obstacle::Wall)
        } else {
            None
        }
    }

    /// Row-major cell coordinates. Only meaningful once `boundary` is clear.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.top..self.bottom)
            .flat_map(move |y| (self.left..self.right).map(move |x| (x as usize, y as usize)))
    }
}
