//! Level state: static obstacle grid, live actors, and the win/lose outcome

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, TYPE_COIN, TYPE_FIREBALL, TYPE_PLAYER};
use super::collision::{CellRange, Obstacle, ObstacleMap};
use super::vector::Vector;
use crate::error::SimResult;

/// Default grace period after the outcome is decided
pub const DEFAULT_FINISH_DELAY: f32 = 1.0;

/// Terminal outcome of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Won,
    Lost,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Won => "won",
            Status::Lost => "lost",
        }
    }
}

/// Obstacle markers indexed `[row][col]`. Rows may have different lengths;
/// `width` is the longest one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<Option<Obstacle>>>,
    width: usize,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Option<Obstacle>>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Option<Obstacle>>] {
        &self.rows
    }

    /// Marker at a cell. Cells past the end of a short row are empty.
    pub fn cell(&self, x: usize, y: usize) -> Option<Obstacle> {
        self.rows.get(y).and_then(|row| row.get(x)).copied().flatten()
    }
}

impl ObstacleMap for Grid {
    fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Obstacle> {
        let range = CellRange::covering(pos, size);
        if let Some(edge) = range.boundary(self.width(), self.height()) {
            return Some(edge);
        }
        range.cells().find_map(|(x, y)| self.cell(x, y))
    }
}

#[derive(Debug, Serialize)]
pub struct Level {
    grid: Grid,
    actors: Vec<Actor>,
    player: Option<ActorId>,
    status: Option<Status>,
    /// Counts down once `status` is set; see `is_finished`
    pub finish_delay: f32,
}

impl Level {
    pub fn new(grid: Grid, actors: Vec<Actor>) -> Self {
        let player = actors
            .iter()
            .find(|a| a.type_name() == TYPE_PLAYER)
            .map(Actor::id);
        Self {
            grid,
            actors,
            player,
            status: None,
            finish_delay: DEFAULT_FINISH_DELAY,
        }
    }

    /// Actor-free level straight from plan rows (`'x'` wall, `'!'` lava)
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .chars()
                    .map(crate::parser::obstacle_from_symbol)
                    .collect()
            })
            .collect();
        Self::new(Grid::new(rows), Vec::new())
    }

    pub fn with_finish_delay(mut self, finish_delay: f32) -> Self {
        self.finish_delay = finish_delay;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Split borrow for stepping: actors mutably, terrain immutably
    pub(crate) fn parts_mut(&mut self) -> (&Grid, &mut [Actor]) {
        (&self.grid, &mut self.actors)
    }

    pub fn player(&self) -> Option<&Actor> {
        let id = self.player?;
        self.actors.iter().find(|a| a.id() == id)
    }

    /// For the input layer, which moves the player directly
    pub fn player_mut(&mut self) -> Option<&mut Actor> {
        let id = self.player?;
        self.actors.iter_mut().find(|a| a.id() == id)
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_some() && self.finish_delay < 0.0
    }

    /// Burn down the grace period. No effect while the level is undecided.
    pub fn advance_finish_delay(&mut self, dt: f32) {
        if self.status.is_some() {
            self.finish_delay -= dt;
        }
    }

    /// Obstacle query for untrusted input
    pub fn try_obstacle_at(&self, pos: Vector, size: Vector) -> SimResult<Option<Obstacle>> {
        let pos = pos.validated("pos")?;
        let size = size.validated("size")?;
        Ok(self.obstacle_at(pos, size))
    }

    /// The live actor overlapping `actor`. When several overlap, the last
    /// one in list order is returned.
    pub fn actor_at(&self, actor: &Actor) -> Option<&Actor> {
        self.actors.iter().rev().find(|other| other.is_intersect(actor))
    }

    /// Remove by identity. Unknown ids leave the list untouched.
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        let index = self.actors.iter().position(|a| a.id() == id)?;
        Some(self.actors.remove(index))
    }

    pub fn no_more_actors(&self, type_name: &str) -> bool {
        self.actors.iter().all(|a| a.type_name() != type_name)
    }

    /// Report that the player touched something of `object_type`.
    ///
    /// Lava and fireballs lose the level. A coin (with its actor) is picked
    /// up, and the last coin wins the level. Once the outcome is decided,
    /// nothing changes it.
    pub fn player_touched(&mut self, object_type: &str, actor: Option<ActorId>) {
        if self.status.is_some() {
            return;
        }
        if object_type == Obstacle::Lava.as_str() || object_type == TYPE_FIREBALL {
            log::debug!("player touched {object_type}, level lost");
            self.status = Some(Status::Lost);
        } else if object_type == TYPE_COIN {
            let Some(id) = actor else {
                return;
            };
            if self.remove_actor(id).is_some() {
                log::debug!("coin {id:?} collected");
            }
            if self.no_more_actors(TYPE_COIN) {
                log::debug!("all coins collected, level won");
                self.status = Some(Status::Won);
            }
        }
    }
}

impl ObstacleMap for Level {
    fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Obstacle> {
        self.grid.obstacle_at(pos, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 8 rows, 9 columns
    fn level_8x9() -> Level {
        Level::from_rows(&[
            "         ",
            "         ",
            "         ",
            "       x ",
            "     !xxx",
            "         ",
            "xxx!     ",
            "         ",
        ])
    }

    fn with_actors(actors: Vec<Actor>) -> Level {
        Level::new(Grid::default(), actors)
    }

    #[test]
    fn test_dimensions_from_ragged_rows() {
        let level = Level::from_rows(&["x", "xxxx", "", "xx"]);
        assert_eq!(level.height(), 4);
        assert_eq!(level.width(), 4);

        let empty = Level::new(Grid::default(), Vec::new());
        assert_eq!(empty.height(), 0);
        assert_eq!(empty.width(), 0);
    }

    #[test]
    fn test_obstacle_at_boundaries() {
        let level = level_8x9();
        assert_eq!(level.height(), 8);
        assert_eq!(level.width(), 9);

        assert_eq!(
            level.obstacle_at(Vector::new(1.0, 7.5), Vector::ONE),
            Some(Obstacle::Lava)
        );
        assert_eq!(
            level.obstacle_at(Vector::new(-0.5, 1.0), Vector::ONE),
            Some(Obstacle::Wall)
        );
        assert_eq!(
            level.obstacle_at(Vector::new(8.5, 1.0), Vector::ONE),
            Some(Obstacle::Wall)
        );
        assert_eq!(
            level.obstacle_at(Vector::new(1.0, -0.5), Vector::ONE),
            Some(Obstacle::Wall)
        );
        assert_eq!(level.obstacle_at(Vector::new(1.0, 1.0), Vector::ONE), None);
        // Flush against the right and bottom edges is still inside
        assert_eq!(level.obstacle_at(Vector::new(8.0, 7.0), Vector::ONE), None);
    }

    #[test]
    fn test_obstacle_at_reads_grid() {
        let level = level_8x9();
        assert_eq!(
            level.obstacle_at(Vector::new(7.0, 3.0), Vector::ONE),
            Some(Obstacle::Wall)
        );
        assert_eq!(
            level.obstacle_at(Vector::new(5.0, 4.0), Vector::ONE),
            Some(Obstacle::Lava)
        );
        // Straddling lava (col 5) and wall (col 6): row-major, lava first
        assert_eq!(
            level.obstacle_at(Vector::new(5.5, 4.0), Vector::ONE),
            Some(Obstacle::Lava)
        );
        // Player-sized box whose feet poke into the wall row below
        assert_eq!(
            level.obstacle_at(Vector::new(0.5, 4.6), Vector::new(0.8, 1.5)),
            Some(Obstacle::Wall)
        );
    }

    #[test]
    fn test_short_row_cells_are_empty() {
        let level = Level::from_rows(&["    ", "  "]);
        assert_eq!(level.obstacle_at(Vector::new(3.0, 1.0), Vector::ONE), None);
    }

    #[test]
    fn test_try_obstacle_at_rejects_nan() {
        let level = level_8x9();
        assert!(level.try_obstacle_at(Vector::new(f32::NAN, 0.0), Vector::ONE).is_err());
        assert!(level.try_obstacle_at(Vector::ZERO, Vector::new(1.0, f32::INFINITY)).is_err());
        assert_eq!(level.try_obstacle_at(Vector::ZERO, Vector::ONE).unwrap(), None);
    }

    #[test]
    fn test_player_resolved_at_construction() {
        let coin = Actor::coin_with_phase(Vector::ZERO, 0.0);
        let player = Actor::player(Vector::new(3.0, 3.0));
        let player_id = player.id();
        let level = with_actors(vec![coin, player]);
        assert_eq!(level.player().map(Actor::id), Some(player_id));

        let level = with_actors(vec![Actor::new(Vector::ZERO)]);
        assert!(level.player().is_none());
    }

    #[test]
    fn test_actor_at_last_match_wins() {
        let probe = Actor::new(Vector::new(0.0, 0.0));
        let first = Actor::new(Vector::new(0.5, 0.0));
        let second = Actor::new(Vector::new(0.0, 0.5));
        let far = Actor::new(Vector::new(5.0, 5.0));
        let second_id = second.id();
        let level = with_actors(vec![first, second, far]);

        assert_eq!(level.actor_at(&probe).map(Actor::id), Some(second_id));
        assert!(level.actor_at(&Actor::new(Vector::new(10.0, 10.0))).is_none());
    }

    #[test]
    fn test_actor_at_skips_self() {
        let solo = Actor::new(Vector::ZERO);
        let level = with_actors(vec![solo]);
        let same = &level.actors()[0];
        assert!(level.actor_at(same).is_none());
    }

    #[test]
    fn test_remove_actor() {
        let a = Actor::new(Vector::ZERO);
        let b = Actor::new(Vector::ZERO);
        let stranger = Actor::new(Vector::ZERO);
        let a_id = a.id();
        let mut level = with_actors(vec![a, b]);

        assert!(level.remove_actor(stranger.id()).is_none());
        assert_eq!(level.actors().len(), 2);

        assert!(level.remove_actor(a_id).is_some());
        assert_eq!(level.actors().len(), 1);
        assert!(level.remove_actor(a_id).is_none());
        assert_eq!(level.actors().len(), 1);
    }

    #[test]
    fn test_no_more_actors() {
        let level = with_actors(vec![
            Actor::player(Vector::ZERO),
            Actor::horizontal_fireball(Vector::ZERO),
        ]);
        assert!(level.no_more_actors("coin"));
        assert!(!level.no_more_actors("fireball"));
        assert!(with_actors(Vec::new()).no_more_actors("player"));
    }

    #[test]
    fn test_lava_and_fireball_lose() {
        for hazard in ["lava", "fireball"] {
            let mut level = with_actors(Vec::new());
            level.player_touched(hazard, None);
            assert_eq!(level.status(), Some(Status::Lost));
        }

        let mut level = with_actors(Vec::new());
        level.player_touched("wall", None);
        level.player_touched("coin", None);
        assert_eq!(level.status(), None);
    }

    #[test]
    fn test_coins_win_when_all_collected() {
        let c1 = Actor::coin_with_phase(Vector::ZERO, 0.0);
        let c2 = Actor::coin_with_phase(Vector::new(3.0, 0.0), 0.0);
        let (id1, id2) = (c1.id(), c2.id());
        let mut level = with_actors(vec![Actor::player(Vector::ZERO), c1, c2]);

        level.player_touched("coin", Some(id1));
        assert_eq!(level.status(), None);
        assert_eq!(level.actors().len(), 2);

        level.player_touched("coin", Some(id2));
        assert_eq!(level.status(), Some(Status::Won));
    }

    #[test]
    fn test_outcome_is_final() {
        let coin = Actor::coin_with_phase(Vector::ZERO, 0.0);
        let coin_id = coin.id();
        let mut level = with_actors(vec![coin]);

        level.player_touched("lava", None);
        assert_eq!(level.status(), Some(Status::Lost));

        level.player_touched("coin", Some(coin_id));
        level.player_touched("fireball", None);
        assert_eq!(level.status(), Some(Status::Lost));
        // Decided levels don't pick up coins either
        assert_eq!(level.actors().len(), 1);
    }

    #[test]
    fn test_finish_delay() {
        let mut level = with_actors(Vec::new());
        level.advance_finish_delay(5.0);
        assert_eq!(level.finish_delay, DEFAULT_FINISH_DELAY);
        assert!(!level.is_finished());

        level.player_touched("lava", None);
        assert!(!level.is_finished());
        level.advance_finish_delay(0.6);
        assert!(!level.is_finished());
        level.advance_finish_delay(0.6);
        assert!(level.is_finished());
    }

    #[test]
    fn test_status_names() {
        assert_eq!(Status::Won.as_str(), "won");
        assert_eq!(Status::Lost.as_str(), "lost");
        assert_eq!(
            serde_json::to_string(&Status::Lost).unwrap(),
            format!("\"{}\"", Status::Lost.as_str())
        );
    }

    #[test]
    fn test_finished_requires_status() {
        let mut level = with_actors(Vec::new());
        level.finish_delay = -1.0;
        assert!(!level.is_finished());
    }
}
