//! Level plan parsing
//!
//! A plan is a list of text rows. Each character is either terrain
//! (`'x'` wall, `'!'` lava), an actor symbol looked up in an
//! [`ActorRegistry`], or empty space.

use std::collections::HashMap;
use std::fmt;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::DEFAULT_COIN_SEED;
use crate::settings::Settings;
use crate::sim::{Actor, Grid, Level, Obstacle, Vector};

/// A level plan as loaded from a pack
pub type Plan = Vec<String>;

/// Builds an actor at a spawn cell. Returning `None` means the factory has
/// nothing to place; the parser skips it.
pub type ActorFactory = Box<dyn Fn(Vector, &mut Pcg32) -> Option<Actor>>;

/// Fixed terrain symbols
pub fn obstacle_from_symbol(symbol: char) -> Option<Obstacle> {
    match symbol {
        'x' => Some(Obstacle::Wall),
        '!' => Some(Obstacle::Lava),
        _ => None,
    }
}

/// Symbol → actor factory table
#[derive(Default)]
pub struct ActorRegistry {
    factories: HashMap<char, ActorFactory>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The symbols used by the stock level plans:
    /// `@` player, `o` coin, `=` horizontal fireball, `|` vertical fireball,
    /// `v` fire rain.
    pub fn standard() -> Self {
        Self::new()
            .with('@', |pos, _| Some(Actor::player(pos)))
            .with('o', |pos, rng| Some(Actor::coin(pos, rng)))
            .with('=', |pos, _| Some(Actor::horizontal_fireball(pos)))
            .with('|', |pos, _| Some(Actor::vertical_fireball(pos)))
            .with('v', |pos, _| Some(Actor::fire_rain(pos)))
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with<F>(mut self, symbol: char, factory: F) -> Self
    where
        F: Fn(Vector, &mut Pcg32) -> Option<Actor> + 'static,
    {
        self.insert(symbol, factory);
        self
    }

    /// Register a factory, replacing any previous one for the symbol
    pub fn insert<F>(&mut self, symbol: char, factory: F)
    where
        F: Fn(Vector, &mut Pcg32) -> Option<Actor> + 'static,
    {
        self.factories.insert(symbol, Box::new(factory));
    }

    pub fn get(&self, symbol: char) -> Option<&ActorFactory> {
        self.factories.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.factories.keys().copied()
    }
}

impl fmt::Debug for ActorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut symbols: Vec<char> = self.symbols().collect();
        symbols.sort_unstable();
        f.debug_struct("ActorRegistry")
            .field("symbols", &symbols)
            .finish()
    }
}

#[derive(Debug)]
pub struct LevelParser {
    registry: ActorRegistry,
    /// Feeds coin phases; seeded so a plan always parses to the same level
    rng: Pcg32,
    finish_delay: f32,
}

impl LevelParser {
    pub fn new(registry: ActorRegistry) -> Self {
        Self::with_seed(registry, DEFAULT_COIN_SEED)
    }

    pub fn with_seed(registry: ActorRegistry, seed: u64) -> Self {
        Self {
            registry,
            rng: Pcg32::seed_from_u64(seed),
            finish_delay: crate::sim::DEFAULT_FINISH_DELAY,
        }
    }

    pub fn from_settings(registry: ActorRegistry, settings: &Settings) -> Self {
        let mut parser = Self::with_seed(registry, settings.coin_seed);
        parser.finish_delay = settings.finish_delay;
        parser
    }

    pub fn registry(&self) -> &ActorRegistry {
        &self.registry
    }

    /// Factory for a symbol. `'\0'` is treated as "no symbol".
    pub fn actor_from_symbol(&self, symbol: char) -> Option<&ActorFactory> {
        if symbol == '\0' {
            return None;
        }
        self.registry.get(symbol)
    }

    pub fn obstacle_from_symbol(&self, symbol: char) -> Option<Obstacle> {
        obstacle_from_symbol(symbol)
    }

    /// One marker per character; ragged rows stay ragged
    pub fn create_grid<S: AsRef<str>>(&self, plan: &[S]) -> Grid {
        Grid::new(
            plan.iter()
                .map(|row| row.as_ref().chars().map(obstacle_from_symbol).collect())
                .collect(),
        )
    }

    /// Actors in row-major order, spawned at `(col, row)`
    pub fn create_actors<S: AsRef<str>>(&mut self, plan: &[S]) -> Vec<Actor> {
        let mut actors = Vec::new();
        for (y, row) in plan.iter().enumerate() {
            for (x, symbol) in row.as_ref().chars().enumerate() {
                let Some(factory) = self.registry.get(symbol) else {
                    continue;
                };
                match factory(Vector::new(x as f32, y as f32), &mut self.rng) {
                    Some(actor) => actors.push(actor),
                    None => log::warn!("factory for {symbol:?} at ({x}, {y}) produced no actor"),
                }
            }
        }
        actors
    }

    /// Build a level from a plan. An empty plan gives an empty 0x0 level.
    pub fn parse<S: AsRef<str>>(&mut self, plan: &[S]) -> Level {
        let grid = self.create_grid(plan);
        let actors = self.create_actors(plan);
        let level = Level::new(grid, actors).with_finish_delay(self.finish_delay);
        log::info!(
            "parsed level {}x{} with {} actors",
            level.width(),
            level.height(),
            level.actors().len()
        );
        level
    }
}
