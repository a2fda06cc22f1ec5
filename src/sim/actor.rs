//! Actors: everything in a level that has a box and can move
//!
//! Variants are a closed set (`ActorKind`) dispatched by `match`. The string
//! tags returned by `type_name` are what `Level::player_touched` and
//! `Level::no_more_actors` compare against, so they must stay stable.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use super::collision::ObstacleMap;
use super::entities::{FireballKind, Spring};
use super::vector::Vector;
use crate::error::SimResult;

pub const TYPE_ACTOR: &str = "actor";
pub const TYPE_PLAYER: &str = "player";
pub const TYPE_COIN: &str = "coin";
pub const TYPE_FIREBALL: &str = "fireball";

static NEXT_ACTOR_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a constructed actor. Two actors are "the same" only if they
/// share an id; there is no structural equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActorId(u64);

impl ActorId {
    fn next() -> Self {
        Self(NEXT_ACTOR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Variant-specific state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ActorKind {
    /// Plain box with no behavior
    Actor,
    Player,
    Coin(Spring),
    Fireball(FireballKind),
}

impl ActorKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ActorKind::Actor => TYPE_ACTOR,
            ActorKind::Player => TYPE_PLAYER,
            ActorKind::Coin(_) => TYPE_COIN,
            ActorKind::Fireball(_) => TYPE_FIREBALL,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Actor {
    id: ActorId,
    pub pos: Vector,
    pub size: Vector,
    pub speed: Vector,
    kind: ActorKind,
}

impl Actor {
    /// Unit-sized, motionless base actor
    pub fn new(pos: Vector) -> Self {
        Self::with_kind(ActorKind::Actor, pos, Vector::ONE, Vector::ZERO)
    }

    /// Base actor from untrusted vectors
    pub fn try_new(pos: Vector, size: Vector, speed: Vector) -> SimResult<Self> {
        Ok(Self::with_kind(
            ActorKind::Actor,
            pos.validated("pos")?,
            size.validated("size")?,
            speed.validated("speed")?,
        ))
    }

    pub(crate) fn with_kind(kind: ActorKind, pos: Vector, size: Vector, speed: Vector) -> Self {
        Self {
            id: ActorId::next(),
            pos,
            size,
            speed,
            kind,
        }
    }

    #[inline]
    pub fn id(&self) -> ActorId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> &ActorKind {
        &self.kind
    }

    #[inline]
    pub(crate) fn kind_mut(&mut self) -> &mut ActorKind {
        &mut self.kind
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    #[inline]
    pub fn is_same(&self, other: &Actor) -> bool {
        self.id == other.id
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict box overlap. Touching edges do not count, and an actor never
    /// intersects itself.
    pub fn is_intersect(&self, other: &Actor) -> bool {
        if self.is_same(other) {
            return false;
        }
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }

    /// Per-tick update. The only place an actor mutates itself.
    pub fn act<M: ObstacleMap + ?Sized>(&mut self, time: f32, level: &M) {
        match self.kind {
            ActorKind::Actor | ActorKind::Player => {}
            ActorKind::Coin(_) => self.act_coin(time),
            ActorKind::Fireball(_) => self.act_fireball(time, level),
        }
    }
}
