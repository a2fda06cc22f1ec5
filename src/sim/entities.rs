//! Concrete actor behaviors: player, coin, and the fireball family

use std::f32::consts::TAU;

use rand::Rng;
use serde::Serialize;

use super::actor::{Actor, ActorKind};
use super::collision::ObstacleMap;
use super::vector::Vector;

/// Player box size
pub const PLAYER_SIZE: Vector = Vector::new(0.8, 1.5);
/// Spawn marker is the player's feet; shift up so the box stands on it
pub const PLAYER_OFFSET: Vector = Vector::new(0.0, -0.5);

pub const COIN_SIZE: Vector = Vector::new(0.6, 0.6);
pub const COIN_OFFSET: Vector = Vector::new(0.2, 0.1);
/// Phase advance per second
pub const COIN_SPRING_SPEED: f32 = 8.0;
/// Bob amplitude
pub const COIN_SPRING_DIST: f32 = 0.07;

pub const FIREBALL_SIZE: Vector = Vector::new(1.0, 1.0);
pub const HORIZONTAL_FIREBALL_SPEED: Vector = Vector::new(2.0, 0.0);
pub const VERTICAL_FIREBALL_SPEED: Vector = Vector::new(0.0, 2.0);
pub const FIRE_RAIN_SPEED: Vector = Vector::new(0.0, 3.0);

/// Vertical sine bob of a coin around its spawn point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spring {
    pub initial_pos: Vector,
    /// Current phase (radians). Only ever increases.
    pub phase: f32,
    pub speed: f32,
    pub dist: f32,
}

impl Spring {
    pub fn new(initial_pos: Vector, phase: f32) -> Self {
        Self {
            initial_pos,
            phase,
            speed: COIN_SPRING_SPEED,
            dist: COIN_SPRING_DIST,
        }
    }

    pub fn update_spring(&mut self, time: f32) {
        self.phase += self.speed * time;
    }

    pub fn spring_vector(&self) -> Vector {
        Vector::new(0.0, self.phase.sin() * self.dist)
    }

    /// Advance the phase by `time` and return where the coin should be drawn
    pub fn next_position(&mut self, time: f32) -> Vector {
        self.update_spring(time);
        self.initial_pos.plus(self.spring_vector())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum FireballKind {
    /// Free-form projectile with a caller-chosen speed
    Plain,
    Horizontal,
    Vertical,
    /// Falls, then jumps back to where it spawned when blocked
    Rain { initial_pos: Vector },
}

impl Actor {
    pub fn player(pos: Vector) -> Self {
        Self::with_kind(
            ActorKind::Player,
            pos.plus(PLAYER_OFFSET),
            PLAYER_SIZE,
            Vector::ZERO,
        )
    }

    /// Coin with a random starting phase so neighbouring coins don't bob in lockstep
    pub fn coin<R: Rng + ?Sized>(pos: Vector, rng: &mut R) -> Self {
        let phase = rng.random_range(0.0..TAU);
        Self::coin_with_phase(pos, phase)
    }

    pub fn coin_with_phase(pos: Vector, phase: f32) -> Self {
        let pos = pos.plus(COIN_OFFSET);
        Self::with_kind(
            ActorKind::Coin(Spring::new(pos, phase)),
            pos,
            COIN_SIZE,
            Vector::ZERO,
        )
    }

    pub fn fireball(pos: Vector, speed: Vector) -> Self {
        Self::with_kind(
            ActorKind::Fireball(FireballKind::Plain),
            pos,
            FIREBALL_SIZE,
            speed,
        )
    }

    pub fn horizontal_fireball(pos: Vector) -> Self {
        Self::with_kind(
            ActorKind::Fireball(FireballKind::Horizontal),
            pos,
            FIREBALL_SIZE,
            HORIZONTAL_FIREBALL_SPEED,
        )
    }

    pub fn vertical_fireball(pos: Vector) -> Self {
        Self::with_kind(
            ActorKind::Fireball(FireballKind::Vertical),
            pos,
            FIREBALL_SIZE,
            VERTICAL_FIREBALL_SPEED,
        )
    }

    pub fn fire_rain(pos: Vector) -> Self {
        Self::with_kind(
            ActorKind::Fireball(FireballKind::Rain { initial_pos: pos }),
            pos,
            FIREBALL_SIZE,
            FIRE_RAIN_SPEED,
        )
    }

    /// Spring state, for coins only
    pub fn spring(&self) -> Option<&Spring> {
        match self.kind() {
            ActorKind::Coin(spring) => Some(spring),
            _ => None,
        }
    }

    /// Straight-line position after `time` at the current speed
    pub fn next_position(&self, time: f32) -> Vector {
        self.pos.plus(self.speed.times(time))
    }

    /// Response to a blocked move: rain resets, every other fireball bounces
    pub fn handle_obstacle(&mut self) {
        match *self.kind() {
            ActorKind::Fireball(FireballKind::Rain { initial_pos }) => {
                log::trace!("fire rain {:?} reset to {:?}", self.id(), initial_pos);
                self.pos = initial_pos;
            }
            _ => {
                self.speed = -self.speed;
                log::trace!("fireball {:?} bounced, speed {:?}", self.id(), self.speed);
            }
        }
    }

    pub(crate) fn act_coin(&mut self, time: f32) {
        if let ActorKind::Coin(spring) = self.kind_mut() {
            let pos = spring.next_position(time);
            self.pos = pos;
        }
    }

    pub(crate) fn act_fireball<M: ObstacleMap + ?Sized>(&mut self, time: f32, level: &M) {
        let next = self.next_position(time);
        if level.obstacle_at(next, self.size).is_none() {
            self.pos = next;
        } else {
            self.handle_obstacle();
        }
    }
}
