//! Immutable 2D vector used for positions, sizes and speeds
//!
//! Kept as its own small value type (rather than a bare `glam::Vec2`) so the
//! simulation has exactly the two operations it needs. Converts freely to and
//! from `glam::Vec2` for frontends.

use std::ops::{Add, Mul, Neg};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Build a vector from untrusted input, rejecting NaN and infinities
    pub fn try_new(field: &'static str, x: f32, y: f32) -> SimResult<Self> {
        Self::new(x, y).validated(field)
    }

    /// Returns self if both components are finite
    pub fn validated(self, field: &'static str) -> SimResult<Self> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(SimError::NonFiniteVector {
                field,
                x: self.x,
                y: self.y,
            })
        }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Componentwise sum
    #[inline]
    pub fn plus(self, other: Vector) -> Vector {
        (Vec2::from(self) + Vec2::from(other)).into()
    }

    /// Both components scaled by `amount`
    #[inline]
    pub fn times(self, amount: f32) -> Vector {
        (Vec2::from(self) * amount).into()
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        self.plus(rhs)
    }
}

impl Mul<f32> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f32) -> Vector {
        self.times(rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.times(-1.0)
    }
}

impl From<Vec2> for Vector {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector> for Vec2 {
    fn from(v: Vector) -> Self {
        Vec2::new(v.x, v.y)
    }
}
