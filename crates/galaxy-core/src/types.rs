//! Fundamental geometric and simulation types.

use std::ops::{Mul, Sub};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D point or vector on the playfield (screen units, y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each running tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    pub fn subtract(&self, other: &Vector) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }

    /// Euclidean norm.
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// A zero-length (or non-finite) vector has no direction; the zero
    /// vector is returned instead of dividing by zero.
    pub fn normalize(&self) -> Vector {
        let length = self.length();
        if length == 0.0 || !length.is_finite() {
            return Vector::ZERO;
        }
        Vector::new(self.x / length, self.y / length)
    }

    pub fn multiply(&self, scalar: f32) -> Vector {
        Vector::new(self.x * scalar, self.y * scalar)
    }

    /// Distance to another point.
    pub fn distance_to(&self, other: &Vector) -> f32 {
        self.subtract(other).length()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Sample `n` points of the cubic Bezier curve through control points
    /// `p0..p3`, at `t = i / (n - 1)`.
    ///
    /// `n == 1` yields `[p0]` and `n == 0` yields nothing. For `n >= 2` the
    /// first point is exactly `p0` and the last exactly `p3`.
    pub fn bezier(p0: Vector, p1: Vector, p2: Vector, p3: Vector, n: usize) -> Vec<Vector> {
        match n {
            0 => return Vec::new(),
            1 => return vec![p0],
            _ => {}
        }

        let (p0, p1, p2, p3) = (Vec2::from(p0), Vec2::from(p1), Vec2::from(p2), Vec2::from(p3));
        let last = (n - 1) as f32;

        (0..n)
            .map(|i| {
                let t = i as f32 / last;
                let u = 1.0 - t;
                let point = p0 * (u * u * u)
                    + p1 * (3.0 * u * u * t)
                    + p2 * (3.0 * u * t * t)
                    + p3 * (t * t * t);
                Vector::from(point)
            })
            .collect()
    }
}

impl From<Vec2> for Vector {
    fn from(v: Vec2) -> Self {
        Vector::new(v.x, v.y)
    }
}

impl From<Vector> for Vec2 {
    fn from(v: Vector) -> Self {
        Vec2::new(v.x, v.y)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        self.subtract(&rhs)
    }
}

impl Mul<f32> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f32) -> Vector {
        self.multiply(rhs)
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
