//! Polygon hostiles: tiered stats, pursuit steering and split-on-death

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::kinematic::Body;
use crate::heading_vec;

/// Shape class (tier 0..=3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShapeClass {
    Triangle,
    Square,
    Pentagon,
    Hexagon,
}

impl ShapeClass {
    pub const ALL: [ShapeClass; 4] = [
        ShapeClass::Triangle,
        ShapeClass::Square,
        ShapeClass::Pentagon,
        ShapeClass::Hexagon,
    ];

    pub fn from_tier(tier: usize) -> Self {
        Self::ALL[tier.min(Self::ALL.len() - 1)]
    }

    pub fn tier(self) -> usize {
        self as usize
    }

    pub fn sides(self) -> u32 {
        match self {
            ShapeClass::Triangle => 3,
            ShapeClass::Square => 4,
            ShapeClass::Pentagon => 5,
            ShapeClass::Hexagon => 6,
        }
    }

    pub fn base_speed(self) -> f32 {
        match self {
            ShapeClass::Triangle => 2.0,
            ShapeClass::Square => 1.6,
            ShapeClass::Pentagon => 1.1,
            ShapeClass::Hexagon => 0.8,
        }
    }

    pub fn max_health(self) -> f32 {
        match self {
            ShapeClass::Triangle => 1.0,
            ShapeClass::Square => 2.0,
            ShapeClass::Pentagon => 3.0,
            ShapeClass::Hexagon => 4.0,
        }
    }

    /// Coins granted on destruction
    pub fn coin_value(self) -> u64 {
        match self {
            ShapeClass::Triangle => 5,
            ShapeClass::Square => 10,
            ShapeClass::Pentagon => 20,
            ShapeClass::Hexagon => 35,
        }
    }

    /// Palette index for the presentation layer
    pub fn color(self) -> u32 {
        self.tier() as u32
    }

    /// Score granted on destruction
    pub fn score_value(self) -> u64 {
        self.sides() as u64 * 10
    }
}

/// Pursuit acceleration per unit of difficulty
const STEER_ACCEL: f32 = 0.03;
/// Speed cap growth per unit of difficulty
const SPEED_CAP_GROWTH: f32 = 0.12;

/// An enemy polygon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileShape {
    pub id: u32,
    pub class: ShapeClass,
    pub body: Body,
    /// Circumradius; also the hit radius
    pub size: f32,
    pub health: f32,
    /// Base speed after wave scaling
    pub speed: f32,
    /// Visual spin (radians)
    pub rotation: f32,
    pub spin: f32,
}

impl HostileShape {
    /// Create a hostile with a random initial drift
    pub fn new<R: Rng + ?Sized>(
        id: u32,
        pos: Vec2,
        class: ShapeClass,
        size: f32,
        scale: f32,
        rng: &mut R,
    ) -> Self {
        let speed = class.base_speed() * scale;
        let drift = rng.random_range(0.0..std::f32::consts::TAU);
        Self {
            id,
            class,
            body: Body::new(pos, heading_vec(drift) * speed),
            size,
            health: class.max_health(),
            speed,
            rotation: rng.random_range(0.0..std::f32::consts::TAU),
            spin: rng.random_range(-2.0f32..2.0).to_radians(),
        }
    }

    /// Chase the player; steering and top speed grow with difficulty
    pub fn update(&mut self, player_pos: Vec2, difficulty: f32, bounds: Vec2, wrap_padding: f32) {
        self.body.steer_toward(player_pos, STEER_ACCEL * difficulty);
        self.body
            .cap_speed(self.speed * (1.0 + difficulty * SPEED_CAP_GROWTH));
        self.body.advance();
        self.rotation = crate::normalize_angle(self.rotation + self.spin);
        self.body.wrap(bounds, wrap_padding);
    }

    /// Apply damage; true once health is at or below zero
    pub fn hit(&mut self, damage: f32) -> bool {
        self.health -= damage.max(0.0);
        self.health <= 0.0
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Children spawned on destruction
    ///
    /// Above `threshold` the shape breaks into exactly two of the same class
    /// at half size (floored, never below `min_size`), `SPLIT_OFFSET` away in
    /// random directions. Ids are drawn from `next_id`.
    pub fn split<R: Rng + ?Sized>(
        &self,
        threshold: f32,
        min_size: f32,
        rng: &mut R,
        mut next_id: impl FnMut() -> u32,
    ) -> Vec<HostileShape> {
        if self.size <= threshold {
            return Vec::new();
        }
        let child_size = (self.size / 2.0).floor().max(min_size);
        (0..2)
            .map(|_| {
                let dir = rng.random_range(0.0..std::f32::consts::TAU);
                let pos = self.body.pos + heading_vec(dir) * crate::consts::SPLIT_OFFSET;
                HostileShape::new(next_id(), pos, self.class, child_size, 1.0, rng)
            })
            .collect()
    }
}
