//! Timed power-ups and visual particles

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::kinematic::Body;
use crate::consts::{PARTICLE_DRAG, PARTICLE_LIFE};
use crate::heading_vec;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Spread weapon mode
    Spread,
    /// Rapid-fire weapon mode
    Rapid,
    /// Extra life
    Life,
    /// Temporary invulnerability
    Shield,
}

impl PickupKind {
    pub const ALL: [PickupKind; 4] = [
        PickupKind::Spread,
        PickupKind::Rapid,
        PickupKind::Life,
        PickupKind::Shield,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&PickupKind::Life)
    }
}

/// A pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    pub radius: f32,
    pub ttl_ticks: u32,
}

impl Pickup {
    pub fn new(id: u32, kind: PickupKind, pos: Vec2, radius: f32, ttl_ticks: u32) -> Self {
        Self {
            id,
            kind,
            pos,
            radius,
            ttl_ticks,
        }
    }

    pub fn update(&mut self) {
        self.ttl_ticks = self.ttl_ticks.saturating_sub(1);
    }

    pub fn is_alive(&self) -> bool {
        self.ttl_ticks > 0
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub body: Body,
    pub color: u32,
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
}

impl Particle {
    /// Random-direction spark around `pos`
    pub fn burst<R: Rng + ?Sized>(pos: Vec2, jitter: f32, color: u32, rng: &mut R) -> Self {
        let offset = if jitter > 0.0 {
            Vec2::new(
                rng.random_range(-jitter..jitter),
                rng.random_range(-jitter..jitter),
            )
        } else {
            Vec2::ZERO
        };
        let theta = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(1.8..5.0);
        Self {
            body: Body::new(pos + offset, heading_vec(theta) * speed),
            color,
            life: PARTICLE_LIFE,
            max_life: PARTICLE_LIFE,
            size: rng.random_range(2..=4) as f32,
        }
    }

    pub fn update(&mut self) {
        self.body.advance();
        self.body.apply_drag(PARTICLE_DRAG);
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Remaining life as 0..=1 (for fade-out)
    pub fn alpha(&self) -> f32 {
        self.life as f32 / self.max_life.max(1) as f32
    }
}
