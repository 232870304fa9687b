//! Neon Waves - A wave-survival arcade shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, bosses, collisions, wave progression)
//! - `config`: Data-driven game balance
//! - `shop`: Loadout catalog, pricing and purchase/equip
//! - `error`: Error types for configuration and shop contract violations

pub mod config;
pub mod error;
pub mod shop;
pub mod sim;

pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use shop::{Loadout, LoadoutId, PurchaseOutcome};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 900.0;
    pub const SCREEN_HEIGHT: f32 = 700.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 12.0;
    pub const PLAYER_DRAG: f32 = 0.985;
    pub const PLAYER_START_LIVES: u32 = 3;
    /// Heading change per rotate step (degrees)
    pub const ROTATION_STEP_DEG: f32 = 5.0;
    /// Aim dead zone (degrees) - smaller errors don't rotate the ship
    pub const AIM_DEAD_ZONE_DEG: f32 = 2.0;

    /// Projectile defaults
    pub const PROJECTILE_LIFETIME: u32 = 70;
    pub const PLAYER_PROJECTILE_RADIUS: f32 = 3.0;
    pub const BOSS_PROJECTILE_RADIUS: f32 = 4.0;
    pub const HEAVY_PROJECTILE_RADIUS: f32 = 5.0;
    /// Fraction of heading error removed per tick by homing projectiles
    pub const HOMING_GAIN: f32 = 0.12;

    /// Hostile defaults
    pub const HOSTILE_WRAP_PADDING: f32 = 60.0;
    pub const SPLIT_THRESHOLD: f32 = 14.0;
    pub const MIN_CHILD_SIZE: f32 = 10.0;
    pub const SPLIT_OFFSET: f32 = 18.0;

    /// Pickup defaults
    pub const PICKUP_LIFETIME: u32 = 360;
    pub const PICKUP_RADIUS: f32 = 14.0;

    /// Particle defaults
    pub const PARTICLE_LIFE: u32 = 30;
    pub const PARTICLE_DRAG: f32 = 0.94;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector for a heading (radians)
#[inline]
pub fn heading_vec(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Heading (radians) from `from` toward `to`
#[inline]
pub fn heading_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Clamp a point into `[min, max]` on both axes
#[inline]
pub fn clamp_point(p: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    p.clamp(min, max)
}
