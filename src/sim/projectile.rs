//! Player and boss projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::kinematic::Body;
use crate::{heading_to, heading_vec, normalize_angle};

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Boss,
}

/// Optional behaviors set at spawn time
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectileFlags {
    /// Curve toward the nearest target each tick
    pub homing: bool,
    /// Hostiles this projectile can pass through before it is spent
    pub pierce: u32,
    /// Collision radius override
    pub radius: Option<f32>,
}

/// A bullet in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub owner: Owner,
    pub body: Body,
    /// Current heading (radians)
    pub heading: f32,
    pub speed: f32,
    pub damage: f32,
    pub radius: f32,
    /// Ticks left before expiry
    pub lifetime: u32,
    pub homing: bool,
    /// Remaining pass-throughs
    pub pierce: u32,
    /// Hostile ids already struck (a piercing shot damages each target once)
    #[serde(default)]
    pub struck: Vec<u32>,
}

impl Projectile {
    #[allow(clippy::too_many_arguments)]
    pub fn spawn(
        id: u32,
        origin: Vec2,
        heading: f32,
        speed: f32,
        owner: Owner,
        damage: f32,
        lifetime: u32,
        flags: ProjectileFlags,
    ) -> Self {
        let default_radius = match owner {
            Owner::Player => crate::consts::PLAYER_PROJECTILE_RADIUS,
            Owner::Boss => crate::consts::BOSS_PROJECTILE_RADIUS,
        };
        Self {
            id,
            owner,
            body: Body::with_heading(origin, heading, speed),
            heading,
            speed,
            damage: damage.max(0.0),
            radius: flags.radius.unwrap_or(default_radius),
            lifetime,
            homing: flags.homing,
            pierce: flags.pierce,
            struck: Vec::new(),
        }
    }

    /// Advance one tick
    ///
    /// `targets` are the positions a homing projectile may chase; the caller
    /// picks them by owner (hostiles for player shots, the player for boss
    /// shots).
    pub fn update(&mut self, targets: &[Vec2], homing_gain: f32, bounds: Vec2) {
        if self.homing {
            let nearest = targets.iter().copied().min_by(|a, b| {
                a.distance_squared(self.body.pos)
                    .partial_cmp(&b.distance_squared(self.body.pos))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            if let Some(target) = nearest {
                let desired = heading_to(self.body.pos, target);
                let error = normalize_angle(desired - self.heading);
                self.heading = normalize_angle(self.heading + error * homing_gain);
                self.body.vel = heading_vec(self.heading) * self.speed;
            }
        }

        self.body.advance();
        self.lifetime = self.lifetime.saturating_sub(1);
        self.body.wrap(bounds, 0.0);
    }

    pub fn is_expired(&self) -> bool {
        self.lifetime == 0
    }

    /// Register a hit on `target_id`; returns true if the projectile is spent
    pub fn register_hit(&mut self, target_id: u32) -> bool {
        self.struck.push(target_id);
        if self.pierce > 0 {
            self.pierce -= 1;
            false
        } else {
            true
        }
    }

    /// Whether this projectile already struck `target_id`
    pub fn has_struck(&self, target_id: u32) -> bool {
        self.struck.contains(&target_id)
    }
}
