//! Shared motion model
//!
//! Every moving thing (player, projectiles, hostiles, bosses, particles) is a
//! `Body`: position + velocity advanced once per tick, with optional drag,
//! steering, a speed cap and screen wrap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position and velocity of a moving entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// Body moving along `theta` at `speed`
    pub fn with_heading(pos: Vec2, theta: f32, speed: f32) -> Self {
        Self::new(pos, crate::heading_vec(theta) * speed)
    }

    /// Move by one tick of velocity
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Multiply velocity by a per-tick drag factor
    #[inline]
    pub fn apply_drag(&mut self, factor: f32) {
        self.vel *= factor;
    }

    /// Accelerate toward a target point (no-op when already on it)
    pub fn steer_toward(&mut self, target: Vec2, accel: f32) {
        let dir = (target - self.pos).normalize_or_zero();
        self.vel += dir * accel;
    }

    /// Accelerate along a heading
    pub fn thrust(&mut self, theta: f32, accel: f32) {
        self.vel += crate::heading_vec(theta) * accel;
    }

    /// Scripted move: jump to `target`, recording the step as velocity
    pub fn move_to(&mut self, target: Vec2) {
        self.vel = target - self.pos;
        self.pos = target;
    }

    /// Instant relocation with no carried velocity
    pub fn teleport(&mut self, target: Vec2) {
        self.pos = target;
        self.vel = Vec2::ZERO;
    }

    /// Clamp speed to `max`, keeping direction
    pub fn cap_speed(&mut self, max: f32) {
        if self.vel.length() > max {
            self.vel = self.vel.normalize_or_zero() * max;
        }
    }

    /// Re-enter from the opposite edge once a coordinate leaves
    /// `[-padding, bounds + padding]`
    pub fn wrap(&mut self, bounds: Vec2, padding: f32) {
        self.pos.x = wrap_axis(self.pos.x, bounds.x, padding);
        self.pos.y = wrap_axis(self.pos.y, bounds.y, padding);
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

#[inline]
fn wrap_axis(v: f32, extent: f32, padding: f32) -> f32 {
    if v < -padding {
        extent + padding
    } else if v > extent + padding {
        -padding
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Vec2 = Vec2::new(900.0, 700.0);

    #[test]
    fn test_tight_wrap() {
        let mut b = Body::new(Vec2::new(-0.5, 350.0), Vec2::ZERO);
        b.wrap(BOUNDS, 0.0);
        assert_eq!(b.pos.x, 900.0);

        let mut b = Body::new(Vec2::new(450.0, 700.5), Vec2::ZERO);
        b.wrap(BOUNDS, 0.0);
        assert_eq!(b.pos.y, 0.0);
    }

    #[test]
    fn test_padded_wrap() {
        // Inside the padding band: untouched
        let mut b = Body::new(Vec2::new(-40.0, 350.0), Vec2::ZERO);
        b.wrap(BOUNDS, 60.0);
        assert_eq!(b.pos.x, -40.0);

        let mut b = Body::new(Vec2::new(-61.0, 350.0), Vec2::ZERO);
        b.wrap(BOUNDS, 60.0);
        assert_eq!(b.pos.x, 960.0);
    }

    #[test]
    fn test_cap_speed_keeps_direction() {
        let mut b = Body::new(Vec2::ZERO, Vec2::new(30.0, 40.0));
        b.cap_speed(5.0);
        assert!((b.speed() - 5.0).abs() < 1e-5);
        assert!((b.vel.x - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_steer_toward() {
        let mut b = Body::new(Vec2::ZERO, Vec2::ZERO);
        b.steer_toward(Vec2::new(10.0, 0.0), 0.5);
        assert_eq!(b.vel, Vec2::new(0.5, 0.0));

        // Sitting on the target: no NaN, no change
        let mut b = Body::new(Vec2::ONE, Vec2::ZERO);
        b.steer_toward(Vec2::ONE, 0.5);
        assert_eq!(b.vel, Vec2::ZERO);
    }

    #[test]
    fn test_advance_and_drag() {
        let mut b = Body::new(Vec2::ZERO, Vec2::new(2.0, 0.0));
        b.advance();
        b.apply_drag(0.5);
        assert_eq!(b.pos, Vec2::new(2.0, 0.0));
        assert_eq!(b.vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_scripted_moves() {
        let mut b = Body::new(Vec2::ZERO, Vec2::ZERO);
        b.move_to(Vec2::new(3.0, 4.0));
        assert_eq!(b.pos, Vec2::new(3.0, 4.0));
        assert_eq!(b.vel, Vec2::new(3.0, 4.0));

        b.teleport(Vec2::new(100.0, 0.0));
        assert_eq!(b.pos, Vec2::new(100.0, 0.0));
        assert_eq!(b.vel, Vec2::ZERO);
    }
}
