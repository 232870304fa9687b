//! Player ship controller
//!
//! Thrust/drag movement, cooldown-gated firing through the equipped
//! loadout's pattern, temporary weapon modes and the post-hit invulnerability
//! window.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::kinematic::Body;
use super::projectile::ProjectileFlags;
use crate::shop::{Loadout, LoadoutId};
use crate::{heading_to, normalize_angle};

/// Temporary weapon modes granted by pickups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponMode {
    #[default]
    Normal,
    /// Two extra shots fanned at ±15°
    Spread,
    /// Shorter cooldown, faster bullets
    Rapid,
}

/// Spread mode side-shot angle (degrees)
const SPREAD_MODE_OFFSET_DEG: f32 = 15.0;
/// Rapid mode bullet speed multiplier
const RAPID_SPEED_MULT: f32 = 1.25;

/// A projectile the player is about to launch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedShot {
    pub heading: f32,
    pub speed: f32,
    pub damage: f32,
    pub flags: ProjectileFlags,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Facing (radians)
    pub heading: f32,
    pub radius: f32,
    pub lives: u32,
    /// Ticks of damage immunity left
    pub invulnerable_ticks: u32,
    pub weapon_mode: WeaponMode,
    /// Ticks until the weapon mode reverts to normal
    pub weapon_ticks: u32,
    pub shoot_cooldown: u32,
    /// Equipped catalog entry
    pub loadout: LoadoutId,
    /// Stats of the equipped loadout
    pub stats: Loadout,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32, lives: u32, loadout: LoadoutId, stats: Loadout) -> Self {
        Self {
            body: Body::new(pos, Vec2::ZERO),
            heading: 0.0,
            radius,
            lives,
            invulnerable_ticks: 0,
            weapon_mode: WeaponMode::Normal,
            weapon_ticks: 0,
            shoot_cooldown: 0,
            loadout,
            stats,
        }
    }

    /// Turn by `direction` steps (negative = counter-clockwise)
    pub fn rotate(&mut self, direction: f32, step: f32) {
        self.heading = normalize_angle(self.heading + direction.signum() * step);
    }

    /// Rotate one step toward `target` unless already within `dead_zone`
    pub fn aim_at(&mut self, target: Vec2, step: f32, dead_zone: f32) {
        let desired = heading_to(self.body.pos, target);
        let diff = normalize_angle(desired - self.heading);
        if diff.abs() > dead_zone {
            self.rotate(diff, step);
        }
    }

    /// Accelerate along the heading, capped at the loadout's top speed
    pub fn thrust(&mut self) {
        self.body.thrust(self.heading, self.stats.acceleration);
        self.body.cap_speed(self.stats.speed);
    }

    /// Drag, move, wrap and count down all timers
    pub fn update(&mut self, drag: f32, bounds: Vec2) {
        self.body.apply_drag(drag);
        self.body.advance();
        self.body.wrap(bounds, 0.0);

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
        self.invulnerable_ticks = self.invulnerable_ticks.saturating_sub(1);
        if self.weapon_ticks > 0 {
            self.weapon_ticks -= 1;
            if self.weapon_ticks == 0 {
                self.weapon_mode = WeaponMode::Normal;
            }
        } else {
            self.weapon_mode = WeaponMode::Normal;
        }
    }

    pub fn can_shoot(&self) -> bool {
        self.shoot_cooldown == 0
    }

    /// Pull the trigger
    ///
    /// Returns the shots to launch, or nothing while the cooldown runs.
    pub fn shoot(&mut self, rapid_fire_delay: u32) -> Vec<PlannedShot> {
        if !self.can_shoot() {
            return Vec::new();
        }

        let delay = match self.weapon_mode {
            WeaponMode::Rapid => self.stats.fire_delay.min(rapid_fire_delay),
            _ => self.stats.fire_delay,
        };
        self.shoot_cooldown = delay.max(1);

        let speed_mult = if self.weapon_mode == WeaponMode::Rapid {
            RAPID_SPEED_MULT
        } else {
            1.0
        };
        let damage = self.stats.bullet_damage;

        let mut shots: Vec<PlannedShot> = self
            .stats
            .pattern
            .shots(self.stats.bullet_speed)
            .into_iter()
            .map(|s| PlannedShot {
                heading: normalize_angle(self.heading + s.angle_offset),
                speed: s.speed * speed_mult,
                damage,
                flags: ProjectileFlags {
                    homing: false,
                    pierce: s.pierce,
                    radius: s.radius,
                },
            })
            .collect();

        if self.weapon_mode == WeaponMode::Spread {
            for side in [-1.0, 1.0] {
                shots.push(PlannedShot {
                    heading: normalize_angle(
                        self.heading + side * SPREAD_MODE_OFFSET_DEG.to_radians(),
                    ),
                    speed: self.stats.bullet_speed,
                    damage,
                    flags: ProjectileFlags::default(),
                });
            }
        }

        shots
    }

    /// Lose a life unless invulnerable; returns true if the hit landed
    pub fn take_hit(&mut self, invulnerability: u32) -> bool {
        if self.invulnerable_ticks > 0 {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.invulnerable_ticks = invulnerability;
        true
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }

    /// Switch weapon mode; re-collecting overwrites rather than stacks
    pub fn set_weapon_mode(&mut self, mode: WeaponMode, ticks: u32) {
        self.weapon_mode = mode;
        self.weapon_ticks = ticks;
    }

    /// Swap ship: kinematics and lives carry over, cooldown and weapon mode reset
    pub fn equip(&mut self, id: LoadoutId, loadout: &Loadout) {
        self.loadout = id;
        self.stats = loadout.clone();
        self.shoot_cooldown = 0;
        self.weapon_mode = WeaponMode::Normal;
        self.weapon_ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::default_catalog;

    const BOUNDS: Vec2 = Vec2::new(900.0, 700.0);

    fn player(id: usize) -> Player {
        let catalog = default_catalog();
        Player::new(
            Vec2::new(450.0, 350.0),
            12.0,
            3,
            LoadoutId(id),
            catalog[id].clone(),
        )
    }

    #[test]
    fn test_cooldown_gates_fire() {
        let mut p = player(0);
        assert_eq!(p.shoot(3).len(), 1);
        assert!(!p.can_shoot());
        // On cooldown: a no-op, not an error
        assert!(p.shoot(3).is_empty());
        for _ in 0..10 {
            p.update(0.985, BOUNDS);
        }
        assert!(p.can_shoot());
    }

    #[test]
    fn test_loadout_patterns() {
        assert_eq!(player(3).shoot(3).len(), 3); // Blazer spread
        assert_eq!(player(2).shoot(3).len(), 2); // Destroyer twin
        let heavy = player(4).shoot(3);
        assert_eq!(heavy[0].flags.radius, Some(crate::consts::HEAVY_PROJECTILE_RADIUS));
        let pierce = player(6).shoot(3);
        assert_eq!(pierce[0].flags.pierce, 3);
    }

    #[test]
    fn test_weapon_modes() {
        let mut p = player(0);
        p.set_weapon_mode(WeaponMode::Spread, 300);
        assert_eq!(p.shoot(3).len(), 3);

        let mut p = player(0);
        p.set_weapon_mode(WeaponMode::Rapid, 300);
        let shots = p.shoot(3);
        assert!((shots[0].speed - 15.0).abs() < 1e-5);
        assert_eq!(p.shoot_cooldown, 3);
    }

    #[test]
    fn test_weapon_mode_expires() {
        let mut p = player(0);
        p.set_weapon_mode(WeaponMode::Rapid, 2);
        p.update(0.985, BOUNDS);
        assert_eq!(p.weapon_mode, WeaponMode::Rapid);
        p.update(0.985, BOUNDS);
        assert_eq!(p.weapon_mode, WeaponMode::Normal);
    }

    #[test]
    fn test_invulnerability_window() {
        let mut p = player(0);
        assert!(p.take_hit(90));
        assert_eq!(p.lives, 2);
        // Same tick and the next 89 ticks: immune
        assert!(!p.take_hit(90));
        for _ in 0..89 {
            p.update(0.985, BOUNDS);
            assert!(!p.take_hit(90));
        }
        p.update(0.985, BOUNDS);
        assert!(p.take_hit(90));
        assert_eq!(p.lives, 1);
    }

    #[test]
    fn test_thrust_caps_speed() {
        let mut p = player(0);
        for _ in 0..200 {
            p.thrust();
        }
        assert!(p.body.speed() <= p.stats.speed + 1e-4);
    }

    #[test]
    fn test_aim_rotates_one_step() {
        let mut p = player(0);
        let step = 5f32.to_radians();
        p.aim_at(Vec2::new(450.0, 600.0), step, 2f32.to_radians());
        assert!((p.heading - step).abs() < 1e-5);

        // Already on target: no rotation
        let mut p = player(0);
        p.aim_at(Vec2::new(800.0, 350.0), step, 2f32.to_radians());
        assert_eq!(p.heading, 0.0);
    }

    #[test]
    fn test_equip_resets_weapon_state() {
        let catalog = default_catalog();
        let mut p = player(0);
        p.body.vel = Vec2::new(3.0, 1.0);
        p.set_weapon_mode(WeaponMode::Spread, 100);
        p.shoot(3);
        p.lives = 2;
        p.equip(LoadoutId(5), &catalog[5]);
        assert_eq!(p.weapon_mode, WeaponMode::Normal);
        assert_eq!(p.shoot_cooldown, 0);
        assert_eq!(p.body.vel, Vec2::new(3.0, 1.0));
        assert_eq!(p.lives, 2);
        assert_eq!(p.stats.name, "Vector");
    }
}
