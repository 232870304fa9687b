//! Scripted bosses
//!
//! One boss is alive at a time. Every archetype shares the same lifecycle
//! (Entering -> Active -> Defeated) and the same call site; the attack
//! script lives in a per-archetype `Behavior` variant driven by countdown
//! timers.
//!
//! Bosses never touch the run state directly. During `update` they get a
//! `BossContext`, which can read the player position and queue new
//! hostiles/projectiles - nothing else.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::hostile::ShapeClass;
use super::kinematic::Body;
use crate::{clamp_point, heading_to};

/// Boss archetypes, in round-robin order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArchetypeKind {
    /// Radial rings + rotating stream
    HexSentinel,
    /// Slow pursuit, homing clusters, teleport volleys
    VortexEye,
    /// Fixed orbit, spirals, telegraphed charge volleys
    SpiralCore,
    /// Summons minions, dashes and bursts
    ShardKing,
    /// Three-phase cycle: summon, petals, heavy volleys
    StarForge,
}

impl ArchetypeKind {
    pub const ALL: [ArchetypeKind; 5] = [
        ArchetypeKind::HexSentinel,
        ArchetypeKind::VortexEye,
        ArchetypeKind::SpiralCore,
        ArchetypeKind::ShardKing,
        ArchetypeKind::StarForge,
    ];

    /// Deterministic archetype for a 1-based boss index
    pub fn for_boss_index(index: u32, roster: &[ArchetypeKind]) -> ArchetypeKind {
        if roster.is_empty() {
            return ArchetypeKind::HexSentinel;
        }
        let slot = (index.max(1) - 1) as usize % roster.len();
        roster[slot]
    }
}

/// Narrow capability handed to a boss for the duration of its update
pub trait BossContext {
    /// Current player position
    fn player_pos(&self) -> Vec2;
    /// Queue a new hostile
    fn spawn_hostile(&mut self, pos: Vec2, class: ShapeClass, size: f32);
    /// Queue a boss-owned projectile (heading in radians)
    fn spawn_projectile(&mut self, origin: Vec2, heading: f32, speed: f32, damage: f32, homing: bool);
    /// Shared simulation RNG
    fn rng(&mut self) -> &mut Pcg32;
}

/// Repeating countdown; fires once every `period` ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub remaining: u32,
    pub period: u32,
}

impl Countdown {
    pub fn new(period: u32) -> Self {
        let period = period.max(1);
        Self {
            remaining: period,
            period,
        }
    }

    /// Count down one tick; true (and reset) when it reaches zero
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.remaining = self.period;
            true
        } else {
            false
        }
    }
}

/// `max(floor, base - step * index)` without underflow
fn scaled_period(base: i64, step: i64, floor: i64, index: u32) -> u32 {
    (base - step * index as i64).max(floor) as u32
}

/// Boss lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    /// Descending from above the screen
    Entering,
    /// Running its attack script
    Active,
    /// Health exhausted (terminal)
    Defeated,
}

/// StarForge cycle segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForgePhase {
    Summon,
    Petals,
    Volley,
}

const FORGE_SUMMON_END: u32 = 200;
const FORGE_PETALS_END: u32 = 400;
const FORGE_CYCLE_END: u32 = 600;

/// Length of the SpiralCore telegraphed charge
const CHARGE_TICKS: u32 = 60;
/// Ticks between volleys while charging
const CHARGE_VOLLEY_EVERY: u32 = 12;

/// Per-archetype attack state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Behavior {
    HexSentinel {
        ring: Countdown,
        stream: Countdown,
    },
    VortexEye {
        drift: Countdown,
        cluster: Countdown,
        teleport: Countdown,
    },
    SpiralCore {
        spiral: Countdown,
        charge_timer: Countdown,
        /// Ticks left in the current charge (0 = not charging)
        charge: u32,
    },
    ShardKing {
        drift: Countdown,
        summon: Countdown,
        dash: Countdown,
    },
    StarForge {
        cycle: u32,
        summon: Countdown,
        petals: Countdown,
        volley: Countdown,
    },
}

impl Behavior {
    fn new(kind: ArchetypeKind, i: u32) -> Self {
        match kind {
            ArchetypeKind::HexSentinel => Behavior::HexSentinel {
                ring: Countdown::new(scaled_period(120, 6, 40, i)),
                stream: Countdown::new(scaled_period(12, 1, 6, i)),
            },
            ArchetypeKind::VortexEye => Behavior::VortexEye {
                drift: Countdown::new(6),
                cluster: Countdown::new(scaled_period(60, 3, 30, i)),
                teleport: Countdown::new(scaled_period(180, 8, 90, i)),
            },
            ArchetypeKind::SpiralCore => Behavior::SpiralCore {
                spiral: Countdown::new(scaled_period(10, 1, 4, i)),
                charge_timer: Countdown::new(scaled_period(300, 12, 200, i)),
                charge: 0,
            },
            ArchetypeKind::ShardKing => Behavior::ShardKing {
                drift: Countdown::new(8),
                summon: Countdown::new(scaled_period(140, 6, 60, i)),
                dash: Countdown::new(scaled_period(90, 4, 60, i)),
            },
            ArchetypeKind::StarForge => Behavior::StarForge {
                cycle: 0,
                summon: Countdown::new(80),
                petals: Countdown::new(scaled_period(12, 1, 6, i)),
                volley: Countdown::new(scaled_period(90, 4, 40, i)),
            },
        }
    }
}

/// A boss instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub id: u32,
    pub kind: ArchetypeKind,
    /// 1-based boss index (scales stats and attack rates)
    pub index: u32,
    pub body: Body,
    pub health: f32,
    pub max_health: f32,
    /// Hit radius
    pub size: f32,
    pub sides: u32,
    pub phase: BossPhase,
    /// Ticks spent Active
    pub ticks: u32,
    /// Visual rotation (radians)
    pub spin: f32,
    pub behavior: Behavior,
}

/// Spawn height above the top edge
const SPAWN_Y: f32 = -140.0;

impl Boss {
    pub fn new(id: u32, kind: ArchetypeKind, index: u32, bounds: Vec2) -> Self {
        let index = index.max(1);
        let i = index as f32;
        let (sides, size, health) = match kind {
            ArchetypeKind::HexSentinel => (6, 70.0 + 8.0 * i, 120.0 + 60.0 * i),
            ArchetypeKind::VortexEye => (8, 60.0 + 7.0 * i, 140.0 + 60.0 * i),
            ArchetypeKind::SpiralCore => (12, 80.0 + 6.0 * i, 160.0 + 70.0 * i),
            ArchetypeKind::ShardKing => (9, 60.0 + 7.0 * i, 150.0 + 60.0 * i),
            ArchetypeKind::StarForge => (7, 68.0 + 6.0 * i, 180.0 + 80.0 * i),
        };
        Self {
            id,
            kind,
            index,
            body: Body::new(Vec2::new(bounds.x / 2.0, SPAWN_Y), Vec2::ZERO),
            health,
            max_health: health,
            size,
            sides,
            phase: BossPhase::Entering,
            ticks: 0,
            spin: 0.0,
            behavior: Behavior::new(kind, index),
        }
    }

    /// Where the entrance descent stops
    pub fn hover_y(bounds: Vec2) -> f32 {
        bounds.y / 3.0
    }

    /// Advance one tick
    pub fn update<C: BossContext>(&mut self, ctx: &mut C, bounds: Vec2) {
        if self.phase == BossPhase::Defeated {
            return;
        }
        self.spin = crate::normalize_angle(self.spin + 0.6f32.to_radians());

        if self.phase == BossPhase::Entering {
            self.body.vel = Vec2::new(0.0, 1.6 + self.index as f32 * 0.05);
            self.body.advance();
            let hover = Self::hover_y(bounds);
            if self.body.pos.y >= hover {
                self.body.teleport(Vec2::new(self.body.pos.x, hover));
                self.phase = BossPhase::Active;
                log::debug!("{:?} #{} active", self.kind, self.index);
            }
            return;
        }

        self.ticks += 1;
        let t = self.ticks as f32;
        let i = self.index;
        let fi = i as f32;
        let body = &mut self.body;
        body.vel = Vec2::ZERO;

        match &mut self.behavior {
            Behavior::HexSentinel { ring, stream } => {
                if ring.tick() {
                    let n = 8 + i;
                    let speed = 5.0 + (fi * 0.6).min(6.0);
                    for k in 0..n {
                        let jitter = ctx.rng().random_range(-6.0f32..6.0);
                        let deg = 360.0 / n as f32 * k as f32 + jitter;
                        ctx.spawn_projectile(body.pos, deg.to_radians(), speed, 1.0, false);
                    }
                }
                if stream.tick() {
                    let deg = (t * 2.0) % 360.0;
                    for off in [-3.0f32, 0.0, 3.0] {
                        ctx.spawn_projectile(body.pos, (deg + off).to_radians(), 10.0 + 0.2 * fi, 1.0, false);
                    }
                }
            }

            Behavior::VortexEye {
                drift,
                cluster,
                teleport,
            } => {
                if drift.tick() {
                    body.vel = (ctx.player_pos() - body.pos).normalize_or_zero() * 0.6;
                    body.advance();
                }
                if cluster.tick() {
                    for _ in 0..(2 + i / 2) {
                        let theta = ctx.rng().random_range(0.0..std::f32::consts::TAU);
                        ctx.spawn_projectile(body.pos, theta, 6.0 + 0.2 * fi, 1.0, true);
                    }
                }
                if teleport.tick() {
                    let player = ctx.player_pos();
                    let dx = ctx.rng().random_range(-120..=120) as f32;
                    let dy = ctx.rng().random_range(-120..=120) as f32;
                    let margin = Vec2::splat(80.0);
                    body.teleport(clamp_point(player + Vec2::new(dx, dy), margin, bounds - margin));
                    let aim = heading_to(body.pos, player);
                    for step in [-4.0f32, -2.0, 0.0, 2.0, 4.0] {
                        ctx.spawn_projectile(body.pos, aim + (step * 6.0).to_radians(), 11.0, 1.1, false);
                    }
                }
            }

            Behavior::SpiralCore {
                spiral,
                charge_timer,
                charge,
            } => {
                body.move_to(Vec2::new(
                    bounds.x / 2.0 + (t * 0.02).cos() * (50.0 + 6.0 * fi),
                    bounds.y / 3.0 + (t * 0.02).sin() * (30.0 + 4.0 * fi),
                ));
                if spiral.tick() {
                    let n = 10 + 2 * i;
                    let base = (t * 6.0) % 360.0;
                    for arm in 0..3 {
                        let arm_deg = base + arm as f32 * 120.0;
                        for j in 0..n {
                            let jf = j as f32;
                            let deg = arm_deg + jf * (360.0 / n as f32) + jf * 0.6;
                            ctx.spawn_projectile(body.pos, deg.to_radians(), 5.0 + jf * 0.02, 0.9, false);
                        }
                    }
                }
                if charge_timer.tick() && *charge == 0 {
                    *charge = CHARGE_TICKS;
                }
                if *charge > 0 {
                    *charge -= 1;
                    if *charge % CHARGE_VOLLEY_EVERY == 0 {
                        let aim = heading_to(body.pos, ctx.player_pos());
                        for off in [-8.0f32, -4.0, 0.0, 4.0, 8.0] {
                            ctx.spawn_projectile(body.pos, aim + off.to_radians(), 16.0 + 0.3 * fi, 2.0, false);
                        }
                    }
                }
            }

            Behavior::ShardKing {
                drift,
                summon,
                dash,
            } => {
                if drift.tick() {
                    let wobble = Vec2::new((t * 0.03).cos(), (t * 0.03).sin());
                    body.vel = wobble * (1.0 + 0.02 * fi);
                    body.advance();
                }
                if summon.tick() {
                    for _ in 0..(1 + i / 3) {
                        let rng = ctx.rng();
                        let offset = Vec2::new(
                            rng.random_range(-40.0f32..40.0),
                            rng.random_range(-40.0f32..40.0),
                        );
                        let class = if rng.random_bool(0.5) {
                            ShapeClass::Triangle
                        } else {
                            ShapeClass::Square
                        };
                        let size = rng.random_range(12..=18) as f32;
                        ctx.spawn_hostile(body.pos + offset, class, size);
                    }
                }
                if dash.tick() {
                    let dir = (ctx.player_pos() - body.pos).normalize_or_zero();
                    if dir != Vec2::ZERO {
                        body.teleport(clamp_point(body.pos + dir * 160.0, Vec2::ZERO, bounds));
                        let m = 12 + 2 * i;
                        for k in 0..m {
                            let jitter = ctx.rng().random_range(-6.0f32..6.0);
                            let deg = k as f32 * (360.0 / m as f32) + jitter;
                            ctx.spawn_projectile(body.pos, deg.to_radians(), 7.0 + 0.1 * fi, 1.1, false);
                        }
                    }
                }
            }

            Behavior::StarForge {
                cycle,
                summon,
                petals,
                volley,
            } => {
                body.move_to(Vec2::new(
                    bounds.x / 2.0 + (t * 0.015).sin() * (90.0 + 8.0 * fi),
                    bounds.y / 3.0 + (t * 0.01).cos() * (40.0 + 5.0 * fi),
                ));
                *cycle += 1;
                match forge_phase(*cycle) {
                    ForgePhase::Summon => {
                        if summon.tick() {
                            for _ in 0..(2 + i / 3) {
                                let rng = ctx.rng();
                                let offset = Vec2::new(
                                    rng.random_range(-60.0f32..60.0),
                                    rng.random_range(-60.0f32..60.0),
                                );
                                let class = ShapeClass::from_tier(rng.random_range(0..3));
                                let size = rng.random_range(12..=20) as f32;
                                ctx.spawn_hostile(body.pos + offset, class, size);
                            }
                        }
                    }
                    ForgePhase::Petals => {
                        if petals.tick() {
                            let count = 5 + i % 4;
                            for p in 0..count {
                                let base = (t * 8.0 + p as f32 * (360.0 / count as f32)) % 360.0;
                                for step in (0..360).step_by(30) {
                                    let step = step as f32;
                                    ctx.spawn_projectile(
                                        body.pos,
                                        (base + step).to_radians(),
                                        5.0 + step / 90.0,
                                        1.0,
                                        false,
                                    );
                                }
                            }
                        }
                    }
                    ForgePhase::Volley => {
                        if volley.tick() {
                            let aim = heading_to(body.pos, ctx.player_pos());
                            for k in -2..=2 {
                                let off = (k as f32 * 6.0).to_radians();
                                ctx.spawn_projectile(body.pos, aim + off, 13.0 + 0.4 * fi, 2.2, false);
                            }
                        }
                        if *cycle > FORGE_CYCLE_END {
                            *cycle = 0;
                        }
                    }
                }
            }
        }
    }

    /// Apply damage; true exactly once, on the transition to Defeated
    pub fn hit(&mut self, damage: f32) -> bool {
        if self.phase == BossPhase::Defeated {
            return false;
        }
        self.health -= damage.max(0.0);
        if self.health <= 0.0 {
            self.phase = BossPhase::Defeated;
            true
        } else {
            false
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.phase == BossPhase::Defeated
    }

    pub fn health_ratio(&self) -> f32 {
        (self.health / self.max_health.max(1.0)).clamp(0.0, 1.0)
    }

    /// SpiralCore wind-up (for the presentation layer)
    pub fn is_charging(&self) -> bool {
        matches!(self.behavior, Behavior::SpiralCore { charge, .. } if charge > 0)
    }

    /// Current StarForge segment, if this is a StarForge
    pub fn forge_phase(&self) -> Option<ForgePhase> {
        match self.behavior {
            Behavior::StarForge { cycle, .. } => Some(forge_phase(cycle)),
            _ => None,
        }
    }

    /// Coins granted on defeat
    pub fn coin_reward(&self) -> u64 {
        220 + 80 * self.index as u64
    }

    /// Score granted on defeat
    pub fn score_reward(&self) -> u64 {
        1000 + 200 * self.index as u64
    }
}

fn forge_phase(cycle: u32) -> ForgePhase {
    if cycle < FORGE_SUMMON_END {
        ForgePhase::Summon
    } else if cycle < FORGE_PETALS_END {
        ForgePhase::Petals
    } else {
        ForgePhase::Volley
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const BOUNDS: Vec2 = Vec2::new(900.0, 700.0);

    /// Records spawn requests instead of touching a run
    struct Recorder {
        player: Vec2,
        rng: Pcg32,
        hostiles: Vec<(Vec2, ShapeClass, f32)>,
        shots: Vec<(Vec2, f32, f32, f32, bool)>,
    }

    impl Recorder {
        fn new(player: Vec2) -> Self {
            Self {
                player,
                rng: Pcg32::seed_from_u64(9),
                hostiles: Vec::new(),
                shots: Vec::new(),
            }
        }
    }

    impl BossContext for Recorder {
        fn player_pos(&self) -> Vec2 {
            self.player
        }
        fn spawn_hostile(&mut self, pos: Vec2, class: ShapeClass, size: f32) {
            self.hostiles.push((pos, class, size));
        }
        fn spawn_projectile(&mut self, origin: Vec2, heading: f32, speed: f32, damage: f32, homing: bool) {
            self.shots.push((origin, heading, speed, damage, homing));
        }
        fn rng(&mut self) -> &mut Pcg32 {
            &mut self.rng
        }
    }

    fn active_boss(kind: ArchetypeKind, index: u32) -> Boss {
        let mut boss = Boss::new(1, kind, index, BOUNDS);
        boss.phase = BossPhase::Active;
        boss.body.pos = Vec2::new(450.0, 233.0);
        boss
    }

    #[test]
    fn test_round_robin() {
        let roster = ArchetypeKind::ALL;
        assert_eq!(ArchetypeKind::for_boss_index(1, &roster), ArchetypeKind::HexSentinel);
        assert_eq!(ArchetypeKind::for_boss_index(5, &roster), ArchetypeKind::StarForge);
        assert_eq!(ArchetypeKind::for_boss_index(6, &roster), ArchetypeKind::HexSentinel);
        assert_eq!(ArchetypeKind::for_boss_index(7, &roster), ArchetypeKind::VortexEye);
    }

    #[test]
    fn test_countdown_fires_every_period() {
        let mut c = Countdown::new(3);
        let fired: Vec<bool> = (0..7).map(|_| c.tick()).collect();
        assert_eq!(fired, vec![false, false, true, false, false, true, false]);
    }

    #[test]
    fn test_scaled_period_floors() {
        assert_eq!(scaled_period(120, 6, 40, 1), 114);
        assert_eq!(scaled_period(120, 6, 40, 50), 40);
    }

    #[test]
    fn test_entering_descends_then_activates() {
        let mut boss = Boss::new(1, ArchetypeKind::HexSentinel, 1, BOUNDS);
        let mut ctx = Recorder::new(Vec2::new(450.0, 600.0));
        assert_eq!(boss.phase, BossPhase::Entering);
        let mut guard = 0;
        while boss.phase == BossPhase::Entering {
            boss.update(&mut ctx, BOUNDS);
            guard += 1;
            assert!(guard < 1000);
        }
        assert_eq!(boss.body.pos.y, Boss::hover_y(BOUNDS));
        assert_eq!(boss.body.vel, Vec2::ZERO);
        // No attacks during the entrance
        assert!(ctx.shots.is_empty());
    }

    #[test]
    fn test_orbit_moves_through_body() {
        let mut boss = active_boss(ArchetypeKind::SpiralCore, 1);
        let mut ctx = Recorder::new(Vec2::new(450.0, 650.0));
        let start = boss.body.pos;
        boss.update(&mut ctx, BOUNDS);
        assert_ne!(boss.body.pos, start);
        assert!((boss.body.vel - (boss.body.pos - start)).length() < 1e-4);

        // ShardKing idles between drift steps
        let mut boss = active_boss(ArchetypeKind::ShardKing, 1);
        let start = boss.body.pos;
        boss.update(&mut ctx, BOUNDS);
        assert_eq!(boss.body.pos, start);
        assert_eq!(boss.body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_defeat_transition_happens_once() {
        let mut boss = Boss::new(1, ArchetypeKind::VortexEye, 1, BOUNDS);
        let max = boss.max_health;
        assert!(!boss.hit(max - 1.0));
        assert!(boss.hit(5.0));
        assert!(!boss.hit(5.0));
        assert!(boss.is_defeated());
        assert_eq!(boss.health_ratio(), 0.0);

        // A defeated boss no longer acts
        let mut ctx = Recorder::new(Vec2::ZERO);
        for _ in 0..500 {
            boss.update(&mut ctx, BOUNDS);
        }
        assert!(ctx.shots.is_empty());
    }

    #[test]
    fn test_hex_sentinel_ring() {
        let mut boss = active_boss(ArchetypeKind::HexSentinel, 1);
        let mut ctx = Recorder::new(Vec2::new(450.0, 600.0));
        for _ in 0..114 {
            boss.update(&mut ctx, BOUNDS);
        }
        // 114 / 11 = 10 stream bursts of 3, plus one ring of 9
        assert_eq!(ctx.shots.len(), 10 * 3 + 9);
        assert!(ctx.shots.iter().all(|s| !s.4));
    }

    #[test]
    fn test_vortex_homing_clusters_and_teleport() {
        let mut boss = active_boss(ArchetypeKind::VortexEye, 1);
        let player = Vec2::new(300.0, 500.0);
        let mut ctx = Recorder::new(player);
        for _ in 0..57 {
            boss.update(&mut ctx, BOUNDS);
        }
        assert_eq!(ctx.shots.len(), 2);
        assert!(ctx.shots.iter().all(|s| s.4));

        for _ in 57..172 {
            boss.update(&mut ctx, BOUNDS);
        }
        // Teleported within 120 of the player (per axis) and stayed on screen
        assert!((boss.body.pos.x - player.x).abs() <= 121.0);
        assert!((boss.body.pos.y - player.y).abs() <= 121.0);
        assert!(boss.body.pos.x >= 80.0 && boss.body.pos.y <= BOUNDS.y - 80.0);
        let aimed = ctx.shots.iter().filter(|s| (s.2 - 11.0).abs() < 1e-5).count();
        assert_eq!(aimed, 5);
    }

    #[test]
    fn test_spiral_core_charge_is_telegraphed() {
        let mut boss = active_boss(ArchetypeKind::SpiralCore, 1);
        let mut ctx = Recorder::new(Vec2::new(450.0, 650.0));
        for _ in 0..288 {
            boss.update(&mut ctx, BOUNDS);
        }
        assert!(boss.is_charging());
        let heavy_before = ctx.shots.iter().filter(|s| s.3 == 2.0).count();
        assert_eq!(heavy_before, 0);
        for _ in 0..60 {
            boss.update(&mut ctx, BOUNDS);
        }
        assert!(!boss.is_charging());
        let heavy = ctx.shots.iter().filter(|s| s.3 == 2.0).count();
        assert_eq!(heavy, 5 * 5);
    }

    #[test]
    fn test_shard_king_summons_and_dashes() {
        let mut boss = active_boss(ArchetypeKind::ShardKing, 1);
        let player = Vec2::new(450.0, 650.0);
        let mut ctx = Recorder::new(player);
        let before = boss.body.pos.distance(player);
        for _ in 0..86 {
            boss.update(&mut ctx, BOUNDS);
        }
        // First dash at tick 86 moves the boss toward the player and fires a ring
        assert!(boss.body.pos.distance(player) < before - 100.0);
        assert_eq!(ctx.shots.len(), 14);

        for _ in 86..134 {
            boss.update(&mut ctx, BOUNDS);
        }
        assert_eq!(ctx.hostiles.len(), 1);
        let (_, class, size) = ctx.hostiles[0];
        assert!(matches!(class, ShapeClass::Triangle | ShapeClass::Square));
        assert!((12.0..=18.0).contains(&size));
    }

    #[test]
    fn test_star_forge_cycles_phases() {
        let mut boss = active_boss(ArchetypeKind::StarForge, 1);
        let mut ctx = Recorder::new(Vec2::new(450.0, 650.0));
        assert_eq!(boss.forge_phase(), Some(ForgePhase::Summon));
        for _ in 0..199 {
            boss.update(&mut ctx, BOUNDS);
        }
        assert_eq!(ctx.hostiles.len(), 2 * 2);
        assert!(ctx.shots.is_empty());

        boss.update(&mut ctx, BOUNDS);
        assert_eq!(boss.forge_phase(), Some(ForgePhase::Petals));
        for _ in 0..200 {
            boss.update(&mut ctx, BOUNDS);
        }
        assert_eq!(boss.forge_phase(), Some(ForgePhase::Volley));
        assert!(!ctx.shots.is_empty());

        for _ in 0..201 {
            boss.update(&mut ctx, BOUNDS);
        }
        assert_eq!(boss.forge_phase(), Some(ForgePhase::Summon));
        assert!(ctx.shots.iter().any(|s| (s.3 - 2.2).abs() < 1e-6));
    }

    #[test]
    fn test_rewards_scale_with_index() {
        let boss = Boss::new(1, ArchetypeKind::StarForge, 2, BOUNDS);
        assert_eq!(boss.coin_reward(), 380);
        assert_eq!(boss.score_reward(), 1400);
        assert_eq!(boss.max_health, 340.0);
    }
}
