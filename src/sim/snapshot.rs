//! Read-only presentation view of a run
//!
//! Everything a renderer or HUD needs for one frame, detached from the live
//! state and serializable as JSON.

use glam::Vec2;
use serde::Serialize;

use super::boss::{ArchetypeKind, BossPhase, ForgePhase};
use super::hostile::ShapeClass;
use super::pickup::PickupKind;
use super::player::WeaponMode;
use super::projectile::Owner;
use super::state::{GameEvent, GameState, RunPhase};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub heading: f32,
    pub radius: f32,
    pub invulnerable: bool,
    pub loadout: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HostileView {
    pub id: u32,
    pub class: ShapeClass,
    pub pos: Vec2,
    pub size: f32,
    pub sides: u32,
    pub rotation: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub id: u32,
    pub owner: Owner,
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BossView {
    pub kind: ArchetypeKind,
    pub index: u32,
    pub phase: BossPhase,
    pub pos: Vec2,
    pub size: f32,
    pub sides: u32,
    pub spin: f32,
    pub health_ratio: f32,
    /// SpiralCore wind-up telegraph
    pub charging: bool,
    pub forge_phase: Option<ForgePhase>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PickupView {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub color: u32,
    pub size: f32,
    pub alpha: f32,
}

/// One frame of presentation state
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: RunPhase,
    pub wave: u32,
    pub difficulty: f32,
    /// Seconds until the next wave (0 while a wave is in progress)
    pub next_wave_in: f32,
    pub score: u64,
    pub coins: u64,
    pub lives: u32,
    pub weapon_mode: WeaponMode,
    /// Seconds left in the current weapon mode
    pub weapon_time_left: f32,
    pub boss_health_ratio: Option<f32>,
    pub run_over: bool,
    pub final_score: Option<u64>,
    pub player: PlayerView,
    pub boss: Option<BossView>,
    pub hostiles: Vec<HostileView>,
    pub projectiles: Vec<ProjectileView>,
    pub pickups: Vec<PickupView>,
    pub particles: Vec<ParticleView>,
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let config = &state.config;
        let player = &state.player;

        let boss = state.boss.as_ref().map(|b| BossView {
            kind: b.kind,
            index: b.index,
            phase: b.phase,
            pos: b.body.pos,
            size: b.size,
            sides: b.sides,
            spin: b.spin,
            health_ratio: b.health_ratio(),
            charging: b.is_charging(),
            forge_phase: b.forge_phase(),
        });

        let projectiles = state
            .projectiles
            .iter()
            .chain(state.boss_projectiles.iter())
            .map(|p| ProjectileView {
                id: p.id,
                owner: p.owner,
                pos: p.body.pos,
                radius: p.radius,
            })
            .collect();

        Self {
            tick: state.time_ticks,
            phase: state.phase,
            wave: state.wave.number,
            difficulty: state.wave.difficulty,
            next_wave_in: config.ticks_to_secs(state.wave.delay_remaining()),
            score: state.score,
            coins: state.coins,
            lives: player.lives,
            weapon_mode: player.weapon_mode,
            weapon_time_left: config.ticks_to_secs(player.weapon_ticks),
            boss_health_ratio: boss.as_ref().map(|b| b.health_ratio),
            run_over: state.is_game_over(),
            final_score: state.final_score,
            player: PlayerView {
                pos: player.body.pos,
                heading: player.heading,
                radius: player.radius,
                invulnerable: player.invulnerable_ticks > 0,
                loadout: player.stats.name.clone(),
            },
            boss,
            hostiles: state
                .hostiles
                .iter()
                .map(|h| HostileView {
                    id: h.id,
                    class: h.class,
                    pos: h.body.pos,
                    size: h.size,
                    sides: h.class.sides(),
                    rotation: h.rotation,
                })
                .collect(),
            projectiles,
            pickups: state
                .pickups
                .iter()
                .map(|p| PickupView {
                    id: p.id,
                    kind: p.kind,
                    pos: p.pos,
                    radius: p.radius,
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.body.pos,
                    color: p.color,
                    size: p.size,
                    alpha: p.alpha(),
                })
                .collect(),
            events: state.events.clone(),
        }
    }

    pub fn to_json(&self) -> crate::SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    #[test]
    fn test_capture_fresh_run() {
        let state = GameState::new(8, SimConfig::default());
        let snap = Snapshot::capture(&state);
        assert_eq!(snap.wave, 1);
        assert_eq!(snap.lives, 3);
        assert_eq!(snap.hostiles.len(), state.hostiles.len());
        assert!(snap.boss.is_none());
        assert!(snap.boss_health_ratio.is_none());
        assert!(!snap.run_over);
        assert_eq!(snap.player.loadout, "Scout");
        assert_eq!(snap.weapon_mode, WeaponMode::Normal);
    }

    #[test]
    fn test_weapon_time_in_seconds() {
        let mut state = GameState::new(8, SimConfig::default());
        state.player.set_weapon_mode(WeaponMode::Spread, 300);
        let snap = Snapshot::capture(&state);
        assert!((snap.weapon_time_left - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_boss_health_ratio() {
        let mut state = GameState::new(8, SimConfig::default());
        state.wave.number = 4;
        crate::sim::wave::spawn_wave(&mut state);
        if let Some(boss) = state.boss.as_mut() {
            boss.health = boss.max_health / 2.0;
        }
        let snap = Snapshot::capture(&state);
        assert_eq!(snap.boss_health_ratio, Some(0.5));
        assert_eq!(snap.boss.as_ref().map(|b| b.kind), Some(ArchetypeKind::HexSentinel));
    }

    #[test]
    fn test_json_output() {
        let state = GameState::new(8, SimConfig::default());
        let json = Snapshot::capture(&state).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["wave"], 1);
        assert_eq!(value["run_over"], false);
        assert!(value["hostiles"].is_array());
    }
}
