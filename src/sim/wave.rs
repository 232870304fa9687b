//! Wave director
//!
//! Spawning -> InProgress -> Complete -> (delay) -> Spawning(next).
//! Every Nth wave is a boss wave: one boss, no normal spawns.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::boss::{ArchetypeKind, Boss};
use super::hostile::ShapeClass;
use super::state::{GameEvent, GameState};

/// Hostiles enter this far outside the screen edge
const SPAWN_MARGIN: f32 = 60.0;
/// Hostile size range for normal waves
const MIN_SPAWN_SIZE: u32 = 18;
const MAX_SPAWN_SIZE: u32 = 34;

/// Difficulty growth per cleared wave
const NORMAL_DIFFICULTY_STEP: f32 = 0.02;
const BOSS_DIFFICULTY_STEP: f32 = 0.06;
/// Coins for clearing a normal wave
const WAVE_CLEAR_COINS: u64 = 25;

/// Wave progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Hostiles (or the boss) are live
    InProgress,
    /// Rewards granted; next wave spawns when `delay` runs out
    Complete { delay: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveState {
    /// Wave number (1-based); advances at completion
    pub number: u32,
    /// Non-decreasing difficulty factor
    pub difficulty: f32,
    pub phase: WavePhase,
    /// Whether the wave in progress is a boss wave
    pub boss_wave: bool,
}

impl Default for WaveState {
    fn default() -> Self {
        Self {
            number: 1,
            difficulty: 1.0,
            phase: WavePhase::InProgress,
            boss_wave: false,
        }
    }
}

impl WaveState {
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, WavePhase::Complete { .. })
    }

    /// Ticks until the next wave spawns (0 while a wave is in progress)
    pub fn delay_remaining(&self) -> u32 {
        match self.phase {
            WavePhase::Complete { delay } => delay,
            WavePhase::InProgress => 0,
        }
    }
}

/// What a given wave number spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavePlan {
    Normal {
        count: u32,
        /// Exclusive upper bound on shape tier
        tier_limit: usize,
    },
    Boss {
        /// 1-based boss index
        index: u32,
    },
}

impl WavePlan {
    pub fn for_wave(number: u32, boss_interval: u32) -> Self {
        let interval = boss_interval.max(1);
        if number > 0 && number % interval == 0 {
            return WavePlan::Boss {
                index: number / interval,
            };
        }
        let count = (3 + (number as f32 * 1.6).floor() as u32).max(3);
        let tier_limit = (1 + number as usize / 3).min(ShapeClass::ALL.len());
        WavePlan::Normal { count, tier_limit }
    }
}

/// Score bonus for clearing a normal wave
pub fn clear_bonus(difficulty: f32) -> u64 {
    (50.0 * (1.0 + 0.1 * difficulty)).floor() as u64
}

/// Spawn the wave `state.wave.number`
pub fn spawn_wave(state: &mut GameState) {
    let number = state.wave.number;
    let plan = WavePlan::for_wave(number, state.config.boss_wave_interval);
    state.wave.phase = WavePhase::InProgress;

    match plan {
        WavePlan::Boss { index } => {
            let kind = ArchetypeKind::for_boss_index(index, &state.config.boss_roster);
            let id = state.next_entity_id();
            state.boss = Some(Boss::new(id, kind, index, state.bounds()));
            state.wave.boss_wave = true;
            log::info!("Wave {}: boss #{} ({:?})", number, index, kind);
            state.events.push(GameEvent::BossSpawned { kind, index });
        }
        WavePlan::Normal { count, tier_limit } => {
            let scale = 1.0 + 0.04 * state.wave.difficulty;
            for _ in 0..count {
                let pos = edge_position(state);
                let tier = state.rng.random_range(0..tier_limit.max(1));
                let size = state.rng.random_range(MIN_SPAWN_SIZE..=MAX_SPAWN_SIZE) as f32;
                state.spawn_hostile(pos, ShapeClass::from_tier(tier), size, scale);
            }
            state.wave.boss_wave = false;
            log::info!(
                "Wave {}: {} hostiles, tiers 0..{}, difficulty {:.2}",
                number,
                count,
                tier_limit,
                state.wave.difficulty
            );
        }
    }

    state.events.push(GameEvent::WaveStarted {
        wave: number,
        boss_wave: state.wave.boss_wave,
    });
}

/// Random point just off one of the four screen edges
fn edge_position(state: &mut GameState) -> Vec2 {
    let bounds = state.bounds();
    let rng = &mut state.rng;
    match rng.random_range(0..4) {
        0 => Vec2::new(rng.random_range(0.0..bounds.x), -SPAWN_MARGIN),
        1 => Vec2::new(rng.random_range(0.0..bounds.x), bounds.y + SPAWN_MARGIN),
        2 => Vec2::new(-SPAWN_MARGIN, rng.random_range(0.0..bounds.y)),
        _ => Vec2::new(bounds.x + SPAWN_MARGIN, rng.random_range(0.0..bounds.y)),
    }
}

/// Whether the wave in progress has been cleared
pub fn is_cleared(state: &GameState) -> bool {
    if state.wave.boss_wave {
        state.boss.is_none()
            && state.boss_projectiles.is_empty()
            && state.pending_boss_projectiles.is_empty()
    } else {
        state.hostiles.is_empty() && state.pending_hostiles.is_empty() && state.boss.is_none()
    }
}

/// Check for completion and grant the wave reward
///
/// Runs every tick; only the InProgress -> Complete transition grants
/// anything, so waiting out the delay never re-triggers rewards.
pub fn evaluate_completion(state: &mut GameState) {
    if state.wave.is_complete() || !is_cleared(state) {
        return;
    }

    let cleared = state.wave.number;
    let (bonus, delay) = if state.wave.boss_wave {
        state.wave.difficulty += BOSS_DIFFICULTY_STEP;
        (0, state.config.boss_wave_delay_ticks)
    } else {
        let bonus = clear_bonus(state.wave.difficulty);
        state.score += bonus;
        state.coins += WAVE_CLEAR_COINS;
        state.wave.difficulty += NORMAL_DIFFICULTY_STEP;
        (bonus, state.config.wave_delay_ticks)
    };

    state.wave.number += 1;
    state.wave.phase = WavePhase::Complete { delay };
    log::info!(
        "Wave {} cleared (+{} score), next in {:.1}s",
        cleared,
        bonus,
        state.config.ticks_to_secs(delay)
    );
    state.events.push(GameEvent::WaveCleared {
        wave: cleared,
        bonus,
    });
}

/// Count down the inter-wave delay and spawn when it elapses
pub fn advance_countdown(state: &mut GameState) {
    let WavePhase::Complete { delay } = state.wave.phase else {
        return;
    };
    if delay > 1 {
        state.wave.phase = WavePhase::Complete { delay: delay - 1 };
    } else {
        spawn_wave(state);
    }
}
