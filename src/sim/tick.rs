//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::collision;
use super::state::{GameState, RunPhase};
use super::wave;
use crate::consts::AIM_DEAD_ZONE_DEG;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Rotate steps this tick (negative = counter-clockwise, 0 = none)
    pub rotate: f32,
    /// Thrust held
    pub thrust: bool,
    /// Fire held
    pub fire: bool,
    /// Absolute aim point; overrides `rotate`
    pub aim_at: Option<Vec2>,
    /// Pause toggle (edge-triggered)
    pub pause: bool,
    /// Restart (edge-triggered, Game Over only)
    pub restart: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Autopilot: hostiles closer than this take priority over pickups
const THREAT_RADIUS: f32 = 150.0;

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if input.restart && state.phase == RunPhase::GameOver {
        log::info!("Restarting run with seed {}", state.seed);
        let config = state.config.clone();
        *state = GameState::new(state.seed, config);
        return;
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            RunPhase::Playing => {
                state.phase = RunPhase::Paused;
                log::info!("Paused");
                return;
            }
            RunPhase::Paused => {
                state.phase = RunPhase::Playing;
                log::info!("Resumed");
            }
            RunPhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    if state.phase != RunPhase::Playing {
        return;
    }

    state.time_ticks += 1;

    let input = if input.idle_mode {
        autopilot(state, input)
    } else {
        input.clone()
    };

    let bounds = state.bounds();

    // 1. Player
    advance_player(state, &input, bounds);

    // 2. Projectiles (expired ones culled)
    let hostile_targets: Vec<Vec2> = state.hostiles.iter().map(|h| h.body.pos).collect();
    let gain = state.config.homing_gain;
    for p in state.projectiles.iter_mut() {
        p.update(&hostile_targets, gain, bounds);
    }
    state.projectiles.retain(|p| !p.is_expired());

    let player_target = [state.player.body.pos];
    for p in state.boss_projectiles.iter_mut() {
        p.update(&player_target, gain, bounds);
    }
    state.boss_projectiles.retain(|p| !p.is_expired());

    // 3. Hostiles
    let player_pos = state.player.body.pos;
    let difficulty = state.wave.difficulty;
    let padding = state.config.hostile_wrap_padding;
    for h in state.hostiles.iter_mut() {
        h.update(player_pos, difficulty, bounds, padding);
    }

    // 4. Boss (spawns land in the pending buffers)
    if let Some(mut boss) = state.boss.take() {
        boss.update(&mut state.spawn_queue(), bounds);
        state.boss = Some(boss);
    }

    // 5. Pickups and particles
    for p in state.pickups.iter_mut() {
        p.update();
    }
    state.pickups.retain(|p| p.is_alive());
    for p in state.particles.iter_mut() {
        p.update();
    }
    state.particles.retain(|p| p.is_alive());

    // 6. Collisions
    collision::resolve(state);
    if state.is_game_over() {
        state.pending_hostiles.clear();
        state.pending_boss_projectiles.clear();
        state.normalize_order();
        return;
    }
    state.merge_pending();

    // 7. Wave completion
    wave::evaluate_completion(state);

    // 8. Next wave countdown
    wave::advance_countdown(state);

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Steering, movement and firing for the player
fn advance_player(state: &mut GameState, input: &TickInput, bounds: Vec2) {
    let step = state.config.rotation_step_deg.to_radians();
    let player = &mut state.player;

    if let Some(target) = input.aim_at {
        player.aim_at(target, step, AIM_DEAD_ZONE_DEG.to_radians());
    } else if input.rotate != 0.0 {
        player.rotate(input.rotate, step);
    }
    if input.thrust {
        player.thrust();
    }
    player.update(state.config.player_drag, bounds);

    if input.fire {
        let shots = player.shoot(state.config.rapid_fire_delay);
        let muzzle = player.body.pos + crate::heading_vec(player.heading) * player.radius;
        for shot in shots {
            state.spawn_player_projectile(muzzle, shot.heading, shot.speed, shot.damage, shot.flags);
        }
    }
}

/// Demo-mode input: aim at the nearest threat and fire, grab pickups when
/// nothing is close
fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let mut input = input.clone();
    let me = state.player.body.pos;

    let nearest_hostile = state
        .hostiles
        .iter()
        .map(|h| h.body.pos)
        .min_by(|a, b| {
            a.distance_squared(me)
                .partial_cmp(&b.distance_squared(me))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    let threat = nearest_hostile.or(state.boss.as_ref().map(|b| b.body.pos));
    let threat_close = nearest_hostile.is_some_and(|p| crate::distance(p, me) < THREAT_RADIUS);

    let nearest_pickup = state
        .pickups
        .iter()
        .map(|p| p.pos)
        .min_by(|a, b| {
            a.distance_squared(me)
                .partial_cmp(&b.distance_squared(me))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    match (nearest_pickup, threat) {
        (Some(pickup), _) if !threat_close => {
            input.aim_at = Some(pickup);
            input.thrust = true;
            input.fire = true;
        }
        (_, Some(target)) => {
            input.aim_at = Some(target);
            input.fire = true;
            input.thrust = false;
        }
        _ => {
            input.aim_at = Some(state.bounds() / 2.0);
            input.thrust = me.distance(state.bounds() / 2.0) > 80.0;
        }
    }
    input
}
