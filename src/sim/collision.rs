//! Collision resolution
//!
//! Circle-vs-circle overlap only; the interesting part is ordering. Passes run
//! in a fixed precedence and each one decides on stable data first, then
//! removes by id, so an entity consumed by an earlier pass (or earlier in the
//! same pass) is never processed twice.

use glam::Vec2;
use rand::Rng;

use super::hostile::HostileShape;
use super::pickup::PickupKind;
use super::player::WeaponMode;
use super::state::{BOSS_COLOR, GameEvent, GameState, PICKUP_COLOR, PLAYER_COLOR};

/// Particle bursts per event
const HOSTILE_BURST: usize = 10;
const BOSS_BURST: usize = 60;
const PROJECTILE_HIT_BURST: usize = 18;
const CONTACT_HIT_BURST: usize = 20;
const PICKUP_BURST: usize = 14;

/// Score for collecting an extra life
const LIFE_PICKUP_SCORE: u64 = 100;

/// What the resolver did this tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionSummary {
    pub hostiles_destroyed: u32,
    pub boss_defeated: bool,
    pub player_hit: bool,
    pub pickups_collected: u32,
}

/// `distance(a, b) < ra + rb`
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Run every collision pass in precedence order
///
/// Stops early once the run is over: nothing after a fatal hit applies.
pub fn resolve(state: &mut GameState) -> CollisionSummary {
    let mut summary = CollisionSummary::default();

    player_shots_vs_boss(state, &mut summary);
    player_shots_vs_hostiles(state, &mut summary);

    boss_shots_vs_player(state, &mut summary);
    if state.is_game_over() {
        return summary;
    }

    player_vs_hostiles(state, &mut summary);
    if state.is_game_over() {
        return summary;
    }

    player_vs_pickups(state, &mut summary);
    summary
}

/// Player shots against the boss (checked before hostiles)
///
/// A shot hits once its center is inside the boss size. A boss hit always
/// consumes the projectile, piercing or not.
fn player_shots_vs_boss(state: &mut GameState, summary: &mut CollisionSummary) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };

    let mut defeated = false;
    state.projectiles.retain(|p| {
        if boss.is_defeated() || !circles_overlap(p.body.pos, 0.0, boss.body.pos, boss.size) {
            return true;
        }
        if boss.hit(p.damage) {
            defeated = true;
        }
        false
    });

    if defeated {
        summary.boss_defeated = true;
        defeat_boss(state);
    }
}

/// Grant boss rewards, clear its projectiles and remove it
fn defeat_boss(state: &mut GameState) {
    let Some(boss) = state.boss.take() else {
        return;
    };

    let coins = boss.coin_reward();
    let score = boss.score_reward();
    state.coins += coins;
    state.score += score;

    let orphaned = state.boss_projectiles.len() + state.pending_boss_projectiles.len();
    state.boss_projectiles.clear();
    state.pending_boss_projectiles.clear();

    // Guaranteed drop, kept reachable even if the boss died during its entrance
    let drop_at = crate::clamp_point(boss.body.pos, Vec2::ZERO, state.bounds());
    state.drop_pickup(drop_at);
    state.emit_particles(boss.body.pos, BOSS_BURST, boss.size * 0.5, BOSS_COLOR);

    log::info!(
        "Boss #{} ({:?}) defeated: +{} coins, +{} score, {} projectiles cleared",
        boss.index,
        boss.kind,
        coins,
        score,
        orphaned
    );
    state.events.push(GameEvent::BossDefeated {
        kind: boss.kind,
        index: boss.index,
        coins,
        score,
    });
}

/// Player shots against hostiles
///
/// A plain shot strikes one hostile and is spent. A piercing shot keeps
/// striking overlapping hostiles it has not struck yet until its pierce
/// budget runs out.
fn player_shots_vs_hostiles(state: &mut GameState, summary: &mut CollisionSummary) {
    let mut spent: Vec<u32> = Vec::new();
    let mut killed: Vec<u32> = Vec::new();

    for p in state.projectiles.iter_mut() {
        for h in state.hostiles.iter_mut() {
            if !h.is_alive()
                || p.has_struck(h.id)
                || !circles_overlap(p.body.pos, p.radius, h.body.pos, h.size)
            {
                continue;
            }
            if h.hit(p.damage) {
                killed.push(h.id);
            }
            if p.register_hit(h.id) {
                spent.push(p.id);
                break;
            }
        }
    }

    if !spent.is_empty() {
        state.projectiles.retain(|p| !spent.contains(&p.id));
    }

    for id in killed {
        // Already gone: benign no-op
        let Some(idx) = state.hostiles.iter().position(|h| h.id == id) else {
            continue;
        };
        let shape = state.hostiles.remove(idx);
        destroy_hostile(state, shape);
        summary.hostiles_destroyed += 1;
    }
}

/// Rewards, split children, drop roll and effects for a destroyed hostile
fn destroy_hostile(state: &mut GameState, shape: HostileShape) {
    let threshold = state.config.split_threshold;
    let min_size = state.config.min_child_size;

    let mut ids = Vec::new();
    if shape.size > threshold {
        ids.push(state.next_entity_id());
        ids.push(state.next_entity_id());
    }
    let mut ids = ids.into_iter();
    let children = shape.split(threshold, min_size, &mut state.rng, || {
        ids.next().unwrap_or_default()
    });

    let pos = shape.body.pos;
    state.score += shape.class.score_value();
    state.coins += shape.class.coin_value();

    if state.rng.random::<f64>() < state.config.pickup_drop_chance {
        state.drop_pickup(pos);
    }
    state.emit_particles(pos, HOSTILE_BURST, shape.size * 0.3, shape.class.color());

    log::debug!(
        "{:?} {} destroyed at ({:.0}, {:.0}), {} children",
        shape.class,
        shape.id,
        pos.x,
        pos.y,
        children.len()
    );
    state.events.push(GameEvent::HostileDestroyed {
        id: shape.id,
        class: shape.class,
        pos,
        children: children.len(),
    });
    state.hostiles.extend(children);
}

/// Boss projectiles against the player
///
/// Only the first overlapping shot is considered. It is always consumed;
/// while invulnerable it is absorbed without damage.
fn boss_shots_vs_player(state: &mut GameState, summary: &mut CollisionSummary) {
    let player_pos = state.player.body.pos;
    let player_radius = state.player.radius;
    let Some(idx) = state
        .boss_projectiles
        .iter()
        .position(|p| circles_overlap(p.body.pos, p.radius, player_pos, player_radius))
    else {
        return;
    };

    state.boss_projectiles.remove(idx);
    let window = state.config.projectile_hit_invulnerability;
    if !state.player.take_hit(window) {
        return;
    }
    summary.player_hit = true;
    player_damaged(state, PROJECTILE_HIT_BURST);
}

/// Contact damage from hostiles; the touching hostile is removed without reward
fn player_vs_hostiles(state: &mut GameState, summary: &mut CollisionSummary) {
    let player_pos = state.player.body.pos;
    let player_radius = state.player.radius;
    let Some(idx) = state
        .hostiles
        .iter()
        .position(|h| h.is_alive() && circles_overlap(h.body.pos, h.size, player_pos, player_radius))
    else {
        return;
    };

    let window = state.config.contact_hit_invulnerability;
    if !state.player.take_hit(window) {
        return;
    }
    state.hostiles.remove(idx);
    summary.player_hit = true;
    player_damaged(state, CONTACT_HIT_BURST);
}

fn player_damaged(state: &mut GameState, burst: usize) {
    let pos = state.player.body.pos;
    state.emit_particles(pos, burst, 4.0, PLAYER_COLOR);
    let lives_left = state.player.lives;
    log::debug!("Player hit, {} lives left", lives_left);
    state.events.push(GameEvent::PlayerHit { lives_left });
    if state.player.is_dead() {
        state.enter_game_over();
    }
}

/// Collect every overlapping pickup
fn player_vs_pickups(state: &mut GameState, summary: &mut CollisionSummary) {
    let player_pos = state.player.body.pos;
    let player_radius = state.player.radius;

    let mut collected = Vec::new();
    state.pickups.retain(|p| {
        if circles_overlap(p.pos, p.radius, player_pos, player_radius) {
            collected.push((p.kind, p.pos));
            false
        } else {
            true
        }
    });

    for (kind, pos) in collected {
        apply_pickup(state, kind);
        state.emit_particles(pos, PICKUP_BURST, 0.0, PICKUP_COLOR);
        log::debug!("Collected {:?}", kind);
        state.events.push(GameEvent::PickupCollected { kind });
        summary.pickups_collected += 1;
    }
}

/// Apply a pickup effect (modes overwrite, shield resets the window)
fn apply_pickup(state: &mut GameState, kind: PickupKind) {
    let mode_ticks = state.config.weapon_mode_ticks;
    match kind {
        PickupKind::Life => {
            state.player.lives += 1;
            state.score += LIFE_PICKUP_SCORE;
        }
        PickupKind::Shield => {
            state.player.invulnerable_ticks = state.config.shield_ticks;
        }
        PickupKind::Spread => state.player.set_weapon_mode(WeaponMode::Spread, mode_ticks),
        PickupKind::Rapid => state.player.set_weapon_mode(WeaponMode::Rapid, mode_ticks),
    }
}
