//! Run state and core simulation types
//!
//! All state that must be persisted for Continue/determinism lives here.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::{ArchetypeKind, Boss, BossContext};
use super::hostile::{HostileShape, ShapeClass};
use super::pickup::{Particle, Pickup, PickupKind};
use super::player::Player;
use super::projectile::{Owner, Projectile, ProjectileFlags};
use super::wave::{self, WaveState};
use crate::config::SimConfig;
use crate::error::SimResult;
use crate::shop::{LoadoutId, PurchaseOutcome, starter_loadout};

/// Run-level phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Active gameplay
    Playing,
    /// Frozen (shop/menu overlay open)
    Paused,
    /// Lives exhausted; only a restart leaves this state
    GameOver,
}

/// Something that happened during the last tick (cleared every tick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WaveStarted { wave: u32, boss_wave: bool },
    BossSpawned { kind: ArchetypeKind, index: u32 },
    HostileDestroyed { id: u32, class: ShapeClass, pos: Vec2, children: usize },
    BossDefeated { kind: ArchetypeKind, index: u32, coins: u64, score: u64 },
    WaveCleared { wave: u32, bonus: u64 },
    PickupCollected { kind: PickupKind },
    PlayerHit { lives_left: u32 },
    LoadoutPurchased { id: LoadoutId, cost: u64 },
    LoadoutEquipped { id: LoadoutId },
    PurchaseDeclined { id: LoadoutId, cost: u64 },
    GameOver { final_score: u64 },
}

/// Particle color for bursts not tied to a shape
pub const PLAYER_COLOR: u32 = 10;
pub const BOSS_COLOR: u32 = 11;
pub const PICKUP_COLOR: u32 = 12;

/// Complete run state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance/config this run was created with
    pub config: SimConfig,
    /// The only source of randomness in the simulation
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: RunPhase,
    pub player: Player,
    /// Player projectiles (sorted by id)
    pub projectiles: Vec<Projectile>,
    /// Boss projectiles (sorted by id)
    pub boss_projectiles: Vec<Projectile>,
    /// Active hostiles (sorted by id)
    pub hostiles: Vec<HostileShape>,
    pub boss: Option<Boss>,
    /// Active pickups (sorted by id)
    pub pickups: Vec<Pickup>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Boss spawns from this tick; merged after collision resolution
    pub pending_hostiles: Vec<HostileShape>,
    pub pending_boss_projectiles: Vec<Projectile>,
    pub wave: WaveState,
    pub score: u64,
    pub coins: u64,
    pub owned_loadouts: BTreeSet<LoadoutId>,
    /// Score frozen at game over
    pub final_score: Option<u64>,
    /// Events from the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run and spawn the first wave
    ///
    /// The config is assumed valid; use [`GameState::try_new`] for untrusted input.
    pub fn new(seed: u64, config: SimConfig) -> Self {
        let starter = config
            .loadouts
            .first()
            .cloned()
            .unwrap_or_else(starter_loadout);
        let bounds = Vec2::new(config.width, config.height);
        let player = Player::new(
            bounds / 2.0,
            config.player_radius,
            config.starting_lives,
            LoadoutId(0),
            starter,
        );

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: RunPhase::Playing,
            player,
            projectiles: Vec::new(),
            boss_projectiles: Vec::new(),
            hostiles: Vec::new(),
            boss: None,
            pickups: Vec::new(),
            particles: Vec::new(),
            pending_hostiles: Vec::new(),
            pending_boss_projectiles: Vec::new(),
            wave: WaveState::default(),
            score: 0,
            coins: 0,
            owned_loadouts: BTreeSet::from([LoadoutId(0)]),
            final_score: None,
            events: Vec::new(),
            next_id: 1,
            config,
        };

        log::info!("New run with seed {}", seed);
        wave::spawn_wave(&mut state);
        state
    }

    /// Validate the config, then create the run
    pub fn try_new(seed: u64, config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self::new(seed, config))
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Screen size as a vector
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.config.width, self.config.height)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RunPhase::GameOver
    }

    /// Buy (if needed) and equip a loadout
    pub fn purchase_or_equip(&mut self, id: LoadoutId) -> SimResult<PurchaseOutcome> {
        crate::shop::purchase_or_equip(self, id)
    }

    /// Add a player projectile
    pub fn spawn_player_projectile(
        &mut self,
        origin: Vec2,
        heading: f32,
        speed: f32,
        damage: f32,
        flags: ProjectileFlags,
    ) {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile::spawn(
            id,
            origin,
            heading,
            speed,
            Owner::Player,
            damage,
            self.config.projectile_lifetime,
            flags,
        ));
    }

    /// Add a hostile immediately (wave spawns, split children)
    pub fn spawn_hostile(&mut self, pos: Vec2, class: ShapeClass, size: f32, scale: f32) -> u32 {
        let id = self.next_entity_id();
        let shape = HostileShape::new(id, pos, class, size, scale, &mut self.rng);
        self.hostiles.push(shape);
        id
    }

    /// Drop a pickup of a random kind at `pos`
    pub fn drop_pickup(&mut self, pos: Vec2) {
        let id = self.next_entity_id();
        let kind = PickupKind::random(&mut self.rng);
        self.pickups.push(Pickup::new(
            id,
            kind,
            pos,
            self.config.pickup_radius,
            self.config.pickup_lifetime,
        ));
    }

    /// Emit a particle burst; the oldest particles go once the cap is reached
    pub fn emit_particles(&mut self, pos: Vec2, count: usize, jitter: f32, color: u32) {
        for _ in 0..count {
            let p = Particle::burst(pos, jitter, color, &mut self.rng);
            self.particles.push(p);
        }
        let cap = self.config.max_particles;
        if self.particles.len() > cap {
            let excess = self.particles.len() - cap;
            self.particles.drain(..excess);
        }
    }

    /// Enter the terminal Game Over state
    pub fn enter_game_over(&mut self) {
        if self.phase == RunPhase::GameOver {
            return;
        }
        self.phase = RunPhase::GameOver;
        self.final_score = Some(self.score);
        log::info!(
            "Game over on wave {} with score {}",
            self.wave.number,
            self.score
        );
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
    }

    /// Capability handed to the boss for one update
    pub(crate) fn spawn_queue(&mut self) -> SpawnQueue<'_> {
        SpawnQueue {
            player_pos: self.player.body.pos,
            lifetime: self.config.projectile_lifetime,
            rng: &mut self.rng,
            next_id: &mut self.next_id,
            hostiles: &mut self.pending_hostiles,
            projectiles: &mut self.pending_boss_projectiles,
        }
    }

    /// Move this tick's boss spawns into the live collections
    pub fn merge_pending(&mut self) {
        self.hostiles.append(&mut self.pending_hostiles);
        self.boss_projectiles
            .append(&mut self.pending_boss_projectiles);
    }

    /// Ensure collections are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.projectiles.sort_by_key(|p| p.id);
        self.boss_projectiles.sort_by_key(|p| p.id);
        self.hostiles.sort_by_key(|h| h.id);
        self.pickups.sort_by_key(|p| p.id);
    }
}

/// Append-only view over the pending spawn buffers
pub(crate) struct SpawnQueue<'a> {
    player_pos: Vec2,
    lifetime: u32,
    rng: &'a mut Pcg32,
    next_id: &'a mut u32,
    hostiles: &'a mut Vec<HostileShape>,
    projectiles: &'a mut Vec<Projectile>,
}

impl SpawnQueue<'_> {
    fn allocate_id(&mut self) -> u32 {
        let id = *self.next_id;
        *self.next_id += 1;
        id
    }
}

impl BossContext for SpawnQueue<'_> {
    fn player_pos(&self) -> Vec2 {
        self.player_pos
    }

    fn spawn_hostile(&mut self, pos: Vec2, class: ShapeClass, size: f32) {
        let id = self.allocate_id();
        let shape = HostileShape::new(id, pos, class, size, 1.0, &mut *self.rng);
        self.hostiles.push(shape);
    }

    fn spawn_projectile(&mut self, origin: Vec2, heading: f32, speed: f32, damage: f32, homing: bool) {
        let id = self.allocate_id();
        self.projectiles.push(Projectile::spawn(
            id,
            origin,
            heading,
            speed,
            Owner::Boss,
            damage,
            self.lifetime,
            ProjectileFlags {
                homing,
                ..Default::default()
            },
        ));
    }

    fn rng(&mut self) -> &mut Pcg32 {
        &mut *self.rng
    }
}
