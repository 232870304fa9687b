//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod boss;
pub mod collision;
pub mod hostile;
pub mod kinematic;
pub mod pickup;
pub mod player;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod wave;

pub use boss::{ArchetypeKind, Boss, BossContext, BossPhase, Countdown, ForgePhase};
pub use collision::{CollisionSummary, circles_overlap, resolve};
pub use hostile::{HostileShape, ShapeClass};
pub use kinematic::Body;
pub use pickup::{Particle, Pickup, PickupKind};
pub use player::{Player, WeaponMode};
pub use projectile::{Owner, Projectile, ProjectileFlags};
pub use snapshot::Snapshot;
pub use state::{GameEvent, GameState, RunPhase};
pub use tick::{TickInput, tick};
pub use wave::{WavePhase, WavePlan, WaveState};
