//! Ship loadouts, exponential pricing and the purchase/equip action
//!
//! Ownership is per-run: a fresh `GameState` owns only the free tier-0 ship.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::sim::state::{GameEvent, GameState};

/// Index into the loadout catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LoadoutId(pub usize);

/// How a loadout turns one trigger pull into projectiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FirePattern {
    /// One shot along the heading
    Single,
    /// `count` shots fanned symmetrically, `step_deg` apart
    Spread { count: u32, step_deg: f32 },
    /// Two shots at ±`offset_deg`, with a speed adjustment
    Twin { offset_deg: f32, speed_delta: f32 },
    /// One oversized shot
    Heavy { radius: f32 },
    /// One shot that passes through `pierce` hostiles before it is spent
    Piercing { pierce: u32 },
}

/// A single projectile request produced by a fire pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    /// Offset from the ship heading (radians)
    pub angle_offset: f32,
    pub speed: f32,
    /// `None` uses the default player projectile radius
    pub radius: Option<f32>,
    pub pierce: u32,
}

impl FirePattern {
    /// Expand the pattern into shots relative to the ship heading
    pub fn shots(&self, bullet_speed: f32) -> Vec<Shot> {
        let shot = |deg: f32, speed: f32| Shot {
            angle_offset: deg.to_radians(),
            speed,
            radius: None,
            pierce: 0,
        };
        match *self {
            FirePattern::Single => vec![shot(0.0, bullet_speed)],
            FirePattern::Spread { count, step_deg } => {
                let count = count.max(1);
                let mid = (count - 1) as f32 / 2.0;
                (0..count)
                    .map(|i| shot((i as f32 - mid) * step_deg, bullet_speed))
                    .collect()
            }
            FirePattern::Twin {
                offset_deg,
                speed_delta,
            } => vec![
                shot(-offset_deg, bullet_speed + speed_delta),
                shot(offset_deg, bullet_speed + speed_delta),
            ],
            FirePattern::Heavy { radius } => vec![Shot {
                radius: Some(radius),
                ..shot(0.0, bullet_speed)
            }],
            FirePattern::Piercing { pierce } => vec![Shot {
                pierce,
                ..shot(0.0, bullet_speed)
            }],
        }
    }
}

/// A named ship configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    pub name: String,
    /// Price tier (0 = free starter ship)
    pub tier: u32,
    /// Maximum speed
    pub speed: f32,
    /// Thrust acceleration per tick
    pub acceleration: f32,
    /// Ticks between shots
    pub fire_delay: u32,
    pub bullet_speed: f32,
    pub bullet_damage: f32,
    pub pattern: FirePattern,
    pub description: String,
}

impl Loadout {
    #[allow(clippy::too_many_arguments)]
    fn new(
        name: &str,
        tier: u32,
        speed: f32,
        acceleration: f32,
        fire_delay: u32,
        bullet_speed: f32,
        bullet_damage: f32,
        pattern: FirePattern,
        description: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            tier,
            speed,
            acceleration,
            fire_delay,
            bullet_speed,
            bullet_damage,
            pattern,
            description: description.to_string(),
        }
    }
}

/// The stock ship roster, ordered by tier
pub fn default_catalog() -> Vec<Loadout> {
    vec![
        Loadout::new("Scout", 0, 8.5, 0.36, 10, 12.0, 1.0, FirePattern::Single, "Fast, nimble, light damage"),
        Loadout::new("Fighter", 1, 7.5, 0.32, 9, 12.0, 1.3, FirePattern::Single, "Balanced"),
        Loadout::new(
            "Destroyer",
            2,
            6.3,
            0.26,
            12,
            10.0,
            2.2,
            FirePattern::Twin { offset_deg: 8.0, speed_delta: -1.0 },
            "Heavy damage",
        ),
        Loadout::new(
            "Blazer",
            3,
            7.2,
            0.30,
            6,
            14.0,
            1.1,
            FirePattern::Spread { count: 3, step_deg: 6.0 },
            "Rapid spread",
        ),
        Loadout::new(
            "Nova",
            4,
            6.0,
            0.24,
            11,
            10.0,
            3.0,
            FirePattern::Heavy { radius: crate::consts::HEAVY_PROJECTILE_RADIUS },
            "Explosive hits",
        ),
        Loadout::new(
            "Vector",
            5,
            8.0,
            0.40,
            8,
            13.0,
            1.4,
            FirePattern::Twin { offset_deg: 2.0, speed_delta: 0.0 },
            "High mobility & accuracy",
        ),
        Loadout::new(
            "Dread",
            6,
            5.6,
            0.22,
            14,
            9.0,
            4.2,
            FirePattern::Piercing { pierce: 3 },
            "Massive damage, slow",
        ),
    ]
}

/// The free tier-0 starter ship
pub fn starter_loadout() -> Loadout {
    default_catalog().swap_remove(0)
}

/// Exponential price curve: 0 for tier 0, else `floor(base * mult^(tier-1))`
pub fn price(tier: u32, base: u64, mult: f64) -> u64 {
    if tier == 0 {
        return 0;
    }
    (base as f64 * mult.powi(tier as i32 - 1)).floor() as u64
}

/// Result of a purchase/equip request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// Already owned; swapped in for free
    Equipped,
    /// Bought for `cost` coins and swapped in
    Purchased { cost: u64 },
    /// Not owned and not affordable; nothing changed
    Declined { cost: u64, coins: u64 },
}

/// Buy (if needed) and equip a loadout
///
/// Owned loadouts swap immediately at no cost. Unowned loadouts are bought
/// when affordable. Insufficient coins leaves the state untouched.
pub fn purchase_or_equip(state: &mut GameState, id: LoadoutId) -> SimResult<PurchaseOutcome> {
    let loadout = state
        .config
        .loadouts
        .get(id.0)
        .cloned()
        .ok_or(SimError::UnknownLoadout(id.0))?;

    if state.owned_loadouts.contains(&id) {
        state.player.equip(id, &loadout);
        log::info!("Equipped {}", loadout.name);
        state.events.push(GameEvent::LoadoutEquipped { id });
        return Ok(PurchaseOutcome::Equipped);
    }

    let cost = state.config.loadout_cost(&loadout);
    if state.coins < cost {
        log::warn!(
            "Not enough coins for {}: need {}, have {}",
            loadout.name,
            cost,
            state.coins
        );
        state.events.push(GameEvent::PurchaseDeclined { id, cost });
        return Ok(PurchaseOutcome::Declined {
            cost,
            coins: state.coins,
        });
    }

    state.coins -= cost;
    state.owned_loadouts.insert(id);
    state.player.equip(id, &loadout);
    log::info!("Bought {} for {} coins", loadout.name, cost);
    state.events.push(GameEvent::LoadoutPurchased { id, cost });
    Ok(PurchaseOutcome::Purchased { cost })
}
