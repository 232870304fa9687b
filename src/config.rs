//! Simulation configuration
//!
//! One immutable struct handed to `GameState::new`. Every field defaults to
//! the stock balance, so a partial JSON document only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SimError, SimResult};
use crate::shop::{Loadout, default_catalog, price};
use crate::sim::boss::ArchetypeKind;

/// Screen, economy, timing and roster settings for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === World ===
    pub width: f32,
    pub height: f32,
    /// Ticks per second (used only to report timers in seconds)
    pub tick_rate: u32,

    // === Waves ===
    /// Every Nth wave is a boss wave
    pub boss_wave_interval: u32,
    /// Delay after a normal wave clears
    pub wave_delay_ticks: u32,
    /// Delay after a boss wave clears
    pub boss_wave_delay_ticks: u32,
    /// Boss archetypes, selected round-robin by boss index
    pub boss_roster: Vec<ArchetypeKind>,

    // === Player ===
    pub starting_lives: u32,
    pub player_radius: f32,
    pub player_drag: f32,
    pub rotation_step_deg: f32,
    /// Invulnerability after a projectile hit
    pub projectile_hit_invulnerability: u32,
    /// Invulnerability after touching a hostile
    pub contact_hit_invulnerability: u32,
    /// Invulnerability granted by a shield pickup
    pub shield_ticks: u32,
    /// Duration of spread/rapid weapon modes
    pub weapon_mode_ticks: u32,
    /// Fire delay cap while in rapid mode
    pub rapid_fire_delay: u32,

    // === Projectiles ===
    pub projectile_lifetime: u32,
    pub homing_gain: f32,

    // === Hostiles ===
    pub split_threshold: f32,
    pub min_child_size: f32,
    pub hostile_wrap_padding: f32,

    // === Pickups ===
    pub pickup_lifetime: u32,
    pub pickup_radius: f32,
    /// Chance a destroyed hostile drops a pickup
    pub pickup_drop_chance: f64,

    // === Effects ===
    pub max_particles: usize,

    // === Economy ===
    pub price_base: u64,
    pub price_mult: f64,
    pub loadouts: Vec<Loadout>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            tick_rate: TICK_RATE,

            boss_wave_interval: 4,
            wave_delay_ticks: 120,
            boss_wave_delay_ticks: 200,
            boss_roster: ArchetypeKind::ALL.to_vec(),

            starting_lives: PLAYER_START_LIVES,
            player_radius: PLAYER_RADIUS,
            player_drag: PLAYER_DRAG,
            rotation_step_deg: ROTATION_STEP_DEG,
            projectile_hit_invulnerability: 90,
            contact_hit_invulnerability: 120,
            shield_ticks: 180,
            weapon_mode_ticks: 300,
            rapid_fire_delay: 3,

            projectile_lifetime: PROJECTILE_LIFETIME,
            homing_gain: HOMING_GAIN,

            split_threshold: SPLIT_THRESHOLD,
            min_child_size: MIN_CHILD_SIZE,
            hostile_wrap_padding: HOSTILE_WRAP_PADDING,

            pickup_lifetime: PICKUP_LIFETIME,
            pickup_radius: PICKUP_RADIUS,
            pickup_drop_chance: 0.10,

            max_particles: 512,

            price_base: 300,
            price_mult: 2.2,
            loadouts: default_catalog(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config document
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: {}x{}, boss every {} waves, {} loadouts",
            config.width,
            config.height,
            config.boss_wave_interval,
            config.loadouts.len()
        );
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> SimResult<()> {
        fn invalid(field: &'static str, reason: &str) -> SimResult<()> {
            Err(SimError::InvalidConfig {
                field,
                reason: reason.to_string(),
            })
        }

        if self.width <= 0.0 {
            return invalid("width", "must be positive");
        }
        if self.height <= 0.0 {
            return invalid("height", "must be positive");
        }
        if self.boss_wave_interval == 0 {
            return invalid("boss_wave_interval", "must be at least 1");
        }
        if self.boss_roster.is_empty() {
            return invalid("boss_roster", "must name at least one archetype");
        }
        match self.loadouts.first() {
            None => return invalid("loadouts", "catalog is empty"),
            Some(first) if first.tier != 0 => {
                return invalid("loadouts", "first loadout must be the free tier-0 ship");
            }
            _ => {}
        }
        if self.price_base == 0 {
            return invalid("price_base", "must be positive");
        }
        if self.price_mult <= 1.0 {
            return invalid("price_mult", "must be greater than 1.0");
        }
        if !(0.0..=1.0).contains(&self.pickup_drop_chance) {
            return invalid("pickup_drop_chance", "must be within [0, 1]");
        }
        if self.min_child_size <= 0.0 {
            return invalid("min_child_size", "must be positive");
        }
        Ok(())
    }

    /// Price of a loadout under this config's curve
    pub fn loadout_cost(&self, loadout: &Loadout) -> u64 {
        price(loadout.tier, self.price_base, self.price_mult)
    }

    /// Convert a tick count to seconds
    pub fn ticks_to_secs(&self, ticks: u32) -> f32 {
        ticks as f32 / self.tick_rate.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = SimConfig::from_json(r#"{ "boss_wave_interval": 3, "starting_lives": 5 }"#)
            .unwrap();
        assert_eq!(config.boss_wave_interval, 3);
        assert_eq!(config.starting_lives, 5);
        // Untouched fields keep defaults
        assert_eq!(config.width, SCREEN_WIDTH);
        assert_eq!(config.loadouts.len(), 7);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = SimConfig::from_json(r#"{ "boss_wave_interval": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidConfig { field: "boss_wave_interval", .. }
        ));

        let err = SimConfig::from_json(r#"{ "price_mult": 1.0 }"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig { field: "price_mult", .. }));

        let err = SimConfig::from_json(r#"{ "boss_roster": [] }"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig { field: "boss_roster", .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = SimConfig::from_json("{ width: ").unwrap_err();
        assert!(matches!(err, SimError::Json(_)));
    }

    #[test]
    fn test_loadout_costs() {
        let config = SimConfig::default();
        let costs: Vec<u64> = config.loadouts.iter().map(|l| config.loadout_cost(l)).collect();
        assert_eq!(costs[0], 0);
        assert_eq!(costs[1], 300);
        assert_eq!(costs[2], 660);
    }
}
