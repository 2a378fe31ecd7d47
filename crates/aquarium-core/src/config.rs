//! Tank configuration - geometry, tuning constants, fish profiles and species.
//!
//! [`TankConfig`] is passed into [`crate::engine::AquariumEngine::new`] and is
//! the only source of tuning for a run. Every table is `#[serde(default)]`, so
//! a TOML file only needs the keys it wants to override:
//!
//! ```toml
//! seed = 7
//!
//! [environment]
//! filter_on = false
//!
//! [pellet]
//! max_age = 600.0
//! ```
//!
//! Fish profiles are the exception: a `[fish.<kind>]` table replaces the whole
//! profile and must list every field.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::{Diet, FishKind, Pattern, Rect, Rgb, SinkProfile, Species};
use crate::error::{AquariumError, Result};

/// Uniform range sampled at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        self.min + rng.gen::<f32>() * (self.max - self.min)
    }

    /// Whole-unit steps from `min`, never reaching `max`
    pub fn sample_whole(&self, rng: &mut impl Rng) -> f32 {
        self.min + (rng.gen::<f32>() * (self.max - self.min)).floor()
    }

    /// Symmetric range `[-half, half)`
    pub fn sample_symmetric(half: f32, rng: &mut impl Rng) -> f32 {
        (rng.gen::<f32>() * 2.0 - 1.0) * half
    }
}

/// Top-level configuration for one aquarium
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TankConfig {
    /// Seed for every random draw the engine makes
    pub seed: u64,
    pub tank: TankGeometry,
    pub steering: SteeringConfig,
    pub environment: EnvironmentConfig,
    pub pellet: PelletConfig,
    pub poop: PoopConfig,
    pub corpse: CorpseConfig,
    pub seaweed: SeaweedConfig,
    pub predation: PredationConfig,
    pub feeding: FeedingConfig,
    pub disturbance: DisturbanceConfig,
    pub fish: FishProfiles,
    pub species: SpeciesCatalog,
    /// Fish spawned when the engine is created
    pub population: Vec<SeedFish>,
}

impl Default for TankConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            tank: TankGeometry::default(),
            steering: SteeringConfig::default(),
            environment: EnvironmentConfig::default(),
            pellet: PelletConfig::default(),
            poop: PoopConfig::default(),
            corpse: CorpseConfig::default(),
            seaweed: SeaweedConfig::default(),
            predation: PredationConfig::default(),
            feeding: FeedingConfig::default(),
            disturbance: DisturbanceConfig::default(),
            fish: FishProfiles::default(),
            species: SpeciesCatalog::default(),
            population: vec![
                SeedFish {
                    kind: FishKind::Midwater,
                    size: 18.0,
                },
                SeedFish {
                    kind: FishKind::BottomFeeder,
                    size: 16.0,
                },
                SeedFish {
                    kind: FishKind::AlgaeEater,
                    size: 16.0,
                },
            ],
        }
    }
}

impl TankConfig {
    /// Parse a TOML document, filling missing keys with defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: TankConfig =
            toml::from_str(source).map_err(|e| AquariumError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Render as TOML (useful for writing a starting config)
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| AquariumError::Config(e.to_string()))
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let t = &self.tank;
        if !(t.width > 0.0 && t.height > 0.0) {
            return Err(AquariumError::Config(format!(
                "tank must have positive size, got {}x{}",
                t.width, t.height
            )));
        }
        if t.air_band < 0.0 || t.floor_margin < 0.0 || t.air_band + t.floor_margin >= t.height {
            return Err(AquariumError::Config(
                "air band and floor margin leave no water".into(),
            ));
        }
        if !(self.steering.max_dt > 0.0) {
            return Err(AquariumError::Config("max_dt must be positive".into()));
        }
        if let Some(age) = self.pellet.max_age {
            if age <= 0.0 {
                return Err(AquariumError::Config("pellet max_age must be positive".into()));
            }
        }
        for kind in FishKind::ALL {
            if self.species.for_kind(kind).is_empty() {
                return Err(AquariumError::Config(format!(
                    "species catalog for {} is empty",
                    kind.label()
                )));
            }
            let profile = self.fish.for_kind(kind);
            if profile.max_size_factor < 1.0 {
                return Err(AquariumError::Config(format!(
                    "{} max_size_factor must be at least 1.0",
                    kind.label()
                )));
            }
            if !(profile.default_size.min > 0.0 && profile.default_size.max >= profile.default_size.min)
            {
                return Err(AquariumError::Config(format!(
                    "{} default_size range is invalid",
                    kind.label()
                )));
            }
        }
        if let Some(seed) = self.population.iter().find(|s| !(s.size > 0.0 && s.size.is_finite())) {
            return Err(AquariumError::Config(format!(
                "initial {} has invalid size {}",
                seed.kind.label(),
                seed.size
            )));
        }
        Ok(())
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.tank.x, self.tank.y, self.tank.width, self.tank.height)
    }

    /// Y of the waterline; everything above it is the air band
    pub fn water_top(&self) -> f32 {
        self.tank.y + self.tank.air_band
    }

    pub fn floor_y(&self) -> f32 {
        self.tank.y + self.tank.height - self.tank.floor_margin
    }
}

/// Tank rectangle and its horizontal bands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TankGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Depth of the air band at the top; clicks here feed
    pub air_band: f32,
    /// Height of the substrate below the floor plane
    pub floor_margin: f32,
    /// Pellets appear this far below the tank top
    pub feed_drop_depth: f32,
}

impl Default for TankGeometry {
    fn default() -> Self {
        Self {
            x: 20.0,
            y: 20.0,
            width: 920.0,
            height: 580.0,
            air_band: 50.0,
            floor_margin: 10.0,
            feed_drop_depth: 5.0,
        }
    }
}

/// Timestep and fish steering tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Longest step a single `advance` will integrate
    pub max_dt: f32,
    /// Exponential blend rate from current toward desired velocity
    pub steer_rate: f32,
    pub cursor_attract_radius: f32,
    /// Cursor follow speed as a fraction of top speed, at the radius edge
    pub cursor_speed_min: f32,
    /// Extra fraction gained as the cursor distance shrinks to zero
    pub cursor_speed_boost: f32,
    /// Lerp weight toward the food direction
    pub food_blend: f32,
    /// Vertical damping applied inside the depth band
    pub buoyancy_damping: f32,
    /// Cap on depth correction speed as a fraction of top speed
    pub depth_speed_fraction: f32,
    /// Largest speed reduction from fouled water
    pub max_fouling_slowdown: f32,
    /// dirt + algae total that produces one full unit of slowdown
    pub fouling_scale: f32,
    /// Size growth per second while a meal is digesting
    pub growth_rate: f32,
    /// Fraction of body size kept clear of the walls
    pub wall_clearance: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            max_dt: 0.1,
            steer_rate: 2.0,
            cursor_attract_radius: 120.0,
            cursor_speed_min: 0.8,
            cursor_speed_boost: 0.4,
            food_blend: 0.6,
            buoyancy_damping: 0.15,
            depth_speed_fraction: 0.6,
            max_fouling_slowdown: 0.5,
            fouling_scale: 300.0,
            growth_rate: 0.25,
            wall_clearance: 0.3,
        }
    }
}

/// Water quality feedback rates (all per second unless noted)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub filter_on: bool,
    pub filter_strength: f32,
    /// Dirt removal as a fraction of filter strength
    pub filter_dirt_ratio: f32,
    pub unfiltered_dirt_rate: f32,
    /// Pellet age after which it starts fouling the water
    pub pellet_linger_secs: f32,
    pub lingering_pellet_algae: f32,
    pub lingering_pellet_dirt: f32,
    pub poop_dirt_rate: f32,
    pub corpse_dirt_rate: f32,
    pub corpse_algae_rate: f32,
    /// Fixed dirt added per pellet eaten
    pub meal_dirt: f32,
    /// Fixed dirt added per shake
    pub shake_dirt: f32,
    /// Algae removed by one reduce-algae action
    pub algae_reduction: f32,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            filter_on: true,
            filter_strength: 6.5,
            filter_dirt_ratio: 0.85,
            unfiltered_dirt_rate: 0.28,
            pellet_linger_secs: 12.0,
            lingering_pellet_algae: 2.2,
            lingering_pellet_dirt: 1.6,
            poop_dirt_rate: 0.18,
            corpse_dirt_rate: 0.25,
            corpse_algae_rate: 0.18,
            meal_dirt: 0.5,
            shake_dirt: 0.8,
            algae_reduction: 25.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PelletConfig {
    pub sink: SinkProfile,
    /// Purged once older than this; `None` keeps uneaten pellets forever
    pub max_age: Option<f32>,
}

impl Default for PelletConfig {
    fn default() -> Self {
        Self {
            sink: SinkProfile {
                gravity: 18.0,
                drag: 0.22,
                terminal_velocity: 80.0,
                radius: 4.0,
            },
            max_age: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoopConfig {
    pub sink: SinkProfile,
    /// Dissolves once older than this
    pub max_age: f32,
}

impl Default for PoopConfig {
    fn default() -> Self {
        Self {
            sink: SinkProfile {
                gravity: 55.0,
                drag: 0.18,
                terminal_velocity: 110.0,
                radius: 3.0,
            },
            max_age: 120.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpseConfig {
    pub gravity: f32,
    pub drag: f32,
    pub terminal_velocity: f32,
    /// Corpse radius as a fraction of the fish's size
    pub radius_factor: f32,
    pub decay_rate: f32,
    pub max_age: f32,
}

impl Default for CorpseConfig {
    fn default() -> Self {
        Self {
            gravity: 40.0,
            drag: 0.20,
            terminal_velocity: 120.0,
            radius_factor: 0.55,
            decay_rate: 0.02,
            max_age: 300.0,
        }
    }
}

impl CorpseConfig {
    pub fn sink_profile(&self, fish_size: f32) -> SinkProfile {
        SinkProfile {
            gravity: self.gravity,
            drag: self.drag,
            terminal_velocity: self.terminal_velocity,
            radius: fish_size * self.radius_factor,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeaweedConfig {
    pub clumps: u32,
    pub height: Span,
    pub clean_radius: f32,
    pub eat_rate: f32,
    /// Decay added per second of corpse grazing, before `eat_rate`
    pub bite: f32,
    pub sway_speed: f32,
    pub poop_dirt_relief: f32,
    pub poop_algae_relief: f32,
    pub bite_dirt_relief: f32,
    pub bite_algae_relief: f32,
}

impl Default for SeaweedConfig {
    fn default() -> Self {
        Self {
            clumps: 7,
            height: Span::new(40.0, 75.0),
            clean_radius: 42.0,
            eat_rate: 1.0,
            bite: 0.35,
            sway_speed: 1.0,
            poop_dirt_relief: 0.6,
            poop_algae_relief: 0.2,
            bite_dirt_relief: 0.1,
            bite_algae_relief: 0.06,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredationConfig {
    /// Hunger a fish must reach before it hunts
    pub min_hunger: f32,
    /// Prey must be smaller than this fraction of the predator
    pub prey_size_ratio: f32,
    /// Strike distance as a fraction of combined sizes
    pub reach_factor: f32,
    pub satiety: f32,
    pub digestion_secs: f32,
}

impl Default for PredationConfig {
    fn default() -> Self {
        Self {
            min_hunger: 0.40,
            prey_size_ratio: 0.6,
            reach_factor: 0.38,
            satiety: 0.6,
            digestion_secs: 8.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedingConfig {
    pub pellet_satiety: f32,
    /// Bite distance as a fraction of fish size, plus pellet radius
    pub reach_factor: f32,
    pub digestion: Span,
    /// Algae level below which grazing stops
    pub algae_min_level: f32,
    /// Distance from walls/floor that counts as a grazing surface
    pub wall_margin: f32,
    pub wall_graze_rate: f32,
    pub open_graze_rate: f32,
    pub graze_dirt_relief: f32,
    pub graze_satiety: f32,
    pub graze_digestion_secs: f32,
    /// Growth per second of grazing as a fraction of growth per meal
    pub graze_growth: f32,
}

impl Default for FeedingConfig {
    fn default() -> Self {
        Self {
            pellet_satiety: 0.6,
            reach_factor: 0.5,
            digestion: Span::new(6.0, 9.0),
            algae_min_level: 2.0,
            wall_margin: 40.0,
            wall_graze_rate: 10.5,
            open_graze_rate: 2.0,
            graze_dirt_relief: 0.05,
            graze_satiety: 0.12,
            graze_digestion_secs: 5.0,
            graze_growth: 0.30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisturbanceConfig {
    /// Flee speed as a multiple of top speed
    pub kick: Span,
    /// Random velocity jitter as a fraction of top speed
    pub jitter: f32,
    pub scare_secs: Span,
    /// Velocity multiplier per tick while scared
    pub damping: f32,
}

impl Default for DisturbanceConfig {
    fn default() -> Self {
        Self {
            kick: Span::new(2.0, 2.8),
            jitter: 0.4,
            scare_secs: Span::new(0.6, 1.3),
            damping: 0.985,
        }
    }
}

/// Where a fish spawns and which depth it holds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum DepthRule {
    /// Spawn at a random fraction of the water column and hold that depth
    WaterColumn { min: f32, max: f32 },
    /// Spawn and hold fixed distances above the floor
    AboveFloor { spawn: f32, hold: f32 },
}

/// Per-kind spawn parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FishProfile {
    pub max_size_factor: f32,
    pub speed: Span,
    pub initial_hunger: f32,
    pub hunger_rate: Span,
    pub eat_threshold: f32,
    pub lifespan: Span,
    pub growth_per_meal: f32,
    /// Half-width of the constant horizontal drift
    pub wander: f32,
    pub depth: DepthRule,
    pub depth_band: Span,
    pub depth_kp: f32,
    pub depth_kd: f32,
    pub glide_omega: Span,
    pub glide_amplitude: Span,
    pub seek_gain: f32,
    pub diet: Diet,
    /// Swim toward pellets when hungry, even if the diet cannot eat them
    pub chases_pellets: bool,
    /// Half-width of the horizontal spawn window around the tank center
    pub spawn_jitter: f32,
    /// Used when a spawn request has no size; floored to whole units
    pub default_size: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FishProfiles {
    pub midwater: FishProfile,
    pub bottom_feeder: FishProfile,
    pub algae_eater: FishProfile,
}

impl FishProfiles {
    pub fn for_kind(&self, kind: FishKind) -> &FishProfile {
        match kind {
            FishKind::Midwater => &self.midwater,
            FishKind::BottomFeeder => &self.bottom_feeder,
            FishKind::AlgaeEater => &self.algae_eater,
        }
    }
}

impl Default for FishProfiles {
    fn default() -> Self {
        Self {
            midwater: FishProfile {
                max_size_factor: 2.0,
                speed: Span::new(80.0, 120.0),
                initial_hunger: 0.5,
                hunger_rate: Span::new(0.02, 0.05),
                eat_threshold: 0.35,
                lifespan: Span::new(180.0, 420.0),
                growth_per_meal: 0.30,
                wander: 20.0,
                depth: DepthRule::WaterColumn {
                    min: 0.35,
                    max: 0.65,
                },
                depth_band: Span::new(20.0, 40.0),
                depth_kp: 0.35,
                depth_kd: 0.25,
                glide_omega: Span::new(0.6, 1.0),
                glide_amplitude: Span::new(20.0, 45.0),
                seek_gain: 1.0,
                diet: Diet::Pellets {
                    settled_only: false,
                },
                chases_pellets: true,
                spawn_jitter: 60.0,
                default_size: Span::new(14.0, 22.0),
            },
            bottom_feeder: FishProfile {
                max_size_factor: 1.8,
                speed: Span::new(70.0, 100.0),
                initial_hunger: 0.4,
                hunger_rate: Span::new(0.015, 0.04),
                eat_threshold: 0.30,
                lifespan: Span::new(210.0, 510.0),
                growth_per_meal: 0.25,
                wander: 15.0,
                depth: DepthRule::AboveFloor {
                    spawn: 30.0,
                    hold: 25.0,
                },
                depth_band: Span::new(15.0, 25.0),
                depth_kp: 0.35,
                depth_kd: 0.25,
                glide_omega: Span::new(0.5, 0.8),
                glide_amplitude: Span::new(18.0, 40.0),
                seek_gain: 0.9,
                diet: Diet::Pellets { settled_only: true },
                chases_pellets: true,
                spawn_jitter: 70.0,
                default_size: Span::new(14.0, 20.0),
            },
            algae_eater: FishProfile {
                max_size_factor: 1.7,
                speed: Span::new(85.0, 120.0),
                initial_hunger: 0.3,
                hunger_rate: Span::new(0.012, 0.032),
                eat_threshold: 0.25,
                lifespan: Span::new(240.0, 540.0),
                growth_per_meal: 0.20,
                wander: 18.0,
                depth: DepthRule::WaterColumn {
                    min: 0.45,
                    max: 0.70,
                },
                depth_band: Span::new(22.0, 40.0),
                depth_kp: 0.35,
                depth_kd: 0.25,
                glide_omega: Span::new(0.55, 0.9),
                glide_amplitude: Span::new(18.0, 40.0),
                seek_gain: 1.0,
                diet: Diet::Algae,
                chases_pellets: true,
                spawn_jitter: 80.0,
                default_size: Span::new(14.0, 20.0),
            },
        }
    }
}

/// Cosmetic species available to each kind
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesCatalog {
    pub midwater: Vec<Species>,
    pub bottom_feeder: Vec<Species>,
    pub algae_eater: Vec<Species>,
}

impl SpeciesCatalog {
    pub fn for_kind(&self, kind: FishKind) -> &[Species] {
        match kind {
            FishKind::Midwater => &self.midwater,
            FishKind::BottomFeeder => &self.bottom_feeder,
            FishKind::AlgaeEater => &self.algae_eater,
        }
    }
}

const fn species(
    base: Rgb,
    fin: Rgb,
    pattern_color: Rgb,
    pattern: Pattern,
    long_tail: bool,
    wide_tail: bool,
) -> Species {
    Species {
        base,
        fin,
        pattern_color,
        pattern,
        long_tail,
        wide_tail,
    }
}

impl Default for SpeciesCatalog {
    fn default() -> Self {
        use Pattern::*;
        Self {
            midwater: vec![
                species(Rgb::new(255, 180, 70), Rgb::new(255, 230, 160), Rgb::new(180, 110, 20), Stripes, false, true),
                species(Rgb::new(220, 90, 90), Rgb::new(255, 190, 190), Rgb::new(140, 30, 30), Spots, true, false),
                species(Rgb::new(120, 180, 255), Rgb::new(200, 230, 255), Rgb::new(60, 100, 180), Stripes, true, true),
                species(Rgb::new(240, 220, 120), Rgb::new(255, 240, 180), Rgb::new(170, 150, 60), Plain, false, false),
            ],
            bottom_feeder: vec![
                species(Rgb::new(190, 170, 110), Rgb::new(220, 200, 150), Rgb::new(120, 100, 70), Spots, false, true),
                species(Rgb::new(170, 150, 100), Rgb::new(200, 180, 140), Rgb::new(120, 100, 70), Plain, false, false),
                species(Rgb::new(160, 140, 120), Rgb::new(210, 190, 170), Rgb::new(100, 80, 60), Stripes, false, false),
            ],
            algae_eater: vec![
                species(Rgb::new(100, 210, 120), Rgb::new(180, 255, 200), Rgb::new(60, 150, 70), Plain, false, true),
                species(Rgb::new(90, 200, 170), Rgb::new(180, 250, 230), Rgb::new(40, 140, 120), Stripes, true, false),
                species(Rgb::new(120, 220, 110), Rgb::new(200, 255, 190), Rgb::new(70, 160, 60), Spots, false, false),
            ],
        }
    }
}

/// A fish in the initial population
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeedFish {
    pub kind: FishKind,
    pub size: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TankConfig::default();
        config.validate().unwrap();
        assert_eq!(config.water_top(), 70.0);
        assert_eq!(config.floor_y(), 590.0);
        assert_eq!(config.population.len(), 3);
    }

    #[test]
    fn test_partial_toml_override() {
        let config = TankConfig::from_toml_str(
            r#"
            seed = 7

            [environment]
            filter_on = false

            [steering]
            max_dt = 0.05

            [pellet]
            max_age = 600.0
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert!(!config.environment.filter_on);
        assert_eq!(config.steering.max_dt, 0.05);
        // Untouched keys keep their defaults
        assert_eq!(config.steering.steer_rate, 2.0);
        assert_eq!(config.seaweed.clumps, 7);
        assert_eq!(config.pellet.max_age, Some(600.0));
        assert_eq!(config.pellet.sink.radius, 4.0);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = TankConfig::default();
        let text = config.to_toml_string().unwrap();
        let parsed = TankConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.fish.bottom_feeder.diet, Diet::Pellets { settled_only: true });
        assert_eq!(parsed.species.midwater.len(), 4);
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let mut config = TankConfig::default();
        config.tank.air_band = 600.0;
        assert!(matches!(config.validate(), Err(AquariumError::Config(_))));
    }

    #[test]
    fn test_rejects_empty_species() {
        let mut config = TankConfig::default();
        config.species.algae_eater.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_span_sample_in_range() {
        let mut rng = rand::thread_rng();
        let span = Span::new(2.0, 3.0);
        for _ in 0..100 {
            let v = span.sample(&mut rng);
            assert!((2.0..3.0).contains(&v) || v == 3.0);
        }
        assert_eq!(Span::fixed(4.0).sample(&mut rng), 4.0);
    }
}
