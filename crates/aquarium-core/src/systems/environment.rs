//! Environment systems - water fouling, seaweed cleaning and filtration

use hecs::World;
use serde::{Deserialize, Serialize};

use crate::components::{Corpse, Pellet, Poop, Position, Seaweed, Sinking, Vec2};
use crate::config::{EnvironmentConfig, SeaweedConfig, SteeringConfig};

/// Tank-wide water state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// General water dirt, 0..=100
    pub dirt: f32,
    /// Algae bloom severity, 0..=100
    pub algae: f32,
    pub filter_on: bool,
}

impl Environment {
    pub const MAX_LEVEL: f32 = 100.0;

    pub fn new(filter_on: bool) -> Self {
        Self {
            dirt: 0.0,
            algae: 0.0,
            filter_on,
        }
    }

    /// Add (or with a negative amount, remove) dirt, staying within bounds
    pub fn add_dirt(&mut self, amount: f32) {
        self.dirt = (self.dirt + amount).clamp(0.0, Self::MAX_LEVEL);
    }

    pub fn add_algae(&mut self, amount: f32) {
        self.algae = (self.algae + amount).clamp(0.0, Self::MAX_LEVEL);
    }

    /// Multiplier on fish top speed; fouled water slows everyone down
    pub fn speed_factor(&self, steering: &SteeringConfig) -> f32 {
        let fouling = (self.dirt + self.algae) / steering.fouling_scale;
        1.0 - fouling.min(steering.max_fouling_slowdown)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Passive fouling: lingering pellets, loose poop and rotting corpses
pub fn drift_system(
    world: &mut World,
    env: &mut Environment,
    tuning: &EnvironmentConfig,
    delta_seconds: f32,
) {
    for (_, pellet) in world.query_mut::<&mut Pellet>() {
        pellet.age += delta_seconds;
        if pellet.age > tuning.pellet_linger_secs {
            env.add_algae(tuning.lingering_pellet_algae * delta_seconds);
            env.add_dirt(tuning.lingering_pellet_dirt * delta_seconds);
        }
    }

    for (_, poop) in world.query_mut::<&mut Poop>() {
        poop.age += delta_seconds;
        env.add_dirt(tuning.poop_dirt_rate * delta_seconds);
    }

    for (_, (sinking, corpse)) in world.query_mut::<(&Sinking, &mut Corpse)>() {
        if sinking.settled && !corpse.consumed {
            corpse.rot(corpse.decay_rate * delta_seconds);
            env.add_dirt(tuning.corpse_dirt_rate * delta_seconds);
            env.add_algae(tuning.corpse_algae_rate * delta_seconds);
        }
        corpse.age += delta_seconds;
    }
}

/// Totals from one seaweed pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeaweedReport {
    pub poops_cleaned: u32,
    pub corpses_finished: u32,
}

/// Seaweed sways, cleans nearby poop and grazes settled corpses
pub fn seaweed_system(
    world: &mut World,
    env: &mut Environment,
    tuning: &SeaweedConfig,
    delta_seconds: f32,
) -> SeaweedReport {
    let mut report = SeaweedReport::default();

    let mut clumps: Vec<(Vec2, Seaweed)> = Vec::new();
    for (_, (pos, weed)) in world.query_mut::<(&Position, &mut Seaweed)>() {
        weed.phase = (weed.phase + tuning.sway_speed * delta_seconds) % std::f32::consts::TAU;
        clumps.push((weed.reach_center(pos.0), *weed));
    }

    for (center, weed) in clumps {
        let mut cleaned = 0u32;
        for (_, (pos, poop)) in world.query_mut::<(&Position, &mut Poop)>() {
            if !poop.removed && center.distance(&pos.0) < weed.clean_radius {
                poop.removed = true;
                cleaned += 1;
            }
        }
        if cleaned > 0 {
            env.add_dirt(-tuning.poop_dirt_relief * cleaned as f32);
            env.add_algae(-tuning.poop_algae_relief * cleaned as f32);
            report.poops_cleaned += cleaned;
        }

        for (_, (pos, sinking, corpse)) in world.query_mut::<(&Position, &Sinking, &mut Corpse)>() {
            if !sinking.settled || corpse.consumed {
                continue;
            }
            if center.distance(&pos.0) < weed.clean_radius + sinking.radius() {
                let bite = tuning.bite * weed.eat_rate * delta_seconds;
                corpse.rot(bite);
                env.add_dirt(-tuning.bite_dirt_relief * bite);
                env.add_algae(-tuning.bite_algae_relief * bite);
                if corpse.decay >= 1.0 {
                    corpse.consumed = true;
                    report.corpses_finished += 1;
                }
            }
        }
    }

    report
}

/// Filter scrubs the water when on; without it dirt builds up
pub fn filtration_system(env: &mut Environment, tuning: &EnvironmentConfig, delta_seconds: f32) {
    if env.filter_on {
        let scrub = tuning.filter_strength * delta_seconds;
        env.add_algae(-scrub.min(env.algae));
        env.add_dirt(-scrub * tuning.filter_dirt_ratio);
    } else {
        env.add_dirt(tuning.unfiltered_dirt_rate * delta_seconds);
    }
}
