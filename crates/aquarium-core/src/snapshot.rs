//! Read-only views of the tank for renderers and status displays

use hecs::World;
use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::error::Result;
use crate::systems::Environment;

/// Everything a renderer needs to draw one fish
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FishView {
    pub id: FishId,
    pub kind: FishKind,
    pub species: Species,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Facing angle in radians, from the velocity
    pub heading: f32,
    pub size: f32,
    pub max_size: f32,
    pub hunger: f32,
    pub scared: bool,
    pub alive: bool,
    /// Age as a fraction of lifespan
    pub life_stage: f32,
}

impl FishView {
    pub(crate) fn capture(world: &World, entity: hecs::Entity) -> Option<Self> {
        let mut query = world
            .query_one::<(&Fish, &Position, &Velocity, &Body, &Appetite, &Life, Option<&Scared>)>(entity)
            .ok()?;
        let (fish, pos, vel, body, appetite, life, scared) = query.get()?;
        Some(Self {
            id: fish.id,
            kind: fish.kind,
            species: fish.species,
            position: pos.0,
            velocity: vel.0,
            heading: vel.0.y.atan2(vel.0.x),
            size: body.size,
            max_size: body.max_size,
            hunger: appetite.hunger,
            scared: scared.is_some(),
            alive: life.alive,
            life_stage: life.age_fraction(),
        })
    }
}

/// A pellet or a poop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub position: Vec2,
    pub radius: f32,
    pub settled: bool,
    pub age: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorpseView {
    pub source: FishId,
    pub position: Vec2,
    pub radius: f32,
    pub settled: bool,
    pub decay: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeaweedView {
    pub root: Vec2,
    pub height: f32,
    pub phase: f32,
    pub clean_radius: f32,
}

/// Complete, owned copy of the tank state at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankSnapshot {
    pub bounds: Rect,
    pub water_top: f32,
    pub floor_y: f32,
    pub elapsed: f64,
    pub paused: bool,
    pub environment: Environment,
    /// Sorted by id
    pub fish: Vec<FishView>,
    pub pellets: Vec<ParticleView>,
    pub poops: Vec<ParticleView>,
    pub corpses: Vec<CorpseView>,
    pub seaweed: Vec<SeaweedView>,
}

impl TankSnapshot {
    pub(crate) fn capture(
        world: &World,
        bounds: Rect,
        water_top: f32,
        floor_y: f32,
        elapsed: f64,
        paused: bool,
        environment: Environment,
    ) -> Self {
        let mut fish: Vec<FishView> = world
            .query::<&Fish>()
            .iter()
            .filter_map(|(entity, _)| FishView::capture(world, entity))
            .collect();
        fish.sort_by_key(|f| f.id);

        let pellets = world
            .query::<(&Position, &Sinking, &Pellet)>()
            .iter()
            .map(|(_, (pos, sinking, pellet))| ParticleView {
                position: pos.0,
                radius: sinking.radius(),
                settled: sinking.settled,
                age: pellet.age,
            })
            .collect();

        let poops = world
            .query::<(&Position, &Sinking, &Poop)>()
            .iter()
            .map(|(_, (pos, sinking, poop))| ParticleView {
                position: pos.0,
                radius: sinking.radius(),
                settled: sinking.settled,
                age: poop.age,
            })
            .collect();

        let corpses = world
            .query::<(&Position, &Sinking, &Corpse)>()
            .iter()
            .map(|(_, (pos, sinking, corpse))| CorpseView {
                source: corpse.source,
                position: pos.0,
                radius: sinking.radius(),
                settled: sinking.settled,
                decay: corpse.decay,
            })
            .collect();

        let seaweed = world
            .query::<(&Position, &Seaweed)>()
            .iter()
            .map(|(_, (pos, weed))| SeaweedView {
                root: pos.0,
                height: weed.height,
                phase: weed.phase,
                clean_radius: weed.clean_radius,
            })
            .collect();

        Self {
            bounds,
            water_top,
            floor_y,
            elapsed,
            paused,
            environment,
            fish,
            pellets,
            poops,
            corpses,
            seaweed,
        }
    }

    pub fn status(&self) -> StatusLine {
        StatusLine {
            fish: self.fish.len(),
            pellets: self.pellets.len(),
            poops: self.poops.len(),
            corpses: self.corpses.len(),
            dirt: self.environment.dirt,
            algae: self.environment.algae,
            filter_on: self.environment.filter_on,
            elapsed: self.elapsed,
            paused: self.paused,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One-line summary for a status bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusLine {
    pub fish: usize,
    pub pellets: usize,
    pub poops: usize,
    pub corpses: usize,
    pub dirt: f32,
    pub algae: f32,
    pub filter_on: bool,
    pub elapsed: f64,
    pub paused: bool,
}

impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Fish: {} | Pellets: {} | Poops: {} | Corpses: {} | Dirt: {:.1} | Algae: {:.1} | Filter: {} | Time: {}s",
            self.fish,
            self.pellets,
            self.poops,
            self.corpses,
            self.dirt,
            self.algae,
            if self.filter_on { "ON" } else { "OFF" },
            self.elapsed as u64,
        )?;
        if self.paused {
            write!(f, " (PAUSED)")?;
        }
        Ok(())
    }
}
