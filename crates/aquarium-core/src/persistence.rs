//! Save/Load functionality for persisting a tank
//!
//! Uses bincode for a compact binary image of the whole engine, RNG state
//! included, so a restored tank continues exactly where the saved one would.
//! Components are serialized per entity and reassembled on load.

use hecs::{EntityBuilder, World};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::components::*;
use crate::config::TankConfig;
use crate::error::{AquariumError, Result};
use crate::systems::Environment;

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

/// Serializable image of an engine
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// Tank configuration rendered as TOML
    pub config: String,
    pub environment: Environment,
    /// Simulated seconds
    pub elapsed: f64,
    pub paused: bool,
    pub pointer: Option<Vec2>,
    pub next_fish_id: u64,
    pub rng: ChaCha8Rng,
    /// All entities with their components, in world order
    pub entities: Vec<SerializableEntity>,
}

/// All possible components for an entity, serialized as optionals
#[derive(Serialize, Deserialize, Default)]
pub struct SerializableEntity {
    pub position: Option<Position>,
    pub velocity: Option<Velocity>,

    // Fish
    pub fish: Option<Fish>,
    pub body: Option<Body>,
    pub appetite: Option<Appetite>,
    pub glide: Option<Glide>,
    pub life: Option<Life>,
    pub scared: Option<Scared>,

    // Debris
    pub sinking: Option<Sinking>,
    pub pellet: Option<Pellet>,
    pub poop: Option<Poop>,
    pub corpse: Option<Corpse>,

    pub seaweed: Option<Seaweed>,
}

/// Borrowed engine state handed to [`save_tank`]
pub struct TankState<'a> {
    pub world: &'a World,
    pub config: &'a TankConfig,
    pub environment: Environment,
    pub elapsed: f64,
    pub paused: bool,
    pub pointer: Option<Vec2>,
    pub next_fish_id: u64,
    pub rng: &'a ChaCha8Rng,
}

/// Result of loading a tank
pub struct LoadedTank {
    pub world: World,
    pub config: TankConfig,
    pub environment: Environment,
    pub elapsed: f64,
    pub paused: bool,
    pub pointer: Option<Vec2>,
    pub next_fish_id: u64,
    pub rng: ChaCha8Rng,
}

/// Extract all entities from a world into serializable form
fn serialize_entities(world: &World) -> Vec<SerializableEntity> {
    let mut entities = Vec::new();

    for entity_ref in world.iter() {
        let mut se = SerializableEntity::default();

        if let Some(c) = entity_ref.get::<&Position>() {
            se.position = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&Velocity>() {
            se.velocity = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&Fish>() {
            se.fish = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&Body>() {
            se.body = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&Appetite>() {
            se.appetite = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&Glide>() {
            se.glide = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&Life>() {
            se.life = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&Scared>() {
            se.scared = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&Sinking>() {
            se.sinking = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&Pellet>() {
            se.pellet = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&Poop>() {
            se.poop = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&Corpse>() {
            se.corpse = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&Seaweed>() {
            se.seaweed = Some(*c);
        }

        entities.push(se);
    }

    entities
}

/// Rebuild a world from serialized entities.
///
/// Each entity is spawned with its full component set in one go, so entities
/// land in their final archetypes in the saved order and queries visit them
/// in the same order as before the save.
fn deserialize_entities(world: &mut World, entities: Vec<SerializableEntity>) {
    let mut builder = EntityBuilder::new();
    for se in entities {
        if let Some(c) = se.position {
            builder.add(c);
        }
        if let Some(c) = se.velocity {
            builder.add(c);
        }
        if let Some(c) = se.fish {
            builder.add(c);
        }
        if let Some(c) = se.body {
            builder.add(c);
        }
        if let Some(c) = se.appetite {
            builder.add(c);
        }
        if let Some(c) = se.glide {
            builder.add(c);
        }
        if let Some(c) = se.life {
            builder.add(c);
        }
        if let Some(c) = se.scared {
            builder.add(c);
        }
        if let Some(c) = se.sinking {
            builder.add(c);
        }
        if let Some(c) = se.pellet {
            builder.add(c);
        }
        if let Some(c) = se.poop {
            builder.add(c);
        }
        if let Some(c) = se.corpse {
            builder.add(c);
        }
        if let Some(c) = se.seaweed {
            builder.add(c);
        }
        world.spawn(builder.build());
    }
}

/// Save the complete tank to a writer
pub fn save_tank<W: Write>(writer: W, state: TankState<'_>) -> Result<()> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        config: state.config.to_toml_string()?,
        environment: state.environment,
        elapsed: state.elapsed,
        paused: state.paused,
        pointer: state.pointer,
        next_fish_id: state.next_fish_id,
        rng: state.rng.clone(),
        entities: serialize_entities(state.world),
    };

    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Load a tank from a reader
pub fn load_tank<R: Read>(reader: R) -> Result<LoadedTank> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(AquariumError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    let config = TankConfig::from_toml_str(&save_data.config)?;
    let mut world = World::new();
    deserialize_entities(&mut world, save_data.entities);

    Ok(LoadedTank {
        world,
        config,
        environment: save_data.environment,
        elapsed: save_data.elapsed,
        paused: save_data.paused,
        pointer: save_data.pointer,
        next_fish_id: save_data.next_fish_id,
        rng: save_data.rng,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::engine::AquariumEngine;

    #[test]
    fn test_save_load_roundtrip() {
        let mut engine = AquariumEngine::new(TankConfig::default()).unwrap();
        engine.feed_at(300.0).unwrap();
        engine.feed_at(600.0).unwrap();
        for _ in 0..60 {
            engine.advance(1.0 / 30.0);
        }

        let mut save_buffer = Vec::new();
        engine.save(&mut save_buffer).expect("Save failed");

        let loaded = AquariumEngine::load(&save_buffer[..]).expect("Load failed");

        assert!((loaded.elapsed() - engine.elapsed()).abs() < 1e-9);
        assert_eq!(loaded.fish_count(), engine.fish_count());
        assert_eq!(loaded.pellet_count(), engine.pellet_count());
        assert_eq!(loaded.seaweed_count(), 7);
        assert_eq!(loaded.snapshot(), engine.snapshot());
    }

    #[test]
    fn test_loaded_tank_continues_identically() {
        let mut engine = AquariumEngine::new(TankConfig::default()).unwrap();
        engine.feed_at(250.0).unwrap();
        for _ in 0..100 {
            engine.advance(0.05);
        }

        let mut save_buffer = Vec::new();
        engine.save(&mut save_buffer).unwrap();
        let mut loaded = AquariumEngine::load(&save_buffer[..]).unwrap();

        for tank in [&mut engine, &mut loaded] {
            tank.submit(Command::DisturbAt {
                at: Vec2::new(400.0, 300.0),
            });
            tank.submit(Command::FeedAt { x: 700.0 });
            for _ in 0..200 {
                tank.advance(0.05);
            }
        }

        assert_eq!(loaded.snapshot(), engine.snapshot());
    }

    #[test]
    fn test_version_mismatch() {
        let engine = AquariumEngine::new(TankConfig::default()).unwrap();
        let mut buffer = Vec::new();
        engine.save(&mut buffer).unwrap();

        // The version is the leading little-endian u32
        buffer[0] = 99;
        match AquariumEngine::load(&buffer[..]) {
            Err(AquariumError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, SAVE_VERSION);
                assert_eq!(found, 99);
            }
            other => panic!("expected version mismatch, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_truncated_save_is_an_error() {
        let engine = AquariumEngine::new(TankConfig::default()).unwrap();
        let mut buffer = Vec::new();
        engine.save(&mut buffer).unwrap();
        buffer.truncate(buffer.len() / 2);
        assert!(matches!(
            AquariumEngine::load(&buffer[..]),
            Err(AquariumError::Serialization(_))
        ));
    }
}
