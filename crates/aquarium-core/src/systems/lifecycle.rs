//! Lifecycle systems - turning dead fish into corpses and purging spent entities

use hecs::{Entity, World};

use crate::components::*;
use crate::config::TankConfig;

/// Spawn a poop at `at`
pub fn spawn_poop(world: &mut World, config: &TankConfig, at: Vec2) -> Entity {
    world.spawn((
        Position(at),
        Sinking::new(config.poop.sink),
        Poop::default(),
    ))
}

/// Spawn a pellet at `at`
pub fn spawn_pellet(world: &mut World, config: &TankConfig, at: Vec2) -> Entity {
    world.spawn((
        Position(at),
        Sinking::new(config.pellet.sink),
        Pellet::default(),
    ))
}

/// Convert every newly dead fish into exactly one corpse, then remove the
/// converted fish (tick step 8). Returns the ids of the converted fish.
pub fn corpse_system(world: &mut World, config: &TankConfig) -> Vec<FishId> {
    let mut remains: Vec<(FishId, Vec2, f32)> = Vec::new();
    let mut gone: Vec<Entity> = Vec::new();

    for (entity, (fish, pos, body, life)) in
        world.query_mut::<(&Fish, &Position, &Body, &mut Life)>()
    {
        if life.alive {
            continue;
        }
        if !life.converted {
            life.converted = true;
            remains.push((fish.id, pos.0, body.size));
        }
        gone.push(entity);
    }

    for (id, at, size) in &remains {
        world.spawn((
            Position(*at),
            Sinking::new(config.corpse.sink_profile(*size)),
            Corpse::new(*id, config.corpse.decay_rate),
        ));
        log::debug!("{} became a corpse at ({:.0}, {:.0})", id, at.x, at.y);
    }

    for entity in gone {
        let _ = world.despawn(entity);
    }

    remains.into_iter().map(|(id, _, _)| id).collect()
}

/// Counts of entities purged by one cleanup pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub pellets: usize,
    pub poops: usize,
    pub corpses: usize,
}

/// Purge eaten pellets, cleaned or dissolved poop and finished corpses (tick step 9)
pub fn cleanup_system(world: &mut World, config: &TankConfig) -> CleanupReport {
    let pellet_max_age = config.pellet.max_age;
    let pellets: Vec<Entity> = world
        .query::<&Pellet>()
        .iter()
        .filter(|(_, p)| p.eaten || pellet_max_age.is_some_and(|max| p.age > max))
        .map(|(e, _)| e)
        .collect();

    let poops: Vec<Entity> = world
        .query::<&Poop>()
        .iter()
        .filter(|(_, p)| p.removed || p.age > config.poop.max_age)
        .map(|(e, _)| e)
        .collect();

    let corpses: Vec<Entity> = world
        .query::<&Corpse>()
        .iter()
        .filter(|(_, c)| c.consumed || c.decay >= 1.0 || c.age > config.corpse.max_age)
        .map(|(e, _)| e)
        .collect();

    let report = CleanupReport {
        pellets: pellets.len(),
        poops: poops.len(),
        corpses: corpses.len(),
    };

    for entity in pellets.into_iter().chain(poops).chain(corpses) {
        let _ = world.despawn(entity);
    }

    report
}
