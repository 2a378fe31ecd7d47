//! Disturbance - tapping the glass startles every living fish

use hecs::{Entity, World};
use rand::Rng;

use crate::components::{Body, Fish, Life, Position, Scared, Vec2, Velocity};
use crate::config::DisturbanceConfig;

/// Kick every living fish away from `origin` and put it in the scared state.
/// Returns the number of fish startled.
pub fn scare_fish(
    world: &mut World,
    origin: Vec2,
    tuning: &DisturbanceConfig,
    rng: &mut impl Rng,
) -> usize {
    let mut startled: Vec<(Entity, f32)> = Vec::new();

    for (entity, (_, pos, vel, body, life)) in
        world.query_mut::<(&Fish, &Position, &mut Velocity, &Body, &Life)>()
    {
        if !life.alive {
            continue;
        }
        let away = -pos.0.direction_to(&origin);
        let kick = body.speed * tuning.kick.sample(rng);
        let jitter = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5)
            * (body.speed * tuning.jitter);
        vel.0 = away * kick + jitter;
        startled.push((entity, tuning.scare_secs.sample(rng)));
    }

    for (entity, remaining) in &startled {
        // Replaces any scare already in progress
        let _ = world.insert_one(*entity, Scared { remaining: *remaining });
    }

    startled.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{FishId, FishKind};
    use crate::config::TankConfig;
    use crate::generation::spawn_fish_entity;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_fish_flee_from_tap() {
        let config = TankConfig::default();
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let fish = spawn_fish_entity(&mut world, &config, FishId(1), FishKind::Midwater, 18.0, &mut rng);
        let pos = world.get::<&Position>(fish).unwrap().0;
        let origin = pos + Vec2::new(-50.0, 0.0);

        let count = scare_fish(&mut world, origin, &config.disturbance, &mut rng);

        assert_eq!(count, 1);
        let vel = world.get::<&Velocity>(fish).unwrap().0;
        assert!(vel.x > 0.0, "should flee to the right, got {:?}", vel);
        let scared = *world.get::<&Scared>(fish).unwrap();
        assert!(scared.remaining >= 0.6 && scared.remaining <= 1.3);
    }

    #[test]
    fn test_dead_fish_not_scared() {
        let config = TankConfig::default();
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let fish = spawn_fish_entity(&mut world, &config, FishId(1), FishKind::Midwater, 18.0, &mut rng);
        world.get::<&mut Life>(fish).unwrap().alive = false;

        assert_eq!(scare_fish(&mut world, Vec2::ZERO, &config.disturbance, &mut rng), 0);
        assert!(world.get::<&Scared>(fish).is_err());
    }
}
