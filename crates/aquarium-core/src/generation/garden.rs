//! Seaweed planting

use hecs::{Entity, World};
use rand::Rng;

use crate::components::{Position, Seaweed, Vec2};
use crate::config::TankConfig;

/// Plant evenly spaced seaweed clumps along the floor
pub fn plant_seaweed(world: &mut World, config: &TankConfig, rng: &mut impl Rng) -> Vec<Entity> {
    let tuning = &config.seaweed;
    let bounds = config.bounds();
    let floor = config.floor_y();
    let clumps = tuning.clumps;

    (0..clumps)
        .map(|i| {
            let x = bounds.left() + (i as f32 + 0.5) * (bounds.width / clumps as f32);
            let seaweed = Seaweed {
                height: tuning.height.sample_whole(rng),
                phase: rng.gen::<f32>() * std::f32::consts::TAU,
                clean_radius: tuning.clean_radius,
                eat_rate: tuning.eat_rate,
            };
            world.spawn((Position(Vec2::new(x, floor)), seaweed))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_plant_seaweed_spacing() {
        let config = TankConfig::default();
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let clumps = plant_seaweed(&mut world, &config, &mut rng);
        assert_eq!(clumps.len(), 7);

        for (i, entity) in clumps.iter().enumerate() {
            let pos = world.get::<&Position>(*entity).unwrap().0;
            let expected_x = 20.0 + (i as f32 + 0.5) * (920.0 / 7.0);
            assert!((pos.x - expected_x).abs() < 1e-3);
            assert_eq!(pos.y, config.floor_y());
            let weed = *world.get::<&Seaweed>(*entity).unwrap();
            assert!(weed.height >= 40.0 && weed.height <= 74.0);
        }
    }
}
