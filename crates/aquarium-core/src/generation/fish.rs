//! Fish spawning from per-kind profiles

use hecs::{Entity, World};
use rand::Rng;

use crate::components::*;
use crate::config::{DepthRule, Span, TankConfig};

/// Pick a cosmetic species for `kind` from the configured catalog
pub fn random_species(config: &TankConfig, kind: FishKind, rng: &mut impl Rng) -> Species {
    let catalog = config.species.for_kind(kind);
    catalog[rng.gen_range(0..catalog.len())]
}

/// Size used when a spawn request does not name one
pub fn default_spawn_size(config: &TankConfig, kind: FishKind, rng: &mut impl Rng) -> f32 {
    config.fish.for_kind(kind).default_size.sample_whole(rng)
}

/// Spawn one living fish of `kind` with all per-fish parameters drawn from `rng`
pub fn spawn_fish_entity(
    world: &mut World,
    config: &TankConfig,
    id: FishId,
    kind: FishKind,
    size: f32,
    rng: &mut impl Rng,
) -> Entity {
    let profile = config.fish.for_kind(kind);
    let species = random_species(config, kind, rng);

    let water_top = config.water_top();
    let floor = config.floor_y();
    let center_x = config.bounds().center().x;

    let x = center_x + Span::sample_symmetric(profile.spawn_jitter, rng);
    let (y, preferred_depth) = match profile.depth {
        DepthRule::WaterColumn { min, max } => {
            let y = water_top + (floor - water_top) * Span::new(min, max).sample(rng);
            (y, y)
        }
        DepthRule::AboveFloor { spawn, hold } => (floor - spawn, floor - hold),
    };

    let body = Body {
        size,
        max_size: size * profile.max_size_factor,
        speed: profile.speed.sample(rng),
    };
    let appetite = Appetite {
        hunger: profile.initial_hunger.clamp(0.0, 1.0),
        hunger_rate: profile.hunger_rate.sample(rng),
        eat_threshold: profile.eat_threshold,
        waste_timer: 0.0,
        growth_per_meal: profile.growth_per_meal,
        pending_growth: 0.0,
        diet: profile.diet,
    };
    let glide = Glide {
        phase: 0.0,
        omega: profile.glide_omega.sample(rng),
        amplitude: profile.glide_amplitude.sample(rng),
        wander: Span::sample_symmetric(profile.wander, rng),
        preferred_depth,
        depth_band: profile.depth_band.sample(rng),
        depth_kp: profile.depth_kp,
        depth_kd: profile.depth_kd,
        seek_gain: profile.seek_gain,
        chases_pellets: profile.chases_pellets,
    };
    let life = Life::new(profile.lifespan.sample(rng));

    let entity = world.spawn((
        Fish { id, kind, species },
        Position(Vec2::new(x, y)),
        Velocity::default(),
        body,
        appetite,
        glide,
        life,
    ));

    log::debug!(
        "Spawned {} {} (size {:.1}, lifespan {:.0}s)",
        kind.label(),
        id,
        size,
        life.lifespan
    );

    entity
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_spawn_midwater_in_water_column() {
        let config = TankConfig::default();
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let entity = spawn_fish_entity(&mut world, &config, FishId(1), FishKind::Midwater, 18.0, &mut rng);

        let pos = world.get::<&Position>(entity).unwrap().0;
        assert!(pos.y > config.water_top() && pos.y < config.floor_y());
        let body = *world.get::<&Body>(entity).unwrap();
        assert_eq!(body.max_size, 36.0);
        assert!(body.speed >= 80.0 && body.speed <= 120.0);
        let glide = *world.get::<&Glide>(entity).unwrap();
        assert_eq!(glide.preferred_depth, pos.y);
    }

    #[test]
    fn test_spawn_bottom_feeder_near_floor() {
        let config = TankConfig::default();
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let entity = spawn_fish_entity(&mut world, &config, FishId(2), FishKind::BottomFeeder, 16.0, &mut rng);

        let pos = world.get::<&Position>(entity).unwrap().0;
        assert_eq!(pos.y, config.floor_y() - 30.0);
        let appetite = *world.get::<&Appetite>(entity).unwrap();
        assert_eq!(appetite.diet, Diet::Pellets { settled_only: true });
        let fish = *world.get::<&Fish>(entity).unwrap();
        assert!(config.species.bottom_feeder.contains(&fish.species));
    }

    #[test]
    fn test_default_size_is_whole() {
        let config = TankConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            let size = default_spawn_size(&config, FishKind::Midwater, &mut rng);
            assert_eq!(size, size.floor());
            assert!((14.0..=21.0).contains(&size));
        }
    }
}
