//! Fish update - aging, hunger, digestion, growth, steering and motion

use hecs::{Entity, World};

use crate::components::*;
use crate::config::TankConfig;
use super::{contain_in_water, steer, FoodMap, SteeringContext};

/// Structural changes produced by one fish pass, applied by the caller
#[derive(Debug, Default)]
pub struct FishPassOutcome {
    /// Where digestion finished this tick
    pub poop_at: Vec<Vec2>,
    /// Fish whose scare ran out
    pub calmed: Vec<Entity>,
    /// Fish that died of old age
    pub died: Vec<FishId>,
}

/// Advance every fish by one tick (tick step 5)
pub fn fish_system(
    world: &mut World,
    config: &TankConfig,
    food: &FoodMap,
    ctx: &SteeringContext,
    delta_seconds: f32,
) -> FishPassOutcome {
    let mut outcome = FishPassOutcome::default();
    let water_top = config.water_top();
    let floor = config.floor_y();
    let damping = config.disturbance.damping;

    for (entity, (fish, pos, vel, body, appetite, glide, life, scared)) in world.query_mut::<(
        &Fish,
        &mut Position,
        &mut Velocity,
        &mut Body,
        &mut Appetite,
        &mut Glide,
        &mut Life,
        Option<&mut Scared>,
    )>() {
        if !life.alive {
            life.age += delta_seconds;
            continue;
        }

        appetite.get_hungry(delta_seconds);

        if appetite.digest(delta_seconds) {
            outcome.poop_at.push(pos.0 + Vec2::new(0.0, body.size * 0.2));
        }

        let growth = appetite.take_growth(delta_seconds * config.steering.growth_rate);
        body.grow(growth);

        if life.grow_older(delta_seconds) {
            outcome.died.push(fish.id);
            continue;
        }

        match scared {
            Some(scared) => {
                scared.remaining -= delta_seconds;
                vel.0 = vel.0 * damping;
                if scared.remaining <= 0.0 {
                    outcome.calmed.push(entity);
                }
            }
            None => {
                let target = if appetite.is_hungry() {
                    food.chase_target(pos.0, appetite.diet, glide.chases_pellets)
                        .map(|spot| spot.position)
                } else {
                    None
                };
                vel.0 = steer(glide, pos.0, vel.0, body.speed, target, ctx, delta_seconds);
            }
        }

        pos.0 += vel.0 * delta_seconds;
        contain_in_water(
            &mut pos.0,
            &mut vel.0,
            body.size,
            ctx.bounds,
            water_top,
            floor,
            config.steering.wall_clearance,
        );
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::spawn_fish_entity;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (World, TankConfig, Entity) {
        let config = TankConfig::default();
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let fish = spawn_fish_entity(&mut world, &config, FishId(1), FishKind::Midwater, 18.0, &mut rng);
        (world, config, fish)
    }

    fn run(world: &mut World, config: &TankConfig, dt: f32) -> FishPassOutcome {
        let ctx = SteeringContext {
            tuning: &config.steering,
            bounds: config.bounds(),
            cursor: None,
            speed_factor: 1.0,
        };
        fish_system(world, config, &FoodMap::default(), &ctx, dt)
    }

    #[test]
    fn test_hunger_rises() {
        let (mut world, config, fish) = setup();
        let before = world.get::<&Appetite>(fish).unwrap().hunger;
        run(&mut world, &config, 0.1);
        assert!(world.get::<&Appetite>(fish).unwrap().hunger > before);
    }

    #[test]
    fn test_digestion_produces_poop_below_fish() {
        let (mut world, config, fish) = setup();
        world.get::<&mut Appetite>(fish).unwrap().waste_timer = 0.05;
        let pos = world.get::<&Position>(fish).unwrap().0;

        let outcome = run(&mut world, &config, 0.1);

        assert_eq!(outcome.poop_at.len(), 1);
        assert!((outcome.poop_at[0].y - (pos.y + 18.0 * 0.2)).abs() < 10.0);
    }

    #[test]
    fn test_growth_applied_gradually() {
        let (mut world, config, fish) = setup();
        world.get::<&mut Appetite>(fish).unwrap().pending_growth = 0.3;

        run(&mut world, &config, 0.1);

        let body = *world.get::<&Body>(fish).unwrap();
        assert!((body.size - 18.025).abs() < 1e-4);
        let pending = world.get::<&Appetite>(fish).unwrap().pending_growth;
        assert!((pending - 0.275).abs() < 1e-4);
    }

    #[test]
    fn test_old_age_kills() {
        let (mut world, config, fish) = setup();
        {
            let mut life = world.get::<&mut Life>(fish).unwrap();
            life.age = life.lifespan - 0.01;
        }
        let outcome = run(&mut world, &config, 0.1);
        assert_eq!(outcome.died, vec![FishId(1)]);
        assert!(!world.get::<&Life>(fish).unwrap().alive);
    }

    #[test]
    fn test_scared_fish_coasts_then_calms() {
        let (mut world, config, fish) = setup();
        world.get::<&mut Velocity>(fish).unwrap().0 = Vec2::new(200.0, 0.0);
        world.insert_one(fish, Scared { remaining: 0.15 }).unwrap();

        let outcome = run(&mut world, &config, 0.1);
        assert!(outcome.calmed.is_empty());
        assert!((world.get::<&Velocity>(fish).unwrap().0.x - 197.0).abs() < 1e-3);

        let outcome = run(&mut world, &config, 0.1);
        assert_eq!(outcome.calmed, vec![fish]);
    }

    #[test]
    fn test_hungry_algae_eater_swims_toward_pellets() {
        let config = TankConfig::default();
        let ctx = SteeringContext {
            tuning: &config.steering,
            bounds: config.bounds(),
            cursor: None,
            speed_factor: 1.0,
        };

        let swim = |with_pellet: bool| {
            let mut world = World::new();
            let mut rng = ChaCha8Rng::seed_from_u64(3);
            let fish = spawn_fish_entity(&mut world, &config, FishId(1), FishKind::AlgaeEater, 16.0, &mut rng);
            world.get::<&mut Appetite>(fish).unwrap().hunger = 0.9;
            if with_pellet {
                let mut sinking = Sinking::new(config.pellet.sink);
                sinking.settled = true;
                world.spawn((Position(Vec2::new(60.0, 500.0)), sinking, Pellet::default()));
            }
            for _ in 0..100 {
                let food = FoodMap::gather(&world);
                fish_system(&mut world, &config, &food, &ctx, 0.05);
            }
            let pos = world.get::<&Position>(fish).unwrap().0;
            pos
        };

        let idle = swim(false);
        let chasing = swim(true);
        let pellet = Vec2::new(60.0, 500.0);
        assert_ne!(idle, chasing);
        assert!(chasing.distance(&pellet) < idle.distance(&pellet));
    }

    #[test]
    fn test_fish_stays_out_of_air_band() {
        let (mut world, config, fish) = setup();
        {
            let mut pos = world.get::<&mut Position>(fish).unwrap();
            pos.0.y = config.tank.y + 1.0;
        }
        run(&mut world, &config, 0.1);
        let pos = world.get::<&Position>(fish).unwrap().0;
        assert!(pos.y >= config.water_top());
    }
}
