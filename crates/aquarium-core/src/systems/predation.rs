//! Predation system - hungry fish eat much smaller fish within reach

use hecs::{Entity, World};

use crate::components::{Appetite, Body, Fish, FishId, Life, Position, Vec2};
use crate::config::PredationConfig;

/// One predation event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kill {
    pub predator: FishId,
    pub prey: FishId,
}

struct Candidate {
    entity: Entity,
    id: FishId,
    position: Vec2,
    size: f32,
    hunger: f32,
    alive: bool,
}

/// Each hungry fish may eat at most one smaller neighbour per tick.
/// A fish eaten earlier in the pass can neither hunt nor be eaten again.
pub fn predation_system(world: &mut World, tuning: &PredationConfig) -> Vec<Kill> {
    let mut candidates: Vec<Candidate> = world
        .query::<(&Fish, &Position, &Body, &Appetite, &Life)>()
        .iter()
        .map(|(entity, (fish, pos, body, appetite, life))| Candidate {
            entity,
            id: fish.id,
            position: pos.0,
            size: body.size,
            hunger: appetite.hunger,
            alive: life.alive,
        })
        .collect();

    let mut meals: Vec<(usize, usize)> = Vec::new();
    for hunter in 0..candidates.len() {
        let h = &candidates[hunter];
        if !h.alive || h.hunger < tuning.min_hunger {
            continue;
        }
        let prey = (0..candidates.len()).find(|&other| {
            let o = &candidates[other];
            other != hunter
                && o.alive
                && o.size < h.size * tuning.prey_size_ratio
                && h.position.distance(&o.position) < (h.size + o.size) * tuning.reach_factor
        });
        if let Some(prey) = prey {
            candidates[prey].alive = false;
            meals.push((hunter, prey));
        }
    }

    let mut kills = Vec::with_capacity(meals.len());
    for (hunter, prey) in meals {
        let (hunter, prey) = (&candidates[hunter], &candidates[prey]);

        if let Ok(mut life) = world.get::<&mut Life>(prey.entity) {
            life.alive = false;
        }
        if let Ok(mut appetite) = world.get::<&mut Appetite>(hunter.entity) {
            appetite.satisfy(tuning.satiety);
            appetite.waste_timer = tuning.digestion_secs;
            let growth = appetite.growth_per_meal;
            appetite.queue_growth(growth);
        }

        log::debug!("{} ate {}", hunter.id, prey.id);
        kills.push(Kill {
            predator: hunter.id,
            prey: prey.id,
        });
    }

    kills
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::*;
    use crate::config::TankConfig;

    fn spawn(world: &mut World, id: u64, pos: Vec2, size: f32, hunger: f32) -> Entity {
        world.spawn((
            Fish {
                id: FishId(id),
                kind: FishKind::Midwater,
                species: TankConfig::default().species.midwater[0],
            },
            Position(pos),
            Body {
                size,
                max_size: size * 2.0,
                speed: 100.0,
            },
            Appetite {
                hunger,
                hunger_rate: 0.03,
                eat_threshold: 0.35,
                waste_timer: 0.0,
                growth_per_meal: 0.3,
                pending_growth: 0.0,
                diet: Diet::Pellets { settled_only: false },
            },
            Life::new(300.0),
        ))
    }

    #[test]
    fn test_big_hungry_fish_eats_small_one() {
        let tuning = TankConfig::default().predation;
        let mut world = World::new();
        let big = spawn(&mut world, 1, Vec2::new(300.0, 300.0), 30.0, 0.9);
        let small = spawn(&mut world, 2, Vec2::new(310.0, 300.0), 12.0, 0.1);

        let kills = predation_system(&mut world, &tuning);

        assert_eq!(kills, vec![Kill { predator: FishId(1), prey: FishId(2) }]);
        assert!(!world.get::<&Life>(small).unwrap().alive);
        let appetite = *world.get::<&Appetite>(big).unwrap();
        assert!((appetite.hunger - 0.3).abs() < 1e-5);
        assert_eq!(appetite.waste_timer, 8.0);
        assert_eq!(appetite.pending_growth, 0.3);
    }

    #[test]
    fn test_not_hungry_enough() {
        let tuning = TankConfig::default().predation;
        let mut world = World::new();
        spawn(&mut world, 1, Vec2::new(300.0, 300.0), 30.0, 0.39);
        spawn(&mut world, 2, Vec2::new(305.0, 300.0), 12.0, 0.1);
        assert!(predation_system(&mut world, &tuning).is_empty());
    }

    #[test]
    fn test_similar_sizes_do_not_eat_each_other() {
        let tuning = TankConfig::default().predation;
        let mut world = World::new();
        spawn(&mut world, 1, Vec2::new(300.0, 300.0), 20.0, 1.0);
        spawn(&mut world, 2, Vec2::new(301.0, 300.0), 18.0, 1.0);
        assert!(predation_system(&mut world, &tuning).is_empty());
    }

    #[test]
    fn test_one_meal_per_tick_and_no_double_kill() {
        let tuning = TankConfig::default().predation;
        let mut world = World::new();
        spawn(&mut world, 1, Vec2::new(300.0, 300.0), 40.0, 1.0);
        spawn(&mut world, 2, Vec2::new(302.0, 300.0), 40.0, 1.0);
        spawn(&mut world, 3, Vec2::new(304.0, 300.0), 10.0, 0.0);
        spawn(&mut world, 4, Vec2::new(306.0, 300.0), 10.0, 0.0);

        let kills = predation_system(&mut world, &tuning);

        assert_eq!(kills.len(), 2);
        let mut prey: Vec<_> = kills.iter().map(|k| k.prey).collect();
        prey.sort();
        assert_eq!(prey, vec![FishId(3), FishId(4)]);
    }
}
