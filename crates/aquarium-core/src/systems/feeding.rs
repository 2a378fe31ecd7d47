//! Feeding system - pellet eating and algae grazing

use hecs::{Entity, World};
use rand::Rng;

use crate::components::{Appetite, Body, Diet, Fish, Life, Pellet, Position, Sinking, Vec2};
use crate::config::TankConfig;
use super::Environment;

/// A pellet as seen by hungry fish this tick
#[derive(Debug, Clone, Copy)]
pub struct PelletSpot {
    pub entity: Entity,
    pub position: Vec2,
    pub radius: f32,
    pub settled: bool,
    pub eaten: bool,
}

/// Snapshot of all uneaten pellets, used for food lookup during a pass
#[derive(Debug, Default)]
pub struct FoodMap {
    pellets: Vec<PelletSpot>,
}

impl FoodMap {
    /// Collect every pellet not yet eaten
    pub fn gather(world: &World) -> Self {
        let pellets = world
            .query::<(&Position, &Sinking, &Pellet)>()
            .iter()
            .filter(|(_, (_, _, pellet))| !pellet.eaten)
            .map(|(entity, (pos, sinking, _))| PelletSpot {
                entity,
                position: pos.0,
                radius: sinking.radius(),
                settled: sinking.settled,
                eaten: false,
            })
            .collect();
        Self { pellets }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.pellets.iter().filter(|p| !p.eaten).count()
    }

    fn nearest_index(&self, from: Vec2, wanted: impl Fn(&PelletSpot) -> bool) -> Option<usize> {
        let mut best = None;
        let mut best_d2 = f32::INFINITY;
        for (i, spot) in self.pellets.iter().enumerate() {
            if spot.eaten || !wanted(spot) {
                continue;
            }
            let d2 = from.distance_squared(&spot.position);
            if d2 < best_d2 {
                best_d2 = d2;
                best = Some(i);
            }
        }
        best
    }

    /// Closest pellet the diet accepts
    pub fn nearest(&self, from: Vec2, diet: Diet) -> Option<&PelletSpot> {
        self.nearest_index(from, |spot| diet.accepts_pellet(spot.settled))
            .map(|i| &self.pellets[i])
    }

    /// Closest pellet a hungry fish swims toward
    pub fn chase_target(&self, from: Vec2, diet: Diet, chases_pellets: bool) -> Option<&PelletSpot> {
        self.nearest_index(from, |spot| diet.chases_pellet(spot.settled, chases_pellets))
            .map(|i| &self.pellets[i])
    }

    fn eaten_entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.pellets.iter().filter(|p| p.eaten).map(|p| p.entity)
    }
}

/// Totals from one feeding pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeedingReport {
    pub pellets_eaten: u32,
    pub algae_grazed: f32,
}

/// Hungry fish eat the pellet in reach, algae eaters graze the water
pub fn feeding_system(
    world: &mut World,
    env: &mut Environment,
    config: &TankConfig,
    rng: &mut impl Rng,
    delta_seconds: f32,
) -> FeedingReport {
    let tuning = &config.feeding;
    let bounds = config.bounds();
    let floor = config.floor_y();
    let mut food = FoodMap::gather(world);
    let mut report = FeedingReport::default();

    for (_, (_, pos, body, appetite, life)) in
        world.query_mut::<(&Fish, &Position, &Body, &mut Appetite, &Life)>()
    {
        if !life.alive || !appetite.is_hungry() {
            continue;
        }
        let pos = pos.0;

        match appetite.diet {
            Diet::Pellets { .. } => {
                let diet = appetite.diet;
                let Some(index) = food.nearest_index(pos, |spot| diet.accepts_pellet(spot.settled)) else {
                    continue;
                };
                let spot = &mut food.pellets[index];
                if pos.distance(&spot.position) < body.size * tuning.reach_factor + spot.radius {
                    spot.eaten = true;
                    appetite.satisfy(tuning.pellet_satiety);
                    appetite.schedule_waste(tuning.digestion.sample(rng));
                    appetite.queue_growth(appetite.growth_per_meal);
                    env.add_dirt(config.environment.meal_dirt);
                    report.pellets_eaten += 1;
                }
            }
            Diet::Algae => {
                if env.algae <= tuning.algae_min_level {
                    continue;
                }
                let near_surface = pos.x < bounds.left() + tuning.wall_margin
                    || pos.x > bounds.right() - tuning.wall_margin
                    || pos.y > floor - tuning.wall_margin;
                let rate = if near_surface {
                    tuning.wall_graze_rate
                } else {
                    tuning.open_graze_rate
                };
                let take = env.algae.min(rate * delta_seconds);
                env.add_algae(-take);
                env.add_dirt(-tuning.graze_dirt_relief * take * delta_seconds);
                appetite.satisfy(tuning.graze_satiety * delta_seconds);
                if take > 0.0 {
                    appetite.schedule_waste(tuning.graze_digestion_secs);
                    appetite.queue_growth(appetite.growth_per_meal * tuning.graze_growth * delta_seconds);
                }
                report.algae_grazed += take;
            }
        }
    }

    for entity in food.eaten_entities() {
        if let Ok(mut pellet) = world.get::<&mut Pellet>(entity) {
            pellet.eaten = true;
        }
    }

    report
}
