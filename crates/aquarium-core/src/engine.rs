//! Aquarium engine - main entry point for running the tank

use std::io::{Read, Write};

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::command::{Command, CommandQueue};
use crate::components::*;
use crate::config::TankConfig;
use crate::error::{AquariumError, Result};
use crate::generation::{default_spawn_size, plant_seaweed, spawn_fish_entity};
use crate::snapshot::{FishView, StatusLine, TankSnapshot};
use crate::systems::*;

/// What happened during one call to [`AquariumEngine::advance`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// False when the call was ignored (paused, or a bad `dt`)
    pub stepped: bool,
    /// Timestep actually integrated, after clamping
    pub dt: f32,
    pub poops_dropped: usize,
    pub old_age_deaths: Vec<FishId>,
    pub kills: Vec<Kill>,
    pub feeding: FeedingReport,
    pub seaweed: SeaweedReport,
    pub corpses_created: Vec<FishId>,
    pub cleanup: CleanupReport,
}

/// Main simulation engine
pub struct AquariumEngine {
    /// ECS world containing every fish, pellet, poop, corpse and seaweed clump
    pub world: World,
    config: TankConfig,
    environment: Environment,
    /// Simulated seconds since start
    elapsed: f64,
    paused: bool,
    pointer: Option<Vec2>,
    commands: CommandQueue,
    rng: ChaCha8Rng,
    next_fish_id: u64,
}

impl AquariumEngine {
    /// Create a seeded tank: seaweed along the floor plus the configured population
    pub fn new(config: TankConfig) -> Result<Self> {
        let mut engine = Self::empty(config)?;

        let clumps = plant_seaweed(&mut engine.world, &engine.config, &mut engine.rng);
        let population = engine.config.population.clone();
        for seed in &population {
            engine.spawn_fish(seed.kind, Some(seed.size))?;
        }

        log::info!(
            "Seeded tank with {} seaweed clumps and {} fish (seed {:#x})",
            clumps.len(),
            population.len(),
            engine.config.seed
        );
        Ok(engine)
    }

    /// Create a tank with no seaweed and no fish
    pub fn empty(config: TankConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            world: World::new(),
            environment: Environment::new(config.environment.filter_on),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            elapsed: 0.0,
            paused: false,
            pointer: None,
            commands: CommandQueue::new(),
            next_fish_id: 1,
        })
    }

    /// Queue a command for the start of the next `advance`
    pub fn submit(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Apply queued commands, then step the tank by `delta_seconds`.
    ///
    /// Non-finite or non-positive steps are ignored, long steps are clamped to
    /// `max_dt`, and nothing moves while paused.
    pub fn advance(&mut self, delta_seconds: f32) -> TickReport {
        self.drain_commands();

        let mut report = TickReport::default();
        if !delta_seconds.is_finite() || delta_seconds <= 0.0 || self.paused {
            return report;
        }
        let dt = delta_seconds.min(self.config.steering.max_dt);
        report.stepped = true;
        report.dt = dt;
        self.elapsed += dt as f64;

        let floor = self.config.floor_y();

        // 1. Falling and settling
        sinking_system(&mut self.world, floor, dt);

        // 2. Passive fouling
        drift_system(&mut self.world, &mut self.environment, &self.config.environment, dt);

        // 3. Seaweed
        report.seaweed = seaweed_system(&mut self.world, &mut self.environment, &self.config.seaweed, dt);

        // 4. Filter
        filtration_system(&mut self.environment, &self.config.environment, dt);

        // 5. Fish
        let food = FoodMap::gather(&self.world);
        let ctx = SteeringContext {
            tuning: &self.config.steering,
            bounds: self.config.bounds(),
            cursor: self.pointer,
            speed_factor: self.environment.speed_factor(&self.config.steering),
        };
        let outcome = fish_system(&mut self.world, &self.config, &food, &ctx, dt);
        for at in &outcome.poop_at {
            spawn_poop(&mut self.world, &self.config, *at);
        }
        for entity in outcome.calmed {
            let _ = self.world.remove_one::<Scared>(entity);
        }
        for id in &outcome.died {
            log::debug!("{} died of old age", id);
        }
        report.poops_dropped = outcome.poop_at.len();
        report.old_age_deaths = outcome.died;

        // 6. Predation
        report.kills = predation_system(&mut self.world, &self.config.predation);

        // 7. Feeding
        report.feeding = feeding_system(
            &mut self.world,
            &mut self.environment,
            &self.config,
            &mut self.rng,
            dt,
        );

        // 8. Death conversion
        report.corpses_created = corpse_system(&mut self.world, &self.config);

        // 9. Cleanup
        report.cleanup = cleanup_system(&mut self.world, &self.config);

        report
    }

    fn drain_commands(&mut self) {
        let pending: Vec<Command> = self.commands.drain().collect();
        for command in pending {
            if let Err(e) = self.apply_command(command) {
                log::warn!("Ignoring {:?}: {}", command, e);
            }
        }
    }

    /// Apply one command immediately
    pub fn apply_command(&mut self, command: Command) -> Result<()> {
        match command {
            Command::PointerMoved { at } => self.set_pointer(at),
            Command::Click { at, secondary } => self.click(at, secondary)?,
            Command::FeedAt { x } => self.feed_at(x)?,
            Command::DisturbAt { at } => {
                self.disturb_at(at)?;
            }
            Command::ToggleFilter => {
                self.toggle_filter();
            }
            Command::ReduceAlgae => self.reduce_algae(),
            Command::TogglePause => {
                self.toggle_pause();
            }
            Command::Spawn { kind, size } => {
                self.spawn_fish(kind, size)?;
            }
        }
        Ok(())
    }

    /// Track the pointer for cursor attraction; `None` when it leaves the view
    pub fn set_pointer(&mut self, at: Option<Vec2>) {
        self.pointer = at.filter(|p| p.is_finite());
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Drop a pellet just below the top of the tank at `x`
    pub fn feed_at(&mut self, x: f32) -> Result<()> {
        let bounds = self.config.bounds();
        let top = bounds.top();
        if !x.is_finite() || x < bounds.left() || x > bounds.right() {
            log::warn!("Feed at x={} is outside the tank", x);
            return Err(AquariumError::OutOfTank { x, y: top });
        }
        spawn_pellet(
            &mut self.world,
            &self.config,
            Vec2::new(x, top + self.config.tank.feed_drop_depth),
        );
        Ok(())
    }

    /// Tap the glass at `at`: every living fish flees and the water clouds a little.
    /// Returns how many fish were startled.
    pub fn disturb_at(&mut self, at: Vec2) -> Result<usize> {
        if !at.is_finite() || !self.config.bounds().contains(&at) {
            log::warn!("Disturbance at ({}, {}) is outside the tank", at.x, at.y);
            return Err(AquariumError::OutOfTank { x: at.x, y: at.y });
        }
        let startled = scare_fish(&mut self.world, at, &self.config.disturbance, &mut self.rng);
        self.environment.add_dirt(self.config.environment.shake_dirt);
        log::debug!("Disturbance at ({:.0}, {:.0}) startled {} fish", at.x, at.y, startled);
        Ok(startled)
    }

    /// Route a raw click: the air band feeds, the water disturbs, a secondary
    /// click always disturbs
    pub fn click(&mut self, at: Vec2, secondary: bool) -> Result<()> {
        if !at.is_finite() || !self.config.bounds().contains(&at) {
            log::warn!("Click at ({}, {}) is outside the tank", at.x, at.y);
            return Err(AquariumError::OutOfTank { x: at.x, y: at.y });
        }
        if !secondary && at.y <= self.config.water_top() {
            self.feed_at(at.x)
        } else {
            self.disturb_at(at).map(|_| ())
        }
    }

    /// Returns the new filter state
    pub fn toggle_filter(&mut self) -> bool {
        self.environment.filter_on = !self.environment.filter_on;
        log::debug!(
            "Filter {}",
            if self.environment.filter_on { "on" } else { "off" }
        );
        self.environment.filter_on
    }

    pub fn reduce_algae(&mut self) {
        self.environment.add_algae(-self.config.environment.algae_reduction);
    }

    /// Returns the new paused state
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Add a fish of `kind`. `None` picks a size from the kind's default range.
    pub fn spawn_fish(&mut self, kind: FishKind, size: Option<f32>) -> Result<FishId> {
        let size = match size {
            Some(size) if size.is_finite() && size > 0.0 => size,
            Some(size) => {
                log::warn!("Rejected {} spawn with size {}", kind.label(), size);
                return Err(AquariumError::InvalidSpawn { size });
            }
            None => default_spawn_size(&self.config, kind, &mut self.rng),
        };

        let id = FishId(self.next_fish_id);
        self.next_fish_id += 1;
        spawn_fish_entity(&mut self.world, &self.config, id, kind, size, &mut self.rng);
        Ok(id)
    }

    pub fn config(&self) -> &TankConfig {
        &self.config
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Simulated seconds since start
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn fish_count(&self) -> usize {
        self.world.query::<&Fish>().iter().count()
    }

    pub fn pellet_count(&self) -> usize {
        self.world.query::<&Pellet>().iter().count()
    }

    pub fn poop_count(&self) -> usize {
        self.world.query::<&Poop>().iter().count()
    }

    pub fn corpse_count(&self) -> usize {
        self.world.query::<&Corpse>().iter().count()
    }

    pub fn seaweed_count(&self) -> usize {
        self.world.query::<&Seaweed>().iter().count()
    }

    /// Entity currently holding the fish with `id`
    pub fn find_fish(&self, id: FishId) -> Option<Entity> {
        self.world
            .query::<&Fish>()
            .iter()
            .find(|(_, fish)| fish.id == id)
            .map(|(entity, _)| entity)
    }

    pub fn fish(&self, id: FishId) -> Option<FishView> {
        FishView::capture(&self.world, self.find_fish(id)?)
    }

    pub fn snapshot(&self) -> TankSnapshot {
        TankSnapshot::capture(
            &self.world,
            self.config.bounds(),
            self.config.water_top(),
            self.config.floor_y(),
            self.elapsed,
            self.paused,
            self.environment,
        )
    }

    pub fn status(&self) -> StatusLine {
        StatusLine {
            fish: self.fish_count(),
            pellets: self.pellet_count(),
            poops: self.poop_count(),
            corpses: self.corpse_count(),
            dirt: self.environment.dirt,
            algae: self.environment.algae,
            filter_on: self.environment.filter_on,
            elapsed: self.elapsed,
            paused: self.paused,
        }
    }

    /// Save the complete tank, including pending RNG state, to a writer
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        crate::persistence::save_tank(
            writer,
            crate::persistence::TankState {
                world: &self.world,
                config: &self.config,
                environment: self.environment,
                elapsed: self.elapsed,
                paused: self.paused,
                pointer: self.pointer,
                next_fish_id: self.next_fish_id,
                rng: &self.rng,
            },
        )?;
        log::info!("Saved tank at t={:.1}s", self.elapsed);
        Ok(())
    }

    /// Restore a tank written by [`AquariumEngine::save`]
    pub fn load<R: Read>(reader: R) -> Result<Self> {
        let loaded = crate::persistence::load_tank(reader)?;
        log::info!("Loaded tank at t={:.1}s", loaded.elapsed);
        Ok(Self {
            world: loaded.world,
            config: loaded.config,
            environment: loaded.environment,
            elapsed: loaded.elapsed,
            paused: loaded.paused,
            pointer: loaded.pointer,
            commands: CommandQueue::new(),
            rng: loaded.rng,
            next_fish_id: loaded.next_fish_id,
        })
    }
}
