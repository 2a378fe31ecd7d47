//! Fish components: identity, body, appetite, lifecycle and steering state.

use serde::{Deserialize, Serialize};

/// Stable fish identifier, unique for the lifetime of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FishId(pub u64);

impl std::fmt::Display for FishId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fish#{}", self.0)
    }
}

/// Behavioral kind of a fish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FishKind {
    /// Swims the middle of the water column, eats pellets anywhere
    Midwater,
    /// Hugs the floor, only eats pellets that have settled
    BottomFeeder,
    /// Grazes ambient algae, fastest near walls and floor
    AlgaeEater,
}

impl FishKind {
    pub const ALL: [FishKind; 3] = [
        FishKind::Midwater,
        FishKind::BottomFeeder,
        FishKind::AlgaeEater,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FishKind::Midwater => "midwater",
            FishKind::BottomFeeder => "bottom-feeder",
            FishKind::AlgaeEater => "algae-eater",
        }
    }
}

/// What a fish forages for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diet {
    Pellets { settled_only: bool },
    Algae,
}

impl Diet {
    /// Whether a pellet with the given settled state is acceptable food
    pub fn accepts_pellet(&self, settled: bool) -> bool {
        match self {
            Diet::Pellets { settled_only } => settled || !settled_only,
            Diet::Algae => false,
        }
    }

    /// Whether a hungry fish swims toward a pellet with the given settled state
    pub fn chases_pellet(&self, settled: bool, chases_pellets: bool) -> bool {
        match self {
            Diet::Pellets { .. } => self.accepts_pellet(settled),
            Diet::Algae => chases_pellets,
        }
    }
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Body marking drawn over the base color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Plain,
    Stripes,
    Spots,
}

/// Cosmetic species, chosen at spawn and never changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub base: Rgb,
    pub fin: Rgb,
    pub pattern_color: Rgb,
    pub pattern: Pattern,
    pub long_tail: bool,
    pub wide_tail: bool,
}

/// Identity component for fish entities
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Fish {
    pub id: FishId,
    pub kind: FishKind,
    pub species: Species,
}

/// Physical size and speed cap
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub size: f32,
    pub max_size: f32,
    /// Maximum swim speed in clean water
    pub speed: f32,
}

impl Body {
    /// Grow by up to `amount`, never past `max_size`. Returns the growth applied.
    pub fn grow(&mut self, amount: f32) -> f32 {
        let before = self.size;
        self.size = (self.size + amount.max(0.0)).min(self.max_size);
        self.size - before
    }
}

/// Hunger, digestion and queued growth
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Appetite {
    /// 0.0 (sated) to 1.0 (starving)
    pub hunger: f32,
    /// Hunger gained per second
    pub hunger_rate: f32,
    /// Minimum hunger before food is pursued or eaten
    pub eat_threshold: f32,
    /// Seconds until the next poop, inactive when <= 0
    pub waste_timer: f32,
    pub growth_per_meal: f32,
    /// Growth queued by meals, applied gradually
    pub pending_growth: f32,
    pub diet: Diet,
}

impl Appetite {
    pub fn is_hungry(&self) -> bool {
        self.hunger >= self.eat_threshold
    }

    pub fn get_hungry(&mut self, delta_seconds: f32) {
        self.hunger = (self.hunger + self.hunger_rate * delta_seconds).clamp(0.0, 1.0);
    }

    /// Reduce hunger by `satiety`
    pub fn satisfy(&mut self, satiety: f32) {
        self.hunger = (self.hunger - satiety).clamp(0.0, 1.0);
    }

    /// Keep the later of the pending and the new digestion deadline
    pub fn schedule_waste(&mut self, seconds: f32) {
        self.waste_timer = self.waste_timer.max(seconds);
    }

    /// Count down digestion; true on the tick the timer expires
    pub fn digest(&mut self, delta_seconds: f32) -> bool {
        if self.waste_timer > 0.0 {
            self.waste_timer -= delta_seconds;
            return self.waste_timer <= 0.0;
        }
        false
    }

    pub fn queue_growth(&mut self, amount: f32) {
        self.pending_growth += amount.max(0.0);
    }

    /// Take at most `cap` from the growth queue
    pub fn take_growth(&mut self, cap: f32) -> f32 {
        let taken = self.pending_growth.min(cap.max(0.0));
        self.pending_growth -= taken;
        taken
    }
}

/// Age and death state
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Life {
    pub age: f32,
    pub lifespan: f32,
    pub alive: bool,
    /// Set once a corpse has been spawned for this fish
    pub converted: bool,
}

impl Life {
    pub fn new(lifespan: f32) -> Self {
        Self {
            age: 0.0,
            lifespan,
            alive: true,
            converted: false,
        }
    }

    /// Advance age; returns true if the fish died of old age on this call
    pub fn grow_older(&mut self, delta_seconds: f32) -> bool {
        self.age += delta_seconds;
        if self.alive && self.age >= self.lifespan {
            self.alive = false;
            return true;
        }
        false
    }

    pub fn age_fraction(&self) -> f32 {
        if self.lifespan > 0.0 {
            (self.age / self.lifespan).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

/// Steering parameters fixed at spawn, plus the glide phase
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Glide {
    /// Accumulated undulation phase time
    pub phase: f32,
    /// Undulation frequency in radians per second
    pub omega: f32,
    /// Horizontal undulation amplitude
    pub amplitude: f32,
    /// Constant horizontal drift bias
    pub wander: f32,
    pub preferred_depth: f32,
    /// Slack around the preferred depth with no corrective pull
    pub depth_band: f32,
    pub depth_kp: f32,
    pub depth_kd: f32,
    /// Fraction of top speed used when chasing food
    pub seek_gain: f32,
    /// Chase pellets the diet cannot eat
    pub chases_pellets: bool,
}

/// Startle state - present only while the fish is fleeing a disturbance
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Scared {
    pub remaining: f32,
}
