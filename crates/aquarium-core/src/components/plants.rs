//! Stationary plants.

use serde::{Deserialize, Serialize};

use super::Vec2;

/// A seaweed clump rooted on the floor. Cleans poop and eats settled corpses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Seaweed {
    pub height: f32,
    /// Sway animation phase in radians
    pub phase: f32,
    pub clean_radius: f32,
    /// Multiplier on corpse bites
    pub eat_rate: f32,
}

impl Seaweed {
    /// Center of the cleaning area, half way up the clump
    pub fn reach_center(&self, root: Vec2) -> Vec2 {
        Vec2::new(root.x, root.y - self.height * 0.5)
    }
}
