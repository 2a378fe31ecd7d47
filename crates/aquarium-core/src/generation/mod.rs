//! Generation - spawning fish, planting seaweed, seeding a fresh tank.

mod fish;
mod garden;

pub use fish::*;
pub use garden::*;
