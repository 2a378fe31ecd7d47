//! Component definitions for the ECS simulation.
//!
//! Components are pure data structs attached to entities.
//! They have no behavior - that lives in systems.

mod common;
mod debris;
mod fish;
mod plants;

pub use common::*;
pub use debris::*;
pub use fish::*;
pub use plants::*;
