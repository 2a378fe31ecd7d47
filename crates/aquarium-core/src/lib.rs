//! Aquarium Core - tick-based aquarium ecosystem engine
//!
//! An ECS-based simulation of a small tank: fish that swim, eat, grow, poop,
//! prey on each other and die of old age, food pellets and waste that sink
//! to the floor, corpses that rot, seaweed that cleans, and water quality
//! that slows everything down as it fouls.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Fish, pellets, poop, corpses, seaweed clumps
//! - **Components**: Pure data attached to entities (Position, Appetite, Sinking, etc.)
//! - **Systems**: Logic that queries and updates components, in a fixed tick order
//!
//! Hosts talk to the engine through [`command::Command`] values and read it
//! back through [`snapshot::TankSnapshot`].
//!
//! # Example
//!
//! ```rust,no_run
//! use aquarium_core::prelude::*;
//!
//! let mut engine = AquariumEngine::new(TankConfig::default()).unwrap();
//! engine.submit(Command::FeedAt { x: 300.0 });
//!
//! loop {
//!     engine.advance(1.0 / 60.0); // 60 FPS
//!     println!("{}", engine.status());
//! }
//! ```

pub mod command;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod generation;
pub mod persistence;
pub mod snapshot;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::command::Command;
    pub use crate::components::*;
    pub use crate::config::TankConfig;
    pub use crate::engine::{AquariumEngine, TickReport};
    pub use crate::error::AquariumError;
    pub use crate::snapshot::{FishView, StatusLine, TankSnapshot};
    pub use crate::systems::Environment;
}
