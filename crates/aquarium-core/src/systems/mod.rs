//! Systems - logic that operates on components, run in tick order by the engine

mod disturbance;
mod environment;
mod feeding;
mod lifecycle;
mod metabolism;
mod physics;
mod predation;
mod steering;

pub use disturbance::*;
pub use environment::*;
pub use feeding::*;
pub use lifecycle::*;
pub use metabolism::*;
pub use physics::*;
pub use predation::*;
pub use steering::*;
