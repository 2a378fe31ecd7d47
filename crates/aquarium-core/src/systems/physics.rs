//! Physics system - falling and settling of pellets, poop and corpses

use hecs::World;

use crate::components::{Position, Sinking};

/// Integrate gravity and drag for everything that sinks
pub fn sinking_system(world: &mut World, floor_y: f32, delta_seconds: f32) {
    for (_, (pos, sinking)) in world.query_mut::<(&mut Position, &mut Sinking)>() {
        sinking.fall(&mut pos.0, floor_y, delta_seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Pellet, Poop, SinkProfile, Vec2};

    #[test]
    fn test_everything_sinks_to_floor() {
        let mut world = World::new();
        let profile = SinkProfile {
            gravity: 55.0,
            drag: 0.18,
            terminal_velocity: 110.0,
            radius: 3.0,
        };
        let poop = world.spawn((Position(Vec2::new(10.0, 100.0)), Sinking::new(profile), Poop::default()));
        let pellet = world.spawn((Position(Vec2::new(20.0, 25.0)), Sinking::new(profile), Pellet::default()));

        for _ in 0..2000 {
            sinking_system(&mut world, 590.0, 0.05);
        }

        for entity in [poop, pellet] {
            let sinking = *world.get::<&Sinking>(entity).unwrap();
            assert!(sinking.settled);
            assert_eq!(world.get::<&Position>(entity).unwrap().0.y, 587.0);
        }
    }
}
