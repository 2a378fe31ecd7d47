//! Things that fall through the water: food pellets, waste and corpses.

use serde::{Deserialize, Serialize};

use super::{FishId, Vec2};

/// Falling characteristics of a particle type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SinkProfile {
    /// Downward acceleration in units/s^2
    pub gravity: f32,
    /// Fraction of velocity lost per second to water drag
    pub drag: f32,
    pub terminal_velocity: f32,
    pub radius: f32,
}

/// Vertical falling state; settling on the floor is permanent
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Sinking {
    pub vy: f32,
    pub settled: bool,
    pub profile: SinkProfile,
}

impl Sinking {
    pub fn new(profile: SinkProfile) -> Self {
        Self {
            vy: 0.0,
            settled: false,
            profile,
        }
    }

    pub fn radius(&self) -> f32 {
        self.profile.radius
    }

    /// Integrate one step of gravity and drag, settling at `floor_y`
    pub fn fall(&mut self, position: &mut Vec2, floor_y: f32, delta_seconds: f32) {
        if self.settled {
            return;
        }
        let p = self.profile;
        self.vy += p.gravity * delta_seconds;
        self.vy *= (1.0 - p.drag * delta_seconds).max(0.0);
        self.vy = self.vy.min(p.terminal_velocity);
        position.y += self.vy * delta_seconds;

        let rest = floor_y - p.radius;
        if position.y >= rest {
            position.y = rest;
            self.vy = 0.0;
            self.settled = true;
        }
    }
}

/// Food pellet dropped from above the waterline
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Pellet {
    pub age: f32,
    pub eaten: bool,
}

/// Fish waste
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Poop {
    pub age: f32,
    /// Cleaned up by seaweed, purged at the end of the tick
    pub removed: bool,
}

/// Remains of a dead fish
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Corpse {
    /// The fish this corpse came from
    pub source: FishId,
    pub age: f32,
    /// 0.0 (fresh) to 1.0 (gone)
    pub decay: f32,
    /// Baseline decay per second once settled
    pub decay_rate: f32,
    /// Fully eaten by plants
    pub consumed: bool,
}

impl Corpse {
    pub fn new(source: FishId, decay_rate: f32) -> Self {
        Self {
            source,
            age: 0.0,
            decay: 0.0,
            decay_rate,
            consumed: false,
        }
    }

    /// Add decay progress, clamped to 1.0
    pub fn rot(&mut self, amount: f32) {
        self.decay = (self.decay + amount).clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PELLET: SinkProfile = SinkProfile {
        gravity: 18.0,
        drag: 0.22,
        terminal_velocity: 80.0,
        radius: 4.0,
    };

    #[test]
    fn test_fall_settles_on_floor() {
        let mut sinking = Sinking::new(PELLET);
        let mut pos = Vec2::new(100.0, 25.0);
        for _ in 0..10_000 {
            sinking.fall(&mut pos, 590.0, 0.05);
            if sinking.settled {
                break;
            }
        }
        assert!(sinking.settled);
        assert_eq!(pos.y, 586.0);
        assert_eq!(sinking.vy, 0.0);

        // Settling is permanent
        sinking.fall(&mut pos, 590.0, 0.05);
        assert_eq!(pos.y, 586.0);
    }

    #[test]
    fn test_terminal_velocity() {
        let mut sinking = Sinking::new(SinkProfile {
            gravity: 1000.0,
            ..PELLET
        });
        let mut pos = Vec2::new(0.0, 0.0);
        sinking.fall(&mut pos, 1.0e6, 1.0);
        assert!(sinking.vy <= 80.0);
    }

    #[test]
    fn test_corpse_decay_clamped() {
        let mut corpse = Corpse::new(FishId(1), 0.02);
        corpse.rot(0.7);
        corpse.rot(0.7);
        assert_eq!(corpse.decay, 1.0);
    }
}
