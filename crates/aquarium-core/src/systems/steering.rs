//! Steering - blends idle glide, depth keeping, cursor and food attraction
//! into one velocity per fish per tick.
//!
//! The output is a pure function of the inputs (plus the glide phase it
//! advances), so identical inputs replay to identical motion.

use crate::components::{Glide, Rect, Vec2};
use crate::config::SteeringConfig;

/// Tank-wide inputs shared by every fish in a tick
#[derive(Debug, Clone, Copy)]
pub struct SteeringContext<'a> {
    pub tuning: &'a SteeringConfig,
    pub bounds: Rect,
    /// Pointer position, if the host is tracking one
    pub cursor: Option<Vec2>,
    /// Water-quality multiplier on top speed, 0.5..=1.0
    pub speed_factor: f32,
}

/// Compute the next velocity for one fish.
///
/// `food` is the position of the food the fish is chasing; callers pass
/// `None` when the fish is not hungry or nothing qualifies.
pub fn steer(
    glide: &mut Glide,
    position: Vec2,
    velocity: Vec2,
    top_speed: f32,
    food: Option<Vec2>,
    ctx: &SteeringContext,
    delta_seconds: f32,
) -> Vec2 {
    let tuning = ctx.tuning;
    glide.phase += delta_seconds;

    // Idle: slow horizontal undulation plus a constant drift
    let mut desired = Vec2::new(
        (glide.phase * glide.omega).sin() * glide.amplitude + glide.wander,
        0.0,
    );

    // Depth keeping: PD pull outside the band, soft buoyancy inside it
    let error = glide.preferred_depth - position.y;
    if error.abs() > glide.depth_band {
        let excess = error.abs() - glide.depth_band;
        let pull = (glide.depth_kp * excess - glide.depth_kd * velocity.y)
            .min(top_speed * tuning.depth_speed_fraction);
        desired.y += error.signum() * pull;
    } else {
        desired.y -= tuning.buoyancy_damping * velocity.y;
    }

    if let Some(cursor) = ctx.cursor.filter(|c| ctx.bounds.contains(c)) {
        let distance = position.distance(&cursor);
        if distance < tuning.cursor_attract_radius {
            let closeness = 1.0 - (distance / tuning.cursor_attract_radius).min(1.0);
            let follow_speed =
                top_speed * (tuning.cursor_speed_min + tuning.cursor_speed_boost * closeness);
            desired = position.direction_to(&cursor) * follow_speed;
        }
    }

    if let Some(target) = food {
        let chase = position.direction_to(&target) * (top_speed * glide.seek_gain);
        desired = desired.lerp(chase, tuning.food_blend);
    }

    let blend = (tuning.steer_rate * delta_seconds).min(1.0);
    let next = velocity + (desired - velocity) * blend;

    next.clamp_length(top_speed * ctx.speed_factor)
}

/// Keep a fish inside the water, reflecting velocity off each wall.
/// The air band above `water_top` is out of bounds. A fish too large for the
/// clearance margin is held at the middle of that axis.
pub fn contain_in_water(
    position: &mut Vec2,
    velocity: &mut Vec2,
    size: f32,
    bounds: Rect,
    water_top: f32,
    floor_y: f32,
    clearance: f32,
) {
    let margin = (size * clearance).max(0.0);
    let margin_x = margin.min(bounds.width * 0.5);
    let margin_y = margin.min((floor_y - water_top).max(0.0) * 0.5);
    let left = bounds.left() + margin_x;
    let right = bounds.right() - margin_x;
    let top = water_top + margin_y;
    let bottom = floor_y - margin_y;

    if position.x < left {
        position.x = left;
        velocity.x = velocity.x.abs();
    }
    if position.x > right {
        position.x = right;
        velocity.x = -velocity.x.abs();
    }
    if position.y < top {
        position.y = top;
        velocity.y = velocity.y.abs() * 0.5;
    }
    if position.y > bottom {
        position.y = bottom;
        velocity.y = -velocity.y.abs() * 0.5;
    }
}
