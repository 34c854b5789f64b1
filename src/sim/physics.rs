//! Jump kinematics
//!
//! Per-tick integration (velocities are pixels/tick, gravity pixels/tick²)
//! and the reachability bounds the platform generator relies on.

use serde::{Deserialize, Serialize};

use super::state::Actor;
use crate::config::SimConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpPhysics {
    /// Launch velocity (negative is up)
    pub jump_velocity: f32,
    /// Gravity applied along a jump arc
    pub gravity: f32,
    /// Constant drop per tick when unsupported and not jumping
    pub fast_fall: f32,
}

impl JumpPhysics {
    pub fn new(jump_velocity: f32, gravity: f32, fast_fall: f32) -> Self {
        Self {
            jump_velocity,
            gravity,
            fast_fall,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.jump_velocity, config.gravity, config.fast_fall)
    }

    /// Launch a jump unless one is already in progress
    ///
    /// Returns whether the jump started.
    pub fn trigger_jump(&self, actor: &mut Actor) -> bool {
        if actor.airborne {
            return false;
        }
        actor.airborne = true;
        actor.velocity_y = self.jump_velocity;
        true
    }

    /// Advance vertical motion by one tick
    pub fn integrate(&self, actor: &mut Actor, landed_this_tick: bool) {
        if actor.airborne {
            actor.pos.y += actor.velocity_y;
            actor.velocity_y += self.gravity;
        } else if !landed_this_tick {
            actor.pos.y += self.fast_fall;
        }
    }

    /// Vertical move the landing test treats as this tick's motion
    ///
    /// Only jump velocity counts; a fast-falling actor has zero velocity, so
    /// it lands only when its bottom sits exactly on a platform top.
    pub fn descent_step(&self, actor: &Actor) -> f32 {
        actor.velocity_y
    }

    /// Ticks from launch to the top of the arc
    pub fn time_to_apex(&self) -> f32 {
        self.jump_velocity.abs() / self.gravity
    }

    /// Horizontal travel over one full arc at `horizontal_speed`
    pub fn max_jump_distance(&self, horizontal_speed: f32) -> f32 {
        horizontal_speed * 2.0 * self.time_to_apex()
    }

    /// Highest rise achievable in one jump
    pub fn max_jump_height(&self) -> f32 {
        self.jump_velocity * self.jump_velocity / (2.0 * self.gravity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn reference() -> JumpPhysics {
        JumpPhysics::new(-18.0, 1.2, 8.5)
    }

    fn standing_actor(y: f32) -> Actor {
        Actor::new(Vec2::new(100.0, y), Vec2::splat(100.0))
    }

    #[test]
    fn test_reachability_bounds() {
        let physics = reference();
        assert!((physics.max_jump_height() - 135.0).abs() < 1e-3);
        assert!((physics.time_to_apex() - 15.0).abs() < 1e-4);
        assert!((physics.max_jump_distance(4.0) - 120.0).abs() < 1e-3);
        assert!((physics.max_jump_distance(2.0) - 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_trigger_jump_sets_launch_velocity() {
        let physics = reference();
        let mut actor = standing_actor(500.0);
        assert!(physics.trigger_jump(&mut actor));
        assert!(actor.airborne);
        assert_eq!(actor.velocity_y, -18.0);
    }

    #[test]
    fn test_trigger_jump_ignored_when_airborne() {
        let physics = reference();
        let mut actor = standing_actor(500.0);
        physics.trigger_jump(&mut actor);
        physics.integrate(&mut actor, false);
        let velocity = actor.velocity_y;

        assert!(!physics.trigger_jump(&mut actor));
        assert_eq!(actor.velocity_y, velocity);
    }

    #[test]
    fn test_arc_velocity_after_k_ticks() {
        let physics = reference();
        let mut actor = standing_actor(500.0);
        physics.trigger_jump(&mut actor);
        for k in 1..=20 {
            physics.integrate(&mut actor, false);
            let expected = -18.0 + 1.2 * k as f32;
            assert!((actor.velocity_y - expected).abs() < 1e-3, "tick {k}");
        }
    }

    #[test]
    fn test_fast_fall_when_unsupported() {
        let physics = reference();
        let mut actor = standing_actor(500.0);
        physics.integrate(&mut actor, false);
        assert_eq!(actor.pos.y, 508.5);
        assert_eq!(actor.velocity_y, 0.0);

        // Landed actors stay put
        physics.integrate(&mut actor, true);
        assert_eq!(actor.pos.y, 508.5);
    }

    #[test]
    fn test_descent_step() {
        let physics = reference();
        let mut actor = standing_actor(500.0);
        assert_eq!(physics.descent_step(&actor), 0.0);
        physics.trigger_jump(&mut actor);
        assert_eq!(physics.descent_step(&actor), -18.0);
    }
}
