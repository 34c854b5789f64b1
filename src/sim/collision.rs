//! Landing detection between the actor and the platform stream
//!
//! The test runs before this tick's vertical integration. The actor's
//! "previous" bottom is reconstructed as the current bottom minus its
//! vertical velocity, so a platform top crossed during the last jump-arc
//! move still catches the actor. Fast-fall carries no velocity and only
//! lands on an exact top.

use super::state::{Actor, Platform};

/// A platform the actor lands on this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    pub platform: usize,
    /// Platform top the actor's bottom snaps to
    pub surface_y: f32,
}

/// Strict overlap of the actor's span with the platform's span
#[inline]
pub fn horizontal_overlap(actor: &Actor, platform: &Platform) -> bool {
    actor.right() > platform.left() && actor.left() < platform.right()
}

/// Whether the actor lands on `platform`, given this tick's descent step
pub fn lands_on(actor: &Actor, platform: &Platform, descent: f32) -> bool {
    let curr_bottom = actor.bottom();
    let prev_bottom = curr_bottom - descent;

    let was_above = prev_bottom <= platform.top();
    let now_on_or_below = curr_bottom >= platform.top() && prev_bottom <= platform.bottom();
    let falling = actor.velocity_y >= 0.0;

    was_above && now_on_or_below && horizontal_overlap(actor, platform) && falling
}

/// Check every platform in slot order; the last match wins
pub fn find_landing(actor: &Actor, platforms: &[Platform], descent: f32) -> Option<Landing> {
    platforms
        .iter()
        .rev()
        .find(|p| lands_on(actor, p, descent))
        .map(|p| Landing {
            platform: p.index,
            surface_y: p.top(),
        })
}

/// Snap the actor onto the landing surface; returns the new ground y
pub fn apply_landing(actor: &mut Actor, landing: &Landing) -> f32 {
    actor.stand_at(landing.surface_y);
    actor.pos.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn platform(index: usize, x: f32, y: f32) -> Platform {
        Platform::new(index, Vec2::new(x, y), Vec2::new(110.0, 32.0))
    }

    /// Actor centred at `x` with its bottom at `bottom`
    fn actor_at(x: f32, bottom: f32, velocity_y: f32) -> Actor {
        let mut actor = Actor::new(Vec2::new(x, bottom - 50.0), Vec2::splat(100.0));
        actor.velocity_y = velocity_y;
        actor.airborne = velocity_y != 0.0;
        actor
    }

    #[test]
    fn test_lands_when_crossing_top() {
        let p = platform(0, 0.0, 500.0);
        // Moved from 495 to 503 this tick
        let actor = actor_at(55.0, 503.0, 8.0);
        assert!(lands_on(&actor, &p, 8.0));
    }

    #[test]
    fn test_lands_exactly_at_contact() {
        let p = platform(0, 0.0, 500.0);
        let actor = actor_at(55.0, 500.0, 4.0);
        assert!(lands_on(&actor, &p, 4.0));
    }

    #[test]
    fn test_no_landing_while_rising() {
        let p = platform(0, 0.0, 500.0);
        let actor = actor_at(55.0, 500.0, -3.0);
        assert!(!lands_on(&actor, &p, -3.0));
    }

    #[test]
    fn test_no_landing_from_below() {
        let p = platform(0, 0.0, 500.0);
        // Previous bottom already under the top
        let actor = actor_at(55.0, 520.0, 2.0);
        assert!(!lands_on(&actor, &p, 2.0));
    }

    #[test]
    fn test_edge_touch_is_not_overlap() {
        // Actor spans [110, 210]; platform spans [0, 110]
        let p = platform(0, 0.0, 500.0);
        let actor = actor_at(160.0, 503.0, 8.0);
        assert!(!horizontal_overlap(&actor, &p));
        assert!(!lands_on(&actor, &p, 8.0));

        let actor = actor_at(159.5, 503.0, 8.0);
        assert!(horizontal_overlap(&actor, &p));
    }

    #[test]
    fn test_resting_actor_keeps_landing() {
        let p = platform(0, 0.0, 500.0);
        let mut actor = actor_at(55.0, 500.0, 0.0);
        for _ in 0..5 {
            let landing = find_landing(&actor, std::slice::from_ref(&p), 0.0).unwrap();
            apply_landing(&mut actor, &landing);
            assert_eq!(actor.velocity_y, 0.0);
            assert!(!actor.airborne);
            assert_eq!(actor.bottom(), 500.0);
        }
    }

    #[test]
    fn test_fast_fall_passes_through_crossed_top() {
        let p = platform(0, 0.0, 500.0);
        // Fast-fell from 494 to 502.5; no velocity, so no landing
        let actor = actor_at(55.0, 502.5, 0.0);
        assert!(!lands_on(&actor, &p, 0.0));
        assert_eq!(find_landing(&actor, std::slice::from_ref(&p), 0.0), None);

        // An exact hit still lands
        let actor = actor_at(55.0, 500.0, 0.0);
        assert!(lands_on(&actor, &p, 0.0));
    }

    #[test]
    fn test_last_match_wins() {
        let platforms = [platform(0, 0.0, 500.0), platform(1, 20.0, 505.0)];
        let actor = actor_at(60.0, 506.0, 10.0);
        let landing = find_landing(&actor, &platforms, 10.0).unwrap();
        assert_eq!(landing.platform, 1);
        assert_eq!(landing.surface_y, 505.0);
    }

    #[test]
    fn test_apply_landing_snaps_and_clears() {
        let mut actor = actor_at(55.0, 507.0, 7.2);
        let ground_y = apply_landing(
            &mut actor,
            &Landing {
                platform: 0,
                surface_y: 500.0,
            },
        );
        assert_eq!(actor.bottom(), 500.0);
        assert_eq!(ground_y, 450.0);
        assert!(!actor.airborne);
        assert_eq!(actor.velocity_y, 0.0);
    }
}
