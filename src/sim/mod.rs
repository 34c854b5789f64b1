//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per host tick, velocities in pixels/tick
//! - Seeded RNG only
//! - Stable iteration order (by platform slot)
//! - No rendering or platform dependencies

pub mod collision;
pub mod physics;
pub mod platforms;
pub mod rng;
pub mod state;
pub mod stopwatch;
pub mod tick;

pub use collision::{Landing, apply_landing, find_landing, horizontal_overlap, lands_on};
pub use physics::JumpPhysics;
pub use platforms::{PlatformStream, Recycled, StreamLayout, next_gap, next_y, platform_count};
pub use rng::RandomSource;
pub use state::{Actor, Platform, RunPhase, RunState, ScheduledRestart, SimEvent};
pub use stopwatch::Stopwatch;
pub use tick::{Session, Snapshot, TickReport};
