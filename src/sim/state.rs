//! Simulation state types
//!
//! Everything a host draws or a test inspects lives here: the actor, the
//! platforms, and the run state that the reset controller mutates.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::stopwatch::Stopwatch;

/// The jumping character
///
/// `pos` is the centre of the sprite; the horizontal position never changes
/// while running, the platforms scroll underneath.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
    pub size: Vec2,
    /// Under jump kinematics
    pub airborne: bool,
    /// Vertical velocity (pixels/tick, negative is up)
    pub velocity_y: f32,
}

impl Actor {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            airborne: false,
            velocity_y: 0.0,
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.size.x / 2.0
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// Stand on a platform: bottom edge on its top, centred horizontally
    pub fn place_on(&mut self, platform: &Platform) {
        self.pos.x = platform.pos.x + platform.size.x / 2.0;
        self.stand_at(platform.top());
    }

    /// Put the bottom edge at `surface_y` and drop all vertical motion
    pub fn stand_at(&mut self, surface_y: f32) {
        self.pos.y = surface_y - self.size.y / 2.0;
        self.airborne = false;
        self.velocity_y = 0.0;
    }
}

/// A platform slot in the recycling buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Slot in the buffer; stable for the whole run
    pub index: usize,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Platform {
    pub fn new(index: usize, pos: Vec2, size: Vec2) -> Self {
        Self { index, pos, size }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Fully scrolled past the left edge
    pub fn is_expired(&self) -> bool {
        self.right() < 0.0
    }
}

/// Jump state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Standing on, or dropping toward, a platform without jump kinematics
    #[default]
    Grounded,
    /// Following a jump arc
    Airborne,
}

/// One-shot stopwatch restart, due once the clock reaches `fire_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledRestart {
    pub fire_at: Duration,
}

/// Things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    Jumped,
    Landed { platform: usize, ground_y: f32 },
    Recycled { platform: usize, x: f32, y: f32, gap: f32 },
    /// Actor fell off-screen and was put back on slot 0; carries the
    /// stopwatch value if it was running
    Reset { elapsed_secs: Option<f64> },
    TimerRestarted,
}

/// Mutable run bookkeeping owned by the session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunState {
    pub phase: RunPhase,
    /// Actor centre y when it last stood on a platform
    pub ground_y: f32,
    /// Slot the actor stood on during the previous tick
    pub on_platform: Option<usize>,
    pub stopwatch: Stopwatch,
    /// Set between ticks by input, consumed at the next tick
    pub pending_jump: bool,
    pub pending_restart: Option<ScheduledRestart>,
    /// Clock value seen by the previous tick
    pub last_now: Option<Duration>,
    pub ticks: u64,
    pub resets: u32,
}
