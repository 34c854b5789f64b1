//! Platform stream generation and recycling
//!
//! A fixed set of platform slots covers the viewport plus a margin. Slots
//! scroll left each tick; once a slot is fully past the left edge it is
//! moved behind the current rightmost platform. Slots are never added or
//! removed after construction.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::JumpPhysics;
use super::rng::RandomSource;
use super::state::Platform;
use crate::config::SimConfig;
use crate::consts::{NOMINAL_GAP_ACTOR_FACTOR, NOMINAL_GAP_JUMP_FACTOR, PLATFORM_MARGIN};
use crate::error::ConfigError;

/// Placement rules derived from the config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamLayout {
    pub platform_size: Vec2,
    pub min_y: f32,
    pub max_y: f32,
    /// Largest vertical offset drawn between neighbours
    pub y_step: i32,
    /// Gap band in pixels, `[min, max)`
    pub gap_min: f32,
    pub gap_max: f32,
    pub start_y: f32,
    pub viewport_width: f32,
}

impl StreamLayout {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            platform_size: Vec2::new(config.platform_width(), config.platform_height),
            min_y: config.min_y,
            max_y: config.max_y(),
            y_step: config.y_step(),
            gap_min: config.actor_width * config.gap_min_factor,
            gap_max: config.actor_width * config.gap_max_factor,
            start_y: config.start_y,
            viewport_width: config.viewport_width,
        }
    }
}

/// Number of slots needed to span the viewport plus the margin
pub fn platform_count(config: &SimConfig, physics: &JumpPhysics) -> usize {
    let nominal_gap = (config.actor_width * NOMINAL_GAP_ACTOR_FACTOR)
        .min(physics.max_jump_distance(config.nominal_speed) * NOMINAL_GAP_JUMP_FACTOR);
    let span = config.platform_width() + nominal_gap;
    (config.viewport_width / span).ceil() as usize + PLATFORM_MARGIN
}

/// A slot moved to the right end of the stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recycled {
    pub index: usize,
    /// Slot it was placed behind (`None` for a single-slot stream)
    pub anchor: Option<usize>,
    pub x: f32,
    pub y: f32,
    pub gap: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformStream {
    platforms: Vec<Platform>,
    /// Gap following each slot, indexed like `platforms`
    gaps: Vec<f32>,
    layout: StreamLayout,
}

impl PlatformStream {
    /// Lay out the initial stream from x = 0 rightwards
    pub fn generate<R: RandomSource + ?Sized>(
        config: &SimConfig,
        physics: &JumpPhysics,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        let layout = StreamLayout::from_config(config);
        let count = platform_count(config, physics);

        let mut platforms = Vec::with_capacity(count);
        let mut gaps = Vec::with_capacity(count);
        let mut x = 0.0;
        let mut last_y = layout.start_y;
        for index in 0..count {
            let y = next_y(&layout, physics, last_y, rng);
            let gap = next_gap(&layout, rng);
            platforms.push(Platform::new(index, Vec2::new(x, y), layout.platform_size));
            gaps.push(gap);
            x += layout.platform_size.x + gap;
            last_y = y;
        }

        log::debug!(
            "Generated {} platforms spanning {:.1}px (viewport {:.1}px)",
            count,
            x,
            layout.viewport_width
        );
        Self::from_parts(layout, platforms, gaps)
    }

    /// Rebuild a stream from existing slots; slot indices are reassigned in order
    pub fn from_parts(
        layout: StreamLayout,
        mut platforms: Vec<Platform>,
        gaps: Vec<f32>,
    ) -> Result<Self, ConfigError> {
        if platforms.is_empty() {
            return Err(ConfigError::EmptyPlatformSet);
        }
        if gaps.len() != platforms.len() {
            return Err(ConfigError::GapRegistryMismatch {
                platforms: platforms.len(),
                gaps: gaps.len(),
            });
        }
        for (index, platform) in platforms.iter_mut().enumerate() {
            platform.index = index;
        }
        Ok(Self {
            platforms,
            gaps,
            layout,
        })
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn gaps(&self) -> &[f32] {
        &self.gaps
    }

    pub fn layout(&self) -> &StreamLayout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Platform> {
        self.platforms.get(index)
    }

    /// Slot 0, where the actor restarts
    pub fn first(&self) -> &Platform {
        // Non-empty by construction
        &self.platforms[0]
    }

    /// Platform with the largest x among all slots except `excluded`
    ///
    /// Ties go to the lowest index.
    pub fn rightmost_excluding(&self, excluded: usize) -> Option<&Platform> {
        self.platforms
            .iter()
            .filter(|p| p.index != excluded)
            .fold(None, |best: Option<&Platform>, p| match best {
                Some(b) if p.pos.x <= b.pos.x => Some(b),
                _ => Some(p),
            })
    }

    /// Move every slot left by `speed`
    pub fn scroll(&mut self, speed: f32) {
        for platform in &mut self.platforms {
            platform.pos.x -= speed;
        }
    }

    /// Recycle every expired slot, in index order
    ///
    /// Each slot is anchored on the rightmost of the *other* slots as they
    /// stand at that moment, so a slot recycled earlier in the same pass
    /// can anchor a later one.
    pub fn recycle_expired<R: RandomSource + ?Sized>(
        &mut self,
        physics: &JumpPhysics,
        rng: &mut R,
    ) -> Vec<Recycled> {
        let mut recycled = Vec::new();
        for index in 0..self.platforms.len() {
            if !self.platforms[index].is_expired() {
                continue;
            }

            let anchor = self
                .rightmost_excluding(index)
                .map(|p| (p.index, p.pos.y, p.right()));
            let (anchor_index, reference_y, anchor_right) = match anchor {
                Some((i, y, right)) => (Some(i), y, right),
                None => (None, self.platforms[index].pos.y, self.layout.viewport_width),
            };

            let y = next_y(&self.layout, physics, reference_y, rng);
            let gap = next_gap(&self.layout, rng);
            let x = anchor_right + gap;

            self.gaps[index] = gap;
            self.platforms[index].pos = Vec2::new(x, y);

            log::debug!(
                "Recycled platform {} behind {:?} at ({:.1}, {:.1}), gap {:.1}",
                index,
                anchor_index,
                x,
                y,
                gap
            );
            recycled.push(Recycled {
                index,
                anchor: anchor_index,
                x,
                y,
                gap,
            });
        }
        recycled
    }
}

/// Next platform top relative to `reference_y`
///
/// Rises larger than one jump are cut to the jump height, then the result
/// is kept inside the on-screen band.
pub fn next_y<R: RandomSource + ?Sized>(
    layout: &StreamLayout,
    physics: &JumpPhysics,
    reference_y: f32,
    rng: &mut R,
) -> f32 {
    let mut offset = rng.uniform_int(-layout.y_step, layout.y_step) as f32;
    let max_rise = physics.max_jump_height();
    if offset < 0.0 && -offset > max_rise {
        offset = -max_rise;
    }
    (reference_y + offset).clamp(layout.min_y, layout.max_y)
}

/// Random horizontal gap; deliberately independent of the jump distance
pub fn next_gap<R: RandomSource + ?Sized>(layout: &StreamLayout, rng: &mut R) -> f32 {
    rng.uniform_float(layout.gap_min, layout.gap_max)
}
