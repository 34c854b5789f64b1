//! Per-tick session driver
//!
//! The host owns the loop: it forwards jump presses with
//! [`Session::on_jump_pressed`] and calls [`Session::advance`] once per
//! frame with a monotonic timestamp. Each tick runs, in order:
//!
//! 1. due stopwatch restart
//! 2. pending jump
//! 3. scroll, then recycle expired platforms
//! 4. landing test against every platform
//! 5. vertical integration
//! 6. stopwatch accumulation
//! 7. off-screen check and reset

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{apply_landing, find_landing};
use super::physics::JumpPhysics;
use super::platforms::PlatformStream;
use super::rng::RandomSource;
use super::state::{Actor, Platform, RunPhase, RunState, ScheduledRestart, SimEvent};
use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::records::RunRecords;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub events: Vec<SimEvent>,
    pub landed: bool,
}

impl TickReport {
    pub fn was_reset(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, SimEvent::Reset { .. }))
    }

    pub fn recycled_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SimEvent::Recycled { .. }))
            .count()
    }
}

/// Serializable view of a session for hosts and debugging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: RunPhase,
    pub actor: Actor,
    pub platforms: Vec<Platform>,
    pub elapsed_secs: f64,
    pub timer_running: bool,
    pub resets: u32,
    pub best_run_secs: Option<f64>,
}

/// One run of the game: actor, platform stream and run bookkeeping
#[derive(Debug, Clone)]
pub struct Session<R: RandomSource = Pcg32> {
    config: SimConfig,
    physics: JumpPhysics,
    actor: Actor,
    stream: PlatformStream,
    run: RunState,
    records: RunRecords,
    rng: R,
}

impl Session<Pcg32> {
    /// Build a session whose generator is seeded from `config.seed`
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let rng = Pcg32::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: RandomSource> Session<R> {
    /// Build a session drawing from the given random source
    pub fn with_rng(config: SimConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let physics = JumpPhysics::from_config(&config);
        let stream = PlatformStream::generate(&config, &physics, &mut rng)?;

        let mut actor = Actor::new(
            Vec2::ZERO,
            Vec2::new(config.actor_width, config.actor_height),
        );
        actor.place_on(stream.first());

        let mut run = RunState {
            ground_y: actor.pos.y,
            on_platform: Some(stream.first().index),
            ..Default::default()
        };
        if config.autostart_timer {
            run.stopwatch.start();
        }

        log::info!(
            "Session started: seed={}, platforms={}, max jump height={:.1}px, max jump distance={:.1}px",
            config.seed,
            stream.len(),
            physics.max_jump_height(),
            physics.max_jump_distance(config.scroll_speed)
        );

        Ok(Self {
            config,
            physics,
            actor,
            stream,
            run,
            records: RunRecords::new(),
            rng,
        })
    }

    /// Queue a jump for the next tick
    pub fn on_jump_pressed(&mut self) {
        self.run.pending_jump = true;
    }

    /// Advance the simulation by one tick at monotonic time `now`
    pub fn advance(&mut self, now: Duration) -> TickReport {
        let mut delta = match self.run.last_now {
            Some(prev) => now.saturating_sub(prev),
            None => Duration::ZERO,
        };
        self.run.last_now = Some(now);
        self.run.ticks += 1;

        let mut report = TickReport {
            tick: self.run.ticks,
            ..Default::default()
        };

        // Deferred stopwatch restart; only time past the fire point counts
        if let Some(restart) = self.run.pending_restart {
            if now >= restart.fire_at {
                self.run.pending_restart = None;
                self.run.stopwatch.restart();
                delta = delta.min(now - restart.fire_at);
                log::debug!("Stopwatch restarted at tick {}", self.run.ticks);
                report.events.push(SimEvent::TimerRestarted);
            }
        }

        if std::mem::take(&mut self.run.pending_jump) && self.physics.trigger_jump(&mut self.actor)
        {
            self.run.phase = RunPhase::Airborne;
            self.run.on_platform = None;
            report.events.push(SimEvent::Jumped);
        }

        self.stream.scroll(self.config.scroll_speed);
        for recycled in self.stream.recycle_expired(&self.physics, &mut self.rng) {
            report.events.push(SimEvent::Recycled {
                platform: recycled.index,
                x: recycled.x,
                y: recycled.y,
                gap: recycled.gap,
            });
        }

        let descent = self.physics.descent_step(&self.actor);
        let landing = find_landing(&self.actor, self.stream.platforms(), descent);
        if let Some(landing) = &landing {
            self.run.ground_y = apply_landing(&mut self.actor, landing);
            self.run.phase = RunPhase::Grounded;
            if self.run.on_platform != Some(landing.platform) {
                log::trace!(
                    "Landed on platform {} at y={:.1}",
                    landing.platform,
                    landing.surface_y
                );
                report.events.push(SimEvent::Landed {
                    platform: landing.platform,
                    ground_y: self.run.ground_y,
                });
            }
        }
        self.run.on_platform = landing.map(|l| l.platform);
        report.landed = landing.is_some();

        self.physics.integrate(&mut self.actor, report.landed);

        self.run.stopwatch.accumulate(delta);

        if !report.landed && self.actor.top() > self.config.viewport_height {
            let elapsed_secs = self.reset(now);
            report.events.push(SimEvent::Reset { elapsed_secs });
        }

        report
    }

    /// Put the actor back on slot 0 and (re)schedule the stopwatch restart
    ///
    /// Returns the elapsed time of the run that just ended, or `None` when
    /// the stopwatch was not running (a fall during the restart delay).
    fn reset(&mut self, now: Duration) -> Option<f64> {
        let elapsed_secs = self
            .run
            .stopwatch
            .is_running()
            .then(|| self.run.stopwatch.elapsed_secs());
        let rank = elapsed_secs.and_then(|secs| self.records.add_run(secs, self.run.ticks));
        self.run.stopwatch.stop();

        let first = self.stream.first();
        self.actor.place_on(first);
        self.run.ground_y = self.actor.pos.y;
        self.run.on_platform = Some(first.index);
        self.run.phase = RunPhase::Grounded;
        self.run.pending_restart = Some(ScheduledRestart {
            fire_at: now + self.config.reset_delay(),
        });
        self.run.resets += 1;

        match elapsed_secs {
            Some(secs) => log::info!(
                "Fell off-screen after {:.2}s (reset #{}, rank {:?})",
                secs,
                self.run.resets,
                rank
            ),
            None => log::info!(
                "Fell off-screen with the stopwatch stopped (reset #{})",
                self.run.resets
            ),
        }
        elapsed_secs
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn platforms(&self) -> &[Platform] {
        self.stream.platforms()
    }

    pub fn stream(&self) -> &PlatformStream {
        &self.stream
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    pub fn phase(&self) -> RunPhase {
        self.run.phase
    }

    pub fn ground_y(&self) -> f32 {
        self.run.ground_y
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.run.stopwatch.elapsed_secs()
    }

    pub fn timer_running(&self) -> bool {
        self.run.stopwatch.is_running()
    }

    pub fn elapsed_display(&self) -> String {
        self.run.stopwatch.display()
    }

    pub fn ticks(&self) -> u64 {
        self.run.ticks
    }

    pub fn records(&self) -> &RunRecords {
        &self.records
    }

    pub fn physics(&self) -> &JumpPhysics {
        &self.physics
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.run.ticks,
            phase: self.run.phase,
            actor: self.actor.clone(),
            platforms: self.stream.platforms().to_vec(),
            elapsed_secs: self.elapsed_secs(),
            timer_running: self.timer_running(),
            resets: self.run.resets,
            best_run_secs: self.records.best(),
        }
    }
}
