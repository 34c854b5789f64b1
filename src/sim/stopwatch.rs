//! Elapsed-time counter shown on the HUD

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stopwatch {
    elapsed_secs: f64,
    running: bool,
}

impl Stopwatch {
    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.elapsed_secs = 0.0;
    }

    /// Zero the counter and start counting again
    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    /// Add wall-clock time; ignored while stopped
    pub fn accumulate(&mut self, delta: Duration) {
        if self.running {
            self.elapsed_secs += delta.as_secs_f64();
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds with two decimals, as drawn by the host
    pub fn display(&self) -> String {
        format!("{:.2}", self.elapsed_secs)
    }
}
