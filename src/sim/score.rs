//! Points total with a time-decaying hit multiplier
//!
//! Every hit bumps the multiplier and refreshes its decay window; once the
//! window lapses without a new hit the multiplier steps back down toward 1,
//! one step per lapsed window.

use serde::{Deserialize, Serialize};

use crate::consts::{MULTIPLIER_REBOOT_TIME, MULTIPLIER_STEP};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    value: u64,
    multiplier: u32,
    /// Seconds left before the multiplier decays by one step
    decay_timer: f32,
}

impl Default for Score {
    fn default() -> Self {
        Self {
            value: 0,
            multiplier: 1,
            decay_timer: 0.0,
        }
    }
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Advance the decay clock. The multiplier only steps down once the
    /// timer has crossed below zero, and never below 1.
    pub fn update(&mut self, dt: f32) {
        if self.decay_timer > 0.0 {
            self.decay_timer -= dt;
        }
        if self.decay_timer < 0.0 && self.multiplier > 1 {
            self.multiplier -= MULTIPLIER_STEP;
            self.decay_timer = MULTIPLIER_REBOOT_TIME;
        }
    }

    /// Award `points`, scaled by the current multiplier
    pub fn notify_hit(&mut self, points: u64) {
        self.value += points * u64::from(self.multiplier);
    }

    pub fn add_multiplier(&mut self, step: u32) {
        self.multiplier += step;
    }

    /// Refresh the decay window, keeping the multiplier alive while hits
    /// keep landing
    pub fn reset_decay_timer(&mut self, window: f32) {
        self.decay_timer = window;
    }
}
