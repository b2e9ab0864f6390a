//! Frame clock: turns wall-clock timestamps into a normalized delta and a
//! bounded number of fixed simulation steps.

use super::constants::{FRAME_TIME_MS, MAX_FRAME_DELTA_MS, MAX_STEPS_PER_FRAME};

/// What one call to [`Clock::advance`] produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockTick {
    /// Elapsed milliseconds since the previous call, clamped to `[0, 100]`.
    pub raw_delta_ms: f64,
    /// `raw_delta_ms` in units of one ideal 60 Hz frame.
    pub delta: f64,
    /// Fixed steps drained from the accumulator (at most 3).
    pub fixed_steps: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Clock {
    last_timestamp_ms: Option<f64>,
    accumulator_ms: f64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `now_ms`. The first call after construction or reset
    /// yields a zero delta.
    pub fn advance(&mut self, now_ms: f64) -> ClockTick {
        let previous = *self.last_timestamp_ms.get_or_insert(now_ms);
        self.last_timestamp_ms = Some(now_ms);

        let elapsed = now_ms - previous;
        let raw_delta_ms = if elapsed.is_finite() {
            elapsed.clamp(0.0, MAX_FRAME_DELTA_MS)
        } else {
            0.0
        };

        self.accumulator_ms += raw_delta_ms;

        let mut fixed_steps = 0;
        while self.accumulator_ms >= FRAME_TIME_MS && fixed_steps < MAX_STEPS_PER_FRAME {
            self.accumulator_ms -= FRAME_TIME_MS;
            fixed_steps += 1;
        }

        ClockTick {
            raw_delta_ms,
            delta: raw_delta_ms / FRAME_TIME_MS,
            fixed_steps,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn accumulator_ms(&self) -> f64 {
        self.accumulator_ms
    }
}
