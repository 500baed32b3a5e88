//! # Run configuration.
//!
//! Provides [`Config`] centralized settings for one supervised run.
//!
//! The defaults are the demonstration constants: a 10s run window, writers
//! pausing 500ms (even) and 700ms (odd), the reader pausing 1000ms and
//! reporting the last 5 values.
//!
//! ## Constraints (checked by [`Config::validate`])
//! - every duration is positive;
//! - the reader is slower than both writers;
//! - the run window is longer than the slowest writer pause, so the smoke check
//!   has something to find;
//! - `value_slots`, `tail_len` and `bus_capacity` are non-zero;
//! - `value_slots` is at most [`MAX_VALUE_SLOTS`], so every value fits in a `u32`.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::RuntimeError;
use crate::store::MAX_VALUE_SLOTS;
use crate::tasks::{DEFAULT_TAIL_LEN, DEFAULT_VALUE_SLOTS};

/// Settings for a supervised run.
///
/// All fields are public; call [`Config::validate`] (the builder does) before use.
#[derive(Clone, Debug)]
pub struct Config {
    /// How long the tasks run before cancellation is signalled.
    pub run_window: Duration,

    /// Pause between even writes.
    pub even_pause: Duration,

    /// Pause between odd writes.
    pub odd_pause: Duration,

    /// Pause between tail reads.
    pub observer_pause: Duration,

    /// Distinct values per parity: writers pick `n` in `0..value_slots`.
    pub value_slots: u32,

    /// Number of newest tokens each tail read reports.
    pub tail_len: usize,

    /// Capacity of the event bus ring buffer.
    pub bus_capacity: usize,

    /// File backing the store when no sink is given to the builder.
    pub store_path: PathBuf,
}

impl Config {
    /// Longest of the two writer pauses.
    #[inline]
    pub fn slowest_producer_pause(&self) -> Duration {
        self.even_pause.max(self.odd_pause)
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Checks the constraints listed in the module docs.
    pub fn validate(&self) -> Result<(), RuntimeError> {
        let durations = [
            ("run_window", self.run_window),
            ("even_pause", self.even_pause),
            ("odd_pause", self.odd_pause),
            ("observer_pause", self.observer_pause),
        ];
        for (field, d) in durations {
            if d.is_zero() {
                return Err(RuntimeError::invalid_config(format!(
                    "{field} must be positive"
                )));
            }
        }
        if self.observer_pause <= self.slowest_producer_pause() {
            return Err(RuntimeError::invalid_config(format!(
                "observer_pause {:?} must exceed both producer pauses (slowest {:?})",
                self.observer_pause,
                self.slowest_producer_pause()
            )));
        }
        if self.run_window <= self.slowest_producer_pause() {
            return Err(RuntimeError::invalid_config(format!(
                "run_window {:?} must exceed the slowest producer pause {:?}",
                self.run_window,
                self.slowest_producer_pause()
            )));
        }
        if self.value_slots == 0 {
            return Err(RuntimeError::invalid_config("value_slots must be non-zero"));
        }
        if self.value_slots > MAX_VALUE_SLOTS {
            return Err(RuntimeError::invalid_config(format!(
                "value_slots {} exceeds {MAX_VALUE_SLOTS}; odd values would overflow u32",
                self.value_slots
            )));
        }
        if self.tail_len == 0 {
            return Err(RuntimeError::invalid_config("tail_len must be non-zero"));
        }
        if self.bus_capacity == 0 {
            return Err(RuntimeError::invalid_config("bus_capacity must be non-zero"));
        }
        Ok(())
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `run_window = 10s`
    /// - `even_pause = 500ms`, `odd_pause = 700ms`, `observer_pause = 1000ms`
    /// - `value_slots = 50` (`0..=98` / `1..=99`)
    /// - `tail_len = 5`
    /// - `bus_capacity = 1024`
    /// - `store_path = "numbers.txt"`
    fn default() -> Self {
        Self {
            run_window: Duration::from_secs(10),
            even_pause: Duration::from_millis(500),
            odd_pause: Duration::from_millis(700),
            observer_pause: Duration::from_millis(1000),
            value_slots: DEFAULT_VALUE_SLOTS,
            tail_len: DEFAULT_TAIL_LEN,
            bus_capacity: 1024,
            store_path: PathBuf::from("numbers.txt"),
        }
    }
}
