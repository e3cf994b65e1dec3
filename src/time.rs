//! Recurring interval timer driven by the render loop.
//!
//! `draw_web()` calls at ~60fps with variable delta. `IntervalTimer` turns
//! that into a whole number of fixed-length ticks, and can be started and
//! stopped explicitly so a game can cancel its own tick stream.

/// Tick rate shared by both games: one tick per real-time second.
pub const TICKS_PER_SECOND: u32 = 1;

pub struct IntervalTimer {
    /// Milliseconds per tick (e.g. 1000ms = 1 tick/sec)
    ms_per_tick: f64,
    /// Accumulated milliseconds not yet consumed as ticks
    accumulator: f64,
    /// Total elapsed ticks while running
    pub total_ticks: u64,
    /// Timestamp of the last update (ms), None if first frame after start
    last_timestamp: Option<f64>,
    running: bool,
}

impl IntervalTimer {
    /// Create a stopped timer with the given tick rate.
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec.max(1) as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
            running: false,
        }
    }

    /// Start (or restart) the timer. Time accumulated before a stop is discarded.
    pub fn start(&mut self) {
        self.running = true;
        self.accumulator = 0.0;
        self.last_timestamp = None;
    }

    /// Stop the timer. Further `update` calls yield zero ticks until restarted.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed wall-clock timestamp (from `performance.now()` or similar).
    /// Returns the number of discrete ticks to process this frame.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        if !self.running {
            return 0;
        }
        let delta = match self.last_timestamp {
            // Clamp to avoid a burst of ticks if the tab was backgrounded
            Some(prev) => (now_ms - prev).clamp(0.0, 5000.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}
