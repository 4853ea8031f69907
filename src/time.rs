//! Periodic timers driven by wall-clock timestamps.
//!
//! `draw_web()` calls at ~60fps with variable delta. An [`IntervalTimer`]
//! turns those timestamps into a whole number of elapsed periods using an
//! accumulator, so a 1-second countdown keeps real time no matter how fast
//! frames arrive. [`Countdown`] is the single slot the round countdown lives
//! in: there is never more than one armed timer.

pub struct IntervalTimer {
    /// Milliseconds per period (e.g. 1000ms for a 1 Hz timer)
    period_ms: f64,
    /// Accumulated milliseconds not yet consumed as periods
    accumulator: f64,
    /// Timestamp of the last update (ms), None until the first update
    last_timestamp: Option<f64>,
}

impl IntervalTimer {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms: period_ms.max(1.0),
            accumulator: 0.0,
            last_timestamp: None,
        }
    }

    /// Feed a timestamp (from `performance.now()` or similar) and return how
    /// many periods elapsed since the previous call.
    ///
    /// The first call only records the baseline. Timestamps that go backwards
    /// count as zero elapsed time.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).max(0.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let periods = (self.accumulator / self.period_ms) as u32;
        self.accumulator -= periods as f64 * self.period_ms;
        periods
    }
}

/// Holder for the one countdown timer of the current round.
#[derive(Default)]
pub struct Countdown {
    timer: Option<IntervalTimer>,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a fresh timer. An already armed timer is dropped first.
    pub fn arm(&mut self, period_ms: f64) {
        if self.timer.is_some() {
            log::warn!("countdown armed while another was active; replacing it");
        }
        self.timer = Some(IntervalTimer::new(period_ms));
    }

    /// Cancel the timer. Returns whether one was armed.
    pub fn cancel(&mut self) -> bool {
        self.timer.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Periods elapsed since the last poll; 0 when disarmed.
    pub fn poll(&mut self, now_ms: f64) -> u32 {
        match self.timer.as_mut() {
            Some(timer) => timer.update(now_ms),
            None => 0,
        }
    }
}
