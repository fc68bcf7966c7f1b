//! Countdown timer shared by animations, cooldowns and hit reactions.
//!
//! A [`Timer`] accumulates elapsed seconds and wraps around its duration
//! instead of resetting to zero, so the overshoot of a long frame carries into
//! the next cycle and looping animations stay in phase at any frame rate.
//!
//! The timeout flag is sticky: once a cycle completes it stays set until the
//! owner calls [`Timer::reset`]. Owners either free-run a timer (looping
//! animations) or reset it on an action (weapon cooldown, damage reaction).

/// Wrapping countdown with a sticky timeout flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    duration: f32,
    time: f32,
    timed_out: bool,
}

impl Timer {
    /// Create a timer with the given cycle length in seconds.
    pub fn new(duration: f32) -> Self {
        Timer {
            duration,
            time: 0.0,
            timed_out: false,
        }
    }

    /// Create a timer that already reports a timeout, e.g. a cooldown that
    /// starts out ready.
    pub fn expired(duration: f32) -> Self {
        Timer {
            timed_out: true,
            ..Timer::new(duration)
        }
    }

    /// Advance the timer by `dt` seconds.
    ///
    /// Returns how many full cycles completed during this step (usually 0 or
    /// 1). A non-positive or non-finite duration counts as permanently timed
    /// out; negative deltas are ignored.
    pub fn step(&mut self, dt: f32) -> u32 {
        if !(self.duration > 0.0) || !self.duration.is_finite() {
            self.time = 0.0;
            self.timed_out = true;
            return 1;
        }
        if dt > 0.0 {
            self.time += dt;
        }

        if self.time < self.duration {
            return 0;
        }
        let cycles = (self.time / self.duration).floor();
        self.time -= cycles * self.duration;
        // Rounding can leave the remainder just outside the cycle.
        if !(self.time >= 0.0 && self.time < self.duration) {
            self.time = 0.0;
        }
        self.timed_out = true;
        // Saturating float-to-int cast.
        (cycles as u32).max(1)
    }

    /// Whether a cycle has completed since the last reset.
    pub fn is_timeout(&self) -> bool {
        self.timed_out
    }

    /// Elapsed seconds inside the current cycle.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Fraction of the current cycle elapsed, in `[0, 1)`.
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            self.time / self.duration
        } else {
            0.0
        }
    }

    /// Zero the elapsed time and clear the timeout flag.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.timed_out = false;
    }
}
