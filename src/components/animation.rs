use super::timer::Timer;

/// A horizontal sprite-sheet strip played over a fixed cycle length.
///
/// The frame index is derived from the timer's position inside the cycle, so
/// looping is implicit: when the timer wraps the strip starts again at frame 0.
/// Objects copy animation definitions by value; each copy keeps its own timer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    timer: Timer,
    frame_count: usize,
}

impl Animation {
    pub fn new(frame_count: usize, duration: f32) -> Self {
        Self {
            timer: Timer::new(duration),
            frame_count,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Length of one full cycle in seconds.
    pub fn length(&self) -> f32 {
        self.timer.duration()
    }

    /// Frame to display, always in `[0, frame_count - 1]`.
    pub fn current_frame(&self) -> usize {
        if self.frame_count == 0 {
            return 0;
        }
        let frame = (self.timer.progress() * self.frame_count as f32).floor() as usize;
        frame.min(self.frame_count - 1)
    }

    pub fn step(&mut self, dt: f32) -> u32 {
        self.timer.step(dt)
    }

    /// True once the strip has played through at least once since the last reset.
    pub fn is_done(&self) -> bool {
        self.timer.is_timeout()
    }

    pub fn reset(&mut self) {
        self.timer.reset();
    }
}
