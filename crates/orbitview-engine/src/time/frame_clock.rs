use std::time::{Duration, Instant};

/// Timing of one frame-loop iteration.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Clamped seconds since the previous tick.
    pub dt: f32,

    /// Sum of all clamped `dt` since the clock started or was reset.
    pub elapsed: f32,

    pub now: Instant,

    /// Zero for the first tick after construction or reset.
    pub frame_index: u64,
}

/// Produces [`FrameTime`] values for a single render loop.
///
/// Delta time is clamped to `[dt_min, dt_max]` so a stalled or minimized window
/// does not hand animations a multi-second step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    elapsed: Duration,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self::starting_at(Instant::now(), dt_min, dt_max)
    }

    fn starting_at(last: Instant, dt_min: Duration, dt_max: Duration) -> Self {
        Self {
            last,
            elapsed: Duration::ZERO,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Restarts timing, e.g. when the loop is re-registered after a pause.
    pub fn reset(&mut self) {
        self.last = Instant::now();
        self.elapsed = Duration::ZERO;
        self.frame_index = 0;
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;
        self.elapsed += dt;

        let time = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: self.elapsed.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn clock(start: Instant) -> FrameClock {
        FrameClock::starting_at(start, Duration::from_millis(1), Duration::from_millis(100))
    }

    #[test]
    fn frames_are_numbered_from_zero() {
        let start = Instant::now();
        let mut clock = clock(start);
        let a = clock.tick_at(start + Duration::from_millis(16));
        let b = clock.tick_at(start + Duration::from_millis(32));
        assert_eq!((a.frame_index, b.frame_index), (0, 1));
        assert_relative_eq!(b.dt, 0.016, epsilon = 1e-6);
        assert_relative_eq!(b.elapsed, 0.032, epsilon = 1e-6);
    }

    #[test]
    fn stalls_are_clamped() {
        let start = Instant::now();
        let mut clock = clock(start);
        let t = clock.tick_at(start + Duration::from_secs(5));
        assert_relative_eq!(t.dt, 0.1, epsilon = 1e-6);
        assert_relative_eq!(t.elapsed, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn repeated_instant_uses_minimum_step() {
        let start = Instant::now();
        let mut clock = clock(start);
        let t = clock.tick_at(start);
        assert_relative_eq!(t.dt, 0.001, epsilon = 1e-6);
    }

    #[test]
    fn reset_restarts_numbering() {
        let mut clock = FrameClock::new();
        clock.tick();
        clock.tick();
        clock.reset();
        let t = clock.tick();
        assert_eq!(t.frame_index, 0);
        assert!(t.elapsed <= 0.25);
    }
}
