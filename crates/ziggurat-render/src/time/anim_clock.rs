use std::time::Instant;

/// Monotonic animation clock.
///
/// Produces the `time` value bound once per draw call: elapsed seconds since
/// the clock was created or last rebased, as `f32`.
///
/// Frame selection and scrolling are periodic/linear in time, so a rebase
/// only shifts animation phase. `f32` keeps sub-millisecond resolution for
/// roughly the first few hours of uptime; long-running hosts should `reset()`
/// at a scene boundary.
#[derive(Debug, Clone)]
pub struct AnimClock {
    origin: Instant,
}

impl AnimClock {
    /// Creates a clock starting at zero.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Rebases the clock to zero.
    pub fn reset(&mut self) {
        self.origin = Instant::now();
    }

    /// Elapsed seconds since creation or the last [`reset`](Self::reset).
    ///
    /// Non-decreasing between resets.
    pub fn seconds(&self) -> f32 {
        self.origin.elapsed().as_secs_f32()
    }
}

impl Default for AnimClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn seconds_is_non_decreasing() {
        let clock = AnimClock::new();
        let a = clock.seconds();
        let b = clock.seconds();
        assert!(b >= a);
        assert!(a >= 0.0);
    }

    #[test]
    fn reset_rebases_to_zero() {
        let mut clock = AnimClock::new();
        std::thread::sleep(Duration::from_millis(5));
        clock.reset();
        assert!(clock.seconds() < 1.0);
    }
}
