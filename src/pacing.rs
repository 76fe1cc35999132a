use std::time::{Duration, Instant};

/// Holds a loop to a fixed frame budget by sleeping away whatever time is left of it.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    budget: Duration,
}

impl FramePacer {
    pub fn new(budget: Duration) -> Self {
        FramePacer { budget }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time left of the budget after `elapsed`, `None` if the frame ran over.
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        match self.budget.checked_sub(elapsed) {
            Some(left) if !left.is_zero() => Some(left),
            _ => None,
        }
    }

    /// Block until the frame started at `frame_start` has used up its budget.
    pub fn pace(&self, frame_start: Instant) {
        if let Some(left) = self.remaining(frame_start.elapsed()) {
            std::thread::sleep(left);
        }
    }
}

/// Turns real elapsed time into whole animation frames, for hosts that drive the loop themselves
/// and can't block (the bevy viewer).
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    budget: Duration,
    accumulated: Duration,
}

impl FrameClock {
    pub fn new(budget: Duration) -> Self {
        FrameClock {
            budget,
            accumulated: Duration::ZERO,
        }
    }

    /// Add `delta` and return how many frames are due. Leftover time carries to the next tick.
    pub fn tick(&mut self, delta: Duration) -> u32 {
        if self.budget.is_zero() {
            return 1;
        }
        self.accumulated += delta;
        let mut frames = 0;
        while self.accumulated >= self.budget {
            self.accumulated -= self.budget;
            frames += 1;
        }
        frames
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_is_what_is_left_of_the_budget() {
        let pacer = FramePacer::new(Duration::from_millis(16));
        assert_eq!(pacer.remaining(Duration::from_millis(10)), Some(Duration::from_millis(6)));
        assert_eq!(pacer.remaining(Duration::from_millis(16)), None);
        assert_eq!(pacer.remaining(Duration::from_millis(40)), None);
    }

    #[test]
    fn pace_waits_out_the_budget() {
        let pacer = FramePacer::new(Duration::from_millis(5));
        let start = Instant::now();
        pacer.pace(start);
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn clock_carries_leftover_time() {
        let mut clock = FrameClock::new(Duration::from_millis(10));
        assert_eq!(clock.tick(Duration::from_millis(4)), 0);
        assert_eq!(clock.tick(Duration::from_millis(7)), 1);
        assert_eq!(clock.tick(Duration::from_millis(29)), 3);
        assert_eq!(clock.tick(Duration::from_millis(9)), 0);
        assert_eq!(clock.tick(Duration::from_millis(1)), 1);
    }
}
