/// Liveness supervisor for the detection loop.
///
/// Checks every `interval` seconds whether a recognizer result arrived within the last
/// `stale_after` seconds. Stalls trigger a restart, up to `max_restarts` in a row; after
/// that it reports once and stays quiet until a fresh result comes in.
#[derive(Debug, Clone)]
pub struct Watchdog {
    interval: f32,
    stale_after: f32,
    max_restarts: u32,
    since_check: f32,
    since_result: f32,
    restarts: u32,
    armed: bool,
    gave_up: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchdogVerdict {
    Restart { attempt: u32 },
    GaveUp,
}

impl Watchdog {
    pub fn new(interval: f32, stale_after: f32, max_restarts: u32) -> Self {
        Self {
            interval,
            stale_after,
            max_restarts,
            since_check: 0.0,
            since_result: 0.0,
            restarts: 0,
            armed: false,
            gave_up: false,
        }
    }

    /// Start supervising a fresh detection session.
    pub fn arm(&mut self) {
        self.armed = true;
        self.since_check = 0.0;
        self.since_result = 0.0;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// The detection loop produced a result.
    pub fn record_result(&mut self) {
        self.since_result = 0.0;
        self.restarts = 0;
        self.gave_up = false;
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    pub fn advance(&mut self, dt: f32) -> Option<WatchdogVerdict> {
        if !self.armed {
            return None;
        }
        self.since_check += dt;
        self.since_result += dt;
        if self.since_check < self.interval {
            return None;
        }
        self.since_check = 0.0;

        if self.since_result <= self.stale_after || self.gave_up {
            return None;
        }
        if self.restarts < self.max_restarts {
            self.restarts += 1;
            self.since_result = 0.0;
            Some(WatchdogVerdict::Restart {
                attempt: self.restarts,
            })
        } else {
            self.gave_up = true;
            Some(WatchdogVerdict::GaveUp)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disarmed_never_fires() {
        let mut dog = Watchdog::new(5.0, 3.0, 2);
        assert_eq!(dog.advance(60.0), None);
    }

    #[test]
    fn healthy_loop_is_left_alone() {
        let mut dog = Watchdog::new(5.0, 3.0, 2);
        dog.arm();
        for _ in 0..10 {
            dog.record_result();
            assert_eq!(dog.advance(1.0), None);
        }
    }

    #[test]
    fn stall_restarts_then_gives_up() {
        let mut dog = Watchdog::new(5.0, 3.0, 2);
        dog.arm();
        assert_eq!(dog.advance(5.0), Some(WatchdogVerdict::Restart { attempt: 1 }));
        assert_eq!(dog.advance(5.0), Some(WatchdogVerdict::Restart { attempt: 2 }));
        assert_eq!(dog.advance(5.0), Some(WatchdogVerdict::GaveUp));
        assert_eq!(dog.advance(5.0), None);

        dog.record_result();
        assert_eq!(dog.restarts(), 0);
        assert_eq!(dog.advance(5.0), Some(WatchdogVerdict::Restart { attempt: 1 }));
    }

    #[test]
    fn recent_result_within_threshold_is_fresh() {
        let mut dog = Watchdog::new(5.0, 3.0, 2);
        dog.arm();
        dog.advance(3.0);
        dog.record_result();
        assert_eq!(dog.advance(2.0), None);
    }
}
