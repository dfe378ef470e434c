/// Per-question countdown for FlashSign and Endless.
///
/// Driven by variable frame deltas like a fixed-timestep accumulator:
/// every whole second of accumulated time is one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Expired,
    Cancelled,
}

/// What happened during one `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSignal {
    /// One second passed; carries the new remaining count.
    Tick(u32),
    /// Remaining reached zero. Emitted exactly once per run.
    Expired,
}

#[derive(Debug, Clone)]
pub struct RoundTimer {
    state: TimerState,
    seconds: u32,
    remaining: u32,
    accumulator: f32,
}

impl RoundTimer {
    pub fn new(seconds: u32) -> Self {
        Self {
            state: TimerState::Idle,
            seconds,
            remaining: seconds,
            accumulator: 0.0,
        }
    }

    pub fn start(&mut self) {
        self.state = TimerState::Running;
        self.remaining = self.seconds;
        self.accumulator = 0.0;
    }

    /// Stop ticking without expiring. Only meaningful while running.
    pub fn cancel(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Cancelled;
        }
    }

    /// Add frame time. Returns the ticks (and possibly the expiry) it produced.
    pub fn advance(&mut self, dt: f32) -> Vec<TimerSignal> {
        let mut signals = Vec::new();
        if self.state != TimerState::Running {
            return signals;
        }

        self.accumulator += dt.max(0.0);
        while self.accumulator >= 1.0 {
            self.accumulator -= 1.0;
            self.remaining = self.remaining.saturating_sub(1);
            signals.push(TimerSignal::Tick(self.remaining));
            if self.remaining == 0 {
                self.state = TimerState::Expired;
                signals.push(TimerSignal::Expired);
                break;
            }
        }
        signals
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_timer_does_not_tick() {
        let mut timer = RoundTimer::new(10);
        assert!(timer.advance(5.0).is_empty());
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn ticks_once_per_second() {
        let mut timer = RoundTimer::new(10);
        timer.start();
        assert!(timer.advance(0.5).is_empty());
        assert_eq!(timer.advance(0.6), vec![TimerSignal::Tick(9)]);
        assert_eq!(timer.remaining(), 9);
    }

    #[test]
    fn expires_exactly_once() {
        let mut timer = RoundTimer::new(3);
        timer.start();
        let signals = timer.advance(10.0);
        assert_eq!(
            signals,
            vec![
                TimerSignal::Tick(2),
                TimerSignal::Tick(1),
                TimerSignal::Tick(0),
                TimerSignal::Expired
            ]
        );
        assert_eq!(timer.state(), TimerState::Expired);
        assert!(timer.advance(10.0).is_empty());
    }

    #[test]
    fn cancel_stops_without_expiry() {
        let mut timer = RoundTimer::new(2);
        timer.start();
        timer.advance(1.0);
        timer.cancel();
        assert_eq!(timer.state(), TimerState::Cancelled);
        assert!(timer.advance(5.0).is_empty());
    }

    #[test]
    fn restart_resets_remaining() {
        let mut timer = RoundTimer::new(10);
        timer.start();
        timer.advance(4.0);
        timer.start();
        assert_eq!(timer.remaining(), 10);
        assert!(timer.is_running());
    }
}
