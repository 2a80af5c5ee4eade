use crate::session::{CLOCK_INTERVAL_MS, STEP_INTERVAL_MS};

/// A fixed-interval schedule driven by the main loop: feed it elapsed time,
/// get back how many ticks came due.
pub struct Ticker {
    interval_ms: u64,
    carried_ms: u64,
}

impl Ticker {
    pub fn new(interval_ms: u64) -> Self {
        debug_assert!(interval_ms > 0);
        Ticker { interval_ms, carried_ms: 0 }
    }

    pub fn advance(&mut self, elapsed_ms: u64) -> u64 {
        self.carried_ms += elapsed_ms;
        let due = self.carried_ms / self.interval_ms;
        self.carried_ms %= self.interval_ms;
        due
    }
}

/// The two schedules a running session owns: the game step and the clock.
/// Starting or restarting a session replaces the whole value, so a tick
/// accumulated by the previous session can never fire into the new one.
pub struct Timers {
    pub step: Ticker,
    pub clock: Ticker,
}

impl Timers {
    pub fn new() -> Self {
        Timers {
            step: Ticker::new(STEP_INTERVAL_MS),
            clock: Ticker::new(CLOCK_INTERVAL_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_tick_before_the_interval_elapses() {
        let mut ticker = Ticker::new(300);

        assert_eq!(ticker.advance(299), 0);
        assert_eq!(ticker.advance(1), 1);
    }

    #[test]
    fn a_long_gap_yields_every_due_tick() {
        let mut ticker = Ticker::new(300);

        assert_eq!(ticker.advance(1000), 3);
        // 100ms carried over from the gap above
        assert_eq!(ticker.advance(200), 1);
    }

    #[test]
    fn replacing_the_timers_discards_pending_ticks() {
        let mut timers = Timers::new();
        timers.step.advance(299);
        timers.clock.advance(999);

        // Restart: the old schedules are dropped wholesale
        timers = Timers::new();

        assert_eq!(timers.step.advance(1), 0);
        assert_eq!(timers.clock.advance(1), 0);
    }

    #[test]
    fn step_and_clock_run_independently() {
        let mut timers = Timers::new();

        assert_eq!(timers.step.advance(600), 2);
        assert_eq!(timers.clock.advance(600), 0);
        assert_eq!(timers.clock.advance(400), 1);
    }
}
