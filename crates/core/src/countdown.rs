//! One-shot token-expiry countdown

/// Result of advancing a [`Countdown`] by one second
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Still counting; carries the seconds remaining
    Running(u32),
    /// Just reached zero. Yielded exactly once per countdown.
    Expired,
    /// Already finished; the tick had no effect
    Stopped,
}

/// Second-granularity one-shot countdown.
///
/// Pure state machine: the caller supplies the once-per-second schedule and
/// reacts to [`Tick::Expired`]. A countdown of N minutes expires on exactly
/// the N*60th tick. Restarting means constructing a fresh value; dropping
/// the old one cancels nothing here, so the caller must also drop the old
/// schedule.
#[derive(Debug)]
pub struct Countdown {
    remaining: u32,
    finished: bool,
}

impl Countdown {
    pub fn from_minutes(minutes: u32) -> Self {
        Self::from_seconds(minutes.saturating_mul(60))
    }

    pub fn from_seconds(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            finished: false,
        }
    }

    /// Seconds left until expiry
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Advance by one second
    pub fn tick(&mut self) -> Tick {
        if self.finished {
            return Tick::Stopped;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.finished = true;
            Tick::Expired
        } else {
            Tick::Running(self.remaining)
        }
    }
}
