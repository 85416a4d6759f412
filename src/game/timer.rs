use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Minutes/seconds left on the level clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCountdown")]
pub struct Countdown {
    pub minutes: u32,
    pub seconds: u32,
}

impl Default for Countdown {
    fn default() -> Self {
        Countdown {
            minutes: 0,
            seconds: 10,
        }
    }
}

/// Clock as written in a config file. Either field may be left out; an empty
/// object means the default clock.
#[derive(Deserialize)]
struct RawCountdown {
    #[serde(default)]
    minutes: Option<u32>,
    #[serde(default)]
    seconds: Option<u32>,
}

impl From<RawCountdown> for Countdown {
    fn from(raw: RawCountdown) -> Self {
        match (raw.minutes, raw.seconds) {
            (None, None) => Countdown::default(),
            (minutes, seconds) => Countdown::new(minutes.unwrap_or(0), seconds.unwrap_or(0)),
        }
    }
}

impl Countdown {
    pub fn new(minutes: u32, seconds: u32) -> Self {
        Countdown {
            minutes: minutes.saturating_add(seconds / 60),
            seconds: seconds % 60,
        }
    }

    pub fn total_seconds(&self) -> u32 {
        self.minutes.saturating_mul(60).saturating_add(self.seconds)
    }

    /// One second off the clock. Returns `true` on the tick that runs out,
    /// which leaves the clock at 0:00. A clock already at 0:00 still has that
    /// one tick left before it expires.
    pub fn tick(&mut self) -> bool {
        if self.seconds > 0 {
            self.seconds -= 1;
            return false;
        }
        if self.minutes > 0 {
            self.minutes -= 1;
            self.seconds = 59;
            return false;
        }
        true
    }
}
