//! CivModCore duration strings such as `1h30m`, `8s` or the legacy `20t`
//!
//! Tick counts are summed exactly, so `3t` prints as `0.15`. Pages generated
//! by summing `0.05` per tick in floating point (`0.15000000000000002`) will
//! not match byte for byte.

use std::fmt;
use std::ops::{Add, Mul};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Ticks per second. Durations are counted in ticks so that the legacy `t`
/// unit never loses precision.
const TICKS_PER_SECOND: u64 = 20;

/// A second count that remembers whether it ever involved ticks.
///
/// Whole counts render as integers (`90`), anything touched by ticks renders
/// as a float (`1.0`, `0.15`).
#[derive(Debug, Clone, Copy)]
pub enum Seconds {
    Whole(u64),
    Fractional(f64),
}

impl Seconds {
    pub fn as_f64(self) -> f64 {
        match self {
            Seconds::Whole(s) => s as f64,
            Seconds::Fractional(s) => s,
        }
    }
}

impl PartialEq for Seconds {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Seconds::Whole(a), Seconds::Whole(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl Add for Seconds {
    type Output = Seconds;

    fn add(self, rhs: Seconds) -> Seconds {
        match (self, rhs) {
            (Seconds::Whole(a), Seconds::Whole(b)) => Seconds::Whole(a.saturating_add(b)),
            _ => Seconds::Fractional(self.as_f64() + rhs.as_f64()),
        }
    }
}

impl Mul for Seconds {
    type Output = Seconds;

    fn mul(self, rhs: Seconds) -> Seconds {
        match (self, rhs) {
            (Seconds::Whole(a), Seconds::Whole(b)) => Seconds::Whole(a.saturating_mul(b)),
            _ => Seconds::Fractional(self.as_f64() * rhs.as_f64()),
        }
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seconds::Whole(s) => write!(f, "{}", s),
            // Debug keeps the trailing `.0` on integral floats
            Seconds::Fractional(s) => write!(f, "{:?}", s),
        }
    }
}

/// Elapsed time parsed from a `<digits><unit>` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Duration {
    ticks: u64,
    ticked: bool,
}

impl Duration {
    pub fn from_secs(secs: u64) -> Self {
        Self {
            ticks: secs.saturating_mul(TICKS_PER_SECOND),
            ticked: false,
        }
    }

    pub fn seconds(&self) -> Seconds {
        if self.ticked {
            Seconds::Fractional(self.ticks as f64 / TICKS_PER_SECOND as f64)
        } else {
            Seconds::Whole(self.ticks / TICKS_PER_SECOND)
        }
    }
}

/// Parse a duration string into a [`Duration`].
///
/// Digits accumulate until a unit character (`s`, `m`, `h`, `d`, `t`) flushes
/// them into the total. Digits left over at the end of the string are
/// ignored, so `"1m30"` is 60 seconds.
pub fn parse_duration(text: &str) -> Result<Duration> {
    let mut ticks: u64 = 0;
    let mut ticked = false;
    let mut pending = String::new();

    for c in text.chars() {
        if c.is_ascii_digit() {
            pending.push(c);
            continue;
        }

        let ticks_per_unit = match c {
            's' => TICKS_PER_SECOND,
            'm' => 60 * TICKS_PER_SECOND,
            'h' => 60 * 60 * TICKS_PER_SECOND,
            'd' => 24 * 60 * 60 * TICKS_PER_SECOND,
            // Civcraft-era configs; Devoted dropped it
            't' => {
                ticked = true;
                1
            }
            unit => {
                return Err(Error::InvalidDurationUnit {
                    unit,
                    text: text.to_string(),
                });
            }
        };

        if pending.is_empty() {
            return Err(Error::InvalidDurationUnit {
                unit: c,
                text: text.to_string(),
            });
        }
        let overflow = || Error::DurationOverflow {
            text: text.to_string(),
        };
        let count: u64 = pending.parse().map_err(|_| overflow())?;
        ticks = count
            .checked_mul(ticks_per_unit)
            .and_then(|t| ticks.checked_add(t))
            .ok_or_else(overflow)?;
        pending.clear();
    }

    Ok(Duration { ticks, ticked })
}

impl FromStr for Duration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_duration(s)
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration {
            ticks: self.ticks.saturating_add(rhs.ticks),
            ticked: self.ticked || rhs.ticked,
        }
    }
}

impl Mul for Duration {
    type Output = Seconds;

    fn mul(self, rhs: Duration) -> Seconds {
        self.seconds() * rhs.seconds()
    }
}

impl Mul<u64> for Duration {
    type Output = Seconds;

    fn mul(self, rhs: u64) -> Seconds {
        self.seconds() * Seconds::Whole(rhs)
    }
}

impl Mul<f64> for Duration {
    type Output = Seconds;

    fn mul(self, rhs: f64) -> Seconds {
        Seconds::Fractional(self.seconds().as_f64() * rhs)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.seconds(), f)
    }
}
