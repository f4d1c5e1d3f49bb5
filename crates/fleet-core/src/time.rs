//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  Using an integer tick
//! as the canonical unit keeps all schedule arithmetic exact (no
//! floating-point drift) and makes comparisons O(1).  Edge durations,
//! delivery windows, and scoring all speak in ticks.
//!
//! Ticks are unsigned: a negative tick is unrepresentable, so the "negative
//! tick" input error of looser systems cannot occur here.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero if
    /// `earlier` is in the future.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TickInterval ──────────────────────────────────────────────────────────────

/// An inclusive `[start, end]` delivery window.
///
/// Construction enforces `start <= end`; every other invariant in the
/// dispatcher builds on that.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickInterval {
    start: Tick,
    end: Tick,
}

impl TickInterval {
    /// Create a window, rejecting `start > end`.
    pub fn new(start: Tick, end: Tick) -> CoreResult<Self> {
        if start > end {
            return Err(CoreError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> Tick {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Tick {
        self.end
    }

    /// Window length in ticks (inclusive bounds, so `[t, t]` has duration 0).
    #[inline]
    pub fn duration(&self) -> u64 {
        self.end.0 - self.start.0
    }

    #[inline]
    pub fn contains(&self, tick: Tick) -> bool {
        self.start <= tick && tick <= self.end
    }

    /// Distance of `tick` from the window: ticks early plus ticks late,
    /// zero inside the window.
    #[inline]
    pub fn ticks_off(&self, tick: Tick) -> u64 {
        self.start.since(tick) + tick.since(self.end)
    }
}

impl fmt::Display for TickInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
