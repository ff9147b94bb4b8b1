//! Movement tick model.
//!
//! # Design
//!
//! Walking is simulated as a sequence of fixed-length ticks.  Each tick the
//! agent advances `speed * tick` metres and issues one position update, then
//! sleeps for the tick.  The tick length therefore sets both the update rate
//! seen by the host and the granularity of pause/cancel checks.
//!
//! The default tick is 1/6 s: six position updates per second, smooth
//! enough for a game client without flooding it.

use std::fmt;
use std::time::Duration;

use crate::{CoreError, CoreResult};

/// A validated, non-zero movement tick length.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickRate(Duration);

impl TickRate {
    /// Six ticks per second.
    pub const DEFAULT: TickRate = TickRate(Duration::from_nanos(1_000_000_000 / 6));

    pub fn new(tick: Duration) -> CoreResult<Self> {
        if tick.is_zero() {
            return Err(CoreError::InvalidTick);
        }
        Ok(Self(tick))
    }

    #[inline]
    pub fn duration(self) -> Duration {
        self.0
    }

    /// Ticks needed to cover `distance` metres at `metres_per_tick`
    /// (rounds up; the final partial step is still one tick).
    pub fn ticks_for(self, distance: f32, metres_per_tick: f32) -> u64 {
        if distance <= 0.0 || metres_per_tick <= 0.0 {
            return 0;
        }
        (distance / metres_per_tick).ceil() as u64
    }
}

impl Default for TickRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for TickRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ms/tick", self.0.as_millis())
    }
}
