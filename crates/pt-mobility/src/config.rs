//! Movement tunables.

use std::time::Duration;

use pt_core::{Speed, TickRate};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementConfig {
    /// Interval between position updates.
    pub tick:      Duration,
    /// Top walking speed in km/h.
    pub speed_kmh: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            tick:      TickRate::DEFAULT.duration(),
            speed_kmh: Speed::DEFAULT_KMH,
        }
    }
}
