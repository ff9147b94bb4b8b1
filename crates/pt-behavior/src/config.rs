//! Behaviour tunables.

use std::time::Duration;

use crate::OutcomeRule;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BehaviorConfig {
    /// Wait between target scans and while idling next to a followed player.
    pub poll_interval:    Duration,
    /// Distance in metres at which an action can be performed.
    pub reach:            f32,
    /// Scans for a followed player before giving up.
    pub follow_retries:   u32,
    /// Back-off after a follow walk finds no path.
    pub no_path_cooldown: Duration,
    /// Poll interval while the host reports a busy action or low stamina,
    /// and while waiting for an action outcome.
    pub action_poll:      Duration,
    /// Give up on a groom attempt that reports no outcome within this time.
    /// Fights last as long as the creature does.
    pub action_timeout:   Duration,
    /// Event text that settles a pending action.
    pub outcome_rules:    Vec<OutcomeRule>,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            poll_interval:    Duration::from_millis(250),
            reach:            4.0,
            follow_retries:   10,
            no_path_cooldown: Duration::from_secs(5),
            action_poll:      Duration::from_secs(1),
            action_timeout:   Duration::from_secs(30),
            outcome_rules:    OutcomeRule::grooming(),
        }
    }
}
