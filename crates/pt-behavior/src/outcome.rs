//! Action outcomes learned from event text.

use tokio::sync::broadcast;
use tracing::trace;

use pt_schedule::EventProcessors;

/// How a performed action ended.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionOutcome {
    Succeeded,
    Failed,
}

/// Event lines containing `needle` settle the pending action as `outcome`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutcomeRule {
    pub needle:  String,
    pub outcome: ActionOutcome,
}

impl OutcomeRule {
    pub fn new(needle: impl Into<String>, outcome: ActionOutcome) -> Self {
        Self { needle: needle.into(), outcome }
    }

    /// Server messages that end a grooming attempt.
    pub fn grooming() -> Vec<OutcomeRule> {
        vec![
            OutcomeRule::new("You have now tended to", ActionOutcome::Succeeded),
            OutcomeRule::new("is already well tended", ActionOutcome::Succeeded),
            OutcomeRule::new("That would be illegal here.", ActionOutcome::Failed),
        ]
    }
}

/// Broadcast channel of action outcomes.
///
/// A behaviour subscribes right before performing an action, so it only
/// sees outcomes that arrive after it acted.
#[derive(Debug, Clone)]
pub struct Outcomes {
    tx: broadcast::Sender<ActionOutcome>,
}

impl Default for Outcomes {
    fn default() -> Self {
        Self::new(16)
    }
}

impl Outcomes {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ActionOutcome> {
        self.tx.subscribe()
    }

    /// Returns the number of subscribers that will see `outcome`.
    pub fn publish(&self, outcome: ActionOutcome) -> usize {
        self.tx.send(outcome).unwrap_or(0)
    }

    /// Register one event processor per rule.
    pub fn install(&self, events: &EventProcessors, rules: &[OutcomeRule]) {
        for rule in rules {
            let outcomes = self.clone();
            let outcome = rule.outcome;
            events.on_contains(rule.needle.clone(), move |line| {
                let seen = outcomes.publish(outcome);
                trace!(?outcome, seen, line, "action outcome");
            });
        }
    }
}
