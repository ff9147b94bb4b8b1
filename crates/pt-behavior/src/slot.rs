//! The single behaviour slot of one agent.

use std::sync::Mutex;

use tracing::debug;

use pt_schedule::RunFlag;

use crate::{BehaviorError, BehaviorKind, BehaviorResult};

/// Ownership token of one behaviour run.
///
/// The generation tells runs apart: a run that ends after being stopped and
/// replaced must not release its successor.
#[derive(Debug, Clone)]
pub struct RunTicket {
    kind:       BehaviorKind,
    generation: u64,
    run:        RunFlag,
}

impl RunTicket {
    pub fn kind(&self) -> BehaviorKind {
        self.kind
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn run(&self) -> &RunFlag {
        &self.run
    }
}

#[derive(Debug, Default)]
struct SlotState {
    active:          Option<RunTicket>,
    next_generation: u64,
}

/// Holds at most one active behaviour.
///
/// `stop` frees the slot at once and clears the run's flag; the run itself
/// winds down at its next checkpoint.  A new behaviour may start in the
/// meantime.
#[derive(Debug, Default)]
pub struct BehaviorSlot {
    state: Mutex<SlotState>,
}

impl BehaviorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Claim the slot for `kind`.
    ///
    /// # Errors
    ///
    /// [`BehaviorError::Conflict`] if any behaviour is active.  The active
    /// run is left untouched.
    pub fn try_start(&self, kind: BehaviorKind) -> BehaviorResult<RunTicket> {
        let mut state = self.lock();
        if let Some(active) = &state.active {
            return Err(BehaviorError::Conflict { active: active.kind, requested: kind });
        }
        state.next_generation += 1;
        let ticket = RunTicket {
            kind,
            generation: state.next_generation,
            run: RunFlag::new(),
        };
        state.active = Some(ticket.clone());
        debug!(behavior = %kind, generation = ticket.generation, "slot claimed");
        Ok(ticket)
    }

    /// Stop the active behaviour, if any, and return its kind.
    pub fn stop(&self) -> Option<BehaviorKind> {
        let ticket = self.lock().active.take()?;
        ticket.run.stop();
        debug!(behavior = %ticket.kind, generation = ticket.generation, "slot stopped");
        Some(ticket.kind)
    }

    /// Free the slot if `ticket` still owns it.  Returns `true` if it did.
    pub fn release(&self, ticket: &RunTicket) -> bool {
        let mut state = self.lock();
        let owned = state.active.as_ref().is_some_and(|a| a.generation == ticket.generation);
        if owned {
            state.active = None;
        }
        owned
    }

    pub fn active(&self) -> Option<BehaviorKind> {
        self.lock().active.as_ref().map(|a| a.kind)
    }
}
