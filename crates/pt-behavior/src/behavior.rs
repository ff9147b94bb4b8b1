//! The `Behavior` trait, the context every run shares, and the run driver.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rustc_hash::FxHashSet;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time::Instant;
use tracing::{info, trace};

use pt_core::EntityId;
use pt_mobility::{MovementEngine, WalkStatus};
use pt_schedule::{Checkpoint, Control, Interrupted};
use pt_spatial::{GridRouter, Router};

use crate::{
    ActionOutcome, BehaviorConfig, BehaviorKind, BehaviorSlot, Entity, Host, LogNotifier, Notice,
    Notifier, Outcomes, RunTicket,
};

/// A long-running, cancellable agent task.
///
/// `run` returns `Ok(())` when the behaviour has nothing left to do and
/// `Err(Interrupted)` when it was stopped or the agent is exiting.  Every
/// wait goes through `cp`.
#[async_trait]
pub trait Behavior<R: Router + 'static = GridRouter>: Send {
    fn kind(&self) -> BehaviorKind;

    async fn run(&mut self, ctx: &BehaviorContext<R>, cp: &Checkpoint) -> Result<(), Interrupted>;
}

/// Collaborators shared by every behaviour run of one agent.
pub struct BehaviorContext<R: Router = GridRouter> {
    pub engine:   Arc<MovementEngine<R>>,
    pub host:     Arc<dyn Host>,
    pub notifier: Arc<dyn Notifier>,
    pub outcomes: Outcomes,
    pub control:  Arc<Control>,
    pub config:   BehaviorConfig,
}

/// Result of closing in on a target.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Approach {
    InReach,
    /// The target is no longer reported by the host.
    Lost,
    NoPath,
}

impl<R: Router + 'static> BehaviorContext<R> {
    /// Context with a logging notifier, a fresh outcome channel and default
    /// tunables.
    pub fn new(engine: Arc<MovementEngine<R>>, host: Arc<dyn Host>, control: Arc<Control>) -> Self {
        Self {
            engine,
            host,
            notifier: Arc::new(LogNotifier),
            outcomes: Outcomes::default(),
            control,
            config: BehaviorConfig::default(),
        }
    }

    pub fn notify(&self, notice: Notice) {
        self.notifier.notify(&notice);
    }

    pub fn in_reach(&self, target: &Entity) -> bool {
        let reach = self.config.reach;
        self.engine.body().position().dist_sq(target.position) <= reach * reach
    }

    /// Wait until the host is idle with full stamina.
    pub(crate) async fn wait_idle(&self, cp: &Checkpoint) -> Result<(), Interrupted> {
        while self.host.is_busy() {
            cp.sleep(self.config.action_poll).await?;
        }
        cp.check()
    }

    /// Nearest eligible, non-ignored entity.  Polls until one shows up,
    /// announcing the first miss.
    pub(crate) async fn acquire<F>(
        &self,
        cp: &Checkpoint,
        kind: BehaviorKind,
        ignored: &FxHashSet<EntityId>,
        eligible: F,
    ) -> Result<Entity, Interrupted>
    where
        F: Fn(&Entity) -> bool + Sync,
    {
        let mut announced = false;
        loop {
            cp.wait_unpaused().await?;
            let from = self.engine.body().position();
            if let Some(target) = crate::targeting::nearest(self.host.nearby(), from, ignored, &eligible) {
                return Ok(target);
            }
            if !announced {
                self.notify(Notice::NoTargets { behavior: kind });
                announced = true;
            }
            cp.sleep(self.config.poll_interval).await?;
        }
    }

    /// Walk until `id` is within reach, re-pathing whenever it moves.
    pub(crate) async fn approach(&self, cp: &Checkpoint, id: EntityId) -> Result<Approach, Interrupted> {
        loop {
            cp.wait_unpaused().await?;
            let Some(target) = self.host.entity(id) else {
                return Ok(Approach::Lost);
            };
            if self.in_reach(&target) {
                return Ok(Approach::InReach);
            }
            match self.engine.walk_path(cp, || self.host.entity(id).map(|e| e.tile())).await {
                WalkStatus::NoPath      => return Ok(Approach::NoPath),
                WalkStatus::Interrupted => cp.check()?,
                WalkStatus::Complete    => {}
            }
        }
    }

    /// Wait for the outcome of an action.  `None` means the action timed
    /// out.
    pub(crate) async fn await_outcome(
        &self,
        cp: &Checkpoint,
        outcomes: &mut broadcast::Receiver<ActionOutcome>,
    ) -> Result<Option<ActionOutcome>, Interrupted> {
        let deadline = Instant::now() + self.config.action_timeout;
        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            let wait = self.config.action_poll.min(deadline - now);
            if let Some(outcome) = self.next_outcome(cp, outcomes, wait).await? {
                return Ok(Some(outcome));
            }
        }
    }

    /// One outcome published within `wait`, if any.
    pub(crate) async fn next_outcome(
        &self,
        cp: &Checkpoint,
        outcomes: &mut broadcast::Receiver<ActionOutcome>,
        wait: Duration,
    ) -> Result<Option<ActionOutcome>, Interrupted> {
        match cp.guard(tokio::time::timeout(wait, outcomes.recv())).await? {
            Ok(Ok(outcome)) => Ok(Some(outcome)),
            Ok(Err(RecvError::Lagged(skipped))) => {
                trace!(skipped, "outcome receiver lagged");
                Ok(None)
            }
            Ok(Err(RecvError::Closed)) => cp.sleep(wait).await.map(|()| None),
            Err(_elapsed) => Ok(None),
        }
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

/// How a behaviour run ended.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RunEnd {
    /// The behaviour ran out of work on its own.
    Finished,
    /// Stopped by the user or by agent shutdown.
    Stopped,
}

impl fmt::Display for RunEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunEnd::Finished => "finished",
            RunEnd::Stopped  => "stopped",
        })
    }
}

/// Releases the slot even if the behaviour panics.
struct Release<'a> {
    slot:   &'a BehaviorSlot,
    ticket: &'a RunTicket,
}

impl Drop for Release<'_> {
    fn drop(&mut self) {
        self.slot.release(self.ticket);
    }
}

/// Run `behavior` to completion under `ticket`, then free the slot if the
/// ticket still owns it.
pub async fn drive<R: Router + 'static>(
    mut behavior: Box<dyn Behavior<R>>,
    ctx: Arc<BehaviorContext<R>>,
    slot: Arc<BehaviorSlot>,
    ticket: RunTicket,
) -> RunEnd {
    let _release = Release { slot: &slot, ticket: &ticket };
    let cp = Checkpoint::new(Arc::clone(&ctx.control), ticket.run().clone());
    let kind = behavior.kind();
    info!(behavior = %kind, generation = ticket.generation(), "behaviour started");

    let end = match behavior.run(&ctx, &cp).await {
        Ok(())           => RunEnd::Finished,
        Err(Interrupted) => RunEnd::Stopped,
    };
    info!(behavior = %kind, generation = ticket.generation(), %end, "behaviour ended");
    end
}
