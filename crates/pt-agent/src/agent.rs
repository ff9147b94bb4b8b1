//! The `Agent` facade.

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{info, warn};

use pt_behavior::{BehaviorContext, BehaviorKind, BehaviorRequest, BehaviorSlot, drive};
use pt_core::{Speed, TileCoord};
use pt_mobility::Body;
use pt_schedule::{EventProcessors, SchedulerHandle, TaskPool};
use pt_spatial::{GridRouter, Path, Router, SpatialResult};

use crate::{AgentObserver, AgentResult};

/// What [`Agent::toggle`] did.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Toggle {
    Started,
    Stopped,
}

/// One autonomous agent: path queries, one behaviour at a time, speed,
/// pause and shutdown.
///
/// Behaviours run as tasks on the agent's [`TaskPool`]; every method here
/// returns without waiting for them.
///
/// Create via [`AgentBuilder`][crate::AgentBuilder].
pub struct Agent<R: Router = GridRouter> {
    pub(crate) ctx:       Arc<BehaviorContext<R>>,
    pub(crate) slot:      Arc<BehaviorSlot>,
    pub(crate) pool:      TaskPool,
    pub(crate) scheduler: SchedulerHandle,
    pub(crate) events:    Arc<EventProcessors>,
    pub(crate) observer:  Arc<dyn AgentObserver>,
}

impl<R: Router + 'static> Agent<R> {
    // ── Paths ─────────────────────────────────────────────────────────────

    /// Search from the agent's current tile to `goal` against a freshly
    /// built cache.  Runs on the calling thread.
    pub fn find_path(&self, goal: TileCoord) -> SpatialResult<Path> {
        let start = self.ctx.engine.body().tile();
        self.ctx.engine.pathfinder().find_path(start, goal)
    }

    // ── Behaviours ────────────────────────────────────────────────────────

    /// Start a behaviour.
    ///
    /// # Errors
    ///
    /// - [`BehaviorError::Conflict`][pt_behavior::BehaviorError::Conflict]
    ///   if a behaviour is already active; it keeps running.
    /// - [`ScheduleError::PoolClosed`][pt_schedule::ScheduleError::PoolClosed]
    ///   after shutdown.
    pub fn start(&self, request: BehaviorRequest) -> AgentResult<()> {
        request.validate()?;
        let ticket = self.slot.try_start(request.kind())?;
        let kind = ticket.kind();
        info!(%request, generation = ticket.generation(), "starting behaviour");

        let run = drive(
            request.into_behavior(),
            Arc::clone(&self.ctx),
            Arc::clone(&self.slot),
            ticket.clone(),
        );
        let observer = Arc::clone(&self.observer);
        let submitted = self.pool.submit(kind.as_str(), async move {
            let end = run.await;
            observer.on_ended(kind, end);
        });
        if let Err(err) = submitted {
            self.slot.release(&ticket);
            return Err(err.into());
        }
        self.observer.on_started(kind);
        Ok(())
    }

    /// Stop the active behaviour.  It exits at its next checkpoint; the slot
    /// is free immediately.
    pub fn stop(&self) -> Option<BehaviorKind> {
        let stopped = self.slot.stop()?;
        info!(behavior = %stopped, "behaviour stopped");
        self.observer.on_stopped(stopped);
        Some(stopped)
    }

    /// Stop `request`'s behaviour if it is the active one, otherwise start it.
    pub fn toggle(&self, request: BehaviorRequest) -> AgentResult<Toggle> {
        if self.slot.active() == Some(request.kind()) && self.stop().is_some() {
            return Ok(Toggle::Stopped);
        }
        self.start(request).map(|()| Toggle::Started)
    }

    pub fn active_behavior(&self) -> Option<BehaviorKind> {
        self.slot.active()
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Change walking speed.  Applies to walks already in progress.
    pub fn set_speed_kmh(&self, kmh: f32) -> AgentResult<Speed> {
        let speed = Speed::from_kmh(kmh)?;
        self.ctx.engine.set_speed(speed);
        info!(%speed, mps = speed.metres_per_sec(), "speed set");
        Ok(speed)
    }

    pub fn speed(&self) -> Speed {
        self.ctx.engine.speed()
    }

    pub fn body(&self) -> &Arc<dyn Body> {
        self.ctx.engine.body()
    }

    pub fn pause(&self) {
        self.ctx.control.pause();
    }

    pub fn resume(&self) {
        self.ctx.control.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.ctx.control.is_paused()
    }

    // ── Events & scheduling ───────────────────────────────────────────────

    /// Feed one event line (chat, server message) to the event processors.
    /// Returns the number of handlers queued.
    pub fn notify_event(&self, line: &str) -> usize {
        self.events.notify(line)
    }

    pub fn events(&self) -> &EventProcessors {
        &self.events
    }

    /// Queue delayed or immediate callbacks on the agent's scheduler.
    pub fn scheduler(&self) -> &SchedulerHandle {
        &self.scheduler
    }

    /// The runtime behaviours run on.
    pub fn handle(&self) -> &Handle {
        self.pool.handle()
    }

    // ── Shutdown ──────────────────────────────────────────────────────────

    /// Exit: raise the exit flag, stop the active behaviour, and wait for
    /// pool tasks to drain.  Returns `false` if the drain timed out.
    pub async fn shutdown(&self) -> bool {
        if self.pool.is_closed() {
            return true;
        }
        self.ctx.control.begin_exit();
        self.stop();
        let drained = self.pool.shutdown().await;
        if !drained {
            warn!("agent shut down with tasks still running");
        }
        drained
    }
}

impl<R: Router> Drop for Agent<R> {
    fn drop(&mut self) {
        self.ctx.control.begin_exit();
        if let Some(kind) = self.slot.active() {
            warn!(behavior = %kind, "agent dropped with a behaviour active");
        }
        self.slot.stop();
    }
}
