//! Fluent builder for constructing an [`Agent`].

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::debug;

use pt_behavior::{BehaviorContext, BehaviorSlot, Host, LogNotifier, Notifier, Outcomes};
use pt_mobility::{Body, MovementEngine};
use pt_schedule::{Control, EventProcessors, Scheduler, TaskPool};
use pt_spatial::{GridRouter, Pathfinder, Router, StructureSource, Terrain};

use crate::{Agent, AgentConfig, AgentObserver, AgentResult, NoopObserver};

/// Fluent builder for [`Agent<R>`].
///
/// # Required inputs
///
/// - [`Terrain`] and [`StructureSource`]: the world the cache is built from
/// - [`Body`]: the agent's position and orientation actuator
/// - [`Host`]: entity queries and action dispatch
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                                   |
/// |------------------|-------------------------------------------|
/// | `.config(c)`     | `AgentConfig::default()`                  |
/// | `.router(r)`     | `GridRouter`                              |
/// | `.notifier(n)`   | `LogNotifier` (notices logged at `info`)  |
/// | `.observer(o)`   | `NoopObserver`                            |
/// | `.runtime(h)`    | a dedicated runtime per `config.pool`     |
///
/// # Example
///
/// ```rust,ignore
/// let agent = AgentBuilder::new(terrain, structures, body, host)
///     .config(AgentConfig::from_json_str(&json)?)
///     .build()?;
/// agent.start(BehaviorRequest::WalkTo(TileCoord::new(40, 12)))?;
/// ```
pub struct AgentBuilder<R: Router = GridRouter> {
    terrain:    Arc<dyn Terrain>,
    structures: Arc<dyn StructureSource>,
    body:       Arc<dyn Body>,
    host:       Arc<dyn Host>,
    config:     AgentConfig,
    router:     R,
    notifier:   Arc<dyn Notifier>,
    observer:   Arc<dyn AgentObserver>,
    runtime:    Option<Handle>,
}

impl AgentBuilder<GridRouter> {
    /// Create a builder with all required inputs.
    pub fn new(
        terrain:    Arc<dyn Terrain>,
        structures: Arc<dyn StructureSource>,
        body:       Arc<dyn Body>,
        host:       Arc<dyn Host>,
    ) -> Self {
        Self {
            terrain,
            structures,
            body,
            host,
            config:   AgentConfig::default(),
            router:   GridRouter,
            notifier: Arc::new(LogNotifier),
            observer: Arc::new(NoopObserver),
            runtime:  None,
        }
    }
}

impl<R: Router + 'static> AgentBuilder<R> {
    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// Swap the search algorithm.
    pub fn router<R2: Router + 'static>(self, router: R2) -> AgentBuilder<R2> {
        AgentBuilder {
            terrain:    self.terrain,
            structures: self.structures,
            body:       self.body,
            host:       self.host,
            config:     self.config,
            router,
            notifier:   self.notifier,
            observer:   self.observer,
            runtime:    self.runtime,
        }
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn observer(mut self, observer: Arc<dyn AgentObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Run behaviours on an existing runtime instead of starting one.
    /// `config.pool.worker_threads` and `thread_name` are then ignored.
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Validate the config, start the task pool and the scheduler loop, and
    /// return a ready agent.
    pub fn build(self) -> AgentResult<Agent<R>> {
        self.config.validate()?;
        let AgentConfig { cache, pool, movement, behavior } = self.config;

        // ── Movement ──────────────────────────────────────────────────────
        let pathfinder = Arc::new(Pathfinder::with_router(
            self.router,
            self.terrain,
            self.structures,
            cache,
        ));
        let engine = Arc::new(MovementEngine::new(pathfinder, self.body, &movement)?);

        // ── Pool, scheduler, event processors ─────────────────────────────
        let pool = match self.runtime {
            Some(handle) => TaskPool::with_handle(handle, pool),
            None => TaskPool::new(pool)?,
        };
        let control = Arc::new(Control::new());
        let (scheduler, handle) = Scheduler::new(Arc::clone(&control));
        pool.submit("scheduler", scheduler.run())?;
        let events = Arc::new(EventProcessors::new(handle.clone()));

        let outcomes = Outcomes::default();
        outcomes.install(&events, &behavior.outcome_rules);
        debug!(rules = behavior.outcome_rules.len(), "outcome rules installed");

        let ctx = BehaviorContext {
            engine,
            host: self.host,
            notifier: self.notifier,
            outcomes,
            control,
            config: behavior,
        };

        Ok(Agent {
            ctx:       Arc::new(ctx),
            slot:      Arc::new(BehaviorSlot::new()),
            pool,
            scheduler: handle,
            events,
            observer:  self.observer,
        })
    }
}
