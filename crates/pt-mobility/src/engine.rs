//! Path walking: turns a tile sequence into timed position updates.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use tracing::{debug, warn};

use pt_core::{Speed, TickRate, TileCoord};
use pt_schedule::{Checkpoint, Interrupted};
use pt_spatial::{GridRouter, Path, Pathfinder, Router, SpatialError};

use crate::{Body, MobilityError, MobilityResult, MovementConfig, WalkStatus};

/// Walks one agent's body along searched paths.
///
/// # Type parameter
///
/// `R` is the [`Router`] inside the shared [`Pathfinder`]; defaults to
/// [`GridRouter`].
///
/// Speed is stored as `f32` bits in an atomic so a speed change reaches a
/// walk already in progress on its next tick.
pub struct MovementEngine<R: Router = GridRouter> {
    pathfinder: Arc<Pathfinder<R>>,
    body:       Arc<dyn Body>,
    tick:       TickRate,
    speed_kmh:  AtomicU32,
}

impl<R: Router + 'static> MovementEngine<R> {
    pub fn new(
        pathfinder: Arc<Pathfinder<R>>,
        body: Arc<dyn Body>,
        config: &MovementConfig,
    ) -> MobilityResult<Self> {
        let tick = TickRate::new(config.tick)?;
        let speed = Speed::from_kmh(config.speed_kmh)?;
        Ok(Self {
            pathfinder,
            body,
            tick,
            speed_kmh: AtomicU32::new(speed.kmh().to_bits()),
        })
    }

    pub fn body(&self) -> &Arc<dyn Body> {
        &self.body
    }

    pub fn pathfinder(&self) -> &Arc<Pathfinder<R>> {
        &self.pathfinder
    }

    pub fn tick(&self) -> TickRate {
        self.tick
    }

    pub fn speed(&self) -> Speed {
        Speed::from_kmh(f32::from_bits(self.speed_kmh.load(Ordering::Relaxed)))
            .unwrap_or_default()
    }

    pub fn set_speed(&self, speed: Speed) {
        self.speed_kmh.store(speed.kmh().to_bits(), Ordering::Relaxed);
        debug!(%speed, "walking speed changed");
    }

    /// Search from the body's current tile to `goal` on the blocking pool.
    pub async fn find_path(&self, goal: TileCoord) -> MobilityResult<Path> {
        let start = self.body.tile();
        let pathfinder = Arc::clone(&self.pathfinder);
        tokio::task::spawn_blocking(move || pathfinder.find_path(start, goal))
            .await
            .map_err(|err| MobilityError::SearchTask(err.to_string()))?
            .map_err(MobilityError::from)
    }

    /// Walk in a straight line to the centre of `to`.
    ///
    /// Snaps to the centre of the current tile first, then advances
    /// `speed × tick` metres per tick until the remaining distance is zero.
    pub async fn walk_line(&self, cp: &Checkpoint, to: TileCoord) -> WalkStatus {
        match self.step_line(cp, to).await {
            Ok(()) => WalkStatus::Complete,
            Err(Interrupted) => WalkStatus::Interrupted,
        }
    }

    async fn step_line(&self, cp: &Checkpoint, to: TileCoord) -> Result<(), Interrupted> {
        let mut pos = self.body.tile().center();
        self.body.set_position(pos);
        let target = to.center();

        while pos != target {
            cp.wait_unpaused().await?;
            let step = self.speed().per_tick(self.tick.duration());
            pos = pos.step_towards(target, step);
            self.body.set_position(pos);
            cp.sleep(self.tick.duration()).await?;
        }
        Ok(())
    }

    /// Search and walk to the tile `goal` reports, facing the direction of
    /// travel before each leg.
    ///
    /// `goal` is re-read after every leg.  If it reports a different tile
    /// (or nothing), the walk stops with `Interrupted` so the caller can
    /// re-path instead of finishing a stale route.
    pub async fn walk_path<G>(&self, cp: &Checkpoint, goal: G) -> WalkStatus
    where
        G: Fn() -> Option<TileCoord>,
    {
        if cp.check().is_err() {
            return WalkStatus::Interrupted;
        }
        let Some(goal_tile) = goal() else {
            return WalkStatus::Interrupted;
        };

        let path = match cp.guard(self.find_path(goal_tile)).await {
            Err(Interrupted) => return WalkStatus::Interrupted,
            Ok(Ok(path)) => path,
            Ok(Err(MobilityError::Routing(SpatialError::NoPath { visited, .. }))) => {
                debug!(goal = %goal_tile, visited, "no path");
                return WalkStatus::NoPath;
            }
            Ok(Err(err)) => {
                warn!(goal = %goal_tile, %err, "path search failed");
                return WalkStatus::NoPath;
            }
        };

        for (from, to) in path.legs() {
            if let Some(yaw) = from.step_to(to).yaw() {
                self.body.set_orientation(yaw, None);
            }
            if self.walk_line(cp, to).await == WalkStatus::Interrupted {
                return WalkStatus::Interrupted;
            }
            if goal() != Some(goal_tile) {
                debug!(goal = %goal_tile, "goal moved; abandoning path");
                return WalkStatus::Interrupted;
            }
        }
        WalkStatus::Complete
    }
}
