use async_trait::async_trait;
use rustc_hash::FxHashSet;
use tokio::sync::broadcast;
use tracing::{debug, trace};

use pt_core::EntityId;
use pt_schedule::{Checkpoint, Interrupted};
use pt_spatial::Router;

use crate::behavior::Approach;
use crate::targeting::can_engage;
use crate::{ActionKind, ActionOutcome, Behavior, BehaviorContext, BehaviorKind, Notice};

/// How a fight ended.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Fight {
    /// The creature is gone.
    Over,
    /// An attack failed or the creature fled out of any route.
    Abandoned,
}

/// Attack the nearest wild creature, one after another.
///
/// A fight lasts while the host still reports the creature.  Creatures that
/// cannot be reached or report a failed attack are ignored for the rest of
/// the run.
#[derive(Debug, Default)]
pub struct Engage {
    ignored: FxHashSet<EntityId>,
}

impl Engage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignored(&self) -> &FxHashSet<EntityId> {
        &self.ignored
    }

    /// Stay on `id` while the host still reports it, chasing it whenever it
    /// moves out of reach.  Only a failed attack or a lost route ends the
    /// fight early.
    async fn fight<R: Router + 'static>(
        &self,
        ctx: &BehaviorContext<R>,
        cp: &Checkpoint,
        outcomes: &mut broadcast::Receiver<ActionOutcome>,
        id: EntityId,
    ) -> Result<Fight, Interrupted> {
        loop {
            if ctx.host.entity(id).is_none() {
                return Ok(Fight::Over);
            }
            if ctx.next_outcome(cp, outcomes, ctx.config.action_poll).await?
                == Some(ActionOutcome::Failed)
            {
                return Ok(Fight::Abandoned);
            }
            let Some(target) = ctx.host.entity(id) else {
                return Ok(Fight::Over);
            };
            if ctx.in_reach(&target) {
                continue;
            }

            trace!(entity = %id, "target moved away; chasing");
            match ctx.approach(cp, id).await? {
                Approach::InReach => {
                    ctx.wait_idle(cp).await?;
                    ctx.host.perform(ActionKind::Engage, Some(id)).await;
                }
                Approach::Lost => return Ok(Fight::Over),
                Approach::NoPath => return Ok(Fight::Abandoned),
            }
        }
    }

    async fn give_up<R: Router + 'static>(&mut self, ctx: &BehaviorContext<R>, id: EntityId) {
        self.ignored.insert(id);
        ctx.host.perform(ActionKind::Untarget, None).await;
    }
}

#[async_trait]
impl<R: Router + 'static> Behavior<R> for Engage {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Engage
    }

    async fn run(&mut self, ctx: &BehaviorContext<R>, cp: &Checkpoint) -> Result<(), Interrupted> {
        loop {
            cp.wait_unpaused().await?;
            ctx.wait_idle(cp).await?;
            let target = ctx.acquire(cp, BehaviorKind::Engage, &self.ignored, can_engage).await?;
            let id = target.id;

            ctx.host.perform(ActionKind::Target, Some(id)).await;
            ctx.notify(Notice::Engaging { name: target.name });

            match ctx.approach(cp, id).await? {
                Approach::InReach => {}
                Approach::Lost => continue,
                Approach::NoPath => {
                    debug!(entity = %id, "no path to target; ignoring it");
                    self.give_up(ctx, id).await;
                    continue;
                }
            }

            ctx.wait_idle(cp).await?;
            let mut outcomes = ctx.outcomes.subscribe();
            ctx.host.perform(ActionKind::Engage, Some(id)).await;
            match self.fight(ctx, cp, &mut outcomes, id).await? {
                Fight::Over => debug!(entity = %id, "target down"),
                Fight::Abandoned => {
                    debug!(entity = %id, "engage failed; ignoring target");
                    self.give_up(ctx, id).await;
                }
            }
        }
    }
}
