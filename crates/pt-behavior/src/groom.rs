use async_trait::async_trait;
use rustc_hash::FxHashSet;
use tracing::debug;

use pt_core::EntityId;
use pt_schedule::{Checkpoint, Interrupted};
use pt_spatial::Router;

use crate::behavior::Approach;
use crate::targeting::can_groom;
use crate::{ActionKind, Behavior, BehaviorContext, BehaviorKind, Notice, ToolKind};

/// Groom every groomable creature in range once.
///
/// Each creature joins the ignore set after its attempt, whatever the
/// outcome.
#[derive(Debug, Default)]
pub struct Groom {
    ignored: FxHashSet<EntityId>,
}

impl Groom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignored(&self) -> &FxHashSet<EntityId> {
        &self.ignored
    }
}

#[async_trait]
impl<R: Router + 'static> Behavior<R> for Groom {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Groom
    }

    async fn run(&mut self, ctx: &BehaviorContext<R>, cp: &Checkpoint) -> Result<(), Interrupted> {
        if !ctx.host.has_tool(ToolKind::GroomingBrush) {
            ctx.notify(Notice::MissingTool(ToolKind::GroomingBrush));
            return Ok(());
        }

        loop {
            cp.wait_unpaused().await?;
            let target = ctx.acquire(cp, BehaviorKind::Groom, &self.ignored, can_groom).await?;
            let id = target.id;

            match ctx.approach(cp, id).await? {
                Approach::InReach => {}
                Approach::Lost => continue,
                Approach::NoPath => {
                    debug!(entity = %id, "no path to target; ignoring it");
                    self.ignored.insert(id);
                    ctx.host.perform(ActionKind::Untarget, None).await;
                    continue;
                }
            }

            ctx.wait_idle(cp).await?;
            let mut outcomes = ctx.outcomes.subscribe();
            ctx.host.perform(ActionKind::Groom, Some(id)).await;
            ctx.notify(Notice::Grooming { name: target.name });
            let outcome = ctx.await_outcome(cp, &mut outcomes).await?;
            debug!(entity = %id, ?outcome, "groom attempt settled");
            self.ignored.insert(id);
            ctx.wait_idle(cp).await?;
        }
    }
}
