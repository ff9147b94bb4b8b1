use async_trait::async_trait;

use pt_core::TileCoord;
use pt_mobility::WalkStatus;
use pt_schedule::{Checkpoint, Interrupted};
use pt_spatial::Router;

use crate::{Behavior, BehaviorContext, BehaviorKind, Notice};

/// One walk to a fixed tile.
#[derive(Debug, Clone)]
pub struct WalkTo {
    goal: TileCoord,
}

impl WalkTo {
    pub fn new(goal: TileCoord) -> Self {
        Self { goal }
    }
}

#[async_trait]
impl<R: Router + 'static> Behavior<R> for WalkTo {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::WalkTo
    }

    async fn run(&mut self, ctx: &BehaviorContext<R>, cp: &Checkpoint) -> Result<(), Interrupted> {
        let goal = self.goal;
        ctx.notify(Notice::Pathfinding { goal });
        if ctx.engine.walk_path(cp, || Some(goal)).await != WalkStatus::Complete {
            cp.check()?;
            ctx.notify(Notice::WalkFailed { goal });
        }
        Ok(())
    }
}
