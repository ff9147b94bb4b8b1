use async_trait::async_trait;

use pt_mobility::WalkStatus;
use pt_schedule::{Checkpoint, Interrupted};
use pt_spatial::Router;

use crate::targeting::player_named;
use crate::{Behavior, BehaviorContext, BehaviorKind, Entity, Notice};

/// Keep walking to a player until stopped.
///
/// The player is looked up by name prefix every round, so following
/// resumes if they log out and back in.
#[derive(Debug, Clone)]
pub struct Follow {
    prefix: String,
}

impl Follow {
    pub fn new(prefix: impl AsRef<str>) -> Self {
        Self { prefix: prefix.as_ref().to_lowercase() }
    }

    async fn find<R: Router + 'static>(
        &self,
        ctx: &BehaviorContext<R>,
        cp: &Checkpoint,
    ) -> Result<Option<Entity>, Interrupted> {
        for _ in 0..ctx.config.follow_retries.max(1) {
            if let Some(player) = player_named(ctx.host.nearby(), &self.prefix) {
                return Ok(Some(player));
            }
            cp.sleep(ctx.config.poll_interval).await?;
        }
        Ok(None)
    }
}

#[async_trait]
impl<R: Router + 'static> Behavior<R> for Follow {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Follow
    }

    async fn run(&mut self, ctx: &BehaviorContext<R>, cp: &Checkpoint) -> Result<(), Interrupted> {
        loop {
            cp.wait_unpaused().await?;
            let Some(player) = self.find(ctx, cp).await? else {
                ctx.notify(Notice::PlayerNotFound { prefix: self.prefix.clone() });
                return Ok(());
            };

            let id = player.id;
            let goal = || ctx.host.entity(id).map(|e| e.tile());
            if goal() == Some(ctx.engine.body().tile()) {
                cp.sleep(ctx.config.poll_interval).await?;
                continue;
            }

            match ctx.engine.walk_path(cp, goal).await {
                WalkStatus::Complete    => {}
                WalkStatus::Interrupted => cp.check()?,
                WalkStatus::NoPath      => {
                    ctx.notify(Notice::NoPathTo { name: player.name });
                    cp.sleep(ctx.config.no_path_cooldown).await?;
                }
            }
        }
    }
}
