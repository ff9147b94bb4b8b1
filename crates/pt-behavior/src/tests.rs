//! Unit tests for pt-behavior.
//!
//! Behaviour runs use a real movement engine on a small flat grid with a
//! 1 ms tick, and a scripted host whose creatures react to actions.

#[cfg(test)]
mod helpers {
    use std::future::Future;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex, OnceLock};
    use std::time::Duration;

    use async_trait::async_trait;
    use rustc_hash::FxHashMap;
    use tokio::task::JoinHandle;

    use pt_core::{EntityId, TileCoord, WorldPos};
    use pt_mobility::{MovementConfig, MovementEngine, SimBody};
    use pt_schedule::{Control, EventProcessors, Scheduler};
    use pt_spatial::{CacheConfig, GridTerrain, Pathfinder, Structure};

    use crate::{
        ActionKind, ActionOutcome, BehaviorConfig, BehaviorContext, BehaviorRequest,
        BehaviorResult, BehaviorSlot, Entity, Host, NoticeLog, Outcomes, RunEnd, ToolKind, drive,
    };

    pub fn t(x: i32, y: i32) -> TileCoord {
        TileCoord::new(x, y)
    }

    /// Short waits everywhere so runs settle in milliseconds.
    pub fn quick() -> BehaviorConfig {
        BehaviorConfig {
            poll_interval:    Duration::from_millis(5),
            follow_retries:   3,
            no_path_cooldown: Duration::from_millis(20),
            action_poll:      Duration::from_millis(5),
            action_timeout:   Duration::from_millis(200),
            ..BehaviorConfig::default()
        }
    }

    /// What a creature does when an engage or groom action hits it.
    #[derive(Debug, Clone)]
    pub enum Reaction {
        Nothing,
        Vanish,
        Say(&'static str),
        Publish(ActionOutcome),
    }

    #[derive(Default)]
    pub struct MockHost {
        entities:  Mutex<Vec<Entity>>,
        reactions: Mutex<FxHashMap<EntityId, Reaction>>,
        actions:   Mutex<Vec<(ActionKind, Option<EntityId>)>>,
        busy:      AtomicBool,
        brush:     AtomicBool,
        events:    OnceLock<Arc<EventProcessors>>,
        outcomes:  OnceLock<Outcomes>,
    }

    impl MockHost {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add(&self, entity: Entity, reaction: Reaction) {
            self.reactions.lock().unwrap().insert(entity.id, reaction);
            self.entities.lock().unwrap().push(entity);
        }

        pub fn remove(&self, id: EntityId) {
            self.entities.lock().unwrap().retain(|e| e.id != id);
        }

        pub fn relocate(&self, id: EntityId, tile: TileCoord) {
            for entity in self.entities.lock().unwrap().iter_mut().filter(|e| e.id == id) {
                entity.position = tile.center();
            }
        }

        pub fn set_busy(&self, busy: bool) {
            self.busy.store(busy, Ordering::SeqCst);
        }

        pub fn give_brush(&self) {
            self.brush.store(true, Ordering::SeqCst);
        }

        pub fn actions(&self) -> Vec<(ActionKind, Option<EntityId>)> {
            self.actions.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Host for MockHost {
        fn nearby(&self) -> Vec<Entity> {
            self.entities.lock().unwrap().clone()
        }

        fn is_busy(&self) -> bool {
            self.busy.load(Ordering::SeqCst)
        }

        fn has_tool(&self, tool: ToolKind) -> bool {
            match tool {
                ToolKind::GroomingBrush => self.brush.load(Ordering::SeqCst),
            }
        }

        async fn perform(&self, action: ActionKind, target: Option<EntityId>) {
            self.actions.lock().unwrap().push((action, target));
            if !matches!(action, ActionKind::Engage | ActionKind::Groom) {
                return;
            }
            let Some(id) = target else { return };
            let reaction = self.reactions.lock().unwrap().get(&id).cloned();
            match reaction {
                Some(Reaction::Vanish) => self.remove(id),
                Some(Reaction::Say(line)) => {
                    self.events.get().expect("events wired").notify(line);
                }
                Some(Reaction::Publish(outcome)) => {
                    self.outcomes.get().expect("outcomes wired").publish(outcome);
                }
                Some(Reaction::Nothing) | None => {}
            }
        }
    }

    pub struct Rig {
        pub ctx:     Arc<BehaviorContext>,
        pub host:    Arc<MockHost>,
        pub body:    Arc<SimBody>,
        pub notices: Arc<NoticeLog>,
        pub slot:    Arc<BehaviorSlot>,
    }

    impl Rig {
        pub fn start(&self, request: BehaviorRequest) -> BehaviorResult<JoinHandle<RunEnd>> {
            request.validate()?;
            let ticket = self.slot.try_start(request.kind())?;
            let run = drive(request.into_behavior(), self.ctx.clone(), self.slot.clone(), ticket);
            Ok(tokio::spawn(run))
        }
    }

    /// Must be called inside a runtime: spawns the scheduler loop that
    /// delivers event text.
    pub fn rig(terrain: GridTerrain, start: TileCoord, host: MockHost, config: BehaviorConfig) -> Rig {
        let control = Arc::new(Control::new());
        let (scheduler, handle) = Scheduler::new(control.clone());
        tokio::spawn(scheduler.run());
        let events = Arc::new(EventProcessors::new(handle));

        let pathfinder = Arc::new(Pathfinder::new(
            Arc::new(terrain),
            Arc::new(Vec::<Structure>::new()),
            CacheConfig { side: 32, ..CacheConfig::default() },
        ));
        let body = Arc::new(SimBody::at_tile(start));
        let movement = MovementConfig { tick: Duration::from_millis(1), speed_kmh: 3600.0 };
        let engine = Arc::new(MovementEngine::new(pathfinder, body.clone(), &movement).unwrap());

        let host = Arc::new(host);
        let notices = Arc::new(NoticeLog::new());
        let outcomes = Outcomes::default();
        outcomes.install(&events, &config.outcome_rules);
        let _ = host.events.set(events);
        let _ = host.outcomes.set(outcomes.clone());

        let ctx = BehaviorContext {
            notifier: notices.clone(),
            outcomes,
            config,
            ..BehaviorContext::new(engine, host.clone(), control)
        };
        Rig { ctx: Arc::new(ctx), host, body, notices, slot: Arc::new(BehaviorSlot::new()) }
    }

    pub fn creature(id: u64, tile: TileCoord) -> Entity {
        Entity::creature(EntityId(id), format!("creature {id}"), tile.center())
    }

    pub fn horse(id: u64, tile: TileCoord) -> Entity {
        Entity { groomable: true, ..Entity::creature(EntityId(id), format!("horse {id}"), tile.center()) }
    }

    pub fn at(pos: (f32, f32)) -> WorldPos {
        WorldPos::new(pos.0, pos.1)
    }

    /// Poll `cond` every 2 ms for up to 3 s.
    pub async fn until<F: Fn() -> bool>(what: &str, cond: F) {
        for _ in 0..1500 {
            if cond() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("timed out waiting for {what}");
    }

    pub async fn join<F: Future>(run: F) -> F::Output {
        tokio::time::timeout(Duration::from_secs(3), run).await.expect("run did not end")
    }
}

// ── Targeting ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod targeting {
    use rustc_hash::FxHashSet;

    use pt_core::EntityId;

    use super::helpers::{at, creature, t};
    use crate::Entity;
    use crate::targeting::{can_groom, is_pet, is_wild, nearest, player_named};

    #[test]
    fn pet_suffix() {
        assert!(is_pet("Rex, Bob's pet"));
        assert!(is_pet("old dog - ALICE'S PET"));
        assert!(!is_pet("'s pet"));
        assert!(!is_pet("a pet"));
        assert!(!is_pet("Bob's pet rock"));
        assert!(is_pet("hen, farmer_2's pet"));
        assert!(!is_pet("wolf, Zoë's pet"));
    }

    #[test]
    fn only_wild_creatures_are_eligible() {
        let wild = creature(1, t(0, 0));
        assert!(is_wild(&wild));

        let cases = [
            Entity { item: true, ..wild.clone() },
            Entity { player: true, ..wild.clone() },
            Entity { kingdom: 3, ..wild.clone() },
            Entity { controlled: true, ..wild.clone() },
            Entity { name: "preserved wolf".into(), ..wild.clone() },
            Entity { hover_text: "wolf, Bob's pet".into(), ..wild.clone() },
        ];
        for case in &cases {
            assert!(!is_wild(case), "{case:?}");
        }
        assert!(!can_groom(&wild));
        assert!(can_groom(&Entity { groomable: true, ..wild }));
    }

    #[test]
    fn nearest_skips_ignored() {
        let from = at((2.0, 2.0));
        let entities = vec![creature(1, t(5, 0)), creature(2, t(1, 0)), creature(3, t(3, 0))];
        let mut ignored = FxHashSet::default();
        assert_eq!(nearest(entities.clone(), from, &ignored, is_wild).unwrap().id, EntityId(2));

        ignored.insert(EntityId(2));
        assert_eq!(nearest(entities.clone(), from, &ignored, is_wild).unwrap().id, EntityId(3));

        ignored.extend([EntityId(1), EntityId(3)]);
        assert!(nearest(entities, from, &ignored, is_wild).is_none());
    }

    #[test]
    fn player_prefix_ignores_case() {
        let entities = vec![
            creature(1, t(0, 0)),
            Entity::player(EntityId(2), "Bobby", at((0.0, 0.0))),
            Entity::player(EntityId(3), "Alice", at((0.0, 0.0))),
        ];
        assert_eq!(player_named(entities.clone(), "bob").unwrap().id, EntityId(2));
        assert_eq!(player_named(entities.clone(), "ALI").unwrap().id, EntityId(3));
        assert!(player_named(entities, "creature").is_none());
    }
}

// ── Slot ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod slot {
    use crate::{BehaviorError, BehaviorKind, BehaviorSlot};

    #[test]
    fn second_start_is_rejected() {
        let slot = BehaviorSlot::new();
        let first = slot.try_start(BehaviorKind::Follow).unwrap();

        for requested in [BehaviorKind::Groom, BehaviorKind::Follow] {
            assert_eq!(
                slot.try_start(requested).unwrap_err(),
                BehaviorError::Conflict { active: BehaviorKind::Follow, requested },
            );
        }
        assert_eq!(slot.active(), Some(BehaviorKind::Follow));
        assert!(first.run().is_active());
    }

    #[test]
    fn stop_frees_the_slot_and_clears_the_flag() {
        let slot = BehaviorSlot::new();
        let ticket = slot.try_start(BehaviorKind::Engage).unwrap();
        assert_eq!(slot.stop(), Some(BehaviorKind::Engage));
        assert!(!ticket.run().is_active());
        assert_eq!(slot.active(), None);
        assert_eq!(slot.stop(), None);
    }

    #[test]
    fn stale_run_does_not_release_its_successor() {
        let slot = BehaviorSlot::new();
        let old = slot.try_start(BehaviorKind::Engage).unwrap();
        slot.stop();
        let new = slot.try_start(BehaviorKind::Groom).unwrap();
        assert!(new.generation() > old.generation());

        assert!(!slot.release(&old));
        assert_eq!(slot.active(), Some(BehaviorKind::Groom));
        assert!(slot.release(&new));
        assert_eq!(slot.active(), None);
    }
}

// ── Requests & notices ────────────────────────────────────────────────────────

#[cfg(test)]
mod messages {
    use super::helpers::t;
    use crate::{BehaviorError, BehaviorKind, BehaviorRequest, Notice, ToolKind};

    #[test]
    fn request_kinds_and_validation() {
        assert_eq!(BehaviorRequest::WalkTo(t(1, 2)).kind(), BehaviorKind::WalkTo);
        assert_eq!(BehaviorRequest::Follow("bob".into()).to_string(), "follow `bob`");
        assert_eq!(BehaviorRequest::Groom.to_string(), "groom");
        assert!(matches!(
            BehaviorRequest::Follow("  ".into()).validate(),
            Err(BehaviorError::InvalidRequest(_))
        ));
    }

    #[test]
    fn notice_text() {
        assert_eq!(
            Notice::NoTargets { behavior: BehaviorKind::Groom }.to_string(),
            "Can't find any creatures to groom"
        );
        assert_eq!(
            Notice::NoTargets { behavior: BehaviorKind::Engage }.to_string(),
            "Can't find any creatures to target"
        );
        assert_eq!(
            Notice::MissingTool(ToolKind::GroomingBrush).to_string(),
            "Cannot groom without a brush!"
        );
        assert_eq!(
            Notice::PlayerNotFound { prefix: "bob".into() }.to_string(),
            "Couldn't find any players with name `bob`"
        );
    }
}

// ── Outcomes ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod outcomes {
    use std::sync::Arc;
    use std::time::Duration;

    use pt_schedule::{Control, EventProcessors, Scheduler};

    use crate::{ActionOutcome, OutcomeRule, Outcomes};

    #[tokio::test]
    async fn event_text_reaches_subscribers() {
        let (scheduler, handle) = Scheduler::new(Arc::new(Control::new()));
        tokio::spawn(scheduler.run());
        let events = EventProcessors::new(handle);
        let outcomes = Outcomes::default();
        outcomes.install(&events, &OutcomeRule::grooming());
        assert_eq!(events.len(), 3);

        let mut rx = outcomes.subscribe();
        assert_eq!(events.notify("You see a horse."), 0);
        assert_eq!(events.notify("That would be illegal here."), 1);
        assert_eq!(events.notify("The horse is already well tended."), 1);

        let first = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await.unwrap().unwrap();
        let second = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await.unwrap().unwrap();
        assert_eq!((first, second), (ActionOutcome::Failed, ActionOutcome::Succeeded));
    }

    #[test]
    fn publish_without_subscribers_is_dropped() {
        assert_eq!(Outcomes::new(4).publish(ActionOutcome::Succeeded), 0);
    }
}

// ── Walk-to & follow ──────────────────────────────────────────────────────────

#[cfg(test)]
mod walking {
    use std::time::Duration;

    use pt_core::EntityId;
    use pt_mobility::Body;
    use pt_spatial::{GridTerrain, TileKind};

    use super::helpers::{MockHost, Reaction, at, join, quick, rig, t, until};
    use crate::{BehaviorRequest, Entity, Notice, RunEnd};

    #[tokio::test]
    async fn walk_to_arrives_and_frees_the_slot() {
        let rig = rig(GridTerrain::flat(t(0, 0), 12, 12), t(0, 0), MockHost::new(), quick());
        let run = rig.start(BehaviorRequest::WalkTo(t(5, 3))).unwrap();

        assert_eq!(join(run).await.unwrap(), RunEnd::Finished);
        assert_eq!(rig.body.tile(), t(5, 3));
        assert_eq!(rig.slot.active(), None);
        assert_eq!(rig.notices.notices(), vec![Notice::Pathfinding { goal: t(5, 3) }]);
    }

    #[tokio::test]
    async fn walk_to_unreachable_reports_failure() {
        let mut terrain = GridTerrain::flat(t(0, 0), 12, 12);
        for y in 0..12 {
            terrain.set_kind(t(6, y), TileKind::Lava);
        }
        let rig = rig(terrain, t(1, 1), MockHost::new(), quick());
        let run = rig.start(BehaviorRequest::WalkTo(t(9, 1))).unwrap();

        assert_eq!(join(run).await.unwrap(), RunEnd::Finished);
        assert!(rig.notices.contains(&Notice::WalkFailed { goal: t(9, 1) }));
        assert_eq!(rig.body.tile(), t(1, 1));
    }

    #[tokio::test]
    async fn follow_gives_up_on_a_missing_player() {
        let rig = rig(GridTerrain::flat(t(0, 0), 8, 8), t(0, 0), MockHost::new(), quick());
        let run = rig.start(BehaviorRequest::Follow("Bob".into())).unwrap();

        assert_eq!(join(run).await.unwrap(), RunEnd::Finished);
        assert_eq!(rig.notices.notices(), vec![Notice::PlayerNotFound { prefix: "bob".into() }]);
    }

    #[tokio::test]
    async fn follow_tracks_a_moving_player_until_stopped() {
        let host = MockHost::new();
        host.add(Entity::player(EntityId(7), "Bobby", t(6, 2).center()), Reaction::Nothing);
        let rig = rig(GridTerrain::flat(t(0, 0), 12, 12), t(0, 0), host, quick());
        let run = rig.start(BehaviorRequest::Follow("bob".into())).unwrap();

        until("agent reaches player", || rig.body.tile() == t(6, 2)).await;

        rig.host.remove(EntityId(7));
        rig.host.add(Entity::player(EntityId(7), "Bobby", t(2, 8).center()), Reaction::Nothing);
        until("agent follows the move", || rig.body.tile() == t(2, 8)).await;

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!run.is_finished(), "following idles next to the player");
        rig.slot.stop();
        assert_eq!(join(run).await.unwrap(), RunEnd::Stopped);
    }

    #[tokio::test]
    async fn follow_cools_down_when_unreachable() {
        let mut terrain = GridTerrain::flat(t(0, 0), 12, 12);
        for y in 0..12 {
            terrain.set_kind(t(5, y), TileKind::Lava);
        }
        let host = MockHost::new();
        host.add(Entity::player(EntityId(7), "Bob", at((34.0, 6.0))), Reaction::Nothing);
        let rig = rig(terrain, t(1, 1), host, quick());
        let run = rig.start(BehaviorRequest::Follow("bob".into())).unwrap();

        until("no-path notice", || rig.notices.contains(&Notice::NoPathTo { name: "Bob".into() }))
            .await;
        assert!(!run.is_finished());
        rig.slot.stop();
        assert_eq!(join(run).await.unwrap(), RunEnd::Stopped);
        assert_eq!(rig.body.tile(), t(1, 1));
    }
}

// ── Engage ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod engage {
    use std::time::Duration;

    use tokio::time::Instant;

    use pt_core::EntityId;
    use pt_mobility::Body;
    use pt_spatial::{GridTerrain, TileKind};

    use super::helpers::{MockHost, Reaction, creature, join, quick, rig, t, until};
    use crate::{
        ActionKind, ActionOutcome, BehaviorConfig, BehaviorError, BehaviorKind, BehaviorRequest,
        Notice, RunEnd,
    };

    fn no_targets() -> Notice {
        Notice::NoTargets { behavior: BehaviorKind::Engage }
    }

    #[tokio::test]
    async fn unreachable_target_is_ignored_and_next_one_engaged() {
        let mut terrain = GridTerrain::flat(t(0, 0), 16, 16);
        for tile in [t(2, 0), t(2, 1), t(3, 1), t(4, 1), t(4, 0)] {
            terrain.set_kind(tile, TileKind::Lava);
        }
        let host = MockHost::new();
        host.add(creature(1, t(3, 0)), Reaction::Nothing);
        host.add(creature(2, t(8, 0)), Reaction::Vanish);
        let rig = rig(terrain, t(0, 0), host, quick());
        let run = rig.start(BehaviorRequest::Engage).unwrap();

        until("targets exhausted", || rig.notices.contains(&no_targets())).await;
        rig.slot.stop();
        assert_eq!(join(run).await.unwrap(), RunEnd::Stopped);

        assert_eq!(rig.host.actions(), vec![
            (ActionKind::Target, Some(EntityId(1))),
            (ActionKind::Untarget, None),
            (ActionKind::Target, Some(EntityId(2))),
            (ActionKind::Engage, Some(EntityId(2))),
        ]);
        assert_eq!(rig.body.tile(), t(8, 0));
    }

    #[tokio::test]
    async fn failed_attack_ignores_the_target() {
        let host = MockHost::new();
        host.add(creature(3, t(1, 0)), Reaction::Publish(ActionOutcome::Failed));
        let rig = rig(GridTerrain::flat(t(0, 0), 8, 8), t(0, 0), host, quick());
        let run = rig.start(BehaviorRequest::Engage).unwrap();

        until("targets exhausted", || rig.notices.contains(&no_targets())).await;
        rig.slot.stop();
        join(run).await.unwrap();

        assert_eq!(rig.host.actions(), vec![
            (ActionKind::Target, Some(EntityId(3))),
            (ActionKind::Engage, Some(EntityId(3))),
            (ActionKind::Untarget, None),
        ]);
    }

    #[tokio::test]
    async fn live_target_is_fought_past_the_action_timeout() {
        let host = MockHost::new();
        host.add(creature(4, t(0, 1)), Reaction::Nothing);
        let config = BehaviorConfig { action_timeout: Duration::from_millis(30), ..quick() };
        let rig = rig(GridTerrain::flat(t(0, 0), 8, 8), t(0, 0), host, config);
        let run = rig.start(BehaviorRequest::Engage).unwrap();

        tokio::time::sleep(Duration::from_millis(150)).await;
        let fighting = vec![
            (ActionKind::Target, Some(EntityId(4))),
            (ActionKind::Engage, Some(EntityId(4))),
        ];
        assert_eq!(rig.host.actions(), fighting);
        assert_eq!(rig.slot.active(), Some(BehaviorKind::Engage));
        assert!(!rig.notices.contains(&no_targets()));

        rig.host.remove(EntityId(4));
        until("targets exhausted", || rig.notices.contains(&no_targets())).await;
        rig.slot.stop();
        join(run).await.unwrap();
        assert_eq!(rig.host.actions(), fighting);
    }

    #[tokio::test]
    async fn fleeing_target_is_chased_and_hit_again() {
        let host = MockHost::new();
        host.add(creature(6, t(1, 0)), Reaction::Nothing);
        let rig = rig(GridTerrain::flat(t(0, 0), 8, 8), t(0, 0), host, quick());
        let run = rig.start(BehaviorRequest::Engage).unwrap();

        let hits = || {
            rig.host.actions().iter().filter(|a| **a == (ActionKind::Engage, Some(EntityId(6)))).count()
        };
        until("first hit", || hits() == 1).await;
        rig.host.relocate(EntityId(6), t(6, 0));
        until("second hit", || hits() == 2).await;
        assert_eq!(rig.body.tile(), t(6, 0));

        rig.host.remove(EntityId(6));
        until("targets exhausted", || rig.notices.contains(&no_targets())).await;
        rig.slot.stop();
        join(run).await.unwrap();
        assert!(!rig.host.actions().contains(&(ActionKind::Untarget, None)));
    }

    #[tokio::test]
    async fn waits_while_busy() {
        let host = MockHost::new();
        host.set_busy(true);
        host.add(creature(5, t(1, 1)), Reaction::Vanish);
        let rig = rig(GridTerrain::flat(t(0, 0), 8, 8), t(0, 0), host, quick());
        let run = rig.start(BehaviorRequest::Engage).unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(rig.host.actions().is_empty());

        rig.host.set_busy(false);
        until("creature engaged", || {
            rig.host.actions().contains(&(ActionKind::Engage, Some(EntityId(5))))
        })
        .await;
        rig.slot.stop();
        join(run).await.unwrap();
    }

    /// Toggled off before any target shows up: the run ends well inside one
    /// poll interval.
    #[tokio::test]
    async fn stop_before_any_target_exits_promptly() {
        let config = BehaviorConfig::default();
        let poll = config.poll_interval;
        let rig = rig(GridTerrain::flat(t(0, 0), 8, 8), t(0, 0), MockHost::new(), config);
        let run = rig.start(BehaviorRequest::Engage).unwrap();

        until("first scan", || rig.notices.contains(&no_targets())).await;
        let stopped_at = Instant::now();
        assert_eq!(rig.slot.stop(), Some(BehaviorKind::Engage));
        let end = tokio::time::timeout(poll, run).await.expect("exit within one poll").unwrap();
        assert_eq!(end, RunEnd::Stopped);
        assert!(stopped_at.elapsed() < poll);
        assert!(rig.host.actions().is_empty());
    }

    #[tokio::test]
    async fn second_behaviour_is_rejected_while_first_runs() {
        let rig = rig(GridTerrain::flat(t(0, 0), 8, 8), t(0, 0), MockHost::new(), quick());
        let run = rig.start(BehaviorRequest::Engage).unwrap();

        for request in [BehaviorRequest::Groom, BehaviorRequest::Engage] {
            let requested = request.kind();
            assert_eq!(
                rig.start(request).unwrap_err(),
                BehaviorError::Conflict { active: BehaviorKind::Engage, requested },
            );
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!run.is_finished());
        assert_eq!(rig.slot.active(), Some(BehaviorKind::Engage));

        rig.slot.stop();
        assert_eq!(join(run).await.unwrap(), RunEnd::Stopped);
    }
}

// ── Groom ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod groom {
    use std::time::Duration;

    use pt_core::EntityId;
    use pt_spatial::GridTerrain;

    use super::helpers::{MockHost, Reaction, creature, horse, join, quick, rig, t, until};
    use crate::{ActionKind, BehaviorConfig, BehaviorKind, BehaviorRequest, Notice, RunEnd, ToolKind};

    fn no_targets() -> Notice {
        Notice::NoTargets { behavior: BehaviorKind::Groom }
    }

    #[tokio::test]
    async fn needs_a_brush() {
        let host = MockHost::new();
        host.add(horse(1, t(1, 0)), Reaction::Nothing);
        let rig = rig(GridTerrain::flat(t(0, 0), 8, 8), t(0, 0), host, quick());
        let run = rig.start(BehaviorRequest::Groom).unwrap();

        assert_eq!(join(run).await.unwrap(), RunEnd::Finished);
        assert_eq!(rig.notices.notices(), vec![Notice::MissingTool(ToolKind::GroomingBrush)]);
        assert!(rig.host.actions().is_empty());
    }

    /// Outcomes arrive as server text through the event processors; the
    /// long action timeout means only the text can settle each attempt.
    #[tokio::test]
    async fn grooms_each_creature_once() {
        let host = MockHost::new();
        host.give_brush();
        host.add(horse(1, t(2, 0)), Reaction::Say("You have now tended to the horse."));
        host.add(horse(2, t(6, 0)), Reaction::Say("That would be illegal here."));
        host.add(creature(3, t(1, 0)), Reaction::Nothing);
        let config = BehaviorConfig { action_timeout: Duration::from_secs(30), ..quick() };
        let rig = rig(GridTerrain::flat(t(0, 0), 10, 4), t(0, 0), host, config);
        let run = rig.start(BehaviorRequest::Groom).unwrap();

        until("targets exhausted", || rig.notices.contains(&no_targets())).await;
        rig.slot.stop();
        assert_eq!(join(run).await.unwrap(), RunEnd::Stopped);

        assert_eq!(rig.host.actions(), vec![
            (ActionKind::Groom, Some(EntityId(1))),
            (ActionKind::Groom, Some(EntityId(2))),
        ]);
        let notices = rig.notices.notices();
        assert!(notices.contains(&Notice::Grooming { name: "horse 1".into() }));
        assert!(notices.contains(&Notice::Grooming { name: "horse 2".into() }));
    }
}
