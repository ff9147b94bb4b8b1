//! The game client as seen by behaviours.

use async_trait::async_trait;

use pt_core::{EntityId, TileCoord, WorldPos};

/// A nearby creature, player or item as reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id:         EntityId,
    /// Name shown when hovering the entity.
    pub name:       String,
    pub position:   WorldPos,
    pub player:     bool,
    pub item:       bool,
    /// Owning kingdom; `0` for wild creatures.
    pub kingdom:    u8,
    /// Ridden, led or otherwise under someone's control.
    pub controlled: bool,
    pub groomable:  bool,
    /// Full hover text, which carries ownership markers such as "Bob's pet".
    pub hover_text: String,
}

impl Entity {
    /// A wild, uncontrolled creature.
    pub fn creature(id: EntityId, name: impl Into<String>, position: WorldPos) -> Self {
        let name = name.into();
        Self {
            id,
            hover_text: name.clone(),
            name,
            position,
            player: false,
            item: false,
            kingdom: 0,
            controlled: false,
            groomable: false,
        }
    }

    pub fn player(id: EntityId, name: impl Into<String>, position: WorldPos) -> Self {
        Self { player: true, ..Self::creature(id, name, position) }
    }

    pub fn tile(&self) -> TileCoord {
        self.position.tile()
    }
}

/// An action sent to the game server.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ActionKind {
    /// Select the entity as the combat target.
    Target,
    /// Clear the combat target.
    Untarget,
    /// Attack the selected target.
    Engage,
    /// Groom with the grooming tool.
    Groom,
}

/// Tools a behaviour may require.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ToolKind {
    GroomingBrush,
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolKind::GroomingBrush => f.write_str("grooming brush"),
        }
    }
}

/// Entity queries and action dispatch, implemented by the host.
///
/// Queries are cheap reads of client state.  `perform` only sends the
/// action; its result arrives later as event text (see
/// [`Outcomes`](crate::Outcomes)) or as the target disappearing.
#[async_trait]
pub trait Host: Send + Sync {
    /// Every entity currently loaded around the agent.
    fn nearby(&self) -> Vec<Entity>;

    /// Look one entity up by id.  `None` once it has gone (died, despawned,
    /// walked out of range).
    fn entity(&self, id: EntityId) -> Option<Entity> {
        self.nearby().into_iter().find(|e| e.id == id)
    }

    /// `true` while an action is in progress or stamina is not full.
    fn is_busy(&self) -> bool;

    fn has_tool(&self, tool: ToolKind) -> bool;

    /// Send `action`.  `target` is `None` for [`ActionKind::Untarget`].
    async fn perform(&self, action: ActionKind, target: Option<EntityId>);
}
