//! The agent's body as seen by the movement layer.

use std::sync::Mutex;

use pt_core::{TileCoord, WorldPos};

/// Live agent state and movement actuator, implemented by the host.
pub trait Body: Send + Sync {
    fn position(&self) -> WorldPos;

    /// The tile the agent stands on.
    fn tile(&self) -> TileCoord {
        self.position().tile()
    }

    fn set_position(&self, pos: WorldPos);

    /// Face `yaw` degrees clockwise from North.  `pitch` of `None` keeps the
    /// current pitch.
    fn set_orientation(&self, yaw: f32, pitch: Option<f32>);
}

// ── SimBody ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
struct BodyState {
    pos:     WorldPos,
    yaw:     Option<f32>,
    pitch:   Option<f32>,
    updates: usize,
    facings: Vec<f32>,
}

/// In-memory [`Body`] for demos and tests.  Records every facing change.
#[derive(Debug, Default)]
pub struct SimBody {
    state: Mutex<BodyState>,
}

impl SimBody {
    pub fn new(pos: WorldPos) -> Self {
        Self { state: Mutex::new(BodyState { pos, ..BodyState::default() }) }
    }

    /// A body standing on the centre of `tile`.
    pub fn at_tile(tile: TileCoord) -> Self {
        Self::new(tile.center())
    }

    fn with<T>(&self, f: impl FnOnce(&mut BodyState) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut state)
    }

    /// Teleport without counting a position update.
    pub fn place(&self, pos: WorldPos) {
        self.with(|s| s.pos = pos);
    }

    pub fn yaw(&self) -> Option<f32> {
        self.with(|s| s.yaw)
    }

    pub fn pitch(&self) -> Option<f32> {
        self.with(|s| s.pitch)
    }

    /// Number of `set_position` calls so far.
    pub fn updates(&self) -> usize {
        self.with(|s| s.updates)
    }

    /// Every yaw passed to `set_orientation`, in order.
    pub fn facings(&self) -> Vec<f32> {
        self.with(|s| s.facings.clone())
    }
}

impl Body for SimBody {
    fn position(&self) -> WorldPos {
        self.with(|s| s.pos)
    }

    fn set_position(&self, pos: WorldPos) {
        self.with(|s| {
            s.pos = pos;
            s.updates += 1;
        });
    }

    fn set_orientation(&self, yaw: f32, pitch: Option<f32>) {
        self.with(|s| {
            s.yaw = Some(yaw);
            if pitch.is_some() {
                s.pitch = pitch;
            }
            s.facings.push(yaw);
        });
    }
}
