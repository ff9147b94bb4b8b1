//! What the user asks the agent to do.

use std::fmt;

use pt_core::TileCoord;
use pt_spatial::Router;

use crate::{Behavior, BehaviorError, BehaviorResult, Engage, Follow, Groom, WalkTo};

/// The four behaviour kinds.  Used for conflict reporting and toggling.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviorKind {
    WalkTo,
    Follow,
    Engage,
    Groom,
}

impl BehaviorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BehaviorKind::WalkTo => "walk-to",
            BehaviorKind::Follow => "follow",
            BehaviorKind::Engage => "engage",
            BehaviorKind::Groom  => "groom",
        }
    }
}

impl fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A start request with its arguments.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviorRequest {
    /// Walk to a fixed tile, once.
    WalkTo(TileCoord),
    /// Follow the first player whose name starts with this prefix
    /// (case-insensitive).
    Follow(String),
    /// Engage the nearest eligible creature, repeatedly.
    Engage,
    /// Groom the nearest groomable creature, repeatedly.
    Groom,
}

impl BehaviorRequest {
    pub fn kind(&self) -> BehaviorKind {
        match self {
            BehaviorRequest::WalkTo(_) => BehaviorKind::WalkTo,
            BehaviorRequest::Follow(_) => BehaviorKind::Follow,
            BehaviorRequest::Engage    => BehaviorKind::Engage,
            BehaviorRequest::Groom     => BehaviorKind::Groom,
        }
    }

    /// Reject requests that can never do anything.
    pub fn validate(&self) -> BehaviorResult<()> {
        match self {
            BehaviorRequest::Follow(prefix) if prefix.trim().is_empty() => Err(
                BehaviorError::InvalidRequest("follow needs a player name".into()),
            ),
            _ => Ok(()),
        }
    }

    /// A fresh behaviour for this request, with empty tracking state.
    pub fn into_behavior<R: Router + 'static>(self) -> Box<dyn Behavior<R>> {
        match self {
            BehaviorRequest::WalkTo(goal)   => Box::new(WalkTo::new(goal)),
            BehaviorRequest::Follow(prefix) => Box::new(Follow::new(prefix)),
            BehaviorRequest::Engage         => Box::new(Engage::new()),
            BehaviorRequest::Groom          => Box::new(Groom::new()),
        }
    }
}

impl fmt::Display for BehaviorRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BehaviorRequest::WalkTo(tile)   => write!(f, "walk-to {tile}"),
            BehaviorRequest::Follow(prefix) => write!(f, "follow `{prefix}`"),
            other                           => f.write_str(other.kind().as_str()),
        }
    }
}
