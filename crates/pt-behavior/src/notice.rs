//! User-facing status messages.

use std::fmt;
use std::sync::Mutex;

use tracing::info;

use pt_core::TileCoord;

use crate::{BehaviorKind, ToolKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Pathfinding { goal: TileCoord },
    WalkFailed { goal: TileCoord },
    PlayerNotFound { prefix: String },
    NoPathTo { name: String },
    NoTargets { behavior: BehaviorKind },
    MissingTool(ToolKind),
    Engaging { name: String },
    Grooming { name: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Pathfinding { goal }    => write!(f, "Pathfinding to {goal}"),
            Notice::WalkFailed { goal }     => write!(f, "Couldn't find a path to {goal} or was interrupted"),
            Notice::PlayerNotFound { prefix } => {
                write!(f, "Couldn't find any players with name `{prefix}`")
            }
            Notice::NoPathTo { name }       => write!(f, "Couldn't find path to {name}"),
            Notice::NoTargets { behavior: BehaviorKind::Groom } => {
                f.write_str("Can't find any creatures to groom")
            }
            Notice::NoTargets { .. }        => f.write_str("Can't find any creatures to target"),
            Notice::MissingTool(ToolKind::GroomingBrush) => {
                f.write_str("Cannot groom without a brush!")
            }
            Notice::Engaging { name }       => write!(f, "Engaging `{name}`"),
            Notice::Grooming { name }       => write!(f, "Grooming `{name}`"),
        }
    }
}

/// Receives notices for display.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Logs every notice at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        info!(%notice, "notice");
    }
}

/// Keeps every notice in memory.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    pub fn contains(&self, notice: &Notice) -> bool {
        self.notices().contains(notice)
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: &Notice) {
        info!(%notice, "notice");
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice.clone());
        }
    }
}
