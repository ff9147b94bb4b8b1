use std::fmt;

/// How a walk ended.
///
/// Callers branch on this: `Interrupted` usually means "re-path now",
/// `NoPath` means "back off before trying again".
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum WalkStatus {
    /// The agent stands on the goal tile.
    Complete,
    /// Paused out, cancelled, or the goal moved mid-walk.
    Interrupted,
    /// The search found no route.
    NoPath,
}

impl WalkStatus {
    pub fn is_complete(self) -> bool {
        self == WalkStatus::Complete
    }
}

impl fmt::Display for WalkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WalkStatus::Complete    => "complete",
            WalkStatus::Interrupted => "interrupted",
            WalkStatus::NoPath      => "no path",
        })
    }
}
