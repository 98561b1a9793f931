//! The game phase state machine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the game is in its lifecycle.
///
/// ```text
///   Menu ──(start)──→ Playing ──(time up / last room)──→ GameOver
///                      ↑   │                                │
///             (resume) │   │ (pause)                        │
///                      │   ↓                                │
///                      Paused                               │
///                                                           │
///   Playing ←──────────────(restart)────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Start screen, no game running.
    #[default]
    Menu,
    /// A game is running: timers tick and drops score.
    Playing,
    /// A game is frozen: timers stand still and drops are ignored.
    Paused,
    /// The game ended. Only a restart leaves this phase.
    GameOver,
}

impl Phase {
    /// Returns `true` if a new game may be started from here.
    pub fn can_start(self) -> bool {
        matches!(self, Self::Menu | Self::GameOver)
    }

    /// Returns `true` while a game exists (running or paused).
    pub fn in_game(self) -> bool {
        matches!(self, Self::Playing | Self::Paused)
    }

    /// Returns `true` if transitioning to `target` is valid.
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Menu, Self::Playing)
                | (Self::GameOver, Self::Playing)
                | (Self::Playing, Self::Paused)
                | (Self::Paused, Self::Playing)
                | (Self::Playing, Self::GameOver)
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Menu => write!(f, "Menu"),
            Self::Playing => write!(f, "Playing"),
            Self::Paused => write!(f, "Paused"),
            Self::GameOver => write!(f, "GameOver"),
        }
    }
}
