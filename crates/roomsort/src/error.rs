//! Unified error type for roomsort.

use roomsort_config::ConfigError;
use roomsort_drag::SceneError;

/// Top-level error that wraps the per-crate errors.
///
/// `#[from]` on each variant lets `?` convert sub-crate errors.
#[derive(Debug, thiserror::Error)]
pub enum RoomsortError {
    /// Loading or validating the game configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The drag scene could not be built from a round.
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// The game actor has stopped and can't take commands.
    #[error("game actor is not running")]
    Unavailable,
}
