//! Error types for the drag layer.

/// Errors from building a [`Scene`](crate::Scene).
///
/// The drag interaction itself never fails: stray input is ignored. Only
/// populating the scene with conflicting ids is an error.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// A draggable with this id is already in the scene.
    #[error("duplicate draggable {0}")]
    DuplicateDraggable(String),

    /// A drop zone with this id is already in the scene.
    #[error("duplicate drop zone {0}")]
    DuplicateZone(String),
}
