use thiserror::Error;

/// Errors raised while building a carousel from its configuration.
///
/// Runtime input (pointer events, zoom, drag) never produces an error: stale
/// events are dropped and camera parameters are clamped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("panel set is empty")]
    EmptyPanelSet,
    #[error("panel in slot {0} has an empty id")]
    EmptyPanelId(usize),
    #[error("duplicate panel id `{0}`")]
    DuplicatePanelId(String),
    #[error("panel `{id}` has an invalid accent color `{color}`")]
    InvalidColor { id: String, color: String },
    #[error("invalid camera configuration: {0}")]
    InvalidCamera(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}
