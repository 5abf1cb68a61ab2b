use crate::PlayerId;

/// Setup-time failures. The per-frame update has no error path: numeric
/// hazards are guarded in place.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("invalid terrain mesh: {0}")]
    InvalidMesh(String),

    #[error("player slot {0} is already active")]
    SlotOccupied(PlayerId),

    #[error("no controllers connected")]
    NoControllers,

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}
