use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Bobbin was already used")]
    PositionUsed,
    #[error("No bobbin at this position")]
    EmptyPosition,
    #[error("No available slots!")]
    NoFreeSlot,
    #[error("Slot is already occupied")]
    SlotOccupied,
    #[error("Invalid slot index")]
    InvalidSlot,
    #[error("Level data could not be parsed")]
    InvalidLevelData,
    #[error("Bobbin grid rows have different lengths")]
    RaggedGrid,
    #[error("Invalid color value: {0}")]
    InvalidColor(i32),
}

impl GameError {
    /// Rejections the player should be told about, everything else is silently ignored.
    pub const fn notifies_player(self) -> bool {
        matches!(self, Self::NoFreeSlot)
    }

    pub const fn is_invalid_action(self) -> bool {
        matches!(
            self,
            Self::InvalidCoords | Self::AlreadyEnded | Self::PositionUsed | Self::EmptyPosition
        )
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
