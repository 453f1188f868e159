use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Won once every column is empty, lost when all slots are taken and it isn't won.
    pub fn derive(columns: &Columns, slots: &SlotBank) -> Self {
        if columns.is_cleared() {
            Self::Won
        } else if slots.is_full() {
            Self::Lost
        } else {
            Self::Playing
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Placed,
    Won,
    Lost,
}

impl ClickOutcome {
    pub const fn from_status(status: GameStatus) -> Self {
        match status {
            GameStatus::Playing => Self::Placed,
            GameStatus::Won => Self::Won,
            GameStatus::Lost => Self::Lost,
        }
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Complete game state, replaced as a whole by every accepted click.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    columns: Columns,
    tokens: TokenGrid,
    slots: SlotBank,
    used: HashSet<GridPos>,
    recent_collections: SmallVec<[ColumnIndex; 8]>,
    status: GameStatus,
}

impl GameState {
    pub fn new(columns: Columns, tokens: TokenGrid) -> Self {
        let slots = SlotBank::new();
        let status = GameStatus::derive(&columns, &slots);
        Self {
            columns,
            tokens,
            slots,
            used: HashSet::new(),
            recent_collections: SmallVec::new(),
            status,
        }
    }

    pub fn from_level(level: &Level) -> Result<Self> {
        Ok(Self::new(level.columns(), level.token_grid()?))
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn tokens(&self) -> &TokenGrid {
        &self.tokens
    }

    pub fn slots(&self) -> &SlotBank {
        &self.slots
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_used(&self, pos: GridPos) -> bool {
        self.used.contains(&pos)
    }

    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    /// Columns drained by the last accepted click.
    pub fn recent_collections(&self) -> &[ColumnIndex] {
        &self.recent_collections
    }

    pub fn can_click(&self, pos: GridPos) -> bool {
        self.check_click(pos).is_ok() && self.slots.find_free_slot().is_some()
    }

    /// Color of the bobbin at `pos` if it may be clicked, ignoring slot availability.
    pub fn check_click(&self, pos: GridPos) -> Result<Color> {
        if !self.status.is_playing() {
            return Err(GameError::AlreadyEnded);
        }
        let pos = self.tokens.validate_pos(pos)?;
        if self.used.contains(&pos) {
            return Err(GameError::PositionUsed);
        }
        self.tokens.token_at(pos).ok_or(GameError::EmptyPosition)
    }
}

/// Result of applying one click.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: GameState,
    pub slot: SlotIndex,
    pub resolution: Resolution,
}

/// Applies a click to `state`, returning the next state. Rejected clicks leave `state` as is.
pub fn transition(state: &GameState, pos: GridPos) -> Result<Transition> {
    let color = state.check_click(pos)?;
    let slot = state.slots.find_free_slot().ok_or(GameError::NoFreeSlot)?;

    let mut next = state.clone();
    next.used.insert(pos);
    next.slots.place(slot, color)?;

    let resolution = resolve(&mut next.columns, &mut next.slots);
    next.recent_collections = resolution.drained_columns.clone();
    next.status = GameStatus::derive(&next.columns, &next.slots);

    Ok(Transition {
        state: next,
        slot,
        resolution,
    })
}

/// Holds the current [`GameState`] and swaps in the next one on every accepted click.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    state: GameState,
}

impl PlayEngine {
    pub fn new(state: GameState) -> Self {
        Self { state }
    }

    pub fn from_level(level: &Level) -> Result<Self> {
        log::debug!("loading level {}", level.level_id);
        GameState::from_level(level).map(Self::new)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn is_finished(&self) -> bool {
        self.state.status().is_finished()
    }

    pub fn click(&mut self, pos: GridPos) -> Result<ClickOutcome> {
        let Transition {
            state,
            slot,
            resolution,
        } = transition(&self.state, pos).inspect_err(|err| {
            log::debug!("click at {:?} rejected: {}", pos, err);
        })?;

        log::debug!(
            "bobbin at {:?} went to slot {}, {} pieces collected",
            pos,
            slot,
            resolution.drained
        );

        self.state = state;
        let outcome = ClickOutcome::from_status(self.state.status());
        if outcome.is_finished() {
            log::info!("game finished: {:?}", self.state.status());
        }
        Ok(outcome)
    }
}
