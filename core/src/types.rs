use serde::{Deserialize, Serialize};

/// Color identifier shared by carpet pieces, bobbins and slots.
pub type Color = u8;

/// Position of a carpet column, in level order.
pub type ColumnIndex = usize;

/// Position of a slot in the bank, lower indexes fill first.
pub type SlotIndex = usize;

/// Number of collection slots, fixed for the whole game.
pub const SLOT_COUNT: usize = 5;

/// Pieces a slot collects before it is consumed and freed.
pub const SLOT_CAPACITY: u8 = 3;

/// Bobbin grid value meaning "no bobbin here" in level data.
pub const EMPTY_TOKEN: i32 = -1;

/// Position `(row, col)` on the bobbin grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for GridPos {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for GridPos {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.row, self.col]
    }
}
