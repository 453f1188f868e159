use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Pieces kept inline before a column spills to the heap, most levels fit.
const INLINE_PIECES: usize = 16;

/// A single carpet: pieces are only ever removed from the front.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Column {
    pieces: SmallVec<[Color; INLINE_PIECES]>,
    head: usize,
}

impl Column {
    pub fn new(pieces: impl IntoIterator<Item = Color>) -> Self {
        Self {
            pieces: pieces.into_iter().collect(),
            head: 0,
        }
    }

    /// Remaining pieces, front first.
    pub fn as_slice(&self) -> &[Color] {
        self.pieces.get(self.head..).unwrap_or(&[])
    }

    pub fn front(&self) -> Option<Color> {
        self.as_slice().first().copied()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    fn pop_front(&mut self) -> Option<Color> {
        let piece = self.front()?;
        self.head += 1;
        Some(piece)
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Column {}

/// All carpet columns of a level, in level order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Columns {
    columns: Vec<Column>,
}

impl Columns {
    pub fn new<I, C>(columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = Color>,
    {
        Self {
            columns: columns.into_iter().map(Column::new).collect(),
        }
    }

    /// Number of columns, including the emptied ones.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, index: ColumnIndex) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    pub fn front(&self, index: ColumnIndex) -> Option<Color> {
        self.columns.get(index).and_then(Column::front)
    }

    /// Removes the front piece of a column, a no-op on empty or unknown columns.
    pub fn drain_front(&mut self, index: ColumnIndex) -> Option<Color> {
        self.columns.get_mut(index)?.pop_front()
    }

    /// Total pieces left across all columns.
    pub fn remaining(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Length of the tallest column.
    pub fn height(&self) -> usize {
        self.columns.iter().map(Column::len).max().unwrap_or(0)
    }

    pub fn is_cleared(&self) -> bool {
        self.columns.iter().all(Column::is_empty)
    }
}
