use serde::{Deserialize, Serialize};

use crate::*;

/// An occupied slot collecting pieces of one color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    color: Color,
    collected: u8,
}

impl Slot {
    pub const fn color(self) -> Color {
        self.color
    }

    /// Always below [`SLOT_CAPACITY`], a full slot is removed from the bank.
    pub const fn collected(self) -> u8 {
        self.collected
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CollectOutcome {
    NoChange,
    Collected,
    Saturated,
}

impl CollectOutcome {
    pub const fn has_update(self) -> bool {
        use CollectOutcome::*;
        match self {
            NoChange => false,
            Collected => true,
            Saturated => true,
        }
    }
}

/// Fixed bank of [`SLOT_COUNT`] slots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotBank {
    slots: [Option<Slot>; SLOT_COUNT],
}

impl SlotBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: SlotIndex) -> Option<Slot> {
        self.slots.get(index).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<Slot>> + '_ {
        self.slots.iter().copied()
    }

    /// Lowest empty slot index.
    pub fn find_free_slot(&self) -> Option<SlotIndex> {
        self.slots.iter().position(Option::is_none)
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn place(&mut self, index: SlotIndex, color: Color) -> Result<()> {
        let entry = self.slots.get_mut(index).ok_or(GameError::InvalidSlot)?;
        if entry.is_some() {
            return Err(GameError::SlotOccupied);
        }
        *entry = Some(Slot {
            color,
            collected: 0,
        });
        Ok(())
    }

    /// Adds one piece to a slot, freeing it once it reaches capacity.
    pub fn increment_collected(&mut self, index: SlotIndex) -> CollectOutcome {
        let Some(entry) = self.slots.get_mut(index) else {
            return CollectOutcome::NoChange;
        };
        let Some(slot) = entry.as_mut() else {
            return CollectOutcome::NoChange;
        };

        slot.collected += 1;
        if slot.collected >= SLOT_CAPACITY {
            *entry = None;
            CollectOutcome::Saturated
        } else {
            CollectOutcome::Collected
        }
    }
}
