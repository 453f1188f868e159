use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Summary of one resolution run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Passes over the slot bank, including the final pass that drained nothing.
    pub passes: usize,
    /// Pieces moved from column fronts into slots.
    pub drained: usize,
    /// Slots that reached capacity and were freed.
    pub saturated: usize,
    /// Columns that lost at least one piece, ascending.
    pub drained_columns: SmallVec<[ColumnIndex; 8]>,
}

impl Resolution {
    pub fn has_update(&self) -> bool {
        self.drained > 0
    }
}

/// Drains matching column fronts into the slots until no drain is possible.
///
/// Each pass walks the occupied slots in bank order and, for each of them, the columns in level
/// order. A (slot, column) pair drains at most once per pass, so pieces uncovered by a drain are
/// picked up by the next pass. A slot that reaches [`SLOT_CAPACITY`] is freed on the spot and
/// takes no further pieces.
///
/// Every pass that does not end the loop removes at least one piece, so the number of passes is
/// bounded by the pieces left when it starts, plus one.
pub fn resolve(columns: &mut Columns, slots: &mut SlotBank) -> Resolution {
    let mut resolution = Resolution::default();
    let mut pieces_left = columns.remaining();

    loop {
        resolution.passes += 1;
        let drained = resolve_pass(columns, slots, &mut resolution);
        if drained == 0 {
            break;
        }
        debug_assert!(drained <= pieces_left);
        pieces_left = pieces_left.saturating_sub(drained);
    }

    resolution.drained_columns.sort_unstable();
    resolution.drained_columns.dedup();

    log::debug!(
        "resolved in {} passes: {} drained, {} saturated",
        resolution.passes,
        resolution.drained,
        resolution.saturated
    );
    resolution
}

fn resolve_pass(columns: &mut Columns, slots: &mut SlotBank, resolution: &mut Resolution) -> usize {
    let mut drained = 0;

    for slot_index in 0..SLOT_COUNT {
        for column_index in 0..columns.len() {
            // empty from the start, or freed earlier in this pass
            let Some(slot) = slots.get(slot_index) else {
                break;
            };
            if columns.front(column_index) != Some(slot.color()) {
                continue;
            }

            columns.drain_front(column_index);
            drained += 1;
            resolution.drained += 1;
            resolution.drained_columns.push(column_index);
            log::trace!(
                "slot {} took color {} from column {}",
                slot_index,
                slot.color(),
                column_index
            );

            if let CollectOutcome::Saturated = slots.increment_collected(slot_index) {
                resolution.saturated += 1;
                log::trace!("slot {} saturated", slot_index);
            }
        }
    }

    drained
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn bank(colors: &[Color]) -> SlotBank {
        let mut slots = SlotBank::new();
        for (index, &color) in colors.iter().enumerate() {
            slots.place(index, color).unwrap();
        }
        slots
    }

    #[test]
    fn one_pass_drains_each_column_once_up_to_capacity() {
        let mut columns = Columns::new(vec![vec![1], vec![1], vec![1], vec![1]]);
        let mut slots = bank(&[1]);

        let resolution = resolve(&mut columns, &mut slots);

        assert_eq!(resolution.drained, 3);
        assert_eq!(resolution.saturated, 1);
        assert_eq!(resolution.passes, 2);
        assert_eq!(resolution.drained_columns.as_slice(), &[0, 1, 2]);
        assert_eq!(columns.front(3), Some(1));
        assert_eq!(slots.get(0), None);
    }

    #[test]
    fn same_column_drains_again_on_later_passes() {
        let mut columns = Columns::new(vec![vec![3, 3, 3, 4]]);
        let mut slots = bank(&[3]);

        let resolution = resolve(&mut columns, &mut slots);

        assert_eq!(resolution.passes, 4);
        assert_eq!(resolution.drained, 3);
        assert_eq!(resolution.drained_columns.as_slice(), &[0]);
        assert_eq!(columns.get(0).unwrap().as_slice(), &[4]);
        assert_eq!(slots.occupied_count(), 0);
    }

    #[test]
    fn uncovered_piece_cascades_into_another_slot() {
        // slot 0 wants 2, slot 1 wants 1; draining the 1 uncovers a 2
        let mut columns = Columns::new(vec![vec![1, 2], vec![5]]);
        let mut slots = bank(&[2, 1]);

        let resolution = resolve(&mut columns, &mut slots);

        assert_eq!(resolution.passes, 3);
        assert_eq!(resolution.drained, 2);
        assert_eq!(slots.get(0).map(Slot::collected), Some(1));
        assert_eq!(slots.get(1).map(Slot::collected), Some(1));
        assert_eq!(columns.get(0).unwrap().len(), 0);
    }

    #[test]
    fn lower_slot_wins_a_contested_front() {
        let mut columns = Columns::new(vec![vec![7]]);
        let mut slots = bank(&[7, 7]);

        resolve(&mut columns, &mut slots);

        assert_eq!(slots.get(0).map(Slot::collected), Some(1));
        assert_eq!(slots.get(1).map(Slot::collected), Some(0));
    }

    #[test]
    fn freed_slot_stops_collecting_within_the_pass() {
        let mut columns = Columns::new(vec![vec![6], vec![6], vec![6], vec![6]]);
        let mut slots = bank(&[6, 6]);

        let resolution = resolve(&mut columns, &mut slots);

        // slot 0 saturates on columns 0..3, slot 1 takes column 3
        assert_eq!(resolution.saturated, 1);
        assert_eq!(slots.get(0), None);
        assert_eq!(slots.get(1).map(Slot::collected), Some(1));
        assert!(columns.is_cleared());
    }

    #[test]
    fn no_match_runs_a_single_pass() {
        let mut columns = Columns::new(vec![vec![1, 2], vec![3]]);
        let mut slots = bank(&[9]);
        let before = columns.clone();

        let resolution = resolve(&mut columns, &mut slots);

        assert_eq!(resolution.passes, 1);
        assert!(!resolution.has_update());
        assert_eq!(columns, before);
    }

    #[test]
    fn drained_pieces_match_column_shrinkage() {
        let mut columns = Columns::new(vec![
            vec![0, 1, 0, 2],
            vec![1, 1, 0],
            vec![2, 0, 1, 1],
            vec![0, 2, 2],
        ]);
        let mut slots = bank(&[0, 1, 2]);
        let before = columns.remaining();

        let resolution = resolve(&mut columns, &mut slots);

        assert_eq!(before - columns.remaining(), resolution.drained);
        assert!(resolution.passes <= before + 1);
        for slot in slots.iter().flatten() {
            assert!(slot.collected() < SLOT_CAPACITY);
        }
    }
}
