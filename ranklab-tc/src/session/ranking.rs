//! Ranking slot board
//!
//! An ordered sequence of destination slots, each holding at most one item
//! label. A label occupies at most one slot at a time: dropping a label that
//! is already placed somewhere is rejected with no state change. Dropping
//! onto an occupied slot overwrites the slot's previous occupant.

use serde::Serialize;

/// Outcome of a drop attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropOutcome {
    /// The label was written into the target slot
    Placed,
    /// The label already occupies a slot; no state change
    Duplicate,
}

/// Ordered ranking slots for one trial
#[derive(Debug, Clone)]
pub struct RankingBoard {
    slots: Vec<Option<String>>,
}

impl RankingBoard {
    pub fn new(slots: usize) -> Self {
        Self {
            slots: vec![None; slots],
        }
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }

    /// Attempt to place `label` into `slot`
    pub fn place(&mut self, slot: usize, label: &str) -> DropOutcome {
        debug_assert!(slot < self.slots.len());
        if self.slots.iter().any(|s| s.as_deref() == Some(label)) {
            return DropOutcome::Duplicate;
        }
        self.slots[slot] = Some(label.to_string());
        DropOutcome::Placed
    }

    /// Clear every slot
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    /// Submission eligibility: every slot holds a label
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| s.is_some())
    }

    /// Slot contents, left to right
    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    /// The ordered labels, available only once the board is complete
    pub fn labels(&self) -> Option<Vec<String>> {
        self.slots.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_board_is_empty_and_incomplete() {
        let board = RankingBoard::new(5);
        assert_eq!(board.len(), 5);
        assert!(board.is_empty());
        assert!(!board.is_complete());
        assert!(board.labels().is_none());
    }

    #[test]
    fn place_fills_target_slot() {
        let mut board = RankingBoard::new(3);
        assert_eq!(board.place(1, "2"), DropOutcome::Placed);
        assert_eq!(board.slots()[1].as_deref(), Some("2"));
        assert!(!board.is_complete());
    }

    #[test]
    fn duplicate_drop_is_a_no_op() {
        let mut board = RankingBoard::new(3);
        board.place(0, "1");
        assert_eq!(board.place(2, "1"), DropOutcome::Duplicate);
        // The label occupies only its first accepted slot
        assert_eq!(board.slots()[0].as_deref(), Some("1"));
        assert!(board.slots()[2].is_none());
    }

    #[test]
    fn drop_onto_occupied_slot_overwrites() {
        let mut board = RankingBoard::new(2);
        board.place(0, "a");
        assert_eq!(board.place(0, "b"), DropOutcome::Placed);
        assert_eq!(board.slots()[0].as_deref(), Some("b"));
        // "a" no longer occupies any slot, so it may be placed again
        assert_eq!(board.place(1, "a"), DropOutcome::Placed);
    }

    #[test]
    fn eligibility_iff_all_slots_filled() {
        let mut board = RankingBoard::new(3);
        board.place(0, "0");
        board.place(1, "1");
        assert!(!board.is_complete());
        board.place(2, "2");
        assert!(board.is_complete());
        assert_eq!(
            board.labels().unwrap(),
            vec!["0".to_string(), "1".to_string(), "2".to_string()]
        );
    }

    #[test]
    fn reset_clears_all_slots() {
        let mut board = RankingBoard::new(2);
        board.place(0, "x");
        board.place(1, "y");
        assert!(board.is_complete());
        board.reset();
        assert!(board.is_empty());
        assert!(!board.is_complete());
    }
}
