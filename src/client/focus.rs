//! Keyboard focus cursor over the clickable rows of the board.
//!
//! Focus is presentation only: activating it produces the same [`Gesture`]
//! a mouse click on the focused item would.

use super::selection::{Gesture, SelectionState};
use crate::snapshot::GameSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Row {
    OpponentField,
    OwnField,
    Hand,
}

impl Row {
    fn up(self) -> Self {
        match self {
            Row::Hand => Row::OwnField,
            Row::OwnField | Row::OpponentField => Row::OpponentField,
        }
    }

    fn down(self) -> Self {
        match self {
            Row::OpponentField => Row::OwnField,
            Row::OwnField | Row::Hand => Row::Hand,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusMove {
    Up,
    Down,
    Left,
    Right,
}

/// Number of focusable items per row for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowLengths {
    pub opponent_field: usize,
    pub own_field: usize,
    pub hand: usize,
}

impl RowLengths {
    pub fn of(snapshot: &GameSnapshot, selection: SelectionState) -> Self {
        let acting = snapshot.acting_player();
        // a selected card makes the slot after the last minion clickable
        let trailing_slot = usize::from(matches!(selection, SelectionState::CardSelected(_)));
        Self {
            opponent_field: snapshot.opposing_player().field.len(),
            own_field: acting.field.len() + trailing_slot,
            hand: acting.hand.len(),
        }
    }

    fn get(&self, row: Row) -> usize {
        match row {
            Row::OpponentField => self.opponent_field,
            Row::OwnField => self.own_field,
            Row::Hand => self.hand,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Focus {
    pub row: Row,
    pub index: usize,
}

impl Default for Focus {
    fn default() -> Self {
        Self {
            row: Row::Hand,
            index: 0,
        }
    }
}

impl Focus {
    pub fn apply(&mut self, movement: FocusMove, lengths: RowLengths) {
        match movement {
            FocusMove::Up => self.row = self.row.up(),
            FocusMove::Down => self.row = self.row.down(),
            FocusMove::Left => self.index = self.index.saturating_sub(1),
            FocusMove::Right => self.index += 1,
        }
        self.clamp(lengths);
    }

    /// Keeps the index on an existing item after the board changed.
    pub fn clamp(&mut self, lengths: RowLengths) {
        self.index = self.index.min(lengths.get(self.row).saturating_sub(1));
    }

    pub fn is_on(&self, row: Row, index: usize) -> bool {
        self.row == row && self.index == index
    }

    pub fn gesture(&self) -> Gesture {
        match self.row {
            Row::OpponentField => Gesture::OpponentMinion(self.index),
            Row::OwnField => Gesture::OwnField(self.index),
            Row::Hand => Gesture::HandCard(self.index),
        }
    }
}
