//! Interaction state machine.
//!
//! Tracks what the user has tentatively selected and turns each click into
//! either a local selection change or exactly one [`GameAction`]. Rule
//! legality is not checked here; only gestures that cannot mean anything in
//! the current selection are dropped.

use log::debug;

use super::action::GameAction;
use super::game_log::GameLog;
use crate::snapshot::GameSnapshot;

/// What the user has tentatively chosen. Indices refer to the acting
/// player's hand or field in the snapshot the selection was made against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Empty,
    /// A minion card in hand waiting for a board position.
    CardSelected(usize),
    /// A friendly minion armed to attack.
    Attacking(usize),
}

/// A single user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    /// Click on the acting player's hand card.
    HandCard(usize),
    /// Click on the acting player's field. Index `field.len()` is the empty
    /// slot after the last minion.
    OwnField(usize),
    /// Click on an opposing minion.
    OpponentMinion(usize),
    /// The end-turn control.
    EndTurn,
}

pub const PLACE_MINION_PROMPT: &str = "Select a position on the board to play this minion.";
pub const ATTACK_PROMPT: &str = "Select a target to attack.";
pub const ATTACK_CANCELLED: &str = "Attack cancelled.";

/// Field index a minion card is summoned into when the user clicks field slot
/// `clicked`: to the right of the clicked minion, never past the end.
pub fn insert_position(clicked: usize, field_len: usize) -> usize {
    (clicked + 1).min(field_len)
}

#[derive(Debug, Default)]
pub struct InteractionMachine {
    selection: SelectionState,
}

impl InteractionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn reset(&mut self) {
        self.selection = SelectionState::Empty;
    }

    /// Interprets `gesture` against the current selection and `snapshot`.
    ///
    /// Returns the action to send, if the gesture completed one. Whenever an
    /// action is returned the selection is already back to `Empty`.
    pub fn handle(
        &mut self,
        gesture: Gesture,
        snapshot: &GameSnapshot,
        log: &mut GameLog,
    ) -> Option<GameAction> {
        let before = self.selection;
        let action = match gesture {
            Gesture::HandCard(index) => self.click_hand_card(index, snapshot, log),
            Gesture::OwnField(index) => self.click_own_field(index, snapshot, log),
            Gesture::OpponentMinion(index) => self.click_opponent_minion(index, snapshot),
            Gesture::EndTurn => {
                self.reset();
                Some(GameAction::EndTurn)
            }
        };
        if action.is_none() && before == self.selection {
            debug!("Gesture {gesture:?} ignored in {before:?}");
        }
        action
    }

    fn click_hand_card(
        &mut self,
        index: usize,
        snapshot: &GameSnapshot,
        log: &mut GameLog,
    ) -> Option<GameAction> {
        // an armed attacker suppresses the hand
        if let SelectionState::Attacking(_) = self.selection {
            return None;
        }
        let card = snapshot.acting_player().hand.get(index)?;

        if self.selection == SelectionState::CardSelected(index) {
            self.reset();
            return None;
        }

        if card.card_type.is_minion() {
            self.selection = SelectionState::CardSelected(index);
            log.push(PLACE_MINION_PROMPT);
            None
        } else {
            self.reset();
            Some(GameAction::PlayCard {
                card_index: index,
                position: None,
            })
        }
    }

    fn click_own_field(
        &mut self,
        index: usize,
        snapshot: &GameSnapshot,
        log: &mut GameLog,
    ) -> Option<GameAction> {
        let field = &snapshot.acting_player().field;

        match self.selection {
            SelectionState::CardSelected(card_index) => {
                if index > field.len() {
                    return None;
                }
                self.reset();
                Some(GameAction::PlayCard {
                    card_index,
                    position: Some(insert_position(index, field.len())),
                })
            }
            SelectionState::Attacking(attacker) if attacker == index => {
                self.reset();
                log.push(ATTACK_CANCELLED);
                None
            }
            SelectionState::Empty | SelectionState::Attacking(_) => {
                if field.get(index)?.can_attack {
                    self.selection = SelectionState::Attacking(index);
                    log.push(ATTACK_PROMPT);
                }
                None
            }
        }
    }

    fn click_opponent_minion(&mut self, index: usize, snapshot: &GameSnapshot) -> Option<GameAction> {
        let SelectionState::Attacking(attacker) = self.selection else {
            return None;
        };
        snapshot.opposing_player().field.get(index)?;
        self.reset();
        Some(GameAction::Attack {
            attacker,
            target: index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::test_support::*;

    fn board() -> GameSnapshot {
        snapshot(
            player(
                "Jaina",
                vec![
                    minion_card("Water Elemental", 4),
                    spell_card("Fireball", 4),
                    minion_card("Ship's Chirurgeon", 1),
                ],
                vec![
                    minion("Scorching Observer", true),
                    minion("Sleeping Wisp", false),
                    minion("Raptor", true),
                ],
            ),
            player(
                "Garrosh",
                vec![spell_card("Whirlwind", 1)],
                vec![minion("Grunt", false), minion("Wolf Rider", true)],
            ),
        )
    }

    fn run(machine: &mut InteractionMachine, gestures: &[Gesture]) -> Vec<GameAction> {
        let snapshot = board();
        let mut log = GameLog::new();
        gestures
            .iter()
            .filter_map(|&gesture| machine.handle(gesture, &snapshot, &mut log))
            .collect()
    }

    #[test]
    fn starts_empty() {
        assert_eq!(InteractionMachine::new().selection(), SelectionState::Empty);
    }

    #[test]
    fn non_minion_card_plays_immediately() {
        let mut machine = InteractionMachine::new();
        let actions = run(&mut machine, &[Gesture::HandCard(1)]);
        assert_eq!(
            actions,
            vec![GameAction::PlayCard {
                card_index: 1,
                position: None
            }]
        );
        assert_eq!(machine.selection(), SelectionState::Empty);
    }

    #[test]
    fn minion_card_waits_for_position() {
        let mut machine = InteractionMachine::new();
        let snapshot = board();
        let mut log = GameLog::new();
        let action = machine.handle(Gesture::HandCard(0), &snapshot, &mut log);
        assert_eq!(action, None);
        assert_eq!(machine.selection(), SelectionState::CardSelected(0));
        assert_eq!(log.last(), Some(PLACE_MINION_PROMPT));
    }

    #[test]
    fn reclicking_selected_card_deselects() {
        let mut machine = InteractionMachine::new();
        let actions = run(&mut machine, &[Gesture::HandCard(0), Gesture::HandCard(0)]);
        assert!(actions.is_empty());
        assert_eq!(machine.selection(), SelectionState::Empty);
    }

    #[test]
    fn switching_to_another_minion_card() {
        let mut machine = InteractionMachine::new();
        let actions = run(&mut machine, &[Gesture::HandCard(0), Gesture::HandCard(2)]);
        assert!(actions.is_empty());
        assert_eq!(machine.selection(), SelectionState::CardSelected(2));
    }

    #[test]
    fn switching_to_a_spell_plays_it() {
        let mut machine = InteractionMachine::new();
        let actions = run(&mut machine, &[Gesture::HandCard(0), Gesture::HandCard(1)]);
        assert_eq!(
            actions,
            vec![GameAction::PlayCard {
                card_index: 1,
                position: None
            }]
        );
        assert_eq!(machine.selection(), SelectionState::Empty);
    }

    #[test]
    fn selected_card_is_placed_right_of_clicked_minion() {
        let mut machine = InteractionMachine::new();
        let actions = run(&mut machine, &[Gesture::HandCard(2), Gesture::OwnField(0)]);
        assert_eq!(
            actions,
            vec![GameAction::PlayCard {
                card_index: 2,
                position: Some(1)
            }]
        );
        assert_eq!(machine.selection(), SelectionState::Empty);
    }

    #[test]
    fn placement_never_exceeds_field_length() {
        let mut machine = InteractionMachine::new();
        let actions = run(
            &mut machine,
            &[
                Gesture::HandCard(0),
                Gesture::OwnField(2),
                Gesture::HandCard(0),
                Gesture::OwnField(3),
            ],
        );
        let place = |position| GameAction::PlayCard {
            card_index: 0,
            position: Some(position),
        };
        assert_eq!(actions, vec![place(3), place(3)]);
    }

    #[test]
    fn placement_past_trailing_slot_is_ignored() {
        let mut machine = InteractionMachine::new();
        let actions = run(&mut machine, &[Gesture::HandCard(0), Gesture::OwnField(4)]);
        assert!(actions.is_empty());
        assert_eq!(machine.selection(), SelectionState::CardSelected(0));
    }

    #[test]
    fn insert_position_formula() {
        assert_eq!(insert_position(0, 0), 0);
        assert_eq!(insert_position(0, 3), 1);
        assert_eq!(insert_position(2, 3), 3);
        assert_eq!(insert_position(3, 3), 3);
    }

    #[test]
    fn ready_minion_arms_attack() {
        let mut machine = InteractionMachine::new();
        let snapshot = board();
        let mut log = GameLog::new();
        assert_eq!(machine.handle(Gesture::OwnField(0), &snapshot, &mut log), None);
        assert_eq!(machine.selection(), SelectionState::Attacking(0));
        assert_eq!(log.last(), Some(ATTACK_PROMPT));
    }

    #[test]
    fn exhausted_minion_is_a_no_op() {
        let mut machine = InteractionMachine::new();
        let snapshot = board();
        let mut log = GameLog::new();
        assert_eq!(machine.handle(Gesture::OwnField(1), &snapshot, &mut log), None);
        assert_eq!(machine.selection(), SelectionState::Empty);
        assert!(log.entries().is_empty());
    }

    #[test]
    fn reclicking_attacker_cancels() {
        let mut machine = InteractionMachine::new();
        let snapshot = board();
        let mut log = GameLog::new();
        machine.handle(Gesture::OwnField(2), &snapshot, &mut log);
        assert_eq!(machine.handle(Gesture::OwnField(2), &snapshot, &mut log), None);
        assert_eq!(machine.selection(), SelectionState::Empty);
        assert_eq!(log.last(), Some(ATTACK_CANCELLED));
    }

    #[test]
    fn attacker_switches_only_to_ready_minion() {
        let mut machine = InteractionMachine::new();
        run(&mut machine, &[Gesture::OwnField(0), Gesture::OwnField(2)]);
        assert_eq!(machine.selection(), SelectionState::Attacking(2));

        run(&mut machine, &[Gesture::OwnField(1)]);
        assert_eq!(machine.selection(), SelectionState::Attacking(2));
    }

    #[test]
    fn attacking_opponent_minion_emits_attack() {
        let mut machine = InteractionMachine::new();
        let actions = run(&mut machine, &[Gesture::OwnField(2), Gesture::OpponentMinion(1)]);
        assert_eq!(
            actions,
            vec![GameAction::Attack {
                attacker: 2,
                target: 1
            }]
        );
        assert_eq!(machine.selection(), SelectionState::Empty);
    }

    #[test]
    fn missing_target_keeps_attacker_armed() {
        let mut machine = InteractionMachine::new();
        let actions = run(&mut machine, &[Gesture::OwnField(0), Gesture::OpponentMinion(5)]);
        assert!(actions.is_empty());
        assert_eq!(machine.selection(), SelectionState::Attacking(0));
    }

    #[test]
    fn hand_is_ignored_while_attacking() {
        let mut machine = InteractionMachine::new();
        let actions = run(&mut machine, &[Gesture::OwnField(0), Gesture::HandCard(1)]);
        assert!(actions.is_empty());
        assert_eq!(machine.selection(), SelectionState::Attacking(0));
    }

    #[test]
    fn opponent_minion_ignored_unless_attacking() {
        let mut machine = InteractionMachine::new();
        assert!(run(&mut machine, &[Gesture::OpponentMinion(0)]).is_empty());
        assert_eq!(machine.selection(), SelectionState::Empty);

        assert!(run(&mut machine, &[Gesture::HandCard(0), Gesture::OpponentMinion(0)]).is_empty());
        assert_eq!(machine.selection(), SelectionState::CardSelected(0));
    }

    #[test]
    fn out_of_range_hand_card_is_ignored() {
        let mut machine = InteractionMachine::new();
        assert!(run(&mut machine, &[Gesture::HandCard(9)]).is_empty());
        assert_eq!(machine.selection(), SelectionState::Empty);
    }

    #[test]
    fn end_turn_from_every_state() {
        let setups: [&[Gesture]; 3] = [&[], &[Gesture::HandCard(0)], &[Gesture::OwnField(0)]];
        for setup in setups {
            let mut machine = InteractionMachine::new();
            run(&mut machine, setup);
            let actions = run(&mut machine, &[Gesture::EndTurn]);
            assert_eq!(actions, vec![GameAction::EndTurn]);
            assert_eq!(machine.selection(), SelectionState::Empty);
        }
    }
}
