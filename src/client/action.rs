use std::fmt;

use serde::Serialize;

/// A game move the user completed. Exactly one of these is emitted per
/// completed gesture; the server decides whether it is legal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameAction {
    /// Play the hand card at `card_index`. `position` is the field index to
    /// summon into, or `None` to let the server place or target it.
    PlayCard {
        card_index: usize,
        position: Option<usize>,
    },
    /// Attack the opposing minion at `target` with the friendly minion at `attacker`.
    Attack { attacker: usize, target: usize },
    EndTurn,
}

impl GameAction {
    /// The JSON body for `POST /api/action`.
    pub fn to_request(self) -> ActionRequest {
        match self {
            GameAction::PlayCard {
                card_index,
                position,
            } => ActionRequest::PlayCard {
                card_index,
                position: position.map_or(ActionRequest::NO_POSITION, |p| p as i64),
            },
            GameAction::Attack { attacker, target } => ActionRequest::Attack {
                card_index: attacker,
                target,
            },
            GameAction::EndTurn => ActionRequest::EndTurn,
        }
    }
}

impl fmt::Display for GameAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameAction::PlayCard {
                card_index,
                position: Some(position),
            } => write!(f, "play card {card_index} at position {position}"),
            GameAction::PlayCard {
                card_index,
                position: None,
            } => write!(f, "play card {card_index}"),
            GameAction::Attack { attacker, target } => {
                write!(f, "attack with minion {attacker} into minion {target}")
            }
            GameAction::EndTurn => f.write_str("end turn"),
        }
    }
}

/// Wire shape of an action, tagged by `type`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ActionRequest {
    PlayCard {
        #[serde(rename = "cardIndex")]
        card_index: usize,
        position: i64,
    },
    Attack {
        #[serde(rename = "cardIndex")]
        card_index: usize,
        target: usize,
    },
    EndTurn,
}

impl ActionRequest {
    /// Sentinel for "no explicit position".
    pub const NO_POSITION: i64 = -1;
}
