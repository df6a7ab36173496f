//! Typed view of the game snapshot served by `GET /api/game`.
//!
//! A snapshot is a complete description of the game at one instant. It is
//! decoded once, never mutated, and replaced wholesale by the next one.

pub mod store;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

pub use store::SnapshotStore;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("acting player index {0} is out of range")]
    ActingPlayer(usize),
}

/// The whole game world as the server sees it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub current_turn: u32,
    pub phase: String,
    pub current_player_index: usize,
    /// Always exactly two seats; anything else fails to decode.
    pub players: [PlayerSnapshot; 2],
    #[serde(default, deserialize_with = "null_as_default")]
    pub available_actions: Vec<String>,
}

impl GameSnapshot {
    /// Decodes and checks a snapshot body.
    pub fn from_json(body: &str) -> Result<Self, SnapshotError> {
        let snapshot: GameSnapshot = serde_json::from_str(body)?;
        if snapshot.current_player_index > 1 {
            return Err(SnapshotError::ActingPlayer(snapshot.current_player_index));
        }
        Ok(snapshot)
    }

    /// The player whose turn it is.
    pub fn acting_player(&self) -> &PlayerSnapshot {
        &self.players[self.current_player_index]
    }

    pub fn opposing_player(&self) -> &PlayerSnapshot {
        &self.players[1 - self.current_player_index]
    }

    /// Whether the server lists `action` (e.g. `"endTurn"`) as available.
    /// A server that sends no list makes no claim, so everything is offered.
    pub fn offers(&self, action: &str) -> bool {
        self.available_actions.is_empty() || self.available_actions.iter().any(|a| a == action)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub hero: Hero,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hand: Vec<Card>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub field: Vec<Minion>,
    pub mana: i32,
    pub total_mana: i32,
    #[serde(default)]
    pub weapon: Option<Weapon>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Hero {
    pub name: String,
    pub health: i32,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Weapon {
    pub name: String,
    #[serde(default)]
    pub attack: i32,
    /// Remaining durability.
    #[serde(default)]
    pub health: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum CardType {
    Minion,
    Spell,
    Weapon,
    Hero,
    #[serde(rename = "Hero Power")]
    HeroPower,
    #[serde(other)]
    Unknown,
}

impl CardType {
    pub fn is_minion(self) -> bool {
        self == CardType::Minion
    }

    /// Glyph shown in the corner of a card.
    pub fn icon(self) -> &'static str {
        match self {
            CardType::Minion | CardType::Unknown => "☺",
            CardType::Spell => "✧",
            CardType::Weapon => "⚔",
            CardType::Hero => "♛",
            CardType::HeroPower => "⚡",
        }
    }
}

/// A card in hand. Its identity is its index in the hand of this snapshot.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Card {
    pub name: String,
    #[serde(default)]
    pub cost: i32,
    #[serde(rename = "type")]
    pub card_type: CardType,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    #[serde(default)]
    attack: i32,
    #[serde(default)]
    health: i32,
}

impl Card {
    pub fn description(&self) -> Option<&str> {
        Some(self.description.trim()).filter(|text| !text.is_empty())
    }

    /// Attack and health, only for cards that carry them onto the board.
    pub fn stats(&self) -> Option<(i32, i32)> {
        match self.card_type {
            CardType::Minion | CardType::Weapon => Some((self.attack, self.health)),
            _ => None,
        }
    }
}

/// A minion on a field. Its identity is its index in the field of this snapshot.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Minion {
    pub name: String,
    pub attack: i32,
    pub health: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub can_attack: bool,
}

// The server encodes empty slices as `null` in places.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}


#[cfg(test)]
mod tests {
    use super::*;

    const SERVER_BODY: &str = r#"{
        "currentTurn": 4,
        "phase": "Main Action",
        "currentPlayerIndex": 1,
        "players": [
            {
                "hero": {"name": "Jaina", "attack": 0, "health": 27, "cost": 0, "type": "Hero", "description": "", "tags": null, "canAttack": false},
                "hand": [],
                "field": [
                    {"name": "Water Elemental", "attack": 3, "health": 6, "cost": 4, "type": "Minion", "description": "Freeze", "tags": [], "canAttack": false}
                ],
                "mana": 0,
                "totalMana": 4
            },
            {
                "hero": {"name": "Thrall", "attack": 0, "health": 30, "cost": 0, "type": "Hero", "description": "", "tags": null, "canAttack": false},
                "hand": [
                    {"name": "Fireball", "attack": 0, "health": 0, "cost": 4, "type": "Spell", "description": "Deal 6 damage.", "tags": [], "canAttack": false},
                    {"name": "Ship's Chirurgeon", "attack": 1, "health": 2, "cost": 1, "type": "Minion", "description": "", "tags": [], "canAttack": false},
                    {"name": "Fiery War Axe", "attack": 3, "health": 2, "cost": 3, "type": "Weapon", "description": "", "tags": [], "canAttack": false},
                    {"name": "Totemic Call", "attack": 0, "health": 0, "cost": 2, "type": "Hero Power", "description": "", "tags": [], "canAttack": false}
                ],
                "field": [
                    {"name": "Scorching Observer", "attack": 7, "health": 9, "cost": 7, "type": "Minion", "description": "", "tags": ["Rush", "Windfury"], "canAttack": true}
                ],
                "mana": 4,
                "totalMana": 4,
                "weapon": {"name": "Fiery War Axe", "attack": 3, "health": 2, "cost": 3, "type": "Weapon", "description": ""}
            }
        ],
        "availableActions": ["playCard", "attack", "endTurn"]
    }"#;

    #[test]
    fn decodes_server_snapshot() {
        let snapshot = GameSnapshot::from_json(SERVER_BODY).unwrap();
        assert_eq!(snapshot.current_turn, 4);
        assert_eq!(snapshot.phase, "Main Action");
        assert_eq!(snapshot.acting_player().hero.name, "Thrall");
        assert_eq!(snapshot.opposing_player().hero.health, 27);
        assert_eq!(snapshot.acting_player().hand.len(), 4);
        assert_eq!(snapshot.acting_player().weapon.as_ref().unwrap().attack, 3);
        assert!(snapshot.offers("endTurn"));
        assert!(!snapshot.offers("heroPower"));

        let observer = &snapshot.acting_player().field[0];
        assert!(observer.can_attack);
        assert_eq!(observer.tags, vec!["Rush", "Windfury"]);
    }

    #[test]
    fn missing_action_list_offers_everything() {
        let body = SERVER_BODY.replace(
            r#""availableActions": ["playCard", "attack", "endTurn"]"#,
            r#""availableActions": null"#,
        );
        let snapshot = GameSnapshot::from_json(&body).unwrap();
        assert!(snapshot.available_actions.is_empty());
        assert!(snapshot.offers("endTurn"));
    }

    #[test]
    fn card_types_and_stats() {
        let snapshot = GameSnapshot::from_json(SERVER_BODY).unwrap();
        let hand = &snapshot.acting_player().hand;

        assert_eq!(hand[0].card_type, CardType::Spell);
        assert_eq!(hand[0].stats(), None);
        assert_eq!(hand[0].description(), Some("Deal 6 damage."));

        assert!(hand[1].card_type.is_minion());
        assert_eq!(hand[1].stats(), Some((1, 2)));
        assert_eq!(hand[1].description(), None);

        assert_eq!(hand[2].stats(), Some((3, 2)));
        assert_eq!(hand[3].card_type, CardType::HeroPower);
        assert_eq!(hand[3].card_type.icon(), "⚡");
    }

    #[test]
    fn unknown_card_type_is_not_a_minion() {
        let card: Card =
            serde_json::from_str(r#"{"name": "Coin", "cost": 0, "type": "Location"}"#).unwrap();
        assert_eq!(card.card_type, CardType::Unknown);
        assert!(!card.card_type.is_minion());
        assert_eq!(card.card_type.icon(), CardType::Minion.icon());
    }

    #[test]
    fn rejects_wrong_player_count() {
        let body = r#"{"currentTurn": 1, "phase": "Main Action", "currentPlayerIndex": 0, "players": []}"#;
        assert!(matches!(
            GameSnapshot::from_json(body),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_acting_player() {
        let body = SERVER_BODY.replace(r#""currentPlayerIndex": 1"#, r#""currentPlayerIndex": 2"#);
        assert!(matches!(
            GameSnapshot::from_json(&body),
            Err(SnapshotError::ActingPlayer(2))
        ));
    }
}
