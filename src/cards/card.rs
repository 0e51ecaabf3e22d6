//! Card instances - one face-down tile in the current round.
//!
//! The catalog entry behind a card never changes; only `is_flipped` and
//! `is_matched` move during play.

use serde::{Deserialize, Serialize};

use super::catalog::{CatalogEntry, Category};

/// Position of a card in the shuffled deck.
pub type CardId = usize;

/// A card in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Position in the shuffled deck; unique within a round.
    pub id: CardId,

    /// Catalog key. Two cards form a pair when their kinds match.
    #[serde(rename = "type")]
    pub kind: String,

    /// Display glyph.
    pub emoji: String,

    pub category: Category,

    /// Face up.
    pub is_flipped: bool,

    /// Part of a found pair. Matched cards stay face up for the rest of
    /// the round.
    pub is_matched: bool,
}

impl Card {
    /// Create a face-down card for a catalog entry.
    #[must_use]
    pub fn new(id: CardId, entry: &CatalogEntry) -> Self {
        Self {
            id,
            kind: entry.kind.to_string(),
            emoji: entry.emoji.to_string(),
            category: entry.category,
            is_flipped: false,
            is_matched: false,
        }
    }

    /// Can this card be turned over right now?
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.is_flipped && !self.is_matched
    }

    /// Face up but not yet part of a found pair.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.is_flipped && !self.is_matched
    }

    /// Do these two cards form a pair?
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.kind == other.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::catalog;

    fn rose(id: CardId) -> Card {
        Card::new(id, catalog::find("rose").unwrap())
    }

    #[test]
    fn test_new_card_is_face_down() {
        let card = rose(3);
        assert_eq!(card.id, 3);
        assert_eq!(card.kind, "rose");
        assert_eq!(card.category, Category::Flower);
        assert!(card.is_selectable());
        assert!(!card.is_pending());
    }

    #[test]
    fn test_state_predicates() {
        let mut card = rose(0);
        card.is_flipped = true;
        assert!(!card.is_selectable());
        assert!(card.is_pending());

        card.is_matched = true;
        assert!(!card.is_selectable());
        assert!(!card.is_pending());
    }

    #[test]
    fn test_pairs_with() {
        let bee = Card::new(2, catalog::find("bee").unwrap());
        assert!(rose(0).pairs_with(&rose(1)));
        assert!(!rose(0).pairs_with(&rose(0)));
        assert!(!rose(0).pairs_with(&bee));
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_value(rose(4)).unwrap();
        assert_eq!(json["type"], "rose");
        assert_eq!(json["isFlipped"], false);
        assert_eq!(json["isMatched"], false);
        assert_eq!(json["category"], "flower");

        let back: Card = serde_json::from_value(json).unwrap();
        assert_eq!(back, rose(4));
    }
}
