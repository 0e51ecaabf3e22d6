//! Deck generation.
//!
//! A deck holds `pairs` distinct catalog entries, each dealt twice, in a
//! uniformly shuffled order. Card ids are the final positions, so
//! `deck[id].id == id` always holds.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId};
use super::catalog::CATALOG;
use crate::core::GameRng;
use crate::error::GameError;

/// The ordered cards of one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs dealt.
    #[must_use]
    pub fn pairs(&self) -> usize {
        self.cards.len() / 2
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    pub fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards that are face up but not matched.
    pub fn pending(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|card| card.is_pending())
    }

    /// Number of matched cards.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_matched).count()
    }

    /// Ids of the other card sharing `id`'s kind.
    #[must_use]
    pub fn partner_of(&self, id: CardId) -> Option<CardId> {
        let card = self.get(id)?;
        self.cards.iter().find(|other| card.pairs_with(other)).map(|other| other.id)
    }
}

impl std::ops::Index<CardId> for Deck {
    type Output = Card;

    fn index(&self, id: CardId) -> &Card {
        &self.cards[id]
    }
}

/// Build a shuffled deck with `pairs` pairs.
///
/// Draws `pairs` distinct catalog entries uniformly without replacement,
/// deals each twice, shuffles, then numbers the cards by position.
///
/// Fails with [`GameError::CatalogExhausted`] when the catalog has fewer
/// than `pairs` entries; the deck is never silently truncated.
pub fn generate_deck(pairs: usize, rng: &mut GameRng) -> Result<Deck, GameError> {
    if pairs > CATALOG.len() {
        return Err(GameError::CatalogExhausted {
            requested: pairs,
            available: CATALOG.len(),
        });
    }

    let picked = rng.sample_indices(CATALOG.len(), pairs);

    let mut entries: Vec<_> = picked.iter().chain(picked.iter()).map(|&i| &CATALOG[i]).collect();
    rng.shuffle(&mut entries);

    let cards = entries
        .into_iter()
        .enumerate()
        .map(|(id, entry)| Card::new(id, entry))
        .collect();

    Ok(Deck { cards })
}
