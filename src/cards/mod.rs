//! Card system: catalog, card instances, and deck generation.
//!
//! ## Key Types
//!
//! - `CatalogEntry`: Static card data (kind, emoji, category)
//! - `Card`: A card in play, with its flip/match flags
//! - `Deck`: The shuffled cards of one round
//!
//! Decks are built by [`generate_deck`] from the fixed [`CATALOG`].

pub mod card;
pub mod catalog;
pub mod deck;

pub use card::{Card, CardId};
pub use catalog::{CatalogEntry, Category, CATALOG};
pub use deck::{generate_deck, Deck};
