//! The match engine: one round of play.
//!
//! A `Session` owns the deck, the current selection, the score and the
//! countdown. It is a plain state machine; it never schedules anything
//! itself. The caller starts the clock ticking when [`PressOutcome`] says
//! so and calls [`Session::resolve`] once the display delay has passed.
//!
//! ## Phases
//!
//! - `Idle`: nothing face up
//! - `OneFlipped`: one card selected
//! - `Resolving`: two cards selected, waiting for `resolve`
//! - `RoundOver`: won or out of time; every press is ignored
//!
//! Presses that do not fit the current phase are ignored and leave the
//! session untouched.

use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::clock::{ClockTick, SessionClock};
use crate::cards::{generate_deck, CardId, Category, Deck};
use crate::core::{DifficultyProfile, GameRng};
use crate::error::GameError;

/// Where a session is in its turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchPhase {
    Idle,
    OneFlipped,
    Resolving,
    RoundOver,
}

/// Why a press was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    RoundOver,
    Resolving,
    UnknownCard,
    AlreadyFlipped,
    AlreadyMatched,
}

/// What a press did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// The first card of a pair is face up.
    Flipped {
        card: CardId,
        /// This press started the countdown.
        started_clock: bool,
    },
    /// The second card is face up; call `resolve` after the display delay.
    PairSelected { first: CardId, second: CardId },
}

impl PressOutcome {
    /// Did the press turn a card over?
    #[must_use]
    pub fn flipped(&self) -> bool {
        !matches!(self, PressOutcome::Ignored(_))
    }
}

/// Result of resolving a selected pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Same kind: both cards stay face up for good.
    Match {
        first: CardId,
        second: CardId,
        kind: String,
        emoji: String,
        category: Category,
        /// This match found the last pair.
        won: bool,
    },
    /// Different kinds: both cards are face down again.
    Mismatch { first: CardId, second: CardId },
}

/// One round of the matching game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    profile: DifficultyProfile,
    deck: Deck,
    selection: SmallVec<[CardId; 2]>,
    score: usize,
    clock: SessionClock,
    over: bool,
    won: bool,
}

impl Session {
    /// Deal a fresh round.
    pub fn new(profile: DifficultyProfile, rng: &mut GameRng) -> Result<Self, GameError> {
        let deck = generate_deck(profile.pairs, rng)?;
        Ok(Self::with_deck(profile, deck))
    }

    /// Start a round on an existing deck.
    ///
    /// The deck's pair count wins over `profile.pairs` for win detection.
    #[must_use]
    pub fn with_deck(profile: DifficultyProfile, deck: Deck) -> Self {
        let profile = DifficultyProfile::new(deck.pairs(), profile.time_limit_seconds);
        Self {
            profile,
            deck,
            selection: SmallVec::new(),
            score: 0,
            clock: SessionClock::new(profile.time_limit_seconds),
            over: false,
            won: false,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        if self.over {
            MatchPhase::RoundOver
        } else {
            match self.selection.len() {
                0 => MatchPhase::Idle,
                1 => MatchPhase::OneFlipped,
                _ => MatchPhase::Resolving,
            }
        }
    }

    /// Pair count and time limit for this round.
    #[must_use]
    pub fn profile(&self) -> DifficultyProfile {
        self.profile
    }

    /// The cards, indexed by id.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Selected card ids, in press order. Never more than two.
    #[must_use]
    pub fn selection(&self) -> &[CardId] {
        &self.selection
    }

    /// Pairs found so far.
    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    /// Seconds left on the clock.
    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.clock.time_remaining()
    }

    /// Has the first card been flipped?
    #[must_use]
    pub fn started(&self) -> bool {
        self.clock.started()
    }

    /// Has the round ended, by a win or by running out of time?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Were all pairs found?
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// The countdown.
    #[must_use]
    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    // === Transitions ===

    /// Handle a press on `card_id`.
    pub fn press(&mut self, card_id: CardId) -> PressOutcome {
        if let Some(reason) = self.press_blocker(card_id) {
            debug!("press on card {card_id} ignored: {reason:?}");
            return PressOutcome::Ignored(reason);
        }

        if let Some(card) = self.deck.get_mut(card_id) {
            card.is_flipped = true;
        }
        self.selection.push(card_id);

        match self.selection[..] {
            [first, second] => PressOutcome::PairSelected { first, second },
            _ => PressOutcome::Flipped {
                card: card_id,
                started_clock: self.clock.start(),
            },
        }
    }

    fn press_blocker(&self, card_id: CardId) -> Option<IgnoreReason> {
        if self.over {
            return Some(IgnoreReason::RoundOver);
        }
        if self.selection.len() >= 2 {
            return Some(IgnoreReason::Resolving);
        }
        let Some(card) = self.deck.get(card_id) else {
            return Some(IgnoreReason::UnknownCard);
        };
        if card.is_matched {
            Some(IgnoreReason::AlreadyMatched)
        } else if card.is_flipped {
            Some(IgnoreReason::AlreadyFlipped)
        } else {
            None
        }
    }

    /// Resolve the selected pair.
    ///
    /// Returns `None` unless two cards are selected. Both cards are read
    /// and written in this one call.
    pub fn resolve(&mut self) -> Option<Resolution> {
        let [first, second] = self.selection[..] else {
            return None;
        };
        self.selection.clear();

        let is_pair = self.deck[first].pairs_with(&self.deck[second]);
        if !is_pair {
            for id in [first, second] {
                if let Some(card) = self.deck.get_mut(id) {
                    card.is_flipped = false;
                }
            }
            debug!("cards {first} and {second} do not match");
            return Some(Resolution::Mismatch { first, second });
        }

        for id in [first, second] {
            if let Some(card) = self.deck.get_mut(id) {
                card.is_matched = true;
            }
        }
        self.score += 1;

        let won = self.score == self.profile.pairs;
        if won {
            self.won = true;
            self.over = true;
        }

        let card = &self.deck[first];
        debug!("cards {first} and {second} match ({}), score {}", card.kind, self.score);
        Some(Resolution::Match {
            first,
            second,
            kind: card.kind.clone(),
            emoji: card.emoji.clone(),
            category: card.category,
            won,
        })
    }

    /// Advance the countdown by one second.
    ///
    /// When time runs out the round ends and any unresolved selection is
    /// turned back face down.
    pub fn tick(&mut self) -> ClockTick {
        if self.over {
            return ClockTick::Idle;
        }

        let tick = self.clock.tick();
        if tick == ClockTick::Expired {
            self.over = true;
            for id in self.selection.drain(..) {
                if let Some(card) = self.deck.get_mut(id) {
                    card.is_flipped = false;
                }
            }
            debug!("time up with score {}", self.score);
        }
        tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Difficulty;

    fn medium(seed: u64) -> Session {
        Session::new(Difficulty::Medium.profile(), &mut GameRng::new(seed)).unwrap()
    }

    /// (a, b) of the same kind and a card of a different kind.
    fn pair_and_odd(session: &Session) -> (CardId, CardId, CardId) {
        let a = 0;
        let b = session.deck().partner_of(a).unwrap();
        let odd = (1..session.deck().len()).find(|&i| i != b).unwrap();
        (a, b, odd)
    }

    #[test]
    fn test_new_session() {
        let session = medium(1);
        assert_eq!(session.deck().len(), 16);
        assert_eq!(session.phase(), MatchPhase::Idle);
        assert_eq!(session.score(), 0);
        assert_eq!(session.time_remaining(), 45);
        assert!(!session.started());
        assert!(!session.is_over());
    }

    #[test]
    fn test_first_press_starts_clock() {
        let mut session = medium(1);
        assert_eq!(
            session.press(3),
            PressOutcome::Flipped { card: 3, started_clock: true }
        );
        assert!(session.started());
        assert_eq!(session.phase(), MatchPhase::OneFlipped);
        assert!(session.deck()[3].is_flipped);
    }

    #[test]
    fn test_match_flow() {
        let mut session = medium(2);
        let (a, b, _) = pair_and_odd(&session);

        session.press(a);
        assert_eq!(session.press(b), PressOutcome::PairSelected { first: a, second: b });
        assert_eq!(session.phase(), MatchPhase::Resolving);

        let resolution = session.resolve().unwrap();
        assert!(matches!(resolution, Resolution::Match { won: false, .. }));
        assert!(session.deck()[a].is_matched);
        assert!(session.deck()[b].is_matched);
        assert_eq!(session.score(), 1);
        assert_eq!(session.phase(), MatchPhase::Idle);
    }

    #[test]
    fn test_mismatch_flow() {
        let mut session = medium(3);
        let (a, _, odd) = pair_and_odd(&session);

        session.press(a);
        session.press(odd);
        assert_eq!(session.resolve(), Some(Resolution::Mismatch { first: a, second: odd }));

        assert!(!session.deck()[a].is_flipped);
        assert!(!session.deck()[odd].is_flipped);
        assert_eq!(session.score(), 0);
        assert_eq!(session.phase(), MatchPhase::Idle);
    }

    #[test]
    fn test_press_while_resolving_ignored() {
        let mut session = medium(4);
        let (a, b, odd) = pair_and_odd(&session);
        session.press(a);
        session.press(b);

        let before = session.clone();
        assert_eq!(session.press(odd), PressOutcome::Ignored(IgnoreReason::Resolving));
        assert_eq!(session, before);
    }

    #[test]
    fn test_press_same_card_twice_ignored() {
        let mut session = medium(5);
        session.press(0);
        let before = session.clone();
        assert_eq!(session.press(0), PressOutcome::Ignored(IgnoreReason::AlreadyFlipped));
        assert_eq!(session, before);
    }

    #[test]
    fn test_unknown_card_ignored() {
        let mut session = medium(5);
        assert_eq!(session.press(999), PressOutcome::Ignored(IgnoreReason::UnknownCard));
        assert!(!session.started());
    }

    #[test]
    fn test_resolve_without_pair() {
        let mut session = medium(6);
        assert_eq!(session.resolve(), None);
        session.press(0);
        assert_eq!(session.resolve(), None);
        assert_eq!(session.selection(), &[0]);
    }

    #[test]
    fn test_timeout_turns_selection_down() {
        let profile = DifficultyProfile::new(8, 1);
        let mut session = Session::new(profile, &mut GameRng::new(7)).unwrap();
        let (a, _, odd) = pair_and_odd(&session);

        session.press(a);
        session.press(odd);
        assert_eq!(session.tick(), ClockTick::Expired);

        assert!(session.is_over());
        assert!(!session.is_won());
        assert!(session.selection().is_empty());
        assert_eq!(session.deck().pending().count(), 0);
        assert_eq!(session.resolve(), None);
        assert_eq!(session.press(a), PressOutcome::Ignored(IgnoreReason::RoundOver));
    }

    #[test]
    fn test_tick_after_over_is_idle() {
        let profile = DifficultyProfile::new(6, 1);
        let mut session = Session::new(profile, &mut GameRng::new(8)).unwrap();
        session.press(0);
        session.tick();
        assert_eq!(session.tick(), ClockTick::Idle);
    }

    #[test]
    fn test_with_deck_uses_deck_pairs() {
        let deck = generate_deck(2, &mut GameRng::new(1)).unwrap();
        let session = Session::with_deck(Difficulty::Hard.profile(), deck);
        assert_eq!(session.profile().pairs, 2);
        assert_eq!(session.time_remaining(), 30);
    }
}
