use rand::SeedableRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::card::{Card, CardId, Rank, Suit, full_deck};
use crate::error::EngineError;

/// Everything needed to reverse one applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoRecord {
    /// The card that was moved onto the earlier slot.
    pub moved: Card,
    /// Position of `moved` before the move.
    pub position: usize,
    pub distance: usize,
    /// The card that was covered and dropped from the sequence.
    pub covered: Card,
}

/// A currently legal move, addressed by card ids only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePair {
    pub clicked: CardId,
    pub covered: CardId,
}

/// The live card sequence.
///
/// Positions are internal; callers address cards by `CardId`. History is
/// not kept here: each successful move hands back an `UndoRecord` and the
/// caller replays those in LIFO order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    // -------------------------------------------------------------------------
    // Construction / Shuffling
    // -------------------------------------------------------------------------

    /// A fresh, unshuffled deck in suit-major, rank-minor order.
    pub fn new() -> Self {
        Deck { cards: full_deck() }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::new();
        deck.shuffle(rng);
        deck
    }

    /// Deal from a specific seed (reproducible games).
    #[allow(dead_code)]
    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Uniform in-place permutation (Fisher–Yates).
    pub fn shuffle<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Build a deck from an explicit sequence (for testing).
    #[cfg(test)]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Deck { cards }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// The game ends when a single card is left.
    pub fn is_game_over(&self) -> bool {
        self.cards.len() == 1
    }

    /// Current index of the card with `id`, if it is still in play.
    pub fn id_to_position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    pub fn card(&self, id: CardId) -> Option<Card> {
        self.id_to_position(id).map(|pos| self.cards[pos])
    }

    // -------------------------------------------------------------------------
    // Move Validation
    // -------------------------------------------------------------------------

    pub fn card_match(a: Card, b: Card) -> bool {
        a.rank == b.rank || a.suit == b.suit
    }

    /// Can the card at `position` cover the card `distance` places earlier?
    ///
    /// Out-of-range positions and a zero distance are simply not valid.
    pub fn is_valid_move(&self, position: usize, distance: usize) -> bool {
        if distance == 0 || position >= self.cards.len() || position < distance {
            return false;
        }
        Self::card_match(self.cards[position], self.cards[position - distance])
    }

    // -------------------------------------------------------------------------
    // Move Execution
    // -------------------------------------------------------------------------

    /// Move card `id` onto the card `distance` places earlier.
    ///
    /// Returns `Ok(None)` without touching the sequence when the move is not
    /// legal. Errors are reserved for malformed requests.
    pub fn make_move(
        &mut self,
        id: CardId,
        distance: usize,
    ) -> Result<Option<UndoRecord>, EngineError> {
        if distance == 0 {
            return Err(EngineError::ZeroDistance);
        }
        if !id.is_valid() {
            return Err(EngineError::InvalidCardId(id));
        }
        let position = self
            .id_to_position(id)
            .ok_or(EngineError::CardNotInPlay(id))?;

        if !self.is_valid_move(position, distance) {
            return Ok(None);
        }

        let target = position - distance;
        let record = UndoRecord {
            moved: self.cards[position],
            position,
            distance,
            covered: self.cards[target],
        };
        self.cards[target] = record.moved;
        self.cards.remove(position);

        debug!(
            moved = %record.moved,
            covered = %record.covered,
            distance,
            remaining = self.cards.len(),
            "move applied"
        );
        Ok(Some(record))
    }

    /// Reverse the most recent move described by `record`.
    ///
    /// Records must be replayed newest first; the deck does not check
    /// that, only that the record fits the current sequence.
    pub fn undo_move(&mut self, record: &UndoRecord) -> Result<(), EngineError> {
        let len = self.cards.len();
        if record.distance == 0 || record.position > len || record.position < record.distance {
            return Err(EngineError::UndoOutOfRange {
                position: record.position,
                distance: record.distance,
                len,
            });
        }

        self.cards.insert(record.position, record.moved);
        self.cards[record.position - record.distance] = record.covered;

        debug!(
            moved = %record.moved,
            covered = %record.covered,
            distance = record.distance,
            "move undone"
        );
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Ids of every card whose rank is in `ranks`, in sequence order.
    pub fn ids_of_rank(&self, ranks: &[Rank]) -> Vec<CardId> {
        self.cards
            .iter()
            .filter(|c| ranks.contains(&c.rank))
            .map(|c| c.id)
            .collect()
    }

    /// Ids of every card whose suit is in `suits`, in sequence order.
    pub fn ids_of_suit(&self, suits: &[Suit]) -> Vec<CardId> {
        self.cards
            .iter()
            .filter(|c| suits.contains(&c.suit))
            .map(|c| c.id)
            .collect()
    }

    /// Every legal move at a fixed `distance`.
    pub fn ids_of_move(&self, distance: usize) -> Vec<MovePair> {
        (0..self.cards.len())
            .filter(|&pos| self.is_valid_move(pos, distance))
            .map(|pos| MovePair {
                clicked: self.cards[pos].id,
                covered: self.cards[pos - distance].id,
            })
            .collect()
    }

    /// The card `id` could cover at `distance`, if that move is legal.
    pub fn cover_target(&self, id: CardId, distance: usize) -> Option<CardId> {
        let pos = self.id_to_position(id)?;
        self.is_valid_move(pos, distance)
            .then(|| self.cards[pos - distance].id)
    }
}
