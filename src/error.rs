use thiserror::Error;

use crate::card::CardId;

/// Malformed requests to the deck engine.
///
/// An illegal-but-well-formed move is not an error: `Deck::make_move`
/// reports it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("card id {0} is outside the deck")]
    InvalidCardId(CardId),

    #[error("card {0} is no longer in play")]
    CardNotInPlay(CardId),

    #[error("a card cannot cover itself (distance 0)")]
    ZeroDistance,

    #[error("undo record for position {position} (distance {distance}) does not fit a sequence of {len} cards")]
    UndoOutOfRange {
        position: usize,
        distance: usize,
        len: usize,
    },
}
