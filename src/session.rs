use tracing::{debug, info};

use crate::card::CardId;
use crate::deck::{Deck, UndoRecord};
use crate::error::EngineError;
use crate::hints::{self, DisplayState, HintCombination, HintFilters};

/// What a click on a card did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing was selected; the card is now the selection.
    Selected(CardId),
    /// The selection covered the clicked card.
    Moved(UndoRecord),
    /// The clicked card was not a cover target; the selection was dropped.
    Deselected,
}

/// Everything one game needs besides the renderer: the deck, the undo
/// stack, the current selection and the hint panel.
#[derive(Debug, Clone)]
pub struct Session {
    deck: Deck,
    history: Vec<UndoRecord>,
    selected: Option<CardId>,
    pub filters: HintFilters,
    pub combination: HintCombination,
}

impl Session {
    pub fn new(deck: Deck, combination: HintCombination) -> Self {
        Session {
            deck,
            history: Vec::new(),
            selected: None,
            filters: HintFilters::default(),
            combination,
        }
    }

    /// Deal a new shuffled game. Hint settings survive a restart.
    pub fn restart<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.deck = Deck::shuffled(rng);
        self.history.clear();
        self.selected = None;
        info!("new game dealt");
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn selected(&self) -> Option<CardId> {
        self.selected
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn is_over(&self) -> bool {
        self.deck.is_game_over()
    }

    pub fn display_state(&self) -> DisplayState {
        hints::display_state(&self.deck, self.selected, &self.filters, self.combination)
    }

    // -------------------------------------------------------------------------
    // Player actions
    // -------------------------------------------------------------------------

    /// Two-step move: the first click selects a card, the second click
    /// either lands on a highlighted cover target or cancels.
    pub fn click(&mut self, id: CardId) -> Result<ClickOutcome, EngineError> {
        if self.deck.id_to_position(id).is_none() {
            return Err(if id.is_valid() {
                EngineError::CardNotInPlay(id)
            } else {
                EngineError::InvalidCardId(id)
            });
        }

        let Some(selected) = self.selected.take() else {
            self.selected = Some(id);
            debug!(card = %id, "card selected");
            return Ok(ClickOutcome::Selected(id));
        };

        let Some(distance) = [1, 3]
            .into_iter()
            .find(|&d| self.deck.cover_target(selected, d) == Some(id))
        else {
            return Ok(ClickOutcome::Deselected);
        };

        match self.play(selected, distance)? {
            Some(record) => Ok(ClickOutcome::Moved(record)),
            None => Ok(ClickOutcome::Deselected),
        }
    }

    /// Apply a move directly and remember it for undo.
    pub fn play(&mut self, id: CardId, distance: usize) -> Result<Option<UndoRecord>, EngineError> {
        self.selected = None;
        let record = self.deck.make_move(id, distance)?;
        if let Some(record) = record {
            self.history.push(record);
            if self.deck.is_game_over() {
                info!(moves = self.history.len(), "game over");
            }
        }
        Ok(record)
    }

    /// Undo the latest move. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool, EngineError> {
        self.selected = None;
        let Some(record) = self.history.pop() else {
            return Ok(false);
        };
        if let Err(e) = self.deck.undo_move(&record) {
            self.history.push(record);
            return Err(e);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;
    use rand::SeedableRng;

    fn id(label: &str) -> CardId {
        label.parse::<Card>().unwrap().id
    }

    fn session(labels: &[&str]) -> Session {
        let cards = labels.iter().map(|l| l.parse::<Card>().unwrap()).collect();
        Session::new(Deck::from_cards(cards), HintCombination::Or)
    }

    #[test]
    fn select_then_cover_one_back() {
        let mut s = session(&["5D", "KS", "5S", "5H"]);
        assert_eq!(s.click(id("5H")), Ok(ClickOutcome::Selected(id("5H"))));
        assert_eq!(s.selected(), Some(id("5H")));

        let outcome = s.click(id("5S")).unwrap();
        let ClickOutcome::Moved(record) = outcome else {
            panic!("expected a move, got {outcome:?}");
        };
        assert_eq!(record.distance, 1);
        assert_eq!(s.selected(), None);
        assert_eq!(s.deck().len(), 3);
        assert!(s.can_undo());
    }

    #[test]
    fn select_then_cover_three_back() {
        let mut s = session(&["5D", "KS", "5S", "5H"]);
        s.click(id("5H")).unwrap();
        let outcome = s.click(id("5D")).unwrap();
        assert!(matches!(outcome, ClickOutcome::Moved(r) if r.distance == 3));
        assert_eq!(s.deck().cards()[0].id, id("5H"));
    }

    #[test]
    fn clicking_a_non_target_cancels() {
        let mut s = session(&["5D", "KS", "5S", "5H"]);
        s.click(id("5H")).unwrap();
        assert_eq!(s.click(id("KS")), Ok(ClickOutcome::Deselected));
        assert_eq!(s.selected(), None);
        assert_eq!(s.deck().len(), 4);
        assert!(!s.can_undo());
    }

    #[test]
    fn clicking_a_removed_card_is_an_error() {
        let mut s = session(&["5D", "5S"]);
        s.play(id("5S"), 1).unwrap().unwrap();
        assert_eq!(s.click(id("5D")), Err(EngineError::CardNotInPlay(id("5D"))));
        assert_eq!(s.click(CardId(77)), Err(EngineError::InvalidCardId(CardId(77))));
    }

    #[test]
    fn undo_is_lifo_and_exhausts() {
        let mut s = session(&["AS", "2S", "3S"]);
        let start = s.deck().clone();
        s.play(id("3S"), 1).unwrap().unwrap();
        let middle = s.deck().clone();
        s.play(id("3S"), 1).unwrap().unwrap();
        assert!(s.is_over());

        assert_eq!(s.undo(), Ok(true));
        assert_eq!(s.deck(), &middle);
        assert_eq!(s.undo(), Ok(true));
        assert_eq!(s.deck(), &start);
        assert_eq!(s.undo(), Ok(false));
    }

    #[test]
    fn illegal_play_is_not_recorded() {
        let mut s = session(&["AS", "2H"]);
        assert_eq!(s.play(id("2H"), 1), Ok(None));
        assert!(!s.can_undo());
    }

    #[test]
    fn restart_clears_history_but_keeps_hints() {
        let mut s = Session::new(Deck::shuffled_with_seed(3), HintCombination::And);
        let mv = s.deck().ids_of_move(1).first().copied();
        if let Some(mv) = mv {
            s.play(mv.clicked, 1).unwrap();
        }
        s.filters.toggle_move(1).unwrap();
        s.click(s.deck().cards()[0].id).unwrap();

        let mut rng = rand::rngs::SmallRng::seed_from_u64(9);
        s.restart(&mut rng);
        assert_eq!(s.deck().len(), 52);
        assert!(!s.can_undo());
        assert_eq!(s.selected(), None);
        assert!(s.filters.move_one);
        assert_eq!(s.combination, HintCombination::And);
    }
}
