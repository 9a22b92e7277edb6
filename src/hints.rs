//! Hint filters and the per-card display state derived from them.
//!
//! Nothing here mutates the deck: the renderer asks for a `DisplayState`
//! after every event and draws whatever tags it finds.

use std::collections::{BTreeMap, BTreeSet};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::card::{CardId, Rank, Suit};
use crate::deck::Deck;

/// How the results of several active filters are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HintCombination {
    /// Hint a card only when every active filter selects it.
    And,
    /// Hint a card when any active filter selects it.
    #[default]
    Or,
}

impl HintCombination {
    pub fn toggled(self) -> Self {
        match self {
            HintCombination::And => HintCombination::Or,
            HintCombination::Or => HintCombination::And,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HintCombination::And => "AND",
            HintCombination::Or => "OR",
        }
    }
}

/// The checkbox state of the hint panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintFilters {
    pub ranks: BTreeSet<Rank>,
    pub suits: BTreeSet<Suit>,
    pub move_one: bool,
    pub move_three: bool,
}

impl HintFilters {
    pub fn toggle_rank(&mut self, rank: Rank) {
        if !self.ranks.remove(&rank) {
            self.ranks.insert(rank);
        }
    }

    pub fn toggle_suit(&mut self, suit: Suit) {
        if !self.suits.remove(&suit) {
            self.suits.insert(suit);
        }
    }

    pub fn toggle_move(&mut self, distance: usize) -> Result<(), String> {
        match distance {
            1 => self.move_one = !self.move_one,
            3 => self.move_three = !self.move_three,
            other => return Err(format!("Move hints exist for distance 1 or 3, not {}", other)),
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = HintFilters::default();
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty() && self.suits.is_empty() && !self.move_one && !self.move_three
    }
}

/// Visual markers a card can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Selected,
    Hint,
    NoHint,
    MoveOne,
    MoveThree,
}

pub type DisplayState = BTreeMap<CardId, BTreeSet<Tag>>;

/// One id list per active filter category, in rank/suit/move-1/move-3 order.
pub fn hint_sets(deck: &Deck, filters: &HintFilters) -> Vec<Vec<CardId>> {
    let mut sets = Vec::new();
    if !filters.ranks.is_empty() {
        let ranks: Vec<Rank> = filters.ranks.iter().copied().collect();
        sets.push(deck.ids_of_rank(&ranks));
    }
    if !filters.suits.is_empty() {
        let suits: Vec<Suit> = filters.suits.iter().copied().collect();
        sets.push(deck.ids_of_suit(&suits));
    }
    if filters.move_one {
        sets.push(deck.ids_of_move(1).into_iter().map(|m| m.clicked).collect());
    }
    if filters.move_three {
        sets.push(deck.ids_of_move(3).into_iter().map(|m| m.clicked).collect());
    }
    sets
}

/// Map every card in play to its display tags.
///
/// Hint/NoHint are only assigned when some active filter matched at least
/// one card. A selected card marks the cards it may cover.
pub fn display_state(
    deck: &Deck,
    selected: Option<CardId>,
    filters: &HintFilters,
    combination: HintCombination,
) -> DisplayState {
    let mut state: DisplayState = deck
        .cards()
        .iter()
        .map(|c| (c.id, BTreeSet::new()))
        .collect();

    let sets = hint_sets(deck, filters);
    if sets.iter().any(|s| !s.is_empty()) {
        for (id, tags) in state.iter_mut() {
            let shown = match combination {
                HintCombination::And => sets.iter().all(|s| s.contains(id)),
                HintCombination::Or => sets.iter().any(|s| s.contains(id)),
            };
            tags.insert(if shown { Tag::Hint } else { Tag::NoHint });
        }
    }

    if let Some(sel) = selected {
        if let Some(tags) = state.get_mut(&sel) {
            tags.insert(Tag::Selected);
        }
        for (distance, tag) in [(1, Tag::MoveOne), (3, Tag::MoveThree)] {
            if let Some(target) = deck.cover_target(sel, distance) {
                if let Some(tags) = state.get_mut(&target) {
                    tags.insert(tag);
                }
            }
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;

    fn deck(labels: &[&str]) -> Deck {
        Deck::from_cards(labels.iter().map(|l| l.parse::<Card>().unwrap()).collect())
    }

    fn id(label: &str) -> CardId {
        label.parse::<Card>().unwrap().id
    }

    fn tagged(state: &DisplayState, tag: Tag) -> Vec<CardId> {
        state
            .iter()
            .filter(|(_, tags)| tags.contains(&tag))
            .map(|(id, _)| *id)
            .collect()
    }

    #[test]
    fn no_filters_no_hint_tags() {
        let d = deck(&["AS", "2H", "3C"]);
        let state = display_state(&d, None, &HintFilters::default(), HintCombination::Or);
        assert_eq!(state.len(), 3);
        assert!(state.values().all(|t| t.is_empty()));
    }

    #[test]
    fn or_combines_rank_and_suit() {
        let d = deck(&["AS", "2H", "3C", "AD"]);
        let mut filters = HintFilters::default();
        filters.toggle_rank(Rank::Ace);
        filters.toggle_suit(Suit::Hearts);

        let state = display_state(&d, None, &filters, HintCombination::Or);
        let mut expected = vec![id("AS"), id("2H"), id("AD")];
        expected.sort();
        assert_eq!(tagged(&state, Tag::Hint), expected);
        assert_eq!(tagged(&state, Tag::NoHint), vec![id("3C")]);
    }

    #[test]
    fn and_requires_every_filter() {
        let d = deck(&["AS", "2H", "AH", "AD"]);
        let mut filters = HintFilters::default();
        filters.toggle_rank(Rank::Ace);
        filters.toggle_suit(Suit::Hearts);

        let state = display_state(&d, None, &filters, HintCombination::And);
        assert_eq!(tagged(&state, Tag::Hint), vec![id("AH")]);
        assert_eq!(tagged(&state, Tag::NoHint).len(), 3);
    }

    #[test]
    fn empty_results_leave_cards_untagged() {
        let d = deck(&["AS", "2H"]);
        let mut filters = HintFilters::default();
        filters.toggle_rank(Rank::King);
        let state = display_state(&d, None, &filters, HintCombination::And);
        assert!(state.values().all(|t| t.is_empty()));
    }

    #[test]
    fn move_filters_hint_the_clicked_cards() {
        let d = deck(&["5D", "KS", "QC", "5H", "2D"]);
        let mut filters = HintFilters::default();
        filters.toggle_move(3).unwrap();
        let state = display_state(&d, None, &filters, HintCombination::Or);
        assert_eq!(tagged(&state, Tag::Hint), vec![id("5H")]);

        filters.toggle_move(1).unwrap();
        let state = display_state(&d, None, &filters, HintCombination::Or);
        // No adjacent pair matches.
        assert_eq!(tagged(&state, Tag::Hint), vec![id("5H")]);
        assert!(filters.toggle_move(2).is_err());
    }

    #[test]
    fn selection_marks_cover_targets() {
        let d = deck(&["5D", "KS", "5S", "5H"]);
        let state = display_state(&d, Some(id("5H")), &HintFilters::default(), HintCombination::Or);
        assert_eq!(tagged(&state, Tag::Selected), vec![id("5H")]);
        assert_eq!(tagged(&state, Tag::MoveOne), vec![id("5S")]);
        assert_eq!(tagged(&state, Tag::MoveThree), vec![id("5D")]);
    }

    #[test]
    fn toggling_twice_clears() {
        let mut filters = HintFilters::default();
        filters.toggle_rank(Rank::Two);
        filters.toggle_suit(Suit::Clubs);
        filters.toggle_rank(Rank::Two);
        assert!(!filters.is_empty());
        filters.clear();
        assert!(filters.is_empty());
        assert_eq!(HintCombination::And.toggled(), HintCombination::Or);
    }
}
