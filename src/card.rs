use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The four suits, in the order the deck is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Diamonds,
    Hearts,
    Spades,
    Clubs,
}

impl Suit {
    /// All four suits, in canonical order.
    pub const ALL: [Suit; 4] = [Suit::Diamonds, Suit::Hearts, Suit::Spades, Suit::Clubs];

    /// Single-character symbol used in CLI rendering.
    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Diamonds => "D",
            Suit::Hearts => "H",
            Suit::Spades => "S",
            Suit::Clubs => "C",
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Diamonds | Suit::Hearts)
    }
}

impl FromStr for Suit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "d" | "diamonds" => Ok(Suit::Diamonds),
            "h" | "hearts" => Ok(Suit::Hearts),
            "s" | "spades" => Ok(Suit::Spades),
            "c" | "clubs" => Ok(Suit::Clubs),
            _ => Err(format!("'{}' is not a valid suit. Use d, h, s or c.", s)),
        }
    }
}

/// The thirteen ranks, ace low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

impl FromStr for Rank {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        if upper == "T" {
            return Ok(Rank::Ten);
        }
        Rank::ALL
            .iter()
            .copied()
            .find(|r| r.symbol() == upper)
            .ok_or_else(|| format!("'{}' is not a valid rank. Use A, 2-10, J, Q or K.", s))
    }
}

/// Stable identity of a card: `suit_index * 13 + rank_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u8);

impl CardId {
    /// Number of distinct ids (and cards in a full deck).
    pub const COUNT: u8 = 52;

    pub fn of(rank: Rank, suit: Suit) -> Self {
        CardId(suit.index() * 13 + rank.index())
    }

    pub fn is_valid(self) -> bool {
        self.0 < Self::COUNT
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    pub id: CardId,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card {
            rank,
            suit,
            id: CardId::of(rank, suit),
        }
    }

    pub fn is_red(self) -> bool {
        self.suit.is_red()
    }

    pub fn label(self) -> String {
        format!("{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Parses a label such as `QS`, `10h` or `th`. The last character is the suit.
impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some(split) = s.char_indices().last().map(|(i, _)| i) else {
            return Err("Empty card label".to_string());
        };
        if split == 0 {
            return Err(format!("'{}' is not a card. Try e.g. QS or 10H.", s));
        }
        let rank: Rank = s[..split].parse()?;
        let suit: Suit = s[split..].parse()?;
        Ok(Card::new(rank, suit))
    }
}

pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(CardId::COUNT as usize);

    for &suit in &Suit::ALL {
        for &rank in &Rank::ALL {
            deck.push(Card::new(rank, suit));
        }
    }

    debug_assert_eq!(deck.len(), 52, "Deck must have exactly 52 cards");
    deck
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn red_suits_are_diamonds_and_hearts() {
        assert!(Card::new(Rank::Two, Suit::Diamonds).is_red());
        assert!(Card::new(Rank::King, Suit::Hearts).is_red());
        assert!(!Card::new(Rank::Ace, Suit::Spades).is_red());
        assert!(!Card::new(Rank::Ten, Suit::Clubs).is_red());
    }

    #[test]
    fn ids_follow_suit_major_order() {
        assert_eq!(Card::new(Rank::Ace, Suit::Diamonds).id, CardId(0));
        assert_eq!(Card::new(Rank::King, Suit::Diamonds).id, CardId(12));
        assert_eq!(Card::new(Rank::Ace, Suit::Hearts).id, CardId(13));
        assert_eq!(Card::new(Rank::King, Suit::Clubs).id, CardId(51));
    }

    #[test]
    fn full_deck_enumerates_every_pair_once() {
        let deck = full_deck();
        assert_eq!(deck.len(), 52);
        for (i, card) in deck.iter().enumerate() {
            assert_eq!(card.id.0 as usize, i);
        }
        let mut pairs: Vec<_> = deck.iter().map(|c| (c.suit, c.rank)).collect();
        pairs.sort();
        pairs.dedup();
        assert_eq!(pairs.len(), 52);
    }

    #[test]
    fn labels_parse_back() {
        assert_eq!("QS".parse::<Card>(), Ok(Card::new(Rank::Queen, Suit::Spades)));
        assert_eq!("10h".parse::<Card>(), Ok(Card::new(Rank::Ten, Suit::Hearts)));
        assert_eq!("td".parse::<Card>(), Ok(Card::new(Rank::Ten, Suit::Diamonds)));
        assert_eq!(Card::new(Rank::Ten, Suit::Clubs).to_string(), "10C");
    }

    #[test]
    fn bad_labels_are_rejected() {
        assert!("".parse::<Card>().is_err());
        assert!("Q".parse::<Card>().is_err());
        assert!("1S".parse::<Card>().is_err());
        assert!("QX".parse::<Card>().is_err());
    }
}
