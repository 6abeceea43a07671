use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Number of ranks in a standard deck.
pub const SYMBOL_COUNT: u16 = 13;
/// Number of suits in a standard deck.
pub const SUIT_COUNT: u16 = 4;

/// Represents one of the four suits of the standard layout, in encoding order.
/// A card's suit index is `card / rank_count`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Spades (♠), suit index 0
    Spades = 0,
    /// Hearts (♥), suit index 1
    Hearts,
    /// Clubs (♣), suit index 2
    Clubs,
    /// Diamonds (♦), suit index 3
    Diamonds,
}

/// Represents the rank (face value) of a card from Two through Ace.
/// Discriminants are the 0-indexed rank used by the card encoding.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 0,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace, always the top rank
    Ace,
}

impl Suit {
    pub fn from_index(v: u16) -> Option<Suit> {
        all_suits().get(v as usize).copied()
    }

    pub fn index(self) -> u16 {
        self as u16
    }
}

impl Rank {
    pub fn from_index(v: u16) -> Option<Rank> {
        all_ranks().get(v as usize).copied()
    }

    pub fn index(self) -> u16 {
        self as u16
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds]
}

pub fn all_ranks() -> [Rank; 13] {
    [
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
        Rank::Ace,
    ]
}

/// A single card, encoded as an integer in `[0, suit_count * rank_count)`.
///
/// The integer alone does not say which suit or rank it is; that depends on
/// the [`Layout`] the card was drawn from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card(u16);

impl Card {
    pub const fn new(value: u16) -> Self {
        Card(value)
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    /// Builds a card of the standard 4x13 layout.
    pub fn standard(suit: Suit, rank: Rank) -> Self {
        Card(suit.index() * SYMBOL_COUNT + rank.index())
    }

    /// Decomposes a card of the standard layout; `None` past the 52nd card.
    pub fn standard_parts(self) -> Option<(Suit, Rank)> {
        let layout = Layout::STANDARD;
        if !layout.contains(self) {
            return None;
        }
        let suit = Suit::from_index(layout.suit_of(self))?;
        let rank = Rank::from_index(layout.rank_of(self))?;
        Some((suit, rank))
    }
}

impl From<Card> for u16 {
    fn from(card: Card) -> u16 {
        card.0
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shape of the card universe: how many suits and how many ranks per suit.
///
/// The ace is the top rank (`rank_count - 1`). It closes the ace-high
/// straight and plays below rank 0 in the ace-low straight, whatever the
/// rank count is, so rank counts other than 13 keep the same straight rules.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Layout {
    suit_count: u16,
    rank_count: u16,
}

impl Default for Layout {
    fn default() -> Self {
        Layout::STANDARD
    }
}

impl Layout {
    pub const STANDARD: Layout = Layout {
        suit_count: SUIT_COUNT,
        rank_count: SYMBOL_COUNT,
    };

    pub fn new(suit_count: u16, rank_count: u16) -> Result<Self, EngineError> {
        if suit_count == 0 {
            return Err(EngineError::InvalidLayout(
                "suit count must be >= 1".into(),
            ));
        }
        // five distinct ranks are needed for a straight
        if rank_count < 5 {
            return Err(EngineError::InvalidLayout(format!(
                "rank count must be >= 5, got {}",
                rank_count
            )));
        }
        if suit_count.checked_mul(rank_count).is_none() {
            return Err(EngineError::InvalidLayout(format!(
                "{} suits x {} ranks does not fit a card value",
                suit_count, rank_count
            )));
        }
        Ok(Self {
            suit_count,
            rank_count,
        })
    }

    pub fn suit_count(&self) -> u16 {
        self.suit_count
    }

    pub fn rank_count(&self) -> u16 {
        self.rank_count
    }

    pub fn deck_size(&self) -> usize {
        self.suit_count as usize * self.rank_count as usize
    }

    pub fn ace(&self) -> u16 {
        self.rank_count - 1
    }

    pub fn is_standard(&self) -> bool {
        *self == Layout::STANDARD
    }

    pub fn contains(&self, card: Card) -> bool {
        (card.value() as usize) < self.deck_size()
    }

    pub fn card(&self, suit: u16, rank: u16) -> Option<Card> {
        if suit >= self.suit_count || rank >= self.rank_count {
            return None;
        }
        Some(Card(suit * self.rank_count + rank))
    }

    pub fn suit_of(&self, card: Card) -> u16 {
        card.value() / self.rank_count
    }

    pub fn rank_of(&self, card: Card) -> u16 {
        card.value() % self.rank_count
    }

    /// Every card of the layout in ascending order.
    pub fn cards(&self) -> impl Iterator<Item = Card> {
        (0..self.suit_count * self.rank_count).map(Card)
    }
}
