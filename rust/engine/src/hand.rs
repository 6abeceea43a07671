use serde::{Deserialize, Serialize};

use crate::cards::{Card, Layout};
use crate::errors::{EngineError, HandSizeRule};

/// Cards per hand. Every count shape below assumes exactly this many.
pub const HAND_SIZE: usize = 5;

/// Number of distinct five-card hands in the standard 52-card deck.
pub const STANDARD_COMBINATIONS: u64 = 2_598_960;

/// Ordered from weakest to strongest, so `Ord` compares categories by value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    /// Evaluation order: rarest first, `HighCard` last.
    pub const ALL: [Category; 10] = [
        Category::RoyalFlush,
        Category::StraightFlush,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::Flush,
        Category::Straight,
        Category::ThreeOfAKind,
        Category::TwoPair,
        Category::OnePair,
        Category::HighCard,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::RoyalFlush => "royal_flush",
            Category::StraightFlush => "straight_flush",
            Category::FourOfAKind => "four_of_a_kind",
            Category::FullHouse => "full_house",
            Category::Flush => "flush",
            Category::Straight => "straight",
            Category::ThreeOfAKind => "three_of_a_kind",
            Category::TwoPair => "two_pair",
            Category::OnePair => "one_pair",
            Category::HighCard => "high_card",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::RoyalFlush => "Royal flush",
            Category::StraightFlush => "Straight flush",
            Category::FourOfAKind => "Four of a kind",
            Category::FullHouse => "Full house",
            Category::Flush => "Flush",
            Category::Straight => "Straight",
            Category::ThreeOfAKind => "Three of a kind",
            Category::TwoPair => "Two pair",
            Category::OnePair => "One pair",
            Category::HighCard => "High card",
        }
    }

    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Hands of this category among all [`STANDARD_COMBINATIONS`] hands of the
    /// standard deck. Each category excludes every rarer one.
    pub fn standard_combinations(self) -> u64 {
        match self {
            Category::RoyalFlush => 4,
            Category::StraightFlush => 36,
            Category::FourOfAKind => 624,
            Category::FullHouse => 3_744,
            Category::Flush => 5_108,
            Category::Straight => 10_200,
            Category::ThreeOfAKind => 54_912,
            Category::TwoPair => 123_552,
            Category::OnePair => 1_098_240,
            Category::HighCard => 1_302_540,
        }
    }

    /// Exact probability of drawing this category from the standard deck.
    pub fn standard_probability(self) -> f64 {
        self.standard_combinations() as f64 / STANDARD_COMBINATIONS as f64
    }

    /// Whether the hand exhibits this category's pattern. Lower categories
    /// also match stronger hands (a full house has a pair), which is why
    /// [`classify`] tries them in [`Category::ALL`] order.
    pub fn matches(self, profile: &HandProfile) -> bool {
        let ranks = profile.ranks.as_slice();
        match self {
            Category::RoyalFlush => {
                profile.is_flush() && profile.straight == Some(Straight::AceHigh)
            }
            Category::StraightFlush => profile.is_flush() && profile.straight.is_some(),
            Category::FourOfAKind => ranks.contains(&4),
            Category::FullHouse => ranks == [3, 2],
            Category::Flush => profile.is_flush(),
            Category::Straight => profile.straight.is_some(),
            Category::ThreeOfAKind => ranks == [3, 1, 1],
            Category::TwoPair => ranks == [2, 2, 1],
            Category::OnePair => ranks == [2, 1, 1, 1],
            Category::HighCard => true,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Five distinct cards of one layout, kept sorted ascending by card value.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Hand {
    cards: [Card; HAND_SIZE],
    layout: Layout,
}

impl Hand {
    pub fn new(cards: &[Card], layout: Layout) -> Result<Self, EngineError> {
        let mut sorted: [Card; HAND_SIZE] =
            cards
                .try_into()
                .map_err(|_| EngineError::InvalidHandSize {
                    requested: cards.len(),
                    rule: HandSizeRule::MustEqual(HAND_SIZE),
                })?;
        if let Some(&card) = sorted.iter().find(|&&c| !layout.contains(c)) {
            return Err(EngineError::CardOutOfRange {
                card: card.value(),
                deck_size: layout.deck_size(),
            });
        }
        sorted.sort_unstable();
        if let Some(pair) = sorted.windows(2).find(|w| w[0] == w[1]) {
            return Err(EngineError::DuplicateCard(pair[0].value()));
        }
        Ok(Self {
            cards: sorted,
            layout,
        })
    }

    /// Convenience for the standard 4x13 layout.
    pub fn standard(cards: &[Card]) -> Result<Self, EngineError> {
        Hand::new(cards, Layout::STANDARD)
    }

    pub fn cards(&self) -> &[Card; HAND_SIZE] {
        &self.cards
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }
}

/// Multiset of nonzero counts, largest first, e.g. `[3, 2]` for a full house.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Shape {
    counts: [u8; HAND_SIZE],
    len: usize,
}

impl Shape {
    pub fn as_slice(&self) -> &[u8] {
        &self.counts[..self.len]
    }

    /// Number of distinct keys (ranks or suits) in the hand.
    pub fn distinct(&self) -> usize {
        self.len
    }
}

/// Groups the hand's cards by `key` (rank or suit) and returns the group sizes.
/// Which key owns which count is dropped.
pub fn count_by<F>(hand: &Hand, key: F) -> Shape
where
    F: Fn(Card) -> u16,
{
    let mut keys = [0u16; HAND_SIZE];
    let mut counts = [0u8; HAND_SIZE];
    let mut len = 0;
    for &card in hand.cards() {
        let k = key(card);
        match keys[..len].iter().position(|&seen| seen == k) {
            Some(i) => counts[i] += 1,
            None => {
                keys[len] = k;
                counts[len] = 1;
                len += 1;
            }
        }
    }
    counts[..len].sort_unstable_by(|a, b| b.cmp(a));
    Shape { counts, len }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Straight {
    /// Ace plays low: ace, 0, 1, 2, 3.
    AceLow,
    /// Five consecutive ranks topped by `high`, below the ace.
    Run { high: u16 },
    /// Five consecutive ranks topped by the ace.
    AceHigh,
}

/// The one straight test shared by every straight-based category.
///
/// Requires five distinct ranks, so a hand with two aces (or any other
/// repeated rank) is never a straight.
pub fn straight_of(hand: &Hand) -> Option<Straight> {
    let layout = hand.layout();
    let mut ranks = (*hand.cards()).map(|c| layout.rank_of(c));
    ranks.sort_unstable();
    if ranks.windows(2).any(|w| w[0] == w[1]) {
        return None;
    }
    let ace = layout.ace();
    let high = ranks[HAND_SIZE - 1];
    if high - ranks[0] == (HAND_SIZE - 1) as u16 {
        return Some(if high == ace {
            Straight::AceHigh
        } else {
            Straight::Run { high }
        });
    }
    if high == ace && ranks[..HAND_SIZE - 1] == [0, 1, 2, 3] {
        return Some(Straight::AceLow);
    }
    None
}

/// Aggregated views of a hand that every predicate reads.
#[derive(Debug, Clone, Copy)]
pub struct HandProfile {
    pub ranks: Shape,
    pub suits: Shape,
    pub straight: Option<Straight>,
}

impl HandProfile {
    pub fn new(hand: &Hand) -> Self {
        let layout = hand.layout();
        Self {
            ranks: count_by(hand, |c| layout.rank_of(c)),
            suits: count_by(hand, |c| layout.suit_of(c)),
            straight: straight_of(hand),
        }
    }

    pub fn is_flush(&self) -> bool {
        self.suits.distinct() == 1
    }
}

/// Returns the rarest category the hand belongs to.
pub fn classify(hand: &Hand) -> Category {
    let profile = HandProfile::new(hand);
    Category::ALL
        .into_iter()
        .find(|category| category.matches(&profile))
        .unwrap_or(Category::HighCard)
}
