use rand::Rng;

use crate::cards::{Card, Layout};
use crate::errors::{EngineError, HandSizeRule};

#[derive(Debug, Clone)]
pub struct Deck {
    layout: Layout,
    cards: Vec<Card>,
}

impl Deck {
    /// A full deck for `layout` in ascending card order.
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            cards: layout.cards().collect(),
        }
    }

    /// A deck holding an arbitrary selection of cards, e.g. a stub deck.
    pub fn from_cards(layout: Layout, cards: Vec<Card>) -> Self {
        Self { layout, cards }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Restores every card of the layout in ascending order.
    pub fn reset(&mut self) {
        self.cards.clear();
        self.cards.extend(self.layout.cards());
    }

    /// Draws `hand_size` cards without replacement by a partial Fisher-Yates
    /// shuffle over the back of the deck.
    ///
    /// Draw `i` picks an index uniformly from `[0, len - i)` and swaps it to
    /// position `len - 1 - i`, so afterwards the prefix holds the undrawn
    /// cards and the last `hand_size` positions hold the drawn ones. Every
    /// unordered hand is equally likely. The deck is left untouched when
    /// `hand_size` exceeds its length.
    pub fn draw_hand<R: Rng + ?Sized>(
        &mut self,
        hand_size: usize,
        sort: bool,
        rng: &mut R,
    ) -> Result<Vec<Card>, EngineError> {
        let len = self.cards.len();
        if hand_size > len {
            return Err(EngineError::InvalidHandSize {
                requested: hand_size,
                rule: HandSizeRule::ExceedsDeck(len),
            });
        }
        for i in 0..hand_size {
            let index = rng.random_range(0..len - i);
            self.cards.swap(index, len - 1 - i);
        }
        let mut hand = self.cards[len - hand_size..].to_vec();
        if sort {
            hand.sort_unstable();
        }
        Ok(hand)
    }
}
