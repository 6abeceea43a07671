use thiserror::Error;

/// Which limit a requested hand size violated.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum HandSizeRule {
    #[error("the deck holds only {0} cards")]
    ExceedsDeck(usize),
    #[error("classification requires exactly {0} cards")]
    MustEqual(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid hand size {requested}: {rule}")]
    InvalidHandSize { requested: usize, rule: HandSizeRule },
    #[error("Invalid deck layout: {0}")]
    InvalidLayout(String),
    #[error("Card {card} is outside a {deck_size}-card deck")]
    CardOutOfRange { card: u16, deck_size: usize },
    #[error("Invalid worker count {requested}: at most {max} shards are supported")]
    InvalidWorkerCount { requested: usize, max: usize },
    #[error("Card {0} appears more than once in the hand")]
    DuplicateCard(u16),
}
