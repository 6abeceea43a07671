//! # pokerstat-engine: Five-Card Hand Frequency Core
//!
//! Draws uniformly random five-card hands, sorts each into one of ten
//! mutually exclusive categories, and tallies how often each category turns
//! up over many trials. Persistence and display of the resulting statistics
//! live outside this crate.
//!
//! ## Core Modules
//!
//! - [`cards`] - Integer card encoding, deck [`cards::Layout`], standard suit/rank names
//! - [`deck`] - Deck construction and the partial Fisher-Yates hand draw
//! - [`hand`] - Hand validation, count shapes, and the category classifier
//! - [`sim`] - Sharded simulation driver
//! - [`stats`] - Per-run [`stats::StatisticsRecord`]
//! - [`cancel`] - Cancellation token checked between trials
//! - [`errors`] - Error types for sampling and classification
//!
//! ## Quick Start
//!
//! ```rust
//! use pokerstat_engine::cards::{Card, Rank, Suit};
//! use pokerstat_engine::hand::{classify, Category, Hand};
//!
//! let cards = [
//!     Card::standard(Suit::Hearts, Rank::Ten),
//!     Card::standard(Suit::Hearts, Rank::Jack),
//!     Card::standard(Suit::Hearts, Rank::Queen),
//!     Card::standard(Suit::Hearts, Rank::King),
//!     Card::standard(Suit::Hearts, Rank::Ace),
//! ];
//! let hand = Hand::standard(&cards).unwrap();
//! assert_eq!(classify(&hand), Category::RoyalFlush);
//! ```
//!
//! ## Reproducible Runs
//!
//! A fixed seed and a fixed worker count always produce the same counts:
//!
//! ```rust
//! use pokerstat_engine::sim::{run, SimConfig};
//!
//! let config = SimConfig::new(1_000).with_seed(42).with_workers(2);
//! let a = run(&config).unwrap();
//! let b = run(&config).unwrap();
//! assert_eq!(a.counts(), b.counts());
//! assert_eq!(a.trial_count(), 1_000);
//! ```

pub mod cancel;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod hand;
pub mod sim;
pub mod stats;
