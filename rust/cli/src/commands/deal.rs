//! Deal command handler: draw one hand and name its category.
//!
//! Supports an optional seed so a dealt hand can be reproduced.

use crate::cli::LayoutArgs;
use crate::error::CliError;
use crate::formatters::format_hand;
use pokerstat_engine::deck::Deck;
use pokerstat_engine::hand::{HAND_SIZE, Hand, classify};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::io::Write;

/// Handle the deal command.
///
/// Prints the hand, its category, and the seed used (drawn at random when
/// none is given).
pub fn handle_deal_command(
    seed: Option<u64>,
    layout: LayoutArgs,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let layout = layout.layout()?;
    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut deck = Deck::new(layout);
    let cards = deck.draw_hand(HAND_SIZE, true, &mut rng)?;
    let hand = Hand::new(&cards, layout)?;

    writeln!(out, "Hand: {}", format_hand(hand.cards(), layout))?;
    writeln!(out, "Category: {}", classify(&hand))?;
    writeln!(out, "Seed: {}", seed)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> LayoutArgs {
        LayoutArgs {
            suits: 4,
            ranks: 13,
        }
    }

    #[test]
    fn test_deal_command_deterministic() {
        let mut out1 = Vec::new();
        let mut out2 = Vec::new();

        handle_deal_command(Some(12345), standard(), &mut out1).unwrap();
        handle_deal_command(Some(12345), standard(), &mut out2).unwrap();

        assert_eq!(out1, out2, "Same seed should produce identical output");
    }

    #[test]
    fn test_deal_command_output_format() {
        let mut out = Vec::new();
        handle_deal_command(Some(999), standard(), &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Hand: ["));
        assert_eq!(lines[0].split_whitespace().count(), 6);
        assert!(lines[1].starts_with("Category: "));
        assert_eq!(lines[2], "Seed: 999");
    }

    #[test]
    fn test_deal_command_rejects_small_deck() {
        let mut out = Vec::new();
        let result = handle_deal_command(
            Some(1),
            LayoutArgs {
                suits: 1,
                ranks: 4,
            },
            &mut out,
        );
        assert!(matches!(result, Err(CliError::Engine(_))));
        assert!(out.is_empty());
    }
}
