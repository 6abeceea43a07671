//! Classify command handler: name the category of five given cards.

use crate::cli::LayoutArgs;
use crate::error::CliError;
use crate::formatters::{format_hand, parse_card};
use pokerstat_engine::hand::{Hand, classify};
use std::io::Write;

pub fn handle_classify_command(
    cards: &[String],
    layout: LayoutArgs,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let layout = layout.layout()?;
    let cards = cards
        .iter()
        .map(|c| parse_card(c, layout))
        .collect::<Result<Vec<_>, _>>()?;
    let hand = Hand::new(&cards, layout)?;
    writeln!(
        out,
        "{} {}",
        format_hand(hand.cards(), layout),
        classify(&hand)
    )?;
    Ok(())
}
