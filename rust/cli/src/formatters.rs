//! Card and report formatters for terminal display.
//!
//! This module provides pure functions that render cards, hands, and run
//! statistics for terminal output. It supports Unicode suit symbols with
//! ASCII fallback for terminal environments that don't support Unicode
//! rendering, and parses the same notations back into cards.
//!
//! ## Unicode vs ASCII Fallback
//!
//! - **Unicode mode**: Uses ♠ ♥ ♣ ♦ symbols
//! - **ASCII mode**: Uses s h c d letters
//!
//! Cards outside the standard 4x13 layout have no conventional name and are
//! shown by their integer value as `#n`.
//!
//! ## Example
//!
//! ```rust
//! use pokerstat_engine::cards::{Card, Layout, Rank, Suit};
//! use pokerstat_cli::formatters::{format_card, parse_card};
//!
//! let ace_spades = Card::standard(Suit::Spades, Rank::Ace);
//! let shown = format_card(ace_spades, Layout::STANDARD);
//! assert!(shown == "A♠" || shown == "As");
//! assert_eq!(parse_card("As", Layout::STANDARD).unwrap(), ace_spades);
//! ```

use pokerstat_engine::cards::{Card, Layout, Rank, Suit, all_ranks, all_suits};
use pokerstat_engine::hand::Category;
use pokerstat_engine::stats::StatisticsRecord;

use crate::error::CliError;

/// Decimal places used for percentages when none is configured.
pub const DEFAULT_PRECISION: usize = 6;

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

fn suit_symbol(suit: Suit) -> char {
    match suit {
        Suit::Spades => '♠',
        Suit::Hearts => '♥',
        Suit::Clubs => '♣',
        Suit::Diamonds => '♦',
    }
}

fn suit_letter(suit: Suit) -> char {
    match suit {
        Suit::Spades => 's',
        Suit::Hearts => 'h',
        Suit::Clubs => 'c',
        Suit::Diamonds => 'd',
    }
}

/// Format a Suit using Unicode symbols with ASCII fallback.
pub fn format_suit(suit: Suit) -> String {
    if supports_unicode() {
        suit_symbol(suit).to_string()
    } else {
        suit_letter(suit).to_string()
    }
}

/// Format a Rank as a single character (2-9, T, J, Q, K, A).
pub fn format_rank(rank: Rank) -> &'static str {
    match rank {
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "T",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
        Rank::Ace => "A",
    }
}

/// Format a card drawn from `layout`.
///
/// # Returns
///
/// String like "A♠" (Unicode) or "As" (ASCII) for the standard layout,
/// `#n` for any other layout.
pub fn format_card(card: Card, layout: Layout) -> String {
    match card.standard_parts() {
        Some((suit, rank)) if layout.is_standard() => {
            format!("{}{}", format_rank(rank), format_suit(suit))
        }
        _ => format!("#{}", card.value()),
    }
}

/// Format a hand in bracket notation, e.g. "[T♥ J♥ Q♥ K♥ A♥]".
///
/// # Example
///
/// ```rust
/// use pokerstat_engine::cards::{Card, Layout};
/// # use pokerstat_cli::formatters::format_hand;
///
/// let layout = Layout::new(2, 8).unwrap();
/// let cards = [0, 1, 2, 3, 4].map(Card::new);
/// assert_eq!(format_hand(&cards, layout), "[#0 #1 #2 #3 #4]");
/// ```
pub fn format_hand(cards: &[Card], layout: Layout) -> String {
    let formatted: Vec<String> = cards.iter().map(|&c| format_card(c, layout)).collect();
    format!("[{}]", formatted.join(" "))
}

/// Parse a card name.
///
/// Accepts rank-suit names for the standard layout (`As`, `td`, `10h`,
/// `Q♣`) and raw card values (`0` to `deck_size - 1`) for any layout.
pub fn parse_card(text: &str, layout: Layout) -> Result<Card, CliError> {
    let text = text.trim();
    if let Ok(value) = text.parse::<u16>() {
        let card = Card::new(value);
        if !layout.contains(card) {
            return Err(CliError::InvalidInput(format!(
                "Card {} is outside a {}-card deck",
                value,
                layout.deck_size()
            )));
        }
        return Ok(card);
    }

    let invalid = || CliError::InvalidInput(format!("Unrecognized card: {:?}", text));
    if !layout.is_standard() {
        return Err(CliError::InvalidInput(format!(
            "Card names need the standard 4x13 deck; use card values for {:?}",
            text
        )));
    }
    let mut chars = text.chars();
    let suit_char = chars.next_back().ok_or_else(invalid)?;
    let rank_text = chars.as_str();

    let suit = all_suits()
        .into_iter()
        .find(|&s| suit_symbol(s) == suit_char || suit_letter(s) == suit_char.to_ascii_lowercase())
        .ok_or_else(invalid)?;
    let rank = if rank_text == "10" {
        Rank::Ten
    } else {
        all_ranks()
            .into_iter()
            .find(|&r| format_rank(r).eq_ignore_ascii_case(rank_text))
            .ok_or_else(invalid)?
    };
    Ok(Card::standard(suit, rank))
}

/// Render one run's category table.
///
/// Rows follow evaluation order, royal flush first. Percentages are
/// `count / trial_count * 100` with `precision` decimals, and 0 for a run
/// with no trials. With `show_expected` each row also carries the exact
/// probability for the standard deck.
pub fn format_report(record: &StatisticsRecord, precision: usize, show_expected: bool) -> String {
    let mut lines = Vec::new();
    let title = match record.run_id() {
        Some(id) => format!("Run #{} at {}", id, record.timestamp_rfc3339()),
        None => format!("Run at {}", record.timestamp_rfc3339()),
    };
    lines.push(title);
    lines.push(format!(
        "Trials: {}  Elapsed: {:.3}s",
        record.trial_count(),
        record.elapsed_seconds()
    ));
    if let Some(seed) = record.seed() {
        lines.push(format!("Seed: {}", seed));
    }
    if record.is_cancelled() {
        lines.push(format!(
            "Cancelled: only {} trials completed",
            record.trial_count()
        ));
    }

    let width = 12 + precision;
    let mut header = format!("{:<16}{:>12}{:>width$}", "Category", "Count", "Percent");
    if show_expected {
        header.push_str(&format!("{:>width$}", "Expected"));
    }
    lines.push(header);

    for category in Category::ALL {
        let percent = format!("{:.precision$}%", record.percentage(category));
        let mut line = format!(
            "{:<16}{:>12}{:>width$}",
            category.label(),
            record.count(category),
            percent
        );
        if show_expected {
            let expected = format!("{:.precision$}%", category.standard_probability() * 100.0);
            line.push_str(&format!("{:>width$}", expected));
        }
        lines.push(line);
    }
    lines.join("\n")
}
