use std::collections::{HashMap, HashSet};

use pokerstat_engine::cards::{all_ranks, all_suits, Card, Layout};
use pokerstat_engine::deck::Deck;
use pokerstat_engine::errors::{EngineError, HandSizeRule};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn new_deck_is_ascending_and_complete() {
    let deck = Deck::new(Layout::STANDARD);
    let values: Vec<u16> = deck.cards().iter().map(|c| c.value()).collect();
    assert_eq!(values, (0..52).collect::<Vec<u16>>());
}

#[test]
fn encoding_round_trips_for_every_suit_and_rank() {
    let layout = Layout::STANDARD;
    for suit in 0..layout.suit_count() {
        for rank in 0..layout.rank_count() {
            let card = layout.card(suit, rank).unwrap();
            assert_eq!((layout.suit_of(card), layout.rank_of(card)), (suit, rank));
        }
    }
    assert_eq!(layout.card(4, 0), None);
    assert_eq!(layout.card(0, 13), None);

    for s in all_suits() {
        for r in all_ranks() {
            assert_eq!(Card::standard(s, r).standard_parts(), Some((s, r)));
        }
    }
    assert_eq!(Card::new(52).standard_parts(), None);
}

#[test]
fn layout_rejects_degenerate_shapes() {
    assert!(matches!(Layout::new(0, 13), Err(EngineError::InvalidLayout(_))));
    assert!(matches!(Layout::new(4, 4), Err(EngineError::InvalidLayout(_))));
    assert!(matches!(
        Layout::new(u16::MAX, 13),
        Err(EngineError::InvalidLayout(_))
    ));
    assert_eq!(Layout::new(4, 13).unwrap(), Layout::STANDARD);
}

#[test]
fn drawn_hand_is_sorted_unique_and_sits_at_the_back() {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let mut deck = Deck::new(Layout::STANDARD);
    for _ in 0..200 {
        deck.reset();
        let hand = deck.draw_hand(5, true, &mut rng).unwrap();
        assert_eq!(hand.len(), 5);
        assert!(hand.windows(2).all(|w| w[0] < w[1]), "not sorted: {:?}", hand);

        let back: HashSet<Card> = deck.cards()[47..].iter().copied().collect();
        let drawn: HashSet<Card> = hand.iter().copied().collect();
        assert_eq!(back, drawn);

        let all: HashSet<Card> = deck.cards().iter().copied().collect();
        assert_eq!(all.len(), 52, "deck must stay a permutation");
    }
}

#[test]
fn unsorted_draw_returns_the_back_in_deck_order() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let mut deck = Deck::new(Layout::STANDARD);
    let hand = deck.draw_hand(5, false, &mut rng).unwrap();
    assert_eq!(hand.as_slice(), &deck.cards()[47..]);
}

#[test]
fn drawing_more_than_the_deck_fails_without_touching_it() {
    let layout = Layout::STANDARD;
    let stub: Vec<Card> = [7, 3, 9, 1, 0].map(Card::new).to_vec();
    let mut deck = Deck::from_cards(layout, stub.clone());
    let mut rng = ChaCha20Rng::seed_from_u64(1);

    let err = deck.draw_hand(10, true, &mut rng).unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidHandSize {
            requested: 10,
            rule: HandSizeRule::ExceedsDeck(5),
        }
    );
    assert_eq!(deck.cards(), stub.as_slice());
}

#[test]
fn drawing_the_whole_deck_returns_every_card() {
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let mut deck = Deck::from_cards(Layout::STANDARD, [4, 8, 15, 16, 23].map(Card::new).to_vec());
    let hand = deck.draw_hand(5, true, &mut rng).unwrap();
    assert_eq!(hand, [4, 8, 15, 16, 23].map(Card::new).to_vec());
}

#[test]
fn same_seed_yields_identical_draws() {
    let mut r1 = ChaCha20Rng::seed_from_u64(12345);
    let mut r2 = ChaCha20Rng::seed_from_u64(12345);
    let mut d1 = Deck::new(Layout::STANDARD);
    let mut d2 = Deck::new(Layout::STANDARD);
    for _ in 0..10 {
        assert_eq!(
            d1.draw_hand(5, true, &mut r1).unwrap(),
            d2.draw_hand(5, true, &mut r2).unwrap()
        );
    }
}

#[test]
fn different_seeds_yield_different_draws() {
    let mut r1 = ChaCha20Rng::seed_from_u64(1);
    let mut r2 = ChaCha20Rng::seed_from_u64(2);
    let mut d1 = Deck::new(Layout::STANDARD);
    let mut d2 = Deck::new(Layout::STANDARD);
    let a: Vec<Vec<Card>> = (0..10).map(|_| d1.draw_hand(5, true, &mut r1).unwrap()).collect();
    let b: Vec<Vec<Card>> = (0..10).map(|_| d2.draw_hand(5, true, &mut r2).unwrap()).collect();
    assert_ne!(a, b, "different seeds should produce different hands (high probability)");
}

#[test]
fn every_pair_from_a_small_deck_is_equally_likely() {
    // 4 cards choose 2 = 6 outcomes; a fixed-range index would skew these.
    let layout = Layout::STANDARD;
    let mut rng = ChaCha20Rng::seed_from_u64(99);
    let draws = 60_000u32;
    let mut seen: HashMap<Vec<Card>, u32> = HashMap::new();
    for _ in 0..draws {
        let mut deck = Deck::from_cards(layout, [0, 1, 2, 3].map(Card::new).to_vec());
        let hand = deck.draw_hand(2, true, &mut rng).unwrap();
        *seen.entry(hand).or_insert(0) += 1;
    }
    assert_eq!(seen.len(), 6);
    let expected = f64::from(draws) / 6.0;
    for (hand, count) in seen {
        // one standard deviation is about 91 draws
        assert!(
            (f64::from(count) - expected).abs() < 600.0,
            "{:?} drawn {} times, expected about {}",
            hand,
            count,
            expected
        );
    }
}
