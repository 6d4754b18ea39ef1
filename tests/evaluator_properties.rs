use holdem_table::cards::{Card, Rank, Suit};
use holdem_table::deck::Deck;
use holdem_table::evaluator::{best_hand, evaluate, rank, Category};
use holdem_table::hand::{Board, HoleCards};
use proptest::prelude::*;
use std::cmp::Ordering;

/// `n` distinct cards from one deck.
fn distinct_cards(n: usize) -> impl Strategy<Value = Vec<Card>> {
    let deck = Deck::ordered().as_slice().to_vec();
    prop::sample::subsequence(deck, n).prop_shuffle()
}

/// Category worked out from rank counts and suits alone.
fn category_of(cards: &[Card]) -> Category {
    let mut values: Vec<u8> = cards.iter().map(|c| c.rank().value()).collect();
    values.sort_unstable();
    let flush = cards.iter().all(|c| c.suit() == cards[0].suit());
    let mut distinct = values.clone();
    distinct.dedup();
    let straight = distinct.len() == 5
        && (values[4] - values[0] == 4 || values == [2, 3, 4, 5, 14]);
    let mut counts: Vec<usize> =
        distinct.iter().map(|v| values.iter().filter(|x| *x == v).count()).collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));
    match (straight, flush, counts.as_slice()) {
        (true, true, _) => Category::StraightFlush,
        (_, _, [4, ..]) => Category::FourOfAKind,
        (_, _, [3, 2]) => Category::FullHouse,
        (_, true, _) => Category::Flush,
        (true, _, _) => Category::Straight,
        (_, _, [3, ..]) => Category::ThreeOfAKind,
        (_, _, [2, 2, ..]) => Category::TwoPair,
        (_, _, [2, ..]) => Category::Pair,
        _ => Category::HighCard,
    }
}

fn five(cards: &[Card]) -> [Card; 5] {
    [cards[0], cards[1], cards[2], cards[3], cards[4]]
}

fn straight_cards(top: u8) -> [Card; 5] {
    let vals = if top == 5 { [14, 2, 3, 4, 5] } else { [top - 4, top - 3, top - 2, top - 1, top] };
    let suits = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades, Suit::Clubs];
    let mut out = [Card::new(Rank::Two, Suit::Clubs); 5];
    for i in 0..5 {
        out[i] = Card::new(Rank::from_value(vals[i]).unwrap(), suits[i]);
    }
    out
}

fn flush_rank_set() -> impl Strategy<Value = Vec<Rank>> {
    prop::collection::btree_set(2u8..=14u8, 5)
        .prop_filter("non-straight ranks", |set| {
            let vals: Vec<u8> = set.iter().copied().collect();
            let is_wheel = vals == vec![2, 3, 4, 5, 14];
            let is_straight = vals.windows(2).all(|w| w[1] == w[0] + 1);
            !(is_straight || is_wheel)
        })
        .prop_map(|set| set.into_iter().rev().map(|v| Rank::from_value(v).unwrap()).collect())
}

fn suited(ranks: &[Rank], suit: Suit) -> [Card; 5] {
    [
        Card::new(ranks[0], suit),
        Card::new(ranks[1], suit),
        Card::new(ranks[2], suit),
        Card::new(ranks[3], suit),
        Card::new(ranks[4], suit),
    ]
}

proptest! {
    #[test]
    fn rank_ordering_is_a_total_order(
        a in distinct_cards(5),
        b in distinct_cards(5),
        c in distinct_cards(5),
    ) {
        let (ra, rb, rc) = (rank(&five(&a)), rank(&five(&b)), rank(&five(&c)));
        prop_assert_eq!(ra.category(), category_of(&a));
        prop_assert_eq!(rb.category(), category_of(&b));
        prop_assert_eq!(rc.category(), category_of(&c));

        // antisymmetric
        if ra >= rb && rb >= ra { prop_assert_eq!(&ra, &rb); }
        // transitive
        if ra >= rb && rb >= rc { prop_assert!(ra >= rc); }
        // category dominates
        let (ca, cb) = (category_of(&a), category_of(&b));
        if ca != cb {
            prop_assert_eq!(ra.cmp(&rb), ca.cmp(&cb));
            prop_assert_eq!(ra.cmp(&rb), ca.ordinal().cmp(&cb.ordinal()));
        }
    }

    #[test]
    fn rank_ignores_card_order(cards in distinct_cards(5)) {
        let fwd = five(&cards);
        let rev = [cards[4], cards[3], cards[2], cards[1], cards[0]];
        prop_assert_eq!(rank(&fwd), rank(&rev));
    }

    #[test]
    fn best_hand_is_a_maximal_subset(cards in distinct_cards(7), board_len in 3usize..=5) {
        let hole = HoleCards::try_new(cards[0], cards[1]).unwrap();
        let board = Board::try_new(cards[2..2 + board_len].to_vec()).unwrap();
        let pool = &cards[..2 + board_len];

        let best = best_hand(&hole, &board).unwrap();
        for c in &best {
            prop_assert!(pool.contains(c), "{} not in hole or board", c);
        }
        let best_rank = rank(&best);
        prop_assert_eq!(&best_rank, &evaluate(&hole, &board).unwrap().rank);

        let n = pool.len();
        for i in 0..n {
            for j in (i + 1)..n {
                for k in (j + 1)..n {
                    for l in (k + 1)..n {
                        for m in (l + 1)..n {
                            let hand = [pool[i], pool[j], pool[k], pool[l], pool[m]];
                            prop_assert!(best_rank >= rank(&hand));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn straight_ordering_respects_top_card(top_hi in 6u8..=14u8, top_lo in 5u8..=13u8) {
        prop_assume!(top_hi > top_lo);
        let hi = rank(&straight_cards(top_hi));
        let lo = rank(&straight_cards(top_lo));
        prop_assert_eq!(hi.category(), Category::Straight);
        prop_assert_eq!(lo.category(), Category::Straight);
        prop_assert!(hi > lo);
    }

    #[test]
    fn flush_kickers_compare_high_to_low(a in flush_rank_set(), b in flush_rank_set()) {
        let ra = rank(&suited(&a, Suit::Hearts));
        let rb = rank(&suited(&b, Suit::Spades));
        prop_assert_eq!(ra.category(), Category::Flush);
        prop_assert_eq!(rb.category(), Category::Flush);
        match a.cmp(&b) {
            Ordering::Greater => prop_assert!(ra > rb),
            Ordering::Less => prop_assert!(ra < rb),
            Ordering::Equal => prop_assert_eq!(ra, rb),
        }
    }

    #[test]
    fn king_high_straight_flush_beats_any_plain_flush(ranks in flush_rank_set()) {
        let king_high = [Rank::King, Rank::Queen, Rank::Jack, Rank::Ten, Rank::Nine];
        let sf = rank(&suited(&king_high, Suit::Spades));
        let flush = rank(&suited(&ranks, Suit::Spades));
        prop_assert!(sf > flush);
    }
}
