use holdem_table::betting::{split_pot, Action, ActionError, BettingState};
use holdem_table::player::{Player, PlayerId};
use proptest::prelude::*;

#[test]
fn odd_chip_is_dropped() {
    let s = split_pot(101, 2);
    assert_eq!((s.share, s.dropped), (50, 1));
}

#[test]
fn a_round_of_actions_accumulates_the_pot() {
    let mut betting = BettingState::new(5, 10);
    let mut players: Vec<Player> = (0..4).map(|i| Player::new(PlayerId(i), 200)).collect();

    betting.post_blind(&mut players[1], 5);
    betting.post_blind(&mut players[2], 10);
    assert_eq!(betting.apply(&mut players[0], Action::Call), Ok(10));
    assert_eq!(betting.apply(&mut players[1], Action::Raise(45)), Ok(45));
    assert_eq!(betting.current_bet(), 50);
    assert_eq!(betting.apply(&mut players[2], Action::Fold), Ok(0));
    assert_eq!(
        betting.apply(&mut players[3], Action::Raise(30)),
        Err(ActionError::RaiseTooSmall { current_bet: 50, amount: 30 })
    );
    assert_eq!(betting.apply(&mut players[3], Action::Call), Ok(50));

    assert_eq!(betting.pot(), 5 + 10 + 10 + 45 + 50);
    let committed: u64 = players.iter().map(Player::committed).sum();
    assert_eq!(committed, betting.pot());
    assert!(!players[2].is_active());
}

#[test]
fn fresh_player_may_bet_over_the_big_blind() {
    let mut betting = BettingState::new(5, 10);
    let mut bb = Player::new(PlayerId(1), 200);
    let mut p = Player::new(PlayerId(2), 200);
    betting.post_blind(&mut bb, 10);
    assert_eq!(betting.apply(&mut p, Action::Bet(50)), Ok(50));
    assert_eq!(betting.current_bet(), 50);
    assert_eq!(betting.pot(), 60);
}

#[test]
fn small_blind_raise_must_top_the_big_blind_on_its_own() {
    let mut betting = BettingState::new(5, 10);
    let mut sb = Player::new(PlayerId(0), 200);
    let mut bb = Player::new(PlayerId(1), 200);
    betting.post_blind(&mut sb, 5);
    betting.post_blind(&mut bb, 10);
    assert!(matches!(
        betting.apply(&mut sb, Action::Raise(6)),
        Err(ActionError::RaiseTooSmall { current_bet: 10, amount: 6 })
    ));
    assert_eq!(sb.committed(), 5);
    assert_eq!(betting.pot(), 15);
}

proptest! {
    #[test]
    fn split_never_pays_more_than_the_pot(pot in 0u64..1_000_000, winners in 1usize..=10) {
        let s = split_pot(pot, winners);
        let paid = s.share * winners as u64;
        prop_assert!(paid <= pot);
        prop_assert!(pot - paid < winners as u64);
        prop_assert_eq!(paid + s.dropped, pot);
    }

    #[test]
    fn accepted_actions_never_overdraw(
        cash in 0u64..500,
        current_bet in 0u64..600,
        amount in 0u64..700,
        which in 0u8..4,
    ) {
        let mut betting = BettingState::new(5, 10);
        let mut opener = Player::new(PlayerId(1), 1_000);
        if current_bet > 0 {
            betting.apply(&mut opener, Action::Bet(current_bet)).unwrap();
        }
        let mut p = Player::new(PlayerId(0), cash);
        let action = match which {
            0 => Action::Bet(amount),
            1 => Action::Raise(amount),
            2 => Action::Call,
            _ => Action::Fold,
        };
        let before = betting.pot();
        match betting.apply(&mut p, action) {
            Ok(paid) => {
                if let Action::Raise(n) = action {
                    prop_assert!(n > current_bet);
                }
                prop_assert!(paid <= cash);
                prop_assert_eq!(p.cash(), cash - paid);
                prop_assert_eq!(betting.pot(), before + paid);
                prop_assert!(betting.current_bet() >= current_bet);
            }
            Err(_) => {
                prop_assert_eq!(p.cash(), cash);
                prop_assert_eq!(betting.pot(), before);
            }
        }
    }
}
