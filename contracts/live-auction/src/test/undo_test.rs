use crate::test::*;
use crate::{Error, RoundState};

#[test]
fn test_undo_restores_previous_leader() {
    let s = setup_test();
    s.open_round(PLAYER_ONE, BASE_PRICE);

    s.bid(ALPHA);
    s.bid(BRAVO);
    assert!(s.client.can_undo_last_bid(&s.auctioneer));

    let round = s.client.undo_last_bid(&s.auctioneer);
    assert_eq!(round.current_bid, 975);
    assert_eq!(round.bids.len(), 1);
    assert_eq!(round.highest_bidder, Some(ALPHA));
    assert_eq!(round.bids.last().unwrap().team_name, s.team_name(ALPHA));
    assert_eq!(s.client.get_round(), round);
}

#[test]
fn test_undo_is_single_level() {
    let s = setup_test();
    s.open_round(PLAYER_ONE, BASE_PRICE);

    s.bid(ALPHA);
    s.bid(BRAVO);
    s.client.undo_last_bid(&s.auctioneer);

    assert!(!s.client.can_undo_last_bid(&s.auctioneer));
    let result = s.client.try_undo_last_bid(&s.auctioneer);
    assert_eq!(result, Err(Ok(Error::UndoNotAvailable)));
}

#[test]
fn test_undo_first_bid_restores_base() {
    let s = setup_test();
    s.open_round(PLAYER_ONE, BASE_PRICE);

    s.bid(ALPHA);
    let round = s.client.undo_last_bid(&s.auctioneer);

    assert_eq!(round.current_bid, BASE_PRICE);
    assert!(round.highest_bidder.is_none());
    assert!(round.bids.is_empty());
    assert_eq!(s.client.next_bid_amount(), 975);
}

#[test]
fn test_undo_without_bids() {
    let s = setup_test();
    s.open_round(PLAYER_ONE, BASE_PRICE);

    let result = s.client.try_undo_last_bid(&s.auctioneer);
    assert_eq!(result, Err(Ok(Error::UndoNotAvailable)));
    assert!(!s.client.can_undo_last_bid(&s.auctioneer));
}

#[test]
fn test_undo_window_boundary_is_inclusive() {
    let s = setup_test();
    s.open_round(PLAYER_ONE, BASE_PRICE);

    s.bid(ALPHA);
    s.advance(15);

    let round = s.client.undo_last_bid(&s.auctioneer);
    assert!(round.bids.is_empty());
}

#[test]
fn test_undo_window_expired() {
    let s = setup_test();
    s.open_round(PLAYER_ONE, BASE_PRICE);

    s.bid(ALPHA);
    s.advance(16);

    let result = s.client.try_undo_last_bid(&s.auctioneer);
    assert_eq!(result, Err(Ok(Error::UndoWindowExpired)));
    assert_eq!(s.client.get_round().current_bid, 975);

    // A failed undo writes nothing, so the expired record answers the same.
    let result = s.client.try_undo_last_bid(&s.auctioneer);
    assert_eq!(result, Err(Ok(Error::UndoWindowExpired)));

    // The eligibility lookup drops the stale record for good.
    assert!(!s.client.can_undo_last_bid(&s.auctioneer));
    let result = s.client.try_undo_last_bid(&s.auctioneer);
    assert_eq!(result, Err(Ok(Error::UndoNotAvailable)));
}

#[test]
fn test_undo_then_rebid_keeps_streak_in_check() {
    let s = setup_test();
    s.open_round(PLAYER_ONE, BASE_PRICE);

    s.bid(ALPHA);
    s.bid(ALPHA);
    s.client.undo_last_bid(&s.auctioneer);

    s.bid(ALPHA);
    let result = s.client.try_confirm_bid(&s.auctioneer, &ALPHA, &s.team_name(ALPHA));
    assert_eq!(result, Err(Ok(Error::ConsecutiveBidLimit)));
}

#[test]
fn test_undo_restores_streak_of_previous_leader() {
    let s = setup_test();
    s.open_round(PLAYER_ONE, BASE_PRICE);

    s.bid(ALPHA);
    s.bid(ALPHA);
    s.bid(BRAVO);
    let round = s.client.undo_last_bid(&s.auctioneer);
    assert_eq!(round.consecutive.get(ALPHA), Some(2));

    let result = s.client.try_confirm_bid(&s.auctioneer, &ALPHA, &s.team_name(ALPHA));
    assert_eq!(result, Err(Ok(Error::ConsecutiveBidLimit)));

    s.bid(BRAVO);
}

#[test]
fn test_undo_while_paused() {
    let s = setup_test();
    s.open_round(PLAYER_ONE, BASE_PRICE);

    s.bid(ALPHA);
    s.bid(BRAVO);
    s.client.pause_bidding(&s.auctioneer);

    let round = s.client.undo_last_bid(&s.auctioneer);
    assert_eq!(round.state, RoundState::Paused);
    assert_eq!(round.current_bid, 975);
}

#[test]
fn test_undo_marks_bid_record() {
    let s = setup_test();
    s.open_round(PLAYER_ONE, BASE_PRICE);

    s.bid(ALPHA);
    s.bid(BRAVO);
    let undone = s.client.get_round().bids.last().unwrap();
    s.client.undo_last_bid(&s.auctioneer);

    assert!(s.client.get_bid_record(&undone.id).undone);
    let kept = s.client.get_round().bids.last().unwrap();
    assert!(!s.client.get_bid_record(&kept.id).undone);
}

#[test]
fn test_no_undo_after_round_closes() {
    let s = setup_test();
    s.open_round(PLAYER_ONE, BASE_PRICE);

    s.bid(ALPHA);
    s.client.mark_sold(&s.auctioneer);

    assert!(!s.client.can_undo_last_bid(&s.auctioneer));
    let result = s.client.try_undo_last_bid(&s.auctioneer);
    assert_eq!(result, Err(Ok(Error::UndoNotAvailable)));
}
