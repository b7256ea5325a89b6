use crate::test::*;
use crate::{Error, Outcome};

fn run_three_rounds(s: &Setup) {
    // Sold to Alpha for 10.00
    s.open_round(PLAYER_ONE, BASE_PRICE);
    s.bid(ALPHA);
    s.bid(BRAVO);
    s.bid(ALPHA);
    s.client.undo_last_bid(&s.auctioneer);
    s.client.mark_sold(&s.auctioneer);

    // Unsold
    s.open_round(PLAYER_TWO, BASE_PRICE);
    s.client.mark_unsold(&s.auctioneer);

    // Sold to Alpha for 20.00
    s.open_round(PLAYER_THREE, 1_500);
    s.jump(ALPHA, 2_000);
    s.client.mark_sold(&s.auctioneer);
}

#[test]
fn test_history_entries_in_order() {
    let s = setup_test();
    run_three_rounds(&s);

    let history = s.client.get_history(&AUCTION_ID);
    assert_eq!(history.len(), 3);

    let first = history.get(0).unwrap();
    assert_eq!(first.player_id, PLAYER_ONE);
    assert_eq!(first.outcome, Outcome::Sold);
    assert_eq!(first.final_price, 1_000);
    assert_eq!(first.winner, Some(BRAVO));
    assert_eq!(first.bid_count, 2);

    let second = history.get(1).unwrap();
    assert_eq!(second.outcome, Outcome::Unsold);
    assert_eq!(second.final_price, 0);
    assert!(second.winner.is_none());
    assert_eq!(second.bid_count, 0);

    let third = history.get(2).unwrap();
    assert_eq!(third.player_id, PLAYER_THREE);
    assert_eq!(third.final_price, 2_000);
}

#[test]
fn test_stats_fold_outcomes() {
    let s = setup_test();
    run_three_rounds(&s);

    let stats = s.client.get_stats(&AUCTION_ID);
    assert_eq!(stats.players_auctioned, 3);
    assert_eq!(stats.players_sold, 2);
    assert_eq!(stats.players_unsold, 1);
    assert_eq!(stats.total_spend, 3_000);
    assert_eq!(stats.average_price, 1_500);
    assert_eq!(stats.highest_sale, 2_000);
    assert_eq!(stats.highest_sale_player, Some(PLAYER_THREE));
    assert_eq!(stats.team_spend.get(ALPHA), Some(2_000));
    assert_eq!(stats.team_spend.get(BRAVO), Some(1_000));
    assert_eq!(stats.team_spend.get(CHARLIE), None);
}

#[test]
fn test_end_session_archives() {
    let s = setup_test();
    run_three_rounds(&s);
    s.advance(600);

    let archived = s.client.end_session(&s.auctioneer);
    assert_eq!(archived.auction_id, AUCTION_ID);
    assert_eq!(archived.started_at, 1_000);
    assert_eq!(archived.ended_at, 1_600);
    assert_eq!(archived.duration_secs, 600);
    assert_eq!(archived.entries, 3);
    assert_eq!(archived.stats.players_sold, 2);

    assert_eq!(s.client.get_archive(&AUCTION_ID), archived);
    // History outlives the session.
    assert_eq!(s.client.get_history(&AUCTION_ID).len(), 3);
}

#[test]
fn test_empty_session_archive() {
    let s = setup_test();
    s.open_session();

    let archived = s.client.end_session(&s.auctioneer);
    assert_eq!(archived.entries, 0);
    assert_eq!(archived.stats.players_auctioned, 0);
    assert_eq!(archived.stats.average_price, 0);
}

#[test]
fn test_no_archive_before_end() {
    let s = setup_test();
    s.open_session();

    assert_eq!(s.client.try_get_archive(&AUCTION_ID), Err(Ok(Error::NotFound)));
    assert_eq!(s.client.try_get_stats(&2), Err(Ok(Error::NotFound)));
}
