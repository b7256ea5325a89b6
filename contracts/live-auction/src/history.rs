//! Append-only record of resolved rounds with running statistics.
//!
//! Nothing in here may stop the auction: every failure is handed back as a
//! [`HistoryError`] for the caller to log.

use soroban_sdk::{Env, Map};

use crate::errors::HistoryError;
use crate::storage::LedgerStore;
use crate::types::{ArchivedAuction, AuctionSession, AuctionStats, HistoryEntry, Outcome};

pub fn empty_stats(env: &Env) -> AuctionStats {
    AuctionStats {
        players_auctioned: 0,
        players_sold: 0,
        players_unsold: 0,
        total_spend: 0,
        average_price: 0,
        highest_sale: 0,
        highest_sale_player: None,
        team_spend: Map::new(env),
    }
}

/// Seeds the statistics ledger for a fresh session.
pub fn open<S: LedgerStore>(store: &S, auction_id: u64) {
    if store.get_stats(auction_id).is_none() {
        store.set_stats(auction_id, &empty_stats(store.env()));
    }
}

/// Folds `entry` into the running statistics, then appends it. The entry and
/// the statistics are written together or not at all.
pub fn record<S: LedgerStore>(store: &S, entry: &HistoryEntry) -> Result<AuctionStats, HistoryError> {
    let mut stats = store
        .get_stats(entry.auction_id)
        .ok_or(HistoryError::MissingStats)?;
    fold(&mut stats, entry)?;

    store.append_history_entry(entry);
    store.set_stats(entry.auction_id, &stats);
    Ok(stats)
}

fn fold(stats: &mut AuctionStats, entry: &HistoryEntry) -> Result<(), HistoryError> {
    stats.players_auctioned = stats
        .players_auctioned
        .checked_add(1)
        .ok_or(HistoryError::StatsOverflow)?;

    match entry.outcome {
        Outcome::Unsold => {
            stats.players_unsold = stats
                .players_unsold
                .checked_add(1)
                .ok_or(HistoryError::StatsOverflow)?;
        }
        Outcome::Sold => {
            stats.players_sold = stats
                .players_sold
                .checked_add(1)
                .ok_or(HistoryError::StatsOverflow)?;
            stats.total_spend = stats
                .total_spend
                .checked_add(entry.final_price)
                .ok_or(HistoryError::StatsOverflow)?;
            stats.average_price = stats.total_spend / i128::from(stats.players_sold);

            if entry.final_price > stats.highest_sale {
                stats.highest_sale = entry.final_price;
                stats.highest_sale_player = Some(entry.player_id);
            }

            if let Some(team_id) = entry.winner {
                let spent = stats
                    .team_spend
                    .get(team_id)
                    .unwrap_or(0)
                    .checked_add(entry.final_price)
                    .ok_or(HistoryError::StatsOverflow)?;
                stats.team_spend.set(team_id, spent);
            }
        }
    }
    Ok(())
}

/// Closing summary of `session`; falls back to empty statistics.
pub fn summarize<S: LedgerStore>(store: &S, session: &AuctionSession, ended_at: u64) -> ArchivedAuction {
    let stats = store
        .get_stats(session.auction_id)
        .unwrap_or_else(|| empty_stats(store.env()));

    ArchivedAuction {
        auction_id: session.auction_id,
        name: session.name.clone(),
        sport: session.sport.clone(),
        auctioneer: session.auctioneer.clone(),
        started_at: session.started_at,
        ended_at,
        duration_secs: ended_at.saturating_sub(session.started_at),
        stats,
        entries: store.get_history(session.auction_id).len(),
    }
}

/// Writes the closing summary once per auction.
pub fn archive<S: LedgerStore>(store: &S, archived: &ArchivedAuction) -> Result<(), HistoryError> {
    if store.get_archive(archived.auction_id).is_some() {
        return Err(HistoryError::AlreadyArchived);
    }
    store.set_archive(archived);
    Ok(())
}
