//! Single-level, time-boxed undo of the newest bid.
//!
//! At most one [`UndoRecord`] exists per round and it always describes the last
//! entry of the bid history. Expiry is checked lazily against the ledger clock
//! whenever the record is consulted. A record that fails the check with
//! [`is_stale`] is dead and the caller should drop it.

use crate::errors::Error;
use crate::types::{BidEntry, Round, RoundState, UndoRecord, UNDO_WINDOW_MS};

/// Captures the pre-bid state. Call before the round is mutated for the bid.
pub fn snapshot(round: &Round, bid_id: u64, team_id: u32, now_ms: u64) -> UndoRecord {
    UndoRecord {
        bid_id,
        team_id,
        created_at_ms: now_ms,
        prior_bid: round.current_bid,
        prior_bidder: round.highest_bidder,
        prior_consecutive: round.consecutive.clone(),
    }
}

/// Verifies that `record` can still reverse the newest bid of `round`.
pub fn check(round: &Round, record: Option<&UndoRecord>, now_ms: u64) -> Result<UndoRecord, Error> {
    let record = record.ok_or(Error::UndoNotAvailable)?;

    if !matches!(round.state, RoundState::Live | RoundState::Paused) {
        return Err(Error::InvalidState);
    }

    let newest = round.bids.last().map(|bid| bid.id);
    if round.highest_bidder != Some(record.team_id) || newest != Some(record.bid_id) {
        return Err(Error::UndoNotAvailable);
    }

    if now_ms.saturating_sub(record.created_at_ms) > UNDO_WINDOW_MS {
        return Err(Error::UndoWindowExpired);
    }

    Ok(record.clone())
}

/// Whether a [`check`] failure means the record can never be applied.
pub fn is_stale(err: Error) -> bool {
    matches!(err, Error::UndoNotAvailable | Error::UndoWindowExpired)
}

/// Reverses the newest bid described by `record`.
pub fn apply(round: &mut Round, record: UndoRecord) -> Result<BidEntry, Error> {
    let entry = round.bids.pop_back().ok_or(Error::UndoNotAvailable)?;
    round.current_bid = record.prior_bid;
    round.highest_bidder = record.prior_bidder;
    round.consecutive = record.prior_consecutive;
    Ok(entry)
}

pub fn can_undo(round: &Round, record: Option<&UndoRecord>, now_ms: u64) -> bool {
    check(round, record, now_ms).is_ok()
}
