//! Bid validation.
//!
//! Every proposed bid runs through the same fixed sequence of [`BidPolicy`]
//! checks before the round is touched. The consecutive-bid counters that the
//! guard reads are maintained by [`record_bid`].

use soroban_sdk::{Env, Map, String};

use crate::errors::Error;
use crate::slab;
use crate::types::{AuctionSession, Round, MAX_CONSECUTIVE_BIDS};

/// A bid as the auctioneer entered it, before it is accepted.
#[derive(Clone, Debug)]
pub struct BidProposal {
    pub team_id: u32,
    pub team_name: String,
    pub amount: i128,
    pub is_jump_bid: bool,
}

/// One legality rule. Implementations must not mutate anything.
pub trait BidPolicy {
    fn check(
        &self,
        session: &AuctionSession,
        round: &Round,
        proposal: &BidProposal,
    ) -> Result<(), Error>;
}

/// The bidding team must be seated in the session.
pub struct Participation;

impl BidPolicy for Participation {
    fn check(&self, session: &AuctionSession, _: &Round, proposal: &BidProposal) -> Result<(), Error> {
        if !session.team_ids.contains(proposal.team_id) {
            return Err(Error::NotParticipating);
        }
        Ok(())
    }
}

/// Blocks a third bid in a row from the same team.
pub struct ConsecutiveBidGuard;

impl BidPolicy for ConsecutiveBidGuard {
    fn check(&self, _: &AuctionSession, round: &Round, proposal: &BidProposal) -> Result<(), Error> {
        if streak(round, proposal.team_id) >= MAX_CONSECUTIVE_BIDS {
            return Err(Error::ConsecutiveBidLimit);
        }
        Ok(())
    }
}

/// Jump bids must beat the current bid and sit on their own tier's grid.
pub struct JumpBidAmount;

impl BidPolicy for JumpBidAmount {
    fn check(&self, session: &AuctionSession, round: &Round, proposal: &BidProposal) -> Result<(), Error> {
        if !proposal.is_jump_bid {
            return Ok(());
        }
        if proposal.amount <= round.current_bid {
            return Err(Error::InvalidBidAmount);
        }
        if !slab::is_aligned(&session.slabs, proposal.amount)? {
            return Err(Error::InvalidBidAmount);
        }
        Ok(())
    }
}

const POLICIES: [&dyn BidPolicy; 3] = [&Participation, &ConsecutiveBidGuard, &JumpBidAmount];

/// Runs every policy in order and stops at the first failure.
pub fn validate(session: &AuctionSession, round: &Round, proposal: &BidProposal) -> Result<(), Error> {
    for policy in POLICIES.iter() {
        policy.check(session, round, proposal)?;
    }
    Ok(())
}

/// Current run length of `team_id` at the tail of the bid history.
pub fn streak(round: &Round, team_id: u32) -> u32 {
    round.consecutive.get(team_id).unwrap_or(0)
}

/// Updates the counters for an accepted bid. Must run before the new entry
/// is appended, since it compares against the preceding bidder.
pub fn record_bid(env: &Env, round: &mut Round, team_id: u32) {
    let preceding = round.bids.last().map(|bid| bid.team_id);
    if preceding == Some(team_id) {
        let next = streak(round, team_id) + 1;
        round.consecutive.set(team_id, next);
    } else {
        let mut fresh = Map::new(env);
        fresh.set(team_id, 1);
        round.consecutive = fresh;
    }
}
