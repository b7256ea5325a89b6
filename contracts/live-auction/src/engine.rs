//! Session and round state machine.
//!
//! Round lifecycle: `Idle -> Ready -> Live <-> Paused -> {Sold | Unsold} -> Idle`.
//! Session lifecycle: `Active -> Completed`.
//!
//! The session snapshot, the live round and the undo record for the newest bid
//! sit in separate instance slots. No round means the session is idle.
//!
//! Every mutating operation follows the same shape: load the snapshot, check
//! the caller and the state, run all validation, then mutate, persist and
//! publish an event. A failed call leaves storage as it was.

use soroban_sdk::{log, Address, Env, Map, String, Vec};

use crate::errors::Error;
use crate::events::*;
use crate::guard::{self, BidProposal};
use crate::history;
use crate::settlement::{self, Sale};
use crate::slab;
use crate::storage::LedgerStore;
use crate::types::*;
use crate::undo;

pub struct AuctionEngine<S: LedgerStore> {
    store: S,
}

impl<S: LedgerStore> AuctionEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn env(&self) -> &Env {
        self.store.env()
    }

    fn now(&self) -> u64 {
        self.env().ledger().timestamp()
    }

    fn now_ms(&self) -> u64 {
        self.now().saturating_mul(1000)
    }

    /// Live session driven by `caller`.
    fn session_for(&self, caller: &Address) -> Result<AuctionSession, Error> {
        caller.require_auth();

        let session = self
            .store
            .load_session_snapshot()
            .ok_or(Error::NotFound)?;

        if *caller != session.auctioneer {
            return Err(Error::Unauthorized);
        }
        if session.status != SessionStatus::Active {
            return Err(Error::InvalidState);
        }
        Ok(session)
    }

    /// Round of the live session, required to exist.
    fn live_round(&self) -> Result<Round, Error> {
        self.store.load_round().ok_or(Error::InvalidState)
    }

    fn close_round(&self) {
        self.store.clear_round();
        self.store.clear_undo_record();
    }

    fn record_history(&self, entry: &HistoryEntry) {
        if let Err(err) = history::record(&self.store, entry) {
            log!(
                self.env(),
                "history: round not recorded",
                entry.auction_id,
                entry.player_id,
                err as u32
            );
        }
    }

    // ========================================================================
    // SESSION
    // ========================================================================

    pub fn start_session(&self, caller: &Address, auction_id: u64) -> Result<AuctionSession, Error> {
        caller.require_auth();

        if let Some(existing) = self.store.load_session_snapshot() {
            if existing.status == SessionStatus::Active {
                return Err(Error::SessionConflict);
            }
        }

        let mut config = self.store.get_auction(auction_id).ok_or(Error::NotFound)?;
        if *caller != config.auctioneer {
            return Err(Error::Unauthorized);
        }
        if config.status != AuctionStatus::Ready {
            return Err(Error::InvalidState);
        }

        let env = self.env();
        let started_at = self.now();
        let session = AuctionSession {
            auction_id,
            sport: config.sport.clone(),
            name: config.name.clone(),
            auctioneer: config.auctioneer.clone(),
            team_ids: config.team_ids.clone(),
            player_pool: config.player_pool.clone(),
            completed_players: Vec::new(env),
            slabs: config.slabs.clone(),
            round_timer_secs: config.round_timer_secs,
            status: SessionStatus::Active,
            started_at,
        };

        config.status = AuctionStatus::Live;
        self.store.update_auction(&config);
        history::open(&self.store, auction_id);
        self.close_round();
        self.store.save_session_snapshot(&session);

        SessionStartedEventData {
            auction_id,
            auctioneer: caller.clone(),
            started_at,
        }
        .publish(env);

        Ok(session)
    }

    pub fn end_session(&self, caller: &Address) -> Result<ArchivedAuction, Error> {
        let mut session = self.session_for(caller)?;

        if let Some(round) = self.store.load_round() {
            if matches!(round.state, RoundState::Live | RoundState::Paused) {
                return Err(Error::InvalidState);
            }
        }

        let ended_at = self.now();
        session.status = SessionStatus::Completed;

        if let Some(mut config) = self.store.get_auction(session.auction_id) {
            config.status = AuctionStatus::Completed;
            self.store.update_auction(&config);
        }

        let archived = history::summarize(&self.store, &session, ended_at);
        if let Err(err) = history::archive(&self.store, &archived) {
            log!(self.env(), "history: archive not written", session.auction_id, err as u32);
        }

        self.close_round();
        self.store.clear_session_snapshot();

        SessionEndedEventData {
            auction_id: session.auction_id,
            players_sold: archived.stats.players_sold,
            total_spend: archived.stats.total_spend,
            duration_secs: archived.duration_secs,
        }
        .publish(self.env());

        Ok(archived)
    }

    // ========================================================================
    // ROUND
    // ========================================================================

    pub fn select_player(&self, caller: &Address, player_id: u32, base_price: i128) -> Result<Round, Error> {
        let session = self.session_for(caller)?;

        if let Some(round) = self.store.load_round() {
            if matches!(round.state, RoundState::Live | RoundState::Paused) {
                return Err(Error::InvalidState);
            }
        }

        if !session.player_pool.contains(player_id) || session.completed_players.contains(player_id) {
            return Err(Error::NotFound);
        }
        let player = self.store.get_player(player_id).ok_or(Error::NotFound)?;
        if player.status == PlayerStatus::Sold {
            return Err(Error::NotFound);
        }
        if base_price <= 0 {
            return Err(Error::InvalidBidAmount);
        }

        let env = self.env();
        let round = Round {
            player_id,
            base_price,
            current_bid: base_price,
            highest_bidder: None,
            bids: Vec::new(env),
            consecutive: Map::new(env),
            state: RoundState::Ready,
            timer_started_at: 0,
        };
        self.store.clear_undo_record();
        self.store.save_round(&round);

        PlayerSelectedEventData {
            auction_id: session.auction_id,
            player_id,
            base_price,
        }
        .publish(env);

        Ok(round)
    }

    pub fn start_bidding(&self, caller: &Address) -> Result<Round, Error> {
        let session = self.session_for(caller)?;
        let mut round = self.live_round()?;
        if round.state != RoundState::Ready {
            return Err(Error::InvalidState);
        }

        round.state = RoundState::Live;
        round.timer_started_at = self.now();
        self.store.save_round(&round);

        BiddingStartedEventData {
            auction_id: session.auction_id,
            player_id: round.player_id,
        }
        .publish(self.env());

        Ok(round)
    }

    pub fn pause_bidding(&self, caller: &Address) -> Result<Round, Error> {
        let session = self.session_for(caller)?;
        let mut round = self.live_round()?;
        if round.state != RoundState::Live {
            return Err(Error::InvalidState);
        }

        round.state = RoundState::Paused;
        self.store.save_round(&round);

        BiddingPausedEventData {
            auction_id: session.auction_id,
            player_id: round.player_id,
        }
        .publish(self.env());

        Ok(round)
    }

    pub fn resume_bidding(&self, caller: &Address) -> Result<Round, Error> {
        let session = self.session_for(caller)?;
        let mut round = self.live_round()?;
        if round.state != RoundState::Paused {
            return Err(Error::InvalidState);
        }

        round.state = RoundState::Live;
        round.timer_started_at = self.now();
        self.store.save_round(&round);

        BiddingResumedEventData {
            auction_id: session.auction_id,
            player_id: round.player_id,
        }
        .publish(self.env());

        Ok(round)
    }

    // ========================================================================
    // BIDDING
    // ========================================================================

    /// Bids one increment over the current bid. Returns the next suggested
    /// bid, capped to the bidding team's purse.
    pub fn confirm_bid(&self, caller: &Address, team_id: u32, team_name: String) -> Result<i128, Error> {
        self.place_bid(caller, team_id, team_name, None)
    }

    /// Bids an explicit `amount`, which must beat the current bid and sit on
    /// the increment grid of its own tier.
    pub fn submit_jump_bid(
        &self,
        caller: &Address,
        team_id: u32,
        team_name: String,
        amount: i128,
    ) -> Result<i128, Error> {
        self.place_bid(caller, team_id, team_name, Some(amount))
    }

    fn place_bid(
        &self,
        caller: &Address,
        team_id: u32,
        team_name: String,
        jump: Option<i128>,
    ) -> Result<i128, Error> {
        let session = self.session_for(caller)?;
        let mut round = self.live_round()?;
        if round.state != RoundState::Live {
            return Err(Error::InvalidState);
        }

        let amount = match jump {
            Some(amount) => amount,
            None => slab::next_bid(&session.slabs, round.current_bid)?,
        };
        let proposal = BidProposal {
            team_id,
            team_name,
            amount,
            is_jump_bid: jump.is_some(),
        };
        guard::validate(&session, &round, &proposal)?;

        // Advisory only; the purse is enforced at settlement.
        let franchise = self.store.get_franchise(team_id).ok_or(Error::NotFound)?;
        let suggested = slab::next_bid(&session.slabs, amount)?.min(franchise.purse_remaining);

        let env = self.env();
        let now = self.now();
        let bid_id = self.store.next_bid_id();
        let record = undo::snapshot(&round, bid_id, team_id, self.now_ms());
        let entry = BidEntry {
            id: bid_id,
            team_id,
            team_name: proposal.team_name,
            amount,
            timestamp: now,
            is_jump_bid: proposal.is_jump_bid,
        };

        guard::record_bid(env, &mut round, team_id);
        round.bids.push_back(entry.clone());
        round.current_bid = amount;
        round.highest_bidder = Some(team_id);
        round.timer_started_at = now;

        self.store.create_bid_record(&BidRecord {
            auction_id: session.auction_id,
            player_id: round.player_id,
            entry,
            undone: false,
        });
        self.store.save_undo_record(&record);
        self.store.save_round(&round);

        BidPlacedEventData {
            auction_id: session.auction_id,
            player_id: round.player_id,
            bid_id,
            team_id,
            amount,
            is_jump_bid: proposal.is_jump_bid,
        }
        .publish(env);

        Ok(suggested)
    }

    // ========================================================================
    // UNDO
    // ========================================================================

    /// Reverses the newest bid if its record is still inside the window.
    ///
    /// A failed call leaves storage untouched, so an expired record keeps
    /// answering `UndoWindowExpired` here until [`Self::can_undo_last_bid`]
    /// drops it.
    pub fn undo_last_bid(&self, caller: &Address) -> Result<Round, Error> {
        let session = self.session_for(caller)?;
        let mut round = self.store.load_round().ok_or(Error::UndoNotAvailable)?;

        let record = undo::check(&round, self.store.load_undo_record().as_ref(), self.now_ms())?;
        let entry = undo::apply(&mut round, record)?;

        self.store.void_bid_record(entry.id);
        self.store.clear_undo_record();
        self.store.save_round(&round);

        BidUndoneEventData {
            auction_id: session.auction_id,
            player_id: round.player_id,
            bid_id: entry.id,
            team_id: entry.team_id,
            restored_bid: round.current_bid,
        }
        .publish(self.env());

        Ok(round)
    }

    /// Reports whether the newest bid can be undone. A stale record is
    /// dropped for good.
    pub fn can_undo_last_bid(&self, caller: &Address) -> Result<bool, Error> {
        self.session_for(caller)?;
        let Some(round) = self.store.load_round() else {
            return Ok(false);
        };
        let Some(record) = self.store.load_undo_record() else {
            return Ok(false);
        };

        match undo::check(&round, Some(&record), self.now_ms()) {
            Ok(_) => Ok(true),
            Err(err) => {
                if undo::is_stale(err) {
                    log!(self.env(), "undo: record dropped", record.bid_id, err as u32);
                    self.store.clear_undo_record();
                }
                Ok(false)
            }
        }
    }

    // ========================================================================
    // RESOLUTION
    // ========================================================================

    pub fn mark_sold(&self, caller: &Address) -> Result<SaleReceipt, Error> {
        let mut session = self.session_for(caller)?;
        let round = self.live_round()?;
        if !matches!(round.state, RoundState::Live | RoundState::Paused) {
            return Err(Error::InvalidState);
        }
        let winner = round.highest_bidder.ok_or(Error::InvalidState)?;

        let sale = Sale {
            auction_id: session.auction_id,
            player_id: round.player_id,
            team_id: winner,
            final_price: round.current_bid,
        };
        let receipt = settlement::settle(&self.store, &sale)?;

        self.record_history(&HistoryEntry {
            auction_id: session.auction_id,
            player_id: round.player_id,
            outcome: Outcome::Sold,
            final_price: receipt.final_price,
            winner: Some(winner),
            bid_count: round.bids.len(),
            resolved_at: self.now(),
        });

        if let Some(index) = session.player_pool.first_index_of(round.player_id) {
            session.player_pool.remove(index);
        }
        session.completed_players.push_back(round.player_id);
        self.store.save_session_snapshot(&session);
        self.close_round();

        PlayerSoldEventData {
            auction_id: session.auction_id,
            player_id: round.player_id,
            team_id: receipt.team_id,
            final_price: receipt.final_price,
            purse_remaining: receipt.purse_remaining,
        }
        .publish(self.env());

        Ok(receipt)
    }

    pub fn mark_unsold(&self, caller: &Address) -> Result<(), Error> {
        let session = self.session_for(caller)?;
        let round = self.live_round()?;
        if !matches!(
            round.state,
            RoundState::Ready | RoundState::Live | RoundState::Paused
        ) {
            return Err(Error::InvalidState);
        }

        if let Some(mut player) = self.store.get_player(round.player_id) {
            player.status = PlayerStatus::Unsold;
            self.store.update_player(&player);
        }

        self.record_history(&HistoryEntry {
            auction_id: session.auction_id,
            player_id: round.player_id,
            outcome: Outcome::Unsold,
            final_price: 0,
            winner: None,
            bid_count: round.bids.len(),
            resolved_at: self.now(),
        });

        self.close_round();

        PlayerUnsoldEventData {
            auction_id: session.auction_id,
            player_id: round.player_id,
        }
        .publish(self.env());

        Ok(())
    }

    // ========================================================================
    // VIEWS
    // ========================================================================

    pub fn session(&self) -> Result<AuctionSession, Error> {
        self.store.load_session_snapshot().ok_or(Error::NotFound)
    }

    pub fn round(&self) -> Result<Round, Error> {
        self.session()?;
        self.store.load_round().ok_or(Error::NotFound)
    }

    pub fn round_state(&self) -> RoundState {
        self.store
            .load_round()
            .map_or(RoundState::Idle, |round| round.state)
    }

    /// Minimal legal bid over the current one.
    pub fn next_bid_amount(&self) -> Result<i128, Error> {
        let session = self.session()?;
        let round = self.store.load_round().ok_or(Error::NotFound)?;
        slab::next_bid(&session.slabs, round.current_bid)
    }

    /// Seconds left on the round timer; zero unless bidding is live.
    pub fn time_remaining(&self) -> u64 {
        let (Some(session), Some(round)) = (self.store.load_session_snapshot(), self.store.load_round()) else {
            return 0;
        };
        if round.state != RoundState::Live {
            return 0;
        }
        let elapsed = self.now().saturating_sub(round.timer_started_at);
        session.round_timer_secs.saturating_sub(elapsed)
    }
}
