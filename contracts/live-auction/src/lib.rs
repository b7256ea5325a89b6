#![no_std]

//! # Live Auction
//!
//! Soroban contract that runs one live player auction at a time.
//!
//! The auctioneer drives a single session through per-player rounds:
//! select a player, open bidding, take increment or jump bids from the
//! participating franchises, optionally undo the newest bid within its
//! window, and close the round as sold or unsold. A sale settles the
//! franchise purse and the player record together.
//!
//! ## Modules
//!
//! - [`engine`]: session and round state machine.
//! - `slab`, `guard`, `undo`: bid increment schedule, bid legality and the
//!   single-level undo.
//! - `settlement`: atomic purse deduction and ownership transfer.
//! - `history`: best-effort outcome log, statistics and archives.
//! - `storage`: the [`storage::LedgerStore`] boundary and its contract
//!   storage implementation.
//! - `admin`: registry of franchises, players and pre-configured auctions.

mod admin;
pub mod engine;
mod errors;
mod events;
mod guard;
mod history;
mod settlement;
mod slab;
pub mod storage;
mod types;
mod undo;

#[cfg(test)]
mod test;

use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};

use crate::engine::AuctionEngine;
use crate::storage::{ContractStore, LedgerStore};

pub use errors::Error;
pub use types::*;

#[contract]
pub struct LiveAuction;

#[contractimpl]
impl LiveAuction {
    // ========================================================================
    // REGISTRY
    // ========================================================================

    /// Initialize the contract with the registry admin.
    ///
    /// # Errors
    /// * `Error::AlreadyInitialized` - If an admin is already set
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        admin::initialize(&ContractStore::new(&env), &admin)
    }

    pub fn register_franchise(
        env: Env,
        admin: Address,
        team_id: u32,
        name: String,
        owner: Address,
        purse: i128,
    ) -> Result<Franchise, Error> {
        admin::register_franchise(&Self::store(&env), &admin, team_id, name, owner, purse)
    }

    /// Overwrite a franchise purse (admin only)
    pub fn set_franchise_purse(env: Env, admin: Address, team_id: u32, purse: i128) -> Result<Franchise, Error> {
        admin::set_franchise_purse(&Self::store(&env), &admin, team_id, purse)
    }

    pub fn register_player(
        env: Env,
        admin: Address,
        player_id: u32,
        name: String,
        base_price: i128,
    ) -> Result<Player, Error> {
        admin::register_player(&Self::store(&env), &admin, player_id, name, base_price)
    }

    /// Register an auction ahead of time in the `Ready` state.
    ///
    /// # Errors
    /// * `Error::InvalidConfig` - Malformed slabs, empty teams or pool, zero timer
    /// * `Error::NotFound` - A team or player is not registered
    pub fn configure_auction(env: Env, admin: Address, input: AuctionInput) -> Result<AuctionConfig, Error> {
        admin::configure_auction(&Self::store(&env), &admin, input)
    }

    pub fn assign_auctioneer(
        env: Env,
        admin: Address,
        auction_id: u64,
        auctioneer: Address,
    ) -> Result<AuctionConfig, Error> {
        admin::assign_auctioneer(&Self::store(&env), &admin, auction_id, auctioneer)
    }

    pub fn get_franchise(env: Env, team_id: u32) -> Result<Franchise, Error> {
        Self::store(&env).get_franchise(team_id).ok_or(Error::NotFound)
    }

    pub fn get_player(env: Env, player_id: u32) -> Result<Player, Error> {
        Self::store(&env).get_player(player_id).ok_or(Error::NotFound)
    }

    pub fn get_auction(env: Env, auction_id: u64) -> Result<AuctionConfig, Error> {
        Self::store(&env).get_auction(auction_id).ok_or(Error::NotFound)
    }

    // ========================================================================
    // SESSION
    // ========================================================================

    /// Open the live session for a `Ready` auction.
    ///
    /// # Errors
    /// * `Error::SessionConflict` - Another session is active
    /// * `Error::Unauthorized` - Caller is not the configured auctioneer
    /// * `Error::InvalidState` - The auction is already live or completed
    pub fn start_session(env: Env, auctioneer: Address, auction_id: u64) -> Result<AuctionSession, Error> {
        Self::engine(&env)?.start_session(&auctioneer, auction_id)
    }

    /// Close the session and archive its history.
    pub fn end_session(env: Env, auctioneer: Address) -> Result<ArchivedAuction, Error> {
        Self::engine(&env)?.end_session(&auctioneer)
    }

    // ========================================================================
    // ROUND
    // ========================================================================

    pub fn select_player(env: Env, auctioneer: Address, player_id: u32, base_price: i128) -> Result<Round, Error> {
        Self::engine(&env)?.select_player(&auctioneer, player_id, base_price)
    }

    pub fn start_bidding(env: Env, auctioneer: Address) -> Result<Round, Error> {
        Self::engine(&env)?.start_bidding(&auctioneer)
    }

    pub fn pause_bidding(env: Env, auctioneer: Address) -> Result<Round, Error> {
        Self::engine(&env)?.pause_bidding(&auctioneer)
    }

    pub fn resume_bidding(env: Env, auctioneer: Address) -> Result<Round, Error> {
        Self::engine(&env)?.resume_bidding(&auctioneer)
    }

    /// Place the next increment bid for `team_id`.
    ///
    /// # Returns
    /// * The next suggested bid, capped to the team's remaining purse
    pub fn confirm_bid(env: Env, auctioneer: Address, team_id: u32, team_name: String) -> Result<i128, Error> {
        Self::engine(&env)?.confirm_bid(&auctioneer, team_id, team_name)
    }

    /// Place a bid of an explicit amount for `team_id`.
    ///
    /// # Errors
    /// * `Error::InvalidBidAmount` - Not above the current bid or off the slab grid
    pub fn submit_jump_bid(
        env: Env,
        auctioneer: Address,
        team_id: u32,
        team_name: String,
        amount: i128,
    ) -> Result<i128, Error> {
        Self::engine(&env)?.submit_jump_bid(&auctioneer, team_id, team_name, amount)
    }

    pub fn undo_last_bid(env: Env, auctioneer: Address) -> Result<Round, Error> {
        Self::engine(&env)?.undo_last_bid(&auctioneer)
    }

    pub fn can_undo_last_bid(env: Env, auctioneer: Address) -> Result<bool, Error> {
        Self::engine(&env)?.can_undo_last_bid(&auctioneer)
    }

    /// Settle the round to the highest bidder.
    ///
    /// # Errors
    /// * `Error::InvalidState` - No bids were placed; use `mark_unsold`
    /// * `Error::InsufficientPurse` - The winner's purse no longer covers the price
    pub fn mark_sold(env: Env, auctioneer: Address) -> Result<SaleReceipt, Error> {
        Self::engine(&env)?.mark_sold(&auctioneer)
    }

    pub fn mark_unsold(env: Env, auctioneer: Address) -> Result<(), Error> {
        Self::engine(&env)?.mark_unsold(&auctioneer)
    }

    // ========================================================================
    // VIEWS
    // ========================================================================

    pub fn get_session(env: Env) -> Result<AuctionSession, Error> {
        Self::engine(&env)?.session()
    }

    pub fn get_round(env: Env) -> Result<Round, Error> {
        Self::engine(&env)?.round()
    }

    pub fn get_round_state(env: Env) -> Result<RoundState, Error> {
        Ok(Self::engine(&env)?.round_state())
    }

    pub fn next_bid_amount(env: Env) -> Result<i128, Error> {
        Self::engine(&env)?.next_bid_amount()
    }

    pub fn time_remaining(env: Env) -> Result<u64, Error> {
        Ok(Self::engine(&env)?.time_remaining())
    }

    pub fn get_history(env: Env, auction_id: u64) -> Vec<HistoryEntry> {
        Self::store(&env).get_history(auction_id)
    }

    pub fn get_stats(env: Env, auction_id: u64) -> Result<AuctionStats, Error> {
        Self::store(&env).get_stats(auction_id).ok_or(Error::NotFound)
    }

    pub fn get_archive(env: Env, auction_id: u64) -> Result<ArchivedAuction, Error> {
        Self::store(&env).get_archive(auction_id).ok_or(Error::NotFound)
    }

    pub fn get_bid_record(env: Env, bid_id: u64) -> Result<BidRecord, Error> {
        Self::store(&env).get_bid_record(bid_id).ok_or(Error::NotFound)
    }
}

impl LiveAuction {
    fn store(env: &Env) -> ContractStore {
        ContractStore::new(env)
    }

    fn engine(env: &Env) -> Result<AuctionEngine<ContractStore>, Error> {
        let store = Self::store(env);
        store.require_initialized()?;
        store.extend_instance_ttl();
        Ok(AuctionEngine::new(store))
    }
}
