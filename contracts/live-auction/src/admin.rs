//! Registry surface: the franchises, players and pre-configured auctions the
//! engine bids over. Everything here is admin-only.

use soroban_sdk::{Address, String, Vec};

use crate::errors::Error;
use crate::events::*;
use crate::slab;
use crate::storage::{ContractStore, LedgerStore};
use crate::types::{AuctionConfig, AuctionInput, AuctionStatus, Franchise, Player, PlayerStatus};

pub fn require_admin(store: &ContractStore, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    let admin = store.get_admin().ok_or(Error::NotInitialized)?;
    if admin != *caller {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

pub fn initialize(store: &ContractStore, admin: &Address) -> Result<(), Error> {
    if store.has_admin() {
        return Err(Error::AlreadyInitialized);
    }
    admin.require_auth();
    store.set_admin(admin);
    store.extend_instance_ttl();

    InitializedEventData {
        admin: admin.clone(),
        initialized_at: store.env().ledger().timestamp(),
    }
    .publish(store.env());

    Ok(())
}

pub fn register_franchise(
    store: &ContractStore,
    caller: &Address,
    team_id: u32,
    name: String,
    owner: Address,
    purse: i128,
) -> Result<Franchise, Error> {
    require_admin(store, caller)?;

    if store.get_franchise(team_id).is_some() {
        return Err(Error::AlreadyExists);
    }
    if name.is_empty() || purse < 0 {
        return Err(Error::InvalidConfig);
    }

    let franchise = Franchise {
        team_id,
        name: name.clone(),
        owner,
        purse_remaining: purse,
        roster: Vec::new(store.env()),
        player_count: 0,
    };
    store.update_franchise(&franchise);

    FranchiseRegisteredEventData { team_id, name, purse }.publish(store.env());

    Ok(franchise)
}

/// Manual purse edit. May land between a winning bid and its settlement.
pub fn set_franchise_purse(
    store: &ContractStore,
    caller: &Address,
    team_id: u32,
    purse: i128,
) -> Result<Franchise, Error> {
    require_admin(store, caller)?;

    if purse < 0 {
        return Err(Error::InvalidConfig);
    }
    let mut franchise = store.get_franchise(team_id).ok_or(Error::NotFound)?;
    let old_purse = franchise.purse_remaining;
    franchise.purse_remaining = purse;
    store.update_franchise(&franchise);

    PurseUpdatedEventData {
        team_id,
        old_purse,
        new_purse: purse,
    }
    .publish(store.env());

    Ok(franchise)
}

pub fn register_player(
    store: &ContractStore,
    caller: &Address,
    player_id: u32,
    name: String,
    base_price: i128,
) -> Result<Player, Error> {
    require_admin(store, caller)?;

    if store.get_player(player_id).is_some() {
        return Err(Error::AlreadyExists);
    }
    if name.is_empty() || base_price <= 0 {
        return Err(Error::InvalidConfig);
    }

    let player = Player {
        player_id,
        name,
        base_price,
        status: PlayerStatus::Available,
        sold_price: 0,
        sold_to: None,
    };
    store.update_player(&player);

    PlayerRegisteredEventData {
        player_id,
        base_price,
    }
    .publish(store.env());

    Ok(player)
}

pub fn configure_auction(
    store: &ContractStore,
    caller: &Address,
    input: AuctionInput,
) -> Result<AuctionConfig, Error> {
    require_admin(store, caller)?;

    if store.get_auction(input.auction_id).is_some() {
        return Err(Error::AlreadyExists);
    }
    slab::validate_slabs(&input.slabs)?;
    if input.round_timer_secs == 0 || input.team_ids.is_empty() || input.player_pool.is_empty() {
        return Err(Error::InvalidConfig);
    }
    if has_duplicates(&input.team_ids) || has_duplicates(&input.player_pool) {
        return Err(Error::InvalidConfig);
    }
    for team_id in input.team_ids.iter() {
        store.get_franchise(team_id).ok_or(Error::NotFound)?;
    }
    for player_id in input.player_pool.iter() {
        store.get_player(player_id).ok_or(Error::NotFound)?;
    }

    let config = AuctionConfig {
        auction_id: input.auction_id,
        sport: input.sport,
        name: input.name,
        auctioneer: input.auctioneer,
        team_ids: input.team_ids,
        player_pool: input.player_pool,
        slabs: input.slabs,
        round_timer_secs: input.round_timer_secs,
        status: AuctionStatus::Ready,
    };
    store.update_auction(&config);

    AuctionConfiguredEventData {
        auction_id: config.auction_id,
        auctioneer: config.auctioneer.clone(),
        teams: config.team_ids.len(),
        players: config.player_pool.len(),
    }
    .publish(store.env());

    Ok(config)
}

/// Hands an auction to a different auctioneer before it goes live.
pub fn assign_auctioneer(
    store: &ContractStore,
    caller: &Address,
    auction_id: u64,
    auctioneer: Address,
) -> Result<AuctionConfig, Error> {
    require_admin(store, caller)?;

    let mut config = store.get_auction(auction_id).ok_or(Error::NotFound)?;
    if config.status != AuctionStatus::Ready {
        return Err(Error::InvalidState);
    }
    config.auctioneer = auctioneer.clone();
    store.update_auction(&config);

    AuctioneerAssignedEventData {
        auction_id,
        auctioneer,
    }
    .publish(store.env());

    Ok(config)
}

fn has_duplicates(ids: &Vec<u32>) -> bool {
    ids.iter()
        .enumerate()
        .any(|(index, id)| ids.first_index_of(id) != Some(index as u32))
}
