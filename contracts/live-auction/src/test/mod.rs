pub mod history_test;
pub mod registry_test;
pub mod undo_test;

use crate::{AuctionInput, LiveAuction, LiveAuctionClient, SlabTier, PRICE_SCALE};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    vec, Address, Env, String,
};

pub const AUCTION_ID: u64 = 1;
pub const ROUND_TIMER_SECS: u64 = 30;

pub const ALPHA: u32 = 1;
pub const BRAVO: u32 = 2;
/// Small purse: 10.00
pub const CHARLIE: u32 = 3;
/// Registered but never seated in an auction
pub const DELTA: u32 = 4;

pub const PLAYER_ONE: u32 = 10;
pub const PLAYER_TWO: u32 = 11;
pub const PLAYER_THREE: u32 = 12;
/// Registered but not in the auction pool
pub const BENCHED: u32 = 99;

/// 9.50
pub const BASE_PRICE: i128 = 9 * PRICE_SCALE + 50;
/// 100.00
pub const FULL_PURSE: i128 = 100 * PRICE_SCALE;
/// 10.00
pub const SMALL_PURSE: i128 = 10 * PRICE_SCALE;

pub struct Setup {
    pub env: Env,
    pub client: LiveAuctionClient<'static>,
    pub admin: Address,
    pub auctioneer: Address,
}

impl Setup {
    pub fn text(&self, value: &str) -> String {
        String::from_str(&self.env, value)
    }

    pub fn team_name(&self, team_id: u32) -> String {
        let label = match team_id {
            ALPHA => "Alpha",
            BRAVO => "Bravo",
            CHARLIE => "Charlie",
            DELTA => "Delta",
            _ => "Unknown",
        };
        self.text(label)
    }

    pub fn open_session(&self) {
        self.client.start_session(&self.auctioneer, &AUCTION_ID);
    }

    /// Opens the session (if needed), selects `player_id` and starts bidding.
    pub fn open_round(&self, player_id: u32, base_price: i128) {
        if self.client.try_get_session().is_err() {
            self.open_session();
        }
        self.client.select_player(&self.auctioneer, &player_id, &base_price);
        self.client.start_bidding(&self.auctioneer);
    }

    pub fn bid(&self, team_id: u32) -> i128 {
        self.client
            .confirm_bid(&self.auctioneer, &team_id, &self.team_name(team_id))
    }

    pub fn jump(&self, team_id: u32, amount: i128) -> i128 {
        self.client
            .submit_jump_bid(&self.auctioneer, &team_id, &self.team_name(team_id), &amount)
    }

    pub fn advance(&self, seconds: u64) {
        let now = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(now + seconds);
    }
}

pub fn auction_input(env: &Env, auction_id: u64, auctioneer: &Address) -> AuctionInput {
    AuctionInput {
        auction_id,
        sport: String::from_str(env, "cricket"),
        name: String::from_str(env, "Premier League Auction"),
        auctioneer: auctioneer.clone(),
        team_ids: vec![env, ALPHA, BRAVO, CHARLIE],
        player_pool: vec![env, PLAYER_ONE, PLAYER_TWO, PLAYER_THREE],
        slabs: vec![
            env,
            SlabTier { max_price: Some(10 * PRICE_SCALE), increment: PRICE_SCALE / 4 },
            SlabTier { max_price: Some(20 * PRICE_SCALE), increment: PRICE_SCALE / 2 },
            SlabTier { max_price: None, increment: PRICE_SCALE },
        ],
        round_timer_secs: ROUND_TIMER_SECS,
    }
}

pub fn setup_test() -> Setup {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);

    let contract_id = env.register(LiveAuction, ());
    let client = LiveAuctionClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let auctioneer = Address::generate(&env);

    client.initialize(&admin);

    let teams: [(u32, &str, i128); 4] = [
        (ALPHA, "Alpha", FULL_PURSE),
        (BRAVO, "Bravo", FULL_PURSE),
        (CHARLIE, "Charlie", SMALL_PURSE),
        (DELTA, "Delta", FULL_PURSE),
    ];
    for (team_id, label, purse) in teams {
        client.register_franchise(
            &admin,
            &team_id,
            &String::from_str(&env, label),
            &Address::generate(&env),
            &purse,
        );
    }

    for player_id in [PLAYER_ONE, PLAYER_TWO, PLAYER_THREE, BENCHED] {
        client.register_player(&admin, &player_id, &String::from_str(&env, "player"), &BASE_PRICE);
    }

    client.configure_auction(&admin, &auction_input(&env, AUCTION_ID, &auctioneer));

    Setup {
        env,
        client,
        admin,
        auctioneer,
    }
}
