use soroban_sdk::{contractevent, Address, String};

/// Event emitted when the contract is initialized
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEventData {
    #[topic]
    pub admin: Address,
    pub initialized_at: u64,
}

/// Event emitted when a franchise joins the registry
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FranchiseRegisteredEventData {
    #[topic]
    pub team_id: u32,
    pub name: String,
    pub purse: i128,
}

/// Event emitted when a franchise purse is edited outside a sale
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PurseUpdatedEventData {
    #[topic]
    pub team_id: u32,
    pub old_purse: i128,
    pub new_purse: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlayerRegisteredEventData {
    #[topic]
    pub player_id: u32,
    pub base_price: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionConfiguredEventData {
    #[topic]
    pub auction_id: u64,
    pub auctioneer: Address,
    pub teams: u32,
    pub players: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctioneerAssignedEventData {
    #[topic]
    pub auction_id: u64,
    pub auctioneer: Address,
}

/// Event emitted when the live session opens
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionStartedEventData {
    #[topic]
    pub auction_id: u64,
    #[topic]
    pub auctioneer: Address,
    pub started_at: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlayerSelectedEventData {
    #[topic]
    pub auction_id: u64,
    #[topic]
    pub player_id: u32,
    pub base_price: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BiddingStartedEventData {
    #[topic]
    pub auction_id: u64,
    #[topic]
    pub player_id: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BiddingPausedEventData {
    #[topic]
    pub auction_id: u64,
    #[topic]
    pub player_id: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BiddingResumedEventData {
    #[topic]
    pub auction_id: u64,
    #[topic]
    pub player_id: u32,
}

/// Event emitted for every accepted bid, regular or jump
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidPlacedEventData {
    #[topic]
    pub auction_id: u64,
    #[topic]
    pub player_id: u32,
    pub bid_id: u64,
    pub team_id: u32,
    pub amount: i128,
    pub is_jump_bid: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidUndoneEventData {
    #[topic]
    pub auction_id: u64,
    #[topic]
    pub player_id: u32,
    pub bid_id: u64,
    pub team_id: u32,
    pub restored_bid: i128,
}

/// Event emitted once a sale has settled
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlayerSoldEventData {
    #[topic]
    pub auction_id: u64,
    #[topic]
    pub player_id: u32,
    pub team_id: u32,
    pub final_price: i128,
    pub purse_remaining: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlayerUnsoldEventData {
    #[topic]
    pub auction_id: u64,
    #[topic]
    pub player_id: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionEndedEventData {
    #[topic]
    pub auction_id: u64,
    pub players_sold: u32,
    pub total_spend: i128,
    pub duration_secs: u64,
}
