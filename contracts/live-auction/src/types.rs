use soroban_sdk::{contracttype, Address, Map, String, Vec};

// ============================================================================
// Constants
// ============================================================================

/// Amounts are fixed point with two decimals: `975` is 9.75.
pub const PRICE_SCALE: i128 = 100;

/// A bid may be reversed for this long after it was placed (inclusive).
pub const UNDO_WINDOW_MS: u64 = 15_000;

/// A team may hold at most this many bids in a row.
pub const MAX_CONSECUTIVE_BIDS: u32 = 2;

/// Number of ledgers in a day (assuming ~5 second block time)
pub const DAY_IN_LEDGERS: u32 = 17280;

pub const INSTANCE_TTL_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_TTL_AMOUNT - DAY_IN_LEDGERS;

pub const PERSISTENT_TTL_AMOUNT: u32 = 120 * DAY_IN_LEDGERS;
pub const PERSISTENT_TTL_THRESHOLD: u32 = PERSISTENT_TTL_AMOUNT - DAY_IN_LEDGERS;

// ============================================================================
// Storage keys
// ============================================================================

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Registry administrator
    Admin,
    /// The one live session snapshot
    ActiveSession,
    /// Round of the live session, if a player is selected
    Round,
    /// Undo record for the newest bid of the live round
    PendingUndo,
    /// Monotonic bid id source
    BidCounter,
    Franchise(u32),
    Player(u32),
    /// Pre-configured auction by id
    Auction(u64),
    /// Resolved rounds of an auction
    History(u64),
    Stats(u64),
    Archive(u64),
    BidRecord(u64),
}

// ============================================================================
// Lifecycle enums
// ============================================================================

/// Status of a pre-configured auction.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AuctionStatus {
    Ready = 0,
    Live = 1,
    Completed = 2,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum SessionStatus {
    Active = 0,
    Completed = 1,
}

/// Phase of the per-player bidding round.
///
/// A stored [`Round`] is only ever `Ready`, `Live` or `Paused`. `Idle` is
/// reported when the session holds no round; `Sold` and `Unsold` are the
/// outcomes a round resolves into before it is dropped.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RoundState {
    Idle = 0,
    Ready = 1,
    Live = 2,
    Paused = 3,
    Sold = 4,
    Unsold = 5,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PlayerStatus {
    Available = 0,
    Sold = 1,
    Unsold = 2,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Outcome {
    Sold = 0,
    Unsold = 1,
}

// ============================================================================
// Configuration
// ============================================================================

/// One price tier of the increment schedule.
///
/// `max_price = None` marks the open-ended top tier.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlabTier {
    pub max_price: Option<i128>,
    pub increment: i128,
}

/// Input for registering an auction ahead of time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionInput {
    pub auction_id: u64,
    pub sport: String,
    pub name: String,
    pub auctioneer: Address,
    pub team_ids: Vec<u32>,
    pub player_pool: Vec<u32>,
    pub slabs: Vec<SlabTier>,
    pub round_timer_secs: u64,
}

/// A pre-configured auction waiting to be run (or already run).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionConfig {
    pub auction_id: u64,
    pub sport: String,
    pub name: String,
    pub auctioneer: Address,
    pub team_ids: Vec<u32>,
    pub player_pool: Vec<u32>,
    pub slabs: Vec<SlabTier>,
    pub round_timer_secs: u64,
    pub status: AuctionStatus,
}

// ============================================================================
// Live state
// ============================================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidEntry {
    pub id: u64,
    pub team_id: u32,
    pub team_name: String,
    pub amount: i128,
    pub timestamp: u64,
    pub is_jump_bid: bool,
}

/// Everything needed to reverse the newest bid.
///
/// Kept in its own instance slot next to the round; absence means there is
/// nothing to undo.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UndoRecord {
    pub bid_id: u64,
    pub team_id: u32,
    pub created_at_ms: u64,
    pub prior_bid: i128,
    pub prior_bidder: Option<u32>,
    pub prior_consecutive: Map<u32, u32>,
}

/// Bidding ledger for the player currently under the hammer.
///
/// Stored under [`DataKey::Round`]; no entry means the session is idle. The
/// leader's display name is the `team_name` of the newest entry in `bids`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Round {
    pub player_id: u32,
    pub base_price: i128,
    pub current_bid: i128,
    pub highest_bidder: Option<u32>,
    pub bids: Vec<BidEntry>,
    pub consecutive: Map<u32, u32>,
    pub state: RoundState,
    pub timer_started_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionSession {
    pub auction_id: u64,
    pub sport: String,
    pub name: String,
    pub auctioneer: Address,
    pub team_ids: Vec<u32>,
    pub player_pool: Vec<u32>,
    pub completed_players: Vec<u32>,
    pub slabs: Vec<SlabTier>,
    pub round_timer_secs: u64,
    pub status: SessionStatus,
    pub started_at: u64,
}

// ============================================================================
// Entities owned by the registry
// ============================================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Franchise {
    pub team_id: u32,
    pub name: String,
    pub owner: Address,
    pub purse_remaining: i128,
    pub roster: Vec<u32>,
    pub player_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Player {
    pub player_id: u32,
    pub name: String,
    pub base_price: i128,
    pub status: PlayerStatus,
    pub sold_price: i128,
    pub sold_to: Option<u32>,
}

// ============================================================================
// Settlement and history
// ============================================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleReceipt {
    pub auction_id: u64,
    pub player_id: u32,
    pub team_id: u32,
    pub final_price: i128,
    pub purse_remaining: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidRecord {
    pub auction_id: u64,
    pub player_id: u32,
    pub entry: BidEntry,
    pub undone: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HistoryEntry {
    pub auction_id: u64,
    pub player_id: u32,
    pub outcome: Outcome,
    pub final_price: i128,
    pub winner: Option<u32>,
    pub bid_count: u32,
    pub resolved_at: u64,
}

/// Running aggregates, updated once per resolved round.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionStats {
    pub players_auctioned: u32,
    pub players_sold: u32,
    pub players_unsold: u32,
    pub total_spend: i128,
    pub average_price: i128,
    pub highest_sale: i128,
    pub highest_sale_player: Option<u32>,
    pub team_spend: Map<u32, i128>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArchivedAuction {
    pub auction_id: u64,
    pub name: String,
    pub sport: String,
    pub auctioneer: Address,
    pub started_at: u64,
    pub ended_at: u64,
    pub duration_secs: u64,
    pub stats: AuctionStats,
    pub entries: u32,
}
