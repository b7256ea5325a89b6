use soroban_sdk::contracterror;

/// Error codes returned by the live auction contract.
///
/// Every validation failure is detected before any state is touched, so a
/// returned error always means the ledger is exactly as it was before the call.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Contract has already been initialized
    AlreadyInitialized = 1,
    /// Contract has not been initialized
    NotInitialized = 2,
    /// Caller is not the auctioneer (or admin) for this operation
    Unauthorized = 3,
    /// A live session already exists
    SessionConflict = 4,
    /// Operation is not legal in the current session or round state
    InvalidState = 5,
    /// Session, round, auction, player or franchise is missing
    NotFound = 6,
    /// Team is not part of the live session
    NotParticipating = 7,
    /// Team already holds two consecutive bids
    ConsecutiveBidLimit = 8,
    /// Bid amount is not above the current bid or not slab aligned
    InvalidBidAmount = 9,
    /// Winning franchise cannot cover the final price
    InsufficientPurse = 10,
    /// The undo window for the last bid has elapsed
    UndoWindowExpired = 11,
    /// There is no bid that can be undone
    UndoNotAvailable = 12,
    /// Auction configuration is malformed
    InvalidConfig = 13,
    /// Entity with this id is already registered
    AlreadyExists = 14,
}

/// Failures on the best-effort history path.
///
/// These never reach the caller; the engine logs them and carries on.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum HistoryError {
    /// Running statistics would overflow
    StatsOverflow = 1,
    /// No statistics ledger was opened for the auction
    MissingStats = 2,
    /// An archive was already written for the auction
    AlreadyArchived = 3,
}
