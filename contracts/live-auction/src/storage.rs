use soroban_sdk::{Address, Env, IntoVal, TryFromVal, Val, Vec};

use crate::errors::Error;
use crate::types::{
    ArchivedAuction, AuctionConfig, AuctionSession, AuctionStats, BidRecord, DataKey, Franchise,
    HistoryEntry, Player, Round, UndoRecord, INSTANCE_TTL_AMOUNT, INSTANCE_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT,
    PERSISTENT_TTL_THRESHOLD,
};

// ============================================================================
// LEDGER STORE
// ============================================================================

/// Persistence boundary of the auction engine.
///
/// Plain reads and writes are last-write-wins. Writes that must land together
/// go through [`LedgerStore::run_atomic`].
pub trait LedgerStore: Sized {
    fn env(&self) -> &Env;

    fn get_player(&self, player_id: u32) -> Option<Player>;
    fn update_player(&self, player: &Player);
    fn get_franchise(&self, team_id: u32) -> Option<Franchise>;
    fn update_franchise(&self, franchise: &Franchise);

    fn get_auction(&self, auction_id: u64) -> Option<AuctionConfig>;
    fn update_auction(&self, config: &AuctionConfig);

    fn next_bid_id(&self) -> u64;
    fn create_bid_record(&self, record: &BidRecord);
    fn get_bid_record(&self, bid_id: u64) -> Option<BidRecord>;
    fn void_bid_record(&self, bid_id: u64);

    fn save_session_snapshot(&self, session: &AuctionSession);
    fn load_session_snapshot(&self) -> Option<AuctionSession>;
    fn clear_session_snapshot(&self);

    fn save_round(&self, round: &Round);
    fn load_round(&self) -> Option<Round>;
    fn clear_round(&self);

    fn save_undo_record(&self, record: &UndoRecord);
    fn load_undo_record(&self) -> Option<UndoRecord>;
    fn clear_undo_record(&self);

    fn append_history_entry(&self, entry: &HistoryEntry);
    fn get_history(&self, auction_id: u64) -> Vec<HistoryEntry>;
    fn get_stats(&self, auction_id: u64) -> Option<AuctionStats>;
    fn set_stats(&self, auction_id: u64, stats: &AuctionStats);
    fn get_archive(&self, auction_id: u64) -> Option<ArchivedAuction>;
    fn set_archive(&self, archive: &ArchivedAuction);

    /// Runs `tx` against the committed state and applies its staged writes
    /// only if it returns `Ok`. Nothing is written on `Err`.
    fn run_atomic<T, F>(&self, tx: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Transaction<'_, Self>) -> Result<T, Error>,
    {
        let mut txn = Transaction::new(self);
        let out = tx(&mut txn)?;
        txn.commit();
        Ok(out)
    }
}

/// Reads go straight to the store; writes are staged until commit.
pub struct Transaction<'a, S: LedgerStore> {
    store: &'a S,
    franchises: Vec<Franchise>,
    players: Vec<Player>,
}

impl<'a, S: LedgerStore> Transaction<'a, S> {
    fn new(store: &'a S) -> Self {
        let env = store.env();
        Self {
            store,
            franchises: Vec::new(env),
            players: Vec::new(env),
        }
    }

    pub fn get_franchise(&self, team_id: u32) -> Option<Franchise> {
        self.store.get_franchise(team_id)
    }

    pub fn get_player(&self, player_id: u32) -> Option<Player> {
        self.store.get_player(player_id)
    }

    pub fn stage_franchise(&mut self, franchise: Franchise) {
        self.franchises.push_back(franchise);
    }

    pub fn stage_player(&mut self, player: Player) {
        self.players.push_back(player);
    }

    fn commit(self) {
        for franchise in self.franchises.iter() {
            self.store.update_franchise(&franchise);
        }
        for player in self.players.iter() {
            self.store.update_player(&player);
        }
    }
}

// ============================================================================
// CONTRACT STORAGE
// ============================================================================

/// [`LedgerStore`] over Soroban contract storage.
///
/// The admin, the bid counter and the live session (with its round and undo
/// record) live in instance storage; everything else is persistent with its
/// TTL bumped on every touch.
#[derive(Clone)]
pub struct ContractStore {
    env: Env,
}

impl ContractStore {
    pub fn new(env: &Env) -> Self {
        Self { env: env.clone() }
    }

    pub fn has_admin(&self) -> bool {
        self.env.storage().instance().has(&DataKey::Admin)
    }

    pub fn get_admin(&self) -> Option<Address> {
        self.env.storage().instance().get(&DataKey::Admin)
    }

    pub fn set_admin(&self, admin: &Address) {
        self.env.storage().instance().set(&DataKey::Admin, admin);
    }

    pub fn extend_instance_ttl(&self) {
        self.env
            .storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_AMOUNT);
    }

    pub fn require_initialized(&self) -> Result<(), Error> {
        if !self.has_admin() {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }

    fn read<V>(&self, key: &DataKey) -> Option<V>
    where
        V: TryFromVal<Env, Val>,
    {
        let value = self.env.storage().persistent().get::<_, V>(key);
        if value.is_some() {
            self.env
                .storage()
                .persistent()
                .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
        }
        value
    }

    fn write<V>(&self, key: &DataKey, value: &V)
    where
        V: IntoVal<Env, Val>,
    {
        self.env.storage().persistent().set(key, value);
        self.env
            .storage()
            .persistent()
            .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
}

impl LedgerStore for ContractStore {
    fn env(&self) -> &Env {
        &self.env
    }

    fn get_player(&self, player_id: u32) -> Option<Player> {
        self.read(&DataKey::Player(player_id))
    }

    fn update_player(&self, player: &Player) {
        self.write(&DataKey::Player(player.player_id), player);
    }

    fn get_franchise(&self, team_id: u32) -> Option<Franchise> {
        self.read(&DataKey::Franchise(team_id))
    }

    fn update_franchise(&self, franchise: &Franchise) {
        self.write(&DataKey::Franchise(franchise.team_id), franchise);
    }

    fn get_auction(&self, auction_id: u64) -> Option<AuctionConfig> {
        self.read(&DataKey::Auction(auction_id))
    }

    fn update_auction(&self, config: &AuctionConfig) {
        self.write(&DataKey::Auction(config.auction_id), config);
    }

    fn next_bid_id(&self) -> u64 {
        let next = self
            .env
            .storage()
            .instance()
            .get::<_, u64>(&DataKey::BidCounter)
            .unwrap_or(0)
            + 1;
        self.env.storage().instance().set(&DataKey::BidCounter, &next);
        next
    }

    fn create_bid_record(&self, record: &BidRecord) {
        self.write(&DataKey::BidRecord(record.entry.id), record);
    }

    fn get_bid_record(&self, bid_id: u64) -> Option<BidRecord> {
        self.read(&DataKey::BidRecord(bid_id))
    }

    fn void_bid_record(&self, bid_id: u64) {
        if let Some(mut record) = self.get_bid_record(bid_id) {
            record.undone = true;
            self.create_bid_record(&record);
        }
    }

    fn save_session_snapshot(&self, session: &AuctionSession) {
        self.env
            .storage()
            .instance()
            .set(&DataKey::ActiveSession, session);
    }

    fn load_session_snapshot(&self) -> Option<AuctionSession> {
        self.env.storage().instance().get(&DataKey::ActiveSession)
    }

    fn clear_session_snapshot(&self) {
        self.env.storage().instance().remove(&DataKey::ActiveSession);
    }

    fn save_round(&self, round: &Round) {
        self.env.storage().instance().set(&DataKey::Round, round);
    }

    fn load_round(&self) -> Option<Round> {
        self.env.storage().instance().get(&DataKey::Round)
    }

    fn clear_round(&self) {
        self.env.storage().instance().remove(&DataKey::Round);
    }

    fn save_undo_record(&self, record: &UndoRecord) {
        self.env.storage().instance().set(&DataKey::PendingUndo, record);
    }

    fn load_undo_record(&self) -> Option<UndoRecord> {
        self.env.storage().instance().get(&DataKey::PendingUndo)
    }

    fn clear_undo_record(&self) {
        self.env.storage().instance().remove(&DataKey::PendingUndo);
    }

    fn append_history_entry(&self, entry: &HistoryEntry) {
        let mut history = self.get_history(entry.auction_id);
        history.push_back(entry.clone());
        self.write(&DataKey::History(entry.auction_id), &history);
    }

    fn get_history(&self, auction_id: u64) -> Vec<HistoryEntry> {
        self.read(&DataKey::History(auction_id))
            .unwrap_or(Vec::new(&self.env))
    }

    fn get_stats(&self, auction_id: u64) -> Option<AuctionStats> {
        self.read(&DataKey::Stats(auction_id))
    }

    fn set_stats(&self, auction_id: u64, stats: &AuctionStats) {
        self.write(&DataKey::Stats(auction_id), stats);
    }

    fn get_archive(&self, auction_id: u64) -> Option<ArchivedAuction> {
        self.read(&DataKey::Archive(auction_id))
    }

    fn set_archive(&self, archive: &ArchivedAuction) {
        self.write(&DataKey::Archive(archive.auction_id), archive);
    }
}
