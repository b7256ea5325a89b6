//! Sale finalization.
//!
//! The purse check is repeated here against the committed franchise record:
//! the advisory cap shown at bid time may be stale if the purse was edited
//! while the round was live.

use crate::errors::Error;
use crate::storage::LedgerStore;
use crate::types::{PlayerStatus, SaleReceipt};

/// A winning bid waiting to be settled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Sale {
    pub auction_id: u64,
    pub player_id: u32,
    pub team_id: u32,
    pub final_price: i128,
}

/// Moves `final_price` out of the winner's purse and the player onto its
/// roster. Either both records change or neither does.
pub fn settle<S: LedgerStore>(store: &S, sale: &Sale) -> Result<SaleReceipt, Error> {
    store.run_atomic(|tx| {
        let mut franchise = tx.get_franchise(sale.team_id).ok_or(Error::NotFound)?;
        let mut player = tx.get_player(sale.player_id).ok_or(Error::NotFound)?;

        if player.status == PlayerStatus::Sold {
            return Err(Error::InvalidState);
        }
        if sale.final_price > franchise.purse_remaining {
            return Err(Error::InsufficientPurse);
        }

        franchise.purse_remaining -= sale.final_price;
        franchise.roster.push_back(sale.player_id);
        franchise.player_count = franchise
            .player_count
            .checked_add(1)
            .ok_or(Error::InvalidState)?;

        player.status = PlayerStatus::Sold;
        player.sold_price = sale.final_price;
        player.sold_to = Some(sale.team_id);

        let receipt = SaleReceipt {
            auction_id: sale.auction_id,
            player_id: sale.player_id,
            team_id: sale.team_id,
            final_price: sale.final_price,
            purse_remaining: franchise.purse_remaining,
        };

        tx.stage_franchise(franchise);
        tx.stage_player(player);
        Ok(receipt)
    })
}
