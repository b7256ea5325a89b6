//! Bid increment schedule.
//!
//! A schedule is an ascending list of [`SlabTier`]s. The tier that applies to
//! a price is the first one whose ceiling is at or above it; the last tier has
//! no ceiling.

use soroban_sdk::Vec;

use crate::errors::Error;
use crate::types::SlabTier;

/// Increment of the first tier whose `max_price` covers `price`.
pub fn increment_for(slabs: &Vec<SlabTier>, price: i128) -> Result<i128, Error> {
    for tier in slabs.iter() {
        match tier.max_price {
            Some(max) if price > max => continue,
            _ => return Ok(tier.increment),
        }
    }
    Err(Error::InvalidConfig)
}

/// Minimal legal bid above `current`, using the tier of `current` itself.
pub fn next_bid(slabs: &Vec<SlabTier>, current: i128) -> Result<i128, Error> {
    let increment = increment_for(slabs, current)?;
    current
        .checked_add(increment)
        .ok_or(Error::InvalidBidAmount)
}

/// Whether `amount` sits on the increment grid of its own tier.
///
/// Amounts are fixed point, so the remainder is exact: an amount is aligned
/// when it divides evenly by the tier increment and rejected otherwise.
pub fn is_aligned(slabs: &Vec<SlabTier>, amount: i128) -> Result<bool, Error> {
    if amount <= 0 {
        return Ok(false);
    }
    let increment = increment_for(slabs, amount)?;
    Ok(amount % increment == 0)
}

/// Rejects schedules that [`increment_for`] could not answer for every price.
pub fn validate_slabs(slabs: &Vec<SlabTier>) -> Result<(), Error> {
    let len = slabs.len();
    if len == 0 {
        return Err(Error::InvalidConfig);
    }

    let mut floor: Option<i128> = None;
    for (index, tier) in slabs.iter().enumerate() {
        if tier.increment <= 0 {
            return Err(Error::InvalidConfig);
        }
        let is_last = index as u32 + 1 == len;
        match (tier.max_price, is_last) {
            (None, true) => {}
            (None, false) | (Some(_), true) => return Err(Error::InvalidConfig),
            (Some(max), false) => {
                if max <= 0 || floor.map_or(false, |prev| max <= prev) {
                    return Err(Error::InvalidConfig);
                }
                floor = Some(max);
            }
        }
    }
    Ok(())
}
