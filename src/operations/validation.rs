// Engine Input Validation
// This module contains input validation helpers shared by the operations.

use crate::error::{AssetError, AssetResult};
use crate::token_id::{decode, TokenFields, TokenId};
use crate::types::Address;

/// Validate that an amount is positive
pub fn validate_amount(amount: u64) -> AssetResult<()> {
    if amount == 0 {
        return Err(AssetError::InvalidAmount);
    }
    Ok(())
}

/// Validate that a destination address is usable
pub fn validate_destination(to: &Address) -> AssetResult<()> {
    if to.is_zero() {
        return Err(AssetError::InvalidDestination);
    }
    Ok(())
}

/// Validate that an ID names a fungible pack and return its fields
///
/// Unique collectible IDs are rejected: supply accounting only exists for
/// the fungible side of a lineage.
pub fn validate_pack_id(id: &TokenId) -> AssetResult<TokenFields> {
    let fields = decode(*id)?;
    if fields.is_nft {
        return Err(AssetError::Malformed);
    }
    Ok(fields)
}
