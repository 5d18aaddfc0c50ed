// Engine Query Operations
// This module contains read-only query functions. None of them require
// authorization, and none of them mutate state.

use crate::error::{AssetError, AssetResult};
use crate::token_id::TokenId;

use super::validation::validate_pack_id;
use super::AssetStorage;

// ========================================
// Lineage Queries (pure)
// ========================================

/// Get the collection ID a token belongs to
///
/// A fungible pack is its own collection; a collectible maps back to the
/// pack it was extracted from.
///
/// # Parameters
/// - `id`: Token ID
///
/// # Returns
/// - `Ok(TokenId)`: Collection ID
/// - `Err(AssetError)`: Malformed ID
pub fn collection_of(id: &TokenId) -> AssetResult<TokenId> {
    id.collection_of()
}

/// Get the position of a token within its collection
///
/// 0 for fungible packs, the 1-based extraction index for collectibles.
///
/// # Parameters
/// - `id`: Token ID
///
/// # Returns
/// - `Ok(u32)`: Collection index
/// - `Err(AssetError)`: Malformed ID
pub fn collection_index_of(id: &TokenId) -> AssetResult<u32> {
    id.collection_index_of()
}

/// Get the chain index baked into a token ID at mint time
///
/// # Parameters
/// - `id`: Token ID
///
/// # Returns
/// - `Ok(u16)`: Chain index
/// - `Err(AssetError)`: Malformed ID
pub fn chain_index_of(id: &TokenId) -> AssetResult<u16> {
    id.chain_index_of()
}

/// Check whether an ID is a well-formed token ID
///
/// # Parameters
/// - `id`: Token ID
///
/// # Returns
/// - `bool`: Whether the ID decodes
pub fn is_collection(id: &TokenId) -> bool {
    id.is_collection()
}

// ========================================
// Storage-Backed Queries
// ========================================

/// Check whether a token's lineage was ever minted
///
/// Stays true forever once the pack is minted, across burns on either side
/// of the lineage. Malformed and unknown IDs answer false.
///
/// # Parameters
/// - `storage`: Storage backend
/// - `id`: Token ID (fungible or unique)
///
/// # Returns
/// - `bool`: Whether the lineage was ever minted
pub fn was_ever_minted<S: AssetStorage + ?Sized>(storage: &S, id: &TokenId) -> bool {
    match id.collection_of() {
        Ok(pack) => storage
            .get_supply(&pack)
            .map(|record| record.ever_minted)
            .unwrap_or(false),
        Err(_) => false,
    }
}

/// Get the remaining fungible supply of a pack
///
/// # Parameters
/// - `storage`: Storage backend
/// - `pack`: Fungible pack ID
///
/// # Returns
/// - `Ok(u64)`: Remaining balance (0 for never-minted packs)
/// - `Err(AssetError)`: Malformed or unique ID
pub fn supply_of<S: AssetStorage + ?Sized>(storage: &S, pack: &TokenId) -> AssetResult<u64> {
    validate_pack_id(pack)?;
    Ok(storage
        .get_supply(pack)
        .map(|record| record.balance)
        .unwrap_or(0))
}

/// Get the number of collectibles ever extracted from a pack
///
/// # Parameters
/// - `storage`: Storage backend
/// - `pack`: Fungible pack ID
///
/// # Returns
/// - `Ok(u64)`: Extraction count
/// - `Err(AssetError)`: Malformed or unique ID
pub fn extraction_count_of<S: AssetStorage + ?Sized>(
    storage: &S,
    pack: &TokenId,
) -> AssetResult<u64> {
    validate_pack_id(pack)?;
    Ok(storage.get_extraction_count(pack))
}

/// Get the canonical metadata key for a token
///
/// Every member of a lineage shares one key, the pack ID, which external
/// URI resolvers index by.
///
/// # Parameters
/// - `storage`: Storage backend
/// - `id`: Token ID (fungible or unique)
///
/// # Returns
/// - `Ok(TokenId)`: The lineage's metadata key
/// - `Err(AssetError)`: Malformed ID, or lineage never minted
pub fn metadata_key<S: AssetStorage + ?Sized>(
    storage: &S,
    id: &TokenId,
) -> AssetResult<TokenId> {
    let pack = id.collection_of()?;
    if !was_ever_minted(storage, &pack) {
        return Err(AssetError::NotFound);
    }
    Ok(pack)
}
