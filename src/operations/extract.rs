// Engine Extraction Operations
// This module converts one fungible pack unit into a unique collectible.
//
// Check order is part of the contract: structural, then permission, then
// AlreadyUnique, then destination, then supply. Callers distinguish error
// codes, so the order must not change.

use log::debug;

use crate::error::{AssetError, AssetResult};
use crate::token_id::{encode, TokenFields, TokenId};
use crate::types::{Address, Extraction};

use super::validation::validate_pack_id;
use super::{check_extraction_permission, AssetStorage, RuntimeContext};

// ========================================
// Extraction Parameters
// ========================================

/// Parameters for extracting a collectible from a pack
#[derive(Clone, Debug)]
pub struct ExtractParams {
    /// Fungible pack ID to take the unit from
    pub source: TokenId,
    /// Current holder of the pack unit
    pub owner: Address,
    /// Recipient of the new collectible
    pub to: Address,
}

impl ExtractParams {
    /// Create new extraction parameters
    pub fn new(source: TokenId, owner: Address, to: Address) -> Self {
        Self { source, owner, to }
    }
}

// ========================================
// Extraction Operation
// ========================================

/// Extract a unique collectible from a fungible pack
///
/// The new collectible shares the pack's creator, pack ordinal and chain
/// index; its extraction index is the next value of the pack's strictly
/// increasing counter (1-based). The returned record is the balance delta
/// for the external ledger: one unit of `source` off the owner, one unit of
/// the new ID to `to`.
///
/// # Parameters
/// - `storage`: Storage backend
/// - `ctx`: Runtime context (caller)
/// - `params`: Extraction parameters
///
/// # Returns
/// - `Ok(Extraction)`: Source, new collectible ID and recipient
/// - `Err(AssetError)`: Error code
pub fn extract<S: AssetStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
    params: ExtractParams,
) -> AssetResult<Extraction> {
    // Step 1: Structural validation
    let fields = validate_pack_id(&params.source)?;

    // Step 2: Permission check
    check_extraction_permission(storage, &params.owner, &ctx.caller)?;

    // Step 3: A pack down to its last unit is already effectively unique
    let record = storage.get_supply(&params.source).unwrap_or_default();
    if record.balance == 1 {
        return Err(AssetError::AlreadyUnique);
    }

    // Step 4: Destination check
    if params.to.is_zero() {
        return Err(AssetError::InvalidDestination);
    }

    // Step 5: Supply check
    if record.balance == 0 {
        return Err(AssetError::InsufficientSupply);
    }

    // Step 6: Allocate the extraction index
    let count = storage
        .get_extraction_count(&params.source)
        .checked_add(1)
        .ok_or(AssetError::Overflow)?;
    let extraction_index = u32::try_from(count).map_err(|_| AssetError::Overflow)?;

    // Step 7: Encode the collectible ID
    let new_id = encode(&TokenFields::unique(
        fields.creator,
        fields.pack_index,
        fields.chain_index,
        extraction_index,
    ))?;

    // Step 8: Commit (all checks passed, no partial state on error paths)
    let mut record = record;
    record.balance -= 1;
    storage.set_supply(&params.source, record)?;
    storage.set_extraction_count(&params.source, count)?;

    debug!(
        "extracted {} from {} (index {}, {} units left)",
        new_id, params.source, extraction_index, record.balance
    );

    Ok(Extraction {
        source: params.source,
        new_id,
        to: params.to,
    })
}
