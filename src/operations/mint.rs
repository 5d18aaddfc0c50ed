// Engine Mint Operations
// This module contains the pack mint logic.

use crate::error::{AssetError, AssetResult};
use crate::token_id::{encode, TokenFields, TokenId};
use crate::types::{Address, SupplyRecord, MAX_BATCH_SIZE};

use super::validation::validate_amount;
use super::{AssetStorage, RuntimeContext};

// ========================================
// Mint Parameters
// ========================================

/// Parameters for minting a single fungible pack
#[derive(Clone, Debug)]
pub struct MintParams {
    /// Creator address, baked into the token ID
    pub creator: Address,
    /// Initial fungible supply
    pub supply: u64,
    /// Explicit pack ordinal; auto-assigned when absent
    pub pack_index: Option<u64>,
}

impl MintParams {
    /// Create new mint parameters with an auto-assigned pack ordinal
    pub fn new(creator: Address, supply: u64) -> Self {
        Self {
            creator,
            supply,
            pack_index: None,
        }
    }

    /// Set an explicit pack ordinal
    pub fn with_pack_index(mut self, pack_index: u64) -> Self {
        self.pack_index = Some(pack_index);
        self
    }
}

// ========================================
// Mint Operation
// ========================================

/// Mint a new fungible pack
///
/// # Parameters
/// - `storage`: Storage backend
/// - `ctx`: Runtime context (caller, chain index)
/// - `params`: Mint parameters
///
/// # Returns
/// - `Ok(TokenId)`: The new pack ID
/// - `Err(AssetError)`: Error code
pub fn mint<S: AssetStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
    params: MintParams,
) -> AssetResult<TokenId> {
    // Step 1: Input validation
    validate_amount(params.supply)?;

    // Step 2: Resolve the pack ordinal
    let ordinal = match params.pack_index {
        Some(ordinal) => {
            let id = pack_id(&params.creator, ordinal, ctx.chain_index)?;
            if storage.get_supply(&id).is_some() {
                return Err(AssetError::AlreadyMinted);
            }
            ordinal
        }
        None => next_free_ordinal(storage, &params.creator, ctx.chain_index, 1)?,
    };

    // Step 3: Encode the pack ID
    let id = pack_id(&params.creator, ordinal, ctx.chain_index)?;

    // Step 4: Initialize supply and extraction counter
    storage.set_supply(&id, SupplyRecord::minted(params.supply))?;
    storage.set_extraction_count(&id, 0)?;

    // Step 5: Advance the creator's ordinal allocator past this pack
    let next = ordinal.checked_add(1).ok_or(AssetError::Overflow)?;
    if next > storage.next_pack_ordinal(&params.creator) {
        storage.set_next_pack_ordinal(&params.creator, next)?;
    }

    Ok(id)
}

// ========================================
// Batch Mint Operation
// ========================================

/// Parameters for minting several packs at once
#[derive(Clone, Debug)]
pub struct MintMultipleParams {
    /// Creator address
    pub creator: Address,
    /// Initial supply per pack
    pub supplies: Vec<u64>,
    /// Explicit pack ordinals; contiguous auto-assignment when absent
    pub pack_indices: Option<Vec<u64>>,
}

impl MintMultipleParams {
    /// Create new batch mint parameters with auto-assigned ordinals
    pub fn new(creator: Address, supplies: Vec<u64>) -> Self {
        Self {
            creator,
            supplies,
            pack_indices: None,
        }
    }

    /// Set explicit pack ordinals, one per supply entry
    pub fn with_pack_indices(mut self, pack_indices: Vec<u64>) -> Self {
        self.pack_indices = Some(pack_indices);
        self
    }
}

/// Mint multiple fungible packs
///
/// # Parameters
/// - `storage`: Storage backend
/// - `ctx`: Runtime context
/// - `params`: Batch mint parameters
///
/// # Returns
/// - `Ok(Vec<TokenId>)`: List of new pack IDs
/// - `Err(AssetError)`: Error code (entire batch fails, nothing written)
pub fn mint_multiple<S: AssetStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
    params: MintMultipleParams,
) -> AssetResult<Vec<TokenId>> {
    // Step 1: Validate batch size
    if params.supplies.is_empty() {
        return Err(AssetError::BatchEmpty);
    }
    if params.supplies.len() > MAX_BATCH_SIZE {
        return Err(AssetError::BatchSizeExceeded);
    }

    // Step 2: Validate all supplies
    for supply in &params.supplies {
        validate_amount(*supply)?;
    }

    // Step 3: Resolve all ordinals before writing anything
    let ordinals = match &params.pack_indices {
        Some(ordinals) => {
            if ordinals.len() != params.supplies.len() {
                return Err(AssetError::InvalidFields);
            }
            for (i, ordinal) in ordinals.iter().enumerate() {
                let id = pack_id(&params.creator, *ordinal, ctx.chain_index)?;
                if storage.get_supply(&id).is_some() {
                    return Err(AssetError::AlreadyMinted);
                }
                // Duplicate ordinals within the batch collide as well
                if ordinals[..i].contains(ordinal) {
                    return Err(AssetError::AlreadyMinted);
                }
            }
            ordinals.clone()
        }
        None => {
            let start = next_free_ordinal(
                storage,
                &params.creator,
                ctx.chain_index,
                params.supplies.len() as u64,
            )?;
            (0..params.supplies.len() as u64)
                .map(|i| start + i)
                .collect()
        }
    };

    // Step 4: Mint all packs
    let mut ids = Vec::with_capacity(params.supplies.len());
    let mut next = storage.next_pack_ordinal(&params.creator);
    for (ordinal, supply) in ordinals.iter().zip(&params.supplies) {
        let id = pack_id(&params.creator, *ordinal, ctx.chain_index)?;
        storage.set_supply(&id, SupplyRecord::minted(*supply))?;
        storage.set_extraction_count(&id, 0)?;
        next = next.max(ordinal.checked_add(1).ok_or(AssetError::Overflow)?);
        ids.push(id);
    }

    // Step 5: Advance the ordinal allocator past the batch
    storage.set_next_pack_ordinal(&params.creator, next)?;

    Ok(ids)
}

// ========================================
// Ordinal Allocation
// ========================================

fn pack_id(creator: &Address, ordinal: u64, chain_index: u16) -> AssetResult<TokenId> {
    encode(&TokenFields::fungible(*creator, ordinal, chain_index))
}

/// Find the first run of `count` consecutive unused ordinals for a creator
///
/// Explicit mints can leave holes and islands in the ordinal space, so the
/// allocator skips forward past any ordinal with an existing lineage.
fn next_free_ordinal<S: AssetStorage + ?Sized>(
    storage: &S,
    creator: &Address,
    chain_index: u16,
    count: u64,
) -> AssetResult<u64> {
    let mut start = storage.next_pack_ordinal(creator);
    'search: loop {
        for i in 0..count {
            let ordinal = start.checked_add(i).ok_or(AssetError::Overflow)?;
            let id = pack_id(creator, ordinal, chain_index)?;
            if storage.get_supply(&id).is_some() {
                start = ordinal.checked_add(1).ok_or(AssetError::Overflow)?;
                continue 'search;
            }
        }
        return Ok(start);
    }
}
