// Engine Operations Module
// This module contains the core accounting logic.
//
// The operations are designed to be runtime-agnostic:
// - Storage operations are abstracted via traits
// - Runtime data (caller, chain placement) is passed as parameters
// - This allows testing and reuse across different ledger environments

mod burn;
mod extract;
mod mint;
mod query;
mod validation;

pub use burn::*;
pub use extract::*;
pub use mint::*;
pub use query::*;
pub use validation::*;

use crate::error::{AssetError, AssetResult};
use crate::token_id::TokenId;
use crate::types::{Address, SupplyRecord};

// ========================================
// Storage Trait (for dependency injection)
// ========================================

/// Abstract storage interface for engine operations
/// Runtime implementations provide concrete storage backends
pub trait AssetStorage {
    // Supply operations, keyed by fungible pack ID
    fn get_supply(&self, pack: &TokenId) -> Option<SupplyRecord>;
    fn set_supply(&mut self, pack: &TokenId, record: SupplyRecord) -> AssetResult<()>;

    // Extraction counter operations, keyed by fungible pack ID
    fn get_extraction_count(&self, pack: &TokenId) -> u64;
    fn set_extraction_count(&mut self, pack: &TokenId, count: u64) -> AssetResult<()>;

    // Pack ordinal allocation, per creator
    fn next_pack_ordinal(&self, creator: &Address) -> u64;
    fn set_next_pack_ordinal(&mut self, creator: &Address, ordinal: u64) -> AssetResult<()>;

    // Operator approval operations
    fn is_approved_for_all(&self, owner: &Address, operator: &Address) -> bool;
    fn set_approval_for_all(
        &mut self,
        owner: &Address,
        operator: &Address,
        approved: bool,
    ) -> AssetResult<()>;

    // Extraction agent registry
    fn is_extraction_agent(&self, operator: &Address) -> bool;
    fn set_extraction_agent(&mut self, operator: &Address, enabled: bool) -> AssetResult<()>;
}

// ========================================
// Runtime Context
// ========================================

/// Runtime context providing caller and chain information
pub struct RuntimeContext {
    /// Current caller (transaction signer)
    pub caller: Address,
    /// Chain the engine mints on, baked into every token ID
    pub chain_index: u16,
}

impl RuntimeContext {
    /// Create a new runtime context
    pub fn new(caller: Address, chain_index: u16) -> Self {
        Self {
            caller,
            chain_index,
        }
    }
}

// ========================================
// Permission Checking Utilities
// ========================================

/// Check if the caller may extract from a pack held by `owner`
/// Returns Ok(()) if authorized, Err with appropriate error code otherwise
///
/// Two tiers: the owner always may; anyone else needs both the owner's
/// operator approval and a slot in the extraction agent registry.
pub fn check_extraction_permission<S: AssetStorage + ?Sized>(
    storage: &S,
    owner: &Address,
    caller: &Address,
) -> AssetResult<()> {
    // Owner always has permission
    if owner == caller {
        return Ok(());
    }

    if storage.is_approved_for_all(owner, caller) && storage.is_extraction_agent(caller) {
        return Ok(());
    }

    Err(AssetError::Unauthorized)
}
