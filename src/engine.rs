// Collection Accounting Engine - Facade
// Thread-safe wrapper around a storage backend. State transitions are
// serialized behind a write lock so extraction indices stay deterministic
// and gap-free under concurrent callers; queries share a read lock.

use log::debug;
use parking_lot::{Mutex, RwLock};

use crate::error::AssetResult;
use crate::operations::{
    burn, extract, extraction_count_of, metadata_key, mint, mint_multiple, supply_of,
    was_ever_minted, AssetStorage, ExtractParams, MintMultipleParams, MintParams, RuntimeContext,
};
use crate::storage::MemoryAssetStorage;
use crate::token_id::TokenId;
use crate::types::{Address, Extraction};

/// Thread-safe collection accounting engine
///
/// Owns a storage backend and the engine's chain placement. Extraction
/// records are retained until the external ledger drains them.
pub struct CollectionEngine<S: AssetStorage = MemoryAssetStorage> {
    storage: RwLock<S>,
    chain_index: u16,
    extractions: Mutex<Vec<Extraction>>,
}

impl CollectionEngine<MemoryAssetStorage> {
    /// Create an engine over a fresh in-memory backend
    pub fn in_memory(chain_index: u16) -> Self {
        Self::new(MemoryAssetStorage::new(), chain_index)
    }
}

impl<S: AssetStorage> CollectionEngine<S> {
    /// Create an engine over an existing backend
    pub fn new(storage: S, chain_index: u16) -> Self {
        Self {
            storage: RwLock::new(storage),
            chain_index,
            extractions: Mutex::new(Vec::new()),
        }
    }

    /// Chain index baked into every token this engine mints
    #[inline]
    pub fn chain_index(&self) -> u16 {
        self.chain_index
    }

    fn ctx(&self, caller: Address) -> RuntimeContext {
        RuntimeContext::new(caller, self.chain_index)
    }

    // ========================================
    // State Transitions
    // ========================================

    /// Mint a new fungible pack
    pub fn mint(&self, params: MintParams) -> AssetResult<TokenId> {
        let creator = params.creator;
        let mut storage = self.storage.write();
        let id = mint(&mut *storage, &self.ctx(creator), params)?;
        debug!("minted pack {}", id);
        Ok(id)
    }

    /// Mint multiple fungible packs atomically
    pub fn mint_multiple(&self, params: MintMultipleParams) -> AssetResult<Vec<TokenId>> {
        let creator = params.creator;
        let mut storage = self.storage.write();
        let ids = mint_multiple(&mut *storage, &self.ctx(creator), params)?;
        debug!("minted {} packs for {}", ids.len(), creator);
        Ok(ids)
    }

    /// Burn fungible pack units, returning the remaining balance
    pub fn burn(&self, pack: &TokenId, amount: u64) -> AssetResult<u64> {
        let mut storage = self.storage.write();
        let remaining = burn(&mut *storage, pack, amount)?;
        debug!("burned {} units of {} ({} left)", amount, pack, remaining);
        Ok(remaining)
    }

    /// Extract a unique collectible from a pack on behalf of `caller`
    pub fn extract(&self, caller: Address, params: ExtractParams) -> AssetResult<Extraction> {
        let mut storage = self.storage.write();
        let extraction = extract(&mut *storage, &self.ctx(caller), params)?;
        self.extractions.lock().push(extraction);
        Ok(extraction)
    }

    /// Set or clear an operator approval for an owner
    pub fn set_approval_for_all(
        &self,
        owner: &Address,
        operator: &Address,
        approved: bool,
    ) -> AssetResult<()> {
        self.storage
            .write()
            .set_approval_for_all(owner, operator, approved)
    }

    /// Register or remove a privileged extraction agent
    pub fn set_extraction_agent(&self, operator: &Address, enabled: bool) -> AssetResult<()> {
        self.storage.write().set_extraction_agent(operator, enabled)
    }

    // ========================================
    // Queries
    // ========================================

    /// Remaining fungible supply of a pack
    pub fn supply_of(&self, pack: &TokenId) -> AssetResult<u64> {
        supply_of(&*self.storage.read(), pack)
    }

    /// Whether a token's lineage was ever minted
    pub fn was_ever_minted(&self, id: &TokenId) -> bool {
        was_ever_minted(&*self.storage.read(), id)
    }

    /// Number of collectibles ever extracted from a pack
    pub fn extraction_count_of(&self, pack: &TokenId) -> AssetResult<u64> {
        extraction_count_of(&*self.storage.read(), pack)
    }

    /// Canonical metadata key for a token's lineage
    pub fn metadata_key(&self, id: &TokenId) -> AssetResult<TokenId> {
        metadata_key(&*self.storage.read(), id)
    }

    /// Whether an operator is approved for all of an owner's packs
    pub fn is_approved_for_all(&self, owner: &Address, operator: &Address) -> bool {
        self.storage.read().is_approved_for_all(owner, operator)
    }

    // ========================================
    // Event Log
    // ========================================

    /// Drain the retained extraction records
    ///
    /// Records accumulate in extraction order until the ledger collects
    /// them. Draining does not affect accounting state.
    pub fn drain_extractions(&self) -> Vec<Extraction> {
        std::mem::take(&mut *self.extractions.lock())
    }
}
