// Collection Accounting Engine - In-Memory Storage
// HashMap-backed storage backend, used by the engine facade and in tests.

use std::collections::{HashMap, HashSet};

use crate::error::AssetResult;
use crate::operations::AssetStorage;
use crate::token_id::TokenId;
use crate::types::{Address, SupplyRecord};

/// In-memory storage backend
#[derive(Debug, Default)]
pub struct MemoryAssetStorage {
    supplies: HashMap<TokenId, SupplyRecord>,
    extraction_counts: HashMap<TokenId, u64>,
    pack_ordinals: HashMap<Address, u64>,
    approvals: HashMap<(Address, Address), bool>,
    extraction_agents: HashSet<Address>,
}

impl MemoryAssetStorage {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }
}

impl AssetStorage for MemoryAssetStorage {
    fn get_supply(&self, pack: &TokenId) -> Option<SupplyRecord> {
        self.supplies.get(pack).copied()
    }

    fn set_supply(&mut self, pack: &TokenId, record: SupplyRecord) -> AssetResult<()> {
        self.supplies.insert(*pack, record);
        Ok(())
    }

    fn get_extraction_count(&self, pack: &TokenId) -> u64 {
        *self.extraction_counts.get(pack).unwrap_or(&0)
    }

    fn set_extraction_count(&mut self, pack: &TokenId, count: u64) -> AssetResult<()> {
        self.extraction_counts.insert(*pack, count);
        Ok(())
    }

    fn next_pack_ordinal(&self, creator: &Address) -> u64 {
        *self.pack_ordinals.get(creator).unwrap_or(&0)
    }

    fn set_next_pack_ordinal(&mut self, creator: &Address, ordinal: u64) -> AssetResult<()> {
        self.pack_ordinals.insert(*creator, ordinal);
        Ok(())
    }

    fn is_approved_for_all(&self, owner: &Address, operator: &Address) -> bool {
        *self.approvals.get(&(*owner, *operator)).unwrap_or(&false)
    }

    fn set_approval_for_all(
        &mut self,
        owner: &Address,
        operator: &Address,
        approved: bool,
    ) -> AssetResult<()> {
        self.approvals.insert((*owner, *operator), approved);
        Ok(())
    }

    fn is_extraction_agent(&self, operator: &Address) -> bool {
        self.extraction_agents.contains(operator)
    }

    fn set_extraction_agent(&mut self, operator: &Address, enabled: bool) -> AssetResult<()> {
        if enabled {
            self.extraction_agents.insert(*operator);
        } else {
            self.extraction_agents.remove(operator);
        }
        Ok(())
    }
}
