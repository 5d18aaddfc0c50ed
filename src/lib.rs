// Collection Accounting Engine
//
// Accounting core for a dual-representation asset system: fungible "packs"
// minted with a finite supply, and unique collectibles extracted from them
// one unit at a time. The engine owns the token ID codec, per-pack supply,
// strictly increasing extraction indices and the lineage queries that stay
// stable across burns. Balance movement is left to an external ledger,
// which applies the extraction records the engine emits.
//
// Module structure:
// - error: Error codes and types
// - types: Core data structures and constants
// - token_id: Structured 256-bit token ID codec
// - operations: Runtime-agnostic accounting logic over a storage trait
// - storage: In-memory storage backend
// - engine: Thread-safe facade

mod engine;
mod error;
pub mod operations;
mod storage;
mod token_id;
mod types;

pub use engine::CollectionEngine;
pub use error::{AssetError, AssetResult};
pub use storage::MemoryAssetStorage;
pub use token_id::{decode, encode, TokenFields, TokenId};
pub use types::{
    Address, Extraction, SupplyRecord, CHAIN_INDEX_BITS, EXTRACTION_INDEX_BITS, MAX_BATCH_SIZE,
    PACK_INDEX_BITS,
};
