// Collection Accounting Engine - Core Types
// This module defines the data structures shared by engine operations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::token_id::TokenId;

// ========================================
// Protocol Constants
// ========================================

/// Maximum batch operation size
pub const MAX_BATCH_SIZE: usize = 100;

/// Bit width of the pack ordinal field in a token ID
pub const PACK_INDEX_BITS: u32 = 48;

/// Bit width of the chain index field in a token ID
pub const CHAIN_INDEX_BITS: u32 = 16;

/// Bit width of the extraction index field in a token ID
pub const EXTRACTION_INDEX_BITS: u32 = 31;

// ========================================
// Address
// ========================================

/// 20-byte account address
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(#[serde(with = "hex::serde")] pub [u8; 20]);

impl Address {
    /// The zero address, used to represent "no account"
    pub const ZERO: Address = Address([0u8; 20]);

    /// Create an address from raw bytes
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Get the raw address bytes
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Check whether this is the zero address
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

// ========================================
// Supply Record
// ========================================

/// Per-pack supply accounting
///
/// Created when a pack lineage is first minted. The record is never deleted
/// and `ever_minted` is never cleared, so lineage queries keep answering
/// after the fungible supply burns to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyRecord {
    /// Remaining fungible units of the pack
    pub balance: u64,
    /// Whether the pack was ever minted
    pub ever_minted: bool,
}

impl SupplyRecord {
    /// Create a record for a freshly minted pack
    pub fn minted(supply: u64) -> Self {
        Self {
            balance: supply,
            ever_minted: true,
        }
    }
}

// ========================================
// Extraction Record
// ========================================

/// Result of converting one fungible pack unit into a unique collectible
///
/// The external ledger applies this as two balance deltas: one unit of
/// `source` debited from the owner, one unit of `new_id` credited to `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Fungible pack ID the unit was taken from
    pub source: TokenId,
    /// Newly encoded unique collectible ID
    pub new_id: TokenId,
    /// Recipient of the collectible
    pub to: Address,
}
