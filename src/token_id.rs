// Collection Accounting Engine - Token ID Codec
// This module packs and unpacks the structured 256-bit token ID.
//
// Bit layout (most significant first):
// - bits 255..96: creator address (160 bits)
// - bit  95:      uniqueness flag (0 = fungible pack, 1 = unique collectible)
// - bits 94..64:  extraction index (31 bits, 1-based, 0 for fungible)
// - bits 63..48:  chain index (16 bits)
// - bits 47..0:   pack ordinal (48 bits)
//
// Masking out the flag and the extraction index yields the collection ID,
// so a fungible pack is its own collection ID and every collectible
// extracted from it maps back to it.

use std::fmt;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::error::{AssetError, AssetResult};
use crate::types::{Address, CHAIN_INDEX_BITS, EXTRACTION_INDEX_BITS, PACK_INDEX_BITS};

const CHAIN_INDEX_SHIFT: usize = PACK_INDEX_BITS as usize;
const EXTRACTION_INDEX_SHIFT: usize = (PACK_INDEX_BITS + CHAIN_INDEX_BITS) as usize;
const NFT_FLAG_BIT: usize = EXTRACTION_INDEX_SHIFT + EXTRACTION_INDEX_BITS as usize;
const CREATOR_SHIFT: usize = NFT_FLAG_BIT + 1;

const PACK_INDEX_MASK: u64 = (1 << PACK_INDEX_BITS) - 1;
const CHAIN_INDEX_MASK: u64 = (1 << CHAIN_INDEX_BITS) - 1;
const EXTRACTION_INDEX_MASK: u64 = (1 << EXTRACTION_INDEX_BITS) - 1;

// ========================================
// Token ID
// ========================================

/// Opaque 256-bit token identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(pub U256);

impl TokenId {
    /// Get the raw 256-bit value
    #[inline]
    pub fn as_u256(&self) -> U256 {
        self.0
    }

    /// Check whether the uniqueness flag is set
    #[inline]
    pub fn is_unique(&self) -> bool {
        self.0.bit(NFT_FLAG_BIT)
    }

    /// Collection ID this token belongs to
    ///
    /// A fungible pack ID is its own collection ID; a collectible maps back
    /// to the pack it was extracted from. Fails on malformed IDs.
    pub fn collection_of(&self) -> AssetResult<TokenId> {
        decode(*self)?;
        let lineage_mask = !(U256::from(u64::from(u32::MAX)) << EXTRACTION_INDEX_SHIFT);
        Ok(TokenId(self.0 & lineage_mask))
    }

    /// Position of this token within its collection
    ///
    /// 0 for the fungible pack itself, the 1-based extraction index for a
    /// collectible. Fails on malformed IDs.
    pub fn collection_index_of(&self) -> AssetResult<u32> {
        let fields = decode(*self)?;
        Ok(fields.extraction_index)
    }

    /// Chain index baked into this token at mint time
    pub fn chain_index_of(&self) -> AssetResult<u16> {
        let fields = decode(*self)?;
        Ok(fields.chain_index)
    }

    /// Check whether this ID decodes to a well-formed token
    pub fn is_collection(&self) -> bool {
        decode(*self).is_ok()
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#066x}", self.0)
    }
}

impl From<U256> for TokenId {
    fn from(raw: U256) -> Self {
        Self(raw)
    }
}

// ========================================
// Token Fields
// ========================================

/// Decoded token ID fields
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenFields {
    /// Creator address
    pub creator: Address,
    /// Pack ordinal within the creator's mints
    pub pack_index: u64,
    /// Chain the token was minted on
    pub chain_index: u16,
    /// Uniqueness flag
    pub is_nft: bool,
    /// 1-based extraction index, 0 for fungible packs
    pub extraction_index: u32,
}

impl TokenFields {
    /// Fields for a fungible pack ID
    pub fn fungible(creator: Address, pack_index: u64, chain_index: u16) -> Self {
        Self {
            creator,
            pack_index,
            chain_index,
            is_nft: false,
            extraction_index: 0,
        }
    }

    /// Fields for a unique collectible ID
    pub fn unique(
        creator: Address,
        pack_index: u64,
        chain_index: u16,
        extraction_index: u32,
    ) -> Self {
        Self {
            creator,
            pack_index,
            chain_index,
            is_nft: true,
            extraction_index,
        }
    }
}

// ========================================
// Codec
// ========================================

/// Encode token fields into a 256-bit ID
///
/// # Returns
/// - `Ok(TokenId)`: The packed ID
/// - `Err(AssetError::InvalidFields)`: A field is out of range, or a
///   fungible ID carries a nonzero extraction index
pub fn encode(fields: &TokenFields) -> AssetResult<TokenId> {
    if fields.pack_index > PACK_INDEX_MASK {
        return Err(AssetError::InvalidFields);
    }
    if u64::from(fields.extraction_index) > EXTRACTION_INDEX_MASK {
        return Err(AssetError::InvalidFields);
    }
    if !fields.is_nft && fields.extraction_index != 0 {
        return Err(AssetError::InvalidFields);
    }

    // Creator occupies the top 160 bits
    let mut word = [0u8; 32];
    word[..20].copy_from_slice(fields.creator.as_bytes());
    let mut id = U256::from_big_endian(&word);

    if fields.is_nft {
        id = id | (U256::one() << NFT_FLAG_BIT);
    }
    id = id | (U256::from(fields.extraction_index) << EXTRACTION_INDEX_SHIFT);
    id = id | (U256::from(fields.chain_index) << CHAIN_INDEX_SHIFT);
    id = id | U256::from(fields.pack_index);

    Ok(TokenId(id))
}

/// Decode a 256-bit ID back into its fields
///
/// Total for codec-produced IDs. Fails with `Malformed` when the uniqueness
/// flag is clear but the extraction index bits are set.
pub fn decode(id: TokenId) -> AssetResult<TokenFields> {
    let raw = id.0;

    let is_nft = raw.bit(NFT_FLAG_BIT);
    let extraction_index = ((raw >> EXTRACTION_INDEX_SHIFT).low_u64() & EXTRACTION_INDEX_MASK) as u32;
    if !is_nft && extraction_index != 0 {
        return Err(AssetError::Malformed);
    }

    // to_big_endian() returns [u8; 32] in primitive-types 0.13.1
    let creator_word = (raw >> CREATOR_SHIFT).to_big_endian();
    let mut creator = [0u8; 20];
    creator.copy_from_slice(&creator_word[12..]);

    Ok(TokenFields {
        creator: Address::new(creator),
        pack_index: raw.low_u64() & PACK_INDEX_MASK,
        chain_index: ((raw >> CHAIN_INDEX_SHIFT).low_u64() & CHAIN_INDEX_MASK) as u16,
        is_nft,
        extraction_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn creator() -> Address {
        Address::new([0x42; 20])
    }

    #[test]
    fn test_encode_decode_fungible() {
        let fields = TokenFields::fungible(creator(), 7, 3);
        let id = encode(&fields).unwrap();

        assert!(!id.is_unique());
        assert_eq!(decode(id), Ok(fields));
    }

    #[test]
    fn test_encode_decode_unique() {
        let fields = TokenFields::unique(creator(), 7, 3, 12);
        let id = encode(&fields).unwrap();

        assert!(id.is_unique());
        assert_eq!(decode(id), Ok(fields));
    }

    #[test]
    fn test_encode_pack_index_out_of_range() {
        let fields = TokenFields::fungible(creator(), 1 << PACK_INDEX_BITS, 0);
        assert_eq!(encode(&fields), Err(AssetError::InvalidFields));
    }

    #[test]
    fn test_encode_extraction_index_out_of_range() {
        let fields = TokenFields::unique(creator(), 0, 0, 1 << EXTRACTION_INDEX_BITS);
        assert_eq!(encode(&fields), Err(AssetError::InvalidFields));
    }

    #[test]
    fn test_encode_fungible_with_extraction_index() {
        let mut fields = TokenFields::fungible(creator(), 0, 0);
        fields.extraction_index = 1;
        assert_eq!(encode(&fields), Err(AssetError::InvalidFields));
    }

    #[test]
    fn test_decode_malformed() {
        // Extraction bits set without the uniqueness flag
        let raw = U256::one() << (PACK_INDEX_BITS + CHAIN_INDEX_BITS) as usize;
        assert_eq!(decode(TokenId(raw)), Err(AssetError::Malformed));
        assert!(!TokenId(raw).is_collection());
    }

    #[test]
    fn test_collection_of_fungible_is_identity() {
        let id = encode(&TokenFields::fungible(creator(), 9, 1)).unwrap();
        assert_eq!(id.collection_of(), Ok(id));
        assert_eq!(id.collection_index_of(), Ok(0));
    }

    #[test]
    fn test_collection_of_unique_maps_to_pack() {
        let pack = encode(&TokenFields::fungible(creator(), 9, 1)).unwrap();
        let nft = encode(&TokenFields::unique(creator(), 9, 1, 4)).unwrap();

        assert_ne!(nft, pack);
        assert_eq!(nft.collection_of(), Ok(pack));
        assert_eq!(nft.collection_index_of(), Ok(4));
        assert_eq!(nft.chain_index_of(), Ok(1));
    }

    #[test]
    fn test_ids_disjoint_across_fields() {
        let base = encode(&TokenFields::fungible(creator(), 1, 1)).unwrap();
        let other_pack = encode(&TokenFields::fungible(creator(), 2, 1)).unwrap();
        let other_chain = encode(&TokenFields::fungible(creator(), 1, 2)).unwrap();
        let other_creator =
            encode(&TokenFields::fungible(Address::new([0x43; 20]), 1, 1)).unwrap();

        assert_ne!(base, other_pack);
        assert_ne!(base, other_chain);
        assert_ne!(base, other_creator);
    }

    #[test]
    fn test_token_id_serde() {
        let id = encode(&TokenFields::unique(creator(), 5, 2, 1)).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        let back: TokenId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    proptest! {
        #[test]
        fn prop_roundtrip(
            creator_bytes in proptest::array::uniform20(any::<u8>()),
            pack_index in 0u64..(1 << PACK_INDEX_BITS),
            chain_index in any::<u16>(),
            extraction_index in 0u32..(1 << EXTRACTION_INDEX_BITS),
            is_nft in any::<bool>(),
        ) {
            let fields = TokenFields {
                creator: Address::new(creator_bytes),
                pack_index,
                chain_index,
                is_nft,
                extraction_index: if is_nft { extraction_index } else { 0 },
            };
            let id = encode(&fields).unwrap();
            prop_assert_eq!(decode(id), Ok(fields));
        }

        #[test]
        fn prop_collection_projection_shared_by_siblings(
            creator_bytes in proptest::array::uniform20(any::<u8>()),
            pack_index in 0u64..(1 << PACK_INDEX_BITS),
            chain_index in any::<u16>(),
            extraction_index in 1u32..(1 << EXTRACTION_INDEX_BITS),
        ) {
            let creator = Address::new(creator_bytes);
            let pack = encode(&TokenFields::fungible(creator, pack_index, chain_index)).unwrap();
            let nft = encode(&TokenFields::unique(
                creator,
                pack_index,
                chain_index,
                extraction_index,
            )).unwrap();

            prop_assert_eq!(nft.collection_of().unwrap(), pack);
            prop_assert_eq!(pack.collection_of().unwrap(), pack);
        }
    }
}
