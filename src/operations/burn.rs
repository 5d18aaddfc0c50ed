// Engine Burn Operations
// This module contains the fungible supply burn logic.

use crate::error::{AssetError, AssetResult};
use crate::token_id::TokenId;

use super::validation::{validate_amount, validate_pack_id};
use super::AssetStorage;

/// Burn fungible pack units
///
/// Only the remaining balance shrinks. The supply record, the `ever_minted`
/// flag and the extraction counter stay put, so lineage queries keep
/// answering for packs burned down to zero.
///
/// # Parameters
/// - `storage`: Storage backend
/// - `pack`: Fungible pack ID
/// - `amount`: Number of units to burn
///
/// # Returns
/// - `Ok(u64)`: Remaining balance after the burn
/// - `Err(AssetError)`: Error code
pub fn burn<S: AssetStorage + ?Sized>(
    storage: &mut S,
    pack: &TokenId,
    amount: u64,
) -> AssetResult<u64> {
    // Step 1: Input validation
    validate_amount(amount)?;
    validate_pack_id(pack)?;

    // Step 2: Check supply, a missing record behaves as balance 0
    let mut record = storage.get_supply(pack).unwrap_or_default();
    if amount > record.balance {
        return Err(AssetError::InsufficientSupply);
    }

    // Step 3: Decrement the balance
    record.balance -= amount;
    storage.set_supply(pack, record)?;

    Ok(record.balance)
}

#[cfg(test)]
mod tests {
    use super::super::mint::{mint, MintParams};
    use super::super::RuntimeContext;
    use super::*;
    use crate::storage::MemoryAssetStorage;
    use crate::token_id::{encode, TokenFields};
    use crate::types::Address;

    fn creator() -> Address {
        Address::new([10u8; 20])
    }

    fn setup() -> (MemoryAssetStorage, TokenId) {
        let mut storage = MemoryAssetStorage::new();
        let ctx = RuntimeContext::new(creator(), 1);
        let pack = mint(&mut storage, &ctx, MintParams::new(creator(), 5)).unwrap();
        (storage, pack)
    }

    #[test]
    fn test_burn_decrements_balance() {
        let (mut storage, pack) = setup();

        assert_eq!(burn(&mut storage, &pack, 2), Ok(3));
        assert_eq!(storage.get_supply(&pack).unwrap().balance, 3);
    }

    #[test]
    fn test_burn_more_than_balance() {
        let (mut storage, pack) = setup();

        assert_eq!(
            burn(&mut storage, &pack, 6),
            Err(AssetError::InsufficientSupply)
        );
        assert_eq!(storage.get_supply(&pack).unwrap().balance, 5);
    }

    #[test]
    fn test_burn_zero_amount() {
        let (mut storage, pack) = setup();

        assert_eq!(burn(&mut storage, &pack, 0), Err(AssetError::InvalidAmount));
    }

    #[test]
    fn test_burn_never_minted_pack() {
        let mut storage = MemoryAssetStorage::new();
        let pack = encode(&TokenFields::fungible(creator(), 0, 1)).unwrap();

        assert_eq!(
            burn(&mut storage, &pack, 1),
            Err(AssetError::InsufficientSupply)
        );
    }

    #[test]
    fn test_burn_unique_id_rejected() {
        let (mut storage, _) = setup();
        let nft = encode(&TokenFields::unique(creator(), 0, 1, 1)).unwrap();

        assert_eq!(burn(&mut storage, &nft, 1), Err(AssetError::Malformed));
    }

    #[test]
    fn test_burn_to_zero_keeps_lineage() {
        let (mut storage, pack) = setup();

        assert_eq!(burn(&mut storage, &pack, 5), Ok(0));

        let record = storage.get_supply(&pack).unwrap();
        assert_eq!(record.balance, 0);
        assert!(record.ever_minted);

        // One more unit is one too many
        assert_eq!(
            burn(&mut storage, &pack, 1),
            Err(AssetError::InsufficientSupply)
        );
    }
}
