// End-to-end lifecycle coverage through the public engine API.

use rand::{rngs::StdRng, Rng, SeedableRng};

use collection_engine::operations::{ExtractParams, MintMultipleParams, MintParams};
use collection_engine::{Address, AssetError, CollectionEngine};

fn random_address(rng: &mut StdRng) -> Address {
    let mut bytes = [0u8; 20];
    rng.fill(&mut bytes[..]);
    if bytes == [0u8; 20] {
        bytes[0] = 1;
    }
    Address::new(bytes)
}

#[test]
fn pack_lifecycle_mint_extract_burn() {
    let mut rng = StdRng::seed_from_u64(7);
    let creator = random_address(&mut rng);
    let holder = random_address(&mut rng);
    let engine = CollectionEngine::in_memory(1);

    let pack = engine.mint(MintParams::new(creator, 8)).unwrap();
    assert_eq!(engine.supply_of(&pack), Ok(8));
    assert!(engine.was_ever_minted(&pack));

    // Extract two collectibles, indices are consecutive and 1-based
    let first = engine
        .extract(holder, ExtractParams::new(pack, holder, holder))
        .unwrap();
    let second = engine
        .extract(holder, ExtractParams::new(pack, holder, holder))
        .unwrap();
    assert_ne!(first.new_id, second.new_id);
    assert_eq!(first.new_id.collection_index_of(), Ok(1));
    assert_eq!(second.new_id.collection_index_of(), Ok(2));
    assert_eq!(first.new_id.collection_of(), Ok(pack));
    assert_eq!(second.new_id.collection_of(), Ok(pack));

    // Burn the fungible remainder down to zero
    assert_eq!(engine.burn(&pack, 6), Ok(0));

    // Lineage answers are unaffected by the burn
    assert!(engine.was_ever_minted(&pack));
    assert!(engine.was_ever_minted(&first.new_id));
    assert_eq!(engine.extraction_count_of(&pack), Ok(2));
    assert_eq!(engine.metadata_key(&second.new_id), Ok(pack));

    // The exhausted pack reports a supply failure on further extraction
    let result = engine.extract(holder, ExtractParams::new(pack, holder, holder));
    assert_eq!(result, Err(AssetError::InsufficientSupply));
}

#[test]
fn batch_mint_reports_independent_collections() {
    let mut rng = StdRng::seed_from_u64(11);
    let creator = random_address(&mut rng);
    let engine = CollectionEngine::in_memory(1);

    let ids = engine
        .mint_multiple(MintMultipleParams::new(creator, vec![2, 4, 7, 1]))
        .unwrap();

    for id in &ids {
        assert_eq!(id.collection_index_of(), Ok(0));
        assert_eq!(id.collection_of(), Ok(*id));
    }
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            assert_ne!(a.collection_of().unwrap(), b.collection_of().unwrap());
        }
    }
    assert_eq!(engine.supply_of(&ids[2]), Ok(7));

    // Extractions from the third pack get 1-based indices of their own
    let holder = random_address(&mut rng);
    let first = engine
        .extract(holder, ExtractParams::new(ids[2], holder, holder))
        .unwrap();
    let second = engine
        .extract(holder, ExtractParams::new(ids[2], holder, holder))
        .unwrap();
    assert_eq!(first.new_id.collection_index_of(), Ok(1));
    assert_eq!(second.new_id.collection_index_of(), Ok(2));
    assert_eq!(first.new_id.collection_of(), Ok(ids[2]));
}

#[test]
fn last_unit_is_protected_for_everyone() {
    let mut rng = StdRng::seed_from_u64(13);
    let creator = random_address(&mut rng);
    let holder = random_address(&mut rng);
    let agent = random_address(&mut rng);
    let engine = CollectionEngine::in_memory(1);

    let pack = engine.mint(MintParams::new(creator, 1)).unwrap();
    engine.set_approval_for_all(&holder, &agent, true).unwrap();
    engine.set_extraction_agent(&agent, true).unwrap();

    // Fully authorized callers still cannot split the last unit
    assert_eq!(
        engine.extract(holder, ExtractParams::new(pack, holder, holder)),
        Err(AssetError::AlreadyUnique)
    );
    assert_eq!(
        engine.extract(agent, ExtractParams::new(pack, holder, holder)),
        Err(AssetError::AlreadyUnique)
    );
    assert_eq!(engine.supply_of(&pack), Ok(1));
}

#[test]
fn extraction_events_match_ledger_deltas() {
    let mut rng = StdRng::seed_from_u64(17);
    let creator = random_address(&mut rng);
    let holder = random_address(&mut rng);
    let engine = CollectionEngine::in_memory(1);

    let pack = engine.mint(MintParams::new(creator, 5)).unwrap();
    let recipients: Vec<Address> = (0..3).map(|_| random_address(&mut rng)).collect();
    for to in &recipients {
        engine
            .extract(holder, ExtractParams::new(pack, holder, *to))
            .unwrap();
    }

    let events = engine.drain_extractions();
    assert_eq!(events.len(), 3);
    for (event, to) in events.iter().zip(&recipients) {
        assert_eq!(event.source, pack);
        assert_eq!(event.to, *to);
        assert!(event.new_id.is_unique());
    }
    assert_eq!(engine.supply_of(&pack), Ok(2));
}
