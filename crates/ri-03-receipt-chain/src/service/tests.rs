//! # Receipt Chain Service Tests

use super::commit::evict_from_head;
use super::*;
use crate::domain::entities::ChainNode;
use crate::domain::errors::{ChainCorruption, SerializationError};
use crate::domain::value_objects::KeyPrefix;
use crate::ports::inbound::{ReceiptQueryApi, ReceiptStoreApi};
use ri_01_kv_store::InMemoryKVStore;
use shared_types::{EventRecord, Receipt, TxHash, TxStatus};

fn hash(tag: u8) -> TxHash {
    vec![tag; 32]
}

fn receipt(tag: u8) -> Receipt {
    Receipt::new(hash(tag), TxStatus::Success, vec![])
}

fn make_store(max_receipts: u64) -> ReceiptChainStore<InMemoryKVStore> {
    let config = ReceiptStoreConfig::default().with_max_receipts(max_receipts);
    ReceiptChainStore::open(InMemoryKVStore::new(), config).unwrap()
}

/// Codec that refuses to encode one particular node.
struct RejectingSerializer {
    reject: TxHash,
}

impl ReceiptSerializer for RejectingSerializer {
    fn encode_node(&self, node: &ChainNode) -> Result<Vec<u8>, SerializationError> {
        if node.receipt.tx_hash == self.reject {
            return Err(SerializationError::new("rejected"));
        }
        BincodeReceiptSerializer.encode_node(node)
    }

    fn decode_node(&self, data: &[u8]) -> Result<ChainNode, SerializationError> {
        BincodeReceiptSerializer.decode_node(data)
    }

    fn encode_hashes(&self, hashes: &[TxHash]) -> Result<Vec<u8>, SerializationError> {
        BincodeReceiptSerializer.encode_hashes(hashes)
    }

    fn decode_hashes(&self, data: &[u8]) -> Result<Vec<TxHash>, SerializationError> {
        BincodeReceiptSerializer.decode_hashes(data)
    }
}

// =========================================================================
// Linking
// =========================================================================

#[test]
fn test_commit_links_in_input_order() {
    let mut store = make_store(10);
    store
        .commit_block(&[receipt(1), receipt(2), receipt(3)], 1)
        .unwrap();

    let params = store.chain_params().unwrap();
    assert_eq!(params.size, 3);
    assert_eq!(params.head, hash(1));
    assert_eq!(params.tail, hash(3));

    let report = store.verify_chain().unwrap();
    assert!(report.is_intact());
    assert_eq!(report.walked, 3);
}

#[test]
fn test_second_commit_relinks_previous_tail() {
    let mut store = make_store(10);
    store.commit_block(&[receipt(1)], 1).unwrap();
    store.commit_block(&[receipt(2)], 2).unwrap();

    let node = super::views::read_node(
        &super::views::Live(store.kv_store()),
        &BincodeReceiptSerializer,
        &hash(1),
    )
    .unwrap()
    .unwrap();
    assert_eq!(node.next, hash(2));
    assert_eq!(store.chain_params().unwrap().size, 2);
}

#[test]
fn test_duplicate_hashes_are_indexed_but_not_relinked() {
    let mut store = make_store(10);
    store.commit_block(&[receipt(1)], 1).unwrap();

    let empty = Receipt::new(Vec::new(), TxStatus::Success, vec![]);
    let second_two = Receipt::new(
        hash(2),
        TxStatus::Success,
        vec![EventRecord::new(vec![0xCC; 20], vec![vec![0x0C; 32]], vec![])],
    );
    store
        .commit_block(&[empty, receipt(1), receipt(2), second_two], 2)
        .unwrap();

    let params = store.chain_params().unwrap();
    assert_eq!(params.size, 2);
    assert_eq!(params.tail, hash(2));
    assert_eq!(store.tx_hashes(2).unwrap(), vec![hash(1), hash(2), hash(2)]);
    assert!(store.verify_chain().unwrap().is_intact());
    assert_eq!(store.metrics().skipped(), 3);

    // The first receipt for a hash is the one kept in the chain.
    assert!(store.get(&hash(2)).unwrap().logs.is_empty());
    let bloom = ri_02_event_bloom::EventBloom::from_bytes(
        &store.bloom_filter(2).unwrap().unwrap(),
        &store.config().bloom,
    )
    .unwrap();
    assert!(bloom.might_contain(&[0xCC; 20]));
    assert!(bloom.might_contain(&[0x0C; 32]));
}

#[test]
fn test_replaying_height_rewrites_same_indexes() {
    let mut store = make_store(10);
    let event = EventRecord::new(vec![0xAB; 20], vec![vec![0x01; 32]], vec![]);
    let block = [Receipt::new(hash(1), TxStatus::Success, vec![event])];

    store.commit_block(&block, 1).unwrap();
    let bloom = store.bloom_filter(1).unwrap();
    let hashes = store.tx_hashes(1).unwrap();

    store.commit_block(&block, 1).unwrap();

    assert_eq!(store.bloom_filter(1).unwrap(), bloom);
    assert_eq!(store.tx_hashes(1).unwrap(), hashes);
    assert_eq!(hashes, vec![hash(1)]);
    assert_eq!(store.chain_params().unwrap().size, 1);
}

// =========================================================================
// Eviction
// =========================================================================

#[test]
fn test_bound_two_scenario() {
    let mut store = make_store(2);
    store.commit_block(&[receipt(b'A'), receipt(b'B')], 1).unwrap();

    let params = store.chain_params().unwrap();
    assert_eq!((params.size, params.head.clone(), params.tail.clone()), (2, hash(b'A'), hash(b'B')));

    store.commit_block(&[receipt(b'C')], 2).unwrap();

    let params = store.chain_params().unwrap();
    assert_eq!(params.size, 2);
    assert_eq!(params.head, hash(b'B'));
    assert_eq!(params.tail, hash(b'C'));
    assert_eq!(
        store.get(&hash(b'A')),
        Err(ReceiptStoreError::NotFound { tx_hash: hash(b'A') })
    );
    assert!(store.get(&hash(b'B')).is_ok());
    assert!(store.verify_chain().unwrap().is_intact());
}

#[test]
fn test_evicts_nodes_created_in_same_commit() {
    let mut store = make_store(1);
    store
        .commit_block(&[receipt(1), receipt(2), receipt(3)], 1)
        .unwrap();

    let params = store.chain_params().unwrap();
    assert_eq!(params.size, 1);
    assert_eq!(params.head, hash(3));
    assert_eq!(params.tail, hash(3));
    assert!(store.get(&hash(1)).is_err());
    assert!(store.get(&hash(2)).is_err());
    assert!(store.verify_chain().unwrap().is_intact());
    assert_eq!(store.metrics().evicted(), 2);
}

#[test]
fn test_evict_from_head_reads_staged_nodes() {
    let store = InMemoryKVStore::new();
    let serializer = BincodeReceiptSerializer;
    let mut batch = WriteBatch::new();

    let first = ChainNode {
        receipt: receipt(1),
        next: hash(2),
    };
    let second = ChainNode::tail(receipt(2));
    batch.set(hash(1), serializer.encode_node(&first).unwrap());
    batch.set(hash(2), serializer.encode_node(&second).unwrap());

    let (new_head, evicted) = evict_from_head(&mut batch, &store, &serializer, &hash(1), 1).unwrap();

    assert_eq!(new_head, hash(2));
    assert_eq!(evicted, 1);
    assert_eq!(batch.staged(&hash(1)), Some(None));
}

#[test]
fn test_evict_from_head_stops_at_chain_end() {
    let store = InMemoryKVStore::new();
    let serializer = BincodeReceiptSerializer;
    let mut batch = WriteBatch::new();
    batch.set(hash(1), serializer.encode_node(&ChainNode::tail(receipt(1))).unwrap());

    let (new_head, evicted) = evict_from_head(&mut batch, &store, &serializer, &hash(1), 5).unwrap();

    assert!(new_head.is_empty());
    assert_eq!(evicted, 1);
}

// =========================================================================
// Corruption and Abort
// =========================================================================

#[test]
fn test_missing_tail_node_aborts_commit() {
    let mut store = make_store(10);
    store.commit_block(&[receipt(1), receipt(2)], 1).unwrap();
    store.kv_store().delete(&hash(2)).unwrap();

    let result = store.commit_block(&[receipt(3)], 2);

    assert_eq!(
        result,
        Err(ReceiptStoreError::Corruption(ChainCorruption::MissingTailNode { tail: hash(2) }))
    );
    assert!(store.get(&hash(3)).is_err());
    assert!(store.bloom_filter(2).unwrap().is_none());
    assert_eq!(store.metrics().failures(), 1);
}

#[test]
fn test_broken_link_fails_eviction_without_side_effects() {
    let mut store = make_store(10);
    store
        .commit_block(&[receipt(1), receipt(2), receipt(3)], 1)
        .unwrap();
    store.kv_store().delete(&hash(2)).unwrap();
    store.config.max_receipts = 2;

    let result = store.commit_block(&[receipt(4)], 2);

    assert_eq!(
        result,
        Err(ReceiptStoreError::Corruption(ChainCorruption::EvictionShortfall {
            requested: 2,
            evicted: 1
        }))
    );
    assert!(store.get(&hash(1)).is_ok());
    assert!(store.get(&hash(4)).is_err());
    assert_eq!(store.chain_params().unwrap().size, 3);
    assert!(store.batch.is_empty());
}

#[test]
fn test_encode_failure_aborts_whole_commit() {
    let deps = ReceiptStoreDependencies {
        kv_store: InMemoryKVStore::new(),
        serializer: RejectingSerializer { reject: hash(2) },
        bloom_builder: ri_02_event_bloom::EventBloomBuilder::default(),
    };
    let mut store = ReceiptChainStore::new(deps, ReceiptStoreConfig::default()).unwrap();

    let result = store.commit_block(&[receipt(1), receipt(2), receipt(3)], 1);

    assert!(matches!(result, Err(ReceiptStoreError::Encoding(_))));
    assert!(store.kv_store().is_empty());
    assert!(store.chain_params().unwrap().is_empty());
}

#[test]
fn test_stale_staged_writes_are_discarded() {
    let mut store = make_store(10);
    store.batch.set(b"stale".to_vec(), b"x".to_vec());

    store.commit_block(&[receipt(1)], 1).unwrap();

    assert_eq!(store.kv_store().get(b"stale").unwrap(), None);
}

#[test]
fn test_params_with_empty_head_is_corruption() {
    let store = make_store(10);
    store
        .kv_store()
        .put(&KeyPrefix::size_key(), &2u64.to_le_bytes())
        .unwrap();

    assert_eq!(
        store.chain_params(),
        Err(ReceiptStoreError::Corruption(ChainCorruption::MissingPointer {
            field: "head",
            size: 2
        }))
    );
}

#[test]
fn test_short_size_value_is_corruption() {
    let store = make_store(10);
    store.kv_store().put(&KeyPrefix::size_key(), &[1, 0]).unwrap();

    assert!(matches!(
        store.chain_params(),
        Err(ReceiptStoreError::Corruption(ChainCorruption::InvalidSizeEncoding { len: 2 }))
    ));
}

#[test]
fn test_size_overflow_is_corruption() {
    let mut store = make_store(u64::MAX);
    let kv = store.kv_store();
    kv.put(&KeyPrefix::size_key(), &u64::MAX.to_le_bytes()).unwrap();
    kv.put(&KeyPrefix::head_key(), &hash(1)).unwrap();
    kv.put(&KeyPrefix::tail_key(), &hash(1)).unwrap();
    kv.put(
        &hash(1),
        &BincodeReceiptSerializer
            .encode_node(&ChainNode::tail(receipt(1)))
            .unwrap(),
    )
    .unwrap();

    let result = store.commit_block(&[receipt(2)], 1);

    assert_eq!(
        result,
        Err(ReceiptStoreError::Corruption(ChainCorruption::SizeOverflow {
            size: u64::MAX,
            linked: 1
        }))
    );
    assert!(store.get(&hash(2)).is_err());
}

#[test]
fn test_metadata_keys_are_not_receipts() {
    let mut store = make_store(10);
    let colliding = Receipt::new(KeyPrefix::size_key(), TxStatus::Success, vec![]);
    store.commit_block(&[receipt(1), colliding], 1).unwrap();

    let params = store.chain_params().unwrap();
    assert_eq!((params.size, params.tail.clone()), (1, hash(1)));
    assert_eq!(
        store.tx_hashes(1).unwrap(),
        vec![hash(1), KeyPrefix::size_key()]
    );

    for key in [
        KeyPrefix::size_key(),
        KeyPrefix::head_key(),
        KeyPrefix::bloom_key(1),
        KeyPrefix::tx_hashes_key(1),
    ] {
        assert_eq!(
            store.get(&key),
            Err(ReceiptStoreError::NotFound { tx_hash: key.clone() })
        );
    }
}

#[test]
fn test_zero_size_ignores_stale_pointers() {
    let store = make_store(10);
    store.kv_store().put(&KeyPrefix::size_key(), &0u64.to_le_bytes()).unwrap();
    store.kv_store().put(&KeyPrefix::head_key(), &hash(9)).unwrap();

    assert!(store.chain_params().unwrap().is_empty());
}

// =========================================================================
// No-op and Configuration
// =========================================================================

#[test]
fn test_zero_bound_is_noop() {
    let mut store = make_store(0);
    store.commit_block(&[receipt(1)], 1).unwrap();

    assert!(store.kv_store().is_empty());
    assert_eq!(store.metrics().commits(), 0);
}

#[test]
fn test_invalid_bloom_config_rejected() {
    let config = ReceiptStoreConfig::default()
        .with_bloom(ri_02_event_bloom::EventBloomConfig::default().with_hash_count(0));

    let result = ReceiptChainStore::open(InMemoryKVStore::new(), config);
    assert!(matches!(result, Err(ReceiptStoreError::InvalidConfig(_))));
}

#[test]
fn test_invalid_injected_bloom_builder_rejected() {
    let deps = ReceiptStoreDependencies {
        kv_store: InMemoryKVStore::new(),
        serializer: BincodeReceiptSerializer,
        bloom_builder: ri_02_event_bloom::EventBloomBuilder::new(
            ri_02_event_bloom::EventBloomConfig::default().with_size_bits(0),
        ),
    };

    let result = ReceiptChainStore::new(deps, ReceiptStoreConfig::default());
    assert!(matches!(result, Err(ReceiptStoreError::InvalidConfig(_))));
}

#[test]
fn test_height_indexes_split_by_status() {
    let mut store = make_store(10);
    let event = EventRecord::new(vec![0xAA; 20], vec![vec![0x01; 32]], vec![]);
    let failed = Receipt::new(hash(2), TxStatus::Failure, vec![event]);

    store.commit_block(&[receipt(1), failed], 5).unwrap();

    assert_eq!(store.tx_hashes(5).unwrap(), vec![hash(1)]);
    let bloom = ri_02_event_bloom::EventBloom::from_bytes(
        &store.bloom_filter(5).unwrap().unwrap(),
        &store.config().bloom,
    )
    .unwrap();
    assert!(bloom.might_contain(&[0xAA; 20]));
    assert!(bloom.might_contain(&[0x01; 32]));
}
