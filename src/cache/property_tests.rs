//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store against a plain HashMap model.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use crate::cache::CacheStore;
use crate::config::ReadPolicy;

// == Test Configuration ==
/// Long enough that nothing goes stale while a case runs
const TEST_INTERVAL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates cache keys, including the empty key
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9/:._-]{0,32}"
}

/// Generates arbitrary payloads, including empty ones
fn value_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Add { key: String, value: Vec<u8> },
    Get { key: String },
    Sweep,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Add { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        Just(CacheOp::Sweep),
    ]
}

fn read_policy_strategy() -> impl Strategy<Value = ReadPolicy> {
    prop_oneof![Just(ReadPolicy::RejectStale), Just(ReadPolicy::ServeUntilSwept)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // **Property: Model Agreement**
    // *For any* sequence of operations run before anything goes stale, every
    // lookup SHALL agree with a HashMap holding the last value added per key,
    // and sweeps SHALL remove nothing.
    #[test]
    fn prop_matches_hashmap_model(
        ops in prop::collection::vec(cache_op_strategy(), 1..80),
        policy in read_policy_strategy(),
    ) {
        let mut store = CacheStore::new();
        let mut model: HashMap<String, Vec<u8>> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Add { key, value } => {
                    store.insert(key.clone(), value.clone());
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(
                        store.get(&key, TEST_INTERVAL, policy),
                        model.get(&key).cloned(),
                        "Lookup disagrees with model for key {:?}",
                        key
                    );
                }
                CacheOp::Sweep => {
                    prop_assert_eq!(store.sweep(TEST_INTERVAL), 0, "Sweep removed a fresh entry");
                }
            }
            prop_assert_eq!(store.len(), model.len());
        }
    }

    // **Property: Statistics Accuracy**
    // *For any* sequence of operations, hits, misses and sweeps SHALL count
    // exactly the lookups that found a value, the lookups that did not, and
    // the passes that ran.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = CacheStore::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;
        let mut expected_sweeps: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Add { key, value } => store.insert(key, value),
                CacheOp::Get { key } => match store.get(&key, TEST_INTERVAL, ReadPolicy::RejectStale) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Sweep => {
                    store.sweep(TEST_INTERVAL);
                    expected_sweeps += 1;
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.sweeps, expected_sweeps, "Sweeps mismatch");
        prop_assert_eq!(stats.reclaimed, 0);
        prop_assert_eq!(stats.total_entries, store.len(), "Total entries mismatch");
    }

    // **Property: Overwrite Semantics**
    // *For any* key, adding V1 and then V2 SHALL leave exactly one entry
    // holding V2.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut store = CacheStore::new();

        store.insert(key.clone(), value1);
        store.insert(key.clone(), value2.clone());

        prop_assert_eq!(store.get(&key, TEST_INTERVAL, ReadPolicy::RejectStale), Some(value2));
        prop_assert_eq!(store.len(), 1, "Should have exactly one entry after overwrite");
    }
}
