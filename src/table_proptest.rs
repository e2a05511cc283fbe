#![cfg(test)]

// Property tests for ChainedTable kept inside the crate so they can reach the
// crate-private splice reporting.

use crate::table::{ChainedTable, Splice};
use crate::TableConfig;
use core::hash::{BuildHasher, Hasher};
use hashbrown::HashMap;
use proptest::prelude::*;

// Hashes a key to its length, so short keys collide heavily and chains of
// every shape show up.
#[derive(Clone, Default)]
struct LenBuildHasher;
struct LenHasher(u64);
impl BuildHasher for LenBuildHasher {
    type Hasher = LenHasher;
    fn build_hasher(&self) -> Self::Hasher {
        LenHasher(0)
    }
}
impl Hasher for LenHasher {
    fn write(&mut self, bytes: &[u8]) {
        // `str::hash` appends a 0xff terminator; skip it.
        self.0 += bytes.iter().filter(|&&b| b != 0xff).count() as u64;
    }
    fn finish(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug)]
enum Op {
    Put(String, i32),
    Get(String),
    Remove(String),
    Dump,
}

prop_compose! {
    fn arb_ops()(ops in proptest::collection::vec(
        prop_oneof![
            ("[a-d]{1,3}", any::<i32>()).prop_map(|(k, v)| Op::Put(k, v)),
            "[a-d]{1,3}".prop_map(Op::Get),
            "[a-d]{1,3}".prop_map(Op::Remove),
            Just(Op::Dump),
        ], 1..200)) -> Vec<Op> { ops }
}

fn check_structure<S: BuildHasher>(sut: &ChainedTable<S>, model: &HashMap<String, i32>) -> Result<(), TestCaseError> {
    prop_assert_eq!(sut.len(), model.len());
    prop_assert!((sut.len() as f64 / sut.slot_count() as f64) < sut.load_factor());
    let total: usize = (0..sut.slot_count()).filter_map(|s| sut.chain_len(s)).sum();
    prop_assert_eq!(total, model.len());
    Ok(())
}

// State machine harness over ChainedTable against a hashbrown::HashMap model.
proptest! {
    #[test]
    fn prop_state_machine(ops in arb_ops(), initial in 1usize..8) {
        let config = TableConfig::new().with_initial_slots(initial);
        let mut sut = ChainedTable::with_config_and_hasher(config, LenBuildHasher).unwrap();
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                Op::Put(k, v) => {
                    let prev = sut.put(&k, v);
                    prop_assert_eq!(prev, model.insert(k.clone(), v));
                    prop_assert_eq!(sut.get(&k), Some(v));
                }
                Op::Get(k) => {
                    prop_assert_eq!(sut.get(&k), model.get(&k).copied());
                    prop_assert_eq!(sut.contains_key(&k), model.contains_key(&k));
                }
                Op::Remove(k) => {
                    let before = sut.dump();
                    let slot = sut.slot_index(&k);
                    let chain_before = sut.chain_len(slot);
                    match sut.remove_entry(&k) {
                        Some((v, splice)) => {
                            prop_assert_eq!(Some(v), model.remove(&k));
                            prop_assert_eq!(sut.chain_len(slot), chain_before.map(|n| n - 1));
                            let empty = sut.chain_len(slot) == Some(0);
                            prop_assert_eq!(empty, splice == Splice::HeadOnly);
                        }
                        None => {
                            prop_assert!(!model.contains_key(&k));
                            prop_assert_eq!(sut.dump(), before);
                        }
                    }
                    prop_assert_eq!(sut.get(&k), None);
                }
                Op::Dump => {
                    let dump = sut.dump();
                    prop_assert_eq!(dump.lines().count(), sut.slot_count());
                    for (k, v) in &model {
                        let line = dump.lines().nth(sut.slot_index(k)).unwrap_or_default();
                        let needle = format!("({}, {})", k, v);
                        prop_assert!(line.contains(&needle));
                    }
                }
            }
            check_structure(&sut, &model)?;
        }
    }

    #[test]
    fn prop_default_hasher_round_trip(pairs in proptest::collection::vec(("[a-z0-9]{0,8}", any::<i32>()), 0..300)) {
        let mut sut = ChainedTable::new();
        let mut model: HashMap<String, i32> = HashMap::new();
        for (k, v) in pairs {
            sut.put(&k, v);
            model.insert(k, v);
        }
        for (k, v) in &model {
            prop_assert_eq!(sut.get(k), Some(*v));
        }
        check_structure(&sut, &model)?;
    }
}
