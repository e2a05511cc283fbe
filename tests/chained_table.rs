use chain_map::{ChainedTable, ConfigError, TableConfig, MIN_LOAD_FACTOR};
use std::hash::{BuildHasher, Hasher};

#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

fn first_line(t: &ChainedTable<ConstBuildHasher>) -> String {
    t.dump().lines().next().unwrap_or_default().to_string()
}

#[test]
fn concrete_scenario() {
    let mut t = ChainedTable::new();
    t.put("a", 1);
    t.put("b", 2);
    t.put("a", 99);
    assert_eq!(t.get("a"), Some(99));
    assert_eq!(t.get("b"), Some(2));
    assert_eq!(t.get("c"), None);
    assert_eq!(t.len(), 2);

    t.remove("a");
    assert_eq!(t.get("a"), None);

    let dump = t.dump();
    let slot = t.slot_index("b");
    assert_eq!(
        dump.lines().nth(slot),
        Some(format!("[{}] = (b, 2)", slot).as_str())
    );
    assert!(!dump.contains("(a, "));
}

#[test]
fn round_trip_and_update() {
    let mut t = ChainedTable::new();
    for i in 0..64 {
        assert_eq!(t.put(&format!("k{}", i), i), None);
    }
    assert_eq!(t.len(), 64);
    for i in 0..64 {
        assert_eq!(t.put(&format!("k{}", i), -i), Some(i));
    }
    assert_eq!(t.len(), 64, "updates must not change the distinct-key count");
    for i in 0..64 {
        assert_eq!(t.get(&format!("k{}", i)), Some(-i));
    }
}

#[test]
fn delete_removes_and_absent_delete_is_noop() {
    let mut t = ChainedTable::new();
    t.put("k", 5);
    t.put("other", 6);
    assert_eq!(t.remove("k"), Some(5));
    assert_eq!(t.get("k"), None);

    let before = t.dump();
    assert_eq!(t.remove("never-there"), None);
    assert_eq!(t.dump(), before);
    assert_eq!(t.get("other"), Some(6));
    assert_eq!(t.len(), 1);
}

#[test]
fn three_colliding_keys_delete_middle() {
    let mut t = ChainedTable::with_hasher(ConstBuildHasher);
    t.put("one", 1);
    t.put("two", 2);
    t.put("three", 3);
    assert_eq!(first_line(&t), "[0] = (one, 1) -> (two, 2) -> (three, 3)");

    t.remove("two");
    assert_eq!(t.get("one"), Some(1));
    assert_eq!(t.get("three"), Some(3));
    assert_eq!(t.get("two"), None);
    assert_eq!(t.chain_len(0), Some(2));
    assert_eq!(first_line(&t), "[0] = (one, 1) -> (three, 3)");
}

#[test]
fn all_four_delete_cases() {
    // Sole head.
    let mut t = ChainedTable::with_hasher(ConstBuildHasher);
    t.put("a", 1);
    t.remove("a");
    assert_eq!(first_line(&t), "[0] = null");

    // Head with successor.
    let mut t = ChainedTable::with_hasher(ConstBuildHasher);
    t.put("a", 1);
    t.put("b", 2);
    t.remove("a");
    assert_eq!(first_line(&t), "[0] = (b, 2)");

    // Tail with predecessor.
    let mut t = ChainedTable::with_hasher(ConstBuildHasher);
    t.put("a", 1);
    t.put("b", 2);
    t.remove("b");
    assert_eq!(first_line(&t), "[0] = (a, 1)");

    // Middle.
    let mut t = ChainedTable::with_hasher(ConstBuildHasher);
    t.put("a", 1);
    t.put("b", 2);
    t.put("c", 3);
    t.remove("b");
    assert_eq!(first_line(&t), "[0] = (a, 1) -> (c, 3)");
}

#[test]
fn twelve_inserts_grow_default_table() {
    let mut t = ChainedTable::new();
    assert_eq!(t.slot_count(), 16);
    for i in 0..12 {
        t.put(&format!("key{}", i), i);
    }
    assert!(t.slot_count() > 16);
    for i in 0..12 {
        assert_eq!(t.get(&format!("key{}", i)), Some(i));
    }
}

#[test]
fn filling_doubles_slot_count() {
    let mut t = ChainedTable::new();
    let mut sizes = vec![t.slot_count()];
    for i in 0..10_000 {
        t.put(&format!("key{}", i), i);
        if t.slot_count() != *sizes.last().unwrap() {
            sizes.push(t.slot_count());
        }
    }
    assert_eq!(
        sizes,
        vec![16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384]
    );
}

#[test]
fn removal_never_shrinks() {
    let mut t = ChainedTable::new();
    for i in 0..100 {
        t.put(&i.to_string(), i);
    }
    let grown = t.slot_count();
    for i in 0..100 {
        assert_eq!(t.remove(&i.to_string()), Some(i));
    }
    assert!(t.is_empty());
    assert_eq!(t.slot_count(), grown);
}

#[test]
fn config_is_validated() {
    assert_eq!(
        ChainedTable::with_config(TableConfig::new().with_initial_slots(0)).unwrap_err(),
        ConfigError::ZeroSlots
    );
    assert_eq!(
        ChainedTable::with_config(TableConfig::new().with_load_factor(1e-300)).unwrap_err(),
        ConfigError::InvalidLoadFactor(1e-300)
    );
    let mut t = ChainedTable::with_config(TableConfig::new().with_load_factor(MIN_LOAD_FACTOR)).unwrap();
    t.put("a", 1);
    assert_eq!(t.get("a"), Some(1));
    assert!(t.slot_count() > 100);

    let t = ChainedTable::with_config(TableConfig::new().with_initial_slots(4)).unwrap();
    assert_eq!(t.slot_count(), 4);
    assert_eq!(t.dump(), "[0] = null\n[1] = null\n[2] = null\n[3] = null\n");
}

#[test]
fn pathological_chain_drops() {
    let mut t = ChainedTable::with_config_and_hasher(
        TableConfig::new().with_load_factor(1e9),
        ConstBuildHasher,
    )
    .unwrap();
    for i in 0..5_000 {
        t.put(&i.to_string(), i);
    }
    assert_eq!(t.chain_len(0), Some(5_000));
    drop(t);
}
