//! ChainedTable: slot array of owned collision chains plus the
//! put/get/remove/grow algorithms over it.

use crate::bucket::{drop_chain, Bucket, Chain, Link};
use crate::config::{ConfigError, TableConfig};
use core::fmt;
use core::hash::BuildHasher;
use core::mem;
use foldhash::fast::FixedState;
use tracing::{debug, trace};

/// Structural case hit when a node is spliced out of its chain.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Splice {
    /// Predecessor and successor both present: predecessor links past the node.
    Middle,
    /// Predecessor present, node was the tail: predecessor link cleared.
    Tail,
    /// Node was the head and had a successor: slot now points at the successor.
    HeadWithSuccessor,
    /// Node was the only one in its chain: slot cleared.
    HeadOnly,
}

/// String-to-`i32` hash table with separately-chained buckets.
///
/// `S` builds the hasher used for slot placement. The default,
/// `foldhash::fast::FixedState`, has a fixed seed, so placement and `dump`
/// output are the same on every run.
pub struct ChainedTable<S = FixedState> {
    hasher: S,
    slots: Vec<Link>,
    len: usize,
    load_factor: f64,
}

impl ChainedTable {
    /// Table with 16 slots, a 0.75 load factor and the fixed-seed hasher.
    pub fn new() -> Self {
        Self::with_hasher(FixedState::default())
    }

    /// Table built from `config` with the fixed-seed hasher.
    ///
    /// Fails if `config` does not pass [`TableConfig::validate`].
    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        Self::with_config_and_hasher(config, FixedState::default())
    }
}

impl Default for ChainedTable {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ChainedTable<S>
where
    S: BuildHasher,
{
    /// Table with the default configuration that hashes keys with `hasher`.
    pub fn with_hasher(hasher: S) -> Self {
        Self::from_parts(TableConfig::default(), hasher)
    }

    /// Table built from `config` that hashes keys with `hasher`.
    ///
    /// Fails if `config` does not pass [`TableConfig::validate`].
    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, hasher))
    }

    fn from_parts(config: TableConfig, hasher: S) -> Self {
        let mut slots = Vec::with_capacity(config.initial_slots);
        slots.resize_with(config.initial_slots, || None);
        Self {
            hasher,
            slots,
            len: 0,
            load_factor: config.load_factor,
        }
    }

    /// Slot whose chain holds (or would hold) `key` at the current slot count.
    pub fn slot_index(&self, key: &str) -> usize {
        Self::index_for(&self.hasher, key, self.slots.len())
    }

    #[inline]
    fn index_for(hasher: &S, key: &str, slots: usize) -> usize {
        // Slot counts are validated non-zero and only ever grow.
        (hasher.hash_one(key) % slots as u64) as usize
    }

    /// Insert `key -> value`, or overwrite the value of an existing key in
    /// place. Returns the previous value when the key was already present.
    pub fn put(&mut self, key: &str, value: i32) -> Option<i32> {
        let index = self.slot_index(key);

        // Walk to the matching node or to the empty link past the tail. For
        // an empty chain that link is the slot itself, so the new node
        // becomes the head.
        let mut link = &mut self.slots[index];
        while let Some(node) = link {
            if node.key == key {
                return Some(mem::replace(&mut node.value, value));
            }
            link = &mut node.next;
        }
        *link = Some(Bucket::new(key.to_owned(), value));

        self.len += 1;
        self.grow_if_needed();
        None
    }

    pub fn get(&self, key: &str) -> Option<i32> {
        let index = self.slot_index(key);
        Chain::new(&self.slots[index])
            .find(|node| node.key == key)
            .map(|node| node.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove `key`, returning its value. Absent keys are a no-op.
    pub fn remove(&mut self, key: &str) -> Option<i32> {
        self.remove_entry(key).map(|(value, _)| value)
    }

    pub(crate) fn remove_entry(&mut self, key: &str) -> Option<(i32, Splice)> {
        let index = self.slot_index(key);
        let head = &mut self.slots[index];

        let (node, splice) = if head.as_ref()?.key == key {
            let mut node = head.take()?;
            let splice = match node.next.take() {
                Some(next) => {
                    *head = Some(next);
                    Splice::HeadWithSuccessor
                }
                None => Splice::HeadOnly,
            };
            (node, splice)
        } else {
            let mut prev: &mut Bucket = head.as_deref_mut()?;
            loop {
                match prev.next.as_deref() {
                    None => return None,
                    Some(next) if next.key == key => break,
                    Some(_) => {}
                }
                prev = prev.next.as_deref_mut()?;
            }
            let mut node = prev.next.take()?;
            let splice = match node.next.take() {
                Some(next) => {
                    prev.next = Some(next);
                    Splice::Middle
                }
                None => Splice::Tail,
            };
            (node, splice)
        };

        self.len -= 1;
        trace!(key = key, slot = index, case = ?splice, "removed entry");
        Some((node.value, splice))
    }

    /// Render every slot in order, one line each: `[i] = null` for an empty
    /// slot, otherwise its chain as `(k, v) -> (k, v)`.
    pub fn dump(&self) -> String {
        self.to_string()
    }

    fn grow_if_needed(&mut self) {
        let old_slots = self.slots.len();
        let new_slots = self.target_slots();
        if new_slots == old_slots {
            return;
        }
        self.rehash(new_slots);
        debug!(
            old_slots = old_slots,
            new_slots = new_slots,
            len = self.len,
            "grew table"
        );
    }

    fn over_threshold(&self, slots: usize) -> bool {
        self.len as f64 / slots as f64 >= self.load_factor
    }

    /// Slot count to grow to: at least double the current count, and never
    /// less than the smallest count that brings the load factor under the
    /// threshold.
    fn target_slots(&self) -> usize {
        let current = self.slots.len();
        if !self.over_threshold(current) {
            return current;
        }
        // The load factor is validated to be at least `MIN_LOAD_FACTOR`, so
        // this estimate stays within a constant multiple of `len`.
        let estimate = (self.len as f64 / self.load_factor).floor() as usize;
        let mut n = estimate.saturating_add(1);
        while n > 1 && !self.over_threshold(n - 1) {
            n -= 1;
        }
        while self.over_threshold(n) {
            n += 1;
        }
        n.max(current.saturating_mul(2))
    }

    /// Relink every node into a slot array of `new_slots`. Nodes keep their
    /// relative order within each destination chain.
    fn rehash(&mut self, new_slots: usize) {
        let mut slots: Vec<Link> = Vec::with_capacity(new_slots);
        slots.resize_with(new_slots, || None);
        let old = mem::replace(&mut self.slots, slots);

        for mut link in old {
            while let Some(mut node) = link {
                link = node.next.take();
                let index = Self::index_for(&self.hasher, &node.key, new_slots);
                let mut tail = &mut self.slots[index];
                while let Some(next) = tail {
                    tail = &mut next.next;
                }
                *tail = Some(node);
            }
        }
    }
}

impl<S> ChainedTable<S> {
    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Configured growth threshold.
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Length of the chain at `slot`, or `None` if the slot does not exist.
    pub fn chain_len(&self, slot: usize) -> Option<usize> {
        self.slots.get(slot).map(|head| Chain::new(head).count())
    }

    /// Drop every entry. The slot count is kept.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            drop_chain(slot.take());
        }
        self.len = 0;
    }
}

impl<S> Drop for ChainedTable<S> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<S> fmt::Display for ChainedTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, head) in self.slots.iter().enumerate() {
            write!(f, "[{}] = ", i)?;
            if head.is_none() {
                writeln!(f, "null")?;
                continue;
            }
            for (pos, node) in Chain::new(head).enumerate() {
                if pos > 0 {
                    f.write_str(" -> ")?;
                }
                write!(f, "({}, {})", node.key, node.value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<S> fmt::Debug for ChainedTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedTable")
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .field("load_factor", &self.load_factor)
            .finish_non_exhaustive()
    }
}
