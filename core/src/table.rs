//! Chained hash table with a pooled bucket store.
//!
//! This is the generic engine behind the symbol table. It is built to be
//! heap-friendly: buckets live in a single growable backing vector and are
//! addressed by index, removed buckets go onto a free list for reuse, and
//! fresh buckets are requisitioned in batches so that steady-state inserts
//! and removes touch the system allocator rarely.
//!
//! Collisions are resolved by chaining: each slot holds the index of the
//! head bucket of its list. A key appears in at most one bucket across the
//! whole table, and the free list plus the live chains together account for
//! every bucket ever allocated.
//!
//! The hash function is supplied at construction. Key equality is byte-wise
//! string comparison.

use core::ops::ControlFlow;

/// Buckets are allocated in batches of this size.
const BUCKET_BATCH: usize = 100;

struct Bucket<V> {
    key: String,
    value: Option<V>,
    next: Option<u32>,
}

/// A chained hash table from string keys to values of type `V`.
pub struct HashTable<V> {
    /// Head bucket index per slot.
    slots: Box<[Option<u32>]>,
    /// All buckets ever allocated, live and free alike.
    buckets: Vec<Bucket<V>>,
    /// Head of the free-bucket list, chained through `Bucket::next`.
    free: Option<u32>,
    len: usize,
    hash: fn(&[u8]) -> u32,
}

impl<V> HashTable<V> {
    /// Create a table with a fixed number of slots.
    ///
    /// The slot count never changes; longer chains are the only scaling
    /// mechanism.
    pub fn new(slot_count: usize, hash: fn(&[u8]) -> u32) -> Self {
        debug_assert!(slot_count > 0, "hash table needs at least one slot");
        Self {
            slots: vec![None; slot_count].into_boxed_slice(),
            buckets: Vec::new(),
            free: None,
            len: 0,
            hash,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn slot_of(&self, key: &str) -> usize {
        ((self.hash)(key.as_bytes()) as usize) % self.slots.len()
    }

    /// Walk the chain for `key`, returning (previous bucket, found bucket).
    fn find(&self, key: &str) -> (Option<u32>, Option<u32>) {
        let mut prev = None;
        let mut cur = self.slots[self.slot_of(key)];
        while let Some(i) = cur {
            let bucket = &self.buckets[i as usize];
            if bucket.key == key {
                return (prev, Some(i));
            }
            prev = cur;
            cur = bucket.next;
        }
        (prev, None)
    }

    /// Look up a key, returning a reference to its value.
    pub fn get(&self, key: &str) -> Option<&V> {
        let (_, found) = self.find(key);
        found.and_then(|i| self.buckets[i as usize].value.as_ref())
    }

    /// Look up a key, returning a mutable reference to its value.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let (_, found) = self.find(key);
        found.and_then(|i| self.buckets[i as usize].value.as_mut())
    }

    /// Insert a key/value pair, or replace the value of an existing key.
    ///
    /// Returns the superseded value when the key was already present; the
    /// old value is handed back rather than dropped in place so callers can
    /// observe the replacement.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        if let (_, Some(i)) = self.find(key) {
            return self.buckets[i as usize].value.replace(value);
        }

        let slot = self.slot_of(key);
        let i = self.take_free_bucket();
        let bucket = &mut self.buckets[i as usize];
        bucket.key.clear();
        bucket.key.push_str(key);
        bucket.value = Some(value);
        bucket.next = self.slots[slot];
        self.slots[slot] = Some(i);
        self.len += 1;
        None
    }

    /// Remove a key, returning its value. The bucket goes back to the free
    /// pool; its memory is not released.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let slot = self.slot_of(key);
        let (prev, found) = self.find(key);
        let i = found?;

        // Unlink from the chain.
        let next = self.buckets[i as usize].next;
        match prev {
            Some(p) => self.buckets[p as usize].next = next,
            None => self.slots[slot] = next,
        }

        let bucket = &mut self.buckets[i as usize];
        bucket.key.clear();
        let value = bucket.value.take();
        bucket.next = self.free;
        self.free = Some(i);
        self.len -= 1;
        value
    }

    /// Call `visit` once per live entry, in unspecified slot/bucket order.
    ///
    /// Short-circuits and propagates the visitor's break value.
    pub fn for_each<B>(
        &self,
        mut visit: impl FnMut(&str, &V) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        for head in self.slots.iter() {
            let mut cur = *head;
            while let Some(i) = cur {
                let bucket = &self.buckets[i as usize];
                if let Some(value) = &bucket.value {
                    visit(&bucket.key, value)?;
                }
                cur = bucket.next;
            }
        }
        ControlFlow::Continue(())
    }

    /// Pop a bucket index off the free list, requisitioning a fresh batch
    /// from the backing store when the pool is empty.
    fn take_free_bucket(&mut self) -> u32 {
        let i = match self.free {
            Some(i) => i,
            None => self.refill_pool(),
        };
        self.free = self.buckets[i as usize].next;
        i
    }

    /// Push a batch of vacant buckets onto the free list, returning the new
    /// head index.
    fn refill_pool(&mut self) -> u32 {
        self.buckets.reserve(BUCKET_BATCH);
        for _ in 0..BUCKET_BATCH {
            let i = self.buckets.len() as u32;
            self.buckets.push(Bucket {
                key: String::new(),
                value: None,
                next: self.free,
            });
            self.free = Some(i);
        }
        self.buckets.len() as u32 - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift_hash(key: &[u8]) -> u32 {
        key.iter()
            .take(32)
            .enumerate()
            .fold(0u32, |h, (i, &b)| h.wrapping_add((b as u32) << i))
    }

    /// Degenerate hash to force every key into one chain.
    fn collide_all(_key: &[u8]) -> u32 {
        7
    }

    #[test]
    fn test_insert_lookup_roundtrip() {
        let mut table = HashTable::new(16, shift_hash);
        assert!(table.insert("a", 1).is_none());
        assert!(table.insert("b", 2).is_none());
        assert_eq!(table.get("a"), Some(&1));
        assert_eq!(table.get("b"), Some(&2));
        assert_eq!(table.get("c"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_insert_replaces_and_returns_old_value() {
        let mut table = HashTable::new(16, shift_hash);
        table.insert("a", 1);
        assert_eq!(table.insert("a", 2), Some(1));
        assert_eq!(table.get("a"), Some(&2));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_returns_value_and_forgets_key() {
        let mut table = HashTable::new(16, shift_hash);
        table.insert("a", 1);
        assert_eq!(table.remove("a"), Some(1));
        assert_eq!(table.get("a"), None);
        assert_eq!(table.remove("a"), None);
        assert!(table.is_empty());
    }

    #[test]
    fn test_removed_buckets_are_reused() {
        let mut table = HashTable::new(4, shift_hash);
        for i in 0..50 {
            table.insert(&format!("k{i}"), i);
        }
        let backing = table.buckets.len();
        for i in 0..50 {
            table.remove(&format!("k{i}"));
        }
        for i in 0..50 {
            table.insert(&format!("r{i}"), i);
        }
        // Churn is served entirely from the pool.
        assert_eq!(table.buckets.len(), backing);
    }

    #[test]
    fn test_growth_past_one_batch() {
        let mut table = HashTable::new(8, shift_hash);
        for i in 0..250 {
            table.insert(&format!("key{i}"), i);
        }
        assert_eq!(table.len(), 250);
        for i in 0..250 {
            assert_eq!(table.get(&format!("key{i}")), Some(&i));
        }
        assert!(table.buckets.len() >= 250);
    }

    #[test]
    fn test_chained_collisions() {
        let mut table = HashTable::new(4, collide_all);
        for i in 0..20 {
            table.insert(&format!("c{i}"), i);
        }
        for i in 0..20 {
            assert_eq!(table.get(&format!("c{i}")), Some(&i));
        }
        // Remove from the middle of the chain and check the rest survives.
        table.remove("c10");
        assert_eq!(table.get("c10"), None);
        assert_eq!(table.get("c9"), Some(&9));
        assert_eq!(table.get("c11"), Some(&11));
    }

    #[test]
    fn test_for_each_visits_all_entries() {
        let mut table = HashTable::new(16, shift_hash);
        for i in 0..10 {
            table.insert(&format!("v{i}"), i);
        }
        let mut sum = 0;
        let flow: ControlFlow<()> = table.for_each(|_, v| {
            sum += v;
            ControlFlow::Continue(())
        });
        assert!(flow.is_continue());
        assert_eq!(sum, 45);
    }

    #[test]
    fn test_for_each_short_circuits() {
        let mut table = HashTable::new(16, shift_hash);
        for i in 0..10 {
            table.insert(&format!("v{i}"), i);
        }
        let mut seen = 0;
        let flow = table.for_each(|name, _| {
            seen += 1;
            if name.ends_with('3') {
                ControlFlow::Break(name.to_string())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(flow, ControlFlow::Break("v3".to_string()));
        assert!(seen <= 10);
    }
}
