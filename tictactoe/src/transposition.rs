//! Fixed-size hash table keyed by zobrist hashes, probed quadratically.

const PROBE_LIMIT: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// Failed high: the true score is at least this.
    Lower,
    /// Failed low: the true score is at most this.
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry<V> {
    key: u64,
    value: V,
}

/// Open addressing table whose capacity is a power of two. Key `0` marks an
/// empty slot, so callers should never produce it.
#[derive(Debug, Clone)]
pub struct QuadraticProbingHashTable<V> {
    arr: Box<[Option<TableEntry<V>>]>,
    mask: usize,
    size: usize,
}

impl<V: Copy> QuadraticProbingHashTable<V> {
    /// Rounds `capacity` up to the next power of two.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1).next_power_of_two();
        Self {
            arr: vec![None; capacity].into_boxed_slice(),
            mask: capacity - 1,
            size: 0,
        }
    }

    #[must_use]
    pub fn enough_to_hold(num: usize) -> Self {
        let mut capacity = 1;
        while capacity * 2 < num * 3 {
            capacity <<= 1;
        }
        Self::new(capacity)
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.arr.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Stores `value` under `key`, replacing an older value for the same
    /// key. New keys are dropped once the table is two thirds full or the
    /// probe sequence runs out.
    pub fn insert(&mut self, key: u64, value: V) -> bool {
        let full = self.size * 3 > self.capacity() * 2;
        let mut idx = key as usize & self.mask;
        for inc in 1..=PROBE_LIMIT {
            let slot = &mut self.arr[idx];
            match slot {
                Some(entry) if entry.key == key => {
                    entry.value = value;
                    return true;
                }
                Some(_) => {}
                None if full => return false,
                None => {
                    *slot = Some(TableEntry { key, value });
                    self.size += 1;
                    return true;
                }
            }
            idx += inc;
            idx &= self.mask;
        }
        false
    }

    #[must_use]
    pub fn lookup(&self, key: u64) -> Option<V> {
        let mut idx = key as usize & self.mask;
        for inc in 1..=PROBE_LIMIT {
            match self.arr[idx] {
                Some(entry) if entry.key == key => return Some(entry.value),
                None => return None,
                Some(_) => {}
            }
            idx += inc;
            idx &= self.mask;
        }
        None
    }

    pub fn clear(&mut self) {
        self.arr.fill(None);
        self.size = 0;
    }
}
