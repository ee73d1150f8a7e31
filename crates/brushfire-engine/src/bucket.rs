//! Bounded-integer bucket priority queue (Dial's algorithm).
//!
//! Keys are squared cell distances in `0..=max_key`. Each item records the
//! bucket it currently lives in, so removal and decrease-key are O(1): the
//! item is re-pointed and the old entry is left behind, to be skipped when
//! extraction reaches it.
//!
//! Buckets are LIFO, which makes extraction order deterministic for a fixed
//! insertion sequence.

/// Bucket value for an item that is not queued.
pub const NOT_QUEUED: u32 = u32::MAX;

/// Items that can live in a [`BucketQueue`].
pub trait Bucketed {
    /// Bucket the item is queued in, or [`NOT_QUEUED`].
    fn bucket(&self) -> u32;

    /// Record the item's bucket.
    fn set_bucket(&mut self, bucket: u32);
}

/// Monotone priority queue over indices into an external item slice.
///
/// The queue only stores indices; queue membership lives in the items.
/// Every method takes the item slice it indexes.
#[derive(Clone, Debug)]
pub struct BucketQueue {
    buckets: Vec<Vec<u32>>,
    /// No bucket below `cursor` holds any entry, live or stale.
    cursor: usize,
    /// Highest bucket written since the queue was last empty.
    high: usize,
    len: usize,
}

impl BucketQueue {
    /// Create a queue accepting keys `0..=max_key`.
    pub fn new(max_key: u32) -> Self {
        Self {
            buckets: vec![Vec::new(); max_key as usize + 1],
            cursor: 0,
            high: 0,
            len: 0,
        }
    }

    /// Largest accepted key.
    pub fn max_key(&self) -> u32 {
        (self.buckets.len() - 1) as u32
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if no item is queued.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Queue `items[index]` at `key`, moving it if it is already queued
    /// elsewhere. A no-op if it is already in that bucket.
    pub fn insert<T: Bucketed>(&mut self, items: &mut [T], index: usize, key: u32) {
        debug_assert!(key <= self.max_key(), "key {key} above {}", self.max_key());
        let current = items[index].bucket();
        if current == key {
            return;
        }
        if current == NOT_QUEUED {
            if self.len == 0 {
                self.cursor = key as usize;
            }
            self.len += 1;
        }
        let k = key as usize;
        self.buckets[k].push(index as u32);
        items[index].set_bucket(key);
        self.cursor = self.cursor.min(k);
        self.high = self.high.max(k);
    }

    /// Dequeue `items[index]` if it is queued.
    pub fn remove<T: Bucketed>(&mut self, items: &mut [T], index: usize) {
        if items[index].bucket() == NOT_QUEUED {
            return;
        }
        items[index].set_bucket(NOT_QUEUED);
        self.len -= 1;
        if self.len == 0 {
            self.drop_stale();
        }
    }

    /// Extract an item with the smallest key.
    pub fn pop<T: Bucketed>(&mut self, items: &mut [T]) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        while self.cursor <= self.high {
            let key = self.cursor as u32;
            while let Some(index) = self.buckets[self.cursor].pop() {
                let index = index as usize;
                if items[index].bucket() == key {
                    items[index].set_bucket(NOT_QUEUED);
                    self.len -= 1;
                    if self.len == 0 {
                        self.drop_stale();
                    }
                    return Some(index);
                }
            }
            self.cursor += 1;
        }
        debug_assert_eq!(self.len, 0, "live entries missing from buckets");
        None
    }

    /// Drop every entry. Items keep whatever bucket they recorded; callers
    /// reset them separately.
    pub fn clear(&mut self) {
        self.drop_stale();
        self.len = 0;
    }

    fn drop_stale(&mut self) {
        if let Some(range) = self.buckets.get_mut(self.cursor..=self.high) {
            for bucket in range {
                bucket.clear();
            }
        }
        self.cursor = 0;
        self.high = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    struct Item(u32);

    impl Default for Item {
        fn default() -> Self {
            Item(NOT_QUEUED)
        }
    }

    impl Bucketed for Item {
        fn bucket(&self) -> u32 {
            self.0
        }
        fn set_bucket(&mut self, bucket: u32) {
            self.0 = bucket;
        }
    }

    fn items(n: usize) -> Vec<Item> {
        vec![Item::default(); n]
    }

    #[test]
    fn pops_in_key_order() {
        let mut q = BucketQueue::new(20);
        let mut it = items(4);
        q.insert(&mut it, 0, 9);
        q.insert(&mut it, 1, 2);
        q.insert(&mut it, 2, 16);
        q.insert(&mut it, 3, 4);
        assert_eq!(q.len(), 4);
        let order: Vec<_> = std::iter::from_fn(|| q.pop(&mut it)).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
        assert!(q.is_empty());
        assert!(it.iter().all(|i| i.0 == NOT_QUEUED));
    }

    #[test]
    fn buckets_are_lifo() {
        let mut q = BucketQueue::new(4);
        let mut it = items(3);
        for i in 0..3 {
            q.insert(&mut it, i, 1);
        }
        assert_eq!(q.pop(&mut it), Some(2));
        assert_eq!(q.pop(&mut it), Some(1));
        assert_eq!(q.pop(&mut it), Some(0));
    }

    #[test]
    fn decrease_key_moves_item() {
        let mut q = BucketQueue::new(10);
        let mut it = items(2);
        q.insert(&mut it, 0, 8);
        q.insert(&mut it, 1, 5);
        q.insert(&mut it, 0, 1);
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop(&mut it), Some(0));
        assert_eq!(q.pop(&mut it), Some(1));
        // The stale entry at 8 is skipped.
        assert_eq!(q.pop(&mut it), None);
    }

    #[test]
    fn reinsert_same_bucket_is_noop() {
        let mut q = BucketQueue::new(10);
        let mut it = items(1);
        q.insert(&mut it, 0, 3);
        q.insert(&mut it, 0, 3);
        assert_eq!(q.len(), 1);
        assert_eq!(q.pop(&mut it), Some(0));
        assert_eq!(q.pop(&mut it), None);
    }

    #[test]
    fn remove_is_lazy_and_counted() {
        let mut q = BucketQueue::new(10);
        let mut it = items(3);
        q.insert(&mut it, 0, 2);
        q.insert(&mut it, 1, 2);
        q.insert(&mut it, 2, 7);
        q.remove(&mut it, 1);
        q.remove(&mut it, 1);
        assert_eq!(q.len(), 2);
        assert_eq!(it[1].0, NOT_QUEUED);
        assert_eq!(q.pop(&mut it), Some(0));
        assert_eq!(q.pop(&mut it), Some(2));
        assert!(q.pop(&mut it).is_none());
    }

    #[test]
    fn insert_below_cursor_moves_it_back() {
        let mut q = BucketQueue::new(10);
        let mut it = items(3);
        q.insert(&mut it, 0, 3);
        q.insert(&mut it, 1, 6);
        assert_eq!(q.pop(&mut it), Some(0));
        q.insert(&mut it, 2, 1);
        assert_eq!(q.pop(&mut it), Some(2));
        assert_eq!(q.pop(&mut it), Some(1));
    }

    #[test]
    fn clear_empties_queue() {
        let mut q = BucketQueue::new(10);
        let mut it = items(2);
        q.insert(&mut it, 0, 4);
        q.insert(&mut it, 1, 9);
        q.clear();
        it = items(2);
        assert!(q.is_empty());
        assert!(q.pop(&mut it).is_none());
        q.insert(&mut it, 1, 2);
        assert_eq!(q.pop(&mut it), Some(1));
        assert!(q.pop(&mut it).is_none());
    }

    proptest! {
        #[test]
        fn pop_sequence_is_sorted(keys in prop::collection::vec(0u32..50, 1..40)) {
            let mut q = BucketQueue::new(49);
            let mut it = items(keys.len());
            for (i, &k) in keys.iter().enumerate() {
                q.insert(&mut it, i, k);
            }
            let mut last = 0;
            let mut popped = 0;
            while let Some(i) = q.pop(&mut it) {
                prop_assert!(keys[i] >= last);
                last = keys[i];
                popped += 1;
            }
            prop_assert_eq!(popped, keys.len());
        }
    }
}
