/*
 * Priority Selector Module
 *
 * A binary max-heap keyed on a single f32. Capped at K entries it keeps the K
 * smallest keys seen so far: the root is always the worst of the kept set and
 * is the one evicted when a better candidate arrives.
 *
 * Used by the K-nearest neighbor strategy, which trades the quadtree build for
 * an O(n log K) scan per boid.
 */

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<T> {
    pub key: f32,
    pub payload: T,
}

#[derive(Debug, Clone)]
pub struct MaxHeap<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for MaxHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MaxHeap<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn peek_max_key(&self) -> Option<f32> {
        self.entries.first().map(|entry| entry.key)
    }

    pub fn push(&mut self, key: f32, payload: T) {
        self.entries.push(Entry { key, payload });

        let mut i = self.entries.len() - 1;
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.entries[parent].key >= key {
                break;
            }
            self.entries.swap(i, parent);
            i = parent;
        }
    }

    pub fn pop(&mut self) -> Option<Entry<T>> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let top = self.entries.pop();

        let len = self.entries.len();
        let mut i = 0;
        loop {
            let mut largest = i;
            let l = 2 * i + 1;
            let r = 2 * i + 2;

            if l < len && self.entries[l].key > self.entries[largest].key {
                largest = l;
            }
            if r < len && self.entries[r].key > self.entries[largest].key {
                largest = r;
            }
            if largest == i {
                break;
            }
            self.entries.swap(largest, i);
            i = largest;
        }

        top
    }

    // Payloads in internal heap order, not sorted by key
    pub fn into_payloads(self) -> Vec<T> {
        self.entries.into_iter().map(|entry| entry.payload).collect()
    }

    // Offer a candidate to a heap capped at `k` entries
    pub fn offer(&mut self, k: usize, key: f32, payload: T) {
        if k == 0 {
            return;
        }
        if self.entries.len() < k {
            self.push(key, payload);
            return;
        }
        match self.peek_max_key() {
            Some(max) if key < max => {
                self.pop();
                self.push(key, payload);
            }
            _ => {}
        }
    }
}

// Keep the `k` candidates with the smallest keys, unsorted.
// Candidates tied with the current worst key are kept in scan order.
pub fn k_smallest<T, I>(k: usize, candidates: I) -> Vec<T>
where
    I: IntoIterator<Item = (f32, T)>,
{
    let candidates = candidates.into_iter();
    // `k` comes from configuration and may dwarf the candidate count
    let (lower, upper) = candidates.size_hint();
    let mut heap = MaxHeap::with_capacity(k.min(upper.unwrap_or(lower)));
    for (key, payload) in candidates {
        heap.offer(k, key, payload);
    }
    heap.into_payloads()
}
