use fnv::FnvHashMap;
use smallvec::SmallVec;
use std::hash::Hash;

/// Deadlines keyed by the thing they affect.
///
/// Scheduling a key that is already pending replaces its deadline, so two
/// competing resets for the same object can never both fire. The owner polls
/// `drain_due` from the frame clock.
#[derive(Debug)]
pub struct TaskQueue<K> {
    pending: FnvHashMap<K, f64>,
}

impl<K> Default for TaskQueue<K> {
    fn default() -> Self {
        Self {
            pending: FnvHashMap::default(),
        }
    }
}

impl<K: Copy + Eq + Hash> TaskQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the replaced deadline, if any.
    pub fn schedule(&mut self, key: K, due_ms: f64) -> Option<f64> {
        self.pending.insert(key, due_ms)
    }

    pub fn cancel(&mut self, key: &K) -> Option<f64> {
        self.pending.remove(key)
    }

    #[inline]
    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    #[inline]
    pub fn due_at(&self, key: &K) -> Option<f64> {
        self.pending.get(key).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every key due at or before `now_ms`, earliest first.
    pub fn drain_due(&mut self, now_ms: f64) -> SmallVec<[K; 4]> {
        let mut due: SmallVec<[(K, f64); 4]> = self
            .pending
            .iter()
            .filter(|(_, &t)| t <= now_ms)
            .map(|(k, &t)| (*k, t))
            .collect();
        due.sort_by(|a, b| a.1.total_cmp(&b.1));
        for (k, _) in &due {
            self.pending.remove(k);
        }
        due.into_iter().map(|(k, _)| k).collect()
    }
}
