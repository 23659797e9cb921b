use std::sync::atomic::{AtomicUsize, Ordering};

/// Round-robin cursor over a recipient list that may change between calls.
#[derive(Debug, Default)]
pub struct TargetRotation {
    cursor: AtomicUsize,
}

impl TargetRotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `items[cursor mod len]` and advances the cursor. The index is
    /// recomputed against the slice passed in, so additions and removals since
    /// the previous call never produce an out-of-range read.
    pub fn next<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let ticket = self.cursor.fetch_add(1, Ordering::AcqRel);
        items.get(ticket % items.len())
    }

    pub fn reset(&self) {
        self.cursor.store(0, Ordering::Release);
    }
}
