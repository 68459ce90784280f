use std::cell::Cell;

/// Counter that can be bumped through a shared reference.
///
/// Used for operations that only borrow the cache (`peek`, `recency_rank`).
/// Not `Sync`; a cache built with the `metrics` feature must be wrapped in a
/// lock before it is shared across threads, which the core requires anyway.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.set(0);
    }
}
