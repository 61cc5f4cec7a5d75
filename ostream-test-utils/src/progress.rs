// Copyright 2025 ordered-stream contributors
// SPDX-License-Identifier: Apache-2.0

//! A shared counter for asserting how far a stream got before it was
//! dropped, cancelled, or otherwise interrupted mid-consumption.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A clonable, `Send + Sync` counter. Typically incremented once per item a
/// transform or source produces, then inspected after dropping the stream
/// under test to assert progress stopped where expected.
#[derive(Clone, Default)]
pub struct ProgressCounter {
    count: Arc<AtomicUsize>,
}

impl ProgressCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) -> usize {
        self.count.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn get(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increments_are_observed_through_clones() {
        let counter = ProgressCounter::new();
        let clone = counter.clone();
        clone.increment();
        clone.increment();
        assert_eq!(counter.get(), 2);
    }
}
