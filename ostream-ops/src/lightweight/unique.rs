// Copyright 2025 ordered-stream contributors
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use ostream_core::{CancelHandle, OrderedStream};
use std::collections::HashSet;
use std::hash::Hash;

/// Emits only the first occurrence of each element, in input order.
///
/// The seen-set is touched only by `next()`, which the single-consumer rule
/// guarantees is never called concurrently with itself, so it needs no
/// internal lock. It persists for the stream's lifetime.
pub struct Unique<S>
where
    S: OrderedStream,
    S::Item: Eq + Hash + Clone,
{
    upstream: S,
    seen: HashSet<S::Item>,
}

impl<S> Unique<S>
where
    S: OrderedStream,
    S::Item: Eq + Hash + Clone,
{
    pub fn new(upstream: S) -> Self {
        Self {
            upstream,
            seen: HashSet::new(),
        }
    }
}

#[async_trait]
impl<S> OrderedStream for Unique<S>
where
    S: OrderedStream,
    S::Item: Eq + Hash + Clone,
{
    type Item = S::Item;
    type Error = S::Error;

    async fn next(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match self.upstream.next().await? {
                None => return Ok(None),
                Some(item) => {
                    if self.seen.insert(item.clone()) {
                        return Ok(Some(item));
                    }
                }
            }
        }
    }

    fn cancel(&self) {
        self.upstream.cancel();
    }

    fn cancel_handle(&self) -> CancelHandle {
        self.upstream.cancel_handle()
    }
}

impl<S> Drop for Unique<S>
where
    S: OrderedStream,
    S::Item: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        self.upstream.cancel();
    }
}
