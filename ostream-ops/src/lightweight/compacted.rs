// Copyright 2025 ordered-stream contributors
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use ostream_core::{CancelHandle, OrderedStream};

/// Drops `None`s from an upstream of `Option<T>`, emitting only the `Some`
/// values. Failures propagate unchanged.
pub struct Compacted<S: OrderedStream> {
    upstream: S,
}

impl<S: OrderedStream> Compacted<S> {
    pub fn new(upstream: S) -> Self {
        Self { upstream }
    }
}

#[async_trait]
impl<S, T> OrderedStream for Compacted<S>
where
    S: OrderedStream<Item = Option<T>>,
    T: Send,
{
    type Item = T;
    type Error = S::Error;

    async fn next(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match self.upstream.next().await? {
                None => return Ok(None),
                Some(None) => continue,
                Some(Some(value)) => return Ok(Some(value)),
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

impl<S: OrderedStream> Drop for Compacted<S> {
    fn drop(&mut self) {
        self.upstream.cancel();
    }
}
