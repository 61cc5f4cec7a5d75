// Copyright 2025 ordered-stream contributors
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use ostream_core::{CancelHandle, OrderedStream};

/// Drains `first` to exhaustion, then drains `second`. `cancel` cancels
/// both, regardless of which one is currently being drained.
pub struct Concat<A: OrderedStream, B: OrderedStream> {
    first: A,
    second: B,
    first_drained: bool,
}

impl<A: OrderedStream, B: OrderedStream> Concat<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            first_drained: false,
        }
    }
}

#[async_trait]
impl<A, B> OrderedStream for Concat<A, B>
where
    A: OrderedStream,
    B: OrderedStream<Item = A::Item, Error = A::Error>,
{
    type Item = A::Item;
    type Error = A::Error;

    async fn next(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        if !self.first_drained {
            match self.first.next().await? {
                Some(item) => return Ok(Some(item)),
                None => self.first_drained = true,
            }
        }
        self.second.next().await
    }

    fn cancel(&self) {
        self.first.cancel();
        self.second.cancel();
    }

    fn cancel_handle(&self) -> CancelHandle {
        CancelHandle::chained_all(vec![self.first.cancel_handle(), self.second.cancel_handle()])
    }
}

impl<A: OrderedStream, B: OrderedStream> Drop for Concat<A, B> {
    fn drop(&mut self) {
        self.first.cancel();
        self.second.cancel();
    }
}
