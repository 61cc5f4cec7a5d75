// Copyright 2025 ordered-stream contributors
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use ostream_core::{CancelHandle, OrderedStream};
use ostream_error::MapError;

/// Keeps only elements for which `predicate` returns `true`. The predicate
/// itself cannot fail; failures propagate from upstream unchanged.
pub struct Filter<S: OrderedStream, P> {
    upstream: S,
    predicate: P,
}

impl<S: OrderedStream, P> Filter<S, P> {
    pub fn new(upstream: S, predicate: P) -> Self {
        Self { upstream, predicate }
    }
}

#[async_trait]
impl<S, P> OrderedStream for Filter<S, P>
where
    S: OrderedStream,
    P: FnMut(&S::Item) -> bool + Send,
{
    type Item = S::Item;
    type Error = S::Error;

    async fn next(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match self.upstream.next().await? {
                None => return Ok(None),
                Some(item) => {
                    if (self.predicate)(&item) {
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

impl<S: OrderedStream, P> Drop for Filter<S, P> {
    fn drop(&mut self) {
        self.upstream.cancel();
    }
}

/// Like [`Filter`], but the predicate itself may fail. The combined failure
/// type is `MapError<S::Error, Ep>` — upstream's own error widened with the
/// predicate's, the same mechanism `try_map` uses.
pub struct TryFilter<S: OrderedStream, P> {
    upstream: S,
    predicate: P,
}

impl<S: OrderedStream, P> TryFilter<S, P> {
    pub fn new(upstream: S, predicate: P) -> Self {
        Self { upstream, predicate }
    }
}

#[async_trait]
impl<S, P, Ep> OrderedStream for TryFilter<S, P>
where
    S: OrderedStream,
    P: FnMut(&S::Item) -> Result<bool, Ep> + Send,
    Ep: Send,
{
    type Item = S::Item;
    type Error = MapError<S::Error, Ep>;

    async fn next(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match self.upstream.next().await.map_err(MapError::Upstream)? {
                None => return Ok(None),
                Some(item) => match (self.predicate)(&item) {
                    Ok(true) => return Ok(Some(item)),
                    Ok(false) => continue,
                    Err(e) => {
                        self.upstream.cancel();
                        return Err(MapError::Transform(e));
                    }
                },
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

impl<S: OrderedStream, P> Drop for TryFilter<S, P> {
    fn drop(&mut self) {
        self.upstream.cancel();
    }
}
