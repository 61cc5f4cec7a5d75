// Copyright 2025 ordered-stream contributors
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use ostream_core::{CancelHandle, OrderedStream};
use ostream_error::MapError;

/// Flattens a stream of inner streams into their concatenated elements,
/// outer order preserved, each inner stream fully drained before the next
/// outer element's inner stream is pulled.
pub struct FlattenStreams<S, Inner>
where
    S: OrderedStream<Item = Inner>,
    Inner: OrderedStream,
{
    upstream: S,
    current: Option<Inner>,
}

impl<S, Inner> FlattenStreams<S, Inner>
where
    S: OrderedStream<Item = Inner>,
    Inner: OrderedStream,
{
    pub fn new(upstream: S) -> Self {
        Self {
            upstream,
            current: None,
        }
    }
}

#[async_trait]
impl<S, Inner> OrderedStream for FlattenStreams<S, Inner>
where
    S: OrderedStream<Item = Inner>,
    Inner: OrderedStream,
{
    type Item = Inner::Item;
    type Error = MapError<S::Error, Inner::Error>;

    async fn next(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            if let Some(inner) = self.current.as_mut() {
                match inner.next().await {
                    Ok(Some(item)) => return Ok(Some(item)),
                    Ok(None) => {
                        self.current = None;
                    }
                    Err(e) => {
                        self.upstream.cancel();
                        return Err(MapError::Transform(e));
                    }
                }
                continue;
            }
            match self.upstream.next().await {
                Ok(Some(inner)) => self.current = Some(inner),
                Ok(None) => return Ok(None),
                Err(e) => return Err(MapError::Upstream(e)),
            }
        }
    }

    fn cancel(&self) {
        if let Some(inner) = &self.current {
            inner.cancel();
        }
        self.upstream.cancel();
    }

    fn cancel_handle(&self) -> CancelHandle {
        self.upstream.cancel_handle()
    }
}

impl<S, Inner> Drop for FlattenStreams<S, Inner>
where
    S: OrderedStream<Item = Inner>,
    Inner: OrderedStream,
{
    fn drop(&mut self) {
        if let Some(inner) = &self.current {
            inner.cancel();
        }
        self.upstream.cancel();
    }
}

/// Flattens a stream of synchronous sequences into their concatenated
/// elements. The inner iterator cannot fail, so the combined failure type
/// is just upstream's own.
pub struct FlattenSeqs<S, Seq>
where
    S: OrderedStream<Item = Seq>,
    Seq: IntoIterator + Send,
    Seq::IntoIter: Send,
    Seq::Item: Send,
{
    upstream: S,
    current: Option<Seq::IntoIter>,
}

impl<S, Seq> FlattenSeqs<S, Seq>
where
    S: OrderedStream<Item = Seq>,
    Seq: IntoIterator + Send,
    Seq::IntoIter: Send,
    Seq::Item: Send,
{
    pub fn new(upstream: S) -> Self {
        Self {
            upstream,
            current: None,
        }
    }
}

#[async_trait]
impl<S, Seq> OrderedStream for FlattenSeqs<S, Seq>
where
    S: OrderedStream<Item = Seq>,
    Seq: IntoIterator + Send,
    Seq::IntoIter: Send,
    Seq::Item: Send,
{
    type Item = Seq::Item;
    type Error = S::Error;

    async fn next(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            if let Some(iter) = self.current.as_mut() {
                match iter.next() {
                    Some(item) => return Ok(Some(item)),
                    None => self.current = None,
                }
                continue;
            }
            match self.upstream.next().await? {
                Some(seq) => self.current = Some(seq.into_iter()),
                None => return Ok(None),
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

impl<S, Seq> Drop for FlattenSeqs<S, Seq>
where
    S: OrderedStream<Item = Seq>,
    Seq: IntoIterator + Send,
    Seq::IntoIter: Send,
    Seq::Item: Send,
{
    fn drop(&mut self) {
        self.upstream.cancel();
    }
}
