// Copyright 2025 ordered-stream contributors
// SPDX-License-Identifier: Apache-2.0

//! Fluent combinator methods on every [`OrderedStream`].

use std::hash::Hash;

use futures::future::Future;
use ostream_core::OrderedStream;
use ostream_error::MapError;

use crate::derived::{compact_map, flat_map};
use crate::lightweight::{Compacted, Concat, FlattenSeqs, FlattenStreams, Filter, TryFilter, Unique};
use crate::map::{self, Map, MapConfig};

pub trait OrderedStreamExt: OrderedStream + Sized {
    /// Keep only elements for which `predicate` returns `true`.
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        P: FnMut(&Self::Item) -> bool + Send,
    {
        Filter::new(self, predicate)
    }

    /// Like [`Self::filter`], but `predicate` may itself fail.
    fn try_filter<P, Ep>(self, predicate: P) -> TryFilter<Self, P>
    where
        P: FnMut(&Self::Item) -> Result<bool, Ep> + Send,
        Ep: Send,
    {
        TryFilter::new(self, predicate)
    }

    /// Drop `None`s from a stream of `Option<T>`.
    fn compacted<T>(self) -> Compacted<Self>
    where
        Self: OrderedStream<Item = Option<T>>,
        T: Send,
    {
        Compacted::new(self)
    }

    /// Flatten a stream of inner streams, outer order preserved.
    fn flatten<Inner>(self) -> FlattenStreams<Self, Inner>
    where
        Self: OrderedStream<Item = Inner>,
        Inner: OrderedStream,
    {
        FlattenStreams::new(self)
    }

    /// Flatten a stream of synchronous sequences, outer order preserved.
    fn flatten_seq<Seq>(self) -> FlattenSeqs<Self, Seq>
    where
        Self: OrderedStream<Item = Seq>,
        Seq: IntoIterator + Send,
        Seq::IntoIter: Send,
        Seq::Item: Send,
    {
        FlattenSeqs::new(self)
    }

    /// Emit only the first occurrence of each element.
    fn unique(self) -> Unique<Self>
    where
        Self::Item: Eq + Hash + Clone,
    {
        Unique::new(self)
    }

    /// Drain `self` to exhaustion, then drain `other`.
    fn concat<B>(self, other: B) -> Concat<Self, B>
    where
        B: OrderedStream<Item = Self::Item, Error = Self::Error>,
    {
        Concat::new(self, other)
    }

    /// Run an infallible, possibly-async transform over every element,
    /// concurrently, preserving order. Concurrency is unbounded unless
    /// `config` sets `max_concurrency`.
    fn map<F, Fut, T>(self, f: F, config: MapConfig) -> Map<T, Self::Error>
    where
        Self: 'static,
        F: Fn(Self::Item) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
        Self::Error: Send + 'static,
    {
        map::map(self, f, config)
    }

    /// Like [`Self::map`], but the transform itself may fail.
    fn try_map<F, Fut, T, Et>(self, f: F, config: MapConfig) -> Map<T, MapError<Self::Error, Et>>
    where
        Self: 'static,
        F: Fn(Self::Item) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, Et>> + Send + 'static,
        T: Send + 'static,
        Self::Error: Send + 'static,
        Et: Send + 'static,
    {
        map::try_map(self, f, config)
    }

    /// `map(f, config).compacted()`.
    fn compact_map<F, Fut, U>(self, f: F, config: MapConfig) -> Compacted<Map<Option<U>, Self::Error>>
    where
        Self: 'static,
        F: Fn(Self::Item) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<U>> + Send + 'static,
        U: Send + 'static,
        Self::Error: Send + 'static,
    {
        compact_map(self, f, config)
    }

    /// `map(f, config).flatten()`.
    fn flat_map<F, Fut, Inner>(
        self,
        f: F,
        config: MapConfig,
    ) -> FlattenStreams<Map<Inner, Self::Error>, Inner>
    where
        Self: 'static,
        F: Fn(Self::Item) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Inner> + Send + 'static,
        Inner: OrderedStream + Send + 'static,
        Self::Error: Send + 'static,
    {
        flat_map(self, f, config)
    }
}

impl<S: OrderedStream> OrderedStreamExt for S {}
