// Copyright 2025 ordered-stream contributors
// SPDX-License-Identifier: Apache-2.0

//! Operators defined purely as compositions of `map`/`try_map` with the
//! lightweight operators — no new engine needed.

use ostream_core::OrderedStream;

use crate::lightweight::{Compacted, FlattenStreams};
use crate::map::{map, Map, MapConfig};
use futures::future::Future;

/// `compact_map(f)` is `map(f).compacted()`: run a concurrent, possibly
/// async transform producing `Option<U>` per element, then drop the `None`s.
pub fn compact_map<S, F, Fut, U>(
    upstream: S,
    f: F,
    config: MapConfig,
) -> Compacted<Map<Option<U>, S::Error>>
where
    S: OrderedStream + 'static,
    F: Fn(S::Item) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Option<U>> + Send + 'static,
    U: Send + 'static,
    S::Error: Send + 'static,
{
    Compacted::new(map(upstream, f, config))
}

/// `flat_map(f)` is `map(f).flatten()`: produce one inner stream per
/// element, running the (typically cheap) production of each inner stream
/// concurrently, then serialize their elements in outer-index order, each
/// inner stream fully drained before the next one starts.
pub fn flat_map<S, F, Fut, Inner>(
    upstream: S,
    f: F,
    config: MapConfig,
) -> FlattenStreams<Map<Inner, S::Error>, Inner>
where
    S: OrderedStream + 'static,
    F: Fn(S::Item) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Inner> + Send + 'static,
    Inner: OrderedStream + Send + 'static,
    S::Error: Send + 'static,
{
    FlattenStreams::new(map(upstream, f, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::from_iter;

    #[tokio::test]
    async fn compact_map_drops_nones() {
        let mut stream = compact_map(
            from_iter(0..10),
            |n: i32| async move { if n % 2 == 0 { Some(n) } else { None } },
            MapConfig::new(),
        );
        let mut out = Vec::new();
        while let Some(v) = stream.next().await.unwrap() {
            out.push(v);
        }
        assert_eq!(out, vec![0, 2, 4, 6, 8]);
    }

    #[tokio::test]
    async fn flat_map_preserves_outer_order() {
        let mut stream = flat_map(
            from_iter(vec![3, 1, 2]),
            |n: i32| async move { from_iter(0..n) },
            MapConfig::new(),
        );
        let mut out = Vec::new();
        while let Some(v) = stream.next().await.unwrap() {
            out.push(v);
        }
        assert_eq!(out, vec![0, 1, 2, 0, 0, 1]);
    }
}
