// Copyright 2025 ordered-stream contributors
// SPDX-License-Identifier: Apache-2.0

//! The ordered concurrent map engine — the only operator family that spawns
//! worker tasks. An upstream [`OrderedStream`] is pulled by a detached
//! supervisor task, which assigns each element a monotonically increasing
//! index and hands the transform off to its own worker task; workers may
//! finish out of order, and a reorder buffer on the consumer side restores
//! submission order before handing elements back.
//!
//! `map`/`try_map` are built on the same engine, parameterized by whether
//! the transform itself can fail. `compact_map`/`flat_map` (in `derived`)
//! are themselves built on top of `map`/`try_map`.

mod semaphore;
mod yield_now;

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::future::Future;
use futures::StreamExt as _;

use ostream_core::{CancelHandle, Indexed, OrderedStream};
use ostream_error::MapError;
use ostream_runtime::{spawn_detached, SupervisorTask};

use semaphore::Semaphore;
use yield_now::yield_now;

/// Tuning knobs for a `map`/`try_map` stage, set before the stream is first
/// polled.
#[derive(Clone, Copy, Debug, Default)]
pub struct MapConfig {
    max_concurrency: Option<NonZeroUsize>,
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the number of transforms in flight at once. Unset means
    /// unbounded: every element pulled from upstream gets its own worker
    /// immediately.
    pub fn with_max_concurrency(mut self, max: NonZeroUsize) -> Self {
        self.max_concurrency = Some(max);
        self
    }
}

/// A message from a worker (or the supervisor itself, on upstream failure)
/// back to the consumer-side reorder buffer.
///
/// The `Error` variant is deliberately unindexed: a failure aborts the whole
/// stage regardless of which index it was attached to, so it must reach
/// `next()` even if earlier indices are still missing from the buffer.
enum MapMessage<T, E> {
    Item(Indexed<T>),
    Error(E),
}

/// The output stream of `map`/`try_map`.
pub struct Map<T, E> {
    receiver: UnboundedReceiver<MapMessage<T, E>>,
    cancel: CancelHandle,
    _supervisor: SupervisorTask,
    reorder: HashMap<u64, T>,
    next_expected: u64,
    poisoned: bool,
}

#[async_trait]
impl<T, E> OrderedStream for Map<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    type Item = T;
    type Error = E;

    async fn next(&mut self) -> Result<Option<T>, E> {
        if self.poisoned {
            return Ok(None);
        }
        loop {
            if let Some(value) = self.reorder.remove(&self.next_expected) {
                self.next_expected += 1;
                return Ok(Some(value));
            }
            if self.cancel.is_cancelled() {
                #[cfg(feature = "tracing")]
                tracing::debug!("map stream cancellation observed in next()");
                self.poisoned = true;
                return Ok(None);
            }
            match self.receiver.next().await {
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("map engine channel closed");
                    self.poisoned = true;
                    return Ok(None);
                }
                Some(MapMessage::Error(e)) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("map engine surfacing an error, cancelling");
                    self.cancel.cancel();
                    self.poisoned = true;
                    return Err(e);
                }
                Some(MapMessage::Item(indexed)) => {
                    self.reorder.insert(indexed.index, indexed.value);
                }
            }
        }
    }

    fn cancel(&self) {
        self.cancel.cancel();
    }

    fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }
}

/// Builds the engine shared by `map` and `try_map`. `wrap_upstream_err`
/// widens upstream's own failure into the stage's combined error type;
/// `run` drives one element through the transform and already returns that
/// combined error type, so the supervisor and workers below don't need to
/// know whether the transform itself is fallible.
fn spawn_engine<S, T, E, Fut>(
    mut upstream: S,
    config: MapConfig,
    wrap_upstream_err: impl Fn(S::Error) -> E + Send + Sync + 'static,
    run: impl Fn(S::Item) -> Fut + Send + Sync + 'static,
) -> Map<T, E>
where
    S: OrderedStream + 'static,
    T: Send + 'static,
    E: Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    let (sender, receiver) = mpsc::unbounded::<MapMessage<T, E>>();
    let upstream_cancel = upstream.cancel_handle();
    let cancel = CancelHandle::chained(upstream_cancel);
    let semaphore = config.max_concurrency.map(|n| Semaphore::new(n.get()));
    let run = Arc::new(run);

    let supervisor = SupervisorTask::spawn_with_cancel(cancel.clone(), move |cancel| async move {
        let mut index: u64 = 0;
        loop {
            if cancel.is_cancelled() {
                break;
            }
            let item = match upstream.next().await {
                Ok(Some(item)) => item,
                Ok(None) => break,
                Err(e) => {
                    let _ = sender.unbounded_send(MapMessage::Error(wrap_upstream_err(e)));
                    break;
                }
            };

            yield_now().await;

            let permit = match &semaphore {
                Some(sem) => match sem.acquire_or_cancelled(&cancel).await {
                    Some(permit) => Some(permit),
                    None => break,
                },
                None => None,
            };

            let worker_sender = sender.clone();
            let worker_cancel = cancel.clone();
            let worker_run = run.clone();
            let worker_index = index;

            #[cfg(feature = "tracing")]
            tracing::trace!(index = worker_index, "index assigned, worker spawned");

            spawn_detached(async move {
                yield_now().await;
                if worker_cancel.is_cancelled() {
                    drop(permit);
                    return;
                }
                let outcome = worker_run(item).await;
                drop(permit);
                match outcome {
                    Ok(value) => {
                        #[cfg(feature = "tracing")]
                        tracing::trace!(index = worker_index, "worker completed");
                        let _ =
                            worker_sender.unbounded_send(MapMessage::Item(Indexed::new(worker_index, value)));
                    }
                    Err(e) => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(index = worker_index, "worker failed, cancelling peers");
                        worker_cancel.cancel();
                        let _ = worker_sender.unbounded_send(MapMessage::Error(e));
                    }
                }
            });

            index += 1;
        }
        // Dropping `sender` here, and every cloned `worker_sender` dropping
        // as each worker finishes, is what eventually closes the channel —
        // there is no separate join needed to "wait for all workers".
        drop(sender);
    });

    Map {
        receiver,
        cancel,
        _supervisor: supervisor,
        reorder: HashMap::new(),
        next_expected: 0,
        poisoned: false,
    }
}

/// Applies an infallible, possibly-async transform to every element,
/// running up to `config.max_concurrency` (or unboundedly many) transforms
/// concurrently while preserving upstream's element order.
pub fn map<S, F, Fut, T>(upstream: S, f: F, config: MapConfig) -> Map<T, S::Error>
where
    S: OrderedStream + 'static,
    F: Fn(S::Item) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
    S::Error: Send + 'static,
{
    spawn_engine(
        upstream,
        config,
        |e| e,
        move |item| {
            let fut = f(item);
            async move { Ok(fut.await) }
        },
    )
}

/// Like [`map`], but the transform itself may fail. The combined failure
/// type is [`MapError<S::Error, Et>`] — upstream's own error widened with
/// the transform's, the same mechanism [`crate::lightweight::TryFilter`]
/// uses for a fallible predicate.
pub fn try_map<S, F, Fut, T, Et>(
    upstream: S,
    f: F,
    config: MapConfig,
) -> Map<T, MapError<S::Error, Et>>
where
    S: OrderedStream + 'static,
    F: Fn(S::Item) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, Et>> + Send + 'static,
    T: Send + 'static,
    S::Error: Send + 'static,
    Et: Send + 'static,
{
    spawn_engine(
        upstream,
        config,
        MapError::Upstream,
        move |item| {
            let fut = f(item);
            async move { fut.await.map_err(MapError::Transform) }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::from_iter;

    #[tokio::test]
    async fn map_preserves_order_under_concurrency() {
        let mut stream = map(
            from_iter(0..20),
            |n: i32| async move {
                if n % 2 == 0 {
                    tokio::task::yield_now().await;
                }
                n * 2
            },
            MapConfig::new(),
        );
        let mut out = Vec::new();
        while let Some(v) = stream.next().await.unwrap() {
            out.push(v);
        }
        assert_eq!(out, (0..20).map(|n| n * 2).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn try_map_surfaces_transform_error_and_cancels() {
        let mut stream = try_map(
            from_iter(0..10),
            |n: i32| async move {
                if n == 5 {
                    Err("boom")
                } else {
                    Ok(n)
                }
            },
            MapConfig::new(),
        );
        let mut seen = Vec::new();
        let err = loop {
            match stream.next().await {
                Ok(Some(v)) => seen.push(v),
                Ok(None) => panic!("stream ended without surfacing the transform error"),
                Err(e) => break e,
            }
        };
        assert!(matches!(err, MapError::Transform("boom")));
        assert!(stream.cancel_handle().is_cancelled());
    }

    #[tokio::test]
    async fn max_concurrency_still_preserves_order() {
        let config = MapConfig::new().with_max_concurrency(NonZeroUsize::new(2).unwrap());
        let mut stream = map(from_iter(0..30), |n: i32| async move { n }, config);
        let mut out = Vec::new();
        while let Some(v) = stream.next().await.unwrap() {
            out.push(v);
        }
        assert_eq!(out, (0..30).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn dropping_the_stream_cancels_the_supervisor() {
        let stream = map(from_iter(0..5), |n: i32| async move { n }, MapConfig::new());
        let handle = stream.cancel_handle();
        drop(stream);
        assert!(handle.is_cancelled());
    }
}
