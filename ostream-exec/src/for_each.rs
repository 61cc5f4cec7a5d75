// Copyright 2025 ordered-stream contributors
// SPDX-License-Identifier: Apache-2.0

//! `for_each`: drains a stream serially, dispatching one detached task per
//! element, mirroring the per-item subscription pattern used for dispatch
//! elsewhere in this workspace. Tasks run concurrently with each other and
//! with the next `next()` call; `for_each` itself only waits for the source
//! to drain and, afterward, for every dispatched task to report in.

use std::sync::Arc;

use futures::channel::mpsc;
use futures::future::Future;
use futures::StreamExt as _;

use ostream_core::OrderedStream;
use ostream_error::{MapError, MultipleErrors};
use ostream_runtime::spawn_detached;

/// Runs `body` once per element, in the order elements arrive, with each
/// dispatched call running as its own task rather than blocking the drain
/// loop. `body`'s own failures don't stop the drain: if `on_error` is given,
/// each failure is handed to it as it happens; otherwise every failure is
/// collected and surfaced together as [`MultipleErrors`] once the source
/// has drained and every dispatched task has finished.
///
/// An upstream failure, by contrast, stops the drain immediately and
/// cancels the source — it is reported as `MapError::Upstream` without
/// waiting for in-flight `body` calls to finish.
pub async fn for_each<S, F, Fut, E, OnError>(
    mut stream: S,
    body: F,
    on_error: Option<OnError>,
) -> Result<(), MapError<S::Error, MultipleErrors<E>>>
where
    S: OrderedStream + 'static,
    F: Fn(S::Item) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
    E: Send + 'static,
    OnError: Fn(E) + Send + Sync + 'static,
{
    let body = Arc::new(body);
    let on_error = on_error.map(Arc::new);
    let (error_tx, mut error_rx) = mpsc::unbounded::<E>();

    loop {
        match stream.next().await {
            Ok(Some(item)) => {
                let body = body.clone();
                let on_error = on_error.clone();
                let error_tx = error_tx.clone();
                spawn_detached(async move {
                    if let Err(e) = body(item).await {
                        match &on_error {
                            Some(cb) => cb(e),
                            None => {
                                let _ = error_tx.unbounded_send(e);
                            }
                        }
                    }
                });
            }
            Ok(None) => break,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("for_each source failed, cancelling");
                stream.cancel();
                return Err(MapError::Upstream(e));
            }
        }
    }

    drop(error_tx);
    let mut errors = Vec::new();
    while let Some(e) = error_rx.next().await {
        errors.push(e);
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(MapError::Transform(MultipleErrors::new(errors)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ostream_ops::source::from_iter;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn runs_body_for_every_element() {
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = seen.clone();
        let result = for_each(
            from_iter(0..10),
            move |_n: i32| {
                let seen = seen_clone.clone();
                async move {
                    seen.fetch_add(1, Ordering::SeqCst);
                    Ok::<(), std::convert::Infallible>(())
                }
            },
            None::<fn(std::convert::Infallible)>,
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(seen.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn aggregates_body_errors_when_no_callback_given() {
        #[derive(Debug)]
        struct Failed(i32);

        let result = for_each(
            from_iter(0..5),
            |n: i32| async move {
                if n % 2 == 0 {
                    Err(Failed(n))
                } else {
                    Ok(())
                }
            },
            None::<fn(Failed)>,
        )
        .await;

        match result {
            Err(MapError::Transform(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected aggregated transform errors, got {other:?}"),
        }
    }
}
