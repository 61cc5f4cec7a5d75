// Copyright 2025 ordered-stream contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic, idempotent cancellation handle.
//!
//! A [`CancelHandle`] is the thing every `OrderedStream` hands out via
//! `cancel_handle()`. It can be cloned freely, invoked from any thread any
//! number of times, and outlives the stream it was obtained from. Cancelling
//! a handle notifies every pending `cancelled()` waiter and, if the handle
//! was built with `chain_upstream`, recursively cancels whatever it is
//! chained to.

use alloc::sync::Arc;
use core::future::Future;
use core::pin::Pin;
use core::sync::atomic::{AtomicBool, Ordering};
use core::task::{Context, Poll};
use event_listener::{Event, EventListener};

/// A thread-safe, idempotent handle used to request cancellation of a
/// stream and everything upstream of it.
#[derive(Clone)]
pub struct CancelHandle {
    inner: Arc<Inner>,
}

struct Inner {
    cancelled: AtomicBool,
    event: Event,
    // Invoked once, the first time `cancel()` actually flips the flag.
    upstream: Vec<CancelHandle>,
}

impl CancelHandle {
    /// Create a fresh, not-yet-cancelled handle with no upstream chain.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                event: Event::new(),
                upstream: Vec::new(),
            }),
        }
    }

    /// Create a handle that, when cancelled, also cancels `upstream`.
    ///
    /// This is how cancellation flows downstream→upstream through a chain
    /// of operators: each operator's handle chains to the handle it was
    /// built on top of.
    pub fn chained(upstream: CancelHandle) -> Self {
        Self::chained_all(vec![upstream])
    }

    /// Like [`Self::chained`], but fanning out to several upstream handles
    /// at once — used by operators with more than one upstream (`concat`).
    pub fn chained_all(upstream: Vec<CancelHandle>) -> Self {
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                event: Event::new(),
                upstream,
            }),
        }
    }

    /// Request cancellation. Idempotent: the second and subsequent calls are
    /// no-ops. Propagates to every chained upstream handle, if any.
    pub fn cancel(&self) {
        if self.inner.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!("stream cancelled");
        self.inner.event.notify(usize::MAX);
        for upstream in &self.inner.upstream {
            upstream.cancel();
        }
    }

    /// Non-blocking check of whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// A future that resolves once this handle is cancelled. Resolves
    /// immediately if cancellation already happened.
    pub fn cancelled(&self) -> Cancelled<'_> {
        Cancelled {
            handle: self,
            listener: None,
        }
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CancelHandle")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Future returned by [`CancelHandle::cancelled`].
pub struct Cancelled<'a> {
    handle: &'a CancelHandle,
    listener: Option<EventListener>,
}

impl<'a> Future for Cancelled<'a> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.handle.is_cancelled() {
            return Poll::Ready(());
        }
        if self.listener.is_none() {
            self.listener = Some(self.handle.inner.event.listen());
            if self.handle.is_cancelled() {
                return Poll::Ready(());
            }
        }
        Pin::new(self.listener.as_mut().unwrap()).poll(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_idempotent() {
        let handle = CancelHandle::new();
        assert!(!handle.is_cancelled());
        handle.cancel();
        handle.cancel();
        handle.cancel();
        assert!(handle.is_cancelled());
    }

    #[test]
    fn chained_cancel_propagates_upstream() {
        let upstream = CancelHandle::new();
        let downstream = CancelHandle::chained(upstream.clone());
        downstream.cancel();
        assert!(upstream.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_future_resolves_after_cancel() {
        let handle = CancelHandle::new();
        let waiter = handle.clone();
        let task = tokio::spawn(async move {
            waiter.cancelled().await;
        });
        handle.cancel();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn cancelled_future_resolves_immediately_if_already_cancelled() {
        let handle = CancelHandle::new();
        handle.cancel();
        handle.cancelled().await;
    }
}
