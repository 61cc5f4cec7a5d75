// Copyright 2025 ordered-stream contributors
// SPDX-License-Identifier: Apache-2.0

//! A minimal async counting semaphore, built the same way
//! [`ostream_core::CancelHandle`] is: an atomic counter plus an
//! [`event_listener::Event`]. Kept local to this crate (rather than reaching
//! for `tokio::sync::Semaphore`) so the concurrent map engine stays usable
//! under any of the `runtime-*` features, not just `runtime-tokio`.

use event_listener::Event;
use ostream_core::CancelHandle;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone)]
pub struct Semaphore {
    inner: Arc<Inner>,
}

struct Inner {
    permits: AtomicUsize,
    event: Event,
}

impl Semaphore {
    pub fn new(permits: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                permits: AtomicUsize::new(permits),
                event: Event::new(),
            }),
        }
    }

    fn try_acquire(&self) -> bool {
        let mut current = self.inner.permits.load(Ordering::Acquire);
        loop {
            if current == 0 {
                return false;
            }
            match self.inner.permits.compare_exchange_weak(
                current,
                current - 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(observed) => current = observed,
            }
        }
    }

    fn release(&self) {
        self.inner.permits.fetch_add(1, Ordering::AcqRel);
        self.inner.event.notify(1);
    }

    /// Waits for a permit, or returns `None` if `cancel` fires first.
    pub async fn acquire_or_cancelled(&self, cancel: &CancelHandle) -> Option<SemaphorePermit> {
        loop {
            if self.try_acquire() {
                return Some(SemaphorePermit {
                    semaphore: self.clone(),
                });
            }
            if cancel.is_cancelled() {
                return None;
            }
            let listener = self.inner.event.listen();
            // Re-check after registering, to avoid missing a release() that
            // happened between the failed try_acquire above and listen().
            if self.try_acquire() {
                return Some(SemaphorePermit {
                    semaphore: self.clone(),
                });
            }
            futures::future::select(listener, cancel.cancelled()).await;
        }
    }
}

pub struct SemaphorePermit {
    semaphore: Semaphore,
}

impl Drop for SemaphorePermit {
    fn drop(&mut self) {
        self.semaphore.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn acquire_blocks_until_a_permit_is_released() {
        let sem = Semaphore::new(1);
        let cancel = CancelHandle::new();
        let first = sem.acquire_or_cancelled(&cancel).await.unwrap();

        let sem2 = sem.clone();
        let cancel2 = cancel.clone();
        let task = tokio::spawn(async move { sem2.acquire_or_cancelled(&cancel2).await });

        tokio::task::yield_now().await;
        drop(first);
        assert!(task.await.unwrap().is_some());
    }

    #[tokio::test]
    async fn acquire_gives_up_when_cancelled() {
        let sem = Semaphore::new(0);
        let cancel = CancelHandle::new();
        cancel.cancel();
        assert!(sem.acquire_or_cancelled(&cancel).await.is_none());
    }
}
