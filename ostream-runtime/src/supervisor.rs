// Copyright 2025 ordered-stream contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic detached task spawning with cooperative cancellation.
//!
//! This is how the concurrent map engine's supervisor (and the workers it
//! launches) get onto an executor without the engine crate depending on any
//! one of them directly. The executor is chosen at compile time via Cargo
//! feature (`runtime-tokio` by default), mirroring the reference
//! workspace's own task-handle pattern.

use ostream_core::CancelHandle;

/// A detached background task bound to a [`CancelHandle`]. Dropping the
/// handle cancels the task; the task itself decides how promptly it reacts
/// (cancellation here is cooperative, not preemptive).
#[derive(Debug)]
pub struct SupervisorTask {
    cancel: CancelHandle,
}

impl SupervisorTask {
    /// Spawn `f(cancel)` as a detached task on the configured runtime. The
    /// closure receives the same [`CancelHandle`] this `SupervisorTask`
    /// controls, so the spawned future can poll `cancel.is_cancelled()` or
    /// await `cancel.cancelled()` at its own cancellation checkpoints.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancelHandle) -> Fut + Send + 'static,
        Fut: core::future::Future<Output = ()> + Send + 'static,
    {
        Self::spawn_with_cancel(CancelHandle::new(), f)
    }

    /// Like [`Self::spawn`], but bound to a caller-supplied handle instead
    /// of a fresh one — used when the handle must already be chained to an
    /// upstream handle before the task starts (the concurrent map engine
    /// does this so cancelling the output stream also cancels upstream).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn spawn_with_cancel<F, Fut>(cancel: CancelHandle, f: F) -> Self
    where
        F: FnOnce(CancelHandle) -> Fut + Send + 'static,
        Fut: core::future::Future<Output = ()> + Send + 'static,
    {
        #[cfg(feature = "tracing")]
        tracing::debug!("supervisor task spawned");
        let future = f(cancel.clone());

        #[cfg(all(
            feature = "runtime-tokio",
            not(all(feature = "runtime-smol", not(feature = "runtime-tokio"))),
            not(all(
                feature = "runtime-async-std",
                not(feature = "runtime-tokio"),
                not(feature = "runtime-smol")
            ))
        ))]
        {
            tokio::spawn(future);
        }

        #[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
        {
            smol::spawn(future).detach();
        }

        #[cfg(all(
            feature = "runtime-async-std",
            not(feature = "runtime-tokio"),
            not(feature = "runtime-smol")
        ))]
        {
            async_std::task::spawn(future);
        }

        Self { cancel }
    }

    /// WASM build: `wasm_bindgen_futures::spawn_local` has no `Send` bound
    /// (the WASM target is single-threaded), so the closure and future need
    /// not be `Send` either.
    #[cfg(target_arch = "wasm32")]
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancelHandle) -> Fut + 'static,
        Fut: core::future::Future<Output = ()> + 'static,
    {
        Self::spawn_with_cancel(CancelHandle::new(), f)
    }

    /// See [`Self::spawn_with_cancel`] above; WASM variant, no `Send` bound.
    #[cfg(target_arch = "wasm32")]
    pub fn spawn_with_cancel<F, Fut>(cancel: CancelHandle, f: F) -> Self
    where
        F: FnOnce(CancelHandle) -> Fut + 'static,
        Fut: core::future::Future<Output = ()> + 'static,
    {
        #[cfg(feature = "tracing")]
        tracing::debug!("supervisor task spawned");
        let future = f(cancel.clone());
        wasm_bindgen_futures::spawn_local(future);
        Self { cancel }
    }

    /// Signal cancellation without waiting for the task to quiesce.
    pub fn cancel(&self) {
        #[cfg(feature = "tracing")]
        tracing::debug!("supervisor task cancellation observed");
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// The handle this task was built on, clonable independent of this
    /// struct's own lifetime.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }
}

impl Drop for SupervisorTask {
    fn drop(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!("supervisor task dropped, cancelling");
        self.cancel.cancel();
    }
}

/// Fire-and-forget spawn with no [`CancelHandle`]/[`SupervisorTask`] of its
/// own attached. Used for the concurrent map engine's per-item workers,
/// which don't need a cancel-on-drop wrapper: their lifetime is tracked by
/// the channel sender they hold, not by a handle the caller keeps around.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_detached<Fut>(future: Fut)
where
    Fut: core::future::Future<Output = ()> + Send + 'static,
{
    #[cfg(feature = "tracing")]
    tracing::debug!("worker task spawned");

    #[cfg(all(
        feature = "runtime-tokio",
        not(all(feature = "runtime-smol", not(feature = "runtime-tokio"))),
        not(all(
            feature = "runtime-async-std",
            not(feature = "runtime-tokio"),
            not(feature = "runtime-smol")
        ))
    ))]
    {
        tokio::spawn(future);
    }

    #[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
    {
        smol::spawn(future).detach();
    }

    #[cfg(all(
        feature = "runtime-async-std",
        not(feature = "runtime-tokio"),
        not(feature = "runtime-smol")
    ))]
    {
        async_std::task::spawn(future);
    }
}

#[cfg(target_arch = "wasm32")]
pub fn spawn_detached<Fut>(future: Fut)
where
    Fut: core::future::Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn drop_cancels_the_handle() {
        let counter = Arc::new(AtomicU32::new(0));
        let task_counter = counter.clone();
        let task = SupervisorTask::spawn(move |cancel| async move {
            while !cancel.is_cancelled() {
                task_counter.fetch_add(1, Ordering::SeqCst);
                tokio::task::yield_now().await;
            }
        });
        tokio::task::yield_now().await;
        assert!(!task.is_cancelled());
        drop(task);
        tokio::task::yield_now().await;
        assert!(counter.load(Ordering::SeqCst) > 0);
    }

    #[tokio::test]
    async fn explicit_cancel_is_observed() {
        let task = SupervisorTask::spawn(|cancel| async move {
            cancel.cancelled().await;
        });
        task.cancel();
        assert!(task.is_cancelled());
    }
}
