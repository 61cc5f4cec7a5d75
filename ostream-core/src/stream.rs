// Copyright 2025 ordered-stream contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The `OrderedStream` contract.

use crate::cancel::CancelHandle;
use async_trait::async_trait;
use core::sync::atomic::{AtomicBool, Ordering};

/// A singly-owned, single-consumer, pull-based, cancellable, fallible stream
/// of elements.
///
/// `next()` is the sole pull operation. It must not be called again while a
/// previous call on the same stream is still pending — that is a programmer
/// error, and implementations built on [`reentrancy_guard`] trap it with a
/// panic rather than silently corrupting internal state.
///
/// `Error = core::convert::Infallible` marks a stream that statically cannot
/// fail: no `Err` arm of `next()`'s result is reachable, so callers of an
/// infallible chain never need to handle one.
#[async_trait]
pub trait OrderedStream: Send {
    /// The element type produced by this stream.
    type Item: Send;
    /// The failure type. `core::convert::Infallible` for statically
    /// infallible chains.
    type Error: Send;

    /// Pull the next element, if any.
    ///
    /// Returns `Ok(None)` at end of stream (including after cancellation —
    /// cancellation is never reported as an error). Returns `Err(e)` exactly
    /// once per failure; subsequent calls return `Ok(None)`.
    async fn next(&mut self) -> Result<Option<Self::Item>, Self::Error>;

    /// Request cancellation. Idempotent, thread-safe, never fails.
    fn cancel(&self);

    /// A cloneable handle that can cancel this stream (and transitively its
    /// upstream) independent of the stream's own lifetime.
    fn cancel_handle(&self) -> CancelHandle;
}

/// A simple re-entrancy guard for `&self`/shared-handle call sites where the
/// borrow checker alone cannot prevent concurrent `next()` calls (for
/// example behind a boxed trait object shared across tasks).
///
/// `async_trait`'s `&mut self` receiver already rules out the common case at
/// compile time; this guard exists for the remaining object-safe, handle
/// based usages the base contract calls out.
#[derive(Debug, Default)]
pub struct ReentrancyGuard(AtomicBool);

impl ReentrancyGuard {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Enter the guarded section. Returns a drop guard that clears the flag
    /// again. Panics if already entered.
    pub fn enter(&self) -> ReentrancyGuardToken<'_> {
        if self.0.swap(true, Ordering::AcqRel) {
            panic!("OrderedStream::next() called concurrently with itself: streams are single-consumer");
        }
        ReentrancyGuardToken(&self.0)
    }
}

pub struct ReentrancyGuardToken<'a>(&'a AtomicBool);

impl Drop for ReentrancyGuardToken<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reentrancy_guard_allows_sequential_entry() {
        let guard = ReentrancyGuard::new();
        {
            let _token = guard.enter();
        }
        let _token = guard.enter();
    }

    #[test]
    #[should_panic(expected = "single-consumer")]
    fn reentrancy_guard_traps_concurrent_entry() {
        let guard = ReentrancyGuard::new();
        let _outer = guard.enter();
        let _inner = guard.enter();
    }
}
