// Copyright 2025 ordered-stream contributors
// SPDX-License-Identifier: Apache-2.0

//! A wrapper that fails at a configured position, for exercising error
//! propagation and drop-cancels-upstream behavior without a real failing
//! source.

use async_trait::async_trait;
use ostream_core::{CancelHandle, OrderedStream};
use ostream_error::MapError;

/// Wraps `upstream`, yielding its items unchanged until `fail_at` items have
/// been produced, then failing once with `make_error()` and cancelling
/// upstream. After that, like every `OrderedStream`, it reports `Ok(None)`
/// forever.
pub struct ErrorInjectingStream<S: OrderedStream, F> {
    upstream: S,
    fail_at: usize,
    seen: usize,
    make_error: F,
    poisoned: bool,
}

impl<S: OrderedStream, F> ErrorInjectingStream<S, F> {
    pub fn new(upstream: S, fail_at: usize, make_error: F) -> Self {
        Self {
            upstream,
            fail_at,
            seen: 0,
            make_error,
            poisoned: false,
        }
    }
}

#[async_trait]
impl<S, F, E> OrderedStream for ErrorInjectingStream<S, F>
where
    S: OrderedStream,
    F: FnMut() -> E + Send,
    E: Send,
{
    type Item = S::Item;
    type Error = MapError<S::Error, E>;

    async fn next(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        if self.poisoned || self.upstream.cancel_handle().is_cancelled() {
            return Ok(None);
        }
        if self.seen == self.fail_at {
            self.poisoned = true;
            self.upstream.cancel();
            return Err(MapError::Transform((self.make_error)()));
        }
        match self.upstream.next().await {
            Ok(Some(item)) => {
                self.seen += 1;
                Ok(Some(item))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                self.poisoned = true;
                Err(MapError::Upstream(e))
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

impl<S: OrderedStream, F> Drop for ErrorInjectingStream<S, F> {
    fn drop(&mut self) {
        self.upstream.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ostream_ops::source::from_iter;

    #[tokio::test]
    async fn fails_exactly_at_the_configured_position() {
        let mut stream = ErrorInjectingStream::new(from_iter(0..10), 3, || "boom");
        let mut out = Vec::new();
        loop {
            match stream.next().await {
                Ok(Some(item)) => out.push(item),
                Ok(None) => panic!("expected an injected error before end of stream"),
                Err(MapError::Transform(msg)) => {
                    assert_eq!(msg, "boom");
                    break;
                }
                Err(MapError::Upstream(_)) => panic!("unexpected upstream error"),
            }
        }
        assert_eq!(out, vec![0, 1, 2]);
        assert_eq!(stream.next().await.ok(), Some(None));
    }
}
