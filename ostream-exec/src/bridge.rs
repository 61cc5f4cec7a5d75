// Copyright 2025 ordered-stream contributors
// SPDX-License-Identifier: Apache-2.0

//! Bridges between [`OrderedStream`] and `futures::Stream`, plus the
//! error-erasure escape hatch.

use async_trait::async_trait;
use futures::stream::Stream;

use ostream_core::{CancelHandle, OrderedStream};
use ostream_error::AnyStreamError;

/// Wraps an `OrderedStream` back into a `futures::Stream<Item = Result<T,
/// E>>`, for handing off to code that only knows the ecosystem's own stream
/// trait. The returned stream yields the failure (if any) as its last item,
/// then ends — matching `OrderedStream::next`'s own "error exactly once,
/// then `Ok(None)` forever after" contract.
///
/// `cancel_handle` is taken before the source is moved into the generator,
/// so callers can still request cancellation (or observe it) independent of
/// the bridge's own lifetime, per the base contract every `OrderedStream`
/// offers.
pub fn into_async_stream<S>(
    mut stream: S,
) -> (
    impl Stream<Item = Result<S::Item, S::Error>> + Send,
    CancelHandle,
)
where
    S: OrderedStream + 'static,
{
    let cancel_handle = stream.cancel_handle();
    let generated = async_stream::stream! {
        loop {
            match stream.next().await {
                Ok(Some(item)) => yield Ok(item),
                Ok(None) => break,
                Err(e) => {
                    yield Err(e);
                    break;
                }
            }
        }
    };
    (generated, cancel_handle)
}

/// Collapses any `Error: std::error::Error + Send + Sync + 'static` into
/// [`AnyStreamError`], for callers that need one uniform error type across
/// otherwise-unrelated streams (storing several in one `Vec`, for example).
pub struct Erased<S: OrderedStream> {
    inner: S,
}

#[async_trait]
impl<S> OrderedStream for Erased<S>
where
    S: OrderedStream,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    type Item = S::Item;
    type Error = AnyStreamError;

    async fn next(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        self.inner
            .next()
            .await
            .map_err(|e| Box::new(e) as AnyStreamError)
    }

    fn cancel(&self) {
        self.inner.cancel();
    }

    fn cancel_handle(&self) -> CancelHandle {
        self.inner.cancel_handle()
    }
}

impl<S: OrderedStream> Drop for Erased<S> {
    fn drop(&mut self) {
        self.inner.cancel();
    }
}

pub trait ErasableStream: OrderedStream + Sized
where
    Self::Error: std::error::Error + Send + Sync + 'static,
{
    fn erase(self) -> Erased<Self> {
        Erased { inner: self }
    }
}

impl<S> ErasableStream for S
where
    S: OrderedStream,
    S::Error: std::error::Error + Send + Sync + 'static,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use ostream_ops::source::from_iter;

    #[tokio::test]
    async fn into_async_stream_yields_every_element_in_order() {
        let (stream, _cancel) = into_async_stream(from_iter(0..5));
        let out: Vec<_> = stream.map(Result::unwrap).collect().await;
        assert_eq!(out, vec![0, 1, 2, 3, 4]);
    }

    #[derive(Debug, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    #[tokio::test]
    async fn erase_widens_a_concrete_error_into_any_stream_error() {
        let stream = ostream_ops::lightweight::TryFilter::new(from_iter(0..5), |n: &i32| {
            if *n == 3 {
                Err(Boom)
            } else {
                Ok(true)
            }
        });
        let mut erased = stream.erase();
        let err = loop {
            match erased.next().await {
                Ok(Some(_)) => continue,
                Ok(None) => panic!("expected an error"),
                Err(e) => break e,
            }
        };
        assert_eq!(err.to_string(), "transform error: boom");
    }
}
