// Copyright 2025 ordered-stream contributors
// SPDX-License-Identifier: Apache-2.0

//! A push side paired with an `OrderedStream` consumer, for tests that need
//! to control exactly when and what a stream under test observes.

use async_trait::async_trait;
use std::convert::Infallible;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tokio_stream::wrappers::UnboundedReceiverStream;

use ostream_core::{CancelHandle, OrderedStream};

/// The push half of a [`push_channel`] pair. Cloneable; dropping every clone
/// closes the paired stream once it has drained whatever was already sent.
pub struct PushSender<T> {
    sender: UnboundedSender<T>,
}

impl<T> Clone for PushSender<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T> PushSender<T> {
    /// Pushes a value. Panics if the paired stream has already been
    /// dropped — tests that expect that should check `is_closed` first or
    /// ignore the return value of [`Self::try_push`].
    pub fn push(&self, value: T) {
        self.sender
            .send(value)
            .unwrap_or_else(|_| panic!("push_channel: receiver dropped"));
    }

    /// Pushes a value, returning it back if the paired stream was already
    /// dropped instead of panicking.
    pub fn try_push(&self, value: T) -> Result<(), T> {
        self.sender.send(value).map_err(|e| e.0)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// An `OrderedStream` fed by a [`PushSender`]. Never fails; ends once every
/// sender clone is dropped, or immediately after cancellation.
pub struct PushReceiver<T> {
    inner: UnboundedReceiverStream<T>,
    cancel: CancelHandle,
}

#[async_trait]
impl<T: Send + 'static> OrderedStream for PushReceiver<T> {
    type Item = T;
    type Error = Infallible;

    async fn next(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        use futures::StreamExt;
        if self.cancel.is_cancelled() {
            return Ok(None);
        }
        Ok(self.inner.next().await)
    }

    fn cancel(&self) {
        self.cancel.cancel();
    }

    fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }
}

impl<T> Drop for PushReceiver<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Builds a push/pull pair: push values in from test code via the returned
/// [`PushSender`], pull them back out as an [`OrderedStream`] via the
/// returned [`PushReceiver`].
pub fn push_channel<T: Send + 'static>() -> (PushSender<T>, PushReceiver<T>) {
    let (tx, rx) = unbounded_channel();
    (
        PushSender { sender: tx },
        PushReceiver {
            inner: UnboundedReceiverStream::new(rx),
            cancel: CancelHandle::new(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pushed_values_come_back_in_order() {
        let (tx, mut rx) = push_channel::<i32>();
        tx.push(1);
        tx.push(2);
        tx.push(3);
        drop(tx);

        let mut out = Vec::new();
        while let Some(v) = rx.next().await.unwrap() {
            out.push(v);
        }
        assert_eq!(out, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn dropping_the_receiver_is_observed_by_the_sender() {
        let (tx, rx) = push_channel::<i32>();
        drop(rx);
        // The underlying mpsc may take a tick to notice; a failed push is
        // still the expected outcome either way.
        assert!(tx.try_push(1).is_err() || tx.is_closed());
    }

    #[tokio::test]
    async fn cancel_ends_the_stream_even_with_items_buffered() {
        let (tx, mut rx) = push_channel::<i32>();
        tx.push(1);
        tx.push(2);
        rx.cancel();
        assert_eq!(rx.next().await.unwrap(), None);
    }
}
