// Copyright 2025 ordered-stream contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The three source adapters: `from_iter`, `from_async_stream` /
//! `try_from_async_stream`, and `from_enumerator`. None of these introduce
//! ordering concerns of their own — they are serial, pull-through wrappers.

use crate::enumerator::Enumerator;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use ostream_core::{CancelHandle, OrderedStream};
use std::any::Any;
use std::convert::Infallible;
use std::marker::PhantomData;
use std::pin::Pin;

/// Wraps a synchronous iterator. Never fails; `cancel` is a no-op beyond
/// flipping the shared flag (there is no upstream work to halt).
pub struct FromIter<I> {
    iter: I,
    cancel: CancelHandle,
}

pub fn from_iter<I>(into_iter: I) -> FromIter<I::IntoIter>
where
    I: IntoIterator,
    I::IntoIter: Send,
{
    FromIter {
        iter: into_iter.into_iter(),
        cancel: CancelHandle::new(),
    }
}

#[async_trait]
impl<I> OrderedStream for FromIter<I>
where
    I: Iterator + Send,
    I::Item: Send,
{
    type Item = I::Item;
    type Error = Infallible;

    async fn next(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        if self.cancel.is_cancelled() {
            return Ok(None);
        }
        Ok(self.iter.next())
    }

    fn cancel(&self) {
        self.cancel.cancel();
    }

    fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }
}

impl<I> Drop for FromIter<I> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Wraps any `futures::Stream<Item = T>`. Never fails.
pub struct FromAsyncStream<S> {
    stream: Pin<Box<S>>,
    cancel: CancelHandle,
}

pub fn from_async_stream<S>(stream: S) -> FromAsyncStream<S>
where
    S: Stream + Send,
{
    FromAsyncStream {
        stream: Box::pin(stream),
        cancel: CancelHandle::new(),
    }
}

#[async_trait]
impl<S> OrderedStream for FromAsyncStream<S>
where
    S: Stream + Send,
    S::Item: Send,
{
    type Item = S::Item;
    type Error = Infallible;

    async fn next(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        if self.cancel.is_cancelled() {
            return Ok(None);
        }
        Ok(self.stream.next().await)
    }

    fn cancel(&self) {
        self.cancel.cancel();
    }

    fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }
}

impl<S> Drop for FromAsyncStream<S> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Wraps any `futures::Stream<Item = Result<T, E>>`. `next()` surfaces the
/// wrapped stream's own failure type unchanged.
pub struct TryFromAsyncStream<S> {
    stream: Pin<Box<S>>,
    cancel: CancelHandle,
}

pub fn try_from_async_stream<S, T, E>(stream: S) -> TryFromAsyncStream<S>
where
    S: Stream<Item = Result<T, E>> + Send,
{
    TryFromAsyncStream {
        stream: Box::pin(stream),
        cancel: CancelHandle::new(),
    }
}

#[async_trait]
impl<S, T, E> OrderedStream for TryFromAsyncStream<S>
where
    S: Stream<Item = Result<T, E>> + Send,
    T: Send,
    E: Send,
{
    type Item = T;
    type Error = E;

    async fn next(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        if self.cancel.is_cancelled() {
            return Ok(None);
        }
        match self.stream.next().await {
            None => Ok(None),
            Some(Ok(value)) => Ok(Some(value)),
            Some(Err(e)) => {
                self.cancel.cancel();
                Err(e)
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

impl<S> Drop for TryFromAsyncStream<S> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Wraps a type-erased [`Enumerator`], downcasting each produced value to
/// the caller-requested `T` and skipping values that don't match it. Never
/// fails.
pub struct FromEnumerator<T> {
    enumerator: Box<dyn Enumerator>,
    cancel: CancelHandle,
    _marker: PhantomData<fn() -> T>,
}

pub fn from_enumerator<T: 'static>(enumerator: Box<dyn Enumerator>) -> FromEnumerator<T> {
    FromEnumerator {
        enumerator,
        cancel: CancelHandle::new(),
        _marker: PhantomData,
    }
}

#[async_trait]
impl<T> OrderedStream for FromEnumerator<T>
where
    T: Send + 'static,
{
    type Item = T;
    type Error = Infallible;

    async fn next(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            if self.cancel.is_cancelled() {
                return Ok(None);
            }
            match self.enumerator.next_any() {
                None => return Ok(None),
                Some(boxed) => {
                    if let Ok(value) = (boxed as Box<dyn Any + Send>).downcast::<T>() {
                        return Ok(Some(*value));
                    }
                    // Wrong concrete type for this stream — skip and keep pulling.
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

impl<T> Drop for FromEnumerator<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
