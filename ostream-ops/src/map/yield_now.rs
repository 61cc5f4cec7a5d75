// Copyright 2025 ordered-stream contributors
// SPDX-License-Identifier: Apache-2.0

//! A runtime-agnostic replacement for `tokio::task::yield_now()`: wakes
//! itself immediately and returns `Pending` exactly once, handing control
//! back to whichever executor is driving the task. Used at the supervisor's
//! and each worker's single scheduling checkpoint.

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

pub struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            return Poll::Ready(());
        }
        self.yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

pub fn yield_now() -> YieldNow {
    YieldNow { yielded: false }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn yields_exactly_once() {
        yield_now().await;
    }
}
