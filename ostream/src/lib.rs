// Copyright 2025 ordered-stream contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # ostream
//!
//! An ordered, cancellable, concurrent async stream engine.
//!
//! ## Overview
//!
//! `ostream` composes elements pulled one at a time, some transforms run
//! concurrently, with a single invariant always held: whatever comes out
//! is in the same order it would have been in if everything had run
//! serially. Cancellation flows downstream to upstream; errors flow
//! upstream to downstream; both compose through plain `Result`-based
//! combinators rather than a dedicated error channel.
//!
//! ## Design Philosophy
//!
//! The crate keeps a clean split between the engine and its tests:
//!
//! - **Production code**: build chains over [`OrderedStream`] using
//!   [`OrderedStreamExt`]'s fluent methods.
//! - **Test code**: use `ostream-test-utils`'s push channel and error
//!   injection helpers to drive a chain under test on demand.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ostream::prelude::*;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let doubled = ostream::source::from_iter(0..100)
//!     .map(|n| async move { n * 2 }, MapConfig::new())
//!     .collect()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub use ostream_core::{CancelHandle, Indexed, OrderedStream};
pub use ostream_error::{AnyStreamError, MapError, MultipleErrors};

pub use ostream_exec::{
    all_satisfy, collect, contains, count_where, fold, for_each, into_async_stream, max, min,
    reduce_into, ErasableStream, Erased,
};

pub use ostream_ops::ext::OrderedStreamExt;
pub use ostream_ops::map::MapConfig;
pub use ostream_ops::{lightweight, source};

/// Convenience re-exports for the common case: pull in the trait, its
/// fluent extension methods, and the knobs the concurrent operators take.
pub mod prelude {
    pub use crate::{
        ErasableStream, MapConfig, OrderedStream, OrderedStreamExt,
    };
    pub use ostream_error::{MapError, MultipleErrors};
}
