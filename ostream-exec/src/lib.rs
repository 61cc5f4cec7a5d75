// Copyright 2025 ordered-stream contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![cfg_attr(not(feature = "std"), no_std)]

//! Terminal operations and runtime bridges for [`ostream_core::OrderedStream`].
//!
//! - `bridge`: `collect`, `into_async_stream` (wraps an `OrderedStream` back
//!   into a `futures::Stream<Item = Result<T, E>>`), and `.erase()`.
//! - `for_each`: spawns one task per element, mirroring the reference
//!   workspace's per-item subscription pattern.
//! - `reduce`: `fold`, `reduce_into`, `min`, `max`, `count_where`,
//!   `all_satisfy`, `contains`.

pub mod bridge;
pub mod for_each;
pub mod reduce;

pub use bridge::{into_async_stream, ErasableStream, Erased};
pub use for_each::for_each;
pub use reduce::{all_satisfy, collect, contains, count_where, fold, max, min, reduce_into};
