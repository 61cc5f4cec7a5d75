// Copyright 2025 ordered-stream contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Source adapters and combinators for [`ostream_core::OrderedStream`].
//!
//! - `source`: three ways to get an `OrderedStream` in the first place
//!   (`from_iter`, `from_async_stream`/`try_from_async_stream`,
//!   `from_enumerator`).
//! - `lightweight`: operators that add no concurrency of their own
//!   (`filter`, `compacted`, `flatten`, `unique`, `concat`).
//! - `map`: the concurrent ordered map engine (`map`, `try_map`), the only
//!   operator family that spawns worker tasks.
//! - `derived`: operators defined as compositions of the above
//!   (`compact_map`, `flat_map`).
//! - `ext`: the `OrderedStreamExt` trait that puts all of the above on every
//!   `OrderedStream` as fluent methods.

pub mod derived;
pub mod enumerator;
pub mod ext;
pub mod lightweight;
pub mod map;
pub mod prelude;
pub mod source;

pub use enumerator::Enumerator;
pub use ext::OrderedStreamExt;
pub use map::MapConfig;
