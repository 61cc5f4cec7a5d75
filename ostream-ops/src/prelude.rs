// Copyright 2025 ordered-stream contributors
// SPDX-License-Identifier: Apache-2.0

//! `use ostream_ops::prelude::*;` brings the trait and the source adapters
//! most call sites need into scope.

pub use crate::ext::OrderedStreamExt;
pub use crate::map::MapConfig;
pub use crate::source::{from_async_stream, from_enumerator, from_iter, try_from_async_stream};
pub use ostream_core::OrderedStream;
