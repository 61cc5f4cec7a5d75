// Copyright 2025 ordered-stream contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Lightweight operators: no additional concurrency, no worker pool — each
//! just rewraps upstream's `next()` in a small loop. Per-element cost is
//! the cost of one upstream `next()` plus O(1) local work.

mod compacted;
mod concat;
mod filter;
mod flatten;
mod unique;

pub use compacted::Compacted;
pub use concat::Concat;
pub use filter::{Filter, TryFilter};
pub use flatten::{FlattenSeqs, FlattenStreams};
pub use unique::Unique;
