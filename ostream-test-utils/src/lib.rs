// Copyright 2025 ordered-stream contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test harness utilities shared across the workspace's own test suites.
//!
//! - `channel`: [`push_channel`], a push side paired with an `OrderedStream`
//!   consumer, for feeding items into an operator under test on demand.
//! - `error_injection`: [`ErrorInjectingStream`], which wraps a stream and
//!   fails at a configured position, for exercising error propagation and
//!   cancellation.
//! - `progress`: [`ProgressCounter`], a shared, clonable counter for
//!   asserting how far a stream got before it was dropped or cancelled.

pub mod channel;
pub mod error_injection;
pub mod progress;

pub use channel::{push_channel, PushSender};
pub use error_injection::ErrorInjectingStream;
pub use progress::ProgressCounter;
