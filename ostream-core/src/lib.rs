// Copyright 2025 ordered-stream contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

//! Core trait and types for the ordered concurrent stream engine.
//!
//! This crate defines the contract every adapter, operator and terminal in
//! the workspace builds on: a single-consumer, pull-based, cancellable,
//! fallible stream ([`OrderedStream`]), its cancellation handle
//! ([`CancelHandle`]), and the index-tagged item type the concurrent map
//! engine threads through its reorder buffer ([`Indexed`]).

pub mod cancel;
pub mod indexed;
pub mod stream;

pub use cancel::CancelHandle;
pub use indexed::Indexed;
pub use stream::OrderedStream;
