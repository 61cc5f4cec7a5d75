// Copyright 2025 ordered-stream contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![cfg_attr(not(feature = "std"), no_std)]

//! Runtime abstraction so the concurrent map engine is not hard-wired to
//! one async executor.
//!
//! Selecting an executor is a Cargo feature choice (`runtime-tokio`,
//! `runtime-smol`, `runtime-async-std`, best-effort `runtime-wasm`),
//! default `runtime-tokio`. [`Runtime`] abstracts the mutex and timer types
//! an executor wants you to use; [`SupervisorTask`] abstracts spawning a
//! detached, cancel-on-drop background task, which is how the C4 engine's
//! supervisor and the `for_each` terminal dispatch per-item workers.

pub mod impls;
pub mod mutex;
pub mod runtime;
pub mod supervisor;
pub mod timer;

pub use mutex::MutexLike;
pub use runtime::Runtime;
pub use supervisor::{spawn_detached, SupervisorTask};
pub use timer::Timer;
