// Copyright 2025 ordered-stream contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{mutex::MutexLike, timer::Timer};
use core::cmp::Ord;
use core::default::Default;
use core::fmt::Debug;
use core::marker::Sized;
use core::marker::{Copy, Send, Sync};

/// The pieces of an async executor the engine needs but does not want to
/// hard-code: a mutex type and a sleep/timer type. Task spawning is
/// deliberately not part of this trait — see [`crate::SupervisorTask`],
/// which selects its spawn primitive via Cargo feature directly, the same
/// way the reference workspace's own task handle does.
pub trait Runtime: 'static {
    type Mutex<T: ?Sized>: MutexLike<T>;
    type Timer: Timer<Instant = Self::Instant> + Default;
    type Instant: Copy + Ord + Send + Sync + Debug;
}
