// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ni-core: Shared vocabulary for the node-instance protocol
//!
//! Instance identities, flat property values and the clock abstraction used
//! by both the IDE side and the puppet side of the protocol.

pub mod macros;

pub mod clock;
pub mod id;
pub mod value;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use id::InstanceId;
pub use value::{PropertyValue, Rect};
