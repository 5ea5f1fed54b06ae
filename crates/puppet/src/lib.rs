// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Node-instance puppet
//!
//! Hosts a scene on behalf of the IDE, receives scene commands over a local
//! socket or a captured stream, and reports coalesced changes back.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod collaborator;
pub mod dispatch;
pub mod endpoint;
pub mod env;
pub mod lifecycle;
pub mod reporter;
pub mod run;
pub mod scene;
pub mod shared_memory;

#[cfg(test)]
mod test_support;

pub use collaborator::{NodeInstanceClient, NodeInstanceServer};
pub use dispatch::{ClientDispatcher, Dispatched, ServerDispatcher, SessionState};
pub use endpoint::{ChannelRole, ConnectionFault, ControlStream, Endpoint};
pub use lifecycle::{Config, Mode};
pub use reporter::{ChangeReporter, PassOutcome, PassStats, Scene, SkipReason};
pub use run::{run, ExitReason, Puppet};
pub use scene::SceneGraph;
pub use shared_memory::{SegmentKind, SharedMemoryHooks};
