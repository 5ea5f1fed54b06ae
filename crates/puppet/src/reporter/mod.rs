// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Change coalescing.
//!
//! Scene mutations are not reported as they happen. A processing pass runs on
//! the render timer, collects everything that changed since the previous pass,
//! and emits it as a fixed sequence of batched commands:
//!
//! 1. queued tokens
//! 2. `InformationChanged`
//! 3. `ChildrenChanged`, one per affected parent
//! 4. `ValuesChanged`
//! 5. scene rect adjustment (local, nothing sent)
//! 6. `ComponentCompleted`
//! 7. flush, then `Synchronize` when the peer has asked for one

mod timer;

pub use timer::{RenderTimer, TimerMode};

use std::cell::{Cell, RefCell};
use std::time::Duration;

use indexmap::IndexSet;
use ni_core::{Clock, InstanceId, Rect, SystemClock};
use ni_wire::{
    ChildrenChangedCommand, ComponentCompletedCommand, InformationChangedCommand,
    InformationContainer, PropertyValueContainer, SynchronizeCommand, ValuesChangedCommand,
};
use tracing::{debug, trace};

use crate::collaborator::NodeInstanceClient;
use crate::dispatch::SessionState;
use crate::endpoint::ConnectionFault;

/// Per-node dirty flags, reset at the end of each pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyFlags {
    pub transform: bool,
    pub geometry: bool,
    pub content: bool,
}

impl DirtyFlags {
    pub fn any(self) -> bool {
        self.transform || self.geometry || self.content
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeState {
    pub instance_id: InstanceId,
    pub dirty: DirtyFlags,
}

/// What the reporter needs to read from the scene.
pub trait Scene {
    /// Whether a root instance exists and is still alive.
    fn has_live_root(&self) -> bool;

    fn nodes(&self) -> Vec<NodeState>;

    fn is_valid(&self, instance: InstanceId) -> bool;

    /// Drain the `(instance, property name)` changes recorded since the last call.
    fn take_changed_properties(&mut self) -> Vec<(InstanceId, String)>;

    fn reset_dirty(&mut self);

    fn parent_of(&self, instance: InstanceId) -> Option<InstanceId>;

    /// Current children of `parent`, in scene order.
    fn children_of(&self, parent: InstanceId) -> Vec<InstanceId>;

    fn information_for(&self, instances: &[InstanceId]) -> Vec<InformationContainer>;

    fn values_for(&self, changes: &[(InstanceId, String)]) -> Vec<PropertyValueContainer>;

    /// New bounds of the root item, if they changed since the last call.
    fn take_root_rect_change(&mut self) -> Option<Rect>;

    fn set_scene_rect(&mut self, rect: Rect);

    /// Drain instances that finished component completion since the last call.
    fn take_completed_components(&mut self) -> Vec<InstanceId>;
}

/// Why a pass did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A pass was already running further up the call stack.
    Reentrant,
    NoRoot,
    /// The outgoing channel has too many unwritten bytes.
    Backpressure,
}

/// What a completed pass sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    pub tokens: usize,
    pub information: usize,
    pub children_batches: usize,
    pub values: usize,
    pub completed: usize,
    pub scene_rect_adjusted: bool,
    pub synchronized: bool,
}

impl PassStats {
    /// Whether the pass had anything to report.
    pub fn is_busy(&self) -> bool {
        self.tokens + self.information + self.children_batches + self.values + self.completed > 0
            || self.scene_rect_adjusted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    Skipped(SkipReason),
    Flushed(PassStats),
}

#[derive(Debug, Default)]
struct PendingChanges {
    information: IndexSet<InstanceId>,
    properties: Vec<(InstanceId, String)>,
    parent_changed: IndexSet<InstanceId>,
    completed: Vec<InstanceId>,
}

/// Clears the in-progress flag when a pass ends, including on early return.
struct PassGuard<'a>(&'a Cell<bool>);

impl<'a> PassGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Collects scene changes and flushes them to the client in batches.
pub struct ChangeReporter<C: Clock = SystemClock> {
    in_progress: Cell<bool>,
    backpressure_bytes: usize,
    timer: RefCell<RenderTimer<C>>,
}

impl ChangeReporter<SystemClock> {
    pub fn new(backpressure_bytes: usize, fast: Duration, slow: Duration) -> Self {
        Self::with_clock(SystemClock, backpressure_bytes, fast, slow)
    }
}

impl<C: Clock> ChangeReporter<C> {
    pub fn with_clock(clock: C, backpressure_bytes: usize, fast: Duration, slow: Duration) -> Self {
        Self {
            in_progress: Cell::new(false),
            backpressure_bytes,
            timer: RefCell::new(RenderTimer::new(clock, fast, slow)),
        }
    }

    /// Input arrived that may change the scene.
    pub fn wake(&self) {
        self.timer.borrow_mut().wake();
    }

    /// Time until the next pass is due.
    pub fn remaining(&self) -> Duration {
        self.timer.borrow().remaining()
    }

    pub fn timer_mode(&self) -> TimerMode {
        self.timer.borrow().mode()
    }

    /// Run one processing pass.
    ///
    /// A nested call while a pass is running returns immediately. Nothing is
    /// collected or sent when the scene has no root or the client is backed up.
    pub fn process_pass(
        &self,
        scene: &mut dyn Scene,
        client: &mut dyn NodeInstanceClient,
        session: &mut SessionState,
    ) -> Result<PassOutcome, ConnectionFault> {
        let Some(_guard) = PassGuard::enter(&self.in_progress) else {
            trace!("processing pass already running");
            return Ok(PassOutcome::Skipped(SkipReason::Reentrant));
        };
        if !scene.has_live_root() {
            self.timer.borrow_mut().restart();
            return Ok(PassOutcome::Skipped(SkipReason::NoRoot));
        }
        let backlog = client.bytes_to_write();
        if backlog >= self.backpressure_bytes {
            debug!(backlog, limit = self.backpressure_bytes, "skipping pass under backpressure");
            self.timer.borrow_mut().restart();
            return Ok(PassOutcome::Skipped(SkipReason::Backpressure));
        }

        let pending = collect_changes(scene);
        scene.reset_dirty();

        let mut stats = PassStats::default();

        let tokens = session.take_tokens();
        stats.tokens = tokens.len();
        for mut token in tokens {
            token.instance_ids.retain(|&id| scene.is_valid(id));
            client.token(token)?;
        }

        if !pending.information.is_empty() {
            let ids: Vec<InstanceId> = pending.information.iter().copied().collect();
            stats.information = ids.len();
            client.information_changed(InformationChangedCommand {
                informations: scene.information_for(&ids),
            })?;
        }

        stats.children_batches = send_children_changed(scene, client, &pending.parent_changed)?;

        if !pending.properties.is_empty() {
            stats.values = pending.properties.len();
            client.values_changed(ValuesChangedCommand {
                value_changes: scene.values_for(&pending.properties),
                key_number: 0,
            })?;
        }

        if let Some(rect) = scene.take_root_rect_change() {
            if rect.is_valid() {
                scene.set_scene_rect(rect);
                stats.scene_rect_adjusted = true;
            }
        }

        if !pending.completed.is_empty() {
            stats.completed = pending.completed.len();
            client.component_completed(ComponentCompletedCommand { instances: pending.completed })?;
        }

        {
            let mut timer = self.timer.borrow_mut();
            if stats.is_busy() {
                timer.busy();
            } else {
                timer.idle();
            }
        }

        client.flush()?;

        if session.last_requested_sync_id >= 0 {
            client.synchronize(SynchronizeCommand {
                synchronize_id: session.last_requested_sync_id,
            })?;
            stats.synchronized = true;
        }

        debug!(?stats, "processing pass flushed");
        Ok(PassOutcome::Flushed(stats))
    }
}

fn collect_changes(scene: &mut dyn Scene) -> PendingChanges {
    let mut pending = PendingChanges::default();

    for node in scene.nodes() {
        if node.dirty.any() {
            pending.information.insert(node.instance_id);
        }
    }

    for (instance, name) in scene.take_changed_properties() {
        if !scene.is_valid(instance) {
            continue;
        }
        if name.contains("anchors") {
            pending.information.insert(instance);
        }
        if name == "parent" {
            pending.information.insert(instance);
            pending.parent_changed.insert(instance);
        }
        pending.properties.push((instance, name));
    }

    // Reparented instances are reported with their new parent's children.
    for instance in &pending.parent_changed {
        pending.information.shift_remove(instance);
    }

    pending.completed = scene.take_completed_components();
    pending.completed.retain(|&id| scene.is_valid(id));
    pending
}

fn send_children_changed(
    scene: &dyn Scene,
    client: &mut dyn NodeInstanceClient,
    parent_changed: &IndexSet<InstanceId>,
) -> Result<usize, ConnectionFault> {
    let mut parents: IndexSet<InstanceId> = IndexSet::new();
    let mut orphans = Vec::new();
    for &child in parent_changed {
        match scene.parent_of(child) {
            Some(parent) if scene.is_valid(parent) => {
                parents.insert(parent);
            }
            _ => orphans.push(child),
        }
    }

    let mut batches = 0;
    for parent in parents {
        let children = scene.children_of(parent);
        client.children_changed(ChildrenChangedCommand {
            parent_instance_id: Some(parent),
            informations: scene.information_for(&children),
            children,
        })?;
        batches += 1;
    }
    if !orphans.is_empty() {
        client.children_changed(ChildrenChangedCommand {
            parent_instance_id: None,
            informations: scene.information_for(&orphans),
            children: orphans,
        })?;
        batches += 1;
    }
    Ok(batches)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
